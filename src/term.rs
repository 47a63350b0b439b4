//! Terminal adapter. Everything crossterm-specific lives behind this type;
//! the rest of the crate deals in 1-indexed grid cells and plain chars.

use std::{io::{stdout, Stdout, Write}, time::Duration};

use crossterm::event::{poll, read, Event, KeyEvent};
use crossterm::terminal::{ClearType, EnterAlternateScreen, LeaveAlternateScreen};
use crossterm::{cursor, execute, queue, style, terminal, Result};

use crate::{grid, Coords, TermInt};

pub struct TermManager {
    stdout: Stdout,
}

impl TermManager {
    pub fn new() -> Self {
        TermManager { stdout: stdout() }
    }

    /// Enters the alternate screen and raw mode, hides the cursor. Must
    /// succeed before a session runs; a failure here aborts the program.
    pub fn setup(&mut self) -> Result<()> {
        execute!(self.stdout, EnterAlternateScreen)?;
        terminal::enable_raw_mode()?;
        execute!(self.stdout, cursor::Hide, cursor::DisableBlinking)
    }

    /// Undoes `setup`. Called on every exit path.
    pub fn restore(&mut self) -> Result<()> {
        execute!(self.stdout, cursor::Show, cursor::EnableBlinking)?;
        terminal::disable_raw_mode()?;
        execute!(self.stdout, LeaveAlternateScreen)
    }

    /// Returns at most one buffered key press without ever blocking.
    /// Non-key events (e.g. resizes) are drained and discarded.
    pub fn poll_key(&mut self) -> Result<Option<KeyEvent>> {
        while poll(Duration::from_millis(0))? {
            if let Event::Key(ev) = read()? {
                return Ok(Some(ev));
            }
        }
        Ok(None)
    }

    pub fn read_key_blocking(&mut self) -> Result<KeyEvent> {
        loop {
            if let Event::Key(ev) = read()? {
                return Ok(ev);
            }
        }
    }

    /// Queues one glyph at a 1-indexed grid cell. Not flushed until
    /// `flush` is called, so a tick's worth of updates lands at once.
    pub fn print_at(&mut self, cell: Coords, ch: char) -> Result<()> {
        queue!(self.stdout, cursor::MoveTo(cell.0 - 1, cell.1 - 1), style::Print(ch))
    }

    /// Queues a line of text starting at a 1-indexed cell.
    pub fn print_text(&mut self, x: TermInt, y: TermInt, text: &str) -> Result<()> {
        queue!(self.stdout, cursor::MoveTo(x - 1, y - 1), style::Print(text))
    }

    pub fn clear(&mut self) -> Result<()> {
        execute!(self.stdout, terminal::Clear(ClearType::All))
    }

    /// Terminal bell; best-effort, some emulators render it as a flash.
    pub fn bell(&mut self) -> Result<()> {
        queue!(self.stdout, style::Print('\u{7}'))
    }

    pub fn flush(&mut self) -> Result<()> {
        self.stdout.flush()?;
        Ok(())
    }

    pub fn draw_border(&mut self) -> Result<()> {
        for y in 2..grid::FIELD_BOTTOM {
            self.print_at((1, y), '│')?;
            self.print_at((grid::WIDTH, y), '│')?;
        }

        for x in 2..grid::WIDTH {
            self.print_at((x, 1), '─')?;
            self.print_at((x, grid::FIELD_BOTTOM), '─')?;
        }

        self.print_at((1, 1), '┌')?;
        self.print_at((grid::WIDTH, 1), '┐')?;
        self.print_at((1, grid::FIELD_BOTTOM), '└')?;
        self.print_at((grid::WIDTH, grid::FIELD_BOTTOM), '┘')?;
        self.flush()
    }
}
