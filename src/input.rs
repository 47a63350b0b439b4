//! Key decoding and the direction state machine.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::snake::Direction::{self, *};

/// Game-level commands decoded from raw key events.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Command {
    Turn(Direction),
    Quit,
}

/// Maps one raw key event to a command. Unrecognized keys are no-ops.
pub fn decode(ev: &KeyEvent) -> Option<Command> {
    if is_ctrl_c(ev) {
        return Some(Command::Quit);
    }

    match ev.code {
        KeyCode::Char('w') | KeyCode::Char('W') | KeyCode::Up => Some(Command::Turn(Up)),
        KeyCode::Char('a') | KeyCode::Char('A') | KeyCode::Left => Some(Command::Turn(Left)),
        KeyCode::Char('s') | KeyCode::Char('S') | KeyCode::Down => Some(Command::Turn(Down)),
        KeyCode::Char('d') | KeyCode::Char('D') | KeyCode::Right => Some(Command::Turn(Right)),
        KeyCode::Char('x') | KeyCode::Char('X') | KeyCode::Esc => Some(Command::Quit),
        _ => None,
    }
}

fn is_ctrl_c(ev: &KeyEvent) -> bool {
    matches!(ev, KeyEvent { code: KeyCode::Char('c'), modifiers: KeyModifiers::CONTROL })
}

/// Validated heading for the snake. A turn that exactly reverses the current
/// heading is silently dropped, since it would drive the head straight into
/// the neck. Quit is absorbing.
pub struct Steering {
    current: Direction,
    previous: Direction,
    quit: bool,
}

impl Steering {
    pub fn new(initial: Direction) -> Self {
        Steering { current: initial, previous: initial, quit: false }
    }

    pub fn apply(&mut self, command: Command) {
        match command {
            Command::Quit => self.quit = true,
            Command::Turn(dir) if dir.is_opposite(self.current) => {}
            Command::Turn(dir) => {
                self.previous = self.current;
                self.current = dir;
            }
        }
    }

    pub fn direction(&self) -> Direction {
        self.current
    }

    /// The heading held before the last accepted turn.
    pub fn previous(&self) -> Direction {
        self.previous
    }

    pub fn quit_requested(&self) -> bool {
        self.quit
    }
}
