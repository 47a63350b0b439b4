use std::{thread::sleep, time::Duration};

use crate::input::{self, Command, Steering};
use crate::snake::{Direction::Right, Snake};
use crate::term::TermManager;
use crate::{fruit, grid, Coords, TermInt};

use crossterm::Result;
use rand::rngs::StdRng;
use rand::SeedableRng;

const TICK_INTERVAL: Duration = Duration::from_millis(100);
const SCORE_PER_FRUIT: u32 = 10;
const START_HEAD: Coords = (30, 10);

const HEAD_CHAR: char = '@';
const BODY_CHAR: char = '*';
const FRUIT_CHAR: char = 'X';

/// How a session ended. Both values are terminal: a finished session is
/// only ever replaced by a fresh one.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Outcome {
    Lost,
    Quit,
}

/// Draw intents emitted by the session. The driver interprets them against
/// the terminal adapter; the session itself never touches the terminal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DrawOp {
    Put(Coords, char),
    Clear(Coords),
    Score(u32),
    Bell,
}

pub struct Step {
    pub outcome: Option<Outcome>,
    pub ops: Vec<DrawOp>,
}

/// One game of snake: the body model, the active fruit, the heading, and
/// the score, advanced by exactly one `step` per tick.
pub struct Session {
    snake: Snake,
    fruit: Option<Coords>,
    steering: Steering,
    score: u32,
    rng: StdRng,
}

impl Session {
    pub fn new(mut rng: StdRng) -> Self {
        let snake = Snake::new(START_HEAD, Right);
        let fruit = fruit::place(&mut rng, |c| snake.occupies(c));
        Session { snake, fruit, steering: Steering::new(Right), score: 0, rng }
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    /// Draw ops for the full starting state, issued once per session.
    pub fn render_full(&self) -> Vec<DrawOp> {
        let mut ops = vec![DrawOp::Put(self.snake.head(), HEAD_CHAR)];
        for cell in self.snake.cells().skip(1) {
            ops.push(DrawOp::Put(cell, BODY_CHAR));
        }
        if let Some(cell) = self.fruit {
            ops.push(DrawOp::Put(cell, FRUIT_CHAR));
        }
        ops.push(DrawOp::Score(self.score));
        ops
    }

    /// Advances the game by one tick. `command` is this tick's decoded key
    /// press, if any; with no input the snake keeps going straight.
    pub fn step(&mut self, command: Option<Command>) -> Step {
        if let Some(command) = command {
            self.steering.apply(command);
        }

        if self.steering.quit_requested() {
            return Step { outcome: Some(Outcome::Quit), ops: vec![] };
        }

        // The candidate head is validated against the current body, before
        // anything moves, so a fatal move is never committed or rendered.
        let candidate = self.snake.peek_ahead(self.steering.direction());
        if self.snake.is_fatal(candidate) {
            return Step { outcome: Some(Outcome::Lost), ops: vec![] };
        }

        let mut ops = Vec::with_capacity(6);
        let ate = self.fruit == Some(candidate);
        if ate {
            // Set before the advance so this tick's shift skips the tail drop.
            self.snake.grow();
        }

        let delta = self.snake.advance(self.steering.direction());
        // Erase the tail before drawing: on a tail-grace move the head
        // lands on the freed cell, and a later Clear would blank it.
        if let Some(freed) = delta.freed {
            ops.push(DrawOp::Clear(freed));
        }
        ops.push(DrawOp::Put(delta.new_head, HEAD_CHAR));
        ops.push(DrawOp::Put(delta.neck, BODY_CHAR));

        if ate {
            self.score += SCORE_PER_FRUIT;
            self.fruit = None;
            ops.push(DrawOp::Bell);
            ops.push(DrawOp::Score(self.score));
        }

        // A missing fruit means the last placement hit its attempt cap;
        // keep retrying once per tick until one lands.
        if self.fruit.is_none() {
            let snake = &self.snake;
            if let Some(cell) = fruit::place(&mut self.rng, |c| snake.occupies(c)) {
                ops.push(DrawOp::Put(cell, FRUIT_CHAR));
                self.fruit = Some(cell);
            }
        }

        Step { outcome: None, ops }
    }
}

/// Owns the terminal adapter and drives sessions in real time.
pub struct SnakeGame {
    term: TermManager,
}

impl SnakeGame {
    pub fn new() -> Self {
        SnakeGame { term: TermManager::new() }
    }

    /// Sets up the terminal, runs rounds until the player quits, then
    /// restores the terminal. Adapter errors abort the run; `main` still
    /// performs a final best-effort restore.
    pub fn run(&mut self) -> Result<()> {
        self.term.setup()?;

        if self.show_intro()? {
            loop {
                let (outcome, score) = self.play_round()?;
                self.show_summary(outcome, score)?;

                // Any non-quit key starts a fresh round.
                if let Some(Command::Quit) = input::decode(&self.term.read_key_blocking()?) {
                    break;
                }
            }
        }

        self.term.restore()
    }

    /// Best-effort restore for error paths.
    pub fn teardown(&mut self) {
        self.term.restore().ok();
    }

    fn play_round(&mut self) -> Result<(Outcome, u32)> {
        let mut session = Session::new(StdRng::from_entropy());

        self.term.clear()?;
        self.term.draw_border()?;
        self.apply(&session.render_full())?;
        self.term.flush()?;

        loop {
            sleep(TICK_INTERVAL);

            let command = match self.term.poll_key()? {
                Some(ev) => input::decode(&ev),
                None => None,
            };

            let step = session.step(command);
            self.apply(&step.ops)?;
            self.term.flush()?;

            if let Some(outcome) = step.outcome {
                return Ok((outcome, session.score()));
            }
        }
    }

    fn apply(&mut self, ops: &[DrawOp]) -> Result<()> {
        for op in ops {
            match *op {
                DrawOp::Put(cell, ch) => self.term.print_at(cell, ch)?,
                DrawOp::Clear(cell) => self.term.print_at(cell, ' ')?,
                DrawOp::Score(score) => {
                    self.term.print_text(5, grid::STATUS_ROW, &format!("Score: {}", score))?
                }
                DrawOp::Bell => self.term.bell()?,
            }
        }
        Ok(())
    }

    /// Returns false if the player quit from the intro screen.
    fn show_intro(&mut self) -> Result<bool> {
        let lines = [
            "SNAKE",
            "",
            "WASD or arrow keys to steer",
            "x, Esc or Ctrl+C to quit",
            "",
            "DO NOT touch the borders",
            "DO NOT reverse movement",
            "DO NOT eat your own tail",
            "",
            "Press any key to begin",
        ];

        self.term.clear()?;
        for (i, line) in lines.iter().enumerate() {
            self.term.print_text(6, 3 + i as TermInt, line)?;
        }
        self.term.flush()?;

        let key = self.term.read_key_blocking()?;
        Ok(input::decode(&key) != Some(Command::Quit))
    }

    fn show_summary(&mut self, outcome: Outcome, score: u32) -> Result<()> {
        let title = match outcome {
            Outcome::Lost => "Game over!",
            Outcome::Quit => "Quit.",
        };

        self.term
            .print_text(2, grid::STATUS_ROW + 1, &format!("{} Final score: {}", title, score))?;
        self.term
            .print_text(2, grid::STATUS_ROW + 2, "Press any key to play again, x to quit.")?;
        self.term.flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::snake::Direction::{Down, Left, Up};

    fn session() -> Session {
        let mut session = Session::new(StdRng::seed_from_u64(42));
        // Park the fruit in a corner so movement tests never eat by accident.
        session.fruit = Some((2, 2));
        session
    }

    #[test]
    fn five_empty_ticks_move_the_head_five_cells_right() {
        let mut s = session();

        for _ in 0..5 {
            let step = s.step(None);
            assert_eq!(step.outcome, None);
        }

        assert_eq!(s.snake.head(), (35, 10));
        assert_eq!(s.snake.len(), 2);
        assert_eq!(s.score(), 0);
    }

    #[test]
    fn reversal_key_is_ignored_and_the_snake_keeps_going() {
        let mut s = session();

        s.step(Some(Command::Turn(Left)));
        assert_eq!(s.steering.direction(), Right);
        assert_eq!(s.snake.head(), (31, 10));
    }

    #[test]
    fn perpendicular_turn_is_applied_on_the_same_tick() {
        let mut s = session();

        s.step(Some(Command::Turn(Up)));
        assert_eq!(s.steering.direction(), Up);
        assert_eq!(s.snake.head(), (30, 9));
    }

    #[test]
    fn eating_scores_grows_and_respawns_exactly_one_fruit() {
        let mut s = session();
        s.fruit = Some((31, 10));

        let step = s.step(None);

        assert_eq!(step.outcome, None);
        assert_eq!(s.score(), 10);
        assert_eq!(s.snake.len(), 3);
        assert!(step.ops.contains(&DrawOp::Bell));
        assert!(step.ops.contains(&DrawOp::Score(10)));
        // No tail cell was cleared on the growth tick.
        assert!(!step.ops.iter().any(|op| matches!(op, DrawOp::Clear(_))));

        let fruit = s.fruit.expect("a replacement fruit was placed");
        assert_ne!(fruit, (31, 10));
        assert!(!s.snake.occupies(fruit));
        assert!(!grid::on_border(fruit));

        let respawns = step
            .ops
            .iter()
            .filter(|op| matches!(op, DrawOp::Put(_, FRUIT_CHAR)))
            .count();
        assert_eq!(respawns, 1);
    }

    #[test]
    fn reaching_the_border_column_loses_with_the_score_intact() {
        let mut s = session();

        // Head starts at x = 30; x = 49 is the last safe column.
        for _ in 0..19 {
            assert_eq!(s.step(None).outcome, None);
        }
        assert_eq!(s.snake.head(), (49, 10));

        let step = s.step(None);
        assert_eq!(step.outcome, Some(Outcome::Lost));
        assert!(step.ops.is_empty(), "a fatal move must not be rendered");
        assert_eq!(s.snake.head(), (49, 10), "a fatal move must not be committed");
        assert_eq!(s.score(), 0);
    }

    #[test]
    fn moving_into_the_vacating_tail_cell_keeps_the_head_drawn() {
        // Curl a length-4 snake into a 2x2 loop so the next move enters
        // the very cell the tail frees on the same tick.
        let mut s = session();
        s.snake.grow();
        s.snake.advance(Down);
        s.snake.grow();
        s.snake.advance(Left);
        assert_eq!(s.snake.head(), (29, 11));

        let step = s.step(Some(Command::Turn(Up)));
        assert_eq!(step.outcome, None);
        assert_eq!(s.snake.head(), (29, 10));

        // The freed cell is the one the head just entered; the erase must
        // come first so it never lands on top of the head glyph.
        let clear = step
            .ops
            .iter()
            .position(|op| *op == DrawOp::Clear((29, 10)))
            .expect("tail cell cleared");
        let head = step
            .ops
            .iter()
            .position(|op| *op == DrawOp::Put((29, 10), HEAD_CHAR))
            .expect("head drawn");
        assert!(clear < head, "head glyph erased by a later tail clear");
    }

    #[test]
    fn quit_ends_the_session_before_any_movement() {
        let mut s = session();
        let head = s.snake.head();

        let step = s.step(Some(Command::Quit));
        assert_eq!(step.outcome, Some(Outcome::Quit));
        assert_eq!(s.snake.head(), head);

        // Absorbing: later ticks stay quit even with movement input.
        let step = s.step(Some(Command::Turn(Up)));
        assert_eq!(step.outcome, Some(Outcome::Quit));
    }

    #[test]
    fn new_session_renders_snake_fruit_and_score() {
        let s = session();
        let ops = s.render_full();

        assert!(ops.contains(&DrawOp::Put((30, 10), HEAD_CHAR)));
        assert!(ops.contains(&DrawOp::Put((29, 10), BODY_CHAR)));
        assert!(ops.contains(&DrawOp::Put((2, 2), FRUIT_CHAR)));
        assert!(ops.contains(&DrawOp::Score(0)));
    }
}
