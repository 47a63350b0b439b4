use std::collections::VecDeque;

use crate::{grid, Coords};
use Direction::*;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub fn opposite(self) -> Direction {
        match self {
            Up => Down,
            Down => Up,
            Left => Right,
            Right => Left,
        }
    }

    pub fn is_opposite(self, other: Direction) -> bool {
        matches!(
            (self, other),
            (Up, Down) | (Down, Up) | (Left, Right) | (Right, Left)
        )
    }
}

/// Cells touched by a committed move, handed to the renderer.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct StepDelta {
    pub new_head: Coords,
    /// The cell the head just vacated, now the first body cell.
    pub neck: Coords,
    /// The dropped tail cell, or None on the tick after eating.
    pub freed: Option<Coords>,
}

/// The snake is a head plus a history of past head positions, most recent
/// first. `body[0]` is always where the head sat one tick ago, so the deque
/// never needs more capacity than the current length.
pub struct Snake {
    head: Coords,
    body: VecDeque<Coords>,
    grow_next_move: bool,
}

impl Snake {
    /// Starts a length-2 snake: the head plus one cell directly behind it.
    pub fn new(head: Coords, direction: Direction) -> Self {
        let mut body = VecDeque::new();
        body.push_back(step(head, direction.opposite()));
        Snake { head, body, grow_next_move: false }
    }

    pub fn head(&self) -> Coords {
        self.head
    }

    pub fn len(&self) -> usize {
        1 + self.body.len()
    }

    /// Head first, then body cells from neck to tail.
    pub fn cells(&self) -> impl Iterator<Item = Coords> + '_ {
        std::iter::once(self.head).chain(self.body.iter().copied())
    }

    pub fn occupies(&self, cell: Coords) -> bool {
        self.cells().any(|c| c == cell)
    }

    /// Candidate head one unit step away. Legality is the caller's problem.
    pub fn peek_ahead(&self, direction: Direction) -> Coords {
        step(self.head, direction)
    }

    /// True if moving onto `cell` ends the game. The border ring is always
    /// fatal. Body cells are fatal except the tail-end: it vacates on the
    /// same tick the head could enter it, so it gets a one-tick pass.
    pub fn is_fatal(&self, cell: Coords) -> bool {
        let checked = self.body.len().saturating_sub(1);
        grid::on_border(cell) || self.body.iter().take(checked).any(|&c| c == cell)
    }

    /// Commits a move. The old head becomes the neck; the oldest history
    /// cell is dropped, unless a growth was pending, in which case it is
    /// kept and the snake is one cell longer from now on.
    pub fn advance(&mut self, direction: Direction) -> StepDelta {
        let neck = self.head;
        self.head = step(self.head, direction);
        self.body.push_front(neck);

        let freed = if self.grow_next_move {
            self.grow_next_move = false;
            None
        } else {
            self.body.pop_back()
        };

        StepDelta { new_head: self.head, neck, freed }
    }

    /// Marks the next `advance` as a growth tick.
    pub fn grow(&mut self) {
        self.grow_next_move = true;
    }
}

fn step((x, y): Coords, direction: Direction) -> Coords {
    match direction {
        Up => (x, y - 1),
        Down => (x, y + 1),
        Left => (x - 1, y),
        Right => (x + 1, y),
    }
}
