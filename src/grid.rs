//! Playing-field geometry. Coordinates are 1-indexed grid cells; the field
//! is bounded by a one-cell border ring, and the rows below the field hold
//! the score line and end-of-game messages.

use crate::{Coords, TermInt};

pub const WIDTH: TermInt = 50;
pub const HEIGHT: TermInt = 25;

/// Bottom border row. The field occupies rows 1..=FIELD_BOTTOM; the
/// remaining rows up to HEIGHT are the status area.
pub const FIELD_BOTTOM: TermInt = HEIGHT - 4;

/// Row of the score line.
pub const STATUS_ROW: TermInt = FIELD_BOTTOM + 1;

/// Touching any of the four boundary lines is the loss condition.
pub fn on_border(cell: Coords) -> bool {
    cell.0 == 1 || cell.0 == WIDTH || cell.1 == 1 || cell.1 == FIELD_BOTTOM
}

/// Cells strictly inside the border ring, i.e. everywhere fruit may land.
pub fn interior_area() -> usize {
    (WIDTH as usize - 2) * (FIELD_BOTTOM as usize - 2)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn corners_and_edges_are_border() {
        assert!(on_border((1, 1)));
        assert!(on_border((WIDTH, 1)));
        assert!(on_border((1, FIELD_BOTTOM)));
        assert!(on_border((WIDTH, FIELD_BOTTOM)));
        assert!(on_border((25, 1)));
        assert!(on_border((1, 10)));
    }

    #[test]
    fn interior_cells_are_not_border() {
        assert!(!on_border((2, 2)));
        assert!(!on_border((WIDTH - 1, FIELD_BOTTOM - 1)));
        assert!(!on_border((30, 10)));
    }
}
