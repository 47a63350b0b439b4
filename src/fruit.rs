//! Random fruit placement.

use rand::Rng;

use crate::{grid, Coords};

/// Sampling is capped so a pathologically full field degrades to "no fruit
/// this tick" instead of spinning forever; the caller retries next tick.
fn max_attempts() -> usize {
    grid::interior_area() * 2
}

/// Picks a uniformly random interior cell for which `occupied` is false,
/// or None once the attempt cap is hit.
pub fn place(rng: &mut impl Rng, occupied: impl Fn(Coords) -> bool) -> Option<Coords> {
    for _ in 0..max_attempts() {
        let cell = (
            rng.gen_range(2..grid::WIDTH),
            rng.gen_range(2..grid::FIELD_BOTTOM),
        );
        if !occupied(cell) {
            return Some(cell);
        }
    }
    None
}
