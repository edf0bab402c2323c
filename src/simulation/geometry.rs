//! Path geometry over the four-quadrant intersection model
//!
//! Every corner a maneuver touches counts as fully occupied. Real lanes are
//! finer than that (two cars facing each other can both turn left if they
//! keep left of center), but that is not modelled here.

use super::types::{Corner, Direction, TurnSignal};

/// Rotate `start` forward by `offset` steps of the direction cycle.
///
/// Starting from `Behind` the offset itself is the result, and starting
/// from `Ahead` every offset is reversed.
pub fn resulting_position(start: Direction, offset: Direction) -> Direction {
    Direction::from_index(start.index() + offset.index())
}

/// The corners a vehicle entering from `entry` sweeps through, in driving order
pub fn needed_corners(entry: Direction, turn: TurnSignal) -> Vec<Corner> {
    let first = entry.index();
    (first..first + turn.corner_count())
        .map(Corner::from_index)
        .collect()
}

/// Rotate the world so that `reference` becomes `Behind`, and report where
/// `other` ends up.
pub fn relative_position(reference: Direction, other: Direction) -> Direction {
    // +4 keeps the subtraction in range before wrapping
    Direction::from_index(other.index() + 4 - reference.index())
}

/// Whether my path (entering from `Behind`) shares a corner with the other car's
pub fn paths_intersect(
    my_turn: TurnSignal,
    other_relative_position: Direction,
    other_turn: TurnSignal,
) -> bool {
    let mine = needed_corners(Direction::Behind, my_turn);
    needed_corners(other_relative_position, other_turn)
        .iter()
        .any(|corner| mine.contains(corner))
}
