//! Desk adjacency on the placement grid.
//!
//! A single 8-way (diagonal-inclusive) adjacency rule is used everywhere a
//! feature needs to know whether two desks belong together. Round tables
//! never participate: a table is always its own atomic group.

use crate::item::GridPos;

/// Returns true if two distinct grid cells are 8-way neighbors.
pub fn are_adjacent(a: GridPos, b: GridPos) -> bool {
    a != b && (a.x - b.x).abs() <= 1 && (a.y - b.y).abs() <= 1
}
