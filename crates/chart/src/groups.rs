//! Extraction of seating groups from freeform item placement.
//!
//! A group is either the full seat set of one round table or one connected
//! component of desks under the 8-way adjacency rule. Groups and their
//! slots are ordered in reading order (ascending y, then x) so placement is
//! stable across re-runs for the same layout.

use std::collections::HashMap;

use crate::adjacency::are_adjacent;
use crate::item::{GridPos, ItemId, PlacedItem, SeatRef};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// One physical cluster of seats: a desk component or a round table.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SeatingGroup {
    /// Member slots in reading order (tables: seat-index order).
    pub slots: Vec<SeatRef>,
    /// Top-left-most grid coordinate, used for deterministic ordering.
    pub anchor: GridPos,
}

impl SeatingGroup {
    /// Number of seats in the group.
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }
}

/// Extracts all seating groups from a flat item collection.
///
/// Every desk and every seat of a non-empty round table lands in exactly
/// one group; labels, zones, and zero-seat tables contribute nothing. The
/// returned list is sorted by anchor in reading order.
pub fn extract_groups(items: &[PlacedItem]) -> Vec<SeatingGroup> {
    let mut groups = Vec::new();

    // Round tables are atomic groups.
    for item in items {
        if let PlacedItem::RoundTable {
            id,
            origin,
            num_seats,
            ..
        } = item
        {
            if *num_seats > 0 {
                groups.push(SeatingGroup {
                    slots: (0..*num_seats).map(|i| SeatRef::table_seat(*id, i)).collect(),
                    anchor: *origin,
                });
            }
        }
    }

    // Desks form connected components under 8-way adjacency.
    let desks: Vec<(ItemId, GridPos)> = items
        .iter()
        .filter_map(|item| match item {
            PlacedItem::Desk { id, pos, .. } => Some((*id, *pos)),
            _ => None,
        })
        .collect();

    let mut visited = vec![false; desks.len()];
    for start in 0..desks.len() {
        if visited[start] {
            continue;
        }
        let mut component = Vec::new();
        let mut stack = vec![start];
        visited[start] = true;
        while let Some(current) = stack.pop() {
            component.push(current);
            for next in 0..desks.len() {
                if !visited[next] && are_adjacent(desks[current].1, desks[next].1) {
                    visited[next] = true;
                    stack.push(next);
                }
            }
        }
        component.sort_by_key(|&i| desks[i].1);
        groups.push(SeatingGroup {
            anchor: desks[component[0]].1,
            slots: component.into_iter().map(|i| SeatRef::desk(desks[i].0)).collect(),
        });
    }

    groups.sort_by_key(|g| g.anchor);
    groups
}

/// Maps every slot to the index of its group in `groups`.
pub fn slot_group_index(groups: &[SeatingGroup]) -> HashMap<SeatRef, usize> {
    let mut index = HashMap::new();
    for (i, group) in groups.iter().enumerate() {
        for slot in &group.slots {
            index.insert(*slot, i);
        }
    }
    index
}
