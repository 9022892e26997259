//! Cross-map cluster migration.
//!
//! After assigning the roster on a primary layout, the same social clusters
//! (who sits with whom) are re-placed onto a secondary layout wherever
//! capacity allows: greedy first-fit-by-size bin packing, largest cluster
//! first into the tightest-fitting secondary group, splitting a cluster
//! only when no group can hold it whole. Cluster preservation is a soft
//! goal; splits and unseated students are advisories, never errors.

use std::collections::{HashMap, HashSet};

use seatplan_core::{Advisory, AssignReport, Result, StudentId};

use crate::groups::extract_groups;
use crate::item::{ItemId, PlacedItem, SeatRef};

/// Re-places the primary map's populated clusters onto the secondary map.
///
/// Marked secondary slots keep their pinned occupants; a student pinned on
/// the secondary map is never placed a second time. Every other secondary
/// slot is cleared before placement, and leftover or split-off students are
/// pooled into the remaining free seats in reading order.
pub fn migrate_clusters(
    primary: &[PlacedItem],
    secondary: &[PlacedItem],
) -> Result<(Vec<PlacedItem>, AssignReport)> {
    for item in primary.iter().chain(secondary) {
        item.validate()?;
    }

    let mut working: Vec<PlacedItem> = secondary.to_vec();
    let index_of: HashMap<ItemId, usize> = working
        .iter()
        .enumerate()
        .map(|(i, item)| (item.id(), i))
        .collect();

    // Students pinned on marked secondary slots stay where they are.
    let mut pinned: HashSet<StudentId> = HashSet::new();
    let mut bins: Vec<Bin> = Vec::new();
    for group in extract_groups(secondary) {
        let mut free = Vec::new();
        for slot in group.slots {
            let item = &working[index_of[&slot.item]];
            if item.is_marked(slot.seat) {
                if let Some(student) = item.occupant(slot.seat) {
                    pinned.insert(student);
                }
            } else {
                free.push(slot);
            }
        }
        bins.push(Bin { free, used: 0 });
    }
    for bin in &bins {
        for slot in &bin.free {
            working[index_of[&slot.item]].set_occupant(slot.seat, None);
        }
    }

    // Populated clusters from the primary map, minus students already
    // pinned on the secondary map.
    let primary_of: HashMap<ItemId, usize> = primary
        .iter()
        .enumerate()
        .map(|(i, item)| (item.id(), i))
        .collect();
    let mut clusters: Vec<Vec<StudentId>> = extract_groups(primary)
        .into_iter()
        .map(|group| {
            group
                .slots
                .iter()
                .filter_map(|slot| primary[primary_of[&slot.item]].occupant(slot.seat))
                .filter(|student| !pinned.contains(student))
                .collect::<Vec<_>>()
        })
        .filter(|members: &Vec<StudentId>| !members.is_empty())
        .collect();

    // Largest first; stable sort keeps reading order within equal sizes.
    clusters.sort_by_key(|c| std::cmp::Reverse(c.len()));

    let mut report = AssignReport::new();
    let mut splits = 0usize;
    let mut leftover: Vec<StudentId> = Vec::new();

    while !clusters.is_empty() {
        let cluster = clusters.remove(0);

        // Tightest fit: the smallest secondary group that still holds the
        // whole cluster, so large tables are not wasted on small clusters.
        let fit = bins
            .iter()
            .enumerate()
            .filter(|(_, bin)| bin.remaining() >= cluster.len())
            .min_by_key(|(_, bin)| bin.remaining())
            .map(|(i, _)| i);

        match fit {
            Some(i) => place(&mut working, &index_of, &mut bins[i], &cluster),
            None => {
                // Split across the largest remaining group; the remainder
                // is carried forward as its own cluster.
                let Some(i) = (0..bins.len()).max_by_key(|&i| bins[i].remaining()) else {
                    leftover.extend(cluster);
                    continue;
                };
                let room = bins[i].remaining();
                if room == 0 {
                    leftover.extend(cluster);
                    continue;
                }
                place(&mut working, &index_of, &mut bins[i], &cluster[..room]);
                let remainder = cluster[room..].to_vec();
                splits += 1;
                log::debug!(
                    "cluster of {} split: {} placed, {} carried forward",
                    cluster.len(),
                    room,
                    remainder.len()
                );
                let pos = clusters
                    .iter()
                    .position(|c| c.len() < remainder.len())
                    .unwrap_or(clusters.len());
                clusters.insert(pos, remainder);
            }
        }
    }

    // Pool leftovers into any remaining free seats, in reading order.
    let mut unseated = 0usize;
    for student in leftover {
        match bins.iter_mut().find(|bin| bin.remaining() > 0) {
            Some(bin) => place(&mut working, &index_of, bin, &[student]),
            None => unseated += 1,
        }
    }

    if splits > 0 {
        report.push(Advisory::ClusterSplit {
            clusters_split: splits,
        });
    }
    if unseated > 0 {
        log::warn!("{unseated} student(s) did not fit on the secondary map");
        report.push(Advisory::CapacityShortfall { unseated });
    }

    Ok((working, report))
}

/// One secondary-map group viewed as a capacity bin.
struct Bin {
    free: Vec<SeatRef>,
    used: usize,
}

impl Bin {
    fn remaining(&self) -> usize {
        self.free.len() - self.used
    }
}

/// Seats `students` into the bin's next free slots.
fn place(
    working: &mut [PlacedItem],
    index_of: &HashMap<ItemId, usize>,
    bin: &mut Bin,
    students: &[StudentId],
) {
    for student in students {
        let slot = bin.free[bin.used];
        working[index_of[&slot.item]].set_occupant(slot.seat, Some(*student));
        bin.used += 1;
    }
}
