//! Constraint-aware random seat assignment.

use std::collections::{HashMap, HashSet};

use rand::rngs::StdRng;
use rand::seq::SliceRandom;

use seatplan_core::{
    Advisory, AssignReport, ConstraintSet, Result, Roster, StudentId, ZoneAffinities, ZoneId,
    make_rng,
};

use crate::groups::{extract_groups, slot_group_index};
use crate::item::{ItemId, PixelRect, PlacedItem, SeatRef};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Default pixel size of one grid cell.
pub const DEFAULT_CELL_SIZE: f64 = 50.0;

/// Options for [`assign_seats`].
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ChartOptions {
    /// Symmetric avoid-pairs, honored best-effort.
    pub constraints: ConstraintSet,

    /// Soft zone preferences per student.
    pub affinities: ZoneAffinities,

    /// Pixel size of one grid cell, used to test seat centers against
    /// zone rectangles.
    pub cell_size: f64,

    /// RNG seed for reproducible runs (`None` = OS entropy).
    pub seed: Option<u64>,
}

impl Default for ChartOptions {
    fn default() -> Self {
        Self {
            constraints: ConstraintSet::new(),
            affinities: ZoneAffinities::new(),
            cell_size: DEFAULT_CELL_SIZE,
            seed: None,
        }
    }
}

impl ChartOptions {
    /// Creates options with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the avoid-pair constraints.
    pub fn with_constraints(mut self, constraints: ConstraintSet) -> Self {
        self.constraints = constraints;
        self
    }

    /// Sets the zone affinities.
    pub fn with_affinities(mut self, affinities: ZoneAffinities) -> Self {
        self.affinities = affinities;
        self
    }

    /// Sets the grid cell size in pixels.
    pub fn with_cell_size(mut self, cell_size: f64) -> Self {
        self.cell_size = cell_size;
        self
    }

    /// Sets the RNG seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }
}

/// Randomly assigns the present roster to the layout's seats.
///
/// Marked slots are left untouched; students already pinned to one are kept
/// out of the random pool. Students with zone affinities are drawn toward
/// one of their preferred zones (chosen uniformly per run), the hardest-
/// constrained students are seated first, and avoid-pairs are relaxed when
/// no conflict-free seat remains. Every non-marked slot that receives no
/// student is cleared, so the operation is idempotent and never leaves a
/// stale name from a previous run.
///
/// Returns the updated item collection (same identities, new occupancy)
/// and an advisory report; the operation itself never fails on capacity or
/// constraint grounds.
pub fn assign_seats(
    items: &[PlacedItem],
    roster: &Roster,
    options: &ChartOptions,
) -> Result<(Vec<PlacedItem>, AssignReport)> {
    for item in items {
        item.validate()?;
    }

    let mut working: Vec<PlacedItem> = items.to_vec();
    let index_of: HashMap<ItemId, usize> = working
        .iter()
        .enumerate()
        .map(|(i, item)| (item.id(), i))
        .collect();

    let groups = extract_groups(items);
    let group_of = slot_group_index(&groups);
    let all_slots: Vec<SeatRef> = groups.iter().flat_map(|g| g.slots.iter().copied()).collect();

    // Split locked (marked) slots from the assignable pool and wipe the
    // assignable pool up front: clearing-then-placing makes the run
    // idempotent.
    let mut locked_students: HashSet<StudentId> = HashSet::new();
    let mut free_slots: Vec<SeatRef> = Vec::new();
    for slot in &all_slots {
        let item = &working[index_of[&slot.item]];
        if item.is_marked(slot.seat) {
            if let Some(student) = item.occupant(slot.seat) {
                locked_students.insert(student);
            }
        } else {
            free_slots.push(*slot);
        }
    }
    for slot in &free_slots {
        working[index_of[&slot.item]].set_occupant(slot.seat, None);
    }

    // Pinned students still count toward avoid-pair checks in their group.
    let mut group_members: Vec<Vec<StudentId>> = vec![Vec::new(); groups.len()];
    for slot in &all_slots {
        if let Some(student) = working[index_of[&slot.item]].occupant(slot.seat) {
            group_members[group_of[slot]].push(student);
        }
    }

    let mut rng = make_rng(options.seed);
    let mut report = AssignReport::new();

    let to_assign: Vec<StudentId> = roster
        .present_ids()
        .into_iter()
        .filter(|id| !locked_students.contains(id))
        .collect();

    // Zone rectangles in item order; per-zone candidate slots by seat
    // center containment.
    let zones: Vec<(ZoneId, PixelRect)> = items
        .iter()
        .filter_map(|item| match item {
            PlacedItem::Zone { zone, rect, .. } => Some((*zone, *rect)),
            _ => None,
        })
        .collect();
    let zone_ids: HashSet<ZoneId> = zones.iter().map(|(id, _)| *id).collect();
    let zone_slots: Vec<(ZoneId, Vec<SeatRef>)> = zones
        .iter()
        .map(|(zone, rect)| {
            let slots = free_slots
                .iter()
                .copied()
                .filter(|slot| {
                    working[index_of[&slot.item]]
                        .seat_center(slot.seat, options.cell_size)
                        .is_some_and(|(x, y)| rect.contains(x, y))
                })
                .collect();
            (*zone, slots)
        })
        .collect();

    // Bucket students: one affinity-matching bucket per student (uniform
    // random among their preferred zones for this run), or the global pool.
    let mut buckets: HashMap<ZoneId, Vec<StudentId>> = HashMap::new();
    let mut unzoned: Vec<StudentId> = Vec::new();
    for student in to_assign {
        let mut preferred: Vec<ZoneId> = options
            .affinities
            .zones_for(student)
            .map(|set| set.iter().copied().filter(|z| zone_ids.contains(z)).collect())
            .unwrap_or_default();
        preferred.sort();
        match preferred.choose(&mut rng) {
            Some(zone) => buckets.entry(*zone).or_default().push(student),
            None => unzoned.push(student),
        }
    }

    let mut seater = Seater {
        working: &mut working,
        index_of: &index_of,
        group_of: &group_of,
        group_members,
        constraints: &options.constraints,
        occupied: HashSet::new(),
        violations: 0,
    };

    // Zone phase: greedy within each zone, overflow carried to the
    // global pool.
    for (zone, candidates) in &zone_slots {
        let Some(bucket) = buckets.remove(zone) else {
            continue;
        };
        let mut open: Vec<SeatRef> = candidates
            .iter()
            .copied()
            .filter(|slot| !seater.occupied.contains(slot))
            .collect();
        let leftover = seater.place_all(bucket, &mut open, &mut rng);
        if !leftover.is_empty() {
            log::debug!("zone {zone} full; {} student(s) moved to global pool", leftover.len());
            report.push(Advisory::ZoneOverflow {
                zone: *zone,
                overflow: leftover.len(),
            });
            unzoned.extend(leftover);
        }
    }

    // Global phase over every still-free slot.
    let mut open: Vec<SeatRef> = free_slots
        .iter()
        .copied()
        .filter(|slot| !seater.occupied.contains(slot))
        .collect();
    let leftover = seater.place_all(unzoned, &mut open, &mut rng);

    if !leftover.is_empty() {
        log::warn!("{} student(s) left unseated: roster exceeds capacity", leftover.len());
        report.push(Advisory::CapacityShortfall {
            unseated: leftover.len(),
        });
    }
    if seater.violations > 0 {
        let violations = seater.violations;
        log::debug!("seat assignment relaxed {violations} avoid-pair(s)");
        report.push(Advisory::ConstraintRelaxed { violations });
    }

    Ok((working, report))
}

/// Greedy placement state shared by the zone and global phases.
struct Seater<'a> {
    working: &'a mut Vec<PlacedItem>,
    index_of: &'a HashMap<ItemId, usize>,
    group_of: &'a HashMap<SeatRef, usize>,
    group_members: Vec<Vec<StudentId>>,
    constraints: &'a ConstraintSet,
    occupied: HashSet<SeatRef>,
    violations: usize,
}

impl Seater<'_> {
    /// Seats as many of `students` as possible into `open` slots.
    ///
    /// Shuffles both lists, seats hardest-constrained students first, and
    /// prefers a slot whose group holds no conflicting occupant; when every
    /// open slot conflicts, any open slot is accepted and the violation
    /// counted. Returns the students who found no seat at all.
    fn place_all(
        &mut self,
        mut students: Vec<StudentId>,
        open: &mut Vec<SeatRef>,
        rng: &mut StdRng,
    ) -> Vec<StudentId> {
        students.shuffle(rng);
        if !self.constraints.is_empty() {
            // Stable sort keeps the shuffled order within equal counts.
            students.sort_by_key(|id| std::cmp::Reverse(self.constraints.count(*id)));
        }
        open.shuffle(rng);

        let mut leftover = Vec::new();
        for student in students {
            let pick = open
                .iter()
                .position(|slot| {
                    !self.occupied.contains(slot) && self.conflict_free(student, *slot)
                })
                .or_else(|| {
                    let fallback = open.iter().position(|slot| !self.occupied.contains(slot));
                    if fallback.is_some() {
                        self.violations += 1;
                    }
                    fallback
                });
            match pick {
                Some(i) => {
                    let slot = open[i];
                    self.working[self.index_of[&slot.item]].set_occupant(slot.seat, Some(student));
                    self.occupied.insert(slot);
                    self.group_members[self.group_of[&slot]].push(student);
                }
                None => leftover.push(student),
            }
        }
        leftover
    }

    /// Returns true if no current member of the slot's group conflicts
    /// with the student.
    fn conflict_free(&self, student: StudentId, slot: SeatRef) -> bool {
        let group = self.group_of[&slot];
        !self.group_members[group]
            .iter()
            .any(|&member| self.constraints.conflicts(student, member))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::item::GridPos;

    fn occupants_of(items: &[PlacedItem]) -> Vec<StudentId> {
        items
            .iter()
            .flat_map(|item| {
                item.seat_slots()
                    .into_iter()
                    .filter_map(|slot| item.occupant(slot.seat))
                    .collect::<Vec<_>>()
            })
            .collect()
    }

    #[test]
    fn test_everyone_seated_when_capacity_suffices() {
        let items = vec![
            PlacedItem::desk(GridPos::new(0, 0)),
            PlacedItem::desk(GridPos::new(1, 0)),
            PlacedItem::round_table(GridPos::new(4, 0), 3),
        ];
        let roster = Roster::from_names(["A", "B", "C", "D"]);
        let options = ChartOptions::new().with_seed(7);
        let (out, report) = assign_seats(&items, &roster, &options).unwrap();

        let mut seated = occupants_of(&out);
        seated.sort();
        seated.dedup();
        assert_eq!(seated.len(), 4);
        assert!(report.is_clean());
    }

    #[test]
    fn test_empty_roster_clears_all_non_marked_slots() {
        let mut desk = PlacedItem::desk(GridPos::new(0, 0));
        let stale = StudentId::new();
        desk.set_occupant(None, Some(stale));
        let items = vec![desk, PlacedItem::round_table(GridPos::new(2, 0), 2)];

        let (out, report) = assign_seats(&items, &Roster::new(), &ChartOptions::new()).unwrap();
        assert!(occupants_of(&out).is_empty());
        assert!(report.is_clean());
    }

    #[test]
    fn test_marked_slot_and_occupant_preserved() {
        let mut roster = Roster::new();
        let pinned = roster.add("Pinned");
        roster.add("Other");

        let mut desk = PlacedItem::desk(GridPos::new(0, 0));
        if let PlacedItem::Desk {
            occupant, marked, ..
        } = &mut desk
        {
            *occupant = Some(pinned);
            *marked = true;
        }
        let desk_id = desk.id();
        let items = vec![desk, PlacedItem::desk(GridPos::new(5, 5))];

        let options = ChartOptions::new().with_seed(3);
        let (out, report) = assign_seats(&items, &roster, &options).unwrap();

        let kept = out.iter().find(|i| i.id() == desk_id).unwrap();
        assert_eq!(kept.occupant(None), Some(pinned));
        // The pinned student is not seated a second time.
        assert_eq!(occupants_of(&out).iter().filter(|&&s| s == pinned).count(), 1);
        assert!(report.is_clean());
    }

    #[test]
    fn test_capacity_shortfall_reported_not_failed() {
        let items = vec![PlacedItem::desk(GridPos::new(0, 0))];
        let roster = Roster::from_names(["A", "B", "C"]);
        let options = ChartOptions::new().with_seed(1);
        let (out, report) = assign_seats(&items, &roster, &options).unwrap();

        assert_eq!(occupants_of(&out).len(), 1);
        assert_eq!(report.unseated(), 2);
    }

    #[test]
    fn test_no_slots_with_nonempty_roster() {
        let roster = Roster::from_names(["A"]);
        let (out, report) = assign_seats(&[], &roster, &ChartOptions::new()).unwrap();
        assert!(out.is_empty());
        assert_eq!(report.unseated(), 1);
    }

    #[test]
    fn test_avoid_pair_split_across_groups() {
        // Two separate desk clusters of two; the pair should land in
        // different clusters.
        let items = vec![
            PlacedItem::desk(GridPos::new(0, 0)),
            PlacedItem::desk(GridPos::new(1, 0)),
            PlacedItem::desk(GridPos::new(8, 8)),
            PlacedItem::desk(GridPos::new(9, 8)),
        ];
        let mut roster = Roster::new();
        let a = roster.add("A");
        let b = roster.add("B");
        let mut constraints = ConstraintSet::new();
        constraints.add(a, b);

        for seed in 0..20 {
            let options = ChartOptions::new()
                .with_constraints(constraints.clone())
                .with_seed(seed);
            let (out, report) = assign_seats(&items, &roster, &options).unwrap();

            let groups = extract_groups(&out);
            for group in &groups {
                let members: Vec<StudentId> = group
                    .slots
                    .iter()
                    .filter_map(|slot| {
                        out.iter()
                            .find(|i| i.id() == slot.item)
                            .and_then(|i| i.occupant(slot.seat))
                    })
                    .collect();
                assert!(!(members.contains(&a) && members.contains(&b)));
            }
            assert!(report.is_clean());
        }
    }

    #[test]
    fn test_unsatisfiable_pair_seated_with_advisory() {
        // One two-seat table and the avoid-pair as the whole roster: both
        // are seated anyway and the relaxation is reported.
        let items = vec![PlacedItem::round_table(GridPos::new(0, 0), 2)];
        let mut roster = Roster::new();
        let a = roster.add("A");
        let b = roster.add("B");
        let mut constraints = ConstraintSet::new();
        constraints.add(a, b);

        let options = ChartOptions::new().with_constraints(constraints).with_seed(5);
        let (out, report) = assign_seats(&items, &roster, &options).unwrap();

        assert_eq!(occupants_of(&out).len(), 2);
        assert!(report.constraint_violations() > 0);
    }

    #[test]
    fn test_zone_affinity_draws_student_into_zone() {
        // Zone covering the left desk only.
        let left = PlacedItem::desk(GridPos::new(0, 0));
        let left_id = left.id();
        let zone = PlacedItem::zone(PixelRect::new(0.0, 0.0, 50.0, 50.0), "front");
        let zone_id = match &zone {
            PlacedItem::Zone { zone, .. } => *zone,
            _ => unreachable!(),
        };
        let items = vec![left, PlacedItem::desk(GridPos::new(9, 9)), zone];

        let mut roster = Roster::new();
        let fan = roster.add("Fan");
        roster.add("Other");
        let mut affinities = ZoneAffinities::new();
        affinities.add(fan, zone_id);

        for seed in 0..10 {
            let options = ChartOptions::new()
                .with_affinities(affinities.clone())
                .with_seed(seed);
            let (out, report) = assign_seats(&items, &roster, &options).unwrap();
            let left_item = out.iter().find(|i| i.id() == left_id).unwrap();
            assert_eq!(left_item.occupant(None), Some(fan));
            assert!(report.is_clean());
        }
    }

    #[test]
    fn test_zone_overflow_carried_to_global_pool() {
        // One-seat zone, two students preferring it: the second lands on
        // the outside desk and the overflow is reported.
        let zone = PlacedItem::zone(PixelRect::new(0.0, 0.0, 50.0, 50.0), "front");
        let zone_id = match &zone {
            PlacedItem::Zone { zone, .. } => *zone,
            _ => unreachable!(),
        };
        let items = vec![
            PlacedItem::desk(GridPos::new(0, 0)),
            PlacedItem::desk(GridPos::new(9, 9)),
            zone,
        ];

        let mut roster = Roster::new();
        let mut affinities = ZoneAffinities::new();
        for name in ["A", "B"] {
            let id = roster.add(name);
            affinities.add(id, zone_id);
        }

        let options = ChartOptions::new().with_affinities(affinities).with_seed(2);
        let (out, report) = assign_seats(&items, &roster, &options).unwrap();

        assert_eq!(occupants_of(&out).len(), 2);
        assert!(report
            .advisories
            .iter()
            .any(|a| matches!(a, Advisory::ZoneOverflow { overflow: 1, .. })));
        assert_eq!(report.unseated(), 0);
    }

    #[test]
    fn test_absent_students_not_seated() {
        let items = vec![
            PlacedItem::desk(GridPos::new(0, 0)),
            PlacedItem::desk(GridPos::new(5, 0)),
        ];
        let mut roster = Roster::from_names(["A", "B"]);
        let absent = roster.iter().next().unwrap().id;
        roster.mark_absent(absent);

        let options = ChartOptions::new().with_seed(4);
        let (out, _) = assign_seats(&items, &roster, &options).unwrap();
        assert!(!occupants_of(&out).contains(&absent));
        assert_eq!(occupants_of(&out).len(), 1);
    }

    #[test]
    fn test_seeded_runs_are_identical() {
        let items = vec![
            PlacedItem::desk(GridPos::new(0, 0)),
            PlacedItem::desk(GridPos::new(1, 0)),
            PlacedItem::round_table(GridPos::new(4, 0), 4),
        ];
        let roster = Roster::from_names(["A", "B", "C", "D", "E"]);
        let options = ChartOptions::new().with_seed(99);
        let (a, _) = assign_seats(&items, &roster, &options).unwrap();
        let (b, _) = assign_seats(&items, &roster, &options).unwrap();
        assert_eq!(a, b);
    }
}
