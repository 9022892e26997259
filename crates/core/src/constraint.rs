//! Avoid-pair constraints between students.

use std::collections::{HashMap, HashSet};

use crate::student::StudentId;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A symmetric "should not sit together" relation over students.
///
/// Stored as an adjacency list keyed by student id. Every mutation keeps
/// the relation symmetric: adding A→B also adds B→A, and removing a student
/// purges both directions. Constraints are soft — the assigner and
/// partitioner relax them when no conflict-free placement exists.
#[derive(Debug, Clone, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ConstraintSet {
    pairs: HashMap<StudentId, HashSet<StudentId>>,
}

impl ConstraintSet {
    /// Creates an empty constraint set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an avoid-pair. A student is never constrained against itself.
    pub fn add(&mut self, a: StudentId, b: StudentId) {
        if a == b {
            return;
        }
        self.pairs.entry(a).or_default().insert(b);
        self.pairs.entry(b).or_default().insert(a);
    }

    /// Removes an avoid-pair, both directions.
    pub fn remove(&mut self, a: StudentId, b: StudentId) {
        if let Some(set) = self.pairs.get_mut(&a) {
            set.remove(&b);
            if set.is_empty() {
                self.pairs.remove(&a);
            }
        }
        if let Some(set) = self.pairs.get_mut(&b) {
            set.remove(&a);
            if set.is_empty() {
                self.pairs.remove(&b);
            }
        }
    }

    /// Removes every pair involving the given student.
    pub fn remove_student(&mut self, id: StudentId) {
        if let Some(others) = self.pairs.remove(&id) {
            for other in others {
                if let Some(set) = self.pairs.get_mut(&other) {
                    set.remove(&id);
                    if set.is_empty() {
                        self.pairs.remove(&other);
                    }
                }
            }
        }
    }

    /// Returns true if the two students must avoid each other.
    pub fn conflicts(&self, a: StudentId, b: StudentId) -> bool {
        self.pairs.get(&a).is_some_and(|set| set.contains(&b))
    }

    /// Number of avoid-relations the given student participates in.
    ///
    /// Used to seat the hardest-constrained students first.
    pub fn count(&self, id: StudentId) -> usize {
        self.pairs.get(&id).map_or(0, HashSet::len)
    }

    /// The students the given student must avoid.
    pub fn avoided_by(&self, id: StudentId) -> impl Iterator<Item = StudentId> + '_ {
        self.pairs.get(&id).into_iter().flatten().copied()
    }

    /// Returns true if no pairs are stored.
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }
}
