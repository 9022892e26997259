//! Advisory reporting for best-effort operations.

use crate::affinity::ZoneId;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A non-fatal condition the caller may want to surface as a notification.
///
/// Advisories never abort an operation: the engine always completes with a
/// best-effort placement and describes what it had to compromise on.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Advisory {
    /// The roster exceeded the available non-locked capacity; this many
    /// students were left unseated.
    CapacityShortfall { unseated: usize },

    /// A zone could not fit all students who preferred it; the overflow
    /// was carried over to global placement.
    ZoneOverflow { zone: ZoneId, overflow: usize },

    /// Avoid-pair constraints could not all be honored; this many
    /// placements violate one.
    ConstraintRelaxed { violations: usize },

    /// This many clusters had to be split when migrating between maps.
    ClusterSplit { clusters_split: usize },
}

/// Outcome report attached to every assignment, migration, or partition.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct AssignReport {
    /// Advisory conditions encountered, in the order they were detected.
    pub advisories: Vec<Advisory>,
}

impl AssignReport {
    /// Creates an empty (clean) report.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true if the operation completed without compromises.
    pub fn is_clean(&self) -> bool {
        self.advisories.is_empty()
    }

    /// Records an advisory.
    pub fn push(&mut self, advisory: Advisory) {
        self.advisories.push(advisory);
    }

    /// Number of students left unseated, summed over shortfall advisories.
    pub fn unseated(&self) -> usize {
        self.advisories
            .iter()
            .map(|a| match a {
                Advisory::CapacityShortfall { unseated } => *unseated,
                _ => 0,
            })
            .sum()
    }

    /// Number of placements that violate an avoid-pair.
    pub fn constraint_violations(&self) -> usize {
        self.advisories
            .iter()
            .map(|a| match a {
                Advisory::ConstraintRelaxed { violations } => *violations,
                _ => 0,
            })
            .sum()
    }

    /// Number of clusters split during migration.
    pub fn clusters_split(&self) -> usize {
        self.advisories
            .iter()
            .map(|a| match a {
                Advisory::ClusterSplit { clusters_split } => *clusters_split,
                _ => 0,
            })
            .sum()
    }

    /// Appends another report's advisories (for chained operations).
    pub fn merge(&mut self, other: AssignReport) {
        self.advisories.extend(other.advisories);
    }
}
