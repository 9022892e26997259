//! Zone affinities: soft "prefers to sit in this area" preferences.

use std::collections::{HashMap, HashSet};

use uuid::Uuid;

use crate::student::StudentId;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Stable identifier for a zone rectangle on the chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ZoneId(Uuid);

impl ZoneId {
    /// Creates a fresh random identifier.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for ZoneId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for ZoneId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

/// Multi-valued student → preferred-zones mapping.
///
/// A student may prefer zero, one, or many zones. When assigning seats,
/// a student with several affinities is placed toward exactly one of them,
/// chosen uniformly at random for that run.
#[derive(Debug, Clone, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ZoneAffinities {
    zones: HashMap<StudentId, HashSet<ZoneId>>,
}

impl ZoneAffinities {
    /// Creates an empty affinity map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a preference for the given zone.
    pub fn add(&mut self, student: StudentId, zone: ZoneId) {
        self.zones.entry(student).or_default().insert(zone);
    }

    /// Removes one preference.
    pub fn remove(&mut self, student: StudentId, zone: ZoneId) {
        if let Some(set) = self.zones.get_mut(&student) {
            set.remove(&zone);
            if set.is_empty() {
                self.zones.remove(&student);
            }
        }
    }

    /// Removes every preference a student holds.
    pub fn remove_student(&mut self, student: StudentId) {
        self.zones.remove(&student);
    }

    /// Removes a deleted zone from every student's preference set.
    pub fn remove_zone(&mut self, zone: ZoneId) {
        self.zones.retain(|_, set| {
            set.remove(&zone);
            !set.is_empty()
        });
    }

    /// The zones a student prefers, if any.
    pub fn zones_for(&self, student: StudentId) -> Option<&HashSet<ZoneId>> {
        self.zones.get(&student)
    }

    /// Returns true if no preferences are stored.
    pub fn is_empty(&self) -> bool {
        self.zones.is_empty()
    }
}
