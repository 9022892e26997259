//! Partition policy configuration.

use crate::error::{Error, Result};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// How the number of teams is framed by the caller.
///
/// The two framings are reconcilable: for a roster of `n` present students,
/// `Size(k)` behaves as `Count(n / k)` (floor, minimum one group).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum GroupTarget {
    /// Split into exactly this many teams.
    Count(usize),
    /// Split into teams of this size.
    Size(usize),
}

/// Policy for [`partition_into_teams`](crate::partition::partition_into_teams).
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PartitionPolicy {
    /// Team count or team size framing.
    pub target: GroupTarget,

    /// When set, fill teams to the exact target size and collect any
    /// remainder into one final, smaller team of its own. When unset, the
    /// remainder is spread one-per-team over the first teams.
    pub keep_extra_separate: bool,

    /// When set, pick one uniformly random member per non-empty team as
    /// its leader.
    pub select_leaders: bool,

    /// RNG seed for reproducible runs (`None` = OS entropy).
    pub seed: Option<u64>,
}

impl PartitionPolicy {
    /// Creates a policy with the given target and default flags.
    pub fn new(target: GroupTarget) -> Self {
        Self {
            target,
            keep_extra_separate: false,
            select_leaders: false,
            seed: None,
        }
    }

    /// Sets the keep-extra-separate flag.
    pub fn with_keep_extra_separate(mut self, keep: bool) -> Self {
        self.keep_extra_separate = keep;
        self
    }

    /// Sets the select-leaders flag.
    pub fn with_select_leaders(mut self, select: bool) -> Self {
        self.select_leaders = select;
        self
    }

    /// Sets the RNG seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Validates the policy.
    pub fn validate(&self) -> Result<()> {
        match self.target {
            GroupTarget::Count(0) => Err(Error::InvalidPolicy("group count must be > 0".into())),
            GroupTarget::Size(0) => Err(Error::InvalidPolicy("group size must be > 0".into())),
            _ => Ok(()),
        }
    }

    /// Number of teams for a roster of `total` present students.
    ///
    /// Validation must have passed; `total` must be > 0.
    pub(crate) fn num_groups(&self, total: usize) -> usize {
        match self.target {
            GroupTarget::Count(count) => count,
            GroupTarget::Size(size) => (total / size).max(1),
        }
    }

    /// Exact per-team size under the keep-extra-separate rule.
    pub(crate) fn exact_size(&self, total: usize) -> usize {
        match self.target {
            GroupTarget::Count(count) => total / count,
            GroupTarget::Size(size) => size,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_targets_rejected() {
        assert!(PartitionPolicy::new(GroupTarget::Count(0)).validate().is_err());
        assert!(PartitionPolicy::new(GroupTarget::Size(0)).validate().is_err());
        assert!(PartitionPolicy::new(GroupTarget::Count(3)).validate().is_ok());
    }

    #[test]
    fn test_size_framing_matches_count_framing() {
        let by_size = PartitionPolicy::new(GroupTarget::Size(3));
        assert_eq!(by_size.num_groups(10), 3);
        // A size larger than the roster still yields one group.
        assert_eq!(by_size.num_groups(2), 1);
    }
}
