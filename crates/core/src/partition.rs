//! Random partition of the roster into balanced teams.

use rand::seq::SliceRandom;

use crate::constraint::ConstraintSet;
use crate::error::Result;
use crate::policy::PartitionPolicy;
use crate::report::{Advisory, AssignReport};
use crate::rng::make_rng;
use crate::student::{Roster, StudentId};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// One team produced by [`partition_into_teams`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Team {
    /// Team members, in randomized display order.
    pub members: Vec<StudentId>,
    /// Optional leader, one uniformly random member.
    pub leader: Option<StudentId>,
}

impl Team {
    /// Number of members.
    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// Returns true if the team has no members.
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}

/// Splits the present roster into randomized teams.
///
/// Every present student lands in exactly one team. Avoid-pairs are honored
/// greedily (hardest-constrained students placed first, first team without
/// a conflict preferred) and relaxed when no conflict-free team has room;
/// relaxations are reported as an advisory, never an error.
pub fn partition_into_teams(
    roster: &Roster,
    constraints: &ConstraintSet,
    policy: &PartitionPolicy,
) -> Result<(Vec<Team>, AssignReport)> {
    policy.validate()?;

    let mut report = AssignReport::new();
    let present = roster.present_ids();
    if present.is_empty() {
        return Ok((Vec::new(), report));
    }

    let total = present.len();
    let num_groups = policy.num_groups(total);
    let mut rng = make_rng(policy.seed);

    let mut order = present;
    order.shuffle(&mut rng);
    if !constraints.is_empty() {
        // Stable sort keeps the shuffled order within equal counts.
        order.sort_by_key(|id| std::cmp::Reverse(constraints.count(*id)));
    }

    // Per-team capacities. Their sum always equals the roster size, so the
    // greedy fill below can never strand a student.
    let capacities = team_capacities(total, num_groups, policy);

    let mut teams: Vec<Vec<StudentId>> = vec![Vec::new(); capacities.len()];
    let mut violations = 0usize;
    for student in order {
        let slot = (0..teams.len())
            .find(|&i| {
                teams[i].len() < capacities[i]
                    && !teams[i].iter().any(|&m| constraints.conflicts(student, m))
            })
            .or_else(|| (0..teams.len()).find(|&i| teams[i].len() < capacities[i]));
        match slot {
            Some(i) => {
                if teams[i].iter().any(|&m| constraints.conflicts(student, m)) {
                    violations += 1;
                }
                teams[i].push(student);
            }
            None => {
                // Unreachable by construction, but never drop a student.
                if let Some(team) = teams.last_mut() {
                    team.push(student);
                }
            }
        }
    }

    if violations > 0 {
        log::debug!("partition relaxed {violations} avoid-pair(s)");
        report.push(Advisory::ConstraintRelaxed { violations });
    }

    let teams = teams
        .into_iter()
        .map(|mut members| {
            // Re-shuffle so constraint-prioritized students are not always
            // listed first.
            members.shuffle(&mut rng);
            let leader = if policy.select_leaders {
                members.choose(&mut rng).copied()
            } else {
                None
            };
            Team { members, leader }
        })
        .collect();

    Ok((teams, report))
}

/// Computes per-team capacities summing to `total`.
///
/// Default rule: base size `total / num_groups`, with the first
/// `total % num_groups` teams taking one extra. Keep-extra-separate rule:
/// exactly `num_groups` teams of the exact target size, with any leftover
/// students forming one final, smaller team.
fn team_capacities(total: usize, num_groups: usize, policy: &PartitionPolicy) -> Vec<usize> {
    if policy.keep_extra_separate {
        let size = policy.exact_size(total);
        let seated = (size * num_groups).min(total);
        let mut capacities = vec![size; num_groups];
        let leftover = total - seated;
        if leftover > 0 {
            capacities.push(leftover);
        }
        capacities
    } else {
        let base = total / num_groups;
        let remainder = total % num_groups;
        (0..num_groups)
            .map(|i| if i < remainder { base + 1 } else { base })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::policy::GroupTarget;

    fn roster_of(n: usize) -> Roster {
        Roster::from_names((0..n).map(|i| format!("S{i}")))
    }

    #[test]
    fn test_count_framing_distributes_remainder() {
        let roster = roster_of(7);
        let policy = PartitionPolicy::new(GroupTarget::Count(3)).with_seed(1);
        let (teams, report) =
            partition_into_teams(&roster, &ConstraintSet::new(), &policy).unwrap();

        let sizes: Vec<usize> = teams.iter().map(Team::len).collect();
        assert_eq!(sizes, vec![3, 2, 2]);
        assert!(report.is_clean());
    }

    #[test]
    fn test_keep_extra_separate_forms_remainder_team() {
        let roster = roster_of(7);
        let policy = PartitionPolicy::new(GroupTarget::Count(3))
            .with_keep_extra_separate(true)
            .with_seed(1);
        let (teams, _) = partition_into_teams(&roster, &ConstraintSet::new(), &policy).unwrap();

        let sizes: Vec<usize> = teams.iter().map(Team::len).collect();
        assert_eq!(sizes, vec![2, 2, 2, 1]);
    }

    #[test]
    fn test_every_student_in_exactly_one_team() {
        let roster = roster_of(11);
        let policy = PartitionPolicy::new(GroupTarget::Size(4)).with_seed(9);
        let (teams, _) = partition_into_teams(&roster, &ConstraintSet::new(), &policy).unwrap();

        let mut seen: Vec<StudentId> = teams.iter().flat_map(|t| t.members.clone()).collect();
        seen.sort();
        seen.dedup();
        assert_eq!(seen.len(), 11);
    }

    #[test]
    fn test_absent_students_skipped() {
        let mut roster = roster_of(5);
        let absent = roster.iter().next().unwrap().id;
        roster.mark_absent(absent);
        let policy = PartitionPolicy::new(GroupTarget::Count(2)).with_seed(3);
        let (teams, _) = partition_into_teams(&roster, &ConstraintSet::new(), &policy).unwrap();

        let all: Vec<StudentId> = teams.iter().flat_map(|t| t.members.clone()).collect();
        assert_eq!(all.len(), 4);
        assert!(!all.contains(&absent));
    }

    #[test]
    fn test_leaders_selected_per_nonempty_team() {
        let roster = roster_of(6);
        let policy = PartitionPolicy::new(GroupTarget::Count(3))
            .with_select_leaders(true)
            .with_seed(5);
        let (teams, _) = partition_into_teams(&roster, &ConstraintSet::new(), &policy).unwrap();

        for team in &teams {
            let leader = team.leader.expect("non-empty team gets a leader");
            assert!(team.members.contains(&leader));
        }
    }

    #[test]
    fn test_empty_teams_get_no_leader() {
        let roster = roster_of(2);
        let policy = PartitionPolicy::new(GroupTarget::Count(4))
            .with_select_leaders(true)
            .with_seed(5);
        let (teams, _) = partition_into_teams(&roster, &ConstraintSet::new(), &policy).unwrap();

        assert_eq!(teams.len(), 4);
        assert_eq!(teams.iter().filter(|t| t.is_empty()).count(), 2);
        assert!(teams.iter().filter(|t| t.is_empty()).all(|t| t.leader.is_none()));
    }

    #[test]
    fn test_avoid_pair_separated_when_possible() {
        let roster = roster_of(4);
        let ids: Vec<StudentId> = roster.iter().map(|s| s.id).collect();
        let mut constraints = ConstraintSet::new();
        constraints.add(ids[0], ids[1]);

        let policy = PartitionPolicy::new(GroupTarget::Count(2)).with_seed(11);
        let (teams, report) = partition_into_teams(&roster, &constraints, &policy).unwrap();

        let together = teams
            .iter()
            .any(|t| t.members.contains(&ids[0]) && t.members.contains(&ids[1]));
        assert!(!together);
        assert!(report.is_clean());
    }

    #[test]
    fn test_unsatisfiable_constraints_relaxed_not_failed() {
        let roster = roster_of(2);
        let ids: Vec<StudentId> = roster.iter().map(|s| s.id).collect();
        let mut constraints = ConstraintSet::new();
        constraints.add(ids[0], ids[1]);

        // One team: the pair must share it.
        let policy = PartitionPolicy::new(GroupTarget::Count(1)).with_seed(2);
        let (teams, report) = partition_into_teams(&roster, &constraints, &policy).unwrap();

        assert_eq!(teams.len(), 1);
        assert_eq!(teams[0].len(), 2);
        assert_eq!(report.constraint_violations(), 1);
    }

    #[test]
    fn test_empty_roster_yields_no_teams() {
        let roster = Roster::new();
        let policy = PartitionPolicy::new(GroupTarget::Count(3));
        let (teams, report) =
            partition_into_teams(&roster, &ConstraintSet::new(), &policy).unwrap();
        assert!(teams.is_empty());
        assert!(report.is_clean());
    }

    #[test]
    fn test_seeded_runs_are_identical() {
        let roster = roster_of(9);
        let policy = PartitionPolicy::new(GroupTarget::Count(3))
            .with_select_leaders(true)
            .with_seed(42);
        let (a, _) = partition_into_teams(&roster, &ConstraintSet::new(), &policy).unwrap();
        let (b, _) = partition_into_teams(&roster, &ConstraintSet::new(), &policy).unwrap();
        assert_eq!(a, b);
    }
}
