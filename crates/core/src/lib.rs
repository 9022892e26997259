//! # Seatplan Core
//!
//! Core data model and roster-level algorithms for the seatplan
//! classroom-seating engine.
//!
//! This crate holds the types shared between the surrounding application
//! and the grid-spatial half of the engine (`seatplan-chart`):
//!
//! - **Roster types**: [`Student`], [`StudentId`], [`Roster`]
//! - **Constraints**: [`ConstraintSet`] - symmetric avoid-pairs
//! - **Zone affinities**: [`ZoneAffinities`], [`ZoneId`]
//! - **Partitioning**: [`partition_into_teams`], [`Team`], [`PartitionPolicy`]
//! - **Reporting**: [`AssignReport`], [`Advisory`]
//!
//! ## Design
//!
//! Every operation is a pure, synchronous computation over caller-owned
//! snapshots: the engine holds no global state, performs no I/O, and always
//! completes best-effort. Compromises (capacity shortfalls, relaxed
//! avoid-pairs, split clusters) are reported as [`Advisory`] values for the
//! UI to surface as notifications, never as errors.
//!
//! Randomized operations accept an optional seed for reproducible runs:
//!
//! ```rust
//! use seatplan_core::{partition_into_teams, ConstraintSet, GroupTarget, PartitionPolicy, Roster};
//!
//! let roster = Roster::from_names(["Ada", "Bo", "Cleo", "Dag", "Eli"]);
//! let policy = PartitionPolicy::new(GroupTarget::Count(2))
//!     .with_select_leaders(true)
//!     .with_seed(42);
//!
//! let (teams, report) = partition_into_teams(&roster, &ConstraintSet::new(), &policy).unwrap();
//! assert_eq!(teams.len(), 2);
//! assert!(report.is_clean());
//! ```
//!
//! ## Feature flags
//!
//! - `serde`: serialization support for every data-model type, so the
//!   surrounding app can persist per-classroom snapshots.

pub mod affinity;
pub mod constraint;
pub mod error;
pub mod partition;
pub mod policy;
pub mod report;
pub mod rng;
pub mod student;

// Re-exports
pub use affinity::{ZoneAffinities, ZoneId};
pub use constraint::ConstraintSet;
pub use error::{Error, Result};
pub use partition::{Team, partition_into_teams};
pub use policy::{GroupTarget, PartitionPolicy};
pub use report::{Advisory, AssignReport};
pub use rng::make_rng;
pub use student::{Roster, Student, StudentId};
