//! # Seatplan Chart
//!
//! The grid-spatial half of the seatplan classroom-seating engine: placed
//! items, desk adjacency, seating-group extraction, constraint-aware random
//! seat assignment, and cross-map cluster migration.
//!
//! The surrounding application owns the item collection and roster; the
//! engine is invoked with snapshots of that state and returns new item
//! collections plus an advisory report. It never creates or destroys items,
//! only the occupancy of seat slots it is handed.
//!
//! ## Quick start
//!
//! ```rust
//! use seatplan_chart::{ChartOptions, GridPos, PlacedItem, assign_seats};
//! use seatplan_core::Roster;
//!
//! let items = vec![
//!     PlacedItem::desk(GridPos::new(0, 0)),
//!     PlacedItem::desk(GridPos::new(1, 0)),
//!     PlacedItem::round_table(GridPos::new(4, 0), 4),
//! ];
//! let roster = Roster::from_names(["Ada", "Bo", "Cleo", "Dag"]);
//!
//! let (seated, report) = assign_seats(&items, &roster, &ChartOptions::new()).unwrap();
//! assert!(report.is_clean());
//! # assert_eq!(seated.len(), items.len());
//! ```
//!
//! ## Feature flags
//!
//! - `serde`: serialization support for the item model, so the surrounding
//!   app can persist both maps of a classroom snapshot.

pub mod adjacency;
pub mod assign;
pub mod groups;
pub mod item;
pub mod migrate;

// Re-exports
pub use adjacency::are_adjacent;
pub use assign::{ChartOptions, DEFAULT_CELL_SIZE, assign_seats};
pub use groups::{SeatingGroup, extract_groups, slot_group_index};
pub use item::{GridPos, ItemId, PixelRect, PlacedItem, SeatRef, TABLE_FOOTPRINT};
pub use migrate::migrate_clusters;
