//! Placed chart items: desks, round tables, labels, and zones.

use uuid::Uuid;

use seatplan_core::{Error, Result, StudentId, ZoneId};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Grid cells spanned by a round table along each axis.
pub const TABLE_FOOTPRINT: i32 = 2;

/// Stable identifier for a placed item, used to match items before and
/// after a reassignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ItemId(Uuid);

impl ItemId {
    /// Creates a fresh random identifier.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for ItemId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for ItemId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

/// A position on the placement grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct GridPos {
    pub x: i32,
    pub y: i32,
}

impl GridPos {
    /// Creates a grid position.
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

impl PartialOrd for GridPos {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for GridPos {
    /// Reading order: ascending y, then ascending x.
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        (self.y, self.x).cmp(&(other.y, other.x))
    }
}

/// An axis-aligned rectangle in pixel space (labels and zones are
/// free-positioned, unlike grid-snapped desks and tables).
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PixelRect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl PixelRect {
    /// Creates a rectangle.
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Returns true if the point lies inside (edges inclusive).
    pub fn contains(&self, px: f64, py: f64) -> bool {
        px >= self.x && px <= self.x + self.width && py >= self.y && py <= self.y + self.height
    }
}

/// One assignable seat: an item plus an optional seat index for
/// multi-seat items.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SeatRef {
    /// The owning item.
    pub item: ItemId,
    /// Seat index for round tables; `None` for single-seat desks.
    pub seat: Option<usize>,
}

impl SeatRef {
    /// A desk's single seat.
    pub fn desk(item: ItemId) -> Self {
        Self { item, seat: None }
    }

    /// One numbered seat of a round table.
    pub fn table_seat(item: ItemId, seat: usize) -> Self {
        Self {
            item,
            seat: Some(seat),
        }
    }
}

/// A placed canvas item.
///
/// The engine only ever mutates the occupancy fields of items it is given;
/// items are created and destroyed by the surrounding application.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum PlacedItem {
    /// Single-seat grid-aligned desk.
    Desk {
        id: ItemId,
        pos: GridPos,
        /// Current occupant, if any.
        occupant: Option<StudentId>,
        /// Marked desks are excluded from random reassignment; a marked
        /// desk may hold a pinned occupant or be deliberately empty.
        marked: bool,
    },
    /// Multi-seat round table with a 2x2 grid footprint.
    RoundTable {
        id: ItemId,
        origin: GridPos,
        num_seats: usize,
        /// Per-seat occupants, indexed 0..num_seats.
        occupants: Vec<Option<StudentId>>,
        /// Per-seat marked flags, parallel to `occupants`.
        marked: Vec<bool>,
    },
    /// Free-positioned text annotation. Carries no students.
    Label {
        id: ItemId,
        rect: PixelRect,
        text: String,
    },
    /// Free-positioned rectangle tagging an area for zone affinities.
    /// Carries no students.
    Zone {
        id: ItemId,
        zone: ZoneId,
        rect: PixelRect,
        name: String,
    },
}

impl PlacedItem {
    /// Creates an unoccupied desk.
    pub fn desk(pos: GridPos) -> Self {
        Self::Desk {
            id: ItemId::new(),
            pos,
            occupant: None,
            marked: false,
        }
    }

    /// Creates an empty round table with the given seat count.
    pub fn round_table(origin: GridPos, num_seats: usize) -> Self {
        Self::RoundTable {
            id: ItemId::new(),
            origin,
            num_seats,
            occupants: vec![None; num_seats],
            marked: vec![false; num_seats],
        }
    }

    /// Creates a label.
    pub fn label(rect: PixelRect, text: impl Into<String>) -> Self {
        Self::Label {
            id: ItemId::new(),
            rect,
            text: text.into(),
        }
    }

    /// Creates a zone.
    pub fn zone(rect: PixelRect, name: impl Into<String>) -> Self {
        Self::Zone {
            id: ItemId::new(),
            zone: ZoneId::new(),
            rect,
            name: name.into(),
        }
    }

    /// The item's stable identifier.
    pub fn id(&self) -> ItemId {
        match self {
            Self::Desk { id, .. }
            | Self::RoundTable { id, .. }
            | Self::Label { id, .. }
            | Self::Zone { id, .. } => *id,
        }
    }

    /// Returns true for items that can seat students.
    pub fn is_seating(&self) -> bool {
        matches!(self, Self::Desk { .. } | Self::RoundTable { .. })
    }

    /// All seat slots this item offers, in seat-index order. Labels and
    /// zones offer none; so does a zero-seat table.
    pub fn seat_slots(&self) -> Vec<SeatRef> {
        match self {
            Self::Desk { id, .. } => vec![SeatRef::desk(*id)],
            Self::RoundTable { id, num_seats, .. } => {
                (0..*num_seats).map(|i| SeatRef::table_seat(*id, i)).collect()
            }
            Self::Label { .. } | Self::Zone { .. } => Vec::new(),
        }
    }

    /// The occupant of the given slot, if the slot belongs to this item.
    pub fn occupant(&self, seat: Option<usize>) -> Option<StudentId> {
        match (self, seat) {
            (Self::Desk { occupant, .. }, None) => *occupant,
            (Self::RoundTable { occupants, .. }, Some(i)) => occupants.get(i).copied().flatten(),
            _ => None,
        }
    }

    /// Sets the occupant of the given slot. Out-of-range or mismatched
    /// slots are ignored.
    pub fn set_occupant(&mut self, seat: Option<usize>, student: Option<StudentId>) {
        match (self, seat) {
            (Self::Desk { occupant, .. }, None) => *occupant = student,
            (Self::RoundTable { occupants, .. }, Some(i)) => {
                if let Some(slot) = occupants.get_mut(i) {
                    *slot = student;
                }
            }
            _ => {}
        }
    }

    /// Returns true if the given slot is marked (excluded from random
    /// reassignment).
    pub fn is_marked(&self, seat: Option<usize>) -> bool {
        match (self, seat) {
            (Self::Desk { marked, .. }, None) => *marked,
            (Self::RoundTable { marked, .. }, Some(i)) => marked.get(i).copied().unwrap_or(false),
            _ => false,
        }
    }

    /// Pixel-space center of the given seat, used for zone containment.
    ///
    /// Desks sit at their cell center; round-table seats sit on a circle
    /// around the center of the table's 2x2 footprint.
    pub fn seat_center(&self, seat: Option<usize>, cell_size: f64) -> Option<(f64, f64)> {
        match (self, seat) {
            (Self::Desk { pos, .. }, None) => Some((
                (pos.x as f64 + 0.5) * cell_size,
                (pos.y as f64 + 0.5) * cell_size,
            )),
            (
                Self::RoundTable {
                    origin, num_seats, ..
                },
                Some(i),
            ) if i < *num_seats => {
                let cx = (origin.x as f64 + TABLE_FOOTPRINT as f64 / 2.0) * cell_size;
                let cy = (origin.y as f64 + TABLE_FOOTPRINT as f64 / 2.0) * cell_size;
                let radius = 0.8 * cell_size;
                let angle = std::f64::consts::TAU * i as f64 / *num_seats as f64
                    - std::f64::consts::FRAC_PI_2;
                Some((cx + radius * angle.cos(), cy + radius * angle.sin()))
            }
            _ => None,
        }
    }

    /// Validates the item's structural invariants.
    pub fn validate(&self) -> Result<()> {
        match self {
            Self::RoundTable {
                id,
                num_seats,
                occupants,
                marked,
                ..
            } => {
                if occupants.len() != *num_seats || marked.len() != *num_seats {
                    return Err(Error::InvalidItem(format!(
                        "table {id}: seat arrays ({}, {}) disagree with num_seats {num_seats}",
                        occupants.len(),
                        marked.len()
                    )));
                }
                Ok(())
            }
            _ => Ok(()),
        }
    }
}
