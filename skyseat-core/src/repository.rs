use serde::{Deserialize, Serialize};
use skyseat_shared::{PassengerRecord, SeatPosition};
use std::fmt;
use std::str::FromStr;

use crate::RejectReason;

/// The two interchangeable storage backends.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum StoreKind {
    Grid,
    Linked,
}

impl StoreKind {
    pub const ALL: [StoreKind; 2] = [StoreKind::Grid, StoreKind::Linked];
}

impl fmt::Display for StoreKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreKind::Grid => f.write_str("grid"),
            StoreKind::Linked => f.write_str("linked"),
        }
    }
}

impl FromStr for StoreKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "grid" | "array" => Ok(StoreKind::Grid),
            "linked" | "list" => Ok(StoreKind::Linked),
            other => Err(format!("unknown backend: {other}")),
        }
    }
}

/// Work performed by one sort call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SortReport {
    pub comparisons: u64,
    pub swaps: u64,
    pub passes: u64,
}

/// A reservation the store refused. The record is handed back untouched so
/// the caller can move it onto the waitlist instead of copying it.
#[derive(Debug, thiserror::Error)]
#[error("{reason}")]
pub struct Rejected {
    pub reason: RejectReason,
    pub record: PassengerRecord,
}

impl Rejected {
    pub fn new(reason: RejectReason, record: PassengerRecord) -> Self {
        Self { reason, record }
    }
}

/// Contract shared by the grid and linked backends.
///
/// `reserve` checks, in order: zone, seat collision, duplicate id. Lookups by
/// id are linear scans in every backend so their costs stay comparable.
pub trait PassengerStore {
    fn kind(&self) -> StoreKind;

    fn reserve(&mut self, record: PassengerRecord) -> Result<(), Rejected>;

    /// Remove and return the passenger; `None` leaves the store untouched.
    fn cancel(&mut self, id: &str) -> Option<PassengerRecord>;

    fn find(&self, id: &str) -> Option<&PassengerRecord>;

    fn is_occupied(&self, seat: SeatPosition) -> bool;

    fn occupant_name(&self, seat: SeatPosition) -> Option<&str>;

    /// Records in current store order.
    fn records(&self) -> Box<dyn Iterator<Item = &PassengerRecord> + '_>;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Highest occupied row, 0 when empty.
    fn last_occupied_row(&self) -> u32 {
        self.records().map(|r| r.seat.row()).max().unwrap_or(0)
    }

    /// Current row capacity; `None` when the backend is unbounded.
    fn row_capacity(&self) -> Option<usize>;

    fn sort_by_name(&mut self) -> SortReport;

    fn sort_by_id(&mut self) -> SortReport;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_kind_parsing() {
        assert_eq!("Grid".parse::<StoreKind>().unwrap(), StoreKind::Grid);
        assert_eq!("array".parse::<StoreKind>().unwrap(), StoreKind::Grid);
        assert_eq!("linked".parse::<StoreKind>().unwrap(), StoreKind::Linked);
        assert!("tree".parse::<StoreKind>().is_err());
        assert_eq!(StoreKind::Linked.to_string(), "linked");
    }
}
