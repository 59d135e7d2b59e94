pub mod repository;
pub mod zoning;

pub use repository::{PassengerStore, Rejected, SortReport, StoreKind};

use skyseat_shared::{ParseError, SeatPosition, TravelClass};

/// Why a reservation (or lookup) did not go through. None of these are fatal;
/// the caller decides whether to retry, discard or waitlist.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RejectReason {
    #[error("Row {row} is in the {zone} zone, cannot seat {requested}")]
    InvalidZone {
        row: u32,
        zone: TravelClass,
        requested: TravelClass,
    },

    #[error("Seat {0} is already occupied")]
    SeatOccupied(SeatPosition),

    #[error("Passenger ID already exists: {0}")]
    DuplicateId(String),

    #[error("Passenger not found: {0}")]
    NotFound(String),

    #[error("Invalid seat position: {0}")]
    InvalidPosition(String),

    #[error("Invalid travel class: {0}")]
    InvalidClass(String),

    #[error("Passenger ID is required")]
    MissingId,

    #[error("Seat grid cannot grow to {requested_rows} rows")]
    CapacityExhausted { requested_rows: usize },

    #[error("Passenger list cannot grow to {requested_slots} slots")]
    ListCapacityExhausted { requested_slots: usize },
}

impl RejectReason {
    /// Collisions are the only rejections that route to the waitlist.
    pub fn is_waitlistable(&self) -> bool {
        matches!(self, RejectReason::SeatOccupied(_))
    }
}

impl From<ParseError> for RejectReason {
    fn from(err: ParseError) -> Self {
        match err {
            ParseError::InvalidClass(raw) => RejectReason::InvalidClass(raw),
            other => RejectReason::InvalidPosition(other.to_string()),
        }
    }
}

pub type CoreResult<T> = Result<T, RejectReason>;
