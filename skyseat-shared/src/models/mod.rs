pub mod events;
pub mod passenger;
pub mod seat;

pub use events::{journal_to_json, ReservationEvent, ReservationEventKind};
pub use passenger::{PassengerRecord, WaitlistEntry};
pub use seat::{ParseError, SeatColumn, SeatPosition, TravelClass, SEATS_PER_ROW};
