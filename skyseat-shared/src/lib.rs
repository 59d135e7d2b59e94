pub mod models;

pub use models::{
    journal_to_json, ParseError, PassengerRecord, ReservationEvent, ReservationEventKind,
    SeatColumn, SeatPosition, TravelClass, WaitlistEntry, SEATS_PER_ROW,
};
