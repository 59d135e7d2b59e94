use serde::{Deserialize, Serialize};

use super::seat::{SeatPosition, TravelClass};

/// A seated passenger. Owned by exactly one store.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PassengerRecord {
    pub id: String,
    pub name: String,
    pub seat: SeatPosition,
    pub travel_class: TravelClass,
}

impl PassengerRecord {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        seat: SeatPosition,
        travel_class: TravelClass,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            seat,
            travel_class,
        }
    }
}

/// A request parked on the waitlist until its seat (or zone) frees up.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct WaitlistEntry {
    pub id: String,
    pub name: String,
    pub requested_seat: SeatPosition,
    pub travel_class: TravelClass,
}

impl WaitlistEntry {
    /// Seat the entry at its originally requested position.
    pub fn into_record(self) -> PassengerRecord {
        let seat = self.requested_seat;
        self.into_record_at(seat)
    }

    /// Seat the entry somewhere else in its zone.
    pub fn into_record_at(self, seat: SeatPosition) -> PassengerRecord {
        PassengerRecord {
            id: self.id,
            name: self.name,
            seat,
            travel_class: self.travel_class,
        }
    }
}

impl From<PassengerRecord> for WaitlistEntry {
    fn from(record: PassengerRecord) -> Self {
        Self {
            id: record.id,
            name: record.name,
            requested_seat: record.seat,
            travel_class: record.travel_class,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::seat::SeatColumn;

    #[test]
    fn test_waitlist_round_trip_keeps_request() {
        let seat = SeatPosition::new(2, SeatColumn::A).unwrap();
        let record = PassengerRecord::new("P2", "Bob", seat, TravelClass::First);

        let entry = WaitlistEntry::from(record.clone());
        assert_eq!(entry.requested_seat, seat);

        let elsewhere = SeatPosition::new(3, SeatColumn::C).unwrap();
        let moved = entry.into_record_at(elsewhere);
        assert_eq!(moved.id, record.id);
        assert_eq!(moved.seat, elsewhere);
    }
}
