use chrono::{DateTime, Utc};
use uuid::Uuid;

use super::seat::SeatPosition;

#[derive(Debug, serde::Serialize, serde::Deserialize, Clone, PartialEq, Eq)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ReservationEventKind {
    Seated,
    Waitlisted { position: usize },
    Promoted,
    Cancelled,
    Withdrawn,
    Rejected { reason: String },
}

/// One entry of the engine's journal.
#[derive(Debug, serde::Serialize, serde::Deserialize, Clone)]
pub struct ReservationEvent {
    pub event_id: Uuid,
    pub passenger_id: String,
    pub seat: Option<SeatPosition>,
    pub kind: ReservationEventKind,
    pub occurred_at: DateTime<Utc>,
}

impl ReservationEvent {
    pub fn new(
        passenger_id: impl Into<String>,
        seat: Option<SeatPosition>,
        kind: ReservationEventKind,
    ) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            passenger_id: passenger_id.into(),
            seat,
            kind,
            occurred_at: Utc::now(),
        }
    }
}

/// Pretty-printed JSON array of the given events.
pub fn journal_to_json(events: &[ReservationEvent]) -> serde_json::Result<String> {
    serde_json::to_string_pretty(events)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::seat::SeatColumn;

    #[test]
    fn test_journal_serialization() {
        let seat = SeatPosition::new(2, SeatColumn::A).unwrap();
        let events = vec![
            ReservationEvent::new("P1", Some(seat), ReservationEventKind::Seated),
            ReservationEvent::new(
                "P3",
                None,
                ReservationEventKind::Rejected { reason: "zone".to_string() },
            ),
        ];

        let json = journal_to_json(&events).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(parsed[0]["passenger_id"], "P1");
        assert_eq!(parsed[0]["kind"]["type"], "SEATED");
        assert_eq!(parsed[1]["kind"]["type"], "REJECTED");
        assert_eq!(parsed[1]["kind"]["reason"], "zone");
    }
}
