use serde::Serialize;
use skyseat_core::zoning::{check_zone, zone_rows};
use skyseat_core::{PassengerStore, RejectReason, Rejected, SortReport, StoreKind};
use skyseat_shared::{
    journal_to_json, PassengerRecord, ReservationEvent, ReservationEventKind, SeatColumn,
    SeatPosition, TravelClass, WaitlistEntry,
};
use skyseat_store::app_config::{CabinConfig, IdConfig};
use skyseat_store::{Config, StoreBackend, Waitlist};
use std::collections::HashMap;
use tracing::{debug, info, warn};

use crate::lifecycle::RequestState;

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(tag = "outcome", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ReservationOutcome {
    Seated,
    Waitlisted { position: usize },
}

/// Result of a successful cancellation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cancellation {
    pub released: PassengerRecord,
    /// Waitlisted passenger moved into the freed seat, if any.
    pub promoted: Option<String>,
}

/// Orchestrates one store backend and the waitlist behind a single contract.
///
/// Seat collisions park the request on the waitlist; every cancellation hands
/// the freed seat to the oldest entry that asked for exactly that seat.
pub struct ReservationEngine {
    store: StoreBackend,
    waitlist: Waitlist,
    states: HashMap<String, RequestState>,
    journal: Vec<ReservationEvent>,
    cabin: CabinConfig,
    ids: IdConfig,
    next_id: u64,
}

impl ReservationEngine {
    pub fn new(kind: StoreKind, config: &Config) -> Self {
        Self::with_store(StoreBackend::new(kind, &config.store), config)
    }

    pub fn with_store(store: StoreBackend, config: &Config) -> Self {
        info!("Reservation engine ready on the {} backend", store.kind());
        Self {
            store,
            waitlist: Waitlist::new(),
            states: HashMap::new(),
            journal: Vec::new(),
            cabin: config.cabin.clone(),
            ids: config.ids.clone(),
            next_id: config.ids.start,
        }
    }

    pub fn kind(&self) -> StoreKind {
        self.store.kind()
    }

    pub fn store(&self) -> &StoreBackend {
        &self.store
    }

    pub fn waitlist(&self) -> &Waitlist {
        &self.waitlist
    }

    pub fn journal(&self) -> &[ReservationEvent] {
        &self.journal
    }

    pub fn export_journal(&self) -> serde_json::Result<String> {
        journal_to_json(&self.journal)
    }

    pub fn find(&self, id: &str) -> Option<&PassengerRecord> {
        self.store.find(id)
    }

    pub fn status(&self, id: &str) -> Option<RequestState> {
        self.states.get(id).copied()
    }

    /// Seat the passenger, or waitlist them when the seat is taken.
    pub fn reserve(&mut self, record: PassengerRecord) -> Result<ReservationOutcome, RejectReason> {
        if record.id.trim().is_empty() {
            warn!("Rejected reservation for {}: missing passenger ID", record.name);
            return Err(RejectReason::MissingId);
        }

        let id = record.id.clone();
        let seat = record.seat;
        // A live id keeps its current lifecycle; its rejections are only journaled.
        let live = self.store.find(&id).is_some() || self.waitlist.contains(&id);

        // Zone is checked before the duplicate id, matching the store gate order.
        if let Err(reason) = check_zone(seat, record.travel_class) {
            warn!("Rejected {}: {}", id, reason);
            if !live {
                self.advance(&id, RequestState::Rejected);
            }
            self.record_rejection(&id, seat, &reason);
            return Err(reason);
        }

        if live {
            let reason = RejectReason::DuplicateId(id.clone());
            warn!("Rejected {}: {}", id, reason);
            self.record_rejection(&id, seat, &reason);
            return Err(reason);
        }

        match self.store.reserve(record) {
            Ok(()) => {
                info!("Seated {} at {}", id, seat);
                self.advance(&id, RequestState::Seated);
                self.record_event(&id, Some(seat), ReservationEventKind::Seated);
                Ok(ReservationOutcome::Seated)
            }
            Err(Rejected { reason, record }) if reason.is_waitlistable() => {
                let position = self.waitlist.enqueue(WaitlistEntry::from(record))?;
                info!("Seat {} taken, {} waitlisted at position {}", seat, id, position);
                self.advance(&id, RequestState::Waitlisted);
                self.record_event(&id, Some(seat), ReservationEventKind::Waitlisted { position });
                Ok(ReservationOutcome::Waitlisted { position })
            }
            Err(Rejected { reason, .. }) => {
                warn!("Rejected {}: {}", id, reason);
                self.advance(&id, RequestState::Rejected);
                self.record_rejection(&id, seat, &reason);
                Err(reason)
            }
        }
    }

    pub fn cancel(&mut self, id: &str) -> bool {
        self.cancel_detailed(id).is_some()
    }

    /// Remove a seated passenger and offer the freed seat to the waitlist.
    pub fn cancel_detailed(&mut self, id: &str) -> Option<Cancellation> {
        let released = self.store.cancel(id)?;
        info!("Cancelled {} at {}", released.id, released.seat);
        self.advance(id, RequestState::Cancelled);
        self.record_event(id, Some(released.seat), ReservationEventKind::Cancelled);

        let promoted = self.promote_waitlist(released.seat);
        Some(Cancellation { released, promoted })
    }

    /// Drop a waiting request without seating it. Its lifecycle is forgotten.
    pub fn withdraw(&mut self, id: &str) -> Option<WaitlistEntry> {
        let entry = self.waitlist.remove(id)?;
        info!("Withdrew {} from the waitlist", id);
        self.states.remove(id);
        self.record_event(id, Some(entry.requested_seat), ReservationEventKind::Withdrawn);
        Some(entry)
    }

    /// Seat the oldest entry waiting for exactly `seat`. Returns its id.
    pub fn promote_waitlist(&mut self, seat: SeatPosition) -> Option<String> {
        let entry = self.waitlist.take_matching(seat)?;
        let id = entry.id.clone();

        match self.store.reserve(entry.into_record()) {
            Ok(()) => {
                info!("Promoted {} from the waitlist into {}", id, seat);
                self.advance(&id, RequestState::Seated);
                self.record_event(&id, Some(seat), ReservationEventKind::Promoted);
                Some(id)
            }
            Err(rejected) => {
                self.requeue(rejected);
                None
            }
        }
    }

    /// Seat every waiting entry that fits anywhere in its class zone, in queue
    /// order. Returns how many were seated.
    pub fn promote_by_zone(&mut self) -> usize {
        let waiting: Vec<(String, TravelClass)> = self
            .waitlist
            .iter()
            .map(|entry| (entry.id.clone(), entry.travel_class))
            .collect();

        let mut promoted = 0;
        for (id, travel_class) in waiting {
            let Some(seat) = self.first_free_seat(travel_class) else {
                debug!("No free {} seat for {}", travel_class, id);
                continue;
            };
            let Some(entry) = self.waitlist.remove(&id) else {
                continue;
            };

            match self.store.reserve(entry.into_record_at(seat)) {
                Ok(()) => {
                    info!("Promoted {} from the waitlist into {} (zone fill)", id, seat);
                    self.advance(&id, RequestState::Seated);
                    self.record_event(&id, Some(seat), ReservationEventKind::Promoted);
                    promoted += 1;
                }
                Err(rejected) => self.requeue(rejected),
            }
        }

        promoted
    }

    pub fn sort_by_name(&mut self) -> SortReport {
        let report = self.store.sort_by_name();
        debug!("Sorted {} passengers by name: {:?}", self.store.len(), report);
        report
    }

    pub fn sort_by_id(&mut self) -> SortReport {
        let report = self.store.sort_by_id();
        debug!("Sorted {} passengers by ID: {:?}", self.store.len(), report);
        report
    }

    /// Next free generated id, e.g. `P1001`. Ids already seated or waiting are
    /// skipped.
    pub fn next_passenger_id(&mut self) -> String {
        loop {
            let candidate = format!("{}{}", self.ids.prefix, self.next_id);
            self.next_id += 1;
            if self.store.find(&candidate).is_none() && !self.waitlist.contains(&candidate) {
                return candidate;
            }
        }
    }

    /// Row-major, A to F, within the class zone. Economy runs to the cabin's
    /// last row, or further when passengers are already seated past it.
    fn first_free_seat(&self, travel_class: TravelClass) -> Option<SeatPosition> {
        let last_row = self.cabin.last_row.max(self.store.last_occupied_row());
        zone_rows(travel_class, last_row)
            .flat_map(|row| {
                SeatColumn::ALL
                    .into_iter()
                    .filter_map(move |column| SeatPosition::new(row, column).ok())
            })
            .find(|seat| !self.store.is_occupied(*seat))
    }

    /// A promotion the store refused goes back to the tail of the queue.
    fn requeue(&mut self, rejected: Rejected) {
        let Rejected { reason, record } = rejected;
        warn!("Promotion of {} failed: {}", record.id, reason);

        let id = record.id.clone();
        match self.waitlist.enqueue(WaitlistEntry::from(record)) {
            Ok(position) => {
                self.advance(&id, RequestState::Waitlisted);
                self.record_event(&id, None, ReservationEventKind::Waitlisted { position });
            }
            Err(err) => warn!("Could not requeue {}: {}", id, err),
        }
    }

    fn advance(&mut self, id: &str, to: RequestState) {
        let from = match self.states.get(id) {
            Some(state) if !state.is_terminal() => *state,
            _ => RequestState::Requested,
        };

        match from.transition(to) {
            Ok(state) => {
                self.states.insert(id.to_string(), state);
            }
            Err(err) => warn!("Lifecycle of {} not updated: {}", id, err),
        }
    }

    fn record_event(&mut self, id: &str, seat: Option<SeatPosition>, kind: ReservationEventKind) {
        self.journal.push(ReservationEvent::new(id, seat, kind));
    }

    fn record_rejection(&mut self, id: &str, seat: SeatPosition, reason: &RejectReason) {
        let kind = ReservationEventKind::Rejected {
            reason: reason.to_string(),
        };
        self.record_event(id, Some(seat), kind);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seat(row: u32, column: SeatColumn) -> SeatPosition {
        SeatPosition::new(row, column).unwrap()
    }

    fn passenger(
        id: &str,
        name: &str,
        row: u32,
        column: SeatColumn,
        class: TravelClass,
    ) -> PassengerRecord {
        PassengerRecord::new(id, name, seat(row, column), class)
    }

    fn engines() -> Vec<ReservationEngine> {
        StoreKind::ALL
            .into_iter()
            .map(|kind| ReservationEngine::new(kind, &Config::default()))
            .collect()
    }

    #[test]
    fn test_collision_waitlists_then_promotes_on_cancel() {
        for mut engine in engines() {
            let first =
                engine.reserve(passenger("P1", "Alice", 2, SeatColumn::A, TravelClass::First));
            assert_eq!(first, Ok(ReservationOutcome::Seated));

            let second =
                engine.reserve(passenger("P2", "Bob", 2, SeatColumn::A, TravelClass::First));
            assert_eq!(second, Ok(ReservationOutcome::Waitlisted { position: 1 }));
            assert_eq!(engine.status("P2"), Some(RequestState::Waitlisted));
            assert!(engine.find("P2").is_none());

            let cancellation = engine.cancel_detailed("P1").unwrap();
            assert_eq!(cancellation.released.id, "P1");
            assert_eq!(cancellation.promoted.as_deref(), Some("P2"));

            assert_eq!(engine.find("P2").unwrap().seat, seat(2, SeatColumn::A));
            assert!(engine.waitlist().is_empty());
            assert_eq!(engine.status("P1"), Some(RequestState::Cancelled));
            assert_eq!(engine.status("P2"), Some(RequestState::Seated));
        }
    }

    #[test]
    fn test_wrong_zone_is_rejected() {
        for mut engine in engines() {
            let result =
                engine.reserve(passenger("P3", "Cara", 12, SeatColumn::B, TravelClass::First));
            assert!(matches!(result, Err(RejectReason::InvalidZone { row: 12, .. })));
            assert_eq!(engine.status("P3"), Some(RequestState::Rejected));
            assert!(engine.waitlist().is_empty());
            assert!(engine.store().is_empty());
        }
    }

    #[test]
    fn test_zone_is_checked_before_duplicate_id() {
        for mut engine in engines() {
            engine
                .reserve(passenger("P1", "Alice", 12, SeatColumn::A, TravelClass::Economy))
                .unwrap();

            let result =
                engine.reserve(passenger("P1", "Alice", 12, SeatColumn::B, TravelClass::First));
            assert!(matches!(
                result,
                Err(RejectReason::InvalidZone {
                    row: 12,
                    zone: TravelClass::Economy,
                    requested: TravelClass::First,
                })
            ));
            // The seated request keeps its lifecycle and its seat.
            assert_eq!(engine.status("P1"), Some(RequestState::Seated));
            assert_eq!(engine.find("P1").unwrap().seat, seat(12, SeatColumn::A));
            assert!(matches!(
                engine.journal().last().map(|e| &e.kind),
                Some(ReservationEventKind::Rejected { .. })
            ));
        }
    }

    #[test]
    fn test_duplicate_and_missing_ids_are_never_waitlisted() {
        for mut engine in engines() {
            engine
                .reserve(passenger("P1", "Alice", 12, SeatColumn::A, TravelClass::Economy))
                .unwrap();

            let duplicate =
                engine.reserve(passenger("P1", "Alice", 12, SeatColumn::A, TravelClass::Economy));
            assert_eq!(duplicate, Err(RejectReason::DuplicateId("P1".into())));
            assert_eq!(engine.status("P1"), Some(RequestState::Seated));

            engine
                .reserve(passenger("P2", "Bob", 12, SeatColumn::A, TravelClass::Economy))
                .unwrap();
            let waiting_again =
                engine.reserve(passenger("P2", "Bob", 13, SeatColumn::A, TravelClass::Economy));
            assert_eq!(waiting_again, Err(RejectReason::DuplicateId("P2".into())));

            let missing =
                engine.reserve(passenger(" ", "Nobody", 14, SeatColumn::A, TravelClass::Economy));
            assert_eq!(missing, Err(RejectReason::MissingId));
            assert_eq!(engine.waitlist().len(), 1);
        }
    }

    #[test]
    fn test_cancel_missing_id_changes_nothing() {
        for mut engine in engines() {
            engine
                .reserve(passenger("P1", "Alice", 12, SeatColumn::A, TravelClass::Economy))
                .unwrap();
            assert!(!engine.cancel("P9"));
            assert_eq!(engine.store().len(), 1);
            assert!(engine.cancel("P1"));
            assert!(!engine.cancel("P1"));
        }
    }

    #[test]
    fn test_cancel_without_matching_waiter_promotes_nobody() {
        for mut engine in engines() {
            engine
                .reserve(passenger("P1", "Alice", 12, SeatColumn::A, TravelClass::Economy))
                .unwrap();
            engine
                .reserve(passenger("P2", "Bob", 12, SeatColumn::B, TravelClass::Economy))
                .unwrap();
            engine
                .reserve(passenger("P3", "Cara", 12, SeatColumn::B, TravelClass::Economy))
                .unwrap();

            let cancellation = engine.cancel_detailed("P1").unwrap();
            assert_eq!(cancellation.promoted, None);
            assert_eq!(engine.waitlist().position_of("P3"), Some(1));
        }
    }

    #[test]
    fn test_promote_by_zone_fills_first_free_seat() {
        for mut engine in engines() {
            engine.reserve(passenger("P1", "Alice", 1, SeatColumn::A, TravelClass::First)).unwrap();
            engine.reserve(passenger("P2", "Bob", 1, SeatColumn::A, TravelClass::First)).unwrap();
            engine.reserve(passenger("P3", "Cara", 1, SeatColumn::A, TravelClass::First)).unwrap();

            assert_eq!(engine.promote_by_zone(), 2);
            assert_eq!(engine.find("P2").unwrap().seat, seat(1, SeatColumn::B));
            assert_eq!(engine.find("P3").unwrap().seat, seat(1, SeatColumn::C));
            assert!(engine.waitlist().is_empty());
            assert_eq!(engine.promote_by_zone(), 0);
        }
    }

    #[test]
    fn test_promote_by_zone_leaves_entry_when_zone_full() {
        let mut engine = ReservationEngine::new(StoreKind::Grid, &Config::default());
        for row in 1..=3 {
            for column in SeatColumn::ALL {
                let id = format!("F{row}{column}");
                engine.reserve(passenger(&id, "Full", row, column, TravelClass::First)).unwrap();
            }
        }
        engine.reserve(passenger("W1", "Late", 2, SeatColumn::C, TravelClass::First)).unwrap();

        assert_eq!(engine.promote_by_zone(), 0);
        assert_eq!(engine.waitlist().position_of("W1"), Some(1));
    }

    #[test]
    fn test_refused_promotion_goes_back_to_the_queue() {
        for mut engine in engines() {
            engine
                .reserve(passenger("P1", "Alice", 12, SeatColumn::A, TravelClass::Economy))
                .unwrap();
            engine
                .reserve(passenger("P2", "Bob", 12, SeatColumn::A, TravelClass::Economy))
                .unwrap();
            engine
                .reserve(passenger("P3", "Cara", 12, SeatColumn::A, TravelClass::Economy))
                .unwrap();

            // 12A is still held by P1, so the store refuses the promotion.
            assert_eq!(engine.promote_waitlist(seat(12, SeatColumn::A)), None);

            let order: Vec<&str> = engine.waitlist().iter().map(|e| e.id.as_str()).collect();
            assert_eq!(order, vec!["P3", "P2"]);
            assert_eq!(engine.status("P2"), Some(RequestState::Waitlisted));
            assert!(engine.find("P2").is_none());

            let last = engine.journal().last().unwrap();
            assert_eq!(last.passenger_id, "P2");
            assert_eq!(last.seat, None);
            assert_eq!(last.kind, ReservationEventKind::Waitlisted { position: 2 });
        }
    }

    #[test]
    fn test_promote_by_zone_searches_past_last_cabin_row() {
        for mut engine in engines() {
            for row in 11..=39 {
                for column in SeatColumn::ALL {
                    let id = format!("E{row}{column}");
                    engine
                        .reserve(passenger(&id, "Full", row, column, TravelClass::Economy))
                        .unwrap();
                }
            }
            engine
                .reserve(passenger("P40", "Far", 40, SeatColumn::A, TravelClass::Economy))
                .unwrap();
            engine
                .reserve(passenger("W1", "Late", 40, SeatColumn::A, TravelClass::Economy))
                .unwrap();

            assert_eq!(engine.promote_by_zone(), 1);
            assert_eq!(engine.find("W1").unwrap().seat, seat(40, SeatColumn::B));
            assert!(engine.waitlist().is_empty());
        }
    }

    #[test]
    fn test_fresh_lifecycle_after_cancel() {
        let mut engine = ReservationEngine::new(StoreKind::Linked, &Config::default());
        engine.reserve(passenger("P1", "Alice", 12, SeatColumn::A, TravelClass::Economy)).unwrap();
        engine.cancel("P1");
        assert_eq!(engine.status("P1"), Some(RequestState::Cancelled));

        engine.reserve(passenger("P1", "Alice", 15, SeatColumn::F, TravelClass::Economy)).unwrap();
        assert_eq!(engine.status("P1"), Some(RequestState::Seated));
    }

    #[test]
    fn test_withdraw_forgets_request() {
        let mut engine = ReservationEngine::new(StoreKind::Grid, &Config::default());
        engine.reserve(passenger("P1", "Alice", 12, SeatColumn::A, TravelClass::Economy)).unwrap();
        engine.reserve(passenger("P2", "Bob", 12, SeatColumn::A, TravelClass::Economy)).unwrap();

        assert_eq!(engine.withdraw("P2").unwrap().id, "P2");
        assert_eq!(engine.status("P2"), None);
        assert!(engine.withdraw("P2").is_none());
        assert_eq!(engine.cancel_detailed("P1").unwrap().promoted, None);
    }

    #[test]
    fn test_next_passenger_id_skips_live_ids() {
        let mut engine = ReservationEngine::new(StoreKind::Grid, &Config::default());
        engine
            .reserve(passenger("P1002", "Taken", 12, SeatColumn::A, TravelClass::Economy))
            .unwrap();

        assert_eq!(engine.next_passenger_id(), "P1001");
        assert_eq!(engine.next_passenger_id(), "P1003");
    }

    #[test]
    fn test_journal_records_every_transition() {
        let mut engine = ReservationEngine::new(StoreKind::Grid, &Config::default());
        engine.reserve(passenger("P1", "Alice", 2, SeatColumn::A, TravelClass::First)).unwrap();
        engine.reserve(passenger("P2", "Bob", 2, SeatColumn::A, TravelClass::First)).unwrap();
        engine.cancel("P1");

        let kinds: Vec<&ReservationEventKind> = engine.journal().iter().map(|e| &e.kind).collect();
        assert_eq!(
            kinds,
            vec![
                &ReservationEventKind::Seated,
                &ReservationEventKind::Waitlisted { position: 1 },
                &ReservationEventKind::Cancelled,
                &ReservationEventKind::Promoted,
            ]
        );

        let json = engine.export_journal().unwrap();
        assert!(json.contains("\"PROMOTED\""));
    }

    #[test]
    fn test_sorting_through_engine() {
        for mut engine in engines() {
            engine
                .reserve(passenger("P3", "Cara", 12, SeatColumn::A, TravelClass::Economy))
                .unwrap();
            engine
                .reserve(passenger("P1", "Alice", 12, SeatColumn::B, TravelClass::Economy))
                .unwrap();
            engine
                .reserve(passenger("P2", "Bob", 12, SeatColumn::C, TravelClass::Economy))
                .unwrap();

            engine.sort_by_id();
            let ids: Vec<&str> = engine.store().records().map(|r| r.id.as_str()).collect();
            assert_eq!(ids, vec!["P1", "P2", "P3"]);

            engine.sort_by_name();
            assert_eq!(engine.sort_by_name().swaps, 0);
        }
    }
}
