use skyseat_core::zoning::check_zone;
use skyseat_core::{PassengerStore, RejectReason, Rejected, SortReport, StoreKind};
use skyseat_shared::{PassengerRecord, SeatColumn, SeatPosition, SEATS_PER_ROW};
use tracing::{debug, info};

use crate::app_config::StoreConfig;
use crate::sorting::{bubble_sort_by, by_id, by_name, merge_sort_by};

#[derive(Debug, Clone, PartialEq, Eq)]
struct Occupant {
    id: String,
    name: String,
}

type SeatRow = [Option<Occupant>; SEATS_PER_ROW];

fn empty_row() -> SeatRow {
    std::array::from_fn(|_| None)
}

/// Array backend: a growable seat grid plus a flat passenger list.
///
/// A grid cell is occupied iff a record in `passengers` holds that seat; every
/// mutation updates both sides before returning.
#[derive(Debug)]
pub struct GridStore {
    seat_map: Vec<SeatRow>,
    passengers: Vec<PassengerRecord>,
    passenger_capacity: usize,
    row_limit: usize,
}

impl GridStore {
    pub fn new(config: &StoreConfig) -> Self {
        let rows = config.initial_rows.max(1);
        let passenger_capacity = config.initial_passenger_capacity.max(1);
        let row_limit = config.row_limit.max(rows);

        let mut seat_map = Vec::with_capacity(rows);
        seat_map.resize_with(rows, empty_row);

        info!(
            "Grid store initialized with {} rows (limit {}), {} passenger slots",
            rows, row_limit, passenger_capacity
        );
        Self {
            seat_map,
            passengers: Vec::with_capacity(passenger_capacity),
            passenger_capacity,
            row_limit,
        }
    }

    pub fn max_rows(&self) -> usize {
        self.seat_map.len()
    }

    pub fn passenger_capacity(&self) -> usize {
        self.passenger_capacity
    }

    /// Every occupied cell in row-major order.
    pub fn occupied_seats(&self) -> Vec<SeatPosition> {
        self.seat_map
            .iter()
            .enumerate()
            .flat_map(|(row_index, row)| {
                row.iter().enumerate().filter_map(move |(col_index, cell)| {
                    cell.as_ref()?;
                    let column = SeatColumn::from_index(col_index)?;
                    SeatPosition::new(row_index as u32 + 1, column).ok()
                })
            })
            .collect()
    }

    /// Id held by the grid cell, without touching the passenger list.
    pub fn occupant_id(&self, seat: SeatPosition) -> Option<&str> {
        self.cell(seat).map(|occupant| occupant.id.as_str())
    }

    fn cell(&self, seat: SeatPosition) -> Option<&Occupant> {
        let (row, col) = seat.grid_index();
        self.seat_map.get(row).and_then(|cells| cells[col].as_ref())
    }

    /// Doubles the row count, or jumps to `required_row + 10` when doubling is
    /// not enough, never past the row limit. The new grid is fully allocated
    /// before the old one is moved into it, so a failed allocation leaves the
    /// store as it was.
    fn expand_seat_map(&mut self, required_row: usize) -> Result<(), RejectReason> {
        let current = self.max_rows();
        if required_row <= current {
            return Ok(());
        }
        if required_row > self.row_limit {
            return Err(RejectReason::CapacityExhausted {
                requested_rows: required_row,
            });
        }

        let mut new_max = current.saturating_mul(2);
        if new_max < required_row {
            new_max = required_row + 10;
        }
        let new_max = new_max.min(self.row_limit);

        let mut grown: Vec<SeatRow> = Vec::new();
        grown
            .try_reserve_exact(new_max)
            .map_err(|_| RejectReason::CapacityExhausted { requested_rows: new_max })?;
        grown.append(&mut self.seat_map);
        grown.resize_with(new_max, empty_row);
        self.seat_map = grown;

        debug!("Seat map expanded from {} to {} rows", current, new_max);
        Ok(())
    }

    /// Makes room for one more record, doubling the logical capacity when full.
    fn expand_passenger_list(&mut self) -> Result<(), RejectReason> {
        let mut target = self.passenger_capacity;
        if self.passengers.len() >= target {
            target *= 2;
        }

        if self.passengers.capacity() < target {
            self.passengers
                .try_reserve_exact(target - self.passengers.len())
                .map_err(|_| RejectReason::ListCapacityExhausted {
                    requested_slots: target,
                })?;
        }

        if target != self.passenger_capacity {
            debug!("Passenger list expanded from {} to {} slots", self.passenger_capacity, target);
            self.passenger_capacity = target;
        }
        Ok(())
    }

    fn position_of(&self, id: &str) -> Option<usize> {
        self.passengers.iter().position(|p| p.id == id)
    }
}

impl PassengerStore for GridStore {
    fn kind(&self) -> StoreKind {
        StoreKind::Grid
    }

    fn reserve(&mut self, record: PassengerRecord) -> Result<(), Rejected> {
        if let Err(reason) = check_zone(record.seat, record.travel_class) {
            return Err(Rejected::new(reason, record));
        }
        if self.cell(record.seat).is_some() {
            return Err(Rejected::new(RejectReason::SeatOccupied(record.seat), record));
        }
        if self.position_of(&record.id).is_some() {
            let reason = RejectReason::DuplicateId(record.id.clone());
            return Err(Rejected::new(reason, record));
        }

        if let Err(reason) = self.expand_seat_map(record.seat.row() as usize) {
            return Err(Rejected::new(reason, record));
        }
        if let Err(reason) = self.expand_passenger_list() {
            return Err(Rejected::new(reason, record));
        }

        let (row, col) = record.seat.grid_index();
        self.seat_map[row][col] = Some(Occupant {
            id: record.id.clone(),
            name: record.name.clone(),
        });
        debug!("[Grid] Seated {} at {}", record.id, record.seat);
        self.passengers.push(record);
        Ok(())
    }

    fn cancel(&mut self, id: &str) -> Option<PassengerRecord> {
        let index = self.position_of(id)?;

        // Vec::remove shifts the tail left, keeping store order.
        let record = self.passengers.remove(index);
        let (row, col) = record.seat.grid_index();
        if let Some(cells) = self.seat_map.get_mut(row) {
            cells[col] = None;
        }

        debug!("[Grid] Removed {} from {}", record.id, record.seat);
        Some(record)
    }

    fn find(&self, id: &str) -> Option<&PassengerRecord> {
        self.passengers.iter().find(|p| p.id == id)
    }

    fn is_occupied(&self, seat: SeatPosition) -> bool {
        self.cell(seat).is_some()
    }

    fn occupant_name(&self, seat: SeatPosition) -> Option<&str> {
        self.cell(seat).map(|occupant| occupant.name.as_str())
    }

    fn records(&self) -> Box<dyn Iterator<Item = &PassengerRecord> + '_> {
        Box::new(self.passengers.iter())
    }

    fn len(&self) -> usize {
        self.passengers.len()
    }

    fn last_occupied_row(&self) -> u32 {
        self.seat_map
            .iter()
            .rposition(|row| row.iter().any(Option::is_some))
            .map_or(0, |index| index as u32 + 1)
    }

    fn row_capacity(&self) -> Option<usize> {
        Some(self.max_rows())
    }

    fn sort_by_name(&mut self) -> SortReport {
        bubble_sort_by(&mut self.passengers, by_name)
    }

    fn sort_by_id(&mut self) -> SortReport {
        let mut report = SortReport::default();
        let records = std::mem::take(&mut self.passengers);
        self.passengers = merge_sort_by(records, &mut by_id, &mut report);
        report
    }
}
