use skyseat_core::{PassengerStore, Rejected, SortReport, StoreKind};
use skyseat_shared::{PassengerRecord, SeatPosition};

use crate::app_config::StoreConfig;
use crate::grid_store::GridStore;
use crate::linked_store::LinkedStore;

/// The closed set of storage backends, picked once at construction.
#[derive(Debug)]
pub enum StoreBackend {
    Grid(GridStore),
    Linked(LinkedStore),
}

impl StoreBackend {
    pub fn new(kind: StoreKind, config: &StoreConfig) -> Self {
        match kind {
            StoreKind::Grid => StoreBackend::Grid(GridStore::new(config)),
            StoreKind::Linked => StoreBackend::Linked(LinkedStore::new()),
        }
    }

    fn inner(&self) -> &dyn PassengerStore {
        match self {
            StoreBackend::Grid(store) => store,
            StoreBackend::Linked(store) => store,
        }
    }

    fn inner_mut(&mut self) -> &mut dyn PassengerStore {
        match self {
            StoreBackend::Grid(store) => store,
            StoreBackend::Linked(store) => store,
        }
    }
}

impl PassengerStore for StoreBackend {
    fn kind(&self) -> StoreKind {
        self.inner().kind()
    }

    fn reserve(&mut self, record: PassengerRecord) -> Result<(), Rejected> {
        self.inner_mut().reserve(record)
    }

    fn cancel(&mut self, id: &str) -> Option<PassengerRecord> {
        self.inner_mut().cancel(id)
    }

    fn find(&self, id: &str) -> Option<&PassengerRecord> {
        self.inner().find(id)
    }

    fn is_occupied(&self, seat: SeatPosition) -> bool {
        self.inner().is_occupied(seat)
    }

    fn occupant_name(&self, seat: SeatPosition) -> Option<&str> {
        self.inner().occupant_name(seat)
    }

    fn records(&self) -> Box<dyn Iterator<Item = &PassengerRecord> + '_> {
        self.inner().records()
    }

    fn len(&self) -> usize {
        self.inner().len()
    }

    fn last_occupied_row(&self) -> u32 {
        self.inner().last_occupied_row()
    }

    fn row_capacity(&self) -> Option<usize> {
        self.inner().row_capacity()
    }

    fn sort_by_name(&mut self) -> SortReport {
        self.inner_mut().sort_by_name()
    }

    fn sort_by_id(&mut self) -> SortReport {
        self.inner_mut().sort_by_id()
    }
}
