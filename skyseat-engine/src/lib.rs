pub mod engine;
pub mod lifecycle;
pub mod loader;
pub mod render;

pub use engine::{Cancellation, ReservationEngine, ReservationOutcome};
pub use lifecycle::{LifecycleError, RequestState};
pub use loader::{LoadError, LoadReport};
pub use render::{ManifestPage, SeatMapPage};
