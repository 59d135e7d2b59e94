pub mod app_config;
pub mod backend;
pub mod grid_store;
pub mod linked_store;
pub mod sorting;
pub mod waitlist;

pub use app_config::Config;
pub use backend::StoreBackend;
pub use grid_store::GridStore;
pub use linked_store::LinkedStore;
pub use waitlist::Waitlist;
