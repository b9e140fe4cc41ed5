pub mod app_config;
pub mod memory;
pub mod repository;

pub use memory::MemoryStore;
pub use repository::{
    HoldStore, PreferenceProvider, ReservationStore, RestaurantCatalog, StoreError, StoreResult,
};
