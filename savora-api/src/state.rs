use savora_reserve::{HoldManager, ReservationManager, SlotStrategy};
use savora_store::{PreferenceProvider, RestaurantCatalog};
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub holds: Arc<HoldManager>,
    pub reservations: Arc<ReservationManager>,
    pub availability: Arc<dyn SlotStrategy>,
    pub catalog: Arc<dyn RestaurantCatalog>,
    pub preferences: Arc<dyn PreferenceProvider>,
}
