pub mod availability;
pub mod holds;
pub mod manager;
pub mod patch;
pub mod refund;

pub use availability::{RandomSlots, Slot, SlotStrategy};
pub use holds::HoldManager;
pub use manager::{ReservationError, ReservationFilter, ReservationManager, ReservationView};
pub use patch::ReservationPatch;
