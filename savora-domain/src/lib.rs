pub mod hold;
pub mod pii;
pub mod reservation;
pub mod restaurant;

pub use hold::Hold;
pub use reservation::{Refund, Reservation, ReservationStatus};
pub use restaurant::{PriceRange, Restaurant, UserPreferences};

use uuid::Uuid;

/// Generate a short opaque id with a record-kind prefix, e.g. `hold_3fa2b1c9`.
pub fn prefixed_id(prefix: &str) -> String {
    let hex = Uuid::new_v4().simple().to_string();
    format!("{}_{}", prefix, &hex[..8])
}
