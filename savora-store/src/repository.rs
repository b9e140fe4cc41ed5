use async_trait::async_trait;
use savora_domain::{Hold, Reservation, Restaurant, UserPreferences};

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Record not found: {0}")]
    NotFound(String),

    #[error("Store unavailable: {0}")]
    Unavailable(String),

    #[error("Serialization failed: {0}")]
    Serialization(String),
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Keyed access to hold records. Holds are write-once: there is no update
/// or delete. Expiry is a read-side filter, and confirmation leaves the
/// consumed record in place.
#[async_trait]
pub trait HoldStore: Send + Sync {
    async fn put_hold(&self, hold: &Hold) -> StoreResult<()>;

    async fn get_hold(&self, hold_id: &str) -> StoreResult<Option<Hold>>;

    /// Linear scan filtered by owner, the store's secondary-key query.
    async fn scan_holds_by_user(&self, user_id: &str) -> StoreResult<Vec<Hold>>;
}

/// Keyed access to reservation records.
#[async_trait]
pub trait ReservationStore: Send + Sync {
    async fn put_reservation(&self, reservation: &Reservation) -> StoreResult<()>;

    async fn get_reservation(&self, reservation_id: &str) -> StoreResult<Option<Reservation>>;

    /// Conditional update: fails with `NotFound` when the record is absent
    /// rather than upserting, mirroring a conditional-write store call.
    async fn update_reservation(&self, reservation: &Reservation) -> StoreResult<()>;

    async fn delete_reservation(&self, reservation_id: &str) -> StoreResult<()>;

    async fn scan_reservations_by_user(&self, user_id: &str) -> StoreResult<Vec<Reservation>>;
}

/// Read-only view of the restaurant catalog collaborator, used for
/// discovery scans and reservation display enrichment.
#[async_trait]
pub trait RestaurantCatalog: Send + Sync {
    async fn get_restaurant(&self, restaurant_id: &str) -> StoreResult<Option<Restaurant>>;

    async fn scan_restaurants(&self) -> StoreResult<Vec<Restaurant>>;
}

/// Read-only view of the account collaborator's preference profile.
#[async_trait]
pub trait PreferenceProvider: Send + Sync {
    async fn get_preferences(&self, user_id: &str) -> StoreResult<Option<UserPreferences>>;
}
