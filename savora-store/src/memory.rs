use async_trait::async_trait;
use savora_domain::{Hold, Reservation, Restaurant, UserPreferences};
use std::collections::HashMap;
use tokio::sync::RwLock;

use crate::repository::{
    HoldStore, PreferenceProvider, ReservationStore, RestaurantCatalog, StoreError, StoreResult,
};

/// In-memory store backing the dev binary and tests. Implements every
/// adapter trait over plain keyed maps; no cross-record transactions, same
/// as the managed store it stands in for.
#[derive(Debug, Default)]
pub struct MemoryStore {
    holds: RwLock<HashMap<String, Hold>>,
    reservations: RwLock<HashMap<String, Reservation>>,
    restaurants: RwLock<HashMap<String, Restaurant>>,
    preferences: RwLock<HashMap<String, UserPreferences>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a restaurant record (catalog is read-only through the trait).
    pub async fn insert_restaurant(&self, restaurant: Restaurant) {
        self.restaurants
            .write()
            .await
            .insert(restaurant.restaurant_id.clone(), restaurant);
    }

    /// Seed a preference profile (account collaborator is read-only too).
    pub async fn insert_preferences(&self, user_id: &str, prefs: UserPreferences) {
        self.preferences
            .write()
            .await
            .insert(user_id.to_string(), prefs);
    }
}

#[async_trait]
impl HoldStore for MemoryStore {
    async fn put_hold(&self, hold: &Hold) -> StoreResult<()> {
        self.holds
            .write()
            .await
            .insert(hold.hold_id.clone(), hold.clone());
        Ok(())
    }

    async fn get_hold(&self, hold_id: &str) -> StoreResult<Option<Hold>> {
        Ok(self.holds.read().await.get(hold_id).cloned())
    }

    async fn scan_holds_by_user(&self, user_id: &str) -> StoreResult<Vec<Hold>> {
        Ok(self
            .holds
            .read()
            .await
            .values()
            .filter(|h| h.user_id == user_id)
            .cloned()
            .collect())
    }
}

#[async_trait]
impl ReservationStore for MemoryStore {
    async fn put_reservation(&self, reservation: &Reservation) -> StoreResult<()> {
        self.reservations
            .write()
            .await
            .insert(reservation.reservation_id.clone(), reservation.clone());
        Ok(())
    }

    async fn get_reservation(&self, reservation_id: &str) -> StoreResult<Option<Reservation>> {
        Ok(self.reservations.read().await.get(reservation_id).cloned())
    }

    async fn update_reservation(&self, reservation: &Reservation) -> StoreResult<()> {
        let mut reservations = self.reservations.write().await;
        match reservations.get_mut(&reservation.reservation_id) {
            Some(existing) => {
                *existing = reservation.clone();
                Ok(())
            }
            None => Err(StoreError::NotFound(reservation.reservation_id.clone())),
        }
    }

    async fn delete_reservation(&self, reservation_id: &str) -> StoreResult<()> {
        self.reservations.write().await.remove(reservation_id);
        Ok(())
    }

    async fn scan_reservations_by_user(&self, user_id: &str) -> StoreResult<Vec<Reservation>> {
        Ok(self
            .reservations
            .read()
            .await
            .values()
            .filter(|r| r.user_id == user_id)
            .cloned()
            .collect())
    }
}

#[async_trait]
impl RestaurantCatalog for MemoryStore {
    async fn get_restaurant(&self, restaurant_id: &str) -> StoreResult<Option<Restaurant>> {
        Ok(self.restaurants.read().await.get(restaurant_id).cloned())
    }

    async fn scan_restaurants(&self) -> StoreResult<Vec<Restaurant>> {
        Ok(self.restaurants.read().await.values().cloned().collect())
    }
}

#[async_trait]
impl PreferenceProvider for MemoryStore {
    async fn get_preferences(&self, user_id: &str) -> StoreResult<Option<UserPreferences>> {
        Ok(self.preferences.read().await.get(user_id).cloned())
    }
}
