use chrono::Utc;
use savora_domain::Hold;
use savora_store::app_config::BookingRules;
use savora_store::{HoldStore, StoreError};
use std::sync::Arc;
use tracing::{info, warn};

#[derive(Debug, thiserror::Error)]
pub enum HoldError {
    #[error("Hold store failed: {0}")]
    Store(#[from] StoreError),
}

/// Creates and looks up short-lived reservation holds.
///
/// Holds are never deleted or mutated after creation; expiry is evaluated
/// lazily wherever a hold is read. Any number of holds may coexist for the
/// same restaurant/date/time slot.
pub struct HoldManager {
    store: Arc<dyn HoldStore>,
    rules: BookingRules,
}

impl HoldManager {
    pub fn new(store: Arc<dyn HoldStore>, rules: BookingRules) -> Self {
        Self { store, rules }
    }

    /// Create a hold claiming the given slot. No capacity or overlap check
    /// is performed against other holds or reservations.
    pub async fn create_hold(
        &self,
        user_id: String,
        restaurant_id: String,
        date: String,
        time: String,
        party_size: u32,
    ) -> Result<Hold, HoldError> {
        let hold = Hold::new(
            user_id,
            restaurant_id,
            date,
            time,
            party_size,
            self.rules.hold_ttl_minutes,
            Utc::now(),
        );

        self.store.put_hold(&hold).await?;
        info!(hold_id = %hold.hold_id, user_id = %hold.user_id, "created hold");

        Ok(hold)
    }

    /// The user's most recently created unexpired hold, if any.
    ///
    /// Store failures are swallowed and reported as "no active hold" so the
    /// booking flow stays non-blocking on this lookup.
    pub async fn active_hold(&self, user_id: &str) -> Option<Hold> {
        let holds = match self.store.scan_holds_by_user(user_id).await {
            Ok(holds) => holds,
            Err(e) => {
                warn!(user_id, error = %e, "hold scan failed, treating as no active hold");
                return None;
            }
        };

        let now = Utc::now();
        holds
            .into_iter()
            .filter(|h| h.is_active(now))
            .max_by_key(|h| h.created_at)
    }
}
