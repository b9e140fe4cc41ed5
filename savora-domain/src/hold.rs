use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// A provisional, time-boxed claim on a restaurant/date/time/party-size slot.
///
/// Holds are never mutated or deleted: expiry is a predicate evaluated at
/// read time, and a hold consumed by a confirmation simply stops mattering.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Hold {
    pub hold_id: String,
    pub user_id: String,
    pub restaurant_id: String,
    /// Calendar day, `YYYY-MM-DD`.
    pub date: String,
    /// Wall-clock slot, `HH:MM`.
    pub time: String,
    pub party_size: u32,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

impl Hold {
    /// Create a fresh hold expiring `ttl_minutes` from `now`.
    pub fn new(
        user_id: String,
        restaurant_id: String,
        date: String,
        time: String,
        party_size: u32,
        ttl_minutes: i64,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            hold_id: crate::prefixed_id("hold"),
            user_id,
            restaurant_id,
            date,
            time,
            party_size,
            status: "active".to_string(),
            created_at: now,
            expires_at: now + Duration::minutes(ttl_minutes),
        }
    }

    /// A hold is active only while its stored status is `active` AND it has
    /// not passed its expiry instant. Readers filter on this; nothing ever
    /// flips the stored status to expired.
    pub fn is_active(&self, now: DateTime<Utc>) -> bool {
        self.status == "active" && now < self.expires_at
    }
}
