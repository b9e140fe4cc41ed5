use chrono::{DateTime, Utc};
use savora_domain::Reservation;
use savora_store::app_config::BookingRules;
use serde::Deserialize;

use crate::manager::ReservationError;

/// Merge-patch over a reservation: only supplied fields change, an
/// unsupplied field is left untouched rather than cleared.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReservationPatch {
    pub date: Option<String>,
    pub time: Option<String>,
    pub party_size: Option<i64>,
    pub special_requests: Option<String>,
}

impl ReservationPatch {
    pub fn is_empty(&self) -> bool {
        self.date.is_none()
            && self.time.is_none()
            && self.party_size.is_none()
            && self.special_requests.is_none()
    }

    /// Apply the patch in place. A party-size change re-derives the deposit
    /// at the per-guest rate; this deliberately differs from the flat
    /// deposit charged at confirmation.
    pub fn apply(
        &self,
        reservation: &mut Reservation,
        rules: &BookingRules,
        now: DateTime<Utc>,
    ) -> Result<(), ReservationError> {
        if let Some(date) = &self.date {
            reservation.date = date.clone();
        }
        if let Some(time) = &self.time {
            reservation.time = time.clone();
        }
        if let Some(party_size) = self.party_size {
            if !(1..=20).contains(&party_size) {
                return Err(ReservationError::Validation(
                    "Party size must be between 1 and 20".to_string(),
                ));
            }
            reservation.party_size = party_size as u32;
            reservation.deposit_amount = rules.deposit_per_guest * party_size as f64;
        }
        if let Some(special_requests) = &self.special_requests {
            reservation.special_requests = special_requests.clone();
        }
        reservation.updated_at = now;
        Ok(())
    }
}
