use chrono::{Local, NaiveDateTime, Utc};
use rand::Rng;
use savora_domain::{Refund, Reservation, ReservationStatus, Restaurant};
use savora_store::app_config::BookingRules;
use savora_store::{HoldStore, ReservationStore, RestaurantCatalog, StoreError};
use serde::Serialize;
use std::sync::Arc;
use tracing::{info, warn};

use crate::patch::ReservationPatch;
use crate::refund::compute_refund;

#[derive(Debug, thiserror::Error)]
pub enum ReservationError {
    #[error("Reservation not found: {0}")]
    NotFound(String),

    #[error("{0}")]
    Forbidden(String),

    #[error("{0}")]
    Validation(String),

    #[error("Reservation store failed: {0}")]
    Store(#[from] StoreError),
}

/// Listing filter for a user's reservations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReservationFilter {
    Upcoming,
    Past,
    All,
}

impl ReservationFilter {
    /// Parse the query-string value; anything unrecognized (or absent)
    /// falls back to `upcoming`, the default booking-UI view.
    pub fn parse(value: Option<&str>) -> Self {
        match value {
            Some("past") => ReservationFilter::Past,
            Some("all") => ReservationFilter::All,
            _ => ReservationFilter::Upcoming,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ReservationFilter::Upcoming => "upcoming",
            ReservationFilter::Past => "past",
            ReservationFilter::All => "all",
        }
    }
}

/// A reservation augmented with restaurant display fields for listings.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReservationView {
    #[serde(flatten)]
    pub reservation: Reservation,
    pub restaurant_name: String,
    pub restaurant_cuisine: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub restaurant_image: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub restaurant_address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub restaurant_rating: Option<f64>,
}

impl ReservationView {
    fn enriched(reservation: Reservation, restaurant: Restaurant) -> Self {
        Self {
            reservation,
            restaurant_name: restaurant.name,
            restaurant_cuisine: restaurant.cuisine,
            restaurant_image: Some(restaurant.image_url),
            restaurant_address: Some(restaurant.address),
            restaurant_rating: Some(restaurant.rating),
        }
    }

    /// Fallback when the catalog lookup failed or missed: the stored id
    /// stands in for the display name.
    fn bare(reservation: Reservation) -> Self {
        let restaurant_name = reservation.restaurant_id.clone();
        Self {
            reservation,
            restaurant_name,
            restaurant_cuisine: Vec::new(),
            restaurant_image: None,
            restaurant_address: None,
            restaurant_rating: None,
        }
    }
}

/// Generate a shareable confirmation code: three digits then three
/// uppercase letters, e.g. `482QNM`.
pub fn confirmation_code() -> String {
    let mut rng = rand::thread_rng();
    let digits: u32 = rng.gen_range(100..1000);
    let letters: String = (0..3)
        .map(|_| rng.gen_range(b'A'..=b'Z') as char)
        .collect();
    format!("{}{}", digits, letters)
}

/// Apply filter and sort order to a user's reservations.
///
/// `upcoming` keeps non-cancelled reservations dated today or later, soonest
/// first. `past` keeps everything dated before today plus every cancelled
/// reservation, most recent first. `all` keeps everything, same order as
/// `past`. Date/time comparisons are lexicographic over the stored strings.
pub fn filter_reservations(
    mut reservations: Vec<Reservation>,
    filter: ReservationFilter,
    today: &str,
) -> Vec<Reservation> {
    match filter {
        ReservationFilter::Upcoming => {
            reservations.retain(|r| r.date.as_str() >= today && !r.is_cancelled());
            reservations.sort_by_key(|r| format!("{}{}", r.date, r.time));
        }
        ReservationFilter::Past => {
            reservations.retain(|r| r.date.as_str() < today || r.is_cancelled());
            reservations.sort_by_key(|r| std::cmp::Reverse(format!("{}{}", r.date, r.time)));
        }
        ReservationFilter::All => {
            reservations.sort_by_key(|r| std::cmp::Reverse(format!("{}{}", r.date, r.time)));
        }
    }
    reservations
}

/// Converts holds into durable reservations and manages their lifecycle:
/// list, lookup, modify, cancel with refund.
pub struct ReservationManager {
    reservations: Arc<dyn ReservationStore>,
    holds: Arc<dyn HoldStore>,
    catalog: Arc<dyn RestaurantCatalog>,
    rules: BookingRules,
}

impl ReservationManager {
    pub fn new(
        reservations: Arc<dyn ReservationStore>,
        holds: Arc<dyn HoldStore>,
        catalog: Arc<dyn RestaurantCatalog>,
        rules: BookingRules,
    ) -> Self {
        Self {
            reservations,
            holds,
            catalog,
            rules,
        }
    }

    /// Confirm a hold into a reservation.
    ///
    /// The hold lookup is best-effort: a missing or unreadable hold degrades
    /// to placeholder slot fields instead of failing the confirmation. The
    /// reservation write itself must succeed. The consumed hold is left in
    /// place; its expiry makes it irrelevant.
    pub async fn confirm(
        &self,
        hold_id: &str,
        user_id: Option<String>,
        payment_method: Option<String>,
        special_requests: Option<String>,
    ) -> Result<Reservation, ReservationError> {
        let hold = match self.holds.get_hold(hold_id).await {
            Ok(hold) => hold,
            Err(e) => {
                warn!(hold_id, error = %e, "hold lookup failed, confirming with placeholder fields");
                None
            }
        };

        let now = Utc::now();
        let (restaurant_id, date, time, party_size, hold_user) = match &hold {
            Some(h) => (
                h.restaurant_id.clone(),
                h.date.clone(),
                h.time.clone(),
                h.party_size,
                Some(h.user_id.clone()),
            ),
            None => (String::new(), String::new(), String::new(), 2, None),
        };

        let reservation = Reservation {
            reservation_id: savora_domain::prefixed_id("res"),
            user_id: user_id.or(hold_user).unwrap_or_default(),
            hold_id: hold_id.to_string(),
            restaurant_id,
            date,
            time,
            party_size,
            status: ReservationStatus::Confirmed,
            confirmation_code: confirmation_code(),
            deposit_amount: self.rules.flat_deposit,
            payment_method: payment_method.map(Into::into),
            special_requests: special_requests.unwrap_or_default(),
            created_at: now,
            updated_at: now,
            cancelled_at: None,
            refund_amount: None,
            refund_percentage: None,
        };

        self.reservations.put_reservation(&reservation).await?;
        info!(
            reservation_id = %reservation.reservation_id,
            user_id = %reservation.user_id,
            "confirmed reservation"
        );

        Ok(reservation)
    }

    /// Fetch one reservation. Ownership is enforced only when a requester
    /// id is supplied, and a mismatch is distinct from not-found.
    pub async fn get(
        &self,
        reservation_id: &str,
        user_id: Option<&str>,
    ) -> Result<Reservation, ReservationError> {
        let reservation = self
            .reservations
            .get_reservation(reservation_id)
            .await?
            .ok_or_else(|| ReservationError::NotFound(reservation_id.to_string()))?;

        if let Some(user_id) = user_id {
            if reservation.user_id != user_id {
                return Err(ReservationError::Forbidden("Unauthorized".to_string()));
            }
        }

        Ok(reservation)
    }

    /// List a user's reservations, filtered and enriched with restaurant
    /// display fields. A failed scan or enrichment lookup degrades rather
    /// than failing the listing.
    pub async fn list(&self, user_id: &str, filter: ReservationFilter) -> Vec<ReservationView> {
        let reservations = match self.reservations.scan_reservations_by_user(user_id).await {
            Ok(reservations) => reservations,
            Err(e) => {
                warn!(user_id, error = %e, "reservation scan failed, returning empty listing");
                Vec::new()
            }
        };

        let today = Local::now().date_naive().to_string();
        let filtered = filter_reservations(reservations, filter, &today);

        let mut views = Vec::with_capacity(filtered.len());
        for reservation in filtered {
            views.push(self.enrich(reservation).await);
        }
        views
    }

    async fn enrich(&self, reservation: Reservation) -> ReservationView {
        match self.catalog.get_restaurant(&reservation.restaurant_id).await {
            Ok(Some(restaurant)) => ReservationView::enriched(reservation, restaurant),
            Ok(None) => ReservationView::bare(reservation),
            Err(e) => {
                warn!(
                    restaurant_id = %reservation.restaurant_id,
                    error = %e,
                    "restaurant enrichment failed, using stored id"
                );
                ReservationView::bare(reservation)
            }
        }
    }

    /// Partially update a confirmed, not-yet-past reservation.
    pub async fn modify(
        &self,
        reservation_id: &str,
        user_id: &str,
        patch: &ReservationPatch,
    ) -> Result<Reservation, ReservationError> {
        let mut reservation = self.get(reservation_id, Some(user_id)).await?;

        if reservation.status != ReservationStatus::Confirmed {
            return Err(ReservationError::Validation(
                "Can only modify confirmed reservations".to_string(),
            ));
        }

        let today = Local::now().date_naive().to_string();
        // Unparsable stored dates skip the past check, same as the lenient
        // original; lexicographic compare is exact for ISO dates.
        if !reservation.date.is_empty() && reservation.date < today {
            return Err(ReservationError::Validation(
                "Cannot modify past reservations".to_string(),
            ));
        }

        if patch.is_empty() {
            return Err(ReservationError::Validation(
                "No fields to update".to_string(),
            ));
        }

        patch.apply(&mut reservation, &self.rules, Utc::now())?;
        self.reservations.update_reservation(&reservation).await?;
        info!(reservation_id, user_id, "modified reservation");

        Ok(reservation)
    }

    /// Cancel a reservation, computing the refund against `now` (local wall
    /// clock of the caller). Cancellation is idempotent-guarded: a second
    /// cancel is rejected and leaves the recorded refund untouched.
    pub async fn cancel(
        &self,
        reservation_id: &str,
        user_id: &str,
        now: NaiveDateTime,
    ) -> Result<(Reservation, Refund), ReservationError> {
        let mut reservation = self.get(reservation_id, Some(user_id)).await?;

        if reservation.is_cancelled() {
            return Err(ReservationError::Validation(
                "Reservation already cancelled".to_string(),
            ));
        }

        let refund = compute_refund(
            reservation.deposit_amount,
            &reservation.date,
            &reservation.time,
            now,
            &self.rules,
        );

        let cancelled_at = Utc::now();
        reservation.status = ReservationStatus::Cancelled;
        reservation.cancelled_at = Some(cancelled_at);
        reservation.refund_amount = Some(refund.amount);
        reservation.refund_percentage = Some(refund.percentage);
        reservation.updated_at = cancelled_at;

        self.reservations.update_reservation(&reservation).await?;
        info!(
            reservation_id,
            user_id,
            refund_percentage = refund.percentage,
            "cancelled reservation"
        );

        Ok((reservation, refund))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::holds::HoldManager;
    use chrono::NaiveDate;
    use savora_store::MemoryStore;

    fn managers(store: Arc<MemoryStore>) -> (HoldManager, ReservationManager) {
        let rules = BookingRules::default();
        let holds = HoldManager::new(store.clone(), rules.clone());
        let reservations =
            ReservationManager::new(store.clone(), store.clone(), store, rules);
        (holds, reservations)
    }

    async fn book(holds: &HoldManager, reservations: &ReservationManager) -> Reservation {
        let hold = holds
            .create_hold(
                "user_001".to_string(),
                "rest1".to_string(),
                "2030-01-01".to_string(),
                "19:00".to_string(),
                4,
            )
            .await
            .unwrap();

        reservations
            .confirm(
                &hold.hold_id,
                Some("user_001".to_string()),
                Some("card_tok_123".to_string()),
                None,
            )
            .await
            .unwrap()
    }

    #[test]
    fn test_confirmation_code_shape() {
        for _ in 0..50 {
            let code = confirmation_code();
            assert_eq!(code.len(), 6);
            assert!(code[..3].chars().all(|c| c.is_ascii_digit()));
            assert!(code[3..].chars().all(|c| c.is_ascii_uppercase()));
        }
    }

    #[tokio::test]
    async fn test_confirm_copies_hold_fields() {
        let store = Arc::new(MemoryStore::new());
        let (holds, reservations) = managers(store);

        let reservation = book(&holds, &reservations).await;

        assert_eq!(reservation.restaurant_id, "rest1");
        assert_eq!(reservation.date, "2030-01-01");
        assert_eq!(reservation.time, "19:00");
        assert_eq!(reservation.party_size, 4);
        assert_eq!(reservation.status, ReservationStatus::Confirmed);
        assert_eq!(reservation.deposit_amount, 100.0);
    }

    #[tokio::test]
    async fn test_confirm_missing_hold_uses_placeholders() {
        let store = Arc::new(MemoryStore::new());
        let (_, reservations) = managers(store);

        let reservation = reservations
            .confirm("hold_missing", Some("user_001".to_string()), None, None)
            .await
            .unwrap();

        assert_eq!(reservation.user_id, "user_001");
        assert_eq!(reservation.restaurant_id, "");
        assert_eq!(reservation.party_size, 2);
    }

    #[tokio::test]
    async fn test_confirm_without_user_falls_back_to_hold_owner() {
        let store = Arc::new(MemoryStore::new());
        let (holds, reservations) = managers(store);

        let hold = holds
            .create_hold(
                "user_007".to_string(),
                "rest1".to_string(),
                "2030-01-01".to_string(),
                "19:00".to_string(),
                2,
            )
            .await
            .unwrap();

        let reservation = reservations
            .confirm(&hold.hold_id, None, None, None)
            .await
            .unwrap();
        assert_eq!(reservation.user_id, "user_007");
    }

    #[tokio::test]
    async fn test_get_enforces_ownership_only_when_supplied() {
        let store = Arc::new(MemoryStore::new());
        let (holds, reservations) = managers(store);
        let reservation = book(&holds, &reservations).await;

        let err = reservations
            .get(&reservation.reservation_id, Some("user_other"))
            .await
            .unwrap_err();
        assert!(matches!(err, ReservationError::Forbidden(_)));

        // No requester id, no ownership check.
        assert!(reservations
            .get(&reservation.reservation_id, None)
            .await
            .is_ok());

        let err = reservations.get("res_missing", None).await.unwrap_err();
        assert!(matches!(err, ReservationError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_modify_rejects_empty_patch_and_wrong_owner() {
        let store = Arc::new(MemoryStore::new());
        let (holds, reservations) = managers(store);
        let reservation = book(&holds, &reservations).await;

        let err = reservations
            .modify(
                &reservation.reservation_id,
                "user_001",
                &ReservationPatch::default(),
            )
            .await
            .unwrap_err();
        assert!(matches!(err, ReservationError::Validation(_)));

        let patch = ReservationPatch {
            time: Some("20:00".to_string()),
            ..Default::default()
        };
        let err = reservations
            .modify(&reservation.reservation_id, "user_other", &patch)
            .await
            .unwrap_err();
        assert!(matches!(err, ReservationError::Forbidden(_)));
    }

    #[tokio::test]
    async fn test_modify_party_size_sets_per_guest_deposit() {
        let store = Arc::new(MemoryStore::new());
        let (holds, reservations) = managers(store);
        let reservation = book(&holds, &reservations).await;

        let patch = ReservationPatch {
            party_size: Some(5),
            ..Default::default()
        };
        let updated = reservations
            .modify(&reservation.reservation_id, "user_001", &patch)
            .await
            .unwrap();

        assert_eq!(updated.party_size, 5);
        assert_eq!(updated.deposit_amount, 125.0);
        // Untouched fields survive the merge.
        assert_eq!(updated.time, "19:00");
    }

    #[tokio::test]
    async fn test_cancel_30_hours_out_refunds_full_deposit() {
        let store = Arc::new(MemoryStore::new());
        let (holds, reservations) = managers(store);
        let reservation = book(&holds, &reservations).await;

        // Fixed "now": 13:00 the day before a 19:00 slot, 30 hours out.
        let now = NaiveDate::from_ymd_opt(2029, 12, 31)
            .unwrap()
            .and_hms_opt(13, 0, 0)
            .unwrap();

        let (cancelled, refund) = reservations
            .cancel(&reservation.reservation_id, "user_001", now)
            .await
            .unwrap();

        assert_eq!(refund.percentage, 100);
        assert_eq!(refund.amount, reservation.deposit_amount);
        assert_eq!(refund.hours_until_reservation, 30.0);
        assert_eq!(cancelled.status, ReservationStatus::Cancelled);
        assert_eq!(cancelled.refund_amount, Some(100.0));
        assert!(cancelled.cancelled_at.is_some());
    }

    #[tokio::test]
    async fn test_cancel_twice_is_rejected_and_keeps_refund() {
        let store = Arc::new(MemoryStore::new());
        let (holds, reservations) = managers(store.clone());
        let reservation = book(&holds, &reservations).await;

        let now = NaiveDate::from_ymd_opt(2029, 12, 31)
            .unwrap()
            .and_hms_opt(13, 0, 0)
            .unwrap();
        reservations
            .cancel(&reservation.reservation_id, "user_001", now)
            .await
            .unwrap();

        // A later second attempt, inside the no-refund window.
        let later = NaiveDate::from_ymd_opt(2030, 1, 1)
            .unwrap()
            .and_hms_opt(18, 0, 0)
            .unwrap();
        let err = reservations
            .cancel(&reservation.reservation_id, "user_001", later)
            .await
            .unwrap_err();
        assert!(matches!(err, ReservationError::Validation(_)));

        let stored = savora_store::ReservationStore::get_reservation(
            store.as_ref(),
            &reservation.reservation_id,
        )
        .await
        .unwrap()
        .unwrap();
        assert_eq!(stored.refund_percentage, Some(100));
        assert_eq!(stored.refund_amount, Some(100.0));
    }

    #[test]
    fn test_filter_upcoming_excludes_cancelled_and_sorts_ascending() {
        let mut upcoming_cancelled = sample("res_1", "2030-01-05", "19:00");
        upcoming_cancelled.status = ReservationStatus::Cancelled;
        let later = sample("res_2", "2030-01-06", "18:00");
        let sooner = sample("res_3", "2030-01-05", "18:00");
        let past = sample("res_4", "2029-01-01", "19:00");

        let result = filter_reservations(
            vec![upcoming_cancelled, later, sooner, past],
            ReservationFilter::Upcoming,
            "2030-01-01",
        );

        let ids: Vec<&str> = result.iter().map(|r| r.reservation_id.as_str()).collect();
        assert_eq!(ids, vec!["res_3", "res_2"]);
    }

    #[test]
    fn test_filter_past_includes_every_cancelled_reservation() {
        let mut future_cancelled = sample("res_1", "2030-06-01", "19:00");
        future_cancelled.status = ReservationStatus::Cancelled;
        let old = sample("res_2", "2029-01-01", "19:00");
        let upcoming = sample("res_3", "2030-01-05", "19:00");

        let result = filter_reservations(
            vec![future_cancelled, old, upcoming],
            ReservationFilter::Past,
            "2030-01-01",
        );

        let ids: Vec<&str> = result.iter().map(|r| r.reservation_id.as_str()).collect();
        // Descending by date+time: the cancelled future one first.
        assert_eq!(ids, vec!["res_1", "res_2"]);
    }

    #[test]
    fn test_filter_all_keeps_everything_descending() {
        let a = sample("res_1", "2030-01-05", "19:00");
        let b = sample("res_2", "2029-01-01", "19:00");
        let c = sample("res_3", "2030-01-05", "20:00");

        let result =
            filter_reservations(vec![a, b, c], ReservationFilter::All, "2030-01-01");

        let ids: Vec<&str> = result.iter().map(|r| r.reservation_id.as_str()).collect();
        assert_eq!(ids, vec!["res_3", "res_1", "res_2"]);
    }

    #[test]
    fn test_filter_parse() {
        assert_eq!(ReservationFilter::parse(None), ReservationFilter::Upcoming);
        assert_eq!(
            ReservationFilter::parse(Some("past")),
            ReservationFilter::Past
        );
        assert_eq!(ReservationFilter::parse(Some("all")), ReservationFilter::All);
        assert_eq!(
            ReservationFilter::parse(Some("bogus")),
            ReservationFilter::Upcoming
        );
    }

    fn sample(id: &str, date: &str, time: &str) -> Reservation {
        let now = Utc::now();
        Reservation {
            reservation_id: id.to_string(),
            user_id: "user_001".to_string(),
            hold_id: "hold_1".to_string(),
            restaurant_id: "rest1".to_string(),
            date: date.to_string(),
            time: time.to_string(),
            party_size: 2,
            status: ReservationStatus::Confirmed,
            confirmation_code: "123ABC".to_string(),
            deposit_amount: 100.0,
            payment_method: None,
            special_requests: String::new(),
            created_at: now,
            updated_at: now,
            cancelled_at: None,
            refund_amount: None,
            refund_percentage: None,
        }
    }
}
