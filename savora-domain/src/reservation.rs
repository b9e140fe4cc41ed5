use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::pii::Masked;

/// Reservation status in the booking lifecycle.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ReservationStatus {
    Confirmed,
    Cancelled,
    Completed,
}

/// A durable booking, created from a hold at confirmation time.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reservation {
    pub reservation_id: String,
    pub user_id: String,
    /// Provenance: the hold this reservation was confirmed from.
    pub hold_id: String,
    pub restaurant_id: String,
    /// Calendar day, `YYYY-MM-DD`.
    pub date: String,
    /// Wall-clock slot, `HH:MM`.
    pub time: String,
    pub party_size: u32,
    pub status: ReservationStatus,
    pub confirmation_code: String,
    pub deposit_amount: f64,
    /// Opaque payment reference, never raw card data.
    pub payment_method: Option<Masked<String>>,
    pub special_requests: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cancelled_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub refund_amount: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub refund_percentage: Option<u32>,
}

impl Reservation {
    pub fn is_cancelled(&self) -> bool {
        self.status == ReservationStatus::Cancelled
    }
}

/// Outcome of the cancellation refund policy.
#[derive(Debug, Clone, Copy, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Refund {
    pub amount: f64,
    pub percentage: u32,
    pub hours_until_reservation: f64,
}

/// Round a currency amount to two decimal places for reporting.
pub fn round_currency(amount: f64) -> f64 {
    (amount * 100.0).round() / 100.0
}
