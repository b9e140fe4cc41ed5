use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use savora_domain::reservation::round_currency;
use savora_domain::Refund;
use savora_store::app_config::BookingRules;
use tracing::warn;

/// Compute the cancellation refund for a reservation at `date`/`time`,
/// evaluated against local wall-clock `now`.
///
/// Tiering: at least `full_refund_hours` out refunds 100%, at least
/// `half_refund_hours` out refunds 50%, anything closer (including a slot
/// already in the past) refunds nothing. Malformed stored date/time falls
/// back to the 0% tier rather than failing the cancellation.
pub fn compute_refund(
    deposit: f64,
    date: &str,
    time: &str,
    now: NaiveDateTime,
    rules: &BookingRules,
) -> Refund {
    let Some(slot) = parse_slot(date, time) else {
        warn!(date, time, "unparsable reservation slot, refunding 0%");
        return Refund {
            amount: 0.0,
            percentage: 0,
            hours_until_reservation: 0.0,
        };
    };

    let hours_until = (slot - now).num_seconds() as f64 / 3600.0;

    let percentage = if hours_until < 0.0 {
        0
    } else if hours_until >= rules.full_refund_hours {
        100
    } else if hours_until >= rules.half_refund_hours {
        50
    } else {
        0
    };

    Refund {
        amount: round_currency(deposit * (percentage as f64) / 100.0),
        percentage,
        hours_until_reservation: (hours_until * 100.0).round() / 100.0,
    }
}

fn parse_slot(date: &str, time: &str) -> Option<NaiveDateTime> {
    let day = NaiveDate::parse_from_str(date, "%Y-%m-%d").ok()?;
    // A reservation stored without a time cancels against midnight.
    let time = if time.is_empty() { "00:00" } else { time };
    let clock = NaiveTime::parse_from_str(time, "%H:%M").ok()?;
    Some(day.and_time(clock))
}
