use serde::Deserialize;
use std::env;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub tables: TablesConfig,
    pub booking_rules: BookingRules,
    pub availability: AvailabilityConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub port: u16,
}

/// Store collection names, passed explicitly into each adapter rather than
/// read from ambient process environment at call sites.
#[derive(Debug, Deserialize, Clone)]
pub struct TablesConfig {
    pub holds: String,
    pub reservations: String,
    pub restaurants: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct BookingRules {
    /// How long a hold stays claimable.
    #[serde(default = "default_hold_ttl")]
    pub hold_ttl_minutes: i64,
    /// Flat deposit charged at confirmation.
    #[serde(default = "default_flat_deposit")]
    pub flat_deposit: f64,
    /// Per-guest deposit applied when a modification changes party size.
    #[serde(default = "default_deposit_per_guest")]
    pub deposit_per_guest: f64,
    /// Cancellations at least this many hours out refund in full.
    #[serde(default = "default_full_refund_hours")]
    pub full_refund_hours: f64,
    /// Cancellations at least this many hours out refund half.
    #[serde(default = "default_half_refund_hours")]
    pub half_refund_hours: f64,
}

fn default_hold_ttl() -> i64 {
    10
}
fn default_flat_deposit() -> f64 {
    100.0
}
fn default_deposit_per_guest() -> f64 {
    25.0
}
fn default_full_refund_hours() -> f64 {
    24.0
}
fn default_half_refund_hours() -> f64 {
    4.0
}

impl Default for BookingRules {
    fn default() -> Self {
        Self {
            hold_ttl_minutes: default_hold_ttl(),
            flat_deposit: default_flat_deposit(),
            deposit_per_guest: default_deposit_per_guest(),
            full_refund_hours: default_full_refund_hours(),
            half_refund_hours: default_half_refund_hours(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct AvailabilityConfig {
    #[serde(default = "default_open_hour")]
    pub open_hour: u32,
    #[serde(default = "default_close_hour")]
    pub close_hour: u32,
    #[serde(default = "default_slot_minutes")]
    pub slot_minutes: u32,
}

fn default_open_hour() -> u32 {
    18
}
fn default_close_hour() -> u32 {
    22
}
fn default_slot_minutes() -> u32 {
    30
}

impl Default for AvailabilityConfig {
    fn default() -> Self {
        Self {
            open_hour: default_open_hour(),
            close_hour: default_close_hour(),
            slot_minutes: default_slot_minutes(),
        }
    }
}

impl Config {
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

        let s = config::Config::builder()
            // Start off by merging in the "default" configuration file
            .add_source(config::File::with_name("config/default"))
            // Environment-specific overrides, optional
            .add_source(config::File::with_name(&format!("config/{}", run_mode)).required(false))
            // Local overrides, not checked in
            .add_source(config::File::with_name("config/local").required(false))
            // Eg. `SAVORA__SERVER__PORT=8080` overrides server.port
            .add_source(config::Environment::with_prefix("SAVORA").separator("__"))
            .build()?;

        s.try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_booking_rules_defaults() {
        let rules = BookingRules::default();
        assert_eq!(rules.hold_ttl_minutes, 10);
        assert_eq!(rules.flat_deposit, 100.0);
        assert_eq!(rules.deposit_per_guest, 25.0);
        assert_eq!(rules.full_refund_hours, 24.0);
        assert_eq!(rules.half_refund_hours, 4.0);
    }

    #[test]
    fn test_availability_defaults() {
        let avail = AvailabilityConfig::default();
        assert_eq!(avail.open_hour, 18);
        assert_eq!(avail.close_hour, 22);
        assert_eq!(avail.slot_minutes, 30);
    }
}
