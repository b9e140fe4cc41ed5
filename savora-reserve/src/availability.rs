use async_trait::async_trait;
use rand::Rng;
use savora_store::app_config::AvailabilityConfig;
use serde::Serialize;

/// A candidate reservation slot for a restaurant/date.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Slot {
    /// Wall-clock slot, `HH:MM`.
    pub time: String,
    pub available: bool,
    pub tables_available: u32,
}

/// Strategy seam for slot generation, so real table-inventory logic can be
/// substituted without touching callers.
#[async_trait]
pub trait SlotStrategy: Send + Sync {
    async fn slots_for(&self, restaurant_id: &str, date: &str, party_size: u32) -> Vec<Slot>;
}

/// Default strategy: every slot in the service window is offered with a
/// synthesized table count. No store lookup is involved.
pub struct RandomSlots {
    config: AvailabilityConfig,
}

impl RandomSlots {
    pub fn new(config: AvailabilityConfig) -> Self {
        Self { config }
    }

    fn generate(&self) -> Vec<Slot> {
        let mut rng = rand::thread_rng();
        let step = self.config.slot_minutes.max(1);
        let mut slots = Vec::new();
        for hour in self.config.open_hour..self.config.close_hour {
            let mut minute = 0;
            while minute < 60 {
                slots.push(Slot {
                    time: format!("{:02}:{:02}", hour, minute),
                    available: true,
                    tables_available: rng.gen_range(1..=5),
                });
                minute += step;
            }
        }
        slots
    }
}

#[async_trait]
impl SlotStrategy for RandomSlots {
    async fn slots_for(&self, _restaurant_id: &str, _date: &str, _party_size: u32) -> Vec<Slot> {
        self.generate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strategy() -> RandomSlots {
        RandomSlots::new(AvailabilityConfig::default())
    }

    #[tokio::test]
    async fn test_default_window_yields_eight_ordered_slots() {
        let slots = strategy().slots_for("rest1", "2030-01-01", 4).await;

        assert_eq!(slots.len(), 8);
        assert_eq!(slots[0].time, "18:00");
        assert_eq!(slots[1].time, "18:30");
        assert_eq!(slots[7].time, "21:30");

        let times: Vec<&str> = slots.iter().map(|s| s.time.as_str()).collect();
        let mut sorted = times.clone();
        sorted.sort_unstable();
        assert_eq!(times, sorted);
    }

    #[tokio::test]
    async fn test_slots_carry_table_counts_in_range() {
        let slots = strategy().slots_for("rest1", "2030-01-01", 2).await;
        for slot in &slots {
            assert!(slot.available);
            assert!((1..=5).contains(&slot.tables_available));
        }
    }

    #[tokio::test]
    async fn test_custom_window_and_granularity() {
        let strategy = RandomSlots::new(AvailabilityConfig {
            open_hour: 12,
            close_hour: 14,
            slot_minutes: 15,
        });
        let slots = strategy.slots_for("rest1", "2030-01-01", 2).await;
        assert_eq!(slots.len(), 8);
        assert_eq!(slots[0].time, "12:00");
        assert_eq!(slots[7].time, "13:45");
    }
}
