use std::collections::BTreeMap;

use crate::config::minute_window;
use crate::types::{CanonicalOdds, Market, MarketSeries, Observation};

/// Inclusive elapsed-minute window with per-minute "latest quote wins"
/// deduplication.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MinuteWindow {
    pub low: i64,
    pub high: i64,
}

impl Default for MinuteWindow {
    fn default() -> Self {
        Self {
            low: minute_window::LOW,
            high: minute_window::HIGH,
        }
    }
}

impl MinuteWindow {
    pub fn new(low: i64, high: i64) -> Self {
        Self { low, high }
    }

    pub fn contains(&self, minute: i64) -> bool {
        (self.low..=self.high).contains(&minute)
    }

    /// Keep observations whose minute is in range, one per minute: the one
    /// with the greatest timestamp (a later duplicate wins a timestamp tie).
    /// Output is in ascending minute order. Observations without a numeric
    /// minute are dropped whole.
    pub fn apply(&self, series: &[Observation]) -> MarketSeries {
        let mut by_minute: BTreeMap<i64, &Observation> = BTreeMap::new();

        for obs in series {
            let Some(minute) = obs.minute() else { continue };
            if !self.contains(minute) {
                continue;
            }
            let ts = obs.timestamp().unwrap_or(f64::NEG_INFINITY);
            by_minute
                .entry(minute)
                .and_modify(|kept| {
                    if ts >= kept.timestamp().unwrap_or(f64::NEG_INFINITY) {
                        *kept = obs;
                    }
                })
                .or_insert(obs);
        }

        by_minute.into_values().cloned().collect()
    }

    pub fn apply_all(&self, odds: &CanonicalOdds) -> CanonicalOdds {
        let mut out = CanonicalOdds::default();
        for market in Market::ALL {
            *out.series_mut(market) = self.apply(odds.series(market));
        }
        out
    }
}
