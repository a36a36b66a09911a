use crate::error::{AppError, Result};
use crate::types::Market;

/// Default input snapshot written by the collector.
pub const SNAPSHOT_PATH: &str = "step1.json";

/// Default enriched summary artifact.
pub const SUMMARY_PATH: &str = "step2.json";

/// Default in-play report file.
pub const REPORT_PATH: &str = "inplay_report.log";

/// Cycle interval (seconds) when `CYCLE_INTERVAL_SECS` is unset.
pub const CYCLE_INTERVAL_SECS: u64 = 60;

/// Schema version stamped on every summary envelope.
pub const SUMMARY_SCHEMA_VERSION: &str = "2025-06-11";

/// Provider-vocabulary market code → canonical market.
/// Fixed contract: downstream consumers depend on these names.
pub const MARKET_RENAMES: &[(&str, Market)] = &[
    ("eu", Market::MoneyLine),
    ("asia", Market::Spread),
    ("bs", Market::OverUnder),
    ("cr", Market::Corners),
];

/// Provider preference order. The first provider with any observed
/// market wins; BET365 ("2") is always tried first.
pub const PREFERRED_PROVIDERS: &[&str] = &[
    "2", "3", "4", "5", "6", "9", "10", "11", "13", "14", "15", "16", "17", "21", "22",
];

/// Provider id → display name.
pub const PROVIDER_NAMES: &[(&str, &str)] = &[
    ("2", "BET365"),
    ("3", "Crown"),
    ("4", "10BET"),
    ("5", "Ladbrokes"),
    ("6", "Mansion88"),
    ("7", "Macauslot"),
    ("8", "SNAI"),
    ("9", "William Hill"),
    ("10", "Easybets"),
    ("11", "Vcbet"),
    ("12", "EuroBet"),
    ("13", "Interwetten"),
    ("14", "12bet"),
    ("15", "Sbobet"),
    ("16", "Wewbet"),
    ("17", "18Bet"),
    ("18", "Fun88"),
    ("21", "188bet"),
    ("22", "Pinnacle"),
];

pub fn provider_name(provider_id: &str) -> Option<&'static str> {
    PROVIDER_NAMES
        .iter()
        .find(|(id, _)| *id == provider_id)
        .map(|(_, name)| *name)
}

/// Weather code → description.
pub const WEATHER_DESCRIPTIONS: &[(i64, &str)] = &[
    (1, "Partially cloudy"),
    (2, "Cloudy"),
    (3, "Partially cloudy/rain"),
    (4, "Snow"),
    (5, "Sunny"),
    (6, "Overcast Rain/partial thunderstorm"),
    (7, "Overcast"),
    (8, "Mist"),
    (9, "Cloudy with rain"),
    (10, "Cloudy with rain"),
    (11, "Cloudy with rain/partial Thunderstorms"),
    (12, "Clouds/rains and thunderstorms locally"),
    (13, "Fog"),
];

/// Inclusive elapsed-minute window applied to every odds series.
pub mod minute_window {
    pub const LOW: i64 = 2;
    pub const HIGH: i64 = 6;
}

/// Status codes retained by the in-play filter.
pub const IN_PLAY_STATUSES: &[u32] = &[2, 3, 4, 5, 6, 7];

/// m/s → mph.
pub const MPS_TO_MPH: f64 = 2.237;

#[derive(Debug, Clone)]
pub struct Config {
    pub snapshot_path: String,
    pub summary_path: String,
    pub report_path: String,
    pub log_level: String,
    /// Seconds between cycles (CYCLE_INTERVAL_SECS)
    pub cycle_interval_secs: u64,
    /// Run a single cycle and exit (RUN_ONCE)
    pub run_once: bool,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(get: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let cycle_interval_secs = match get("CYCLE_INTERVAL_SECS") {
            Some(raw) => raw
                .trim()
                .parse::<u64>()
                .ok()
                .filter(|secs| *secs > 0)
                .ok_or_else(|| {
                    AppError::Config(format!(
                        "CYCLE_INTERVAL_SECS must be a positive integer, got {raw:?}"
                    ))
                })?,
            None => CYCLE_INTERVAL_SECS,
        };

        Ok(Self {
            snapshot_path: get("SNAPSHOT_PATH").unwrap_or_else(|| SNAPSHOT_PATH.to_string()),
            summary_path: get("SUMMARY_PATH").unwrap_or_else(|| SUMMARY_PATH.to_string()),
            report_path: get("REPORT_PATH").unwrap_or_else(|| REPORT_PATH.to_string()),
            log_level: get("LOG_LEVEL").unwrap_or_else(|| "info".to_string()),
            cycle_interval_secs,
            run_once: get("RUN_ONCE")
                .map(|v| matches!(v.trim().to_lowercase().as_str(), "1" | "true" | "yes"))
                .unwrap_or(false),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_when_env_empty() {
        let cfg = Config::from_lookup(lookup(&[])).unwrap();
        assert_eq!(cfg.snapshot_path, SNAPSHOT_PATH);
        assert_eq!(cfg.summary_path, SUMMARY_PATH);
        assert_eq!(cfg.report_path, REPORT_PATH);
        assert_eq!(cfg.cycle_interval_secs, 60);
        assert!(!cfg.run_once);
    }

    #[test]
    fn run_once_and_interval_overrides() {
        let cfg = Config::from_lookup(lookup(&[("RUN_ONCE", "TRUE"), ("CYCLE_INTERVAL_SECS", "15")]))
            .unwrap();
        assert!(cfg.run_once);
        assert_eq!(cfg.cycle_interval_secs, 15);
    }

    #[test]
    fn zero_interval_rejected() {
        let err = Config::from_lookup(lookup(&[("CYCLE_INTERVAL_SECS", "0")])).unwrap_err();
        assert!(matches!(err, AppError::Config(_)));
    }

    #[test]
    fn preferred_providers_all_have_names() {
        for id in PREFERRED_PROVIDERS {
            assert!(provider_name(id).is_some(), "no display name for provider {id}");
        }
        assert_eq!(provider_name("2"), Some("BET365"));
        assert_eq!(provider_name("99"), None);
    }
}
