use serde_json::Value;

use crate::types::Market;

/// Keys every serialized summary must carry (null is allowed, absence is not).
pub const REQUIRED_FIELDS: &[&str] = &[
    "match_id",
    "home",
    "away",
    "home_id",
    "away_id",
    "score",
    "status",
    "status_id",
    "competition",
    "competition_id",
    "country",
    "match_time",
    "venue",
    "home_position",
    "away_position",
    "odds_company_id",
    "odds_company_name",
    "odds",
    "environment",
    "events",
];

/// Schema violations in one serialized summary: missing required keys
/// (market keys under both names included) and a status/status_id mismatch.
pub fn contract_violations(summary: &Value) -> Vec<String> {
    let Some(obj) = summary.as_object() else {
        return vec!["summary is not an object".to_string()];
    };

    let market_keys = Market::ALL.iter().flat_map(|m| [m.name(), m.legacy_name()]);
    let mut violations: Vec<String> = REQUIRED_FIELDS
        .iter()
        .copied()
        .chain(market_keys)
        .filter(|key| !obj.contains_key(*key))
        .map(|key| format!("missing field {key}"))
        .collect();

    if obj.get("status") != obj.get("status_id") {
        violations.push("status and status_id differ".to_string());
    }
    violations
}
