use serde_json::Value;
use tracing::debug;

use crate::config::MARKET_RENAMES;
use crate::types::{CanonicalOdds, Observation, ProviderOdds};

/// Rename one match's provider-vocabulary odds into canonical markets.
///
/// `wrapper` is the match's `match_odds` entry, `{results: {provider_id:
/// {market_code: [[...], ...]}}}`. Observation arrays are copied verbatim;
/// markets a provider did not quote stay as empty series.
pub fn normalize_match_odds(match_id: &str, wrapper: Option<&Value>) -> ProviderOdds {
    let mut out = ProviderOdds::new();

    let Some(providers) = wrapper.and_then(|w| w.get("results")).and_then(|r| r.as_object()) else {
        return out;
    };

    for (provider_id, payload) in providers {
        let Some(markets) = payload.as_object() else {
            debug!(match_id, provider_id = %provider_id, "[ODDS] provider payload is not a mapping; skipped");
            continue;
        };

        let mut canonical = CanonicalOdds::default();
        for (code, market) in MARKET_RENAMES {
            let Some(raw_series) = markets.get(*code) else { continue };
            let Some(entries) = raw_series.as_array() else {
                debug!(match_id, provider_id = %provider_id, code, "[ODDS] market is not a sequence; left empty");
                continue;
            };
            let series = canonical.series_mut(*market);
            for entry in entries {
                match entry.as_array() {
                    Some(fields) => series.push(Observation(fields.clone())),
                    None => debug!(match_id, provider_id = %provider_id, code, "[ODDS] non-array observation dropped"),
                }
            }
        }
        out.insert(provider_id.clone(), canonical);
    }

    out
}
