use std::collections::HashSet;

use serde_json::{Map, Value};
use tracing::{debug, warn};

use crate::snapshot::value::{as_i64, as_u32, first_result, id_string, text};
use crate::types::RawMatch;

/// One parsed snapshot. Lookup sections are kept as raw id-keyed maps for
/// the entity resolver; match odds stay raw for the odds normalizer.
#[derive(Debug, Default)]
pub struct Snapshot {
    pub matches: Vec<RawMatch>,
    /// match_id → `{provider_id: {market_code: [[...], ...]}}`
    pub match_odds: Map<String, Value>,
    pub team_info: Map<String, Value>,
    pub competition_info: Map<String, Value>,
    pub countries: Vec<Value>,
}

#[derive(Debug, Default)]
pub struct ReadStats {
    pub live_entries: usize,
    pub details_only: usize,
    pub skipped_no_id: usize,
    /// Sections present with the wrong JSON shape, treated as empty.
    pub malformed_sections: Vec<&'static str>,
}

/// Parse the collector's snapshot document.
///
/// Never fails: a section of the wrong shape is logged and treated as empty,
/// and a non-object document yields an empty snapshot.
pub fn parse_snapshot(doc: &Value) -> (Snapshot, ReadStats) {
    let mut stats = ReadStats::default();

    let Some(root) = doc.as_object() else {
        warn!("[SNAPSHOT] top-level document is not an object; treating as empty");
        stats.malformed_sections.push("<root>");
        return (Snapshot::default(), stats);
    };

    let live = section_array(root.get("live_matches").and_then(|l| l.get("results")), "live_matches.results", &mut stats);
    let details = section_map(root.get("match_details"), "match_details", &mut stats);
    let match_odds = section_map(root.get("match_odds"), "match_odds", &mut stats);
    let team_info = section_map(root.get("team_info"), "team_info", &mut stats);
    let competition_info = section_map(root.get("competition_info"), "competition_info", &mut stats);
    let countries = section_array(root.get("countries").and_then(|c| c.get("results")), "countries.results", &mut stats);

    let mut matches = Vec::with_capacity(live.len());
    let mut seen: HashSet<String> = HashSet::new();

    for entry in &live {
        let Some(id) = entry.get("id").and_then(id_string) else {
            stats.skipped_no_id += 1;
            continue;
        };
        if !seen.insert(id.clone()) {
            debug!(match_id = %id, "[SNAPSHOT] duplicate live entry skipped");
            continue;
        }
        let detail = details.get(&id).and_then(first_result);
        matches.push(build_raw_match(id, Some(entry), detail));
        stats.live_entries += 1;
    }

    for (id, wrapper) in &details {
        if seen.contains(id) {
            continue;
        }
        let Some(detail) = first_result(wrapper) else { continue };
        seen.insert(id.clone());
        matches.push(build_raw_match(id.clone(), None, Some(detail)));
        stats.details_only += 1;
    }

    let snapshot = Snapshot {
        matches,
        match_odds,
        team_info,
        competition_info,
        countries,
    };
    (snapshot, stats)
}

fn section_map(v: Option<&Value>, name: &'static str, stats: &mut ReadStats) -> Map<String, Value> {
    match v {
        None | Some(Value::Null) => Map::new(),
        Some(Value::Object(m)) => m.clone(),
        Some(_) => {
            warn!("[SNAPSHOT] section {name} is not a mapping; treating as empty");
            stats.malformed_sections.push(name);
            Map::new()
        }
    }
}

fn section_array(v: Option<&Value>, name: &'static str, stats: &mut ReadStats) -> Vec<Value> {
    match v {
        None | Some(Value::Null) => Vec::new(),
        Some(Value::Array(a)) => a.clone(),
        Some(_) => {
            warn!("[SNAPSHOT] section {name} is not a sequence; treating as empty");
            stats.malformed_sections.push(name);
            Vec::new()
        }
    }
}

/// Field from the live entry, falling back to the detail record.
fn pick<'a>(live: Option<&'a Value>, detail: Option<&'a Value>, key: &str) -> Option<&'a Value> {
    let non_null = |v: &&Value| !v.is_null();
    live.and_then(|l| l.get(key))
        .filter(non_null)
        .or_else(|| detail.and_then(|d| d.get(key)).filter(non_null))
}

fn build_raw_match(id: String, live: Option<&Value>, detail: Option<&Value>) -> RawMatch {
    let score_array = pick(live, detail, "score").and_then(|s| s.as_array());

    let status_id = pick(live, detail, "status_id")
        .and_then(as_u32)
        .or_else(|| score_array.and_then(|a| a.get(1)).and_then(as_u32));

    let score = live.and_then(parse_score).or_else(|| detail.and_then(parse_score));

    let team_id = |flat: &str, nested: &str| {
        pick(live, detail, flat)
            .and_then(id_string)
            .or_else(|| pick(live, detail, nested).and_then(|t| t.get("id")).and_then(id_string))
    };
    let home_team_id = team_id("home_team_id", "home");
    let away_team_id = team_id("away_team_id", "away");
    let competition_id = team_id("competition_id", "league");

    let kickoff = pick(live, detail, "kickoff").and_then(text).or_else(|| {
        score_array
            .and_then(|a| a.get(4))
            .and_then(as_i64)
            .filter(|ts| *ts > 0)
            .map(|ts| ts.to_string())
    });

    let venue = pick(live, detail, "venue").and_then(|v| match v {
        Value::Object(o) => o.get("name").and_then(text),
        other => text(other),
    });

    RawMatch {
        status_id,
        score,
        home_team_id,
        away_team_id,
        competition_id,
        match_time: pick(live, detail, "match_time").and_then(as_i64),
        kickoff,
        venue,
        home_position: pick(live, detail, "home_position").and_then(text),
        away_position: pick(live, detail, "away_position").and_then(text),
        environment: pick(live, detail, "environment").filter(|e| e.is_object()).cloned(),
        events: pick(live, detail, "events")
            .and_then(|e| e.as_array())
            .cloned()
            .unwrap_or_default(),
        id,
    }
}

/// Score as "home-away". Accepts a ready string, a provider score array
/// `[id, status, home_scores[], away_scores[], kickoff, ...]` (regular-time
/// score is element 0), or separate `home_scores`/`away_scores` lists
/// (latest element wins).
fn parse_score(entry: &Value) -> Option<String> {
    match entry.get("score") {
        Some(Value::String(s)) if !s.trim().is_empty() => return Some(s.trim().to_string()),
        Some(Value::Array(a)) => {
            let side = |i: usize| a.get(i)?.as_array()?.first().and_then(text);
            if let (Some(h), Some(aw)) = (side(2), side(3)) {
                return Some(format!("{h}-{aw}"));
            }
        }
        _ => {}
    }
    let last = |key: &str| entry.get(key)?.as_array()?.last().and_then(text);
    match (last("home_scores"), last("away_scores")) {
        (Some(h), Some(a)) => Some(format!("{h}-{a}")),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn live_entry_merged_with_details() {
        let doc = json!({
            "live_matches": {"results": [
                {"id": "m1", "status_id": 2, "score": "1-0"}
            ]},
            "match_details": {"m1": {"results": [{
                "home_team_id": "t1", "away_team_id": "t2", "competition_id": "c1",
                "status_id": 9, "match_time": 1718000000,
                "venue": {"name": "Anfield"}, "home_position": 3, "away_position": "7",
                "environment": {"weather": 5}, "events": [{"type": 1}]
            }]}}
        });
        let (snap, stats) = parse_snapshot(&doc);
        assert_eq!(stats.live_entries, 1);
        let m = &snap.matches[0];
        assert_eq!(m.id, "m1");
        // live value wins over detail value
        assert_eq!(m.status_id, Some(2));
        assert_eq!(m.score.as_deref(), Some("1-0"));
        assert_eq!(m.home_team_id.as_deref(), Some("t1"));
        assert_eq!(m.competition_id.as_deref(), Some("c1"));
        assert_eq!(m.match_time, Some(1_718_000_000));
        assert_eq!(m.venue.as_deref(), Some("Anfield"));
        assert_eq!(m.home_position.as_deref(), Some("3"));
        assert_eq!(m.away_position.as_deref(), Some("7"));
        assert_eq!(m.events.len(), 1);
        assert!(m.environment.is_some());
    }

    #[test]
    fn provider_score_array_supplies_score_status_and_kickoff() {
        let doc = json!({
            "live_matches": {"results": [
                {"id": 77, "score": [77, 4, [2, 1, 0, 0, 5], [1, 1, 0, 0, 3], 1718001234]}
            ]}
        });
        let (snap, _) = parse_snapshot(&doc);
        let m = &snap.matches[0];
        assert_eq!(m.id, "77");
        assert_eq!(m.status_id, Some(4));
        assert_eq!(m.score.as_deref(), Some("2-1"));
        assert_eq!(m.kickoff.as_deref(), Some("1718001234"));
    }

    #[test]
    fn score_lists_use_latest_element() {
        let doc = json!({"live_matches": {"results": [
            {"id": "m1", "home_scores": [0, 1, 2], "away_scores": [0, 0, 1]}
        ]}});
        let (snap, _) = parse_snapshot(&doc);
        assert_eq!(snap.matches[0].score.as_deref(), Some("2-1"));
    }

    #[test]
    fn details_only_matches_appended_after_live_order() {
        let doc = json!({
            "live_matches": {"results": [{"id": "b"}, {"id": "a"}]},
            "match_details": {
                "z": {"results": [{"status_id": 1}]},
                "a": {"results": [{"status_id": 2}]},
                "empty": {"results": []}
            }
        });
        let (snap, stats) = parse_snapshot(&doc);
        let ids: Vec<&str> = snap.matches.iter().map(|m| m.id.as_str()).collect();
        assert_eq!(ids, vec!["b", "a", "z"]);
        assert_eq!(stats.details_only, 1);
        assert_eq!(snap.matches[1].status_id, Some(2));
    }

    #[test]
    fn malformed_sections_treated_as_empty() {
        let doc = json!({
            "live_matches": {"results": {"not": "a list"}},
            "team_info": [1, 2, 3],
            "competition_info": {},
            "countries": {"results": [{"id": "c", "name": "England"}]}
        });
        let (snap, stats) = parse_snapshot(&doc);
        assert!(snap.matches.is_empty());
        assert!(snap.team_info.is_empty());
        assert_eq!(snap.countries.len(), 1);
        assert_eq!(stats.malformed_sections, vec!["live_matches.results", "team_info"]);
    }

    #[test]
    fn non_object_document_is_empty_snapshot() {
        let (snap, stats) = parse_snapshot(&json!([1, 2]));
        assert!(snap.matches.is_empty());
        assert_eq!(stats.malformed_sections, vec!["<root>"]);
    }

    #[test]
    fn entries_without_id_are_skipped() {
        let doc = json!({"live_matches": {"results": [{"status_id": 2}, {"id": ""}, {"id": "m1"}]}});
        let (snap, stats) = parse_snapshot(&doc);
        assert_eq!(snap.matches.len(), 1);
        assert_eq!(stats.skipped_no_id, 2);
    }
}
