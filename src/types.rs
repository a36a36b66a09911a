use std::collections::BTreeMap;

use serde::ser::{SerializeMap, Serializer};
use serde::{Deserialize, Serialize};
use serde_json::Value;

// ---------------------------------------------------------------------------
// Markets
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Market {
    MoneyLine,
    Spread,
    OverUnder,
    Corners,
}

impl Market {
    pub const ALL: [Market; 4] = [
        Market::MoneyLine,
        Market::Spread,
        Market::OverUnder,
        Market::Corners,
    ];

    /// Canonical field name.
    pub fn name(self) -> &'static str {
        match self {
            Market::MoneyLine => "money_line",
            Market::Spread => "spread",
            Market::OverUnder => "over_under",
            Market::Corners => "corners",
        }
    }

    /// Backward-compatible alias; always carries the same series as `name()`.
    pub fn legacy_name(self) -> &'static str {
        match self {
            Market::MoneyLine => "money_line_american",
            Market::Spread => "spread_american",
            Market::OverUnder => "over_under_american",
            Market::Corners => "corners_american",
        }
    }
}

impl std::fmt::Display for Market {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

// ---------------------------------------------------------------------------
// Match status
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum MatchStatus {
    NotStarted,
    FirstHalf,
    HalfTime,
    SecondHalf,
    Overtime,
    OvertimeHalfTime,
    Penalties,
    Finished,
    Cancelled,
    Postponed,
    Interrupted,
    Abandoned,
}

impl MatchStatus {
    pub fn from_code(code: u32) -> Option<Self> {
        let status = match code {
            1 => MatchStatus::NotStarted,
            2 => MatchStatus::FirstHalf,
            3 => MatchStatus::HalfTime,
            4 => MatchStatus::SecondHalf,
            5 => MatchStatus::Overtime,
            6 => MatchStatus::OvertimeHalfTime,
            7 => MatchStatus::Penalties,
            9 => MatchStatus::Finished,
            10 => MatchStatus::Cancelled,
            11 => MatchStatus::Postponed,
            12 => MatchStatus::Interrupted,
            13 => MatchStatus::Abandoned,
            _ => return None,
        };
        Some(status)
    }
}

impl std::fmt::Display for MatchStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            MatchStatus::NotStarted => "Not Started",
            MatchStatus::FirstHalf => "First Half",
            MatchStatus::HalfTime => "Half-time",
            MatchStatus::SecondHalf => "Second Half",
            MatchStatus::Overtime => "Overtime",
            MatchStatus::OvertimeHalfTime => "Overtime Half-time",
            MatchStatus::Penalties => "Penalties",
            MatchStatus::Finished => "Finished",
            MatchStatus::Cancelled => "Cancelled",
            MatchStatus::Postponed => "Postponed",
            MatchStatus::Interrupted => "Interrupted",
            MatchStatus::Abandoned => "Abandoned",
        };
        write!(f, "{s}")
    }
}

// ---------------------------------------------------------------------------
// Odds observations
// ---------------------------------------------------------------------------

/// One odds quote as received:
/// `[timestamp, elapsed_minute, value_a, value_b, value_c, status, sealed, score]`.
///
/// Values are relayed verbatim, so the raw JSON array is kept as-is and
/// only the timestamp and minute are interpreted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Observation(pub Vec<Value>);

impl Observation {
    pub fn timestamp(&self) -> Option<f64> {
        self.0.first().and_then(number_like)
    }

    /// Elapsed minute. Blank or non-numeric minutes yield None.
    pub fn minute(&self) -> Option<i64> {
        match self.0.get(1)? {
            Value::Number(n) => n.as_i64(),
            Value::String(s) => s.trim().parse().ok(),
            _ => None,
        }
    }

    /// The three market values (home/draw/away, home/handicap/away or
    /// over/line/under depending on the market).
    pub fn values(&self) -> Option<(&Value, &Value, &Value)> {
        Some((self.0.get(2)?, self.0.get(3)?, self.0.get(4)?))
    }
}

fn number_like(v: &Value) -> Option<f64> {
    v.as_f64().or_else(|| v.as_str().and_then(|s| s.trim().parse().ok()))
}

pub type MarketSeries = Vec<Observation>;

/// The four canonical series for one provider. Every market key is always
/// present; a market the provider did not quote is an empty series.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CanonicalOdds {
    pub money_line: MarketSeries,
    pub spread: MarketSeries,
    pub over_under: MarketSeries,
    pub corners: MarketSeries,
}

impl CanonicalOdds {
    pub fn series(&self, market: Market) -> &MarketSeries {
        match market {
            Market::MoneyLine => &self.money_line,
            Market::Spread => &self.spread,
            Market::OverUnder => &self.over_under,
            Market::Corners => &self.corners,
        }
    }

    pub fn series_mut(&mut self, market: Market) -> &mut MarketSeries {
        match market {
            Market::MoneyLine => &mut self.money_line,
            Market::Spread => &mut self.spread,
            Market::OverUnder => &mut self.over_under,
            Market::Corners => &mut self.corners,
        }
    }

    pub fn has_observations(&self) -> bool {
        Market::ALL.iter().any(|m| !self.series(*m).is_empty())
    }
}

/// provider_id → canonical series, for one match.
pub type ProviderOdds = BTreeMap<String, CanonicalOdds>;

/// Odds chosen for the flat summary fields. Serializes each market under
/// both its canonical and legacy name.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SelectedMarkets(pub CanonicalOdds);

impl Serialize for SelectedMarkets {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(Market::ALL.len() * 2))?;
        for market in Market::ALL {
            let series = self.0.series(market);
            map.serialize_entry(market.name(), series)?;
            map.serialize_entry(market.legacy_name(), series)?;
        }
        map.end()
    }
}

// ---------------------------------------------------------------------------
// Reference entities
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct TeamRef {
    pub id: String,
    pub name: Option<String>,
    pub competition_id: Option<String>,
    pub country_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CompetitionRef {
    pub id: String,
    pub name: Option<String>,
    pub country_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CountryRef {
    pub id: String,
    pub name: Option<String>,
}

// ---------------------------------------------------------------------------
// Raw match
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawMatch {
    pub id: String,
    pub status_id: Option<u32>,
    /// "home-away"
    pub score: Option<String>,
    pub home_team_id: Option<String>,
    pub away_team_id: Option<String>,
    pub competition_id: Option<String>,
    pub match_time: Option<i64>,
    pub kickoff: Option<String>,
    pub venue: Option<String>,
    pub home_position: Option<String>,
    pub away_position: Option<String>,
    /// Raw venue/weather payload.
    pub environment: Option<Value>,
    pub events: Vec<Value>,
}

// ---------------------------------------------------------------------------
// Output
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Environment {
    pub weather: Option<Value>,
    pub weather_description: Option<String>,
    pub temperature: Option<String>,
    pub temperature_fahrenheit: Option<String>,
    pub humidity: Option<String>,
    pub wind_speed: Option<String>,
    pub wind_speed_mph: Option<String>,
    pub pressure: Option<String>,
}

/// Terminal per-match record. No field is skipped on serialization: absent
/// values are written as null so every key is always present.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatchSummary {
    #[serde(flatten)]
    pub markets: SelectedMarkets,
    pub odds_company_id: Option<String>,
    pub odds_company_name: Option<String>,
    pub odds: ProviderOdds,

    pub match_id: String,
    pub status: Option<u32>,
    pub status_id: Option<u32>,
    pub home: Option<String>,
    pub away: Option<String>,
    pub home_id: Option<String>,
    pub away_id: Option<String>,
    pub home_position: Option<String>,
    pub away_position: Option<String>,
    pub score: Option<String>,
    pub match_time: Option<i64>,
    pub kickoff: Option<String>,
    pub venue: Option<String>,
    pub competition: Option<String>,
    pub competition_id: Option<String>,
    pub country: Option<String>,

    pub environment: Environment,
    pub events: Vec<Value>,
}

impl MatchSummary {
    pub fn match_status(&self) -> Option<MatchStatus> {
        self.status_id.and_then(MatchStatus::from_code)
    }

    pub fn has_odds(&self) -> bool {
        self.markets.0.has_observations()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SummaryMetadata {
    pub source: String,
    pub processing_time: String,
    pub total_matches: usize,
    pub total_teams: usize,
    pub total_competitions: usize,
    pub total_countries: usize,
    pub in_play_matches: usize,
    pub contract_violations: usize,
}

/// Whole-cycle output artifact, replaced wholesale every cycle.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SummaryEnvelope {
    pub timestamp: String,
    pub version: String,
    pub summaries: Vec<Value>,
    pub metadata: SummaryMetadata,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn obs(v: Value) -> Observation {
        serde_json::from_value(v).unwrap()
    }

    #[test]
    fn observation_minute_accepts_string_and_number() {
        assert_eq!(obs(json!([1000, "3", 1, 2, 3, 0, 0, "0-0"])).minute(), Some(3));
        assert_eq!(obs(json!([1000, 4, 1, 2, 3, 0, 0, "0-0"])).minute(), Some(4));
        assert_eq!(obs(json!([1000, "", 1, 2, 3, 0, 0, "0-0"])).minute(), None);
        assert_eq!(obs(json!([1000])).minute(), None);
    }

    #[test]
    fn observation_timestamp_parses_numeric_strings() {
        assert_eq!(obs(json!([2500, "4"])).timestamp(), Some(2500.0));
        assert_eq!(obs(json!(["2600", "4"])).timestamp(), Some(2600.0));
        assert_eq!(obs(json!([null, "4"])).timestamp(), None);
    }

    #[test]
    fn selected_markets_writes_both_names() {
        let mut odds = CanonicalOdds::default();
        odds.money_line.push(obs(json!([1000, "3", -150, 280, 185, 2, 0, "0-0"])));
        let v = serde_json::to_value(SelectedMarkets(odds)).unwrap();
        assert_eq!(v["money_line"], v["money_line_american"]);
        assert_eq!(v["money_line"], json!([[1000, "3", -150, 280, 185, 2, 0, "0-0"]]));
        for market in Market::ALL {
            assert!(v.get(market.name()).is_some());
            assert!(v.get(market.legacy_name()).is_some());
        }
        assert_eq!(v["corners_american"], json!([]));
    }

    #[test]
    fn status_vocabulary_skips_unassigned_codes() {
        assert_eq!(MatchStatus::from_code(2), Some(MatchStatus::FirstHalf));
        assert_eq!(MatchStatus::from_code(7), Some(MatchStatus::Penalties));
        assert_eq!(MatchStatus::from_code(8), None);
        assert_eq!(MatchStatus::from_code(13).map(|s| s.to_string()).as_deref(), Some("Abandoned"));
    }
}
