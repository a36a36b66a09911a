use std::collections::BTreeMap;
use std::fmt::Write;

use serde_json::Value;

use crate::config::IN_PLAY_STATUSES;
use crate::types::{Market, MatchStatus, MatchSummary};

const RULE: &str = "================================================================================";
const TOP_COMPETITIONS: usize = 10;

/// Render the in-play report: a header, one line per match, and a
/// statistics footer. Matches are ordered by competition, then status,
/// then kickoff time.
pub fn render_report(in_play: &[&MatchSummary], generated_at: &str) -> String {
    let mut ordered: Vec<&MatchSummary> = in_play.to_vec();
    ordered.sort_by(|a, b| {
        a.competition
            .cmp(&b.competition)
            .then(a.status_id.cmp(&b.status_id))
            .then(a.match_time.cmp(&b.match_time))
    });

    let mut out = String::new();
    let _ = writeln!(out, "IN-PLAY STATUS FILTER {IN_PLAY_STATUSES:?}");
    let _ = writeln!(out, "{RULE}");
    let _ = writeln!(out, "Generated: {generated_at}");
    let _ = writeln!(out, "In-play matches: {}", ordered.len());
    let _ = writeln!(out, "{RULE}");

    for m in &ordered {
        let _ = writeln!(out, "{}", match_line(m));
    }

    write_footer(&mut out, &ordered);
    out
}

/// `[status] id | HOME vs AWAY | score | competition (country) | odds`
pub fn match_line(m: &MatchSummary) -> String {
    let status = m
        .match_status()
        .map(|s| s.to_string())
        .unwrap_or_else(|| format!("Status {}", m.status_id.map_or("?".to_string(), |s| s.to_string())));
    format!(
        "[{status}] {} | {} vs {} | {} | {} ({}) | {}",
        m.match_id,
        m.home.as_deref().unwrap_or("?").to_uppercase(),
        m.away.as_deref().unwrap_or("?").to_uppercase(),
        m.score.as_deref().unwrap_or("?"),
        m.competition.as_deref().unwrap_or("?"),
        m.country.as_deref().unwrap_or("?"),
        odds_summary(m),
    )
}

/// Latest money-line, spread and over/under quote of the selected provider.
pub fn odds_summary(m: &MatchSummary) -> String {
    let Some(provider) = m.odds_company_id.as_deref() else {
        return "odds: none".to_string();
    };
    let name = m.odds_company_name.as_deref().unwrap_or(provider);

    let latest = |market: Market, label: &str| -> String {
        match m.markets.0.series(market).last().and_then(|o| o.values()) {
            Some((a, b, c)) => format!("{label} {}/{}/{}", show(a), show(b), show(c)),
            None => format!("{label} n/a"),
        }
    };

    format!(
        "odds: {name} {} {} {}",
        latest(Market::MoneyLine, "ML"),
        latest(Market::Spread, "SP"),
        latest(Market::OverUnder, "OU"),
    )
}

fn show(v: &Value) -> String {
    match v {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn write_footer(out: &mut String, in_play: &[&MatchSummary]) {
    let total = in_play.len();
    let pct = |n: usize| if total == 0 { 0.0 } else { n as f64 * 100.0 / total as f64 };

    let mut by_status: BTreeMap<u32, usize> = BTreeMap::new();
    let mut by_competition: BTreeMap<(String, String), usize> = BTreeMap::new();
    for m in in_play {
        if let Some(s) = m.status_id {
            *by_status.entry(s).or_default() += 1;
        }
        let key = (
            m.competition.clone().unwrap_or_else(|| "?".to_string()),
            m.country.clone().unwrap_or_else(|| "?".to_string()),
        );
        *by_competition.entry(key).or_default() += 1;
    }

    let with_weather = in_play
        .iter()
        .filter(|m| m.environment.weather_description.is_some())
        .count();
    let with_odds = in_play.iter().filter(|m| m.has_odds()).count();

    let _ = writeln!(out, "{RULE}");
    let _ = writeln!(out, "SUMMARY");
    let _ = writeln!(out, "  Competitions: {}", by_competition.len());
    let _ = writeln!(out, "  With weather data: {with_weather} ({:.1}%)", pct(with_weather));
    let _ = writeln!(out, "  With odds data: {with_odds} ({:.1}%)", pct(with_odds));
    let _ = writeln!(out, "  By status:");
    for (code, count) in &by_status {
        let name = MatchStatus::from_code(*code).map_or_else(|| format!("Status {code}"), |s| s.to_string());
        let _ = writeln!(out, "    {name}: {count} ({:.1}%)", pct(*count));
    }

    let mut ranked: Vec<_> = by_competition.into_iter().collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    let _ = writeln!(out, "  Top competitions:");
    for (i, ((comp, country), count)) in ranked.iter().take(TOP_COMPETITIONS).enumerate() {
        let _ = writeln!(out, "    {}. {comp} ({country}): {count}", i + 1);
    }
    if ranked.len() > TOP_COMPETITIONS {
        let _ = writeln!(out, "    ... and {} more", ranked.len() - TOP_COMPETITIONS);
    }
    let _ = writeln!(out, "{RULE}");
}
