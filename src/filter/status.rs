use tracing::info;

use crate::config::IN_PLAY_STATUSES;
use crate::filter::report::odds_summary;
use crate::types::MatchSummary;

pub fn is_in_play(status_id: Option<u32>) -> bool {
    status_id.is_some_and(|s| IN_PLAY_STATUSES.contains(&s))
}

/// Summaries whose status is in the in-play set, in input order. Everything
/// else (not started, finished, abnormal terminations, unknown) is skipped.
pub fn filter_in_play(summaries: &[MatchSummary]) -> Vec<&MatchSummary> {
    summaries.iter().filter(|m| is_in_play(m.status_id)).collect()
}

pub fn log_in_play(m: &MatchSummary) {
    info!(
        event = "IN_PLAY",
        match_id = %m.match_id,
        status_id = ?m.status_id,
        has_odds = m.has_odds(),
        "{} vs {} | score {} | {}",
        m.home.as_deref().unwrap_or("?"),
        m.away.as_deref().unwrap_or("?"),
        m.score.as_deref().unwrap_or("?"),
        odds_summary(m),
    );
}
