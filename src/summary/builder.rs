use tracing::debug;

use crate::config::PREFERRED_PROVIDERS;
use crate::odds::{select_provider, MinuteWindow};
use crate::resolver::ResolvedRefs;
use crate::summary::environment::enrich_environment;
use crate::types::{MatchSummary, ProviderOdds, RawMatch, SelectedMarkets};

/// Assemble one summary from a raw match, its resolved references and its
/// normalized odds.
///
/// Provider selection looks at the unwindowed series; only the selected
/// provider's series are windowed into the flat market fields. The nested
/// `odds` map keeps every provider's canonical series as observed.
pub fn build_summary(
    raw: &RawMatch,
    refs: ResolvedRefs<'_>,
    odds: ProviderOdds,
    window: &MinuteWindow,
) -> MatchSummary {
    let (markets, odds_company_id, odds_company_name) =
        match select_provider(&odds, PREFERRED_PROVIDERS) {
            Some(sel) => (
                SelectedMarkets(window.apply_all(sel.odds)),
                Some(sel.provider_id.to_string()),
                sel.provider_name.map(str::to_string),
            ),
            None => {
                if !odds.is_empty() {
                    debug!(
                        match_id = %raw.id,
                        providers = ?odds.keys().collect::<Vec<_>>(),
                        "[SUMMARY] no preferred provider has data"
                    );
                }
                (SelectedMarkets::default(), None, None)
            }
        };

    if raw.home_team_id.is_some() && refs.home.is_none() {
        debug!(match_id = %raw.id, team_id = ?raw.home_team_id, "[SUMMARY] home team not in lookup");
    }
    if raw.away_team_id.is_some() && refs.away.is_none() {
        debug!(match_id = %raw.id, team_id = ?raw.away_team_id, "[SUMMARY] away team not in lookup");
    }

    MatchSummary {
        markets,
        odds_company_id,
        odds_company_name,
        odds,
        match_id: raw.id.clone(),
        status: raw.status_id,
        status_id: raw.status_id,
        home: refs.home.and_then(|t| t.name.clone()),
        away: refs.away.and_then(|t| t.name.clone()),
        home_id: raw.home_team_id.clone(),
        away_id: raw.away_team_id.clone(),
        home_position: raw.home_position.clone(),
        away_position: raw.away_position.clone(),
        score: raw.score.clone(),
        match_time: raw.match_time,
        kickoff: raw.kickoff.clone(),
        venue: raw.venue.clone(),
        competition: refs.competition.and_then(|c| c.name.clone()),
        competition_id: refs.competition_id.map(str::to_string),
        country: refs.country.and_then(|c| c.name.clone()),
        environment: enrich_environment(raw.environment.as_ref()),
        events: raw.events.clone(),
    }
}
