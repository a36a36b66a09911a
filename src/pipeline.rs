use serde_json::Value;
use tracing::{error, info, warn};

use crate::config::SUMMARY_SCHEMA_VERSION;
use crate::filter::filter_in_play;
use crate::odds::{normalize_match_odds, MinuteWindow};
use crate::resolver::LookupTables;
use crate::snapshot::{parse_snapshot, ReadStats};
use crate::summary::{build_summary, contract_violations};
use crate::types::{MatchSummary, SummaryEnvelope, SummaryMetadata};

/// In-memory result of one cycle, before anything is written.
#[derive(Debug)]
pub struct PipelineOutput {
    /// Live-section order, then details-only matches.
    pub summaries: Vec<MatchSummary>,
    pub total_teams: usize,
    pub total_competitions: usize,
    pub total_countries: usize,
    pub read_stats: ReadStats,
}

impl PipelineOutput {
    pub fn in_play(&self) -> Vec<&MatchSummary> {
        filter_in_play(&self.summaries)
    }
}

/// Resolve, normalize, select, window and summarize every match in a
/// snapshot document. Per-match problems degrade that match's record and
/// never stop the run.
pub fn run_pipeline(doc: &Value, window: &MinuteWindow) -> PipelineOutput {
    let (snapshot, read_stats) = parse_snapshot(doc);
    if !read_stats.malformed_sections.is_empty() {
        warn!(
            "[PIPELINE] malformed sections treated as empty: {:?}",
            read_stats.malformed_sections
        );
    }

    let tables = LookupTables::build(&snapshot);

    let summaries: Vec<MatchSummary> = snapshot
        .matches
        .iter()
        .map(|raw| {
            let refs = tables.resolve(raw);
            let odds = normalize_match_odds(&raw.id, snapshot.match_odds.get(&raw.id));
            build_summary(raw, refs, odds, window)
        })
        .collect();

    info!(
        "[PIPELINE] {} summaries ({} live, {} details-only, {} skipped without id) | teams={} competitions={} countries={}",
        summaries.len(),
        read_stats.live_entries,
        read_stats.details_only,
        read_stats.skipped_no_id,
        tables.teams.len(),
        tables.competitions.len(),
        tables.countries.len(),
    );

    PipelineOutput {
        summaries,
        total_teams: tables.teams.len(),
        total_competitions: tables.competitions.len(),
        total_countries: tables.countries.len(),
        read_stats,
    }
}

/// Serialize the cycle output into the persisted envelope, checking each
/// record against the output contract. Violations are logged loudly and
/// counted; the record is still emitted.
pub fn build_envelope(output: &PipelineOutput, timestamp: String, processing_secs: f64) -> SummaryEnvelope {
    let mut violations = 0usize;
    let mut summaries = Vec::with_capacity(output.summaries.len());

    for summary in &output.summaries {
        match serde_json::to_value(summary) {
            Ok(v) => {
                let problems = contract_violations(&v);
                if !problems.is_empty() {
                    violations += 1;
                    error!(match_id = %summary.match_id, "[CONTRACT] summary violates output schema: {problems:?}");
                }
                summaries.push(v);
            }
            Err(e) => {
                violations += 1;
                error!(match_id = %summary.match_id, "[CONTRACT] summary failed to serialize: {e}");
            }
        }
    }

    SummaryEnvelope {
        timestamp,
        version: SUMMARY_SCHEMA_VERSION.to_string(),
        metadata: SummaryMetadata {
            source: env!("CARGO_PKG_NAME").to_string(),
            processing_time: format!("{processing_secs:.2} seconds"),
            total_matches: summaries.len(),
            total_teams: output.total_teams,
            total_competitions: output.total_competitions,
            total_countries: output.total_countries,
            in_play_matches: output.in_play().len(),
            contract_violations: violations,
        },
        summaries,
    }
}
