use std::time::{Duration, Instant};

use chrono::Utc;
use chrono_tz::America::New_York;
use tokio::time::interval;
use tracing::{error, info};

use crate::artifact::{read_snapshot_file, write_json_atomic, write_text_atomic};
use crate::config::Config;
use crate::error::Result;
use crate::filter::{log_in_play, render_report};
use crate::odds::MinuteWindow;
use crate::pipeline::{build_envelope, run_pipeline};

/// Counts reported after a successful cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CycleStats {
    pub total_matches: usize,
    pub in_play: usize,
    pub contract_violations: usize,
}

/// Drives the read → pipeline → write cycle on a fixed interval. Each cycle
/// re-reads the full snapshot and replaces both artifacts wholesale.
pub struct CycleRunner {
    cfg: Config,
    window: MinuteWindow,
}

impl CycleRunner {
    pub fn new(cfg: Config) -> Self {
        Self {
            cfg,
            window: MinuteWindow::default(),
        }
    }

    pub async fn run(self) {
        // first tick fires immediately, so a cycle runs at startup
        let mut ticker = interval(Duration::from_secs(self.cfg.cycle_interval_secs));

        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    if let Err(e) = self.run_cycle().await {
                        error!("[CYCLE] failed, previous artifacts kept: {e}");
                    }
                }
                _ = tokio::signal::ctrl_c() => {
                    info!("[CYCLE] shutdown signal received, stopping");
                    break;
                }
            }
        }
    }

    pub async fn run_cycle(&self) -> Result<CycleStats> {
        let started = Instant::now();
        let doc = read_snapshot_file(&self.cfg.snapshot_path).await?;

        let output = run_pipeline(&doc, &self.window);
        let envelope = build_envelope(&output, eastern_now(), started.elapsed().as_secs_f64());
        write_json_atomic(&self.cfg.summary_path, &envelope)?;

        let in_play = output.in_play();
        for m in &in_play {
            log_in_play(m);
        }
        write_text_atomic(&self.cfg.report_path, &render_report(&in_play, &eastern_now()))?;

        let stats = CycleStats {
            total_matches: envelope.metadata.total_matches,
            in_play: in_play.len(),
            contract_violations: envelope.metadata.contract_violations,
        };
        info!(
            "[CYCLE] complete in {:.2}s: {} summaries -> {}, {} in-play -> {}",
            started.elapsed().as_secs_f64(),
            stats.total_matches,
            self.cfg.summary_path,
            stats.in_play,
            self.cfg.report_path,
        );
        Ok(stats)
    }
}

fn eastern_now() -> String {
    Utc::now()
        .with_timezone(&New_York)
        .format("%m/%d/%Y %I:%M:%S %p %Z")
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;

    fn config(dir: &TempDir) -> Config {
        let path = |name: &str| dir.path().join(name).to_string_lossy().into_owned();
        Config {
            snapshot_path: path("step1.json"),
            summary_path: path("step2.json"),
            report_path: path("report.log"),
            log_level: "info".to_string(),
            cycle_interval_secs: 60,
            run_once: true,
        }
    }

    #[tokio::test]
    async fn cycle_writes_both_artifacts() {
        let dir = TempDir::new().unwrap();
        let cfg = config(&dir);
        let snapshot = json!({
            "live_matches": {"results": [
                {"id": "m1", "status_id": 2, "score": "0-0"},
                {"id": "m2", "status_id": 9, "score": "1-1"}
            ]},
            "match_odds": {"m1": {"results": {"2": {"eu": [[2000, "4", 1.9, 3.3, 4.0, 0, 0, "0-0"]]}}}}
        });
        std::fs::write(&cfg.snapshot_path, snapshot.to_string()).unwrap();

        let stats = CycleRunner::new(cfg.clone()).run_cycle().await.unwrap();
        assert_eq!(stats, CycleStats { total_matches: 2, in_play: 1, contract_violations: 0 });

        let written: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&cfg.summary_path).unwrap()).unwrap();
        assert_eq!(written["summaries"].as_array().unwrap().len(), 2);
        assert_eq!(written["metadata"]["in_play_matches"], json!(1));

        let report = std::fs::read_to_string(&cfg.report_path).unwrap();
        assert!(report.contains("m1 |"));
        assert!(!report.contains("m2 |"));
    }

    #[tokio::test]
    async fn failed_read_keeps_previous_artifact() {
        let dir = TempDir::new().unwrap();
        let cfg = config(&dir);
        std::fs::write(&cfg.summary_path, "previous").unwrap();
        std::fs::write(&cfg.snapshot_path, "{ truncated").unwrap();

        assert!(CycleRunner::new(cfg.clone()).run_cycle().await.is_err());
        assert_eq!(std::fs::read_to_string(&cfg.summary_path).unwrap(), "previous");
    }

    #[test]
    fn eastern_timestamp_shape() {
        let ts = eastern_now();
        // e.g. "10/16/2026 09:00:00 AM EDT"
        assert_eq!(ts.split(' ').count(), 4, "{ts}");
        assert!(ts.ends_with("EDT") || ts.ends_with("EST"), "{ts}");
    }
}
