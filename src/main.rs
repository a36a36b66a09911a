mod artifact;
mod config;
mod cycle;
mod error;
mod filter;
mod odds;
mod pipeline;
mod resolver;
mod snapshot;
mod summary;
mod types;

use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use crate::config::Config;
use crate::cycle::CycleRunner;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let cfg = match Config::from_env() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Config error: {e}");
            std::process::exit(1);
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(&cfg.log_level))
        .init();

    info!(
        "Pipeline starting: snapshot={} summary={} report={} interval={}s run_once={}",
        cfg.snapshot_path, cfg.summary_path, cfg.report_path, cfg.cycle_interval_secs, cfg.run_once,
    );

    let runner = CycleRunner::new(cfg.clone());
    if cfg.run_once {
        if let Err(e) = runner.run_cycle().await {
            error!("Fatal error: {e}");
            std::process::exit(1);
        }
        return;
    }

    runner.run().await;
}
