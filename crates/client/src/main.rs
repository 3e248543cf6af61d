//! Headless battle simulator.
//!
//! Loads a mission, lets the computer play both sides and logs the result.
//!
//! # Examples
//!
//! ```bash
//! # Bundled mission with a fixed seed
//! SQUADDIE_DICE_SEED=7 cargo run -p squaddie-client
//!
//! # Map snapshots and per-message traces, logged to a file
//! RUST_LOG=battle=trace SQUADDIE_LOG_DIR=/tmp/squaddie cargo run -p squaddie-client
//! ```

use anyhow::Result;
use squaddie_client::{SimulationConfig, run_simulation};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

fn main() -> Result<()> {
    // Load .env file if it exists (silently ignore if not found)
    let _ = dotenvy::dotenv();

    let _guard = setup_logging()?;

    let config = SimulationConfig::from_env();
    let report = run_simulation(&config)?;

    tracing::info!(
        mission = %report.mission_name,
        completion = ?report.completion,
        turns = report.turns,
        ticks = report.ticks,
        battle_actions = report.battle_actions,
        "simulation finished"
    );
    for (battle_squaddie_id, affiliation, hit_points) in &report.survivors {
        tracing::info!(%battle_squaddie_id, ?affiliation, hit_points, "survivor");
    }
    Ok(())
}

/// Logs to stderr, or to `$SQUADDIE_LOG_DIR/simulation.log` when set.
///
/// The returned guard flushes the file writer on drop.
fn setup_logging() -> Result<Option<tracing_appender::non_blocking::WorkerGuard>> {
    let env_filter = tracing_subscriber::EnvFilter::from_default_env()
        .add_directive(tracing::Level::INFO.into());

    let Some(log_dir) = std::env::var_os("SQUADDIE_LOG_DIR") else {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
        return Ok(None);
    };

    std::fs::create_dir_all(&log_dir)?;
    let file_appender = tracing_appender::rolling::never(&log_dir, "simulation.log");
    let (non_blocking_file, guard) = tracing_appender::non_blocking(file_appender);
    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(non_blocking_file)
                .with_ansi(false),
        )
        .init();

    tracing::info!("Log file: {}/simulation.log", std::path::Path::new(&log_dir).display());
    Ok(Some(guard))
}
