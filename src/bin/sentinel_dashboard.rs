//! Sentinel Dashboard - streaming anomaly feed
//!
//! Replays a generated traffic series chunk by chunk, flags anomalous
//! sessions and writes each alert once to the configured logs.
//!
//! ## Usage
//!
//! ```bash
//! cargo run --release --bin sentinel_dashboard              # terminal UI
//! cargo run --release --bin sentinel_dashboard -- --headless
//! ```
//!
//! See `SentinelConfig::from_env` for the environment variables.

use anomaly_sentinel::{
    config::parse_mode_from_args,
    scheduler,
    sink::AlertWriter,
    ui::{self, App},
    RunMode, SentinelConfig, StreamController, TrafficGenerator,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv::dotenv().ok();

    let mode = parse_mode_from_args(std::env::args());

    // The dashboard owns the terminal, so keep stderr quiet unless asked
    let default_level = match mode {
        RunMode::Dashboard => "warn",
        RunMode::Headless => "info",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .target(env_logger::Target::Stderr)
        .init();

    let config = SentinelConfig::from_env()?;

    log::info!("🚀 Starting Anomaly Sentinel");
    log::info!("   Mode: {:?}", mode);
    log::info!("   Threshold: {}", config.threshold);
    log::info!("   Chunk size: {}", config.chunk_size);
    log::info!("   Refresh: {}ms", config.refresh_interval.as_millis());
    log::info!("   Output: {}", config.output_dir.display());

    let series = TrafficGenerator::new(config.generator_config()).generate()?;
    let mut controller = StreamController::new(series, config.stream_config())?;
    let mut writer = AlertWriter::from_config(&config)?;

    log::info!("📊 Sinks: {}", writer.backend_types().join(", "));

    match mode {
        RunMode::Headless => {
            let summary =
                scheduler::run_headless(&mut controller, &mut writer, config.refresh_interval)
                    .await?;
            log::info!(
                "✅ Done: {} ticks, {} alerts, {} sessions revealed",
                summary.ticks,
                summary.alerts,
                summary.revealed
            );
        }
        RunMode::Dashboard => {
            let app = App::new(controller, config.refresh_interval);
            if let Err(e) = ui::run_ui(app, &config, writer).await {
                log::error!("UI error: {}", e);
                return Err(e);
            }
        }
    }

    Ok(())
}
