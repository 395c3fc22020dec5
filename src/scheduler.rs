//! Headless tick scheduler
//!
//! Drives a stream controller on a fixed cadence and routes each tick's new
//! anomalies to the alert sinks. Stopping once the series is exhausted is a
//! scheduling decision made here; the controller itself stays tickable.

use crate::sink::{format_alert_line, AlertWriter, SinkError};
use crate::stream_core::{StreamController, StreamError};
use std::time::Duration;
use tokio::time::{interval, MissedTickBehavior};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    pub ticks: usize,
    pub alerts: usize,
    pub revealed: usize,
}

/// Tick until the series is exhausted, writing alerts as they surface
///
/// Nothing resumes a paused controller here, so a pause ends the run early
/// with whatever has been written so far.
pub async fn run_headless(
    controller: &mut StreamController,
    writer: &mut AlertWriter,
    refresh_interval: Duration,
) -> Result<RunSummary, SinkError> {
    log::info!(
        "⏰ Starting headless stream ({} points, interval: {}ms)",
        controller.series().len(),
        refresh_interval.as_millis()
    );

    let mut timer = interval(refresh_interval);
    timer.set_missed_tick_behavior(MissedTickBehavior::Delay);

    let mut summary = RunSummary {
        ticks: 0,
        alerts: 0,
        revealed: controller.revealed_count(),
    };

    loop {
        timer.tick().await;

        let output = match controller.tick() {
            Ok(output) => output,
            Err(StreamError::Paused) => {
                log::warn!(
                    "⏸️  Stream paused at {}/{}, stopping headless run",
                    controller.revealed_count(),
                    controller.series().len()
                );
                break;
            }
            Err(e) => {
                log::error!("❌ Tick failed: {}", e);
                continue;
            }
        };

        summary.ticks += 1;
        summary.revealed = output.revealed_count;

        for alert in &output.new_anomalies {
            log::warn!("🚨 {} (z={:.2})", format_alert_line(alert), alert.z_score);
        }

        if !output.new_anomalies.is_empty() {
            summary.alerts += output.new_anomalies.len();
            writer.write_alerts(&output.new_anomalies).await?;
        }

        log::debug!(
            "Tick {}: {}/{} revealed, {} alerts so far",
            summary.ticks,
            output.revealed_count,
            output.total,
            summary.alerts
        );

        if output.is_exhausted() {
            break;
        }
    }

    writer.flush().await?;

    log::info!(
        "✅ Headless run finished after {} ticks ({} alerts, {}/{} revealed)",
        summary.ticks,
        summary.alerts,
        summary.revealed,
        controller.series().len()
    );

    Ok(summary)
}
