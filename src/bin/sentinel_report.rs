//! Sentinel Report - one-shot analysis over the full series
//!
//! Scores every session against the statistics of the whole series, prints
//! the anomalies and writes `anomaly_log.csv` and `anomaly_log.txt`.
//!
//! ## Usage
//!
//! ```bash
//! cargo run --release --bin sentinel_report
//! ```

use anomaly_sentinel::{
    sink::{format_alert_line, format_timestamp, AlertWriter},
    stream_core::{stats, WindowClassifier},
    ScoredObservation, SentinelConfig, TrafficGenerator,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Stderr)
        .init();

    dotenv::dotenv().ok();

    let config = SentinelConfig::from_env()?;
    let series = TrafficGenerator::new(config.generator_config()).generate()?;

    let values: Vec<f64> = series.iter().map(|o| o.value).collect();
    match stats::compute(&values) {
        Ok(s) => println!(
            "Sessions: {}  mean: {:.2}  std: {:.2}  threshold: {}",
            s.count, s.mean, s.std_dev, config.threshold
        ),
        Err(e) => println!("Sessions: {}  ({})", series.len(), e),
    }

    let anomalies: Vec<ScoredObservation> =
        WindowClassifier::classify(series.as_slice(), config.threshold)
            .into_iter()
            .filter(|o| o.is_anomaly)
            .collect();

    println!("\nAnomalies detected: {}", anomalies.len());
    println!("{:>6}  {:<19}  {:>10}  {:>8}", "id", "timestamp", "value", "z_score");
    for a in &anomalies {
        println!(
            "{:>6}  {:<19}  {:>10.2}  {:>8.3}",
            a.sequence_id(),
            format_timestamp(a.timestamp()),
            a.value(),
            a.z_score
        );
    }

    let mut writer = AlertWriter::from_config(&config)?;
    writer.write_alerts(&anomalies).await?;
    writer.flush().await?;

    if let Some(first) = anomalies.first() {
        log::debug!("First alert: {}", format_alert_line(first));
    }

    println!("\nAnomalies have been saved to '{}'", config.csv_log_path().display());
    println!("Alerts written to '{}'", config.text_log_path().display());

    Ok(())
}
