//! Tabular anomaly log (timestamp, value, z_score)

use super::backend::{AlertSinkBackend, SinkError};
use super::text_log::format_timestamp;
use crate::stream_core::ScoredObservation;
use async_trait::async_trait;
use serde::Serialize;
use std::fs::File;
use std::path::Path;

#[derive(Debug, Serialize)]
struct AnomalyRecord {
    timestamp: String,
    value: f64,
    z_score: f64,
}

pub struct AnomalyCsvWriter {
    writer: csv::Writer<File>,
    rows: usize,
}

impl AnomalyCsvWriter {
    /// Create (truncating) the CSV log and write its header
    pub fn new(path: impl AsRef<Path>) -> Result<Self, SinkError> {
        let path = path.as_ref();

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_path(path)?;
        writer.write_record(["timestamp", "value", "z_score"])?;
        writer.flush()?;

        log::info!("📝 Writing anomaly log to: {}", path.display());

        Ok(Self { writer, rows: 0 })
    }

    pub fn write_alert(&mut self, alert: &ScoredObservation) -> Result<(), SinkError> {
        self.writer.serialize(AnomalyRecord {
            timestamp: format_timestamp(alert.timestamp()),
            value: alert.value(),
            z_score: alert.z_score,
        })?;
        self.rows += 1;
        Ok(())
    }

    pub fn rows_written(&self) -> usize {
        self.rows
    }
}

#[async_trait]
impl AlertSinkBackend for AnomalyCsvWriter {
    async fn write_alerts(&mut self, alerts: &[ScoredObservation]) -> Result<(), SinkError> {
        for alert in alerts {
            self.write_alert(alert)?;
        }
        self.writer.flush()?;
        Ok(())
    }

    async fn flush(&mut self) -> Result<(), SinkError> {
        self.writer.flush()?;
        Ok(())
    }

    fn backend_type(&self) -> &'static str {
        "CSV"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stream_core::Observation;
    use chrono::{TimeZone, Utc};

    fn alert(sequence_id: u64, value: f64, z_score: f64) -> ScoredObservation {
        ScoredObservation {
            observation: Observation {
                sequence_id,
                timestamp: Utc.with_ymd_and_hms(2024, 3, 9, 8, 15, 30).unwrap(),
                value,
            },
            z_score,
            is_anomaly: true,
        }
    }

    #[tokio::test]
    async fn test_writes_header_and_rows() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("anomaly_log.csv");

        let mut writer = AnomalyCsvWriter::new(&path).unwrap();
        writer
            .write_alerts(&[alert(1, 1250.5, 4.25), alert(2, 1190.0, 3.5)])
            .await
            .unwrap();
        assert_eq!(writer.rows_written(), 2);
        drop(writer);

        let contents = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = contents.lines().collect();
        assert_eq!(lines[0], "timestamp,value,z_score");
        assert_eq!(lines[1], "2024-03-09 08:15:30,1250.5,4.25");
        assert_eq!(lines[2], "2024-03-09 08:15:30,1190.0,3.5");
        assert_eq!(lines.len(), 3);
    }

    #[tokio::test]
    async fn test_truncates_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("anomaly_log.csv");
        std::fs::write(&path, "stale\nstale\n").unwrap();

        let writer = AnomalyCsvWriter::new(&path).unwrap();
        drop(writer);

        let contents = std::fs::read_to_string(&path).unwrap();
        assert_eq!(contents, "timestamp,value,z_score\n");
    }
}
