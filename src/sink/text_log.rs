//! Plain-text alert log, one `[ALERT]` line per anomaly

use super::backend::{AlertSinkBackend, SinkError};
use crate::stream_core::ScoredObservation;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::Path;

pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

pub fn format_timestamp(timestamp: DateTime<Utc>) -> String {
    timestamp.format(TIMESTAMP_FORMAT).to_string()
}

/// `[ALERT] <timestamp> - High value: <value>` with the value to 2 decimals
pub fn format_alert_line(alert: &ScoredObservation) -> String {
    format!(
        "[ALERT] {} - High value: {:.2}",
        format_timestamp(alert.timestamp()),
        alert.value()
    )
}

pub struct AlertLogWriter {
    file: BufWriter<File>,
    lines: usize,
}

impl AlertLogWriter {
    /// Create (truncating) the alert log
    pub fn new(path: impl AsRef<Path>) -> Result<Self, SinkError> {
        let path = path.as_ref();

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let file = OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(true)
            .open(path)?;

        log::info!("📝 Writing alerts to: {}", path.display());

        Ok(Self {
            file: BufWriter::new(file),
            lines: 0,
        })
    }

    pub fn lines_written(&self) -> usize {
        self.lines
    }
}

impl Drop for AlertLogWriter {
    fn drop(&mut self) {
        let _ = self.file.flush();
    }
}

#[async_trait]
impl AlertSinkBackend for AlertLogWriter {
    async fn write_alerts(&mut self, alerts: &[ScoredObservation]) -> Result<(), SinkError> {
        for alert in alerts {
            writeln!(self.file, "{}", format_alert_line(alert))?;
            self.lines += 1;
        }
        self.file.flush()?;
        Ok(())
    }

    async fn flush(&mut self) -> Result<(), SinkError> {
        self.file.flush()?;
        Ok(())
    }

    fn backend_type(&self) -> &'static str {
        "TEXT"
    }
}
