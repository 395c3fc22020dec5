//! JSONL alert stream - one JSON object per alert

use super::backend::{AlertSinkBackend, SinkError};
use crate::stream_core::ScoredObservation;
use async_trait::async_trait;
use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::Path;

pub struct AlertJsonlWriter {
    file: BufWriter<File>,
}

impl AlertJsonlWriter {
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

        log::info!("📝 Writing JSONL alerts to: {}", path.display());

        Ok(Self {
            file: BufWriter::new(file),
        })
    }
}

impl Drop for AlertJsonlWriter {
    fn drop(&mut self) {
        let _ = self.file.flush();
    }
}

#[async_trait]
impl AlertSinkBackend for AlertJsonlWriter {
    async fn write_alerts(&mut self, alerts: &[ScoredObservation]) -> Result<(), SinkError> {
        for alert in alerts {
            let json = serde_json::to_string(alert)?;
            writeln!(self.file, "{}", json)?;
        }
        self.file.flush()?;
        Ok(())
    }

    async fn flush(&mut self) -> Result<(), SinkError> {
        self.file.flush()?;
        Ok(())
    }

    fn backend_type(&self) -> &'static str {
        "JSONL"
    }
}
