//! Fan-out writer routing alerts to every configured backend

use super::backend::{AlertSinkBackend, SinkError};
use super::csv_log::AnomalyCsvWriter;
use super::jsonl_log::AlertJsonlWriter;
use super::text_log::AlertLogWriter;
use crate::config::SentinelConfig;
use crate::stream_core::ScoredObservation;

#[derive(Default)]
pub struct AlertWriter {
    backends: Vec<Box<dyn AlertSinkBackend>>,
    alerts_written: usize,
}

impl AlertWriter {
    pub fn new() -> Self {
        Self::default()
    }

    /// CSV and text logs, plus JSONL when enabled, under the configured output dir
    pub fn from_config(config: &SentinelConfig) -> Result<Self, SinkError> {
        let mut writer = Self::new()
            .with_backend(AnomalyCsvWriter::new(config.csv_log_path())?)
            .with_backend(AlertLogWriter::new(config.text_log_path())?);

        if config.enable_jsonl {
            writer = writer.with_backend(AlertJsonlWriter::new(config.jsonl_path())?);
        }

        Ok(writer)
    }

    pub fn with_backend(mut self, backend: impl AlertSinkBackend + 'static) -> Self {
        self.backends.push(Box::new(backend));
        self
    }

    /// Write a batch to every backend
    ///
    /// All backends are attempted; the first error is returned afterwards.
    pub async fn write_alerts(&mut self, alerts: &[ScoredObservation]) -> Result<(), SinkError> {
        if alerts.is_empty() {
            return Ok(());
        }

        let mut first_error = None;
        for backend in self.backends.iter_mut() {
            if let Err(e) = backend.write_alerts(alerts).await {
                log::error!("❌ {} sink failed: {}", backend.backend_type(), e);
                first_error.get_or_insert(e);
            }
        }

        self.alerts_written += alerts.len();

        match first_error {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }

    pub async fn flush(&mut self) -> Result<(), SinkError> {
        let mut first_error = None;
        for backend in self.backends.iter_mut() {
            if let Err(e) = backend.flush().await {
                log::error!("❌ {} sink flush failed: {}", backend.backend_type(), e);
                first_error.get_or_insert(e);
            }
        }

        match first_error {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }

    /// Get backend types for logging
    pub fn backend_types(&self) -> Vec<&'static str> {
        self.backends.iter().map(|b| b.backend_type()).collect()
    }

    pub fn alerts_written(&self) -> usize {
        self.alerts_written
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stream_core::Observation;
    use async_trait::async_trait;
    use chrono::{TimeZone, Utc};
    use std::sync::{Arc, Mutex};

    struct RecordingSink {
        seen: Arc<Mutex<Vec<u64>>>,
    }

    #[async_trait]
    impl AlertSinkBackend for RecordingSink {
        async fn write_alerts(&mut self, alerts: &[ScoredObservation]) -> Result<(), SinkError> {
            self.seen.lock().unwrap().extend(alerts.iter().map(|a| a.sequence_id()));
            Ok(())
        }

        async fn flush(&mut self) -> Result<(), SinkError> {
            Ok(())
        }

        fn backend_type(&self) -> &'static str {
            "RECORDING"
        }
    }

    struct FailingSink;

    #[async_trait]
    impl AlertSinkBackend for FailingSink {
        async fn write_alerts(&mut self, _alerts: &[ScoredObservation]) -> Result<(), SinkError> {
            Err(SinkError::Io(std::io::Error::new(std::io::ErrorKind::Other, "disk full")))
        }

        async fn flush(&mut self) -> Result<(), SinkError> {
            Ok(())
        }

        fn backend_type(&self) -> &'static str {
            "FAILING"
        }
    }

    fn alert(sequence_id: u64) -> ScoredObservation {
        ScoredObservation {
            observation: Observation {
                sequence_id,
                timestamp: Utc.timestamp_opt(1_700_000_000, 0).unwrap(),
                value: 1200.0,
            },
            z_score: 4.0,
            is_anomaly: true,
        }
    }

    #[tokio::test]
    async fn test_fans_out_to_all_backends() {
        let first = Arc::new(Mutex::new(Vec::new()));
        let second = Arc::new(Mutex::new(Vec::new()));

        let mut writer = AlertWriter::new()
            .with_backend(RecordingSink { seen: first.clone() })
            .with_backend(RecordingSink { seen: second.clone() });

        writer.write_alerts(&[alert(1), alert(2)]).await.unwrap();

        assert_eq!(*first.lock().unwrap(), vec![1, 2]);
        assert_eq!(*second.lock().unwrap(), vec![1, 2]);
        assert_eq!(writer.alerts_written(), 2);
        assert_eq!(writer.backend_types(), vec!["RECORDING", "RECORDING"]);
    }

    #[tokio::test]
    async fn test_failure_does_not_skip_other_backends() {
        let seen = Arc::new(Mutex::new(Vec::new()));

        let mut writer = AlertWriter::new()
            .with_backend(FailingSink)
            .with_backend(RecordingSink { seen: seen.clone() });

        let result = writer.write_alerts(&[alert(9)]).await;

        assert!(matches!(result, Err(SinkError::Io(_))));
        assert_eq!(*seen.lock().unwrap(), vec![9]);
    }

    #[tokio::test]
    async fn test_from_config_creates_log_files() {
        let dir = tempfile::tempdir().unwrap();
        let config = SentinelConfig {
            output_dir: dir.path().to_path_buf(),
            enable_jsonl: true,
            ..SentinelConfig::default()
        };

        let mut writer = AlertWriter::from_config(&config).unwrap();
        assert_eq!(writer.backend_types(), vec!["CSV", "TEXT", "JSONL"]);

        writer.write_alerts(&[alert(4)]).await.unwrap();
        writer.flush().await.unwrap();

        let text = std::fs::read_to_string(config.text_log_path()).unwrap();
        assert_eq!(text.lines().count(), 1);
        let csv = std::fs::read_to_string(config.csv_log_path()).unwrap();
        assert_eq!(csv.lines().count(), 2);
        assert!(config.jsonl_path().exists());
    }
}
