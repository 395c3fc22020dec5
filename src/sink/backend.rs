//! Backend trait for alert sinks

use crate::stream_core::ScoredObservation;
use async_trait::async_trait;

#[derive(Debug, thiserror::Error)]
pub enum SinkError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Destination for newly detected anomalies
#[async_trait]
pub trait AlertSinkBackend: Send {
    /// Append a batch of alerts (already deduplicated, ascending sequence id)
    async fn write_alerts(&mut self, alerts: &[ScoredObservation]) -> Result<(), SinkError>;

    /// Flush pending writes to storage
    async fn flush(&mut self) -> Result<(), SinkError>;

    /// Get backend type for logging
    fn backend_type(&self) -> &'static str;
}
