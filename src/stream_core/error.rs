//! Error kinds surfaced by the stream controller

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum StreamError {
    /// Rejected threshold or chunk size; the previous value stays in effect
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// The series violates ordering or identity invariants
    #[error("Invalid series: {0}")]
    InvalidSeries(String),

    /// `tick()` called while the stream is paused
    #[error("Stream is paused")]
    Paused,
}
