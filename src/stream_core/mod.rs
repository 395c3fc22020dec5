//! Stream Core - Incremental Anomaly Detection
//!
//! Replays a finite traffic series in chunks, re-scores the revealed window on
//! every tick and surfaces each anomalous session exactly once.
//!
//! # Architecture
//!
//! ```text
//! Series (immutable) → StreamController (reveal cursor, pause, config)
//!     ↓
//! stats::compute (mean, sample std over the whole window)
//!     ↓
//! WindowClassifier (|z| > threshold)
//!     ↓
//! AlertDeduplicator (new sequence ids only)
//!     ↓
//! TickOutput → sinks / dashboard
//! ```

pub mod classifier;
pub mod controller;
pub mod dedup;
pub mod error;
pub mod observation;
pub mod stats;

pub use classifier::WindowClassifier;
pub use controller::{StreamConfig, StreamController, StreamState, StreamStatus, TickOutput};
pub use dedup::AlertDeduplicator;
pub use error::StreamError;
pub use observation::{Observation, ScoredObservation, Series};
pub(crate) use observation::grid_timestamp;
pub use stats::{StatsError, WindowStats};
