//! Stream controller: reveal cursor, pause state and per-tick classification

use super::classifier::WindowClassifier;
use super::dedup::AlertDeduplicator;
use super::error::StreamError;
use super::observation::{ScoredObservation, Series};
use super::stats::WindowStats;
use std::collections::HashSet;

pub const DEFAULT_THRESHOLD: f64 = 3.0;
pub const DEFAULT_CHUNK_SIZE: usize = 50;

/// Runtime-tunable detection parameters
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StreamConfig {
    pub threshold: f64,
    pub chunk_size: usize,
}

impl Default for StreamConfig {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_THRESHOLD,
            chunk_size: DEFAULT_CHUNK_SIZE,
        }
    }
}

impl StreamConfig {
    pub fn validate(&self) -> Result<(), StreamError> {
        validate_threshold(self.threshold)?;
        validate_chunk_size(self.chunk_size)
    }
}

fn validate_threshold(threshold: f64) -> Result<(), StreamError> {
    if !threshold.is_finite() || threshold <= 0.0 {
        return Err(StreamError::InvalidConfiguration(format!(
            "threshold must be a positive finite number, got {}",
            threshold
        )));
    }
    Ok(())
}

fn validate_chunk_size(chunk_size: usize) -> Result<(), StreamError> {
    if chunk_size == 0 {
        return Err(StreamError::InvalidConfiguration(
            "chunk_size must be at least 1".to_string(),
        ));
    }
    Ok(())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StreamStatus {
    Running,
    Paused,
}

impl StreamStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            StreamStatus::Running => "RUNNING",
            StreamStatus::Paused => "PAUSED",
        }
    }
}

/// Mutable state of one stream, owned by exactly one controller
#[derive(Debug, Clone, PartialEq)]
pub struct StreamState {
    pub revealed_count: usize,
    pub paused: bool,
    pub seen_ids: HashSet<u64>,
    pub threshold: f64,
    pub chunk_size: usize,
}

impl StreamState {
    fn new(config: StreamConfig) -> Self {
        Self {
            revealed_count: 0,
            paused: false,
            seen_ids: HashSet::new(),
            threshold: config.threshold,
            chunk_size: config.chunk_size,
        }
    }
}

/// Result of one tick, handed to the presentation layer
#[derive(Debug, Clone, PartialEq)]
pub struct TickOutput {
    pub visible_window: Vec<ScoredObservation>,
    pub new_anomalies: Vec<ScoredObservation>,
    pub revealed_count: usize,
    pub total: usize,
    /// `None` when the window is empty or has no spread
    pub stats: Option<WindowStats>,
}

impl TickOutput {
    pub fn is_exhausted(&self) -> bool {
        self.revealed_count == self.total
    }
}

/// Drives the chunked replay of a series
///
/// Each `tick()` reveals the next chunk, re-scores the entire revealed prefix
/// and reports anomalies that have not been reported before in this run.
pub struct StreamController {
    series: Series,
    state: StreamState,
}

impl StreamController {
    pub fn new(series: Series, config: StreamConfig) -> Result<Self, StreamError> {
        config.validate()?;

        log::debug!(
            "Stream controller over {} points (threshold {}, chunk {})",
            series.len(),
            config.threshold,
            config.chunk_size
        );

        Ok(Self {
            series,
            state: StreamState::new(config),
        })
    }

    pub fn with_defaults(series: Series) -> Self {
        Self {
            series,
            state: StreamState::new(StreamConfig::default()),
        }
    }

    /// Reveal the next chunk and classify the whole revealed window
    ///
    /// Once the series is exhausted nothing new is revealed, but the window is
    /// still re-scored and filtered, so unchanged settings yield no new alerts.
    pub fn tick(&mut self) -> Result<TickOutput, StreamError> {
        if self.state.paused {
            return Err(StreamError::Paused);
        }

        let total = self.series.len();
        let previous = self.state.revealed_count;
        self.state.revealed_count = previous.saturating_add(self.state.chunk_size).min(total);

        let window = self.series.prefix(self.state.revealed_count);
        let (visible_window, stats) =
            WindowClassifier::classify_with_stats(window, self.state.threshold);

        let (new_anomalies, seen_ids) =
            AlertDeduplicator::filter_new(&visible_window, &self.state.seen_ids);
        self.state.seen_ids = seen_ids;

        log::debug!(
            "Tick: revealed {}→{} of {}, {} new anomalies",
            previous,
            self.state.revealed_count,
            total,
            new_anomalies.len()
        );

        Ok(TickOutput {
            visible_window,
            new_anomalies,
            revealed_count: self.state.revealed_count,
            total,
            stats,
        })
    }

    /// Classify the current window without advancing or recording alerts
    pub fn snapshot(&self) -> Vec<ScoredObservation> {
        WindowClassifier::classify(
            self.series.prefix(self.state.revealed_count),
            self.state.threshold,
        )
    }

    pub fn pause(&mut self) {
        if !self.state.paused {
            log::info!("⏸️  Stream paused at {}/{}", self.state.revealed_count, self.series.len());
        }
        self.state.paused = true;
    }

    pub fn resume(&mut self) {
        if self.state.paused {
            log::info!("▶️  Stream resumed at {}/{}", self.state.revealed_count, self.series.len());
        }
        self.state.paused = false;
    }

    /// Flip between running and paused, returning the new status
    pub fn toggle_pause(&mut self) -> StreamStatus {
        if self.state.paused {
            self.resume();
        } else {
            self.pause();
        }
        self.status()
    }

    pub fn set_threshold(&mut self, threshold: f64) -> Result<(), StreamError> {
        validate_threshold(threshold)?;
        log::info!("Threshold set to {:.2}", threshold);
        self.state.threshold = threshold;
        Ok(())
    }

    pub fn set_chunk_size(&mut self, chunk_size: usize) -> Result<(), StreamError> {
        validate_chunk_size(chunk_size)?;
        log::info!("Chunk size set to {}", chunk_size);
        self.state.chunk_size = chunk_size;
        Ok(())
    }

    /// Start a new run over the same series, keeping threshold and chunk size
    pub fn reset(&mut self) {
        log::info!("🔄 Stream reset ({} alerts cleared)", self.state.seen_ids.len());
        self.state.revealed_count = 0;
        self.state.paused = false;
        self.state.seen_ids.clear();
    }

    pub fn status(&self) -> StreamStatus {
        if self.state.paused {
            StreamStatus::Paused
        } else {
            StreamStatus::Running
        }
    }

    pub fn state(&self) -> &StreamState {
        &self.state
    }

    pub fn series(&self) -> &Series {
        &self.series
    }

    pub fn is_paused(&self) -> bool {
        self.state.paused
    }

    pub fn is_exhausted(&self) -> bool {
        self.state.revealed_count == self.series.len()
    }

    pub fn revealed_count(&self) -> usize {
        self.state.revealed_count
    }

    pub fn threshold(&self) -> f64 {
        self.state.threshold
    }

    pub fn chunk_size(&self) -> usize {
        self.state.chunk_size
    }

    pub fn alerts_reported(&self) -> usize {
        self.state.seen_ids.len()
    }
}
