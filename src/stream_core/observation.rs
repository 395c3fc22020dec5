//! Observation records and the immutable series they live in

use super::error::StreamError;
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// A single traffic session: bytes sent at a point in time
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    pub sequence_id: u64,
    pub timestamp: DateTime<Utc>,
    pub value: f64,
}

/// An observation scored against the window it was revealed in
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoredObservation {
    #[serde(flatten)]
    pub observation: Observation,
    pub z_score: f64,
    pub is_anomaly: bool,
}

impl ScoredObservation {
    pub fn sequence_id(&self) -> u64 {
        self.observation.sequence_id
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        self.observation.timestamp
    }

    pub fn value(&self) -> f64 {
        self.observation.value
    }
}

/// Ordered, immutable sequence of observations
///
/// Timestamps are non-decreasing and sequence ids strictly increasing, so
/// `sequence_id` can serve as the stable identity for alert deduplication.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Series {
    observations: Vec<Observation>,
}

impl Series {
    /// Build a series, rejecting out-of-order or duplicate observations
    pub fn new(observations: Vec<Observation>) -> Result<Self, StreamError> {
        for (index, obs) in observations.iter().enumerate() {
            if !obs.value.is_finite() {
                return Err(StreamError::InvalidSeries(format!(
                    "observation {} has non-finite value {}",
                    obs.sequence_id, obs.value
                )));
            }

            if index == 0 {
                continue;
            }

            let prev = &observations[index - 1];
            if obs.timestamp < prev.timestamp {
                return Err(StreamError::InvalidSeries(format!(
                    "timestamp at index {} precedes index {}",
                    index,
                    index - 1
                )));
            }
            if obs.sequence_id <= prev.sequence_id {
                return Err(StreamError::InvalidSeries(format!(
                    "sequence_id {} at index {} is not greater than {}",
                    obs.sequence_id, index, prev.sequence_id
                )));
            }
        }

        Ok(Self { observations })
    }

    /// Build a series from literal values, one every `interval` from `start`
    ///
    /// Sequence ids are assigned `0..values.len()`.
    pub fn from_values(
        start: DateTime<Utc>,
        interval: Duration,
        values: &[f64],
    ) -> Result<Self, StreamError> {
        let observations = values
            .iter()
            .enumerate()
            .map(|(i, &value)| {
                Ok(Observation {
                    sequence_id: i as u64,
                    timestamp: grid_timestamp(start, interval, i)?,
                    value,
                })
            })
            .collect::<Result<Vec<_>, StreamError>>()?;

        Self::new(observations)
    }

    pub fn len(&self) -> usize {
        self.observations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.observations.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Observation> {
        self.observations.get(index)
    }

    /// The first `count` observations (clamped to the series length)
    pub fn prefix(&self, count: usize) -> &[Observation] {
        &self.observations[..count.min(self.observations.len())]
    }

    pub fn as_slice(&self) -> &[Observation] {
        &self.observations
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Observation> {
        self.observations.iter()
    }
}

/// Timestamp of the `index`-th slot on a grid starting at `start`
pub(crate) fn grid_timestamp(
    start: DateTime<Utc>,
    interval: Duration,
    index: usize,
) -> Result<DateTime<Utc>, StreamError> {
    let out_of_range = || {
        StreamError::InvalidSeries(format!(
            "timestamp for index {} (interval {}) is out of range",
            index, interval
        ))
    };

    let steps = i32::try_from(index).map_err(|_| out_of_range())?;
    let offset = interval.checked_mul(steps).ok_or_else(out_of_range)?;
    start.checked_add_signed(offset).ok_or_else(out_of_range)
}
