//! Window statistics: mean, sample standard deviation and z-scores

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum StatsError {
    #[error("Cannot compute statistics over an empty window")]
    EmptyWindow,

    /// Zero or undefined spread (constant values, or a single sample)
    #[error("Window has no spread")]
    DegenerateWindow,

    /// Spread too wide to represent as an f64
    #[error("Window statistics overflow")]
    Overflow,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct WindowStats {
    pub count: usize,
    pub mean: f64,
    pub std_dev: f64,
}

/// Compute mean and sample standard deviation (n - 1 denominator)
///
/// Recomputed from scratch on every call; a constant window is reported as
/// `DegenerateWindow` rather than a zero deviation.
pub fn compute(values: &[f64]) -> Result<WindowStats, StatsError> {
    if values.is_empty() {
        return Err(StatsError::EmptyWindow);
    }
    // Checked directly: the mean of identical values can carry rounding error
    if values.len() < 2 || values.iter().all(|&v| v == values[0]) {
        return Err(StatsError::DegenerateWindow);
    }

    // Work in units of the largest magnitude so sums of large values stay finite
    let scale = values.iter().fold(0.0f64, |m, v| m.max(v.abs()));
    let n = values.len() as f64;
    let scaled_mean = values.iter().map(|v| v / scale).sum::<f64>() / n;
    let scaled_variance = values
        .iter()
        .map(|v| (v / scale - scaled_mean).powi(2))
        .sum::<f64>()
        / (n - 1.0);

    let mean = scaled_mean * scale;
    let std_dev = scaled_variance.sqrt() * scale;

    if std_dev == 0.0 {
        return Err(StatsError::DegenerateWindow);
    }
    if !std_dev.is_finite() || !mean.is_finite() {
        return Err(StatsError::Overflow);
    }

    Ok(WindowStats {
        count: values.len(),
        mean,
        std_dev,
    })
}

/// Standardized score of `value`; zero when there is no spread
pub fn score(value: f64, mean: f64, std_dev: f64) -> f64 {
    if std_dev == 0.0 || !std_dev.is_finite() {
        return 0.0;
    }
    (value - mean) / std_dev
}
