//! Threshold classification over the currently revealed window

use super::observation::{Observation, ScoredObservation};
use super::stats::{self, WindowStats};

pub struct WindowClassifier;

impl WindowClassifier {
    /// Score every observation in `window` against the window's own statistics
    ///
    /// A point is anomalous iff `|z| > threshold`. Empty or constant windows
    /// score zero everywhere.
    pub fn classify(window: &[Observation], threshold: f64) -> Vec<ScoredObservation> {
        Self::classify_with_stats(window, threshold).0
    }

    /// Same as [`classify`](Self::classify), also returning the statistics used
    pub fn classify_with_stats(
        window: &[Observation],
        threshold: f64,
    ) -> (Vec<ScoredObservation>, Option<WindowStats>) {
        let values: Vec<f64> = window.iter().map(|o| o.value).collect();

        let window_stats = match stats::compute(&values) {
            Ok(s) => Some(s),
            Err(e) => {
                log::debug!("Window of {} points scored as flat: {}", window.len(), e);
                None
            }
        };

        let scored = window
            .iter()
            .map(|&observation| {
                let z_score = window_stats
                    .map(|s| stats::score(observation.value, s.mean, s.std_dev))
                    .unwrap_or(0.0);

                ScoredObservation {
                    observation,
                    z_score,
                    is_anomaly: z_score.abs() > threshold,
                }
            })
            .collect();

        (scored, window_stats)
    }
}
