//! Exactly-once alert filtering keyed by `sequence_id`

use super::observation::ScoredObservation;
use std::collections::HashSet;

pub struct AlertDeduplicator;

impl AlertDeduplicator {
    /// Split out anomalies whose ids have not been reported yet
    ///
    /// Returns the new anomalies in ascending `sequence_id` order together with
    /// the seen set the caller must adopt. `seen` itself is left untouched and
    /// ids are only ever added.
    pub fn filter_new(
        scored: &[ScoredObservation],
        seen: &HashSet<u64>,
    ) -> (Vec<ScoredObservation>, HashSet<u64>) {
        let mut updated = seen.clone();

        let mut new_anomalies: Vec<ScoredObservation> = scored
            .iter()
            .filter(|o| o.is_anomaly)
            .filter(|o| updated.insert(o.sequence_id()))
            .copied()
            .collect();

        new_anomalies.sort_by_key(|o| o.sequence_id());

        (new_anomalies, updated)
    }
}
