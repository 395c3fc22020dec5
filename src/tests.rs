#[cfg(test)]
mod tests {
    use {
        crate::generator::{GeneratorConfig, TrafficGenerator},
        crate::stream_core::{stats, StreamConfig, StreamController, WindowClassifier},
        chrono::{TimeZone, Utc},
        std::collections::HashSet,
    };

    fn generated_controller(chunk_size: usize) -> StreamController {
        let series = TrafficGenerator::new(GeneratorConfig {
            start: Some(Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap()),
            ..GeneratorConfig::default()
        })
        .generate()
        .unwrap();

        StreamController::new(series, StreamConfig { threshold: 3.0, chunk_size }).unwrap()
    }

    /// Replaying the default simulation surfaces every alert once and ends exhausted
    #[test]
    fn test_generated_replay_alerts_exactly_once() {
        let mut controller = generated_controller(50);
        let mut reported = HashSet::new();
        let mut ticks = 0;

        loop {
            let output = controller.tick().unwrap();
            ticks += 1;
            for alert in &output.new_anomalies {
                assert!(reported.insert(alert.sequence_id()), "duplicate alert {}", alert.sequence_id());
            }
            if output.is_exhausted() {
                break;
            }
        }

        // 1010 sessions in chunks of 50
        assert_eq!(ticks, 21);
        assert_eq!(controller.alerts_reported(), reported.len());
        assert!(controller.tick().unwrap().new_anomalies.is_empty());
    }

    /// Every large session is caught at least by the final full-window pass
    #[test]
    fn test_full_series_pass_flags_exfiltration_sessions() {
        let controller = generated_controller(50);
        let series = controller.series();

        let scored = WindowClassifier::classify(series.as_slice(), 3.0);
        let flagged: Vec<f64> = scored.iter().filter(|o| o.is_anomaly).map(|o| o.value()).collect();

        let values: Vec<f64> = series.iter().map(|o| o.value).collect();
        let full = stats::compute(&values).unwrap();

        assert!(!flagged.is_empty());
        assert!(flagged.iter().all(|v| (v - full.mean).abs() > 3.0 * full.std_dev));
        assert!(flagged.iter().filter(|&&v| v > 900.0).count() >= 8);
    }
}
