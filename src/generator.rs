//! Seeded traffic series generator
//!
//! Simulates bytes sent per session: a large population of normal sessions
//! plus a handful of exfiltration-sized ones, shuffled and laid out on a
//! fixed time grid.

use crate::stream_core::{grid_timestamp, Observation, Series, StreamError};
use chrono::{DateTime, Duration, Utc};
use rand::{rngs::StdRng, seq::SliceRandom, SeedableRng};
use rand_distr::{Distribution, Normal};

#[derive(Debug, thiserror::Error)]
pub enum GeneratorError {
    #[error("Invalid distribution: {0}")]
    InvalidDistribution(String),

    #[error(transparent)]
    Series(#[from] StreamError),
}

#[derive(Debug, Clone)]
pub struct GeneratorConfig {
    pub seed: u64,
    pub normal_count: usize,
    pub normal_mean: f64,
    pub normal_std_dev: f64,
    pub anomaly_count: usize,
    pub anomaly_mean: f64,
    pub anomaly_std_dev: f64,
    /// Spacing between consecutive sessions
    pub interval_secs: i64,
    /// First timestamp; the current time when `None`
    pub start: Option<DateTime<Utc>>,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            normal_count: 1000,
            normal_mean: 500.0,
            normal_std_dev: 100.0,
            anomaly_count: 10,
            anomaly_mean: 1200.0,
            anomaly_std_dev: 100.0,
            interval_secs: 10,
            start: None,
        }
    }
}

pub struct TrafficGenerator {
    config: GeneratorConfig,
}

impl TrafficGenerator {
    pub fn new(config: GeneratorConfig) -> Self {
        Self { config }
    }

    pub fn with_defaults() -> Self {
        Self::new(GeneratorConfig::default())
    }

    /// Generate the series; identical seeds give identical values and order
    pub fn generate(&self) -> Result<Series, GeneratorError> {
        let cfg = &self.config;
        let mut rng = StdRng::seed_from_u64(cfg.seed);

        let normal = distribution(cfg.normal_mean, cfg.normal_std_dev)?;
        let anomalous = distribution(cfg.anomaly_mean, cfg.anomaly_std_dev)?;

        let mut values: Vec<f64> = Vec::with_capacity(cfg.normal_count + cfg.anomaly_count);
        values.extend((0..cfg.normal_count).map(|_| normal.sample(&mut rng)));
        values.extend((0..cfg.anomaly_count).map(|_| anomalous.sample(&mut rng)));
        values.shuffle(&mut rng);

        let start = cfg.start.unwrap_or_else(Utc::now);
        let interval = Duration::try_seconds(cfg.interval_secs).ok_or_else(|| {
            StreamError::InvalidSeries(format!("interval of {}s is out of range", cfg.interval_secs))
        })?;

        let observations = values
            .into_iter()
            .enumerate()
            .map(|(i, value)| {
                Ok(Observation {
                    sequence_id: i as u64,
                    timestamp: grid_timestamp(start, interval, i)?,
                    value,
                })
            })
            .collect::<Result<Vec<_>, StreamError>>()?;

        let series = Series::new(observations)?;

        log::info!(
            "📈 Generated {} sessions ({} normal, {} anomalous, seed {})",
            series.len(),
            cfg.normal_count,
            cfg.anomaly_count,
            cfg.seed
        );

        Ok(series)
    }
}

fn distribution(mean: f64, std_dev: f64) -> Result<Normal<f64>, GeneratorError> {
    // rand_distr mirrors a negative std instead of rejecting it
    if !mean.is_finite() || !std_dev.is_finite() || std_dev < 0.0 {
        return Err(GeneratorError::InvalidDistribution(format!(
            "mean={} std_dev={}: mean must be finite and std_dev finite and non-negative",
            mean, std_dev
        )));
    }

    Normal::new(mean, std_dev).map_err(|e| {
        GeneratorError::InvalidDistribution(format!("mean={} std_dev={}: {}", mean, std_dev, e))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn fixed_config() -> GeneratorConfig {
        GeneratorConfig {
            start: Some(Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap()),
            ..GeneratorConfig::default()
        }
    }

    #[test]
    fn test_same_seed_same_series() {
        let a = TrafficGenerator::new(fixed_config()).generate().unwrap();
        let b = TrafficGenerator::new(fixed_config()).generate().unwrap();

        assert_eq!(a, b);
        assert_eq!(a.len(), 1010);
    }

    #[test]
    fn test_different_seed_differs() {
        let a = TrafficGenerator::new(fixed_config()).generate().unwrap();
        let b = TrafficGenerator::new(GeneratorConfig { seed: 7, ..fixed_config() })
            .generate()
            .unwrap();

        assert_ne!(a, b);
    }

    #[test]
    fn test_timestamps_on_fixed_grid() {
        let series = TrafficGenerator::new(fixed_config()).generate().unwrap();
        let start = series.get(0).unwrap().timestamp;

        for (i, obs) in series.iter().enumerate() {
            assert_eq!(obs.sequence_id, i as u64);
            assert_eq!(obs.timestamp, start + Duration::seconds(10 * i as i64));
        }
    }

    #[test]
    fn test_anomalous_sessions_present() {
        let series = TrafficGenerator::new(fixed_config()).generate().unwrap();

        // Normal sessions sit around 500 +/- 100, so anything above 900 is from the anomaly draw
        let large = series.iter().filter(|o| o.value > 900.0).count();
        assert!(large >= 8 && large <= 12, "expected ~10 large sessions, got {}", large);
    }

    #[test]
    fn test_invalid_std_dev_rejected() {
        let generator = TrafficGenerator::new(GeneratorConfig {
            normal_std_dev: -1.0,
            ..fixed_config()
        });

        assert!(matches!(generator.generate(), Err(GeneratorError::InvalidDistribution(_))));
    }

    #[test]
    fn test_negative_and_non_finite_parameters_rejected() {
        let cases = [
            GeneratorConfig { anomaly_std_dev: -100.0, ..fixed_config() },
            GeneratorConfig { normal_std_dev: f64::NAN, ..fixed_config() },
            GeneratorConfig { anomaly_std_dev: f64::INFINITY, ..fixed_config() },
            GeneratorConfig { normal_mean: f64::NAN, ..fixed_config() },
        ];

        for config in cases {
            let generator = TrafficGenerator::new(config);
            assert!(matches!(generator.generate(), Err(GeneratorError::InvalidDistribution(_))));
        }
    }

    #[test]
    fn test_zero_std_dev_is_allowed() {
        let generator = TrafficGenerator::new(GeneratorConfig {
            anomaly_std_dev: 0.0,
            ..fixed_config()
        });
        let series = generator.generate().unwrap();

        assert_eq!(series.iter().filter(|o| o.value == 1200.0).count(), 10);
    }

    #[test]
    fn test_interval_overflow_is_an_error() {
        let generator = TrafficGenerator::new(GeneratorConfig {
            interval_secs: i64::MAX / 1000,
            ..fixed_config()
        });
        assert!(matches!(
            generator.generate(),
            Err(GeneratorError::Series(StreamError::InvalidSeries(_)))
        ));

        let generator = TrafficGenerator::new(GeneratorConfig {
            interval_secs: i64::MAX,
            ..fixed_config()
        });
        assert!(matches!(
            generator.generate(),
            Err(GeneratorError::Series(StreamError::InvalidSeries(_)))
        ));
    }

    #[test]
    fn test_empty_population() {
        let generator = TrafficGenerator::new(GeneratorConfig {
            normal_count: 0,
            anomaly_count: 0,
            ..fixed_config()
        });

        assert!(generator.generate().unwrap().is_empty());
    }
}
