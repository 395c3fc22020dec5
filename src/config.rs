//! Runtime configuration loaded from environment variables

use crate::generator::GeneratorConfig;
use crate::stream_core::controller::{StreamConfig, DEFAULT_CHUNK_SIZE, DEFAULT_THRESHOLD};
use std::env;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid configuration value: {0}")]
    InvalidValue(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunMode {
    Dashboard,
    Headless,
}

/// Configuration for a sentinel run
#[derive(Debug, Clone)]
pub struct SentinelConfig {
    pub threshold: f64,
    pub chunk_size: usize,
    pub refresh_interval: Duration,
    pub seed: u64,
    pub normal_count: usize,
    pub anomaly_count: usize,
    pub output_dir: PathBuf,
    pub enable_jsonl: bool,
}

impl Default for SentinelConfig {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_THRESHOLD,
            chunk_size: DEFAULT_CHUNK_SIZE,
            refresh_interval: Duration::from_millis(1_000),
            seed: 42,
            normal_count: 1000,
            anomaly_count: 10,
            output_dir: PathBuf::from("."),
            enable_jsonl: false,
        }
    }
}

impl SentinelConfig {
    /// Load configuration from environment variables
    ///
    /// Environment variables:
    /// - `SENTINEL_Z_THRESHOLD` (default: 3.0)
    /// - `SENTINEL_CHUNK_SIZE` (default: 50)
    /// - `SENTINEL_REFRESH_MS` (default: 1000)
    /// - `SENTINEL_SEED` (default: 42)
    /// - `SENTINEL_NORMAL_COUNT` (default: 1000)
    /// - `SENTINEL_ANOMALY_COUNT` (default: 10)
    /// - `SENTINEL_OUTPUT_DIR` (default: .)
    /// - `SENTINEL_ENABLE_JSONL` (default: false)
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let refresh_ms = parse_var("SENTINEL_REFRESH_MS", 1_000u64);

        let config = Self {
            threshold: parse_var("SENTINEL_Z_THRESHOLD", defaults.threshold),
            chunk_size: parse_var("SENTINEL_CHUNK_SIZE", defaults.chunk_size),
            refresh_interval: Duration::from_millis(refresh_ms),
            seed: parse_var("SENTINEL_SEED", defaults.seed),
            normal_count: parse_var("SENTINEL_NORMAL_COUNT", defaults.normal_count),
            anomaly_count: parse_var("SENTINEL_ANOMALY_COUNT", defaults.anomaly_count),
            output_dir: env::var("SENTINEL_OUTPUT_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.output_dir),
            enable_jsonl: parse_var("SENTINEL_ENABLE_JSONL", defaults.enable_jsonl),
        };

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.threshold.is_finite() || self.threshold <= 0.0 {
            return Err(ConfigError::InvalidValue(format!(
                "SENTINEL_Z_THRESHOLD must be positive, got {}",
                self.threshold
            )));
        }

        if self.chunk_size == 0 {
            return Err(ConfigError::InvalidValue(
                "SENTINEL_CHUNK_SIZE must be at least 1".to_string(),
            ));
        }

        if self.refresh_interval.is_zero() {
            return Err(ConfigError::InvalidValue(
                "SENTINEL_REFRESH_MS must be at least 1".to_string(),
            ));
        }

        Ok(())
    }

    pub fn stream_config(&self) -> StreamConfig {
        StreamConfig {
            threshold: self.threshold,
            chunk_size: self.chunk_size,
        }
    }

    pub fn generator_config(&self) -> GeneratorConfig {
        GeneratorConfig {
            seed: self.seed,
            normal_count: self.normal_count,
            anomaly_count: self.anomaly_count,
            ..GeneratorConfig::default()
        }
    }

    pub fn csv_log_path(&self) -> PathBuf {
        self.output_dir.join("anomaly_log.csv")
    }

    pub fn text_log_path(&self) -> PathBuf {
        self.output_dir.join("anomaly_log.txt")
    }

    pub fn jsonl_path(&self) -> PathBuf {
        self.output_dir.join("anomaly_alerts.jsonl")
    }
}

/// Select the run mode from command line arguments
pub fn parse_mode_from_args<I, S>(args: I) -> RunMode
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    if args.into_iter().any(|a| a.as_ref() == "--headless") {
        RunMode::Headless
    } else {
        RunMode::Dashboard
    }
}

fn parse_var<T: FromStr>(name: &str, default: T) -> T {
    match env::var(name) {
        Ok(raw) => match raw.trim().to_lowercase().parse::<T>() {
            Ok(value) => value,
            Err(_) => {
                log::warn!("Invalid {} '{}', using default", name, raw);
                default
            }
        },
        Err(_) => default,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    // Tests touching process environment must not interleave
    static ENV_LOCK: Mutex<()> = Mutex::new(());

    const VARS: [&str; 8] = [
        "SENTINEL_Z_THRESHOLD",
        "SENTINEL_CHUNK_SIZE",
        "SENTINEL_REFRESH_MS",
        "SENTINEL_SEED",
        "SENTINEL_NORMAL_COUNT",
        "SENTINEL_ANOMALY_COUNT",
        "SENTINEL_OUTPUT_DIR",
        "SENTINEL_ENABLE_JSONL",
    ];

    fn clear_env() {
        for var in VARS {
            env::remove_var(var);
        }
    }

    #[test]
    fn test_default_config() {
        let _guard = ENV_LOCK.lock().unwrap();
        clear_env();

        let config = SentinelConfig::from_env().unwrap();

        assert_eq!(config.threshold, 3.0);
        assert_eq!(config.chunk_size, 50);
        assert_eq!(config.refresh_interval, Duration::from_millis(1_000));
        assert_eq!(config.seed, 42);
        assert_eq!(config.normal_count, 1000);
        assert_eq!(config.anomaly_count, 10);
        assert_eq!(config.csv_log_path(), PathBuf::from("./anomaly_log.csv"));
        assert!(!config.enable_jsonl);
    }

    #[test]
    fn test_custom_config() {
        let _guard = ENV_LOCK.lock().unwrap();
        clear_env();
        env::set_var("SENTINEL_Z_THRESHOLD", "2.5");
        env::set_var("SENTINEL_CHUNK_SIZE", "20");
        env::set_var("SENTINEL_REFRESH_MS", "250");
        env::set_var("SENTINEL_OUTPUT_DIR", "/tmp/sentinel");
        env::set_var("SENTINEL_ENABLE_JSONL", "TRUE");

        let config = SentinelConfig::from_env().unwrap();

        assert_eq!(config.threshold, 2.5);
        assert_eq!(config.chunk_size, 20);
        assert_eq!(config.refresh_interval, Duration::from_millis(250));
        assert_eq!(config.text_log_path(), PathBuf::from("/tmp/sentinel/anomaly_log.txt"));
        assert!(config.enable_jsonl);

        clear_env();
    }

    #[test]
    fn test_unparseable_value_falls_back() {
        let _guard = ENV_LOCK.lock().unwrap();
        clear_env();
        env::set_var("SENTINEL_CHUNK_SIZE", "lots");

        let config = SentinelConfig::from_env().unwrap();
        assert_eq!(config.chunk_size, 50);

        clear_env();
    }

    #[test]
    fn test_out_of_domain_rejected() {
        let _guard = ENV_LOCK.lock().unwrap();
        clear_env();
        env::set_var("SENTINEL_Z_THRESHOLD", "-1");

        assert!(matches!(SentinelConfig::from_env(), Err(ConfigError::InvalidValue(_))));

        env::set_var("SENTINEL_Z_THRESHOLD", "3.0");
        env::set_var("SENTINEL_CHUNK_SIZE", "0");
        assert!(matches!(SentinelConfig::from_env(), Err(ConfigError::InvalidValue(_))));

        clear_env();
    }

    #[test]
    fn test_parse_mode_from_args() {
        assert_eq!(parse_mode_from_args(["sentinel_dashboard"]), RunMode::Dashboard);
        assert_eq!(
            parse_mode_from_args(["sentinel_dashboard", "--headless"]),
            RunMode::Headless
        );
    }
}
