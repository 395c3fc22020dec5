#[cfg(test)]
mod tests;

pub mod config;
pub mod generator;
pub mod scheduler;
pub mod sink;
pub mod stream_core;
pub mod ui;

pub use config::{ConfigError, RunMode, SentinelConfig};
pub use generator::{GeneratorConfig, GeneratorError, TrafficGenerator};
pub use stream_core::{
    Observation, ScoredObservation, Series, StreamConfig, StreamController, StreamError,
    TickOutput,
};
