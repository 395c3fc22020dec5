//! Alert sinks - persisted run artifacts
//!
//! Each tick's new anomalies are fanned out to one or more backends:
//!
//! ```text
//! TickOutput.new_anomalies → AlertWriter
//!     ├─ AnomalyCsvWriter   (anomaly_log.csv: timestamp,value,z_score)
//!     ├─ AlertLogWriter     (anomaly_log.txt: [ALERT] ... lines)
//!     └─ AlertJsonlWriter   (anomaly_alerts.jsonl, optional)
//! ```
//!
//! Files are truncated when a backend is created; nothing is read back.

pub mod backend;
pub mod csv_log;
pub mod jsonl_log;
pub mod text_log;
pub mod writer;

pub use backend::{AlertSinkBackend, SinkError};
pub use csv_log::AnomalyCsvWriter;
pub use jsonl_log::AlertJsonlWriter;
pub use text_log::{format_alert_line, format_timestamp, AlertLogWriter};
pub use writer::AlertWriter;
