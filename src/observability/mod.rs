//! OpenTelemetry tracing exported to a local OTLP-JSON file.
//!
//! ```text
//! tracing macros → tracing-opentelemetry → opentelemetry_sdk → JsonLinesExporter → RotatingFile
//! ```
//!
//! Spans land in `movieflix-otlp.json` inside the configured data directory,
//! one OTLP document per line. The file rotates at 10 MB and keeps 3 backups.
//!
//! The filter comes from `RUST_LOG` when set, otherwise from
//! `Config::trace_level` (default `"info"`).
//!
//! ```rust,no_run
//! use movieflix::observability::init_tracing;
//! use movieflix::Config;
//!
//! init_tracing(&Config::default());
//! tracing::debug!("tracing is now active");
//! ```

mod exporter;
mod file_writer;
mod init;

pub use init::{init_tracing, TRACE_FILE_NAME};
