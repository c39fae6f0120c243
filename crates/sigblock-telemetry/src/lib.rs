//! Sigblock Telemetry - logging setup for the sigblock tools.
//!
//! This crate provides:
//! - A `LogConfig` builder with level, format, target and directives
//! - Pretty, compact, JSON and full output formats
//! - Stderr, stdout or rotating file targets
//!
//! # Example
//!
//! ```rust,no_run
//! use sigblock_telemetry::{LogConfig, LogFormat, setup_logging};
//!
//! # fn main() -> Result<(), sigblock_telemetry::TelemetryError> {
//! let config = LogConfig::new("debug")
//!     .with_format(LogFormat::Json)
//!     .with_directive("sigblock_crypto=trace");
//!
//! setup_logging(&config)?;
//! tracing::info!("logging ready");
//! # Ok(())
//! # }
//! ```

#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![warn(unreachable_pub)]
#![deny(clippy::unwrap_used)]
#![cfg_attr(test, allow(clippy::unwrap_used))]

pub mod prelude;

mod error;
mod logging;

pub use error::{TelemetryError, TelemetryResult};
pub use logging::{
    FileLogConfig, FileRotation, LogConfig, LogFormat, LogTarget, setup_default_logging,
    setup_logging,
};
