//! Monitoring module for focusflow
//!
//! Provides:
//! - Logging configuration loaded from the environment
//! - Structured logging with tracing (console + optional rolling JSON file)

pub mod config;
pub mod tracing_config;

pub use config::{LogFormat, LoggingConfig};
pub use tracing_config::init_tracing;
