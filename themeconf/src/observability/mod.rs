//! Observability module
//!
//! Structured logging for the loader and CLI.

pub mod logging;

pub use logging::{LogFormat, LoggingOptions, init_logging, log_load_warnings};
