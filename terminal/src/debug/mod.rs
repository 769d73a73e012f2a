//! # Logging Infrastructure
//!
//! File-based structured logging for the terminal. The prompt owns stdout, so
//! log output goes to `logs/stockdesk.log` (daily rotation) and, when asked,
//! to stderr.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use stockdesk::debug::{init_logger, LogConfig};
//!
//! let _guard = init_logger(&LogConfig::from_env()).expect("log directory");
//! tracing::info!(endpoint = "/auth/login", duration_ms = 234, "API call completed");
//! ```
//!
//! ## Configuration
//!
//! Environment variables:
//! - `RUST_LOG`: Log level filter (e.g., `stockdesk=debug,info`)
//! - `STOCKDESK_LOG_DIR`: Log directory (default: `logs`)
//! - `STOCKDESK_LOG_STDERR`: Mirror logs to stderr (1=on)

pub mod config;
pub mod logger;

pub use config::LogConfig;
pub use logger::init as init_logger;
