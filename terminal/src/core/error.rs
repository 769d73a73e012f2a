//! # Common Error Types
//!
//! Consolidated error handling for the Stockdesk terminal.
//!
//! ## Error Categories
//!
//! - **Request**: API calls that failed (see [`RequestError`])
//! - **Storage**: Session persistence failures (see [`StorageError`])
//! - **Config**: Invalid or missing configuration
//! - **State**: Operations that lost a race against a newer session change
//! - **Validation**: User input rejected before any request is made
//!
//! ## Usage Pattern
//!
//! ```rust
//! use stockdesk::core::error::AppError;
//!
//! fn parse_quantity(raw: &str) -> Result<u32, AppError> {
//!     raw.parse()
//!         .map_err(|_| AppError::Validation(format!("Invalid quantity: {}", raw)))
//! }
//!
//! assert!(parse_quantity("ten").is_err());
//! ```

use crate::services::api::RequestError;
use crate::services::storage::StorageError;
use thiserror::Error;

/// Application-wide error type.
#[derive(Debug, Error)]
pub enum AppError {
    /// API request failure. Displays the request's own message unchanged so server
    /// messages like "Invalid credentials" reach the user verbatim.
    #[error(transparent)]
    Request(#[from] RequestError),

    /// Session persistence failure.
    #[error(transparent)]
    Storage(#[from] StorageError),

    /// Configuration error.
    ///
    /// ```rust
    /// use stockdesk::core::error::AppError;
    ///
    /// let err = AppError::Config("STOCKDESK_API_URL is not a valid URL".to_string());
    /// assert_eq!(err.to_string(), "Configuration error: STOCKDESK_API_URL is not a valid URL");
    /// ```
    #[error("Configuration error: {0}")]
    Config(String),

    /// Session state error, e.g. a login response that arrived after a logout.
    #[error("State error: {0}")]
    State(String),

    /// Input validation error.
    #[error("Validation error: {0}")]
    Validation(String),
}

/// Convenience type alias for `Result<T, AppError>`.
pub type Result<T> = std::result::Result<T, AppError>;
