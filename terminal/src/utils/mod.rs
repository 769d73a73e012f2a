//! # Utility Functions
//!
//! Shared utility functions used across the terminal application.
//!
//! ## Modules
//!
//! - **[`validation`]**: Input validation for credentials and amounts
//!
//! ## Related Modules
//!
//! - [`shared::utils`]: Cross-crate display formatting (amounts, percentages)
//! - [`crate::core`]: Core abstractions and error types

pub mod validation;
