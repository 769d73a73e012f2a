//! # Command Handlers
//!
//! One function per prompt command, grouped by area. Each returns the text to
//! print, or an [`AppError`](crate::core::error::AppError) that the loop prints
//! as an error line.

pub(crate) mod auth;
pub(crate) mod market;
pub(crate) mod portfolio;
