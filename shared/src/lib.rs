//! # Shared Data Transfer Objects Library
//!
//! This library defines the contract between the Stockdesk terminal client and the
//! trading API. All DTOs use JSON serialization via `serde`.
//!
//! ## Structure
//!
//! - **[`dto`]**: Data Transfer Objects for API communication
//!   - **[`dto::auth`]**: Authentication requests, user profile, error body
//!   - **[`dto::trading`]**: Portfolio, watchlist and payment request bodies
//! - **[`utils`]**: Display formatting helpers
//!   - **[`utils::format_inr`]**: Rupee amount with thousands grouping
//!   - **[`utils::format_change`]**: Signed percentage change
//!
//! ## Wire Format
//!
//! - Field names follow the API: snake_case where the API uses it, `paymentId` where it does not
//! - Unknown profile fields are kept in [`UserProfile::extra`] so a cached profile
//!   round-trips without losing server data
//! - All structs implement both `Serialize` and `Deserialize`
//!
//! ## Usage
//!
//! ```rust
//! use shared::dto::auth::AuthResponse;
//! use shared::utils::format_inr;
//!
//! let body = r#"{"user":{"id":1,"name":"A","email":"a@b.com","balance":1250.5},"token":"tok1"}"#;
//! let auth: AuthResponse = serde_json::from_str(body).unwrap();
//!
//! assert_eq!(auth.user.name, "A");
//! assert_eq!(format_inr(auth.user.balance), "₹1,250.5");
//! ```

pub mod dto;
pub mod utils;

// Wildcard re-exports: shared is a DTO library where every export is public API
pub use dto::*;
pub use utils::*;
