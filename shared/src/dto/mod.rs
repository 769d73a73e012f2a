//! # Data Transfer Objects (DTOs)
//!
//! Data structures exchanged with the trading API.
//!
//! ## Module Organization
//!
//! - [`auth`] - Login, registration, user profile and error bodies
//! - [`trading`] - Buy/sell orders, watchlist entries and payments
//!
//! ## Example JSON Communication
//!
//! ```text
//! POST /api/auth/login
//! Content-Type: application/json
//!
//! {
//!   "email": "alice@example.com",
//!   "password": "MyPassword123"
//! }
//! ```
//!
//! ```text
//! HTTP/1.1 200 OK
//! Content-Type: application/json
//!
//! {
//!   "user": {
//!     "id": 1,
//!     "name": "Alice",
//!     "email": "alice@example.com",
//!     "balance": 100000
//!   },
//!   "token": "eyJhbGciOiJIUzI1NiIsInR5cCI6IkpXVCJ9..."
//! }
//! ```
//!
//! ```text
//! HTTP/1.1 401 Unauthorized
//! Content-Type: application/json
//!
//! { "message": "Invalid credentials" }
//! ```

pub mod auth;
pub mod trading;

pub use auth::*;
pub use trading::*;
