//! # Trading API Client Module
//!
//! HTTP client for the trading API. Handles authentication, market data,
//! portfolio, watchlist and payment calls.
//!
//! ## Module Structure
//!
//! ```text
//! api/
//! ├── mod.rs        - Module exports and documentation
//! ├── client.rs     - ApiClient, RequestOptions and the shared request path
//! ├── error.rs      - RequestError
//! ├── auth.rs       - Login, registration, profile
//! ├── market.rs     - Stocks, charts, search, trending, indices, sectors
//! ├── portfolio.rs  - Holdings, buy/sell, transactions
//! ├── watchlist.rs  - Watchlist get/add/remove
//! └── payment.rs    - Payment orders and wallet top-ups
//! ```

pub mod auth;
pub mod client;
pub mod error;
pub mod market;
pub mod payment;
pub mod portfolio;
pub mod watchlist;

pub use client::{ApiClient, RequestOptions};
pub use error::RequestError;
