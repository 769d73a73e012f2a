//! # Stockdesk Terminal - Library Root
//!
//! Command-line client for a stock trading API. This library crate contains all
//! modules used by the binary crate (`main.rs`).
//!
//! ## Architecture
//!
//! ```text
//! ┌────────────────────────────────────────────────────────┐
//! │              stockdesk-terminal (this crate)           │
//! ├────────────────────────────────────────────────────────┤
//! │  Tokio         - Async runtime                         │
//! │  Reqwest       - HTTP client                           │
//! │  parking_lot   - Session state lock                    │
//! │  tracing       - Structured file logging               │
//! └────────────────────────────────────────────────────────┘
//!                          │ HTTP/JSON, Bearer token
//!                          ▼
//!                ┌──────────────────┐
//!                │ Trading REST API │
//!                └──────────────────┘
//! ```
//!
//! ## Module Structure
//!
//! - **app**: Prompt loop, command parsing and handlers
//! - **core**: Configuration, error types and the [`ApiService`](core::ApiService) seam
//! - **debug**: Logging setup
//! - **services**: HTTP client (`api`) and key-value persistence (`storage`)
//! - **session**: Session persistence and the auth state machine
//! - **ui**: Stock search panel and text rendering
//! - **utils**: Input validation
//!
//! ### Module Dependency Graph
//!
//! ```text
//! main.rs
//!   │
//!   └── app (events, commands, handlers)
//!       ├── session::SessionManager ──► core::ApiService ◄── services::api::ApiClient
//!       │        │                                                   │
//!       │        └── session::SessionStore ◄─────── token ───────────┘
//!       │                 └── services::storage (FileStorage / MemoryStorage)
//!       └── ui (NavPanel, render)
//! ```
//!
//! ## Usage
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use stockdesk::core::ClientConfig;
//! use stockdesk::services::api::ApiClient;
//! use stockdesk::services::storage::MemoryStorage;
//! use stockdesk::session::{SessionManager, SessionStore};
//!
//! # async fn demo() -> stockdesk::Result<()> {
//! let config = ClientConfig::default();
//! let store = SessionStore::new(Arc::new(MemoryStorage::new()));
//! let api = Arc::new(ApiClient::new(&config, store.clone()));
//! let session = Arc::new(SessionManager::new(api, store));
//!
//! session.initialize();
//! let user = session.login("a@b.com", "secret").await?;
//! println!("{} has {}", user.name, user.balance);
//! # Ok(())
//! # }
//! ```
//!
//! ## Testing
//!
//! ```bash
//! cargo test -p stockdesk-terminal
//! ```

pub mod app;
pub mod core;
pub mod debug;
pub mod services;
pub mod session;
pub mod ui;
pub mod utils;

pub use app::{App, AppEvent};
pub use crate::core::{AppError, ClientConfig, Result};
pub use services::api::{ApiClient, RequestError};
pub use session::{AuthSnapshot, AuthStatus, SessionManager, SessionStore};
