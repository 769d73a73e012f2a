//! # Core Abstractions
//!
//! Foundational pieces used throughout the terminal client:
//!
//! - **[`config`]**: Client configuration from the environment (`ClientConfig`)
//! - **[`error`]**: Application error types (`AppError`, `Result<T>`)
//! - **[`service`]**: Service traits for dependency injection (`ApiService`)
//!
//! ## Dependency Injection
//!
//! The session manager only sees the [`ApiService`] trait, so tests swap in a
//! mock while production uses the HTTP client:
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use stockdesk::core::{ApiService, ClientConfig};
//! use stockdesk::services::api::ApiClient;
//! use stockdesk::services::storage::MemoryStorage;
//! use stockdesk::session::SessionStore;
//!
//! let store = SessionStore::new(Arc::new(MemoryStorage::new()));
//! let api: Arc<dyn ApiService> = Arc::new(ApiClient::new(&ClientConfig::default(), store));
//! ```

pub mod config;
pub mod error;
pub mod service;

pub use config::ClientConfig;
pub use error::{AppError, Result};
pub use service::ApiService;
