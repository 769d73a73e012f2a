//! # Session Module
//!
//! Client-side session lifecycle.
//!
//! ```text
//! session/
//! ├── store.rs    - SessionStore: profile + token persistence (two storage keys)
//! ├── state.rs    - AuthStatus, AuthSnapshot, BalanceSync
//! └── manager.rs  - SessionManager: login/signup/logout/refresh/balance, restore + verify
//! ```

pub mod manager;
pub mod state;
pub mod store;

pub use manager::SessionManager;
pub use state::{AuthSnapshot, AuthStatus, BalanceSync};
pub use store::{Session, SessionStore};
