//! # Services Module
//!
//! External integrations of the terminal.
//!
//! ## Module Overview
//!
//! ```text
//! services/
//! ├── api/         - REST client for the trading API
//! │                  (auth, market, portfolio, watchlist, payment)
//! └── storage.rs   - Key-value persistence (file-backed and in-memory)
//! ```
//!
//! ## Service Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │                   Stockdesk Terminal                    │
//! │                                                         │
//! │  ┌──────────────────┐       ┌──────────────────────┐    │
//! │  │  ApiClient       │──────►│  SessionStore        │    │
//! │  │  (api/)          │ token │  over storage.rs     │    │
//! │  └────────┬─────────┘       └──────────┬───────────┘    │
//! └───────────┼────────────────────────────┼────────────────┘
//!             │ HTTP/JSON                  │ JSON file
//!             ▼                            ▼
//! ┌─────────────────────┐       ┌──────────────────────────┐
//! │  Trading API        │       │  .stockdesk/session.json │
//! │  /api/auth/*        │       └──────────────────────────┘
//! │  /api/stocks/*      │
//! │  /api/market/*      │
//! │  /api/portfolio/*   │
//! │  /api/watchlist/*   │
//! │  /api/payment/*     │
//! └─────────────────────┘
//! ```
//!
//! The client reads the bearer token from the session store on every request,
//! so a login or logout takes effect on the next call without rebuilding it.

pub mod api;
pub mod storage;
