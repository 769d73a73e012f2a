//! # Terminal UI
//!
//! Everything the prompt shows that is not raw API data.
//!
//! ```text
//! ui/
//! ├── stock_data.rs  - static NSE large-cap table
//! ├── search.rs      - substring search over the table
//! ├── navbar.rs      - NavPanel: search dropdown, header line, profile menu
//! └── render.rs      - text formatting for rows, profiles and JSON payloads
//! ```

pub mod navbar;
pub mod render;
pub mod search;
pub mod stock_data;

pub use navbar::NavPanel;
pub use search::{search_stocks, MAX_RESULTS};
pub use stock_data::{StockInfo, STOCKS};
