//! # Navigation Panel
//!
//! Terminal counterpart of the top navigation bar: live stock search, the wallet
//! balance and identity header, and the profile menu with logout.

use super::search::{search_stocks, MAX_RESULTS};
use super::stock_data::{StockInfo, STOCKS};
use crate::session::{AuthSnapshot, SessionManager};
use shared::utils::format_inr;

/// Shown instead of a name when nobody is logged in.
pub const SIGNED_OUT: &str = "(signed out)";

/// Search and profile-menu state. Results are recomputed on every query change.
#[derive(Debug, Clone)]
pub struct NavPanel {
    stocks: &'static [StockInfo],
    limit: usize,
    query: String,
    results: Vec<&'static StockInfo>,
    show_results: bool,
    profile_open: bool,
}

impl Default for NavPanel {
    fn default() -> Self {
        Self::new(MAX_RESULTS)
    }
}

impl NavPanel {
    pub fn new(limit: usize) -> Self {
        Self::with_stocks(STOCKS, limit)
    }

    pub fn with_stocks(stocks: &'static [StockInfo], limit: usize) -> Self {
        Self {
            stocks,
            limit,
            query: String::new(),
            results: Vec::new(),
            show_results: false,
            profile_open: false,
        }
    }

    pub fn set_query(&mut self, query: &str) {
        self.query = query.to_string();
        self.results = search_stocks(self.stocks, &self.query, self.limit);
        self.show_results = !self.query.trim().is_empty();
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn results(&self) -> &[&'static StockInfo] {
        &self.results
    }

    pub fn results_visible(&self) -> bool {
        self.show_results
    }

    /// Message for a non-blank query with no matches.
    pub fn empty_message(&self) -> Option<String> {
        (self.show_results && self.results.is_empty())
            .then(|| format!("No stocks found for \"{}\"", self.query))
    }

    /// Pick a result (0-based). Clears the query and hides the dropdown.
    pub fn select(&mut self, index: usize) -> Option<&'static StockInfo> {
        let chosen = self.results.get(index).copied()?;
        tracing::debug!(symbol = chosen.symbol, "Search result selected");
        self.set_query("");
        Some(chosen)
    }

    /// Enter on the search box: take the first result, if any.
    pub fn submit(&mut self) -> Option<&'static StockInfo> {
        self.select(0)
    }

    pub fn toggle_profile(&mut self) -> bool {
        self.profile_open = !self.profile_open;
        self.profile_open
    }

    pub fn profile_open(&self) -> bool {
        self.profile_open
    }

    pub fn logout(&mut self, session: &SessionManager) {
        self.profile_open = false;
        session.logout();
    }

    /// Balance and identity line, e.g. `₹1,250.5 | Asha`.
    pub fn header(snapshot: &AuthSnapshot) -> String {
        let balance = snapshot
            .balance()
            .map(format_inr)
            .unwrap_or_else(|| "₹0".to_string());
        let name = snapshot
            .user
            .as_ref()
            .map(|u| u.name.as_str())
            .unwrap_or(SIGNED_OUT);
        format!("{} | {}", balance, name)
    }
}
