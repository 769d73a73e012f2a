//! # Market Handlers
//!
//! Local search over the built-in table plus the server's market endpoints.

use crate::core::error::{AppError, Result};
use crate::services::api::market::{self, DEFAULT_CHART_PERIOD, DEFAULT_LIST_LIMIT};
use crate::services::api::ApiClient;
use crate::ui::{render, NavPanel, StockInfo};
use shared::TrendingKind;

/// Type a query into the search panel and list what it shows.
pub(crate) fn search(nav: &mut NavPanel, query: &str) -> String {
    nav.set_query(query);
    if let Some(message) = nav.empty_message() {
        return message;
    }
    let mut lines: Vec<String> = nav
        .results()
        .iter()
        .enumerate()
        .map(|(i, stock)| render::stock_row(i, stock))
        .collect();
    lines.push("Pick one with: select <n> (empty line picks the first)".to_string());
    lines.join("\n")
}

/// Open a picked search result: server quote if available, else the local row.
pub(crate) async fn open(api: &ApiClient, stock: &StockInfo) -> String {
    match market::get_stock(api, stock.symbol).await {
        Ok(details) => render::json(&details),
        Err(e) => {
            tracing::debug!(symbol = stock.symbol, error = %e, "Stock details unavailable");
            format!("{}\n(live details unavailable: {})", render::stock_row(0, stock), e)
        }
    }
}

pub(crate) async fn select(api: &ApiClient, nav: &mut NavPanel, index: usize) -> Result<String> {
    let stock = nav.select(index).ok_or_else(|| {
        AppError::Validation(format!("No result {} (run search first)", index + 1))
    })?;
    Ok(open(api, stock).await)
}

pub(crate) async fn submit(api: &ApiClient, nav: &mut NavPanel) -> String {
    match nav.submit() {
        Some(stock) => open(api, stock).await,
        None => String::new(),
    }
}

pub(crate) async fn stocks(api: &ApiClient) -> Result<String> {
    let limit = DEFAULT_LIST_LIMIT.to_string();
    let list = market::get_stocks(api, &[("limit", limit.as_str())]).await?;
    Ok(render::json(&list))
}

pub(crate) async fn stock(api: &ApiClient, symbol: &str) -> Result<String> {
    Ok(render::json(&market::get_stock(api, symbol).await?))
}

pub(crate) async fn chart(api: &ApiClient, symbol: &str, period: Option<&str>) -> Result<String> {
    let period = period.unwrap_or(DEFAULT_CHART_PERIOD);
    Ok(render::json(&market::get_chart(api, symbol, period).await?))
}

pub(crate) async fn find(api: &ApiClient, query: &str, limit: usize) -> Result<String> {
    Ok(render::json(&market::search(api, query, limit).await?))
}

pub(crate) async fn trending(api: &ApiClient, kind: TrendingKind) -> Result<String> {
    Ok(render::json(
        &market::get_trending(api, kind, DEFAULT_LIST_LIMIT).await?,
    ))
}

pub(crate) async fn indices(api: &ApiClient) -> Result<String> {
    Ok(render::json(&market::get_indices(api).await?))
}

pub(crate) async fn sectors(api: &ApiClient) -> Result<String> {
    Ok(render::json(&market::get_sectors(api).await?))
}
