//! # Market Data Endpoints
//!
//! Stock listings, quotes, charts and market overviews. Responses are passed
//! through as raw JSON; the terminal only pretty-prints them.

use super::client::{segment, ApiClient, RequestOptions};
use super::error::RequestError;
use serde_json::Value;
use shared::TrendingKind;

/// Chart period used when none is given
pub const DEFAULT_CHART_PERIOD: &str = "1M";
/// Result cap for server-side search and trending lists
pub const DEFAULT_LIST_LIMIT: usize = 10;

/// List stocks, forwarding arbitrary filter parameters as the query string.
pub async fn get_stocks(client: &ApiClient, params: &[(&str, &str)]) -> Result<Value, RequestError> {
    let options = params
        .iter()
        .fold(RequestOptions::get(), |options, (k, v)| options.query(*k, v));
    client.request("/stocks", options).await
}

/// Get one stock by symbol.
pub async fn get_stock(client: &ApiClient, symbol: &str) -> Result<Value, RequestError> {
    client
        .request(&format!("/stocks/{}", segment(symbol)), RequestOptions::get())
        .await
}

/// Get price history for a stock over `period` (`1D`, `1W`, `1M`, `1Y`, ...).
#[tracing::instrument(skip(client))]
pub async fn get_chart(client: &ApiClient, symbol: &str, period: &str) -> Result<Value, RequestError> {
    client
        .request(
            &format!("/stocks/{}/chart", segment(symbol)),
            RequestOptions::get().query("period", period),
        )
        .await
}

/// Server-side stock search.
#[tracing::instrument(skip(client))]
pub async fn search(client: &ApiClient, query: &str, limit: usize) -> Result<Value, RequestError> {
    client
        .request(
            &format!("/stocks/search/{}", segment(query)),
            RequestOptions::get().query("limit", limit),
        )
        .await
}

/// Top gainers or losers.
pub async fn get_trending(
    client: &ApiClient,
    kind: TrendingKind,
    limit: usize,
) -> Result<Value, RequestError> {
    client
        .request(
            "/market/trending",
            RequestOptions::get()
                .query("type", kind.as_str())
                .query("limit", limit),
        )
        .await
}

/// Headline market indices.
pub async fn get_indices(client: &ApiClient) -> Result<Value, RequestError> {
    client.request("/market/indices", RequestOptions::get()).await
}

/// Sector list.
pub async fn get_sectors(client: &ApiClient) -> Result<Value, RequestError> {
    client.request("/stocks/meta/sectors", RequestOptions::get()).await
}
