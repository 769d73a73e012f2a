//! # Watchlist Endpoints

use super::client::{segment, ApiClient, RequestOptions};
use super::error::RequestError;
use serde_json::Value;
use shared::WatchlistAddRequest;

pub async fn get_watchlist(client: &ApiClient) -> Result<Value, RequestError> {
    client.request("/watchlist", RequestOptions::get()).await
}

pub async fn add(client: &ApiClient, symbol: &str, name: &str) -> Result<Value, RequestError> {
    let body = WatchlistAddRequest {
        symbol: symbol.to_string(),
        name: name.to_string(),
    };
    client
        .request("/watchlist", RequestOptions::post(&body)?)
        .await
}

pub async fn remove(client: &ApiClient, symbol: &str) -> Result<Value, RequestError> {
    client
        .request(&format!("/watchlist/{}", segment(symbol)), RequestOptions::delete())
        .await
}
