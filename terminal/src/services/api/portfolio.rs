//! # Portfolio Endpoints
//!
//! Holdings, buy/sell orders and transaction history. All require a session.

use super::client::{ApiClient, RequestOptions};
use super::error::RequestError;
use serde_json::Value;
use shared::{BuyRequest, SellRequest};

/// Current holdings.
pub async fn get_holdings(client: &ApiClient) -> Result<Value, RequestError> {
    client.request("/portfolio", RequestOptions::get()).await
}

/// Place a buy order.
#[tracing::instrument(skip(client), fields(symbol = %order.symbol, quantity = order.quantity))]
pub async fn buy(client: &ApiClient, order: &BuyRequest) -> Result<Value, RequestError> {
    tracing::info!(price = order.price, "Placing buy order");
    client
        .request("/portfolio/buy", RequestOptions::post(order)?)
        .await
}

/// Place a sell order.
#[tracing::instrument(skip(client), fields(symbol = %order.symbol, quantity = order.quantity))]
pub async fn sell(client: &ApiClient, order: &SellRequest) -> Result<Value, RequestError> {
    tracing::info!(price = order.price, "Placing sell order");
    client
        .request("/portfolio/sell", RequestOptions::post(order)?)
        .await
}

/// Transaction history.
pub async fn get_transactions(client: &ApiClient) -> Result<Value, RequestError> {
    client.request("/transactions", RequestOptions::get()).await
}
