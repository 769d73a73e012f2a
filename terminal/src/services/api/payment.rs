//! # Payment Endpoints
//!
//! Wallet top-up flow: create a payment order, verify the provider's callback
//! data, then credit the funds.

use super::client::{ApiClient, RequestOptions};
use super::error::RequestError;
use serde_json::Value;
use shared::{AddFundsRequest, CreateOrderRequest};

/// Create a payment order for `amount`.
#[tracing::instrument(skip(client))]
pub async fn create_order(client: &ApiClient, amount: f64) -> Result<Value, RequestError> {
    client
        .request(
            "/payment/create-order",
            RequestOptions::post(&CreateOrderRequest { amount })?,
        )
        .await
}

/// Forward the payment provider's verification payload unchanged.
pub async fn verify_payment(client: &ApiClient, payment: &Value) -> Result<Value, RequestError> {
    client
        .request("/payment/verify", RequestOptions::post(payment)?)
        .await
}

/// Credit a verified payment to the wallet.
#[tracing::instrument(skip(client))]
pub async fn add_funds(client: &ApiClient, amount: f64, payment_id: &str) -> Result<Value, RequestError> {
    let body = AddFundsRequest {
        amount,
        payment_id: payment_id.to_string(),
    };
    client
        .request("/payment/add-funds", RequestOptions::post(&body)?)
        .await
}
