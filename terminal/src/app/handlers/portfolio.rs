//! # Portfolio Handlers
//!
//! Holdings, trades, transaction history and the watchlist. Trades move money
//! on the server, so each one is followed by a profile refresh.

use crate::core::error::{AppError, Result};
use crate::services::api::{portfolio, watchlist, ApiClient};
use crate::session::SessionManager;
use crate::ui::{render, STOCKS};
use crate::utils::validation::validate_amount;
use shared::utils::format_inr;
use shared::{BuyRequest, SellRequest};

/// Display name for a symbol from the built-in table, or the symbol itself.
fn display_name(symbol: &str) -> String {
    STOCKS
        .iter()
        .find(|s| s.symbol.eq_ignore_ascii_case(symbol))
        .map(|s| s.name.to_string())
        .unwrap_or_else(|| symbol.to_string())
}

fn check_order(quantity: u32, price: f64) -> Result<()> {
    if quantity == 0 {
        return Err(AppError::Validation(
            "Quantity must be at least 1".to_string(),
        ));
    }
    validate_amount(price).into_result()
}

async fn with_balance(session: &SessionManager, text: String) -> String {
    match session.refresh_user().await {
        Some(user) => format!("{}\nBalance: {}", text, format_inr(user.balance)),
        None => text,
    }
}

pub(crate) async fn holdings(api: &ApiClient) -> Result<String> {
    Ok(render::json(&portfolio::get_holdings(api).await?))
}

pub(crate) async fn buy(
    api: &ApiClient,
    session: &SessionManager,
    symbol: &str,
    quantity: u32,
    price: f64,
) -> Result<String> {
    check_order(quantity, price)?;
    let order = BuyRequest {
        symbol: symbol.to_string(),
        name: display_name(symbol),
        quantity,
        price,
    };
    let receipt = portfolio::buy(api, &order).await?;
    tracing::info!(symbol, quantity, price, "Buy order placed");
    Ok(with_balance(session, render::json(&receipt)).await)
}

pub(crate) async fn sell(
    api: &ApiClient,
    session: &SessionManager,
    symbol: &str,
    quantity: u32,
    price: f64,
) -> Result<String> {
    check_order(quantity, price)?;
    let order = SellRequest {
        symbol: symbol.to_string(),
        quantity,
        price,
    };
    let receipt = portfolio::sell(api, &order).await?;
    tracing::info!(symbol, quantity, price, "Sell order placed");
    Ok(with_balance(session, render::json(&receipt)).await)
}

pub(crate) async fn transactions(api: &ApiClient) -> Result<String> {
    Ok(render::json(&portfolio::get_transactions(api).await?))
}

pub(crate) async fn list_watchlist(api: &ApiClient) -> Result<String> {
    Ok(render::json(&watchlist::get_watchlist(api).await?))
}

pub(crate) async fn watch(api: &ApiClient, symbol: &str, name: Option<&str>) -> Result<String> {
    let name = name.map(str::to_string).unwrap_or_else(|| display_name(symbol));
    watchlist::add(api, symbol, &name).await?;
    Ok(format!("Watching {} ({})", symbol, name))
}

pub(crate) async fn unwatch(api: &ApiClient, symbol: &str) -> Result<String> {
    watchlist::remove(api, symbol).await?;
    Ok(format!("Removed {} from the watchlist", symbol))
}
