//! # Authentication Handlers
//!
//! Login, signup, logout and the balance/profile commands.

use crate::core::error::Result;
use crate::services::api::{payment, ApiClient};
use crate::session::{BalanceSync, SessionManager};
use crate::ui::{render, NavPanel};
use crate::utils::validation::{
    validate_amount, validate_balance, validate_email, validate_name, validate_password,
};
use serde_json::{Map, Value};
use shared::utils::format_inr;

pub(crate) async fn login(session: &SessionManager, email: &str, password: &str) -> Result<String> {
    validate_email(email).into_result()?;
    let user = session.login(email, password).await?;
    Ok(format!(
        "Welcome back, {}\n{}",
        user.name,
        NavPanel::header(&session.snapshot())
    ))
}

pub(crate) async fn signup(
    session: &SessionManager,
    name: &str,
    email: &str,
    password: &str,
) -> Result<String> {
    validate_name(name).into_result()?;
    validate_email(email).into_result()?;
    validate_password(password).into_result()?;
    let user = session.signup(name.trim(), email, password).await?;
    Ok(format!(
        "Account created. Welcome, {}\n{}",
        user.name,
        NavPanel::header(&session.snapshot())
    ))
}

pub(crate) fn whoami(session: &SessionManager) -> String {
    if !session.is_authenticated() {
        return "Not logged in".to_string();
    }
    render::profile(&session.snapshot())
}

pub(crate) async fn refresh(session: &SessionManager) -> Result<String> {
    Ok(match session.refresh_user().await {
        Some(user) => format!("Profile refreshed. Balance: {}", format_inr(user.balance)),
        None => "Could not refresh the profile, showing cached data".to_string(),
    })
}

pub(crate) async fn set_balance(session: &SessionManager, amount: f64) -> Result<String> {
    validate_balance(amount).into_result()?;
    let shown = format_inr(amount);
    Ok(match session.update_balance(amount).await {
        Some(BalanceSync::Confirmed) => format!("Balance set to {}", shown),
        Some(BalanceSync::Diverged) => format!(
            "Balance set to {} locally, but the server did not confirm it",
            shown
        ),
        Some(BalanceSync::Pending) => "Balance change superseded by a newer update".to_string(),
        None => "Not logged in".to_string(),
    })
}

/// Start a top-up by creating a payment order.
pub(crate) async fn deposit(api: &ApiClient, amount: f64) -> Result<String> {
    validate_amount(amount).into_result()?;
    let order = payment::create_order(api, amount).await?;
    Ok(format!(
        "{}\nComplete the payment, then run: confirm {} <payment-id> [key=value ...]",
        render::json(&order),
        amount
    ))
}

/// Verify a finished payment, credit it and pick up the new balance.
pub(crate) async fn confirm(
    api: &ApiClient,
    session: &SessionManager,
    amount: f64,
    payment_id: &str,
    fields: &[(String, String)],
) -> Result<String> {
    validate_amount(amount).into_result()?;

    let mut payload: Map<String, Value> = fields
        .iter()
        .map(|(k, v)| (k.clone(), Value::String(v.clone())))
        .collect();
    payload.insert("paymentId".to_string(), Value::String(payment_id.to_string()));

    payment::verify_payment(api, &Value::Object(payload)).await?;
    payment::add_funds(api, amount, payment_id).await?;
    tracing::info!(amount, "Funds added");

    Ok(match session.refresh_user().await {
        Some(user) => format!(
            "Added {}. Balance: {}",
            format_inr(amount),
            format_inr(user.balance)
        ),
        None => format!("Added {}", format_inr(amount)),
    })
}
