//! Plain-text rendering for the prompt.

use super::stock_data::StockInfo;
use crate::session::{AuthSnapshot, BalanceSync};
use serde_json::Value;
use shared::utils::{format_change, format_inr};

/// Price change direction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PriceDirection {
    Up,
    Down,
}

impl PriceDirection {
    pub fn from_change(change: f64) -> Self {
        if change >= 0.0 {
            PriceDirection::Up
        } else {
            PriceDirection::Down
        }
    }

    pub fn arrow(&self) -> &'static str {
        match self {
            PriceDirection::Up => "↑",
            PriceDirection::Down => "↓",
        }
    }
}

/// One search result line: index, symbol, name, price and change.
pub fn stock_row(index: usize, stock: &StockInfo) -> String {
    format!(
        "{:>2}. {:<12} {:<28} {:>12} {} {}",
        index + 1,
        stock.symbol,
        stock.name,
        format_inr(stock.price),
        PriceDirection::from_change(stock.change).arrow(),
        format_change(stock.change_percent),
    )
}

/// Multi-line account summary for `whoami`.
pub fn profile(snapshot: &AuthSnapshot) -> String {
    let Some(user) = snapshot.user.as_ref() else {
        return "Not logged in".to_string();
    };

    let mut lines = vec![
        format!("Name:    {}", user.name),
        format!("Email:   {}", user.email),
        format!("User ID: {}", user.id),
        format!("Balance: {}", format_inr(user.balance)),
    ];
    match snapshot.balance_sync {
        BalanceSync::Confirmed => {}
        BalanceSync::Pending => lines.push("         (balance update in progress)".to_string()),
        BalanceSync::Diverged => {
            lines.push("         (balance not confirmed by server)".to_string())
        }
    }
    if !snapshot.verified {
        lines.push("Session restored, not yet verified".to_string());
    } else if let Some(at) = snapshot.last_verified_at {
        lines.push(format!("Verified at {}", at.format("%Y-%m-%d %H:%M:%S UTC")));
    }
    lines.join("\n")
}

/// Pretty JSON for API payloads whose shape the client does not model.
pub fn json(value: &Value) -> String {
    match value {
        Value::Null => "(no data)".to_string(),
        Value::Array(items) if items.is_empty() => "(empty)".to_string(),
        other => serde_json::to_string_pretty(other).unwrap_or_else(|_| other.to_string()),
    }
}
