use serde::{Deserialize, Serialize};

/// Buy order body for `POST /portfolio/buy`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BuyRequest {
    pub symbol: String,
    pub name: String,
    pub quantity: u32,
    pub price: f64,
}

/// Sell order body for `POST /portfolio/sell`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SellRequest {
    pub symbol: String,
    pub quantity: u32,
    pub price: f64,
}

/// Watchlist entry body for `POST /watchlist`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct WatchlistAddRequest {
    pub symbol: String,
    pub name: String,
}

/// Payment order body for `POST /payment/create-order`
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct CreateOrderRequest {
    pub amount: f64,
}

/// Wallet top-up body for `POST /payment/add-funds`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AddFundsRequest {
    pub amount: f64,
    #[serde(rename = "paymentId")]
    pub payment_id: String,
}

/// Market movers selector for `GET /market/trending`
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum TrendingKind {
    #[default]
    Gainers,
    Losers,
}

impl TrendingKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TrendingKind::Gainers => "gainers",
            TrendingKind::Losers => "losers",
        }
    }
}
