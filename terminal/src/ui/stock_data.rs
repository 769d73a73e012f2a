//! Built-in NSE large-cap table used by the local search panel.

/// One row of the static stock table.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StockInfo {
    pub symbol: &'static str,
    pub name: &'static str,
    pub sector: &'static str,
    pub price: f64,
    pub change: f64,
    pub change_percent: f64,
}

impl StockInfo {
    pub fn is_up(&self) -> bool {
        self.change >= 0.0
    }
}

const fn stock(
    symbol: &'static str,
    name: &'static str,
    sector: &'static str,
    price: f64,
    change: f64,
    change_percent: f64,
) -> StockInfo {
    StockInfo {
        symbol,
        name,
        sector,
        price,
        change,
        change_percent,
    }
}

pub static STOCKS: &[StockInfo] = &[
    stock("RELIANCE", "Reliance Industries", "Energy", 2456.75, 23.45, 0.96),
    stock("TCS", "Tata Consultancy Services", "IT", 3678.90, -45.20, -1.21),
    stock("HDFCBANK", "HDFC Bank", "Banking", 1654.30, 12.80, 0.78),
    stock("INFY", "Infosys", "IT", 1456.85, -8.65, -0.59),
    stock("ICICIBANK", "ICICI Bank", "Banking", 945.60, 15.30, 1.64),
    stock("HINDUNILVR", "Hindustan Unilever", "FMCG", 2567.40, -12.35, -0.48),
    stock("ITC", "ITC Limited", "FMCG", 456.25, 3.75, 0.83),
    stock("SBIN", "State Bank of India", "Banking", 598.45, 8.90, 1.51),
    stock("BHARTIARTL", "Bharti Airtel", "Telecom", 876.30, -5.60, -0.63),
    stock("KOTAKBANK", "Kotak Mahindra Bank", "Banking", 1789.55, 21.15, 1.20),
    stock("LT", "Larsen & Toubro", "Infrastructure", 3245.80, 41.25, 1.29),
    stock("AXISBANK", "Axis Bank", "Banking", 1023.70, -6.40, -0.62),
    stock("ASIANPAINT", "Asian Paints", "Paints", 3156.20, -28.75, -0.90),
    stock("MARUTI", "Maruti Suzuki", "Automobile", 10456.35, 112.40, 1.09),
    stock("SUNPHARMA", "Sun Pharmaceutical", "Pharma", 1187.90, 9.85, 0.84),
    stock("TITAN", "Titan Company", "Consumer Goods", 3298.45, -15.60, -0.47),
    stock("WIPRO", "Wipro", "IT", 456.80, 4.20, 0.93),
    stock("ULTRACEMCO", "UltraTech Cement", "Cement", 8765.25, -54.30, -0.62),
    stock("BAJFINANCE", "Bajaj Finance", "Financial Services", 6987.60, 87.45, 1.27),
    stock("TATAMOTORS", "Tata Motors", "Automobile", 678.95, -7.85, -1.14),
];
