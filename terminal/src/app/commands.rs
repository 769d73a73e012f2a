//! # Prompt Commands
//!
//! Parses one input line into a [`Command`]. Parsing checks shape and number
//! formats only; credential and amount rules live in [`crate::utils::validation`].

use crate::core::error::AppError;
use shared::TrendingKind;

/// Help text printed by `help`.
pub const HELP: &str = "\
Account
  login <email> <password>          sign in
  signup <name> <email> <password>  create an account
  logout                            sign out
  whoami                            show the signed-in profile
  menu                              open or close the profile menu
  refresh                           re-fetch the profile from the server
  balance <amount>                  set the wallet balance
  deposit <amount>                  create a payment order
  confirm <amount> <payment-id> [key=value ...]
                                    verify a completed payment and add funds

Search (local list)
  search <query>                    search stocks by name, symbol or sector
  select <n>                        pick result n from the last search
  <empty line>                      pick the first result

Market
  stocks                            list stocks
  stock <symbol>                    stock details
  chart <symbol> [period]           price history (default 1M)
  find <query>                      server-side search
  trending [gainers|losers]         market movers
  indices                           market indices
  sectors                           sector performance

Portfolio
  portfolio                         holdings
  buy <symbol> <qty> <price>        buy shares
  sell <symbol> <qty> <price>       sell shares
  transactions                      trade history
  watchlist                         watched stocks
  watch <symbol> [name]             add to watchlist
  unwatch <symbol>                  remove from watchlist

  help                              this text
  quit                              exit";

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Help,
    Login { email: String, password: String },
    Signup { name: String, email: String, password: String },
    Logout,
    Whoami,
    Menu,
    Refresh,
    Balance(f64),
    Deposit(f64),
    Confirm { amount: f64, payment_id: String, fields: Vec<(String, String)> },
    Search(String),
    Select(usize),
    SubmitSearch,
    Stocks,
    Stock(String),
    Chart { symbol: String, period: Option<String> },
    Find(String),
    Trending(TrendingKind),
    Indices,
    Sectors,
    Portfolio,
    Buy { symbol: String, quantity: u32, price: f64 },
    Sell { symbol: String, quantity: u32, price: f64 },
    Transactions,
    Watchlist,
    Watch { symbol: String, name: Option<String> },
    Unwatch(String),
    Quit,
}

fn usage(text: &str) -> AppError {
    AppError::Validation(format!("Usage: {}", text))
}

fn number<T: std::str::FromStr>(raw: &str, what: &str) -> Result<T, AppError> {
    raw.parse()
        .map_err(|_| AppError::Validation(format!("Invalid {}: {}", what, raw)))
}

impl Command {
    /// Parse a raw input line (trailing newline allowed).
    ///
    /// An empty line submits the current search. The `search` argument is kept as
    /// typed so the search panel sees exactly what the user entered.
    pub fn parse(line: &str) -> Result<Command, AppError> {
        let line = line.trim_end_matches(['\r', '\n']).trim_start();
        if line.trim().is_empty() {
            return Ok(Command::SubmitSearch);
        }

        let (verb, rest) = line
            .split_once(char::is_whitespace)
            .unwrap_or((line, ""));
        let args: Vec<&str> = rest.split_whitespace().collect();

        let command = match (verb.to_lowercase().as_str(), args.as_slice()) {
            ("help" | "?", _) => Command::Help,
            ("quit" | "exit", _) => Command::Quit,

            ("login", [email, password]) => Command::Login {
                email: email.to_string(),
                password: password.to_string(),
            },
            ("login", _) => return Err(usage("login <email> <password>")),

            ("signup", [name @ .., email, password]) if !name.is_empty() => Command::Signup {
                name: name.join(" "),
                email: email.to_string(),
                password: password.to_string(),
            },
            ("signup", _) => return Err(usage("signup <name> <email> <password>")),

            ("logout", []) => Command::Logout,
            ("whoami", []) => Command::Whoami,
            ("menu", []) => Command::Menu,
            ("refresh", []) => Command::Refresh,

            ("balance", [amount]) => Command::Balance(number(amount, "amount")?),
            ("balance", _) => return Err(usage("balance <amount>")),

            ("deposit", [amount]) => Command::Deposit(number(amount, "amount")?),
            ("deposit", _) => return Err(usage("deposit <amount>")),

            ("confirm", [amount, payment_id, extra @ ..]) => {
                let fields = extra
                    .iter()
                    .map(|pair| {
                        pair.split_once('=')
                            .filter(|(k, _)| !k.is_empty())
                            .map(|(k, v)| (k.to_string(), v.to_string()))
                            .ok_or_else(|| {
                                AppError::Validation(format!("Expected key=value, got: {}", pair))
                            })
                    })
                    .collect::<Result<Vec<_>, _>>()?;
                Command::Confirm {
                    amount: number(amount, "amount")?,
                    payment_id: payment_id.to_string(),
                    fields,
                }
            }
            ("confirm", _) => return Err(usage("confirm <amount> <payment-id> [key=value ...]")),

            ("search", _) if !rest.trim().is_empty() => Command::Search(rest.to_string()),
            ("search", _) => return Err(usage("search <query>")),

            ("select", [n]) => {
                let n: usize = number(n, "result number")?;
                if n == 0 {
                    return Err(AppError::Validation("Results are numbered from 1".to_string()));
                }
                Command::Select(n - 1)
            }
            ("select", _) => return Err(usage("select <n>")),

            ("stocks", []) => Command::Stocks,
            ("stock", [symbol]) => Command::Stock(symbol.to_uppercase()),
            ("stock", _) => return Err(usage("stock <symbol>")),
            ("chart", [symbol]) => Command::Chart {
                symbol: symbol.to_uppercase(),
                period: None,
            },
            ("chart", [symbol, period]) => Command::Chart {
                symbol: symbol.to_uppercase(),
                period: Some(period.to_uppercase()),
            },
            ("chart", _) => return Err(usage("chart <symbol> [period]")),
            ("find", _) if !rest.trim().is_empty() => Command::Find(rest.trim().to_string()),
            ("find", _) => return Err(usage("find <query>")),
            ("trending", []) => Command::Trending(TrendingKind::Gainers),
            ("trending", [kind]) => match kind.to_lowercase().as_str() {
                "gainers" => Command::Trending(TrendingKind::Gainers),
                "losers" => Command::Trending(TrendingKind::Losers),
                _ => return Err(usage("trending [gainers|losers]")),
            },
            ("indices", []) => Command::Indices,
            ("sectors", []) => Command::Sectors,

            ("portfolio", []) => Command::Portfolio,
            ("buy", [symbol, quantity, price]) => Command::Buy {
                symbol: symbol.to_uppercase(),
                quantity: number(quantity, "quantity")?,
                price: number(price, "price")?,
            },
            ("buy", _) => return Err(usage("buy <symbol> <qty> <price>")),
            ("sell", [symbol, quantity, price]) => Command::Sell {
                symbol: symbol.to_uppercase(),
                quantity: number(quantity, "quantity")?,
                price: number(price, "price")?,
            },
            ("sell", _) => return Err(usage("sell <symbol> <qty> <price>")),
            ("transactions", []) => Command::Transactions,
            ("watchlist", []) => Command::Watchlist,
            ("watch", [symbol, name @ ..]) => Command::Watch {
                symbol: symbol.to_uppercase(),
                name: (!name.is_empty()).then(|| name.join(" ")),
            },
            ("watch", _) => return Err(usage("watch <symbol> [name]")),
            ("unwatch", [symbol]) => Command::Unwatch(symbol.to_uppercase()),
            ("unwatch", _) => return Err(usage("unwatch <symbol>")),

            (other, _) => {
                return Err(AppError::Validation(format!(
                    "Unknown command: {} (type 'help')",
                    other
                )))
            }
        };
        Ok(command)
    }

    /// Commands that need a signed-in user.
    pub fn requires_auth(&self) -> bool {
        matches!(
            self,
            Command::Refresh
                | Command::Menu
                | Command::Balance(_)
                | Command::Deposit(_)
                | Command::Confirm { .. }
                | Command::Portfolio
                | Command::Buy { .. }
                | Command::Sell { .. }
                | Command::Transactions
                | Command::Watchlist
                | Command::Watch { .. }
                | Command::Unwatch(_)
        )
    }
}
