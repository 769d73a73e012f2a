//! # Application Orchestrator
//!
//! The [`App`] struct wires configuration, the API client and the session
//! manager together and runs the prompt loop.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────┐      async_channel       ┌─────────────────────┐
//! │ stdin-reader thread          │ ───── AppEvent::Input ─► │ App::run            │
//! └──────────────────────────────┘                          │  tokio::select! {   │
//!                                                           │    events,          │
//! ┌──────────────────────────────┐      watch::Receiver     │    session changes  │
//! │ SessionManager (verification │ ───── AuthSnapshot ────► │  }                  │
//! │ task, login/logout, ...)     │                          └─────────┬───────────┘
//! └──────────────────────────────┘                                    │
//!                                                          handlers::{auth, market, portfolio}
//! ```
//!
//! Commands run one at a time in the loop; session state is shared through
//! `Arc<SessionManager>` so the background verification task can update it while
//! the prompt is waiting.
//!
//! ## Related Modules
//!
//! - [`commands`]: Parsing of prompt lines
//! - [`events`]: Event enum for the main loop

pub mod commands;
pub mod events;
mod handlers;

pub use commands::{Command, HELP};
pub use events::AppEvent;

use crate::core::config::ClientConfig;
use crate::core::error::{AppError, Result};
use crate::services::api::ApiClient;
use crate::services::storage::FileStorage;
use crate::session::{AuthSnapshot, AuthStatus, SessionManager, SessionStore};
use crate::ui::{render, NavPanel};
use async_channel::{unbounded, Receiver, Sender};
use std::sync::Arc;

/// What the loop should do after a command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Flow {
    /// Print the text (if any) and read the next line
    Continue(String),
    Quit,
}

pub struct App {
    config: ClientConfig,
    api: Arc<ApiClient>,
    session: Arc<SessionManager>,
    nav: NavPanel,
    event_tx: Sender<AppEvent>,
    event_rx: Receiver<AppEvent>,
    /// Set by `logout` so the resulting session change is not reported as a revocation
    logging_out: bool,
    last_status: AuthStatus,
}

impl App {
    /// Build the app from configuration, with the session persisted to
    /// `config.session_file`.
    pub fn new(config: ClientConfig) -> Result<Self> {
        config.validate()?;
        let store = SessionStore::new(Arc::new(FileStorage::new(&config.session_file)));
        let api = Arc::new(ApiClient::new(&config, store.clone()));
        let session = Arc::new(SessionManager::new(api.clone(), store));
        Ok(Self::with_parts(config, api, session))
    }

    /// Build the app around an existing client and session manager.
    pub fn with_parts(config: ClientConfig, api: Arc<ApiClient>, session: Arc<SessionManager>) -> Self {
        let (event_tx, event_rx) = unbounded();
        let nav = NavPanel::new(config.search_limit);
        Self {
            config,
            api,
            session,
            nav,
            event_tx,
            event_rx,
            logging_out: false,
            last_status: AuthStatus::Uninitialized,
        }
    }

    pub fn session(&self) -> &Arc<SessionManager> {
        &self.session
    }

    pub fn nav(&self) -> &NavPanel {
        &self.nav
    }

    /// Sender for feeding events into [`Self::run`].
    pub fn event_sender(&self) -> Sender<AppEvent> {
        self.event_tx.clone()
    }

    /// Restore the session, then process events until `quit` or end of input.
    ///
    /// Input is read from whatever feeds [`Self::event_sender`]; the binary attaches
    /// stdin with [`events::spawn_stdin_reader`].
    pub async fn run(mut self) -> Result<()> {
        let mut session_rx = self.session.subscribe();
        let verification = self.session.initialize();
        let snapshot = session_rx.borrow_and_update().clone();
        self.last_status = snapshot.status;

        println!("Stockdesk terminal, type 'help' for commands");
        println!("{}", NavPanel::header(&snapshot));
        if verification.is_some() {
            println!("Verifying saved session...");
        }
        tracing::info!(api = %self.api.base_url(), "Terminal started");

        loop {
            tokio::select! {
                event = self.event_rx.recv() => match event {
                    Ok(AppEvent::Input(line)) => match self.handle_line(&line).await {
                        Ok(Flow::Quit) => break,
                        Ok(Flow::Continue(text)) if text.is_empty() => {}
                        Ok(Flow::Continue(text)) => println!("{}", text),
                        Err(e) => println!("Error: {}", e),
                    },
                    Ok(AppEvent::InputClosed) | Err(_) => break,
                },
                changed = session_rx.changed() => {
                    if changed.is_err() {
                        break;
                    }
                    let snapshot = session_rx.borrow_and_update().clone();
                    if let Some(notice) = self.on_session_change(&snapshot) {
                        println!("{}", notice);
                    }
                }
            }
        }

        if let Some(handle) = verification {
            handle.abort();
        }
        tracing::info!("Terminal stopped");
        Ok(())
    }

    /// Track session transitions; returns a notice when a session was revoked
    /// without the user logging out.
    pub fn on_session_change(&mut self, snapshot: &AuthSnapshot) -> Option<String> {
        let previous = std::mem::replace(&mut self.last_status, snapshot.status);
        if snapshot.status != AuthStatus::Anonymous {
            return None;
        }
        if std::mem::take(&mut self.logging_out) {
            return None;
        }
        (previous == AuthStatus::Authenticated)
            .then(|| "Your session is no longer valid, please log in again".to_string())
    }

    /// Parse and run one prompt line.
    pub async fn handle_line(&mut self, line: &str) -> Result<Flow> {
        let command = Command::parse(line)?;
        if command.requires_auth() && !self.session.is_authenticated() {
            return Err(AppError::Validation("Please log in first".to_string()));
        }
        // Only the verb: arguments may hold credentials
        let verb = line.split_whitespace().next().unwrap_or_default();
        tracing::debug!(verb, "Running command");
        self.execute(command).await
    }

    async fn execute(&mut self, command: Command) -> Result<Flow> {
        use handlers::{auth, market, portfolio};
        let api = self.api.as_ref();
        let session = self.session.as_ref();

        let text = match command {
            Command::Quit => return Ok(Flow::Quit),
            Command::Help => HELP.to_string(),

            Command::Login { email, password } => auth::login(session, &email, &password).await?,
            Command::Signup {
                name,
                email,
                password,
            } => auth::signup(session, &name, &email, &password).await?,
            Command::Logout => {
                if session.is_authenticated() {
                    self.logging_out = true;
                    self.nav.logout(session);
                    "Logged out".to_string()
                } else {
                    "Not logged in".to_string()
                }
            }
            Command::Whoami => auth::whoami(session),
            Command::Menu => {
                if self.nav.toggle_profile() {
                    let snapshot = session.snapshot();
                    format!(
                        "{}\n{}\nType 'logout' to sign out or 'menu' to close",
                        NavPanel::header(&snapshot),
                        render::profile(&snapshot)
                    )
                } else {
                    "Menu closed".to_string()
                }
            }
            Command::Refresh => auth::refresh(session).await?,
            Command::Balance(amount) => auth::set_balance(session, amount).await?,
            Command::Deposit(amount) => auth::deposit(api, amount).await?,
            Command::Confirm {
                amount,
                payment_id,
                fields,
            } => auth::confirm(api, session, amount, &payment_id, &fields).await?,

            Command::Search(query) => market::search(&mut self.nav, &query),
            Command::Select(index) => market::select(api, &mut self.nav, index).await?,
            Command::SubmitSearch => market::submit(api, &mut self.nav).await,
            Command::Stocks => market::stocks(api).await?,
            Command::Stock(symbol) => market::stock(api, &symbol).await?,
            Command::Chart { symbol, period } => {
                market::chart(api, &symbol, period.as_deref()).await?
            }
            Command::Find(query) => market::find(api, &query, self.config.search_limit).await?,
            Command::Trending(kind) => market::trending(api, kind).await?,
            Command::Indices => market::indices(api).await?,
            Command::Sectors => market::sectors(api).await?,

            Command::Portfolio => portfolio::holdings(api).await?,
            Command::Buy {
                symbol,
                quantity,
                price,
            } => portfolio::buy(api, session, &symbol, quantity, price).await?,
            Command::Sell {
                symbol,
                quantity,
                price,
            } => portfolio::sell(api, session, &symbol, quantity, price).await?,
            Command::Transactions => portfolio::transactions(api).await?,
            Command::Watchlist => portfolio::list_watchlist(api).await?,
            Command::Watch { symbol, name } => {
                portfolio::watch(api, &symbol, name.as_deref()).await?
            }
            Command::Unwatch(symbol) => portfolio::unwatch(api, &symbol).await?,
        };
        Ok(Flow::Continue(text))
    }
}
