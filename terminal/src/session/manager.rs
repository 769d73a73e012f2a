//! # Session Manager
//!
//! The auth context: owns the in-memory session, keeps it consistent with the
//! [`SessionStore`], and runs login, signup, logout, balance updates and profile
//! refreshes through an injected [`ApiService`].
//!
//! ## State Machine
//!
//! ```text
//! Uninitialized ──initialize──► Loading ──┬─ stored session ─► Authenticated (optimistic)
//!                                         │                        │ verify ok  → confirmed
//!                                         │                        │ verify err → Anonymous
//!                                         └─ nothing stored ─► Anonymous
//! ```
//!
//! ## Ordering
//!
//! Every mutating call takes a ticket before touching the network. `epoch` moves on
//! each identity change (login, signup, logout, failed verification); `seq` is
//! monotonic. When a response lands:
//!
//! - identity changes commit only if no newer identity change committed first
//! - profile writes commit only in the epoch they started in, and only if no
//!   newer profile write committed first
//!
//! Late responses are dropped instead of overwriting newer state.

use super::state::{AuthSnapshot, AuthStatus, BalanceSync};
use super::store::SessionStore;
use crate::core::error::{AppError, Result};
use crate::core::service::ApiService;
use crate::services::api::RequestError;
use parking_lot::RwLock;
use shared::{AuthResponse, ProfileUpdate, UserProfile};
use std::sync::Arc;
use tokio::sync::watch;
use tokio::task::JoinHandle;

#[derive(Debug, Clone, Copy)]
struct Ticket {
    epoch: u64,
    seq: u64,
}

#[derive(Debug, Default)]
struct Inner {
    snapshot: AuthSnapshot,
    epoch: u64,
    issued: u64,
    identity_seq: u64,
    committed_seq: u64,
}

impl Inner {
    fn issue(&mut self) -> Ticket {
        self.issued += 1;
        Ticket {
            epoch: self.epoch,
            seq: self.issued,
        }
    }

    fn accepts_identity_change(&self, ticket: Ticket) -> bool {
        ticket.seq > self.identity_seq
    }

    fn accepts_profile_write(&self, ticket: Ticket) -> bool {
        ticket.epoch == self.epoch && ticket.seq >= self.committed_seq
    }

    fn change_identity(&mut self, seq: u64, snapshot: AuthSnapshot) {
        self.epoch += 1;
        self.identity_seq = seq;
        self.committed_seq = self.committed_seq.max(seq);
        self.snapshot = snapshot;
    }
}

/// Explicitly constructed auth context. Share it as `Arc<SessionManager>`.
pub struct SessionManager {
    api: Arc<dyn ApiService>,
    store: SessionStore,
    inner: RwLock<Inner>,
    state_tx: watch::Sender<AuthSnapshot>,
}

impl SessionManager {
    pub fn new(api: Arc<dyn ApiService>, store: SessionStore) -> Self {
        let (state_tx, _) = watch::channel(AuthSnapshot::default());
        Self {
            api,
            store,
            inner: RwLock::new(Inner::default()),
            state_tx,
        }
    }

    /// Restore any persisted session and start verifying it.
    ///
    /// Returns once the restore decision is made (`loading` is false by then). When a
    /// session was restored, the returned handle completes when server verification
    /// has been applied. Must be called inside a Tokio runtime. Calling it again is a no-op.
    pub fn initialize(self: &Arc<Self>) -> Option<JoinHandle<()>> {
        {
            let mut inner = self.inner.write();
            if inner.snapshot.status != AuthStatus::Uninitialized {
                tracing::warn!(status = ?inner.snapshot.status, "Session manager already initialized");
                return None;
            }
            inner.snapshot = AuthSnapshot::loading();
            self.publish(&inner);
        }

        let restored = self.store.load();

        let mut inner = self.inner.write();
        match restored {
            Some(session) => {
                tracing::info!(user_id = %session.user.id, "Restored persisted session");
                inner.snapshot = AuthSnapshot::restored(session.user);
                let ticket = inner.issue();
                self.publish(&inner);
                drop(inner);

                let manager = Arc::clone(self);
                Some(tokio::spawn(async move { manager.verify(ticket).await }))
            }
            None => {
                if self.store.has_entries() {
                    tracing::warn!("Discarding incomplete persisted session");
                    if let Err(e) = self.store.clear() {
                        tracing::warn!(error = %e, "Failed to clear incomplete session");
                    }
                }
                tracing::info!("No persisted session");
                inner.snapshot = AuthSnapshot::anonymous();
                self.publish(&inner);
                None
            }
        }
    }

    /// Check the restored token against the profile endpoint. Failures sign out.
    async fn verify(&self, ticket: Ticket) {
        let result = self.api.get_profile().await;

        let mut inner = self.inner.write();
        match result {
            Ok(profile) => {
                if !inner.accepts_profile_write(ticket) {
                    tracing::debug!("Discarding stale verification result");
                    return;
                }
                if let Err(e) = self.store.save_user(&profile) {
                    tracing::warn!(error = %e, "Failed to persist verified profile");
                }
                inner.committed_seq = ticket.seq;
                inner.snapshot = AuthSnapshot::confirmed(profile);
                tracing::info!("Session verified");
            }
            Err(e) => {
                if inner.epoch != ticket.epoch {
                    tracing::debug!("Ignoring verification failure for a replaced session");
                    return;
                }
                tracing::warn!(
                    error = %e,
                    token_rejected = e.is_unauthorized(),
                    "Session verification failed, signing out"
                );
                // Ranked by when verification started, so a login issued since still wins
                self.end_session(&mut inner, ticket.seq);
            }
        }
        self.publish(&inner);
    }

    /// Log in and persist the returned session.
    ///
    /// Server and network failures come back as [`AppError::Request`] with the
    /// server's message when it sent one.
    pub async fn login(&self, email: &str, password: &str) -> Result<UserProfile> {
        let ticket = self.inner.write().issue();
        let auth = self
            .api
            .login(email.to_string(), password.to_string())
            .await?;
        self.establish(ticket, auth, "Login")
    }

    /// Register and persist the returned session. Same contract as [`Self::login`].
    pub async fn signup(&self, name: &str, email: &str, password: &str) -> Result<UserProfile> {
        let ticket = self.inner.write().issue();
        let auth = self
            .api
            .register(name.to_string(), email.to_string(), password.to_string())
            .await?;
        self.establish(ticket, auth, "Signup")
    }

    fn establish(&self, ticket: Ticket, auth: AuthResponse, action: &str) -> Result<UserProfile> {
        let mut inner = self.inner.write();
        if !inner.accepts_identity_change(ticket) {
            tracing::debug!(action, "Discarding superseded authentication response");
            return Err(AppError::State(format!(
                "{} superseded by a newer session change",
                action
            )));
        }

        // Persist first: if storage fails nothing changes in memory either
        self.store.save(&auth.user, &auth.token)?;

        tracing::info!(user_id = %auth.user.id, action, "Session established");
        inner.change_identity(ticket.seq, AuthSnapshot::confirmed(auth.user.clone()));
        self.publish(&inner);
        Ok(auth.user)
    }

    /// Drop the session from memory and storage. Always succeeds.
    pub fn logout(&self) {
        let mut inner = self.inner.write();
        let seq = inner.issue().seq;
        self.end_session(&mut inner, seq);
        self.publish(&inner);
        tracing::info!("Logged out");
    }

    fn end_session(&self, inner: &mut Inner, seq: u64) {
        if let Err(e) = self.store.clear() {
            tracing::warn!(error = %e, "Failed to clear persisted session");
        }
        inner.change_identity(seq, AuthSnapshot::anonymous());
    }

    /// Set the wallet balance.
    ///
    /// The new value is applied locally and persisted right away (`Pending`), then the
    /// server update is reconciled: success adopts the server's profile (`Confirmed`),
    /// failure keeps the local value and marks it `Diverged`.
    ///
    /// Returns `None` without doing anything when there is no session or the amount
    /// is not finite, and `None` when the session ended before the server answered.
    /// A 2xx answer whose body is not a profile still confirms the local value.
    pub async fn update_balance(&self, new_balance: f64) -> Option<BalanceSync> {
        if !new_balance.is_finite() {
            tracing::warn!(new_balance, "Ignoring non-finite balance");
            return None;
        }

        let ticket = {
            let mut inner = self.inner.write();
            if !inner.snapshot.is_authenticated() || self.store.token().is_none() {
                tracing::debug!("Ignoring balance update without a session");
                return None;
            }
            let user = inner.snapshot.user.as_ref()?.with_balance(new_balance);
            let ticket = inner.issue();

            if let Err(e) = self.store.save_user(&user) {
                tracing::warn!(error = %e, "Failed to persist local balance");
            }
            inner.committed_seq = ticket.seq;
            inner.snapshot.user = Some(user);
            inner.snapshot.balance_sync = BalanceSync::Pending;
            self.publish(&inner);
            ticket
        };

        let result = self
            .api
            .update_profile(ProfileUpdate {
                balance: new_balance,
            })
            .await;

        let mut inner = self.inner.write();
        if inner.epoch != ticket.epoch {
            tracing::debug!(new_balance, "Discarding balance reconciliation for an ended session");
            return None;
        }
        if !inner.accepts_profile_write(ticket) {
            tracing::debug!(new_balance, "Discarding stale balance reconciliation");
            return Some(inner.snapshot.balance_sync);
        }

        match result {
            Ok(profile) => {
                if let Err(e) = self.store.save_user(&profile) {
                    tracing::warn!(error = %e, "Failed to persist confirmed profile");
                }
                inner.snapshot = AuthSnapshot::confirmed(profile);
            }
            Err(RequestError::Decode(e)) => {
                tracing::debug!(error = %e, "Balance update accepted without a profile body");
                inner.snapshot.balance_sync = BalanceSync::Confirmed;
            }
            Err(e) => {
                tracing::warn!(
                    error = %e,
                    new_balance,
                    "Balance update not confirmed by server, keeping local value"
                );
                inner.snapshot.balance_sync = BalanceSync::Diverged;
            }
        }
        self.publish(&inner);
        Some(inner.snapshot.balance_sync)
    }

    /// Re-fetch the profile if a token is stored. Failures leave the session as is.
    pub async fn refresh_user(&self) -> Option<UserProfile> {
        self.store.token()?;
        let ticket = self.inner.write().issue();

        match self.api.get_profile().await {
            Ok(profile) => {
                let mut inner = self.inner.write();
                if !inner.accepts_profile_write(ticket) {
                    tracing::debug!("Discarding stale profile refresh");
                    return None;
                }
                if let Err(e) = self.store.save_user(&profile) {
                    tracing::warn!(error = %e, "Failed to persist refreshed profile");
                }
                inner.committed_seq = ticket.seq;
                inner.snapshot = AuthSnapshot::confirmed(profile.clone());
                self.publish(&inner);
                Some(profile)
            }
            Err(e) => {
                tracing::debug!(error = %e, "Profile refresh failed");
                None
            }
        }
    }

    /// In-memory state as last published.
    pub fn snapshot(&self) -> AuthSnapshot {
        self.inner.read().snapshot.clone()
    }

    /// Authenticated user, or `None` when memory or storage says there is no session.
    pub fn current_user(&self) -> Option<UserProfile> {
        let inner = self.inner.read();
        if !inner.snapshot.is_authenticated() {
            return None;
        }
        self.store.token()?;
        inner.snapshot.user.clone()
    }

    pub fn is_authenticated(&self) -> bool {
        self.current_user().is_some()
    }

    pub fn is_loading(&self) -> bool {
        self.inner.read().snapshot.loading
    }

    /// Receiver that observes every published snapshot.
    pub fn subscribe(&self) -> watch::Receiver<AuthSnapshot> {
        self.state_tx.subscribe()
    }

    pub fn store(&self) -> &SessionStore {
        &self.store
    }

    fn publish(&self, inner: &Inner) {
        self.state_tx.send_replace(inner.snapshot.clone());
    }
}

impl std::fmt::Debug for SessionManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionManager")
            .field("status", &self.inner.read().snapshot.status)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::storage::{KeyValueStorage, MemoryStorage};
    use crate::session::store::{TOKEN_KEY, USER_KEY};
    use async_trait::async_trait;
    use parking_lot::Mutex;
    use shared::UserId;
    use std::collections::VecDeque;
    use tokio::sync::oneshot;

    enum Reply<T> {
        Now(std::result::Result<T, RequestError>),
        Later(oneshot::Receiver<std::result::Result<T, RequestError>>),
    }

    impl<T> Reply<T> {
        async fn resolve(self) -> std::result::Result<T, RequestError> {
            match self {
                Reply::Now(result) => result,
                Reply::Later(rx) => rx
                    .await
                    .unwrap_or_else(|_| Err(RequestError::Transport("reply dropped".to_string()))),
            }
        }
    }

    #[derive(Default)]
    struct MockApi {
        logins: Mutex<VecDeque<Reply<AuthResponse>>>,
        registers: Mutex<VecDeque<Reply<AuthResponse>>>,
        profiles: Mutex<VecDeque<Reply<UserProfile>>>,
        updates: Mutex<VecDeque<Reply<UserProfile>>>,
        update_calls: Mutex<Vec<ProfileUpdate>>,
        profile_calls: Mutex<usize>,
    }

    fn next<T>(queue: &Mutex<VecDeque<Reply<T>>>) -> Reply<T> {
        queue
            .lock()
            .pop_front()
            .unwrap_or_else(|| Reply::Now(Err(RequestError::Transport("no scripted reply".to_string()))))
    }

    #[async_trait]
    impl ApiService for MockApi {
        async fn login(
            &self,
            _email: String,
            _password: String,
        ) -> std::result::Result<AuthResponse, RequestError> {
            next(&self.logins).resolve().await
        }

        async fn register(
            &self,
            _name: String,
            _email: String,
            _password: String,
        ) -> std::result::Result<AuthResponse, RequestError> {
            next(&self.registers).resolve().await
        }

        async fn get_profile(&self) -> std::result::Result<UserProfile, RequestError> {
            *self.profile_calls.lock() += 1;
            next(&self.profiles).resolve().await
        }

        async fn update_profile(
            &self,
            update: ProfileUpdate,
        ) -> std::result::Result<UserProfile, RequestError> {
            self.update_calls.lock().push(update);
            next(&self.updates).resolve().await
        }
    }

    fn user(name: &str, balance: f64) -> UserProfile {
        UserProfile {
            id: UserId::Number(1),
            name: name.to_string(),
            email: "a@b.com".to_string(),
            balance,
            extra: serde_json::Map::new(),
        }
    }

    fn auth(name: &str, token: &str) -> AuthResponse {
        AuthResponse {
            user: user(name, 0.0),
            token: token.to_string(),
            message: None,
        }
    }

    fn unauthorized() -> RequestError {
        RequestError::Server {
            status: 401,
            message: "Invalid token".to_string(),
        }
    }

    struct Fixture {
        api: Arc<MockApi>,
        storage: Arc<MemoryStorage>,
        manager: Arc<SessionManager>,
    }

    fn fixture() -> Fixture {
        let api = Arc::new(MockApi::default());
        let storage = Arc::new(MemoryStorage::new());
        let manager = Arc::new(SessionManager::new(
            api.clone(),
            SessionStore::new(storage.clone()),
        ));
        Fixture {
            api,
            storage,
            manager,
        }
    }

    impl Fixture {
        fn stored_user(&self) -> Option<UserProfile> {
            self.storage
                .get(USER_KEY)
                .unwrap()
                .map(|json| serde_json::from_str(&json).unwrap())
        }

        fn stored_token(&self) -> Option<String> {
            self.storage.get(TOKEN_KEY).unwrap()
        }

        async fn logged_in(&self) {
            self.api.logins.lock().push_back(Reply::Now(Ok(auth("A", "tok1"))));
            self.manager.login("a@b.com", "x").await.unwrap();
        }
    }

    async fn settle() {
        for _ in 0..10 {
            tokio::task::yield_now().await;
        }
    }

    #[tokio::test]
    async fn test_initialize_without_session_is_anonymous() {
        let fx = fixture();
        let handle = fx.manager.initialize();

        assert!(handle.is_none());
        assert!(!fx.manager.is_loading());
        let snapshot = fx.manager.snapshot();
        assert_eq!(snapshot.status, AuthStatus::Anonymous);
        assert_eq!(*fx.api.profile_calls.lock(), 0);
    }

    #[tokio::test]
    async fn test_initialize_with_user_but_no_token_is_anonymous() {
        let fx = fixture();
        fx.storage
            .set(USER_KEY, &serde_json::to_string(&user("A", 10.0)).unwrap())
            .unwrap();

        assert!(fx.manager.initialize().is_none());
        assert_eq!(fx.manager.snapshot().status, AuthStatus::Anonymous);
        assert_eq!(fx.stored_user(), None);
    }

    #[tokio::test]
    async fn test_initialize_with_token_but_no_user_is_anonymous() {
        let fx = fixture();
        fx.storage.set(TOKEN_KEY, "tok1").unwrap();

        assert!(fx.manager.initialize().is_none());
        assert_eq!(fx.manager.snapshot().status, AuthStatus::Anonymous);
        assert_eq!(fx.stored_token(), None);
    }

    #[tokio::test]
    async fn test_restore_is_optimistic_then_verified() {
        let fx = fixture();
        fx.manager.store().save(&user("Cached", 10.0), "tok1").unwrap();
        let (tx, rx) = oneshot::channel();
        fx.api.profiles.lock().push_back(Reply::Later(rx));

        let handle = fx.manager.initialize().expect("verification should start");

        let snapshot = fx.manager.snapshot();
        assert_eq!(snapshot.status, AuthStatus::Authenticated);
        assert!(!snapshot.loading);
        assert!(!snapshot.verified);
        assert_eq!(snapshot.user.unwrap().name, "Cached");

        tx.send(Ok(user("Server", 750.0))).unwrap();
        handle.await.unwrap();

        let snapshot = fx.manager.snapshot();
        assert!(snapshot.verified);
        assert_eq!(snapshot.user.as_ref().unwrap().name, "Server");
        assert_eq!(fx.stored_user().unwrap().balance, 750.0);
        assert_eq!(fx.stored_token().as_deref(), Some("tok1"));
    }

    #[tokio::test]
    async fn test_failed_verification_signs_out() {
        let fx = fixture();
        fx.manager.store().save(&user("Cached", 10.0), "stale").unwrap();
        fx.api.profiles.lock().push_back(Reply::Now(Err(unauthorized())));

        let handle = fx.manager.initialize().unwrap();
        assert!(fx.manager.is_authenticated());

        handle.await.unwrap();

        assert_eq!(fx.manager.snapshot().status, AuthStatus::Anonymous);
        assert!(fx.manager.current_user().is_none());
        assert_eq!(fx.stored_user(), None);
        assert_eq!(fx.stored_token(), None);
    }

    #[tokio::test]
    async fn test_transport_failure_during_verification_signs_out() {
        let fx = fixture();
        fx.manager.store().save(&user("Cached", 10.0), "tok1").unwrap();
        fx.api
            .profiles
            .lock()
            .push_back(Reply::Now(Err(RequestError::Transport("refused".to_string()))));

        fx.manager.initialize().unwrap().await.unwrap();

        assert_eq!(fx.manager.snapshot().status, AuthStatus::Anonymous);
        assert_eq!(fx.stored_token(), None);
    }

    #[tokio::test]
    async fn test_second_initialize_is_noop() {
        let fx = fixture();
        assert!(fx.manager.initialize().is_none());
        fx.manager.store().save(&user("Later", 1.0), "tok1").unwrap();

        assert!(fx.manager.initialize().is_none());
        assert_eq!(fx.manager.snapshot().status, AuthStatus::Anonymous);
    }

    #[tokio::test]
    async fn test_login_persists_session() {
        let fx = fixture();
        fx.manager.initialize();
        fx.api.logins.lock().push_back(Reply::Now(Ok(auth("A", "tok1"))));

        let profile = fx.manager.login("a@b.com", "x").await.unwrap();

        assert_eq!(profile.name, "A");
        let snapshot = fx.manager.snapshot();
        assert_eq!(snapshot.status, AuthStatus::Authenticated);
        assert_eq!(snapshot.user, Some(profile.clone()));
        assert_eq!(fx.stored_user(), Some(profile));
        assert_eq!(fx.stored_token().as_deref(), Some("tok1"));
    }

    #[tokio::test]
    async fn test_login_failure_surfaces_server_message() {
        let fx = fixture();
        fx.manager.initialize();
        fx.api.logins.lock().push_back(Reply::Now(Err(RequestError::Server {
            status: 401,
            message: "Invalid credentials".to_string(),
        })));

        let err = fx.manager.login("a@b.com", "wrong").await.unwrap_err();

        assert_eq!(err.to_string(), "Invalid credentials");
        assert_eq!(fx.manager.snapshot().status, AuthStatus::Anonymous);
        assert_eq!(fx.stored_token(), None);
    }

    #[tokio::test]
    async fn test_signup_persists_session() {
        let fx = fixture();
        fx.api.registers.lock().push_back(Reply::Now(Ok(auth("New", "tok9"))));

        let profile = fx.manager.signup("New", "a@b.com", "secret").await.unwrap();

        assert_eq!(profile.name, "New");
        assert!(fx.manager.is_authenticated());
        assert_eq!(fx.stored_token().as_deref(), Some("tok9"));
    }

    #[tokio::test]
    async fn test_logout_clears_everything() {
        let fx = fixture();
        fx.logged_in().await;

        fx.manager.logout();

        assert_eq!(fx.manager.snapshot().status, AuthStatus::Anonymous);
        assert!(fx.manager.snapshot().user.is_none());
        assert_eq!(fx.stored_user(), None);
        assert_eq!(fx.stored_token(), None);

        // Logging out again is harmless
        fx.manager.logout();
        assert_eq!(fx.manager.snapshot().status, AuthStatus::Anonymous);
    }

    #[tokio::test]
    async fn test_balance_update_failure_keeps_local_value() {
        let fx = fixture();
        fx.logged_in().await;
        fx.api
            .updates
            .lock()
            .push_back(Reply::Now(Err(RequestError::Transport("refused".to_string()))));

        let sync = fx.manager.update_balance(5000.0).await;

        assert_eq!(sync, Some(BalanceSync::Diverged));
        assert_eq!(fx.manager.current_user().unwrap().balance, 5000.0);
        assert_eq!(fx.stored_user().unwrap().balance, 5000.0);
        assert_eq!(fx.manager.snapshot().balance_sync, BalanceSync::Diverged);
    }

    #[tokio::test]
    async fn test_balance_update_success_adopts_server_profile() {
        let fx = fixture();
        fx.logged_in().await;
        let mut server = user("A", 5000.0);
        server.extra.insert("plan".to_string(), serde_json::json!("gold"));
        fx.api.updates.lock().push_back(Reply::Now(Ok(server.clone())));

        let sync = fx.manager.update_balance(5000.0).await;

        assert_eq!(sync, Some(BalanceSync::Confirmed));
        assert_eq!(fx.manager.current_user(), Some(server.clone()));
        assert_eq!(fx.stored_user(), Some(server));
        assert_eq!(fx.api.update_calls.lock()[0], ProfileUpdate { balance: 5000.0 });
    }

    #[tokio::test]
    async fn test_balance_update_is_pending_while_in_flight() {
        let fx = fixture();
        fx.logged_in().await;
        let (tx, rx) = oneshot::channel();
        fx.api.updates.lock().push_back(Reply::Later(rx));

        let manager = fx.manager.clone();
        let task = tokio::spawn(async move { manager.update_balance(42.0).await });
        settle().await;

        let snapshot = fx.manager.snapshot();
        assert_eq!(snapshot.balance(), Some(42.0));
        assert_eq!(snapshot.balance_sync, BalanceSync::Pending);

        tx.send(Ok(user("A", 42.0))).unwrap();
        assert_eq!(task.await.unwrap(), Some(BalanceSync::Confirmed));
    }

    #[tokio::test]
    async fn test_balance_update_without_session_is_noop() {
        let fx = fixture();
        fx.manager.initialize();

        assert_eq!(fx.manager.update_balance(5000.0).await, None);
        assert!(fx.api.update_calls.lock().is_empty());
        assert_eq!(fx.stored_user(), None);
    }

    #[tokio::test]
    async fn test_non_finite_balance_is_ignored() {
        let fx = fixture();
        fx.logged_in().await;

        assert_eq!(fx.manager.update_balance(f64::NAN).await, None);
        assert_eq!(fx.manager.current_user().unwrap().balance, 0.0);
    }

    #[tokio::test]
    async fn test_stale_balance_response_does_not_win() {
        let fx = fixture();
        fx.logged_in().await;
        let (tx_first, rx_first) = oneshot::channel();
        let (tx_second, rx_second) = oneshot::channel();
        fx.api.updates.lock().push_back(Reply::Later(rx_first));
        fx.api.updates.lock().push_back(Reply::Later(rx_second));

        let manager = fx.manager.clone();
        let first = tokio::spawn(async move { manager.update_balance(100.0).await });
        settle().await;
        let manager = fx.manager.clone();
        let second = tokio::spawn(async move { manager.update_balance(200.0).await });
        settle().await;

        tx_second.send(Ok(user("A", 200.0))).unwrap();
        assert_eq!(second.await.unwrap(), Some(BalanceSync::Confirmed));

        tx_first.send(Ok(user("A", 100.0))).unwrap();
        first.await.unwrap();

        assert_eq!(fx.manager.current_user().unwrap().balance, 200.0);
        assert_eq!(fx.stored_user().unwrap().balance, 200.0);
    }

    #[tokio::test]
    async fn test_login_response_after_logout_is_discarded() {
        let fx = fixture();
        fx.manager.initialize();
        let (tx, rx) = oneshot::channel();
        fx.api.logins.lock().push_back(Reply::Later(rx));

        let manager = fx.manager.clone();
        let login = tokio::spawn(async move { manager.login("a@b.com", "x").await });
        settle().await;

        fx.manager.logout();
        tx.send(Ok(auth("A", "tok1"))).unwrap();

        let result = login.await.unwrap();
        assert!(matches!(result, Err(AppError::State(_))));
        assert_eq!(fx.manager.snapshot().status, AuthStatus::Anonymous);
        assert_eq!(fx.stored_token(), None);
    }

    #[tokio::test]
    async fn test_failed_verification_does_not_cancel_newer_login() {
        let fx = fixture();
        fx.manager.store().save(&user("Cached", 10.0), "expired").unwrap();
        let (verify_tx, verify_rx) = oneshot::channel();
        let (login_tx, login_rx) = oneshot::channel();
        fx.api.profiles.lock().push_back(Reply::Later(verify_rx));
        fx.api.logins.lock().push_back(Reply::Later(login_rx));

        let verification = fx.manager.initialize().unwrap();
        let manager = fx.manager.clone();
        let login = tokio::spawn(async move { manager.login("b@b.com", "x").await });
        settle().await;

        verify_tx.send(Err(unauthorized())).unwrap();
        verification.await.unwrap();
        assert_eq!(fx.manager.snapshot().status, AuthStatus::Anonymous);

        login_tx.send(Ok(auth("B", "tok2"))).unwrap();
        let user = login.await.unwrap().unwrap();

        assert_eq!(user.name, "B");
        assert_eq!(fx.manager.snapshot().status, AuthStatus::Authenticated);
        assert_eq!(fx.manager.current_user().unwrap().name, "B");
        assert_eq!(fx.stored_token().as_deref(), Some("tok2"));
    }

    #[tokio::test]
    async fn test_balance_response_after_logout_reports_no_session() {
        let fx = fixture();
        fx.logged_in().await;
        let (tx, rx) = oneshot::channel();
        fx.api.updates.lock().push_back(Reply::Later(rx));

        let manager = fx.manager.clone();
        let update = tokio::spawn(async move { manager.update_balance(900.0).await });
        settle().await;

        fx.manager.logout();
        tx.send(Ok(user("A", 900.0))).unwrap();

        assert_eq!(update.await.unwrap(), None);
        assert_eq!(fx.manager.snapshot().status, AuthStatus::Anonymous);
        assert_eq!(fx.stored_user(), None);
    }

    #[tokio::test]
    async fn test_balance_update_with_unexpected_body_is_confirmed() {
        let fx = fixture();
        fx.logged_in().await;
        fx.api
            .updates
            .lock()
            .push_back(Reply::Now(Err(RequestError::Decode("expected a profile".to_string()))));

        let sync = fx.manager.update_balance(750.0).await;

        assert_eq!(sync, Some(BalanceSync::Confirmed));
        assert_eq!(fx.manager.current_user().unwrap().balance, 750.0);
        assert_eq!(fx.stored_user().unwrap().balance, 750.0);
    }

    #[tokio::test]
    async fn test_late_verification_does_not_override_newer_balance() {
        let fx = fixture();
        fx.manager.store().save(&user("Cached", 10.0), "tok1").unwrap();
        let (tx, rx) = oneshot::channel();
        fx.api.profiles.lock().push_back(Reply::Later(rx));
        fx.api
            .updates
            .lock()
            .push_back(Reply::Now(Err(RequestError::Transport("refused".to_string()))));

        let handle = fx.manager.initialize().unwrap();
        fx.manager.update_balance(5000.0).await;

        tx.send(Ok(user("Cached", 10.0))).unwrap();
        handle.await.unwrap();

        assert_eq!(fx.manager.current_user().unwrap().balance, 5000.0);
        assert_eq!(fx.manager.snapshot().balance_sync, BalanceSync::Diverged);
    }

    #[tokio::test]
    async fn test_refresh_failure_keeps_session() {
        let fx = fixture();
        fx.logged_in().await;
        let before = fx.manager.snapshot();
        fx.api.profiles.lock().push_back(Reply::Now(Err(unauthorized())));

        assert!(fx.manager.refresh_user().await.is_none());

        assert_eq!(fx.manager.snapshot(), before);
        assert_eq!(fx.stored_token().as_deref(), Some("tok1"));
    }

    #[tokio::test]
    async fn test_refresh_success_replaces_profile() {
        let fx = fixture();
        fx.logged_in().await;
        fx.api.profiles.lock().push_back(Reply::Now(Ok(user("A", 321.0))));

        let profile = fx.manager.refresh_user().await.unwrap();

        assert_eq!(profile.balance, 321.0);
        assert_eq!(fx.manager.current_user().unwrap().balance, 321.0);
        assert_eq!(fx.stored_user().unwrap().balance, 321.0);
    }

    #[tokio::test]
    async fn test_refresh_without_token_skips_network() {
        let fx = fixture();
        fx.manager.initialize();

        assert!(fx.manager.refresh_user().await.is_none());
        assert_eq!(*fx.api.profile_calls.lock(), 0);
    }

    #[tokio::test]
    async fn test_missing_token_means_not_authenticated() {
        let fx = fixture();
        fx.logged_in().await;

        fx.storage.remove(TOKEN_KEY).unwrap();

        assert!(fx.manager.current_user().is_none());
        assert!(!fx.manager.is_authenticated());
    }

    #[tokio::test]
    async fn test_subscribers_see_changes() {
        let fx = fixture();
        let mut rx = fx.manager.subscribe();
        fx.manager.initialize();
        assert!(rx.has_changed().unwrap());
        assert_eq!(rx.borrow_and_update().status, AuthStatus::Anonymous);

        fx.logged_in().await;
        assert!(rx.has_changed().unwrap());
        assert_eq!(rx.borrow_and_update().user.as_ref().unwrap().name, "A");

        fx.manager.logout();
        assert_eq!(rx.borrow_and_update().status, AuthStatus::Anonymous);
    }
}
