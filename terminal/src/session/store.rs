//! # Session Store
//!
//! Persistence façade over a [`KeyValueStorage`] backend. A session is stored as
//! two entries: the serialized user profile and the raw bearer token.

use crate::services::storage::{KeyValueStorage, StorageError};
use shared::UserProfile;
use std::sync::Arc;

/// Storage key holding the serialized [`UserProfile`]
pub const USER_KEY: &str = "stockdesk_user";
/// Storage key holding the raw bearer token
pub const TOKEN_KEY: &str = "stockdesk_token";

/// A persisted session.
#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    pub user: UserProfile,
    pub token: String,
}

/// Cheap-to-clone handle over the session entries.
///
/// Shared by the request client (token lookup) and the session manager (writes).
#[derive(Clone)]
pub struct SessionStore {
    storage: Arc<dyn KeyValueStorage>,
}

impl SessionStore {
    pub fn new(storage: Arc<dyn KeyValueStorage>) -> Self {
        Self { storage }
    }

    /// Write both entries.
    pub fn save(&self, user: &UserProfile, token: &str) -> Result<(), StorageError> {
        let user_json = serde_json::to_string(user)?;
        self.storage.set(USER_KEY, &user_json)?;
        self.storage.set(TOKEN_KEY, token)?;
        Ok(())
    }

    /// Replace the stored profile, keeping the token.
    pub fn save_user(&self, user: &UserProfile) -> Result<(), StorageError> {
        let user_json = serde_json::to_string(user)?;
        self.storage.set(USER_KEY, &user_json)
    }

    /// Read the session. Absent unless both entries are present and the profile parses.
    pub fn load(&self) -> Option<Session> {
        let token = self.token()?;
        let user_json = match self.storage.get(USER_KEY) {
            Ok(Some(json)) if !json.is_empty() => json,
            Ok(_) => return None,
            Err(e) => {
                tracing::warn!(error = %e, "Failed to read stored user profile");
                return None;
            }
        };

        match serde_json::from_str::<UserProfile>(&user_json) {
            Ok(user) => Some(Session { user, token }),
            Err(e) => {
                tracing::warn!(error = %e, "Stored user profile is unreadable");
                None
            }
        }
    }

    /// Current bearer token. Empty strings count as absent.
    pub fn token(&self) -> Option<String> {
        match self.storage.get(TOKEN_KEY) {
            Ok(token) => token.filter(|t| !t.is_empty()),
            Err(e) => {
                tracing::warn!(error = %e, "Failed to read stored token");
                None
            }
        }
    }

    /// True when either entry exists, even if the pair is incomplete. Unreadable
    /// storage counts as having entries so it gets cleared.
    pub fn has_entries(&self) -> bool {
        [USER_KEY, TOKEN_KEY]
            .iter()
            .any(|key| !matches!(self.storage.get(key), Ok(None)))
    }

    /// Remove both entries. Both removals are attempted; the first error is returned.
    pub fn clear(&self) -> Result<(), StorageError> {
        let user = self.storage.remove(USER_KEY);
        let token = self.storage.remove(TOKEN_KEY);
        user.and(token)
    }
}

impl std::fmt::Debug for SessionStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionStore").finish_non_exhaustive()
    }
}
