//! # Auth State Types
//!
//! The observable state of a [`SessionManager`](super::SessionManager).

use chrono::{DateTime, Utc};
use shared::UserProfile;

/// Lifecycle of the auth context.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AuthStatus {
    /// `initialize` has not run
    #[default]
    Uninitialized,
    /// Reading the persisted session
    Loading,
    /// A session is active (possibly not yet server-confirmed, see [`AuthSnapshot::verified`])
    Authenticated,
    /// No session
    Anonymous,
}

/// Reconciliation state of the last local balance change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BalanceSync {
    /// Balance matches the last server response
    #[default]
    Confirmed,
    /// Applied locally, server update in flight
    Pending,
    /// The server rejected or never received the update; the local value stands
    Diverged,
}

/// Point-in-time copy of the auth context.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct AuthSnapshot {
    pub status: AuthStatus,
    pub user: Option<UserProfile>,
    pub loading: bool,
    /// The profile came from (or was confirmed by) the server in this process
    pub verified: bool,
    pub balance_sync: BalanceSync,
    pub last_verified_at: Option<DateTime<Utc>>,
}

impl AuthSnapshot {
    pub(crate) fn loading() -> Self {
        Self {
            status: AuthStatus::Loading,
            loading: true,
            ..Self::default()
        }
    }

    pub(crate) fn anonymous() -> Self {
        Self {
            status: AuthStatus::Anonymous,
            ..Self::default()
        }
    }

    /// Restored from storage, waiting on verification.
    pub(crate) fn restored(user: UserProfile) -> Self {
        Self {
            status: AuthStatus::Authenticated,
            user: Some(user),
            ..Self::default()
        }
    }

    /// Server-confirmed profile.
    pub(crate) fn confirmed(user: UserProfile) -> Self {
        Self {
            status: AuthStatus::Authenticated,
            user: Some(user),
            loading: false,
            verified: true,
            balance_sync: BalanceSync::Confirmed,
            last_verified_at: Some(Utc::now()),
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.status == AuthStatus::Authenticated && self.user.is_some()
    }

    pub fn balance(&self) -> Option<f64> {
        self.user.as_ref().map(|u| u.balance)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::UserId;

    fn user() -> UserProfile {
        UserProfile {
            id: UserId::Number(1),
            name: "A".to_string(),
            email: "a@b.com".to_string(),
            balance: 10.0,
            extra: serde_json::Map::new(),
        }
    }

    #[test]
    fn test_default_is_uninitialized() {
        let snapshot = AuthSnapshot::default();
        assert_eq!(snapshot.status, AuthStatus::Uninitialized);
        assert!(!snapshot.is_authenticated());
        assert_eq!(snapshot.balance(), None);
    }

    #[test]
    fn test_restored_is_optimistic() {
        let snapshot = AuthSnapshot::restored(user());
        assert!(snapshot.is_authenticated());
        assert!(!snapshot.verified);
        assert!(snapshot.last_verified_at.is_none());
    }

    #[test]
    fn test_confirmed_is_verified() {
        let snapshot = AuthSnapshot::confirmed(user());
        assert!(snapshot.verified);
        assert_eq!(snapshot.balance(), Some(10.0));
        assert!(snapshot.last_verified_at.is_some());
    }
}
