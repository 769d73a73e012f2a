use serde::{Deserialize, Serialize};
use std::fmt;

/// Login request
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Registration request
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SignupRequest {
    pub name: String,
    pub email: String,
    pub password: String,
}

/// Authentication response (login/register success)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AuthResponse {
    pub user: UserProfile,
    pub token: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// User identifier. The API has served both numeric and string ids.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(untagged)]
pub enum UserId {
    Number(i64),
    Text(String),
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UserId::Number(n) => write!(f, "{}", n),
            UserId::Text(s) => f.write_str(s),
        }
    }
}

/// Server-owned user record.
///
/// `balance` is the only field the client mutates on its own. Every other field the
/// server sends is carried in `extra` untouched, so re-serializing a cached profile
/// writes back exactly what the server returned.
///
/// The id is read from `id`, or from `_id` when only that is present. When both are
/// sent, `_id` stays in `extra`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(try_from = "WireProfile")]
pub struct UserProfile {
    pub id: UserId,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub balance: f64,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

#[derive(Deserialize)]
struct WireProfile {
    #[serde(default)]
    id: Option<UserId>,
    #[serde(default, rename = "_id")]
    mongo_id: Option<UserId>,
    name: String,
    email: String,
    #[serde(default)]
    balance: f64,
    #[serde(flatten)]
    extra: serde_json::Map<String, serde_json::Value>,
}

impl TryFrom<WireProfile> for UserProfile {
    type Error = String;

    fn try_from(wire: WireProfile) -> Result<Self, Self::Error> {
        let mut extra = wire.extra;
        let id = match (wire.id, wire.mongo_id) {
            (Some(id), Some(mongo_id)) => {
                extra.insert("_id".to_string(), mongo_id.into());
                id
            }
            (Some(id), None) | (None, Some(id)) => id,
            (None, None) => return Err("missing field `id`".to_string()),
        };

        Ok(Self {
            id,
            name: wire.name,
            email: wire.email,
            balance: wire.balance,
            extra,
        })
    }
}

impl From<UserId> for serde_json::Value {
    fn from(id: UserId) -> Self {
        match id {
            UserId::Number(n) => n.into(),
            UserId::Text(s) => s.into(),
        }
    }
}

impl UserProfile {
    /// Copy of this profile with a different balance.
    pub fn with_balance(&self, balance: f64) -> Self {
        Self {
            balance,
            ..self.clone()
        }
    }
}

/// Profile update body for `PUT /user/profile`
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct ProfileUpdate {
    pub balance: f64,
}

/// Error body returned with non-success responses.
///
/// The API normally uses `message`; some handlers answer with `error` instead.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ErrorResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ErrorResponse {
    /// First non-blank human-readable message in the body.
    pub fn into_message(self) -> Option<String> {
        self.message
            .into_iter()
            .chain(self.error)
            .find(|m| !m.trim().is_empty())
    }
}
