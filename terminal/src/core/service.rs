//! # Service Traits
//!
//! Seams for dependency injection, enabling the session manager to be tested
//! without a network.

use crate::services::api::RequestError;
use async_trait::async_trait;
use shared::{AuthResponse, ProfileUpdate, UserProfile};

/// Account endpoints the session manager depends on.
///
/// Implementations attach the stored bearer token themselves; callers never pass it.
#[async_trait]
pub trait ApiService: Send + Sync {
    /// `POST /auth/login`
    async fn login(&self, email: String, password: String) -> Result<AuthResponse, RequestError>;

    /// `POST /auth/register`
    async fn register(
        &self,
        name: String,
        email: String,
        password: String,
    ) -> Result<AuthResponse, RequestError>;

    /// `GET /user/profile`, also used to verify a restored token
    async fn get_profile(&self) -> Result<UserProfile, RequestError>;

    /// `PUT /user/profile`
    async fn update_profile(&self, update: ProfileUpdate) -> Result<UserProfile, RequestError>;
}
