//! # Account Endpoints
//!
//! Login, registration and the user profile.

use super::client::{ApiClient, RequestOptions};
use super::error::RequestError;
use shared::{AuthResponse, LoginRequest, ProfileUpdate, SignupRequest, UserProfile};

/// Log in with email and password.
#[tracing::instrument(skip(client, password), fields(email = %email))]
pub async fn login(
    client: &ApiClient,
    email: String,
    password: String,
) -> Result<AuthResponse, RequestError> {
    tracing::info!("Attempting login");
    let start = std::time::Instant::now();

    let request = LoginRequest { email, password };
    let result = client
        .request::<AuthResponse>("/auth/login", RequestOptions::post(&request)?)
        .await;

    match &result {
        Ok(_) => tracing::info!(duration_ms = start.elapsed().as_millis(), "Login successful"),
        Err(e) => tracing::warn!(error = %e, "Login failed"),
    }
    result
}

/// Register a new account.
#[tracing::instrument(skip(client, password), fields(email = %email))]
pub async fn register(
    client: &ApiClient,
    name: String,
    email: String,
    password: String,
) -> Result<AuthResponse, RequestError> {
    tracing::info!("Attempting registration");

    let request = SignupRequest {
        name,
        email,
        password,
    };
    let result = client
        .request::<AuthResponse>("/auth/register", RequestOptions::post(&request)?)
        .await;

    match &result {
        Ok(_) => tracing::info!("Registration successful"),
        Err(e) => tracing::warn!(error = %e, "Registration failed"),
    }
    result
}

/// Fetch the authenticated user's profile. Doubles as token verification.
pub async fn get_profile(client: &ApiClient) -> Result<UserProfile, RequestError> {
    client.request("/user/profile", RequestOptions::get()).await
}

/// Update the authenticated user's profile and return the server's merged copy.
#[tracing::instrument(skip(client))]
pub async fn update_profile(
    client: &ApiClient,
    update: ProfileUpdate,
) -> Result<UserProfile, RequestError> {
    client
        .request("/user/profile", RequestOptions::put(&update)?)
        .await
}
