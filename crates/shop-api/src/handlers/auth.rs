//! Signup, login and session introspection.

use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};

use shop_core::{validate_email, validate_password, Address, Role, ShopError, User};

use crate::auth::{hash_password, verify_password, AuthSession};
use crate::error::ApiResult;
use crate::state::AppState;

/// Signup request body
#[derive(Debug, Deserialize)]
pub struct SignupRequest {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub addresses: Vec<Address>,
    #[serde(default)]
    pub role: Option<Role>,
}

/// Login request body
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Token plus the sanitized account record
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub token: String,
    pub user: User,
}

/// Register a new account
#[instrument(skip(state, request), fields(email = %request.email))]
pub async fn signup(
    State(state): State<AppState>,
    Json(request): Json<SignupRequest>,
) -> ApiResult<Json<AuthResponse>> {
    validate_email(&request.email)?;
    validate_password(&request.password)?;

    let password_hash = hash_password(&request.password)?;

    let mut user = User::new(
        request.first_name,
        request.last_name,
        request.email,
        password_hash,
        request.role.unwrap_or_default(),
    );
    user.phone = request.phone;
    user.addresses = request.addresses;

    state.store.create_user(&user).await?;

    info!("Registered account: {}", user.id);

    let token = state.tokens.issue(&user)?;
    Ok(Json(AuthResponse { token, user }))
}

/// Log in with email and password
#[instrument(skip(state, request), fields(email = %request.email))]
pub async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> ApiResult<Json<AuthResponse>> {
    let email = request.email.to_lowercase();

    // A missing account and a wrong password must be indistinguishable.
    let user = state
        .store
        .user_by_email(&email)
        .await?
        .ok_or(ShopError::InvalidCredentials)?;

    verify_password(&request.password, &user.password_hash)?;

    let token = state.tokens.issue(&user)?;
    Ok(Json(AuthResponse { token, user }))
}

/// The sanitized account behind the presented session
pub async fn me(State(state): State<AppState>, session: AuthSession) -> ApiResult<Json<User>> {
    let user = state
        .store
        .user_by_id(session.user_id())
        .await?
        .ok_or_else(|| ShopError::not_found("User"))?;

    Ok(Json(user))
}
