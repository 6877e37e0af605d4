//! # Sessions and Credentials
//!
//! Bearer-token sessions (JWT) and argon2 credential hashing, plus the
//! extractors that gate handlers. Role checks happen here, at the routing
//! layer, instead of ad-hoc string comparisons inside handlers: a handler
//! that takes `AdminSession` cannot be reached by a non-admin.

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use axum::extract::FromRequestParts;
use axum::http::{header, request::Parts};
use chrono::Utc;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use shop_core::{Role, ShopError, ShopResult, User};

use crate::error::ApiError;
use crate::state::AppState;

/// Default session lifetime when `JWT_TTL_HOURS` is unset: one week
const DEFAULT_TTL_HOURS: i64 = 168;

/// Claims carried in a session token
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject: the user id
    pub sub: Uuid,
    /// Account email at issue time
    pub email: String,
    /// Role at issue time
    pub role: Role,
    /// Issued-at, Unix seconds
    pub iat: usize,
    /// Expiry, Unix seconds
    pub exp: usize,
}

/// Issues and verifies session tokens
#[derive(Clone)]
pub struct TokenSigner {
    encoding: EncodingKey,
    decoding: DecodingKey,
    ttl_hours: i64,
}

impl TokenSigner {
    /// Create a signer from a shared secret
    pub fn new(secret: &str, ttl_hours: i64) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            ttl_hours,
        }
    }

    /// Load the signing secret from `JWT_SECRET` / `JWT_TTL_HOURS`
    pub fn from_env() -> ShopResult<Self> {
        dotenvy::dotenv().ok();

        let secret = std::env::var("JWT_SECRET")
            .map_err(|_| ShopError::Configuration("JWT_SECRET not set".to_string()))?;

        let ttl_hours = std::env::var("JWT_TTL_HOURS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(DEFAULT_TTL_HOURS);

        Ok(Self::new(&secret, ttl_hours))
    }

    /// Issue a signed session token for a user
    pub fn issue(&self, user: &User) -> ShopResult<String> {
        let now = Utc::now().timestamp();
        let claims = Claims {
            sub: user.id,
            email: user.email.clone(),
            role: user.role,
            iat: now as usize,
            exp: (now + self.ttl_hours * 3600) as usize,
        };

        encode(&Header::default(), &claims, &self.encoding)
            .map_err(|e| ShopError::Internal(format!("token encoding failed: {}", e)))
    }

    /// Verify a token's signature and expiry, returning its claims
    pub fn verify(&self, token: &str) -> ShopResult<Claims> {
        decode::<Claims>(token, &self.decoding, &Validation::default())
            .map(|data| data.claims)
            .map_err(|_| ShopError::InvalidToken)
    }
}

/// Hash a password with Argon2id
pub fn hash_password(password: &str) -> ShopResult<String> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| ShopError::Internal(format!("password hashing failed: {}", e)))
}

/// Verify a password against a stored hash.
///
/// Any failure collapses to `InvalidCredentials` so callers cannot tell a
/// bad hash from a wrong password.
pub fn verify_password(password: &str, hash: &str) -> ShopResult<()> {
    let parsed = PasswordHash::new(hash).map_err(|_| ShopError::InvalidCredentials)?;
    Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .map_err(|_| ShopError::InvalidCredentials)
}

/// A verified session. Extracting this gates the handler behind a valid
/// bearer token.
#[derive(Debug, Clone)]
pub struct AuthSession {
    pub claims: Claims,
}

impl AuthSession {
    pub fn user_id(&self) -> Uuid {
        self.claims.sub
    }

    pub fn role(&self) -> Role {
        self.claims.role
    }
}

impl FromRequestParts<AppState> for AuthSession {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = bearer_token(parts)?;
        let claims = state.tokens.verify(token)?;
        Ok(AuthSession { claims })
    }
}

/// A verified admin session. Extracting this gates the handler behind the
/// admin role; non-admin callers get a 403 before the handler body runs.
#[derive(Debug, Clone)]
pub struct AdminSession {
    pub session: AuthSession,
}

impl FromRequestParts<AppState> for AdminSession {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let session = AuthSession::from_request_parts(parts, state).await?;
        if !session.role().is_admin() {
            return Err(ShopError::Forbidden("admin access required".to_string()).into());
        }
        Ok(AdminSession { session })
    }
}

/// Pull the token out of `Authorization: Bearer <token>`
fn bearer_token(parts: &Parts) -> Result<&str, ApiError> {
    let value = parts
        .headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .ok_or(ShopError::Unauthorized)?;

    value
        .strip_prefix("Bearer ")
        .filter(|t| !t.is_empty())
        .ok_or_else(|| ShopError::Unauthorized.into())
}
