//! Profile read and partial update.

use axum::extract::State;
use axum::Json;
use tracing::instrument;

use shop_core::{ProfileUpdate, ShopError, User};

use crate::auth::AuthSession;
use crate::error::ApiResult;
use crate::state::AppState;

/// Read the caller's profile
pub async fn profile(State(state): State<AppState>, session: AuthSession) -> ApiResult<Json<User>> {
    let user = state
        .store
        .user_by_id(session.user_id())
        .await?
        .ok_or_else(|| ShopError::not_found("User"))?;

    Ok(Json(user))
}

/// Merge the present fields onto the caller's profile and persist before
/// responding. Email, role and credentials are not reachable through here.
#[instrument(skip(state, session, update), fields(user_id = %session.user_id()))]
pub async fn update_profile(
    State(state): State<AppState>,
    session: AuthSession,
    Json(update): Json<ProfileUpdate>,
) -> ApiResult<Json<User>> {
    if update.is_empty() {
        return Err(ShopError::InvalidRequest("no fields to update".to_string()).into());
    }

    let mut user = state
        .store
        .user_by_id(session.user_id())
        .await?
        .ok_or_else(|| ShopError::not_found("User"))?;

    update.apply(&mut user);
    state.store.update_user(&user).await?;

    Ok(Json(user))
}
