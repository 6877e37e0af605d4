//! Cart read and mutation. All endpoints are session-gated; the merge rule
//! (duplicate adds accumulate) lives in the store as an atomic upsert.

use axum::extract::{Path, State};
use axum::Json;
use serde::Deserialize;
use tracing::instrument;
use uuid::Uuid;

use shop_core::{CartLine, CartView, ShopError, ShopResult};

use crate::auth::AuthSession;
use crate::error::ApiResult;
use crate::state::AppState;

/// Add-item request body
#[derive(Debug, Deserialize)]
pub struct AddItemRequest {
    pub product_id: Uuid,
    #[serde(default = "default_quantity")]
    pub quantity: u32,
}

fn default_quantity() -> u32 {
    1
}

/// Quantity update request body
#[derive(Debug, Deserialize)]
pub struct UpdateQuantityRequest {
    pub product_id: Uuid,
    pub quantity: u32,
}

/// Read the cart with product details resolved
pub async fn read(State(state): State<AppState>, session: AuthSession) -> ApiResult<Json<CartView>> {
    let view = resolve_cart(&state, session.user_id()).await?;
    Ok(Json(view))
}

/// Add a product; duplicate adds accumulate quantity
#[instrument(skip(state, session, request), fields(user_id = %session.user_id()))]
pub async fn add_item(
    State(state): State<AppState>,
    session: AuthSession,
    Json(request): Json<AddItemRequest>,
) -> ApiResult<Json<CartView>> {
    if request.quantity == 0 {
        return Err(ShopError::InvalidRequest("quantity must be at least 1".to_string()).into());
    }

    // The product must exist before it can be carted.
    state
        .store
        .product_by_id(request.product_id)
        .await?
        .ok_or_else(|| ShopError::not_found("Product"))?;

    state
        .store
        .add_cart_item(session.user_id(), request.product_id, request.quantity)
        .await?;

    let view = resolve_cart(&state, session.user_id()).await?;
    Ok(Json(view))
}

/// Set an entry to an exact quantity; zero removes it
#[instrument(skip(state, session, request), fields(user_id = %session.user_id()))]
pub async fn update_quantity(
    State(state): State<AppState>,
    session: AuthSession,
    Json(request): Json<UpdateQuantityRequest>,
) -> ApiResult<Json<CartView>> {
    state
        .store
        .set_cart_quantity(session.user_id(), request.product_id, request.quantity)
        .await?;

    let view = resolve_cart(&state, session.user_id()).await?;
    Ok(Json(view))
}

/// Remove a product; absent products are a silent no-op
#[instrument(skip(state, session), fields(user_id = %session.user_id()))]
pub async fn remove_item(
    State(state): State<AppState>,
    session: AuthSession,
    Path(product_id): Path<Uuid>,
) -> ApiResult<Json<CartView>> {
    state
        .store
        .remove_cart_item(session.user_id(), product_id)
        .await?;

    let view = resolve_cart(&state, session.user_id()).await?;
    Ok(Json(view))
}

/// Join cart entries with their product records
pub(crate) async fn resolve_cart(state: &AppState, user_id: Uuid) -> ShopResult<CartView> {
    let entries = state.store.cart_entries(user_id).await?;

    let mut lines = Vec::with_capacity(entries.len());
    for entry in entries {
        if let Some(product) = state.store.product_by_id(entry.product_id).await? {
            lines.push(CartLine::from_product(&product, entry.quantity));
        }
    }

    Ok(CartView::new(lines))
}
