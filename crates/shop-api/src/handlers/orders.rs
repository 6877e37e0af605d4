//! Order history. Admins can widen the listing to every order with
//! `?all=true`.

use axum::extract::{Query, State};
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;

use shop_core::ShopError;

use crate::auth::AuthSession;
use crate::error::ApiResult;
use crate::state::AppState;

/// Listing query parameters
#[derive(Debug, Default, Deserialize)]
pub struct OrdersQuery {
    #[serde(default)]
    pub all: Option<bool>,
}

/// The caller's orders, newest first; admins may request all orders
pub async fn my_orders(
    State(state): State<AppState>,
    session: AuthSession,
    Query(query): Query<OrdersQuery>,
) -> ApiResult<impl IntoResponse> {
    let orders = if query.all.unwrap_or(false) {
        if !session.role().is_admin() {
            return Err(ShopError::Forbidden("admin access required".to_string()).into());
        }
        state.store.all_orders().await?
    } else {
        state.store.orders_for_user(session.user_id()).await?
    };

    let count = orders.len();
    Ok(Json(serde_json::json!({
        "orders": orders,
        "count": count
    })))
}
