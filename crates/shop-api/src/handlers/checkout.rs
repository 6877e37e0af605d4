//! Checkout initiation and the gateway notification endpoint.
//!
//! The webhook is the only writer of order status. Signature verification
//! happens before anything else; a mismatch rejects the request without
//! touching any order. After verification every processing failure maps to
//! a generic 500 and the gateway redelivers on its own schedule.

use axum::body::Bytes;
use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::Json;
use serde::Serialize;
use tracing::{error, info, instrument, warn};

use shop_core::{Currency, Order, ShopError};
use shop_razorpay::webhook::{parse_event, verify_signature, EventKind, SIGNATURE_HEADER};

use crate::auth::AuthSession;
use crate::error::ApiResult;
use crate::handlers::cart::resolve_cart;
use crate::state::AppState;

/// Checkout response consumed by the client-side gateway widget
#[derive(Debug, Serialize)]
pub struct CheckoutResponse {
    /// Internal order id
    pub order_id: uuid::Uuid,
    /// Gateway order id to mount the widget with
    pub gateway_order_id: String,
    /// Amount in the smallest currency unit
    pub amount: i64,
    /// ISO currency code
    pub currency: Currency,
    /// Gateway key id for the widget
    pub key_id: String,
}

/// Open a checkout attempt for the caller's cart
#[instrument(skip(state, session), fields(user_id = %session.user_id()))]
pub async fn create(
    State(state): State<AppState>,
    session: AuthSession,
) -> ApiResult<Json<CheckoutResponse>> {
    let cart = resolve_cart(&state, session.user_id()).await?;
    if cart.is_empty() {
        return Err(ShopError::InvalidRequest("cart is empty".to_string()).into());
    }

    let order = Order::new(session.user_id(), cart.total);

    let gateway_order = state
        .gateway
        .create_order(order.amount, &order.receipt, order.id)
        .await?;

    let order = order.with_gateway_order(gateway_order.id.clone());
    state.store.insert_order(&order).await?;

    info!(
        "Opened checkout: order={}, gateway_order={}, amount={}",
        order.id,
        gateway_order.id,
        order.amount.display()
    );

    Ok(Json(CheckoutResponse {
        order_id: order.id,
        gateway_order_id: gateway_order.id,
        amount: order.amount.amount,
        currency: order.amount.currency,
        key_id: state.gateway.key_id().to_string(),
    }))
}

/// Handle a gateway payment notification
#[instrument(skip(state, headers, body))]
pub async fn webhook(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> ApiResult<StatusCode> {
    let signature = headers
        .get(SIGNATURE_HEADER)
        .and_then(|v| v.to_str().ok())
        .ok_or(ShopError::InvalidSignature)?;

    // Authenticity first: nothing below runs on a bad signature.
    verify_signature(state.gateway.webhook_secret(), &body, signature).map_err(|e| {
        error!("Webhook signature rejected: {}", e);
        e
    })?;

    let event = parse_event(&body)?;

    match event.kind {
        EventKind::PaymentCaptured => {
            let Some(order_ref) = event.payment.as_ref().and_then(|p| p.order_ref()) else {
                warn!("Captured event carries no resolvable order reference; skipping");
                return Ok(StatusCode::OK);
            };

            let payment = event.payment_info()?;
            let updated = state.store.mark_order_paid(&order_ref, payment).await?;
            if updated {
                info!("Order marked paid: {:?}", order_ref);
            } else {
                warn!("Captured event matched no order: {:?}", order_ref);
            }
        }
        EventKind::PaymentFailed => {
            let Some(order_ref) = event.payment.as_ref().and_then(|p| p.order_ref()) else {
                warn!("Failed event carries no resolvable order reference; skipping");
                return Ok(StatusCode::OK);
            };

            let updated = state
                .store
                .mark_order_failed(&order_ref, event.raw.clone())
                .await?;
            if updated {
                info!("Order marked failed: {:?}", order_ref);
            } else {
                warn!("Failed event matched no order: {:?}", order_ref);
            }
        }
        EventKind::Other(kind) => {
            // Acknowledge without acting; the gateway sends many kinds we
            // never subscribe to.
            info!("Ignoring gateway event: {}", kind);
        }
    }

    Ok(StatusCode::OK)
}
