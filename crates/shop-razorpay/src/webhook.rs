//! # Razorpay Webhook Handling
//!
//! Signature verification and payload parsing for gateway notifications.
//! Razorpay signs the raw request body with HMAC-SHA256 using the webhook
//! secret and sends the hex digest in the `x-razorpay-signature` header.

use serde::Deserialize;
use shop_core::{OrderRef, PaymentInfo, ShopError, ShopResult};
use tracing::debug;
use uuid::Uuid;

/// Header carrying the webhook signature
pub const SIGNATURE_HEADER: &str = "x-razorpay-signature";

/// Notification kinds we act on
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventKind {
    /// Payment captured; the order becomes `paid`
    PaymentCaptured,
    /// Payment failed; the order becomes `failed`
    PaymentFailed,
    /// Anything else is acknowledged without touching any order
    Other(String),
}

impl EventKind {
    fn parse(s: &str) -> Self {
        match s {
            "payment.captured" => EventKind::PaymentCaptured,
            "payment.failed" => EventKind::PaymentFailed,
            other => EventKind::Other(other.to_string()),
        }
    }
}

/// A verified, parsed gateway notification
#[derive(Debug, Clone)]
pub struct GatewayEvent {
    /// Event kind
    pub kind: EventKind,

    /// The payment entity, when the event carries one
    pub payment: Option<PaymentEntity>,

    /// Full raw payload, kept for audit
    pub raw: serde_json::Value,
}

/// The payment entity embedded in a notification
#[derive(Debug, Clone, Deserialize)]
pub struct PaymentEntity {
    /// Gateway payment id ("pay_...")
    pub id: String,

    /// Gateway order id ("order_...")
    #[serde(default)]
    pub order_id: Option<String>,

    /// Payment method ("card", "upi", "netbanking", ...)
    #[serde(default)]
    pub method: Option<String>,

    /// Amount in smallest currency unit
    #[serde(default)]
    pub amount: Option<i64>,

    /// Payer email as reported by the gateway
    #[serde(default)]
    pub email: Option<String>,

    /// Notes round-tripped from order creation
    #[serde(default)]
    pub notes: serde_json::Value,
}

impl PaymentEntity {
    /// Resolve which order this notification refers to.
    ///
    /// Prefers our own order id carried through `notes.order_id`; falls
    /// back to the gateway's native order id. `None` when neither is
    /// present, in which case the notification is acknowledged and skipped.
    pub fn order_ref(&self) -> Option<OrderRef> {
        if let Some(id) = self
            .notes
            .get("order_id")
            .and_then(|v| v.as_str())
            .and_then(|s| Uuid::parse_str(s).ok())
        {
            return Some(OrderRef::Internal(id));
        }

        self.order_id.clone().map(OrderRef::Gateway)
    }
}

// Wire shape of a notification envelope
#[derive(Debug, Deserialize)]
struct WebhookEnvelope {
    event: String,
    #[serde(default)]
    payload: WebhookPayload,
}

#[derive(Debug, Default, Deserialize)]
struct WebhookPayload {
    #[serde(default)]
    payment: Option<PaymentWrapper>,
}

#[derive(Debug, Deserialize)]
struct PaymentWrapper {
    entity: PaymentEntity,
}

/// Verify the webhook signature over the raw body.
///
/// Recomputes HMAC-SHA256 with the shared secret and compares against the
/// provided hex digest in constant time. On mismatch nothing else may be
/// done with the payload.
pub fn verify_signature(secret: &str, payload: &[u8], signature: &str) -> ShopResult<()> {
    let expected = compute_hmac_sha256(secret, payload);

    if !constant_time_compare(signature, &expected) {
        return Err(ShopError::InvalidSignature);
    }

    Ok(())
}

/// Parse a verified notification body
pub fn parse_event(payload: &[u8]) -> ShopResult<GatewayEvent> {
    let raw: serde_json::Value = serde_json::from_slice(payload)
        .map_err(|e| ShopError::WebhookParse(format!("invalid JSON: {}", e)))?;

    let envelope: WebhookEnvelope = serde_json::from_value(raw.clone())
        .map_err(|e| ShopError::WebhookParse(format!("unexpected shape: {}", e)))?;

    let kind = EventKind::parse(&envelope.event);
    debug!("Parsed gateway event: {:?}", kind);

    Ok(GatewayEvent {
        kind,
        payment: envelope.payload.payment.map(|p| p.entity),
        raw,
    })
}

impl GatewayEvent {
    /// Build the payment sub-record to attach to a captured order
    pub fn payment_info(&self) -> ShopResult<PaymentInfo> {
        let payment = self.payment.as_ref().ok_or_else(|| {
            ShopError::WebhookParse("event carries no payment entity".to_string())
        })?;

        Ok(PaymentInfo::captured(
            payment.id.clone(),
            payment.method.clone(),
            self.raw.clone(),
        ))
    }
}

/// Compute the hex HMAC-SHA256 digest of a message
pub fn compute_hmac_sha256(secret: &str, message: &[u8]) -> String {
    use hmac::{Hmac, Mac};
    use sha2::Sha256;

    type HmacSha256 = Hmac<Sha256>;

    let mut mac = HmacSha256::new_from_slice(secret.as_bytes())
        .expect("HMAC can take key of any size");
    mac.update(message);
    let result = mac.finalize();
    hex::encode(result.into_bytes())
}

fn constant_time_compare(a: &str, b: &str) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.bytes()
        .zip(b.bytes())
        .fold(0, |acc, (x, y)| acc | (x ^ y))
        == 0
}
