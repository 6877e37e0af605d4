//! # Order Types
//!
//! An order is one checkout attempt. It is created `Pending` when checkout
//! is initiated and only the gateway notification handler moves it on, to
//! `Paid` or `Failed`. There is no path back to `Pending`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{ShopError, ShopResult};
use crate::product::Price;

/// Order lifecycle status (closed set)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    /// Initial state, awaiting the gateway outcome
    Pending,
    /// Payment captured
    Paid,
    /// Payment failed
    Failed,
}

impl OrderStatus {
    /// Returns the wire tag for this status
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "pending",
            OrderStatus::Paid => "paid",
            OrderStatus::Failed => "failed",
        }
    }

    /// Parse a status tag
    pub fn parse(s: &str) -> ShopResult<Self> {
        match s {
            "pending" => Ok(OrderStatus::Pending),
            "paid" => Ok(OrderStatus::Paid),
            "failed" => Ok(OrderStatus::Failed),
            other => Err(ShopError::Internal(format!("unknown order status: {}", other))),
        }
    }

    /// `Paid` and `Failed` are terminal
    pub fn is_terminal(&self) -> bool {
        !matches!(self, OrderStatus::Pending)
    }
}

impl Default for OrderStatus {
    fn default() -> Self {
        OrderStatus::Pending
    }
}

/// Payment sub-record attached by the gateway notification handler.
///
/// A captured payment carries the gateway payment id, captured flag and
/// method; a failed payment carries the raw payload only.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentInfo {
    /// Gateway payment id
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment_id: Option<String>,

    /// Whether the gateway reported the amount as captured
    #[serde(default)]
    pub captured: bool,

    /// Payment method ("card", "upi", ...) as reported by the gateway
    #[serde(skip_serializing_if = "Option::is_none")]
    pub method: Option<String>,

    /// Full raw gateway payload, kept for audit
    pub raw: serde_json::Value,
}

impl PaymentInfo {
    /// Sub-record for a captured payment
    pub fn captured(
        payment_id: impl Into<String>,
        method: Option<String>,
        raw: serde_json::Value,
    ) -> Self {
        Self {
            payment_id: Some(payment_id.into()),
            captured: true,
            method,
            raw,
        }
    }

    /// Sub-record for a failed payment: raw payload only
    pub fn failed(raw: serde_json::Value) -> Self {
        Self {
            payment_id: None,
            captured: false,
            method: None,
            raw,
        }
    }
}

/// A checkout attempt tied to a user
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    /// Unique order id
    pub id: Uuid,

    /// Owning user
    pub user_id: Uuid,

    /// Short human-readable reference passed to the gateway
    pub receipt: String,

    /// Amount to collect
    pub amount: Price,

    /// Lifecycle status
    #[serde(default)]
    pub status: OrderStatus,

    /// Gateway's own order id, set once the gateway order is created
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gateway_order_id: Option<String>,

    /// Payment sub-record, set by the notification handler
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment: Option<PaymentInfo>,

    /// Created timestamp
    pub created_at: DateTime<Utc>,

    /// Last update timestamp
    pub updated_at: DateTime<Utc>,
}

impl Order {
    /// Create a new pending order with a generated id and receipt
    pub fn new(user_id: Uuid, amount: Price) -> Self {
        let id = Uuid::new_v4();
        let now = Utc::now();
        Self {
            id,
            user_id,
            receipt: receipt_for(id),
            amount,
            status: OrderStatus::Pending,
            gateway_order_id: None,
            payment: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Builder: attach the gateway order id
    pub fn with_gateway_order(mut self, gateway_order_id: impl Into<String>) -> Self {
        self.gateway_order_id = Some(gateway_order_id.into());
        self
    }
}

/// How a gateway notification refers to an order: either our own id carried
/// through gateway metadata, or the gateway's native order id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OrderRef {
    /// Internal order id round-tripped through gateway notes
    Internal(Uuid),
    /// The gateway's own order id
    Gateway(String),
}

/// Derive the short receipt reference from an order id
fn receipt_for(id: Uuid) -> String {
    format!("rcpt_{}", &id.simple().to_string()[..12])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::product::Currency;

    #[test]
    fn test_new_order_is_pending() {
        let order = Order::new(Uuid::new_v4(), Price::new(999.0, Currency::INR));
        assert_eq!(order.status, OrderStatus::Pending);
        assert!(order.payment.is_none());
        assert!(order.receipt.starts_with("rcpt_"));
        assert_eq!(order.receipt.len(), "rcpt_".len() + 12);
    }

    #[test]
    fn test_status_round_trip() {
        for status in [OrderStatus::Pending, OrderStatus::Paid, OrderStatus::Failed] {
            assert_eq!(OrderStatus::parse(status.as_str()).unwrap(), status);
        }
        assert!(OrderStatus::parse("refunded").is_err());
    }

    #[test]
    fn test_terminal_states() {
        assert!(!OrderStatus::Pending.is_terminal());
        assert!(OrderStatus::Paid.is_terminal());
        assert!(OrderStatus::Failed.is_terminal());
    }

    #[test]
    fn test_gateway_order_builder() {
        let order = Order::new(Uuid::new_v4(), Price::new(500.0, Currency::INR))
            .with_gateway_order("order_N5X2Ab9qkQ4LQ1");
        assert_eq!(order.gateway_order_id.as_deref(), Some("order_N5X2Ab9qkQ4LQ1"));
    }
}
