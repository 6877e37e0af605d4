//! # Cart Types
//!
//! A cart is the per-user set of `(product, quantity)` entries. Persistence
//! enforces the merge rule (duplicate adds accumulate quantity); the types
//! here model entries and the resolved view returned to clients.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::product::{Price, Product};

/// One entry in a user's cart
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartEntry {
    /// Product reference
    pub product_id: Uuid,

    /// Quantity, always >= 1 once stored
    pub quantity: u32,
}

/// A cart entry with its product details resolved
#[derive(Debug, Clone, Serialize)]
pub struct CartLine {
    pub product_id: Uuid,
    pub name: String,
    pub slug: String,

    /// Price the customer pays per unit (discounted when applicable)
    pub unit_price: Price,

    pub quantity: u32,

    /// First product image, for cart thumbnails
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

impl CartLine {
    /// Resolve an entry against its product record
    pub fn from_product(product: &Product, quantity: u32) -> Self {
        Self {
            product_id: product.id,
            name: product.name.clone(),
            slug: product.slug.clone(),
            unit_price: product.effective_price(),
            quantity,
            image_url: product.images.first().map(|i| i.url.clone()),
        }
    }

    /// Line total
    pub fn total(&self) -> Price {
        Price {
            amount: self.unit_price.amount * self.quantity as i64,
            currency: self.unit_price.currency,
        }
    }
}

/// The resolved cart returned by the read endpoint
#[derive(Debug, Clone, Serialize)]
pub struct CartView {
    pub items: Vec<CartLine>,
    pub total: Price,
}

impl CartView {
    /// Build a view from resolved lines, summing the total
    pub fn new(items: Vec<CartLine>) -> Self {
        let currency = items
            .first()
            .map(|l| l.unit_price.currency)
            .unwrap_or_default();
        let total = Price {
            amount: items.iter().map(|l| l.total().amount).sum(),
            currency,
        };
        Self { items, total }
    }

    /// Total unit count across all lines
    pub fn item_count(&self) -> u32 {
        self.items.iter().map(|l| l.quantity).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
