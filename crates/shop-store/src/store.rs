//! # Store Trait
//!
//! Persistence interface for the storefront. The production implementation
//! talks to PostgreSQL; an in-memory implementation provides the same
//! semantics for tests and local development.

use std::sync::Arc;

use async_trait::async_trait;
use uuid::Uuid;

use shop_core::{
    CartEntry, Category, Order, OrderRef, PaymentInfo, Product, ProductSort, ShopResult, User,
};

/// Core trait for storefront persistence.
///
/// All implementations must be thread-safe (Send + Sync). Every mutation
/// persists synchronously before returning; there is no write-behind.
#[async_trait]
pub trait Store: Send + Sync {
    // =========================================================================
    // Users
    // =========================================================================

    /// Insert a new account.
    ///
    /// Fails with `ShopError::DuplicateEmail` when the email is taken.
    async fn create_user(&self, user: &User) -> ShopResult<()>;

    /// Look up an account by (lowercased) email, credential hash included.
    async fn user_by_email(&self, email: &str) -> ShopResult<Option<User>>;

    /// Look up an account by id.
    async fn user_by_id(&self, id: Uuid) -> ShopResult<Option<User>>;

    /// Persist profile fields of an existing account.
    async fn update_user(&self, user: &User) -> ShopResult<()>;

    // =========================================================================
    // Cart
    // =========================================================================

    /// Add a product to a user's cart.
    ///
    /// When the product is already in the cart, the stored quantity is
    /// incremented atomically; one entry per product.
    async fn add_cart_item(&self, user_id: Uuid, product_id: Uuid, quantity: u32)
        -> ShopResult<()>;

    /// Set a cart entry to an exact quantity. Zero removes the entry.
    ///
    /// Fails with `ShopError::NotFound` when the product is not in the cart.
    async fn set_cart_quantity(
        &self,
        user_id: Uuid,
        product_id: Uuid,
        quantity: u32,
    ) -> ShopResult<()>;

    /// Remove a product from the cart. Absent products are a silent no-op.
    async fn remove_cart_item(&self, user_id: Uuid, product_id: Uuid) -> ShopResult<()>;

    /// All cart entries for a user.
    async fn cart_entries(&self, user_id: Uuid) -> ShopResult<Vec<CartEntry>>;

    // =========================================================================
    // Products
    // =========================================================================

    /// Insert a catalog entry.
    ///
    /// Fails with `ShopError::DuplicateSlug` on a slug collision.
    async fn insert_product(&self, product: &Product) -> ShopResult<()>;

    /// Look up a product by id.
    async fn product_by_id(&self, id: Uuid) -> ShopResult<Option<Product>>;

    /// Look up a product by slug.
    async fn product_by_slug(&self, slug: &str) -> ShopResult<Option<Product>>;

    /// Full catalog listing with sort order and optional category filter.
    async fn list_products(
        &self,
        sort: ProductSort,
        category: Option<Category>,
    ) -> ShopResult<Vec<Product>>;

    /// Persist an updated product record (including embedded reviews).
    ///
    /// Fails with `ShopError::DuplicateSlug` when a rename collides and
    /// `ShopError::NotFound` when the product does not exist.
    async fn update_product(&self, product: &Product) -> ShopResult<()>;

    // =========================================================================
    // Orders
    // =========================================================================

    /// Insert a new (pending) order.
    async fn insert_order(&self, order: &Order) -> ShopResult<()>;

    /// Look up an order by internal id or gateway order id.
    async fn order_by_ref(&self, order_ref: &OrderRef) -> ShopResult<Option<Order>>;

    /// Overwrite the matching order to `paid`, attaching the payment
    /// sub-record. Returns false when no order matched; redelivery of the
    /// same notification reapplies identical fields.
    async fn mark_order_paid(
        &self,
        order_ref: &OrderRef,
        payment: PaymentInfo,
    ) -> ShopResult<bool>;

    /// Overwrite the matching order to `failed`, attaching the raw payload
    /// only. Returns false when no order matched.
    async fn mark_order_failed(
        &self,
        order_ref: &OrderRef,
        raw: serde_json::Value,
    ) -> ShopResult<bool>;

    /// A user's orders, newest first.
    async fn orders_for_user(&self, user_id: Uuid) -> ShopResult<Vec<Order>>;

    /// Every order, newest first. Admin listings only.
    async fn all_orders(&self) -> ShopResult<Vec<Order>>;
}

/// Type alias for a shared store handle (dynamic dispatch)
pub type BoxedStore = Arc<dyn Store>;
