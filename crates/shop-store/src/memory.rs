//! # In-Memory Store
//!
//! In-memory `Store` implementation for tests and local development.
//! Provides the same semantics as the PostgreSQL implementation, including
//! the cart merge rule and uniqueness violations.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use shop_core::{
    CartEntry, Category, Order, OrderRef, OrderStatus, PaymentInfo, Product, ProductSort,
    ShopError, ShopResult, User,
};

use crate::store::Store;

/// In-memory store, cheaply cloneable
#[derive(Clone, Default)]
pub struct MemoryStore {
    users: Arc<RwLock<HashMap<Uuid, User>>>,
    products: Arc<RwLock<HashMap<Uuid, Product>>>,
    carts: Arc<RwLock<HashMap<Uuid, Vec<CartEntry>>>>,
    orders: Arc<RwLock<HashMap<Uuid, Order>>>,
}

impl MemoryStore {
    /// Create a new empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of registered users
    pub async fn user_count(&self) -> usize {
        self.users.read().await.len()
    }

    /// Clear everything
    pub async fn clear(&self) {
        self.users.write().await.clear();
        self.products.write().await.clear();
        self.carts.write().await.clear();
        self.orders.write().await.clear();
    }

    fn matches(order: &Order, order_ref: &OrderRef) -> bool {
        match order_ref {
            OrderRef::Internal(id) => order.id == *id,
            OrderRef::Gateway(gateway_id) => {
                order.gateway_order_id.as_deref() == Some(gateway_id.as_str())
            }
        }
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn create_user(&self, user: &User) -> ShopResult<()> {
        let mut users = self.users.write().await;
        if users.values().any(|u| u.email == user.email) {
            return Err(ShopError::DuplicateEmail);
        }
        users.insert(user.id, user.clone());
        Ok(())
    }

    async fn user_by_email(&self, email: &str) -> ShopResult<Option<User>> {
        let users = self.users.read().await;
        Ok(users.values().find(|u| u.email == email).cloned())
    }

    async fn user_by_id(&self, id: Uuid) -> ShopResult<Option<User>> {
        Ok(self.users.read().await.get(&id).cloned())
    }

    async fn update_user(&self, user: &User) -> ShopResult<()> {
        let mut users = self.users.write().await;
        let existing = users
            .get_mut(&user.id)
            .ok_or_else(|| ShopError::not_found("User"))?;

        existing.first_name = user.first_name.clone();
        existing.last_name = user.last_name.clone();
        existing.phone = user.phone.clone();
        existing.addresses = user.addresses.clone();
        existing.updated_at = user.updated_at;
        Ok(())
    }

    async fn add_cart_item(
        &self,
        user_id: Uuid,
        product_id: Uuid,
        quantity: u32,
    ) -> ShopResult<()> {
        let mut carts = self.carts.write().await;
        let entries = carts.entry(user_id).or_default();

        match entries.iter_mut().find(|e| e.product_id == product_id) {
            Some(entry) => entry.quantity += quantity,
            None => entries.push(CartEntry {
                product_id,
                quantity,
            }),
        }
        Ok(())
    }

    async fn set_cart_quantity(
        &self,
        user_id: Uuid,
        product_id: Uuid,
        quantity: u32,
    ) -> ShopResult<()> {
        let mut carts = self.carts.write().await;
        let entries = carts.entry(user_id).or_default();

        let position = entries
            .iter()
            .position(|e| e.product_id == product_id)
            .ok_or_else(|| ShopError::not_found("Cart item"))?;

        if quantity == 0 {
            entries.remove(position);
        } else {
            entries[position].quantity = quantity;
        }
        Ok(())
    }

    async fn remove_cart_item(&self, user_id: Uuid, product_id: Uuid) -> ShopResult<()> {
        let mut carts = self.carts.write().await;
        if let Some(entries) = carts.get_mut(&user_id) {
            entries.retain(|e| e.product_id != product_id);
        }
        Ok(())
    }

    async fn cart_entries(&self, user_id: Uuid) -> ShopResult<Vec<CartEntry>> {
        let carts = self.carts.read().await;
        Ok(carts.get(&user_id).cloned().unwrap_or_default())
    }

    async fn insert_product(&self, product: &Product) -> ShopResult<()> {
        let mut products = self.products.write().await;
        if products.values().any(|p| p.slug == product.slug) {
            return Err(ShopError::DuplicateSlug);
        }
        products.insert(product.id, product.clone());
        Ok(())
    }

    async fn product_by_id(&self, id: Uuid) -> ShopResult<Option<Product>> {
        Ok(self.products.read().await.get(&id).cloned())
    }

    async fn product_by_slug(&self, slug: &str) -> ShopResult<Option<Product>> {
        let products = self.products.read().await;
        Ok(products.values().find(|p| p.slug == slug).cloned())
    }

    async fn list_products(
        &self,
        sort: ProductSort,
        category: Option<Category>,
    ) -> ShopResult<Vec<Product>> {
        let products = self.products.read().await;
        let mut listing: Vec<Product> = products
            .values()
            .filter(|p| category.map_or(true, |c| p.category == c))
            .cloned()
            .collect();

        match sort {
            ProductSort::Newest => {
                listing.sort_by(|a, b| b.created_at.cmp(&a.created_at));
            }
            ProductSort::PriceAsc => {
                listing.sort_by_key(|p| p.effective_price().amount);
            }
            ProductSort::PriceDesc => {
                listing.sort_by_key(|p| std::cmp::Reverse(p.effective_price().amount));
            }
        }
        Ok(listing)
    }

    async fn update_product(&self, product: &Product) -> ShopResult<()> {
        let mut products = self.products.write().await;
        if products
            .values()
            .any(|p| p.slug == product.slug && p.id != product.id)
        {
            return Err(ShopError::DuplicateSlug);
        }
        if !products.contains_key(&product.id) {
            return Err(ShopError::not_found("Product"));
        }
        products.insert(product.id, product.clone());
        Ok(())
    }

    async fn insert_order(&self, order: &Order) -> ShopResult<()> {
        self.orders.write().await.insert(order.id, order.clone());
        Ok(())
    }

    async fn order_by_ref(&self, order_ref: &OrderRef) -> ShopResult<Option<Order>> {
        let orders = self.orders.read().await;
        Ok(orders
            .values()
            .find(|o| Self::matches(o, order_ref))
            .cloned())
    }

    async fn mark_order_paid(
        &self,
        order_ref: &OrderRef,
        payment: PaymentInfo,
    ) -> ShopResult<bool> {
        let mut orders = self.orders.write().await;
        match orders.values_mut().find(|o| Self::matches(o, order_ref)) {
            Some(order) => {
                order.status = OrderStatus::Paid;
                order.payment = Some(payment);
                order.updated_at = chrono::Utc::now();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn mark_order_failed(
        &self,
        order_ref: &OrderRef,
        raw: serde_json::Value,
    ) -> ShopResult<bool> {
        let mut orders = self.orders.write().await;
        match orders.values_mut().find(|o| Self::matches(o, order_ref)) {
            Some(order) => {
                order.status = OrderStatus::Failed;
                order.payment = Some(PaymentInfo::failed(raw));
                order.updated_at = chrono::Utc::now();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn orders_for_user(&self, user_id: Uuid) -> ShopResult<Vec<Order>> {
        let orders = self.orders.read().await;
        let mut listing: Vec<Order> = orders
            .values()
            .filter(|o| o.user_id == user_id)
            .cloned()
            .collect();
        listing.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(listing)
    }

    async fn all_orders(&self) -> ShopResult<Vec<Order>> {
        let orders = self.orders.read().await;
        let mut listing: Vec<Order> = orders.values().cloned().collect();
        listing.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(listing)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shop_core::{Currency, Price, Role};

    fn user(email: &str) -> User {
        User::new("Test", "User", email, "hash", Role::User)
    }

    fn product(name: &str, price: f64) -> Product {
        Product::new(
            name,
            "desc",
            Price::new(price, Currency::INR),
            Category::Beanie,
        )
    }

    #[tokio::test]
    async fn test_duplicate_email_rejected() {
        let store = MemoryStore::new();
        store.create_user(&user("a@x.com")).await.unwrap();

        let err = store.create_user(&user("a@x.com")).await.unwrap_err();
        assert!(matches!(err, ShopError::DuplicateEmail));
    }

    #[tokio::test]
    async fn test_cart_add_merges_quantity() {
        let store = MemoryStore::new();
        let user_id = Uuid::new_v4();
        let product_id = Uuid::new_v4();

        store.add_cart_item(user_id, product_id, 2).await.unwrap();
        store.add_cart_item(user_id, product_id, 3).await.unwrap();

        let entries = store.cart_entries(user_id).await.unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].quantity, 5);
    }

    #[tokio::test]
    async fn test_cart_remove_absent_is_noop() {
        let store = MemoryStore::new();
        let user_id = Uuid::new_v4();

        store.add_cart_item(user_id, Uuid::new_v4(), 1).await.unwrap();
        store.remove_cart_item(user_id, Uuid::new_v4()).await.unwrap();

        assert_eq!(store.cart_entries(user_id).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_set_quantity_zero_removes() {
        let store = MemoryStore::new();
        let user_id = Uuid::new_v4();
        let product_id = Uuid::new_v4();

        store.add_cart_item(user_id, product_id, 4).await.unwrap();
        store.set_cart_quantity(user_id, product_id, 0).await.unwrap();

        assert!(store.cart_entries(user_id).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_set_quantity_absent_errors() {
        let store = MemoryStore::new();
        let err = store
            .set_cart_quantity(Uuid::new_v4(), Uuid::new_v4(), 2)
            .await
            .unwrap_err();
        assert!(matches!(err, ShopError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_duplicate_slug_rejected() {
        let store = MemoryStore::new();
        store.insert_product(&product("Wool Beanie", 499.0)).await.unwrap();

        let err = store
            .insert_product(&product("Wool Beanie", 599.0))
            .await
            .unwrap_err();
        assert!(matches!(err, ShopError::DuplicateSlug));
    }

    #[tokio::test]
    async fn test_listing_price_sort_uses_effective_price() {
        let store = MemoryStore::new();
        store.insert_product(&product("Cheap", 100.0)).await.unwrap();
        store
            .insert_product(&product("Discounted", 500.0).with_discount(Price::new(50.0, Currency::INR)))
            .await
            .unwrap();

        let listing = store
            .list_products(ProductSort::PriceAsc, None)
            .await
            .unwrap();
        assert_eq!(listing[0].name, "Discounted");
        assert_eq!(listing[1].name, "Cheap");
    }

    #[tokio::test]
    async fn test_order_paid_by_gateway_ref() {
        let store = MemoryStore::new();
        let order = Order::new(Uuid::new_v4(), Price::new(999.0, Currency::INR))
            .with_gateway_order("order_abc");
        store.insert_order(&order).await.unwrap();

        let updated = store
            .mark_order_paid(
                &OrderRef::Gateway("order_abc".to_string()),
                PaymentInfo::captured("pay_1", Some("card".to_string()), serde_json::json!({})),
            )
            .await
            .unwrap();
        assert!(updated);

        let found = store
            .order_by_ref(&OrderRef::Internal(order.id))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(found.status, OrderStatus::Paid);
        assert_eq!(found.payment.unwrap().payment_id.as_deref(), Some("pay_1"));
    }

    #[tokio::test]
    async fn test_mark_paid_unknown_order_is_skipped() {
        let store = MemoryStore::new();
        let updated = store
            .mark_order_paid(
                &OrderRef::Gateway("order_missing".to_string()),
                PaymentInfo::captured("pay_1", None, serde_json::json!({})),
            )
            .await
            .unwrap();
        assert!(!updated);
    }
}
