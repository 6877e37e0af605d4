//! # PostgreSQL Store
//!
//! Production `Store` implementation over a shared `sqlx::PgPool`.
//!
//! The pool is owned by process-wide initialization: `PgStore::connect` is
//! idempotent and hands back the cached pool on every call after the first.
//! Cart mutation is a single atomic upsert, so concurrent adds for the same
//! user cannot lose updates.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::postgres::PgPoolOptions;
use sqlx::types::Json;
use sqlx::{FromRow, PgPool};
use tokio::sync::OnceCell;
use tracing::info;
use uuid::Uuid;

use shop_core::{
    Address, CartEntry, Category, Currency, ImageRef, Order, OrderRef, OrderStatus, PaymentInfo,
    Price, Product, ProductSort, Review, Role, ShopError, ShopResult, User,
};

use crate::store::Store;

/// Process-wide pool, created once and reused by every `connect` call.
static POOL: OnceCell<PgPool> = OnceCell::const_new();

/// PostgreSQL-backed store
#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    /// Wrap an existing pool
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Connect to the database, reusing the process-wide pool when one
    /// already exists. Safe to call repeatedly.
    pub async fn connect(database_url: &str) -> ShopResult<Self> {
        let pool = POOL
            .get_or_try_init(|| async {
                info!("Connecting to PostgreSQL");
                PgPoolOptions::new()
                    .max_connections(10)
                    .connect(database_url)
                    .await
            })
            .await
            .map_err(db_err)?
            .clone();

        Ok(Self::new(pool))
    }

    /// Run embedded migrations
    pub async fn migrate(&self) -> ShopResult<()> {
        sqlx::migrate!("./migrations")
            .run(&self.pool)
            .await
            .map_err(|e| ShopError::Database(e.to_string()))
    }

    /// The underlying pool
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

fn db_err(e: sqlx::Error) -> ShopError {
    ShopError::Database(e.to_string())
}

fn is_unique_violation(e: &sqlx::Error) -> bool {
    matches!(e, sqlx::Error::Database(db) if db.is_unique_violation())
}

// =============================================================================
// Row types
// =============================================================================

#[derive(FromRow)]
struct UserRow {
    id: Uuid,
    first_name: String,
    last_name: String,
    email: String,
    phone: Option<String>,
    password_hash: String,
    role: String,
    addresses: Json<Vec<Address>>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<UserRow> for User {
    type Error = ShopError;

    fn try_from(row: UserRow) -> ShopResult<Self> {
        Ok(User {
            id: row.id,
            first_name: row.first_name,
            last_name: row.last_name,
            email: row.email,
            phone: row.phone,
            password_hash: row.password_hash,
            role: Role::parse(&row.role)?,
            addresses: row.addresses.0,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

#[derive(FromRow)]
struct ProductRow {
    id: Uuid,
    name: String,
    slug: String,
    description: String,
    amount: i64,
    currency: String,
    discount_amount: Option<i64>,
    category: String,
    images: Json<Vec<ImageRef>>,
    care_instructions: Option<String>,
    reviews: Json<Vec<Review>>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<ProductRow> for Product {
    type Error = ShopError;

    fn try_from(row: ProductRow) -> ShopResult<Self> {
        let currency = Currency::parse(&row.currency)?;
        Ok(Product {
            id: row.id,
            name: row.name,
            slug: row.slug,
            description: row.description,
            price: Price::from_minor(row.amount, currency),
            discount_price: row.discount_amount.map(|a| Price::from_minor(a, currency)),
            category: Category::parse(&row.category)?,
            images: row.images.0,
            care_instructions: row.care_instructions,
            reviews: row.reviews.0,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

#[derive(FromRow)]
struct OrderRow {
    id: Uuid,
    user_id: Uuid,
    receipt: String,
    amount: i64,
    currency: String,
    status: String,
    gateway_order_id: Option<String>,
    payment: Option<Json<PaymentInfo>>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<OrderRow> for Order {
    type Error = ShopError;

    fn try_from(row: OrderRow) -> ShopResult<Self> {
        Ok(Order {
            id: row.id,
            user_id: row.user_id,
            receipt: row.receipt,
            amount: Price::from_minor(row.amount, Currency::parse(&row.currency)?),
            status: OrderStatus::parse(&row.status)?,
            gateway_order_id: row.gateway_order_id,
            payment: row.payment.map(|p| p.0),
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

#[derive(FromRow)]
struct CartRow {
    product_id: Uuid,
    quantity: i32,
}

const USER_COLUMNS: &str = "id, first_name, last_name, email, phone, password_hash, role, \
                            addresses, created_at, updated_at";
const PRODUCT_COLUMNS: &str = "id, name, slug, description, amount, currency, discount_amount, \
                               category, images, care_instructions, reviews, created_at, updated_at";
const ORDER_COLUMNS: &str = "id, user_id, receipt, amount, currency, status, gateway_order_id, \
                             payment, created_at, updated_at";

// =============================================================================
// Store implementation
// =============================================================================

#[async_trait]
impl Store for PgStore {
    async fn create_user(&self, user: &User) -> ShopResult<()> {
        sqlx::query(
            "INSERT INTO users (id, first_name, last_name, email, phone, password_hash, role, \
             addresses, created_at, updated_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)",
        )
        .bind(user.id)
        .bind(&user.first_name)
        .bind(&user.last_name)
        .bind(&user.email)
        .bind(&user.phone)
        .bind(&user.password_hash)
        .bind(user.role.as_str())
        .bind(Json(&user.addresses))
        .bind(user.created_at)
        .bind(user.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                ShopError::DuplicateEmail
            } else {
                db_err(e)
            }
        })?;

        Ok(())
    }

    async fn user_by_email(&self, email: &str) -> ShopResult<Option<User>> {
        let row = sqlx::query_as::<_, UserRow>(&format!(
            "SELECT {} FROM users WHERE email = $1",
            USER_COLUMNS
        ))
        .bind(email)
        .fetch_optional(&self.pool)
        .await
        .map_err(db_err)?;

        row.map(User::try_from).transpose()
    }

    async fn user_by_id(&self, id: Uuid) -> ShopResult<Option<User>> {
        let row = sqlx::query_as::<_, UserRow>(&format!(
            "SELECT {} FROM users WHERE id = $1",
            USER_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(db_err)?;

        row.map(User::try_from).transpose()
    }

    async fn update_user(&self, user: &User) -> ShopResult<()> {
        let result = sqlx::query(
            "UPDATE users SET first_name = $2, last_name = $3, phone = $4, addresses = $5, \
             updated_at = $6 WHERE id = $1",
        )
        .bind(user.id)
        .bind(&user.first_name)
        .bind(&user.last_name)
        .bind(&user.phone)
        .bind(Json(&user.addresses))
        .bind(user.updated_at)
        .execute(&self.pool)
        .await
        .map_err(db_err)?;

        if result.rows_affected() == 0 {
            return Err(ShopError::not_found("User"));
        }
        Ok(())
    }

    async fn add_cart_item(
        &self,
        user_id: Uuid,
        product_id: Uuid,
        quantity: u32,
    ) -> ShopResult<()> {
        // Atomic merge: duplicate adds accumulate in place, so overlapping
        // requests for the same user cannot lose updates.
        sqlx::query(
            "INSERT INTO cart_items (user_id, product_id, quantity) VALUES ($1, $2, $3) \
             ON CONFLICT (user_id, product_id) \
             DO UPDATE SET quantity = cart_items.quantity + EXCLUDED.quantity",
        )
        .bind(user_id)
        .bind(product_id)
        .bind(quantity as i32)
        .execute(&self.pool)
        .await
        .map_err(db_err)?;

        Ok(())
    }

    async fn set_cart_quantity(
        &self,
        user_id: Uuid,
        product_id: Uuid,
        quantity: u32,
    ) -> ShopResult<()> {
        let result = if quantity == 0 {
            sqlx::query("DELETE FROM cart_items WHERE user_id = $1 AND product_id = $2")
                .bind(user_id)
                .bind(product_id)
                .execute(&self.pool)
                .await
                .map_err(db_err)?
        } else {
            sqlx::query(
                "UPDATE cart_items SET quantity = $3 WHERE user_id = $1 AND product_id = $2",
            )
            .bind(user_id)
            .bind(product_id)
            .bind(quantity as i32)
            .execute(&self.pool)
            .await
            .map_err(db_err)?
        };

        if result.rows_affected() == 0 {
            return Err(ShopError::not_found("Cart item"));
        }
        Ok(())
    }

    async fn remove_cart_item(&self, user_id: Uuid, product_id: Uuid) -> ShopResult<()> {
        sqlx::query("DELETE FROM cart_items WHERE user_id = $1 AND product_id = $2")
            .bind(user_id)
            .bind(product_id)
            .execute(&self.pool)
            .await
            .map_err(db_err)?;

        Ok(())
    }

    async fn cart_entries(&self, user_id: Uuid) -> ShopResult<Vec<CartEntry>> {
        let rows = sqlx::query_as::<_, CartRow>(
            "SELECT product_id, quantity FROM cart_items WHERE user_id = $1 ORDER BY added_at",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(db_err)?;

        Ok(rows
            .into_iter()
            .map(|r| CartEntry {
                product_id: r.product_id,
                quantity: r.quantity.max(0) as u32,
            })
            .collect())
    }

    async fn insert_product(&self, product: &Product) -> ShopResult<()> {
        sqlx::query(
            "INSERT INTO products (id, name, slug, description, amount, currency, \
             discount_amount, category, images, care_instructions, reviews, created_at, \
             updated_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13)",
        )
        .bind(product.id)
        .bind(&product.name)
        .bind(&product.slug)
        .bind(&product.description)
        .bind(product.price.amount)
        .bind(product.price.currency.as_str())
        .bind(product.discount_price.map(|p| p.amount))
        .bind(product.category.as_str())
        .bind(Json(&product.images))
        .bind(&product.care_instructions)
        .bind(Json(&product.reviews))
        .bind(product.created_at)
        .bind(product.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                ShopError::DuplicateSlug
            } else {
                db_err(e)
            }
        })?;

        Ok(())
    }

    async fn product_by_id(&self, id: Uuid) -> ShopResult<Option<Product>> {
        let row = sqlx::query_as::<_, ProductRow>(&format!(
            "SELECT {} FROM products WHERE id = $1",
            PRODUCT_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(db_err)?;

        row.map(Product::try_from).transpose()
    }

    async fn product_by_slug(&self, slug: &str) -> ShopResult<Option<Product>> {
        let row = sqlx::query_as::<_, ProductRow>(&format!(
            "SELECT {} FROM products WHERE slug = $1",
            PRODUCT_COLUMNS
        ))
        .bind(slug)
        .fetch_optional(&self.pool)
        .await
        .map_err(db_err)?;

        row.map(Product::try_from).transpose()
    }

    async fn list_products(
        &self,
        sort: ProductSort,
        category: Option<Category>,
    ) -> ShopResult<Vec<Product>> {
        let order_by = match sort {
            ProductSort::Newest => "created_at DESC",
            ProductSort::PriceAsc => "COALESCE(discount_amount, amount) ASC",
            ProductSort::PriceDesc => "COALESCE(discount_amount, amount) DESC",
        };

        let rows = sqlx::query_as::<_, ProductRow>(&format!(
            "SELECT {} FROM products WHERE ($1::text IS NULL OR category = $1) ORDER BY {}",
            PRODUCT_COLUMNS, order_by
        ))
        .bind(category.map(|c| c.as_str()))
        .fetch_all(&self.pool)
        .await
        .map_err(db_err)?;

        rows.into_iter().map(Product::try_from).collect()
    }

    async fn update_product(&self, product: &Product) -> ShopResult<()> {
        let result = sqlx::query(
            "UPDATE products SET name = $2, slug = $3, description = $4, amount = $5, \
             currency = $6, discount_amount = $7, category = $8, images = $9, \
             care_instructions = $10, reviews = $11, updated_at = $12 WHERE id = $1",
        )
        .bind(product.id)
        .bind(&product.name)
        .bind(&product.slug)
        .bind(&product.description)
        .bind(product.price.amount)
        .bind(product.price.currency.as_str())
        .bind(product.discount_price.map(|p| p.amount))
        .bind(product.category.as_str())
        .bind(Json(&product.images))
        .bind(&product.care_instructions)
        .bind(Json(&product.reviews))
        .bind(product.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                ShopError::DuplicateSlug
            } else {
                db_err(e)
            }
        })?;

        if result.rows_affected() == 0 {
            return Err(ShopError::not_found("Product"));
        }
        Ok(())
    }

    async fn insert_order(&self, order: &Order) -> ShopResult<()> {
        sqlx::query(
            "INSERT INTO orders (id, user_id, receipt, amount, currency, status, \
             gateway_order_id, payment, created_at, updated_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)",
        )
        .bind(order.id)
        .bind(order.user_id)
        .bind(&order.receipt)
        .bind(order.amount.amount)
        .bind(order.amount.currency.as_str())
        .bind(order.status.as_str())
        .bind(&order.gateway_order_id)
        .bind(order.payment.as_ref().map(Json))
        .bind(order.created_at)
        .bind(order.updated_at)
        .execute(&self.pool)
        .await
        .map_err(db_err)?;

        Ok(())
    }

    async fn order_by_ref(&self, order_ref: &OrderRef) -> ShopResult<Option<Order>> {
        let row = match order_ref {
            OrderRef::Internal(id) => {
                sqlx::query_as::<_, OrderRow>(&format!(
                    "SELECT {} FROM orders WHERE id = $1",
                    ORDER_COLUMNS
                ))
                .bind(id)
                .fetch_optional(&self.pool)
                .await
            }
            OrderRef::Gateway(gateway_id) => {
                sqlx::query_as::<_, OrderRow>(&format!(
                    "SELECT {} FROM orders WHERE gateway_order_id = $1",
                    ORDER_COLUMNS
                ))
                .bind(gateway_id)
                .fetch_optional(&self.pool)
                .await
            }
        }
        .map_err(db_err)?;

        row.map(Order::try_from).transpose()
    }

    async fn mark_order_paid(
        &self,
        order_ref: &OrderRef,
        payment: PaymentInfo,
    ) -> ShopResult<bool> {
        let result = match order_ref {
            OrderRef::Internal(id) => {
                sqlx::query(
                    "UPDATE orders SET status = 'paid', payment = $2, updated_at = now() \
                     WHERE id = $1",
                )
                .bind(id)
                .bind(Json(&payment))
                .execute(&self.pool)
                .await
            }
            OrderRef::Gateway(gateway_id) => {
                sqlx::query(
                    "UPDATE orders SET status = 'paid', payment = $2, updated_at = now() \
                     WHERE gateway_order_id = $1",
                )
                .bind(gateway_id)
                .bind(Json(&payment))
                .execute(&self.pool)
                .await
            }
        }
        .map_err(db_err)?;

        Ok(result.rows_affected() > 0)
    }

    async fn mark_order_failed(
        &self,
        order_ref: &OrderRef,
        raw: serde_json::Value,
    ) -> ShopResult<bool> {
        let payment = PaymentInfo::failed(raw);
        let result = match order_ref {
            OrderRef::Internal(id) => {
                sqlx::query(
                    "UPDATE orders SET status = 'failed', payment = $2, updated_at = now() \
                     WHERE id = $1",
                )
                .bind(id)
                .bind(Json(&payment))
                .execute(&self.pool)
                .await
            }
            OrderRef::Gateway(gateway_id) => {
                sqlx::query(
                    "UPDATE orders SET status = 'failed', payment = $2, updated_at = now() \
                     WHERE gateway_order_id = $1",
                )
                .bind(gateway_id)
                .bind(Json(&payment))
                .execute(&self.pool)
                .await
            }
        }
        .map_err(db_err)?;

        Ok(result.rows_affected() > 0)
    }

    async fn orders_for_user(&self, user_id: Uuid) -> ShopResult<Vec<Order>> {
        let rows = sqlx::query_as::<_, OrderRow>(&format!(
            "SELECT {} FROM orders WHERE user_id = $1 ORDER BY created_at DESC",
            ORDER_COLUMNS
        ))
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(db_err)?;

        rows.into_iter().map(Order::try_from).collect()
    }

    async fn all_orders(&self) -> ShopResult<Vec<Order>> {
        let rows = sqlx::query_as::<_, OrderRow>(&format!(
            "SELECT {} FROM orders ORDER BY created_at DESC",
            ORDER_COLUMNS
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(db_err)?;

        rows.into_iter().map(Order::try_from).collect()
    }
}
