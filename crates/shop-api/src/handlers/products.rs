//! Catalog listing, lookups, and the admin-gated write paths.

use axum::extract::{Path, Query, State};
use axum::response::IntoResponse;
use axum::Json;
use chrono::Utc;
use serde::Deserialize;
use tracing::{info, instrument};
use uuid::Uuid;

use shop_core::{
    Category, Currency, ImageRef, Price, Product, ProductSort, Review, ShopError, ShopResult,
};

use crate::assets::is_inline_source;
use crate::auth::{AdminSession, AuthSession};
use crate::error::ApiResult;
use crate::state::AppState;

/// Listing query parameters
#[derive(Debug, Default, Deserialize)]
pub struct ListQuery {
    #[serde(default)]
    pub sort: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
}

/// Product create request (admin only)
#[derive(Debug, Deserialize)]
pub struct CreateProductRequest {
    pub name: String,
    pub description: String,
    /// Decimal price in the product currency
    pub price: f64,
    #[serde(default)]
    pub discount_price: Option<f64>,
    #[serde(default)]
    pub currency: Option<String>,
    pub category: String,
    /// Image sources: direct URLs or inline `data:` URIs
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default)]
    pub care_instructions: Option<String>,
}

/// Partial product update (admin only)
#[derive(Debug, Default, Deserialize)]
pub struct UpdateProductRequest {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub price: Option<f64>,
    #[serde(default)]
    pub discount_price: Option<f64>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub images: Option<Vec<String>>,
    #[serde(default)]
    pub care_instructions: Option<String>,
}

/// Review request body
#[derive(Debug, Deserialize)]
pub struct ReviewRequest {
    pub rating: u8,
    pub comment: String,
}

/// Full catalog listing with sort and category filter
pub async fn list(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> ApiResult<impl IntoResponse> {
    let sort = match &query.sort {
        Some(tag) => ProductSort::parse(tag)?,
        None => ProductSort::default(),
    };
    let category = query.category.as_deref().map(Category::parse).transpose()?;

    let products = state.store.list_products(sort, category).await?;
    let count = products.len();

    Ok(Json(serde_json::json!({
        "products": products,
        "count": count
    })))
}

/// Single product by slug
pub async fn get_by_slug(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> ApiResult<Json<Product>> {
    let product = state
        .store
        .product_by_slug(&slug)
        .await?
        .ok_or_else(|| ShopError::not_found("Product"))?;

    Ok(Json(product))
}

/// Single product by id
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(product_id): Path<Uuid>,
) -> ApiResult<Json<Product>> {
    let product = state
        .store
        .product_by_id(product_id)
        .await?
        .ok_or_else(|| ShopError::not_found("Product"))?;

    Ok(Json(product))
}

/// Create a catalog entry
#[instrument(skip(state, request), fields(name = %request.name))]
pub async fn create(
    State(state): State<AppState>,
    _admin: AdminSession,
    Json(request): Json<CreateProductRequest>,
) -> ApiResult<Json<Product>> {
    let currency = match &request.currency {
        Some(code) => Currency::parse(code)?,
        None => Currency::default(),
    };
    let category = Category::parse(&request.category)?;

    if request.price <= 0.0 {
        return Err(ShopError::InvalidRequest("price must be positive".to_string()).into());
    }

    let mut product = Product::new(
        request.name,
        request.description,
        Price::new(request.price, currency),
        category,
    );
    product.discount_price = request.discount_price.map(|p| Price::new(p, currency));
    product.care_instructions = request.care_instructions;
    product.images = resolve_images(&state, &request.images).await?;

    state.store.insert_product(&product).await?;

    info!("Created product: {} ({})", product.slug, product.id);

    Ok(Json(product))
}

/// Partially update a catalog entry; renames re-derive the slug
#[instrument(skip(state, request), fields(product_id = %product_id))]
pub async fn update(
    State(state): State<AppState>,
    _admin: AdminSession,
    Path(product_id): Path<Uuid>,
    Json(request): Json<UpdateProductRequest>,
) -> ApiResult<Json<Product>> {
    let mut product = state
        .store
        .product_by_id(product_id)
        .await?
        .ok_or_else(|| ShopError::not_found("Product"))?;

    if let Some(name) = request.name {
        product.rename(name);
    }
    if let Some(description) = request.description {
        product.description = description;
    }
    if let Some(price) = request.price {
        if price <= 0.0 {
            return Err(ShopError::InvalidRequest("price must be positive".to_string()).into());
        }
        product.price = Price::new(price, product.price.currency);
    }
    if let Some(discount) = request.discount_price {
        product.discount_price = Some(Price::new(discount, product.price.currency));
    }
    if let Some(category) = request.category {
        product.category = Category::parse(&category)?;
    }
    if let Some(images) = request.images {
        product.images = resolve_images(&state, &images).await?;
    }
    if let Some(care) = request.care_instructions {
        product.care_instructions = Some(care);
    }
    product.updated_at = Utc::now();

    state.store.update_product(&product).await?;

    Ok(Json(product))
}

/// Append a review to a product's embedded list
#[instrument(skip(state, session, request), fields(product_id = %product_id))]
pub async fn add_review(
    State(state): State<AppState>,
    session: AuthSession,
    Path(product_id): Path<Uuid>,
    Json(request): Json<ReviewRequest>,
) -> ApiResult<Json<Product>> {
    let mut product = state
        .store
        .product_by_id(product_id)
        .await?
        .ok_or_else(|| ShopError::not_found("Product"))?;

    let author = state
        .store
        .user_by_id(session.user_id())
        .await?
        .map(|u| u.display_name())
        .unwrap_or_else(|| "Anonymous".to_string());

    let review = Review {
        user_id: session.user_id(),
        author,
        rating: request.rating,
        comment: request.comment,
        created_at: Utc::now(),
    };
    review.validate()?;

    product.reviews.push(review);
    product.updated_at = Utc::now();
    state.store.update_product(&product).await?;

    Ok(Json(product))
}

/// Resolve image sources: direct URLs pass through, inline `data:` URIs go
/// through the asset host.
async fn resolve_images(state: &AppState, sources: &[String]) -> ShopResult<Vec<ImageRef>> {
    let mut images = Vec::with_capacity(sources.len());

    for source in sources {
        if is_inline_source(source) {
            let assets = state.assets.as_ref().ok_or_else(|| {
                ShopError::InvalidRequest(
                    "inline images need a configured asset host".to_string(),
                )
            })?;
            images.push(assets.upload(source, "products").await?);
        } else if source.starts_with("http://") || source.starts_with("https://") {
            images.push(ImageRef {
                url: source.clone(),
                asset_id: None,
            });
        } else {
            return Err(ShopError::InvalidRequest(format!(
                "unsupported image source: {}",
                source
            )));
        }
    }

    Ok(images)
}
