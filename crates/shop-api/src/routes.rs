//! # Routes
//!
//! Axum router configuration for the storefront API.

use crate::handlers;
use crate::state::AppState;
use axum::{
    routing::{delete, get, post, put},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

/// Create the main application router
///
/// Routes:
/// - Accounts:
///   - POST /auth/signup - Register and receive a session token
///   - POST /auth/login - Log in
///   - GET  /auth/me - Account behind the presented token
///   - GET  /users/profile - Read profile
///   - PUT  /users/update - Partial profile update
///
/// - Cart (bearer-gated):
///   - GET    /cart - Resolved cart
///   - POST   /cart - Add item (duplicate adds accumulate)
///   - PATCH  /cart - Set exact quantity (0 removes)
///   - DELETE /cart/{product_id} - Remove item
///
/// - Catalog:
///   - GET   /products - Listing with ?sort= and ?category=
///   - GET   /products/{slug} - Product by slug
///   - GET   /products/product/{id} - Product by id
///   - POST  /products/create - Create (admin)
///   - PATCH /products/product/{id} - Update (admin)
///   - POST  /products/product/{id}/reviews - Add review
///
/// - Orders & checkout:
///   - GET  /orders/my-orders - Caller's orders (?all=true for admins)
///   - POST /checkout/create - Open a checkout attempt for the cart
///   - POST /checkout/webhook - Gateway notification (HMAC-signed raw body)
pub fn create_router(state: AppState) -> Router {
    // CORS configuration - the storefront frontend lives on another origin
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let auth_routes = Router::new()
        .route("/signup", post(handlers::auth::signup))
        .route("/login", post(handlers::auth::login))
        .route("/me", get(handlers::auth::me));

    let user_routes = Router::new()
        .route("/profile", get(handlers::users::profile))
        .route("/update", put(handlers::users::update_profile));

    let cart_routes = Router::new()
        .route(
            "/",
            get(handlers::cart::read)
                .post(handlers::cart::add_item)
                .patch(handlers::cart::update_quantity),
        )
        .route("/{product_id}", delete(handlers::cart::remove_item));

    let product_routes = Router::new()
        .route("/", get(handlers::products::list))
        .route("/create", post(handlers::products::create))
        .route(
            "/product/{product_id}",
            get(handlers::products::get_by_id).patch(handlers::products::update),
        )
        .route(
            "/product/{product_id}/reviews",
            post(handlers::products::add_review),
        )
        .route("/{slug}", get(handlers::products::get_by_slug));

    let order_routes = Router::new().route("/my-orders", get(handlers::orders::my_orders));

    // Webhook must see the raw body; keep it off the CORS-wrapped JSON surface
    let checkout_routes = Router::new()
        .route("/create", post(handlers::checkout::create))
        .route("/webhook", post(handlers::checkout::webhook));

    Router::new()
        .route("/health", get(handlers::health))
        .nest("/auth", auth_routes)
        .nest("/users", user_routes)
        .nest("/cart", cart_routes)
        .nest("/products", product_routes)
        .nest("/orders", order_routes)
        .nest("/checkout", checkout_routes)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
