//! Integration tests for the storefront API, running against the in-memory
//! store. The gateway is mocked with wiremock where checkout creation needs
//! it; webhook tests sign real bodies with the test secret.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use tower::ServiceExt;
use uuid::Uuid;

use shop_api::auth::TokenSigner;
use shop_api::{create_router, AppState};
use shop_core::{Category, Currency, Order, OrderStatus, Price, Product, Role};
use shop_razorpay::{compute_hmac_sha256, RazorpayClient, RazorpayConfig};
use shop_store::{BoxedStore, MemoryStore, Store};

const JWT_SECRET: &str = "test-jwt-secret";
const WEBHOOK_SECRET: &str = "whsec_test_secret";

fn build_app(gateway_base_url: Option<&str>) -> (axum::Router, Arc<MemoryStore>) {
    let store = Arc::new(MemoryStore::new());

    let mut config = RazorpayConfig::new("rzp_test_key", "key-secret", WEBHOOK_SECRET);
    if let Some(url) = gateway_base_url {
        config = config.with_api_base_url(url);
    }

    let boxed: BoxedStore = store.clone();
    let state = AppState::from_parts(boxed, RazorpayClient::new(config), TokenSigner::new(JWT_SECRET, 1));

    (create_router(state), store)
}

fn setup() -> (axum::Router, Arc<MemoryStore>) {
    build_app(None)
}

async fn send(
    app: &axum::Router,
    method: &str,
    uri: &str,
    token: Option<&str>,
    body: Option<serde_json::Value>,
) -> (StatusCode, serde_json::Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {}", token));
    }

    let request = match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(serde_json::to_string(&json).unwrap()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json = if bytes.is_empty() {
        serde_json::Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null)
    };

    (status, json)
}

async fn signup(
    app: &axum::Router,
    email: &str,
    password: &str,
    role: Option<&str>,
) -> (StatusCode, serde_json::Value) {
    let mut body = serde_json::json!({
        "first_name": "Test",
        "last_name": "Shopper",
        "email": email,
        "password": password,
    });
    if let Some(role) = role {
        body["role"] = serde_json::json!(role);
    }
    send(app, "POST", "/auth/signup", None, Some(body)).await
}

async fn signup_token(app: &axum::Router, email: &str, role: Option<&str>) -> String {
    let (status, json) = signup(app, email, "secret-password", role).await;
    assert_eq!(status, StatusCode::OK);
    json["token"].as_str().unwrap().to_string()
}

fn beanie(price: f64) -> Product {
    Product::new(
        "Wool Beanie",
        "Ribbed merino beanie",
        Price::new(price, Currency::INR),
        Category::Beanie,
    )
}

// =============================================================================
// Health
// =============================================================================

#[tokio::test]
async fn test_health_check() {
    let (app, _) = setup();
    let (status, json) = send(&app, "GET", "/health", None, None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["status"], "healthy");
    assert_eq!(json["service"], "hatrack");
}

// =============================================================================
// Accounts
// =============================================================================

#[tokio::test]
async fn test_signup_login_me_round_trip() {
    let (app, _) = setup();

    let (status, json) = signup(&app, "a@x.com", "secret-password", None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(json["token"].as_str().is_some());
    assert_eq!(json["user"]["email"], "a@x.com");
    // The credential hash never appears in a response.
    assert!(json["user"].get("password_hash").is_none());

    let (status, json) = send(
        &app,
        "POST",
        "/auth/login",
        None,
        Some(serde_json::json!({ "email": "a@x.com", "password": "secret-password" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let token = json["token"].as_str().unwrap().to_string();

    let (status, json) = send(&app, "GET", "/auth/me", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["email"], "a@x.com");
    assert_eq!(json["role"], "user");
}

#[tokio::test]
async fn test_signup_duplicate_email() {
    let (app, _) = setup();

    let (status, _) = signup(&app, "a@x.com", "secret-one", None).await;
    assert_eq!(status, StatusCode::OK);

    let (status, json) = signup(&app, "a@x.com", "secret-two", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error"], "An account with this email already exists");
}

#[tokio::test]
async fn test_login_failures_are_indistinguishable() {
    let (app, _) = setup();
    signup(&app, "a@x.com", "secret-password", None).await;

    let (wrong_pw_status, wrong_pw_body) = send(
        &app,
        "POST",
        "/auth/login",
        None,
        Some(serde_json::json!({ "email": "a@x.com", "password": "wrong" })),
    )
    .await;
    let (unknown_status, unknown_body) = send(
        &app,
        "POST",
        "/auth/login",
        None,
        Some(serde_json::json!({ "email": "nobody@x.com", "password": "wrong" })),
    )
    .await;

    assert_eq!(wrong_pw_status, StatusCode::BAD_REQUEST);
    assert_eq!(unknown_status, StatusCode::BAD_REQUEST);
    // Identical bodies: no account enumeration.
    assert_eq!(wrong_pw_body, unknown_body);
}

#[tokio::test]
async fn test_token_claims() {
    let (app, _) = setup();
    let token = signup_token(&app, "a@x.com", None).await;

    let signer = TokenSigner::new(JWT_SECRET, 1);
    let claims = signer.verify(&token).unwrap();
    assert_eq!(claims.email, "a@x.com");
    assert_eq!(claims.role, Role::User);
}

#[tokio::test]
async fn test_protected_routes_require_token() {
    let (app, _) = setup();

    let (status, _) = send(&app, "GET", "/auth/me", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = send(&app, "GET", "/cart", Some("garbage.token.here"), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_weak_password_rejected() {
    let (app, _) = setup();
    let (status, _) = signup(&app, "a@x.com", "short", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_profile_partial_update() {
    let (app, _) = setup();
    let token = signup_token(&app, "a@x.com", None).await;

    let (status, json) = send(
        &app,
        "PUT",
        "/users/update",
        Some(&token),
        Some(serde_json::json!({ "phone": "+91 98765 43210" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["phone"], "+91 98765 43210");
    // Untouched fields survive the merge.
    assert_eq!(json["first_name"], "Test");

    let (status, json) = send(&app, "GET", "/users/profile", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["phone"], "+91 98765 43210");
}

// =============================================================================
// Cart
// =============================================================================

#[tokio::test]
async fn test_cart_duplicate_add_accumulates() {
    let (app, store) = setup();
    let token = signup_token(&app, "a@x.com", None).await;

    let product = beanie(499.0);
    store.insert_product(&product).await.unwrap();

    let add = serde_json::json!({ "product_id": product.id, "quantity": 2 });
    let (status, _) = send(&app, "POST", "/cart", Some(&token), Some(add)).await;
    assert_eq!(status, StatusCode::OK);

    let add = serde_json::json!({ "product_id": product.id, "quantity": 3 });
    let (status, json) = send(&app, "POST", "/cart", Some(&token), Some(add)).await;
    assert_eq!(status, StatusCode::OK);

    // One entry, q1 + q2, not two entries.
    assert_eq!(json["items"].as_array().unwrap().len(), 1);
    assert_eq!(json["items"][0]["quantity"], 5);
    assert_eq!(json["total"]["amount"], 5 * 49900);
}

#[tokio::test]
async fn test_cart_remove_absent_is_noop() {
    let (app, store) = setup();
    let token = signup_token(&app, "a@x.com", None).await;

    let product = beanie(499.0);
    store.insert_product(&product).await.unwrap();

    let add = serde_json::json!({ "product_id": product.id });
    send(&app, "POST", "/cart", Some(&token), Some(add)).await;

    let uri = format!("/cart/{}", Uuid::new_v4());
    let (status, json) = send(&app, "DELETE", &uri, Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["items"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_cart_quantity_zero_removes_entry() {
    let (app, store) = setup();
    let token = signup_token(&app, "a@x.com", None).await;

    let product = beanie(499.0);
    store.insert_product(&product).await.unwrap();

    let add = serde_json::json!({ "product_id": product.id, "quantity": 4 });
    send(&app, "POST", "/cart", Some(&token), Some(add)).await;

    let patch = serde_json::json!({ "product_id": product.id, "quantity": 0 });
    let (status, json) = send(&app, "PATCH", "/cart", Some(&token), Some(patch)).await;
    assert_eq!(status, StatusCode::OK);
    assert!(json["items"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_cart_add_unknown_product() {
    let (app, _) = setup();
    let token = signup_token(&app, "a@x.com", None).await;

    let add = serde_json::json!({ "product_id": Uuid::new_v4() });
    let (status, _) = send(&app, "POST", "/cart", Some(&token), Some(add)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

// =============================================================================
// Catalog
// =============================================================================

#[tokio::test]
async fn test_product_create_is_role_gated() {
    let (app, _) = setup();
    let user_token = signup_token(&app, "user@x.com", None).await;
    let admin_token = signup_token(&app, "admin@x.com", Some("admin")).await;

    let body = serde_json::json!({
        "name": "Classic Baseball Cap",
        "description": "Six-panel cotton twill",
        "price": 499.0,
        "category": "baseball-cap",
        "images": ["https://cdn.example.com/cap.png"]
    });

    let (status, _) = send(&app, "POST", "/products/create", Some(&user_token), Some(body.clone())).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, json) = send(&app, "POST", "/products/create", Some(&admin_token), Some(body)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["slug"], "classic-baseball-cap");
    assert_eq!(json["price"]["amount"], 49900);

    // Readable by slug and by id, unauthenticated.
    let (status, by_slug) = send(&app, "GET", "/products/classic-baseball-cap", None, None).await;
    assert_eq!(status, StatusCode::OK);
    let uri = format!("/products/product/{}", by_slug["id"].as_str().unwrap());
    let (status, _) = send(&app, "GET", &uri, None, None).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_product_duplicate_name_rejected() {
    let (app, _) = setup();
    let admin_token = signup_token(&app, "admin@x.com", Some("admin")).await;

    let body = serde_json::json!({
        "name": "Wool Beanie",
        "description": "Ribbed",
        "price": 499.0,
        "category": "beanie"
    });
    let (status, _) = send(&app, "POST", "/products/create", Some(&admin_token), Some(body.clone())).await;
    assert_eq!(status, StatusCode::OK);

    let (status, json) = send(&app, "POST", "/products/create", Some(&admin_token), Some(body)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error"], "A product with this name already exists");
}

#[tokio::test]
async fn test_listing_sort_and_filter() {
    let (app, store) = setup();

    store.insert_product(&beanie(499.0)).await.unwrap();
    store
        .insert_product(&Product::new(
            "Straw Fedora",
            "Summer fedora",
            Price::new(899.0, Currency::INR),
            Category::Fedora,
        ))
        .await
        .unwrap();

    let (status, json) = send(&app, "GET", "/products?sort=price_desc", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["count"], 2);
    assert_eq!(json["products"][0]["name"], "Straw Fedora");

    let (status, json) = send(&app, "GET", "/products?category=beanie", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["count"], 1);
    assert_eq!(json["products"][0]["name"], "Wool Beanie");

    let (status, _) = send(&app, "GET", "/products?sort=cheapest", None, None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_rename_rederives_slug() {
    let (app, store) = setup();
    let admin_token = signup_token(&app, "admin@x.com", Some("admin")).await;

    let product = beanie(499.0);
    store.insert_product(&product).await.unwrap();

    let uri = format!("/products/product/{}", product.id);
    let (status, json) = send(
        &app,
        "PATCH",
        &uri,
        Some(&admin_token),
        Some(serde_json::json!({ "name": "Alpine Wool Beanie" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["slug"], "alpine-wool-beanie");
}

#[tokio::test]
async fn test_review_rating_validated() {
    let (app, store) = setup();
    let token = signup_token(&app, "a@x.com", None).await;

    let product = beanie(499.0);
    store.insert_product(&product).await.unwrap();
    let uri = format!("/products/product/{}/reviews", product.id);

    let (status, _) = send(
        &app,
        "POST",
        &uri,
        Some(&token),
        Some(serde_json::json!({ "rating": 6, "comment": "??" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, json) = send(
        &app,
        "POST",
        &uri,
        Some(&token),
        Some(serde_json::json!({ "rating": 5, "comment": "Fits great" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["reviews"].as_array().unwrap().len(), 1);
    assert_eq!(json["reviews"][0]["author"], "Test Shopper");
}

// =============================================================================
// Checkout & webhook
// =============================================================================

fn captured_body(order: &Order) -> Vec<u8> {
    serde_json::to_vec(&serde_json::json!({
        "entity": "event",
        "event": "payment.captured",
        "payload": {
            "payment": {
                "entity": {
                    "id": "pay_NxQ8vJb2kR1mT3",
                    "order_id": order.gateway_order_id.clone(),
                    "method": "upi",
                    "amount": order.amount.amount,
                    "notes": { "order_id": order.id.to_string() }
                }
            }
        }
    }))
    .unwrap()
}

async fn post_webhook(
    app: &axum::Router,
    body: Vec<u8>,
    signature: &str,
) -> StatusCode {
    let request = Request::builder()
        .method("POST")
        .uri("/checkout/webhook")
        .header("content-type", "application/json")
        .header("x-razorpay-signature", signature)
        .body(Body::from(body))
        .unwrap();

    app.clone().oneshot(request).await.unwrap().status()
}

async fn seed_pending_order(store: &MemoryStore) -> Order {
    let order = Order::new(Uuid::new_v4(), Price::new(499.0, Currency::INR))
        .with_gateway_order("order_N5X2Ab9qkQ4LQ1");
    store.insert_order(&order).await.unwrap();
    order
}

#[tokio::test]
async fn test_webhook_tampered_signature_never_mutates() {
    let (app, store) = setup();
    let order = seed_pending_order(&store).await;

    let body = captured_body(&order);
    let mut signature = compute_hmac_sha256(WEBHOOK_SECRET, &body);
    signature.replace_range(0..1, if &signature[0..1] == "0" { "1" } else { "0" });

    let status = post_webhook(&app, body, &signature).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let unchanged = store
        .order_by_ref(&shop_core::OrderRef::Internal(order.id))
        .await
        .unwrap()
        .unwrap();
    assert_eq!(unchanged.status, OrderStatus::Pending);
    assert!(unchanged.payment.is_none());
}

#[tokio::test]
async fn test_webhook_missing_signature_header() {
    let (app, store) = setup();
    let order = seed_pending_order(&store).await;

    let request = Request::builder()
        .method("POST")
        .uri("/checkout/webhook")
        .header("content-type", "application/json")
        .body(Body::from(captured_body(&order)))
        .unwrap();
    let status = app.clone().oneshot(request).await.unwrap().status();
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_webhook_captured_transitions_and_is_replay_safe() {
    let (app, store) = setup();
    let order = seed_pending_order(&store).await;

    let body = captured_body(&order);
    let signature = compute_hmac_sha256(WEBHOOK_SECRET, &body);

    let status = post_webhook(&app, body.clone(), &signature).await;
    assert_eq!(status, StatusCode::OK);

    let paid = store
        .order_by_ref(&shop_core::OrderRef::Internal(order.id))
        .await
        .unwrap()
        .unwrap();
    assert_eq!(paid.status, OrderStatus::Paid);
    let payment = paid.payment.as_ref().unwrap();
    assert_eq!(payment.payment_id.as_deref(), Some("pay_NxQ8vJb2kR1mT3"));
    assert!(payment.captured);
    assert_eq!(payment.method.as_deref(), Some("upi"));

    // Redelivery overwrites the same fields; nothing duplicates.
    let status = post_webhook(&app, body, &signature).await;
    assert_eq!(status, StatusCode::OK);

    let replayed = store
        .order_by_ref(&shop_core::OrderRef::Internal(order.id))
        .await
        .unwrap()
        .unwrap();
    assert_eq!(replayed.status, OrderStatus::Paid);
    assert_eq!(
        replayed.payment.unwrap().payment_id.as_deref(),
        Some("pay_NxQ8vJb2kR1mT3")
    );
}

#[tokio::test]
async fn test_webhook_captured_resolves_by_gateway_id_when_notes_missing() {
    let (app, store) = setup();
    let order = seed_pending_order(&store).await;

    let body = serde_json::to_vec(&serde_json::json!({
        "entity": "event",
        "event": "payment.captured",
        "payload": {
            "payment": {
                "entity": {
                    "id": "pay_1",
                    "order_id": "order_N5X2Ab9qkQ4LQ1",
                    "method": "card",
                    "notes": {}
                }
            }
        }
    }))
    .unwrap();
    let signature = compute_hmac_sha256(WEBHOOK_SECRET, &body);

    let status = post_webhook(&app, body, &signature).await;
    assert_eq!(status, StatusCode::OK);

    let paid = store
        .order_by_ref(&shop_core::OrderRef::Internal(order.id))
        .await
        .unwrap()
        .unwrap();
    assert_eq!(paid.status, OrderStatus::Paid);
}

#[tokio::test]
async fn test_webhook_failed_attaches_raw_only() {
    let (app, store) = setup();
    let order = seed_pending_order(&store).await;

    let body = serde_json::to_vec(&serde_json::json!({
        "entity": "event",
        "event": "payment.failed",
        "payload": {
            "payment": {
                "entity": {
                    "id": "pay_failed_1",
                    "order_id": order.gateway_order_id.clone(),
                    "notes": { "order_id": order.id.to_string() }
                }
            }
        }
    }))
    .unwrap();
    let signature = compute_hmac_sha256(WEBHOOK_SECRET, &body);

    let status = post_webhook(&app, body.clone(), &signature).await;
    assert_eq!(status, StatusCode::OK);

    let failed = store
        .order_by_ref(&shop_core::OrderRef::Internal(order.id))
        .await
        .unwrap()
        .unwrap();
    assert_eq!(failed.status, OrderStatus::Failed);
    let payment = failed.payment.unwrap();
    assert!(payment.payment_id.is_none());
    assert!(!payment.captured);
    assert_eq!(
        payment.raw,
        serde_json::from_slice::<serde_json::Value>(&body).unwrap()
    );
}

#[tokio::test]
async fn test_webhook_unknown_event_acknowledged() {
    let (app, store) = setup();
    let order = seed_pending_order(&store).await;

    let body = serde_json::to_vec(&serde_json::json!({
        "entity": "event",
        "event": "refund.processed",
        "payload": {}
    }))
    .unwrap();
    let signature = compute_hmac_sha256(WEBHOOK_SECRET, &body);

    let status = post_webhook(&app, body, &signature).await;
    assert_eq!(status, StatusCode::OK);

    let unchanged = store
        .order_by_ref(&shop_core::OrderRef::Internal(order.id))
        .await
        .unwrap()
        .unwrap();
    assert_eq!(unchanged.status, OrderStatus::Pending);
}

#[tokio::test]
async fn test_webhook_unknown_order_is_skipped_silently() {
    let (app, _) = setup();

    let body = serde_json::to_vec(&serde_json::json!({
        "entity": "event",
        "event": "payment.captured",
        "payload": {
            "payment": {
                "entity": { "id": "pay_1", "order_id": "order_unknown", "notes": {} }
            }
        }
    }))
    .unwrap();
    let signature = compute_hmac_sha256(WEBHOOK_SECRET, &body);

    let status = post_webhook(&app, body, &signature).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_checkout_create_opens_pending_order() {
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/orders"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "id": "order_gw_123",
            "entity": "order",
            "amount": 2 * 49900,
            "currency": "INR",
            "status": "created"
        })))
        .mount(&server)
        .await;

    let (app, store) = build_app(Some(&server.uri()));
    let token = signup_token(&app, "a@x.com", None).await;

    let product = beanie(499.0);
    store.insert_product(&product).await.unwrap();
    let add = serde_json::json!({ "product_id": product.id, "quantity": 2 });
    send(&app, "POST", "/cart", Some(&token), Some(add)).await;

    let (status, json) = send(&app, "POST", "/checkout/create", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["gateway_order_id"], "order_gw_123");
    assert_eq!(json["amount"], 2 * 49900);
    assert_eq!(json["currency"], "INR");
    assert_eq!(json["key_id"], "rzp_test_key");

    // The pending order is persisted and visible in the caller's history.
    let (status, json) = send(&app, "GET", "/orders/my-orders", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["count"], 1);
    assert_eq!(json["orders"][0]["status"], "pending");
    assert_eq!(json["orders"][0]["gateway_order_id"], "order_gw_123");
}

#[tokio::test]
async fn test_checkout_empty_cart_rejected() {
    let (app, _) = setup();
    let token = signup_token(&app, "a@x.com", None).await;

    let (status, _) = send(&app, "POST", "/checkout/create", Some(&token), None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

// =============================================================================
// Orders
// =============================================================================

#[tokio::test]
async fn test_all_orders_flag_is_admin_only() {
    let (app, store) = setup();
    let user_token = signup_token(&app, "user@x.com", None).await;
    let admin_token = signup_token(&app, "admin@x.com", Some("admin")).await;

    seed_pending_order(&store).await;

    let (status, _) = send(&app, "GET", "/orders/my-orders?all=true", Some(&user_token), None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, json) = send(&app, "GET", "/orders/my-orders?all=true", Some(&admin_token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["count"], 1);

    // Without the flag an admin still sees only their own orders.
    let (status, json) = send(&app, "GET", "/orders/my-orders", Some(&admin_token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["count"], 0);
}
