//! # shop-api
//!
//! HTTP API layer for the hatrack storefront.
//!
//! This crate provides:
//! - Axum-based HTTP server
//! - Bearer-token sessions (JWT) with argon2 credential hashing
//! - REST endpoints for accounts, catalog, cart and orders
//! - The gateway webhook handler for payment outcomes
//!
//! ## Endpoints
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | GET | `/health` | Health check |
//! | POST | `/auth/signup` | Register |
//! | POST | `/auth/login` | Log in |
//! | GET | `/auth/me` | Session account |
//! | GET | `/users/profile` | Read profile |
//! | PUT | `/users/update` | Partial profile update |
//! | GET/POST/PATCH | `/cart` | Read / add / set quantity |
//! | DELETE | `/cart/{product_id}` | Remove item |
//! | GET | `/products` | Catalog listing |
//! | GET | `/products/{slug}` | Product by slug |
//! | GET | `/products/product/{id}` | Product by id |
//! | POST | `/products/create` | Create product (admin) |
//! | GET | `/orders/my-orders` | Order history |
//! | POST | `/checkout/create` | Open checkout |
//! | POST | `/checkout/webhook` | Gateway notification |

pub mod assets;
pub mod auth;
pub mod error;
pub mod handlers;
pub mod routes;
pub mod state;

pub use routes::create_router;
pub use state::{AppConfig, AppState};
