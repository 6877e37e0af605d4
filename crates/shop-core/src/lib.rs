//! # shop-core
//!
//! Core domain types for the hatrack storefront.
//!
//! This crate provides:
//! - `User`, `Role` and `Address` for accounts
//! - `Product`, `Price`, `Category` and slug derivation for the catalog
//! - `CartEntry` and the resolved `CartView` for carts
//! - `Order`, `OrderStatus` and `PaymentInfo` for the checkout flow
//! - `ShopError` for typed error handling
//!
//! ## Example
//!
//! ```rust,ignore
//! use shop_core::{Category, Currency, Order, Price, Product};
//!
//! // Create a catalog entry; the slug is derived from the name
//! let cap = Product::new(
//!     "Classic Baseball Cap",
//!     "Six-panel cotton twill",
//!     Price::new(499.0, Currency::INR),
//!     Category::BaseballCap,
//! );
//! assert_eq!(cap.slug, "classic-baseball-cap");
//!
//! // Open a checkout attempt for it
//! let order = Order::new(user_id, cap.effective_price());
//! ```

pub mod cart;
pub mod error;
pub mod order;
pub mod product;
pub mod user;

// Re-exports for convenience
pub use cart::{CartEntry, CartLine, CartView};
pub use error::{ShopError, ShopResult};
pub use order::{Order, OrderRef, OrderStatus, PaymentInfo};
pub use product::{slugify, Category, Currency, ImageRef, Price, Product, ProductSort, Review};
pub use user::{
    validate_email, validate_password, Address, ProfileUpdate, Role, User, MIN_PASSWORD_LENGTH,
};
