//! # shop-store
//!
//! Persistence layer for the hatrack storefront.
//!
//! This crate provides:
//! - `Store` - the persistence trait the HTTP layer programs against
//! - `PgStore` - the PostgreSQL implementation (shared pool, embedded
//!   migrations, atomic cart merge)
//! - `MemoryStore` - an in-memory implementation with the same semantics,
//!   used by tests and local development
//!
//! ## Example
//!
//! ```rust,ignore
//! use shop_store::{BoxedStore, PgStore};
//! use std::sync::Arc;
//!
//! let store = PgStore::connect(&database_url).await?;
//! store.migrate().await?;
//! let store: BoxedStore = Arc::new(store);
//! ```

pub mod memory;
pub mod postgres;
pub mod store;

// Re-exports
pub use memory::MemoryStore;
pub use postgres::PgStore;
pub use store::{BoxedStore, Store};
