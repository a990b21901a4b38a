//! Shopping Cart Domain Module
//!
//! This module contains the storefront's client-side cart, including:
//! - Domain models (CartLine, Cart)
//! - Business logic helpers (line merging, formatting)
//! - Durable storage backends
//! - The persisting cart store

pub mod helpers;
pub mod models;
pub mod storage;
pub mod store;

// Re-export commonly used types for convenience
pub use models::{Cart, CartError, CartLine};
pub use storage::{CartStorage, FileStorage, MemoryStorage, StorageError};
pub use store::{CartStore, CART_STORAGE_KEY};
