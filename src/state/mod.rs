//! State management module
//!
//! This module handles all catalog state, including:
//! - The installed catalog per collection (library.rs)
//! - Shared data structures (data.rs)

pub mod data;
pub mod library;

pub use data::{Catalog, CatalogEntry, CatalogKind, CatalogSource, ThumbnailHandle, ThumbnailRef};
pub use library::{CatalogStore, StoreError};
