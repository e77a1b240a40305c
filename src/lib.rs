//! LightForge asset catalogs
//!
//! Generates the default gobo textures and builds the three preview
//! catalogs (gobos, HDRIs, reflectors) a studio-lighting front end lists.
//! All filesystem and image access goes through [`host::AssetHost`].

pub mod catalog;
pub mod config;
pub mod host;
pub mod inventory;
pub mod layout;
pub mod presets;
pub mod state;
pub mod texture;

pub use catalog::{build_catalog, CatalogError, CatalogPolicy};
pub use config::{Config, ConfigError};
pub use host::{AssetHost, FsHost, HostError, LoadError};
pub use inventory::{inventory, Inventory};
pub use layout::AssetLayout;
pub use state::{Catalog, CatalogEntry, CatalogKind, CatalogStore, StoreError, ThumbnailRef};
pub use texture::{synthesize_defaults, RasterImage, SynthError};
