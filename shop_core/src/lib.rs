mod catalog;
mod config;
mod registry;
mod shop;

pub use catalog::Catalog;
pub use registry::{CatalogRegistry, CatalogSource};
pub use shop::Shop;

use gear_core::{Cost, OrganParts};
use std::path::PathBuf;
use thiserror::Error;

/// Error loading catalog configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error reading '{path:?}': {error}")]
    Io {
        error: std::io::Error,
        path: Option<PathBuf>,
    },
    #[error("Parse error in '{path}': {error}")]
    Parse {
        error: toml::de::Error,
        path: PathBuf,
    },
    #[error("Validation error in '{path}': {message}")]
    Validation { message: String, path: PathBuf },
}

/// Why a purchase was refused. Nothing changes when one is returned.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PurchaseError {
    #[error("'{0}' is not sold here")]
    NotInCatalog(String),
    #[error("'{item}' costs {cost}, wallet holds {wallet}")]
    CannotAfford {
        item: String,
        cost: Cost,
        wallet: OrganParts,
    },
}
