//! Tunable balance data, loaded from TOML

mod constants;

pub use constants::{
    constants, init_constants, init_constants_default, ArchetypeProfile, ArchetypeTable,
    GameConstants, PlayerProfile,
};

use thiserror::Error;

/// Error loading combat configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Parse error: {0}")]
    ParseError(#[from] toml::de::Error),
    #[error("Validation error: {0}")]
    ValidationError(String),
}
