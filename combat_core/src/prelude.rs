//! Prelude module for convenient imports
//!
//! ```rust
//! use combat_core::prelude::*;
//! ```

// Core types
pub use crate::stat_block::{BaseStats, StatBlock, StatsSnapshot};
pub use crate::types::{EnemyKind, FINAL_STAGE};

// Combatants
pub use crate::enemy::{AbilityEffect, Enemy, EnemyMove};
pub use crate::player::Player;

// Combat
pub use crate::combat::HitResult;

// Config
pub use crate::config::{constants, init_constants, init_constants_default};

// Re-exports from gear_core
pub use gear_core::{Armor, Chance, Cost, Multiplier, OrganParts, Potion, Weapon, WeaponType};
