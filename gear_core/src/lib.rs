//! gear_core - Equipment and currency values for the zombie stage combat engine
//!
//! This library provides:
//! - Weapon, Armor, Potion: immutable item values with costs
//! - OrganParts: the hearts/brains wallet with atomic payment
//! - Chance, Multiplier: fixed-point stat values that add and remove exactly
//! - builtin: the stock gear list

pub mod builtin;
pub mod currency;
pub mod item;
pub mod types;

pub use currency::OrganParts;
pub use item::{Armor, Cost, Potion, Weapon};
pub use types::{Chance, Multiplier, WeaponType, BASIS_POINTS};
