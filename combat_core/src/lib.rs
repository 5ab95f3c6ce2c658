//! combat_core - Stat model and combatants for the zombie stage combat engine
//!
//! This library provides:
//! - StatBlock: clamped HP/attack/defense/crit/dodge plus poison
//! - Combat resolution: crit roll, dodge roll, defense absorption
//! - Player: equipment slots, weapon match-ups, potions and wallet
//! - Enemy: the five archetypes, their abilities and loot tables
//! - GameConstants: balance data loaded from TOML
//!
//! # Quick Start
//!
//! ```rust
//! use combat_core::prelude::*;
//! use rand::SeedableRng;
//!
//! let mut rng = rand_chacha::ChaCha8Rng::seed_from_u64(1);
//! let mut player = Player::new("Survivor");
//! player.equip_weapon(Some(gear_core::builtin::wooden_stick()));
//!
//! let mut enemy = Enemy::for_stage(1).unwrap();
//! let hit = player.attack_enemy(&mut enemy, &mut rng);
//! let reply = enemy.basic_attack(player.stats_mut(), &mut rng);
//! println!("dealt {}, took {}", hit.damage, reply.hit.damage);
//! ```

pub mod combat;
pub mod config;
pub mod dot;
pub mod enemy;
pub mod matchup;
pub mod player;
pub mod prelude;
pub mod stat_block;
pub mod types;

// Core API - what most users need
pub use combat::HitResult;
pub use enemy::{Ability, AbilityEffect, Enemy, EnemyAttack, EnemyMove, Trigger};
pub use player::Player;
pub use stat_block::{BaseStats, StatBlock, StatsSnapshot};
pub use types::{EnemyKind, FINAL_STAGE};

// Configuration
pub use config::{constants, init_constants, init_constants_default, ConfigError, GameConstants};
pub use dot::{Poison, PoisonTick};
