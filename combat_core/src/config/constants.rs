//! Balance constants: player profile and archetype table

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::OnceLock;

use super::ConfigError;
use crate::enemy::{Ability, Amount, LootTable};
use crate::matchup::{default_matchups, Matchup};
use crate::stat_block::BaseStats;
use crate::types::EnemyKind;
use gear_core::{Chance, Multiplier, WeaponType};

/// Process-wide balance data
static GAME_CONSTANTS: OnceLock<GameConstants> = OnceLock::new();

/// Load the process-wide balance data from a TOML file.
///
/// Call once at startup, before building players or enemies.
/// Fails if the constants were already set or the file is invalid.
pub fn init_constants(path: &Path) -> Result<(), ConfigError> {
    let constants = GameConstants::load_from_path(path)?;
    GAME_CONSTANTS
        .set(constants)
        .map_err(|_| ConfigError::ValidationError("balance constants are already set".to_string()))
}

/// Set the process-wide balance data to the built-in defaults
pub fn init_constants_default() -> Result<(), ConfigError> {
    GAME_CONSTANTS
        .set(GameConstants::default())
        .map_err(|_| ConfigError::ValidationError("balance constants are already set".to_string()))
}

/// The process-wide balance data.
///
/// Falls back to the defaults if nothing was initialized yet; after that
/// the constants are fixed for the life of the process.
pub fn constants() -> &'static GameConstants {
    GAME_CONSTANTS.get_or_init(GameConstants::default)
}

/// Every tunable number in a run
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GameConstants {
    #[serde(default)]
    pub player: PlayerProfile,
    #[serde(default)]
    pub archetypes: ArchetypeTable,
}

impl GameConstants {
    /// Read and validate a constants file
    pub fn load_from_path(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    /// Parse and validate constants from TOML text
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let constants: GameConstants = toml::from_str(content)?;
        constants.validate()?;
        Ok(constants)
    }

    /// Reject values that clamping would silently rewrite
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.player.stats.max_hp == 0 {
            return Err(ConfigError::ValidationError(
                "player.stats.max_hp must be positive".to_string(),
            ));
        }
        for kind in EnemyKind::all() {
            let profile = self.archetypes.profile(*kind);
            if profile.stats.max_hp == 0 {
                return Err(ConfigError::ValidationError(format!(
                    "{kind}: max_hp must be positive"
                )));
            }
            for (label, amount) in [("hearts", profile.loot.hearts), ("brains", profile.loot.brains)] {
                if let Amount::Range([min, max]) = amount {
                    if min > max {
                        return Err(ConfigError::ValidationError(format!(
                            "{kind}: {label} loot range [{min}, {max}] is reversed"
                        )));
                    }
                }
            }
        }
        Ok(())
    }
}

/// Player starting profile
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerProfile {
    #[serde(default = "default_player_stats")]
    pub stats: BaseStats,
    /// Fraction of max HP restored by the adrenaline shot
    #[serde(default = "default_adrenaline_shot")]
    pub adrenaline_shot: Multiplier,
    #[serde(default = "default_matchups")]
    pub matchups: Vec<Matchup>,
}

impl Default for PlayerProfile {
    fn default() -> Self {
        PlayerProfile {
            stats: default_player_stats(),
            adrenaline_shot: default_adrenaline_shot(),
            matchups: default_matchups(),
        }
    }
}

fn default_player_stats() -> BaseStats {
    BaseStats::new(120, 20, 8, 0.15, 1.7, 0.10)
}

fn default_adrenaline_shot() -> Multiplier {
    Multiplier::new(0.3)
}

/// Stats, loot and ability of one archetype
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArchetypeProfile {
    pub stats: BaseStats,
    pub loot: LootTable,
    pub ability: Ability,
}

/// One profile per archetype
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArchetypeTable {
    #[serde(default = "default_normal")]
    pub normal: ArchetypeProfile,
    #[serde(default = "default_rotten")]
    pub rotten: ArchetypeProfile,
    #[serde(default = "default_armored")]
    pub armored: ArchetypeProfile,
    #[serde(default = "default_runner")]
    pub runner: ArchetypeProfile,
    #[serde(default = "default_boss")]
    pub boss: ArchetypeProfile,
}

impl ArchetypeTable {
    pub fn profile(&self, kind: EnemyKind) -> &ArchetypeProfile {
        match kind {
            EnemyKind::Normal => &self.normal,
            EnemyKind::Rotten => &self.rotten,
            EnemyKind::Armored => &self.armored,
            EnemyKind::Runner => &self.runner,
            EnemyKind::Boss => &self.boss,
        }
    }
}

impl Default for ArchetypeTable {
    fn default() -> Self {
        ArchetypeTable {
            normal: default_normal(),
            rotten: default_rotten(),
            armored: default_armored(),
            runner: default_runner(),
            boss: default_boss(),
        }
    }
}

fn default_normal() -> ArchetypeProfile {
    ArchetypeProfile {
        stats: BaseStats::new(100, 15, 5, 0.10, 1.5, 0.05),
        loot: LootTable::new(Amount::Range([40, 50]), Amount::Range([15, 18])),
        ability: Ability::Regenerate {
            heal: 5,
            below_hp: Multiplier::new(0.5),
        },
    }
}

fn default_rotten() -> ArchetypeProfile {
    ArchetypeProfile {
        stats: BaseStats::new(170, 25, 5, 0.10, 1.5, 0.0),
        loot: LootTable::new(Amount::Range([70, 90]), Amount::Range([25, 35])),
        ability: Ability::Venom {
            damage_per_turn: 5,
            turns: 3,
        },
    }
}

fn default_armored() -> ArchetypeProfile {
    ArchetypeProfile {
        stats: BaseStats::new(250, 30, 20, 0.10, 1.5, 0.0),
        loot: LootTable::new(Amount::Range([140, 160]), Amount::Range([50, 70])),
        ability: Ability::Harden {
            against: vec![WeaponType::Sharp],
            defense_gain: 5,
        },
    }
}

fn default_runner() -> ArchetypeProfile {
    ArchetypeProfile {
        stats: BaseStats::new(200, 30, 10, 0.25, 1.75, 0.40),
        loot: LootTable::new(Amount::Range([280, 320]), Amount::Range([120, 150])),
        ability: Ability::Evade {
            against: vec![WeaponType::Heavy, WeaponType::Sharp],
            dodge_gain: Chance::new(0.10),
        },
    }
}

fn default_boss() -> ArchetypeProfile {
    ArchetypeProfile {
        stats: BaseStats::new(350, 25, 12, 0.20, 1.5, 0.01),
        loot: LootTable::new(Amount::Fixed(100), Amount::Fixed(100)),
        ability: Ability::Rampage {
            enrage_at_hp: Multiplier::new(0.5),
            enrage_boost: Multiplier::new(0.5),
            smash_multiplier: Multiplier::new(1.5),
            smash_chance: Chance::new(0.25),
        },
    }
}
