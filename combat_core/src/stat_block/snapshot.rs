use super::StatBlock;
use serde::{Deserialize, Serialize};

/// Read-only copy of a combatant's stats, handed to presentation layers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatsSnapshot {
    pub name: String,
    pub hp: u32,
    pub max_hp: u32,
    pub attack: u32,
    pub defense: u32,
    pub crit_chance: f64,
    pub crit_multiplier: f64,
    pub dodge_chance: f64,
    pub alive: bool,
    pub poison_turns: u32,
    pub poison_damage: u32,
}

impl StatsSnapshot {
    pub fn capture(name: &str, stats: &StatBlock) -> Self {
        StatsSnapshot {
            name: name.to_string(),
            hp: stats.hp(),
            max_hp: stats.max_hp(),
            attack: stats.attack(),
            defense: stats.defense(),
            crit_chance: stats.crit_chance().value(),
            crit_multiplier: stats.crit_multiplier().value(),
            dodge_chance: stats.dodge_chance().value(),
            alive: stats.is_alive(),
            poison_turns: stats.poison().turns_remaining(),
            poison_damage: stats.poison().damage_per_turn(),
        }
    }

    /// HP as a fraction of max, for health bars
    pub fn hp_fraction(&self) -> f64 {
        if self.max_hp == 0 {
            return 0.0;
        }
        self.hp as f64 / self.max_hp as f64
    }
}
