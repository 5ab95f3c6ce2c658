//! Weapon-type match-ups: bonuses the player gets against specific archetypes

use crate::stat_block::StatBlock;
use crate::types::EnemyKind;
use gear_core::{Chance, WeaponType};
use serde::{Deserialize, Serialize};

/// Effect of a match-up, applied before the attack's crit roll
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum MatchupEffect {
    /// Flat damage added to this attack
    BonusDamage { amount: u32 },
    /// Permanently strip defense from the enemy
    ShredDefense { amount: u32 },
    /// Permanently lower the enemy's dodge chance
    CutDodge { amount: Chance },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Matchup {
    pub weapon: WeaponType,
    pub against: EnemyKind,
    pub effect: MatchupEffect,
}

impl Matchup {
    pub fn applies(&self, weapon: WeaponType, enemy: EnemyKind) -> bool {
        self.weapon == weapon && self.against == enemy
    }

    /// Apply to the defender; returns flat bonus damage for this attack
    pub fn apply(&self, defender: &mut StatBlock) -> u32 {
        match self.effect {
            MatchupEffect::BonusDamage { amount } => amount,
            MatchupEffect::ShredDefense { amount } => {
                defender.set_defense(defender.defense().saturating_sub(amount));
                0
            }
            MatchupEffect::CutDodge { amount } => {
                defender.set_dodge_chance(defender.dodge_chance().saturating_sub(amount));
                0
            }
        }
    }
}

/// Sharp cuts through rot, heavy cracks armor, guns outpace runners
pub fn default_matchups() -> Vec<Matchup> {
    vec![
        Matchup {
            weapon: WeaponType::Sharp,
            against: EnemyKind::Rotten,
            effect: MatchupEffect::BonusDamage { amount: 10 },
        },
        Matchup {
            weapon: WeaponType::Heavy,
            against: EnemyKind::Armored,
            effect: MatchupEffect::ShredDefense { amount: 5 },
        },
        Matchup {
            weapon: WeaponType::Gun,
            against: EnemyKind::Runner,
            effect: MatchupEffect::CutDodge {
                amount: Chance::new(0.05),
            },
        },
    ]
}
