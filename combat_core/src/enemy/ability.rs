//! Archetype abilities.
//!
//! Each archetype carries one [`Ability`] with its own parameters. The battle
//! state machine decides *when* an ability may fire by sending a [`Trigger`];
//! [`resolve`] decides *whether* it fires and applies the effect.

use super::Enemy;
use crate::combat::{take_damage_with_rng, HitResult};
use crate::stat_block::StatBlock;
use gear_core::{Chance, Multiplier, WeaponType};
use rand::RngCore;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Per-archetype special ability
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Ability {
    /// Heal a flat amount at the end of its own turn while under a fraction of max HP
    Regenerate { heal: u32, below_hp: Multiplier },
    /// Poison the target whenever a basic attack draws blood
    Venom { damage_per_turn: u32, turns: u32 },
    /// Gain defense each time the player attacks with one of these weapon types
    Harden {
        against: Vec<WeaponType>,
        defense_gain: u32,
    },
    /// Gain dodge chance each time the player attacks with one of these weapon types
    Evade {
        against: Vec<WeaponType>,
        dodge_gain: Chance,
    },
    /// One-time enrage at low HP, plus a Toxic Smash special attack
    Rampage {
        enrage_at_hp: Multiplier,
        enrage_boost: Multiplier,
        smash_multiplier: Multiplier,
        smash_chance: Chance,
    },
}

impl Ability {
    /// Chance of using the special move instead of a basic attack
    pub fn special_chance(&self) -> Chance {
        match self {
            Ability::Rampage { smash_chance, .. } => *smash_chance,
            _ => Chance::ZERO,
        }
    }
}

/// Points in a battle where an ability may fire
pub enum Trigger<'a> {
    /// Start of the enemy's turn, before it acts
    TurnStart,
    /// End of the enemy's turn, after it acted
    TurnEnd,
    /// The player is about to attack, holding a weapon of this type
    PlayerAttack(Option<WeaponType>),
    /// The enemy's basic attack just resolved against `target`
    AttackResolved {
        hit: HitResult,
        target: &'a mut StatBlock,
    },
    /// The enemy spends its action on its special move
    Special {
        target: &'a mut StatBlock,
        rng: &'a mut dyn RngCore,
    },
}

/// What an ability did
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AbilityEffect {
    None,
    Regenerated { healed: u32 },
    Poisoned { damage_per_turn: u32, turns: u32 },
    Hardened { defense_gain: u32, defense: u32 },
    Evaded { dodge_gain: Chance, dodge_chance: Chance },
    Enraged { attack_gain: u32, attack: u32 },
    ToxicSmash(HitResult),
}

impl AbilityEffect {
    pub fn is_none(&self) -> bool {
        matches!(self, AbilityEffect::None)
    }
}

/// Resolve `enemy`'s ability against a trigger. Dead enemies do nothing.
pub fn resolve(enemy: &mut Enemy, trigger: Trigger<'_>) -> AbilityEffect {
    let kind = enemy.kind;
    let Enemy {
        stats,
        ability,
        enraged,
        ..
    } = enemy;

    if !stats.is_alive() {
        return AbilityEffect::None;
    }

    let effect = match (&*ability, trigger) {
        (Ability::Regenerate { heal, below_hp }, Trigger::TurnEnd) => {
            if !stats.hp_below(*below_hp) {
                return AbilityEffect::None;
            }
            match stats.heal(*heal) {
                0 => AbilityEffect::None,
                healed => AbilityEffect::Regenerated { healed },
            }
        }
        (
            Ability::Venom {
                damage_per_turn,
                turns,
            },
            Trigger::AttackResolved { hit, target },
        ) => {
            if hit.wounded() && target.apply_poison(*damage_per_turn, *turns) {
                AbilityEffect::Poisoned {
                    damage_per_turn: *damage_per_turn,
                    turns: *turns,
                }
            } else {
                AbilityEffect::None
            }
        }
        (
            Ability::Harden {
                against,
                defense_gain,
            },
            Trigger::PlayerAttack(Some(weapon)),
        ) if against.contains(&weapon) => {
            stats.set_defense(stats.defense().saturating_add(*defense_gain));
            AbilityEffect::Hardened {
                defense_gain: *defense_gain,
                defense: stats.defense(),
            }
        }
        (
            Ability::Evade {
                against,
                dodge_gain,
            },
            Trigger::PlayerAttack(Some(weapon)),
        ) if against.contains(&weapon) => {
            stats.set_dodge_chance(stats.dodge_chance().saturating_add(*dodge_gain));
            AbilityEffect::Evaded {
                dodge_gain: *dodge_gain,
                dodge_chance: stats.dodge_chance(),
            }
        }
        (
            Ability::Rampage {
                enrage_at_hp,
                enrage_boost,
                ..
            },
            Trigger::TurnStart,
        ) => {
            if *enraged || !stats.hp_at_or_below(*enrage_at_hp) {
                return AbilityEffect::None;
            }
            let attack_gain = enrage_boost.apply(stats.attack());
            stats.set_attack(stats.attack().saturating_add(attack_gain));
            *enraged = true;
            AbilityEffect::Enraged {
                attack_gain,
                attack: stats.attack(),
            }
        }
        (
            Ability::Rampage {
                smash_multiplier, ..
            },
            Trigger::Special { target, rng },
        ) => {
            let raw_damage = smash_multiplier.apply(stats.attack());
            let mut rng = rng;
            AbilityEffect::ToxicSmash(take_damage_with_rng(target, raw_damage, &mut rng))
        }
        _ => AbilityEffect::None,
    };

    if !effect.is_none() {
        debug!(enemy = %kind, ?effect, "ability fired");
    }
    effect
}
