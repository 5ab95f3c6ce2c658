//! Enemy archetypes

pub mod ability;
mod loot;

pub use ability::{Ability, AbilityEffect, Trigger};
pub use loot::{Amount, LootTable};

use crate::combat::{basic_attack_with_rng, HitResult};
use crate::config::{constants, ArchetypeProfile};
use crate::stat_block::{StatBlock, StatsSnapshot};
use crate::types::EnemyKind;
use gear_core::{OrganParts, WeaponType};
use rand::Rng;
use serde::{Deserialize, Serialize};

/// What an enemy does with its action
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EnemyMove {
    BasicAttack,
    Special,
}

/// A basic attack plus whatever the landing hit triggered
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnemyAttack {
    pub hit: HitResult,
    pub effect: AbilityEffect,
}

/// One enemy instance, built fresh for each stage
#[derive(Debug, Clone, PartialEq)]
pub struct Enemy {
    kind: EnemyKind,
    stats: StatBlock,
    ability: Ability,
    loot: LootTable,
    enraged: bool,
}

impl Enemy {
    /// Build an archetype from the global constants
    pub fn new(kind: EnemyKind) -> Self {
        Self::from_profile(kind, constants().archetypes.profile(kind))
    }

    pub fn from_profile(kind: EnemyKind, profile: &ArchetypeProfile) -> Self {
        Enemy {
            kind,
            stats: StatBlock::new(&profile.stats),
            ability: profile.ability.clone(),
            loot: profile.loot,
            enraged: false,
        }
    }

    /// The archetype for a stage; `None` past the final stage
    pub fn for_stage(stage: u32) -> Option<Self> {
        EnemyKind::for_stage(stage).map(Enemy::new)
    }

    pub fn kind(&self) -> EnemyKind {
        self.kind
    }

    pub fn name(&self) -> &'static str {
        self.kind.name()
    }

    pub fn stats(&self) -> &StatBlock {
        &self.stats
    }

    pub fn stats_mut(&mut self) -> &mut StatBlock {
        &mut self.stats
    }

    pub fn ability(&self) -> &Ability {
        &self.ability
    }

    pub fn loot(&self) -> &LootTable {
        &self.loot
    }

    pub fn is_alive(&self) -> bool {
        self.stats.is_alive()
    }

    pub fn is_enraged(&self) -> bool {
        self.enraged
    }

    /// Fire the ability for `trigger`
    pub fn trigger(&mut self, trigger: Trigger<'_>) -> AbilityEffect {
        ability::resolve(self, trigger)
    }

    /// Turn-start trigger. The boss enrages here.
    pub fn start_turn(&mut self) -> AbilityEffect {
        self.trigger(Trigger::TurnStart)
    }

    /// Turn-end trigger. Regenerating archetypes heal here.
    pub fn end_turn(&mut self) -> AbilityEffect {
        self.trigger(Trigger::TurnEnd)
    }

    /// Reactive trigger fired before each player attack
    pub fn react_to_weapon(&mut self, weapon: Option<WeaponType>) -> AbilityEffect {
        self.trigger(Trigger::PlayerAttack(weapon))
    }

    /// Pick basic attack or special move
    pub fn choose_move(&self, rng: &mut impl Rng) -> EnemyMove {
        if self.ability.special_chance().roll(rng) {
            EnemyMove::Special
        } else {
            EnemyMove::BasicAttack
        }
    }

    /// Basic attack; a landing hit may trigger on-hit abilities (venom)
    pub fn basic_attack(&mut self, target: &mut StatBlock, rng: &mut impl Rng) -> EnemyAttack {
        let hit = basic_attack_with_rng(&self.stats, target, rng);
        let effect = self.trigger(Trigger::AttackResolved { hit, target });
        EnemyAttack { hit, effect }
    }

    /// Special move (Toxic Smash for the boss). `AbilityEffect::None` if the archetype has none.
    pub fn use_special(&mut self, target: &mut StatBlock, rng: &mut impl Rng) -> AbilityEffect {
        self.trigger(Trigger::Special { target, rng })
    }

    /// Independent loot draw
    pub fn drop_loot(&self, rng: &mut impl Rng) -> OrganParts {
        self.loot.roll(rng)
    }

    pub fn snapshot(&self) -> StatsSnapshot {
        self.stats.snapshot(self.name())
    }
}
