//! StatBlock - the mutable stat container shared by the player and every enemy

mod snapshot;

pub use snapshot::StatsSnapshot;

use crate::combat::{self, HitResult};
use crate::dot::{Poison, PoisonTick};
use gear_core::{Chance, Multiplier};
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Construction-time stats, as written in config files
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BaseStats {
    pub max_hp: u32,
    #[serde(default)]
    pub attack: u32,
    #[serde(default)]
    pub defense: u32,
    #[serde(default)]
    pub crit_chance: Chance,
    #[serde(default = "default_crit_multiplier")]
    pub crit_multiplier: Multiplier,
    #[serde(default)]
    pub dodge_chance: Chance,
}

fn default_crit_multiplier() -> Multiplier {
    Multiplier::ONE
}

impl BaseStats {
    pub fn new(
        max_hp: u32,
        attack: u32,
        defense: u32,
        crit_chance: f64,
        crit_multiplier: f64,
        dodge_chance: f64,
    ) -> Self {
        BaseStats {
            max_hp,
            attack,
            defense,
            crit_chance: Chance::new(crit_chance),
            crit_multiplier: Multiplier::new(crit_multiplier),
            dodge_chance: Chance::new(dodge_chance),
        }
    }
}

/// Live combat stats.
///
/// Every setter clamps instead of rejecting: `max_hp >= 1`, `hp` in
/// `[0, max_hp]`, `crit_multiplier >= 1.0`, chances in `[0, 1]`. Reaching 0 HP
/// kills the combatant for good; nothing brings it back. Deserializing
/// rejects any record that breaks these bounds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "StatBlockRecord")]
pub struct StatBlock {
    max_hp: u32,
    hp: u32,
    attack: u32,
    defense: u32,
    crit_chance: Chance,
    crit_multiplier: Multiplier,
    dodge_chance: Chance,
    alive: bool,
    poison: Poison,
}

/// Unchecked wire form of [`StatBlock`]
#[derive(Deserialize)]
struct StatBlockRecord {
    max_hp: u32,
    hp: u32,
    attack: u32,
    defense: u32,
    crit_chance: Chance,
    crit_multiplier: Multiplier,
    dodge_chance: Chance,
    alive: bool,
    #[serde(default)]
    poison: Poison,
}

impl TryFrom<StatBlockRecord> for StatBlock {
    type Error = String;

    fn try_from(record: StatBlockRecord) -> Result<Self, Self::Error> {
        if record.max_hp == 0 {
            return Err("max_hp must be positive".to_string());
        }
        if record.hp > record.max_hp {
            return Err(format!("hp {} exceeds max_hp {}", record.hp, record.max_hp));
        }
        if record.alive != (record.hp > 0) {
            return Err(format!("alive={} does not match hp {}", record.alive, record.hp));
        }
        Ok(StatBlock {
            max_hp: record.max_hp,
            hp: record.hp,
            attack: record.attack,
            defense: record.defense,
            crit_chance: record.crit_chance,
            crit_multiplier: record.crit_multiplier.max(Multiplier::ONE),
            dodge_chance: record.dodge_chance,
            alive: record.alive,
            poison: record.poison,
        })
    }
}

impl StatBlock {
    /// Build a full-health stat block from base stats
    pub fn new(base: &BaseStats) -> Self {
        let max_hp = base.max_hp.max(1);
        StatBlock {
            max_hp,
            hp: max_hp,
            attack: base.attack,
            defense: base.defense,
            crit_chance: base.crit_chance,
            crit_multiplier: base.crit_multiplier.max(Multiplier::ONE),
            dodge_chance: base.dodge_chance,
            alive: true,
            poison: Poison::default(),
        }
    }

    pub fn max_hp(&self) -> u32 {
        self.max_hp
    }

    pub fn hp(&self) -> u32 {
        self.hp
    }

    pub fn attack(&self) -> u32 {
        self.attack
    }

    pub fn defense(&self) -> u32 {
        self.defense
    }

    pub fn crit_chance(&self) -> Chance {
        self.crit_chance
    }

    pub fn crit_multiplier(&self) -> Multiplier {
        self.crit_multiplier
    }

    pub fn dodge_chance(&self) -> Chance {
        self.dodge_chance
    }

    pub fn is_alive(&self) -> bool {
        self.alive
    }

    pub fn poison(&self) -> &Poison {
        &self.poison
    }

    pub fn is_poisoned(&self) -> bool {
        self.poison.is_active()
    }

    /// Set HP, clamped to `[0, max_hp]`. Ignored once dead.
    pub fn set_hp(&mut self, hp: u32) {
        if !self.alive {
            return;
        }
        self.hp = hp.min(self.max_hp);
        if self.hp == 0 {
            self.alive = false;
        }
    }

    /// Set max HP (at least 1), pulling current HP down if needed
    pub fn set_max_hp(&mut self, max_hp: u32) {
        self.max_hp = max_hp.max(1);
        self.hp = self.hp.min(self.max_hp);
    }

    pub fn set_attack(&mut self, attack: u32) {
        self.attack = attack;
    }

    pub fn set_defense(&mut self, defense: u32) {
        self.defense = defense;
    }

    pub fn set_crit_chance(&mut self, chance: Chance) {
        self.crit_chance = chance;
    }

    /// Set the crit multiplier, never below 1.0
    pub fn set_crit_multiplier(&mut self, multiplier: Multiplier) {
        self.crit_multiplier = multiplier.max(Multiplier::ONE);
    }

    pub fn set_dodge_chance(&mut self, chance: Chance) {
        self.dodge_chance = chance;
    }

    /// Restore HP up to `max_hp`. Returns the HP actually restored.
    pub fn heal(&mut self, amount: u32) -> u32 {
        if amount == 0 || !self.alive {
            return 0;
        }
        let before = self.hp;
        self.hp = self.hp.saturating_add(amount).min(self.max_hp);
        self.hp - before
    }

    /// Fraction-of-max-HP checks used by ability thresholds
    pub fn hp_below(&self, fraction: Multiplier) -> bool {
        fraction.is_below(self.hp, self.max_hp)
    }

    pub fn hp_at_or_below(&self, fraction: Multiplier) -> bool {
        fraction.is_at_or_below(self.hp, self.max_hp)
    }

    /// Take a hit of `raw_damage` through dodge and defense
    pub fn take_damage(&mut self, raw_damage: u32, rng: &mut impl Rng) -> HitResult {
        combat::take_damage_with_rng(self, raw_damage, rng)
    }

    /// Attack `target` with this block's attack power
    pub fn basic_attack(&self, target: &mut StatBlock, rng: &mut impl Rng) -> HitResult {
        combat::basic_attack_with_rng(self, target, rng)
    }

    /// Apply or refresh poison. Returns false if ignored (dead or zero arguments).
    pub fn apply_poison(&mut self, damage_per_turn: u32, turns: u32) -> bool {
        if !self.alive {
            return false;
        }
        self.poison.refresh(damage_per_turn, turns)
    }

    /// Tick poison at turn start. Poison bypasses dodge and defense.
    pub fn tick_poison(&mut self) -> PoisonTick {
        if !self.alive {
            return PoisonTick::default();
        }
        let damage = self.poison.tick(self.hp);
        self.set_hp(self.hp - damage);
        PoisonTick {
            damage,
            turns_remaining: self.poison.turns_remaining(),
            fatal: damage > 0 && !self.alive,
        }
    }

    pub fn clear_poison(&mut self) {
        self.poison.clear();
    }

    pub fn snapshot(&self, name: &str) -> StatsSnapshot {
        StatsSnapshot::capture(name, self)
    }

    /// Apply a resolved hit's defense/HP changes. Only combat resolution calls this.
    pub(crate) fn absorb(&mut self, defense_lost: u32, hp_lost: u32) {
        self.defense -= defense_lost;
        self.set_hp(self.hp - hp_lost);
    }
}
