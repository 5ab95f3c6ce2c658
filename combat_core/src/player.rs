//! The player: stats plus equipment slots, potions and a wallet

use crate::combat::{basic_attack_with_rng, strike_with_rng, HitResult};
use crate::config::{constants, PlayerProfile};
use crate::enemy::Enemy;
use crate::matchup::Matchup;
use crate::stat_block::{StatBlock, StatsSnapshot};
use gear_core::{Armor, Chance, Cost, Multiplier, OrganParts, Potion, Weapon, WeaponType};
use rand::Rng;
use tracing::debug;

/// Stat changes an equipped item actually made, after clamping.
///
/// Unequipping subtracts exactly these, so equip followed by unequip always
/// lands back on the starting stats.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct StatDelta {
    attack: u32,
    defense: u32,
    crit_chance: Chance,
    crit_multiplier: Multiplier,
    dodge_chance: Chance,
}

impl StatDelta {
    fn from_weapon(weapon: &Weapon) -> Self {
        StatDelta {
            attack: weapon.attack,
            crit_chance: weapon.crit_chance,
            crit_multiplier: weapon.crit_damage,
            ..Default::default()
        }
    }

    fn from_armor(armor: &Armor) -> Self {
        StatDelta {
            defense: armor.defense,
            dodge_chance: armor.dodge_chance,
            ..Default::default()
        }
    }

    /// Add to `stats`, returning what was really added
    fn apply(self, stats: &mut StatBlock) -> StatDelta {
        let before = StatDelta::read(stats);
        stats.set_attack(before.attack.saturating_add(self.attack));
        stats.set_defense(before.defense.saturating_add(self.defense));
        stats.set_crit_chance(before.crit_chance.saturating_add(self.crit_chance));
        stats.set_crit_multiplier(before.crit_multiplier.saturating_add(self.crit_multiplier));
        stats.set_dodge_chance(before.dodge_chance.saturating_add(self.dodge_chance));

        let after = StatDelta::read(stats);
        StatDelta {
            attack: after.attack - before.attack,
            defense: after.defense - before.defense,
            crit_chance: after.crit_chance.saturating_sub(before.crit_chance),
            crit_multiplier: after.crit_multiplier.saturating_sub(before.crit_multiplier),
            dodge_chance: after.dodge_chance.saturating_sub(before.dodge_chance),
        }
    }

    fn undo(self, stats: &mut StatBlock) {
        stats.set_attack(stats.attack().saturating_sub(self.attack));
        stats.set_defense(stats.defense().saturating_sub(self.defense));
        stats.set_crit_chance(stats.crit_chance().saturating_sub(self.crit_chance));
        stats.set_crit_multiplier(stats.crit_multiplier().saturating_sub(self.crit_multiplier));
        stats.set_dodge_chance(stats.dodge_chance().saturating_sub(self.dodge_chance));
    }

    fn read(stats: &StatBlock) -> StatDelta {
        StatDelta {
            attack: stats.attack(),
            defense: stats.defense(),
            crit_chance: stats.crit_chance(),
            crit_multiplier: stats.crit_multiplier(),
            dodge_chance: stats.dodge_chance(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
struct Equipped<T> {
    item: T,
    applied: StatDelta,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Player {
    name: String,
    stats: StatBlock,
    weapon: Option<Equipped<Weapon>>,
    armor: Option<Equipped<Armor>>,
    potions: Vec<Potion>,
    wallet: OrganParts,
    adrenaline_shot: Multiplier,
    matchups: Vec<Matchup>,
}

impl Player {
    /// New player from the global constants: no gear, no potions, empty wallet
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_profile(name, &constants().player)
    }

    pub fn with_profile(name: impl Into<String>, profile: &PlayerProfile) -> Self {
        Player {
            name: name.into(),
            stats: StatBlock::new(&profile.stats),
            weapon: None,
            armor: None,
            potions: Vec::new(),
            wallet: OrganParts::default(),
            adrenaline_shot: profile.adrenaline_shot,
            matchups: profile.matchups.clone(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn stats(&self) -> &StatBlock {
        &self.stats
    }

    pub fn stats_mut(&mut self) -> &mut StatBlock {
        &mut self.stats
    }

    pub fn is_alive(&self) -> bool {
        self.stats.is_alive()
    }

    pub fn weapon(&self) -> Option<&Weapon> {
        self.weapon.as_ref().map(|e| &e.item)
    }

    pub fn weapon_type(&self) -> Option<WeaponType> {
        self.weapon().map(|w| w.weapon_type)
    }

    pub fn armor(&self) -> Option<&Armor> {
        self.armor.as_ref().map(|e| &e.item)
    }

    pub fn potions(&self) -> &[Potion] {
        &self.potions
    }

    pub fn wallet(&self) -> &OrganParts {
        &self.wallet
    }

    /// Swap the weapon slot: strip the old weapon's bonuses, then apply the new one's.
    /// `None` just unequips. Returns the previous weapon.
    pub fn equip_weapon(&mut self, weapon: Option<Weapon>) -> Option<Weapon> {
        let previous = self.weapon.take().map(|old| {
            old.applied.undo(&mut self.stats);
            old.item
        });
        self.weapon = weapon.map(|item| {
            let applied = StatDelta::from_weapon(&item).apply(&mut self.stats);
            debug!(player = %self.name, weapon = %item.name, "weapon equipped");
            Equipped { item, applied }
        });
        previous
    }

    /// Swap the armor slot; same contract as [`Player::equip_weapon`]
    pub fn equip_armor(&mut self, armor: Option<Armor>) -> Option<Armor> {
        let previous = self.armor.take().map(|old| {
            old.applied.undo(&mut self.stats);
            old.item
        });
        self.armor = armor.map(|item| {
            let applied = StatDelta::from_armor(&item).apply(&mut self.stats);
            debug!(player = %self.name, armor = %item.name, "armor equipped");
            Equipped { item, applied }
        });
        previous
    }

    /// Attack an enemy, applying weapon match-ups before the crit roll.
    ///
    /// Without a weapon this is a plain basic attack.
    pub fn attack_enemy(&self, enemy: &mut Enemy, rng: &mut impl Rng) -> HitResult {
        let Some(weapon_type) = self.weapon_type() else {
            return basic_attack_with_rng(&self.stats, enemy.stats_mut(), rng);
        };
        if !self.is_alive() || !enemy.is_alive() {
            return HitResult::default();
        }

        let kind = enemy.kind();
        let mut damage = self.stats.attack();
        for matchup in self.matchups.iter().filter(|m| m.applies(weapon_type, kind)) {
            damage = damage.saturating_add(matchup.apply(enemy.stats_mut()));
            debug!(?matchup, "match-up applied");
        }

        strike_with_rng(&self.stats, damage, enemy.stats_mut(), rng)
    }

    /// Plain attack against any combatant
    pub fn basic_attack(&self, target: &mut StatBlock, rng: &mut impl Rng) -> HitResult {
        basic_attack_with_rng(&self.stats, target, rng)
    }

    /// The heal action: restores a fraction of max HP. Unlimited uses.
    pub fn adrenaline_shot(&mut self) -> u32 {
        let amount = self.adrenaline_shot.apply_floor(self.stats.max_hp());
        self.stats.heal(amount)
    }

    pub fn add_potion(&mut self, potion: Potion) {
        self.potions.push(potion);
    }

    /// Drink the potion at `index`.
    ///
    /// Returns false without consuming anything if there is no such potion or
    /// the player is dead. Otherwise the potion is used up, and the result
    /// says whether any HP came back.
    pub fn use_potion(&mut self, index: usize) -> bool {
        if index >= self.potions.len() || !self.is_alive() {
            return false;
        }
        let potion = self.potions.remove(index);
        let healed = self.stats.heal(potion.heal_amount);
        debug!(player = %self.name, potion = %potion.name, healed, "potion used");
        healed > 0
    }

    pub fn add_loot(&mut self, loot: OrganParts) {
        self.wallet.add(loot);
    }

    pub fn can_afford(&self, cost: &Cost) -> bool {
        self.wallet.can_afford(cost)
    }

    /// Atomic payment from the wallet
    pub fn pay(&mut self, cost: &Cost) -> bool {
        self.wallet.pay(cost)
    }

    pub fn snapshot(&self) -> StatsSnapshot {
        self.stats.snapshot(&self.name)
    }
}
