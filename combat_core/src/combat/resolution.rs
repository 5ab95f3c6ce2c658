//! Hit resolution - apply raw damage to a StatBlock

use super::result::HitResult;
use crate::stat_block::StatBlock;
use rand::Rng;
use tracing::trace;

/// Resolve an incoming hit using the thread RNG
pub fn take_damage(defender: &mut StatBlock, raw_damage: u32) -> HitResult {
    let mut rng = rand::thread_rng();
    take_damage_with_rng(defender, raw_damage, &mut rng)
}

/// Resolve an incoming hit with a provided RNG (for deterministic testing)
///
/// 1. Zero damage, or an already dead defender: no-op
/// 2. Dodge roll: a dodge negates the hit entirely
/// 3. Defense absorbs first and is consumed by what it absorbs
/// 4. Any overflow comes off HP, capped at the HP available
pub fn take_damage_with_rng(
    defender: &mut StatBlock,
    raw_damage: u32,
    rng: &mut impl Rng,
) -> HitResult {
    if raw_damage == 0 || !defender.is_alive() {
        return HitResult::whiff(raw_damage);
    }

    if defender.dodge_chance().roll(rng) {
        trace!(raw_damage, "hit dodged");
        return HitResult {
            dodged: true,
            ..HitResult::whiff(raw_damage)
        };
    }

    let absorbed = defender.defense().min(raw_damage);
    let overflow = raw_damage - absorbed;
    let damage = overflow.min(defender.hp());
    defender.absorb(absorbed, damage);

    let result = HitResult {
        raw_damage,
        critical: false,
        dodged: false,
        absorbed,
        damage,
        killing_blow: damage > 0 && !defender.is_alive(),
    };
    trace!(
        raw_damage,
        absorbed,
        damage,
        hp = defender.hp(),
        defense = defender.defense(),
        "hit resolved"
    );
    result
}

/// Roll crit on `base_damage` for `attacker`, then resolve against `defender`
pub fn strike_with_rng(
    attacker: &StatBlock,
    base_damage: u32,
    defender: &mut StatBlock,
    rng: &mut impl Rng,
) -> HitResult {
    if !attacker.is_alive() {
        return HitResult::default();
    }

    let critical = attacker.crit_chance().roll(rng);
    let raw_damage = if critical {
        attacker.crit_multiplier().apply(base_damage)
    } else {
        base_damage
    };

    let mut result = take_damage_with_rng(defender, raw_damage, rng);
    result.critical = critical;
    result
}

/// Basic attack using the thread RNG
pub fn basic_attack(attacker: &StatBlock, defender: &mut StatBlock) -> HitResult {
    let mut rng = rand::thread_rng();
    basic_attack_with_rng(attacker, defender, &mut rng)
}

/// Basic attack: the attacker's own attack power, crit applied
pub fn basic_attack_with_rng(
    attacker: &StatBlock,
    defender: &mut StatBlock,
    rng: &mut impl Rng,
) -> HitResult {
    strike_with_rng(attacker, attacker.attack(), defender, rng)
}
