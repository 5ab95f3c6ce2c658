//! DoT (Damage over Time): poison

use serde::{Deserialize, Serialize};

/// Poison state carried by a combatant.
///
/// Re-applying poison refreshes rather than stacks: each counter becomes the
/// larger of the current and incoming value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Poison {
    damage_per_turn: u32,
    turns_remaining: u32,
}

impl Poison {
    pub fn damage_per_turn(&self) -> u32 {
        self.damage_per_turn
    }

    pub fn turns_remaining(&self) -> u32 {
        self.turns_remaining
    }

    pub fn is_active(&self) -> bool {
        self.turns_remaining > 0
    }

    /// Refresh with new values. Zero arguments are ignored.
    pub fn refresh(&mut self, damage_per_turn: u32, turns: u32) -> bool {
        if damage_per_turn == 0 || turns == 0 {
            return false;
        }
        self.damage_per_turn = self.damage_per_turn.max(damage_per_turn);
        self.turns_remaining = self.turns_remaining.max(turns);
        true
    }

    pub fn clear(&mut self) {
        *self = Poison::default();
    }

    /// Consume one turn and return the damage due, capped at `available_hp`
    pub(crate) fn tick(&mut self, available_hp: u32) -> u32 {
        if !self.is_active() {
            return 0;
        }
        let damage = self.damage_per_turn.min(available_hp);
        self.turns_remaining -= 1;
        if self.turns_remaining == 0 {
            self.damage_per_turn = 0;
        }
        damage
    }
}

/// Result of one turn-start poison tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PoisonTick {
    pub damage: u32,
    pub turns_remaining: u32,
    pub fatal: bool,
}
