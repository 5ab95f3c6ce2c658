use serde::{Deserialize, Serialize};

/// Outcome of one hit against a combatant
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HitResult {
    /// Damage after the crit roll, before dodge and defense
    pub raw_damage: u32,
    pub critical: bool,
    pub dodged: bool,
    /// Defense consumed by the hit
    pub absorbed: u32,
    /// HP actually lost (never more than the defender had)
    pub damage: u32,
    pub killing_blow: bool,
}

impl HitResult {
    pub(crate) fn whiff(raw_damage: u32) -> Self {
        HitResult {
            raw_damage,
            ..Default::default()
        }
    }

    /// Whether the hit connected at all (not dodged, not a zero/no-op hit)
    pub fn connected(&self) -> bool {
        !self.dodged && (self.absorbed > 0 || self.damage > 0)
    }

    /// Whether the hit reached HP
    pub fn wounded(&self) -> bool {
        self.damage > 0
    }
}
