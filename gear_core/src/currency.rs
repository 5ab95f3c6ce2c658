use crate::item::Cost;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The two-currency wallet: hearts and brains collected from fallen enemies
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OrganParts {
    hearts: u32,
    brains: u32,
}

impl OrganParts {
    pub fn new(hearts: u32, brains: u32) -> Self {
        OrganParts { hearts, brains }
    }

    pub fn hearts(&self) -> u32 {
        self.hearts
    }

    pub fn brains(&self) -> u32 {
        self.brains
    }

    pub fn add_hearts(&mut self, amount: u32) {
        self.hearts = self.hearts.saturating_add(amount);
    }

    pub fn add_brains(&mut self, amount: u32) {
        self.brains = self.brains.saturating_add(amount);
    }

    /// Add another wallet's contents (e.g. a loot drop)
    pub fn add(&mut self, other: OrganParts) {
        self.add_hearts(other.hearts);
        self.add_brains(other.brains);
    }

    pub fn can_afford(&self, cost: &Cost) -> bool {
        self.hearts >= cost.hearts && self.brains >= cost.brains
    }

    /// Deduct `cost` if both counters cover it. Never spends partially.
    pub fn pay(&mut self, cost: &Cost) -> bool {
        if !self.can_afford(cost) {
            return false;
        }
        self.hearts -= cost.hearts;
        self.brains -= cost.brains;
        true
    }
}

impl fmt::Display for OrganParts {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} H, {} B", self.hearts, self.brains)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_and_display() {
        let mut wallet = OrganParts::default();
        wallet.add_hearts(40);
        wallet.add_brains(15);
        wallet.add(OrganParts::new(2, 3));
        assert_eq!(wallet, OrganParts::new(42, 18));
        assert_eq!(wallet.to_string(), "42 H, 18 B");
    }

    #[test]
    fn test_pay_exact_amount() {
        let mut wallet = OrganParts::new(35, 15);
        assert!(wallet.pay(&Cost::new(35, 15)));
        assert_eq!(wallet, OrganParts::default());
    }

    #[test]
    fn test_pay_is_all_or_nothing() {
        let mut wallet = OrganParts::new(10, 5);

        // Enough brains but not enough hearts
        assert!(!wallet.pay(&Cost::new(15, 0)));
        assert_eq!(wallet, OrganParts::new(10, 5));

        // Enough hearts but not enough brains
        assert!(!wallet.pay(&Cost::new(5, 6)));
        assert_eq!(wallet, OrganParts::new(10, 5));
    }

    #[test]
    fn test_add_saturates() {
        let mut wallet = OrganParts::new(u32::MAX - 1, 0);
        wallet.add_hearts(10);
        assert_eq!(wallet.hearts(), u32::MAX);
    }
}
