use gear_core::{Armor, Weapon};

/// Every weapon and armor the player has held during a run, one per name
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Armory {
    weapons: Vec<Weapon>,
    armors: Vec<Armor>,
}

impl Armory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a weapon; returns false if one with that name is already kept
    pub fn add_weapon(&mut self, weapon: Weapon) -> bool {
        if self.weapon(&weapon.name).is_some() {
            return false;
        }
        self.weapons.push(weapon);
        true
    }

    pub fn add_armor(&mut self, armor: Armor) -> bool {
        if self.armor(&armor.name).is_some() {
            return false;
        }
        self.armors.push(armor);
        true
    }

    pub fn weapon(&self, name: &str) -> Option<&Weapon> {
        self.weapons.iter().find(|w| w.name == name)
    }

    pub fn armor(&self, name: &str) -> Option<&Armor> {
        self.armors.iter().find(|a| a.name == name)
    }

    /// Weapons in the order they were first acquired
    pub fn weapons(&self) -> &[Weapon] {
        &self.weapons
    }

    pub fn armors(&self) -> &[Armor] {
        &self.armors
    }
}
