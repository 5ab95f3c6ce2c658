use gear_core::{Armor, Potion, Weapon};
use serde::{Deserialize, Serialize};

/// The goods a shop offers
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Catalog {
    #[serde(default)]
    pub weapons: Vec<Weapon>,
    #[serde(default)]
    pub armors: Vec<Armor>,
    #[serde(default)]
    pub potions: Vec<Potion>,
}

impl Catalog {
    pub fn new(weapons: Vec<Weapon>, armors: Vec<Armor>, potions: Vec<Potion>) -> Self {
        Catalog {
            weapons,
            armors,
            potions,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.weapons.is_empty() && self.armors.is_empty() && self.potions.is_empty()
    }

    pub fn contains_weapon(&self, weapon: &Weapon) -> bool {
        self.weapons.contains(weapon)
    }

    pub fn contains_armor(&self, armor: &Armor) -> bool {
        self.armors.contains(armor)
    }

    pub fn contains_potion(&self, potion: &Potion) -> bool {
        self.potions.contains(potion)
    }

    pub fn weapon(&self, name: &str) -> Option<&Weapon> {
        self.weapons.iter().find(|w| w.name == name)
    }

    pub fn armor(&self, name: &str) -> Option<&Armor> {
        self.armors.iter().find(|a| a.name == name)
    }

    pub fn potion(&self, name: &str) -> Option<&Potion> {
        self.potions.iter().find(|p| p.name == name)
    }
}
