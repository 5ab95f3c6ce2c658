//! The stock gear list sold across a run

use crate::item::{Armor, Potion, Weapon};
use crate::types::WeaponType;

/// Name of the weapon every run starts with
pub const STARTER_WEAPON: &str = "Wooden Stick";

pub fn wooden_stick() -> Weapon {
    Weapon::new(STARTER_WEAPON, WeaponType::Normal)
        .with_attack(5)
        .with_crit(0.05, 1.2)
}

pub fn combat_knife() -> Weapon {
    Weapon::new("Combat Knife", WeaponType::Sharp)
        .with_attack(12)
        .with_crit(0.30, 2.0)
        .with_cost(35, 15)
}

pub fn machete() -> Weapon {
    Weapon::new("Machete", WeaponType::Sharp)
        .with_attack(25)
        .with_crit(0.15, 1.5)
        .with_cost(40, 15)
}

pub fn hammer() -> Weapon {
    Weapon::new("Hammer", WeaponType::Heavy)
        .with_attack(50)
        .with_crit(0.05, 1.2)
        .with_cost(90, 40)
}

pub fn knuckle_dusters() -> Weapon {
    Weapon::new("Knuckle Dusters", WeaponType::Heavy)
        .with_attack(45)
        .with_crit(0.10, 1.5)
        .with_cost(95, 45)
}

pub fn revolver() -> Weapon {
    Weapon::new("Revolver", WeaponType::Gun)
        .with_attack(80)
        .with_crit(0.40, 2.5)
        .with_cost(180, 90)
}

pub fn shotgun() -> Weapon {
    Weapon::new("Shotgun", WeaponType::Gun)
        .with_attack(85)
        .with_crit(0.10, 1.5)
        .with_cost(170, 80)
}

pub fn rifle() -> Weapon {
    Weapon::new("Rifle", WeaponType::Gun)
        .with_attack(150)
        .with_crit(0.50, 3.0)
        .with_cost(350, 150)
}

pub fn axe() -> Weapon {
    Weapon::new("Axe", WeaponType::Sharp)
        .with_attack(150)
        .with_crit(0.50, 3.0)
        .with_cost(350, 150)
}

pub fn leather_jacket() -> Armor {
    Armor::new("Leather Jacket")
        .with_defense(10)
        .with_dodge(0.05)
        .with_cost(10, 0)
}

pub fn kevlar_jacket() -> Armor {
    Armor::new("Kevlar Jacket")
        .with_defense(24)
        .with_dodge(0.10)
        .with_cost(24, 4)
}

pub fn riot_suit() -> Armor {
    Armor::new("Riot Suit")
        .with_defense(35)
        .with_dodge(0.25)
        .with_cost(35, 7)
}

pub fn small_medkit() -> Potion {
    Potion::new("Small Medkit", 30).with_cost(3, 1)
}

pub fn medium_medkit() -> Potion {
    Potion::new("Medium Medkit", 50).with_cost(5, 2)
}

pub fn big_medkit() -> Potion {
    Potion::new("Big Medkit", 80).with_cost(7, 3)
}

pub fn emergency_kit() -> Potion {
    Potion::new("Emergency Kit", 100).with_cost(10, 5)
}

/// Every stock weapon, cheapest first
pub fn weapons() -> Vec<Weapon> {
    vec![
        wooden_stick(),
        combat_knife(),
        machete(),
        hammer(),
        knuckle_dusters(),
        revolver(),
        shotgun(),
        rifle(),
        axe(),
    ]
}

pub fn armors() -> Vec<Armor> {
    vec![leather_jacket(), kevlar_jacket(), riot_suit()]
}

pub fn potions() -> Vec<Potion> {
    vec![small_medkit(), medium_medkit(), big_medkit(), emergency_kit()]
}

/// Look up a stock weapon by display name
pub fn weapon(name: &str) -> Option<Weapon> {
    weapons().into_iter().find(|w| w.name == name)
}

/// Look up a stock armor by display name
pub fn armor(name: &str) -> Option<Armor> {
    armors().into_iter().find(|a| a.name == name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_starter_is_free() {
        let stick = wooden_stick();
        assert!(stick.cost.is_free());
        assert_eq!(weapon(STARTER_WEAPON), Some(stick));
    }

    #[test]
    fn test_names_are_unique() {
        let names: HashSet<String> = weapons().into_iter().map(|w| w.name).collect();
        assert_eq!(names.len(), weapons().len());
    }

    #[test]
    fn test_every_match_up_type_is_sold() {
        for weapon_type in WeaponType::all() {
            assert!(weapons().iter().any(|w| w.weapon_type == *weapon_type));
        }
    }

    #[test]
    fn test_lookup_unknown() {
        assert!(weapon("Chainsaw").is_none());
        assert!(armor("Riot Suit").is_some());
    }
}
