use crate::types::{Chance, Multiplier, WeaponType};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Price of an item in organ parts
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Cost {
    #[serde(default)]
    pub hearts: u32,
    #[serde(default)]
    pub brains: u32,
}

impl Cost {
    pub const FREE: Cost = Cost::new(0, 0);

    pub const fn new(hearts: u32, brains: u32) -> Self {
        Cost { hearts, brains }
    }

    pub fn is_free(&self) -> bool {
        self.hearts == 0 && self.brains == 0
    }
}

impl fmt::Display for Cost {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} H / {} B", self.hearts, self.brains)
    }
}

/// A weapon: flat attack plus crit bonuses, tagged with its match-up type
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Weapon {
    pub name: String,
    #[serde(rename = "type", default)]
    pub weapon_type: WeaponType,
    #[serde(default)]
    pub attack: u32,
    #[serde(default)]
    pub crit_chance: Chance,
    #[serde(default)]
    pub crit_damage: Multiplier,
    #[serde(default)]
    pub cost: Cost,
}

impl Weapon {
    /// Create a weapon with no bonuses and no cost
    pub fn new(name: impl Into<String>, weapon_type: WeaponType) -> Self {
        Weapon {
            name: name.into(),
            weapon_type,
            attack: 0,
            crit_chance: Chance::ZERO,
            crit_damage: Multiplier::ZERO,
            cost: Cost::FREE,
        }
    }

    pub fn with_attack(mut self, attack: u32) -> Self {
        self.attack = attack;
        self
    }

    /// Set crit chance bonus and crit damage bonus
    pub fn with_crit(mut self, chance: f64, damage: f64) -> Self {
        self.crit_chance = Chance::new(chance);
        self.crit_damage = Multiplier::new(damage);
        self
    }

    pub fn with_cost(mut self, hearts: u32, brains: u32) -> Self {
        self.cost = Cost::new(hearts, brains);
        self
    }
}

impl fmt::Display for Weapon {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} [{}] ATK +{} | CRIT +{} | CRIT DMG +{} | {}",
            self.name, self.weapon_type, self.attack, self.crit_chance, self.crit_damage, self.cost
        )
    }
}

/// Body armor: flat defense plus dodge chance
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Armor {
    pub name: String,
    #[serde(default)]
    pub defense: u32,
    #[serde(default)]
    pub dodge_chance: Chance,
    #[serde(default)]
    pub cost: Cost,
}

impl Armor {
    pub fn new(name: impl Into<String>) -> Self {
        Armor {
            name: name.into(),
            defense: 0,
            dodge_chance: Chance::ZERO,
            cost: Cost::FREE,
        }
    }

    pub fn with_defense(mut self, defense: u32) -> Self {
        self.defense = defense;
        self
    }

    pub fn with_dodge(mut self, chance: f64) -> Self {
        self.dodge_chance = Chance::new(chance);
        self
    }

    pub fn with_cost(mut self, hearts: u32, brains: u32) -> Self {
        self.cost = Cost::new(hearts, brains);
        self
    }
}

impl fmt::Display for Armor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} DEF +{} | DODGE +{} | {}",
            self.name, self.defense, self.dodge_chance, self.cost
        )
    }
}

/// A single-use heal
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Potion {
    pub name: String,
    pub heal_amount: u32,
    #[serde(default)]
    pub cost: Cost,
}

impl Potion {
    pub fn new(name: impl Into<String>, heal_amount: u32) -> Self {
        Potion {
            name: name.into(),
            heal_amount,
            cost: Cost::FREE,
        }
    }

    pub fn with_cost(mut self, hearts: u32, brains: u32) -> Self {
        self.cost = Cost::new(hearts, brains);
        self
    }
}

impl fmt::Display for Potion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} HEAL +{} | {}", self.name, self.heal_amount, self.cost)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_weapon_display() {
        let machete = Weapon::new("Machete", WeaponType::Sharp)
            .with_attack(25)
            .with_crit(0.15, 1.5)
            .with_cost(40, 15);
        assert_eq!(
            machete.to_string(),
            "Machete [sharp] ATK +25 | CRIT +15% | CRIT DMG +1.50x | 40 H / 15 B"
        );
    }

    #[test]
    fn test_armor_and_potion_display() {
        let jacket = Armor::new("Leather Jacket")
            .with_defense(10)
            .with_dodge(0.05)
            .with_cost(10, 0);
        assert_eq!(
            jacket.to_string(),
            "Leather Jacket DEF +10 | DODGE +5% | 10 H / 0 B"
        );

        let medkit = Potion::new("Small Medkit", 30).with_cost(3, 1);
        assert_eq!(medkit.to_string(), "Small Medkit HEAL +30 | 3 H / 1 B");
    }

    #[test]
    fn test_parse_weapon_toml() {
        let weapon: Weapon = toml::from_str(
            r#"
name = "Revolver"
type = "gun"
attack = 80
crit_chance = 0.4
crit_damage = 2.5
cost = { hearts = 180, brains = 90 }
"#,
        )
        .unwrap();

        assert_eq!(weapon.weapon_type, WeaponType::Gun);
        assert_eq!(weapon.attack, 80);
        assert_eq!(weapon.crit_chance, Chance::new(0.4));
        assert_eq!(weapon.crit_damage, Multiplier::new(2.5));
        assert_eq!(weapon.cost, Cost::new(180, 90));
    }

    #[test]
    fn test_missing_fields_default() {
        let weapon: Weapon = toml::from_str(r#"name = "Broom""#).unwrap();
        assert_eq!(weapon, Weapon::new("Broom", WeaponType::Normal));
        assert!(weapon.cost.is_free());
    }
}
