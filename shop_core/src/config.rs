use crate::catalog::Catalog;
use gear_core::{Armor, Potion, Weapon};
use serde::Deserialize;
use std::collections::HashSet;

/// TOML configuration for one stage catalog file
#[derive(Debug, Deserialize)]
pub struct CatalogFileConfig {
    pub catalog: CatalogHeader,
    #[serde(default)]
    pub weapons: Vec<Weapon>,
    #[serde(default)]
    pub armors: Vec<Armor>,
    #[serde(default)]
    pub potions: Vec<Potion>,
}

/// Header naming the stage a catalog belongs to
#[derive(Debug, Deserialize)]
pub struct CatalogHeader {
    pub stage: u32,
}

impl CatalogFileConfig {
    /// Validate and convert into `(stage, catalog)`
    pub fn into_catalog(self) -> Result<(u32, Catalog), String> {
        if self.catalog.stage == 0 {
            return Err("stage numbers start at 1".to_string());
        }

        let names = self
            .weapons
            .iter()
            .map(|w| w.name.as_str())
            .chain(self.armors.iter().map(|a| a.name.as_str()))
            .chain(self.potions.iter().map(|p| p.name.as_str()));
        let mut seen = HashSet::new();
        for name in names {
            if name.trim().is_empty() {
                return Err("item with an empty name".to_string());
            }
            if !seen.insert(name) {
                return Err(format!("duplicate item '{}'", name));
            }
        }

        if self.potions.iter().any(|p| p.heal_amount == 0) {
            return Err("potions must heal a positive amount".to_string());
        }

        Ok((
            self.catalog.stage,
            Catalog::new(self.weapons, self.armors, self.potions),
        ))
    }
}
