use crate::catalog::Catalog;
use crate::registry::CatalogSource;
use crate::PurchaseError;
use combat_core::Player;
use gear_core::{Armor, Cost, Potion, Weapon};
use tracing::debug;

/// A shop selling one catalog
#[derive(Debug, Clone, PartialEq)]
pub struct Shop {
    catalog: Catalog,
}

impl Shop {
    pub fn new(catalog: Catalog) -> Self {
        Shop { catalog }
    }

    /// Open the shop for `stage`, querying the source once
    pub fn for_stage(source: &dyn CatalogSource, stage: u32) -> Self {
        Shop::new(source.catalog_for_stage(stage))
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Buy and immediately equip a weapon. Returns the weapon it replaced.
    pub fn buy_weapon(
        &self,
        player: &mut Player,
        weapon: &Weapon,
    ) -> Result<Option<Weapon>, PurchaseError> {
        if !self.catalog.contains_weapon(weapon) {
            return Err(PurchaseError::NotInCatalog(weapon.name.clone()));
        }
        charge(player, &weapon.name, &weapon.cost)?;
        Ok(player.equip_weapon(Some(weapon.clone())))
    }

    /// Buy and immediately equip armor. Returns the armor it replaced.
    pub fn buy_armor(
        &self,
        player: &mut Player,
        armor: &Armor,
    ) -> Result<Option<Armor>, PurchaseError> {
        if !self.catalog.contains_armor(armor) {
            return Err(PurchaseError::NotInCatalog(armor.name.clone()));
        }
        charge(player, &armor.name, &armor.cost)?;
        Ok(player.equip_armor(Some(armor.clone())))
    }

    /// Buy a potion into the inventory. Potions can be bought repeatedly.
    pub fn buy_potion(&self, player: &mut Player, potion: &Potion) -> Result<(), PurchaseError> {
        if !self.catalog.contains_potion(potion) {
            return Err(PurchaseError::NotInCatalog(potion.name.clone()));
        }
        charge(player, &potion.name, &potion.cost)?;
        player.add_potion(potion.clone());
        Ok(())
    }
}

fn charge(player: &mut Player, item: &str, cost: &Cost) -> Result<(), PurchaseError> {
    if !player.pay(cost) {
        return Err(PurchaseError::CannotAfford {
            item: item.to_string(),
            cost: *cost,
            wallet: *player.wallet(),
        });
    }
    debug!(player = player.name(), item, %cost, "purchase");
    Ok(())
}
