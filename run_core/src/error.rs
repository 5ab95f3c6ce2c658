use crate::state::Phase;
use shop_core::PurchaseError;
use thiserror::Error;

/// A controller call that does not fit the current phase or inventory.
///
/// Nothing changes when one of these is returned.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ActionError {
    #[error("the run has not been started")]
    NotStarted,
    #[error("the run has already been started")]
    AlreadyStarted,
    #[error("the run is over")]
    RunFinished,
    #[error("not the player's turn (phase: {0})")]
    NotPlayerTurn(Phase),
    #[error("not the enemy's turn (phase: {0})")]
    NotEnemyTurn(Phase),
    #[error("the shop is closed (phase: {0})")]
    NotInShop(Phase),
    #[error("no potion in slot {0}")]
    NoSuchPotion(usize),
    #[error("'{0}' is not in the armory")]
    NotOwned(String),
    #[error(transparent)]
    Purchase(#[from] PurchaseError),
}
