//! Core types for combat_core

use serde::{Deserialize, Serialize};
use std::fmt;

/// Last stage of a run. Clearing it wins the game.
pub const FINAL_STAGE: u32 = 5;

/// Enemy archetypes, one per stage
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EnemyKind {
    Normal,
    Rotten,
    Armored,
    Runner,
    Boss,
}

impl EnemyKind {
    /// Get all archetypes in stage order
    pub fn all() -> &'static [EnemyKind] {
        &[
            EnemyKind::Normal,
            EnemyKind::Rotten,
            EnemyKind::Armored,
            EnemyKind::Runner,
            EnemyKind::Boss,
        ]
    }

    /// Archetype fought at `stage`, or `None` past the final stage
    pub fn for_stage(stage: u32) -> Option<EnemyKind> {
        match stage {
            1 => Some(EnemyKind::Normal),
            2 => Some(EnemyKind::Rotten),
            3 => Some(EnemyKind::Armored),
            4 => Some(EnemyKind::Runner),
            5 => Some(EnemyKind::Boss),
            _ => None,
        }
    }

    pub fn stage(self) -> u32 {
        match self {
            EnemyKind::Normal => 1,
            EnemyKind::Rotten => 2,
            EnemyKind::Armored => 3,
            EnemyKind::Runner => 4,
            EnemyKind::Boss => 5,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            EnemyKind::Normal => "Normal Zombie",
            EnemyKind::Rotten => "Rotten Zombie",
            EnemyKind::Armored => "Armored Zombie",
            EnemyKind::Runner => "Runner Zombie",
            EnemyKind::Boss => "Boss Zombie",
        }
    }
}

impl fmt::Display for EnemyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}
