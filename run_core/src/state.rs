//! Run phases and the transitions allowed between them

use std::fmt;

/// Where a run currently is.
///
/// ```text
/// Idle -> StageStart -> PlayerTurn -> AttackResolve | HealResolve -> EnemyTurn
///      -> EnemyResolve -> PlayerTurn | PlayerDead
/// AttackResolve -> EnemyDead -> LootAward -> Shop | Win
/// PlayerDead -> GameOver
/// Shop -> StageStart
/// StageStart -> Win (past the final stage)
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Phase {
    #[default]
    Idle,
    StageStart,
    PlayerTurn,
    AttackResolve,
    HealResolve,
    EnemyTurn,
    EnemyResolve,
    PlayerDead,
    EnemyDead,
    LootAward,
    Shop,
    Win,
    GameOver,
}

impl Phase {
    /// Whether `next` directly follows `self`
    pub fn can_advance_to(self, next: Phase) -> bool {
        use Phase::*;
        matches!(
            (self, next),
            (Idle, StageStart)
                | (StageStart, PlayerTurn)
                | (StageStart, Win)
                | (PlayerTurn, AttackResolve)
                | (PlayerTurn, HealResolve)
                | (AttackResolve, EnemyTurn)
                | (AttackResolve, EnemyDead)
                | (HealResolve, EnemyTurn)
                | (EnemyTurn, EnemyResolve)
                | (EnemyResolve, PlayerTurn)
                | (EnemyResolve, PlayerDead)
                | (EnemyDead, LootAward)
                | (LootAward, Shop)
                | (LootAward, Win)
                | (PlayerDead, GameOver)
                | (Shop, StageStart)
        )
    }

    /// Win and GameOver end the run
    pub fn is_terminal(self) -> bool {
        matches!(self, Phase::Win | Phase::GameOver)
    }

    /// Phases in which an encounter is underway
    pub fn in_battle(self) -> bool {
        matches!(
            self,
            Phase::PlayerTurn
                | Phase::AttackResolve
                | Phase::HealResolve
                | Phase::EnemyTurn
                | Phase::EnemyResolve
                | Phase::PlayerDead
                | Phase::EnemyDead
        )
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Phase::Idle => "idle",
            Phase::StageStart => "stage_start",
            Phase::PlayerTurn => "player_turn",
            Phase::AttackResolve => "attack_resolve",
            Phase::HealResolve => "heal_resolve",
            Phase::EnemyTurn => "enemy_turn",
            Phase::EnemyResolve => "enemy_resolve",
            Phase::PlayerDead => "player_dead",
            Phase::EnemyDead => "enemy_dead",
            Phase::LootAward => "loot_award",
            Phase::Shop => "shop",
            Phase::Win => "win",
            Phase::GameOver => "game_over",
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
