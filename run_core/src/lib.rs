//! run_core - Battle state machine and run controller for the zombie stage combat engine
//!
//! This library provides:
//! - Phase: the run's states and the legal transitions between them
//! - BattleSession: one encounter, from stage start to a death
//! - RunController: stages 1 to 5 with loot, shops and the final result
//! - BattleObserver: log lines and state notifications for a presentation layer
//!
//! # Quick Start
//!
//! ```rust
//! use run_core::{PlayerAction, RunController};
//!
//! let mut run = RunController::with_seed("Survivor", 7);
//! run.start().unwrap();
//!
//! while !run.is_finished() {
//!     if run.shop().is_some() {
//!         let _ = run.buy_weapon("Machete");
//!         run.next_stage().unwrap();
//!         continue;
//!     }
//!     let action = if run.player().stats().hp() < 40 {
//!         PlayerAction::Heal
//!     } else {
//!         PlayerAction::Attack
//!     };
//!     run.play_turn(action).unwrap();
//! }
//! println!("finished at stage {} in phase {}", run.stage(), run.phase());
//! ```

mod armory;
pub mod battle;
pub mod controller;
pub mod error;
pub mod events;
pub mod state;

pub use armory::Armory;
pub use battle::{BattleSession, EnemyAction, EnemyReport, PlayerAction, PlayerReport};
pub use controller::{RunController, TurnReport};
pub use error::ActionError;
pub use events::{Actor, BattleEvent, BattleObserver, EventLog, NullObserver};
pub use state::Phase;
