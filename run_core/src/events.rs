//! Outbound notifications for a presentation layer.
//!
//! The engine calls a [`BattleObserver`] after each state change and never
//! waits on it. Every method has an empty default, so an observer only
//! implements what it cares about.

use combat_core::StatsSnapshot;

/// Whose turn it is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Actor {
    Player,
    Enemy,
}

pub trait BattleObserver {
    /// One line of the battle log
    fn on_log_message(&mut self, _message: &str) {}

    fn on_turn_changed(&mut self, _actor: Actor) {}

    /// Fired after every mutation; `enemy` is `None` outside a battle
    fn on_stats_changed(
        &mut self,
        _player: &StatsSnapshot,
        _enemy: Option<&StatsSnapshot>,
        _stage: u32,
    ) {
    }

    fn on_stage_cleared(&mut self, _stage: u32) {}

    fn on_game_over(&mut self) {}

    fn on_game_won(&mut self) {}
}

/// Observer that ignores everything
#[derive(Debug, Clone, Copy, Default)]
pub struct NullObserver;

impl BattleObserver for NullObserver {}

/// A recorded notification
#[derive(Debug, Clone, PartialEq)]
pub enum BattleEvent {
    Log(String),
    TurnChanged(Actor),
    StatsChanged {
        player: StatsSnapshot,
        enemy: Option<StatsSnapshot>,
        stage: u32,
    },
    StageCleared(u32),
    GameOver,
    GameWon,
}

/// Observer that keeps every notification in order
#[derive(Debug, Clone, Default)]
pub struct EventLog {
    events: Vec<BattleEvent>,
}

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> &[BattleEvent] {
        &self.events
    }

    /// Just the battle log lines
    pub fn messages(&self) -> impl Iterator<Item = &str> + '_ {
        self.events.iter().filter_map(|event| match event {
            BattleEvent::Log(line) => Some(line.as_str()),
            _ => None,
        })
    }

    pub fn contains_message(&self, needle: &str) -> bool {
        self.messages().any(|line| line.contains(needle))
    }

    pub fn count(&self, wanted: &BattleEvent) -> usize {
        self.events.iter().filter(|event| *event == wanted).count()
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }
}

impl BattleObserver for EventLog {
    fn on_log_message(&mut self, message: &str) {
        self.events.push(BattleEvent::Log(message.to_string()));
    }

    fn on_turn_changed(&mut self, actor: Actor) {
        self.events.push(BattleEvent::TurnChanged(actor));
    }

    fn on_stats_changed(
        &mut self,
        player: &StatsSnapshot,
        enemy: Option<&StatsSnapshot>,
        stage: u32,
    ) {
        self.events.push(BattleEvent::StatsChanged {
            player: player.clone(),
            enemy: enemy.cloned(),
            stage,
        });
    }

    fn on_stage_cleared(&mut self, stage: u32) {
        self.events.push(BattleEvent::StageCleared(stage));
    }

    fn on_game_over(&mut self) {
        self.events.push(BattleEvent::GameOver);
    }

    fn on_game_won(&mut self) {
        self.events.push(BattleEvent::GameWon);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_log_records_in_order() {
        let mut log = EventLog::new();
        log.on_log_message("=== STAGE 1 START ===");
        log.on_turn_changed(Actor::Player);
        log.on_game_won();

        assert_eq!(
            log.events(),
            &[
                BattleEvent::Log("=== STAGE 1 START ===".to_string()),
                BattleEvent::TurnChanged(Actor::Player),
                BattleEvent::GameWon,
            ]
        );
        assert!(log.contains_message("STAGE 1"));
        assert_eq!(log.count(&BattleEvent::GameWon), 1);

        log.clear();
        assert!(log.events().is_empty());
    }

    #[test]
    fn test_null_observer_accepts_everything() {
        let mut observer = NullObserver;
        observer.on_log_message("ignored");
        observer.on_stage_cleared(3);
        observer.on_game_over();
    }
}
