//! Stage-by-stage run: battles, loot, shops and the final result

use crate::armory::Armory;
use crate::battle::{BattleSession, EnemyReport, PlayerAction, PlayerReport};
use crate::error::ActionError;
use crate::events::{BattleObserver, NullObserver};
use crate::state::Phase;
use combat_core::{Enemy, Player, StatsSnapshot, FINAL_STAGE};
use gear_core::{builtin, Armor, Weapon};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use shop_core::{CatalogRegistry, CatalogSource, PurchaseError, Shop};
use tracing::{debug, info, trace};

/// Result of [`RunController::play_turn`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TurnReport {
    pub player: PlayerReport,
    /// `None` when the player's action ended the battle
    pub enemy: Option<EnemyReport>,
}

/// Drives a whole run from stage 1 to a win or a death.
///
/// The controller owns the player, the random source and the observer. Every
/// call runs to completion before returning; a presentation layer paces the
/// run by deciding when to make the next call.
pub struct RunController<O = NullObserver, R = ChaCha8Rng> {
    player: Player,
    armory: Armory,
    catalogs: Box<dyn CatalogSource>,
    rng: R,
    observer: O,
    stage: u32,
    phase: Phase,
    session: Option<BattleSession>,
    shop: Option<Shop>,
}

impl RunController {
    /// New run seeded from OS entropy
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_rng(Player::new(name), NullObserver, ChaCha8Rng::from_entropy())
    }

    /// New run whose every roll is reproducible
    pub fn with_seed(name: impl Into<String>, seed: u64) -> Self {
        Self::with_rng(
            Player::new(name),
            NullObserver,
            ChaCha8Rng::seed_from_u64(seed),
        )
    }
}

impl<O: BattleObserver, R: Rng> RunController<O, R> {
    /// Build a run around an existing player. An unarmed player gets the starter weapon.
    pub fn with_rng(mut player: Player, observer: O, rng: R) -> Self {
        if player.weapon().is_none() {
            player.equip_weapon(Some(builtin::wooden_stick()));
        }

        let mut armory = Armory::new();
        if let Some(weapon) = player.weapon() {
            armory.add_weapon(weapon.clone());
        }
        if let Some(armor) = player.armor() {
            armory.add_armor(armor.clone());
        }

        RunController {
            player,
            armory,
            catalogs: Box::new(CatalogRegistry::builtin()),
            rng,
            observer,
            stage: 0,
            phase: Phase::Idle,
            session: None,
            shop: None,
        }
    }

    /// Replace the shop catalogs
    pub fn with_catalogs(mut self, catalogs: impl CatalogSource + 'static) -> Self {
        self.catalogs = Box::new(catalogs);
        self
    }

    pub fn player(&self) -> &Player {
        &self.player
    }

    /// The current (or just defeated) enemy
    pub fn enemy(&self) -> Option<&Enemy> {
        self.session.as_ref().map(|s| s.enemy())
    }

    /// The shop, while it is open
    pub fn shop(&self) -> Option<&Shop> {
        self.shop.as_ref()
    }

    pub fn armory(&self) -> &Armory {
        &self.armory
    }

    /// Current stage; 0 before the run starts
    pub fn stage(&self) -> u32 {
        self.stage
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Round of the current battle; 0 outside of one
    pub fn turn(&self) -> u32 {
        self.session.as_ref().map_or(0, |s| s.turn())
    }

    pub fn is_finished(&self) -> bool {
        self.phase.is_terminal()
    }

    pub fn observer(&self) -> &O {
        &self.observer
    }

    pub fn observer_mut(&mut self) -> &mut O {
        &mut self.observer
    }

    pub fn player_snapshot(&self) -> StatsSnapshot {
        self.player.snapshot()
    }

    pub fn enemy_snapshot(&self) -> Option<StatsSnapshot> {
        self.enemy().map(|e| e.snapshot())
    }

    /// Begin at stage 1
    pub fn start(&mut self) -> Result<(), ActionError> {
        self.start_from(1)
    }

    /// Begin at `stage`. Starting past the final stage is an immediate win.
    pub fn start_from(&mut self, stage: u32) -> Result<(), ActionError> {
        if self.phase != Phase::Idle {
            return Err(ActionError::AlreadyStarted);
        }
        info!(player = self.player.name(), stage, "run started");
        self.enter_stage(stage.max(1));
        Ok(())
    }

    /// The player's one action for this round. The enemy does not act until
    /// [`RunController::enemy_turn`]; a killing blow moves straight on to the
    /// loot award and then the shop or the win.
    pub fn player_action(&mut self, action: PlayerAction) -> Result<PlayerReport, ActionError> {
        self.ensure_running()?;
        if self.phase != Phase::PlayerTurn {
            return Err(ActionError::NotPlayerTurn(self.phase));
        }
        let Some(session) = self.session.as_mut() else {
            return Err(ActionError::NotPlayerTurn(self.phase));
        };
        let report =
            session.player_action(action, &mut self.player, &mut self.rng, &mut self.observer)?;
        self.sync_phase();

        if self.phase == Phase::EnemyDead {
            self.finish_stage();
        }
        Ok(report)
    }

    pub fn enemy_turn(&mut self) -> Result<EnemyReport, ActionError> {
        self.ensure_running()?;
        if self.phase != Phase::EnemyTurn {
            return Err(ActionError::NotEnemyTurn(self.phase));
        }
        let Some(session) = self.session.as_mut() else {
            return Err(ActionError::NotEnemyTurn(self.phase));
        };
        let report = session.enemy_turn(&mut self.player, &mut self.rng, &mut self.observer)?;
        self.sync_phase();

        if self.phase == Phase::PlayerDead {
            self.advance(Phase::GameOver);
            info!(stage = self.stage, "game over");
            self.observer.on_game_over();
        }
        Ok(report)
    }

    /// Player action followed by the enemy's reply, if the enemy survived
    pub fn play_turn(&mut self, action: PlayerAction) -> Result<TurnReport, ActionError> {
        let player = self.player_action(action)?;
        let enemy = if self.phase == Phase::EnemyTurn {
            Some(self.enemy_turn()?)
        } else {
            None
        };
        Ok(TurnReport { player, enemy })
    }

    /// Drink a potion. Free action: allowed on the player's turn and in the shop.
    ///
    /// `Ok(false)` means the potion was used up without restoring any HP.
    pub fn use_potion(&mut self, index: usize) -> Result<bool, ActionError> {
        self.ensure_free_action()?;
        let Some(potion) = self.player.potions().get(index) else {
            return Err(ActionError::NoSuchPotion(index));
        };
        let name = potion.name.clone();

        let before = self.player.stats().hp();
        let healed = self.player.use_potion(index);
        let after = self.player.stats().hp();
        if healed {
            self.observer.on_log_message(&format!(
                "You drink {} and heal {} HP ({} → {}).",
                name,
                after - before,
                before,
                after
            ));
        } else {
            self.observer
                .on_log_message(&format!("You drink {}, but your HP is already full.", name));
        }
        self.notify_stats();
        Ok(healed)
    }

    /// Re-equip a weapon from the armory at no cost. Returns the weapon it replaced.
    pub fn equip_owned_weapon(&mut self, name: &str) -> Result<Option<Weapon>, ActionError> {
        self.ensure_free_action()?;
        let weapon = self
            .armory
            .weapon(name)
            .cloned()
            .ok_or_else(|| ActionError::NotOwned(name.to_string()))?;

        let previous = self.player.equip_weapon(Some(weapon));
        self.observer.on_log_message(&format!("You equip {}.", name));
        self.notify_stats();
        Ok(previous)
    }

    pub fn equip_owned_armor(&mut self, name: &str) -> Result<Option<Armor>, ActionError> {
        self.ensure_free_action()?;
        let armor = self
            .armory
            .armor(name)
            .cloned()
            .ok_or_else(|| ActionError::NotOwned(name.to_string()))?;

        let previous = self.player.equip_armor(Some(armor));
        self.observer.on_log_message(&format!("You put on {}.", name));
        self.notify_stats();
        Ok(previous)
    }

    /// Buy a weapon by name and equip it. Returns the weapon it replaced.
    pub fn buy_weapon(&mut self, name: &str) -> Result<Option<Weapon>, ActionError> {
        self.ensure_shop_open()?;
        let Some(shop) = self.shop.as_ref() else {
            return Err(ActionError::NotInShop(self.phase));
        };
        let weapon = shop
            .catalog()
            .weapon(name)
            .cloned()
            .ok_or_else(|| PurchaseError::NotInCatalog(name.to_string()))?;

        let previous = shop.buy_weapon(&mut self.player, &weapon)?;
        self.armory.add_weapon(weapon);
        self.purchased(name);
        Ok(previous)
    }

    pub fn buy_armor(&mut self, name: &str) -> Result<Option<Armor>, ActionError> {
        self.ensure_shop_open()?;
        let Some(shop) = self.shop.as_ref() else {
            return Err(ActionError::NotInShop(self.phase));
        };
        let armor = shop
            .catalog()
            .armor(name)
            .cloned()
            .ok_or_else(|| PurchaseError::NotInCatalog(name.to_string()))?;

        let previous = shop.buy_armor(&mut self.player, &armor)?;
        self.armory.add_armor(armor);
        self.purchased(name);
        Ok(previous)
    }

    pub fn buy_potion(&mut self, name: &str) -> Result<(), ActionError> {
        self.ensure_shop_open()?;
        let Some(shop) = self.shop.as_ref() else {
            return Err(ActionError::NotInShop(self.phase));
        };
        let potion = shop
            .catalog()
            .potion(name)
            .cloned()
            .ok_or_else(|| PurchaseError::NotInCatalog(name.to_string()))?;

        shop.buy_potion(&mut self.player, &potion)?;
        self.purchased(name);
        Ok(())
    }

    /// Leave the shop for the next stage
    pub fn next_stage(&mut self) -> Result<(), ActionError> {
        self.ensure_running()?;
        if self.phase != Phase::Shop {
            return Err(ActionError::NotInShop(self.phase));
        }
        self.enter_stage(self.stage + 1);
        Ok(())
    }

    fn enter_stage(&mut self, stage: u32) {
        self.advance(Phase::StageStart);
        self.stage = stage;
        self.shop = None;
        self.session = None;

        self.player.stats_mut().clear_poison();
        self.observer
            .on_log_message("Any lingering poison fades as you move to the next area.");

        match Enemy::for_stage(stage) {
            Some(enemy) => {
                let session =
                    BattleSession::start(stage, enemy, &self.player, &mut self.observer);
                self.session = Some(session);
                self.sync_phase();
            }
            None => self.win(),
        }
    }

    fn finish_stage(&mut self) {
        let Some(session) = self.session.as_mut() else {
            return;
        };
        session.award_loot(&mut self.player, &mut self.rng, &mut self.observer);
        self.sync_phase();

        if self.stage >= FINAL_STAGE {
            self.win();
        } else {
            self.advance(Phase::Shop);
            info!(stage = self.stage, wallet = %self.player.wallet(), "stage cleared");
            self.observer.on_stage_cleared(self.stage);
            self.shop = Some(Shop::for_stage(self.catalogs.as_ref(), self.stage + 1));
        }
        self.notify_stats();
    }

    fn win(&mut self) {
        self.advance(Phase::Win);
        info!(stage = self.stage, "run won");
        self.observer.on_game_won();
    }

    fn purchased(&mut self, name: &str) {
        debug!(item = name, wallet = %self.player.wallet(), "bought");
        self.observer.on_log_message(&format!("You bought {}.", name));
        self.notify_stats();
    }

    fn ensure_shop_open(&self) -> Result<(), ActionError> {
        self.ensure_running()?;
        if self.phase != Phase::Shop {
            return Err(ActionError::NotInShop(self.phase));
        }
        Ok(())
    }

    fn ensure_running(&self) -> Result<(), ActionError> {
        match self.phase {
            Phase::Idle => Err(ActionError::NotStarted),
            phase if phase.is_terminal() => Err(ActionError::RunFinished),
            _ => Ok(()),
        }
    }

    fn ensure_free_action(&self) -> Result<(), ActionError> {
        self.ensure_running()?;
        match self.phase {
            Phase::PlayerTurn | Phase::Shop => Ok(()),
            phase => Err(ActionError::NotPlayerTurn(phase)),
        }
    }

    fn notify_stats(&mut self) {
        let enemy = match &self.session {
            Some(session) if self.phase.in_battle() => Some(session.enemy().snapshot()),
            _ => None,
        };
        self.observer
            .on_stats_changed(&self.player.snapshot(), enemy.as_ref(), self.stage);
    }

    fn sync_phase(&mut self) {
        if let Some(session) = &self.session {
            trace!(from = %self.phase, to = %session.phase(), "run phase synced");
            self.phase = session.phase();
        }
    }

    fn advance(&mut self, next: Phase) {
        debug_assert!(
            self.phase.can_advance_to(next),
            "illegal transition {} -> {}",
            self.phase,
            next
        );
        trace!(from = %self.phase, to = %next, "phase transition");
        self.phase = next;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::{BattleEvent, EventLog};
    use combat_core::EnemyKind;
    use gear_core::{Chance, OrganParts};

    type TestRun = RunController<EventLog, ChaCha8Rng>;

    fn run_with(player: Player, seed: u64) -> TestRun {
        RunController::with_rng(player, EventLog::new(), ChaCha8Rng::seed_from_u64(seed))
    }

    /// Never hit, kills anything that does not dodge in one blow
    fn untouchable() -> Player {
        let mut player = Player::new("Survivor");
        player.stats_mut().set_attack(5_000);
        player.stats_mut().set_dodge_chance(Chance::CERTAIN);
        player
    }

    /// Attack until the current battle ends
    fn win_battle(run: &mut TestRun) {
        for _ in 0..200 {
            if run.phase() != Phase::PlayerTurn {
                return;
            }
            run.play_turn(PlayerAction::Attack).unwrap();
        }
        panic!("battle did not end");
    }

    #[test]
    fn test_new_run_equips_starter() {
        let mut run = RunController::with_seed("Survivor", 1);
        assert_eq!(run.phase(), Phase::Idle);
        assert_eq!(run.stage(), 0);
        assert_eq!(run.turn(), 0);
        assert_eq!(run.player().weapon().map(|w| w.name.as_str()), Some("Wooden Stick"));
        assert_eq!(run.player().stats().attack(), 25);
        assert!(run.armory().weapon("Wooden Stick").is_some());

        run.start().unwrap();
        assert_eq!(run.stage(), 1);
        assert_eq!(run.phase(), Phase::PlayerTurn);
        assert_eq!(run.turn(), 1);
        assert_eq!(run.enemy().map(|e| e.kind()), Some(EnemyKind::Normal));
        assert_eq!(run.start(), Err(ActionError::AlreadyStarted));
    }

    #[test]
    fn test_stage_past_final_wins_without_enemy() {
        let mut run = run_with(Player::new("Survivor"), 1);
        run.start_from(6).unwrap();

        assert_eq!(run.phase(), Phase::Win);
        assert!(run.is_finished());
        assert!(run.enemy().is_none());
        assert_eq!(run.observer().count(&BattleEvent::GameWon), 1);
        assert!(!run.observer().contains_message("STAGE 6"));
        assert_eq!(
            run.player_action(PlayerAction::Attack),
            Err(ActionError::RunFinished)
        );
    }

    #[test]
    fn test_calls_before_start() {
        let mut run = run_with(Player::new("Survivor"), 1);
        assert_eq!(
            run.player_action(PlayerAction::Attack),
            Err(ActionError::NotStarted)
        );
        assert_eq!(run.use_potion(0), Err(ActionError::NotStarted));
        assert_eq!(run.next_stage(), Err(ActionError::NotStarted));
    }

    #[test]
    fn test_wrong_phase_errors() {
        let mut run = run_with(Player::new("Survivor"), 1);
        run.start().unwrap();

        assert_eq!(run.enemy_turn(), Err(ActionError::NotEnemyTurn(Phase::PlayerTurn)));
        assert_eq!(
            run.buy_weapon("Machete"),
            Err(ActionError::NotInShop(Phase::PlayerTurn))
        );
        assert_eq!(run.next_stage(), Err(ActionError::NotInShop(Phase::PlayerTurn)));

        run.player_action(PlayerAction::Heal).unwrap();
        assert_eq!(run.phase(), Phase::EnemyTurn);
        assert_eq!(
            run.player_action(PlayerAction::Attack),
            Err(ActionError::NotPlayerTurn(Phase::EnemyTurn))
        );
        assert_eq!(
            run.equip_owned_weapon("Wooden Stick"),
            Err(ActionError::NotPlayerTurn(Phase::EnemyTurn))
        );
        run.enemy_turn().unwrap();
        assert_eq!(run.phase(), Phase::PlayerTurn);
        assert_eq!(run.turn(), 2);
    }

    #[test]
    fn test_battle_calls_rejected_in_shop() {
        let mut run = run_with(untouchable(), 6);
        run.start().unwrap();
        win_battle(&mut run);
        assert_eq!(run.phase(), Phase::Shop);

        assert_eq!(
            run.player_action(PlayerAction::Attack),
            Err(ActionError::NotPlayerTurn(Phase::Shop))
        );
        assert_eq!(run.enemy_turn(), Err(ActionError::NotEnemyTurn(Phase::Shop)));
        assert_eq!(
            run.play_turn(PlayerAction::Heal),
            Err(ActionError::NotPlayerTurn(Phase::Shop))
        );
        assert_eq!(run.phase(), Phase::Shop);
    }

    #[test]
    fn test_stats_sent_after_stage_cleared() {
        let mut run = run_with(untouchable(), 7);
        run.start().unwrap();
        win_battle(&mut run);

        let events = run.observer().events();
        let cleared = events
            .iter()
            .position(|e| *e == BattleEvent::StageCleared(1))
            .unwrap();
        match &events[cleared + 1..] {
            [BattleEvent::StatsChanged { player, enemy, stage }] => {
                assert_eq!(*stage, 1);
                assert!(enemy.is_none());
                assert_eq!(player.name, "Survivor");
            }
            rest => panic!("unexpected events after stage clear: {rest:?}"),
        }
    }

    #[test]
    fn test_stats_sent_after_win() {
        let mut run = run_with(untouchable(), 7);
        run.start_from(FINAL_STAGE).unwrap();
        win_battle(&mut run);
        assert_eq!(run.phase(), Phase::Win);

        let events = run.observer().events();
        assert!(matches!(
            &events[events.len() - 2..],
            [
                BattleEvent::GameWon,
                BattleEvent::StatsChanged { enemy: None, stage: FINAL_STAGE, .. }
            ]
        ));
    }

    #[test]
    fn test_untouchable_player_wins_every_stage() {
        let mut run = run_with(untouchable(), 42);
        run.start().unwrap();

        for stage in 1..=FINAL_STAGE {
            assert_eq!(run.stage(), stage);
            win_battle(&mut run);
            if stage < FINAL_STAGE {
                assert_eq!(run.phase(), Phase::Shop);
                run.next_stage().unwrap();
            }
        }

        assert_eq!(run.phase(), Phase::Win);
        assert_eq!(run.player().stats().hp(), 120);
        let log = run.observer();
        assert_eq!(log.count(&BattleEvent::GameWon), 1);
        assert_eq!(log.count(&BattleEvent::GameOver), 0);
        for stage in 1..FINAL_STAGE {
            assert_eq!(log.count(&BattleEvent::StageCleared(stage)), 1);
        }
        assert_eq!(log.count(&BattleEvent::StageCleared(FINAL_STAGE)), 0);
        // Minimum drops: 40 + 70 + 140 + 280 + 100 hearts
        assert!(run.player().wallet().hearts() >= 630);
    }

    fn autoplay(seed: u64) -> TestRun {
        let mut run = run_with(Player::new("Survivor"), seed);
        run.start().unwrap();
        for _ in 0..10_000 {
            match run.phase() {
                Phase::PlayerTurn => {
                    let stats = run.player().stats();
                    let action = if stats.hp() < 40 {
                        PlayerAction::Heal
                    } else {
                        PlayerAction::Attack
                    };
                    run.play_turn(action).unwrap();
                }
                Phase::Shop => {
                    for name in ["Machete", "Hammer", "Revolver", "Rifle"] {
                        let _ = run.buy_weapon(name);
                    }
                    run.next_stage().unwrap();
                }
                _ => break,
            }
        }
        run
    }

    #[test]
    fn test_seeded_run_terminates_once() {
        for seed in 0..8 {
            let run = autoplay(seed);
            assert!(run.is_finished(), "seed {seed} stuck in {}", run.phase());

            let log = run.observer();
            let won = log.count(&BattleEvent::GameWon);
            let lost = log.count(&BattleEvent::GameOver);
            assert_eq!(won + lost, 1, "seed {seed}");
            if lost == 1 {
                assert!(!run.player().is_alive());
                assert!(log.contains_message(">>> YOU DIED <<<"));
            }
        }
    }

    #[test]
    fn test_same_seed_same_run() {
        let first = autoplay(9);
        let second = autoplay(9);
        assert_eq!(first.observer().events(), second.observer().events());
    }

    #[test]
    fn test_game_over() {
        let mut player = Player::new("Survivor");
        player.stats_mut().set_hp(1);
        player.stats_mut().set_defense(0);
        player.stats_mut().set_dodge_chance(Chance::ZERO);
        let mut run = run_with(player, 5);
        run.start().unwrap();

        let report = run.play_turn(PlayerAction::Attack).unwrap();
        assert!(report.enemy.is_some());
        assert_eq!(run.phase(), Phase::GameOver);
        assert!(!run.player().is_alive());
        assert_eq!(run.observer().count(&BattleEvent::GameOver), 1);
        assert!(run.observer().contains_message(">>> YOU DIED <<<"));
        assert_eq!(run.enemy_turn(), Err(ActionError::RunFinished));
    }

    #[test]
    fn test_shop_flow() {
        let mut player = untouchable();
        player.add_loot(OrganParts::new(500, 500));
        let mut run = run_with(player, 3);
        run.start().unwrap();
        win_battle(&mut run);

        assert_eq!(run.phase(), Phase::Shop);
        assert_eq!(run.observer().count(&BattleEvent::StageCleared(1)), 1);
        assert!(run.observer().contains_message("Enemy Defeated!"));
        assert!(run.observer().contains_message("Looted: "));
        let shop = run.shop().unwrap();
        assert!(shop.catalog().weapon("Machete").is_some());

        let previous = run.buy_weapon("Machete").unwrap();
        assert_eq!(previous.map(|w| w.name), Some("Wooden Stick".to_string()));
        assert_eq!(run.player().weapon().map(|w| w.name.as_str()), Some("Machete"));
        assert_eq!(run.armory().weapons().len(), 2);

        assert_eq!(
            run.buy_weapon("Rifle"),
            Err(ActionError::Purchase(PurchaseError::NotInCatalog(
                "Rifle".to_string()
            )))
        );
        run.buy_armor("Leather Jacket").unwrap();
        run.buy_potion("Small Medkit").unwrap();
        run.buy_potion("Small Medkit").unwrap();
        assert_eq!(run.player().potions().len(), 2);

        let previous = run.equip_owned_weapon("Wooden Stick").unwrap();
        assert_eq!(previous.map(|w| w.name), Some("Machete".to_string()));
        assert_eq!(
            run.equip_owned_weapon("Axe"),
            Err(ActionError::NotOwned("Axe".to_string()))
        );
        assert!(run.equip_owned_armor("Leather Jacket").is_ok());

        run.next_stage().unwrap();
        assert_eq!(run.stage(), 2);
        assert_eq!(run.phase(), Phase::PlayerTurn);
        assert!(run.shop().is_none());
        assert_eq!(run.enemy().map(|e| e.kind()), Some(EnemyKind::Rotten));
    }

    #[test]
    fn test_unaffordable_purchase_changes_nothing() {
        let mut registry = CatalogRegistry::new();
        registry.insert(
            2,
            shop_core::Catalog::new(vec![builtin::rifle()], vec![], vec![]),
        );
        let mut run = run_with(untouchable(), 3).with_catalogs(registry);
        run.start().unwrap();
        win_battle(&mut run);

        // Stage 1 drops at most 50 H / 18 B
        let wallet = *run.player().wallet();
        assert_eq!(
            run.buy_weapon("Rifle"),
            Err(ActionError::Purchase(PurchaseError::CannotAfford {
                item: "Rifle".to_string(),
                cost: builtin::rifle().cost,
                wallet,
            }))
        );
        assert_eq!(*run.player().wallet(), wallet);
        assert_eq!(run.player().weapon().map(|w| w.name.as_str()), Some("Wooden Stick"));
        assert_eq!(run.armory().weapons().len(), 1);
    }

    #[test]
    fn test_poison_cleared_at_stage_start() {
        let mut player = Player::new("Survivor");
        player.stats_mut().set_attack(5_000);
        player.stats_mut().set_dodge_chance(Chance::ZERO);
        let mut run = run_with(player, 8);
        run.start_from(2).unwrap();
        assert_eq!(run.enemy().map(|e| e.kind()), Some(EnemyKind::Rotten));

        run.play_turn(PlayerAction::Heal).unwrap();
        assert!(run.player().stats().is_poisoned());

        win_battle(&mut run);
        assert_eq!(run.phase(), Phase::Shop);
        run.next_stage().unwrap();
        assert!(!run.player().stats().is_poisoned());

        let fades = run
            .observer()
            .messages()
            .filter(|line| line.contains("lingering poison fades"))
            .count();
        assert_eq!(fades, 2);
    }

    #[test]
    fn test_potion_is_a_free_action() {
        let mut player = Player::new("Survivor");
        player.add_potion(builtin::small_medkit());
        player.stats_mut().set_hp(50);
        let mut run = run_with(player, 1);
        run.start().unwrap();

        assert_eq!(run.use_potion(0), Ok(true));
        assert_eq!(run.player().stats().hp(), 80);
        assert_eq!(run.phase(), Phase::PlayerTurn);
        assert!(run.observer().contains_message("You drink Small Medkit and heal 30 HP"));
        assert_eq!(run.use_potion(0), Err(ActionError::NoSuchPotion(0)));

        run.player_action(PlayerAction::Heal).unwrap();
        assert_eq!(
            run.use_potion(0),
            Err(ActionError::NotPlayerTurn(Phase::EnemyTurn))
        );
    }

    #[test]
    fn test_snapshots() {
        let mut run = RunController::with_seed("Survivor", 2);
        assert!(run.enemy_snapshot().is_none());
        run.start().unwrap();

        let enemy = run.enemy_snapshot().unwrap();
        assert_eq!(enemy.name, "Normal Zombie");
        assert_eq!(enemy.hp, 100);

        let json = serde_json::to_value(run.player_snapshot()).unwrap();
        assert_eq!(json["name"], "Survivor");
        assert_eq!(json["attack"], 25);
    }

    #[test]
    fn test_custom_catalogs() {
        let mut registry = CatalogRegistry::new();
        registry.insert(
            2,
            shop_core::Catalog::new(vec![builtin::rifle()], vec![], vec![]),
        );
        let mut player = untouchable();
        player.add_loot(OrganParts::new(1_000, 1_000));
        let mut run = run_with(player, 4).with_catalogs(registry);
        run.start().unwrap();
        win_battle(&mut run);

        assert!(run.buy_weapon("Rifle").is_ok());
        assert_eq!(
            run.buy_weapon("Machete"),
            Err(ActionError::Purchase(PurchaseError::NotInCatalog(
                "Machete".to_string()
            )))
        );
    }
}
