//! One encounter: player turn, enemy turn, death checks and the loot award

use crate::error::ActionError;
use crate::events::{Actor, BattleObserver};
use crate::state::Phase;
use combat_core::{AbilityEffect, Enemy, EnemyAttack, EnemyMove, HitResult, Player, PoisonTick};
use gear_core::OrganParts;
use rand::Rng;
use tracing::{debug, info, trace};

/// What the player does with their turn
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerAction {
    Attack,
    /// Adrenaline Shot
    Heal,
}

/// Result of the player's action
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerReport {
    Attack {
        /// The enemy's reaction to the weapon, fired before the hit resolved
        reaction: AbilityEffect,
        hit: HitResult,
    },
    Heal {
        healed: u32,
    },
}

/// What the enemy spent its action on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnemyAction {
    Attack(EnemyAttack),
    Special(AbilityEffect),
}

/// Everything that happened during one enemy turn
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EnemyReport {
    pub poison: PoisonTick,
    pub enrage: AbilityEffect,
    /// `None` when poison killed the player before the enemy could act
    pub action: Option<EnemyAction>,
    pub regeneration: AbilityEffect,
}

#[derive(Debug, Clone)]
pub struct BattleSession {
    stage: u32,
    enemy: Enemy,
    phase: Phase,
    turn: u32,
}

impl BattleSession {
    /// Open the encounter and hand the first turn to the player
    pub fn start(
        stage: u32,
        enemy: Enemy,
        player: &Player,
        observer: &mut dyn BattleObserver,
    ) -> Self {
        info!(stage, enemy = enemy.name(), "stage started");
        observer.on_log_message(&format!("=== STAGE {} START ===", stage));

        let mut session = BattleSession {
            stage,
            enemy,
            phase: Phase::StageStart,
            turn: 1,
        };
        session.advance(Phase::PlayerTurn);
        session.notify_stats(player, observer);
        observer.on_turn_changed(Actor::Player);
        session
    }

    pub fn stage(&self) -> u32 {
        self.stage
    }

    pub fn enemy(&self) -> &Enemy {
        &self.enemy
    }

    pub fn enemy_mut(&mut self) -> &mut Enemy {
        &mut self.enemy
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Current round, starting at 1
    pub fn turn(&self) -> u32 {
        self.turn
    }

    /// True once someone has died
    pub fn is_over(&self) -> bool {
        matches!(
            self.phase,
            Phase::EnemyDead | Phase::LootAward | Phase::PlayerDead
        )
    }

    /// Resolve the player's one action for this round
    pub fn player_action(
        &mut self,
        action: PlayerAction,
        player: &mut Player,
        rng: &mut impl Rng,
        observer: &mut dyn BattleObserver,
    ) -> Result<PlayerReport, ActionError> {
        if self.phase != Phase::PlayerTurn {
            return Err(ActionError::NotPlayerTurn(self.phase));
        }

        let report = match action {
            PlayerAction::Attack => {
                self.advance(Phase::AttackResolve);
                self.resolve_attack(player, rng, observer)
            }
            PlayerAction::Heal => {
                self.advance(Phase::HealResolve);
                resolve_heal(player, observer)
            }
        };
        self.notify_stats(player, observer);

        if self.enemy.is_alive() {
            self.advance(Phase::EnemyTurn);
            observer.on_turn_changed(Actor::Enemy);
        } else {
            self.advance(Phase::EnemyDead);
            info!(stage = self.stage, enemy = self.enemy.name(), turn = self.turn, "enemy defeated");
            observer.on_log_message("Enemy Defeated!");
        }
        Ok(report)
    }

    fn resolve_attack(
        &mut self,
        player: &mut Player,
        rng: &mut impl Rng,
        observer: &mut dyn BattleObserver,
    ) -> PlayerReport {
        let name = self.enemy.name();
        let reaction = self.enemy.react_to_weapon(player.weapon_type());
        if let Some(line) = describe_effect(&reaction, name) {
            observer.on_log_message(&line);
        }

        let hit = player.attack_enemy(&mut self.enemy, rng);
        debug!(?hit, enemy = name, "player attack resolved");
        let line = if hit.dodged {
            format!("{} dodged your attack!", name)
        } else if hit.damage == 0 && hit.absorbed > 0 {
            format!("{}'s defense absorbed all {} damage.", name, hit.absorbed)
        } else if hit.critical {
            format!("CRITICAL! {} dealt {} damage!", player.name(), hit.damage)
        } else {
            format!("{} dealt {} damage.", player.name(), hit.damage)
        };
        observer.on_log_message(&line);

        PlayerReport::Attack { reaction, hit }
    }

    /// Poison tick, death check, enrage, the enemy's move, then regeneration
    pub fn enemy_turn(
        &mut self,
        player: &mut Player,
        rng: &mut impl Rng,
        observer: &mut dyn BattleObserver,
    ) -> Result<EnemyReport, ActionError> {
        if self.phase != Phase::EnemyTurn {
            return Err(ActionError::NotEnemyTurn(self.phase));
        }

        let hp_before = player.stats().hp();
        let poison = player.stats_mut().tick_poison();
        if poison.damage > 0 {
            observer.on_log_message(&format!(
                "Poison deals {} damage to you at the start of the turn. HP {} → {}.",
                poison.damage,
                hp_before,
                player.stats().hp()
            ));
        }

        if !player.is_alive() {
            self.advance(Phase::EnemyResolve);
            self.notify_stats(player, observer);
            self.player_died(observer);
            return Ok(EnemyReport {
                poison,
                enrage: AbilityEffect::None,
                action: None,
                regeneration: AbilityEffect::None,
            });
        }

        let name = self.enemy.name();
        let enrage = self.enemy.start_turn();
        if let Some(line) = describe_effect(&enrage, name) {
            observer.on_log_message(&line);
        }

        let action = match self.enemy.choose_move(rng) {
            EnemyMove::Special => {
                let effect = self.enemy.use_special(player.stats_mut(), rng);
                observer.on_log_message(&format!("{} uses Toxic Smash!", name));
                if let AbilityEffect::ToxicSmash(hit) = effect {
                    observer.on_log_message(&describe_enemy_hit(&hit, name));
                }
                EnemyAction::Special(effect)
            }
            EnemyMove::BasicAttack => {
                let attack = self.enemy.basic_attack(player.stats_mut(), rng);
                observer.on_log_message(&describe_enemy_hit(&attack.hit, name));
                if let Some(line) = describe_effect(&attack.effect, name) {
                    observer.on_log_message(&line);
                }
                EnemyAction::Attack(attack)
            }
        };
        debug!(?action, enemy = name, "enemy action resolved");

        let regeneration = self.enemy.end_turn();
        if let Some(line) = describe_effect(&regeneration, name) {
            observer.on_log_message(&line);
        }

        self.advance(Phase::EnemyResolve);
        self.notify_stats(player, observer);

        if player.is_alive() {
            self.turn += 1;
            self.advance(Phase::PlayerTurn);
            observer.on_turn_changed(Actor::Player);
        } else {
            self.player_died(observer);
        }

        Ok(EnemyReport {
            poison,
            enrage,
            action: Some(action),
            regeneration,
        })
    }

    /// Roll the defeated enemy's drop into the player's wallet.
    ///
    /// Only valid once, right after the enemy died; otherwise `None`.
    pub fn award_loot(
        &mut self,
        player: &mut Player,
        rng: &mut impl Rng,
        observer: &mut dyn BattleObserver,
    ) -> Option<OrganParts> {
        if self.phase != Phase::EnemyDead {
            return None;
        }

        let loot = self.enemy.drop_loot(rng);
        player.add_loot(loot);
        self.advance(Phase::LootAward);
        info!(stage = self.stage, %loot, "loot awarded");
        observer.on_log_message(&format!("Looted: {}", loot));
        self.notify_stats(player, observer);
        Some(loot)
    }

    pub(crate) fn notify_stats(&self, player: &Player, observer: &mut dyn BattleObserver) {
        observer.on_stats_changed(&player.snapshot(), Some(&self.enemy.snapshot()), self.stage);
    }

    fn player_died(&mut self, observer: &mut dyn BattleObserver) {
        self.advance(Phase::PlayerDead);
        info!(stage = self.stage, turn = self.turn, "player died");
        observer.on_log_message(">>> YOU DIED <<<");
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

fn resolve_heal(player: &mut Player, observer: &mut dyn BattleObserver) -> PlayerReport {
    let before = player.stats().hp();
    let healed = player.adrenaline_shot();
    debug!(healed, "adrenaline shot");
    if healed > 0 {
        observer.on_log_message(&format!(
            "You use Adrenaline Shot and heal {} HP ({} → {}).",
            healed,
            before,
            player.stats().hp()
        ));
    } else {
        observer.on_log_message("You use Adrenaline Shot, but your HP is already full.");
    }
    PlayerReport::Heal { healed }
}

fn describe_enemy_hit(hit: &HitResult, name: &str) -> String {
    if hit.dodged {
        format!("You dodged {}'s attack!", name)
    } else if hit.damage == 0 && hit.absorbed > 0 {
        format!("Your defense absorbed {}'s attack.", name)
    } else if hit.critical {
        format!("CRITICAL! {} dealt {} damage!", name, hit.damage)
    } else {
        format!("{} attacked: {}", name, hit.damage)
    }
}

fn describe_effect(effect: &AbilityEffect, name: &str) -> Option<String> {
    let line = match effect {
        AbilityEffect::None | AbilityEffect::ToxicSmash(_) => return None,
        AbilityEffect::Regenerated { healed } => format!("{} regenerates {} HP.", name, healed),
        AbilityEffect::Poisoned {
            damage_per_turn,
            turns,
        } => format!(
            "You are poisoned! {} damage per turn for {} turns.",
            damage_per_turn, turns
        ),
        AbilityEffect::Hardened {
            defense_gain,
            defense,
        } => format!(
            "{} hardens against your weapon! DEF +{} ({}).",
            name, defense_gain, defense
        ),
        AbilityEffect::Evaded {
            dodge_gain,
            dodge_chance,
        } => format!(
            "{} reads your swing and gets quicker! DODGE +{} ({}).",
            name, dodge_gain, dodge_chance
        ),
        AbilityEffect::Enraged { attack_gain, attack } => format!(
            "{} becomes enraged! ATK +{} ({}).",
            name, attack_gain, attack
        ),
    };
    Some(line)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::{BattleEvent, EventLog};
    use combat_core::EnemyKind;
    use gear_core::{builtin, Chance};
    use rand::rngs::mock::StepRng;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    /// Every roll with a non-zero chance succeeds
    fn lucky() -> StepRng {
        StepRng::new(0, 0)
    }

    /// Only certain rolls succeed
    fn unlucky() -> StepRng {
        StepRng::new(u64::MAX, 0)
    }

    fn open(kind: EnemyKind, player: &Player, log: &mut EventLog) -> BattleSession {
        BattleSession::start(kind.stage(), Enemy::new(kind), player, log)
    }

    #[test]
    fn test_start_hands_turn_to_player() {
        let player = Player::new("Survivor");
        let mut log = EventLog::new();
        let session = open(EnemyKind::Normal, &player, &mut log);

        assert_eq!(session.phase(), Phase::PlayerTurn);
        assert_eq!(session.turn(), 1);
        assert_eq!(log.messages().next(), Some("=== STAGE 1 START ==="));
        assert_eq!(log.events().last(), Some(&BattleEvent::TurnChanged(Actor::Player)));
    }

    #[test]
    fn test_full_round() {
        let mut player = Player::new("Survivor");
        let mut log = EventLog::new();
        let mut session = open(EnemyKind::Normal, &player, &mut log);
        let mut rng = unlucky();

        let report = session
            .player_action(PlayerAction::Attack, &mut player, &mut rng, &mut log)
            .unwrap();
        let PlayerReport::Attack { reaction, hit } = report else {
            panic!("expected an attack report, got {report:?}");
        };
        assert!(reaction.is_none());
        assert_eq!(hit.damage, 15);
        assert_eq!(session.enemy().stats().hp(), 85);
        assert_eq!(session.phase(), Phase::EnemyTurn);
        assert!(log.contains_message("Survivor dealt 15 damage."));

        let report = session.enemy_turn(&mut player, &mut rng, &mut log).unwrap();
        let Some(EnemyAction::Attack(attack)) = report.action else {
            panic!("expected a basic attack, got {report:?}");
        };
        assert_eq!(attack.hit.damage, 7);
        assert_eq!(player.stats().hp(), 113);
        assert!(report.regeneration.is_none());
        assert!(log.contains_message("Normal Zombie attacked: 7"));
        assert_eq!(session.phase(), Phase::PlayerTurn);
        assert_eq!(session.turn(), 2);
    }

    #[test]
    fn test_wrong_phase_is_rejected() {
        let mut player = Player::new("Survivor");
        let mut log = EventLog::new();
        let mut session = open(EnemyKind::Normal, &player, &mut log);
        let mut rng = unlucky();

        assert_eq!(
            session.enemy_turn(&mut player, &mut rng, &mut log),
            Err(ActionError::NotEnemyTurn(Phase::PlayerTurn))
        );

        session
            .player_action(PlayerAction::Heal, &mut player, &mut rng, &mut log)
            .unwrap();
        assert_eq!(
            session.player_action(PlayerAction::Attack, &mut player, &mut rng, &mut log),
            Err(ActionError::NotPlayerTurn(Phase::EnemyTurn))
        );
        assert!(session.award_loot(&mut player, &mut rng, &mut log).is_none());
    }

    #[test]
    fn test_heal_action() {
        let mut player = Player::new("Survivor");
        let mut log = EventLog::new();
        let mut session = open(EnemyKind::Normal, &player, &mut log);

        let report = session
            .player_action(PlayerAction::Heal, &mut player, &mut unlucky(), &mut log)
            .unwrap();
        assert_eq!(report, PlayerReport::Heal { healed: 0 });
        assert!(log.contains_message("HP is already full"));

        session.enemy_turn(&mut player, &mut unlucky(), &mut log).unwrap();
        player.stats_mut().set_hp(50);
        let report = session
            .player_action(PlayerAction::Heal, &mut player, &mut unlucky(), &mut log)
            .unwrap();
        assert_eq!(report, PlayerReport::Heal { healed: 36 });
        assert!(log.contains_message("heal 36 HP (50 → 86)"));
    }

    #[test]
    fn test_enemy_death_and_loot() {
        let mut player = Player::new("Survivor");
        player.stats_mut().set_attack(1_000);
        let mut log = EventLog::new();
        let mut session = open(EnemyKind::Normal, &player, &mut log);

        session
            .player_action(PlayerAction::Attack, &mut player, &mut unlucky(), &mut log)
            .unwrap();
        assert_eq!(session.phase(), Phase::EnemyDead);
        assert!(session.is_over());
        assert!(log.contains_message("Enemy Defeated!"));
        assert_eq!(
            session.enemy_turn(&mut player, &mut unlucky(), &mut log),
            Err(ActionError::NotEnemyTurn(Phase::EnemyDead))
        );

        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let loot = session.award_loot(&mut player, &mut rng, &mut log).unwrap();
        assert!((40..=50).contains(&loot.hearts()));
        assert!((15..=18).contains(&loot.brains()));
        assert_eq!(*player.wallet(), loot);
        assert_eq!(session.phase(), Phase::LootAward);
        assert!(log.contains_message(&format!("Looted: {} H, {} B", loot.hearts(), loot.brains())));

        // Loot is awarded once
        assert!(session.award_loot(&mut player, &mut rng, &mut log).is_none());
    }

    #[test]
    fn test_poison_kills_before_enemy_acts() {
        let mut player = Player::new("Survivor");
        let mut log = EventLog::new();
        let mut session = open(EnemyKind::Rotten, &player, &mut log);

        session
            .player_action(PlayerAction::Heal, &mut player, &mut unlucky(), &mut log)
            .unwrap();
        player.stats_mut().set_hp(4);
        player.stats_mut().apply_poison(5, 3);

        let report = session.enemy_turn(&mut player, &mut unlucky(), &mut log).unwrap();
        assert_eq!(report.poison.damage, 4);
        assert!(report.poison.fatal);
        assert!(report.action.is_none());
        assert!(!player.is_alive());
        assert_eq!(session.phase(), Phase::PlayerDead);
        assert!(log.contains_message("Poison deals 4 damage to you at the start of the turn. HP 4 → 0."));
        assert!(log.contains_message(">>> YOU DIED <<<"));
    }

    #[test]
    fn test_rotten_bite_logs_poison() {
        let mut player = Player::new("Survivor");
        let mut log = EventLog::new();
        let mut session = open(EnemyKind::Rotten, &player, &mut log);

        session
            .player_action(PlayerAction::Heal, &mut player, &mut unlucky(), &mut log)
            .unwrap();
        session.enemy_turn(&mut player, &mut unlucky(), &mut log).unwrap();
        assert!(player.stats().is_poisoned());
        assert!(log.contains_message("You are poisoned!"));

        session
            .player_action(PlayerAction::Heal, &mut player, &mut unlucky(), &mut log)
            .unwrap();
        let report = session.enemy_turn(&mut player, &mut unlucky(), &mut log).unwrap();
        assert_eq!(report.poison.damage, 5);
    }

    #[test]
    fn test_normal_regenerates_after_its_attack() {
        let mut player = Player::new("Survivor");
        let mut log = EventLog::new();
        let mut session = open(EnemyKind::Normal, &player, &mut log);
        session.enemy_mut().stats_mut().set_hp(40);

        session
            .player_action(PlayerAction::Heal, &mut player, &mut unlucky(), &mut log)
            .unwrap();
        let report = session.enemy_turn(&mut player, &mut unlucky(), &mut log).unwrap();
        assert_eq!(report.regeneration, AbilityEffect::Regenerated { healed: 5 });
        assert_eq!(session.enemy().stats().hp(), 45);
        assert!(log.contains_message("Normal Zombie regenerates 5 HP."));
    }

    #[test]
    fn test_boss_toxic_smash() {
        let mut player = Player::new("Survivor");
        player.stats_mut().set_dodge_chance(Chance::ZERO);
        let mut log = EventLog::new();
        let mut session = open(EnemyKind::Boss, &player, &mut log);

        session
            .player_action(PlayerAction::Heal, &mut player, &mut lucky(), &mut log)
            .unwrap();
        let report = session.enemy_turn(&mut player, &mut lucky(), &mut log).unwrap();
        let Some(EnemyAction::Special(AbilityEffect::ToxicSmash(hit))) = report.action else {
            panic!("expected Toxic Smash, got {report:?}");
        };
        // round(25 * 1.5) = 38 raw, 8 absorbed by defense
        assert_eq!(hit.raw_damage, 38);
        assert_eq!(hit.damage, 30);
        assert_eq!(player.stats().hp(), 90);
        assert!(log.contains_message("Boss Zombie uses Toxic Smash!"));
    }

    #[test]
    fn test_boss_enrages_at_half_hp() {
        let mut player = Player::new("Survivor");
        let mut log = EventLog::new();
        let mut session = open(EnemyKind::Boss, &player, &mut log);
        session.enemy_mut().stats_mut().set_hp(175);

        session
            .player_action(PlayerAction::Heal, &mut player, &mut unlucky(), &mut log)
            .unwrap();
        let report = session.enemy_turn(&mut player, &mut unlucky(), &mut log).unwrap();
        assert_eq!(
            report.enrage,
            AbilityEffect::Enraged {
                attack_gain: 13,
                attack: 38
            }
        );
        assert!(log.contains_message("becomes enraged!"));
    }

    #[test]
    fn test_armored_hardens_against_sharp() {
        let mut player = Player::new("Survivor");
        player.equip_weapon(Some(builtin::machete()));
        let mut log = EventLog::new();
        let mut session = open(EnemyKind::Armored, &player, &mut log);

        let report = session
            .player_action(PlayerAction::Attack, &mut player, &mut unlucky(), &mut log)
            .unwrap();
        let PlayerReport::Attack { reaction, hit } = report else {
            panic!("expected an attack report, got {report:?}");
        };
        assert_eq!(
            reaction,
            AbilityEffect::Hardened {
                defense_gain: 5,
                defense: 25
            }
        );
        // 45 attack against 25 defense
        assert_eq!(hit.absorbed, 25);
        assert_eq!(hit.damage, 20);
        assert!(log.contains_message("hardens against your weapon"));
    }

    #[test]
    fn test_every_mutation_notifies_stats() {
        let mut player = Player::new("Survivor");
        let mut log = EventLog::new();
        let mut session = open(EnemyKind::Normal, &player, &mut log);
        session
            .player_action(PlayerAction::Attack, &mut player, &mut unlucky(), &mut log)
            .unwrap();
        session.enemy_turn(&mut player, &mut unlucky(), &mut log).unwrap();

        let stats: Vec<_> = log
            .events()
            .iter()
            .filter_map(|event| match event {
                BattleEvent::StatsChanged { enemy, stage, .. } => Some((enemy.clone(), *stage)),
                _ => None,
            })
            .collect();
        assert_eq!(stats.len(), 3);
        assert!(stats.iter().all(|(enemy, stage)| enemy.is_some() && *stage == 1));
        assert_eq!(stats[2].0.as_ref().map(|e| e.hp), Some(85));
    }
}
