//! Turn-based battle engine.
//!
//! The engine is a plain state machine. It never sleeps or spawns: after a
//! player action that leaves the enemy standing it parks in `Resolving`, and
//! the host is responsible for calling `enemy_turn()` after its delay.
//!
//! ## State Transitions
//!
//! ```text
//! Menu -> Playing <-> Resolving
//!         Playing -> Victory -> Menu
//!       Resolving -> Defeat  -> Menu
//! ```

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::achievement::{Achievement, AchievementSet};
use super::dice::Dice;
use super::log::{BattleLog, DEFAULT_LOG_CAPACITY};
use super::roster::{self, Enemy, ROSTER};
use super::sequence::SequenceMatcher;
use crate::error::{BattleError, ValidationError};

pub const PLAYER_MAX_HEALTH: u32 = 100;
pub const PLAYER_MAX_FORCE: u32 = 100;
pub const FORCE_COST: u32 = 20;
pub const DEFEND_RESTORE: u32 = 15;
pub const COMBO_MASTER_THRESHOLD: u32 = 5;
pub const FORCE_SENSITIVE_THRESHOLD: u32 = 10;

const PLAYER_ATTACK_DAMAGE: (u32, u32) = (15, 44);
const PLAYER_FORCE_DAMAGE: (u32, u32) = (20, 59);
const ENEMY_ATTACK_DAMAGE: (u32, u32) = (10, 34);
const ENEMY_FORCE_DAMAGE: (u32, u32) = (15, 49);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BattlePhase {
    Menu,
    Playing,
    /// Player action resolved; waiting for the enemy turn.
    Resolving,
    Victory,
    Defeat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Action {
    Attack,
    Force,
    Defend,
}

impl Action {
    const ALL: [Action; 3] = [Action::Attack, Action::Force, Action::Defend];
}

impl FromStr for Action {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "attack" => Ok(Action::Attack),
            "force" => Ok(Action::Force),
            "defend" => Ok(Action::Defend),
            other => Err(ValidationError::invalid(
                "action",
                format!("'{other}' is not one of attack, force, defend"),
            )),
        }
    }
}

/// Mutable aggregate for one run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BattleState {
    pub player_health: u32,
    pub enemy_health: u32,
    pub player_force: u32,
    pub enemy_force: u32,
    pub enemy_index: usize,
    pub score: u32,
    pub phase: BattlePhase,
    pub achievements: AchievementSet,
    pub combo: u32,
    pub last_action: Option<Action>,
    /// Successful force actions this run.
    #[serde(default)]
    pub force_uses: u32,
    /// Attack actions this run.
    #[serde(default)]
    pub attacks_used: u32,
    #[serde(default)]
    pub easter_egg: bool,
}

impl Default for BattleState {
    fn default() -> Self {
        let first = &ROSTER[0];
        Self {
            player_health: PLAYER_MAX_HEALTH,
            enemy_health: first.max_health,
            player_force: PLAYER_MAX_FORCE,
            enemy_force: first.max_force,
            enemy_index: 0,
            score: 0,
            phase: BattlePhase::Menu,
            achievements: AchievementSet::default(),
            combo: 0,
            last_action: None,
            force_uses: 0,
            attacks_used: 0,
            easter_egg: false,
        }
    }
}

/// Everything observable that a transition did, in order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum BattleEvent {
    RunStarted {
        enemy: String,
    },
    PlayerStruck {
        action: Action,
        damage: u32,
        enemy_health: u32,
    },
    ForceRejected {
        player_force: u32,
    },
    PlayerFocused {
        player_force: u32,
    },
    EnemyDefeated {
        enemy: String,
        score_awarded: u32,
    },
    EnemyApproaches {
        enemy: String,
        quote: String,
    },
    Victory {
        score: u32,
    },
    EnemyStruck {
        enemy: String,
        action: Action,
        damage: u32,
        player_health: u32,
    },
    EnemyForceFailed {
        enemy: String,
    },
    EnemyFocused {
        enemy: String,
        enemy_force: u32,
    },
    PlayerDefeated,
    AchievementUnlocked {
        achievement: Achievement,
    },
    EasterEggFound,
    ReturnedToMenu,
}

impl BattleEvent {
    /// Human-readable log line.
    pub fn message(&self) -> String {
        match self {
            BattleEvent::RunStarted { enemy } => format!("Battle begins against {enemy}!"),
            BattleEvent::PlayerStruck {
                action: Action::Force,
                damage,
                ..
            } => format!("Force lightning strikes for {damage} damage!"),
            BattleEvent::PlayerStruck { damage, .. } => {
                format!("You strike for {damage} damage!")
            }
            BattleEvent::ForceRejected { .. } => "Not enough Force energy!".to_string(),
            BattleEvent::PlayerFocused { .. } => {
                "You focus and restore Force energy!".to_string()
            }
            BattleEvent::EnemyDefeated { enemy, .. } => format!("{enemy} has been defeated!"),
            BattleEvent::EnemyApproaches { enemy, quote } => {
                format!("{enemy} approaches: \"{quote}\"")
            }
            BattleEvent::Victory { .. } => "You have brought balance to the Force!".to_string(),
            BattleEvent::EnemyStruck {
                enemy,
                action: Action::Force,
                damage,
                ..
            } => format!("{enemy} uses the Force for {damage} damage!"),
            BattleEvent::EnemyStruck { enemy, damage, .. } => {
                format!("{enemy} attacks for {damage} damage!")
            }
            BattleEvent::EnemyForceFailed { enemy } => {
                format!("{enemy} tries to use the Force but fails!")
            }
            BattleEvent::EnemyFocused { enemy, .. } => {
                format!("{enemy} focuses and restores energy.")
            }
            BattleEvent::PlayerDefeated => {
                "You have been defeated. The dark side clouds everything.".to_string()
            }
            BattleEvent::AchievementUnlocked { achievement } => {
                format!("Achievement Unlocked: {}", achievement.title())
            }
            BattleEvent::EasterEggFound => "R2-D2 appears and beeps encouragingly!".to_string(),
            BattleEvent::ReturnedToMenu => "Returned to the menu.".to_string(),
        }
    }
}

/// Battle simulator: state, rolling log and hidden-sequence matcher.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BattleEngine {
    state: BattleState,
    log: BattleLog,
    #[serde(default)]
    matcher: SequenceMatcher,
}

impl BattleEngine {
    pub fn new() -> Self {
        Self::with_log_capacity(DEFAULT_LOG_CAPACITY)
    }

    pub fn with_log_capacity(capacity: usize) -> Self {
        Self {
            state: BattleState::default(),
            log: BattleLog::new(capacity),
            matcher: SequenceMatcher::default(),
        }
    }

    /// Applies a new log capacity to a loaded engine.
    pub fn set_log_capacity(&mut self, capacity: usize) {
        self.log.set_capacity(capacity);
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn state(&self) -> &BattleState {
        &self.state
    }

    pub fn phase(&self) -> BattlePhase {
        self.state.phase
    }

    pub fn log(&self) -> &BattleLog {
        &self.log
    }

    /// True while the enemy turn is pending.
    pub fn awaiting_enemy(&self) -> bool {
        self.state.phase == BattlePhase::Resolving
    }

    pub fn current_enemy(&self) -> &'static Enemy {
        roster::enemy(self.state.enemy_index).unwrap_or(&ROSTER[0])
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Begin a new run. Achievements carry over from earlier runs.
    pub fn start_run(&mut self) -> Result<Vec<BattleEvent>, BattleError> {
        self.expect_phase("start_run", &[BattlePhase::Menu])?;

        let achievements = std::mem::take(&mut self.state.achievements);
        let easter_egg = self.state.easter_egg;
        self.state = BattleState {
            phase: BattlePhase::Playing,
            achievements,
            easter_egg,
            ..BattleState::default()
        };
        self.log.clear();

        let mut events = Vec::new();
        self.record(
            &mut events,
            BattleEvent::RunStarted {
                enemy: self.current_enemy().name.to_string(),
            },
        );
        debug!(enemy = self.current_enemy().name, "battle run started");
        Ok(events)
    }

    /// Resolve one player action.
    ///
    /// A force action without enough energy is rejected: only a log line is
    /// produced and the phase stays `Playing`, so no enemy turn follows.
    pub fn perform_action<D: Dice + ?Sized>(
        &mut self,
        action: Action,
        dice: &mut D,
    ) -> Result<Vec<BattleEvent>, BattleError> {
        self.expect_phase("perform_action", &[BattlePhase::Playing])?;
        let mut events = Vec::new();

        match action {
            Action::Attack => {
                let damage = dice.roll(PLAYER_ATTACK_DAMAGE.0, PLAYER_ATTACK_DAMAGE.1);
                self.strike_enemy(&mut events, action, damage);
                self.state.attacks_used += 1;
            }
            Action::Force => {
                if self.state.player_force < FORCE_COST {
                    self.record(
                        &mut events,
                        BattleEvent::ForceRejected {
                            player_force: self.state.player_force,
                        },
                    );
                    return Ok(events);
                }
                self.state.player_force -= FORCE_COST;
                let damage = dice.roll(PLAYER_FORCE_DAMAGE.0, PLAYER_FORCE_DAMAGE.1);
                self.strike_enemy(&mut events, action, damage);
                self.state.force_uses += 1;
            }
            Action::Defend => {
                self.state.player_force =
                    (self.state.player_force + DEFEND_RESTORE).min(PLAYER_MAX_FORCE);
                self.state.combo = 0;
                self.record(
                    &mut events,
                    BattleEvent::PlayerFocused {
                        player_force: self.state.player_force,
                    },
                );
            }
        }
        self.state.last_action = Some(action);

        if self.state.combo >= COMBO_MASTER_THRESHOLD {
            self.unlock(&mut events, Achievement::ComboMaster);
        }
        if self.state.force_uses >= FORCE_SENSITIVE_THRESHOLD {
            self.unlock(&mut events, Achievement::ForceSensitive);
        }

        if self.state.enemy_health == 0 {
            self.resolve_enemy_defeat(&mut events);
        } else {
            self.state.phase = BattlePhase::Resolving;
        }

        debug!(?action, phase = ?self.state.phase, "player action resolved");
        Ok(events)
    }

    /// Run the deferred enemy turn.
    pub fn enemy_turn<D: Dice + ?Sized>(
        &mut self,
        dice: &mut D,
    ) -> Result<Vec<BattleEvent>, BattleError> {
        self.expect_phase("enemy_turn", &[BattlePhase::Resolving])?;
        let enemy = self.current_enemy();
        let mut events = Vec::new();

        let action = Action::ALL[dice.pick(Action::ALL.len())];
        match action {
            Action::Attack => {
                let damage = dice.roll(ENEMY_ATTACK_DAMAGE.0, ENEMY_ATTACK_DAMAGE.1);
                self.strike_player(&mut events, enemy, action, damage);
            }
            Action::Force => {
                if self.state.enemy_force >= FORCE_COST {
                    let damage = dice.roll(ENEMY_FORCE_DAMAGE.0, ENEMY_FORCE_DAMAGE.1);
                    self.state.enemy_force -= FORCE_COST;
                    self.strike_player(&mut events, enemy, action, damage);
                } else {
                    self.record(
                        &mut events,
                        BattleEvent::EnemyForceFailed {
                            enemy: enemy.name.to_string(),
                        },
                    );
                }
            }
            Action::Defend => {
                self.state.enemy_force =
                    (self.state.enemy_force + DEFEND_RESTORE).min(enemy.max_force);
                self.record(
                    &mut events,
                    BattleEvent::EnemyFocused {
                        enemy: enemy.name.to_string(),
                        enemy_force: self.state.enemy_force,
                    },
                );
            }
        }

        if self.state.player_health == 0 {
            self.state.phase = BattlePhase::Defeat;
            self.record(&mut events, BattleEvent::PlayerDefeated);
        } else {
            self.state.phase = BattlePhase::Playing;
        }

        debug!(enemy = enemy.name, ?action, phase = ?self.state.phase, "enemy turn resolved");
        Ok(events)
    }

    /// Leave a finished run. Achievements are kept.
    pub fn return_to_menu(&mut self) -> Result<Vec<BattleEvent>, BattleError> {
        self.expect_phase("return_to_menu", &[BattlePhase::Victory, BattlePhase::Defeat])?;
        self.state.phase = BattlePhase::Menu;
        self.log.clear();
        Ok(vec![BattleEvent::ReturnedToMenu])
    }

    /// Feed one raw input code to the hidden-sequence matcher. Works in any phase.
    pub fn feed_input(&mut self, code: &str) -> Vec<BattleEvent> {
        let mut events = Vec::new();
        if self.matcher.push(code) {
            self.state.easter_egg = true;
            self.unlock(&mut events, Achievement::TheseArentTheDroids);
            self.record(&mut events, BattleEvent::EasterEggFound);
            debug!("hidden sequence matched");
        }
        events
    }

    // ── Internal ─────────────────────────────────────────────────────

    fn expect_phase(
        &self,
        operation: &'static str,
        allowed: &[BattlePhase],
    ) -> Result<(), BattleError> {
        if allowed.contains(&self.state.phase) {
            Ok(())
        } else {
            Err(BattleError::WrongPhase {
                operation,
                phase: self.state.phase,
            })
        }
    }

    fn record(&mut self, events: &mut Vec<BattleEvent>, event: BattleEvent) {
        self.log.push(event.message());
        events.push(event);
    }

    fn unlock(&mut self, events: &mut Vec<BattleEvent>, achievement: Achievement) {
        if self.state.achievements.unlock(achievement) {
            self.record(events, BattleEvent::AchievementUnlocked { achievement });
        }
    }

    fn strike_enemy(&mut self, events: &mut Vec<BattleEvent>, action: Action, damage: u32) {
        self.state.enemy_health = self.state.enemy_health.saturating_sub(damage);
        self.state.combo = if self.state.last_action == Some(action) {
            self.state.combo + 1
        } else {
            1
        };
        self.record(
            events,
            BattleEvent::PlayerStruck {
                action,
                damage,
                enemy_health: self.state.enemy_health,
            },
        );
    }

    fn strike_player(
        &mut self,
        events: &mut Vec<BattleEvent>,
        enemy: &Enemy,
        action: Action,
        damage: u32,
    ) {
        self.state.player_health = self.state.player_health.saturating_sub(damage);
        self.record(
            events,
            BattleEvent::EnemyStruck {
                enemy: enemy.name.to_string(),
                action,
                damage,
                player_health: self.state.player_health,
            },
        );
    }

    fn resolve_enemy_defeat(&mut self, events: &mut Vec<BattleEvent>) {
        let index = self.state.enemy_index;
        let enemy = self.current_enemy();
        let awarded = enemy.difficulty * 100;
        self.state.score += awarded;
        self.record(
            events,
            BattleEvent::EnemyDefeated {
                enemy: enemy.name.to_string(),
                score_awarded: awarded,
            },
        );

        if index == 0 {
            self.unlock(events, Achievement::FirstBlood);
        }
        if self.state.player_health == PLAYER_MAX_HEALTH {
            self.unlock(events, Achievement::NoMercy);
        }
        if roster::is_final(index) {
            self.unlock(events, Achievement::SithLord);
        }

        match roster::enemy(index + 1) {
            Some(next) => {
                self.state.enemy_index = index + 1;
                self.state.enemy_health = next.max_health;
                self.state.enemy_force = next.max_force;
                self.state.phase = BattlePhase::Playing;
                self.record(
                    events,
                    BattleEvent::EnemyApproaches {
                        enemy: next.name.to_string(),
                        quote: next.quote.to_string(),
                    },
                );
            }
            None => {
                self.state.phase = BattlePhase::Victory;
                self.unlock(events, Achievement::TheChosenOne);
                if self.state.attacks_used == 0 {
                    self.unlock(events, Achievement::DoOrDoNot);
                }
                self.record(
                    events,
                    BattleEvent::Victory {
                        score: self.state.score,
                    },
                );
            }
        }
    }
}

impl Default for BattleEngine {
    fn default() -> Self {
        Self::new()
    }
}
