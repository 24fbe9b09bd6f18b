//! Lightsaber combat simulator: a fixed roster fought in order with three
//! player actions and a randomized enemy reply.

mod achievement;
mod dice;
mod engine;
mod log;
mod roster;
mod sequence;

pub use achievement::{Achievement, AchievementSet};
pub use dice::{Dice, RandDice};
pub use engine::{
    Action, BattleEngine, BattleEvent, BattlePhase, BattleState, FORCE_COST, PLAYER_MAX_FORCE,
    PLAYER_MAX_HEALTH,
};
pub use log::{BattleLog, DEFAULT_LOG_CAPACITY};
pub use roster::{enemy, Enemy, ROSTER};
pub use sequence::{SequenceMatcher, SECRET_SEQUENCE};
