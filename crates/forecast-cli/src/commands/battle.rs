use std::time::Duration;

use clap::Subcommand;
use forecast_core::battle::{Achievement, Action, BattleEngine, BattleEvent, BattleState, RandDice};
use forecast_core::storage::{load_snapshot, save_snapshot};
use forecast_core::{Config, Database};
use serde::Serialize;

use super::{print_json, CliResult};

const ENGINE_KEY: &str = "battle_engine";

#[derive(Subcommand)]
pub enum BattleAction {
    /// Start a new run against the first enemy
    Start,
    /// Perform a player action (attack, force, defend)
    Act {
        action: Action,
        /// Leave the enemy turn pending instead of waiting for it
        #[arg(long)]
        no_wait: bool,
    },
    /// Run a pending enemy turn
    Resolve,
    /// Print the battle state as JSON
    Status,
    /// List every achievement and whether it is unlocked
    Achievements,
    /// Return to the menu after victory or defeat
    Menu,
    /// Feed raw input codes (e.g. ArrowUp KeyB) to the hidden-sequence matcher
    Input {
        #[arg(required = true)]
        codes: Vec<String>,
    },
}

#[derive(Serialize)]
struct Report<'a> {
    events: Vec<BattleEvent>,
    state: &'a BattleState,
    enemy: &'static str,
    awaiting_enemy: bool,
    log: Vec<&'a str>,
}

#[derive(Serialize)]
struct AchievementView {
    id: Achievement,
    title: &'static str,
    description: &'static str,
    unlocked: bool,
}

/// The saved engine, or a fresh one. The configured log capacity applies either way.
fn load_engine(db: &Database, config: &Config) -> Result<BattleEngine, Box<dyn std::error::Error>> {
    let mut engine: BattleEngine = load_snapshot(db, ENGINE_KEY)?.unwrap_or_default();
    engine.set_log_capacity(config.battle.log_capacity);
    Ok(engine)
}

fn achievements(engine: &BattleEngine) -> Vec<AchievementView> {
    let unlocked = &engine.state().achievements;
    Achievement::ALL
        .iter()
        .map(|&a| AchievementView {
            id: a,
            title: a.title(),
            description: a.description(),
            unlocked: unlocked.contains(a),
        })
        .collect()
}

fn report(engine: &BattleEngine, events: Vec<BattleEvent>) -> CliResult {
    print_json(&Report {
        events,
        state: engine.state(),
        enemy: engine.current_enemy().name,
        awaiting_enemy: engine.awaiting_enemy(),
        log: engine.log().lines().collect(),
    })
}

pub async fn run(action: BattleAction) -> CliResult {
    let db = Database::open()?;
    let config = Config::load_or_default();
    let mut engine = load_engine(&db, &config)?;
    let mut dice = RandDice::from_entropy();

    let events = match action {
        BattleAction::Achievements => return print_json(&achievements(&engine)),
        BattleAction::Start => engine.start_run()?,
        BattleAction::Act { action, no_wait } => {
            let mut events = engine.perform_action(action, &mut dice)?;
            if engine.awaiting_enemy() && !no_wait {
                // Persist first so an interrupted wait can be finished with `resolve`.
                save_snapshot(&db, ENGINE_KEY, &engine)?;
                tokio::time::sleep(Duration::from_millis(config.battle.enemy_turn_delay_ms)).await;
                events.extend(engine.enemy_turn(&mut dice)?);
            }
            events
        }
        BattleAction::Resolve => engine.enemy_turn(&mut dice)?,
        BattleAction::Status => Vec::new(),
        BattleAction::Menu => engine.return_to_menu()?,
        BattleAction::Input { codes } => codes
            .iter()
            .flat_map(|code| engine.feed_input(code))
            .collect(),
    };

    save_snapshot(&db, ENGINE_KEY, &engine)?;
    report(&engine, events)
}
