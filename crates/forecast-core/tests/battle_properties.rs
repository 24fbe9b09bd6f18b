//! Property tests for the battle state machine.
//!
//! Random action scripts are played against seeded dice; health and force
//! must stay within bounds and phases must only change along legal edges.

use forecast_core::battle::{
    enemy, Action, BattleEngine, BattlePhase, RandDice, PLAYER_MAX_FORCE, PLAYER_MAX_HEALTH,
};
use proptest::prelude::*;

fn arb_action() -> impl Strategy<Value = Action> {
    prop_oneof![Just(Action::Attack), Just(Action::Force), Just(Action::Defend)]
}

fn assert_bounds(engine: &BattleEngine) -> Result<(), TestCaseError> {
    let state = engine.state();
    let foe = enemy(state.enemy_index).expect("enemy index in roster");
    prop_assert!(state.player_health <= PLAYER_MAX_HEALTH);
    prop_assert!(state.player_force <= PLAYER_MAX_FORCE);
    prop_assert!(state.enemy_health <= foe.max_health);
    prop_assert!(state.enemy_force <= foe.max_force);
    Ok(())
}

fn legal(from: BattlePhase, to: BattlePhase) -> bool {
    use BattlePhase::*;
    from == to
        || matches!(
            (from, to),
            (Menu, Playing)
                | (Playing, Resolving)
                | (Resolving, Playing)
                | (Playing, Victory)
                | (Resolving, Defeat)
                | (Victory, Menu)
                | (Defeat, Menu)
        )
}

proptest! {
    #[test]
    fn prop_state_stays_in_bounds(
        seed in any::<u64>(),
        script in prop::collection::vec(arb_action(), 1..200),
    ) {
        let mut dice = RandDice::seeded(seed);
        let mut engine = BattleEngine::new();
        engine.start_run().unwrap();

        for action in script {
            let before = engine.phase();
            match before {
                BattlePhase::Playing => {
                    engine.perform_action(action, &mut dice).unwrap();
                }
                BattlePhase::Resolving => {
                    engine.enemy_turn(&mut dice).unwrap();
                }
                BattlePhase::Victory | BattlePhase::Defeat => {
                    engine.return_to_menu().unwrap();
                }
                BattlePhase::Menu => {
                    engine.start_run().unwrap();
                }
            }
            prop_assert!(legal(before, engine.phase()), "{:?} -> {:?}", before, engine.phase());
            assert_bounds(&engine)?;
        }
    }

    #[test]
    fn prop_wrong_phase_never_mutates(
        seed in any::<u64>(),
        action in arb_action(),
    ) {
        let mut dice = RandDice::seeded(seed);
        let mut engine = BattleEngine::new();
        let before = serde_json::to_value(&engine).unwrap();

        prop_assert!(engine.perform_action(action, &mut dice).is_err());
        prop_assert!(engine.enemy_turn(&mut dice).is_err());
        prop_assert!(engine.return_to_menu().is_err());
        prop_assert_eq!(serde_json::to_value(&engine).unwrap(), before);
    }

    #[test]
    fn prop_achievements_never_shrink(
        seed in any::<u64>(),
        script in prop::collection::vec(arb_action(), 1..150),
    ) {
        let mut dice = RandDice::seeded(seed);
        let mut engine = BattleEngine::new();
        engine.start_run().unwrap();
        let mut seen = 0;

        for action in script {
            match engine.phase() {
                BattlePhase::Playing => { engine.perform_action(action, &mut dice).unwrap(); }
                BattlePhase::Resolving => { engine.enemy_turn(&mut dice).unwrap(); }
                BattlePhase::Victory | BattlePhase::Defeat => { engine.return_to_menu().unwrap(); }
                BattlePhase::Menu => { engine.start_run().unwrap(); }
            }
            let now = engine.state().achievements.len();
            prop_assert!(now >= seen);
            seen = now;
        }
    }

    #[test]
    fn prop_log_never_exceeds_capacity(
        capacity in 1usize..10,
        seed in any::<u64>(),
        script in prop::collection::vec(arb_action(), 1..60),
    ) {
        let mut dice = RandDice::seeded(seed);
        let mut engine = BattleEngine::with_log_capacity(capacity);
        engine.start_run().unwrap();
        for action in script {
            match engine.phase() {
                BattlePhase::Playing => { engine.perform_action(action, &mut dice).unwrap(); }
                BattlePhase::Resolving => { engine.enemy_turn(&mut dice).unwrap(); }
                _ => break,
            }
            prop_assert!(engine.log().len() <= capacity);
        }
    }
}
