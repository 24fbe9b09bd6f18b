//! Integration tests for the pomodoro cycle and its persistence.

use forecast_core::storage::{load_snapshot, save_snapshot};
use forecast_core::{Database, Event, PomodoroMode, PomodoroSetting, PomodoroSettings, PomodoroTimer};

const TIMER_KEY: &str = "timer";

fn one_minute_settings() -> PomodoroSettings {
    PomodoroSettings {
        work_minutes: 1,
        short_break_minutes: 1,
        long_break_minutes: 1,
        sessions_before_long_break: 4,
    }
}

#[test]
fn test_full_cycle_driven_by_wall_clock() {
    let mut timer = PomodoroTimer::new(one_minute_settings());
    let mut clock_ms = 1_000_000u64;
    let mut modes = Vec::new();

    for _ in 0..8 {
        timer.start_at(clock_ms);
        clock_ms += 60_000;
        let event = timer.catch_up(clock_ms);
        assert!(matches!(event, Some(Event::IntervalCompleted { .. })));
        modes.push(timer.mode());
    }

    assert_eq!(
        modes,
        vec![
            PomodoroMode::ShortBreak,
            PomodoroMode::Work,
            PomodoroMode::ShortBreak,
            PomodoroMode::Work,
            PomodoroMode::ShortBreak,
            PomodoroMode::Work,
            PomodoroMode::LongBreak,
            PomodoroMode::Work,
        ]
    );
    assert_eq!(timer.completed_work_sessions(), 4);
}

#[test]
fn test_timer_survives_persistence_between_invocations() {
    let db = Database::open_memory().unwrap();

    let mut timer = PomodoroTimer::default();
    timer.start_at(0);
    save_snapshot(&db, TIMER_KEY, &timer).unwrap();

    let mut restored: PomodoroTimer = load_snapshot(&db, TIMER_KEY).unwrap().unwrap();
    assert!(restored.is_running());
    restored.catch_up(90_500);
    assert_eq!(restored.seconds_remaining(), 25 * 60 - 90);
}

#[test]
fn test_setting_change_applies_at_next_interval() {
    let mut timer = PomodoroTimer::new(one_minute_settings());
    timer.start_at(0);
    timer.catch_up(10_000);
    timer
        .apply_setting(PomodoroSetting::ShortBreakMinutes(3))
        .unwrap();
    assert_eq!(timer.seconds_remaining(), 50);

    timer.catch_up(60_000);
    assert_eq!(timer.mode(), PomodoroMode::ShortBreak);
    assert_eq!(timer.seconds_remaining(), 180);
}
