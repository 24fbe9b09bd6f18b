//! Basic CLI E2E tests.
//!
//! Each test runs the built `forecast` binary against its own temporary data
//! directory and checks the JSON it prints.

use std::path::Path;
use std::process::Command;

use serde_json::Value;
use tempfile::TempDir;

/// Run a CLI command and return (stdout, stderr, exit code).
fn run_cli(home: &Path, args: &[&str]) -> (String, String, i32) {
    let output = Command::new(env!("CARGO_BIN_EXE_forecast"))
        .args(args)
        .env("FORECAST_HOME", home)
        .env_remove("FORECAST_GEMINI_API_KEY")
        .env_remove("FORECAST_LOG")
        .output()
        .expect("Failed to execute CLI command");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let code = output.status.code().unwrap_or(-1);

    (stdout, stderr, code)
}

fn run_json(home: &Path, args: &[&str]) -> Value {
    let (stdout, stderr, code) = run_cli(home, args);
    assert_eq!(code, 0, "{args:?} failed: {stderr}");
    serde_json::from_str(&stdout).expect("stdout is JSON")
}

const PLANS: &str = r#"[
  {
    "id": "plan-1",
    "date": "2024-05-01",
    "prompt": "Dominate",
    "schedule": [
      {"time": "06:00", "task": "Exercise", "priority": "high"},
      {"time": "09:00", "task": "Deep work", "priority": "critical"}
    ],
    "goals": ["A", "B", "C"],
    "journalPrompt": "What will you conquer?",
    "journalEntry": "",
    "createdAt": "2024-05-01T05:00:00Z"
  }
]"#;

fn import_sample(home: &Path) {
    let file = home.join("plans.json");
    std::fs::write(&file, PLANS).unwrap();
    let out = run_json(home, &["plan", "import", file.to_str().unwrap()]);
    assert_eq!(out["imported"], 1);
}

#[test]
fn test_config_get_set_list() {
    let home = TempDir::new().unwrap();
    let (stdout, _, code) = run_cli(home.path(), &["config", "get", "pomodoro.work_minutes"]);
    assert_eq!(code, 0);
    assert_eq!(stdout.trim(), "25");

    let (_, _, code) = run_cli(home.path(), &["config", "set", "battle.enemy_turn_delay_ms", "0"]);
    assert_eq!(code, 0);
    let (list, _, code) = run_cli(home.path(), &["config", "list"]);
    assert_eq!(code, 0);
    assert!(list.lines().any(|l| l == "battle.enemy_turn_delay_ms = 0"));
    assert!(list.lines().any(|l| l == "pomodoro.work_minutes = 25"));
    assert!(home.path().join("config.toml").exists());
}

#[test]
fn test_unknown_config_key_fails() {
    let home = TempDir::new().unwrap();
    let (_, stderr, code) = run_cli(home.path(), &["config", "get", "nope.nothing"]);
    assert_eq!(code, 1);
    assert!(stderr.starts_with("error:"));
}

#[test]
fn test_plan_import_show_and_text_export() {
    let home = TempDir::new().unwrap();
    import_sample(home.path());

    let plans = run_json(home.path(), &["plan", "list"]);
    assert_eq!(plans.as_array().unwrap().len(), 1);

    let (_, _, code) = run_cli(home.path(), &["plan", "journal", "plan-1", "Fear itself."]);
    assert_eq!(code, 0);

    let (text, _, code) = run_cli(home.path(), &["plan", "show", "plan-1", "--text"]);
    assert_eq!(code, 0);
    assert!(text.starts_with("FORCE FORECAST - DAILY COMMAND BRIEF"));
    assert!(text.contains("Response: Fear itself."));

    let out = run_json(
        home.path(),
        &["plan", "export", "--text", "--out", home.path().to_str().unwrap()],
    );
    assert!(out["written"].as_str().unwrap().ends_with("force-forecast-2024-05-01.txt"));
}

#[test]
fn test_calendar_from_plan_is_idempotent() {
    let home = TempDir::new().unwrap();
    import_sample(home.path());

    let first = run_json(home.path(), &["calendar", "from-plan", "--date", "2024-05-01"]);
    assert_eq!(first["added"], 2);
    let second = run_json(home.path(), &["calendar", "from-plan", "--date", "2024-05-01"]);
    assert_eq!(second["added"], 0);

    let events = run_json(home.path(), &["calendar", "list", "--date", "2024-05-01"]);
    assert_eq!(events[0]["id"], "plan-1-0");
    assert_eq!(events[1]["isGenerated"], true);

    let month = run_json(home.path(), &["calendar", "month", "--year", "2024", "--month", "5"]);
    // May 2024 starts on a Wednesday.
    assert!(month["cells"][2].is_null());
    assert_eq!(month["cells"][3]["events"], 2);
    assert_eq!(month["cells"][3]["has_plan"], true);
}

#[test]
fn test_calendar_add_rejects_bad_time() {
    let home = TempDir::new().unwrap();
    let (_, stderr, code) = run_cli(home.path(), &["calendar", "add", "Sync", "--time", "9am"]);
    assert_eq!(code, 1);
    assert!(stderr.contains("time"));
}

#[test]
fn test_battle_flow() {
    let home = TempDir::new().unwrap();
    let start = run_json(home.path(), &["battle", "start"]);
    assert_eq!(start["state"]["phase"], "playing");
    assert_eq!(start["enemy"], "Padawan Trainee");

    let act = run_json(home.path(), &["battle", "act", "defend", "--no-wait"]);
    assert_eq!(act["awaiting_enemy"], true);

    // Pending enemy turn blocks further actions.
    let (_, stderr, code) = run_cli(home.path(), &["battle", "act", "attack"]);
    assert_eq!(code, 1);
    assert!(stderr.contains("Resolving"));

    let resolved = run_json(home.path(), &["battle", "resolve"]);
    assert_eq!(resolved["awaiting_enemy"], false);
    assert!(resolved["log"].as_array().unwrap().len() <= 5);
}

#[test]
fn test_battle_menu_requires_finished_run() {
    let home = TempDir::new().unwrap();
    let (_, _, code) = run_cli(home.path(), &["battle", "menu"]);
    assert_eq!(code, 1);
}

#[test]
fn test_hidden_sequence() {
    let home = TempDir::new().unwrap();
    let out = run_json(
        home.path(),
        &[
            "battle", "input", "ArrowUp", "ArrowUp", "ArrowDown", "ArrowDown", "ArrowLeft",
            "ArrowRight", "ArrowLeft", "ArrowRight", "KeyB", "KeyA",
        ],
    );
    assert_eq!(out["state"]["easter_egg"], true);

    let list = run_json(home.path(), &["battle", "achievements"]);
    let list = list.as_array().unwrap();
    assert_eq!(list.len(), 8);
    let droids = list
        .iter()
        .find(|a| a["id"] == "these_arent_the_droids")
        .unwrap();
    assert_eq!(droids["unlocked"], true);
    assert_eq!(droids["title"], "These Aren't The Droids");
    assert!(list.iter().filter(|a| a["unlocked"] == true).count() == 1);
}

#[test]
fn test_battle_log_follows_config() {
    let home = TempDir::new().unwrap();
    run_json(home.path(), &["battle", "start"]);
    run_json(home.path(), &["battle", "act", "defend", "--no-wait"]);
    let resolved = run_json(home.path(), &["battle", "resolve"]);
    assert!(resolved["log"].as_array().unwrap().len() > 1);

    let (_, _, code) = run_cli(home.path(), &["config", "set", "battle.log_capacity", "1"]);
    assert_eq!(code, 0);
    let status = run_json(home.path(), &["battle", "status"]);
    let log = status["log"].as_array().unwrap();
    assert_eq!(log.len(), 1);
    assert_eq!(log[0], resolved["log"].as_array().unwrap().last().unwrap().clone());
}

#[test]
fn test_timer_start_status_set() {
    let home = TempDir::new().unwrap();
    let started = run_json(home.path(), &["timer", "start"]);
    assert_eq!(started[0]["type"], "TimerStarted");

    let status = run_json(home.path(), &["timer", "status"]);
    let snapshot = status.as_array().unwrap().last().unwrap().clone();
    assert_eq!(snapshot["running"], true);
    assert_eq!(snapshot["mode"], "work");

    let (_, _, code) = run_cli(home.path(), &["timer", "set", "work", "0"]);
    assert_eq!(code, 1);
    let set = run_json(home.path(), &["timer", "set", "short-break", "7"]);
    assert_eq!(set[0]["type"], "SettingChanged");
}

#[test]
fn test_music_wraps() {
    let home = TempDir::new().unwrap();
    let tracks = run_json(home.path(), &["music", "list", "--category", "focus"]);
    assert_eq!(tracks.as_array().unwrap().len(), 2);

    run_json(home.path(), &["music", "next"]);
    run_json(home.path(), &["music", "next"]);
    let third = run_json(home.path(), &["music", "next"]);
    assert_eq!(third["current"]["title"], "Cantina Band");

    let muted = run_json(home.path(), &["music", "mute"]);
    assert_eq!(muted["effective_volume"], 0.0);
}

#[test]
fn test_music_toggle() {
    let home = TempDir::new().unwrap();
    let idle = run_json(home.path(), &["music", "toggle"]);
    assert_eq!(idle["playing"], false);

    run_json(home.path(), &["music", "play", "1"]);
    let paused = run_json(home.path(), &["music", "toggle"]);
    assert_eq!(paused["playing"], false);
    assert_eq!(paused["current"]["id"], "1");
    let resumed = run_json(home.path(), &["music", "toggle"]);
    assert_eq!(resumed["playing"], true);
}

#[test]
fn test_offline_chat() {
    let home = TempDir::new().unwrap();
    let greeting = run_json(home.path(), &["chat"]);
    assert_eq!(greeting["quick_actions"].as_array().unwrap().len(), 4);

    let reply = run_json(home.path(), &["chat", "--offline", "I", "have", "a", "meeting"]);
    assert_eq!(reply["advisor"], "keyword");
    assert!(reply["content"].as_str().unwrap().starts_with("Meetings are battlefields"));
}
