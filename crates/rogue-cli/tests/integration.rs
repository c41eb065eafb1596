#![allow(deprecated)]
use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn rogue(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("rogue").unwrap();
    cmd.current_dir(dir.path())
        .env("ROGUE_ROOT", dir.path())
        .env("ROGUE_PACING_MS", "0")
        .env_remove("RUST_LOG");
    cmd
}

fn init_game(dir: &TempDir) {
    rogue(dir).arg("init").assert().success();
}

fn json_of(cmd: &mut Command) -> serde_json::Value {
    let out = cmd.assert().success().get_output().stdout.clone();
    serde_json::from_slice(&out).unwrap()
}

fn first_option(dir: &TempDir) -> Option<String> {
    let q = json_of(rogue(dir).args(["--json", "question"]));
    q["question"]["options"][0]["id"].as_str().map(str::to_string)
}

// ---------------------------------------------------------------------------
// rogue init
// ---------------------------------------------------------------------------

#[test]
fn init_creates_rogue_dir() {
    let dir = TempDir::new().unwrap();
    rogue(&dir)
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("created: .rogue/config.yaml"));

    assert!(dir.path().join(".rogue/config.yaml").exists());
    assert!(dir.path().join(".rogue/state.json").exists());
}

#[test]
fn init_is_idempotent() {
    let dir = TempDir::new().unwrap();
    init_game(&dir);
    rogue(&dir)
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("exists:  .rogue/state.json"));
}

#[test]
fn commands_require_init() {
    let dir = TempDir::new().unwrap();
    rogue(&dir)
        .arg("status")
        .assert()
        .failure()
        .stderr(predicate::str::contains("not initialized"));
}

// ---------------------------------------------------------------------------
// rogue status / start / question
// ---------------------------------------------------------------------------

#[test]
fn fresh_game_is_at_briefing() {
    let dir = TempDir::new().unwrap();
    init_game(&dir);
    let status = json_of(rogue(&dir).args(["--json", "status"]));
    assert_eq!(status["phase"], "intro");
    assert_eq!(status["progress"], 0);
    assert_eq!(status["total"], 20);
}

#[test]
fn start_enters_infiltration() {
    let dir = TempDir::new().unwrap();
    init_game(&dir);
    rogue(&dir)
        .arg("start")
        .assert()
        .success()
        .stdout(predicate::str::contains("Initial System Access"))
        .stdout(predicate::str::contains("inf_1_1a"));

    let status = json_of(rogue(&dir).args(["--json", "status"]));
    assert_eq!(status["phase"], "infiltration");
    assert_eq!(status["scenario_id"], 1);
}

#[test]
fn skip_intro_enters_infiltration() {
    let dir = TempDir::new().unwrap();
    init_game(&dir);
    rogue(&dir)
        .arg("skip-intro")
        .assert()
        .success()
        .stdout(predicate::str::contains("Briefing skipped"));
    rogue(&dir)
        .arg("skip-intro")
        .assert()
        .success()
        .stdout(predicate::str::contains("already complete"));
}

#[test]
fn question_json_has_canonical_shape() {
    let dir = TempDir::new().unwrap();
    init_game(&dir);
    rogue(&dir).arg("start").assert().success();
    let q = json_of(rogue(&dir).args(["--json", "question"]));
    assert_eq!(q["question"]["id"], "inf_1_1");
    assert_eq!(q["question"]["type"], "technical");
    assert_eq!(q["question_count"], 2);
    assert!(q["question"]["options"].as_array().unwrap().len() >= 2);
}

// ---------------------------------------------------------------------------
// rogue choose
// ---------------------------------------------------------------------------

#[test]
fn choose_records_and_advances() {
    let dir = TempDir::new().unwrap();
    init_game(&dir);
    rogue(&dir).arg("start").assert().success();

    rogue(&dir)
        .args(["choose", "inf_1_1a", "--elapsed-ms", "1000"])
        .assert()
        .success()
        .stdout(predicate::str::contains("+70 points"));

    let q = json_of(rogue(&dir).args(["--json", "question"]));
    assert_eq!(q["question"]["id"], "inf_1_2");

    let out = json_of(rogue(&dir).args(["--json", "choose", "inf_1_2b", "--elapsed-ms", "45000"]));
    assert_eq!(out["points"], 50);
    assert_eq!(out["completed_scenarios"], serde_json::json!([1]));
    assert_eq!(out["progress"], 5);
    assert_eq!(out["total_points"], 120);
}

fn backdate_question(dir: &TempDir, shown_at: &str) {
    let path = dir.path().join(".rogue/state.json");
    let mut state: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
    assert!(state["questionShownAt"].is_string());
    state["questionShownAt"] = serde_json::json!(shown_at);
    std::fs::write(&path, serde_json::to_string(&state).unwrap()).unwrap();
}

#[test]
fn slow_answer_earns_base_points_only() {
    let dir = TempDir::new().unwrap();
    init_game(&dir);
    rogue(&dir).arg("start").assert().success();
    backdate_question(&dir, "2020-01-01T00:00:00Z");

    rogue(&dir)
        .args(["choose", "inf_1_1a"])
        .assert()
        .success()
        .stdout(predicate::str::contains("+50 points"));

    let out = json_of(rogue(&dir).args(["--json", "choose", "inf_1_2b"]));
    assert_eq!(out["points"], 70);
    assert_eq!(out["total_points"], 120);
}

#[test]
fn elapsed_override_beats_measured_time() {
    let dir = TempDir::new().unwrap();
    init_game(&dir);
    rogue(&dir).arg("start").assert().success();
    backdate_question(&dir, "2020-01-01T00:00:00Z");

    let out = json_of(rogue(&dir).args(["--json", "choose", "inf_1_1a", "--elapsed-ms", "10"]));
    assert_eq!(out["points"], 70);
}

#[test]
fn choose_unknown_option_fails() {
    let dir = TempDir::new().unwrap();
    init_game(&dir);
    rogue(&dir).arg("start").assert().success();
    rogue(&dir)
        .args(["choose", "zzz"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("error: unknown option 'zzz'"));

    let status = json_of(rogue(&dir).args(["--json", "status"]));
    assert_eq!(status["points"], 0);
}

#[test]
fn choose_before_start_fails() {
    let dir = TempDir::new().unwrap();
    init_game(&dir);
    rogue(&dir)
        .args(["choose", "inf_1_1a"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("no question is pending"));
}

#[test]
fn full_playthrough_produces_results() {
    let dir = TempDir::new().unwrap();
    init_game(&dir);
    rogue(&dir).arg("start").assert().success();

    let mut answered = 0;
    while let Some(option) = first_option(&dir) {
        rogue(&dir).args(["choose", &option]).assert().success();
        answered += 1;
        assert!(answered <= 40, "playthrough did not terminate");
    }

    let status = json_of(rogue(&dir).args(["--json", "status"]));
    assert_eq!(status["phase"], "results");
    assert_eq!(status["progress"], 100);
    assert_eq!(status["badges"].as_array().unwrap().len(), 5);

    let report = json_of(rogue(&dir).args(["--json", "results"]));
    assert_eq!(report["choices_made"], answered);
    assert_eq!(report["profile"].as_array().unwrap().len(), 10);
    assert!(report["archetype_title"].as_str().unwrap().starts_with("The "));

    rogue(&dir)
        .arg("results")
        .assert()
        .success()
        .stdout(predicate::str::contains("ANALYSIS REPORT"))
        .stdout(predicate::str::contains("Cognitive style:"));
}

// ---------------------------------------------------------------------------
// rogue scenarios / reset
// ---------------------------------------------------------------------------

#[test]
fn scenarios_filter_by_phase() {
    let dir = TempDir::new().unwrap();
    init_game(&dir);
    let list = json_of(rogue(&dir).args(["--json", "scenarios", "--phase", "systems"]));
    let ids: Vec<u64> = list
        .as_array()
        .unwrap()
        .iter()
        .map(|s| s["id"].as_u64().unwrap())
        .collect();
    assert_eq!(ids, vec![5, 6, 7, 8]);

    rogue(&dir)
        .args(["scenarios", "--phase", "phase3"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Citizen Data Dilemma"));
}

#[test]
fn scenarios_reject_unknown_phase() {
    let dir = TempDir::new().unwrap();
    init_game(&dir);
    rogue(&dir)
        .args(["scenarios", "--phase", "bogus"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid phase: bogus"));
}

#[test]
fn reset_returns_to_briefing() {
    let dir = TempDir::new().unwrap();
    init_game(&dir);
    rogue(&dir).arg("start").assert().success();
    rogue(&dir).args(["choose", "inf_1_1a"]).assert().success();
    rogue(&dir).arg("reset").assert().success();

    let status = json_of(rogue(&dir).args(["--json", "status"]));
    assert_eq!(status["phase"], "intro");
    assert_eq!(status["points"], 0);
    assert_eq!(status["completed"], 0);
}

// ---------------------------------------------------------------------------
// Persistence
// ---------------------------------------------------------------------------

#[test]
fn corrupt_state_starts_fresh() {
    let dir = TempDir::new().unwrap();
    init_game(&dir);
    std::fs::write(dir.path().join(".rogue/state.json"), "{{ garbage").unwrap();

    rogue(&dir)
        .args(["--json", "status"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"phase\": \"intro\""))
        .stderr(predicate::str::contains("discarding unreadable saved state"));
}

#[test]
fn unreachable_remote_falls_back_to_builtin_content() {
    let dir = TempDir::new().unwrap();
    init_game(&dir);
    std::fs::write(
        dir.path().join(".rogue/config.yaml"),
        "provider:\n  remote_url: http://127.0.0.1:9\n  timeout_secs: 1\n",
    )
    .unwrap();

    rogue(&dir).arg("start").assert().success();
    let q = json_of(rogue(&dir).args(["--json", "question"]));
    assert_eq!(q["question"]["id"], "inf_1_1");
}

// ---------------------------------------------------------------------------
// rogue config
// ---------------------------------------------------------------------------

#[test]
fn default_config_is_valid() {
    let dir = TempDir::new().unwrap();
    init_game(&dir);
    rogue(&dir)
        .args(["config", "validate"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Config is valid"));
}

#[test]
fn invalid_config_fails_validation() {
    let dir = TempDir::new().unwrap();
    init_game(&dir);
    std::fs::write(
        dir.path().join(".rogue/config.yaml"),
        "results:\n  bar_max: 0\n",
    )
    .unwrap();
    rogue(&dir)
        .args(["config", "validate"])
        .assert()
        .failure()
        .stdout(predicate::str::contains("[error] results.bar_max"));
}

#[test]
fn config_show_prints_defaults() {
    let dir = TempDir::new().unwrap();
    init_game(&dir);
    let cfg = json_of(rogue(&dir).args(["--json", "config", "show"]));
    assert_eq!(cfg["scoring"]["base_points"], 50);
    assert_eq!(cfg["pacing"]["analysis_delay_ms"], 800);
}
