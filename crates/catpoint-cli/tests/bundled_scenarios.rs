//! Integration test: every scenario under `scenarios/` parses and runs.

use std::path::PathBuf;

use catpoint_cli::scenario::Scenario;
use catpoint_core::AlarmStatus;
use catpoint_security::SecurityConfig;

/// Find the repository root.
fn repo_root() -> PathBuf {
    let mut dir = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    dir.pop(); // crates/
    dir.pop(); // repo root
    dir
}

fn scenario_files() -> Vec<PathBuf> {
    let mut files: Vec<PathBuf> = std::fs::read_dir(repo_root().join("scenarios"))
        .expect("scenarios/ directory")
        .flatten()
        .map(|e| e.path())
        .filter(|p| p.extension().is_some_and(|x| x == "yaml"))
        .filter(|p| p.file_name().is_some_and(|n| n != "catpoint.yaml"))
        .collect();
    files.sort();
    files
}

fn config() -> SecurityConfig {
    SecurityConfig::load(&repo_root().join("scenarios").join("catpoint.yaml")).unwrap()
}

#[test]
fn test_all_bundled_scenarios_run() {
    let files = scenario_files();
    assert!(!files.is_empty());
    for path in files {
        let scenario = Scenario::load(&path).unwrap();
        let report = scenario
            .run(config(), Some(0))
            .unwrap_or_else(|e| panic!("{}: {e:#}", path.display()));
        assert_eq!(report.steps.len(), scenario.steps.len());
    }
}

#[test]
fn test_intruder_scenario_alarm_sticks_until_disarm() {
    let scenario = Scenario::load(&repo_root().join("scenarios/intruder.yaml")).unwrap();
    let report = scenario.run(config(), None).unwrap();
    let alarms: Vec<AlarmStatus> = report.steps.iter().map(|s| s.alarm).collect();
    assert_eq!(
        alarms,
        vec![
            AlarmStatus::NoAlarm,
            AlarmStatus::PendingAlarm,
            AlarmStatus::Alarm,
            AlarmStatus::Alarm,
            AlarmStatus::Alarm,
            AlarmStatus::NoAlarm,
        ]
    );
}

#[test]
fn test_cat_at_home_scenario() {
    let scenario = Scenario::load(&repo_root().join("scenarios/cat_at_home.yaml")).unwrap();
    let report = scenario.run(config(), Some(5)).unwrap();
    assert_eq!(report.steps[0].alarm, AlarmStatus::NoAlarm);
    assert_eq!(report.steps[1].alarm, AlarmStatus::Alarm);
    assert_eq!(report.steps[2].alarm, AlarmStatus::NoAlarm);
}
