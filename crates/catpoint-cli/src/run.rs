//! # Run Subcommand
//!
//! Executes a scenario file and prints each step, the alarm transitions
//! and the final state.

use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use catpoint_core::AlarmStatus;
use catpoint_security::SecurityConfig;
use clap::Args;

use crate::scenario::{Scenario, ScenarioReport};

/// Arguments for the `catpoint run` subcommand.
#[derive(Args, Debug)]
pub struct RunArgs {
    /// Scenario YAML file.
    pub scenario: PathBuf,

    /// Seed for images without a forced classifier answer.
    #[arg(long)]
    pub seed: Option<u64>,

    /// Emit the report as JSON instead of text.
    #[arg(long)]
    pub json: bool,

    /// Exit with status 2 if the run ends in ALARM.
    #[arg(long)]
    pub fail_on_alarm: bool,
}

/// Execute the run subcommand.
pub fn run_scenario(args: &RunArgs, config_path: Option<&Path>) -> Result<u8> {
    let config = match config_path {
        Some(path) => SecurityConfig::load(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => SecurityConfig::default(),
    };
    tracing::debug!(
        confidence_threshold = config.confidence_threshold,
        "security config loaded"
    );

    let scenario = Scenario::load(&args.scenario)?;
    tracing::info!(
        scenario = %args.scenario.display(),
        steps = scenario.steps.len(),
        sensors = scenario.sensors.len(),
        "running scenario"
    );
    let report = scenario.run(config, args.seed)?;

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    if args.json {
        serde_json::to_writer_pretty(&mut out, &report).context("writing json report")?;
        writeln!(out)?;
    } else {
        write_text_report(&mut out, &report)?;
    }

    if args.fail_on_alarm && report.alarm == AlarmStatus::Alarm {
        return Ok(2);
    }
    Ok(0)
}

/// Render a report as human-readable text.
pub fn write_text_report(out: &mut impl Write, report: &ScenarioReport) -> Result<()> {
    for step in &report.steps {
        writeln!(
            out,
            "{:>3}. {:<32} alarm={:<13} arming={}",
            step.index, step.step, step.alarm, step.arming
        )?;
    }

    writeln!(out)?;
    if report.transitions.is_empty() {
        writeln!(out, "no alarm transitions")?;
    } else {
        writeln!(out, "alarm transitions:")?;
        for record in &report.transitions {
            writeln!(out, "  {record}")?;
        }
    }

    writeln!(out)?;
    writeln!(
        out,
        "final: {} ({}), {} ({})",
        report.alarm,
        report.alarm.description(),
        report.arming,
        report.arming.description()
    )?;
    for sensor in &report.sensors {
        let state = if sensor.is_active() { "active" } else { "inactive" };
        writeln!(out, "  {sensor}: {state}")?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scenario_file(yaml: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(yaml.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_text_report() {
        let scenario = Scenario::from_yaml_str(
            "sensors:\n  - { name: door, sensor_type: DOOR }\nsteps:\n  - arm: ARMED_AWAY\n  - activate: door\n",
        )
        .unwrap();
        let report = scenario.run(SecurityConfig::default(), None).unwrap();
        let mut buf = Vec::new();
        write_text_report(&mut buf, &report).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert!(text.contains("activate door"));
        assert!(text.contains("NO_ALARM -> PENDING_ALARM (sensor door (DOOR) activated)"));
        assert!(text.contains("final: PENDING_ALARM (I'm in Danger...), ARMED_AWAY (Armed - Away)"));
        assert!(text.contains("door (DOOR): active"));
    }

    #[test]
    fn test_fail_on_alarm_exit_code() {
        let file = scenario_file("arming: ARMED_HOME\nsteps:\n  - image: { cat: true }\n");
        let args = RunArgs {
            scenario: file.path().to_path_buf(),
            seed: None,
            json: true,
            fail_on_alarm: true,
        };
        assert_eq!(run_scenario(&args, None).unwrap(), 2);
    }

    #[test]
    fn test_quiet_run_exit_code() {
        let file = scenario_file("steps:\n  - arm: DISARMED\n");
        let args = RunArgs {
            scenario: file.path().to_path_buf(),
            seed: None,
            json: false,
            fail_on_alarm: true,
        };
        assert_eq!(run_scenario(&args, None).unwrap(), 0);
    }

    #[test]
    fn test_bad_config_is_reported() {
        let scenario = scenario_file("steps: []\n");
        let config = scenario_file("confidence_threshold: -4\n");
        let args = RunArgs {
            scenario: scenario.path().to_path_buf(),
            seed: None,
            json: false,
            fail_on_alarm: false,
        };
        let err = run_scenario(&args, Some(config.path())).unwrap_err();
        assert!(format!("{err:#}").contains("confidence_threshold must be within 0..=100"));
    }

    #[test]
    fn test_missing_scenario_is_reported() {
        let args = RunArgs {
            scenario: PathBuf::from("/nonexistent/scenario.yaml"),
            seed: None,
            json: false,
            fail_on_alarm: false,
        };
        assert!(run_scenario(&args, None).is_err());
    }
}
