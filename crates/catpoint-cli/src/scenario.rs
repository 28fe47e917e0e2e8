//! # Scenarios
//!
//! A scenario seeds the repository and then replays a list of steps
//! against a [`SecurityService`].
//!
//! ```yaml
//! arming: DISARMED
//! sensors:
//!   - { name: front door, sensor_type: DOOR }
//!   - { name: hallway, sensor_type: MOTION }
//! steps:
//!   - arm: ARMED_HOME
//!   - activate: front door
//!   - image: { cat: true }
//!   - image: {}            # classifier decides at random
//!   - deactivate: front door
//!   - add_sensor: { name: attic, sensor_type: WINDOW }
//!   - remove_sensor: hallway
//! ```
//!
//! Images with no `cat` answer are resolved up front with a
//! [`FakeImageClassifier`], so a seed fully determines the run.

use std::path::Path;
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use catpoint_core::{AlarmStatus, ArmingStatus, Sensor};
use catpoint_image::{FakeImageClassifier, Image, ImageClassifier, ScriptedImageClassifier};
use catpoint_security::{
    AlarmTransitionRecord, InMemorySecurityRepository, SecurityConfig, SecurityService,
    StatusListener,
};
use serde::{Deserialize, Serialize};

const DEFAULT_IMAGE_SIZE: u32 = 100;

/// A scripted run.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Scenario {
    /// Arming status before the first step.
    #[serde(default)]
    pub arming: ArmingStatus,
    /// Alarm status before the first step.
    #[serde(default)]
    pub alarm: AlarmStatus,
    /// Sensors registered before the first step.
    #[serde(default)]
    pub sensors: Vec<Sensor>,
    /// Events, in order. Each is a single-key map, `- arm: ARMED_HOME`.
    #[serde(with = "serde_yaml::with::singleton_map_recursive")]
    pub steps: Vec<Step>,
}

/// One scripted event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Step {
    /// Set the arming status.
    Arm(ArmingStatus),
    /// Switch the named sensor on.
    Activate(String),
    /// Switch the named sensor off.
    Deactivate(String),
    /// Submit a camera frame.
    Image(ImageStep),
    /// Register a sensor.
    AddSensor(Sensor),
    /// Unregister the named sensor.
    RemoveSensor(String),
}

/// Camera frame parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ImageStep {
    /// Forced classifier answer; random when absent.
    #[serde(default)]
    pub cat: Option<bool>,
    /// Frame width in pixels.
    #[serde(default = "default_image_size")]
    pub width: u32,
    /// Frame height in pixels.
    #[serde(default = "default_image_size")]
    pub height: u32,
}

fn default_image_size() -> u32 {
    DEFAULT_IMAGE_SIZE
}

impl std::fmt::Display for Step {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Arm(status) => write!(f, "arm {status}"),
            Self::Activate(name) => write!(f, "activate {name}"),
            Self::Deactivate(name) => write!(f, "deactivate {name}"),
            Self::Image(step) => match step.cat {
                Some(cat) => write!(f, "image {}x{} (cat={cat})", step.width, step.height),
                None => write!(f, "image {}x{} (random)", step.width, step.height),
            },
            Self::AddSensor(sensor) => write!(f, "add sensor {sensor}"),
            Self::RemoveSensor(name) => write!(f, "remove sensor {name}"),
        }
    }
}

/// State after one step.
#[derive(Debug, Clone, Serialize)]
pub struct StepOutcome {
    /// 1-based step index.
    pub index: usize,
    /// Rendered step.
    pub step: String,
    /// Alarm status after the step.
    pub alarm: AlarmStatus,
    /// Arming status after the step.
    pub arming: ArmingStatus,
    /// Classifier answer, for image steps.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cat: Option<bool>,
}

/// Result of a full run.
#[derive(Debug, Clone, Serialize)]
pub struct ScenarioReport {
    /// Per-step outcomes.
    pub steps: Vec<StepOutcome>,
    /// Every alarm status change.
    pub transitions: Vec<AlarmTransitionRecord>,
    /// Final alarm status.
    pub alarm: AlarmStatus,
    /// Final arming status.
    pub arming: ArmingStatus,
    /// Final sensor states.
    pub sensors: Vec<Sensor>,
}

impl Scenario {
    /// Parse a YAML scenario.
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let scenario: Self = serde_yaml::from_str(yaml).context("invalid scenario yaml")?;
        scenario.validate()?;
        Ok(scenario)
    }

    /// Reject image steps whose frame could not be allocated.
    pub fn validate(&self) -> Result<()> {
        for (i, step) in self.steps.iter().enumerate() {
            if let Step::Image(image) = step {
                Image::buffer_len(image.width, image.height)
                    .with_context(|| format!("step {} ({step})", i + 1))?;
            }
        }
        Ok(())
    }

    /// Read and parse a YAML scenario file.
    pub fn load(path: &Path) -> Result<Self> {
        let yaml = std::fs::read_to_string(path)
            .with_context(|| format!("reading scenario {}", path.display()))?;
        Self::from_yaml_str(&yaml).with_context(|| format!("parsing {}", path.display()))
    }

    /// Decide every image answer up front: forced answers as given,
    /// the rest from a fake classifier.
    fn classifier_answers(
        &self,
        config: &SecurityConfig,
        seed: Option<u64>,
    ) -> Result<Vec<bool>> {
        let mut fake = match seed {
            Some(seed) => FakeImageClassifier::with_seed(seed),
            None => FakeImageClassifier::new(),
        };
        self.steps
            .iter()
            .filter_map(|step| match step {
                Step::Image(image) => Some(image),
                _ => None,
            })
            .map(|image| -> Result<bool> {
                match image.cat {
                    Some(cat) => Ok(cat),
                    None => {
                        let frame = Image::blank(image.width, image.height)?;
                        Ok(fake.image_contains_cat(&frame, config.confidence_threshold)?)
                    }
                }
            })
            .collect()
    }

    /// Replay the scenario against a fresh in-memory repository.
    pub fn run(&self, config: SecurityConfig, seed: Option<u64>) -> Result<ScenarioReport> {
        let answers = self.classifier_answers(&config, seed)?;
        let repository = InMemorySecurityRepository::with_state(
            self.alarm,
            self.arming,
            self.sensors.iter().cloned(),
        );
        let mut service = SecurityService::with_config(
            repository,
            ScriptedImageClassifier::new(answers),
            config,
        );
        service.add_status_listener(Arc::new(TracingListener));

        let mut outcomes = Vec::with_capacity(self.steps.len());
        for (i, step) in self.steps.iter().enumerate() {
            let index = i + 1;
            let cat = apply_step(&mut service, step)
                .with_context(|| format!("step {index} ({step})"))?;
            outcomes.push(StepOutcome {
                index,
                step: step.to_string(),
                alarm: service.alarm_status()?,
                arming: service.arming_status()?,
                cat,
            });
        }

        Ok(ScenarioReport {
            steps: outcomes,
            transitions: service.transitions().to_vec(),
            alarm: service.alarm_status()?,
            arming: service.arming_status()?,
            sensors: service.sensors()?.into_iter().collect(),
        })
    }
}

type ScenarioService = SecurityService<InMemorySecurityRepository, ScriptedImageClassifier>;

fn apply_step(service: &mut ScenarioService, step: &Step) -> Result<Option<bool>> {
    match step {
        Step::Arm(status) => service.set_arming_status(*status)?,
        Step::Activate(name) => {
            let mut sensor = find_sensor(service, name)?;
            service.change_sensor_activation_status(&mut sensor, true)?;
        }
        Step::Deactivate(name) => {
            let mut sensor = find_sensor(service, name)?;
            service.change_sensor_activation_status(&mut sensor, false)?;
        }
        Step::Image(image) => {
            let frame = Image::blank(image.width, image.height)?;
            return Ok(Some(service.process_image(&frame)?));
        }
        Step::AddSensor(sensor) => service.add_sensor(sensor.clone())?,
        Step::RemoveSensor(name) => {
            let sensor = find_sensor(service, name)?;
            service.remove_sensor(&sensor)?;
        }
    }
    Ok(None)
}

fn find_sensor(service: &ScenarioService, name: &str) -> Result<Sensor> {
    let mut matches: Vec<Sensor> = service
        .sensors()?
        .into_iter()
        .filter(|s| s.name == name)
        .collect();
    match matches.len() {
        0 => bail!("no sensor named {name:?}"),
        1 => Ok(matches.remove(0)),
        n => bail!("{n} sensors are named {name:?}; sensor names must be unique in a scenario"),
    }
}

/// Mirrors service notifications into the log.
struct TracingListener;

impl StatusListener for TracingListener {
    fn notify(&self, status: AlarmStatus) {
        tracing::debug!(%status, description = status.description(), "alarm status written");
    }

    fn cat_detected(&self, cat: bool) {
        if cat {
            tracing::warn!("cat detected");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SCENARIO: &str = r#"
sensors:
  - { name: front door, sensor_type: DOOR }
  - { name: hallway, sensor_type: MOTION }
steps:
  - arm: ARMED_AWAY
  - activate: front door
  - activate: hallway
  - arm: DISARMED
"#;

    #[test]
    fn test_parse_scenario() {
        let scenario = Scenario::from_yaml_str(SCENARIO).unwrap();
        assert_eq!(scenario.arming, ArmingStatus::Disarmed);
        assert_eq!(scenario.sensors.len(), 2);
        assert_eq!(scenario.steps[0], Step::Arm(ArmingStatus::ArmedAway));
        assert_eq!(scenario.steps[1], Step::Activate("front door".to_string()));
    }

    #[test]
    fn test_parse_image_defaults() {
        let scenario = Scenario::from_yaml_str("steps:\n  - image: {}\n").unwrap();
        assert_eq!(
            scenario.steps[0],
            Step::Image(ImageStep {
                cat: None,
                width: 100,
                height: 100,
            })
        );
    }

    #[test]
    fn test_run_escalates_then_disarms() {
        let scenario = Scenario::from_yaml_str(SCENARIO).unwrap();
        let report = scenario.run(SecurityConfig::default(), Some(1)).unwrap();
        let alarms: Vec<AlarmStatus> = report.steps.iter().map(|s| s.alarm).collect();
        assert_eq!(
            alarms,
            vec![
                AlarmStatus::NoAlarm,
                AlarmStatus::PendingAlarm,
                AlarmStatus::Alarm,
                AlarmStatus::NoAlarm,
            ]
        );
        assert_eq!(report.transitions.len(), 3);
        assert_eq!(report.arming, ArmingStatus::Disarmed);
    }

    #[test]
    fn test_run_cat_before_arming_home() {
        let yaml = "steps:\n  - image: { cat: true }\n  - arm: ARMED_HOME\n";
        let report = Scenario::from_yaml_str(yaml)
            .unwrap()
            .run(SecurityConfig::default(), None)
            .unwrap();
        assert_eq!(report.steps[0].cat, Some(true));
        assert_eq!(report.steps[0].alarm, AlarmStatus::NoAlarm);
        assert_eq!(report.alarm, AlarmStatus::Alarm);
    }

    #[test]
    fn test_random_images_are_reproducible_with_seed() {
        let yaml = "arming: ARMED_HOME\nsteps:\n  - image: {}\n  - image: {}\n  - image: {}\n";
        let scenario = Scenario::from_yaml_str(yaml).unwrap();
        let a = scenario.run(SecurityConfig::default(), Some(99)).unwrap();
        let b = scenario.run(SecurityConfig::default(), Some(99)).unwrap();
        let cats = |r: &ScenarioReport| r.steps.iter().map(|s| s.cat).collect::<Vec<_>>();
        assert_eq!(cats(&a), cats(&b));
    }

    #[test]
    fn test_unknown_sensor_is_an_error() {
        let scenario = Scenario::from_yaml_str("steps:\n  - activate: garage\n").unwrap();
        let err = scenario.run(SecurityConfig::default(), None).unwrap_err();
        assert!(format!("{err:#}").contains("no sensor named \"garage\""));
    }

    #[test]
    fn test_add_and_remove_sensor_steps() {
        let yaml = r#"
steps:
  - add_sensor: { name: attic, sensor_type: WINDOW }
  - add_sensor: { name: porch, sensor_type: DOOR }
  - remove_sensor: attic
"#;
        let report = Scenario::from_yaml_str(yaml)
            .unwrap()
            .run(SecurityConfig::default(), None)
            .unwrap();
        assert_eq!(report.sensors.len(), 1);
        assert_eq!(report.sensors[0].name, "porch");
    }

    #[test]
    fn test_invalid_threshold_fails_random_image() {
        let scenario = Scenario::from_yaml_str("steps:\n  - image: {}\n").unwrap();
        let config = SecurityConfig {
            confidence_threshold: 500.0,
        };
        assert!(scenario.run(config, Some(3)).is_err());
    }

    #[test]
    fn test_oversized_image_step_rejected_at_parse() {
        let yaml = "steps:\n  - image: { cat: true, width: 4294967295, height: 4294967295 }\n";
        let err = Scenario::from_yaml_str(yaml).unwrap_err();
        assert!(format!("{err:#}").contains("exceeds"));
    }

    #[test]
    fn test_single_key_map_steps() {
        let yaml = "steps:\n  - arm: ARMED_HOME\n  - remove_sensor: hall\n  - image: { cat: false }\n";
        let scenario = Scenario::from_yaml_str(yaml).unwrap();
        assert_eq!(scenario.steps.len(), 3);
        assert_eq!(scenario.steps[1], Step::RemoveSensor("hall".to_string()));
    }

    #[test]
    fn test_step_display() {
        assert_eq!(Step::Arm(ArmingStatus::ArmedHome).to_string(), "arm ARMED_HOME");
        let image = Step::Image(ImageStep {
            cat: Some(false),
            width: 100,
            height: 100,
        });
        assert_eq!(image.to_string(), "image 100x100 (cat=false)");
    }
}
