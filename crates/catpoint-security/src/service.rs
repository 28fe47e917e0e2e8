//! # Security Service — Alarm State Machine
//!
//! Derives the alarm status from three event classes: sensor activation
//! changes, arming changes and image classification.
//!
//! ## Rules
//!
//! | Event                         | Precondition                              | Result          |
//! |-------------------------------|-------------------------------------------|-----------------|
//! | sensor activated              | armed, `NO_ALARM`                         | `PENDING_ALARM` |
//! | sensor activated              | `PENDING_ALARM`                           | `ALARM`         |
//! | sensor deactivated            | was active, `PENDING_ALARM`, none active  | `NO_ALARM`      |
//! | any sensor change             | `ALARM`                                   | unchanged       |
//! | sensor deactivated            | was already inactive                      | unchanged       |
//! | arm `DISARMED`                | —                                         | `NO_ALARM`      |
//! | arm `ARMED_HOME`/`ARMED_AWAY` | —                                         | all sensors off |
//! | arm `ARMED_HOME`              | last image showed a cat                   | `ALARM`         |
//! | image with cat                | `ARMED_HOME`                              | `ALARM`         |
//! | image without cat             | no sensor active                          | `NO_ALARM`      |
//!
//! Activations while `DISARMED` only update the sensor.

use std::collections::BTreeSet;
use std::sync::Arc;

use catpoint_core::{AlarmStatus, ArmingStatus, Sensor, Timestamp};
use catpoint_image::{Image, ImageClassifier};

use crate::config::SecurityConfig;
use crate::error::SecurityError;
use crate::listener::StatusListener;
use crate::repository::SecurityRepository;
use crate::transition::{AlarmTransitionRecord, AlarmTrigger};

/// Orchestrates the repository, the classifier and registered listeners.
///
/// All operations take `&mut self`: a read-then-write transition (such as
/// "no sensor active, so clear the alarm") runs while the service is
/// exclusively borrowed.
pub struct SecurityService<R, C> {
    repository: R,
    classifier: C,
    config: SecurityConfig,
    listeners: Vec<Arc<dyn StatusListener>>,
    cat_detected: bool,
    transitions: Vec<AlarmTransitionRecord>,
}

impl<R, C> SecurityService<R, C>
where
    R: SecurityRepository,
    C: ImageClassifier,
{
    /// Create a service with the default configuration.
    pub fn new(repository: R, classifier: C) -> Self {
        Self::with_config(repository, classifier, SecurityConfig::default())
    }

    /// Create a service with an explicit configuration.
    pub fn with_config(repository: R, classifier: C, config: SecurityConfig) -> Self {
        Self {
            repository,
            classifier,
            config,
            listeners: Vec::new(),
            cat_detected: false,
            transitions: Vec::new(),
        }
    }

    // ── Listeners ────────────────────────────────────────────────────

    /// Register a listener.
    pub fn add_status_listener(&mut self, listener: Arc<dyn StatusListener>) {
        self.listeners.push(listener);
    }

    /// Unregister a listener by identity. Returns whether it was registered.
    pub fn remove_status_listener(&mut self, listener: &Arc<dyn StatusListener>) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|l| !Arc::ptr_eq(l, listener));
        self.listeners.len() != before
    }

    // ── Events ───────────────────────────────────────────────────────

    /// Set the arming status.
    ///
    /// Disarming clears the alarm. Arming resets every registered sensor to
    /// inactive without running the activation rules. Arming at home while
    /// the last classified image showed a cat raises the alarm.
    pub fn set_arming_status(&mut self, arming: ArmingStatus) -> Result<(), SecurityError> {
        let trigger = AlarmTrigger::ArmingChanged { arming };

        if arming == ArmingStatus::Disarmed {
            self.set_alarm_status(AlarmStatus::NoAlarm, &trigger)?;
        } else {
            self.deactivate_all_sensors()?;
        }

        self.repository.set_arming_status(arming)?;
        tracing::info!(%arming, "arming status set");

        if arming == ArmingStatus::ArmedHome && self.cat_detected {
            self.set_alarm_status(AlarmStatus::Alarm, &trigger)?;
        }
        Ok(())
    }

    /// Change a sensor's activation state and apply the alarm rules.
    ///
    /// The rules look at the supplied sensor's prior `active` flag, not the
    /// stored copy. The sensor is updated in place and written back to the
    /// repository; unknown sensors are inserted.
    pub fn change_sensor_activation_status(
        &mut self,
        sensor: &mut Sensor,
        active: bool,
    ) -> Result<(), SecurityError> {
        let was_active = sensor.is_active();
        let alarm = self.repository.alarm_status()?;

        sensor.set_active(active);
        self.repository.update_sensor(sensor.clone())?;
        tracing::debug!(%sensor, was_active, active, %alarm, "sensor activation changed");

        if active {
            self.handle_sensor_activated(alarm, sensor)?;
        } else if was_active {
            self.handle_sensor_deactivated(alarm, sensor)?;
        }

        self.notify_sensor_status_changed();
        Ok(())
    }

    /// Classify an image and apply the cat-detection rules.
    ///
    /// Returns the classifier outcome, which is also remembered for the
    /// next arming change.
    pub fn process_image(&mut self, image: &Image) -> Result<bool, SecurityError> {
        let cat = self
            .classifier
            .image_contains_cat(image, self.config.confidence_threshold)?;
        self.cat_detected = cat;
        tracing::debug!(
            cat,
            confidence_threshold = self.config.confidence_threshold,
            "image classified"
        );

        let trigger = AlarmTrigger::ImageProcessed { cat };
        if cat {
            if self.repository.arming_status()? == ArmingStatus::ArmedHome {
                self.set_alarm_status(AlarmStatus::Alarm, &trigger)?;
            }
        } else if !self.repository.is_any_sensor_active()? {
            self.set_alarm_status(AlarmStatus::NoAlarm, &trigger)?;
        }

        for listener in &self.listeners {
            listener.cat_detected(cat);
        }
        Ok(cat)
    }

    /// Register a sensor. No alarm rules run.
    pub fn add_sensor(&mut self, sensor: Sensor) -> Result<(), SecurityError> {
        tracing::debug!(%sensor, "sensor added");
        self.repository.add_sensor(sensor)?;
        Ok(())
    }

    /// Unregister a sensor. Returns whether it was registered.
    pub fn remove_sensor(&mut self, sensor: &Sensor) -> Result<bool, SecurityError> {
        let removed = self.repository.remove_sensor(sensor)?;
        tracing::debug!(%sensor, removed, "sensor removed");
        Ok(removed)
    }

    // ── Queries ──────────────────────────────────────────────────────

    /// Current alarm status.
    pub fn alarm_status(&self) -> Result<AlarmStatus, SecurityError> {
        Ok(self.repository.alarm_status()?)
    }

    /// Current arming status.
    pub fn arming_status(&self) -> Result<ArmingStatus, SecurityError> {
        Ok(self.repository.arming_status()?)
    }

    /// All registered sensors.
    pub fn sensors(&self) -> Result<BTreeSet<Sensor>, SecurityError> {
        Ok(self.repository.sensors()?)
    }

    /// Outcome of the most recent classification, `false` before any.
    pub fn cat_detected(&self) -> bool {
        self.cat_detected
    }

    /// Alarm changes so far, oldest first.
    pub fn transitions(&self) -> &[AlarmTransitionRecord] {
        &self.transitions
    }

    /// Drain the recorded alarm changes, oldest first.
    pub fn take_transitions(&mut self) -> Vec<AlarmTransitionRecord> {
        std::mem::take(&mut self.transitions)
    }

    /// Active configuration.
    pub fn config(&self) -> &SecurityConfig {
        &self.config
    }

    /// The underlying repository.
    pub fn repository(&self) -> &R {
        &self.repository
    }

    /// The underlying classifier.
    pub fn classifier(&self) -> &C {
        &self.classifier
    }

    // ── Rules ────────────────────────────────────────────────────────

    fn handle_sensor_activated(
        &mut self,
        alarm: AlarmStatus,
        sensor: &Sensor,
    ) -> Result<(), SecurityError> {
        let next = match alarm {
            AlarmStatus::NoAlarm => {
                if !self.repository.arming_status()?.is_armed() {
                    return Ok(());
                }
                AlarmStatus::PendingAlarm
            }
            AlarmStatus::PendingAlarm => AlarmStatus::Alarm,
            AlarmStatus::Alarm => return Ok(()),
        };
        let trigger = AlarmTrigger::SensorActivated {
            sensor: sensor.to_string(),
        };
        self.set_alarm_status(next, &trigger)
    }

    fn handle_sensor_deactivated(
        &mut self,
        alarm: AlarmStatus,
        sensor: &Sensor,
    ) -> Result<(), SecurityError> {
        if alarm != AlarmStatus::PendingAlarm || self.repository.is_any_sensor_active()? {
            return Ok(());
        }
        let trigger = AlarmTrigger::SensorDeactivated {
            sensor: sensor.to_string(),
        };
        self.set_alarm_status(AlarmStatus::NoAlarm, &trigger)
    }

    fn deactivate_all_sensors(&mut self) -> Result<(), SecurityError> {
        let mut changed = 0usize;
        for mut sensor in self.repository.sensors()? {
            if sensor.is_active() {
                sensor.set_active(false);
                self.repository.update_sensor(sensor)?;
                changed += 1;
            }
        }
        if changed > 0 {
            tracing::debug!(changed, "sensors reset on arming");
            self.notify_sensor_status_changed();
        }
        Ok(())
    }

    /// Write the alarm status, record the change and notify listeners.
    fn set_alarm_status(
        &mut self,
        to: AlarmStatus,
        trigger: &AlarmTrigger,
    ) -> Result<(), SecurityError> {
        let from = self.repository.alarm_status()?;
        self.repository.set_alarm_status(to)?;

        if from != to {
            tracing::info!(%from, %to, %trigger, "alarm status changed");
            self.transitions.push(AlarmTransitionRecord {
                from_state: from,
                to_state: to,
                trigger: trigger.clone(),
                timestamp: Timestamp::now(),
            });
        }

        for listener in &self.listeners {
            listener.notify(to);
        }
        Ok(())
    }

    fn notify_sensor_status_changed(&self) {
        for listener in &self.listeners {
            listener.sensor_status_changed();
        }
    }
}

impl<R, C> std::fmt::Debug for SecurityService<R, C>
where
    R: std::fmt::Debug,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SecurityService")
            .field("repository", &self.repository)
            .field("config", &self.config)
            .field("listeners", &self.listeners.len())
            .field("cat_detected", &self.cat_detected)
            .field("transitions", &self.transitions.len())
            .finish()
    }
}
