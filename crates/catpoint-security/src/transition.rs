//! # Alarm Transition Records
//!
//! Every change of the alarm status is logged with the event that caused
//! it. Writes that leave the status unchanged are not recorded.

use catpoint_core::{AlarmStatus, ArmingStatus, Timestamp};
use serde::{Deserialize, Serialize};

/// The event class that drove an alarm transition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum AlarmTrigger {
    /// A sensor was switched on.
    SensorActivated {
        /// Sensor display form, `name (TYPE)`.
        sensor: String,
    },
    /// A sensor was switched off.
    SensorDeactivated {
        /// Sensor display form, `name (TYPE)`.
        sensor: String,
    },
    /// The arming status was set.
    ArmingChanged {
        /// The requested arming status.
        arming: ArmingStatus,
    },
    /// An image was classified.
    ImageProcessed {
        /// Classifier outcome.
        cat: bool,
    },
}

impl std::fmt::Display for AlarmTrigger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::SensorActivated { sensor } => write!(f, "sensor {sensor} activated"),
            Self::SensorDeactivated { sensor } => write!(f, "sensor {sensor} deactivated"),
            Self::ArmingChanged { arming } => write!(f, "arming set to {arming}"),
            Self::ImageProcessed { cat: true } => f.write_str("cat detected"),
            Self::ImageProcessed { cat: false } => f.write_str("no cat detected"),
        }
    }
}

/// Record of one alarm status change.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AlarmTransitionRecord {
    /// Status before the transition.
    pub from_state: AlarmStatus,
    /// Status after the transition.
    pub to_state: AlarmStatus,
    /// What caused it.
    pub trigger: AlarmTrigger,
    /// When it happened.
    pub timestamp: Timestamp,
}

impl std::fmt::Display for AlarmTransitionRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} {} -> {} ({})",
            self.timestamp, self.from_state, self.to_state, self.trigger
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trigger_display() {
        let trigger = AlarmTrigger::SensorActivated {
            sensor: "front (DOOR)".to_string(),
        };
        assert_eq!(trigger.to_string(), "sensor front (DOOR) activated");
        assert_eq!(
            AlarmTrigger::ArmingChanged {
                arming: ArmingStatus::ArmedHome
            }
            .to_string(),
            "arming set to ARMED_HOME"
        );
        assert_eq!(
            AlarmTrigger::ImageProcessed { cat: false }.to_string(),
            "no cat detected"
        );
    }

    #[test]
    fn test_trigger_serialization_is_tagged() {
        let json = serde_json::to_value(AlarmTrigger::ImageProcessed { cat: true }).unwrap();
        assert_eq!(json["event"], "image_processed");
        assert_eq!(json["cat"], true);
    }

    #[test]
    fn test_record_serialization() {
        let record = AlarmTransitionRecord {
            from_state: AlarmStatus::NoAlarm,
            to_state: AlarmStatus::PendingAlarm,
            trigger: AlarmTrigger::SensorActivated {
                sensor: "hall (MOTION)".to_string(),
            },
            timestamp: Timestamp::now(),
        };
        let json = serde_json::to_string(&record).unwrap();
        let parsed: AlarmTransitionRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.to_state, AlarmStatus::PendingAlarm);
        assert_eq!(parsed.trigger, record.trigger);
    }
}
