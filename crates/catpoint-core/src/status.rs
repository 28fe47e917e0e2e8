//! # Alarm and Arming Status
//!
//! The two pieces of global state the security service reasons about.
//!
//! ```text
//!            sensor activated (armed)        sensor activated
//! NO_ALARM ─────────────────────────▶ PENDING_ALARM ───────────────▶ ALARM
//!    ▲                                     │                           │
//!    └──── last sensor deactivated ────────┘                           │
//!    └──────────────────────── disarm / no cat, no sensors ────────────┘
//! ```

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{normalize, ParseError};

/// The system alarm level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AlarmStatus {
    /// Nothing is wrong.
    #[default]
    NoAlarm,
    /// A sensor tripped while armed; one more trip raises the alarm.
    PendingAlarm,
    /// The alarm is sounding. Only a disarm (or an all-clear image) leaves it.
    Alarm,
}

impl AlarmStatus {
    /// All variants, in escalation order.
    pub const ALL: [AlarmStatus; 3] = [Self::NoAlarm, Self::PendingAlarm, Self::Alarm];

    /// Human-facing description shown on the status panel.
    pub fn description(&self) -> &'static str {
        match self {
            Self::NoAlarm => "Cool and Good",
            Self::PendingAlarm => "I'm in Danger...",
            Self::Alarm => "Awooga!",
        }
    }
}

impl std::fmt::Display for AlarmStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::NoAlarm => "NO_ALARM",
            Self::PendingAlarm => "PENDING_ALARM",
            Self::Alarm => "ALARM",
        };
        f.write_str(s)
    }
}

impl FromStr for AlarmStatus {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize(s).as_str() {
            "NO_ALARM" => Ok(Self::NoAlarm),
            "PENDING_ALARM" => Ok(Self::PendingAlarm),
            "ALARM" => Ok(Self::Alarm),
            _ => Err(ParseError::AlarmStatus(s.to_string())),
        }
    }
}

/// The arming mode chosen by the homeowner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ArmingStatus {
    /// Sensors are ignored.
    #[default]
    Disarmed,
    /// Armed with occupants at home; cat sightings raise the alarm.
    ArmedHome,
    /// Armed with the house empty.
    ArmedAway,
}

impl ArmingStatus {
    /// All variants.
    pub const ALL: [ArmingStatus; 3] = [Self::Disarmed, Self::ArmedHome, Self::ArmedAway];

    /// Whether sensor activations count toward the alarm.
    pub fn is_armed(&self) -> bool {
        matches!(self, Self::ArmedHome | Self::ArmedAway)
    }

    /// Human-facing description shown on the control panel.
    pub fn description(&self) -> &'static str {
        match self {
            Self::Disarmed => "Disarmed",
            Self::ArmedHome => "Armed - At Home",
            Self::ArmedAway => "Armed - Away",
        }
    }
}

impl std::fmt::Display for ArmingStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Disarmed => "DISARMED",
            Self::ArmedHome => "ARMED_HOME",
            Self::ArmedAway => "ARMED_AWAY",
        };
        f.write_str(s)
    }
}

impl FromStr for ArmingStatus {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize(s).as_str() {
            "DISARMED" => Ok(Self::Disarmed),
            "ARMED_HOME" => Ok(Self::ArmedHome),
            "ARMED_AWAY" => Ok(Self::ArmedAway),
            _ => Err(ParseError::ArmingStatus(s.to_string())),
        }
    }
}
