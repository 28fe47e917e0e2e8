//! # Sensors
//!
//! A sensor is a named door, window, or motion detector with a boolean
//! activation flag. Identity is the pair (name, type): two values with the
//! same name and type are the same sensor regardless of whether either is
//! currently active. Ordering follows identity, so a `BTreeSet<Sensor>`
//! iterates by name first, then type.

use std::cmp::Ordering;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{normalize, ParseError};

/// The kind of physical sensor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SensorType {
    /// Door contact sensor.
    Door,
    /// Window contact sensor.
    Window,
    /// Passive infrared motion sensor.
    Motion,
}

impl SensorType {
    /// All variants.
    pub const ALL: [SensorType; 3] = [Self::Door, Self::Window, Self::Motion];
}

impl std::fmt::Display for SensorType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Door => "DOOR",
            Self::Window => "WINDOW",
            Self::Motion => "MOTION",
        };
        f.write_str(s)
    }
}

impl FromStr for SensorType {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize(s).as_str() {
            "DOOR" => Ok(Self::Door),
            "WINDOW" => Ok(Self::Window),
            "MOTION" => Ok(Self::Motion),
            _ => Err(ParseError::SensorType(s.to_string())),
        }
    }
}

/// A registered sensor and its activation state.
///
/// Equality, ordering and hashing ignore `active`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Sensor {
    /// Display name, unique per sensor type.
    pub name: String,
    /// What kind of sensor this is.
    pub sensor_type: SensorType,
    /// Whether the sensor is currently tripped.
    #[serde(default)]
    pub active: bool,
}

impl Sensor {
    /// Create an inactive sensor.
    pub fn new(name: impl Into<String>, sensor_type: SensorType) -> Self {
        Self {
            name: name.into(),
            sensor_type,
            active: false,
        }
    }

    /// Whether the sensor is currently tripped.
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Set the activation flag.
    pub fn set_active(&mut self, active: bool) {
        self.active = active;
    }

    fn key(&self) -> (&str, SensorType) {
        (self.name.as_str(), self.sensor_type)
    }
}

impl PartialEq for Sensor {
    fn eq(&self, other: &Self) -> bool {
        self.key() == other.key()
    }
}

impl Eq for Sensor {}

impl PartialOrd for Sensor {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Sensor {
    fn cmp(&self, other: &Self) -> Ordering {
        self.key().cmp(&other.key())
    }
}

impl Hash for Sensor {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.key().hash(state);
    }
}

impl std::fmt::Display for Sensor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.name, self.sensor_type)
    }
}
