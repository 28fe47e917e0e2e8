//! # Error Types
//!
//! Errors raised when turning external text (CLI flags, scenario files)
//! into core domain values. The state machine itself is total and has no
//! error type of its own.

use thiserror::Error;

/// A string did not name a known variant of a core enum.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// Unknown sensor type name.
    #[error("unknown sensor type {0:?}; expected one of DOOR, WINDOW, MOTION")]
    SensorType(String),

    /// Unknown alarm status name.
    #[error("unknown alarm status {0:?}; expected one of NO_ALARM, PENDING_ALARM, ALARM")]
    AlarmStatus(String),

    /// Unknown arming status name.
    #[error("unknown arming status {0:?}; expected one of DISARMED, ARMED_HOME, ARMED_AWAY")]
    ArmingStatus(String),
}

/// Normalize user input for enum parsing: trim, upper-case, `-` to `_`.
pub(crate) fn normalize(s: &str) -> String {
    s.trim().to_ascii_uppercase().replace('-', "_")
}
