//! Repository abstraction for security state.
//!
//! The repository holds the global alarm status, the global arming status
//! and the registered sensors. The security service reads and writes all
//! three through [`SecurityRepository`], so backends can be swapped without
//! touching the transition rules.

mod memory;

pub use memory::InMemorySecurityRepository;

use std::collections::BTreeSet;

use catpoint_core::{AlarmStatus, ArmingStatus, Sensor};

use crate::error::RepositoryError;

/// Storage for sensors and the two pieces of global state.
///
/// Sensors are keyed by (name, type); see [`Sensor`].
pub trait SecurityRepository: Send + Sync {
    /// Current alarm status.
    fn alarm_status(&self) -> Result<AlarmStatus, RepositoryError>;

    /// Overwrite the alarm status.
    fn set_alarm_status(&self, status: AlarmStatus) -> Result<(), RepositoryError>;

    /// Current arming status.
    fn arming_status(&self) -> Result<ArmingStatus, RepositoryError>;

    /// Overwrite the arming status.
    fn set_arming_status(&self, status: ArmingStatus) -> Result<(), RepositoryError>;

    /// Snapshot of all registered sensors, ordered by identity.
    fn sensors(&self) -> Result<BTreeSet<Sensor>, RepositoryError>;

    /// Register a sensor. Re-adding an existing sensor keeps the stored one.
    fn add_sensor(&self, sensor: Sensor) -> Result<(), RepositoryError>;

    /// Unregister a sensor. Returns whether it was present.
    fn remove_sensor(&self, sensor: &Sensor) -> Result<bool, RepositoryError>;

    /// Store a sensor's new state (upsert).
    fn update_sensor(&self, sensor: Sensor) -> Result<(), RepositoryError>;

    /// Whether any registered sensor is active.
    fn is_any_sensor_active(&self) -> Result<bool, RepositoryError> {
        Ok(self.sensors()?.iter().any(Sensor::is_active))
    }
}
