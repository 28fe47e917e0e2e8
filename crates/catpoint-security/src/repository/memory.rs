//! In-memory implementation of `SecurityRepository`.
//!
//! All state is held in memory and lost on restart.

use std::collections::BTreeSet;
use std::sync::Arc;

use catpoint_core::{AlarmStatus, ArmingStatus, Sensor};
use parking_lot::RwLock;

use super::SecurityRepository;
use crate::error::RepositoryError;

#[derive(Debug, Default)]
struct SecurityState {
    alarm_status: AlarmStatus,
    arming_status: ArmingStatus,
    sensors: BTreeSet<Sensor>,
}

/// Thread-safe, cloneable in-memory security repository.
///
/// Clones share the same underlying state, so a caller can keep a handle
/// for inspection after handing one to the service. Starts at `NO_ALARM`,
/// `DISARMED`, with no sensors.
#[derive(Debug, Clone, Default)]
pub struct InMemorySecurityRepository {
    state: Arc<RwLock<SecurityState>>,
}

impl InMemorySecurityRepository {
    /// Create an empty repository.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a repository pre-seeded with sensors and statuses.
    pub fn with_state(
        alarm_status: AlarmStatus,
        arming_status: ArmingStatus,
        sensors: impl IntoIterator<Item = Sensor>,
    ) -> Self {
        Self {
            state: Arc::new(RwLock::new(SecurityState {
                alarm_status,
                arming_status,
                sensors: sensors.into_iter().collect(),
            })),
        }
    }

    /// Look up the stored copy of a sensor.
    pub fn sensor(&self, sensor: &Sensor) -> Option<Sensor> {
        self.state.read().sensors.get(sensor).cloned()
    }

    /// Number of registered sensors.
    pub fn len(&self) -> usize {
        self.state.read().sensors.len()
    }

    /// Whether no sensors are registered.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl SecurityRepository for InMemorySecurityRepository {
    fn alarm_status(&self) -> Result<AlarmStatus, RepositoryError> {
        Ok(self.state.read().alarm_status)
    }

    fn set_alarm_status(&self, status: AlarmStatus) -> Result<(), RepositoryError> {
        self.state.write().alarm_status = status;
        Ok(())
    }

    fn arming_status(&self) -> Result<ArmingStatus, RepositoryError> {
        Ok(self.state.read().arming_status)
    }

    fn set_arming_status(&self, status: ArmingStatus) -> Result<(), RepositoryError> {
        self.state.write().arming_status = status;
        Ok(())
    }

    fn sensors(&self) -> Result<BTreeSet<Sensor>, RepositoryError> {
        Ok(self.state.read().sensors.clone())
    }

    fn add_sensor(&self, sensor: Sensor) -> Result<(), RepositoryError> {
        self.state.write().sensors.insert(sensor);
        Ok(())
    }

    fn remove_sensor(&self, sensor: &Sensor) -> Result<bool, RepositoryError> {
        Ok(self.state.write().sensors.remove(sensor))
    }

    fn update_sensor(&self, sensor: Sensor) -> Result<(), RepositoryError> {
        // `insert` keeps the old element on a key match, so replace explicitly.
        self.state.write().sensors.replace(sensor);
        Ok(())
    }

    fn is_any_sensor_active(&self) -> Result<bool, RepositoryError> {
        Ok(self.state.read().sensors.iter().any(Sensor::is_active))
    }
}
