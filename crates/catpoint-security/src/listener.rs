//! # Status Listeners
//!
//! Observers registered on the security service, such as a status panel
//! or a siren driver. Every method has an empty default so a listener only
//! implements what it cares about.

use catpoint_core::AlarmStatus;

/// Receives security service notifications.
pub trait StatusListener: Send + Sync {
    /// The alarm status was written. Fired on every write, including
    /// writes that leave the status unchanged.
    fn notify(&self, _status: AlarmStatus) {}

    /// An image was classified.
    fn cat_detected(&self, _cat: bool) {}

    /// One or more sensors changed activation state.
    fn sensor_status_changed(&self) {}
}
