//! # catpoint-core — Foundational Types for Catpoint
//!
//! Leaf crate of the Catpoint workspace. Defines the vocabulary every other
//! crate speaks: sensors, the global alarm and arming statuses, and the
//! UTC timestamp used in transition records. It depends on nothing internal.
//!
//! ## Key Design Principles
//!
//! 1. **Closed enums for global state.** `AlarmStatus` and `ArmingStatus`
//!    are exhaustive; adding a variant forces every `match` in the state
//!    machine to handle it.
//!
//! 2. **Sensor identity is (name, type).** The `active` flag is mutable
//!    state, not identity, so a sensor keeps its place in an ordered set
//!    while it toggles.
//!
//! 3. **UTC-only timestamps.** `Timestamp` is always UTC, truncated to
//!    seconds.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `catpoint-*` crates.
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.
//! - All public types derive `Debug`, `Clone`, and implement `Serialize`/`Deserialize`.

pub mod error;
pub mod sensor;
pub mod status;
pub mod temporal;

pub use error::ParseError;
pub use sensor::{Sensor, SensorType};
pub use status::{AlarmStatus, ArmingStatus};
pub use temporal::Timestamp;
