//! # catpoint-security — Alarm State Machine
//!
//! The security service decides the global alarm status from sensor
//! activity, the arming status and cat detection on camera images.
//!
//! ## States
//!
//! ```text
//! NO_ALARM ──▶ PENDING_ALARM ──▶ ALARM
//! ```
//!
//! `ALARM` is a sink for sensor events; only disarming, or an image with no
//! cat while every sensor is quiet, leaves it. See [`service`] for the full
//! rule table.
//!
//! ## Collaborators
//!
//! - [`SecurityRepository`] stores sensors and both global statuses.
//!   [`InMemorySecurityRepository`] is the bundled backend.
//! - [`catpoint_image::ImageClassifier`] answers "is there a cat?".
//! - [`StatusListener`]s are told about every alarm write, classification
//!   and sensor change.

pub mod config;
pub mod error;
pub mod listener;
pub mod repository;
pub mod service;
pub mod transition;

pub use config::SecurityConfig;
pub use error::{ConfigError, RepositoryError, SecurityError};
pub use listener::StatusListener;
pub use repository::{InMemorySecurityRepository, SecurityRepository};
pub use service::SecurityService;
pub use transition::{AlarmTransitionRecord, AlarmTrigger};
