//! # catpoint-cli — Catpoint Command-Line Interface
//!
//! Drives the security service from scripted scenarios so the alarm rules
//! can be exercised without sensors or a camera.
//!
//! ## Subcommands
//!
//! - `run` — Execute a YAML scenario and report every alarm transition
//! - `rules` — Print the alarm transition table
//!
//! ## Crate Policy
//!
//! - CLI construction (argument parsing) is separated from business logic.
//! - Handler functions delegate to `catpoint-security`; no alarm rules here.

pub mod rules;
pub mod run;
pub mod scenario;
