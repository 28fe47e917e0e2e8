//! # catpoint-image — Cat Detection Boundary
//!
//! The security service treats image recognition as an external
//! collaborator that answers one question: does this image contain a cat?
//! This crate defines that boundary.
//!
//! - [`Image`]: an RGB8 pixel buffer with validated dimensions.
//! - [`ImageClassifier`]: the trait the security service calls.
//! - [`FakeImageClassifier`]: answers at random, optionally seeded.
//! - [`ScriptedImageClassifier`]: replays a fixed queue of answers.
//!
//! Recognition internals are out of scope; no real model lives here.

pub mod classifier;
pub mod error;
pub mod image;

pub use classifier::{
    validate_threshold, FakeImageClassifier, ImageClassifier, ScriptedImageClassifier,
    DEFAULT_CONFIDENCE_THRESHOLD,
};
pub use error::{ClassifierError, ImageError};
pub use image::{Image, MAX_PIXELS};
