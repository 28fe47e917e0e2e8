//! # Image Classifiers
//!
//! [`ImageClassifier`] is the seam between the security service and
//! whatever decides if a frame shows a cat. The confidence threshold is a
//! percentage; implementations must reject values outside `0.0..=100.0`
//! and empty images before answering.

use std::collections::VecDeque;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::error::ClassifierError;
use crate::image::Image;

/// Confidence threshold used when none is configured.
pub const DEFAULT_CONFIDENCE_THRESHOLD: f32 = 50.0;

/// Decides whether an image contains a cat.
pub trait ImageClassifier {
    /// Returns `true` if a cat is detected with at least
    /// `confidence_threshold` percent confidence.
    fn image_contains_cat(
        &mut self,
        image: &Image,
        confidence_threshold: f32,
    ) -> Result<bool, ClassifierError>;
}

impl<C: ImageClassifier + ?Sized> ImageClassifier for Box<C> {
    fn image_contains_cat(
        &mut self,
        image: &Image,
        confidence_threshold: f32,
    ) -> Result<bool, ClassifierError> {
        (**self).image_contains_cat(image, confidence_threshold)
    }
}

/// Check the shared classifier preconditions.
pub fn validate_threshold(image: &Image, confidence_threshold: f32) -> Result<(), ClassifierError> {
    if !confidence_threshold.is_finite() || !(0.0..=100.0).contains(&confidence_threshold) {
        return Err(ClassifierError::InvalidThreshold(confidence_threshold));
    }
    if image.is_empty() {
        return Err(ClassifierError::EmptyImage {
            width: image.width(),
            height: image.height(),
        });
    }
    Ok(())
}

/// Stand-in for a cloud recognition service: a coin flip per image.
#[derive(Debug)]
pub struct FakeImageClassifier {
    rng: StdRng,
}

impl FakeImageClassifier {
    /// Seed from OS entropy.
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// Deterministic sequence for a given seed.
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Default for FakeImageClassifier {
    fn default() -> Self {
        Self::new()
    }
}

impl ImageClassifier for FakeImageClassifier {
    fn image_contains_cat(
        &mut self,
        image: &Image,
        confidence_threshold: f32,
    ) -> Result<bool, ClassifierError> {
        validate_threshold(image, confidence_threshold)?;
        let cat = self.rng.gen_bool(0.5);
        tracing::debug!(
            width = image.width(),
            height = image.height(),
            confidence_threshold,
            cat,
            "fake classifier answered"
        );
        Ok(cat)
    }
}

/// Replays a fixed queue of answers, one per image.
#[derive(Debug, Default)]
pub struct ScriptedImageClassifier {
    answers: VecDeque<bool>,
    served: usize,
}

impl ScriptedImageClassifier {
    /// Queue the given answers in order.
    pub fn new(answers: impl IntoIterator<Item = bool>) -> Self {
        Self {
            answers: answers.into_iter().collect(),
            served: 0,
        }
    }

    /// Append one more answer.
    pub fn push(&mut self, cat: bool) {
        self.answers.push_back(cat);
    }

    /// Answers not yet consumed.
    pub fn remaining(&self) -> usize {
        self.answers.len()
    }
}

impl ImageClassifier for ScriptedImageClassifier {
    fn image_contains_cat(
        &mut self,
        image: &Image,
        confidence_threshold: f32,
    ) -> Result<bool, ClassifierError> {
        validate_threshold(image, confidence_threshold)?;
        let cat = self
            .answers
            .pop_front()
            .ok_or(ClassifierError::Exhausted(self.served))?;
        self.served += 1;
        Ok(cat)
    }
}
