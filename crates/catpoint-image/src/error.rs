//! # Image and Classifier Errors

use thiserror::Error;

/// Error constructing an [`Image`](crate::Image).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ImageError {
    /// Pixel buffer length does not match `width * height * 3`.
    #[error("pixel buffer holds {actual} bytes, expected {expected} for {width}x{height} RGB")]
    BufferSize {
        /// Image width in pixels.
        width: u32,
        /// Image height in pixels.
        height: u32,
        /// Required buffer length.
        expected: usize,
        /// Supplied buffer length.
        actual: usize,
    },

    /// Dimensions exceed the largest accepted frame.
    #[error("{width}x{height} image exceeds the {max} pixel limit", max = crate::image::MAX_PIXELS)]
    TooLarge {
        /// Image width in pixels.
        width: u32,
        /// Image height in pixels.
        height: u32,
    },
}

/// Error raised by an image classifier.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ClassifierError {
    /// Confidence threshold is not a finite percentage in `0.0..=100.0`.
    #[error("confidence threshold {0} is outside 0..=100")]
    InvalidThreshold(f32),

    /// Image has zero width or height.
    #[error("cannot classify an empty {width}x{height} image")]
    EmptyImage {
        /// Image width in pixels.
        width: u32,
        /// Image height in pixels.
        height: u32,
    },

    /// A scripted classifier ran out of answers.
    #[error("scripted classifier has no answer left for image #{0}")]
    Exhausted(usize),
}
