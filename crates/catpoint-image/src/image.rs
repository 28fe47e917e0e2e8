//! # Image Buffers
//!
//! Camera frames handed to the classifier: row-major RGB8 pixels.

use crate::error::ImageError;

const CHANNELS: usize = 3;

/// Largest accepted frame, in pixels (an 8K UHD frame).
pub const MAX_PIXELS: u64 = 7680 * 4320;

/// An RGB8 image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Image {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
}

impl Image {
    /// Wrap a pixel buffer, checking it matches the dimensions.
    pub fn new(width: u32, height: u32, pixels: Vec<u8>) -> Result<Self, ImageError> {
        let expected = Self::buffer_len(width, height)?;
        if pixels.len() != expected {
            return Err(ImageError::BufferSize {
                width,
                height,
                expected,
                actual: pixels.len(),
            });
        }
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    /// An all-black image of the given size.
    pub fn blank(width: u32, height: u32) -> Result<Self, ImageError> {
        Ok(Self {
            width,
            height,
            pixels: vec![0; Self::buffer_len(width, height)?],
        })
    }

    /// RGB buffer length for the given dimensions, rejecting frames above
    /// [`MAX_PIXELS`].
    pub fn buffer_len(width: u32, height: u32) -> Result<usize, ImageError> {
        let pixels = u64::from(width) * u64::from(height);
        if pixels > MAX_PIXELS {
            return Err(ImageError::TooLarge { width, height });
        }
        usize::try_from(pixels)
            .ok()
            .and_then(|p| p.checked_mul(CHANNELS))
            .ok_or(ImageError::TooLarge { width, height })
    }

    /// Width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Whether either dimension is zero.
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Raw row-major RGB bytes.
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }
}
