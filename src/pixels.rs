//! Borrowed RGBA8 pixel buffers and grayscale sampling.
//!
//! The mesher only ever reads pixels; ownership stays with the caller
//! (a decoded `image::RgbaImage`, a test fixture, a canvas readback).

use crate::error::{HeightmapError, HeightmapResult};

/// Number of channels in RGBA8 format.
pub const RGBA8_CHANNELS: usize = 4;

/// Compute expected buffer size with overflow checking.
pub fn expected_buffer_len(width: u32, height: u32) -> HeightmapResult<usize> {
    (width as usize)
        .checked_mul(height as usize)
        .and_then(|px| px.checked_mul(RGBA8_CHANNELS))
        .ok_or(HeightmapError::DimensionOverflow { width, height })
}

/// Row-major RGBA8 view over `width * height` pixels.
#[derive(Debug, Clone, Copy)]
pub struct PixelBuffer<'a> {
    data: &'a [u8],
    width: u32,
    height: u32,
}

impl<'a> PixelBuffer<'a> {
    /// Wrap a tightly packed RGBA8 slice, checking its length against the
    /// dimensions.
    pub fn new(data: &'a [u8], width: u32, height: u32) -> HeightmapResult<Self> {
        if width == 0 || height == 0 {
            return Err(HeightmapError::ZeroDimension { width, height });
        }
        let expected = expected_buffer_len(width, height)?;
        if data.len() != expected {
            return Err(HeightmapError::BufferSizeMismatch {
                expected,
                actual: data.len(),
            });
        }
        Ok(Self {
            data,
            width,
            height,
        })
    }

    pub fn from_image(image: &'a image::RgbaImage) -> HeightmapResult<Self> {
        Self::new(image.as_raw(), image.width(), image.height())
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// RGBA channels of the pixel at `(x, y)`.
    ///
    /// Panics if the coordinate lies outside the buffer.
    pub(crate) fn rgba(&self, x: u32, y: u32) -> [u8; 4] {
        assert!(
            x < self.width && y < self.height,
            "pixel ({x}, {y}) outside {}x{} buffer",
            self.width,
            self.height
        );
        let idx = (y as usize * self.width as usize + x as usize) * RGBA8_CHANNELS;
        [
            self.data[idx],
            self.data[idx + 1],
            self.data[idx + 2],
            self.data[idx + 3],
        ]
    }

    /// Average of red, green and blue at `(x, y)`, in `[0, 255]`. Alpha is
    /// ignored.
    pub(crate) fn gray(&self, x: u32, y: u32) -> f64 {
        let [r, g, b, _] = self.rgba(x, y);
        (r as f64 + g as f64 + b as f64) / 3.0
    }
}
