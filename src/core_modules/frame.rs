// THEORY:
// The `Frame` module is the raw-data boundary between the external camera
// source and the sampling engine. A `Frame` is one immutable pixel snapshot:
// once constructed it is never mutated, which is what lets the engine hand a
// cheap `Arc<Frame>` from the producer path to the tap handler without copying
// pixel data or worrying about torn reads.
//
// Key architectural principles:
// 1.  **BGRA, 4 bytes per pixel, row stride**: this mirrors what camera
//     hardware actually delivers. The stride (`bytes_per_row`) may be wider
//     than `width * 4` because of row padding, so all pixel math goes through
//     it rather than assuming tightly packed rows.
// 2.  **Validated construction**: a buffer that cannot cover the declared
//     dimensions is rejected at the constructor. After that, in-bounds pixel
//     access can never fail, so the hot sampling loop carries no per-pixel
//     error handling.
// 3.  **Dumb container**: the frame knows how to decode one pixel and nothing
//     else. Windowing, clamping, and bucketing live in the quantizer.

use crate::core_modules::color::Rgb;
use image::RgbaImage;
use thiserror::Error;

pub const BYTES_PER_PIXEL: usize = 4;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum FrameError {
    #[error("frame dimensions are zero ({width}x{height})")]
    EmptyDimensions { width: u32, height: u32 },
    #[error("row stride {bytes_per_row} is narrower than {min} bytes required for width {width}")]
    StrideTooNarrow {
        bytes_per_row: usize,
        width: u32,
        min: usize,
    },
    #[error("buffer holds {actual} bytes but {expected} are required")]
    BufferTooSmall { expected: usize, actual: usize },
}

/// One immutable BGRA pixel snapshot from the camera source.
#[derive(Debug, Clone)]
pub struct Frame {
    /// The width of the frame in pixels.
    width: u32,
    /// The height of the frame in pixels.
    height: u32,
    /// The stride of one pixel row in bytes (>= width * 4).
    bytes_per_row: usize,
    /// The raw pixel buffer, blue-green-red-alpha channel order.
    data: Vec<u8>,
}

impl Frame {
    /// Wraps a raw BGRA buffer, validating that it covers the declared
    /// dimensions and stride.
    pub fn new(
        width: u32,
        height: u32,
        bytes_per_row: usize,
        data: Vec<u8>,
    ) -> Result<Self, FrameError> {
        if width == 0 || height == 0 {
            return Err(FrameError::EmptyDimensions { width, height });
        }
        let min_stride = width as usize * BYTES_PER_PIXEL;
        if bytes_per_row < min_stride {
            return Err(FrameError::StrideTooNarrow {
                bytes_per_row,
                width,
                min: min_stride,
            });
        }
        let expected = bytes_per_row * height as usize;
        if data.len() < expected {
            return Err(FrameError::BufferTooSmall {
                expected,
                actual: data.len(),
            });
        }
        Ok(Self {
            width,
            height,
            bytes_per_row,
            data,
        })
    }

    /// Builds a tightly packed frame filled with a single color. Handy for
    /// demos and the test suite.
    pub fn solid(width: u32, height: u32, color: Rgb) -> Result<Self, FrameError> {
        let bytes_per_row = width as usize * BYTES_PER_PIXEL;
        let mut data = Vec::with_capacity(bytes_per_row * height as usize);
        for _ in 0..(width as u64 * height as u64) {
            data.extend_from_slice(&[color.b, color.g, color.r, 0xFF]);
        }
        Self::new(width, height, bytes_per_row, data)
    }

    /// Re-packs an `image` crate RGBA image into a BGRA frame.
    pub fn from_rgba_image(image: &RgbaImage) -> Result<Self, FrameError> {
        let width = image.width();
        let height = image.height();
        let bytes_per_row = width as usize * BYTES_PER_PIXEL;
        let mut data = Vec::with_capacity(bytes_per_row * height as usize);
        for pixel in image.pixels() {
            let [r, g, b, a] = pixel.0;
            data.extend_from_slice(&[b, g, r, a]);
        }
        Self::new(width, height, bytes_per_row, data)
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn bytes_per_row(&self) -> usize {
        self.bytes_per_row
    }

    /// Decodes the pixel at (x, y). Coordinates must be in bounds; the
    /// constructor guarantees the backing buffer covers every such pixel.
    pub fn pixel_at(&self, x: u32, y: u32) -> Rgb {
        debug_assert!(x < self.width && y < self.height);
        let offset = y as usize * self.bytes_per_row + x as usize * BYTES_PER_PIXEL;
        Rgb {
            b: self.data[offset],
            g: self.data[offset + 1],
            r: self.data[offset + 2],
        }
    }
}
