// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Au-Zone Technologies. All Rights Reserved.

use core::fmt;
use ::image::{
    codecs::png::PngEncoder,
    error::{ParameterError, ParameterErrorKind},
    ExtendedColorType, ImageEncoder, ImageError,
};

/// GRAY8 pixel format (single 8-bit luminance channel), the only format the
/// Neoden sensors produce.
pub const GRAY8: &str = "GRAY8";

/// Largest frame accepted for capture, in pixels.
///
/// The Neoden sensors are well below this; the bound keeps a malformed
/// request from allocating an arbitrary amount of memory.
pub const MAX_FRAME_PIXELS: usize = 1 << 26;

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum FrameError {
    #[error("Invalid frame size {width}x{height}")]
    InvalidSize { width: i32, height: i32 },
    #[error("Frame buffer holds {actual} bytes but {width}x{height} needs {expected}")]
    LengthMismatch {
        width: u32,
        height: u32,
        expected: usize,
        actual: usize,
    },
}

/// Raw GRAY8 frame as delivered by `img_readAsy`.
///
/// Pixels are stored row-major with no padding, so the row stride equals
/// the width and the buffer length is always `width * height`.
///
/// # Example
///
/// ```
/// use neoden_camera::image::Frame;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let frame = Frame::new(640, 480)?;
/// assert_eq!(frame.size(), 640 * 480);
/// let png = frame.encode_png()?;
/// assert_eq!(&png[1..4], b"PNG");
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
}

const fn frame_size(width: u32, height: u32) -> Option<usize> {
    (width as usize).checked_mul(height as usize)
}

/// Pixel count of a `width` x `height` frame, `None` when either side is
/// zero or the frame exceeds [`MAX_FRAME_PIXELS`].
fn valid_frame_size(width: u32, height: u32) -> Option<usize> {
    match frame_size(width, height) {
        Some(len) if width > 0 && height > 0 && len <= MAX_FRAME_PIXELS => Some(len),
        _ => None,
    }
}

impl Frame {
    /// Allocates a zeroed frame of `width` x `height` pixels.
    ///
    /// Dimensions come straight from request parameters, so they are taken
    /// as signed integers and rejected when either is not positive or the
    /// frame would exceed [`MAX_FRAME_PIXELS`].
    pub fn new(width: i32, height: i32) -> Result<Self, FrameError> {
        let invalid = FrameError::InvalidSize { width, height };
        let (w, h) = match (u32::try_from(width), u32::try_from(height)) {
            (Ok(w), Ok(h)) => (w, h),
            _ => return Err(invalid),
        };
        let len = valid_frame_size(w, h).ok_or(invalid)?;
        Ok(Self {
            width: w,
            height: h,
            pixels: vec![0; len],
        })
    }

    /// Wraps an existing GRAY8 buffer.
    ///
    /// The dimensions obey the same limits as [`Frame::new`] and the buffer
    /// must hold exactly `width * height` bytes.
    pub fn from_pixels(width: u32, height: u32, pixels: Vec<u8>) -> Result<Self, FrameError> {
        let expected = valid_frame_size(width, height).ok_or(FrameError::InvalidSize {
            width: i32::try_from(width).unwrap_or(i32::MAX),
            height: i32::try_from(height).unwrap_or(i32::MAX),
        })?;
        if pixels.len() != expected {
            return Err(FrameError::LengthMismatch {
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

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn size(&self) -> usize {
        self.pixels.len()
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.pixels
    }

    pub fn as_slice_mut(&mut self) -> &mut [u8] {
        &mut self.pixels
    }

    pub fn into_pixels(self) -> Vec<u8> {
        self.pixels
    }

    /// Encodes the frame as an 8-bit grayscale PNG.
    pub fn encode_png(&self) -> Result<Vec<u8>, ImageError> {
        encode_png(&self.pixels, self.width, self.height)
    }
}

impl fmt::Display for Frame {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}x{} {}", self.width, self.height, GRAY8)
    }
}

/// Encodes a raw GRAY8 buffer to PNG.
///
/// # Arguments
///
/// * `pix` - Raw pixel data, one byte per pixel, row-major
/// * `width` - Image width in pixels
/// * `height` - Image height in pixels
///
/// # Errors
///
/// Returns an error if the buffer length does not match the dimensions or
/// the PNG encoder fails.
pub fn encode_png(pix: &[u8], width: u32, height: u32) -> Result<Vec<u8>, ImageError> {
    // the encoder panics on a short buffer instead of returning an error
    if frame_size(width, height) != Some(pix.len()) {
        return Err(ImageError::Parameter(ParameterError::from_kind(
            ParameterErrorKind::DimensionMismatch,
        )));
    }
    let mut png = Vec::with_capacity(pix.len() / 2 + 1024);
    PngEncoder::new(&mut png).write_image(pix, width, height, ExtendedColorType::L8)?;
    Ok(png)
}
