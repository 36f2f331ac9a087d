//! Video format and captured frame value objects

use std::fmt;

use crate::domain::error::MediaFormatError;

/// Captured frames are packed RGB, one byte per channel
pub const BYTES_PER_PIXEL: usize = 3;

const MAX_FPS: u32 = 120;

/// Largest accepted width or height
pub const MAX_DIMENSION: u32 = 4096;

/// Dimensions and rate of the captured screen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct VideoFormat {
    width: u32,
    height: u32,
    fps: u32,
}

impl VideoFormat {
    /// Create a validated video format
    pub fn new(width: u32, height: u32, fps: u32) -> Result<Self, MediaFormatError> {
        if width == 0 || height == 0 || width > MAX_DIMENSION || height > MAX_DIMENSION {
            return Err(MediaFormatError::FrameSize { width, height });
        }
        if fps == 0 || fps > MAX_FPS {
            return Err(MediaFormatError::FrameRate(fps));
        }
        Ok(Self { width, height, fps })
    }

    pub const fn width(&self) -> u32 {
        self.width
    }

    pub const fn height(&self) -> u32 {
        self.height
    }

    pub const fn fps(&self) -> u32 {
        self.fps
    }

    /// Size of a tightly packed RGB frame
    pub const fn frame_bytes(&self) -> usize {
        self.width as usize * self.height as usize * BYTES_PER_PIXEL
    }
}

impl Default for VideoFormat {
    /// Visible PAL screen of an 8-bit home computer
    fn default() -> Self {
        Self {
            width: 336,
            height: 240,
            fps: 50,
        }
    }
}

impl fmt::Display for VideoFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{} @ {} fps", self.width, self.height, self.fps)
    }
}

/// One captured screen: packed RGB rows, top row first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VideoFrame {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
}

impl VideoFrame {
    /// Wrap a pixel buffer, checking it matches the dimensions
    pub fn new(width: u32, height: u32, pixels: Vec<u8>) -> Result<Self, MediaFormatError> {
        if width == 0 || height == 0 {
            return Err(MediaFormatError::FrameSize { width, height });
        }
        let expected = width as usize * height as usize * BYTES_PER_PIXEL;
        if pixels.len() != expected {
            return Err(MediaFormatError::FrameLength {
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

    /// A frame of the given size filled with one colour
    pub fn solid(width: u32, height: u32, rgb: [u8; 3]) -> Result<Self, MediaFormatError> {
        let pixels = rgb
            .iter()
            .copied()
            .cycle()
            .take(width as usize * height as usize * BYTES_PER_PIXEL)
            .collect();
        Self::new(width, height, pixels)
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    /// Pixels of row `y`, counted from the top
    pub fn row(&self, y: u32) -> &[u8] {
        let stride = self.width as usize * BYTES_PER_PIXEL;
        let start = y as usize * stride;
        &self.pixels[start..start + stride]
    }

    /// Whether the frame has the dimensions of `format`
    pub fn matches(&self, format: &VideoFormat) -> bool {
        self.width == format.width() && self.height == format.height()
    }
}
