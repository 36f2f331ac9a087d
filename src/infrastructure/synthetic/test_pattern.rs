//! Animated colour bars

use std::sync::atomic::{AtomicU64, Ordering};

use crate::application::ports::FrameSource;
use crate::domain::media::{VideoFormat, VideoFrame, BYTES_PER_PIXEL};

const BARS: [[u8; 3]; 8] = [
    [255, 255, 255],
    [255, 255, 0],
    [0, 255, 255],
    [0, 255, 0],
    [255, 0, 255],
    [255, 0, 0],
    [0, 0, 255],
    [0, 0, 0],
];

/// Pixels the bars scroll per frame
const SCROLL: u64 = 2;

/// Vertical colour bars scrolling left by a few pixels each frame
pub struct TestPattern {
    format: VideoFormat,
    tick: AtomicU64,
}

impl TestPattern {
    pub fn new(format: VideoFormat) -> Self {
        Self {
            format,
            tick: AtomicU64::new(0),
        }
    }

    /// Move to the next frame
    pub fn advance(&self) {
        self.tick.fetch_add(1, Ordering::Relaxed);
    }

    /// Frames drawn so far
    pub fn ticks(&self) -> u64 {
        self.tick.load(Ordering::Relaxed)
    }
}

impl FrameSource for TestPattern {
    fn format(&self) -> VideoFormat {
        self.format
    }

    fn current_frame(&self) -> Option<VideoFrame> {
        let (width, height) = (self.format.width(), self.format.height());
        let shift = self.ticks() * SCROLL;

        let row: Vec<u8> = (0..u64::from(width))
            .flat_map(|x| {
                let bar = ((x + shift) % u64::from(width)) * BARS.len() as u64 / u64::from(width);
                BARS[bar as usize]
            })
            .collect();
        let mut pixels = Vec::with_capacity(row.len() * height as usize);
        for _ in 0..height {
            pixels.extend_from_slice(&row);
        }
        debug_assert_eq!(pixels.len(), self.format.frame_bytes());
        debug_assert_eq!(row.len(), width as usize * BYTES_PER_PIXEL);

        VideoFrame::new(width, height, pixels).ok()
    }
}
