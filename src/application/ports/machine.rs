//! Ports to the emulated hardware being recorded

use crate::domain::media::{VideoFormat, VideoFrame};

/// The screen as last drawn by the emulator
pub trait FrameSource: Send + Sync {
    /// Dimensions and rate of produced frames
    fn format(&self) -> VideoFormat;

    /// Copy of the current frame, or None before the first frame is drawn
    fn current_frame(&self) -> Option<VideoFrame>;
}

/// The emulator's main loop, driven one video frame at a time
pub trait EmulatedMachine: Send {
    /// Frame rate of the emulated display
    fn fps(&self) -> u32;

    /// Emulate one video frame.
    ///
    /// # Returns
    /// The PCM the sound chip produced during the frame
    fn run_frame(&mut self) -> Vec<u8>;
}
