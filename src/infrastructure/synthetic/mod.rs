//! Synthetic stand-in for emulated hardware
//!
//! Produces a sine tone and animated colour bars so recordings can be made
//! without a running emulator.

mod test_pattern;
mod tone;

use std::sync::Arc;

pub use test_pattern::TestPattern;
pub use tone::ToneGenerator;

use crate::application::ports::{EmulatedMachine, FrameSource};

/// A machine whose sound chip plays a tone and whose screen shows a test pattern
pub struct SyntheticMachine {
    tone: ToneGenerator,
    screen: Arc<TestPattern>,
}

impl SyntheticMachine {
    pub fn new(tone: ToneGenerator, screen: Arc<TestPattern>) -> Self {
        Self { tone, screen }
    }

    /// Shared handle to the screen, for wiring into a video encoder
    pub fn screen(&self) -> Arc<TestPattern> {
        Arc::clone(&self.screen)
    }
}

impl EmulatedMachine for SyntheticMachine {
    fn fps(&self) -> u32 {
        self.screen.format().fps()
    }

    fn run_frame(&mut self) -> Vec<u8> {
        self.screen.advance();
        let bytes = self.tone.format().bytes_per_video_frame(self.fps());
        self.tone.next_chunk(bytes / usize::from(self.tone.format().block_align()))
    }
}
