//! PCM audio format value object

use std::fmt;

use crate::domain::error::MediaFormatError;

/// Highest sample rate accepted for a recording
const MAX_SAMPLE_RATE: u32 = 384_000;

/// Layout of the raw PCM stream produced by the emulated sound chip.
///
/// 8-bit samples are unsigned, 16-bit samples are signed little-endian,
/// matching the byte layout WAV and AVI store without conversion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AudioFormat {
    sample_rate: u32,
    channels: u16,
    bits_per_sample: u16,
}

impl AudioFormat {
    /// Create a validated audio format
    pub fn new(sample_rate: u32, channels: u16, bits_per_sample: u16) -> Result<Self, MediaFormatError> {
        if sample_rate == 0 || sample_rate > MAX_SAMPLE_RATE {
            return Err(MediaFormatError::SampleRate(sample_rate));
        }
        if !(1..=2).contains(&channels) {
            return Err(MediaFormatError::Channels(channels));
        }
        if bits_per_sample != 8 && bits_per_sample != 16 {
            return Err(MediaFormatError::BitsPerSample(bits_per_sample));
        }
        Ok(Self {
            sample_rate,
            channels,
            bits_per_sample,
        })
    }

    pub const fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    pub const fn channels(&self) -> u16 {
        self.channels
    }

    pub const fn bits_per_sample(&self) -> u16 {
        self.bits_per_sample
    }

    /// Bytes in one sample frame (all channels)
    pub const fn block_align(&self) -> u16 {
        self.channels * (self.bits_per_sample / 8)
    }

    /// Bytes per second of audio
    pub const fn byte_rate(&self) -> u32 {
        self.sample_rate * self.block_align() as u32
    }

    /// PCM bytes produced during one video frame at `fps`.
    ///
    /// Rounded down to a whole sample block so every chunk can be
    /// appended on its own.
    pub const fn bytes_per_video_frame(&self, fps: u32) -> usize {
        let samples = self.sample_rate / fps;
        samples as usize * self.block_align() as usize
    }
}

impl Default for AudioFormat {
    /// 44.1 kHz mono 16-bit
    fn default() -> Self {
        Self {
            sample_rate: 44_100,
            channels: 1,
            bits_per_sample: 16,
        }
    }
}

impl fmt::Display for AudioFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let layout = if self.channels == 1 { "mono" } else { "stereo" };
        write!(f, "{} Hz {} {}-bit", self.sample_rate, layout, self.bits_per_sample)
    }
}
