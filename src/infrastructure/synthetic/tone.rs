//! Sine tone PCM generator

use std::f64::consts::TAU;

use crate::domain::media::AudioFormat;

/// Peak level as a fraction of full scale
const LEVEL: f64 = 0.25;

/// Continuous sine tone, phase-continuous across chunks
pub struct ToneGenerator {
    format: AudioFormat,
    step: f64,
    phase: f64,
}

impl ToneGenerator {
    pub fn new(format: AudioFormat, frequency_hz: u32) -> Self {
        Self {
            format,
            step: TAU * f64::from(frequency_hz) / f64::from(format.sample_rate()),
            phase: 0.0,
        }
    }

    pub fn format(&self) -> AudioFormat {
        self.format
    }

    /// PCM for the next `sample_frames` sample frames, every channel identical
    pub fn next_chunk(&mut self, sample_frames: usize) -> Vec<u8> {
        let channels = usize::from(self.format.channels());
        let mut out = Vec::with_capacity(sample_frames * usize::from(self.format.block_align()));

        for _ in 0..sample_frames {
            let value = self.phase.sin() * LEVEL;
            self.phase = (self.phase + self.step) % TAU;
            for _ in 0..channels {
                if self.format.bits_per_sample() == 8 {
                    out.push((128.0 + value * 127.0).round() as u8);
                } else {
                    let sample = (value * f64::from(i16::MAX)).round() as i16;
                    out.extend_from_slice(&sample.to_le_bytes());
                }
            }
        }
        out
    }
}
