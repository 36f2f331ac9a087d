//! WAV audio-only encoder backed by hound
//!
//! The header is written when the file is created; `finalize` patches the
//! RIFF and data chunk lengths.

use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use hound::{SampleFormat, WavSpec, WavWriter};
use tracing::debug;

use crate::application::ports::{AudioEncoder, AudioSink, EncoderError};
use crate::domain::media::AudioFormat;

/// Creates WAV files for a fixed PCM layout
#[derive(Debug, Clone, Copy)]
pub struct HoundWavEncoder {
    format: AudioFormat,
}

impl HoundWavEncoder {
    pub fn new(format: AudioFormat) -> Self {
        Self { format }
    }

    fn spec(&self) -> WavSpec {
        WavSpec {
            channels: self.format.channels(),
            sample_rate: self.format.sample_rate(),
            bits_per_sample: self.format.bits_per_sample(),
            sample_format: SampleFormat::Int,
        }
    }
}

impl AudioEncoder for HoundWavEncoder {
    fn open(&self, path: &Path) -> Result<Box<dyn AudioSink>, EncoderError> {
        let writer =
            WavWriter::create(path, self.spec()).map_err(|e| EncoderError::Open(e.to_string()))?;
        debug!(path = %path.display(), format = %self.format, "wav file created");
        Ok(Box::new(HoundWavSink {
            writer,
            format: self.format,
        }))
    }
}

/// An open WAV file
pub struct HoundWavSink {
    writer: WavWriter<BufWriter<File>>,
    format: AudioFormat,
}

impl AudioSink for HoundWavSink {
    fn write_samples(&mut self, samples: &[u8]) -> Result<usize, EncoderError> {
        let block = self.format.block_align() as usize;
        if samples.len() % block != 0 {
            return Err(EncoderError::Format(format!(
                "{} bytes is not a whole number of {}-byte sample frames",
                samples.len(),
                block
            )));
        }

        let result = if self.format.bits_per_sample() == 8 {
            // WAV stores 8-bit PCM unsigned; hound takes it signed and re-biases
            samples
                .iter()
                .try_for_each(|&b| self.writer.write_sample((i16::from(b) - 128) as i8))
        } else {
            samples
                .chunks_exact(2)
                .try_for_each(|s| self.writer.write_sample(i16::from_le_bytes([s[0], s[1]])))
        };

        result
            .map(|_| samples.len())
            .map_err(|e| EncoderError::Write(e.to_string()))
    }

    fn finalize(self: Box<Self>) -> Result<(), EncoderError> {
        let Self { writer, .. } = *self;
        writer
            .finalize()
            .map_err(|e| EncoderError::Finalize(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use hound::WavReader;

    use super::*;

    #[test]
    fn writes_readable_16bit_wav() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("take.wav");
        let encoder = HoundWavEncoder::new(AudioFormat::new(22_050, 2, 16).unwrap());

        let mut sink = encoder.open(&path).unwrap();
        let pcm: Vec<u8> = [1i16, -1, 300, -300]
            .iter()
            .flat_map(|s| s.to_le_bytes())
            .collect();
        assert_eq!(sink.write_samples(&pcm).unwrap(), 8);
        sink.finalize().unwrap();

        let mut reader = WavReader::open(&path).unwrap();
        let spec = reader.spec();
        assert_eq!(spec.channels, 2);
        assert_eq!(spec.sample_rate, 22_050);
        assert_eq!(spec.bits_per_sample, 16);
        let samples: Vec<i16> = reader.samples::<i16>().map(|s| s.unwrap()).collect();
        assert_eq!(samples, vec![1, -1, 300, -300]);
    }

    #[test]
    fn writes_unsigned_8bit_bytes_unchanged() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("take.wav");
        let encoder = HoundWavEncoder::new(AudioFormat::new(8_000, 1, 8).unwrap());

        let mut sink = encoder.open(&path).unwrap();
        sink.write_samples(&[0x00, 0x80, 0xff]).unwrap();
        sink.finalize().unwrap();

        let bytes = std::fs::read(&path).unwrap();
        assert_eq!(&bytes[0..4], b"RIFF");
        assert_eq!(&bytes[8..12], b"WAVE");

        let mut reader = WavReader::open(&path).unwrap();
        assert_eq!(reader.spec().bits_per_sample, 8);
        let samples: Vec<i8> = reader.samples::<i8>().map(|s| s.unwrap()).collect();
        assert_eq!(samples, vec![-128, 0, 127]);
    }

    #[test]
    fn rejects_partial_sample_frames() {
        let dir = tempfile::tempdir().unwrap();
        let encoder = HoundWavEncoder::new(AudioFormat::default());
        let mut sink = encoder.open(&dir.path().join("take.wav")).unwrap();

        let err = sink.write_samples(&[1, 2, 3]).unwrap_err();
        assert!(matches!(err, EncoderError::Format(_)));
    }

    #[test]
    fn open_in_missing_directory_fails() {
        let dir = tempfile::tempdir().unwrap();
        let encoder = HoundWavEncoder::new(AudioFormat::default());
        let err = encoder
            .open(&dir.path().join("missing").join("take.wav"))
            .err()
            .unwrap();
        assert!(matches!(err, EncoderError::Open(_)));
    }
}
