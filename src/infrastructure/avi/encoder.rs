//! Combined encoder port implementation over [`AviWriter`]

use std::fs::File;
use std::io::BufWriter;
use std::path::Path;
use std::sync::Arc;

use tracing::debug;

use crate::application::ports::{CombinedEncoder, CombinedSink, EncoderError, FrameSource};
use crate::domain::media::AudioFormat;

use super::riff::AviWriter;

/// Creates AVI files whose video comes from a shared frame source
pub struct AviEncoder {
    audio: AudioFormat,
    frames: Arc<dyn FrameSource>,
}

impl AviEncoder {
    pub fn new(audio: AudioFormat, frames: Arc<dyn FrameSource>) -> Self {
        Self { audio, frames }
    }
}

impl CombinedEncoder for AviEncoder {
    fn open(&self, path: &Path) -> Result<Box<dyn CombinedSink>, EncoderError> {
        let video = self.frames.format();
        let file = File::create(path).map_err(|e| EncoderError::Open(e.to_string()))?;
        let writer = AviWriter::new(BufWriter::new(file), video, self.audio)
            .map_err(|e| EncoderError::Open(e.to_string()))?;

        debug!(path = %path.display(), %video, audio = %self.audio, "avi file created");
        Ok(Box::new(AviSink {
            writer,
            frames: Arc::clone(&self.frames),
            block_align: usize::from(self.audio.block_align()),
        }))
    }
}

struct AviSink {
    writer: AviWriter<BufWriter<File>>,
    frames: Arc<dyn FrameSource>,
    block_align: usize,
}

impl CombinedSink for AviSink {
    fn write_audio(&mut self, samples: &[u8]) -> Result<usize, EncoderError> {
        if samples.len() % self.block_align != 0 {
            return Err(EncoderError::Format(format!(
                "{} bytes is not a whole number of {}-byte sample frames",
                samples.len(),
                self.block_align
            )));
        }
        self.writer
            .write_audio(samples)
            .map(|_| samples.len())
            .map_err(|e| EncoderError::Write(e.to_string()))
    }

    fn write_video_frame(&mut self) -> Result<usize, EncoderError> {
        let frame = self
            .frames
            .current_frame()
            .ok_or_else(|| EncoderError::Write("no frame has been captured yet".to_string()))?;
        if !frame.matches(self.writer.video_format()) {
            return Err(EncoderError::Format(format!(
                "captured frame is {}x{}, recording is {}",
                frame.width(),
                frame.height(),
                self.writer.video_format()
            )));
        }
        self.writer
            .write_frame(&frame)
            .map_err(|e| EncoderError::Write(e.to_string()))
    }

    fn finalize(self: Box<Self>) -> Result<(), EncoderError> {
        let Self { writer, .. } = *self;
        let frames = writer.video_frames();
        writer
            .finish()
            .map_err(|e| EncoderError::Finalize(e.to_string()))?;
        debug!(frames, "avi file finalized");
        Ok(())
    }
}
