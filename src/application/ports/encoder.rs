//! Encoder port interfaces
//!
//! A session owns at most one open sink at a time. Encoders create sinks;
//! sinks append data and are consumed by `finalize`, which writes any
//! trailing header or length fields the container needs.

use std::path::Path;

use thiserror::Error;

/// Encoder errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EncoderError {
    #[error("Failed to create output: {0}")]
    Open(String),

    #[error("Write failed: {0}")]
    Write(String),

    #[error("Failed to finalize output: {0}")]
    Finalize(String),

    #[error("Unsupported data: {0}")]
    Format(String),
}

/// Creates audio-only containers
pub trait AudioEncoder: Send {
    /// Create the output at `path` and write its initial header.
    fn open(&self, path: &Path) -> Result<Box<dyn AudioSink>, EncoderError>;
}

/// An open audio-only container
pub trait AudioSink: Send {
    /// Append raw PCM bytes.
    ///
    /// # Returns
    /// Bytes accepted. Zero is treated as a failure by the session.
    fn write_samples(&mut self, samples: &[u8]) -> Result<usize, EncoderError>;

    /// Patch headers and release the output
    fn finalize(self: Box<Self>) -> Result<(), EncoderError>;
}

/// Creates combined audio+video containers
pub trait CombinedEncoder: Send {
    /// Create the output at `path` and write its initial header.
    fn open(&self, path: &Path) -> Result<Box<dyn CombinedSink>, EncoderError>;
}

/// An open audio+video container.
///
/// Callers must alternate `write_audio` and `write_video_frame` one to one
/// (either order within a pair) or the tracks drift apart. The sink does
/// not check this.
pub trait CombinedSink: Send {
    /// Append raw PCM bytes to the audio track.
    fn write_audio(&mut self, samples: &[u8]) -> Result<usize, EncoderError>;

    /// Append the currently captured frame to the video track.
    ///
    /// # Returns
    /// Bytes written for the frame. Zero is treated as a failure.
    fn write_video_frame(&mut self) -> Result<usize, EncoderError>;

    /// Patch headers, write the index and release the output
    fn finalize(self: Box<Self>) -> Result<(), EncoderError>;
}
