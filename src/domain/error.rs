//! Domain error types

use thiserror::Error;

/// Error when parsing a duration string
#[derive(Debug, Clone, Error)]
#[error("Invalid duration format: \"{input}\". Expected format: <number>s, <number>m, or <number>m<number>s (e.g., 30s, 1m, 2m30s), at most 24 hours")]
pub struct DurationParseError {
    pub input: String,
}

/// Error when an unknown container name or file extension is given
#[derive(Debug, Clone, Error)]
#[error("Invalid container: \"{input}\". Valid containers are: wav, avi")]
pub struct InvalidContainerError {
    pub input: String,
}

/// Error when audio/video parameters are out of range
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MediaFormatError {
    #[error("Unsupported sample rate: {0} Hz (expected 1..=384000)")]
    SampleRate(u32),

    #[error("Unsupported channel count: {0} (expected 1 or 2)")]
    Channels(u16),

    #[error("Unsupported sample size: {0} bits (expected 8 or 16)")]
    BitsPerSample(u16),

    #[error("Invalid frame size: {width}x{height}")]
    FrameSize { width: u32, height: u32 },

    #[error("Unsupported frame rate: {0} fps (expected 1..=120)")]
    FrameRate(u32),

    #[error("Frame buffer holds {actual} bytes, expected {expected}")]
    FrameLength { expected: usize, actual: usize },
}

/// Error when configuration fails
#[derive(Debug, Clone, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadError(String),

    #[error("Failed to parse config file: {0}")]
    ParseError(String),

    #[error("Failed to write config file: {0}")]
    WriteError(String),

    #[error("Invalid config value for '{key}': {message}")]
    ValidationError { key: String, message: String },

    #[error("Config file already exists at: {0}")]
    AlreadyExists(String),
}
