//! Application configuration value object

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::domain::media::{AudioFormat, ContainerKind, Duration, VideoFormat};

/// Default test tone frequency (A4)
pub const DEFAULT_TONE_HZ: u32 = 440;

/// Audio stream configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AudioConfig {
    pub sample_rate: Option<u32>,
    pub channels: Option<u16>,
    pub bits_per_sample: Option<u16>,
}

/// Video stream configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VideoConfig {
    pub width: Option<u32>,
    pub height: Option<u32>,
    pub fps: Option<u32>,
}

/// Application configuration.
/// All fields are optional to support partial configs and merging.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfig {
    pub output_dir: Option<String>,
    pub container: Option<String>,
    pub duration: Option<String>,
    pub tone_hz: Option<u32>,
    pub audio: Option<AudioConfig>,
    pub video: Option<VideoConfig>,
}

impl AppConfig {
    /// Create config with default values
    pub fn defaults() -> Self {
        let audio = AudioFormat::default();
        let video = VideoFormat::default();
        Self {
            output_dir: Some(".".to_string()),
            container: Some(ContainerKind::default().to_string()),
            duration: Some(Duration::default_duration().to_string()),
            tone_hz: Some(DEFAULT_TONE_HZ),
            audio: Some(AudioConfig {
                sample_rate: Some(audio.sample_rate()),
                channels: Some(audio.channels()),
                bits_per_sample: Some(audio.bits_per_sample()),
            }),
            video: Some(VideoConfig {
                width: Some(video.width()),
                height: Some(video.height()),
                fps: Some(video.fps()),
            }),
        }
    }

    /// Create an empty config (all None)
    pub fn empty() -> Self {
        Self::default()
    }

    /// Merge this config with another, where other takes precedence.
    /// Only non-None values from other will override this.
    pub fn merge(self, other: Self) -> Self {
        Self {
            output_dir: other.output_dir.or(self.output_dir),
            container: other.container.or(self.container),
            duration: other.duration.or(self.duration),
            tone_hz: other.tone_hz.or(self.tone_hz),
            audio: match (self.audio, other.audio) {
                (Some(b), Some(o)) => Some(AudioConfig {
                    sample_rate: o.sample_rate.or(b.sample_rate),
                    channels: o.channels.or(b.channels),
                    bits_per_sample: o.bits_per_sample.or(b.bits_per_sample),
                }),
                (b, o) => o.or(b),
            },
            video: match (self.video, other.video) {
                (Some(b), Some(o)) => Some(VideoConfig {
                    width: o.width.or(b.width),
                    height: o.height.or(b.height),
                    fps: o.fps.or(b.fps),
                }),
                (b, o) => o.or(b),
            },
        }
    }

    /// Output directory, or the working directory if not set
    pub fn output_dir_or_default(&self) -> PathBuf {
        self.output_dir
            .as_ref()
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("."))
    }

    /// Get container as parsed ContainerKind, or default if not set/invalid
    pub fn container_or_default(&self) -> ContainerKind {
        self.container
            .as_ref()
            .and_then(|s| s.parse().ok())
            .unwrap_or_default()
    }

    /// Get duration as parsed Duration, or default if not set/invalid
    pub fn duration_or_default(&self) -> Duration {
        self.duration
            .as_ref()
            .and_then(|s| s.parse().ok())
            .unwrap_or_else(Duration::default_duration)
    }

    /// Get tone frequency, or 440 Hz if not set
    pub fn tone_hz_or_default(&self) -> u32 {
        self.tone_hz.unwrap_or(DEFAULT_TONE_HZ)
    }

    /// Audio format from the configured fields; unset fields fall back
    /// to the default format, an invalid combination to the default as a whole
    pub fn audio_format_or_default(&self) -> AudioFormat {
        let default = AudioFormat::default();
        let Some(audio) = self.audio.as_ref() else {
            return default;
        };
        AudioFormat::new(
            audio.sample_rate.unwrap_or(default.sample_rate()),
            audio.channels.unwrap_or(default.channels()),
            audio.bits_per_sample.unwrap_or(default.bits_per_sample()),
        )
        .unwrap_or(default)
    }

    /// Video format from the configured fields, same fallback rules as audio
    pub fn video_format_or_default(&self) -> VideoFormat {
        let default = VideoFormat::default();
        let Some(video) = self.video.as_ref() else {
            return default;
        };
        VideoFormat::new(
            video.width.unwrap_or(default.width()),
            video.height.unwrap_or(default.height()),
            video.fps.unwrap_or(default.fps()),
        )
        .unwrap_or(default)
    }
}
