//! CLI argument definitions using Clap

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

use crate::domain::media::{AudioFormat, ContainerKind, Duration, VideoFormat};

/// media-capture - record emulated machine output to WAV or AVI
#[derive(Parser, Debug)]
#[command(name = "media-capture")]
#[command(version)]
#[command(about = "Record emulated machine audio and video to WAV or AVI files")]
#[command(long_about = None)]
pub struct Cli {
    /// Show debug logging on stderr (RUST_LOG overrides)
    #[arg(short = 'v', long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Record a test tone and test pattern
    Record(RecordArgs),
    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Arguments of the record subcommand
#[derive(Args, Debug, Default)]
pub struct RecordArgs {
    /// Output file; defaults to a timestamped name in the output directory
    #[arg(value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Recording length (e.g., 10s, 1m, 2m30s)
    #[arg(short = 'd', long, value_name = "TIME")]
    pub duration: Option<String>,

    /// Container to record into (otherwise taken from the file extension)
    #[arg(short = 'c', long, value_name = "KIND")]
    pub container: Option<ContainerArg>,

    /// Record audio only, same as --container wav
    #[arg(short = 'a', long, conflicts_with = "container")]
    pub audio_only: bool,

    /// Test tone frequency in Hz
    #[arg(long, value_name = "HZ")]
    pub tone_hz: Option<u32>,
}

/// Config action subcommands
#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Create config file with defaults
    Init,
    /// Set a config value
    Set {
        /// Config key
        key: String,
        /// Config value
        value: String,
    },
    /// Get a config value
    Get {
        /// Config key
        key: String,
    },
    /// List all config values
    List,
    /// Show config file path
    Path,
}

/// Container argument for clap ValueEnum
#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum ContainerArg {
    Wav,
    Avi,
}

impl From<ContainerArg> for ContainerKind {
    fn from(arg: ContainerArg) -> Self {
        match arg {
            ContainerArg::Wav => ContainerKind::Wav,
            ContainerArg::Avi => ContainerKind::Avi,
        }
    }
}

/// Resolved record options
#[derive(Debug, Clone)]
pub struct RecordOptions {
    pub path: PathBuf,
    pub kind: ContainerKind,
    pub duration: Duration,
    pub audio: AudioFormat,
    pub video: VideoFormat,
    pub tone_hz: u32,
}

/// Valid config keys
pub const VALID_CONFIG_KEYS: &[&str] = &[
    "output_dir",
    "container",
    "duration",
    "tone_hz",
    "audio.sample_rate",
    "audio.channels",
    "audio.bits_per_sample",
    "video.width",
    "video.height",
    "video.fps",
];

/// Check if a config key is valid
pub fn is_valid_config_key(key: &str) -> bool {
    VALID_CONFIG_KEYS.contains(&key)
}
