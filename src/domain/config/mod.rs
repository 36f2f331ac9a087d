//! Application configuration

mod app_config;

pub use app_config::{AppConfig, AudioConfig, VideoConfig, DEFAULT_TONE_HZ};
