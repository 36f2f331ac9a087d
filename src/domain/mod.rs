//! Domain layer - Core recording concepts
//!
//! Contains value objects, the session state vocabulary, and domain errors.
//! This layer has no dependencies on external systems.

pub mod config;
pub mod error;
pub mod media;
pub mod session;

// Re-export common types
pub use config::AppConfig;
pub use error::*;
pub use media::{AudioFormat, ContainerKind, Duration, VideoFormat, VideoFrame};
pub use session::{CloseReason, MediaKind, SessionState};
