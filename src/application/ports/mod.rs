//! Port interfaces (traits) for external systems
//!
//! These traits define the boundaries between the application
//! and infrastructure layers.

pub mod config;
pub mod encoder;
pub mod machine;

// Re-export common types
pub use config::ConfigStore;
pub use encoder::{AudioEncoder, AudioSink, CombinedEncoder, CombinedSink, EncoderError};
pub use machine::{EmulatedMachine, FrameSource};
