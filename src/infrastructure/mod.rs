//! Infrastructure layer - Adapter implementations
//!
//! Contains concrete encoders, the synthetic machine, and the config store.
//! Which encoders exist depends on the `wav` and `avi` Cargo features.

#[cfg(feature = "avi")]
pub mod avi;
pub mod config;
pub mod synthetic;
#[cfg(feature = "wav")]
pub mod wav;

use std::sync::Arc;

// Re-export adapters
#[cfg(feature = "avi")]
pub use avi::AviEncoder;
pub use config::XdgConfigStore;
pub use synthetic::{SyntheticMachine, TestPattern, ToneGenerator};
#[cfg(feature = "wav")]
pub use wav::HoundWavEncoder;

use crate::application::ports::FrameSource;
use crate::application::RecordingSession;
use crate::domain::media::AudioFormat;

/// Build a session with every encoder compiled into this build
#[cfg_attr(not(all(feature = "wav", feature = "avi")), allow(unused_variables))]
pub fn create_session(audio: AudioFormat, frames: Arc<dyn FrameSource>) -> RecordingSession {
    #[allow(unused_mut)]
    let mut session = RecordingSession::new();
    #[cfg(feature = "wav")]
    {
        session = session.with_audio_encoder(HoundWavEncoder::new(audio));
    }
    #[cfg(feature = "avi")]
    {
        session = session.with_combined_encoder(AviEncoder::new(audio, frames));
    }
    session
}
