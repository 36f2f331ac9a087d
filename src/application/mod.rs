//! Application layer - Session controller, use cases and port interfaces
//!
//! Contains the recording state machine and the trait definitions
//! for encoders and the emulated machine.

pub mod capture;
pub mod ports;
pub mod session;

// Re-export use cases
pub use capture::{
    CaptureCallbacks, CaptureError, CaptureInput, CaptureOutput, CaptureUseCase, ProgressCallback,
};
pub use session::{RecordingSession, SessionError};
