//! Capture use case
//!
//! Drives an emulated machine one video frame at a time and feeds its output
//! into a recording session. Each frame produces exactly one audio write and,
//! in a combined session, exactly one video write, which keeps the muxed
//! tracks aligned.

use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use thiserror::Error;
use tracing::{debug, info};

use crate::domain::media::ContainerKind;
use crate::domain::session::SessionState;

use super::ports::EmulatedMachine;
use super::session::{RecordingSession, SessionError};

/// Progress callback type for reporting capture progress.
/// Parameters: (frames_done, frames_total)
pub type ProgressCallback = Arc<dyn Fn(u64, u64) + Send + Sync>;

/// Errors from the capture use case
#[derive(Debug, Error)]
pub enum CaptureError {
    #[error(transparent)]
    Session(#[from] SessionError),

    #[error("Recording length must be at least one frame")]
    NothingToRecord,
}

/// Input parameters for the capture use case
#[derive(Debug, Clone)]
pub struct CaptureInput {
    /// Output file
    pub path: PathBuf,
    /// Container to record into
    pub kind: ContainerKind,
    /// Number of emulated video frames to record
    pub frames: u64,
}

/// Output from the capture use case
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CaptureOutput {
    /// Emulated frames recorded
    pub frames: u64,
    /// PCM bytes written
    pub audio_bytes: u64,
    /// Video bytes written (0 for audio-only recordings)
    pub video_bytes: u64,
    /// Whether the stop flag ended the capture before `frames` was reached
    pub stopped_early: bool,
}

/// Callbacks for progress and cancellation
#[derive(Default)]
pub struct CaptureCallbacks {
    /// Called after every recorded frame
    pub on_progress: Option<ProgressCallback>,
    /// Set to stop recording after the current frame
    pub stop: Option<Arc<AtomicBool>>,
}

impl CaptureCallbacks {
    fn stop_requested(&self) -> bool {
        self.stop
            .as_ref()
            .is_some_and(|flag| flag.load(Ordering::SeqCst))
    }
}

/// Use case for recording an emulated machine into a container
pub struct CaptureUseCase;

impl CaptureUseCase {
    /// Open `input.path`, record `input.frames` frames, and close the file.
    ///
    /// On a write error the session has already been torn down by the time
    /// the error is returned.
    pub fn execute(
        session: &mut RecordingSession,
        machine: &mut dyn EmulatedMachine,
        input: CaptureInput,
        callbacks: CaptureCallbacks,
    ) -> Result<CaptureOutput, CaptureError> {
        if input.frames == 0 {
            return Err(CaptureError::NothingToRecord);
        }

        session.open(input.kind, &input.path)?;
        info!(
            path = %input.path.display(),
            kind = %input.kind,
            frames = input.frames,
            "recording started"
        );

        let mut output = CaptureOutput::default();
        let with_video = session.state() == SessionState::Combined;

        while output.frames < input.frames {
            if callbacks.stop_requested() {
                output.stopped_early = true;
                break;
            }

            let pcm = machine.run_frame();
            output.audio_bytes += session.write_audio(&pcm)? as u64;
            if with_video {
                output.video_bytes += session.write_video()? as u64;
            }
            output.frames += 1;

            if let Some(ref on_progress) = callbacks.on_progress {
                on_progress(output.frames, input.frames);
            }
        }

        session.close()?;
        debug!(?output, "recording finished");
        Ok(output)
    }
}
