//! Recording session controller
//!
//! Owns the one open output of a capture and routes audio and video writes
//! to it.
//!
//! State machine:
//!   CLOSED -> AUDIO_ONLY (open_audio_only)
//!   CLOSED -> COMBINED (open_combined)
//!   any -> CLOSED (close, failed write, drop)
//!   any -> AUDIO_ONLY | COMBINED (open_*, closing the previous output first)
//!
//! In a combined session all audio goes to the combined container's audio
//! track. Audio and video writes must alternate one to one, in either order
//! within a pair, to keep the tracks aligned. That ordering is the caller's
//! obligation and is not checked here; see [`super::capture`] for a driver
//! that honors it.

use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{debug, warn};

use crate::domain::media::ContainerKind;
use crate::domain::session::{CloseReason, MediaKind, SessionState};

use super::ports::{AudioEncoder, AudioSink, CombinedEncoder, CombinedSink, EncoderError};

/// Session errors
#[derive(Debug, Clone, Error)]
pub enum SessionError {
    #[error("Recording to {kind} is not available in this build")]
    Unsupported { kind: ContainerKind },

    #[error("Failed to open {}: {source}", .path.display())]
    OpenFailed { path: PathBuf, source: EncoderError },

    #[error("Failed to write {media}, recording stopped: {source}")]
    WriteFailed { media: MediaKind, source: EncoderError },

    #[error("Failed to finalize recording: {0}")]
    FinalizeFailed(EncoderError),
}

enum ActiveSink {
    Closed,
    AudioOnly(Box<dyn AudioSink>),
    Combined(Box<dyn CombinedSink>),
}

impl ActiveSink {
    fn state(&self) -> SessionState {
        match self {
            Self::Closed => SessionState::Closed,
            Self::AudioOnly(_) => SessionState::AudioOnly,
            Self::Combined(_) => SessionState::Combined,
        }
    }
}

/// The single recording context of a capture.
///
/// Which containers can be opened depends on the encoders it was built
/// with; a session without a combined encoder is an audio-only build.
pub struct RecordingSession {
    audio_encoder: Option<Box<dyn AudioEncoder>>,
    combined_encoder: Option<Box<dyn CombinedEncoder>>,
    active: ActiveSink,
}

impl RecordingSession {
    /// Create a closed session with no encoders
    pub fn new() -> Self {
        Self {
            audio_encoder: None,
            combined_encoder: None,
            active: ActiveSink::Closed,
        }
    }

    /// Enable audio-only recording
    pub fn with_audio_encoder(mut self, encoder: impl AudioEncoder + 'static) -> Self {
        self.audio_encoder = Some(Box::new(encoder));
        self
    }

    /// Enable combined audio+video recording
    pub fn with_combined_encoder(mut self, encoder: impl CombinedEncoder + 'static) -> Self {
        self.combined_encoder = Some(Box::new(encoder));
        self
    }

    /// Whether `kind` can be opened by this session
    pub fn supports(&self, kind: ContainerKind) -> bool {
        match kind {
            ContainerKind::Wav => self.audio_encoder.is_some(),
            ContainerKind::Avi => self.combined_encoder.is_some(),
        }
    }

    /// Which kind of output is open, if any
    pub fn state(&self) -> SessionState {
        self.active.state()
    }

    /// Check if any output is open and accepting writes
    pub fn is_open(&self) -> bool {
        !matches!(self.active, ActiveSink::Closed)
    }

    /// Finalize and release the open output.
    ///
    /// Closing a closed session succeeds without touching any encoder. If
    /// finalizing fails the session is closed anyway and the error returned.
    pub fn close(&mut self) -> Result<(), SessionError> {
        self.close_session(CloseReason::Requested)
            .map_err(SessionError::FinalizeFailed)
    }

    /// Start an audio-only recording at `path`, closing any open output first
    pub fn open_audio_only(&mut self, path: impl AsRef<Path>) -> Result<(), SessionError> {
        let path = path.as_ref();
        self.replace_previous();

        let encoder = self.audio_encoder.as_ref().ok_or(SessionError::Unsupported {
            kind: ContainerKind::Wav,
        })?;
        let sink = encoder.open(path).map_err(|source| SessionError::OpenFailed {
            path: path.to_path_buf(),
            source,
        })?;

        self.active = ActiveSink::AudioOnly(sink);
        debug!(path = %path.display(), "audio-only recording opened");
        Ok(())
    }

    /// Start a combined audio+video recording at `path`, closing any open
    /// output first
    pub fn open_combined(&mut self, path: impl AsRef<Path>) -> Result<(), SessionError> {
        let path = path.as_ref();
        self.replace_previous();

        let encoder = self
            .combined_encoder
            .as_ref()
            .ok_or(SessionError::Unsupported {
                kind: ContainerKind::Avi,
            })?;
        let sink = encoder.open(path).map_err(|source| SessionError::OpenFailed {
            path: path.to_path_buf(),
            source,
        })?;

        self.active = ActiveSink::Combined(sink);
        debug!(path = %path.display(), "combined recording opened");
        Ok(())
    }

    /// Open the session for whichever container `kind` names
    pub fn open(&mut self, kind: ContainerKind, path: impl AsRef<Path>) -> Result<(), SessionError> {
        match kind {
            ContainerKind::Wav => self.open_audio_only(path),
            ContainerKind::Avi => self.open_combined(path),
        }
    }

    /// Forward PCM to the open output.
    ///
    /// # Returns
    /// Bytes written, or 0 when the buffer is empty or nothing is open.
    /// A failed or zero-length write closes the session.
    pub fn write_audio(&mut self, samples: &[u8]) -> Result<usize, SessionError> {
        if samples.is_empty() {
            return Ok(0);
        }

        let result = match &mut self.active {
            ActiveSink::Closed => return Ok(0),
            ActiveSink::AudioOnly(sink) => sink.write_samples(samples),
            ActiveSink::Combined(sink) => sink.write_audio(samples),
        };

        self.check_write(MediaKind::Audio, result)
    }

    /// Forward the current video frame to a combined output.
    ///
    /// # Returns
    /// Bytes written for the frame, or 0 when no combined output is open.
    /// A failed or zero-length write closes the session.
    pub fn write_video(&mut self) -> Result<usize, SessionError> {
        let result = match &mut self.active {
            ActiveSink::Combined(sink) => sink.write_video_frame(),
            _ => return Ok(0),
        };

        self.check_write(MediaKind::Video, result)
    }

    fn check_write(
        &mut self,
        media: MediaKind,
        result: Result<usize, EncoderError>,
    ) -> Result<usize, SessionError> {
        let source = match result {
            Ok(0) => EncoderError::Write("encoder accepted no data".to_string()),
            Ok(written) => return Ok(written),
            Err(e) => e,
        };

        warn!(%media, error = %source, "write failed, closing recording");
        if let Err(e) = self.close_session(CloseReason::WriteFailed) {
            debug!(error = %e, "finalize after failed write also failed");
        }
        Err(SessionError::WriteFailed { media, source })
    }

    fn replace_previous(&mut self) {
        if let Err(e) = self.close_session(CloseReason::Replaced) {
            warn!(error = %e, "previous recording did not finalize cleanly");
        }
    }

    /// Single teardown path for every way a session ends
    fn close_session(&mut self, reason: CloseReason) -> Result<(), EncoderError> {
        let result = match std::mem::replace(&mut self.active, ActiveSink::Closed) {
            ActiveSink::Closed => return Ok(()),
            ActiveSink::AudioOnly(sink) => sink.finalize(),
            ActiveSink::Combined(sink) => sink.finalize(),
        };
        debug!(%reason, ok = result.is_ok(), "recording closed");
        result
    }
}

impl Default for RecordingSession {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for RecordingSession {
    fn drop(&mut self) {
        if let Err(e) = self.close_session(CloseReason::Dropped) {
            warn!(error = %e, "recording did not finalize on drop");
        }
    }
}

#[cfg(test)]
pub(crate) mod testing {
    //! Scriptable in-memory encoders that log every call.

    use std::sync::{Arc, Mutex};

    use super::*;

    #[derive(Debug, Clone, PartialEq, Eq)]
    pub enum Call {
        OpenAudio(PathBuf),
        WriteSamples(usize),
        FinalizeAudio,
        OpenCombined(PathBuf),
        WriteCombinedAudio(usize),
        WriteVideo,
        FinalizeCombined,
    }

    /// Shared call log plus failure switches
    #[derive(Clone, Default)]
    pub struct Script {
        pub calls: Arc<Mutex<Vec<Call>>>,
        pub fail_open: Arc<Mutex<bool>>,
        pub fail_write: Arc<Mutex<bool>>,
        pub zero_write: Arc<Mutex<bool>>,
        pub fail_finalize: Arc<Mutex<bool>>,
    }

    impl Script {
        pub fn calls(&self) -> Vec<Call> {
            self.calls.lock().unwrap().clone()
        }

        pub fn set(flag: &Arc<Mutex<bool>>, value: bool) {
            *flag.lock().unwrap() = value;
        }

        fn log(&self, call: Call) {
            self.calls.lock().unwrap().push(call);
        }

        fn write_result(&self, n: usize) -> Result<usize, EncoderError> {
            if *self.fail_write.lock().unwrap() {
                Err(EncoderError::Write("disk full".to_string()))
            } else if *self.zero_write.lock().unwrap() {
                Ok(0)
            } else {
                Ok(n)
            }
        }

        fn finalize_result(&self) -> Result<(), EncoderError> {
            if *self.fail_finalize.lock().unwrap() {
                Err(EncoderError::Finalize("cannot seek".to_string()))
            } else {
                Ok(())
            }
        }
    }

    pub struct FakeAudioEncoder(pub Script);
    struct FakeAudioSink(Script);

    impl AudioEncoder for FakeAudioEncoder {
        fn open(&self, path: &Path) -> Result<Box<dyn AudioSink>, EncoderError> {
            self.0.log(Call::OpenAudio(path.to_path_buf()));
            if *self.0.fail_open.lock().unwrap() {
                return Err(EncoderError::Open("permission denied".to_string()));
            }
            Ok(Box::new(FakeAudioSink(self.0.clone())))
        }
    }

    impl AudioSink for FakeAudioSink {
        fn write_samples(&mut self, samples: &[u8]) -> Result<usize, EncoderError> {
            self.0.log(Call::WriteSamples(samples.len()));
            self.0.write_result(samples.len())
        }

        fn finalize(self: Box<Self>) -> Result<(), EncoderError> {
            self.0.log(Call::FinalizeAudio);
            self.0.finalize_result()
        }
    }

    pub struct FakeCombinedEncoder(pub Script);
    struct FakeCombinedSink(Script);

    /// Bytes a fake video frame "writes"
    pub const FRAME_BYTES: usize = 4096;

    impl CombinedEncoder for FakeCombinedEncoder {
        fn open(&self, path: &Path) -> Result<Box<dyn CombinedSink>, EncoderError> {
            self.0.log(Call::OpenCombined(path.to_path_buf()));
            if *self.0.fail_open.lock().unwrap() {
                return Err(EncoderError::Open("permission denied".to_string()));
            }
            Ok(Box::new(FakeCombinedSink(self.0.clone())))
        }
    }

    impl CombinedSink for FakeCombinedSink {
        fn write_audio(&mut self, samples: &[u8]) -> Result<usize, EncoderError> {
            self.0.log(Call::WriteCombinedAudio(samples.len()));
            self.0.write_result(samples.len())
        }

        fn write_video_frame(&mut self) -> Result<usize, EncoderError> {
            self.0.log(Call::WriteVideo);
            self.0.write_result(FRAME_BYTES)
        }

        fn finalize(self: Box<Self>) -> Result<(), EncoderError> {
            self.0.log(Call::FinalizeCombined);
            self.0.finalize_result()
        }
    }

    /// A session with both capabilities sharing one script
    pub fn scripted_session() -> (RecordingSession, Script) {
        let script = Script::default();
        let session = RecordingSession::new()
            .with_audio_encoder(FakeAudioEncoder(script.clone()))
            .with_combined_encoder(FakeCombinedEncoder(script.clone()));
        (session, script)
    }
}

#[cfg(test)]
mod tests {
    use super::testing::*;
    use super::*;

    const BUF: [u8; 100] = [0x80; 100];

    #[test]
    fn new_session_is_closed() {
        let (session, script) = scripted_session();
        assert!(!session.is_open());
        assert_eq!(session.state(), SessionState::Closed);
        assert!(script.calls().is_empty());
    }

    #[test]
    fn audio_only_round_trip() {
        let (mut session, script) = scripted_session();

        session.open_audio_only("a.wav").unwrap();
        assert!(session.is_open());
        assert_eq!(session.state(), SessionState::AudioOnly);

        assert_eq!(session.write_audio(&BUF).unwrap(), 100);
        session.close().unwrap();
        assert!(!session.is_open());

        assert_eq!(
            script.calls(),
            vec![
                Call::OpenAudio(PathBuf::from("a.wav")),
                Call::WriteSamples(100),
                Call::FinalizeAudio,
            ]
        );
    }

    #[test]
    fn combined_routes_audio_into_the_combined_container() {
        let (mut session, script) = scripted_session();

        session.open_combined("a.avi").unwrap();
        assert_eq!(session.state(), SessionState::Combined);
        assert_eq!(session.write_audio(&BUF).unwrap(), 100);
        assert_eq!(session.write_video().unwrap(), FRAME_BYTES);
        session.close().unwrap();

        let calls = script.calls();
        assert_eq!(
            calls,
            vec![
                Call::OpenCombined(PathBuf::from("a.avi")),
                Call::WriteCombinedAudio(100),
                Call::WriteVideo,
                Call::FinalizeCombined,
            ]
        );
        assert!(!calls.iter().any(|c| matches!(c, Call::OpenAudio(_))));
    }

    #[test]
    fn opening_combined_finalizes_audio_only_first() {
        let (mut session, script) = scripted_session();

        session.open_audio_only("a.wav").unwrap();
        session.open_combined("a.avi").unwrap();

        assert_eq!(session.state(), SessionState::Combined);
        assert_eq!(
            script.calls(),
            vec![
                Call::OpenAudio(PathBuf::from("a.wav")),
                Call::FinalizeAudio,
                Call::OpenCombined(PathBuf::from("a.avi")),
            ]
        );

        // Only the combined sink receives audio now
        session.write_audio(&BUF).unwrap();
        assert_eq!(script.calls().last(), Some(&Call::WriteCombinedAudio(100)));
    }

    #[test]
    fn reopening_same_kind_replaces_the_output() {
        let (mut session, script) = scripted_session();

        session.open_audio_only("one.wav").unwrap();
        session.open_audio_only("two.wav").unwrap();

        assert_eq!(
            script.calls(),
            vec![
                Call::OpenAudio(PathBuf::from("one.wav")),
                Call::FinalizeAudio,
                Call::OpenAudio(PathBuf::from("two.wav")),
            ]
        );
    }

    #[test]
    fn close_when_closed_is_a_silent_success() {
        let (mut session, script) = scripted_session();
        assert!(session.close().is_ok());
        assert!(session.close().is_ok());
        assert!(script.calls().is_empty());
    }

    #[test]
    fn close_twice_finalizes_once() {
        let (mut session, script) = scripted_session();
        session.open_combined("a.avi").unwrap();
        session.close().unwrap();
        session.close().unwrap();
        let finalizes = script
            .calls()
            .iter()
            .filter(|c| **c == Call::FinalizeCombined)
            .count();
        assert_eq!(finalizes, 1);
    }

    #[test]
    fn failed_finalize_still_closes() {
        let (mut session, script) = scripted_session();
        session.open_audio_only("a.wav").unwrap();
        Script::set(&script.fail_finalize, true);

        let err = session.close().unwrap_err();
        assert!(matches!(err, SessionError::FinalizeFailed(_)));
        assert!(!session.is_open());
    }

    #[test]
    fn failed_open_leaves_session_closed() {
        let (mut session, script) = scripted_session();
        session.open_combined("first.avi").unwrap();
        Script::set(&script.fail_open, true);

        let err = session.open_audio_only("/nope/a.wav").unwrap_err();
        assert!(matches!(err, SessionError::OpenFailed { .. }));
        assert!(err.to_string().contains("/nope/a.wav"));
        assert_eq!(session.state(), SessionState::Closed);
        // The earlier session was still finalized
        assert!(script.calls().contains(&Call::FinalizeCombined));
    }

    #[test]
    fn open_without_capability_is_unsupported() {
        let script = Script::default();
        let mut session =
            RecordingSession::new().with_audio_encoder(FakeAudioEncoder(script.clone()));

        assert!(session.supports(ContainerKind::Wav));
        assert!(!session.supports(ContainerKind::Avi));

        session.open_audio_only("a.wav").unwrap();
        let err = session.open_combined("a.avi").unwrap_err();
        assert!(matches!(
            err,
            SessionError::Unsupported {
                kind: ContainerKind::Avi
            }
        ));
        // Mutual exclusion still applied before the capability check
        assert!(!session.is_open());
        assert_eq!(script.calls().last(), Some(&Call::FinalizeAudio));
    }

    #[test]
    fn empty_audio_is_ignored() {
        let (mut session, script) = scripted_session();
        session.open_audio_only("a.wav").unwrap();

        assert_eq!(session.write_audio(&[]).unwrap(), 0);
        assert_eq!(script.calls().len(), 1);
        assert!(session.is_open());
    }

    #[test]
    fn writes_while_closed_are_ignored() {
        let (mut session, script) = scripted_session();
        assert_eq!(session.write_audio(&BUF).unwrap(), 0);
        assert_eq!(session.write_video().unwrap(), 0);
        assert!(script.calls().is_empty());
    }

    #[test]
    fn video_is_ignored_in_audio_only_session() {
        let (mut session, script) = scripted_session();
        session.open_audio_only("a.wav").unwrap();

        assert_eq!(session.write_video().unwrap(), 0);
        assert!(session.is_open());
        assert!(!script.calls().contains(&Call::WriteVideo));
    }

    #[test]
    fn failed_audio_write_tears_down() {
        let (mut session, script) = scripted_session();
        session.open_audio_only("a.wav").unwrap();
        Script::set(&script.fail_write, true);

        let err = session.write_audio(&BUF).unwrap_err();
        assert!(matches!(
            err,
            SessionError::WriteFailed {
                media: MediaKind::Audio,
                ..
            }
        ));
        assert!(!session.is_open());
        assert_eq!(script.calls().last(), Some(&Call::FinalizeAudio));

        // Nothing further reaches the encoder
        Script::set(&script.fail_write, false);
        assert_eq!(session.write_audio(&BUF).unwrap(), 0);
        assert_eq!(script.calls().last(), Some(&Call::FinalizeAudio));
    }

    #[test]
    fn zero_result_counts_as_failure() {
        let (mut session, script) = scripted_session();
        session.open_combined("a.avi").unwrap();
        Script::set(&script.zero_write, true);

        assert!(session.write_audio(&BUF).is_err());
        assert!(!session.is_open());
    }

    #[test]
    fn failed_video_write_tears_down_even_if_finalize_fails() {
        let (mut session, script) = scripted_session();
        session.open_combined("a.avi").unwrap();
        Script::set(&script.fail_write, true);
        Script::set(&script.fail_finalize, true);

        let err = session.write_video().unwrap_err();
        assert!(matches!(
            err,
            SessionError::WriteFailed {
                media: MediaKind::Video,
                source: EncoderError::Write(_)
            }
        ));
        assert!(!session.is_open());
        assert!(session.close().is_ok());
    }

    #[test]
    fn can_reopen_after_failure() {
        let (mut session, script) = scripted_session();
        session.open_audio_only("a.wav").unwrap();
        Script::set(&script.fail_write, true);
        let _ = session.write_audio(&BUF);

        Script::set(&script.fail_write, false);
        session.open_audio_only("b.wav").unwrap();
        assert_eq!(session.write_audio(&BUF).unwrap(), 100);
    }

    #[test]
    fn open_dispatches_on_container() {
        let (mut session, _script) = scripted_session();
        session.open(ContainerKind::Wav, "a.wav").unwrap();
        assert_eq!(session.state(), SessionState::AudioOnly);
        session.open(ContainerKind::Avi, "a.avi").unwrap();
        assert_eq!(session.state(), SessionState::Combined);
    }

    #[test]
    fn drop_finalizes_open_output() {
        let (mut session, script) = scripted_session();
        session.open_combined("a.avi").unwrap();
        drop(session);
        assert_eq!(script.calls().last(), Some(&Call::FinalizeCombined));
    }

    #[test]
    fn interleaved_writes_stay_paired() {
        let (mut session, script) = scripted_session();
        session.open_combined("a.avi").unwrap();

        for i in 0..4 {
            // Either order within a pair is allowed
            if i % 2 == 0 {
                session.write_audio(&BUF).unwrap();
                session.write_video().unwrap();
            } else {
                session.write_video().unwrap();
                session.write_audio(&BUF).unwrap();
            }
        }
        session.close().unwrap();

        let writes: Vec<_> = script
            .calls()
            .into_iter()
            .filter(|c| matches!(c, Call::WriteCombinedAudio(_) | Call::WriteVideo))
            .collect();
        assert_eq!(writes.len(), 8);
        for pair in writes.chunks(2) {
            let video = pair.iter().filter(|c| **c == Call::WriteVideo).count();
            assert_eq!(video, 1, "pair {:?} is not one audio and one video", pair);
        }
    }

    #[test]
    fn error_display() {
        let err = SessionError::WriteFailed {
            media: MediaKind::Audio,
            source: EncoderError::Write("disk full".to_string()),
        };
        let msg = err.to_string();
        assert!(msg.contains("audio"));
        assert!(msg.contains("disk full"));

        let err = SessionError::Unsupported {
            kind: ContainerKind::Avi,
        };
        assert!(err.to_string().contains("avi"));
    }
}
