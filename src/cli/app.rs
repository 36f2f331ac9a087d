//! Record command runner

use std::env;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

use tracing::{debug, warn};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

use crate::application::ports::{ConfigStore, EmulatedMachine, FrameSource};
use crate::application::{CaptureCallbacks, CaptureInput, CaptureUseCase};
use crate::domain::config::AppConfig;
use crate::domain::error::DurationParseError;
use crate::domain::media::{ContainerKind, Duration};
use crate::infrastructure::{
    create_session, SyntheticMachine, TestPattern, ToneGenerator, XdgConfigStore,
};

use super::args::{RecordArgs, RecordOptions};
use super::presenter::{format_size, Presenter};
use super::signals::ShutdownSignal;

/// Exit codes
pub const EXIT_SUCCESS: u8 = 0;
pub const EXIT_ERROR: u8 = 1;
pub const EXIT_USAGE_ERROR: u8 = 2;

/// Environment variable overriding `output_dir`
pub const OUTPUT_DIR_ENV: &str = "MEDIA_CAPTURE_OUTPUT_DIR";

/// Install the stderr log subscriber. `RUST_LOG` wins over `verbose`.
pub fn init_tracing(verbose: bool) {
    let default_level = if verbose {
        "media_capture=debug"
    } else {
        "media_capture=warn"
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    // A second init (e.g. from tests) is harmless
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .try_init();
}

/// Config values given on the record command line
pub fn record_config(args: &RecordArgs) -> AppConfig {
    AppConfig {
        duration: args.duration.clone(),
        tone_hz: args.tone_hz,
        ..Default::default()
    }
}

/// Load and merge configuration from file, env, and CLI
pub async fn load_merged_config(cli_config: AppConfig) -> AppConfig {
    let store = XdgConfigStore::new();
    let file_config = match store.load().await {
        Ok(config) => config,
        Err(e) => {
            warn!(error = %e, "ignoring unreadable config file");
            AppConfig::empty()
        }
    };

    let env_config = AppConfig {
        output_dir: env::var(OUTPUT_DIR_ENV).ok().filter(|s| !s.is_empty()),
        ..Default::default()
    };

    // Merge: defaults < file < env < cli
    AppConfig::defaults()
        .merge(file_config)
        .merge(env_config)
        .merge(cli_config)
}

/// Turn command line arguments and merged config into concrete record options.
///
/// The container comes from `--audio-only`, then `--container`, then the
/// output file's extension, then the config.
pub fn resolve_record_options(
    args: &RecordArgs,
    config: &AppConfig,
) -> Result<RecordOptions, DurationParseError> {
    let duration = match config.duration.as_deref() {
        Some(s) => s.parse::<Duration>()?,
        None => Duration::default_duration(),
    };

    let kind = if args.audio_only {
        ContainerKind::Wav
    } else if let Some(arg) = args.container {
        arg.into()
    } else {
        args.output
            .as_deref()
            .and_then(ContainerKind::from_path)
            .unwrap_or_else(|| config.container_or_default())
    };

    let path = match args.output {
        Some(ref path) => path.clone(),
        None => default_output_path(&config.output_dir_or_default(), kind),
    };

    Ok(RecordOptions {
        path,
        kind,
        duration,
        audio: config.audio_format_or_default(),
        video: config.video_format_or_default(),
        tone_hz: config.tone_hz_or_default(),
    })
}

fn default_output_path(dir: &Path, kind: ContainerKind) -> PathBuf {
    let stamp = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or_default();
    dir.join(format!("capture-{}.{}", stamp, kind.extension()))
}

/// Record the synthetic machine into `options.path`
pub async fn run_record(options: RecordOptions) -> ExitCode {
    let mut presenter = Presenter::new();

    // Ctrl-C finalizes the file instead of killing the process
    let shutdown = ShutdownSignal::new();
    shutdown.setup();

    let screen = Arc::new(TestPattern::new(options.video));
    let frames: Arc<dyn FrameSource> = screen.clone();
    let tone = ToneGenerator::new(options.audio, options.tone_hz);
    let mut machine = SyntheticMachine::new(tone, screen);
    let mut session = create_session(options.audio, frames);

    if !session.supports(options.kind) {
        presenter.error(&format!(
            "{} recording is not available in this build",
            options.kind
        ));
        return ExitCode::from(EXIT_ERROR);
    }

    let input = CaptureInput {
        path: options.path.clone(),
        kind: options.kind,
        frames: options.duration.frames_at(machine.fps()),
    };
    debug!(?options, frames = input.frames, "resolved record options");

    presenter.start_spinner(&format!(
        "Recording {} to {}...",
        options.duration,
        options.path.display()
    ));
    let spinner = presenter.spinner_handle();
    let callbacks = CaptureCallbacks {
        on_progress: Some(Arc::new(move |done, total| {
            if let Some(ref spinner) = spinner {
                spinner.set_message(Presenter::format_progress(done, total));
            }
        })),
        stop: Some(shutdown.flag()),
    };

    let result = tokio::task::spawn_blocking(move || {
        CaptureUseCase::execute(&mut session, &mut machine, input, callbacks)
    })
    .await;

    match result {
        Ok(Ok(output)) => {
            let size = tokio::fs::metadata(&options.path)
                .await
                .map(|m| format_size(m.len()))
                .unwrap_or_else(|_| "unknown size".to_string());
            presenter.spinner_success(&format!(
                "Recorded {} frames ({})",
                output.frames, size
            ));
            if output.stopped_early {
                presenter.warn("Recording interrupted, file was finalized early");
            }
            presenter.output(&options.path.to_string_lossy());
            ExitCode::from(EXIT_SUCCESS)
        }
        Ok(Err(e)) => {
            presenter.spinner_fail("Recording failed");
            presenter.error(&e.to_string());
            ExitCode::from(EXIT_ERROR)
        }
        Err(e) => {
            presenter.spinner_fail("Recording failed");
            presenter.error(&format!("Capture task panicked: {}", e));
            ExitCode::from(EXIT_ERROR)
        }
    }
}
