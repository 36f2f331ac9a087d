//! Config command handler

use crate::application::ports::ConfigStore;
use crate::domain::config::AppConfig;
use crate::domain::error::ConfigError;
use crate::domain::media::{AudioFormat, ContainerKind, Duration, VideoFormat};

use super::args::{is_valid_config_key, ConfigAction, VALID_CONFIG_KEYS};
use super::presenter::Presenter;

/// Handle config subcommand
pub async fn handle_config_command<S: ConfigStore>(
    action: ConfigAction,
    store: &S,
    presenter: &Presenter,
) -> Result<(), ConfigError> {
    match action {
        ConfigAction::Init => handle_init(store, presenter).await,
        ConfigAction::Set { key, value } => handle_set(store, presenter, &key, &value).await,
        ConfigAction::Get { key } => handle_get(store, presenter, &key).await,
        ConfigAction::List => handle_list(store, presenter).await,
        ConfigAction::Path => {
            presenter.output(&store.path().to_string_lossy());
            Ok(())
        }
    }
}

async fn handle_init<S: ConfigStore>(store: &S, presenter: &Presenter) -> Result<(), ConfigError> {
    store.init().await?;
    presenter.success(&format!(
        "Config file created at: {}",
        store.path().display()
    ));
    Ok(())
}

async fn handle_set<S: ConfigStore>(
    store: &S,
    presenter: &Presenter,
    key: &str,
    value: &str,
) -> Result<(), ConfigError> {
    check_key(key)?;
    let mut config = store.load().await?;
    apply_value(&mut config, key, value)?;
    store.save(&config).await?;
    presenter.success(&format!("{} = {}", key, value));
    Ok(())
}

async fn handle_get<S: ConfigStore>(
    store: &S,
    presenter: &Presenter,
    key: &str,
) -> Result<(), ConfigError> {
    check_key(key)?;
    let config = store.load().await?;
    presenter.output(lookup(&config, key).as_deref().unwrap_or("(not set)"));
    Ok(())
}

async fn handle_list<S: ConfigStore>(store: &S, presenter: &Presenter) -> Result<(), ConfigError> {
    let config = store.load().await?;
    for key in VALID_CONFIG_KEYS {
        presenter.key_value(key, lookup(&config, key).as_deref().unwrap_or("(not set)"));
    }
    Ok(())
}

fn check_key(key: &str) -> Result<(), ConfigError> {
    if is_valid_config_key(key) {
        return Ok(());
    }
    Err(ConfigError::ValidationError {
        key: key.to_string(),
        message: format!("Unknown key. Valid keys: {}", VALID_CONFIG_KEYS.join(", ")),
    })
}

/// Current value of `key` as the user would type it
fn lookup(config: &AppConfig, key: &str) -> Option<String> {
    let audio = config.audio.as_ref();
    let video = config.video.as_ref();
    match key {
        "output_dir" => config.output_dir.clone(),
        "container" => config.container.clone(),
        "duration" => config.duration.clone(),
        "tone_hz" => config.tone_hz.map(|v| v.to_string()),
        "audio.sample_rate" => audio.and_then(|a| a.sample_rate).map(|v| v.to_string()),
        "audio.channels" => audio.and_then(|a| a.channels).map(|v| v.to_string()),
        "audio.bits_per_sample" => audio.and_then(|a| a.bits_per_sample).map(|v| v.to_string()),
        "video.width" => video.and_then(|v| v.width).map(|v| v.to_string()),
        "video.height" => video.and_then(|v| v.height).map(|v| v.to_string()),
        "video.fps" => video.and_then(|v| v.fps).map(|v| v.to_string()),
        _ => None,
    }
}

/// Validate `value` for `key` and store it in `config`
fn apply_value(config: &mut AppConfig, key: &str, value: &str) -> Result<(), ConfigError> {
    let invalid = |message: String| ConfigError::ValidationError {
        key: key.to_string(),
        message,
    };
    let default_audio = AudioFormat::default();
    let default_video = VideoFormat::default();

    match key {
        "output_dir" => {
            if value.trim().is_empty() {
                return Err(invalid("Value must not be empty".to_string()));
            }
            config.output_dir = Some(value.to_string());
        }
        "container" => {
            let kind: ContainerKind = value.parse().map_err(|e| invalid(format!("{}", e)))?;
            config.container = Some(kind.to_string());
        }
        "duration" => {
            let duration: Duration = value.parse().map_err(|e| invalid(format!("{}", e)))?;
            config.duration = Some(duration.to_string());
        }
        "tone_hz" => {
            let hz: u32 = parse_number(value).map_err(invalid)?;
            if !(20..=20_000).contains(&hz) {
                return Err(invalid("Value must be between 20 and 20000".to_string()));
            }
            config.tone_hz = Some(hz);
        }
        "audio.sample_rate" => {
            let rate = parse_number(value).map_err(invalid)?;
            AudioFormat::new(rate, default_audio.channels(), default_audio.bits_per_sample())
                .map_err(|e| invalid(e.to_string()))?;
            config.audio.get_or_insert_with(Default::default).sample_rate = Some(rate);
        }
        "audio.channels" => {
            let channels = parse_number(value).map_err(invalid)?;
            AudioFormat::new(default_audio.sample_rate(), channels, default_audio.bits_per_sample())
                .map_err(|e| invalid(e.to_string()))?;
            config.audio.get_or_insert_with(Default::default).channels = Some(channels);
        }
        "audio.bits_per_sample" => {
            let bits = parse_number(value).map_err(invalid)?;
            AudioFormat::new(default_audio.sample_rate(), default_audio.channels(), bits)
                .map_err(|e| invalid(e.to_string()))?;
            config.audio.get_or_insert_with(Default::default).bits_per_sample = Some(bits);
        }
        "video.width" => {
            let width = parse_number(value).map_err(invalid)?;
            VideoFormat::new(width, default_video.height(), default_video.fps())
                .map_err(|e| invalid(e.to_string()))?;
            config.video.get_or_insert_with(Default::default).width = Some(width);
        }
        "video.height" => {
            let height = parse_number(value).map_err(invalid)?;
            VideoFormat::new(default_video.width(), height, default_video.fps())
                .map_err(|e| invalid(e.to_string()))?;
            config.video.get_or_insert_with(Default::default).height = Some(height);
        }
        "video.fps" => {
            let fps = parse_number(value).map_err(invalid)?;
            VideoFormat::new(default_video.width(), default_video.height(), fps)
                .map_err(|e| invalid(e.to_string()))?;
            config.video.get_or_insert_with(Default::default).fps = Some(fps);
        }
        _ => return Err(invalid("Unknown key".to_string())),
    }
    Ok(())
}

fn parse_number<T: std::str::FromStr>(value: &str) -> Result<T, String> {
    value
        .trim()
        .parse()
        .map_err(|_| format!("Invalid number '{}'", value))
}
