//! Output container kinds

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use crate::domain::error::InvalidContainerError;

/// Container a session writes into
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ContainerKind {
    /// Audio-only PCM container
    Wav,
    /// Combined audio+video container
    #[default]
    Avi,
}

impl ContainerKind {
    /// Get the string representation
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Wav => "wav",
            Self::Avi => "avi",
        }
    }

    /// Get the file extension
    pub const fn extension(&self) -> &'static str {
        self.as_str()
    }

    /// Whether the container carries a video track
    pub const fn has_video(&self) -> bool {
        matches!(self, Self::Avi)
    }

    /// Guess the container from a file extension, case-insensitively
    pub fn from_path(path: &Path) -> Option<Self> {
        path.extension()
            .and_then(|ext| ext.to_str())
            .and_then(|ext| ext.parse().ok())
    }
}

impl FromStr for ContainerKind {
    type Err = InvalidContainerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "wav" => Ok(Self::Wav),
            "avi" => Ok(Self::Avi),
            _ => Err(InvalidContainerError {
                input: s.to_string(),
            }),
        }
    }
}

impl fmt::Display for ContainerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_is_case_insensitive() {
        assert_eq!("WAV".parse::<ContainerKind>().unwrap(), ContainerKind::Wav);
        assert_eq!(" avi ".parse::<ContainerKind>().unwrap(), ContainerKind::Avi);
        assert!("mp4".parse::<ContainerKind>().is_err());
    }

    #[test]
    fn from_path_uses_extension() {
        assert_eq!(
            ContainerKind::from_path(Path::new("/tmp/take1.wav")),
            Some(ContainerKind::Wav)
        );
        assert_eq!(
            ContainerKind::from_path(Path::new("take1.AVI")),
            Some(ContainerKind::Avi)
        );
        assert_eq!(ContainerKind::from_path(Path::new("take1")), None);
        assert_eq!(ContainerKind::from_path(Path::new("take1.ogg")), None);
    }

    #[test]
    fn only_avi_has_video() {
        assert!(ContainerKind::Avi.has_video());
        assert!(!ContainerKind::Wav.has_video());
    }
}
