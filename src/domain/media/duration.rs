//! Recording length value object

use std::fmt;
use std::str::FromStr;

use crate::domain::error::DurationParseError;

/// Default recording length (10 seconds)
pub const DEFAULT_DURATION_SECS: u64 = 10;

/// Longest accepted recording (24 hours)
pub const MAX_DURATION_SECS: u64 = 24 * 60 * 60;

/// Length of a capture, in whole seconds of emulated time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Duration {
    secs: u64,
}

impl Duration {
    /// Create a Duration from seconds
    pub const fn from_secs(secs: u64) -> Self {
        Self { secs }
    }

    /// Default recording length
    pub const fn default_duration() -> Self {
        Self::from_secs(DEFAULT_DURATION_SECS)
    }

    /// Get duration in seconds
    pub const fn as_secs(&self) -> u64 {
        self.secs
    }

    /// Number of video frames emulated in this much time
    pub const fn frames_at(&self, fps: u32) -> u64 {
        self.secs.saturating_mul(fps as u64)
    }
}

impl FromStr for Duration {
    type Err = DurationParseError;

    /// Accepts "30s", "1m" and "2m30s"
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || DurationParseError {
            input: s.to_string(),
        };
        let input = s.trim().to_lowercase();

        let (minutes, rest) = match input.split_once('m') {
            Some((m, rest)) => (Some(m), rest),
            None => (None, input.as_str()),
        };
        let seconds = match rest {
            "" => None,
            r => Some(r.strip_suffix('s').ok_or_else(err)?),
        };
        if minutes.is_none() && seconds.is_none() {
            return Err(err());
        }

        let parse = |digits: Option<&str>| -> Result<u64, DurationParseError> {
            match digits {
                None => Ok(0),
                Some(d) if !d.is_empty() && d.bytes().all(|b| b.is_ascii_digit()) => {
                    d.parse().map_err(|_| err())
                }
                Some(_) => Err(err()),
            }
        };

        let (minutes, seconds) = (parse(minutes)?, parse(seconds)?);
        let total = minutes
            .checked_mul(60)
            .and_then(|m| m.checked_add(seconds))
            .ok_or_else(err)?;
        if total == 0 || total > MAX_DURATION_SECS {
            return Err(err());
        }

        Ok(Self { secs: total })
    }
}

impl fmt::Display for Duration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (minutes, seconds) = (self.secs / 60, self.secs % 60);
        match (minutes, seconds) {
            (0, s) => write!(f, "{}s", s),
            (m, 0) => write!(f, "{}m", m),
            (m, s) => write!(f, "{}m{}s", m, s),
        }
    }
}

impl Default for Duration {
    fn default() -> Self {
        Self::default_duration()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_seconds_only() {
        let d: Duration = "30s".parse().unwrap();
        assert_eq!(d.as_secs(), 30);
    }

    #[test]
    fn parse_minutes_only() {
        let d: Duration = "2m".parse().unwrap();
        assert_eq!(d.as_secs(), 120);
    }

    #[test]
    fn parse_minutes_and_seconds() {
        let d: Duration = " 1M30S ".parse().unwrap();
        assert_eq!(d.as_secs(), 90);
    }

    #[test]
    fn parse_rejects_garbage() {
        for input in ["", "30", "abc", "30x", "m", "s", "1m30", "0s", "0m0s", "-5s", "1m2m"] {
            assert!(input.parse::<Duration>().is_err(), "accepted {:?}", input);
        }
    }

    #[test]
    fn parse_rejects_more_than_a_day() {
        assert_eq!("1440m".parse::<Duration>().unwrap().as_secs(), MAX_DURATION_SECS);
        for input in ["1440m1s", "86401s", "18446744073709551615s", "99999999999999999999m"] {
            assert!(input.parse::<Duration>().is_err(), "accepted {:?}", input);
        }
    }

    #[test]
    fn frames_at_saturates() {
        assert_eq!(Duration::from_secs(u64::MAX).frames_at(50), u64::MAX);
    }

    #[test]
    fn display_round_trips_common_values() {
        assert_eq!(Duration::from_secs(30).to_string(), "30s");
        assert_eq!(Duration::from_secs(120).to_string(), "2m");
        assert_eq!(Duration::from_secs(150).to_string(), "2m30s");
    }

    #[test]
    fn frames_at_rate() {
        assert_eq!(Duration::from_secs(2).frames_at(50), 100);
        assert_eq!(Duration::default().frames_at(60), 600);
    }
}
