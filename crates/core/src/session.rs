//! Shared Pomodoro session types used by the timer, the server, and the CLI.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The three phases of a Pomodoro cycle.
///
/// Serialized as `work`, `short_break`, `long_break` — both in API JSON
/// and in the `session_type` database column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionType {
    Work,
    ShortBreak,
    LongBreak,
}

impl SessionType {
    pub const ALL: &'static [SessionType] =
        &[Self::Work, Self::ShortBreak, Self::LongBreak];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Work => "work",
            Self::ShortBreak => "short_break",
            Self::LongBreak => "long_break",
        }
    }

    /// Default display label for a freshly started phase.
    pub fn default_label(&self) -> &'static str {
        match self {
            Self::Work => "Work Session",
            Self::ShortBreak => "Short Break",
            Self::LongBreak => "Long Break",
        }
    }

    pub fn is_break(&self) -> bool {
        matches!(self, Self::ShortBreak | Self::LongBreak)
    }
}

impl fmt::Display for SessionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SessionType {
    type Err = crate::BeprodError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "work" => Ok(Self::Work),
            "short_break" => Ok(Self::ShortBreak),
            "long_break" => Ok(Self::LongBreak),
            other => Err(crate::BeprodError::InvalidSessionType(other.to_string())),
        }
    }
}

/// A finished (or abandoned) phase, ready to be persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompletedSession {
    #[serde(rename = "type")]
    pub session_type: SessionType,
    pub name: String,
    pub duration_seconds: u32,
    pub completed: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn session_type_roundtrips_through_str() {
        for st in SessionType::ALL {
            assert_eq!(st.as_str().parse::<SessionType>().unwrap(), *st);
        }
    }

    #[test]
    fn session_type_rejects_unknown() {
        assert!("longBreak".parse::<SessionType>().is_err());
        assert!("".parse::<SessionType>().is_err());
    }

    #[test]
    fn session_type_json_is_snake_case() {
        let json = serde_json::to_string(&SessionType::LongBreak).unwrap();
        assert_eq!(json, r#""long_break""#);
    }

    #[test]
    fn completed_session_uses_type_key() {
        let s = CompletedSession {
            session_type: SessionType::Work,
            name: "Deep work".to_string(),
            duration_seconds: 1500,
            completed: true,
        };
        let v: serde_json::Value = serde_json::to_value(&s).unwrap();
        assert_eq!(v["type"], "work");
        assert_eq!(v["duration_seconds"], 1500);
    }

    #[test]
    fn default_labels() {
        assert_eq!(SessionType::Work.default_label(), "Work Session");
        assert_eq!(SessionType::ShortBreak.default_label(), "Short Break");
        assert_eq!(SessionType::LongBreak.default_label(), "Long Break");
    }
}
