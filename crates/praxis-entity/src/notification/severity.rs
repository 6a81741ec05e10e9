//! Notification severity levels.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Display severity of a notification. Informational only; carries no
/// behavioral effect.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    /// Neutral information.
    #[default]
    Info,
    /// Something the recipient should pay attention to.
    Warning,
    /// A positive outcome.
    Success,
    /// A failure the recipient should know about.
    Error,
}

impl Severity {
    /// Return the severity as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Info => "info",
            Self::Warning => "warning",
            Self::Success => "success",
            Self::Error => "error",
        }
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Severity {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "info" => Ok(Self::Info),
            "warning" => Ok(Self::Warning),
            "success" => Ok(Self::Success),
            "error" => Ok(Self::Error),
            other => Err(format!("unknown severity: '{other}'")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_info() {
        assert_eq!(Severity::default(), Severity::Info);
    }

    #[test]
    fn test_parse_roundtrip() {
        for severity in [
            Severity::Info,
            Severity::Warning,
            Severity::Success,
            Severity::Error,
        ] {
            assert_eq!(severity.as_str().parse::<Severity>().unwrap(), severity);
        }
    }
}
