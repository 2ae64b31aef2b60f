//! Output level shared with the native message service.

use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

use super::PropertyValue;

/// Logging level understood by native components.
///
/// The discriminants are the values the native message service expects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum OutputLevel {
    Verbose = 0,
    Debug = 1,
    Info = 2,
    Warning = 3,
    Error = 4,
    Fatal = 5,
}

/// Level token that names no known level.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown output level: {0}")]
pub struct ParseLevelError(pub String);

impl OutputLevel {
    pub const ALL: [OutputLevel; 6] = [
        OutputLevel::Verbose,
        OutputLevel::Debug,
        OutputLevel::Info,
        OutputLevel::Warning,
        OutputLevel::Error,
        OutputLevel::Fatal,
    ];

    /// Native integer representation.
    pub fn as_native(self) -> i64 {
        self as i64
    }

    pub fn from_native(value: i64) -> Option<Self> {
        Self::ALL.into_iter().find(|level| level.as_native() == value)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            OutputLevel::Verbose => "VERBOSE",
            OutputLevel::Debug => "DEBUG",
            OutputLevel::Info => "INFO",
            OutputLevel::Warning => "WARNING",
            OutputLevel::Error => "ERROR",
            OutputLevel::Fatal => "FATAL",
        }
    }
}

impl Display for OutputLevel {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OutputLevel {
    type Err = ParseLevelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let token = s.trim().to_ascii_uppercase();
        match token.as_str() {
            "WARN" => Ok(OutputLevel::Warning),
            _ => Self::ALL
                .into_iter()
                .find(|level| level.as_str() == token)
                .ok_or_else(|| ParseLevelError(s.to_string())),
        }
    }
}

impl TryFrom<&PropertyValue> for OutputLevel {
    type Error = ParseLevelError;

    fn try_from(value: &PropertyValue) -> Result<Self, ParseLevelError> {
        match value {
            PropertyValue::String(token) => token.parse(),
            PropertyValue::Integer(n) => {
                Self::from_native(*n).ok_or_else(|| ParseLevelError(n.to_string()))
            }
            other => Err(ParseLevelError(other.to_string())),
        }
    }
}

impl From<OutputLevel> for PropertyValue {
    fn from(level: OutputLevel) -> Self {
        PropertyValue::String(level.as_str().to_string())
    }
}
