use std::fmt;
use std::str::FromStr;

/// Severity of a log statement.
///
/// The ordinals follow the numeric levels of the classic `logging`
/// convention (`DEBUG = 10` .. `CRITICAL = 50`) so that records produced
/// here line up with other services that log numeric severities.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Level {
    Debug,
    Info,
    Warning,
    Error,
    Critical,
}

impl Level {
    pub const ALL: [Level; 5] = [
        Level::Debug,
        Level::Info,
        Level::Warning,
        Level::Error,
        Level::Critical,
    ];

    /// Upper-case name written into the level field of a record.
    pub fn name(&self) -> &'static str {
        match self {
            Level::Debug => "DEBUG",
            Level::Info => "INFO",
            Level::Warning => "WARNING",
            Level::Error => "ERROR",
            Level::Critical => "CRITICAL",
        }
    }

    pub fn ordinal(&self) -> u8 {
        match self {
            Level::Debug => 10,
            Level::Info => 20,
            Level::Warning => 30,
            Level::Error => 40,
            Level::Critical => 50,
        }
    }

    /// Look up a level by its exact ordinal.
    pub fn from_ordinal(ordinal: u8) -> Option<Level> {
        Level::ALL.into_iter().find(|l| l.ordinal() == ordinal)
    }

    /// Closest `tracing` level. `tracing` has no critical level, so
    /// `Critical` shares `ERROR`.
    pub fn as_tracing(&self) -> tracing::Level {
        match self {
            Level::Debug => tracing::Level::DEBUG,
            Level::Info => tracing::Level::INFO,
            Level::Warning => tracing::Level::WARN,
            Level::Error | Level::Critical => tracing::Level::ERROR,
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown log level: {0:?}")]
pub struct ParseLevelError(pub String);

impl FromStr for Level {
    type Err = ParseLevelError;

    /// Accepts names case-insensitively (`warn` is an alias of `warning`,
    /// `fatal` of `critical`) as well as numeric ordinals.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if let Ok(ordinal) = trimmed.parse::<u8>() {
            return Level::from_ordinal(ordinal).ok_or_else(|| ParseLevelError(s.to_string()));
        }
        match trimmed.to_ascii_lowercase().as_str() {
            "debug" => Ok(Level::Debug),
            "info" => Ok(Level::Info),
            "warning" | "warn" => Ok(Level::Warning),
            "error" => Ok(Level::Error),
            "critical" | "fatal" => Ok(Level::Critical),
            _ => Err(ParseLevelError(s.to_string())),
        }
    }
}

impl TryFrom<u8> for Level {
    type Error = ParseLevelError;

    fn try_from(ordinal: u8) -> Result<Self, ParseLevelError> {
        Level::from_ordinal(ordinal).ok_or_else(|| ParseLevelError(ordinal.to_string()))
    }
}
