//! Severity level definitions

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Ordered severity levels, ranked the way the wire format ranks them.
///
/// `Info` is the default level. A record is emitted only when its level is
/// at or above the logger threshold. `DPanic` logs at error severity and
/// escalates to a panic only when the logger runs in development mode;
/// `Panic` logs then panics; `Fatal` logs then exits the process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, Default)]
#[repr(i8)]
pub enum Level {
    Debug = -1,
    #[default]
    Info = 0,
    Warn = 1,
    Error = 2,
    DPanic = 3,
    Panic = 4,
    Fatal = 5,
}

impl Level {
    /// Capitalized name, used by the development encoder
    pub fn capital_str(&self) -> &'static str {
        match self {
            Level::Debug => "DEBUG",
            Level::Info => "INFO",
            Level::Warn => "WARN",
            Level::Error => "ERROR",
            Level::DPanic => "DPANIC",
            Level::Panic => "PANIC",
            Level::Fatal => "FATAL",
        }
    }

    /// Lowercase name, used by the production encoder
    pub fn lowercase_str(&self) -> &'static str {
        match self {
            Level::Debug => "debug",
            Level::Info => "info",
            Level::Warn => "warn",
            Level::Error => "error",
            Level::DPanic => "dpanic",
            Level::Panic => "panic",
            Level::Fatal => "fatal",
        }
    }

    /// Whether emitting at this level alters control flow after the write
    pub fn is_escalating(&self) -> bool {
        matches!(self, Level::DPanic | Level::Panic | Level::Fatal)
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.capital_str())
    }
}

impl FromStr for Level {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "DEBUG" => Ok(Level::Debug),
            "INFO" => Ok(Level::Info),
            "WARN" | "WARNING" => Ok(Level::Warn),
            "ERROR" => Ok(Level::Error),
            "DPANIC" => Ok(Level::DPanic),
            "PANIC" => Ok(Level::Panic),
            "FATAL" => Ok(Level::Fatal),
            _ => Err(format!("Invalid log level: '{}'", s)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_ordering() {
        assert!(Level::Debug < Level::Info);
        assert!(Level::Info < Level::Warn);
        assert!(Level::Warn < Level::Error);
        assert!(Level::Error < Level::DPanic);
        assert!(Level::DPanic < Level::Panic);
        assert!(Level::Panic < Level::Fatal);
    }

    #[test]
    fn test_level_names() {
        assert_eq!(Level::DPanic.capital_str(), "DPANIC");
        assert_eq!(Level::Warn.lowercase_str(), "warn");
        assert_eq!(Level::Info.to_string(), "INFO");
    }

    #[test]
    fn test_level_from_str() {
        assert_eq!("debug".parse::<Level>(), Ok(Level::Debug));
        assert_eq!("WARNING".parse::<Level>(), Ok(Level::Warn));
        assert_eq!("dpanic".parse::<Level>(), Ok(Level::DPanic));
        assert!("verbose".parse::<Level>().is_err());
    }

    #[test]
    fn test_default_is_info() {
        assert_eq!(Level::default(), Level::Info);
    }
}
