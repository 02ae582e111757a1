//! Importance level definitions

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The seven importance levels, in ascending severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[derive(Default)]
pub enum Importance {
    Debug = 0,
    Trace = 1,
    Where = 2,
    #[default]
    Info = 3,
    Warn = 4,
    Error = 5,
    Fatal = 6,
}

/// Number of importance levels; facilities carry one stream per level.
pub const IMPORTANCE_COUNT: usize = 7;

impl Importance {
    /// All levels in ascending severity order.
    pub const ALL: [Importance; IMPORTANCE_COUNT] = [
        Importance::Debug,
        Importance::Trace,
        Importance::Where,
        Importance::Info,
        Importance::Warn,
        Importance::Error,
        Importance::Fatal,
    ];

    pub fn to_str(&self) -> &'static str {
        match self {
            Importance::Debug => "DEBUG",
            Importance::Trace => "TRACE",
            Importance::Where => "WHERE",
            Importance::Info => "INFO",
            Importance::Warn => "WARN",
            Importance::Error => "ERROR",
            Importance::Fatal => "FATAL",
        }
    }

    /// The canonical name left-justified in a five-character field, as it
    /// appears inside the default prefix brackets.
    pub fn padded(&self) -> String {
        format!("{:<5}", self.to_str())
    }

    /// Table index of this level (`Debug` is 0, `Fatal` is 6).
    pub fn index(&self) -> usize {
        *self as usize
    }
}

impl fmt::Display for Importance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_str())
    }
}

impl FromStr for Importance {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "DEBUG" => Ok(Importance::Debug),
            "TRACE" => Ok(Importance::Trace),
            "WHERE" => Ok(Importance::Where),
            "INFO" => Ok(Importance::Info),
            "WARN" | "WARNING" => Ok(Importance::Warn),
            "ERROR" => Ok(Importance::Error),
            "FATAL" => Ok(Importance::Fatal),
            _ => Err(format!("Invalid importance: '{}'", s)),
        }
    }
}
