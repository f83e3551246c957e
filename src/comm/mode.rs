use std::fmt;
use std::str::FromStr;

use crate::error::ConfigError;

/// How often the centralized joint planner runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CommMode {
    /// Replan every tick.
    Full,
    /// Replan every `k` ticks.
    Periodic,
    /// Replan when any agent sees a target, with a fixed fallback interval.
    Event,
    /// Plan once and replay that decision forever.
    None,
}

impl CommMode {
    pub const ALL: [CommMode; 4] = [CommMode::Full, CommMode::Periodic, CommMode::Event, CommMode::None];

    pub fn as_str(&self) -> &'static str {
        match self {
            CommMode::Full => "full",
            CommMode::Periodic => "periodic",
            CommMode::Event => "event",
            CommMode::None => "none",
        }
    }
}

impl FromStr for CommMode {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "full" => Ok(CommMode::Full),
            "periodic" => Ok(CommMode::Periodic),
            "event" => Ok(CommMode::Event),
            "none" => Ok(CommMode::None),
            _ => Err(ConfigError::UnknownMode(s.to_string())),
        }
    }
}

impl fmt::Display for CommMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
