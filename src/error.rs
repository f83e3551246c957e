use thiserror::Error;

use crate::infra::AgentId;

/// Raised while building a scheduler or reading run configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("unknown communication mode '{0}' (expected full, periodic, event or none)")]
    UnknownMode(String),

    #[error("replanning period must be at least 1")]
    ZeroPeriod,

    #[error("invalid value '{value}' for {key}")]
    InvalidValue { key: String, value: String },
}

/// Malformed observation window.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WindowError {
    #[error("window length {0} is not the square of an odd side")]
    NotOddSquare(usize),

    #[error("unknown cell code {0}")]
    UnknownCell(u8),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown action code {0}")]
pub struct ActionError(pub u8);

/// Broken precondition on the per-tick planning input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlanError {
    #[error("agent {agent} has no {field} entry")]
    MissingAgentData { agent: AgentId, field: &'static str },

    #[error("agent {agent} window has radius {actual}, expected {expected}")]
    RadiusMismatch {
        agent: AgentId,
        expected: usize,
        actual: usize,
    },

    #[error("agent {agent}: {source}")]
    Window {
        agent: AgentId,
        #[source]
        source: WindowError,
    },
}

#[derive(Debug, Error)]
pub enum EpisodeError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Plan(#[from] PlanError),
}
