pub mod comm;
pub mod config;
pub mod episode;
pub mod error;
pub mod infra;
pub mod planners;
pub mod sim;
pub mod state;

// Re-export commonly used types for convenience
pub use comm::{CommMode, CommScheduler, CommStats};
pub use error::{ConfigError, EpisodeError, PlanError};
pub use infra::{Action, AgentId, ObservationWindow, Offset};
pub use planners::joint::{JointAction, decide_joint};
pub use state::{AgentMemory, PlanningSnapshot};
