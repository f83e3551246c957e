//! Communication controller between the centralized joint planner and the agents.

mod mode;
mod scheduler;
mod stats;

pub use mode::CommMode;
pub use scheduler::{CommScheduler, EVENT_FALLBACK_INTERVAL};
pub use stats::CommStats;
