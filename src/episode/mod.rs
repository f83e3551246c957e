//! Episode driving: simulator loop, batch metrics and communication sweeps.

mod metrics;
mod runner;
mod sweep;

pub use metrics::EvaluationMetrics;
pub use runner::{EpisodeOutcome, EpisodeRunner, EpisodeSettings};
pub use sweep::{evaluate, sweep_comm_modes, sweep_k_sync};
