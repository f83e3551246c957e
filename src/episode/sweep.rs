//! Batch comparisons across communication settings.

use tracing::info;

use crate::comm::CommMode;
use crate::episode::{EpisodeRunner, EpisodeSettings, EvaluationMetrics};
use crate::error::EpisodeError;
use crate::infra::{AgentId, EpisodeObserver};
use crate::planners::joint::JointAction;
use crate::sim::{EndReason, Observations, Simulator, StepOutcome};

/// Run `episodes` episodes with seeds `base_seed`, `base_seed + 1`, ...
pub fn evaluate<S, O>(
    sim: S,
    observer: O,
    settings: EpisodeSettings,
    episodes: usize,
    base_seed: u64,
) -> Result<EvaluationMetrics, EpisodeError>
where
    S: Simulator,
    O: EpisodeObserver + 'static,
{
    let mut runner = EpisodeRunner::new(sim, observer, settings);
    let mut metrics = EvaluationMetrics::new();
    for episode in 0..episodes {
        let outcome = runner.run(base_seed.wrapping_add(episode as u64))?;
        metrics.record_episode(&outcome);
    }
    Ok(metrics)
}

/// PERIODIC mode once per period in `k_values`, each on a fresh simulator.
pub fn sweep_k_sync<S, F>(
    mut make_sim: F,
    base: EpisodeSettings,
    k_values: &[u64],
    episodes: usize,
    base_seed: u64,
) -> Result<Vec<(u64, EvaluationMetrics)>, EpisodeError>
where
    S: Simulator,
    F: FnMut() -> S,
{
    let mut results = Vec::with_capacity(k_values.len());
    for &k_sync in k_values {
        let settings = EpisodeSettings {
            comm_mode: CommMode::Periodic,
            k_sync,
            ..base
        };
        info!("Sweeping k_sync={} over {} episodes", k_sync, episodes);
        let metrics = evaluate(make_sim(), Quiet, settings, episodes, base_seed)?;
        metrics.print_summary(&format!("PERIODIC k={}", k_sync));
        results.push((k_sync, metrics));
    }
    Ok(results)
}

/// Every communication mode with the same seeds and period.
pub fn sweep_comm_modes<S, F>(
    mut make_sim: F,
    base: EpisodeSettings,
    episodes: usize,
    base_seed: u64,
) -> Result<Vec<(CommMode, EvaluationMetrics)>, EpisodeError>
where
    S: Simulator,
    F: FnMut() -> S,
{
    let mut results = Vec::with_capacity(CommMode::ALL.len());
    for mode in CommMode::ALL {
        let settings = EpisodeSettings {
            comm_mode: mode,
            ..base
        };
        info!("Sweeping mode={} over {} episodes", mode, episodes);
        let metrics = evaluate(make_sim(), Quiet, settings, episodes, base_seed)?;
        metrics.print_summary(&format!("{} (k={})", mode, base.k_sync));
        results.push((mode, metrics));
    }
    Ok(results)
}

/// Sweeps only report aggregates.
struct Quiet;

impl EpisodeObserver for Quiet {
    fn on_reset(&mut self, _seed: u64, _agents: &[AgentId], _radius: usize, _observations: &Observations) {}

    fn on_tick(&mut self, _tick: u64, _actions: &JointAction, _outcome: &StepOutcome) {}

    fn on_episode_end(&mut self, _reason: EndReason, _steps: u64) {}
}
