use std::collections::HashMap;

use tracing::{info, trace, warn};

use crate::infra::{AgentId, Cell, EpisodeObserver, ObservationWindow, Offset};
use crate::planners::joint::JointAction;
use crate::sim::{EndReason, Observations, StepOutcome};

/// Logs a compact per-agent summary of what everyone sees each tick.
pub struct DefaultObserver {
    pretty: bool,
    total_rewards: HashMap<AgentId, f64>,
}

impl DefaultObserver {
    /// With `pretty` set every window is also dumped at trace level.
    pub fn new(pretty: bool) -> Self {
        Self {
            pretty,
            total_rewards: HashMap::new(),
        }
    }

    fn log_observations(&self, tick: u64, observations: &Observations) {
        let mut agents: Vec<&AgentId> = observations.keys().collect();
        agents.sort();
        for agent in agents {
            let window = match ObservationWindow::from_codes(&observations[agent]) {
                Ok(window) => window,
                Err(err) => {
                    warn!("agent {} sent a malformed window: {}", agent, err);
                    continue;
                }
            };
            let targets: Vec<Offset> = window.target_offsets().collect();
            // The observer itself sits at the center.
            let others = window
                .cells()
                .iter()
                .filter(|cell| **cell == Cell::Agent)
                .count()
                .saturating_sub(1);
            info!(
                "[t={:03}] agent={} sees targets={} others={} target_offsets={:?}",
                tick,
                agent,
                targets.len(),
                others,
                targets.iter().map(|o| (o.dx, o.dy)).collect::<Vec<_>>()
            );
            if self.pretty {
                trace!("\n{}", draw_window(&window));
            }
        }
    }
}

impl Default for DefaultObserver {
    fn default() -> Self {
        Self::new(false)
    }
}

fn draw_window(window: &ObservationWindow) -> String {
    window
        .cells()
        .chunks(window.side())
        .map(|row| {
            row.iter()
                .map(|cell| cell.code().to_string())
                .collect::<Vec<_>>()
                .join(" ")
        })
        .collect::<Vec<_>>()
        .join("\n")
}

impl EpisodeObserver for DefaultObserver {
    fn on_reset(&mut self, seed: u64, agents: &[AgentId], radius: usize, observations: &Observations) {
        let side = 2 * radius + 1;
        info!("Episode started");
        info!("- seed: {}", seed);
        info!("- agents: {:?}", agents.iter().map(|a| a.0).collect::<Vec<_>>());
        info!("- observation radius: {} (window {}x{})", radius, side, side);
        self.total_rewards = agents.iter().map(|&id| (id, 0.0)).collect();
        self.log_observations(0, observations);
    }

    fn on_tick(&mut self, tick: u64, actions: &JointAction, outcome: &StepOutcome) {
        info!("[t={:03}] actions={}", tick, actions);
        for (agent, reward) in &outcome.rewards {
            *self.total_rewards.entry(*agent).or_insert(0.0) += reward;
        }
        self.log_observations(tick + 1, &outcome.observations);
    }

    fn on_episode_end(&mut self, reason: EndReason, steps: u64) {
        info!("Episode ended after {} steps ({:?})", steps, reason);
        let mut totals: Vec<_> = self.total_rewards.iter().collect();
        totals.sort_by_key(|(agent, _)| **agent);
        info!("Total rewards: {:?}", totals);
    }
}
