use std::collections::HashMap;
use std::time::Instant;

use tracing::{debug, trace};

use crate::comm::{CommMode, CommScheduler, CommStats};
use crate::error::EpisodeError;
use crate::infra::{AgentId, EpisodeObserver};
use crate::sim::{EndReason, Simulator};
use crate::state::AgentMemory;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EpisodeSettings {
    pub comm_mode: CommMode,
    pub k_sync: u64,
    pub keep_prev_action: bool,
    /// Upper bound on ticks regardless of the simulator's own limit.
    pub time_horizon: u64,
    pub debug: bool,
}

impl Default for EpisodeSettings {
    fn default() -> Self {
        Self {
            comm_mode: CommMode::Full,
            k_sync: 5,
            keep_prev_action: true,
            time_horizon: 200,
            debug: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct EpisodeOutcome {
    pub captured: bool,
    pub reason: EndReason,
    /// Ticks executed.
    pub steps: u64,
    pub first_capture_step: Option<u64>,
    pub total_rewards: HashMap<AgentId, f64>,
    pub stats: CommStats,
}

/// Drives one simulator through whole episodes, one scheduler per episode.
pub struct EpisodeRunner<S: Simulator> {
    sim: S,
    observer: Box<dyn EpisodeObserver>,
    settings: EpisodeSettings,
}

impl<S: Simulator> EpisodeRunner<S> {
    pub fn new(sim: S, observer: impl EpisodeObserver + 'static, settings: EpisodeSettings) -> Self {
        Self {
            sim,
            observer: Box::new(observer),
            settings,
        }
    }

    pub fn settings(&self) -> &EpisodeSettings {
        &self.settings
    }

    pub fn simulator(&self) -> &S {
        &self.sim
    }

    pub fn run(&mut self, seed: u64) -> Result<EpisodeOutcome, EpisodeError> {
        let settings = self.settings;
        let mut scheduler =
            CommScheduler::new(settings.comm_mode, settings.k_sync, settings.debug)?;

        let mut observations = self.sim.reset(seed);
        let agents = self.sim.agents();
        let radius = self.sim.observation_radius();
        let mut memory = AgentMemory::new(&agents, seed);
        let mut total_rewards: HashMap<AgentId, f64> = agents.iter().map(|&id| (id, 0.0)).collect();
        let mut first_capture_step = None;

        self.observer.on_reset(seed, &agents, radius, &observations);

        let mut reason = EndReason::Horizon;
        let mut steps = 0;
        for tick in 0..settings.time_horizon {
            let tick_start = Instant::now();

            let snapshot = memory.snapshot_from_codes(
                &agents,
                &observations,
                radius,
                settings.keep_prev_action,
            )?;
            let actions = scheduler.decide(tick, snapshot);
            let outcome = self.sim.step(&actions);
            memory.record(&actions);
            steps = tick + 1;

            for (agent, reward) in &outcome.rewards {
                *total_rewards.entry(*agent).or_insert(0.0) += reward;
            }
            for capture in &outcome.captures {
                first_capture_step.get_or_insert(tick);
                self.observer.on_capture(tick, capture);
            }
            self.observer.on_tick(tick, &actions, &outcome);

            if settings.debug
                && let Some(board) = self.sim.render()
            {
                trace!("\n{}", board);
            }

            let tick_duration = tick_start.elapsed();
            if tick_duration.as_millis() > 100 {
                debug!(
                    "Tick {} took {:.2}ms",
                    tick,
                    tick_duration.as_secs_f64() * 1000.0
                );
            }

            if let Some(end) = outcome.end_reason() {
                reason = end;
                break;
            }
            observations = outcome.observations;
        }

        self.observer.on_episode_end(reason, steps);

        Ok(EpisodeOutcome {
            captured: reason == EndReason::TaskSolved,
            reason,
            steps,
            first_capture_step,
            total_rewards,
            stats: scheduler.stats(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infra::{Action, CaptureLog, Position};
    use crate::sim::{GridConfig, GridWorld, Observations, StepOutcome};
    use crate::planners::joint::JointAction;

    /// Starts from a fixed layout instead of a random one.
    struct FixedLayout {
        world: GridWorld,
        predators: Vec<Position>,
        prey: Vec<Position>,
    }

    impl Simulator for FixedLayout {
        fn agents(&self) -> Vec<AgentId> {
            self.world.agents()
        }

        fn observation_radius(&self) -> usize {
            self.world.observation_radius()
        }

        fn reset(&mut self, seed: u64) -> Observations {
            self.world.reset(seed);
            self.world.place(self.predators.clone(), self.prey.clone())
        }

        fn step(&mut self, actions: &JointAction) -> StepOutcome {
            self.world.step(actions)
        }
    }

    fn fixed(max_steps: usize) -> FixedLayout {
        let config = GridConfig {
            max_steps,
            ..GridConfig::default()
        };
        FixedLayout {
            world: GridWorld::new(config).unwrap(),
            predators: vec![Position::new(2, 4), Position::new(7, 7)],
            prey: vec![Position::new(4, 4)],
        }
    }

    /// Prey boxed in by walls on all four sides, so nobody can ever stand next to it.
    fn unreachable(max_steps: usize) -> FixedLayout {
        let mut layout = fixed(max_steps);
        let prey = Position::new(7, 2);
        for action in Action::DIRECTIONS {
            if let Some(offset) = action.offset() {
                layout.world.add_wall(prey.shifted(offset));
            }
        }
        layout.prey = vec![prey];
        layout
    }

    #[test]
    fn test_full_mode_counts_every_tick() {
        let settings = EpisodeSettings {
            comm_mode: CommMode::Full,
            time_horizon: 30,
            ..EpisodeSettings::default()
        };
        let mut runner = EpisodeRunner::new(unreachable(30), CaptureLog::new(), settings);
        let outcome = runner.run(3).unwrap();
        assert!(!outcome.captured);
        assert_eq!(outcome.steps, 30);
        assert_eq!(outcome.stats.replans, 30);
        assert_eq!(outcome.stats.messages, 4 * 30);
        assert_eq!(outcome.first_capture_step, None);
        assert_eq!(outcome.total_rewards.values().sum::<f64>(), 0.0);
    }

    #[test]
    fn test_capture_ends_episode() {
        let settings = EpisodeSettings {
            comm_mode: CommMode::Full,
            time_horizon: 30,
            ..EpisodeSettings::default()
        };
        let mut runner = EpisodeRunner::new(fixed(30), CaptureLog::new(), settings);
        let outcome = runner.run(3).unwrap();
        assert!(outcome.captured);
        assert_eq!(outcome.reason, EndReason::TaskSolved);
        assert!(outcome.steps < 30);
        assert_eq!(outcome.first_capture_step, Some(outcome.steps - 1));
        assert!(outcome.total_rewards.values().sum::<f64>() >= 1.0);
        assert_eq!(outcome.stats.replans, outcome.steps);
    }

    #[test]
    fn test_none_mode_plans_once() {
        let settings = EpisodeSettings {
            comm_mode: CommMode::None,
            time_horizon: 15,
            ..EpisodeSettings::default()
        };
        let mut runner = EpisodeRunner::new(unreachable(500), CaptureLog::new(), settings);
        let outcome = runner.run(8).unwrap();
        assert_eq!(outcome.steps, 15);
        assert_eq!(outcome.stats.replans, 1);
        assert_eq!(outcome.stats.messages, 4);
    }

    #[test]
    fn test_horizon_stops_the_loop() {
        let settings = EpisodeSettings {
            comm_mode: CommMode::Periodic,
            k_sync: 4,
            time_horizon: 8,
            ..EpisodeSettings::default()
        };
        let mut runner = EpisodeRunner::new(unreachable(500), CaptureLog::new(), settings);
        let outcome = runner.run(1).unwrap();
        assert!(!outcome.captured);
        assert_eq!(outcome.reason, EndReason::Horizon);
        assert_eq!(outcome.steps, 8);
        assert_eq!(outcome.stats.replans, 2);
        assert_eq!(runner.simulator().world.tick(), 8);
    }

    #[test]
    fn test_simulator_time_limit_ends_episode() {
        let settings = EpisodeSettings {
            time_horizon: 100,
            ..EpisodeSettings::default()
        };
        let mut runner = EpisodeRunner::new(unreachable(3), CaptureLog::new(), settings);
        let outcome = runner.run(0).unwrap();
        assert!(!outcome.captured);
        assert_eq!(outcome.reason, EndReason::TimeLimit);
        assert_eq!(outcome.steps, 3);
    }

    #[test]
    fn test_same_seed_same_episode() {
        let settings = EpisodeSettings {
            comm_mode: CommMode::Event,
            keep_prev_action: false,
            ..EpisodeSettings::default()
        };
        let mut a = EpisodeRunner::new(GridWorld::new(GridConfig::default()).unwrap(), CaptureLog::new(), settings);
        let mut b = EpisodeRunner::new(GridWorld::new(GridConfig::default()).unwrap(), CaptureLog::new(), settings);
        assert_eq!(a.run(42).unwrap(), b.run(42).unwrap());
        assert_eq!(a.simulator().tick(), b.simulator().tick());
    }

    #[test]
    fn test_zero_period_is_a_config_error() {
        let settings = EpisodeSettings {
            k_sync: 0,
            ..EpisodeSettings::default()
        };
        let mut runner = EpisodeRunner::new(fixed(10), CaptureLog::new(), settings);
        assert!(matches!(runner.run(0), Err(EpisodeError::Config(_))));
        assert_eq!(runner.settings().k_sync, 0);
    }
}
