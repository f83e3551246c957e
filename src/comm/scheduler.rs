use std::fmt;

use tracing::{debug, info};

use crate::comm::{CommMode, CommStats};
use crate::error::ConfigError;
use crate::planners::joint::{JointAction, decide_joint};
use crate::state::PlanningSnapshot;

/// EVENT mode replans at least this often even when nobody sees a target.
/// Deliberately independent of the periodic interval `k`.
pub const EVENT_FALLBACK_INTERVAL: u64 = 10;

/// Decides per tick whether to rerun the joint planner or replay its last answer.
#[derive(Debug)]
pub struct CommScheduler {
    mode: CommMode,
    k_sync: u64,
    debug: bool,
    stats: CommStats,
    cached: Option<JointAction>,
    frozen: Option<JointAction>,
}

impl CommScheduler {
    pub fn new(mode: CommMode, k_sync: u64, debug: bool) -> Result<Self, ConfigError> {
        if k_sync == 0 {
            return Err(ConfigError::ZeroPeriod);
        }
        Ok(Self {
            mode,
            k_sync,
            debug,
            stats: CommStats::new(),
            cached: None,
            frozen: None,
        })
    }

    /// Same as [`CommScheduler::new`] with the mode given by name.
    pub fn from_name(mode: &str, k_sync: u64, debug: bool) -> Result<Self, ConfigError> {
        Self::new(mode.parse()?, k_sync, debug)
    }

    pub fn mode(&self) -> CommMode {
        self.mode
    }

    pub fn k_sync(&self) -> u64 {
        self.k_sync
    }

    pub fn stats(&self) -> CommStats {
        self.stats
    }

    pub fn messages(&self) -> u64 {
        self.stats.messages
    }

    pub fn replans(&self) -> u64 {
        self.stats.replans
    }

    fn should_replan(&self, tick: u64, event_triggered: bool) -> bool {
        match self.mode {
            CommMode::Full => true,
            CommMode::Periodic => tick % self.k_sync == 0,
            CommMode::Event => event_triggered || tick % EVENT_FALLBACK_INTERVAL == 0,
            CommMode::None => false,
        }
    }

    fn report(&self, message: fmt::Arguments<'_>) {
        if self.debug {
            info!("[comm] {}", message);
        } else {
            debug!("[comm] {}", message);
        }
    }

    /// Joint action for `tick`, replanning only when the mode calls for it.
    pub fn decide(&mut self, tick: u64, mut snapshot: PlanningSnapshot<'_>) -> JointAction {
        let num_agents = snapshot.len();

        if self.mode == CommMode::None {
            if let Some(frozen) = &self.frozen {
                return frozen.clone();
            }
            let actions = decide_joint(&mut snapshot);
            self.stats.record_replan(num_agents);
            self.report(format_args!("t={}: frozen plan {}", tick, actions));
            self.frozen = Some(actions.clone());
            return actions;
        }

        let event_triggered = snapshot.any_target_visible();
        if !self.should_replan(tick, event_triggered)
            && let Some(cached) = &self.cached
        {
            self.report(format_args!(
                "t={}: reuse cached plan (mode={}, event={})",
                tick, self.mode, event_triggered
            ));
            return cached.clone();
        }

        let actions = decide_joint(&mut snapshot);
        self.stats.record_replan(num_agents);
        self.report(format_args!(
            "t={}: REPLAN (mode={}, event={}) -> {}",
            tick, self.mode, event_triggered, actions
        ));
        self.cached = Some(actions.clone());
        actions
    }
}
