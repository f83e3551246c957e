use crate::infra::AgentId;
use crate::planners::joint::JointAction;
use crate::sim::{CaptureEvent, EndReason, Observations, StepOutcome};

/// Trait for observing episode events during execution
pub trait EpisodeObserver {
    /// Called after the simulator is reset
    fn on_reset(&mut self, seed: u64, agents: &[AgentId], radius: usize, observations: &Observations);

    /// Called once per tick after the joint action was applied
    fn on_tick(&mut self, tick: u64, actions: &JointAction, outcome: &StepOutcome);

    /// Called for every prey caught during a tick
    fn on_capture(&mut self, _tick: u64, _capture: &CaptureEvent) {
        // Default implementation does nothing
    }

    /// Called when the episode finishes
    fn on_episode_end(&mut self, reason: EndReason, steps: u64);
}
