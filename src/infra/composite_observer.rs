use crate::infra::{AgentId, EpisodeObserver};
use crate::planners::joint::JointAction;
use crate::sim::{CaptureEvent, EndReason, Observations, StepOutcome};

pub struct CompositeObserver {
    observers: Vec<Box<dyn EpisodeObserver>>,
}

impl CompositeObserver {
    pub fn new(observers: Vec<Box<dyn EpisodeObserver>>) -> Self {
        Self { observers }
    }
}

impl EpisodeObserver for CompositeObserver {
    fn on_reset(&mut self, seed: u64, agents: &[AgentId], radius: usize, observations: &Observations) {
        for observer in &mut self.observers {
            observer.on_reset(seed, agents, radius, observations);
        }
    }

    fn on_tick(&mut self, tick: u64, actions: &JointAction, outcome: &StepOutcome) {
        for observer in &mut self.observers {
            observer.on_tick(tick, actions, outcome);
        }
    }

    fn on_capture(&mut self, tick: u64, capture: &CaptureEvent) {
        for observer in &mut self.observers {
            observer.on_capture(tick, capture);
        }
    }

    fn on_episode_end(&mut self, reason: EndReason, steps: u64) {
        for observer in &mut self.observers {
            observer.on_episode_end(reason, steps);
        }
    }
}
