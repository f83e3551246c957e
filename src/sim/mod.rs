//! Simulator boundary. The core only ever sees raw egocentric windows coming
//! out of a [`Simulator`] and hands a [`JointAction`] back.

mod grid_world;

use std::collections::HashMap;

use crate::infra::{AgentId, Position};
use crate::planners::joint::JointAction;

pub use grid_world::{GridConfig, GridWorld};

/// Raw cell codes per agent, row-major.
pub type Observations = HashMap<AgentId, Vec<u8>>;

#[derive(Debug, Clone, PartialEq)]
pub struct CaptureEvent {
    pub prey_index: usize,
    pub position: Position,
    /// Pursuers adjacent to the prey when it was caught.
    pub involved: Vec<AgentId>,
}

#[derive(Debug, Clone)]
pub struct StepOutcome {
    pub observations: Observations,
    pub rewards: HashMap<AgentId, f64>,
    pub captures: Vec<CaptureEvent>,
    /// Every prey has been caught.
    pub all_done: bool,
    /// The step limit was reached first.
    pub truncated: bool,
}

/// Why an episode stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EndReason {
    TaskSolved,
    TimeLimit,
    /// The driver's own tick budget ran out before the simulator finished.
    Horizon,
}

impl StepOutcome {
    pub fn end_reason(&self) -> Option<EndReason> {
        if self.all_done {
            Some(EndReason::TaskSolved)
        } else if self.truncated {
            Some(EndReason::TimeLimit)
        } else {
            None
        }
    }
}

pub trait Simulator {
    /// Participating agents, fixed for the episode.
    fn agents(&self) -> Vec<AgentId>;

    fn observation_radius(&self) -> usize;

    fn reset(&mut self, seed: u64) -> Observations;

    fn step(&mut self, actions: &JointAction) -> StepOutcome;

    /// Optional text rendering for debug logs.
    fn render(&self) -> Option<String> {
        None
    }
}
