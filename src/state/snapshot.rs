use std::collections::HashMap;

use crate::error::PlanError;
use crate::infra::{Action, AgentId, ObservationWindow};
use crate::state::AgentRng;

/// Everything the joint planner knows about one agent for the current tick.
#[derive(Debug)]
pub struct AgentSlot<'a> {
    pub id: AgentId,
    pub window: ObservationWindow,
    pub prev_action: Action,
    pub rng: &'a mut AgentRng,
}

/// Per-tick planning input, checked once at construction.
///
/// Windows and previous actions are owned copies; random sources stay with
/// the caller and are only drawn from.
#[derive(Debug)]
pub struct PlanningSnapshot<'a> {
    agents: Vec<AgentSlot<'a>>,
    radius: usize,
    keep_prev_action: bool,
}

impl<'a> PlanningSnapshot<'a> {
    pub fn new(
        agent_ids: &[AgentId],
        mut windows: HashMap<AgentId, ObservationWindow>,
        radius: usize,
        prev_actions: &HashMap<AgentId, Action>,
        keep_prev_action: bool,
        rngs: &'a mut HashMap<AgentId, AgentRng>,
    ) -> Result<Self, PlanError> {
        let mut rngs_by_id: HashMap<AgentId, &'a mut AgentRng> =
            rngs.iter_mut().map(|(id, rng)| (*id, rng)).collect();

        let mut agents = Vec::with_capacity(agent_ids.len());
        for &id in agent_ids {
            let window = windows.remove(&id).ok_or(PlanError::MissingAgentData {
                agent: id,
                field: "window",
            })?;
            if window.radius() != radius {
                return Err(PlanError::RadiusMismatch {
                    agent: id,
                    expected: radius,
                    actual: window.radius(),
                });
            }
            let prev_action = *prev_actions.get(&id).ok_or(PlanError::MissingAgentData {
                agent: id,
                field: "prev_action",
            })?;
            let rng = rngs_by_id.remove(&id).ok_or(PlanError::MissingAgentData {
                agent: id,
                field: "rng",
            })?;
            agents.push(AgentSlot {
                id,
                window,
                prev_action,
                rng,
            });
        }

        Ok(Self {
            agents,
            radius,
            keep_prev_action,
        })
    }

    /// Build a snapshot from raw simulator cell codes.
    pub fn from_codes(
        agent_ids: &[AgentId],
        observations: &HashMap<AgentId, Vec<u8>>,
        radius: usize,
        prev_actions: &HashMap<AgentId, Action>,
        keep_prev_action: bool,
        rngs: &'a mut HashMap<AgentId, AgentRng>,
    ) -> Result<Self, PlanError> {
        let mut windows = HashMap::with_capacity(agent_ids.len());
        for &agent in agent_ids {
            let codes = observations.get(&agent).ok_or(PlanError::MissingAgentData {
                agent,
                field: "window",
            })?;
            let window = ObservationWindow::from_codes(codes)
                .map_err(|source| PlanError::Window { agent, source })?;
            windows.insert(agent, window);
        }
        Self::new(
            agent_ids,
            windows,
            radius,
            prev_actions,
            keep_prev_action,
            rngs,
        )
    }

    pub fn radius(&self) -> usize {
        self.radius
    }

    pub fn keep_prev_action(&self) -> bool {
        self.keep_prev_action
    }

    pub fn len(&self) -> usize {
        self.agents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.agents.is_empty()
    }

    pub fn agent_ids(&self) -> Vec<AgentId> {
        self.agents.iter().map(|slot| slot.id).collect()
    }

    pub fn agents(&self) -> &[AgentSlot<'a>] {
        &self.agents
    }

    pub fn agents_mut(&mut self) -> &mut [AgentSlot<'a>] {
        &mut self.agents
    }

    /// True when at least one agent currently sees a target.
    pub fn any_target_visible(&self) -> bool {
        self.agents.iter().any(|slot| slot.window.contains_target())
    }
}
