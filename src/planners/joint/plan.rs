use std::collections::BTreeMap;
use std::fmt;

use crate::infra::{Action, AgentId};

/// One primitive step emitted by the joint planner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlanStep {
    pub agent: AgentId,
    pub action: Action,
}

impl PlanStep {
    pub fn new(agent: AgentId, action: Action) -> Self {
        Self { agent, action }
    }
}

/// Total mapping from every participating agent to the action it takes this tick.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct JointAction {
    actions: BTreeMap<AgentId, Action>,
}

impl JointAction {
    pub fn all_stay(agent_ids: &[AgentId]) -> Self {
        Self {
            actions: agent_ids.iter().map(|&id| (id, Action::Stay)).collect(),
        }
    }

    /// Collapse planner steps into a joint action.
    ///
    /// Every agent starts at `Stay`; the first non-`Stay` step for an agent
    /// sticks. Steps for agents outside `agent_ids` are ignored, so an empty
    /// plan yields `Stay` for everyone.
    pub fn from_steps(agent_ids: &[AgentId], steps: impl IntoIterator<Item = PlanStep>) -> Self {
        let mut joint = Self::all_stay(agent_ids);
        for step in steps {
            if let Some(slot) = joint.actions.get_mut(&step.agent)
                && *slot == Action::Stay
            {
                *slot = step.action;
            }
        }
        joint
    }

    pub fn get(&self, agent: AgentId) -> Option<Action> {
        self.actions.get(&agent).copied()
    }

    pub fn set(&mut self, agent: AgentId, action: Action) {
        self.actions.insert(agent, action);
    }

    pub fn len(&self) -> usize {
        self.actions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (AgentId, Action)> + '_ {
        self.actions.iter().map(|(&id, &action)| (id, action))
    }
}

impl fmt::Display for JointAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        for (i, (agent, action)) in self.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}: {}", agent, action)?;
        }
        write!(f, "}}")
    }
}
