use std::collections::HashMap;

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::error::PlanError;
use crate::infra::{Action, AgentId, ObservationWindow};
use crate::planners::joint::JointAction;
use crate::state::PlanningSnapshot;

/// Random source owned by a single agent.
pub type AgentRng = ChaCha8Rng;

/// Driver-side per-agent state that survives across ticks.
#[derive(Debug, Clone)]
pub struct AgentMemory {
    prev_actions: HashMap<AgentId, Action>,
    rngs: HashMap<AgentId, AgentRng>,
}

impl AgentMemory {
    /// Agent `i` in `agent_ids` is seeded with `seed + i`.
    pub fn new(agent_ids: &[AgentId], seed: u64) -> Self {
        let prev_actions = agent_ids.iter().map(|&id| (id, Action::Stay)).collect();
        let rngs = agent_ids
            .iter()
            .enumerate()
            .map(|(index, &id)| (id, AgentRng::seed_from_u64(seed.wrapping_add(index as u64))))
            .collect();
        Self { prev_actions, rngs }
    }

    pub fn prev_action(&self, agent: AgentId) -> Option<Action> {
        self.prev_actions.get(&agent).copied()
    }

    pub fn prev_actions(&self) -> &HashMap<AgentId, Action> {
        &self.prev_actions
    }

    pub fn rngs_mut(&mut self) -> &mut HashMap<AgentId, AgentRng> {
        &mut self.rngs
    }

    /// Remember what every agent executed this tick.
    pub fn record(&mut self, actions: &JointAction) {
        for (agent, action) in actions.iter() {
            self.prev_actions.insert(agent, action);
        }
    }

    pub fn snapshot(
        &mut self,
        agent_ids: &[AgentId],
        windows: HashMap<AgentId, ObservationWindow>,
        radius: usize,
        keep_prev_action: bool,
    ) -> Result<PlanningSnapshot<'_>, PlanError> {
        PlanningSnapshot::new(
            agent_ids,
            windows,
            radius,
            &self.prev_actions,
            keep_prev_action,
            &mut self.rngs,
        )
    }

    /// Snapshot straight from raw simulator cell codes.
    pub fn snapshot_from_codes(
        &mut self,
        agent_ids: &[AgentId],
        observations: &HashMap<AgentId, Vec<u8>>,
        radius: usize,
        keep_prev_action: bool,
    ) -> Result<PlanningSnapshot<'_>, PlanError> {
        PlanningSnapshot::from_codes(
            agent_ids,
            observations,
            radius,
            &self.prev_actions,
            keep_prev_action,
            &mut self.rngs,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::Rng;

    #[test]
    fn test_agents_get_independent_seeds() {
        let ids = [AgentId(0), AgentId(1)];
        let mut memory = AgentMemory::new(&ids, 7);
        let rngs = memory.rngs_mut();
        let a: u64 = rngs.get_mut(&AgentId(0)).unwrap().random();
        let b: u64 = rngs.get_mut(&AgentId(1)).unwrap().random();
        assert_ne!(a, b);

        let mut replay = AgentMemory::new(&ids, 7);
        let again: u64 = replay.rngs_mut().get_mut(&AgentId(0)).unwrap().random();
        assert_eq!(a, again);
    }

    #[test]
    fn test_record_updates_previous_actions() {
        let ids = [AgentId(0), AgentId(1)];
        let mut memory = AgentMemory::new(&ids, 0);
        assert_eq!(memory.prev_action(AgentId(1)), Some(Action::Stay));

        let mut actions = JointAction::all_stay(&ids);
        actions.set(AgentId(1), Action::Left);
        memory.record(&actions);
        assert_eq!(memory.prev_action(AgentId(0)), Some(Action::Stay));
        assert_eq!(memory.prev_action(AgentId(1)), Some(Action::Left));
    }
}
