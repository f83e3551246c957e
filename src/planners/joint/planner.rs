use tracing::debug;

use crate::infra::{Action, AgentId, Offset};
use crate::planners::joint::leader::{Leader, find_leader};
use crate::planners::joint::plan::{JointAction, PlanStep};
use crate::planners::joint::policies::{helper_action, leader_action, patrol_action};
use crate::state::PlanningSnapshot;

/// Which branch of the joint decomposition fired.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JointDecision {
    /// Nobody sees a target; every agent patrols on its own.
    Patrol,
    /// `leader` chases; everyone else helps using `leader_action` as a hint.
    Pursuit {
        leader: AgentId,
        offset: Offset,
        leader_action: Action,
    },
}

/// Decide which branch applies and emit one step per agent.
pub fn plan_joint(snapshot: &mut PlanningSnapshot<'_>) -> (JointDecision, Vec<PlanStep>) {
    let keep_prev_action = snapshot.keep_prev_action();
    let mut steps = Vec::with_capacity(snapshot.len());

    match find_leader(snapshot.agents()) {
        None => {
            for slot in snapshot.agents_mut() {
                let action =
                    patrol_action(&slot.window, slot.prev_action, keep_prev_action, &mut *slot.rng);
                steps.push(PlanStep::new(slot.id, action));
            }
            (JointDecision::Patrol, steps)
        }
        Some(Leader { agent, offset }) => {
            // The leader decides first so helpers can read its move.
            let chase = snapshot
                .agents()
                .iter()
                .find(|slot| slot.id == agent)
                .map(|slot| leader_action(&slot.window))
                .unwrap_or(Action::Stay);

            for slot in snapshot.agents_mut() {
                let action = if slot.id == agent {
                    chase
                } else {
                    helper_action(&slot.window, chase, &mut *slot.rng)
                };
                steps.push(PlanStep::new(slot.id, action));
            }
            (
                JointDecision::Pursuit {
                    leader: agent,
                    offset,
                    leader_action: chase,
                },
                steps,
            )
        }
    }
}

/// Run the joint decomposition for one tick.
pub fn decide_joint(snapshot: &mut PlanningSnapshot<'_>) -> JointAction {
    let agent_ids = snapshot.agent_ids();
    let (decision, steps) = plan_joint(snapshot);
    let actions = JointAction::from_steps(&agent_ids, steps);
    debug!("joint decision {:?} -> {}", decision, actions);
    actions
}
