use crate::infra::{AgentId, Offset};
use crate::state::AgentSlot;

/// Agent closest to any target seen by the team, with its offset to that target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Leader {
    pub agent: AgentId,
    pub offset: Offset,
}

/// Scan every agent's window for the globally nearest target.
///
/// Ties go to the earlier agent, then to the earlier cell in that agent's
/// scan order. `None` when nobody sees a target.
pub fn find_leader(agents: &[AgentSlot<'_>]) -> Option<Leader> {
    let mut best: Option<Leader> = None;
    for slot in agents {
        for offset in slot.window.target_offsets() {
            if best.is_none_or(|current| offset.manhattan() < current.offset.manhattan()) {
                best = Some(Leader {
                    agent: slot.id,
                    offset,
                });
            }
        }
    }
    best
}
