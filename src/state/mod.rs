mod agent_memory;
mod snapshot;

pub use agent_memory::{AgentMemory, AgentRng};
pub use snapshot::{AgentSlot, PlanningSnapshot};
