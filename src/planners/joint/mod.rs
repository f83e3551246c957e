//! Joint decomposition: one coordinated move per agent from local windows.
//!
//! ```text
//! find_leader ──► none ──► patrol_action for every agent
//!             └─► some ──► leader_action for the leader
//!                          helper_action(hint = leader move) for the rest
//! ```

mod leader;
mod plan;
mod planner;
mod policies;

pub use leader::{Leader, find_leader};
pub use plan::{JointAction, PlanStep};
pub use planner::{JointDecision, decide_joint, plan_joint};
pub use policies::{helper_action, leader_action, patrol_action};
