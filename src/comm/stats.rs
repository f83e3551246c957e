use std::ops::AddAssign;

/// Abstract communication cost of a scheduler.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CommStats {
    /// One observation up and one action down per agent for each replan.
    pub messages: u64,
    /// Planner invocations.
    pub replans: u64,
}

impl CommStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_replan(&mut self, num_agents: usize) {
        self.replans += 1;
        self.messages += 2 * num_agents as u64;
    }
}

impl AddAssign for CommStats {
    fn add_assign(&mut self, other: Self) {
        self.messages += other.messages;
        self.replans += other.replans;
    }
}
