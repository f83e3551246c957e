//! Aggregate results over a batch of episodes.

use tracing::info;

use crate::comm::CommStats;
use crate::episode::EpisodeOutcome;

/// Running totals for one evaluation batch.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EvaluationMetrics {
    pub episodes: usize,
    pub captures: usize,
    /// Summed lengths of successful episodes only.
    capture_steps: u64,
    /// Summed over all episodes, successful or not.
    pub total_steps: u64,
    pub comm: CommStats,
    pub total_reward: f64,
}

impl EvaluationMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_episode(&mut self, outcome: &EpisodeOutcome) {
        self.episodes += 1;
        self.total_steps += outcome.steps;
        if outcome.captured {
            self.captures += 1;
            self.capture_steps += outcome.steps;
        }
        self.comm += outcome.stats;
        self.total_reward += outcome.total_rewards.values().sum::<f64>();
    }

    pub fn success_rate(&self) -> f64 {
        if self.episodes == 0 {
            0.0
        } else {
            self.captures as f64 / self.episodes as f64
        }
    }

    /// Mean episode length over successful episodes, `None` when there were none.
    pub fn avg_steps(&self) -> Option<f64> {
        (self.captures > 0).then(|| self.capture_steps as f64 / self.captures as f64)
    }

    pub fn avg_replans(&self) -> f64 {
        self.per_episode(self.comm.replans as f64)
    }

    pub fn avg_messages(&self) -> f64 {
        self.per_episode(self.comm.messages as f64)
    }

    pub fn avg_reward(&self) -> f64 {
        self.per_episode(self.total_reward)
    }

    fn per_episode(&self, total: f64) -> f64 {
        if self.episodes == 0 {
            0.0
        } else {
            total / self.episodes as f64
        }
    }

    pub fn print_summary(&self, label: &str) {
        let steps = match self.avg_steps() {
            Some(steps) => format!("{:.1}", steps),
            None => "-".to_string(),
        };
        info!(
            "{}: success={:.1}% ({}/{}) | steps-to-capture={} | replans={:.1} | messages={:.1} | reward={:.2}",
            label,
            self.success_rate() * 100.0,
            self.captures,
            self.episodes,
            steps,
            self.avg_replans(),
            self.avg_messages(),
            self.avg_reward()
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    use crate::infra::AgentId;
    use crate::sim::EndReason;

    fn outcome(captured: bool, steps: u64, replans: u64) -> EpisodeOutcome {
        let mut total_rewards = HashMap::new();
        total_rewards.insert(AgentId(0), if captured { 1.0 } else { 0.0 });
        total_rewards.insert(AgentId(1), 0.0);
        EpisodeOutcome {
            captured,
            reason: if captured {
                EndReason::TaskSolved
            } else {
                EndReason::TimeLimit
            },
            steps,
            first_capture_step: captured.then_some(steps - 1),
            total_rewards,
            stats: CommStats {
                messages: replans * 4,
                replans,
            },
        }
    }

    #[test]
    fn test_empty_batch() {
        let metrics = EvaluationMetrics::new();
        assert_eq!(metrics.success_rate(), 0.0);
        assert_eq!(metrics.avg_steps(), None);
        assert_eq!(metrics.avg_replans(), 0.0);
    }

    #[test]
    fn test_averages() {
        let mut metrics = EvaluationMetrics::new();
        metrics.record_episode(&outcome(true, 10, 10));
        metrics.record_episode(&outcome(true, 20, 4));
        metrics.record_episode(&outcome(false, 50, 10));
        metrics.record_episode(&outcome(false, 50, 0));

        assert_eq!(metrics.episodes, 4);
        assert_eq!(metrics.success_rate(), 0.5);
        assert_eq!(metrics.avg_steps(), Some(15.0));
        assert_eq!(metrics.total_steps, 130);
        assert_eq!(metrics.avg_replans(), 6.0);
        assert_eq!(metrics.avg_messages(), 24.0);
        assert_eq!(metrics.avg_reward(), 0.5);
    }
}
