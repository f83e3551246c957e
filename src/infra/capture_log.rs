use std::time::{Duration, Instant};

use tracing::info;

use crate::infra::{AgentId, EpisodeObserver, Position};
use crate::planners::joint::JointAction;
use crate::sim::{CaptureEvent, EndReason, Observations, StepOutcome};

#[derive(Debug, Clone, PartialEq)]
pub struct CaptureRecord {
    pub step: u64,
    pub elapsed: Duration,
    pub prey_index: usize,
    pub position: Position,
    pub involved: Vec<AgentId>,
}

/// Records every capture of the current episode and prints them at the end.
#[derive(Debug)]
pub struct CaptureLog {
    started: Instant,
    records: Vec<CaptureRecord>,
}

impl CaptureLog {
    pub fn new() -> Self {
        Self {
            started: Instant::now(),
            records: Vec::new(),
        }
    }

    pub fn records(&self) -> &[CaptureRecord] {
        &self.records
    }

    pub fn first_capture_step(&self) -> Option<u64> {
        self.records.first().map(|record| record.step)
    }
}

impl Default for CaptureLog {
    fn default() -> Self {
        Self::new()
    }
}

impl EpisodeObserver for CaptureLog {
    fn on_reset(&mut self, _seed: u64, _agents: &[AgentId], _radius: usize, _observations: &Observations) {
        self.started = Instant::now();
        self.records.clear();
    }

    fn on_tick(&mut self, _tick: u64, _actions: &JointAction, _outcome: &StepOutcome) {}

    fn on_capture(&mut self, tick: u64, capture: &CaptureEvent) {
        info!(
            ">>> CAPTURE @ step={} prey={} at ({}, {}) involved={:?}",
            tick, capture.prey_index, capture.position.x, capture.position.y, capture.involved
        );
        self.records.push(CaptureRecord {
            step: tick,
            elapsed: self.started.elapsed(),
            prey_index: capture.prey_index,
            position: capture.position,
            involved: capture.involved.clone(),
        });
    }

    fn on_episode_end(&mut self, reason: EndReason, steps: u64) {
        info!(
            "=== EPISODE SUMMARY === steps={} reason={:?} first_capture_step={:?} wall_time={:.3}s",
            steps,
            reason,
            self.first_capture_step(),
            self.started.elapsed().as_secs_f64()
        );
        for record in &self.records {
            info!(
                "  - step={} t={:.3}s prey={} at ({}, {}) involved={:?}",
                record.step,
                record.elapsed.as_secs_f64(),
                record.prey_index,
                record.position.x,
                record.position.y,
                record.involved
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_records_captures_in_order() {
        let mut log = CaptureLog::new();
        log.on_reset(0, &[AgentId(0)], 1, &Observations::new());
        assert_eq!(log.first_capture_step(), None);

        let capture = CaptureEvent {
            prey_index: 0,
            position: Position::new(3, 4),
            involved: vec![AgentId(0)],
        };
        log.on_capture(7, &capture);
        log.on_capture(9, &CaptureEvent { prey_index: 1, ..capture });
        assert_eq!(log.first_capture_step(), Some(7));
        assert_eq!(log.records().len(), 2);
        assert_eq!(log.records()[1].prey_index, 1);

        log.on_reset(1, &[AgentId(0)], 1, &Observations::new());
        assert!(log.records().is_empty());
    }
}
