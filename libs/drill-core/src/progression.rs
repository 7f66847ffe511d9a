//! Level progression state machine.
//!
//! Counters accumulate per level. Once enough answers are in, accuracy is
//! compared against the level's thresholds and the counters start over.

use crate::types::{Level, LevelThresholds};
use serde::{Deserialize, Serialize};
use tracing::info;

/// Outcome of a level evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Decision {
    Advance,
    Regress,
    None,
}

/// Decision plus whether the per-level counters must be cleared.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Evaluation {
    pub decision: Decision,
    pub reset_counters: bool,
}

/// Decide whether to advance, regress or stay.
///
/// Advancing requires an empty review backlog. The caller is expected to have
/// collected at least the minimum sample before asking.
pub fn evaluate(
    correct: u32,
    total: u32,
    thresholds: LevelThresholds,
    locked: bool,
    has_backlog: bool,
) -> Evaluation {
    let decision = if locked || total == 0 {
        Decision::None
    } else {
        let accuracy = f64::from(correct) / f64::from(total);
        match (thresholds.up, thresholds.down) {
            (Some(up), _) if accuracy >= up && !has_backlog => Decision::Advance,
            (_, Some(down)) if accuracy < down => Decision::Regress,
            _ => Decision::None,
        }
    };

    Evaluation {
        decision,
        reset_counters: true,
    }
}

/// Result of a level transition, for the orchestrator to act on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    pub decision: Decision,
    pub from: Level,
    pub to: Level,
}

/// Current level with its rolling accuracy window.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelState {
    pub level: Level,
    pub correct: u32,
    pub total: u32,
    pub locked: bool,
}

impl LevelState {
    pub fn new(level: Level) -> Self {
        Self {
            level,
            correct: 0,
            total: 0,
            locked: false,
        }
    }

    /// Count one answer towards the current level.
    pub fn record(&mut self, correct: bool) {
        self.total += 1;
        if correct {
            self.correct += 1;
        }
    }

    /// Accuracy of the current window in whole percent.
    pub fn accuracy_percent(&self) -> u32 {
        if self.total == 0 {
            0
        } else {
            (f64::from(self.correct) * 100.0 / f64::from(self.total)).round() as u32
        }
    }

    pub fn toggle_lock(&mut self) -> bool {
        self.locked = !self.locked;
        self.locked
    }

    /// Evaluate once `min_sample` answers are in; returns `None` before that.
    /// Counters are cleared after every evaluation, whatever the outcome.
    pub fn evaluate(
        &mut self,
        min_sample: u32,
        thresholds: LevelThresholds,
        has_backlog: bool,
    ) -> Option<Transition> {
        if self.total < min_sample.max(1) {
            return None;
        }

        let evaluation = evaluate(self.correct, self.total, thresholds, self.locked, has_backlog);
        if evaluation.reset_counters {
            self.reset_counters();
        }

        let from = self.level;
        let to = match evaluation.decision {
            Decision::Advance => from.next().unwrap_or(from),
            Decision::Regress => from.previous().unwrap_or(from),
            Decision::None => from,
        };
        self.level = to;

        if to != from {
            info!(from = from.as_str(), to = to.as_str(), decision = ?evaluation.decision, "level changed");
        }

        Some(Transition {
            decision: evaluation.decision,
            from,
            to,
        })
    }

    fn reset_counters(&mut self) {
        self.correct = 0;
        self.total = 0;
    }
}
