//! Leitner-style bucket scheduling.
//!
//! A correct answer moves a card one bucket up, a wrong answer one bucket
//! down. Each bucket has a fixed review delay.

use super::{SchedulingResult, SpacedRepetitionAlgorithm};
use crate::types::Card;
use chrono::{DateTime, Duration, Utc};

/// Longest delay a bucket may carry: one year.
pub const MAX_INTERVAL_MINUTES: i64 = 365 * 24 * 60;

/// Bucket ladder with one delay per bucket.
#[derive(Debug, Clone)]
pub struct Leitner {
    intervals: Vec<Duration>,
}

impl Default for Leitner {
    fn default() -> Self {
        Self::from_minutes(&[0, 2, 5, 10, 20])
    }
}

impl Leitner {
    /// Build from per-bucket delays in minutes. Delays are clamped to
    /// `0..=MAX_INTERVAL_MINUTES`; an empty list yields a single immediate bucket.
    pub fn from_minutes(minutes: &[i64]) -> Self {
        let mut intervals: Vec<Duration> = minutes
            .iter()
            .filter_map(|&m| Duration::try_minutes(m.clamp(0, MAX_INTERVAL_MINUTES)))
            .collect();
        if intervals.is_empty() {
            intervals.push(Duration::zero());
        }
        Self { intervals }
    }

    /// Delay attached to a bucket (clamped to the top bucket).
    pub fn interval(&self, bucket: usize) -> Duration {
        let top = self.intervals.len() - 1;
        self.intervals[bucket.min(top)]
    }

    pub fn top_bucket(&self) -> usize {
        self.intervals.len() - 1
    }
}

impl SpacedRepetitionAlgorithm for Leitner {
    fn name(&self) -> &'static str {
        "leitner"
    }

    fn bucket_count(&self) -> usize {
        self.intervals.len()
    }

    fn schedule(&self, card: &Card, correct: bool, now: DateTime<Utc>) -> SchedulingResult {
        let (bucket, consecutive_correct) = if correct {
            (
                (card.bucket + 1).min(self.top_bucket()),
                card.consecutive_correct + 1,
            )
        } else {
            (card.bucket.saturating_sub(1), 0)
        };

        SchedulingResult {
            bucket,
            consecutive_correct,
            next_due: now
                .checked_add_signed(self.interval(bucket))
                .unwrap_or(DateTime::<Utc>::MAX_UTC),
        }
    }
}
