//! Spaced repetition interval algorithms.

pub mod leitner;

use crate::types::Card;
use chrono::{DateTime, Utc};

pub use leitner::Leitner;

/// Result of scheduling a card after an answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SchedulingResult {
    pub bucket: usize,
    pub consecutive_correct: u32,
    pub next_due: DateTime<Utc>,
}

/// Trait for bucket-based spaced repetition algorithms.
pub trait SpacedRepetitionAlgorithm {
    /// Algorithm identifier.
    fn name(&self) -> &'static str;

    /// Number of buckets; valid bucket indices are `0..bucket_count()`.
    fn bucket_count(&self) -> usize;

    /// Calculate the next bucket and due time after an answer.
    fn schedule(&self, card: &Card, correct: bool, now: DateTime<Utc>) -> SchedulingResult;
}
