//! Candidate pools and option de-duplication shared by both question modes.

use super::Target;
use crate::corpus::Corpus;
use crate::matching::primary_form;
use crate::types::{EntryId, LexicalEntry};
use rand::seq::SliceRandom;
use rand::Rng;
use std::collections::HashSet;

/// How far afield a candidate pool reaches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum Stage {
    SameCategoryAndLevel,
    SameCategory,
    Anything,
}

impl Stage {
    pub(super) const ALL: [Stage; 3] = [
        Stage::SameCategoryAndLevel,
        Stage::SameCategory,
        Stage::Anything,
    ];
}

/// Shuffled candidates for one stage. Never contains the target itself or an
/// excluded lemma.
pub(super) fn pool<C, R>(corpus: &C, target: &Target<'_>, stage: Stage, rng: &mut R) -> Vec<EntryId>
where
    C: Corpus + ?Sized,
    R: Rng + ?Sized,
{
    let category = target.entry.category();
    let mut ids: Vec<EntryId> = match (stage, category) {
        (Stage::Anything, _) => (0..corpus.entries().len()).collect(),
        (_, None) => Vec::new(),
        (Stage::SameCategory, Some(category)) => corpus.with_category_prefix(category),
        (Stage::SameCategoryAndLevel, Some(category)) => corpus
            .with_category_prefix(category)
            .into_iter()
            .filter(|id| {
                corpus
                    .get(*id)
                    .is_some_and(|e| e.level == Some(target.level))
            })
            .collect(),
    };

    ids.retain(|id| {
        *id != target.id
            && corpus
                .get(*id)
                .is_some_and(|e| !corpus.is_excluded(&e.lemma))
    });
    ids.shuffle(rng);
    ids
}

/// Walk the stages in order, feeding each candidate entry to `accept` until
/// the collector is full or the corpus runs out.
pub(super) fn fill<C, R, F>(
    corpus: &C,
    target: &Target<'_>,
    collector: &mut OptionCollector,
    rng: &mut R,
    mut accept: F,
) where
    C: Corpus + ?Sized,
    R: Rng + ?Sized,
    F: FnMut(&LexicalEntry, &mut OptionCollector),
{
    for stage in Stage::ALL {
        if collector.is_full() {
            break;
        }
        for id in pool(corpus, target, stage, rng) {
            if collector.is_full() {
                break;
            }
            if let Some(candidate) = corpus.get(id) {
                accept(candidate, collector);
            }
        }
    }
}

/// Collects distractors whose primary forms differ from each other and from
/// everything reserved up front (the correct answer, the lemma).
#[derive(Debug, Clone)]
pub(super) struct OptionCollector {
    limit: usize,
    seen: HashSet<String>,
    chosen: Vec<String>,
}

impl OptionCollector {
    pub(super) fn new(limit: usize) -> Self {
        Self {
            limit,
            seen: HashSet::new(),
            chosen: Vec::new(),
        }
    }

    /// Block a form without offering it.
    pub(super) fn reserve(&mut self, form: &str) {
        self.seen.insert(primary_form(form));
    }

    /// Offer a distractor; returns whether it was taken.
    pub(super) fn offer(&mut self, form: String) -> bool {
        if self.is_full() {
            return false;
        }
        let key = primary_form(&form);
        if key.is_empty() || !self.seen.insert(key) {
            return false;
        }
        self.chosen.push(form);
        true
    }

    pub(super) fn is_full(&self) -> bool {
        self.chosen.len() >= self.limit
    }

    pub(super) fn into_options(self) -> Vec<String> {
        self.chosen
    }
}
