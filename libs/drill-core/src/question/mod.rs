//! Question generation: flashcards and cloze sentences with distractors.
//!
//! Cloze is only tried for categories outside the banned set, and then only
//! on a coin flip. A cloze that cannot be built falls back to a flashcard for
//! the same entry without the caller noticing.

mod cloze;
mod distractors;
mod flashcard;

use crate::corpus::Corpus;
use crate::labels::category_label;
use crate::types::{Card, DrillSettings, EntryId, LexicalEntry, Level, Question, QuestionMode};
use rand::seq::SliceRandom;
use rand::Rng;
use tracing::debug;

pub use cloze::{split_sentences, BLANK};

/// A question before the options are shuffled together.
#[derive(Debug, Clone)]
struct Draft {
    prompt: String,
    correct_answer: String,
    distractors: Vec<String>,
    mode: QuestionMode,
    hint: Option<String>,
}

/// Everything a builder needs to know about the entry being asked.
struct Target<'a> {
    id: EntryId,
    entry: &'a LexicalEntry,
    level: Level,
}

/// Most wrong options a question carries, so at most four options in all.
pub const MAX_DISTRACTORS: usize = 3;

/// Builds questions for scheduled cards.
#[derive(Debug, Clone)]
pub struct QuestionGenerator {
    cloze_probability: f64,
    distractor_count: usize,
    settings: DrillSettings,
}

impl QuestionGenerator {
    pub fn new(settings: &DrillSettings) -> Self {
        Self {
            cloze_probability: settings.cloze_probability.clamp(0.0, 1.0),
            distractor_count: settings.distractor_count.min(MAX_DISTRACTORS),
            settings: settings.clone(),
        }
    }

    /// Whether an entry could ever be asked as a cloze.
    pub fn cloze_eligible(&self, entry: &LexicalEntry) -> bool {
        self.settings.cloze_allowed(entry.category()) && entry.example().is_some()
    }

    /// Build a question for `card`. `None` only if the card points outside the corpus.
    pub fn generate<C, R>(
        &self,
        corpus: &C,
        card: &Card,
        level: Level,
        is_review: bool,
        rng: &mut R,
    ) -> Option<Question>
    where
        C: Corpus + ?Sized,
        R: Rng + ?Sized,
    {
        let entry = corpus.get(card.entry)?;
        let target = Target {
            id: card.entry,
            entry,
            level,
        };

        let try_cloze = card.cloze_eligible
            && self.cloze_eligible(entry)
            && rng.random_bool(self.cloze_probability);

        let draft = if try_cloze {
            match cloze::build(corpus, &target, self.distractor_count, rng) {
                Some(draft) => draft,
                None => {
                    debug!(lemma = entry.canonical_lemma(), "cloze not possible, asking flashcard");
                    flashcard::build(corpus, &target, self.distractor_count, rng)
                }
            }
        } else {
            flashcard::build(corpus, &target, self.distractor_count, rng)
        };

        if draft.distractors.len() < self.distractor_count {
            debug!(
                lemma = entry.canonical_lemma(),
                found = draft.distractors.len(),
                wanted = self.distractor_count,
                "distractor shortfall"
            );
        }

        Some(self.finish(draft, card, entry, is_review, rng))
    }

    fn finish<R: Rng + ?Sized>(
        &self,
        draft: Draft,
        card: &Card,
        entry: &LexicalEntry,
        is_review: bool,
        rng: &mut R,
    ) -> Question {
        let mut options = draft.distractors;
        options.truncate(self.distractor_count);
        options.shuffle(rng);
        let position = rng.random_range(0..=options.len());
        options.insert(position, draft.correct_answer.clone());

        Question {
            card_id: card.id,
            prompt: draft.prompt,
            correct_answer: draft.correct_answer,
            options,
            mode: draft.mode,
            is_review,
            label: category_label(entry.category()).map(str::to_string),
            pronunciation: entry
                .pronunciation
                .as_deref()
                .map(str::trim)
                .filter(|p| !p.is_empty())
                .map(str::to_string),
            hint: draft.hint,
        }
    }
}
