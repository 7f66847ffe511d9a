//! Flashcards: the lemma is shown and the learner picks its translation.

use super::distractors::{fill, OptionCollector};
use super::{Draft, Target};
use crate::corpus::Corpus;
use crate::matching::starts_uppercase;
use crate::types::QuestionMode;
use rand::Rng;

pub(super) fn build<C, R>(corpus: &C, target: &Target<'_>, count: usize, rng: &mut R) -> Draft
where
    C: Corpus + ?Sized,
    R: Rng + ?Sized,
{
    let correct = target.entry.translation.trim().to_string();
    let capitalised = starts_uppercase(&correct);

    let mut collector = OptionCollector::new(count);
    collector.reserve(&correct);

    fill(corpus, target, &mut collector, rng, |candidate, collector| {
        let translation = candidate.translation.trim();
        // proper nouns only compete with proper nouns
        if starts_uppercase(translation) == capitalised {
            collector.offer(translation.to_string());
        }
    });

    Draft {
        prompt: target.entry.lemma.trim().to_string(),
        correct_answer: correct,
        distractors: collector.into_options(),
        mode: QuestionMode::Flashcard,
        hint: None,
    }
}
