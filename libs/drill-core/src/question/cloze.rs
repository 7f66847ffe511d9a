//! Cloze questions: a sentence from the entry's example with the inflected
//! word blanked out.

use super::distractors::{fill, OptionCollector};
use super::{Draft, Target};
use crate::corpus::Corpus;
use crate::matching::{match_capitalization, normalize_whitespace};
use crate::morphology::{
    grammatical_ending, inflect, matches_form, place_particle, split_reflexive,
};
use crate::types::{category_root, QuestionMode};
use rand::Rng;

/// Replaces the hidden word in a cloze prompt.
pub const BLANK: &str = "_____";

const SENTENCE_ENDS: &[char] = &['.', '!', '?', '…'];

/// Split running text into sentences. A terminator only ends a sentence when
/// followed by whitespace or the end of text, so `...` and `3.5` stay intact.
pub fn split_sentences(text: &str) -> Vec<&str> {
    let mut out = Vec::new();
    let mut start = 0;
    for (i, c) in text.char_indices() {
        let after = i + c.len_utf8();
        let end = if c == '\n' {
            Some(i)
        } else if SENTENCE_ENDS.contains(&c)
            && text[after..].chars().next().map_or(true, char::is_whitespace)
        {
            Some(after)
        } else {
            None
        };
        if let Some(end) = end {
            push_trimmed(&mut out, &text[start..end]);
            start = after;
        }
    }
    push_trimmed(&mut out, &text[start..]);
    out
}

fn push_trimmed<'a>(out: &mut Vec<&'a str>, unit: &'a str) {
    let unit = unit.trim();
    if !unit.is_empty() {
        out.push(unit);
    }
}

/// Byte ranges of the words in a sentence, punctuation excluded.
fn words(sentence: &str) -> Vec<(usize, usize)> {
    let mut out = Vec::new();
    let mut start = None;
    for (i, c) in sentence.char_indices() {
        match (c.is_alphabetic(), start) {
            (true, None) => start = Some(i),
            (false, Some(s)) => {
                out.push((s, i));
                start = None;
            }
            _ => {}
        }
    }
    if let Some(s) = start {
        out.push((s, sentence.len()));
    }
    out
}

/// Find the lemma in a sentence. For reflexive lemmas a particle standing
/// right next to the verb is taken into the blank as well.
fn locate(sentence: &str, lemma: &str, category: Option<&str>) -> Option<(usize, usize)> {
    let words = words(sentence);
    let index = words
        .iter()
        .position(|&(s, e)| matches_form(lemma, &sentence[s..e], category))?;
    let (mut start, mut end) = words[index];

    if let Some((particle, _)) = split_reflexive(lemma).particle {
        let is_particle = |w: &(usize, usize)| sentence[w.0..w.1].eq_ignore_ascii_case(particle);
        let only_space = |from: usize, to: usize| sentence[from..to].chars().all(char::is_whitespace);

        let before = index.checked_sub(1).and_then(|i| words.get(i));
        let after = words.get(index + 1);
        if let Some(&(s, _)) = before.filter(|w| is_particle(*w) && only_space(w.1, start)) {
            start = s;
        } else if let Some(&(_, e)) = after.filter(|w| is_particle(*w) && only_space(end, w.0)) {
            end = e;
        }
    }
    Some((start, end))
}

/// `ě` is a spelling of `e` after some consonants, so tails compare without it.
fn fold(text: &str) -> String {
    text.to_lowercase().replace('ě', "e")
}

fn tail(chars: &[char], keep: usize) -> String {
    chars[chars.len() - keep.min(chars.len())..].iter().collect()
}

/// Tail the distractors must share with the correct answer: the last two
/// letters of its grammatical ending, or a slice of the word itself.
fn suffix_pattern(correct: &str, category: Option<&str>) -> String {
    if let Some(ending) = grammatical_ending(correct, category) {
        let chars: Vec<char> = fold(&ending).chars().collect();
        return tail(&chars, 2);
    }
    let lower = fold(correct);
    let chars: Vec<char> = split_reflexive(&lower).head.chars().collect();
    tail(&chars, (chars.len() / 3).clamp(1, 4))
}

/// Negative prefix on a verb form.
const NEGATION: &str = "ne";

/// Whether the answer is the lemma's verb with the negative prefix in front.
fn is_negated(lemma: &str, answer_head: &str, category: Option<&str>) -> bool {
    let is_verb = category.is_some_and(|c| category_root(c).eq_ignore_ascii_case("verb"));
    is_verb
        && !split_reflexive(&lemma.to_lowercase()).head.starts_with(NEGATION)
        && answer_head
            .strip_prefix(NEGATION)
            .is_some_and(|bare| matches_form(lemma, bare, category))
}

pub(super) fn build<C, R>(
    corpus: &C,
    target: &Target<'_>,
    count: usize,
    rng: &mut R,
) -> Option<Draft>
where
    C: Corpus + ?Sized,
    R: Rng + ?Sized,
{
    let entry = target.entry;
    let lemma = entry.canonical_lemma();
    let category = entry.category();

    let (sentence, (start, end)) = split_sentences(entry.example()?)
        .into_iter()
        .find_map(|sentence| locate(sentence, lemma, category).map(|span| (sentence, span)))?;

    let correct = normalize_whitespace(&sentence[start..end]);
    let prompt = format!("{}{}{}", &sentence[..start], BLANK, &sentence[end..]);

    let correct_lower = correct.to_lowercase();
    let lemma_lower = lemma.to_lowercase();
    let correct_split = split_reflexive(&correct_lower);
    let lemma_split = split_reflexive(&lemma_lower);
    let reflexive = lemma_split.is_reflexive();
    let negated = is_negated(lemma, correct_split.head, category);
    let bare_head = if negated {
        &correct_split.head[NEGATION.len()..]
    } else {
        correct_split.head
    };
    let reference = correct_lower.replacen(correct_split.head, bare_head, 1);
    let uninflected = bare_head == lemma_split.head;
    let pattern = suffix_pattern(&correct, category);

    let mut collector = OptionCollector::new(count);
    collector.reserve(lemma);
    collector.reserve(&correct);

    fill(corpus, target, &mut collector, rng, |candidate, collector| {
        let candidate_lemma = candidate.canonical_lemma();
        if split_reflexive(candidate_lemma).is_reflexive() != reflexive {
            return;
        }

        let form = inflect(candidate_lemma, candidate.category(), &reference);
        let form_split = split_reflexive(&form);
        if !uninflected && !fold(form_split.head).ends_with(&pattern) {
            return;
        }

        let head = if negated {
            format!("{NEGATION}{}", form_split.head)
        } else {
            form_split.head.to_string()
        };
        let placed = match (correct_split.particle, form_split.particle) {
            (Some((_, placement)), Some((particle, _))) => {
                place_particle(&head, particle, placement)
            }
            _ => head,
        };
        collector.offer(match_capitalization(&placed, &correct));
    });

    Some(Draft {
        prompt,
        correct_answer: correct,
        distractors: collector.into_options(),
        mode: QuestionMode::Cloze,
        hint: entry
            .example_translation
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(str::to_string),
    })
}
