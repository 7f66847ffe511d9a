//! Common test utilities and fixtures for integration tests.
//!
//! Everything is deterministic: a `ManualClock` shared through `Rc` so the
//! test can move time while the engine holds it, and a seeded `StdRng`.

#![allow(dead_code)]

pub mod fixtures;

use std::collections::HashSet;
use std::rc::Rc;

use drill_core::matching::primary_form;
use drill_core::{
    parse, DrillSettings, Engine, EntryId, FeedbackEvent, InMemoryCorpus, Level, ManualClock,
    Question,
};
use rand::rngs::StdRng;
use rand::SeedableRng;

pub type TestEngine = Engine<InMemoryCorpus, Rc<ManualClock>, StdRng, Vec<FeedbackEvent>>;

/// The fixture lexicon as a corpus.
pub fn corpus() -> InMemoryCorpus {
    InMemoryCorpus::new(parse(fixtures::LEXICON).expect("fixture lexicon parses"))
}

/// Id of the fixture entry with this lemma.
pub fn entry_id(corpus: &InMemoryCorpus, lemma: &str) -> EntryId {
    use drill_core::Corpus;
    corpus
        .entries()
        .iter()
        .position(|e| e.lemma == lemma)
        .unwrap_or_else(|| panic!("no fixture entry {lemma}"))
}

/// Settings that only ever ask flashcards.
pub fn flashcard_settings() -> DrillSettings {
    DrillSettings {
        cloze_probability: 0.0,
        ..DrillSettings::default()
    }
}

/// Engine over `corpus` started at `level`, plus a handle on its clock.
pub fn engine_with(
    corpus: InMemoryCorpus,
    settings: DrillSettings,
    level: Level,
    seed: u64,
) -> (TestEngine, Rc<ManualClock>) {
    let clock = Rc::new(ManualClock::new(fixtures::start_time()));
    let mut engine = Engine::new(
        corpus,
        settings,
        Rc::clone(&clock),
        StdRng::seed_from_u64(seed),
        Vec::new(),
    );
    engine.start(level);
    (engine, clock)
}

/// Engine over the fixture lexicon at A1.
pub fn engine(settings: DrillSettings) -> (TestEngine, Rc<ManualClock>) {
    engine_with(corpus(), settings, Level::A1, 7)
}

/// Check the option contract every question must satisfy.
pub fn assert_options_valid(question: &Question) {
    assert!(
        question.options.len() <= 4,
        "too many options: {:?}",
        question.options
    );
    let hits = question
        .options
        .iter()
        .filter(|o| **o == question.correct_answer)
        .count();
    assert_eq!(hits, 1, "correct answer not exactly once: {question:?}");
    let forms: HashSet<String> = question.options.iter().map(|o| primary_form(o)).collect();
    assert_eq!(
        forms.len(),
        question.options.len(),
        "duplicate primary forms: {:?}",
        question.options
    );
}
