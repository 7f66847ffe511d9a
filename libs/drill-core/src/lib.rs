//! Core vocabulary drill library for Czech.
//!
//! Provides:
//! - Lexicon file parser
//! - Leitner-style session scheduler interleaving new cards with due reviews
//! - Level progression driven by rolling accuracy
//! - Question generation (flashcards and cloze sentences with inflected distractors)
//! - Table-driven Czech morphology for recognising and producing word forms
//! - The drill engine tying it all together

pub mod algorithm;
pub mod clock;
pub mod corpus;
pub mod engine;
pub mod error;
pub mod labels;
pub mod matching;
pub mod morphology;
pub mod parser;
pub mod progression;
pub mod question;
pub mod scheduler;
pub mod types;

pub use algorithm::{Leitner, SchedulingResult, SpacedRepetitionAlgorithm};
pub use clock::{Clock, ManualClock, SystemClock};
pub use corpus::{Corpus, InMemoryCorpus};
pub use engine::{AnswerOutcome, Engine, FeedbackSink, NullFeedback};
pub use error::{DrillError, DrillResult, ParseError, Result};
pub use labels::category_label;
pub use matching::{compare_answers, MatchResult};
pub use parser::parse;
pub use progression::{evaluate, Decision, Evaluation, LevelState, Transition};
pub use question::{QuestionGenerator, BLANK, MAX_DISTRACTORS};
pub use scheduler::{DrawSource, Scheduler, SchedulerStats};
pub use types::{
    Card, CardId, DrillSettings, DueOrder, EntryId, FeedbackEvent, LexicalEntry, Level,
    LevelThresholds, Question, QuestionMode, StatsSnapshot,
};
