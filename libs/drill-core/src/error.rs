//! Error types for drill-core.

use crate::types::CardId;
use thiserror::Error;

/// Result type alias using ParseError.
pub type Result<T> = std::result::Result<T, ParseError>;

/// Result type alias for engine calls.
pub type DrillResult<T> = std::result::Result<T, DrillError>;

/// Errors that can occur while reading a lexicon file.
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("missing lemma in entry starting at line {line}")]
    MissingLemma { line: usize },

    #[error("missing translation for '{lemma}' at line {line}")]
    MissingTranslation { lemma: String, line: usize },

    #[error("invalid level at line {line}: {value}")]
    InvalidLevel { line: usize, value: String },

    #[error("duplicate entry '{lemma}' at line {line}")]
    DuplicateEntry { lemma: String, line: usize },

    #[error("empty file")]
    EmptyFile,
}

/// Misuse of the drill engine by its caller.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DrillError {
    #[error("no question is waiting for an answer")]
    NoActiveQuestion,

    #[error("card {got} is not the active question (expected {expected})")]
    WrongCard { expected: CardId, got: CardId },

    #[error("unknown level: {0}")]
    UnknownLevel(String),
}
