//! Core types for the drill engine.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Index of an entry in corpus order.
pub type EntryId = usize;

/// Scheduler-assigned card identifier.
pub type CardId = u64;

/// Proficiency level, ordered from beginner to advanced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Level {
    A1,
    A2,
    B1,
    B2,
    C1,
}

impl Default for Level {
    fn default() -> Self {
        Self::A1
    }
}

impl Level {
    /// All levels in ascending order.
    pub const ALL: [Level; 5] = [Level::A1, Level::A2, Level::B1, Level::B2, Level::C1];

    /// Get the level name as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::A1 => "A1",
            Self::A2 => "A2",
            Self::B1 => "B1",
            Self::B2 => "B2",
            Self::C1 => "C1",
        }
    }

    /// Parse from string (case-insensitive).
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_ascii_uppercase().as_str() {
            "A1" => Some(Self::A1),
            "A2" => Some(Self::A2),
            "B1" => Some(Self::B1),
            "B2" => Some(Self::B2),
            "C1" => Some(Self::C1),
            _ => None,
        }
    }

    /// The level above this one, if any.
    pub fn next(self) -> Option<Self> {
        let idx = self.index();
        Self::ALL.get(idx + 1).copied()
    }

    /// The level below this one, if any.
    pub fn previous(self) -> Option<Self> {
        let idx = self.index();
        idx.checked_sub(1).map(|i| Self::ALL[i])
    }

    fn index(self) -> usize {
        self as usize
    }
}

/// A word entry supplied by the corpus. Never mutated by the engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LexicalEntry {
    /// One or more comma-separated citation forms; the first is canonical.
    pub lemma: String,
    pub translation: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub level: Option<Level>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pronunciation: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub example: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub example_translation: Option<String>,
}

impl LexicalEntry {
    /// Create an entry with only the required fields set.
    pub fn new(lemma: impl Into<String>, translation: impl Into<String>) -> Self {
        Self {
            lemma: lemma.into(),
            translation: translation.into(),
            category: None,
            level: None,
            pronunciation: None,
            example: None,
            example_translation: None,
        }
    }

    /// First citation form of the lemma.
    pub fn canonical_lemma(&self) -> &str {
        self.lemma.split(',').next().unwrap_or_default().trim()
    }

    /// Category with surrounding whitespace removed, `None` when blank.
    pub fn category(&self) -> Option<&str> {
        self.category
            .as_deref()
            .map(str::trim)
            .filter(|c| !c.is_empty())
    }

    /// Example text, `None` when blank.
    pub fn example(&self) -> Option<&str> {
        self.example
            .as_deref()
            .map(str::trim)
            .filter(|e| !e.is_empty())
    }
}

/// Leading segment of a category string.
pub fn category_root(category: &str) -> &str {
    category
        .split(|c: char| c == '-' || c == '_' || c == ' ' || c == '/')
        .next()
        .unwrap_or(category)
}

/// A schedulable drill unit bound to one corpus entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Card {
    pub id: CardId,
    pub entry: EntryId,
    pub bucket: usize,
    pub due: DateTime<Utc>,
    pub consecutive_correct: u32,
    pub cloze_eligible: bool,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub meta: BTreeMap<String, String>,
}

/// How a question is asked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestionMode {
    /// Show the lemma, pick the translation.
    Flashcard,
    /// Show a sentence with a blank, pick the missing word form.
    Cloze,
}

/// One question ready for rendering.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Question {
    pub card_id: CardId,
    pub prompt: String,
    pub correct_answer: String,
    pub options: Vec<String>,
    pub mode: QuestionMode,
    pub is_review: bool,
    /// Display label of the entry's category.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pronunciation: Option<String>,
    /// Translation of the cloze sentence.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
}

/// Snapshot handed to the rendering side after every action.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StatsSnapshot {
    pub review_count: usize,
    pub accuracy_percent: u32,
    pub streak: u32,
    pub best_streak: u32,
    pub level: Level,
    pub locked: bool,
}

/// Categorical events for the feedback collaborator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FeedbackEvent {
    AnsweredCorrect,
    AnsweredIncorrect,
    ReviewReintroduced,
    LevelAdvanced,
    LevelRegressed,
    LevelLockToggled,
}

/// Accuracy thresholds for leaving a level.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LevelThresholds {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub up: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub down: Option<f64>,
}

impl LevelThresholds {
    /// Default thresholds: the floor level cannot regress, the ceiling cannot advance.
    pub fn default_for(level: Level) -> Self {
        let up = level.next().map(|_| 0.85);
        let down = level.previous().map(|_| 0.6);
        Self { up, down }
    }
}

/// Which due card the scheduler hands out first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DueOrder {
    /// First overdue card in the order cards became reviewable.
    InsertionOrder,
    /// Overdue card with the earliest due time.
    EarliestDue,
}

impl Default for DueOrder {
    fn default() -> Self {
        Self::InsertionOrder
    }
}

/// Session configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DrillSettings {
    /// Review delay per bucket, in minutes.
    pub intervals_minutes: Vec<i64>,
    /// Answers required before a level evaluation happens.
    pub min_sample: u32,
    pub thresholds: BTreeMap<Level, LevelThresholds>,
    pub cloze_probability: f64,
    /// Wrong options per question, capped at three.
    pub distractor_count: usize,
    pub due_order: DueOrder,
    /// Consecutive correct answers in the top bucket before a card is retired.
    pub retire_after: Option<u32>,
    /// Category roots never used for cloze questions.
    pub cloze_banned_categories: Vec<String>,
}

impl Default for DrillSettings {
    fn default() -> Self {
        Self {
            intervals_minutes: vec![0, 2, 5, 10, 20],
            min_sample: 20,
            thresholds: Level::ALL
                .iter()
                .map(|&level| (level, LevelThresholds::default_for(level)))
                .collect(),
            cloze_probability: 0.5,
            distractor_count: 3,
            due_order: DueOrder::default(),
            retire_after: Some(6),
            cloze_banned_categories: ["numeral", "pronoun", "possessive", "determiner"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
        }
    }
}

impl DrillSettings {
    /// Thresholds for a level, falling back to the defaults for that level.
    pub fn thresholds_for(&self, level: Level) -> LevelThresholds {
        self.thresholds
            .get(&level)
            .copied()
            .unwrap_or_else(|| LevelThresholds::default_for(level))
    }

    /// Whether a category may be drilled as a cloze question.
    pub fn cloze_allowed(&self, category: Option<&str>) -> bool {
        match category {
            Some(category) => {
                let root = category_root(category).to_lowercase();
                !self
                    .cloze_banned_categories
                    .iter()
                    .any(|banned| banned.eq_ignore_ascii_case(&root))
            }
            None => false,
        }
    }
}
