//! Read-only access to the lexical corpus.

use crate::types::{EntryId, LexicalEntry, Level};
use std::collections::HashSet;

/// Read-only view over an ordered collection of entries.
pub trait Corpus {
    /// All entries in corpus order.
    fn entries(&self) -> &[LexicalEntry];

    /// Whether a lemma is on the exclusion list.
    fn is_excluded(&self, lemma: &str) -> bool;

    fn get(&self, id: EntryId) -> Option<&LexicalEntry> {
        self.entries().get(id)
    }

    /// Entries tagged with `level`.
    fn at_level(&self, level: Level) -> Vec<EntryId> {
        self.entries()
            .iter()
            .enumerate()
            .filter(|(_, e)| e.level == Some(level))
            .map(|(id, _)| id)
            .collect()
    }

    /// Entries whose category starts with `prefix` (case-insensitive).
    fn with_category_prefix(&self, prefix: &str) -> Vec<EntryId> {
        let prefix = prefix.to_lowercase();
        self.entries()
            .iter()
            .enumerate()
            .filter(|(_, e)| {
                e.category()
                    .is_some_and(|c| c.to_lowercase().starts_with(&prefix))
            })
            .map(|(id, _)| id)
            .collect()
    }
}

/// Corpus held in memory with a lowercase exclusion list.
#[derive(Debug, Clone, Default)]
pub struct InMemoryCorpus {
    entries: Vec<LexicalEntry>,
    excluded: HashSet<String>,
}

impl InMemoryCorpus {
    pub fn new(entries: Vec<LexicalEntry>) -> Self {
        Self {
            entries,
            excluded: HashSet::new(),
        }
    }

    /// Add lemmas that must never be drilled or offered as options.
    pub fn with_excluded<I, S>(mut self, lemmas: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.excluded
            .extend(lemmas.into_iter().map(|l| l.as_ref().trim().to_lowercase()));
        self
    }
}

impl Corpus for InMemoryCorpus {
    fn entries(&self) -> &[LexicalEntry] {
        &self.entries
    }

    fn is_excluded(&self, lemma: &str) -> bool {
        let lemma = lemma.trim().to_lowercase();
        if self.excluded.contains(&lemma) {
            return true;
        }
        lemma
            .split(',')
            .any(|form| self.excluded.contains(form.trim()))
    }
}
