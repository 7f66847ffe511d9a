//! Lexicon file parser.
//!
//! # Format
//! ```text
//! LEMMA: smát se
//! TRANSLATION: to laugh
//! CATEGORY: verb
//! LEVEL: A2
//! EXAMPLE: Děti se smějí.
//! EXAMPLE_TRANSLATION: The children are laughing.
//!
//! LEMMA: žena
//! TRANSLATION: woman
//! CATEGORY: noun-f
//! ```
//!
//! Entries are separated by blank lines. A line without a field name
//! continues the previous field. Lines starting with `#` are comments.

use crate::error::{ParseError, Result};
use crate::types::{LexicalEntry, Level};
use std::collections::HashSet;

/// Parse lexicon content into entries, in file order.
pub fn parse(content: &str) -> Result<Vec<LexicalEntry>> {
    let mut parser = Parser::new();

    for (idx, line) in content.lines().enumerate() {
        parser.process_line(line, idx + 1)?;
    }

    let entries = parser.finalize()?;
    if entries.is_empty() {
        return Err(ParseError::EmptyFile);
    }
    Ok(entries)
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Field {
    Lemma,
    Translation,
    Category,
    Level,
    Pronunciation,
    Example,
    ExampleTranslation,
}

impl Field {
    /// Longest names first so `EXAMPLE_TRANSLATION:` is not read as `EXAMPLE:`.
    const PREFIXES: [(&'static str, Field); 7] = [
        ("EXAMPLE_TRANSLATION:", Field::ExampleTranslation),
        ("PRONUNCIATION:", Field::Pronunciation),
        ("TRANSLATION:", Field::Translation),
        ("CATEGORY:", Field::Category),
        ("EXAMPLE:", Field::Example),
        ("LEMMA:", Field::Lemma),
        ("LEVEL:", Field::Level),
    ];
}

#[derive(Default)]
struct EntryBuilder {
    lemma: Option<String>,
    translation: Option<String>,
    category: Option<String>,
    level: Option<(String, usize)>,
    pronunciation: Option<String>,
    example: Option<String>,
    example_translation: Option<String>,
    start_line: usize,
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

impl EntryBuilder {
    fn new(start_line: usize) -> Self {
        Self {
            start_line,
            ..Self::default()
        }
    }

    fn set(&mut self, field: Field, content: String, line: usize) {
        match field {
            Field::Lemma => self.lemma = Some(content),
            Field::Translation => self.translation = Some(content),
            Field::Category => self.category = Some(content),
            Field::Level => self.level = Some((content, line)),
            Field::Pronunciation => self.pronunciation = Some(content),
            Field::Example => self.example = Some(content),
            Field::ExampleTranslation => self.example_translation = Some(content),
        }
    }

    fn build(self) -> Result<LexicalEntry> {
        let lemma = non_empty(self.lemma).ok_or(ParseError::MissingLemma {
            line: self.start_line,
        })?;
        let translation =
            non_empty(self.translation).ok_or_else(|| ParseError::MissingTranslation {
                lemma: lemma.clone(),
                line: self.start_line,
            })?;

        let level = match self.level {
            Some((value, line)) if !value.trim().is_empty() => Some(
                Level::from_str(value.trim())
                    .ok_or(ParseError::InvalidLevel { line, value: value.trim().to_string() })?,
            ),
            _ => None,
        };

        Ok(LexicalEntry {
            lemma,
            translation,
            category: non_empty(self.category),
            level,
            pronunciation: non_empty(self.pronunciation),
            example: non_empty(self.example),
            example_translation: non_empty(self.example_translation),
        })
    }
}

struct Parser {
    current: Option<EntryBuilder>,
    current_field: Option<(Field, usize)>,
    buffer: Vec<String>,
    entries: Vec<LexicalEntry>,
    seen: HashSet<(String, String)>,
}

impl Parser {
    fn new() -> Self {
        Self {
            current: None,
            current_field: None,
            buffer: Vec::new(),
            entries: Vec::new(),
            seen: HashSet::new(),
        }
    }

    fn process_line(&mut self, line: &str, line_num: usize) -> Result<()> {
        match Self::parse_line(line) {
            LineType::Field(field, text) => self.handle_field(field, text, line_num),
            LineType::Text(text) => self.buffer.push(text.to_string()),
            LineType::Comment => {}
            LineType::Empty => self.finish_entry()?,
        }
        Ok(())
    }

    fn parse_line(line: &str) -> LineType<'_> {
        let trimmed = line.trim();

        if trimmed.is_empty() {
            return LineType::Empty;
        }
        if trimmed.starts_with('#') {
            return LineType::Comment;
        }
        Field::PREFIXES
            .iter()
            .find_map(|(prefix, field)| {
                trimmed
                    .strip_prefix(prefix)
                    .map(|rest| LineType::Field(*field, rest.trim()))
            })
            .unwrap_or(LineType::Text(trimmed))
    }

    fn handle_field(&mut self, field: Field, text: &str, line_num: usize) {
        self.flush_buffer();

        if self.current.is_none() {
            self.current = Some(EntryBuilder::new(line_num));
        }

        self.current_field = Some((field, line_num));
        self.buffer.push(text.to_string());
    }

    fn flush_buffer(&mut self) {
        if self.buffer.is_empty() {
            return;
        }

        let content = self.buffer.join("\n");
        self.buffer.clear();

        if let (Some(entry), Some((field, line))) = (self.current.as_mut(), self.current_field) {
            entry.set(field, content, line);
        }
    }

    fn finish_entry(&mut self) -> Result<()> {
        self.flush_buffer();
        self.current_field = None;

        let Some(builder) = self.current.take() else {
            return Ok(());
        };
        let line = builder.start_line;
        let entry = builder.build()?;

        let key = (
            entry.lemma.to_lowercase(),
            entry.category.as_deref().unwrap_or_default().to_lowercase(),
        );
        if !self.seen.insert(key) {
            return Err(ParseError::DuplicateEntry {
                lemma: entry.lemma,
                line,
            });
        }

        self.entries.push(entry);
        Ok(())
    }

    fn finalize(mut self) -> Result<Vec<LexicalEntry>> {
        self.finish_entry()?;
        Ok(self.entries)
    }
}

enum LineType<'a> {
    Field(Field, &'a str),
    Text(&'a str),
    Comment,
    Empty,
}
