//! Loading lexicon files: the block format or a JSON array of entries.

use std::path::Path;

use anyhow::Context;
use drill_core::LexicalEntry;

/// Read and parse a lexicon file. `.json` files, or content starting with
/// `[`, are read as JSON.
pub fn load(path: &Path) -> anyhow::Result<Vec<LexicalEntry>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("reading lexicon {}", path.display()))?;
    let json = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
    parse_content(&content, json).with_context(|| format!("parsing lexicon {}", path.display()))
}

pub fn parse_content(content: &str, json: bool) -> anyhow::Result<Vec<LexicalEntry>> {
    if json || content.trim_start().starts_with('[') {
        let entries: Vec<LexicalEntry> = serde_json::from_str(content)?;
        anyhow::ensure!(!entries.is_empty(), "lexicon has no entries");
        Ok(entries)
    } else {
        Ok(drill_core::parse(content)?)
    }
}
