//! Adjective endings for hard (-ý) and soft (-í) stems.

use super::rules::{join, longest_ending};

/// Whether an adjective declines on the hard or the soft pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Stem {
    Hard,
    Soft,
}

/// Hard endings with their soft counterparts, in the order used to break ties.
/// Each row is one grammatical slot group.
const ENDINGS: &[(&str, &str)] = &[
    ("ý", "í"),
    ("ého", "ího"),
    ("ému", "ímu"),
    ("ém", "ím"),
    ("ým", "ím"),
    ("á", "í"),
    ("é", "í"),
    ("ou", "í"),
    ("í", "í"),
    ("ých", "ích"),
    ("ými", "ími"),
];

/// Split a lemma into stem and pattern.
pub(crate) fn classify(lemma: &str) -> Option<(Stem, &str)> {
    if let Some(stem) = lemma.strip_suffix('ý').filter(|s| !s.is_empty()) {
        return Some((Stem::Hard, stem));
    }
    if let Some(stem) = lemma.strip_suffix('í').filter(|s| !s.is_empty()) {
        return Some((Stem::Soft, stem));
    }
    None
}

/// Every declined form of a lemma.
pub(crate) fn forms(lemma: &str) -> Vec<String> {
    let mut out = vec![lemma.to_string()];
    if let Some((stem_kind, stem)) = classify(lemma) {
        for (hard, soft) in ENDINGS {
            let ending = match stem_kind {
                Stem::Hard => hard,
                Stem::Soft => soft,
            };
            out.push(join(stem, ending));
        }
    }
    out
}

/// Ending slot of a form: index into the ending table plus the pattern it was read from.
pub(crate) fn detect_slot(form: &str) -> Option<(usize, Stem)> {
    let hard = ENDINGS
        .iter()
        .enumerate()
        .map(|(i, (hard, _))| (*hard, (i, Stem::Hard)));
    let soft = ENDINGS
        .iter()
        .enumerate()
        .map(|(i, (_, soft))| (*soft, (i, Stem::Soft)));
    longest_ending(form, hard.chain(soft)).map(|(_, slot)| slot)
}

/// Longest recognised adjective ending of a form.
pub(crate) fn ending(form: &str) -> Option<&'static str> {
    let all = ENDINGS
        .iter()
        .flat_map(|(hard, soft)| [(*hard, ()), (*soft, ())]);
    longest_ending(form, all).map(|(e, _)| e)
}

/// Put `lemma` into the slot that `reference` shows.
pub(crate) fn agree(lemma: &str, reference: &str) -> Option<String> {
    let (stem_kind, stem) = classify(lemma)?;
    let (slot, _) = detect_slot(reference)?;
    let (hard, soft) = ENDINGS.get(slot)?;
    let ending = match stem_kind {
        Stem::Hard => hard,
        Stem::Soft => soft,
    };
    Some(join(stem, ending))
}
