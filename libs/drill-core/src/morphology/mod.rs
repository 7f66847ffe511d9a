//! Czech morphology: recognising inflected forms of a lemma and producing
//! forms that agree with a reference word.
//!
//! Everything here is table driven (see the submodules) and approximate.
//! Generated forms are only ever offered as wrong options, so a slightly
//! off form is acceptable; a panic or a mangled diacritic is not.
//!
//! All functions are case-insensitive. Output keeps the capitalisation of
//! the lemma it was built from.

mod adjective;
mod noun;
mod rules;
mod verb;

use crate::matching::match_capitalization;
use crate::types::category_root;
use noun::Gender;
use rules::{char_len, REFLEXIVE_PARTICLES};

/// Where a reflexive particle sits relative to its verb.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placement {
    /// `se smát`
    Leading,
    /// `smát se`
    Trailing,
}

/// A word split from its reflexive particle, if it has one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Reflexive<'a> {
    pub head: &'a str,
    pub particle: Option<(&'a str, Placement)>,
}

impl Reflexive<'_> {
    pub fn is_reflexive(&self) -> bool {
        self.particle.is_some()
    }
}

fn is_particle(word: &str) -> bool {
    REFLEXIVE_PARTICLES
        .iter()
        .any(|p| p.eq_ignore_ascii_case(word))
}

/// Split `smát se` / `se směju` into head word and particle.
pub fn split_reflexive(text: &str) -> Reflexive<'_> {
    let words: Vec<&str> = text.split_whitespace().collect();
    match words.as_slice() {
        [head, particle] if is_particle(particle) && !is_particle(head) => Reflexive {
            head: *head,
            particle: Some((*particle, Placement::Trailing)),
        },
        [particle, head] if is_particle(particle) && !is_particle(head) => Reflexive {
            head: *head,
            particle: Some((*particle, Placement::Leading)),
        },
        _ => Reflexive {
            head: text.trim(),
            particle: None,
        },
    }
}

/// Join a head word and particle in the requested order.
pub fn place_particle(head: &str, particle: &str, placement: Placement) -> String {
    match placement {
        Placement::Leading => format!("{particle} {head}"),
        Placement::Trailing => format!("{head} {particle}"),
    }
}

/// Part of speech as far as inflection is concerned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum WordClass {
    Verb,
    Noun(Option<Gender>),
    Adjective,
}

fn word_class(category: Option<&str>) -> Option<WordClass> {
    let category = category?.trim();
    match category_root(category).to_lowercase().as_str() {
        "verb" => Some(WordClass::Verb),
        "noun" => Some(WordClass::Noun(Gender::from_category(category))),
        "adjective" | "adj" => Some(WordClass::Adjective),
        _ => None,
    }
}

fn citation_forms(lemma: &str) -> impl Iterator<Item = String> + '_ {
    lemma
        .split(',')
        .map(|form| form.trim().to_lowercase())
        .filter(|form| !form.is_empty())
}

fn known_forms(head: &str, class: WordClass) -> Vec<String> {
    match class {
        WordClass::Verb => verb::forms(head),
        WordClass::Noun(gender) => noun::forms(head, gender),
        WordClass::Adjective => adjective::forms(head),
    }
}

/// Whether `token` is `lemma` itself or one of its inflected forms.
pub fn matches_form(lemma: &str, token: &str, category: Option<&str>) -> bool {
    let token = token.trim().to_lowercase();
    if token.is_empty() {
        return false;
    }

    let class = word_class(category);
    for citation in citation_forms(lemma) {
        if citation == token {
            return true;
        }

        let head = split_reflexive(&citation).head.to_string();
        if char_len(&head) <= 2 || head.contains(char::is_whitespace) {
            continue;
        }
        let Some(class) = class else {
            continue;
        };

        let forms = known_forms(&head, class);
        if forms.contains(&token) {
            return true;
        }
        if class == WordClass::Verb {
            if let Some(bare) = token.strip_prefix("ne") {
                if forms.iter().any(|form| form == bare) {
                    return true;
                }
            }
        }
    }
    false
}

/// Inflect `lemma` into the slot that `reference` is in. Returns the lemma
/// unchanged when its class or the reference's slot cannot be determined.
pub fn inflect(lemma: &str, category: Option<&str>, reference: &str) -> String {
    let Some(citation) = citation_forms(lemma).next() else {
        return lemma.to_string();
    };
    let reference = reference.trim().to_lowercase();

    let target = split_reflexive(&citation);
    let reference_split = split_reflexive(&reference);
    let head = target.head;
    let reference_head = reference_split.head;

    let inflected = match word_class(category) {
        _ if head.contains(char::is_whitespace) => None,
        Some(WordClass::Verb) => {
            verb::detect_slot(reference_head).and_then(|slot| verb::conjugate(head, slot))
        }
        Some(WordClass::Noun(gender)) => {
            noun::decline(head, gender, noun::detect_slot(reference_head, gender))
        }
        Some(WordClass::Adjective) => adjective::agree(head, reference_head),
        None => None,
    }
    .unwrap_or_else(|| head.to_string());

    let joined = match target.particle {
        Some((particle, placement)) => {
            let placement = reference_split
                .particle
                .map(|(_, p)| p)
                .unwrap_or(placement);
            place_particle(&inflected, particle, placement)
        }
        None => inflected,
    };

    match_capitalization(&joined, lemma.trim())
}

/// The grammatical ending a form shows for its category, if one is recognised.
pub fn grammatical_ending(form: &str, category: Option<&str>) -> Option<String> {
    let lower = form.trim().to_lowercase();
    let head = split_reflexive(&lower).head;
    let ending = match word_class(category)? {
        WordClass::Verb => verb::ending(head),
        WordClass::Noun(gender) => noun::ending(head, gender),
        WordClass::Adjective => adjective::ending(head),
    }?;
    Some(ending.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn exact_match_ignores_case() {
        assert!(matches_form("Praha", "PRAHA", Some("noun-f")));
        assert!(matches_form("a", "A", None));
    }

    #[test]
    fn short_lemmas_only_match_exactly() {
        assert!(!matches_form("on", "ona", Some("pronoun")));
        assert!(!matches_form("ty", "tebe", Some("verb")));
    }

    #[test]
    fn verb_forms_match() {
        assert!(matches_form("dělat", "dělají", Some("verb")));
        assert!(matches_form("pracovat", "pracuju", Some("verb")));
        assert!(matches_form("být", "jsou", Some("verb")));
        assert!(matches_form("přijít", "přišla", Some("verb-pf")));
        assert!(matches_form("mít", "nemám", Some("verb")));
        assert!(matches_form("dělat", "dělati", Some("verb")));
        assert!(!matches_form("dělat", "dům", Some("verb")));
    }

    #[test]
    fn reflexive_lemma_matches_head() {
        assert!(matches_form("smát se", "směju", Some("verb")));
        assert!(matches_form("učit se", "učím", Some("verb")));
    }

    #[test]
    fn noun_forms_match_by_gender() {
        assert!(matches_form("žena", "ženě", Some("noun-f")));
        assert!(matches_form("ruka", "ruce", Some("noun-f")));
        assert!(matches_form("stůl", "stolu", Some("noun-m-inanim")));
        assert!(matches_form("město", "městech", Some("noun-n")));
        assert!(!matches_form("město", "ženě", Some("noun-n")));
    }

    #[test]
    fn adjective_forms_match() {
        assert!(matches_form("nový", "novou", Some("adjective")));
        assert!(matches_form("jarní", "jarních", Some("adjective")));
    }

    #[test]
    fn unknown_category_needs_exact_match() {
        assert!(!matches_form("dělat", "dělají", None));
        assert!(!matches_form("rychle", "rychleji", Some("adverb")));
    }

    #[test]
    fn citation_forms_all_count() {
        assert!(matches_form("moci, moct", "můžeš", Some("verb")));
        assert!(matches_form("moci, moct", "moct", Some("verb")));
    }

    #[test]
    fn inflect_verbs() {
        assert_eq!(inflect("mluvit", Some("verb"), "dělají"), "mluví");
        assert_eq!(inflect("pracovat", Some("verb"), "psala"), "pracovala");
        assert_eq!(inflect("jít", Some("verb"), "děláme"), "jdeme");
        assert_eq!(inflect("dělat", Some("verb"), "dělat"), "dělat");
    }

    #[test]
    fn inflect_nouns_keep_capitals_and_diacritics() {
        assert_eq!(inflect("Praha", Some("noun-f"), "ženě"), "Praze");
        assert_eq!(inflect("škola", Some("noun-f"), "ženou"), "školou");
        assert_eq!(inflect("řeka", Some("noun-f"), "ženami"), "řekami");
    }

    #[test]
    fn inflect_falls_back_to_lemma() {
        assert_eq!(inflect("péct", Some("verb"), "dělám"), "péct");
        assert_eq!(inflect("rychle", Some("adverb"), "pomalu"), "rychle");
        assert_eq!(inflect("mít rád", Some("verb"), "dělám"), "mít rád");
        assert_eq!(inflect("kost", None, "ženě"), "kost");
    }

    #[test]
    fn inflect_reflexive_follows_reference_placement() {
        assert_eq!(inflect("učit se", Some("verb"), "se směju"), "se učím");
        assert_eq!(inflect("bát se", Some("verb"), "smějí se"), "bojí se");
        assert_eq!(inflect("učit se", Some("verb"), "směju"), "učím se");
    }

    #[test]
    fn split_reflexive_placements() {
        let split = split_reflexive("smát se");
        assert_eq!(split.head, "smát");
        assert_eq!(split.particle, Some(("se", Placement::Trailing)));

        let split = split_reflexive("si koupím");
        assert_eq!(split.head, "koupím");
        assert_eq!(split.particle, Some(("si", Placement::Leading)));

        assert!(!split_reflexive("dělat").is_reflexive());
        assert!(!split_reflexive("mít rád").is_reflexive());
    }

    #[test]
    fn grammatical_endings() {
        assert_eq!(grammatical_ending("dělají", Some("verb")).as_deref(), Some("ají"));
        assert_eq!(grammatical_ending("ženami", Some("noun-f")).as_deref(), Some("ami"));
        assert_eq!(grammatical_ending("novou", Some("adjective")).as_deref(), Some("ou"));
        assert_eq!(grammatical_ending("smějí se", Some("verb")).as_deref(), Some("ějí"));
        assert_eq!(grammatical_ending("dům", Some("adverb")), None);
    }
}
