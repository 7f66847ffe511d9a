//! Display labels for grammatical categories.

/// Category prefix to label. Lookup takes the longest matching prefix.
const CATEGORY_LABELS: &[(&str, &str)] = &[
    ("noun", "noun"),
    ("noun-m", "noun, masculine"),
    ("noun-m-anim", "noun, masculine animate"),
    ("noun-m-inanim", "noun, masculine inanimate"),
    ("noun-f", "noun, feminine"),
    ("noun-n", "noun, neuter"),
    ("noun-pl", "noun, plural only"),
    ("verb", "verb"),
    ("verb-refl", "verb, reflexive"),
    ("verb-pf", "verb, perfective"),
    ("verb-impf", "verb, imperfective"),
    ("adjective", "adjective"),
    ("adjective-soft", "adjective, soft"),
    ("adverb", "adverb"),
    ("numeral", "numeral"),
    ("pronoun", "pronoun"),
    ("possessive", "possessive pronoun"),
    ("determiner", "determiner"),
    ("preposition", "preposition"),
    ("conjunction", "conjunction"),
    ("particle", "particle"),
    ("interjection", "interjection"),
    ("phrase", "phrase"),
];

/// Label for a category, `None` for unknown or missing categories.
pub fn category_label(category: Option<&str>) -> Option<&'static str> {
    let category = category?.trim().to_lowercase();
    CATEGORY_LABELS
        .iter()
        .filter(|(prefix, _)| {
            category == *prefix
                || category
                    .strip_prefix(prefix)
                    .is_some_and(|rest| rest.starts_with('-'))
        })
        .max_by_key(|(prefix, _)| prefix.len())
        .map(|(_, label)| *label)
}
