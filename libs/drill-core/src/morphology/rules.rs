//! Shared spelling rules and suffix helpers.

/// Consonants that take soft endings.
pub(crate) const SOFT_CONSONANTS: &[char] = &['ž', 'š', 'č', 'ř', 'c', 'j', 'ď', 'ť', 'ň'];

pub(crate) const VOWELS: &[char] = &[
    'a', 'á', 'e', 'é', 'ě', 'i', 'í', 'o', 'ó', 'u', 'ú', 'ů', 'y', 'ý',
];

/// Endings that trigger consonant mutation on the stem.
const FRONT_VOWELS: &[char] = &['i', 'í', 'ě'];

/// Stem-final consonant changes before a front-vowel ending, longest tail first.
const SOFTENING: &[(&str, &str)] = &[
    ("ck", "čt"),
    ("ch", "š"),
    ("k", "c"),
    ("h", "z"),
    ("g", "z"),
    ("r", "ř"),
];

/// After these consonants `ě` is spelled `e`.
const PLAIN_E_AFTER: &[char] = &['l', 's', 'z', 'c', 'ž', 'š', 'č', 'ř', 'j'];

/// Stem endings that lose their `e` outside the nominative.
const FLEETING_E: &[(&str, &str)] = &[("ek", "k"), ("ec", "c")];

/// Reflexive particles that travel with a verb.
pub(crate) const REFLEXIVE_PARTICLES: &[&str] = &["se", "si"];

/// Verbal prefixes that may sit in front of an irregular verb.
pub(crate) const VERB_PREFIXES: &[&str] = &[
    "", "do", "na", "nad", "o", "ob", "od", "ode", "po", "pod", "pro", "pře", "před", "při", "roz",
    "s", "se", "u", "v", "ve", "vy", "vz", "z", "za", "ze",
];

pub(crate) fn is_consonant(c: char) -> bool {
    c.is_alphabetic() && !VOWELS.contains(&c)
}

pub(crate) fn is_soft(c: char) -> bool {
    SOFT_CONSONANTS.contains(&c)
}

pub(crate) fn last_char(s: &str) -> Option<char> {
    s.chars().last()
}

pub(crate) fn char_len(s: &str) -> usize {
    s.chars().count()
}

/// Attach an ending to a stem, applying consonant mutation and `ě` spelling.
pub(crate) fn join(stem: &str, ending: &str) -> String {
    let mut stem = stem.to_string();
    let first = ending.chars().next();

    if first.is_some_and(|c| FRONT_VOWELS.contains(&c)) {
        if let Some((tail, replacement)) = SOFTENING.iter().find(|(tail, _)| stem.ends_with(tail)) {
            stem.truncate(stem.len() - tail.len());
            stem.push_str(replacement);
        }
    }

    if first == Some('ě') && last_char(&stem).is_some_and(|c| PLAIN_E_AFTER.contains(&c)) {
        let rest = &ending['ě'.len_utf8()..];
        return format!("{stem}e{rest}");
    }

    format!("{stem}{ending}")
}

/// Stem used outside the nominative: drops a fleeting `e` and shortens a
/// final-syllable `ů` to `o` (stůl, dům, kůň).
pub(crate) fn oblique_stem(stem: &str) -> String {
    if let Some((tail, replacement)) = FLEETING_E.iter().find(|(tail, _)| stem.ends_with(tail)) {
        if char_len(stem) > char_len(tail) + 1 {
            return format!("{}{}", &stem[..stem.len() - tail.len()], replacement);
        }
    }

    let chars: Vec<char> = stem.chars().collect();
    let last_vowel = chars.iter().rposition(|c| VOWELS.contains(c));
    match last_vowel {
        Some(pos) if chars[pos] == 'ů' && pos + 1 < chars.len() => chars
            .iter()
            .enumerate()
            .map(|(i, &c)| if i == pos { 'o' } else { c })
            .collect(),
        _ => stem.to_string(),
    }
}

/// Longest entry of `endings` that `word` ends with while leaving a stem.
/// Ties go to the earliest entry.
pub(crate) fn longest_ending<'a, T: Copy>(
    word: &str,
    endings: impl IntoIterator<Item = (&'a str, T)>,
) -> Option<(&'a str, T)> {
    let word_len = char_len(word);
    let mut best: Option<(&'a str, T)> = None;
    for (ending, tag) in endings {
        if ending.is_empty() || char_len(ending) >= word_len || !word.ends_with(ending) {
            continue;
        }
        let better = match best {
            Some((current, _)) => char_len(ending) > char_len(current),
            None => true,
        };
        if better {
            best = Some((ending, tag));
        }
    }
    best
}
