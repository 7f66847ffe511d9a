//! Noun declension tables keyed by gender and stem-final sound.

use super::rules::{is_consonant, is_soft, join, last_char, longest_ending, oblique_stem};

/// Grammatical gender as encoded in the category subtype.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Gender {
    MasculineAnimate,
    MasculineInanimate,
    Feminine,
    Neuter,
}

impl Gender {
    /// Parse the subtype segments of a noun category (`noun-m-anim`).
    pub(crate) fn from_category(category: &str) -> Option<Self> {
        let lower = category.to_lowercase();
        let mut parts = lower.split(|c: char| c == '-' || c == '_' || c == ' ').skip(1);
        match parts.next()? {
            "m" | "masc" | "masculine" => match parts.next() {
                Some("anim" | "animate" | "a") => Some(Self::MasculineAnimate),
                _ => Some(Self::MasculineInanimate),
            },
            "f" | "fem" | "feminine" => Some(Self::Feminine),
            "n" | "neut" | "neuter" => Some(Self::Neuter),
            _ => None,
        }
    }
}

/// Case/number slot: case index 0..7 (nom, gen, dat, acc, voc, loc, ins).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct NounSlot {
    pub case: usize,
    pub plural: bool,
}

impl NounSlot {
    pub(crate) const NOMINATIVE: NounSlot = NounSlot {
        case: 0,
        plural: false,
    };
}

/// What the lemma's last sound must be for a class to apply.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum StemFinal {
    Any,
    HardConsonant,
    SoftConsonant,
    Consonant,
}

impl StemFinal {
    fn accepts(self, stem: &str) -> bool {
        let last = last_char(stem);
        match self {
            Self::Any => true,
            Self::Consonant => last.is_some_and(is_consonant),
            Self::SoftConsonant => last.is_some_and(|c| is_consonant(c) && is_soft(c)),
            Self::HardConsonant => last.is_some_and(|c| is_consonant(c) && !is_soft(c)),
        }
    }
}

type Endings = [&'static [&'static str]; 7];

/// One declension pattern.
pub(crate) struct Declension {
    pub name: &'static str,
    pub gender: Gender,
    /// Nominative singular endings stripped from the lemma.
    pub nominative: &'static [&'static str],
    pub stem_final: StemFinal,
    pub singular: Endings,
    pub plural: Endings,
}

impl Declension {
    fn endings(&self, slot: NounSlot) -> &'static [&'static str] {
        let table = if slot.plural { &self.plural } else { &self.singular };
        table.get(slot.case).copied().unwrap_or(&[])
    }

    fn slots(&self) -> impl Iterator<Item = (&'static str, NounSlot)> + '_ {
        [false, true].into_iter().flat_map(move |plural| {
            (0..7).flat_map(move |case| {
                let slot = NounSlot { case, plural };
                self.endings(slot).iter().map(move |e| (*e, slot))
            })
        })
    }

    fn stem<'a>(&self, lemma: &'a str) -> Option<&'a str> {
        self.nominative.iter().find_map(|nom| {
            let stem = lemma.strip_suffix(nom)?;
            (!stem.is_empty() && self.stem_final.accepts(stem)).then_some(stem)
        })
    }
}

/// Ordered: within a gender the first matching class wins.
pub(crate) const DECLENSIONS: &[Declension] = &[
    Declension {
        name: "předseda",
        gender: Gender::MasculineAnimate,
        nominative: &["a"],
        stem_final: StemFinal::Any,
        singular: [&["a"], &["y"], &["ovi"], &["u"], &["o"], &["ovi"], &["ou"]],
        plural: [&["ové"], &["ů"], &["ům"], &["y"], &["ové"], &["ech"], &["y"]],
    },
    Declension {
        name: "soudce",
        gender: Gender::MasculineAnimate,
        nominative: &["e"],
        stem_final: StemFinal::Any,
        singular: [&["e"], &["e"], &["i", "ovi"], &["e"], &["e"], &["i", "ovi"], &["em"]],
        plural: [&["i", "ové"], &["ů"], &["ům"], &["e"], &["i", "ové"], &["ích"], &["i"]],
    },
    Declension {
        name: "muž",
        gender: Gender::MasculineAnimate,
        nominative: &[""],
        stem_final: StemFinal::SoftConsonant,
        singular: [&[""], &["e"], &["i", "ovi"], &["e"], &["i"], &["i", "ovi"], &["em"]],
        plural: [&["i", "ové"], &["ů"], &["ům"], &["e"], &["i", "ové"], &["ích"], &["i"]],
    },
    Declension {
        name: "pán",
        gender: Gender::MasculineAnimate,
        nominative: &[""],
        stem_final: StemFinal::HardConsonant,
        singular: [&[""], &["a"], &["ovi", "u"], &["a"], &["e", "u"], &["ovi", "u"], &["em"]],
        plural: [&["i", "ové"], &["ů"], &["ům"], &["y"], &["i", "ové"], &["ech", "ích"], &["y"]],
    },
    Declension {
        name: "stroj",
        gender: Gender::MasculineInanimate,
        nominative: &[""],
        stem_final: StemFinal::SoftConsonant,
        singular: [&[""], &["e"], &["i"], &[""], &["i"], &["i"], &["em"]],
        plural: [&["e"], &["ů"], &["ům"], &["e"], &["e"], &["ích"], &["i"]],
    },
    Declension {
        name: "hrad",
        gender: Gender::MasculineInanimate,
        nominative: &[""],
        stem_final: StemFinal::HardConsonant,
        singular: [&[""], &["u", "a"], &["u"], &[""], &["e"], &["ě", "u", "e"], &["em"]],
        plural: [&["y"], &["ů"], &["ům"], &["y"], &["y"], &["ech", "ích"], &["y"]],
    },
    Declension {
        name: "žena",
        gender: Gender::Feminine,
        nominative: &["a"],
        stem_final: StemFinal::Any,
        singular: [&["a"], &["y"], &["ě"], &["u"], &["o"], &["ě"], &["ou"]],
        plural: [&["y"], &[""], &["ám"], &["y"], &["y"], &["ách"], &["ami"]],
    },
    Declension {
        name: "růže",
        gender: Gender::Feminine,
        nominative: &["e", "ě"],
        stem_final: StemFinal::Any,
        singular: [&["e", "ě"], &["e", "ě"], &["i"], &["i"], &["e", "ě"], &["i"], &["í"]],
        plural: [&["e", "ě"], &["í", ""], &["ím"], &["e", "ě"], &["e", "ě"], &["ích"], &["emi", "ěmi"]],
    },
    Declension {
        name: "píseň",
        gender: Gender::Feminine,
        nominative: &[""],
        stem_final: StemFinal::Consonant,
        singular: [&[""], &["e", "i"], &["i"], &[""], &["i"], &["i"], &["í"]],
        plural: [&["e", "i"], &["í"], &["ím"], &["e", "i"], &["e", "i"], &["ích"], &["emi", "mi"]],
    },
    Declension {
        name: "muzeum",
        gender: Gender::Neuter,
        nominative: &["um"],
        stem_final: StemFinal::Any,
        singular: [&["um"], &["a"], &["u"], &["um"], &["um"], &["u"], &["em"]],
        plural: [&["a"], &["í"], &["ím"], &["a"], &["a"], &["ích"], &["i"]],
    },
    Declension {
        name: "město",
        gender: Gender::Neuter,
        nominative: &["o"],
        stem_final: StemFinal::Any,
        singular: [&["o"], &["a"], &["u"], &["o"], &["o"], &["ě", "u"], &["em"]],
        plural: [&["a"], &[""], &["ům"], &["a"], &["a"], &["ech", "ích"], &["y"]],
    },
    Declension {
        name: "stavení",
        gender: Gender::Neuter,
        nominative: &["í"],
        stem_final: StemFinal::Any,
        singular: [&["í"], &["í"], &["í"], &["í"], &["í"], &["í"], &["ím"]],
        plural: [&["í"], &["í"], &["ím"], &["í"], &["í"], &["ích"], &["ími"]],
    },
    Declension {
        name: "moře",
        gender: Gender::Neuter,
        nominative: &["e", "ě"],
        stem_final: StemFinal::Any,
        singular: [&["e", "ě"], &["e", "ě"], &["i"], &["e", "ě"], &["e", "ě"], &["i"], &["em"]],
        plural: [&["e", "ě"], &["í"], &["ím"], &["e", "ě"], &["e", "ě"], &["ích"], &["i"]],
    },
];

/// Class order used when the category carries no gender.
const UNGENDERED_ORDER: &[&str] = &[
    "muzeum", "žena", "město", "stavení", "růže", "stroj", "hrad",
];

fn declension(name: &str) -> Option<&'static Declension> {
    DECLENSIONS.iter().find(|d| d.name == name)
}

/// Classes to consider for a gender, in priority order.
fn candidates(gender: Option<Gender>) -> Vec<&'static Declension> {
    match gender {
        Some(gender) => DECLENSIONS.iter().filter(|d| d.gender == gender).collect(),
        None => UNGENDERED_ORDER.iter().filter_map(|name| declension(name)).collect(),
    }
}

/// Declension class and stem of a lemma.
pub(crate) fn classify(lemma: &str, gender: Option<Gender>) -> Option<(&'static Declension, &str)> {
    candidates(gender)
        .into_iter()
        .find_map(|class| class.stem(lemma).map(|stem| (class, stem)))
}

/// Stem for a slot: zero-ending slots keep the full stem, the rest use the oblique stem.
fn slot_stem(stem: &str, ending: &str) -> String {
    if ending.is_empty() {
        stem.to_string()
    } else {
        oblique_stem(stem)
    }
}

/// Every declined form of a lemma.
pub(crate) fn forms(lemma: &str, gender: Option<Gender>) -> Vec<String> {
    let mut out = vec![lemma.to_string()];
    if let Some((class, stem)) = classify(lemma, gender) {
        for (ending, _) in class.slots() {
            out.push(join(&slot_stem(stem, ending), ending));
            // fleeting vowels are not always dropped (hotel, hotelu)
            out.push(join(stem, ending));
        }
    }
    out
}

/// Infer case and number from a form's ending.
pub(crate) fn detect_slot(form: &str, gender: Option<Gender>) -> NounSlot {
    let endings = candidates(gender).into_iter().flat_map(|class| class.slots());
    longest_ending(form, endings)
        .map(|(_, slot)| slot)
        .unwrap_or(NounSlot::NOMINATIVE)
}

/// Longest recognised declension ending of a form.
pub(crate) fn ending(form: &str, gender: Option<Gender>) -> Option<&'static str> {
    let endings = candidates(gender).into_iter().flat_map(|class| class.slots());
    longest_ending(form, endings).map(|(e, _)| e)
}

/// Decline `lemma` into `slot`; `None` when no class fits.
pub(crate) fn decline(lemma: &str, gender: Option<Gender>, slot: NounSlot) -> Option<String> {
    if slot == NounSlot::NOMINATIVE {
        return Some(lemma.to_string());
    }
    let (class, stem) = classify(lemma, gender)?;
    let ending = class.endings(slot).first()?;
    Some(join(&slot_stem(stem, ending), ending))
}
