//! Verb conjugation tables.
//!
//! Regular verbs are classified by their infinitive ending. A small table of
//! high-frequency irregular verbs is consulted first, optionally behind a
//! verbal prefix (přijít, odejít, vyjet).

use super::rules::{char_len, longest_ending, VERB_PREFIXES};

/// Grammatical slot of a verb form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum VerbSlot {
    Infinitive,
    /// Present tense, person/number index 0..6 (1sg, 2sg, 3sg, 1pl, 2pl, 3pl).
    Present(usize),
    /// l-participle, index 0..5 (m sg, f sg, n sg, m pl, f pl).
    Past(usize),
    /// Synthetic future of `být`, indexed like the present.
    Future(usize),
}

/// One regular conjugation class.
pub(crate) struct Conjugation {
    /// Ending stripped from the infinitive to get the stem.
    pub infinitive: &'static str,
    pub present: [&'static [&'static str]; 6],
    pub past: [&'static str; 5],
}

/// Ordered: the first class whose infinitive ending matches wins.
pub(crate) const CONJUGATIONS: &[Conjugation] = &[
    Conjugation {
        infinitive: "ovat",
        present: [&["uji", "uju"], &["uješ"], &["uje"], &["ujeme"], &["ujete"], &["ují", "ujou"]],
        past: ["oval", "ovala", "ovalo", "ovali", "ovaly"],
    },
    Conjugation {
        infinitive: "nout",
        present: [&["nu"], &["neš"], &["ne"], &["neme"], &["nete"], &["nou"]],
        past: ["nul", "nula", "nulo", "nuli", "nuly"],
    },
    Conjugation {
        infinitive: "át",
        present: [&["aju", "aji"], &["aješ"], &["aje"], &["ajeme"], &["ajete"], &["ají", "ajou"]],
        past: ["ál", "ála", "álo", "áli", "ály"],
    },
    Conjugation {
        infinitive: "ít",
        present: [&["iju", "iji"], &["iješ"], &["ije"], &["ijeme"], &["ijete"], &["ijí", "ijou"]],
        past: ["il", "ila", "ilo", "ili", "ily"],
    },
    Conjugation {
        infinitive: "ýt",
        present: [&["yju", "yji"], &["yješ"], &["yje"], &["yjeme"], &["yjete"], &["yjí", "yjou"]],
        past: ["yl", "yla", "ylo", "yli", "yly"],
    },
    Conjugation {
        infinitive: "at",
        present: [&["ám"], &["áš"], &["á"], &["áme"], &["áte"], &["ají"]],
        past: ["al", "ala", "alo", "ali", "aly"],
    },
    Conjugation {
        infinitive: "ět",
        present: [&["ím"], &["íš"], &["í"], &["íme"], &["íte"], &["ějí", "í"]],
        past: ["ěl", "ěla", "ělo", "ěli", "ěly"],
    },
    Conjugation {
        infinitive: "et",
        present: [&["ím"], &["íš"], &["í"], &["íme"], &["íte"], &["ejí", "í"]],
        past: ["el", "ela", "elo", "eli", "ely"],
    },
    Conjugation {
        infinitive: "it",
        present: [&["ím"], &["íš"], &["í"], &["íme"], &["íte"], &["í"]],
        past: ["il", "ila", "ilo", "ili", "ily"],
    },
];

/// A fully listed irregular verb.
pub(crate) struct IrregularVerb {
    /// Citation forms; the first is canonical.
    pub infinitive: &'static [&'static str],
    pub present: [&'static [&'static str]; 6],
    pub past: [&'static str; 5],
    pub future: Option<[&'static str; 6]>,
}

pub(crate) const IRREGULAR_VERBS: &[IrregularVerb] = &[
    IrregularVerb {
        infinitive: &["být"],
        present: [&["jsem"], &["jsi"], &["je"], &["jsme"], &["jste"], &["jsou"]],
        past: ["byl", "byla", "bylo", "byli", "byly"],
        future: Some(["budu", "budeš", "bude", "budeme", "budete", "budou"]),
    },
    IrregularVerb {
        infinitive: &["mít"],
        present: [&["mám"], &["máš"], &["má"], &["máme"], &["máte"], &["mají"]],
        past: ["měl", "měla", "mělo", "měli", "měly"],
        future: None,
    },
    IrregularVerb {
        infinitive: &["jít"],
        present: [&["jdu"], &["jdeš"], &["jde"], &["jdeme"], &["jdete"], &["jdou"]],
        past: ["šel", "šla", "šlo", "šli", "šly"],
        future: None,
    },
    IrregularVerb {
        infinitive: &["chtít"],
        present: [&["chci"], &["chceš"], &["chce"], &["chceme"], &["chcete"], &["chtějí", "chtěj"]],
        past: ["chtěl", "chtěla", "chtělo", "chtěli", "chtěly"],
        future: None,
    },
    IrregularVerb {
        infinitive: &["moci", "moct"],
        present: [
            &["můžu", "mohu"],
            &["můžeš"],
            &["může"],
            &["můžeme"],
            &["můžete"],
            &["můžou", "mohou"],
        ],
        past: ["mohl", "mohla", "mohlo", "mohli", "mohly"],
        future: None,
    },
    IrregularVerb {
        infinitive: &["říci", "říct"],
        present: [&["řeknu"], &["řekneš"], &["řekne"], &["řekneme"], &["řeknete"], &["řeknou"]],
        past: ["řekl", "řekla", "řeklo", "řekli", "řekly"],
        future: None,
    },
    IrregularVerb {
        infinitive: &["jíst"],
        present: [&["jím"], &["jíš"], &["jí"], &["jíme"], &["jíte"], &["jedí"]],
        past: ["jedl", "jedla", "jedlo", "jedli", "jedly"],
        future: None,
    },
    IrregularVerb {
        infinitive: &["vědět"],
        present: [&["vím"], &["víš"], &["ví"], &["víme"], &["víte"], &["vědí"]],
        past: ["věděl", "věděla", "vědělo", "věděli", "věděly"],
        future: None,
    },
    IrregularVerb {
        infinitive: &["smát"],
        present: [
            &["směju", "směji"],
            &["směješ"],
            &["směje"],
            &["smějeme"],
            &["smějete"],
            &["smějí", "smějou"],
        ],
        past: ["smál", "smála", "smálo", "smáli", "smály"],
        future: None,
    },
    IrregularVerb {
        infinitive: &["bát"],
        present: [&["bojím"], &["bojíš"], &["bojí"], &["bojíme"], &["bojíte"], &["bojí"]],
        past: ["bál", "bála", "bálo", "báli", "bály"],
        future: None,
    },
    IrregularVerb {
        infinitive: &["dát"],
        present: [&["dám"], &["dáš"], &["dá"], &["dáme"], &["dáte"], &["dají"]],
        past: ["dal", "dala", "dalo", "dali", "daly"],
        future: None,
    },
    IrregularVerb {
        infinitive: &["stát"],
        present: [&["stojím"], &["stojíš"], &["stojí"], &["stojíme"], &["stojíte"], &["stojí"]],
        past: ["stál", "stála", "stálo", "stáli", "stály"],
        future: None,
    },
    IrregularVerb {
        infinitive: &["spát"],
        present: [&["spím"], &["spíš"], &["spí"], &["spíme"], &["spíte"], &["spí"]],
        past: ["spal", "spala", "spalo", "spali", "spaly"],
        future: None,
    },
    IrregularVerb {
        infinitive: &["psát"],
        present: [
            &["píšu", "píši"],
            &["píšeš"],
            &["píše"],
            &["píšeme"],
            &["píšete"],
            &["píšou", "píší"],
        ],
        past: ["psal", "psala", "psalo", "psali", "psaly"],
        future: None,
    },
    IrregularVerb {
        infinitive: &["brát"],
        present: [&["beru"], &["bereš"], &["bere"], &["bereme"], &["berete"], &["berou"]],
        past: ["bral", "brala", "bralo", "brali", "braly"],
        future: None,
    },
    IrregularVerb {
        infinitive: &["vzít"],
        present: [&["vezmu"], &["vezmeš"], &["vezme"], &["vezmeme"], &["vezmete"], &["vezmou"]],
        past: ["vzal", "vzala", "vzalo", "vzali", "vzaly"],
        future: None,
    },
    IrregularVerb {
        infinitive: &["jet"],
        present: [&["jedu"], &["jedeš"], &["jede"], &["jedeme"], &["jedete"], &["jedou"]],
        past: ["jel", "jela", "jelo", "jeli", "jely"],
        future: None,
    },
    IrregularVerb {
        infinitive: &["číst"],
        present: [&["čtu"], &["čteš"], &["čte"], &["čteme"], &["čtete"], &["čtou"]],
        past: ["četl", "četla", "četlo", "četli", "četly"],
        future: None,
    },
];

impl IrregularVerb {
    fn forms(&self) -> impl Iterator<Item = (&'static str, VerbSlot)> + '_ {
        let present = self
            .present
            .iter()
            .enumerate()
            .flat_map(|(i, alts)| alts.iter().map(move |f| (*f, VerbSlot::Present(i))));
        let past = self
            .past
            .iter()
            .enumerate()
            .map(|(i, f)| (*f, VerbSlot::Past(i)));
        let future = self
            .future
            .iter()
            .flat_map(|forms| forms.iter().enumerate().map(|(i, f)| (*f, VerbSlot::Future(i))));
        let infinitive = self.infinitive.iter().map(|f| (*f, VerbSlot::Infinitive));
        present.chain(past).chain(future).chain(infinitive)
    }

    fn form(&self, slot: VerbSlot) -> Option<&'static str> {
        match slot {
            VerbSlot::Infinitive => self.infinitive.first().copied(),
            VerbSlot::Present(i) => self.present.get(i).and_then(|alts| alts.first().copied()),
            VerbSlot::Past(i) => self.past.get(i).copied(),
            VerbSlot::Future(i) => match self.future {
                Some(future) => future.get(i).copied(),
                None => self.present.get(i).and_then(|alts| alts.first().copied()),
            },
        }
    }
}

/// An irregular verb found inside a lemma, with the prefix in front of it.
struct IrregularMatch<'a> {
    prefix: &'a str,
    verb: &'static IrregularVerb,
}

fn find_irregular(lemma: &str) -> Option<IrregularMatch<'_>> {
    IRREGULAR_VERBS.iter().find_map(|verb| {
        verb.infinitive.iter().find_map(|inf| {
            let prefix = lemma.strip_suffix(inf)?;
            VERB_PREFIXES
                .contains(&prefix)
                .then_some(IrregularMatch { prefix, verb })
        })
    })
}

/// Regular class of a lemma and its stem.
fn classify(lemma: &str) -> Option<(&'static Conjugation, &str)> {
    // archaic -ti infinitives conjugate like -t
    let lemma = match lemma.strip_suffix("ti") {
        Some(stem) => &lemma[..stem.len() + 1],
        None => lemma,
    };
    CONJUGATIONS.iter().find_map(|class| {
        let stem = lemma.strip_suffix(class.infinitive)?;
        (!stem.is_empty()).then_some((class, stem))
    })
}

/// Every surface form of a lemma the tables know about.
pub(crate) fn forms(lemma: &str) -> Vec<String> {
    let mut out = vec![lemma.to_string()];

    if let Some(m) = find_irregular(lemma) {
        out.extend(m.verb.forms().map(|(form, _)| format!("{}{}", m.prefix, form)));
        return out;
    }

    if let Some(stem) = lemma.strip_suffix('t') {
        out.push(format!("{lemma}i"));
        if let Some(c_stem) = stem.strip_suffix('c') {
            out.push(format!("{c_stem}ci"));
        }
    }

    if let Some((class, stem)) = classify(lemma) {
        for alts in class.present {
            out.extend(alts.iter().map(|ending| format!("{stem}{ending}")));
        }
        out.extend(class.past.iter().map(|ending| format!("{stem}{ending}")));
    }
    out
}

/// Infer the slot of a surface form from its ending.
pub(crate) fn detect_slot(form: &str) -> Option<VerbSlot> {
    let bare = form.strip_prefix("ne").filter(|rest| char_len(rest) >= 2);
    for candidate in [Some(form), bare].into_iter().flatten() {
        for verb in IRREGULAR_VERBS {
            for (surface, slot) in verb.forms() {
                if let Some(prefix) = candidate.strip_suffix(surface) {
                    if VERB_PREFIXES.contains(&prefix) {
                        return Some(slot);
                    }
                }
            }
        }
    }

    if form.ends_with("ti") || form.ends_with("ct") || form.ends_with("ci") {
        return Some(VerbSlot::Infinitive);
    }

    let regular = CONJUGATIONS.iter().flat_map(|class| {
        let present = class
            .present
            .iter()
            .enumerate()
            .flat_map(|(i, alts)| alts.iter().map(move |e| (*e, VerbSlot::Present(i))));
        let past = class
            .past
            .iter()
            .enumerate()
            .map(|(i, e)| (*e, VerbSlot::Past(i)));
        let infinitive = std::iter::once((class.infinitive, VerbSlot::Infinitive));
        present.chain(past).chain(infinitive)
    });
    longest_ending(form, regular).map(|(_, slot)| slot)
}

/// Longest recognised conjugation ending of a form.
pub(crate) fn ending(form: &str) -> Option<&'static str> {
    let regular = CONJUGATIONS.iter().flat_map(|class| {
        class
            .present
            .iter()
            .flat_map(|alts| alts.iter().copied())
            .chain(class.past.iter().copied())
            .map(|e| (e, ()))
    });
    longest_ending(form, regular).map(|(e, _)| e)
}

/// Build the form of `lemma` for `slot`; `None` when the lemma's class is unknown.
pub(crate) fn conjugate(lemma: &str, slot: VerbSlot) -> Option<String> {
    if slot == VerbSlot::Infinitive {
        return Some(lemma.to_string());
    }

    if let Some(m) = find_irregular(lemma) {
        return m.verb.form(slot).map(|form| format!("{}{}", m.prefix, form));
    }

    let (class, stem) = classify(lemma)?;
    let ending = match slot {
        VerbSlot::Present(i) | VerbSlot::Future(i) => class.present.get(i)?.first()?,
        VerbSlot::Past(i) => class.past.get(i)?,
        VerbSlot::Infinitive => return Some(lemma.to_string()),
    };
    Some(format!("{stem}{ending}"))
}
