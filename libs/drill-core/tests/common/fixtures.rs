//! Fixture lexicon and factory functions for creating test data.

use chrono::{DateTime, TimeZone, Utc};
use drill_core::{Card, EntryId};
use std::collections::BTreeMap;

/// Small Czech lexicon covering every word class the generator handles.
pub const LEXICON: &str = "\
# A1 nouns
LEMMA: žena
TRANSLATION: woman
CATEGORY: noun-f
LEVEL: A1
EXAMPLE: Ta žena je moje máma.
EXAMPLE_TRANSLATION: That woman is my mum.

LEMMA: ryba
TRANSLATION: fish
CATEGORY: noun-f
LEVEL: A1
EXAMPLE: Kočka jí rybu.

LEMMA: kniha
TRANSLATION: book
CATEGORY: noun-f
LEVEL: A1
PRONUNCIATION: ɲɪɦa
EXAMPLE: Čtu knihu.
EXAMPLE_TRANSLATION: I am reading a book.

LEMMA: škola
TRANSLATION: school
CATEGORY: noun-f
LEVEL: A1
EXAMPLE: Jdu do školy.

LEMMA: pes
TRANSLATION: dog
CATEGORY: noun-m-anim
LEVEL: A1
EXAMPLE: Pes spí.

LEMMA: hrad
TRANSLATION: castle
CATEGORY: noun-m-inanim
LEVEL: A1

LEMMA: město
TRANSLATION: town, city
CATEGORY: noun-n
LEVEL: A1
EXAMPLE: Bydlím ve městě.

LEMMA: Praha
TRANSLATION: Prague
CATEGORY: noun-f-proper
LEVEL: A1
EXAMPLE: Bydlím v Praze.

# A1 verbs
LEMMA: dělat
TRANSLATION: to do, to make
CATEGORY: verb
LEVEL: A1
EXAMPLE: Co děláte?

LEMMA: mluvit
TRANSLATION: to speak
CATEGORY: verb
LEVEL: A1
EXAMPLE: Mluvím česky.

LEMMA: smát se
TRANSLATION: to laugh
CATEGORY: verb
LEVEL: A1
EXAMPLE: Děti se smějí.
EXAMPLE_TRANSLATION: The children are laughing.

LEMMA: bát se
TRANSLATION: to be afraid
CATEGORY: verb
LEVEL: A1
EXAMPLE: Bojím se psů.

# A1 others
LEMMA: nový
TRANSLATION: new
CATEGORY: adjective
LEVEL: A1
EXAMPLE: Mám nové auto.

LEMMA: velký
TRANSLATION: big
CATEGORY: adjective
LEVEL: A1

LEMMA: tři
TRANSLATION: three
CATEGORY: numeral
LEVEL: A1
EXAMPLE: Mám tři psy.

LEMMA: on
TRANSLATION: he
CATEGORY: pronoun
LEVEL: A1

# A2
LEMMA: řeka
TRANSLATION: river
CATEGORY: noun-f
LEVEL: A2
EXAMPLE: Plaveme v řece.

LEMMA: učit se
TRANSLATION: to learn
CATEGORY: verb
LEVEL: A2
EXAMPLE: Učím se česky.

LEMMA: pracovat
TRANSLATION: to work
CATEGORY: verb
LEVEL: A2
EXAMPLE: Pracuju doma.

LEMMA: jarní
TRANSLATION: spring
CATEGORY: adjective
LEVEL: A2

LEMMA: Brno
TRANSLATION: Brno
CATEGORY: noun-n-proper
LEVEL: A2
";

/// Fixed session start.
pub fn start_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 3, 4, 18, 30, 0).unwrap()
}

/// A never-answered card for `entry`.
pub fn card(entry: EntryId, cloze_eligible: bool) -> Card {
    Card {
        id: 1,
        entry,
        bucket: 0,
        due: start_time(),
        consecutive_correct: 0,
        cloze_eligible,
        meta: BTreeMap::new(),
    }
}
