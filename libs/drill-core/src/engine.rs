//! Drill session orchestration.
//!
//! The engine owns the scheduler and the level state for one session and
//! processes one user action at a time. "Now" is read from the clock once
//! per operation.

use crate::algorithm::Leitner;
use crate::clock::Clock;
use crate::corpus::Corpus;
use crate::error::{DrillError, DrillResult};
use crate::matching::compare_answers;
use crate::progression::{Decision, LevelState, Transition};
use crate::question::QuestionGenerator;
use crate::scheduler::{DrawSource, Scheduler};
use crate::types::{
    CardId, DrillSettings, EntryId, FeedbackEvent, Level, Question, StatsSnapshot,
};
use chrono::{DateTime, Utc};
use rand::seq::IndexedRandom;
use rand::Rng;
use std::collections::{BTreeMap, HashSet};
use tracing::{debug, info};

/// Receives categorical feedback events. Presentation is up to the implementor.
pub trait FeedbackSink {
    fn notify(&mut self, event: FeedbackEvent);
}

/// Discards every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullFeedback;

impl FeedbackSink for NullFeedback {
    fn notify(&mut self, _event: FeedbackEvent) {}
}

/// Records events in order.
impl FeedbackSink for Vec<FeedbackEvent> {
    fn notify(&mut self, event: FeedbackEvent) {
        self.push(event);
    }
}

impl<S: FeedbackSink + ?Sized> FeedbackSink for &mut S {
    fn notify(&mut self, event: FeedbackEvent) {
        (**self).notify(event);
    }
}

/// What happened after an answer.
#[derive(Debug, Clone, PartialEq)]
pub struct AnswerOutcome {
    pub correct: bool,
    pub correct_answer: String,
    /// The card left the session for good.
    pub retired: bool,
    /// Set whenever a level evaluation ran, even if the level stayed.
    pub transition: Option<Transition>,
    pub stats: StatsSnapshot,
}

/// One learner's drill session over a corpus.
pub struct Engine<C, K, R, F = NullFeedback> {
    corpus: C,
    clock: K,
    rng: R,
    feedback: F,
    settings: DrillSettings,
    generator: QuestionGenerator,
    scheduler: Scheduler<Leitner>,
    level: LevelState,
    retired: HashSet<EntryId>,
    active: Option<Question>,
    streak: u32,
    best_streak: u32,
}

impl<C, K, R, F> Engine<C, K, R, F>
where
    C: Corpus,
    K: Clock,
    R: Rng,
    F: FeedbackSink,
{
    /// Build an engine at the lowest level. Call [`Engine::start`] to pick another.
    pub fn new(corpus: C, settings: DrillSettings, clock: K, rng: R, feedback: F) -> Self {
        let scheduler = Self::build_scheduler(&settings);
        let generator = QuestionGenerator::new(&settings);
        Self {
            corpus,
            clock,
            rng,
            feedback,
            settings,
            generator,
            scheduler,
            level: LevelState::new(Level::default()),
            retired: HashSet::new(),
            active: None,
            streak: 0,
            best_streak: 0,
        }
    }

    fn build_scheduler(settings: &DrillSettings) -> Scheduler<Leitner> {
        Scheduler::new(
            Leitner::from_minutes(&settings.intervals_minutes),
            settings.due_order,
        )
    }

    /// Begin a new session at `level`, clearing streaks as well.
    pub fn start(&mut self, level: Level) {
        self.streak = 0;
        self.best_streak = 0;
        self.change_level(level);
    }

    /// Like [`Engine::start`] with a level name such as `"B1"`.
    pub fn start_named(&mut self, level: &str) -> DrillResult<()> {
        let level =
            Level::from_str(level).ok_or_else(|| DrillError::UnknownLevel(level.to_string()))?;
        self.start(level);
        Ok(())
    }

    /// Replace scheduler and level state with a fresh session at `level`.
    /// Calling it twice in a row leaves the same state as calling it once.
    pub fn change_level(&mut self, level: Level) {
        self.scheduler.reset();
        self.level = LevelState::new(level);
        self.retired.clear();
        self.active = None;
        info!(level = level.as_str(), "level session reset");
    }

    /// The question awaiting an answer, or the next one. `None` when nothing
    /// can be asked right now; [`Engine::next_review_at`] tells whether reviews
    /// are still pending or the level is exhausted.
    pub fn next_question(&mut self) -> Option<Question> {
        if let Some(active) = &self.active {
            return Some(active.clone());
        }

        let now = self.clock.now();
        let level = self.level.level;

        loop {
            let corpus = &self.corpus;
            let generator = &self.generator;
            let retired = &self.retired;
            let rng = &mut self.rng;
            let drawn = self.scheduler.next_card(now, |scheduler| {
                let candidates: Vec<EntryId> = corpus
                    .at_level(level)
                    .into_iter()
                    .filter(|id| !retired.contains(id) && !scheduler.tracks_entry(*id))
                    .filter(|id| corpus.get(*id).is_some_and(|e| !corpus.is_excluded(&e.lemma)))
                    .collect();
                let id = *candidates.choose(rng)?;
                let entry = corpus.get(id)?;
                let meta = BTreeMap::from([
                    ("level".to_string(), level.as_str().to_string()),
                    ("source".to_string(), "fresh".to_string()),
                ]);
                Some((id, generator.cloze_eligible(entry), meta))
            });

            let Some((card, source)) = drawn else {
                debug!(level = level.as_str(), "nothing left to drill");
                return None;
            };

            let is_review = source == DrawSource::Review;
            let Some(question) =
                self.generator
                    .generate(&self.corpus, &card, level, is_review, &mut self.rng)
            else {
                debug!(card_id = card.id, entry = card.entry, "card has no entry, dropping");
                self.scheduler.remove_card(card.id);
                continue;
            };

            if is_review {
                self.feedback.notify(FeedbackEvent::ReviewReintroduced);
            }
            self.active = Some(question.clone());
            return Some(question);
        }
    }

    /// Judge the selected option for the active question.
    pub fn answer(&mut self, card_id: CardId, selected: &str) -> DrillResult<AnswerOutcome> {
        let expected = self
            .active
            .as_ref()
            .ok_or(DrillError::NoActiveQuestion)?
            .card_id;
        if expected != card_id {
            return Err(DrillError::WrongCard {
                expected,
                got: card_id,
            });
        }
        let question = self.active.take().ok_or(DrillError::NoActiveQuestion)?;

        let now = self.clock.now();
        let correct = compare_answers(selected, &question.correct_answer).is_correct;

        let card = self.scheduler.record_result(card_id, correct, now).cloned();
        self.level.record(correct);

        if correct {
            self.streak += 1;
            self.best_streak = self.best_streak.max(self.streak);
            self.feedback.notify(FeedbackEvent::AnsweredCorrect);
        } else {
            self.streak = 0;
            self.feedback.notify(FeedbackEvent::AnsweredIncorrect);
        }

        let retired = match (self.settings.retire_after, card) {
            (Some(limit), Some(card))
                if card.bucket >= self.scheduler.top_bucket()
                    && card.consecutive_correct >= limit =>
            {
                self.scheduler.remove_card(card.id);
                self.retired.insert(card.entry);
                debug!(card_id = card.id, entry = card.entry, "card retired");
                true
            }
            _ => false,
        };

        let transition = self.evaluate_level(now);

        Ok(AnswerOutcome {
            correct,
            correct_answer: question.correct_answer,
            retired,
            transition,
            stats: self.stats_at(now),
        })
    }

    /// When the next scheduled review comes due. `None` together with an empty
    /// [`Engine::next_question`] means the level is exhausted.
    pub fn next_review_at(&self) -> Option<DateTime<Utc>> {
        self.scheduler.next_due()
    }

    fn evaluate_level(&mut self, now: DateTime<Utc>) -> Option<Transition> {
        let has_backlog = self.scheduler.stats(now).review_count > 0;
        let thresholds = self.settings.thresholds_for(self.level.level);
        let transition = self
            .level
            .evaluate(self.settings.min_sample, thresholds, has_backlog)?;

        if transition.from != transition.to {
            match transition.decision {
                Decision::Advance => self.feedback.notify(FeedbackEvent::LevelAdvanced),
                Decision::Regress => {
                    self.scheduler.reset();
                    self.retired.clear();
                    info!(level = transition.to.as_str(), "review backlog cleared");
                    self.feedback.notify(FeedbackEvent::LevelRegressed);
                }
                Decision::None => {}
            }
        }
        Some(transition)
    }

    /// Pin or unpin the current level. Returns the new lock state.
    pub fn toggle_lock(&mut self) -> bool {
        let locked = self.level.toggle_lock();
        info!(level = self.level.level.as_str(), locked, "level lock toggled");
        self.feedback.notify(FeedbackEvent::LevelLockToggled);
        locked
    }

    pub fn stats(&self) -> StatsSnapshot {
        self.stats_at(self.clock.now())
    }

    fn stats_at(&self, now: DateTime<Utc>) -> StatsSnapshot {
        StatsSnapshot {
            review_count: self.scheduler.stats(now).review_count,
            accuracy_percent: self.level.accuracy_percent(),
            streak: self.streak,
            best_streak: self.best_streak,
            level: self.level.level,
            locked: self.level.locked,
        }
    }

    pub fn level(&self) -> Level {
        self.level.level
    }

    pub fn active_question(&self) -> Option<&Question> {
        self.active.as_ref()
    }

    pub fn clock(&self) -> &K {
        &self.clock
    }

    pub fn corpus(&self) -> &C {
        &self.corpus
    }

    pub fn settings(&self) -> &DrillSettings {
        &self.settings
    }

    pub fn scheduler(&self) -> &Scheduler<Leitner> {
        &self.scheduler
    }

    pub fn feedback(&self) -> &F {
        &self.feedback
    }

    pub fn feedback_mut(&mut self) -> &mut F {
        &mut self.feedback
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;
    use crate::corpus::InMemoryCorpus;
    use crate::types::{LexicalEntry, LevelThresholds};
    use chrono::{Duration, TimeZone, Utc};
    use pretty_assertions::assert_eq;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::cell::Cell;

    type TestEngine = Engine<InMemoryCorpus, ManualClock, StdRng, Vec<FeedbackEvent>>;

    fn entry(lemma: &str, translation: &str, level: Level) -> LexicalEntry {
        LexicalEntry {
            category: Some("noun-f".to_string()),
            level: Some(level),
            ..LexicalEntry::new(lemma, translation)
        }
    }

    fn corpus() -> InMemoryCorpus {
        InMemoryCorpus::new(vec![
            entry("žena", "woman", Level::A1),
            entry("ryba", "fish", Level::A1),
            entry("kniha", "book", Level::A1),
            entry("škola", "school", Level::A2),
            entry("řeka", "river", Level::A2),
        ])
    }

    fn t0() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 1, 9, 0, 0).unwrap()
    }

    /// Moves one minute forward every time it is read.
    struct TickingClock(Cell<DateTime<Utc>>);

    impl Clock for TickingClock {
        fn now(&self) -> DateTime<Utc> {
            let now = self.0.get();
            self.0.set(now + Duration::minutes(1));
            now
        }
    }

    fn engine(settings: DrillSettings) -> TestEngine {
        let clock = ManualClock::new(t0());
        let mut engine = Engine::new(
            corpus(),
            settings,
            clock,
            StdRng::seed_from_u64(42),
            Vec::new(),
        );
        engine.start(Level::A1);
        engine
    }

    fn flashcards_only() -> DrillSettings {
        DrillSettings {
            cloze_probability: 0.0,
            ..DrillSettings::default()
        }
    }

    #[test]
    fn answering_without_question_is_an_error() {
        let mut engine = engine(flashcards_only());
        assert_eq!(engine.answer(1, "woman"), Err(DrillError::NoActiveQuestion));

        let q = engine.next_question().unwrap();
        assert_eq!(
            engine.answer(q.card_id + 1, "woman"),
            Err(DrillError::WrongCard {
                expected: q.card_id,
                got: q.card_id + 1
            })
        );
        assert!(engine.answer(q.card_id, &q.correct_answer).is_ok());
    }

    #[test]
    fn pending_question_is_repeated() {
        let mut engine = engine(flashcards_only());
        let first = engine.next_question().unwrap();
        let again = engine.next_question().unwrap();
        assert_eq!(first, again);
        assert_eq!(engine.scheduler().len(), 1);
    }

    #[test]
    fn unknown_level_name() {
        let mut engine = engine(flashcards_only());
        assert_eq!(
            engine.start_named("Z9"),
            Err(DrillError::UnknownLevel("Z9".to_string()))
        );
        assert!(engine.start_named("a2").is_ok());
        assert_eq!(engine.level(), Level::A2);
    }

    #[test]
    fn streaks_and_feedback() {
        let mut engine = engine(flashcards_only());

        let q = engine.next_question().unwrap();
        let outcome = engine.answer(q.card_id, &q.correct_answer.to_uppercase()).unwrap();
        assert!(outcome.correct);
        assert_eq!(outcome.stats.streak, 1);

        let q = engine.next_question().unwrap();
        engine.answer(q.card_id, &q.correct_answer).unwrap();

        let q = engine.next_question().unwrap();
        let outcome = engine.answer(q.card_id, "definitely wrong").unwrap();
        assert!(!outcome.correct);
        assert_eq!(outcome.stats.streak, 0);
        assert_eq!(outcome.stats.best_streak, 2);
        assert_eq!(
            engine.feedback().as_slice(),
            &[
                FeedbackEvent::AnsweredCorrect,
                FeedbackEvent::AnsweredCorrect,
                FeedbackEvent::AnsweredIncorrect,
            ]
        );
    }

    #[test]
    fn missed_card_comes_back_as_review() {
        let mut engine = engine(flashcards_only());
        let q = engine.next_question().unwrap();
        engine.answer(q.card_id, "nope").unwrap();
        assert_eq!(engine.stats().review_count, 1);

        let review = engine.next_question().unwrap();
        assert_eq!(review.card_id, q.card_id);
        assert!(review.is_review);
        assert_eq!(
            engine.feedback().last(),
            Some(&FeedbackEvent::ReviewReintroduced)
        );
    }

    #[test]
    fn fresh_entries_stay_on_level_and_run_out() {
        let mut engine = engine(DrillSettings {
            intervals_minutes: vec![10],
            ..flashcards_only()
        });
        let mut seen = Vec::new();
        while let Some(q) = engine.next_question() {
            seen.push(q.prompt.clone());
            engine.answer(q.card_id, &q.correct_answer).unwrap();
        }
        seen.sort();
        assert_eq!(seen, vec!["kniha", "ryba", "žena"]);
    }

    #[test]
    fn waiting_for_reviews_is_not_exhaustion() {
        let clock = ManualClock::new(t0());
        let mut engine = Engine::new(
            corpus(),
            flashcards_only(),
            &clock,
            StdRng::seed_from_u64(42),
            Vec::new(),
        );
        engine.start(Level::A1);
        for _ in 0..3 {
            let q = engine.next_question().unwrap();
            engine.answer(q.card_id, &q.correct_answer).unwrap();
        }

        assert!(engine.next_question().is_none());
        assert_eq!(engine.scheduler().len(), 3);
        assert_eq!(engine.next_review_at(), Some(t0() + Duration::minutes(2)));

        clock.advance(Duration::minutes(2));
        let review = engine.next_question().unwrap();
        assert!(review.is_review);
    }

    #[test]
    fn empty_level_has_no_pending_review() {
        let mut engine = engine(flashcards_only());
        engine.start(Level::C1);
        assert!(engine.next_question().is_none());
        assert_eq!(engine.next_review_at(), None);
    }

    #[test]
    fn answer_reads_the_clock_once() {
        let mut engine = Engine::new(
            corpus(),
            DrillSettings {
                intervals_minutes: vec![0, 1],
                ..flashcards_only()
            },
            TickingClock(Cell::new(t0())),
            StdRng::seed_from_u64(42),
            NullFeedback,
        );
        engine.start(Level::A1);
        let q = engine.next_question().unwrap();
        let outcome = engine.answer(q.card_id, &q.correct_answer).unwrap();

        let card = engine.scheduler().card(q.card_id).unwrap();
        assert_eq!(card.due, t0() + Duration::minutes(2));
        assert_eq!(outcome.stats.review_count, 0);
    }

    #[test]
    fn huge_intervals_do_not_panic() {
        let mut engine = engine(DrillSettings {
            intervals_minutes: vec![0, 1_000_000_000_000_000],
            ..flashcards_only()
        });
        let q = engine.next_question().unwrap();
        let outcome = engine.answer(q.card_id, &q.correct_answer).unwrap();
        assert!(outcome.correct);
        assert!(engine.next_review_at().is_some_and(|due| due > t0()));
    }

    #[test]
    fn mastered_card_is_retired() {
        let mut engine = engine(DrillSettings {
            intervals_minutes: vec![0, 0],
            retire_after: Some(2),
            ..flashcards_only()
        });
        let q = engine.next_question().unwrap();
        let first = engine.answer(q.card_id, &q.correct_answer).unwrap();
        assert!(!first.retired);

        let again = engine.next_question().unwrap();
        assert_eq!(again.card_id, q.card_id);
        let second = engine.answer(again.card_id, &again.correct_answer).unwrap();
        assert!(second.retired);
        assert!(engine.scheduler().card(q.card_id).is_none());

        let next = engine.next_question().unwrap();
        assert_ne!(next.prompt, q.prompt);
    }

    #[test]
    fn advancing_keeps_backlog() {
        let mut engine = engine(DrillSettings {
            min_sample: 2,
            ..flashcards_only()
        });
        for _ in 0..2 {
            let q = engine.next_question().unwrap();
            engine.answer(q.card_id, &q.correct_answer).unwrap();
        }
        assert_eq!(engine.level(), Level::A2);
        assert_eq!(engine.scheduler().len(), 2);
        assert_eq!(engine.feedback().last(), Some(&FeedbackEvent::LevelAdvanced));
        assert_eq!(engine.stats().accuracy_percent, 0);
    }

    #[test]
    fn backlog_blocks_advance() {
        let mut engine = engine(DrillSettings {
            min_sample: 2,
            intervals_minutes: vec![0],
            ..flashcards_only()
        });
        for _ in 0..2 {
            let q = engine.next_question().unwrap();
            let outcome = engine.answer(q.card_id, &q.correct_answer).unwrap();
            assert!(outcome.stats.review_count > 0);
        }
        assert_eq!(engine.level(), Level::A1);
    }

    #[test]
    fn regressing_clears_scheduler() {
        let mut thresholds = BTreeMap::new();
        thresholds.insert(
            Level::A2,
            LevelThresholds {
                up: None,
                down: Some(0.6),
            },
        );
        let mut engine = engine(DrillSettings {
            min_sample: 2,
            thresholds,
            ..flashcards_only()
        });
        engine.start(Level::A2);
        for _ in 0..2 {
            let q = engine.next_question().unwrap();
            engine.answer(q.card_id, "wrong").unwrap();
        }
        assert_eq!(engine.level(), Level::A1);
        assert!(engine.scheduler().is_empty());
        assert_eq!(engine.feedback().last(), Some(&FeedbackEvent::LevelRegressed));
    }

    #[test]
    fn locked_level_stays_put() {
        let mut engine = engine(DrillSettings {
            min_sample: 2,
            ..flashcards_only()
        });
        assert!(engine.toggle_lock());
        for _ in 0..2 {
            let q = engine.next_question().unwrap();
            let outcome = engine.answer(q.card_id, &q.correct_answer).unwrap();
            if let Some(transition) = outcome.transition {
                assert_eq!(transition.decision, Decision::None);
            }
        }
        assert_eq!(engine.level(), Level::A1);
        assert!(engine.stats().locked);
        assert_eq!(engine.feedback()[0], FeedbackEvent::LevelLockToggled);
    }

    #[test]
    fn change_level_is_idempotent() {
        let mut engine = engine(flashcards_only());
        let q = engine.next_question().unwrap();
        engine.answer(q.card_id, "nope").unwrap();

        engine.change_level(Level::A2);
        let once = engine.stats();
        engine.change_level(Level::A2);
        assert_eq!(engine.stats(), once);
        assert!(engine.scheduler().is_empty());
        assert!(engine.active_question().is_none());
        assert_eq!(once.review_count, 0);
    }
}
