//! Full drill sessions over the fixture lexicon.

mod common;

use chrono::Duration;
use common::fixtures::start_time;
use common::{assert_options_valid, corpus, engine, engine_with, flashcard_settings};
use drill_core::{Decision, DrillSettings, FeedbackEvent, Level};
use pretty_assertions::assert_eq;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

#[test]
fn missed_card_climbs_buckets() {
    let (mut engine, clock) = engine(flashcard_settings());

    let first = engine.next_question().unwrap();
    assert!(!first.is_review);
    engine.answer(first.card_id, "not it").unwrap();

    let card = engine.scheduler().card(first.card_id).unwrap();
    assert_eq!((card.bucket, card.due), (0, start_time()));

    let review = engine.next_question().unwrap();
    assert_eq!(review.card_id, first.card_id);
    assert!(review.is_review);
    engine.answer(review.card_id, &review.correct_answer).unwrap();

    clock.advance(Duration::minutes(2));
    let review = engine.next_question().unwrap();
    assert_eq!(review.card_id, first.card_id);
    engine.answer(review.card_id, &review.correct_answer).unwrap();

    let card = engine.scheduler().card(first.card_id).unwrap();
    assert_eq!(card.bucket, 2);
    assert_eq!(card.due, start_time() + Duration::minutes(7));
    assert_eq!(
        engine
            .feedback()
            .iter()
            .filter(|e| **e == FeedbackEvent::ReviewReintroduced)
            .count(),
        2
    );
}

#[test]
fn eighteen_of_twenty_advances() {
    let (mut engine, clock) = engine(DrillSettings {
        retire_after: None,
        ..DrillSettings::default()
    });

    for i in 0..20 {
        let question = engine.next_question().unwrap();
        assert_options_valid(&question);
        let selected = if i < 2 {
            "wrong on purpose".to_string()
        } else {
            question.correct_answer.clone()
        };
        let outcome = engine.answer(question.card_id, &selected).unwrap();

        if i < 19 {
            assert_eq!(outcome.transition, None);
        } else {
            let transition = outcome.transition.unwrap();
            assert_eq!(transition.decision, Decision::Advance);
            assert_eq!((transition.from, transition.to), (Level::A1, Level::A2));
        }
        clock.advance(Duration::minutes(30));
    }

    assert_eq!(engine.level(), Level::A2);
    assert_eq!(engine.stats().accuracy_percent, 0);
    assert_eq!(engine.stats().streak, 18);
    assert!(engine.feedback().contains(&FeedbackEvent::LevelAdvanced));
    assert_eq!(engine.scheduler().len(), 1);
}

#[test]
fn excluded_entries_are_never_drilled() {
    let corpus = corpus().with_excluded(["žena", "pes", "smát se"]);
    let settings = DrillSettings {
        intervals_minutes: vec![60],
        ..flashcard_settings()
    };
    let (mut engine, _clock) = engine_with(corpus, settings, Level::A1, 11);

    let mut drilled = Vec::new();
    while let Some(question) = engine.next_question() {
        drilled.push(question.prompt.clone());
        engine.answer(question.card_id, &question.correct_answer).unwrap();
    }

    assert_eq!(drilled.len(), 13);
    for lemma in ["žena", "pes", "smát se", "řeka", "Brno"] {
        assert!(!drilled.iter().any(|p| p == lemma), "{lemma} was drilled");
    }
}

#[test]
fn random_session_keeps_invariants() {
    let (mut engine, clock) = engine(DrillSettings {
        min_sample: 8,
        ..DrillSettings::default()
    });
    let mut learner = StdRng::seed_from_u64(99);
    let top = engine.scheduler().top_bucket();

    for _ in 0..300 {
        let Some(question) = engine.next_question() else {
            break;
        };
        assert_options_valid(&question);
        let level_before = engine.level();

        let selected = if learner.random_bool(0.8) {
            question.correct_answer.clone()
        } else {
            "no idea".to_string()
        };
        let outcome = engine.answer(question.card_id, &selected).unwrap();

        if let Some(card) = engine.scheduler().card(question.card_id) {
            assert!(card.bucket <= top);
            assert!(!(engine.scheduler().is_queued(card.id) && engine.scheduler().is_due_tracked(card.id)));
        }
        if let Some(transition) = outcome.transition {
            assert_eq!(transition.from, level_before);
            if transition.decision == Decision::Regress {
                assert!(engine.scheduler().is_empty());
            }
        }
        assert!(outcome.stats.best_streak >= outcome.stats.streak);

        clock.advance(Duration::minutes(learner.random_range(0..6)));
    }
}

#[test]
fn lock_blocks_progression_until_released() {
    let (mut engine, clock) = engine(DrillSettings {
        min_sample: 3,
        intervals_minutes: vec![0, 60],
        retire_after: None,
        ..flashcard_settings()
    });
    engine.toggle_lock();

    for _ in 0..3 {
        let question = engine.next_question().unwrap();
        engine.answer(question.card_id, &question.correct_answer).unwrap();
        clock.advance(Duration::minutes(1));
    }
    assert_eq!(engine.level(), Level::A1);

    assert!(!engine.toggle_lock());
    for _ in 0..3 {
        let question = engine.next_question().unwrap();
        engine.answer(question.card_id, &question.correct_answer).unwrap();
    }
    assert_eq!(engine.level(), Level::A2);
    assert_eq!(
        engine
            .feedback()
            .iter()
            .filter(|e| **e == FeedbackEvent::LevelLockToggled)
            .count(),
        2
    );
}
