//! Terminal rendering and the interactive question loop.

use std::io::{BufRead, Write};

use chrono::{DateTime, Utc};
use drill_core::{
    Clock, Corpus, Engine, FeedbackEvent, Level, Question, QuestionMode, StatsSnapshot,
};
use rand::Rng;

/// One line of user input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Zero-based option index.
    Choose(usize),
    ToggleLock,
    ChangeLevel(Level),
    Stats,
    Quit,
}

/// Interpret an input line against a question with `option_count` options.
pub fn parse_command(line: &str, option_count: usize) -> Option<Command> {
    let line = line.trim();
    let mut words = line.split_whitespace();
    match words.next()?.to_lowercase().as_str() {
        "q" | "quit" => Some(Command::Quit),
        "l" | "lock" => Some(Command::ToggleLock),
        "s" | "stats" => Some(Command::Stats),
        "level" => Level::from_str(words.next()?).map(Command::ChangeLevel),
        number => {
            let n: usize = number.parse().ok()?;
            (1..=option_count).contains(&n).then(|| Command::Choose(n - 1))
        }
    }
}

pub fn feedback_message(event: FeedbackEvent) -> &'static str {
    match event {
        FeedbackEvent::AnsweredCorrect => "Correct!",
        FeedbackEvent::AnsweredIncorrect => "Not quite.",
        FeedbackEvent::ReviewReintroduced => "Review time.",
        FeedbackEvent::LevelAdvanced => "Level up!",
        FeedbackEvent::LevelRegressed => "Dropping back a level.",
        FeedbackEvent::LevelLockToggled => "Level lock toggled.",
    }
}

pub fn render_stats(stats: &StatsSnapshot) -> String {
    format!(
        "[{}{}] streak {} (best {}) | reviews {} | accuracy {}%",
        stats.level.as_str(),
        if stats.locked { ", locked" } else { "" },
        stats.streak,
        stats.best_streak,
        stats.review_count,
        stats.accuracy_percent,
    )
}

pub fn render_question(question: &Question) -> String {
    let mut out = String::new();

    let mut header = Vec::new();
    if question.is_review {
        header.push("(review)".to_string());
    }
    if let Some(label) = &question.label {
        header.push(label.clone());
    }
    if let Some(pronunciation) = &question.pronunciation {
        header.push(format!("/{pronunciation}/"));
    }
    if !header.is_empty() {
        out.push_str(&header.join(" "));
        out.push('\n');
    }

    let instruction = match question.mode {
        QuestionMode::Flashcard => "Translate",
        QuestionMode::Cloze => "Fill in the blank",
    };
    out.push_str(&format!("{instruction}: {}\n", question.prompt));
    if let Some(hint) = &question.hint {
        out.push_str(&format!("  ({hint})\n"));
    }
    for (i, option) in question.options.iter().enumerate() {
        out.push_str(&format!("  {}) {}\n", i + 1, option));
    }
    out
}

/// Whole minutes until `due`, rounded up.
fn minutes_until(due: DateTime<Utc>, now: DateTime<Utc>) -> i64 {
    let seconds = (due - now).num_seconds().max(0);
    (seconds + 59) / 60
}

/// Counts for the closing line.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Summary {
    pub answered: u32,
    pub correct: u32,
}

fn flush_feedback<C, K, R, O>(
    engine: &mut Engine<C, K, R, Vec<FeedbackEvent>>,
    output: &mut O,
) -> std::io::Result<()>
where
    C: Corpus,
    K: Clock,
    R: Rng,
    O: Write,
{
    for event in std::mem::take(engine.feedback_mut()) {
        writeln!(output, "{}", feedback_message(event))?;
    }
    Ok(())
}

/// Ask questions until the level runs dry, input ends or the user quits.
pub fn run_session<C, K, R, I, O>(
    engine: &mut Engine<C, K, R, Vec<FeedbackEvent>>,
    input: I,
    output: &mut O,
) -> anyhow::Result<Summary>
where
    C: Corpus,
    K: Clock,
    R: Rng,
    I: BufRead,
    O: Write,
{
    let mut summary = Summary::default();
    let mut lines = input.lines();

    'questions: loop {
        let Some(question) = engine.next_question() else {
            let Some(due) = engine.next_review_at() else {
                writeln!(output, "Nothing left to drill at {}.", engine.level().as_str())?;
                break;
            };
            writeln!(
                output,
                "All caught up. Next review in {} min; press Enter to check again.",
                minutes_until(due, engine.clock().now())
            )?;
            write!(output, "> ")?;
            output.flush()?;
            let Some(line) = lines.next().transpose()? else {
                break;
            };
            match parse_command(&line, 0) {
                Some(Command::Quit) => break,
                Some(Command::ToggleLock) => {
                    engine.toggle_lock();
                    flush_feedback(engine, output)?;
                    writeln!(output, "{}", render_stats(&engine.stats()))?;
                }
                Some(Command::ChangeLevel(level)) => {
                    engine.change_level(level);
                    writeln!(output, "Switched to {}.", level.as_str())?;
                }
                Some(Command::Stats) => writeln!(output, "{}", render_stats(&engine.stats()))?,
                Some(Command::Choose(_)) | None => {}
            }
            continue;
        };
        flush_feedback(engine, output)?;
        writeln!(output)?;
        write!(output, "{}", render_question(&question))?;

        loop {
            write!(output, "> ")?;
            output.flush()?;
            let Some(line) = lines.next().transpose()? else {
                break 'questions;
            };

            match parse_command(&line, question.options.len()) {
                Some(Command::Choose(index)) => {
                    let selected = &question.options[index];
                    let outcome = engine.answer(question.card_id, selected)?;
                    summary.answered += 1;
                    if outcome.correct {
                        summary.correct += 1;
                    }
                    flush_feedback(engine, output)?;
                    if !outcome.correct {
                        writeln!(output, "Answer: {}", outcome.correct_answer)?;
                    }
                    writeln!(output, "{}", render_stats(&outcome.stats))?;
                    continue 'questions;
                }
                Some(Command::ToggleLock) => {
                    engine.toggle_lock();
                    flush_feedback(engine, output)?;
                    writeln!(output, "{}", render_stats(&engine.stats()))?;
                }
                Some(Command::ChangeLevel(level)) => {
                    engine.change_level(level);
                    writeln!(output, "Switched to {}.", level.as_str())?;
                    continue 'questions;
                }
                Some(Command::Stats) => writeln!(output, "{}", render_stats(&engine.stats()))?,
                Some(Command::Quit) => break 'questions,
                None => writeln!(
                    output,
                    "Pick 1-{}, or: l (lock), s (stats), level <A1..C1>, q (quit)",
                    question.options.len()
                )?,
            }
        }
    }

    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use drill_core::{DrillSettings, InMemoryCorpus, LexicalEntry, ManualClock};
    use pretty_assertions::assert_eq;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn question() -> Question {
        Question {
            card_id: 3,
            prompt: format!("Čtu {}.", drill_core::BLANK),
            correct_answer: "knihu".to_string(),
            options: vec!["rybu".to_string(), "knihu".to_string()],
            mode: QuestionMode::Cloze,
            is_review: true,
            label: Some("noun, feminine".to_string()),
            pronunciation: None,
            hint: Some("I am reading a book.".to_string()),
        }
    }

    #[test]
    fn commands_parse() {
        assert_eq!(parse_command(" 2 ", 4), Some(Command::Choose(1)));
        assert_eq!(parse_command("5", 4), None);
        assert_eq!(parse_command("0", 4), None);
        assert_eq!(parse_command("L", 4), Some(Command::ToggleLock));
        assert_eq!(parse_command("level b2", 4), Some(Command::ChangeLevel(Level::B2)));
        assert_eq!(parse_command("level", 4), None);
        assert_eq!(parse_command("quit", 4), Some(Command::Quit));
        assert_eq!(parse_command("", 4), None);
    }

    #[test]
    fn question_renders_all_parts() {
        assert_eq!(
            render_question(&question()),
            "(review) noun, feminine\n\
             Fill in the blank: Čtu _____.\n  (I am reading a book.)\n  1) rybu\n  2) knihu\n"
        );
    }

    #[test]
    fn session_runs_until_corpus_is_exhausted() {
        let corpus = InMemoryCorpus::new(vec![LexicalEntry {
            level: Some(Level::A1),
            ..LexicalEntry::new("pes", "dog")
        }]);
        let settings = DrillSettings {
            intervals_minutes: vec![0],
            retire_after: Some(1),
            ..DrillSettings::default()
        };
        let mut engine = Engine::new(
            corpus,
            settings,
            ManualClock::new(Utc::now()),
            StdRng::seed_from_u64(1),
            Vec::new(),
        );
        engine.start(Level::A1);

        let mut output = Vec::new();
        let summary = run_session(&mut engine, "what\n1\n".as_bytes(), &mut output).unwrap();
        let text = String::from_utf8(output).unwrap();

        assert_eq!(summary, Summary { answered: 1, correct: 1 });
        assert!(text.contains("Translate: pes"));
        assert!(text.contains("Pick 1-1"));
        assert!(text.contains("Correct!"));
        assert!(text.contains("Nothing left to drill at A1."));
    }

    #[test]
    fn session_waits_for_pending_reviews() {
        let corpus = InMemoryCorpus::new(vec![LexicalEntry {
            level: Some(Level::A1),
            ..LexicalEntry::new("pes", "dog")
        }]);
        let clock = ManualClock::new(Utc::now());
        let mut engine = Engine::new(
            corpus,
            DrillSettings::default(),
            &clock,
            StdRng::seed_from_u64(1),
            Vec::new(),
        );
        engine.start(Level::A1);

        let mut output = Vec::new();
        let summary = run_session(&mut engine, "1

s
q
".as_bytes(), &mut output).unwrap();
        let text = String::from_utf8(output).unwrap();

        assert_eq!(summary, Summary { answered: 1, correct: 1 });
        assert_eq!(text.matches("Next review in 2 min").count(), 3);
        assert!(text.contains("[A1] streak 1"));
        assert!(!text.contains("Nothing left to drill"));
    }

    #[test]
    fn minutes_round_up() {
        let now = Utc::now();
        assert_eq!(minutes_until(now + Duration::seconds(61), now), 2);
        assert_eq!(minutes_until(now + Duration::minutes(2), now), 2);
        assert_eq!(minutes_until(now - Duration::minutes(1), now), 0);
    }

    #[test]
    fn quitting_stops_immediately() {
        let corpus = InMemoryCorpus::new(vec![LexicalEntry {
            level: Some(Level::A1),
            ..LexicalEntry::new("pes", "dog")
        }]);
        let mut engine = Engine::new(
            corpus,
            DrillSettings::default(),
            ManualClock::new(Utc::now()),
            StdRng::seed_from_u64(1),
            Vec::new(),
        );
        engine.start(Level::A1);

        let mut output = Vec::new();
        let summary = run_session(&mut engine, "s\nq\n".as_bytes(), &mut output).unwrap();
        assert_eq!(summary, Summary::default());
        assert!(String::from_utf8(output).unwrap().contains("[A1] streak 0"));
    }
}
