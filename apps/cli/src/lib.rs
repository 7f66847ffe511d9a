pub mod config;
pub mod lexicon;
pub mod session;

use std::io::{self, Write};

use drill_core::{Engine, InMemoryCorpus, SystemClock};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::Config;

pub fn run() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let config = Config::from_env()?;

    tracing::info!("Loading lexicon from {}...", config.lexicon.display());
    let entries = lexicon::load(&config.lexicon)?;
    tracing::info!(entries = entries.len(), "lexicon loaded");

    let corpus = InMemoryCorpus::new(entries).with_excluded(&config.excluded);
    let rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };

    let mut engine = Engine::new(corpus, config.settings, SystemClock, rng, Vec::new());
    engine.start(config.level);

    let stdin = io::stdin();
    let mut stdout = io::stdout();
    let summary = session::run_session(&mut engine, stdin.lock(), &mut stdout)?;

    writeln!(
        stdout,
        "Answered {} question(s), {} correct.",
        summary.answered, summary.correct
    )?;
    Ok(())
}
