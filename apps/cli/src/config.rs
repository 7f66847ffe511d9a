//! Configuration from the environment (`.env` honoured).

use std::path::PathBuf;

use anyhow::{anyhow, Context};
use drill_core::{DrillSettings, Level};

/// Everything the binary needs to start a session.
#[derive(Debug, Clone)]
pub struct Config {
    pub lexicon: PathBuf,
    pub level: Level,
    pub settings: DrillSettings,
    pub seed: Option<u64>,
    /// Lemmas never drilled or offered as options.
    pub excluded: Vec<String>,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup. Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let lexicon = get("DRILL_LEXICON")
            .map(PathBuf::from)
            .ok_or_else(|| anyhow!("DRILL_LEXICON must be set"))?;

        let level = match get("DRILL_LEVEL") {
            Some(name) => {
                Level::from_str(&name).ok_or_else(|| anyhow!("invalid DRILL_LEVEL: {name}"))?
            }
            None => Level::default(),
        };

        let settings = match get("DRILL_SETTINGS") {
            Some(path) => {
                let content = std::fs::read_to_string(&path)
                    .with_context(|| format!("reading settings file {path}"))?;
                serde_json::from_str(&content)
                    .with_context(|| format!("parsing settings file {path}"))?
            }
            None => DrillSettings::default(),
        };

        let seed = get("DRILL_SEED")
            .map(|s| s.parse::<u64>())
            .transpose()
            .context("DRILL_SEED must be an unsigned integer")?;

        let excluded = get("DRILL_EXCLUDE")
            .map(|list| {
                list.split(';')
                    .map(str::trim)
                    .filter(|l| !l.is_empty())
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default();

        Ok(Self {
            lexicon,
            level,
            settings,
            seed,
            excluded,
        })
    }
}
