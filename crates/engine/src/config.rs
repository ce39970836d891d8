//! Session configuration from environment variables.

use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use tui_blocks_store::DEFAULT_SCORE_PATH;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionConfig {
    /// High score file (`BLOCKS_SCORE_PATH`).
    pub score_path: PathBuf,
    /// Fixed RNG seed (`BLOCKS_SEED`); `None` seeds from the clock.
    pub seed: Option<u64>,
    /// Ring the terminal bell on hit cues (`BLOCKS_BELL`).
    pub bell: bool,
    /// Log file (`BLOCKS_LOG_PATH`); logging is off the terminal when set.
    pub log_path: Option<String>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            score_path: PathBuf::from(DEFAULT_SCORE_PATH),
            seed: None,
            bell: false,
            log_path: None,
        }
    }
}

fn non_empty(s: String) -> Option<String> {
    let s = s.trim().to_string();
    if s.is_empty() {
        None
    } else {
        Some(s)
    }
}

fn parse_flag(s: &str) -> bool {
    matches!(s.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes" | "on")
}

impl SessionConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary variable lookup. Unparsable values fall back to
    /// their defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let score_path = lookup("BLOCKS_SCORE_PATH")
            .and_then(non_empty)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_SCORE_PATH));

        let seed = lookup("BLOCKS_SEED").and_then(|s| s.trim().parse().ok());

        let bell = lookup("BLOCKS_BELL").map(|s| parse_flag(&s)).unwrap_or(false);

        let log_path = lookup("BLOCKS_LOG_PATH").and_then(non_empty);

        Self {
            score_path,
            seed,
            bell,
            log_path,
        }
    }

    /// The configured seed, or one derived from the wall clock.
    pub fn seed_or_clock(&self) -> u64 {
        self.seed.unwrap_or_else(|| {
            SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map(|d| d.as_nanos() as u64)
                .unwrap_or(1)
        })
    }
}
