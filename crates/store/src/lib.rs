//! High score persistence.
//!
//! The game keeps a single number between runs. It is read once at startup
//! and written once at shutdown, and neither direction is allowed to end the
//! session:
//!
//! - [`load_high_score`] turns a missing, empty or unreadable record into `0`
//! - [`save_high_score`] logs a failed write and carries on
//!
//! [`FileStore`] keeps the score as plain decimal text (`./score` by default).
//! [`MemoryStore`] holds the same text in memory for tests.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

/// Default high score file, relative to the working directory.
pub const DEFAULT_SCORE_PATH: &str = "score";

/// A single-value key store for the high score.
pub trait HighScoreStore {
    /// `Ok(None)` when there is no record yet (missing or blank).
    fn load(&self) -> Result<Option<u32>>;

    fn save(&mut self, score: u32) -> Result<()>;
}

fn parse_record(text: &str) -> Result<Option<u32>> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    let value = trimmed
        .parse::<u32>()
        .with_context(|| format!("invalid high score record: {:?}", trimmed))?;
    Ok(Some(value))
}

/// Read the high score, falling back to 0 on any problem.
pub fn load_high_score<S: HighScoreStore + ?Sized>(store: &S) -> u32 {
    match store.load() {
        Ok(Some(score)) => {
            log::info!("loaded high score {}", score);
            score
        }
        Ok(None) => {
            log::info!("no high score recorded yet, starting from 0");
            0
        }
        Err(e) => {
            log::warn!("could not read high score, starting from 0: {:#}", e);
            0
        }
    }
}

/// Write the high score. Returns whether it was stored.
pub fn save_high_score<S: HighScoreStore + ?Sized>(store: &mut S, score: u32) -> bool {
    match store.save(score) {
        Ok(()) => {
            log::info!("saved high score {}", score);
            true
        }
        Err(e) => {
            log::error!("could not save high score {}: {:#}", score, e);
            false
        }
    }
}

/// High score kept as decimal text in a file.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

impl Default for FileStore {
    fn default() -> Self {
        Self::new(DEFAULT_SCORE_PATH)
    }
}

impl HighScoreStore for FileStore {
    fn load(&self) -> Result<Option<u32>> {
        let text = match fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(e) => {
                return Err(e).with_context(|| format!("read {}", self.path.display()));
            }
        };
        parse_record(&text).with_context(|| format!("parse {}", self.path.display()))
    }

    fn save(&mut self, score: u32) -> Result<()> {
        // Write next to the target, then rename over it.
        let tmp = self.temp_path();
        fs::write(&tmp, score.to_string())
            .with_context(|| format!("write {}", tmp.display()))?;
        if let Err(e) = fs::rename(&tmp, &self.path) {
            let _ = fs::remove_file(&tmp);
            return Err(e).with_context(|| {
                format!("rename {} -> {}", tmp.display(), self.path.display())
            });
        }
        Ok(())
    }
}

/// In-memory store holding the raw record text.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    record: Option<String>,
    fail_saves: bool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start with an arbitrary (possibly malformed) record.
    pub fn with_record(record: impl Into<String>) -> Self {
        Self {
            record: Some(record.into()),
            fail_saves: false,
        }
    }

    /// Make every `save` fail, like a read-only disk.
    pub fn failing_saves(mut self) -> Self {
        self.fail_saves = true;
        self
    }

    pub fn record(&self) -> Option<&str> {
        self.record.as_deref()
    }
}

impl HighScoreStore for MemoryStore {
    fn load(&self) -> Result<Option<u32>> {
        match &self.record {
            Some(text) => parse_record(text),
            None => Ok(None),
        }
    }

    fn save(&mut self, score: u32) -> Result<()> {
        if self.fail_saves {
            anyhow::bail!("store is read-only");
        }
        self.record = Some(score.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};

    fn scratch_path(tag: &str) -> PathBuf {
        static COUNTER: AtomicU32 = AtomicU32::new(0);
        let n = COUNTER.fetch_add(1, Ordering::Relaxed);
        std::env::temp_dir().join(format!(
            "tui-blocks-store-{}-{}-{}",
            tag,
            std::process::id(),
            n
        ))
    }

    #[test]
    fn memory_round_trip() {
        let mut store = MemoryStore::new();
        for n in [0, 1, 42, 999_999, u32::MAX] {
            assert!(save_high_score(&mut store, n));
            assert_eq!(load_high_score(&store), n);
        }
        assert_eq!(store.record(), Some(u32::MAX.to_string().as_str()));
    }

    #[test]
    fn missing_empty_and_garbage_records_load_as_zero() {
        assert_eq!(load_high_score(&MemoryStore::new()), 0);
        assert_eq!(load_high_score(&MemoryStore::with_record("")), 0);
        assert_eq!(load_high_score(&MemoryStore::with_record("  \n")), 0);
        assert_eq!(load_high_score(&MemoryStore::with_record("abc")), 0);
        assert_eq!(load_high_score(&MemoryStore::with_record("-5")), 0);
    }

    #[test]
    fn surrounding_whitespace_is_accepted() {
        let store = MemoryStore::with_record(" 17\n");
        assert_eq!(store.load().unwrap(), Some(17));
    }

    #[test]
    fn garbage_record_is_an_error_from_load() {
        let store = MemoryStore::with_record("12x");
        assert!(store.load().is_err());
    }

    #[test]
    fn failed_save_is_reported_not_fatal() {
        let mut store = MemoryStore::with_record("5").failing_saves();
        assert!(!save_high_score(&mut store, 10));
        assert_eq!(load_high_score(&store), 5);
    }

    #[test]
    fn file_round_trip() {
        let path = scratch_path("roundtrip");
        let mut store = FileStore::new(&path);

        assert_eq!(store.load().unwrap(), None);
        assert!(save_high_score(&mut store, 123));
        assert_eq!(fs::read_to_string(&path).unwrap(), "123");
        assert_eq!(load_high_score(&store), 123);

        assert!(save_high_score(&mut store, 7));
        assert_eq!(load_high_score(&store), 7);
        assert!(!store.temp_path().exists());

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn empty_file_loads_as_zero() {
        let path = scratch_path("empty");
        fs::write(&path, "").unwrap();

        let store = FileStore::new(&path);
        assert_eq!(store.load().unwrap(), None);
        assert_eq!(load_high_score(&store), 0);

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn unwritable_location_fails_softly() {
        let dir = scratch_path("missing-dir");
        let mut store = FileStore::new(dir.join("nested").join("score"));
        assert!(!save_high_score(&mut store, 3));
    }

    #[test]
    fn failed_rename_leaves_no_temp_file() {
        // A non-empty directory at the target path cannot be replaced by a file.
        let dir = scratch_path("dir-target");
        fs::create_dir_all(dir.join("occupied")).unwrap();
        let mut store = FileStore::new(&dir);

        assert!(!save_high_score(&mut store, 9));
        assert!(!store.temp_path().exists());
        assert!(dir.is_dir());

        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn temp_path_sits_next_to_target() {
        let store = FileStore::new("/some/dir/score");
        assert_eq!(store.temp_path(), PathBuf::from("/some/dir/score.tmp"));
        assert_eq!(FileStore::default().path(), Path::new("score"));
    }
}
