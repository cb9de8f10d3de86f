//! Score history persistence.
//!
//! Finished sessions are kept as a short leaderboard, best score first, and
//! stored as a JSON array on disk. A missing or unreadable file never stops
//! the game: it just starts an empty history.

use std::fs;
use std::io::{self, BufReader, BufWriter, Read, Write};
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use log::{debug, warn};
use serde::{Deserialize, Serialize};

use mr_tet_core::GameOverRecord;

/// Records kept after each save.
pub const MAX_RECORDS: usize = 20;

/// One finished session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ScoreRecord {
    pub score: u32,
    pub level: u32,
    pub lines: u32,
    #[serde(default)]
    pub played_ms: u64,
    /// Unix epoch milliseconds when the record was saved.
    pub date: u64,
}

impl ScoreRecord {
    pub fn from_game(record: &GameOverRecord, date: u64) -> Self {
        Self {
            score: record.score,
            level: record.level,
            lines: record.lines,
            played_ms: record.played_ms,
            date,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ScoreError {
    #[error("score file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("score stream: {0}")]
    Stream(#[from] io::Error),
    #[error("malformed score data: {0}")]
    Json(#[from] serde_json::Error),
}

/// Current wall-clock time in unix epoch milliseconds.
pub fn now_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}

/// Leaderboard of finished sessions, best first.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScoreHistory {
    records: Vec<ScoreRecord>,
    path: Option<PathBuf>,
}

impl ScoreHistory {
    /// Empty history that is never written anywhere.
    pub fn in_memory() -> Self {
        Self::default()
    }

    /// Load the history stored at `path`, which is also where
    /// [`ScoreHistory::flush`] writes.
    ///
    /// A missing file gives an empty history. So does an unreadable or
    /// malformed one, with a warning logged.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let records = match fs::File::open(&path) {
            Ok(file) => match read_records(BufReader::new(file)) {
                Ok(records) => records,
                Err(err) => {
                    warn!("ignoring score file {}: {}", path.display(), err);
                    Vec::new()
                }
            },
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                debug!("no score file at {}", path.display());
                Vec::new()
            }
            Err(err) => {
                warn!("cannot open score file {}: {}", path.display(), err);
                Vec::new()
            }
        };

        let mut history = Self {
            records,
            path: Some(path),
        };
        history.normalize();
        history
    }

    /// Parse a JSON array of records.
    pub fn from_reader(reader: impl Read) -> Result<Self, ScoreError> {
        let mut history = Self {
            records: read_records(reader)?,
            path: None,
        };
        history.normalize();
        Ok(history)
    }

    pub fn write_to(&self, mut writer: impl Write) -> Result<(), ScoreError> {
        serde_json::to_writer_pretty(&mut writer, &self.records)?;
        writer.flush()?;
        Ok(())
    }

    /// Insert a record, keeping the best [`MAX_RECORDS`].
    ///
    /// Ties keep the older record first. Returns the new record's rank
    /// (0 = best), or `None` if it did not make the list.
    pub fn save(&mut self, record: ScoreRecord) -> Option<usize> {
        let rank = self.records.partition_point(|r| r.score >= record.score);
        if rank >= MAX_RECORDS {
            return None;
        }
        self.records.insert(rank, record);
        self.records.truncate(MAX_RECORDS);
        Some(rank)
    }

    pub fn records(&self) -> &[ScoreRecord] {
        &self.records
    }

    pub fn best(&self) -> Option<&ScoreRecord> {
        self.records.first()
    }

    pub fn clear(&mut self) {
        self.records.clear();
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Write the history back to its file, creating parent directories.
    /// In-memory histories have nothing to do.
    pub fn flush(&self) -> Result<(), ScoreError> {
        let Some(path) = &self.path else {
            return Ok(());
        };
        let io_err = |source| ScoreError::Io {
            path: path.clone(),
            source,
        };

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(io_err)?;
        }
        let file = fs::File::create(path).map_err(io_err)?;
        self.write_to(BufWriter::new(file))?;
        debug!("wrote {} scores to {}", self.records.len(), path.display());
        Ok(())
    }

    /// Save a finished game and write the file. A failed write is logged and
    /// the record stays in memory, so play can go on.
    pub fn record(&mut self, record: ScoreRecord) -> Option<usize> {
        let rank = self.save(record);
        if let Err(err) = self.flush() {
            warn!("score not saved: {}", err);
        }
        rank
    }

    fn normalize(&mut self) {
        // Stable, so equal scores keep their stored order.
        self.records.sort_by(|a, b| b.score.cmp(&a.score));
        self.records.truncate(MAX_RECORDS);
    }
}

fn read_records(reader: impl Read) -> Result<Vec<ScoreRecord>, ScoreError> {
    Ok(serde_json::from_reader(reader)?)
}
