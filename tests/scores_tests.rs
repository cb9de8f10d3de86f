//! Score history persistence through the filesystem

use std::fs;
use std::path::PathBuf;
use std::process;

use mr_tet::core::GameOverRecord;
use mr_tet::scores::{ScoreHistory, ScoreRecord, MAX_RECORDS};

fn scratch_path(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("mr-tet-scores-{}", process::id()));
    fs::create_dir_all(&dir).unwrap();
    let path = dir.join(name);
    let _ = fs::remove_file(&path);
    path
}

fn record(score: u32, date: u64) -> ScoreRecord {
    ScoreRecord {
        score,
        level: 1,
        lines: 0,
        played_ms: 0,
        date,
    }
}

#[test]
fn missing_file_opens_empty() {
    let path = scratch_path("missing.json");
    let history = ScoreHistory::open(&path);
    assert!(history.records().is_empty());
    assert!(history.best().is_none());
    assert_eq!(history.path(), Some(path.as_path()));
}

#[test]
fn saved_scores_survive_a_reopen() {
    let path = scratch_path("roundtrip.json");

    let mut history = ScoreHistory::open(&path);
    let game = GameOverRecord {
        score: 1200,
        level: 3,
        lines: 21,
        played_ms: 95_000,
    };
    assert_eq!(history.save(ScoreRecord::from_game(&game, 10)), Some(0));
    assert_eq!(history.save(record(300, 11)), Some(1));
    assert_eq!(history.save(record(5000, 12)), Some(0));
    history.flush().unwrap();

    let reopened = ScoreHistory::open(&path);
    let scores: Vec<u32> = reopened.records().iter().map(|r| r.score).collect();
    assert_eq!(scores, vec![5000, 1200, 300]);
    assert_eq!(reopened.records()[1].played_ms, 95_000);
    assert_eq!(reopened.best().map(|r| r.score), Some(5000));

    fs::remove_file(&path).unwrap();
}

#[test]
fn flush_creates_missing_directories() {
    let path = scratch_path("nested").join("deeper").join("scores.json");
    let mut history = ScoreHistory::open(&path);
    history.save(record(1, 1));
    history.flush().unwrap();
    assert!(path.exists());
}

#[test]
fn malformed_file_is_ignored() {
    let path = scratch_path("malformed.json");
    fs::write(&path, "{ not json").unwrap();

    let mut history = ScoreHistory::open(&path);
    assert!(history.records().is_empty());

    // Saving replaces the broken file with a valid one.
    history.save(record(42, 1));
    history.flush().unwrap();
    assert_eq!(ScoreHistory::open(&path).records().len(), 1);
}

#[test]
fn history_keeps_only_the_best_records() {
    let path = scratch_path("capped.json");
    let mut history = ScoreHistory::open(&path);
    for i in 0..(MAX_RECORDS as u32 + 5) {
        history.save(record(i * 10, u64::from(i)));
    }
    history.flush().unwrap();

    let reopened = ScoreHistory::open(&path);
    assert_eq!(reopened.records().len(), MAX_RECORDS);
    assert_eq!(reopened.records().last().map(|r| r.score), Some(50));
    assert!(reopened.records().windows(2).all(|w| w[0].score >= w[1].score));
}

#[test]
fn unwritable_path_keeps_scores_in_memory() {
    // A regular file where the parent directory should be makes every write fail.
    let blocker = scratch_path("blocker");
    fs::write(&blocker, "").unwrap();
    let path = blocker.join("scores.json");

    let mut history = ScoreHistory::open(&path);
    assert!(history.records().is_empty());

    history.save(record(10, 1));
    assert!(history.flush().is_err());

    assert_eq!(history.record(record(700, 2)), Some(0));
    assert_eq!(history.record(record(5, 3)), Some(2));
    let scores: Vec<u32> = history.records().iter().map(|r| r.score).collect();
    assert_eq!(scores, vec![700, 10, 5]);
    assert!(!path.exists());
}

#[test]
fn record_writes_through_to_disk() {
    let path = scratch_path("record.json");
    let mut history = ScoreHistory::open(&path);
    assert_eq!(history.record(record(90, 1)), Some(0));

    let reopened = ScoreHistory::open(&path);
    assert_eq!(reopened.best().map(|r| r.score), Some(90));
}
