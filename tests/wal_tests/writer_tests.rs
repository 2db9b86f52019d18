//! Tests for the write path
//!
//! These tests verify:
//! - Log file creation on open
//! - One terminated line per write, appended in call order
//! - Committed line returned to the caller
//! - Durability across sessions (reopen after confirmed write)
//! - Write-path errors leave the file untouched
//! - Configuration (sync modes, directory creation)

use std::fs;
use std::path::PathBuf;

use appendlog::config::{Config, SyncMode};
use appendlog::{AppendOnlyLog, LogError};
use serde::{Deserialize, Serialize};
use tempfile::TempDir;

// =============================================================================
// Helper Functions
// =============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct SegmentEvent {
    segment: u32,
}

fn setup_temp_log() -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().unwrap();
    let log_path = temp_dir.path().join("events.log");
    (temp_dir, log_path)
}

// =============================================================================
// Open Tests
// =============================================================================

#[test]
fn test_open_creates_empty_file() {
    let (_temp, log_path) = setup_temp_log();
    assert!(!log_path.exists());

    let log = AppendOnlyLog::open(&log_path).unwrap();

    assert!(log_path.exists());
    assert!(log.is_empty().unwrap());
    assert_eq!(log.path(), log_path.as_path());
}

#[test]
fn test_open_existing_file_keeps_content() {
    let (_temp, log_path) = setup_temp_log();
    {
        let mut log = AppendOnlyLog::open(&log_path).unwrap();
        log.write("download", &SegmentEvent { segment: 1 }).unwrap();
    }
    let size = fs::metadata(&log_path).unwrap().len();

    let log = AppendOnlyLog::open(&log_path).unwrap();

    assert_eq!(log.len().unwrap(), size);
}

#[test]
fn test_open_creates_parent_directories() {
    let (temp, _) = setup_temp_log();
    let nested = temp.path().join("a").join("b").join("events.log");

    AppendOnlyLog::open(&nested).unwrap();

    assert!(nested.exists());
}

#[test]
fn test_open_without_create_dirs_fails_on_missing_parent() {
    let (temp, _) = setup_temp_log();
    let nested = temp.path().join("missing").join("events.log");
    let config = Config::builder().path(&nested).create_dirs(false).build();

    let result = AppendOnlyLog::open_with_config(config);

    assert!(matches!(result, Err(LogError::Io(_))));
}

#[test]
fn test_open_empty_path_is_config_error() {
    let config = Config::builder().path("").build();

    let result = AppendOnlyLog::open_with_config(config);

    assert!(matches!(result, Err(LogError::Config(_))));
}

// =============================================================================
// Write Tests
// =============================================================================

#[test]
fn test_write_returns_committed_line() {
    let (_temp, log_path) = setup_temp_log();
    let mut log = AppendOnlyLog::open(&log_path).unwrap();

    let line = log.write("download", &SegmentEvent { segment: 1 }).unwrap();

    let content = fs::read_to_string(&log_path).unwrap();
    assert_eq!(content, format!("{}\n", line));
    assert_eq!(log.records_written(), 1);
}

#[test]
fn test_write_appends_one_line_per_record() {
    let (_temp, log_path) = setup_temp_log();
    let mut log = AppendOnlyLog::open(&log_path).unwrap();

    let lines: Vec<String> = (0..5)
        .map(|i| log.write("download", &SegmentEvent { segment: i }).unwrap())
        .collect();

    let content = fs::read_to_string(&log_path).unwrap();
    let on_disk: Vec<&str> = content.lines().collect();
    assert_eq!(on_disk, lines);
    assert!(content.ends_with('\n'));
}

#[test]
fn test_write_after_recover_still_appends() {
    let (_temp, log_path) = setup_temp_log();
    let mut log = AppendOnlyLog::open(&log_path).unwrap();

    log.write("download", &SegmentEvent { segment: 1 }).unwrap();
    let _ = log.recover::<SegmentEvent>().unwrap();
    log.write("download", &SegmentEvent { segment: 2 }).unwrap();

    let events: Vec<SegmentEvent> = log.recover().unwrap();
    assert_eq!(
        events,
        vec![SegmentEvent { segment: 1 }, SegmentEvent { segment: 2 }]
    );
}

#[test]
fn test_invalid_event_type_writes_nothing() {
    let (_temp, log_path) = setup_temp_log();
    let mut log = AppendOnlyLog::open(&log_path).unwrap();

    let result = log.write("bad|type", &SegmentEvent { segment: 1 });

    assert!(matches!(result, Err(LogError::InvalidEventType(_))));
    assert!(log.is_empty().unwrap());
    assert_eq!(log.records_written(), 0);
}

// =============================================================================
// Durability Tests
// =============================================================================

#[test]
fn test_confirmed_write_survives_reopen() {
    let (_temp, log_path) = setup_temp_log();

    {
        let mut log = AppendOnlyLog::open(&log_path).unwrap();
        log.write("download", &SegmentEvent { segment: 7 }).unwrap();
        // Dropped without close: simulates the process going away
    }

    let mut log = AppendOnlyLog::open(&log_path).unwrap();
    let events: Vec<SegmentEvent> = log.recover().unwrap();

    assert_eq!(events, vec![SegmentEvent { segment: 7 }]);
}

#[test]
fn test_sessions_continue_the_same_file() {
    let (_temp, log_path) = setup_temp_log();

    for segment in 0..3 {
        let mut log = AppendOnlyLog::open(&log_path).unwrap();
        log.write("download", &SegmentEvent { segment }).unwrap();
        log.close().unwrap();
    }

    let mut log = AppendOnlyLog::open(&log_path).unwrap();
    let events: Vec<SegmentEvent> = log.recover().unwrap();
    let segments: Vec<u32> = events.iter().map(|e| e.segment).collect();

    assert_eq!(segments, vec![0, 1, 2]);
}

#[test]
fn test_data_sync_mode_is_durable() {
    let (_temp, log_path) = setup_temp_log();
    let config = Config::builder()
        .path(&log_path)
        .sync_mode(SyncMode::Data)
        .build();

    {
        let mut log = AppendOnlyLog::open_with_config(config).unwrap();
        log.write("download", &SegmentEvent { segment: 3 }).unwrap();
    }

    let mut log = AppendOnlyLog::open(&log_path).unwrap();
    let events: Vec<SegmentEvent> = log.recover().unwrap();
    assert_eq!(events, vec![SegmentEvent { segment: 3 }]);
}

#[test]
fn test_close_without_writes_succeeds() {
    let (_temp, log_path) = setup_temp_log();

    let log = AppendOnlyLog::open(&log_path).unwrap();

    log.close().unwrap();
}

// =============================================================================
// Config Tests
// =============================================================================

#[test]
fn test_default_config() {
    let config = Config::new("/tmp/events.log");

    assert_eq!(config.path, PathBuf::from("/tmp/events.log"));
    assert_eq!(config.sync_mode, SyncMode::Full);
    assert!(config.create_dirs);
    assert!(config.validate().is_ok());
}
