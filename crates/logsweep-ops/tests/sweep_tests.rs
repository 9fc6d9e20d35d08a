use std::fs;
use std::path::Path;

use chrono::{TimeZone, Utc};
use logsweep_core::{ConfigError, Decision, SweepConfig};
use logsweep_ops::{Outcome, SweepError, Sweeper};
use logsweep_scan::{Candidate, LogWalker, ScanError};
use tempfile::TempDir;

const PATTERN: &str = r"^app-(?P<date>\d{8})\.log$";

fn config(root: &Path, dry_run: bool) -> SweepConfig {
    SweepConfig::builder()
        .root(root)
        .pattern(PATTERN)
        .layout("20060102")
        .keep_days(7i64)
        .dry_run(dry_run)
        .reference_time(Utc.with_ymd_and_hms(2024, 3, 10, 0, 0, 0).unwrap())
        .build()
        .unwrap()
}

fn touch(root: &Path, name: &str) {
    let path = root.join(name);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, b"log line\n").unwrap();
}

#[test]
fn test_worked_example() {
    let temp = TempDir::new().unwrap();
    let root = temp.path();
    for name in [
        "app-20240301.log",
        "app-20240305.log",
        "app.log",
        "app-2024030X.log",
    ] {
        touch(root, name);
    }

    let summary = Sweeper::run(&config(root, false)).unwrap();

    assert!(!root.join("app-20240301.log").exists());
    assert!(root.join("app-20240305.log").exists());
    assert!(root.join("app.log").exists());
    assert!(root.join("app-2024030X.log").exists());

    assert_eq!(summary.scanned, 4);
    assert_eq!(summary.deleted, 1);
    assert_eq!(summary.kept, 1);
    assert_eq!(summary.unmatched, 2);
    assert_eq!(summary.bytes_reclaimed, 9);
    assert!(!summary.has_errors());
}

#[test]
fn test_unparsable_date_is_skipped() {
    let temp = TempDir::new().unwrap();
    let root = temp.path();
    touch(root, "app-2024030X.log");

    let mut config = config(root, false);
    config.pattern = r"^app-(?P<date>\w{8})\.log$".to_string();

    let summary = Sweeper::run(&config).unwrap();

    assert_eq!(summary.unparsable, 1);
    assert!(root.join("app-2024030X.log").exists());
}

#[test]
fn test_dry_run_keeps_files() {
    let temp = TempDir::new().unwrap();
    let root = temp.path();
    touch(root, "app-20240101.log");
    touch(root, "app-20240201.log");

    let summary = Sweeper::run(&config(root, true)).unwrap();

    assert_eq!(summary.would_delete, 2);
    assert_eq!(summary.deleted, 0);
    assert!(root.join("app-20240101.log").exists());
    assert!(root.join("app-20240201.log").exists());
}

#[test]
fn test_boundary_is_deleted() {
    let temp = TempDir::new().unwrap();
    let root = temp.path();
    touch(root, "app-20240303.log");
    touch(root, "app-20240304.log");

    Sweeper::run(&config(root, false)).unwrap();

    assert!(!root.join("app-20240303.log").exists());
    assert!(root.join("app-20240304.log").exists());
}

#[test]
fn test_future_dated_file_is_kept() {
    let temp = TempDir::new().unwrap();
    let root = temp.path();
    touch(root, "app-20300101.log");

    let summary = Sweeper::run(&config(root, false)).unwrap();

    assert_eq!(summary.kept, 1);
    assert!(root.join("app-20300101.log").exists());
}

#[test]
fn test_nested_directories_are_swept() {
    let temp = TempDir::new().unwrap();
    let root = temp.path();
    touch(root, "a/app-20240101.log");
    touch(root, "a/b/app-20240102.log");
    touch(root, "a/b/app-20240309.log");
    fs::create_dir(root.join("app-20240101.log")).unwrap();

    let summary = Sweeper::run(&config(root, false)).unwrap();

    assert_eq!(summary.deleted, 2);
    assert_eq!(summary.kept, 1);
    assert!(root.join("a/b/app-20240309.log").exists());
    // Directories are never candidates, whatever their name
    assert!(root.join("app-20240101.log").is_dir());
}

#[test]
fn test_second_run_deletes_nothing() {
    let temp = TempDir::new().unwrap();
    let root = temp.path();
    touch(root, "app-20240101.log");
    touch(root, "app-20240309.log");
    let config = config(root, false);

    let first = Sweeper::run(&config).unwrap();
    let second = Sweeper::run(&config).unwrap();

    assert_eq!(first.deleted, 1);
    assert_eq!(second.deleted, 0);
    assert_eq!(second.scanned, 1);
}

#[test]
fn test_delete_failure_is_not_fatal() {
    let temp = TempDir::new().unwrap();
    let root = temp.path();
    let sweeper = Sweeper::new(&config(root, false)).unwrap();

    // The file vanished between the walk and the removal
    let candidate = Candidate::from_path(root.join("app-20240101.log"));
    let outcome = sweeper.process(&candidate);

    match outcome {
        Outcome::DeleteFailed { error, .. } => {
            assert_eq!(error.path, root.join("app-20240101.log"));
            assert!(!error.message.is_empty());
        }
        other => panic!("unexpected outcome: {other:?}"),
    }
}

#[test]
fn test_process_reports_decision() {
    let temp = TempDir::new().unwrap();
    let sweeper = Sweeper::new(&config(temp.path(), true)).unwrap();

    let outcome = sweeper.process(&Candidate::from_path(temp.path().join("app.log")));

    assert_eq!(outcome, Outcome::Skipped(Decision::NoMatch));
}

#[test]
fn test_missing_root_aborts() {
    let temp = TempDir::new().unwrap();
    let missing = temp.path().join("gone");

    let err = Sweeper::run(&config(&missing, false)).unwrap_err();

    assert!(matches!(err, SweepError::Scan(ScanError::NotFound { .. })));
}

#[test]
fn test_config_error_aborts_before_walk() {
    let temp = TempDir::new().unwrap();
    let root = temp.path();
    touch(root, "app-20240101.log");

    let mut config = config(root, false);
    config.pattern = r"^app-(\d{8})\.log$".to_string();

    let err = Sweeper::run(&config).unwrap_err();

    assert!(matches!(
        err,
        SweepError::Config(ConfigError::MissingDateGroup { .. })
    ));
    assert!(root.join("app-20240101.log").exists());
}

#[test]
fn test_sweep_with_explicit_walker() {
    let temp = TempDir::new().unwrap();
    let root = temp.path();
    touch(root, "app-20240101.log");
    touch(root, "deep/er/app-20240101.log");

    let sweeper = Sweeper::new(&config(root, false)).unwrap();
    let walker = LogWalker::new(root).with_max_depth(Some(1));
    let summary = sweeper.sweep(&walker).unwrap();

    assert_eq!(summary.deleted, 1);
    assert!(root.join("deep/er/app-20240101.log").exists());
}
