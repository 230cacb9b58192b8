// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

use super::*;
use crate::comparison::Mismatch;
use rstest::rstest;
use std::path::PathBuf;
use std::thread;

fn regression(name: &str) -> CaptureOutcome {
    CaptureOutcome::Regression(Mismatch {
        description: "pixels differ".into(),
        baseline: PathBuf::from(format!("baselines/{name}")),
        actual: PathBuf::from(format!("out/{name}")),
        diff: None,
    })
}

#[test]
fn test_record_and_retrieve() {
    let log = CaptureLog::new();

    log.record(Path::new("out/a.png"), Scale::FULL, CaptureOutcome::Match);

    assert_eq!(log.len(), 1);
    let records = log.records();
    assert_eq!(records[0].seq, 0);
    assert_eq!(records[0].output, PathBuf::from("out/a.png"));
    assert_eq!(records[0].scale, 1.0);
}

#[rstest]
#[case(1, 1)]
#[case(5, 2)]
#[case(10, 5)]
#[case(3, 10)]
fn test_last_n(#[case] total: usize, #[case] n: usize) {
    let log = CaptureLog::new();

    for i in 0..total {
        log.record(
            Path::new(&format!("out/{i}.png")),
            Scale::FULL,
            CaptureOutcome::Match,
        );
    }

    let last = log.last(n);
    assert_eq!(last.len(), n.min(total));
    if let Some(first) = last.first() {
        assert_eq!(first.seq as usize, total - n.min(total));
    }
}

#[test]
fn test_queries() {
    let log = CaptureLog::new();
    log.record(Path::new("out/button.png"), Scale::FULL, CaptureOutcome::Match);
    log.record(Path::new("out/dialog.png"), Scale::FULL, regression("dialog.png"));
    log.record(
        Path::new("out/dialog_dark.png"),
        Scale::FULL,
        CaptureOutcome::Infrastructure {
            message: "decode failed".into(),
        },
    );

    assert_eq!(log.find_by_output("dialog").len(), 2);
    assert_eq!(log.regressions().len(), 1);
    assert_eq!(log.failures().len(), 2);
    assert_eq!(log.count(|r| r.outcome == CaptureOutcome::Match), 1);

    log.clear();
    assert!(log.is_empty());
}

#[test]
fn test_clones_share_records() {
    let log = CaptureLog::new();
    let clone = log.clone();

    clone.record(Path::new("out/a.png"), Scale::FULL, CaptureOutcome::Match);

    assert_eq!(log.len(), 1);
}

#[test]
fn test_concurrent_records_get_unique_sequence_numbers() {
    let log = CaptureLog::new();
    let handles: Vec<_> = (0..4)
        .map(|t| {
            let log = log.clone();
            thread::spawn(move || {
                for i in 0..25 {
                    log.record(
                        Path::new(&format!("out/{t}-{i}.png")),
                        Scale::FULL,
                        CaptureOutcome::Match,
                    );
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }

    let mut seqs: Vec<u64> = log.records().iter().map(|r| r.seq).collect();
    seqs.sort_unstable();
    assert_eq!(seqs, (0..100).collect::<Vec<u64>>());
}

#[test]
fn test_file_sink_writes_jsonl() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("captures.jsonl");
    let log = CaptureLog::with_file(&path).unwrap();

    log.record(Path::new("out/a.png"), Scale::new(0.5).unwrap(), CaptureOutcome::Match);
    log.record(Path::new("out/b.png"), Scale::FULL, regression("b.png"));

    let content = std::fs::read_to_string(&path).unwrap();
    let lines: Vec<&str> = content.lines().collect();
    assert_eq!(lines.len(), 2);

    let first: serde_json::Value = serde_json::from_str(lines[0]).unwrap();
    assert_eq!(first["outcome"]["type"], "match");
    assert_eq!(first["scale"], 0.5);

    let second: CaptureRecord = serde_json::from_str(lines[1]).unwrap();
    assert_eq!(second.seq, 1);
    assert_eq!(second.outcome, regression("b.png"));
}
