// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Capture log implementation.

use crate::record::{CaptureOutcome, CaptureRecord};
use crate::request::Scale;
use parking_lot::Mutex;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use std::sync::Arc;
use std::time::{Instant, SystemTime};

/// Log of capture-and-compare cycles.
///
/// Clones share the same records, so a test can hand one clone to a
/// [`CaptureReporter`](crate::CaptureReporter) and inspect another.
pub struct CaptureLog {
    start: Instant,
    records: Arc<Mutex<Vec<CaptureRecord>>>,
    file_writer: Option<Arc<Mutex<BufWriter<File>>>>,
}

impl CaptureLog {
    /// Create a new in-memory capture log
    pub fn new() -> Self {
        Self {
            start: Instant::now(),
            records: Arc::new(Mutex::new(Vec::new())),
            file_writer: None,
        }
    }

    /// Create a capture log that also appends each record to `path` as JSONL
    pub fn with_file(path: &Path) -> std::io::Result<Self> {
        let file = File::create(path)?;
        Ok(Self {
            file_writer: Some(Arc::new(Mutex::new(BufWriter::new(file)))),
            ..Self::new()
        })
    }

    /// Record the outcome of one capture
    pub fn record(&self, output: &Path, scale: Scale, outcome: CaptureOutcome) {
        let mut records = self.records.lock();
        let record = CaptureRecord {
            seq: records.len() as u64,
            timestamp: SystemTime::now(),
            elapsed_ms: self.start.elapsed().as_millis() as u64,
            output: output.to_path_buf(),
            scale: scale.get(),
            outcome,
        };

        if let Some(ref writer) = self.file_writer {
            if let Err(err) = Self::append(writer, &record) {
                tracing::warn!(error = %err, "failed to append capture record");
            }
        }

        records.push(record);
    }

    fn append(writer: &Mutex<BufWriter<File>>, record: &CaptureRecord) -> std::io::Result<()> {
        let json = serde_json::to_string(record)?;
        let mut w = writer.lock();
        writeln!(w, "{}", json)?;
        w.flush()
    }

    /// All records in capture order
    pub fn records(&self) -> Vec<CaptureRecord> {
        self.records.lock().clone()
    }

    /// The last `n` records
    pub fn last(&self, n: usize) -> Vec<CaptureRecord> {
        let all = self.records.lock();
        all.iter().rev().take(n).rev().cloned().collect()
    }

    /// Count records matching a predicate
    pub fn count<F: Fn(&CaptureRecord) -> bool>(&self, pred: F) -> usize {
        self.records.lock().iter().filter(|r| pred(r)).count()
    }

    /// Records whose output path contains `pattern`
    pub fn find_by_output(&self, pattern: &str) -> Vec<CaptureRecord> {
        self.records
            .lock()
            .iter()
            .filter(|r| r.output.to_string_lossy().contains(pattern))
            .cloned()
            .collect()
    }

    /// Records that ended in a visual regression
    pub fn regressions(&self) -> Vec<CaptureRecord> {
        self.records
            .lock()
            .iter()
            .filter(|r| matches!(r.outcome, CaptureOutcome::Regression(_)))
            .cloned()
            .collect()
    }

    /// Records that did not match, for any reason
    pub fn failures(&self) -> Vec<CaptureRecord> {
        self.records
            .lock()
            .iter()
            .filter(|r| r.outcome.is_failure())
            .cloned()
            .collect()
    }

    pub fn len(&self) -> usize {
        self.records.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.lock().is_empty()
    }

    pub fn clear(&self) {
        self.records.lock().clear();
    }
}

impl Default for CaptureLog {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for CaptureLog {
    fn clone(&self) -> Self {
        Self {
            start: self.start,
            records: Arc::clone(&self.records),
            file_writer: self.file_writer.as_ref().map(Arc::clone),
        }
    }
}

impl std::fmt::Debug for CaptureLog {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CaptureLog")
            .field("records", &self.len())
            .field("file", &self.file_writer.is_some())
            .finish()
    }
}

#[cfg(test)]
#[path = "log_tests.rs"]
mod tests;
