//! Row-level progress reporting while the CSV tables load.
//!
//! The loaders only know they read one row at a time; how that is shown
//! (spinner, log line, nothing) is up to the binary.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

/// Receives progress from [`crate::load`] as rows are read.
pub trait ProgressCallback: Send + Sync {
    /// `delta` more rows have been read.
    fn inc(&self, delta: u64);

    /// Names the file or phase currently being read.
    fn set_message(&self, msg: String);

    /// Loading finished; `msg` summarizes what was loaded.
    fn finish(&self, msg: String);
}

/// Discards all progress.
pub struct NullProgress;

impl ProgressCallback for NullProgress {
    fn inc(&self, _delta: u64) {}
    fn set_message(&self, _msg: String) {}
    fn finish(&self, _msg: String) {}
}

/// A shared [`NullProgress`], for library callers and tests.
#[must_use]
pub fn null_progress() -> Arc<dyn ProgressCallback> {
    Arc::new(NullProgress)
}

/// Counts rows without rendering anything and logs the summary at
/// `debug` when loading finishes.
#[derive(Debug, Default)]
pub struct RowCounter {
    rows: AtomicU64,
}

impl RowCounter {
    /// Rows reported so far.
    #[must_use]
    pub fn rows(&self) -> u64 {
        self.rows.load(Ordering::Relaxed)
    }
}

impl ProgressCallback for RowCounter {
    fn inc(&self, delta: u64) {
        self.rows.fetch_add(delta, Ordering::Relaxed);
    }

    fn set_message(&self, msg: String) {
        log::trace!("{msg}");
    }

    fn finish(&self, msg: String) {
        log::debug!("{msg} ({} rows counted)", self.rows());
    }
}
