//! Progress notifications emitted during a build.

use kotoba_db::reader::StoreCounts;

/// Receives build milestones. Every method defaults to a no-op.
pub trait ProgressObserver: Send + Sync {
    /// A batch was written; `entries_completed` counts every entry so far.
    fn on_flush(&self, _entries_completed: u64) {}

    /// All entries are loaded and index construction has started.
    fn on_indexing(&self) {}

    /// The store was published.
    fn on_finished(&self, _counts: &StoreCounts) {}
}

/// Observer that ignores every notification.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoProgress;

impl ProgressObserver for NoProgress {}
