//! Per-build state threaded through the ingestion pipeline.

use kotoba_core::abbrev::AbbreviationTable;
use kotoba_core::model::Entry;
use kotoba_db::writer::{BatchIds, StoreWriter};

use crate::error::IngestError;
use crate::progress::ProgressObserver;

/// Everything one build accumulates besides the store itself.
pub struct BuildSession<'o> {
    abbreviations: AbbreviationTable,
    entries_completed: u64,
    batches: usize,
    observer: &'o dyn ProgressObserver,
}

impl<'o> BuildSession<'o> {
    #[must_use]
    pub fn new(abbreviations: AbbreviationTable, observer: &'o dyn ProgressObserver) -> Self {
        Self {
            abbreviations,
            entries_completed: 0,
            batches: 0,
            observer,
        }
    }

    #[must_use]
    pub const fn abbreviations(&self) -> &AbbreviationTable {
        &self.abbreviations
    }

    pub const fn abbreviations_mut(&mut self) -> &mut AbbreviationTable {
        &mut self.abbreviations
    }

    #[must_use]
    pub const fn entries_completed(&self) -> u64 {
        self.entries_completed
    }

    #[must_use]
    pub const fn batches(&self) -> usize {
        self.batches
    }

    #[must_use]
    pub fn observer(&self) -> &'o dyn ProgressObserver {
        self.observer
    }

    /// Write the pending entries as one batch and clear the queue.
    ///
    /// An empty queue is a no-op.
    ///
    /// # Errors
    ///
    /// Returns `IngestError::Database` if the batch cannot be written.
    pub async fn flush(
        &mut self,
        writer: &StoreWriter,
        pending: &mut Vec<Entry>,
    ) -> Result<BatchIds, IngestError> {
        if pending.is_empty() {
            return Ok(BatchIds::default());
        }

        let ids = writer.write_batch(pending).await?;
        self.entries_completed += pending.len() as u64;
        self.batches += 1;
        pending.clear();

        tracing::info!(
            batch = self.batches,
            entries = self.entries_completed,
            "flushed batch"
        );
        self.observer.on_flush(self.entries_completed);

        // Local libSQL calls never suspend; yield so a racing shutdown signal
        // gets polled between batches.
        tokio::task::yield_now().await;
        Ok(ids)
    }

    /// Hand back the abbreviation table once parsing is done.
    #[must_use]
    pub fn into_abbreviations(self) -> AbbreviationTable {
        self.abbreviations
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use kotoba_db::KotobaDb;

    use super::*;

    #[derive(Default)]
    struct Recorder(Mutex<Vec<u64>>);

    impl ProgressObserver for Recorder {
        fn on_flush(&self, entries_completed: u64) {
            self.0.lock().unwrap().push(entries_completed);
        }
    }

    #[tokio::test]
    async fn flush_counts_entries_and_notifies() {
        let writer = StoreWriter::from_db(KotobaDb::open_local(":memory:").await.unwrap());
        let recorder = Recorder::default();
        let mut session = BuildSession::new(AbbreviationTable::builtin(), &recorder);

        let mut pending = vec![Entry::new(1), Entry::new(2)];
        session.flush(&writer, &mut pending).await.unwrap();
        assert!(pending.is_empty());

        pending.push(Entry::new(3));
        session.flush(&writer, &mut pending).await.unwrap();

        assert_eq!(session.entries_completed(), 3);
        assert_eq!(session.batches(), 2);
        assert_eq!(*recorder.0.lock().unwrap(), vec![2, 3]);
    }

    #[tokio::test]
    async fn empty_flush_is_silent() {
        let writer = StoreWriter::from_db(KotobaDb::open_local(":memory:").await.unwrap());
        let recorder = Recorder::default();
        let mut session = BuildSession::new(AbbreviationTable::builtin(), &recorder);

        session.flush(&writer, &mut Vec::new()).await.unwrap();
        assert_eq!(session.batches(), 0);
        assert!(recorder.0.lock().unwrap().is_empty());
    }
}
