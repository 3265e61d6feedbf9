//! The build pipeline: source document in, published store out.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

use kotoba_core::abbrev::AbbreviationTable;
use kotoba_db::reader::StoreCounts;
use kotoba_db::staging::{BuildLock, StagingStore};
use kotoba_db::writer::StoreWriter;
use serde::Serialize;

use crate::error::IngestError;
use crate::parser::EntryParser;
use crate::progress::ProgressObserver;
use crate::session::BuildSession;

/// Entries per storage batch unless configured otherwise.
pub const DEFAULT_BATCH_SIZE: usize = 2000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BuildOptions {
    pub batch_size: usize,
}

impl Default for BuildOptions {
    fn default() -> Self {
        Self {
            batch_size: DEFAULT_BATCH_SIZE,
        }
    }
}

impl BuildOptions {
    /// # Errors
    ///
    /// Returns `IngestError::InvalidOptions` for a zero batch size.
    pub fn validate(&self) -> Result<(), IngestError> {
        if self.batch_size == 0 {
            return Err(IngestError::InvalidOptions(
                "batch_size must be at least 1".into(),
            ));
        }
        Ok(())
    }
}

/// Summary of a successful build.
#[derive(Debug, Clone, Serialize)]
pub struct BuildReport {
    pub store: PathBuf,
    pub counts: StoreCounts,
    pub batches: usize,
    pub abbreviations: usize,
    pub provisional_abbreviations: usize,
}

/// Parse `source` and write its entries through `writer` in batches.
///
/// # Errors
///
/// Propagates parser and storage errors; batches already written stay in
/// the (staging) store.
pub async fn ingest<R: BufRead>(
    source: R,
    session: &mut BuildSession<'_>,
    writer: &StoreWriter,
    batch_size: usize,
) -> Result<(), IngestError> {
    let mut parser = EntryParser::new(source);
    let mut pending = Vec::with_capacity(batch_size);

    while let Some(entry) = parser.next_entry(session.abbreviations_mut())? {
        pending.push(entry);
        if pending.len() >= batch_size {
            session.flush(writer, &mut pending).await?;
        }
    }
    session.flush(writer, &mut pending).await?;
    Ok(())
}

/// Build a fresh store from `source` and publish it at `target`.
///
/// The build runs in a staging file next to `target` under a pid lock.
/// On any error, or if the returned future is dropped before completion,
/// the staging file and lock are removed and `target` is left as it was.
///
/// # Errors
///
/// `IngestError::Source` if the document cannot be opened,
/// `IngestError::Staging` if another build holds the lock, and any parse or
/// storage error raised on the way.
pub async fn build_store(
    source: &Path,
    target: &Path,
    options: &BuildOptions,
    observer: &dyn ProgressObserver,
) -> Result<BuildReport, IngestError> {
    options.validate()?;
    let file = File::open(source).map_err(|source_err| IngestError::Source {
        path: source.to_path_buf(),
        source: source_err,
    })?;

    let _lock = BuildLock::acquire(target)?;
    let staging = StagingStore::new(target)?;
    tracing::info!(
        source = %source.display(),
        staging = %staging.path().display(),
        batch_size = options.batch_size,
        "building store"
    );

    let writer = StoreWriter::create(staging.path()).await?;
    let mut session = BuildSession::new(AbbreviationTable::builtin(), observer);
    ingest(BufReader::new(file), &mut session, &writer, options.batch_size).await?;

    let batches = session.batches();
    let abbreviations = session.into_abbreviations();
    writer.write_abbreviations(&abbreviations).await?;

    observer.on_indexing();
    let counts = writer.finish().await?;
    drop(writer);

    let store = staging.publish()?;
    observer.on_finished(&counts);

    Ok(BuildReport {
        store,
        counts,
        batches,
        abbreviations: abbreviations.len(),
        provisional_abbreviations: abbreviations.entries().filter(|a| a.provisional).count(),
    })
}
