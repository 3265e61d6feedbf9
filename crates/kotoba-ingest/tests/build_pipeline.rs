//! End-to-end builds from a small JMdict document into a published store.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use kotoba_db::KotobaDb;
use kotoba_db::reader::StoreCounts;
use kotoba_db::staging::{StagingError, lock_path, staging_path};
use kotoba_ingest::{BuildOptions, IngestError, NoProgress, ProgressObserver, build_store};
use pretty_assertions::assert_eq;

fn fixture() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/jmdict_sample.xml")
}

fn files_in(dir: &Path) -> BTreeSet<String> {
    std::fs::read_dir(dir)
        .unwrap()
        .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
        .collect()
}

async fn ids(db: &KotobaDb, sql: &str) -> Vec<i64> {
    let mut rows = db.conn().query(sql, ()).await.unwrap();
    let mut ids = Vec::new();
    while let Some(row) = rows.next().await.unwrap() {
        ids.push(row.get::<i64>(0).unwrap());
    }
    ids
}

const SAMPLE_COUNTS: StoreCounts = StoreCounts {
    entries: 4,
    kanjis: 3,
    readings: 5,
    senses: 4,
    glosses: 7,
};

#[tokio::test]
async fn build_publishes_complete_store() {
    let temp = tempfile::tempdir().unwrap();
    let target = temp.path().join("jmdict.sqlite");

    let report = build_store(&fixture(), &target, &BuildOptions::default(), &NoProgress)
        .await
        .unwrap();

    assert_eq!(report.store, target);
    assert_eq!(report.counts, SAMPLE_COUNTS);
    assert_eq!(report.batches, 1);
    assert_eq!(report.provisional_abbreviations, 1);
    assert_eq!(files_in(temp.path()), BTreeSet::from(["jmdict.sqlite".to_string()]));

    let db = KotobaDb::open_existing(&target).await.unwrap();
    assert_eq!(db.counts().await.unwrap(), SAMPLE_COUNTS);
    assert!(db.version().await.unwrap().is_some());

    let aikido = db.fetch_entry(1_000_000).await.unwrap().unwrap();
    assert!(aikido.frequent);
    assert_eq!(aikido.senses[0].tags.field, vec!["MA".to_string()]);

    let maji = db.fetch_entry(1_000_020).await.unwrap().unwrap();
    assert!(!maji.frequent);
    assert_eq!(
        maji.senses[0].tags.misc,
        vec!["sl".to_string(), "bikkuri".to_string()]
    );

    let meihaku = db.fetch_entry(1_000_010).await.unwrap().unwrap();
    assert_eq!(
        meihaku.senses[0].note.as_deref(),
        Some("formal; usu. written with kanji")
    );
    assert!(meihaku.readings[1].no_kanji);

    let stored = db.abbreviations().await.unwrap();
    let bikkuri = stored.iter().find(|a| a.code == "bikkuri").unwrap();
    assert!(bikkuri.provisional);
    assert_eq!(bikkuri.short, "surprise marker");
}

#[tokio::test]
async fn ids_keep_increasing_across_batches() {
    let temp = tempfile::tempdir().unwrap();
    let target = temp.path().join("jmdict.sqlite");

    let report = build_store(
        &fixture(),
        &target,
        &BuildOptions { batch_size: 1 },
        &NoProgress,
    )
    .await
    .unwrap();
    assert_eq!(report.batches, 4);

    let db = KotobaDb::open_existing(&target).await.unwrap();
    assert_eq!(
        ids(&db, "SELECT id FROM readings ORDER BY ent_seq, ord").await,
        vec![1, 2, 3, 4, 5]
    );
    assert_eq!(
        ids(&db, "SELECT id FROM senses ORDER BY ent_seq, ord").await,
        vec![1, 2, 3, 4]
    );
}

#[derive(Default)]
struct Recorder {
    flushes: Mutex<Vec<u64>>,
    indexing: Mutex<bool>,
    finished: Mutex<Option<StoreCounts>>,
}

impl ProgressObserver for Recorder {
    fn on_flush(&self, entries_completed: u64) {
        self.flushes.lock().unwrap().push(entries_completed);
    }

    fn on_indexing(&self) {
        *self.indexing.lock().unwrap() = true;
    }

    fn on_finished(&self, counts: &StoreCounts) {
        *self.finished.lock().unwrap() = Some(*counts);
    }
}

#[tokio::test]
async fn observer_is_notified_after_each_flush() {
    let temp = tempfile::tempdir().unwrap();
    let target = temp.path().join("jmdict.sqlite");
    let recorder = Recorder::default();

    build_store(&fixture(), &target, &BuildOptions { batch_size: 3 }, &recorder)
        .await
        .unwrap();

    assert_eq!(*recorder.flushes.lock().unwrap(), vec![3, 4]);
    assert!(*recorder.indexing.lock().unwrap());
    assert_eq!(*recorder.finished.lock().unwrap(), Some(SAMPLE_COUNTS));
}

#[tokio::test]
async fn failed_build_leaves_published_store_untouched() {
    let temp = tempfile::tempdir().unwrap();
    let target = temp.path().join("jmdict.sqlite");
    build_store(&fixture(), &target, &BuildOptions::default(), &NoProgress)
        .await
        .unwrap();

    // Two good entries get flushed before the broken one is reached.
    let broken = temp.path().join("broken.xml");
    let document = std::fs::read_to_string(fixture())
        .unwrap()
        .replace("<ent_seq>1000020</ent_seq>", "<ent_seq>1000020</ent_seq><keb>迷子</keb>");
    std::fs::write(&broken, document).unwrap();

    let err = build_store(&broken, &target, &BuildOptions { batch_size: 1 }, &NoProgress)
        .await
        .unwrap_err();
    assert!(matches!(err, IngestError::Structure { .. }), "got {err}");

    assert_eq!(
        files_in(temp.path()),
        BTreeSet::from(["broken.xml".to_string(), "jmdict.sqlite".to_string()])
    );
    let db = KotobaDb::open_existing(&target).await.unwrap();
    assert_eq!(db.counts().await.unwrap(), SAMPLE_COUNTS);
}

#[tokio::test]
async fn unresolvable_tag_aborts_build() {
    let temp = tempfile::tempdir().unwrap();
    let target = temp.path().join("jmdict.sqlite");
    let broken = temp.path().join("broken.xml");
    let document = std::fs::read_to_string(fixture())
        .unwrap()
        .replace("<field>&MA;</field>", "<field>underwater basket weaving</field>");
    std::fs::write(&broken, document).unwrap();

    let err = build_store(&broken, &target, &BuildOptions::default(), &NoProgress)
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        IngestError::InconsistentAbbreviation { field: "field", ent_seq: 1_000_000, .. }
    ));
    assert!(!target.exists());
}

#[tokio::test]
async fn running_build_blocks_second_build() {
    let temp = tempfile::tempdir().unwrap();
    let target = temp.path().join("jmdict.sqlite");
    std::fs::write(lock_path(&target), format!("{}\n", std::process::id())).unwrap();

    let err = build_store(&fixture(), &target, &BuildOptions::default(), &NoProgress)
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        IngestError::Staging(StagingError::AlreadyRunning { .. })
    ));
    assert!(!target.exists());
    assert!(lock_path(&target).exists());
}

#[tokio::test]
async fn stale_build_artifacts_are_cleared() {
    let temp = tempfile::tempdir().unwrap();
    let target = temp.path().join("jmdict.sqlite");
    let dead_pid = i32::MAX;
    std::fs::write(lock_path(&target), format!("{dead_pid}\n")).unwrap();
    let stale = staging_path(&target, dead_pid.unsigned_abs());
    std::fs::write(&stale, b"half written").unwrap();

    build_store(&fixture(), &target, &BuildOptions::default(), &NoProgress)
        .await
        .unwrap();

    assert_eq!(files_in(temp.path()), BTreeSet::from(["jmdict.sqlite".to_string()]));
}

#[tokio::test]
async fn missing_source_creates_nothing() {
    let temp = tempfile::tempdir().unwrap();
    let target = temp.path().join("jmdict.sqlite");

    let err = build_store(
        &temp.path().join("absent.xml"),
        &target,
        &BuildOptions::default(),
        &NoProgress,
    )
    .await
    .unwrap_err();
    assert!(matches!(err, IngestError::Source { .. }));
    assert!(files_in(temp.path()).is_empty());
}

#[tokio::test]
async fn zero_batch_size_is_rejected() {
    let temp = tempfile::tempdir().unwrap();
    let err = build_store(
        &fixture(),
        &temp.path().join("jmdict.sqlite"),
        &BuildOptions { batch_size: 0 },
        &NoProgress,
    )
    .await
    .unwrap_err();
    assert!(matches!(err, IngestError::InvalidOptions(_)));
}
