use std::sync::OnceLock;

use indicatif::{MultiProgress, ProgressBar, ProgressStyle};
use kotoba_db::reader::StoreCounts;
use kotoba_ingest::ProgressObserver;

use crate::ui;

pub struct Progress {
    bar: Option<ProgressBar>,
}

static MULTI_PROGRESS: OnceLock<MultiProgress> = OnceLock::new();

fn multi_progress() -> &'static MultiProgress {
    MULTI_PROGRESS.get_or_init(MultiProgress::new)
}

impl Progress {
    #[must_use]
    pub fn spinner(message: &str) -> Self {
        if !ui::prefs().progress {
            return Self { bar: None };
        }

        let bar = multi_progress().add(ProgressBar::new_spinner());
        bar.enable_steady_tick(std::time::Duration::from_millis(100));
        bar.set_style(
            ProgressStyle::with_template("{spinner:.cyan} {msg} [{elapsed}]")
                .unwrap_or_else(|_| ProgressStyle::default_spinner()),
        );
        bar.set_message(message.to_string());
        Self { bar: Some(bar) }
    }

    pub fn set_message(&self, message: &str) {
        if let Some(bar) = &self.bar {
            bar.set_message(message.to_string());
        }
    }

    pub fn finish_ok(&self, message: &str) {
        if let Some(bar) = &self.bar {
            bar.finish_with_message(message.to_string());
        }
    }

    pub fn finish_err(&self, message: &str) {
        if let Some(bar) = &self.bar {
            bar.abandon_with_message(message.to_string());
        }
    }
}

/// Spinner fed by build milestones.
pub struct BuildProgress {
    progress: Progress,
}

impl BuildProgress {
    #[must_use]
    pub fn start() -> Self {
        Self {
            progress: Progress::spinner("parsing dictionary"),
        }
    }

    pub fn failed(&self) {
        self.progress.finish_err("build failed");
    }
}

impl ProgressObserver for BuildProgress {
    fn on_flush(&self, entries_completed: u64) {
        self.progress
            .set_message(&format!("{entries_completed} entries written"));
    }

    fn on_indexing(&self) {
        self.progress.set_message("building indexes");
    }

    fn on_finished(&self, counts: &StoreCounts) {
        self.progress
            .finish_ok(&format!("published {} entries", counts.entries));
    }
}
