//! Store location configuration.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Default published store: `<data_dir>/kotoba/jmdict.sqlite`.
fn default_path() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("kotoba")
        .join("jmdict.sqlite")
}

fn default_source() -> PathBuf {
    PathBuf::from("JMdict_e")
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StoreConfig {
    /// Path of the published SQLite store.
    #[serde(default = "default_path")]
    pub path: PathBuf,

    /// Source document used by `kotoba build` when none is given.
    #[serde(default = "default_source")]
    pub source: PathBuf,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            path: default_path(),
            source: default_source(),
        }
    }
}
