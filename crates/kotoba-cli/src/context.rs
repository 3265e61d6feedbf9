use std::path::PathBuf;

use anyhow::Context;
use kotoba_config::KotobaConfig;
use kotoba_db::KotobaDb;

use crate::cli::GlobalFlags;

/// Configuration plus the resolved store location, shared by all handlers.
#[derive(Debug)]
pub struct AppContext {
    pub config: KotobaConfig,
    pub store: PathBuf,
}

impl AppContext {
    /// `--db` wins over `store.path` from the config.
    #[must_use]
    pub fn new(config: KotobaConfig, flags: &GlobalFlags) -> Self {
        let store = flags
            .db
            .clone()
            .unwrap_or_else(|| config.store.path.clone());
        Self { config, store }
    }

    /// Open the published store for lookups.
    pub async fn open_store(&self) -> anyhow::Result<KotobaDb> {
        KotobaDb::open_existing(&self.store).await.with_context(|| {
            format!(
                "no dictionary store at {} (run 'kotoba build' first)",
                self.store.display()
            )
        })
    }

    /// Result cap: `--limit`, else `search.default_limit`.
    #[must_use]
    pub fn limit(&self, flags: &GlobalFlags) -> u32 {
        flags.limit.unwrap_or(self.config.search.default_limit)
    }
}
