//! Ingestion configuration.

use serde::{Deserialize, Serialize};

use crate::ConfigError;

/// Entries buffered before a flush to storage.
const fn default_batch_size() -> usize {
    2000
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct IngestConfig {
    #[serde(default = "default_batch_size")]
    pub batch_size: usize,
}

impl Default for IngestConfig {
    fn default() -> Self {
        Self {
            batch_size: default_batch_size(),
        }
    }
}

impl IngestConfig {
    /// Reject values the pipeline cannot run with.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` when `batch_size` is zero.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.batch_size == 0 {
            return Err(ConfigError::InvalidValue {
                field: "ingest.batch_size".into(),
                reason: "must be at least 1".into(),
            });
        }
        Ok(())
    }
}
