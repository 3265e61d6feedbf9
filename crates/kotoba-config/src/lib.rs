//! # kotoba-config
//!
//! Layered configuration loading for kotoba using figment.
//!
//! Configuration sources (in priority order, highest wins):
//! 1. Environment variables (`KOTOBA_*` prefix, `__` as separator)
//! 2. Project-level `./kotoba.toml`
//! 3. User-level `~/.config/kotoba/config.toml`
//! 4. Built-in defaults
//!
//! # Environment Variable Mapping
//!
//! Figment maps `KOTOBA_STORE__PATH` -> `store.path`,
//! `KOTOBA_INGEST__BATCH_SIZE` -> `ingest.batch_size`, etc.
//!
//! # Usage
//!
//! ```no_run
//! use kotoba_config::KotobaConfig;
//!
//! let config = KotobaConfig::load_with_dotenv().expect("config");
//! println!("store at {}", config.store.path.display());
//! ```

mod error;
mod ingest;
mod search;
mod store;

pub use error::ConfigError;
pub use ingest::IngestConfig;
pub use search::SearchConfig;
pub use store::StoreConfig;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct KotobaConfig {
    #[serde(default)]
    pub store: StoreConfig,
    #[serde(default)]
    pub ingest: IngestConfig,
    #[serde(default)]
    pub search: SearchConfig,
}

impl KotobaConfig {
    /// Load configuration from all sources (TOML files + environment variables).
    ///
    /// Does NOT call `dotenvy` -- use [`Self::load_with_dotenv`] for `.env` support.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a source cannot be parsed or a value is invalid.
    pub fn load() -> Result<Self, ConfigError> {
        let config: Self = Self::figment().extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration with `.env` file support from the current directory.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a source cannot be parsed or a value is invalid.
    pub fn load_with_dotenv() -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();
        Self::load()
    }

    /// Build the figment provider chain.
    ///
    /// Public so tests can inspect the figment directly or add providers on top.
    #[must_use]
    pub fn figment() -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        // Layer 1: User-global config
        if let Some(global_path) = Self::global_config_path()
            && global_path.exists()
        {
            figment = figment.merge(Toml::file(global_path));
        }

        // Layer 2: Project-local config
        let local_path = PathBuf::from("kotoba.toml");
        if local_path.exists() {
            figment = figment.merge(Toml::file(local_path));
        }

        // Layer 3: Environment variables (highest priority)
        figment.merge(Env::prefixed("KOTOBA_").split("__"))
    }

    /// Validate cross-section constraints.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` for values the pipeline cannot use.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.ingest.validate()
    }

    fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("kotoba").join("config.toml"))
    }
}
