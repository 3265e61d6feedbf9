use anyhow::Context;

/// Load `.env` from the working directory (if any), then the layered config.
pub fn load_config() -> anyhow::Result<kotoba_config::KotobaConfig> {
    match dotenvy::dotenv() {
        Ok(path) => tracing::debug!(path = %path.display(), "loaded dotenv file"),
        Err(error) if error.not_found() => {}
        Err(error) => return Err(error).context("failed to load .env file"),
    }

    kotoba_config::KotobaConfig::load().context("failed to load kotoba configuration")
}
