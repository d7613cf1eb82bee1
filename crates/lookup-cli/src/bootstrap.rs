use anyhow::Context;

/// Load `.env` from the working directory (if present), then layered config.
pub fn load_config() -> anyhow::Result<lookup_config::LookupConfig> {
    lookup_config::LookupConfig::load_with_dotenv().context("failed to load lookup configuration")
}
