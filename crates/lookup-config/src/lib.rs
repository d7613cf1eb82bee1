//! # lookup-config
//!
//! Layered configuration loading for persons lookup using figment.
//!
//! Configuration sources (in priority order, highest wins):
//! 1. Environment variables (`LOOKUP_*` prefix, `__` as separator)
//! 2. Project-level `.lookup/config.toml`
//! 3. User-level `~/.config/lookup/config.toml`
//! 4. Built-in defaults
//!
//! # Environment Variable Mapping
//!
//! Figment maps `LOOKUP_AUTH__TOKEN` -> `auth.token`,
//! `LOOKUP_PERSONS__PAGE_SIZE` -> `persons.page_size`, etc.
//!
//! # Usage
//!
//! ```no_run
//! use lookup_config::LookupConfig;
//!
//! let config = LookupConfig::load_with_dotenv().expect("config");
//! println!("searching {}", config.persons.base_url);
//! ```

mod auth;
mod error;
mod persons;

pub use auth::AuthConfig;
pub use error::ConfigError;
pub use persons::{DEFAULT_BASE_URL, DEFAULT_FIELD_SETS, MAX_PAGE_SIZE, PersonsConfig};

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct LookupConfig {
    #[serde(default)]
    pub persons: PersonsConfig,
    #[serde(default)]
    pub auth: AuthConfig,
}

impl LookupConfig {
    /// Load configuration from all sources (TOML files + environment variables).
    ///
    /// Does NOT call `dotenvy` -- use [`Self::load_with_dotenv`] if you need
    /// `.env` file loading.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Load`] if a source fails to parse, or
    /// [`ConfigError::Invalid`] if the merged values are unusable.
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_figment(&Self::figment())
    }

    /// Load configuration with `.env` file support.
    ///
    /// # Errors
    ///
    /// Same as [`Self::load`].
    pub fn load_with_dotenv() -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();
        Self::load()
    }

    /// Extract and validate a config from an arbitrary figment.
    ///
    /// # Errors
    ///
    /// Same as [`Self::load`].
    pub fn from_figment(figment: &Figment) -> Result<Self, ConfigError> {
        let config: Self = figment.extract()?;
        config.persons.validate()?;
        Ok(config)
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
        let local_path = PathBuf::from(".lookup/config.toml");
        if local_path.exists() {
            figment = figment.merge(Toml::file(local_path));
        }

        // Layer 3: Environment variables (highest priority)
        figment.merge(Env::prefixed("LOOKUP_").split("__"))
    }

    fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("lookup").join("config.toml"))
    }
}
