//! Persons API endpoint configuration.

use serde::{Deserialize, Serialize};

use crate::ConfigError;

pub const DEFAULT_BASE_URL: &str = "https://api.byu.edu:443/byuapi/persons/v4/";
pub const DEFAULT_FIELD_SETS: &str = "basic,addresses,email_addresses,phones,employee_summary";
pub const MAX_PAGE_SIZE: u32 = 1000;

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_field_sets() -> String {
    DEFAULT_FIELD_SETS.to_string()
}

const fn default_page_size() -> u32 {
    50
}

const fn default_timeout_secs() -> u64 {
    30
}

fn default_user_agent() -> String {
    format!("persons-lookup/{}", env!("CARGO_PKG_VERSION"))
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PersonsConfig {
    /// Collection URL searches are appended to. Must end where the query begins.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Comma-separated field sets requested with every search.
    #[serde(default = "default_field_sets")]
    pub field_sets: String,

    /// Results per page.
    #[serde(default = "default_page_size")]
    pub page_size: u32,

    /// Transport timeout for a single request, in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

impl Default for PersonsConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            field_sets: default_field_sets(),
            page_size: default_page_size(),
            timeout_secs: default_timeout_secs(),
            user_agent: default_user_agent(),
        }
    }
}

impl PersonsConfig {
    /// Reject values the persons API cannot accept.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] for a non-HTTP base URL, an empty
    /// field-set list, or a page size outside `1..=1000`.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.base_url.starts_with("https://") || self.base_url.starts_with("http://")) {
            return Err(ConfigError::Invalid {
                field: "persons.base_url",
                reason: format!("expected an http(s) URL, got '{}'", self.base_url),
            });
        }
        if self.field_sets.trim().is_empty() {
            return Err(ConfigError::Invalid {
                field: "persons.field_sets",
                reason: "at least one field set is required".into(),
            });
        }
        if self.page_size == 0 || self.page_size > MAX_PAGE_SIZE {
            return Err(ConfigError::Invalid {
                field: "persons.page_size",
                reason: format!("must be between 1 and {MAX_PAGE_SIZE}, got {}", self.page_size),
            });
        }
        Ok(())
    }
}
