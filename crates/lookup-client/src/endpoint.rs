use std::time::Duration;

use lookup_config::PersonsConfig;
use lookup_core::SearchQuery;

/// Where and how searches are sent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersonsEndpoint {
    pub base_url: String,
    pub field_sets: String,
    pub page_size: u32,
    pub timeout: Duration,
    pub user_agent: String,
}

impl Default for PersonsEndpoint {
    fn default() -> Self {
        Self::from(&PersonsConfig::default())
    }
}

impl From<&PersonsConfig> for PersonsEndpoint {
    fn from(config: &PersonsConfig) -> Self {
        Self {
            base_url: config.base_url.clone(),
            field_sets: config.field_sets.clone(),
            page_size: config.page_size,
            timeout: Duration::from_secs(config.timeout_secs),
            user_agent: config.user_agent.clone(),
        }
    }
}

impl PersonsEndpoint {
    /// Endpoint at `base_url` with default field sets and page size.
    #[must_use]
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }

    /// Full search URL: base, query fragment, field sets, page size.
    #[must_use]
    pub fn search_url(&self, query: &SearchQuery) -> String {
        format!(
            "{}{}&field_sets={}&page_size={}",
            self.base_url,
            query.fragment(),
            self.field_sets,
            self.page_size
        )
    }
}
