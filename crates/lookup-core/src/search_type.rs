//! Search-type resolution for free-text person searches.
//!
//! A single input box accepts BYU IDs, net IDs, email addresses, and names.
//! [`resolve_search_type`] guesses which one the user typed and produces the
//! persons API query parameters for it. Rules are checked in priority order:
//!
//! ```text
//! ""                      → surname=""                      (Search)
//! 3-9 digits              → byu_ids=<text>                  (BYU ID)
//! [a-z][a-z0-9]{2,7}      → net_ids=<text>                  (Net ID)
//! <prefix>@<suffix>       → email_addresses.email_address   (Email)
//! "Last, First"           → surname + rest_of_name          (Name)
//! "First Middle Last"     → surname + rest_of_name          (Name)
//! anything else           → surname=<text>                  (Name)
//! ```

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

static BYU_ID: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]{3,9}$").expect("BYU ID pattern is valid"));

static NET_ID: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-z][a-z0-9]{2,7}$").expect("net ID pattern is valid"));

static EMAIL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^@]+@[^@]+$").expect("email pattern is valid"));

static FULL_NAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^ ]+ +[^ ]+[^0-9]*$").expect("name pattern is valid"));

pub const PARAM_SURNAME: &str = "surname";
pub const PARAM_REST_OF_NAME: &str = "rest_of_name";
pub const PARAM_BYU_IDS: &str = "byu_ids";
pub const PARAM_NET_IDS: &str = "net_ids";
pub const PARAM_EMAIL: &str = "email_addresses.email_address";

// ---------------------------------------------------------------------------
// SearchKind
// ---------------------------------------------------------------------------

/// What the resolver decided the search text is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchKind {
    /// Nothing was typed.
    Empty,
    ByuId,
    NetId,
    Email,
    /// Two or more tokens, split into surname and rest of name.
    Name,
    /// Whole text treated as a surname.
    Surname,
}

impl SearchKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Empty => "empty",
            Self::ByuId => "byu_id",
            Self::NetId => "net_id",
            Self::Email => "email",
            Self::Name => "name",
            Self::Surname => "surname",
        }
    }

    /// Human-readable label shown next to the search box.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Empty => "Search",
            Self::ByuId => "BYU ID",
            Self::NetId => "Net ID",
            Self::Email => "Email",
            Self::Name | Self::Surname => "Name",
        }
    }
}

impl fmt::Display for SearchKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// SearchQuery
// ---------------------------------------------------------------------------

/// A classified search: the kind and the ordered query parameters it maps to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchQuery {
    pub kind: SearchKind,
    pub params: Vec<(String, String)>,
}

impl SearchQuery {
    fn new(kind: SearchKind, params: &[(&str, &str)]) -> Self {
        Self {
            kind,
            params: params
                .iter()
                .map(|(key, value)| ((*key).to_string(), (*value).to_string()))
                .collect(),
        }
    }

    #[must_use]
    pub const fn label(&self) -> &'static str {
        self.kind.label()
    }

    /// Value of the first parameter named `key`, if present.
    #[must_use]
    pub fn param(&self, key: &str) -> Option<&str> {
        self.params
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Render the parameters as a query fragment, e.g. `?byu_ids=123456789`.
    ///
    /// Values are percent-encoded; keys are emitted as-is.
    #[must_use]
    pub fn fragment(&self) -> String {
        let pairs = self
            .params
            .iter()
            .map(|(key, value)| format!("{key}={}", urlencoding::encode(value)))
            .collect::<Vec<_>>()
            .join("&");
        format!("?{pairs}")
    }
}

/// Classify `search` and build the persons API query for it.
///
/// Total: every input produces a query. Surrounding whitespace is ignored,
/// so whitespace-only input is the empty search: an empty `surname` filter
/// labelled "Search".
#[must_use]
pub fn resolve_search_type(search: &str) -> SearchQuery {
    let search = search.trim();

    if search.is_empty() {
        SearchQuery::new(SearchKind::Empty, &[(PARAM_SURNAME, "")])
    } else if BYU_ID.is_match(search) {
        SearchQuery::new(SearchKind::ByuId, &[(PARAM_BYU_IDS, search)])
    } else if NET_ID.is_match(search) {
        SearchQuery::new(SearchKind::NetId, &[(PARAM_NET_IDS, search)])
    } else if EMAIL.is_match(search) {
        SearchQuery::new(SearchKind::Email, &[(PARAM_EMAIL, search)])
    } else if FULL_NAME.is_match(search) {
        let (surname, rest_of_name) = split_name(search);
        SearchQuery::new(
            SearchKind::Name,
            &[
                (PARAM_SURNAME, surname.as_str()),
                (PARAM_REST_OF_NAME, rest_of_name.as_str()),
            ],
        )
    } else {
        SearchQuery::new(SearchKind::Surname, &[(PARAM_SURNAME, search)])
    }
}

/// Split a multi-token name into `(surname, rest_of_name)`.
///
/// `"Last, First Middle"` splits on the first comma. Otherwise the final
/// space-separated token is the surname.
fn split_name(search: &str) -> (String, String) {
    if let Some((surname, rest)) = search.split_once(',') {
        return (surname.trim().to_string(), rest.trim().to_string());
    }

    let words: Vec<&str> = search.split(' ').filter(|w| !w.is_empty()).collect();
    match words.split_last() {
        Some((surname, rest)) => ((*surname).to_string(), rest.join(" ")),
        None => (String::new(), String::new()),
    }
}
