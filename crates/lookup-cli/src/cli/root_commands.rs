use clap::{Args, Subcommand};

/// Top-level command tree.
#[derive(Clone, Debug, Subcommand)]
pub enum Commands {
    /// Search the persons API by BYU ID, net ID, email, or name.
    Search(SearchArgs),
    /// Show how search text would be classified, without calling the API.
    Resolve(ResolveArgs),
    /// Authentication.
    Auth {
        #[command(subcommand)]
        action: AuthCommands,
    },
}

#[derive(Clone, Debug, Args)]
pub struct SearchArgs {
    /// Free-text search (e.g. "123456789", "cosmo", "Cougar, Cosmo").
    pub text: Option<String>,

    /// Page link from a previous result; fetched verbatim instead of searching.
    #[arg(long)]
    pub page_link: Option<String>,
}

#[derive(Clone, Debug, Args)]
pub struct ResolveArgs {
    /// Free-text search to classify.
    pub text: Option<String>,
}

#[derive(Clone, Debug, Subcommand)]
pub enum AuthCommands {
    /// Report the authentication state resolved from configuration.
    Status,
}

impl SearchArgs {
    pub fn text(&self) -> &str {
        self.text.as_deref().unwrap_or_default()
    }
}

impl ResolveArgs {
    pub fn text(&self) -> &str {
        self.text.as_deref().unwrap_or_default()
    }
}
