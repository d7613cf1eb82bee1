use lookup_config::LookupConfig;

use crate::cli::root_commands::Commands;
use crate::commands;
use crate::context::AppContext;
use crate::ui::UiPrefs;

/// Dispatch a parsed command to the corresponding handler module.
///
/// Only `search` builds an [`AppContext`]; `resolve` and `auth` never query
/// the persons API.
pub async fn dispatch(
    command: Commands,
    config: LookupConfig,
    ui: &UiPrefs,
) -> anyhow::Result<()> {
    match command {
        Commands::Search(args) => {
            let ctx = AppContext::init(&config).await?;
            commands::search::handle(&args, &ctx, ui).await
        }
        Commands::Resolve(args) => commands::resolve::handle(&args, &config, ui),
        Commands::Auth { action } => commands::auth::handle(&action, ui, &config).await,
    }
}
