mod status;

use crate::cli::root_commands::AuthCommands;
use crate::ui::UiPrefs;

/// Handle `plookup auth <subcommand>`.
pub async fn handle(
    action: &AuthCommands,
    ui: &UiPrefs,
    config: &lookup_config::LookupConfig,
) -> anyhow::Result<()> {
    match action {
        AuthCommands::Status => status::handle(ui, config).await,
    }
}
