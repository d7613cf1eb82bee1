use lookup_client::LookupError;

use crate::cli::root_commands::SearchArgs;
use crate::context::AppContext;
use crate::output::render_page;
use crate::ui::UiPrefs;

/// Handle `plookup search`.
pub async fn handle(args: &SearchArgs, ctx: &AppContext, ui: &UiPrefs) -> anyhow::Result<()> {
    let query = ctx.lookup.resolve_search_type(args.text());
    tracing::info!(kind = %query.kind, label = query.label(), "searching persons");

    let page = match ctx.lookup.search(args.text(), args.page_link.as_deref()).await {
        Ok(page) => page,
        Err(LookupError::NotAuthenticated) => {
            if let Some(reason) = ctx.auth.latest().and_then(|event| event.error) {
                anyhow::bail!("not authenticated: {reason}");
            }
            anyhow::bail!(
                "not authenticated; set LOOKUP_AUTH__TOKEN or LOOKUP_AUTH__CLIENT_ID and \
                 LOOKUP_AUTH__CLIENT_SECRET"
            )
        }
        Err(error) => return Err(error.into()),
    };

    println!("{}", render_page(&page, ui)?);
    Ok(())
}
