use lookup_client::PersonsEndpoint;
use lookup_config::LookupConfig;
use lookup_core::resolve_search_type;
use serde::Serialize;

use crate::cli::root_commands::ResolveArgs;
use crate::output::output;
use crate::ui::UiPrefs;

#[derive(Debug, Serialize)]
struct ResolveResponse {
    input: String,
    kind: &'static str,
    label: &'static str,
    fragment: String,
    url: String,
    params: Vec<QueryParam>,
}

#[derive(Debug, Serialize, PartialEq, Eq)]
struct QueryParam {
    key: String,
    value: String,
}

/// Handle `plookup resolve`.
pub fn handle(args: &ResolveArgs, config: &LookupConfig, ui: &UiPrefs) -> anyhow::Result<()> {
    let endpoint = PersonsEndpoint::from(&config.persons);
    output(&resolve_response(args.text(), &endpoint), ui)
}

fn resolve_response(input: &str, endpoint: &PersonsEndpoint) -> ResolveResponse {
    let query = resolve_search_type(input);
    ResolveResponse {
        input: input.to_string(),
        kind: query.kind.as_str(),
        label: query.label(),
        fragment: query.fragment(),
        url: endpoint.search_url(&query),
        params: query
            .params
            .iter()
            .map(|(key, value)| QueryParam {
                key: key.clone(),
                value: value.clone(),
            })
            .collect(),
    }
}
