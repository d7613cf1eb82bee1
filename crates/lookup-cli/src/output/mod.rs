use lookup_core::{Person, PersonPage};
use serde::Serialize;
use serde_json::Value;

use crate::cli::OutputFormat;
use crate::ui::UiPrefs;

pub mod table;

const PERSON_COLUMNS: [&str; 6] = ["byu_id", "net_id", "name", "email", "phone", "department"];

/// Render a serializable response to a string in the requested format.
///
/// Tables for structs are two-column key/value listings.
pub fn render<T: Serialize>(value: &T, ui: &UiPrefs) -> anyhow::Result<String> {
    match ui.format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(value)?),
        OutputFormat::Raw => Ok(serde_json::to_string(value)?),
        OutputFormat::Table => {
            let Value::Object(map) = serde_json::to_value(value)? else {
                return Ok(serde_json::to_string(value)?);
            };
            let rows = map
                .into_iter()
                .map(|(key, value)| vec![key, value_to_cell(&value)])
                .collect::<Vec<_>>();
            Ok(table::render_table(
                &["key", "value"],
                &rows,
                table_options(ui, Some(1)),
            ))
        }
    }
}

/// Render a search result page.
///
/// Tables list one row per person followed by a paging summary.
pub fn render_page(page: &PersonPage, ui: &UiPrefs) -> anyhow::Result<String> {
    if ui.format != OutputFormat::Table {
        return render(page, ui);
    }
    if page.is_empty() {
        return Ok(String::from("(no matches)"));
    }

    let rows = page.people.iter().map(person_row).collect::<Vec<_>>();
    let mut out = table::render_table(&PERSON_COLUMNS, &rows, table_options(ui, None));
    out.push_str("\n\n");
    out.push_str(&page_summary(page));
    Ok(out)
}

/// Print a serializable response in the requested format.
pub fn output<T: Serialize>(value: &T, ui: &UiPrefs) -> anyhow::Result<()> {
    println!("{}", render(value, ui)?);
    Ok(())
}

const fn table_options(ui: &UiPrefs, state_column: Option<usize>) -> table::TableOptions {
    table::TableOptions {
        max_width: ui.term_width,
        color: ui.table_color,
        state_column,
    }
}

fn person_row(person: &Person) -> Vec<String> {
    let cell = |value: Option<&str>| value.unwrap_or("-").to_string();
    vec![
        cell(person.byu_id.as_deref()),
        cell(person.net_id.as_deref()),
        person.name.clone(),
        cell(person.email.as_deref()),
        cell(person.phone.as_deref()),
        cell(
            person
                .employee
                .as_ref()
                .and_then(|e| e.department.as_deref()),
        ),
    ]
}

fn page_summary(page: &PersonPage) -> String {
    let mut summary = match (page.page_start, page.page_end, page.collection_size) {
        (Some(start), Some(end), Some(total)) => format!("{start}-{end} of {total}"),
        (_, _, Some(total)) => format!("{} of {total}", page.len()),
        _ => format!("{} shown", page.len()),
    };
    if let Some(next) = page.next.as_deref() {
        summary.push_str(&format!("\nnext page: --page-link '{next}'"));
    }
    summary
}

fn value_to_cell(value: &Value) -> String {
    match value {
        Value::Null => String::from("-"),
        Value::String(v) => v.clone(),
        other => other.to_string(),
    }
}
