//! HTML pages assembled from embedded templates.

use crate::db::Entry;
use tommyjohns_charts::ChartKind;
use tommyjohns_common::escape_html;

const LAYOUT_HTML: &str = include_str!("../templates/layout.html");
const ENTRIES_HTML: &str = include_str!("../templates/entries.html");
const SURGERIES_HTML: &str = include_str!("../templates/surgeries.html");
const CHART_HTML: &str = include_str!("../templates/chart.html");
const ERROR_HTML: &str = include_str!("../templates/error.html");

/// Wrap `content` in the site layout. `title` is escaped, `content` is not.
pub fn page(title: &str, content: &str) -> String {
    LAYOUT_HTML
        .replace("{{title}}", &escape_html(title))
        .replace("{{content}}", content)
}

pub fn entries_page(entries: &[Entry]) -> String {
    let items = if entries.is_empty() {
        "  <li><em>No spreadsheets yet.</em></li>".to_string()
    } else {
        entries
            .iter()
            .map(|entry| {
                format!(
                    "  <li><h2>{}</h2>{}</li>",
                    escape_html(&entry.googleuid),
                    escape_html(&entry.title)
                )
            })
            .collect::<Vec<_>>()
            .join("\n")
    };

    page("Spreadsheets", &ENTRIES_HTML.replace("{{entries}}", &items))
}

pub fn surgeries_page() -> String {
    page("Surgeries", SURGERIES_HTML)
}

/// Embed a pre-built chart fragment verbatim.
pub fn chart_page(kind: ChartKind, fragment: &str) -> String {
    page(kind.title(), &CHART_HTML.replace("{{chart}}", fragment))
}

pub fn error_page() -> String {
    ERROR_HTML.to_string()
}
