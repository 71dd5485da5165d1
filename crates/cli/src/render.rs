//! Text, HTML and JSON output for a navigation model.

use anyhow::Result;
use navlist_engine::{ModelSnapshot, SectionLines, render_lines};
use navlist_types::{NavigationEntry, NavigationModel, RenderLine};
use serde_json::json;

pub const NO_ITEMS_MESSAGE: &str = "No navigation items found. Please configure the webpart properties.";
const SEPARATOR: &str = " / ";

fn visible_header(header: Option<&str>) -> Option<&str> {
    header.map(str::trim).filter(|text| !text.is_empty())
}

pub fn render_text(header: Option<&str>, model: &NavigationModel) -> String {
    let mut out = String::new();
    if let Some(header) = visible_header(header) {
        out.push_str(&format!("{header}\n\n"));
    }

    let blocks = render_lines(model);
    if blocks.iter().all(|block| block.lines.is_empty()) {
        out.push_str(&format!("{NO_ITEMS_MESSAGE}\n"));
        return out;
    }

    for SectionLines { key, lines } in &blocks {
        if let Some(key) = key {
            out.push_str(&format!("[{key}]\n"));
        }
        for line in lines {
            out.push_str(&text_line(line));
            out.push('\n');
        }
    }
    out
}

fn text_line(line: &RenderLine) -> String {
    line.entries
        .iter()
        .map(|entry| format!("{} <{}>", entry.display_text, entry.target_url))
        .collect::<Vec<_>>()
        .join(SEPARATOR)
}

pub fn render_html(header: Option<&str>, model: &NavigationModel) -> String {
    let mut out = String::from("<section class=\"navigation-section\">\n");
    if let Some(header) = visible_header(header) {
        out.push_str(&format!("  <h2 class=\"header\">{}</h2>\n", escape_html(header)));
    }
    out.push_str("  <div class=\"navigation-content\">\n");

    let blocks = render_lines(model);
    if blocks.iter().all(|block| block.lines.is_empty()) {
        out.push_str(&format!("    <p class=\"no-items\">{}</p>\n", escape_html(NO_ITEMS_MESSAGE)));
    }
    let separator = format!("<span class=\"separator\">{SEPARATOR}</span>");
    for block in &blocks {
        if let Some(key) = &block.key {
            out.push_str(&format!("    <h3 class=\"section-header\">{}</h3>\n", escape_html(key)));
        }
        for line in &block.lines {
            let links: Vec<String> = line.entries.iter().map(html_link).collect();
            out.push_str(&format!("    <div class=\"navigation-line\">{}</div>\n", links.join(&separator)));
        }
    }

    out.push_str("  </div>\n</section>\n");
    out
}

fn html_link(entry: &NavigationEntry) -> String {
    let target = if entry.opens_in_new_tab() {
        "target=\"_blank\" rel=\"noreferrer\""
    } else {
        "target=\"_self\""
    };
    format!(
        "<a class=\"navigation-link\" href=\"{}\" {target}>{}</a>",
        escape_html(&entry.target_url),
        escape_html(&entry.display_text)
    )
}

pub fn render_json(header: Option<&str>, snapshot: &ModelSnapshot) -> Result<String> {
    let out = json!({
        "header": visible_header(header),
        "list": snapshot.selected_list(),
        "status": snapshot.status,
        "model": snapshot.model,
        "lines": render_lines(&snapshot.model),
    });
    Ok(format!("{}\n", serde_json::to_string_pretty(&out)?))
}

fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            other => escaped.push(other),
        }
    }
    escaped
}
