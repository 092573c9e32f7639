//! Table and JSON rendering for command output.

use colored::Colorize;
use serde_json::Value;

/// Maximum rendered width of one table cell.
const MAX_CELL_WIDTH: usize = 50;

/// Print a value as one line of compact JSON.
///
/// serde_json maps are ordered, so output is deterministic.
pub fn render_json(value: &Value) {
    println!("{value}");
}

/// Print a value as indented JSON.
pub fn render_json_pretty(value: &Value) {
    match serde_json::to_string_pretty(value) {
        Ok(text) => println!("{text}"),
        Err(_) => println!("{value}"),
    }
}

/// Render items as an aligned table, columns taken from the first item's
/// keys. Values longer than 50 characters are truncated.
pub fn render_items_table(items: &[Value]) {
    let Some(first) = items.first().and_then(|v| v.as_object()) else {
        return;
    };

    let columns: Vec<&str> = first.keys().map(String::as_str).collect();
    let rows: Vec<Vec<String>> = items
        .iter()
        .map(|item| {
            columns
                .iter()
                .map(|key| cell_text(item.get(*key)))
                .collect()
        })
        .collect();

    let widths: Vec<usize> = columns
        .iter()
        .enumerate()
        .map(|(i, column)| {
            rows.iter()
                .map(|row| row[i].len())
                .chain(std::iter::once(column.len()))
                .max()
                .unwrap_or(0)
        })
        .collect();

    // Pad before coloring: ANSI escapes would otherwise count toward width.
    let header: Vec<String> = columns
        .iter()
        .zip(&widths)
        .map(|(column, &width)| format!("{column:<width$}").bold().to_string())
        .collect();
    println!("{}", header.join("  "));

    for row in rows {
        let line: Vec<String> = row
            .iter()
            .zip(&widths)
            .map(|(cell, &width)| format!("{cell:<width$}"))
            .collect();
        println!("{}", line.join("  "));
    }
}

fn cell_text(value: Option<&Value>) -> String {
    let text = match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    };
    truncate_cell(&text)
}

fn truncate_cell(text: &str) -> String {
    if text.chars().count() > MAX_CELL_WIDTH {
        let prefix: String = text.chars().take(MAX_CELL_WIDTH - 3).collect();
        format!("{prefix}...")
    } else {
        text.to_string()
    }
}
