//! Shared presentation: structured documents, errors, headings and relative time.

use chrono::{DateTime, Utc};
use comfy_table::presets::UTF8_BORDERS_ONLY;
use comfy_table::Table;
use owo_colors::OwoColorize;
use serde::Serialize;
use serde_json::{json, Value};

/// Placeholder for values the service did not provide.
pub const MISSING: &str = "-";

/// Re-serialize a received document, tab-indented, keys in received order.
pub fn format_structured(document: &Value) -> String {
    let mut buf = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"\t");
    let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
    match document.serialize(&mut serializer) {
        Ok(()) => String::from_utf8_lossy(&buf).into_owned(),
        Err(e) => format_error_json(&format!("Failed indent json body: {}", e)),
    }
}

/// One-line structured error object.
pub fn format_error_json(message: &str) -> String {
    json!({ "error": message }).to_string()
}

/// Bold heading when color is enabled.
pub fn format_heading(title: &str, color: bool) -> String {
    if color {
        format!("{}", title.bold())
    } else {
        title.to_string()
    }
}

/// Human relative time ("3 hours ago"); future instants read as "now".
pub fn format_relative_time(timestamp: Option<DateTime<Utc>>, now: DateTime<Utc>) -> String {
    match timestamp {
        Some(ts) => {
            let elapsed = now.signed_duration_since(ts).to_std().unwrap_or_default();
            timeago::Formatter::new().convert(elapsed)
        }
        None => MISSING.to_string(),
    }
}

/// Borderless-interior table with the given header.
pub fn new_table(header: Vec<&str>) -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_BORDERS_ONLY);
    if !header.is_empty() {
        table.set_header(header);
    }
    table
}

/// Text shown for an empty cell.
pub fn or_missing(value: &str) -> &str {
    if value.is_empty() {
        MISSING
    } else {
        value
    }
}
