//! Human-readable stdout rendering of an [`IndexResult`].

use serde_json::Value;

use crate::index::IndexResult;
use crate::symbol::Symbol;

/// Keys rendered first, in this order; they exist on every record.
const ORDERED_KEYS: &[&str] =
    &["spelling", "kind", "hierarchy", "parent_kind", "location", "comment", "usage"];

/// Render the full result: one block per symbol, then diagnostics and
/// timings.
pub fn render(target: &str, result: &IndexResult) -> String {
    let mut out = String::new();
    out.push_str(&format!("[TARGET FILE] {target}\n"));
    for symbol in &result.symbols {
        out.push_str(&render_symbol(symbol));
    }
    for (i, diagnostic) in result.diagnostics.iter().enumerate() {
        out.push_str(&format!("[Diagnostic #{}]\n{diagnostic}\n", i + 1));
    }
    out.push_str(&format!("[parse time] {:.2} sec\n", result.parse_seconds));
    out.push_str(&format!("[traverse time] {:.2} sec\n", result.traverse_seconds));
    out
}

fn render_symbol(symbol: &Symbol) -> String {
    let mut out = String::new();

    out.push_str(&format!("spelling:\n\t{}\n", symbol.spelling));
    out.push_str(&format!("kind:\n\t{}\n", symbol.kind.as_str()));

    if symbol.hierarchy.is_empty() {
        out.push_str("hierarchy:\n\t(none)\n");
    } else {
        let rendered: Vec<String> = symbol
            .hierarchy
            .iter()
            .map(|level| {
                // Transparent scopes are parenthesized: they do not qualify
                // member names.
                if level.transparent {
                    format!("({})", level.spelling)
                } else {
                    level.spelling.clone()
                }
            })
            .collect();
        out.push_str(&format!("hierarchy:\n\t::{}\n", rendered.join("::")));
    }

    out.push_str(&format!("parent_kind:\n\t{}\n", symbol.parent_kind));
    out.push_str(&format!("location:\n\t{}\n", symbol.location));

    let comment = if symbol.comment.is_empty() { "(none)" } else { &symbol.comment };
    out.push_str(&format!("comment:\n```\n{comment}\n```\n"));
    if !symbol.usage.is_empty() {
        out.push_str(&format!("usage:\n```\n{}\n```\n", symbol.usage));
    }

    // Kind-specific tail keys, straight off the serialized record.
    if let Ok(Value::Object(map)) = serde_json::to_value(symbol) {
        for (key, value) in &map {
            if ORDERED_KEYS.contains(&key.as_str()) || key == "id" {
                continue;
            }
            out.push_str(&format!("{key}:\n\t{}\n", render_value(value)));
        }
    }

    out.push_str("-----\n");
    out
}

fn render_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
#[path = "../tests/src/report_tests.rs"]
mod tests;
