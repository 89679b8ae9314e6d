//! Documentation comment cleanup.

use once_cell::sync::Lazy;
use regex::Regex;

static BLOCK_OPEN: Lazy<Regex> = Lazy::new(|| Regex::new(r"^/\*\*").unwrap());
static TRAILING_OPEN: Lazy<Regex> = Lazy::new(|| Regex::new(r"^/\*< ").unwrap());
static LEADING_STAR: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\s*\* ").unwrap());
static BLOCK_CLOSE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\*/").unwrap());

/// Strip comment markers from a raw documentation comment and pull out the
/// embedded usage block, if any.
///
/// A line starting with `Usage:` opens the usage block; a line starting with
/// `-----` closes it. Returns `(comment, usage)`, both empty when the node
/// carries no comment.
pub fn format_raw_comment(raw: Option<&str>) -> (String, String) {
    let Some(raw) = raw else {
        return (String::new(), String::new());
    };

    let mut comment_lines = Vec::new();
    let mut usage_lines: Vec<String> = Vec::new();
    let mut inside_usage = false;
    for line in raw.split('\n') {
        let line = BLOCK_OPEN.replace(line, "");
        let line = TRAILING_OPEN.replace(&line, "");
        let line = LEADING_STAR.replace(&line, "");
        let line = BLOCK_CLOSE.replace(&line, "").into_owned();
        let trimmed = line.trim();
        if trimmed.starts_with("Usage:") {
            inside_usage = true;
        }
        if trimmed.starts_with("-----") {
            inside_usage = false;
        }
        if inside_usage {
            usage_lines.push(line.replacen("Usage:", "", 1).trim_start().to_string());
        }
        comment_lines.push(line);
    }

    (comment_lines.join("\n").trim().to_string(), usage_lines.join("\n"))
}

#[cfg(test)]
#[path = "../../tests/src/index/comment_tests.rs"]
mod tests;
