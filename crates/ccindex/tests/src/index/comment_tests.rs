use super::format_raw_comment;

#[test]
fn no_comment_yields_empty_strings() {
    let (comment, usage) = format_raw_comment(None);
    assert!(comment.is_empty());
    assert!(usage.is_empty());
}

#[test]
fn block_markers_are_stripped() {
    let raw = "/** A widget.\n * Does widget things.\n */";
    let (comment, usage) = format_raw_comment(Some(raw));
    assert_eq!(comment, "A widget.\nDoes widget things.");
    assert!(usage.is_empty());
}

#[test]
fn trailing_comment_marker_is_stripped() {
    let (comment, _) = format_raw_comment(Some("/*< counts retries */"));
    assert_eq!(comment, "counts retries");
}

#[test]
fn usage_block_is_extracted() {
    let raw = "/** Frobnicates.\n * Usage: frob(x);\n * frob(y);\n * -----\n * Tail.\n */";
    let (comment, usage) = format_raw_comment(Some(raw));
    assert!(comment.contains("Frobnicates."));
    assert!(comment.contains("Tail."));
    assert_eq!(usage, "frob(x);\nfrob(y);");
}

#[test]
fn usage_block_runs_to_end_without_terminator() {
    let raw = "Usage: go();\ngo(2);";
    let (_, usage) = format_raw_comment(Some(raw));
    assert_eq!(usage, "go();\ngo(2);");
}
