use super::render;

use crate::index::IndexResult;
use crate::index::classify::SyntaxKind;
use crate::symbol::{ScopeLevel, Symbol, SymbolDetail, TypeCategory, TypeDesc, ValueDetail};

fn sample_result() -> IndexResult {
    let symbol = Symbol {
        id: 1,
        spelling: "x".to_string(),
        kind: SyntaxKind::Field,
        location: "input.cc:3:9".to_string(),
        hierarchy: vec![
            ScopeLevel {
                spelling: "A".to_string(),
                kind: "class".to_string(),
                location: "input.cc:1:1".to_string(),
                transparent: false,
            },
            ScopeLevel {
                spelling: "E".to_string(),
                kind: "enum".to_string(),
                location: "input.cc:2:1".to_string(),
                transparent: true,
            },
        ],
        parent_kind: "enum".to_string(),
        comment: String::new(),
        usage: String::new(),
        access: Some("public".to_string()),
        detail: SymbolDetail::ValueLike(ValueDetail {
            static_member: Some(false),
            size: Some(4),
            is_pod: true,
            type_desc: TypeDesc {
                spelling: "int".to_string(),
                size: Some(4),
                category: TypeCategory::Plain,
            },
        }),
    };
    IndexResult {
        symbols: vec![symbol],
        includes: Vec::new(),
        diagnostics: vec!["input.cc:9:1: warning: something".to_string()],
        parse_seconds: 0.131,
        traverse_seconds: 0.062,
    }
}

#[test]
fn report_renders_ordered_keys_first() {
    let rendered = render("input.cc", &sample_result());
    assert!(rendered.starts_with("[TARGET FILE] input.cc\n"));
    let spelling_at = rendered.find("spelling:").expect("spelling key");
    let kind_at = rendered.find("kind:").expect("kind key");
    let location_at = rendered.find("location:").expect("location key");
    assert!(spelling_at < kind_at && kind_at < location_at);
}

#[test]
fn transparent_scopes_are_parenthesized() {
    let rendered = render("input.cc", &sample_result());
    assert!(rendered.contains("hierarchy:\n\t::A::(E)\n"));
}

#[test]
fn empty_comment_renders_as_none() {
    let rendered = render("input.cc", &sample_result());
    assert!(rendered.contains("comment:\n```\n(none)\n```\n"));
    // No usage block was present, so none is rendered.
    assert!(!rendered.contains("usage:"));
}

#[test]
fn diagnostics_and_timings_trail_the_symbols() {
    let rendered = render("input.cc", &sample_result());
    assert!(rendered.contains("[Diagnostic #1]\ninput.cc:9:1: warning: something\n"));
    assert!(rendered.contains("[parse time] 0.13 sec"));
    assert!(rendered.contains("[traverse time] 0.06 sec"));
    let separator_at = rendered.find("-----").expect("separator");
    let diagnostic_at = rendered.find("[Diagnostic").expect("diagnostic");
    assert!(separator_at < diagnostic_at);
}
