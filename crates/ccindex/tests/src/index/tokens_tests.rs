use super::{base_specifier_flags, is_defaulted, is_deleted};

use crate::frontend::Access;

fn toks(spellings: &[&str]) -> Vec<String> {
    spellings.iter().map(|s| s.to_string()).collect()
}

#[test]
fn detects_deleted_declaration() {
    let tokens = toks(&["void", "f", "(", ")", "=", "delete", ";"]);
    assert!(is_deleted(&tokens));
    assert!(!is_defaulted(&tokens));
}

#[test]
fn detects_defaulted_declaration() {
    let tokens = toks(&["A", "(", ")", "=", "default", ";"]);
    assert!(is_defaulted(&tokens));
    assert!(!is_deleted(&tokens));
}

#[test]
fn default_argument_does_not_count_as_defaulted() {
    // `= default_size()` sits before the closing parenthesis.
    let tokens =
        toks(&["void", "f", "(", "int", "x", "=", "default_size", "(", ")", ")", ";"]);
    assert!(!is_defaulted(&tokens));
    assert!(!is_deleted(&tokens));
}

#[test]
fn plain_declaration_is_neither() {
    let tokens = toks(&["void", "f", "(", ")", ";"]);
    assert!(!is_deleted(&tokens));
    assert!(!is_defaulted(&tokens));
}

#[test]
fn base_specifier_defaults_to_public_non_virtual() {
    let (access, is_virtual) = base_specifier_flags(&toks(&["Base"]));
    assert_eq!(access, Access::Public);
    assert!(!is_virtual);
}

#[test]
fn base_specifier_reads_access_and_virtual() {
    let (access, is_virtual) = base_specifier_flags(&toks(&["virtual", "protected", "Base"]));
    assert_eq!(access, Access::Protected);
    assert!(is_virtual);

    let (access, is_virtual) = base_specifier_flags(&toks(&["private", "Base"]));
    assert_eq!(access, Access::Private);
    assert!(!is_virtual);
}
