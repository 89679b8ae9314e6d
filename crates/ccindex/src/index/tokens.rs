//! Token-stream scans for properties the front end does not expose as
//! structured queries.
//!
//! Front-end capability gap: `= delete` / `= default` on a declaration and
//! the access/virtual keywords of a base specifier are only visible in the
//! token stream. These scans stay isolated here; classification logic never
//! looks at tokens itself.

use crate::frontend::Access;

/// Whether the declaration's tokens end in `= delete`.
pub fn is_deleted(tokens: &[String]) -> bool {
    trailing_equals_keyword(tokens, "delete")
}

/// Whether the declaration's tokens end in `= default`.
pub fn is_defaulted(tokens: &[String]) -> bool {
    trailing_equals_keyword(tokens, "default")
}

/// Scan for `= <keyword>` after the parameter list's closing parenthesis.
/// Restricting the scan avoids tripping on default arguments such as
/// `f(int x = default_size())`.
fn trailing_equals_keyword(tokens: &[String], keyword: &str) -> bool {
    let start = tokens
        .iter()
        .rposition(|t| t == ")")
        .map(|i| i + 1)
        .unwrap_or(0);
    tokens[start..]
        .windows(2)
        .any(|pair| pair[0] == "=" && pair[1] == keyword)
}

/// Access specifier and virtual-inheritance flag of a base specifier,
/// from the keyword tokens within its span. Access defaults to public.
pub fn base_specifier_flags(tokens: &[String]) -> (Access, bool) {
    let mut access = Access::Public;
    let mut is_virtual = false;
    for token in tokens {
        match token.as_str() {
            "public" => access = Access::Public,
            "protected" => access = Access::Protected,
            "private" => access = Access::Private,
            "virtual" => is_virtual = true,
            _ => {}
        }
    }
    (access, is_virtual)
}

#[cfg(test)]
#[path = "../../tests/src/index/tokens_tests.rs"]
mod tests;
