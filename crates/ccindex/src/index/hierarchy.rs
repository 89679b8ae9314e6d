//! Enclosing-scope resolution: walks semantic-parent links up to the
//! translation-unit root.

use crate::frontend::{Cursor, CursorKind};
use crate::symbol::ScopeLevel;

use super::classify::scope_kind_tag;

/// Kind string reported when a node sits directly in the translation unit.
pub const GLOBAL_PARENT_KIND: &str = "(global)";

/// Resolve a node's enclosing scopes.
///
/// Returns the ordered chain (outermost named scope first, immediate parent
/// last) and the normalized kind of the immediate parent. File-scope nodes
/// get an empty chain and `(global)`. Parent links are acyclic by the
/// language's scoping rules, so the walk is bounded by nesting depth.
pub fn resolve(cursor: Cursor<'_>) -> (Vec<ScopeLevel>, String) {
    let Some(parent) = cursor.semantic_parent() else {
        return (Vec::new(), GLOBAL_PARENT_KIND.to_string());
    };
    if parent.kind() == CursorKind::TranslationUnit {
        return (Vec::new(), GLOBAL_PARENT_KIND.to_string());
    }

    let mut levels = Vec::new();
    let mut current = cursor;
    while let Some(scope) = current.semantic_parent() {
        if scope.kind() == CursorKind::TranslationUnit {
            break;
        }
        levels.push(scope_level(scope));
        current = scope;
    }
    levels.reverse();

    (levels, scope_kind_tag(parent.kind()).to_string())
}

fn scope_level(scope: Cursor<'_>) -> ScopeLevel {
    ScopeLevel {
        spelling: effective_spelling(scope),
        kind: scope_kind_tag(scope.kind()).to_string(),
        location: scope.location().to_string(),
        transparent: is_transparent(scope),
    }
}

/// A scope that does not qualify member names: a non-scoped enum.
pub fn is_transparent(cursor: Cursor<'_>) -> bool {
    cursor.kind() == CursorKind::EnumDecl && !cursor.data().is_scoped_enum
}

/// The scope's own name, or the unqualified name of its type when the node
/// is anonymous (e.g. `typedef struct { ... } MyType_t;` names the scope
/// through its alias).
fn effective_spelling(scope: Cursor<'_>) -> String {
    let spelling = scope.spelling();
    if !spelling.is_empty() {
        return spelling.to_string();
    }
    scope
        .ty()
        .map(|ty| unqualified(ty.spelling()).to_string())
        .unwrap_or_default()
}

fn unqualified(spelling: &str) -> &str {
    spelling.rsplit("::").next().unwrap_or(spelling)
}
