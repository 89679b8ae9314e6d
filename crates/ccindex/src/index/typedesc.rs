//! Recursive type description.
//!
//! Classifies a type into one of {alias, type_parameter, array, pointer,
//! function, plain} and emits a structured, finite description. Termination
//! holds because every recursive step peels one layer of alias, array or
//! pointer wrapping, and alias chains carry an explicit last-seen-spelling
//! guard against self-referential typedefs.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::frontend::{Cursor, Ty, TypeKind};
use crate::symbol::{ScopeLevel, TypeCategory, TypeDesc};

use super::IndexError;
use super::prototype::format_type_spelling;

/// Canonical spelling of a dependent type parameter: nesting level and
/// positional index.
static TYPE_PARAM_COORDS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^type-parameter-(\d+)-(\d+)$").unwrap());

/// Declaration context for resolving dependent type parameters.
#[derive(Clone, Copy)]
pub struct TypeContext<'a> {
    /// The declaration whose type is being described.
    pub cursor: Cursor<'a>,
    /// Its resolved enclosing-scope chain, outermost first.
    pub hierarchy: &'a [ScopeLevel],
}

/// Describe `ty`, resolving dependent type parameters against `ctx`.
pub fn describe(ty: Ty<'_>, ctx: Option<&TypeContext<'_>>) -> Result<TypeDesc, IndexError> {
    let spelling = format_type_spelling(ty.spelling());
    let size = ty.size_of();

    let category = match ty.kind() {
        kind if kind.is_alias_like() => alias_category(ty, ctx)?,
        TypeKind::Unexposed => {
            if ty.spelling().ends_with(')') {
                // The front end exposes no parameter or return sub-types on
                // these nodes; leave the function type opaque.
                TypeCategory::Function
            } else {
                type_parameter_category(ty, ctx)?
            }
        }
        kind if kind.is_array() => {
            let element = ty.element().ok_or_else(|| {
                IndexError::Internal(format!("array type `{}` has no element type", ty.spelling()))
            })?;
            TypeCategory::Array {
                element_count: ty.array_size(),
                element_type: Box::new(describe(element, ctx)?),
            }
        }
        kind if kind.is_pointer_like() => {
            let pointee = ty.pointee().ok_or_else(|| {
                IndexError::Internal(format!("pointer type `{}` has no pointee", ty.spelling()))
            })?;
            TypeCategory::Pointer { pointee_type: Box::new(describe(pointee, ctx)?) }
        }
        _ => TypeCategory::Plain,
    };

    Ok(TypeDesc { spelling, size, category })
}

/// Build the alias resolution chain and the canonical descriptor.
fn alias_category(
    ty: Ty<'_>,
    ctx: Option<&TypeContext<'_>>,
) -> Result<TypeCategory, IndexError> {
    let mut chain = vec![format_type_spelling(ty.spelling())];
    let mut current = ty;
    loop {
        let Some(decl) = current.declaration() else { break };
        let Some(next) = decl.underlying_type() else { break };
        let next_spelling = format_type_spelling(next.spelling());
        // No-progress guard: a typedef that (directly or transitively)
        // aliases its own spelling would otherwise loop forever.
        if chain.last().is_some_and(|last| *last == next_spelling) {
            break;
        }
        chain.push(next_spelling);
        current = next;
    }

    let canonical = ty.canonical();
    let canonical_desc = if canonical.id == ty.id {
        // A sugar type must canonicalize to a non-sugar type; tolerate a
        // front end that claims otherwise instead of recursing forever.
        TypeDesc {
            spelling: format_type_spelling(ty.spelling()),
            size: ty.size_of(),
            category: TypeCategory::Plain,
        }
    } else {
        describe(canonical, ctx)?
    };

    let underlying = match chain.get(1) {
        Some(step) => step.clone(),
        None => format_type_spelling(canonical.spelling()),
    };

    Ok(TypeCategory::Alias {
        underlying,
        type_alias_chain: chain,
        canonical_type: Box::new(canonical_desc),
    })
}

/// Resolve a dependent type parameter's owning template from its canonical
/// `type-parameter-<level>-<index>` coordinates.
fn type_parameter_category(
    ty: Ty<'_>,
    ctx: Option<&TypeContext<'_>>,
) -> Result<TypeCategory, IndexError> {
    let canonical = ty.canonical();
    let coords = canonical.spelling();
    let captures = TYPE_PARAM_COORDS.captures(coords).ok_or_else(|| {
        IndexError::Internal(format!(
            "type `{}` classified as a dependent type parameter, but its canonical \
             spelling `{coords}` does not carry level-index coordinates",
            ty.spelling()
        ))
    })?;
    // The pattern guarantees digit-only captures; overflow on absurd nesting
    // depths falls back to u32::MAX rather than failing the run.
    let level: usize = captures[1].parse().unwrap_or(usize::MAX);
    let param_index: u32 = captures[2].parse().unwrap_or(u32::MAX);

    let Some(ctx) = ctx else {
        return Err(IndexError::Internal(format!(
            "dependent type parameter `{}` described outside any declaration context",
            ty.spelling()
        )));
    };

    let templates: Vec<&ScopeLevel> =
        ctx.hierarchy.iter().filter(|level| level.is_template()).collect();
    if let Some(owner) = templates.get(level) {
        return Ok(TypeCategory::TypeParameter {
            owner: owner.spelling.clone(),
            owner_location: owner.location.clone(),
            param_index,
        });
    }

    // The parameter belongs to the enclosing declaration's own template
    // header, which the ancestor hierarchy does not record. Known
    // limitation: not validated for deeper mutually-recursive nestings.
    if let Some(parent) = ctx.cursor.semantic_parent() {
        return Ok(TypeCategory::TypeParameter {
            owner: parent.spelling().to_string(),
            owner_location: parent.location().to_string(),
            param_index,
        });
    }

    Err(IndexError::Internal(format!(
        "no owning template found for dependent type parameter `{}` (level {level})",
        ty.spelling()
    )))
}
