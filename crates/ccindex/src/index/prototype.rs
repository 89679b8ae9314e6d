//! Declaration string synthesis for function-like and class-like nodes.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::frontend::{Cursor, CursorKind, NoThrowGuarantee};
use crate::symbol::{BaseSpecifier, Param};

use super::tokens;

static SPACE_BEFORE_STAR: Lazy<Regex> = Lazy::new(|| Regex::new(r" *\*").unwrap());
static SPACE_BEFORE_AMP: Lazy<Regex> = Lazy::new(|| Regex::new(r" *&").unwrap());

/// Normalize a type spelling for display: drop the libc++ inline namespace
/// and tighten whitespace before `*` / `&`.
pub(crate) fn format_type_spelling(spelling: &str) -> String {
    let spelling = spelling.replace("std::__1::", "std::");
    let spelling = SPACE_BEFORE_STAR.replace_all(&spelling, "*");
    SPACE_BEFORE_AMP.replace_all(&spelling, "&").into_owned()
}

/// Synthesized prototype of a function-like declaration.
#[derive(Debug, Clone)]
pub(crate) struct FunctionProto {
    pub declaration: String,
    pub declaration_pretty: String,
    pub template_params: Vec<Param>,
    pub params: Vec<Param>,
    pub return_type: Option<String>,
    pub specifiers: Vec<String>,
    pub no_throw: NoThrowGuarantee,
    pub is_deleted: bool,
    pub is_defaulted: bool,
}

/// Synthesized prototype of a class-like declaration.
#[derive(Debug, Clone)]
pub(crate) struct ClassProto {
    pub declaration: String,
    pub declaration_pretty: String,
    pub template_params: Vec<Param>,
    pub is_final: bool,
    pub base_clause: Vec<BaseSpecifier>,
}

/// Build the prototype strings and structured parameter lists for a
/// function-like node. `line_width` is the wrap threshold for the pretty
/// form; wrapping is cosmetic and never changes the structured fields.
pub(crate) fn function_prototype(cursor: Cursor<'_>, line_width: usize) -> FunctionProto {
    let data = cursor.data();
    let (template_params, params) = collect_params(cursor);

    let return_type = match cursor.kind() {
        // The language gives constructors and destructors no return type.
        CursorKind::Constructor | CursorKind::Destructor => None,
        _ => cursor.result_type().map(|ty| format_type_spelling(ty.spelling())),
    };

    let no_throw = data.no_throw.unwrap_or(NoThrowGuarantee::NotGuaranteed);
    let mut specifiers = Vec::new();
    if data.is_const_method {
        specifiers.push("const".to_string());
    }
    if data.is_final {
        specifiers.push("final".to_string());
    }
    if data.is_override {
        specifiers.push("override".to_string());
    }
    if data.is_pure_virtual {
        specifiers.push("= 0".to_string());
    }
    if no_throw == NoThrowGuarantee::Guaranteed {
        specifiers.push("noexcept".to_string());
    }

    let name = cursor.display_name().split('(').next().unwrap_or("").to_string();
    let head = match &return_type {
        // Conversion operators carry their target type in the name already.
        Some(ret) if cursor.kind() != CursorKind::ConversionFunction => format!("{ret} {name}"),
        _ => name,
    };
    let prefix = if data.is_virtual_method { "virtual " } else { "" };

    let args_repr: Vec<String> =
        params.iter().map(|p| format!("{} {}", p.ty, p.name).trim().to_string()).collect();
    let spec_str = specifiers.join(" ");

    let single = format!("{prefix}{head}({}) {spec_str}", args_repr.join(", "))
        .trim()
        .to_string();
    let pretty = if single.len() > line_width {
        let wrapped_args: Vec<String> = args_repr.iter().map(|a| format!("\t{a}")).collect();
        format!("{prefix}{head}(\n{}\n) {spec_str}", wrapped_args.join(",\n"))
            .trim()
            .to_string()
    } else {
        single.clone()
    };

    let header = template_header(&template_params);
    let declaration = match &header {
        Some(h) => format!("{h}\n{single};"),
        None => format!("{single};"),
    };
    let declaration_pretty = match &header {
        Some(h) => format!("{h}\n{pretty};"),
        None => format!("{pretty};"),
    };

    FunctionProto {
        declaration,
        declaration_pretty,
        template_params,
        params,
        return_type,
        specifiers,
        no_throw,
        is_deleted: tokens::is_deleted(&data.tokens),
        is_defaulted: tokens::is_defaulted(&data.tokens),
    }
}

/// Build the prototype strings, template parameters and base clause for a
/// class-like node.
pub(crate) fn class_prototype(cursor: Cursor<'_>, _line_width: usize) -> ClassProto {
    let data = cursor.data();
    let (template_params, _) = collect_params(cursor);

    let keyword = if cursor.kind() == CursorKind::StructDecl { "struct" } else { "class" };
    let mut name_str = format!("{keyword} {}", cursor.spelling());
    if data.is_final {
        name_str.push_str(" final");
    }

    let header = template_header(&template_params);
    let declaration = match &header {
        Some(h) => format!("{h} {name_str};"),
        None => format!("{name_str};"),
    };
    let declaration_pretty = match &header {
        Some(h) => format!("{h}\n{name_str};"),
        None => format!("{name_str};"),
    };

    ClassProto {
        declaration,
        declaration_pretty,
        template_params,
        is_final: data.is_final,
        base_clause: base_clause(cursor),
    }
}

/// Base-class list of a class-like node. Access and virtualness come from
/// the token scan (front-end capability gap); the resolved spelling and the
/// base's own definition location come from the base type.
fn base_clause(cursor: Cursor<'_>) -> Vec<BaseSpecifier> {
    cursor
        .children()
        .filter(|child| child.kind() == CursorKind::BaseSpecifier)
        .map(|base| {
            let (access, is_virtual) = tokens::base_specifier_flags(&base.data().tokens);
            let spelling = base
                .ty()
                .map(|ty| format_type_spelling(ty.spelling()))
                .unwrap_or_else(|| base.spelling().to_string());
            let location = base
                .ty()
                .and_then(|ty| ty.declaration())
                .map(|decl| decl.location().to_string());
            BaseSpecifier { access: access.as_str().to_string(), is_virtual, spelling, location }
        })
        .collect()
}

/// Collect template parameters and ordinary parameters from a node's
/// children, each with its default expression when the source text shows
/// one.
fn collect_params(cursor: Cursor<'_>) -> (Vec<Param>, Vec<Param>) {
    let mut template_params = Vec::new();
    let mut params = Vec::new();
    for child in cursor.children() {
        match child.kind() {
            CursorKind::TemplateTypeParam => {
                template_params.push(param_of(child, "typename".to_string()));
            }
            CursorKind::TemplateNonTypeParam => {
                template_params.push(param_of(child, child_type_spelling(child)));
            }
            CursorKind::ParmDecl => {
                params.push(param_of(child, child_type_spelling(child)));
            }
            _ => {}
        }
    }
    (template_params, params)
}

fn child_type_spelling(child: Cursor<'_>) -> String {
    child.ty().map(|ty| format_type_spelling(ty.spelling())).unwrap_or_default()
}

fn param_of(child: Cursor<'_>, ty: String) -> Param {
    let default = child
        .data()
        .extent_text
        .as_deref()
        .and_then(|text| text.split_once('='))
        .map(|(_, default)| default.trim().to_string())
        .filter(|default| !default.is_empty());
    Param { ty, name: child.spelling().to_string(), default }
}

fn template_header(template_params: &[Param]) -> Option<String> {
    if template_params.is_empty() {
        return None;
    }
    let items: Vec<String> = template_params
        .iter()
        .map(|p| format!("{} {}", p.ty, p.name).trim().to_string())
        .collect();
    Some(format!("template <{}>", items.join(", ")))
}

#[cfg(test)]
#[path = "../../tests/src/index/prototype_tests.rs"]
mod tests;
