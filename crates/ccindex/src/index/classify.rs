//! Cursor classification: normalized syntax-kind tags and the fixed
//! category tables that decide what the engine extracts.
//!
//! The tables are the single place to add or remove node kinds; nothing
//! downstream infers category membership on its own.

use serde::Serialize;

use crate::frontend::{Cursor, CursorKind};

/// Normalized syntax kind of an extracted symbol.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SyntaxKind {
    Function,
    FunctionTemplate,
    Method,
    Constructor,
    Destructor,
    ConversionFunction,
    Class,
    Struct,
    ClassTemplate,
    Enum,
    EnumConstant,
    Field,
    VariableDeclaration,
    Typedef,
}

impl SyntaxKind {
    pub fn as_str(self) -> &'static str {
        match self {
            SyntaxKind::Function => "function",
            SyntaxKind::FunctionTemplate => "function_template",
            SyntaxKind::Method => "method",
            SyntaxKind::Constructor => "constructor",
            SyntaxKind::Destructor => "destructor",
            SyntaxKind::ConversionFunction => "conversion_function",
            SyntaxKind::Class => "class",
            SyntaxKind::Struct => "struct",
            SyntaxKind::ClassTemplate => "class_template",
            SyntaxKind::Enum => "enum",
            SyntaxKind::EnumConstant => "enum_constant",
            SyntaxKind::Field => "field",
            SyntaxKind::VariableDeclaration => "variable_declaration",
            SyntaxKind::Typedef => "typedef",
        }
    }
}

/// The traversal allow-list: node kinds that become symbol records.
pub const INTERESTING: &[CursorKind] = &[
    CursorKind::Constructor,
    CursorKind::Destructor,
    CursorKind::Method,
    CursorKind::ConversionFunction,
    CursorKind::FunctionTemplate,
    CursorKind::ClassTemplate,
    CursorKind::EnumDecl,
    CursorKind::EnumConstantDecl,
    CursorKind::FieldDecl,
    CursorKind::ClassDecl,
    CursorKind::StructDecl,
    CursorKind::FunctionDecl,
    CursorKind::VarDecl,
    CursorKind::TypedefDecl,
];

pub const FUNCTION_LIKE: &[CursorKind] = &[
    CursorKind::FunctionDecl,
    CursorKind::FunctionTemplate,
    CursorKind::ConversionFunction,
    CursorKind::Constructor,
    CursorKind::Destructor,
    CursorKind::Method,
];

pub const CLASS_LIKE: &[CursorKind] =
    &[CursorKind::ClassDecl, CursorKind::StructDecl, CursorKind::ClassTemplate];

pub const VALUE_LIKE: &[CursorKind] =
    &[CursorKind::VarDecl, CursorKind::FieldDecl, CursorKind::EnumConstantDecl];

pub fn is_interesting(kind: CursorKind) -> bool {
    INTERESTING.contains(&kind)
}

pub fn is_function_like(kind: CursorKind) -> bool {
    FUNCTION_LIKE.contains(&kind)
}

pub fn is_class_like(kind: CursorKind) -> bool {
    CLASS_LIKE.contains(&kind)
}

pub fn is_value_like(kind: CursorKind) -> bool {
    VALUE_LIKE.contains(&kind)
}

/// Method-likeness needs the cursor, not just the kind: a function template
/// counts only when its semantic parent is class-like (a free function
/// template is not a method).
pub fn is_method_like(cursor: Cursor<'_>) -> bool {
    match cursor.kind() {
        CursorKind::Method
        | CursorKind::Constructor
        | CursorKind::Destructor
        | CursorKind::ConversionFunction => true,
        CursorKind::FunctionTemplate => cursor
            .semantic_parent()
            .is_some_and(|parent| is_class_like(parent.kind())),
        _ => false,
    }
}

/// Normalized tag for an interesting node kind; `None` otherwise.
pub fn syntax_kind(kind: CursorKind) -> Option<SyntaxKind> {
    let tag = match kind {
        CursorKind::FunctionDecl => SyntaxKind::Function,
        CursorKind::FunctionTemplate => SyntaxKind::FunctionTemplate,
        CursorKind::Method => SyntaxKind::Method,
        CursorKind::Constructor => SyntaxKind::Constructor,
        CursorKind::Destructor => SyntaxKind::Destructor,
        CursorKind::ConversionFunction => SyntaxKind::ConversionFunction,
        CursorKind::ClassDecl => SyntaxKind::Class,
        CursorKind::StructDecl => SyntaxKind::Struct,
        CursorKind::ClassTemplate => SyntaxKind::ClassTemplate,
        CursorKind::EnumDecl => SyntaxKind::Enum,
        CursorKind::EnumConstantDecl => SyntaxKind::EnumConstant,
        CursorKind::FieldDecl => SyntaxKind::Field,
        CursorKind::VarDecl => SyntaxKind::VariableDeclaration,
        CursorKind::TypedefDecl => SyntaxKind::Typedef,
        _ => return None,
    };
    Some(tag)
}

/// Tag for any kind that can appear in a scope chain, including kinds that
/// are never extracted themselves (namespaces, the translation unit).
pub fn scope_kind_tag(kind: CursorKind) -> &'static str {
    match kind {
        CursorKind::TranslationUnit => "translation_unit",
        CursorKind::Namespace => "namespace",
        CursorKind::ParmDecl => "parameter",
        CursorKind::TemplateTypeParam => "template_type_parameter",
        CursorKind::TemplateNonTypeParam => "template_non_type_parameter",
        CursorKind::BaseSpecifier => "base_specifier",
        CursorKind::Other => "(unknown)",
        _ => match syntax_kind(kind) {
            Some(tag) => tag.as_str(),
            None => "(unknown)",
        },
    }
}
