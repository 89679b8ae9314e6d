//! Serializable output model: one [`Symbol`] per extracted declaration.
//!
//! Payloads are closed sum types — one variant per syntax-kind category and
//! one per type category — so a new node kind forces every consumer through
//! the compiler. Fields inapplicable to a kind are absent, never null.

use serde::Serialize;

use crate::frontend::NoThrowGuarantee;
use crate::index::classify::SyntaxKind;

/// One level of a symbol's enclosing-scope chain, outermost first.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScopeLevel {
    pub spelling: String,
    pub kind: String,
    pub location: String,
    /// True only for non-scoped enums, whose members are visible in the
    /// parent scope without qualification.
    pub transparent: bool,
}

impl ScopeLevel {
    /// Whether this scope is itself a template, for owning-template lookup.
    pub fn is_template(&self) -> bool {
        self.kind == "class_template" || self.kind == "function_template"
    }
}

/// A template or ordinary parameter of a declaration.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Param {
    #[serde(rename = "type")]
    pub ty: String,
    pub name: String,
    /// Default expression extracted from the parameter's source text.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default: Option<String>,
}

/// One entry of a class's base clause.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BaseSpecifier {
    pub access: String,
    pub is_virtual: bool,
    /// Resolved spelling, template arguments included.
    pub spelling: String,
    /// Definition location of the base itself, when known.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
}

/// Structured, recursive description of a type.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TypeDesc {
    pub spelling: String,
    /// Size in bytes; `None` for dependent or incomplete types.
    pub size: Option<u64>,
    #[serde(flatten)]
    pub category: TypeCategory,
}

/// Category-specific part of a [`TypeDesc`].
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "category", rename_all = "snake_case")]
pub enum TypeCategory {
    Alias {
        /// One resolution step.
        underlying: String,
        /// Full resolution chain, the aliased spelling first.
        type_alias_chain: Vec<String>,
        /// Description of the fully desugared form.
        canonical_type: Box<TypeDesc>,
    },
    TypeParameter {
        owner: String,
        owner_location: String,
        param_index: u32,
    },
    Array {
        /// Element count; `None` when not a compile-time constant.
        element_count: Option<u64>,
        element_type: Box<TypeDesc>,
    },
    Pointer {
        pointee_type: Box<TypeDesc>,
    },
    /// Opaque leaf: the front end exposes no sub-types for these nodes.
    Function,
    Plain,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MethodProperty {
    Static,
    Const,
    Default,
    Virtual,
    PureVirtual,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ConstructorProperty {
    Default,
    Copy,
    Move,
    Converting,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DestructorProperty {
    Virtual,
    PureVirtual,
    Default,
    Deleted,
}

/// Payload fields for function-like symbols (functions, methods,
/// constructors, destructors, conversion operators, function templates).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FunctionDetail {
    pub declaration: String,
    pub declaration_pretty: String,
    pub is_template: bool,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub template_params: Vec<Param>,
    pub params: Vec<Param>,
    /// Absent for constructors and destructors.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub return_type: Option<String>,
    /// Postfix specifiers in fixed order: const, final, override, `= 0`,
    /// noexcept.
    pub specifiers: Vec<String>,
    pub no_throw_guarantee: NoThrowGuarantee,
    pub is_deleted: bool,
    pub is_defaulted: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub constructor_property: Option<ConstructorProperty>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub destructor_property: Vec<DestructorProperty>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub method_property: Vec<MethodProperty>,
    /// Name of the macro this declaration expanded from, when the raw
    /// source text was substituted for the synthesized prototype.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub macro_origin: Option<String>,
}

/// Payload fields for class-like symbols (classes, structs, class templates).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClassDetail {
    pub declaration: String,
    pub declaration_pretty: String,
    pub is_template: bool,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub template_params: Vec<Param>,
    pub is_final: bool,
    pub is_abstract: bool,
    pub base_clause: Vec<BaseSpecifier>,
    pub size: Option<u64>,
    pub is_pod: bool,
}

/// Payload fields for variables and fields.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValueDetail {
    /// Present only for class members: a member seen as a variable
    /// declaration is static by language rule, a field is not.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub static_member: Option<bool>,
    pub size: Option<u64>,
    pub is_pod: bool,
    #[serde(rename = "type")]
    pub type_desc: TypeDesc,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Enumerator {
    pub spelling: String,
    pub value: i64,
}

/// Payload fields for enum declarations.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EnumDetail {
    pub scoped_enum: bool,
    pub underlying_type: TypeDesc,
    pub enumerators: Vec<Enumerator>,
}

/// Payload fields for enumerators.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EnumeratorDetail {
    pub size: Option<u64>,
    pub is_pod: bool,
    #[serde(rename = "type")]
    pub type_desc: TypeDesc,
    /// Underlying type spelling of the parent enum.
    pub enum_type: String,
    pub enum_value: i64,
}

/// Payload fields for typedef declarations.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TypedefDetail {
    pub underlying: String,
}

/// Kind-specific payload of a [`Symbol`], one variant per syntax-kind
/// category.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum SymbolDetail {
    FunctionLike(FunctionDetail),
    ClassLike(ClassDetail),
    ValueLike(ValueDetail),
    Enum(EnumDetail),
    Enumerator(EnumeratorDetail),
    Typedef(TypedefDetail),
}

/// One extracted declaration with all of its metadata.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Symbol {
    /// Unique within a run, strictly increasing in traversal order.
    pub id: u32,
    pub spelling: String,
    pub kind: SyntaxKind,
    /// `file:line:col`.
    pub location: String,
    /// Enclosing scopes, outermost first; empty at file scope.
    pub hierarchy: Vec<ScopeLevel>,
    /// Normalized kind of the immediate semantic parent, or `(global)`.
    pub parent_kind: String,
    /// Cleaned documentation comment; empty when the node has none.
    pub comment: String,
    /// Embedded `Usage:` block of the comment, when present.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub usage: String,
    /// Member access, present only inside class-like scopes.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub access: Option<String>,
    #[serde(flatten)]
    pub detail: SymbolDetail,
}
