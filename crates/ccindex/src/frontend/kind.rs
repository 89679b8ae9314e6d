use serde::Serialize;

/// Syntax category of an AST node, mirroring the front end's cursor kinds.
///
/// Only the kinds the engine inspects get their own variant; everything else
/// collapses into `Other` and is carried solely for tree completeness.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CursorKind {
    TranslationUnit,
    Namespace,
    ClassDecl,
    StructDecl,
    ClassTemplate,
    FunctionDecl,
    FunctionTemplate,
    Method,
    Constructor,
    Destructor,
    ConversionFunction,
    FieldDecl,
    VarDecl,
    EnumDecl,
    EnumConstantDecl,
    TypedefDecl,
    ParmDecl,
    TemplateTypeParam,
    TemplateNonTypeParam,
    BaseSpecifier,
    #[default]
    Other,
}

/// Kind tag of a type, as reported by the front end.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TypeKind {
    Typedef,
    Elaborated,
    Unexposed,
    ConstantArray,
    IncompleteArray,
    VariableArray,
    DependentSizedArray,
    Pointer,
    MemberPointer,
    LValueReference,
    RValueReference,
    Record,
    Enum,
    FunctionProto,
    #[default]
    Other,
}

impl TypeKind {
    /// Typedefs and elaborated/sugar spellings resolve to an underlying type.
    pub fn is_alias_like(self) -> bool {
        matches!(self, TypeKind::Typedef | TypeKind::Elaborated)
    }

    pub fn is_array(self) -> bool {
        matches!(
            self,
            TypeKind::ConstantArray
                | TypeKind::IncompleteArray
                | TypeKind::VariableArray
                | TypeKind::DependentSizedArray
        )
    }

    pub fn is_pointer_like(self) -> bool {
        matches!(self, TypeKind::Pointer | TypeKind::MemberPointer)
    }
}

/// C++ member access.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Access {
    Public,
    Protected,
    Private,
}

impl Access {
    pub fn as_str(self) -> &'static str {
        match self {
            Access::Public => "public",
            Access::Protected => "protected",
            Access::Private => "private",
        }
    }
}

/// Whether a function is known not to throw.
///
/// `Unevaluated` reflects a genuinely undecided exception specification
/// (the language permits specifications that are never evaluated); it must
/// be preserved rather than collapsed into a boolean.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NoThrowGuarantee {
    Guaranteed,
    NotGuaranteed,
    Unevaluated,
}
