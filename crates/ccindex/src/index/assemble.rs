//! Per-node symbol assembly: classification, hierarchy, prototype and type
//! description merged into one record, plus the kind-specific fields.

use crate::frontend::{Cursor, CursorKind};
use crate::symbol::{
    ClassDetail, ConstructorProperty, DestructorProperty, EnumDetail, Enumerator,
    EnumeratorDetail, FunctionDetail, MethodProperty, Symbol, SymbolDetail, TypeCategory,
    TypeDesc, TypedefDetail, ValueDetail,
};

use super::IndexError;
use super::classify::{self, SyntaxKind};
use super::comment;
use super::hierarchy;
use super::prototype::{self, format_type_spelling};
use super::typedesc::{self, TypeContext};

/// Assemble the record for one interesting, named node.
pub(crate) fn assemble(
    cursor: Cursor<'_>,
    id: u32,
    line_width: usize,
) -> Result<Symbol, IndexError> {
    let kind = classify::syntax_kind(cursor.kind()).ok_or_else(|| {
        IndexError::Internal(format!(
            "node `{}` reached assembly without an interesting kind",
            cursor.spelling()
        ))
    })?;

    let (hierarchy, parent_kind) = hierarchy::resolve(cursor);
    let (comment, usage) = comment::format_raw_comment(cursor.data().raw_comment.as_deref());

    let parent_is_class = cursor
        .semantic_parent()
        .is_some_and(|parent| classify::is_class_like(parent.kind()));
    let access = if parent_is_class {
        cursor.data().access.map(|a| a.as_str().to_string())
    } else {
        None
    };

    let ctx = TypeContext { cursor, hierarchy: &hierarchy };
    let detail = if classify::is_function_like(cursor.kind()) {
        SymbolDetail::FunctionLike(function_detail(cursor, line_width)?)
    } else if classify::is_class_like(cursor.kind()) {
        SymbolDetail::ClassLike(class_detail(cursor, line_width))
    } else if cursor.kind() == CursorKind::EnumDecl {
        SymbolDetail::Enum(enum_detail(cursor, &ctx)?)
    } else if cursor.kind() == CursorKind::EnumConstantDecl {
        SymbolDetail::Enumerator(enumerator_detail(cursor, &ctx)?)
    } else if classify::is_value_like(cursor.kind()) {
        SymbolDetail::ValueLike(value_detail(cursor, &ctx, parent_is_class)?)
    } else {
        debug_assert_eq!(kind, SyntaxKind::Typedef);
        SymbolDetail::Typedef(TypedefDetail {
            underlying: cursor
                .underlying_type()
                .map(|ty| format_type_spelling(ty.spelling()))
                .unwrap_or_default(),
        })
    };

    Ok(Symbol {
        id,
        spelling: cursor.spelling().to_string(),
        kind,
        location: cursor.location().to_string(),
        hierarchy,
        parent_kind,
        comment,
        usage,
        access,
        detail,
    })
}

fn function_detail(
    cursor: Cursor<'_>,
    line_width: usize,
) -> Result<FunctionDetail, IndexError> {
    let data = cursor.data();
    let proto = prototype::function_prototype(cursor, line_width);

    // Macro-generated declarations may not follow normal prototype shape;
    // substitute the raw source text for the synthesized string.
    let location = cursor.location();
    let macro_origin = cursor
        .tu()
        .macro_name_at(&location.file, location.line)
        .map(str::to_string);
    let (declaration, declaration_pretty) = match (&macro_origin, &data.extent_text) {
        (Some(_), Some(raw)) => (raw.clone(), raw.clone()),
        _ => (proto.declaration.clone(), proto.declaration_pretty.clone()),
    };

    let constructor_property = if cursor.kind() == CursorKind::Constructor {
        constructor_property(cursor)
    } else {
        None
    };

    let mut destructor_property = Vec::new();
    if cursor.kind() == CursorKind::Destructor {
        if data.is_virtual_method {
            destructor_property.push(DestructorProperty::Virtual);
        }
        if data.is_pure_virtual {
            destructor_property.push(DestructorProperty::PureVirtual);
        }
        if data.is_defaulted {
            destructor_property.push(DestructorProperty::Default);
        }
        if proto.is_deleted {
            destructor_property.push(DestructorProperty::Deleted);
        }
    }

    // Plain methods, and member function templates (a free function
    // template is not method-like).
    let is_method = cursor.kind() == CursorKind::Method
        || (cursor.kind() == CursorKind::FunctionTemplate && classify::is_method_like(cursor));
    let mut method_property = Vec::new();
    if is_method {
        if data.is_static_method {
            method_property.push(MethodProperty::Static);
        }
        if data.is_const_method {
            method_property.push(MethodProperty::Const);
        }
        if data.is_defaulted {
            method_property.push(MethodProperty::Default);
        }
        if data.is_virtual_method {
            method_property.push(MethodProperty::Virtual);
        }
        if data.is_pure_virtual {
            method_property.push(MethodProperty::PureVirtual);
        }
    }

    Ok(FunctionDetail {
        declaration,
        declaration_pretty,
        is_template: !proto.template_params.is_empty(),
        template_params: proto.template_params,
        params: proto.params,
        return_type: proto.return_type,
        specifiers: proto.specifiers,
        no_throw_guarantee: proto.no_throw,
        is_deleted: proto.is_deleted,
        is_defaulted: proto.is_defaulted,
        constructor_property,
        destructor_property,
        method_property,
        macro_origin,
    })
}

/// Mutually exclusive by priority: default > copy > move > converting.
fn constructor_property(cursor: Cursor<'_>) -> Option<ConstructorProperty> {
    let data = cursor.data();
    if data.is_default_constructor {
        Some(ConstructorProperty::Default)
    } else if data.is_copy_constructor {
        Some(ConstructorProperty::Copy)
    } else if data.is_move_constructor {
        Some(ConstructorProperty::Move)
    } else if data.is_converting_constructor {
        Some(ConstructorProperty::Converting)
    } else {
        None
    }
}

fn class_detail(cursor: Cursor<'_>, line_width: usize) -> ClassDetail {
    let proto = prototype::class_prototype(cursor, line_width);
    let (size, is_pod) = cursor
        .ty()
        .map(|ty| (ty.size_of(), ty.is_pod()))
        .unwrap_or((None, false));
    ClassDetail {
        declaration: proto.declaration,
        declaration_pretty: proto.declaration_pretty,
        is_template: !proto.template_params.is_empty(),
        template_params: proto.template_params,
        is_final: proto.is_final,
        is_abstract: cursor.data().is_abstract,
        base_clause: proto.base_clause,
        size,
        is_pod,
    }
}

fn enum_detail(cursor: Cursor<'_>, ctx: &TypeContext<'_>) -> Result<EnumDetail, IndexError> {
    let underlying_type = match cursor.enum_integer_type() {
        Some(ty) => typedesc::describe(ty, Some(ctx))?,
        // Degraded AST: the front end reports a default builtin type for
        // unresolved underlying types.
        None => TypeDesc { spelling: "int".to_string(), size: None, category: TypeCategory::Plain },
    };
    let enumerators = cursor
        .children()
        .filter(|child| child.kind() == CursorKind::EnumConstantDecl)
        .map(|child| Enumerator {
            spelling: child.spelling().to_string(),
            value: child.data().enum_value.unwrap_or_default(),
        })
        .collect();
    Ok(EnumDetail {
        scoped_enum: cursor.data().is_scoped_enum,
        underlying_type,
        enumerators,
    })
}

fn enumerator_detail(
    cursor: Cursor<'_>,
    ctx: &TypeContext<'_>,
) -> Result<EnumeratorDetail, IndexError> {
    let ty = cursor.ty().ok_or_else(|| {
        IndexError::Internal(format!("enumerator `{}` has no type", cursor.spelling()))
    })?;
    // The parent enum's fixed underlying type, reached through the
    // enumerator's own enum type declaration.
    let enum_type = ty
        .declaration()
        .and_then(|decl| decl.enum_integer_type())
        .or_else(|| cursor.semantic_parent().and_then(|parent| parent.enum_integer_type()))
        .map(|underlying| format_type_spelling(underlying.spelling()))
        .unwrap_or_default();
    Ok(EnumeratorDetail {
        size: ty.size_of(),
        is_pod: ty.is_pod(),
        type_desc: typedesc::describe(ty, Some(ctx))?,
        enum_type,
        enum_value: cursor.data().enum_value.unwrap_or_default(),
    })
}

fn value_detail(
    cursor: Cursor<'_>,
    ctx: &TypeContext<'_>,
    parent_is_class: bool,
) -> Result<ValueDetail, IndexError> {
    let ty = cursor.ty().ok_or_else(|| {
        IndexError::Internal(format!("value node `{}` has no type", cursor.spelling()))
    })?;
    // A class member spelled as a variable declaration is static by
    // language rule; a field declaration is not. Non-members carry neither.
    let static_member = match cursor.kind() {
        CursorKind::VarDecl if parent_is_class => Some(true),
        CursorKind::FieldDecl => Some(false),
        _ => None,
    };
    Ok(ValueDetail {
        static_member,
        size: ty.size_of(),
        is_pod: ty.is_pod(),
        type_desc: typedesc::describe(ty, Some(ctx))?,
    })
}
