use super::{class_prototype, format_type_spelling, function_prototype};

use crate::frontend::{
    CursorData, CursorId, CursorKind, NoThrowGuarantee, TranslationUnit, TypeData, TypeId,
    TypeKind,
};

const WIDTH: usize = 75;

fn add_type(tu: &mut TranslationUnit, spelling: &str) -> TypeId {
    tu.add_type(TypeData::new(TypeKind::Other, spelling))
}

fn add_param(tu: &mut TranslationUnit, parent: CursorId, name: &str, ty: TypeId) -> CursorId {
    let mut data = CursorData::new(CursorKind::ParmDecl, name);
    data.ty = Some(ty);
    tu.add_cursor(parent, data)
}

#[test]
fn type_spellings_are_normalized() {
    assert_eq!(format_type_spelling("std::__1::string"), "std::string");
    assert_eq!(format_type_spelling("int *"), "int*");
    assert_eq!(format_type_spelling("const Foo &"), "const Foo&");
}

#[test]
fn plain_function_prototype() {
    let mut tu = TranslationUnit::new("input.cc");
    let int_ty = add_type(&mut tu, "int");
    let mut decl = CursorData::new(CursorKind::FunctionDecl, "add");
    decl.display_name = "add(int, int)".to_string();
    decl.result_type = Some(int_ty);
    let id = tu.add_cursor(tu.root_id(), decl);
    add_param(&mut tu, id, "a", int_ty);
    add_param(&mut tu, id, "b", int_ty);

    let proto = function_prototype(tu.cursor(id), WIDTH);
    assert_eq!(proto.declaration, "int add(int a, int b);");
    assert_eq!(proto.declaration_pretty, proto.declaration);
    assert_eq!(proto.return_type.as_deref(), Some("int"));
    assert_eq!(proto.params.len(), 2);
    assert!(proto.specifiers.is_empty());
    assert_eq!(proto.no_throw, NoThrowGuarantee::NotGuaranteed);
}

#[test]
fn specifier_sequence_has_fixed_order() {
    let mut tu = TranslationUnit::new("input.cc");
    let void_ty = add_type(&mut tu, "void");
    let mut decl = CursorData::new(CursorKind::Method, "f");
    decl.display_name = "f()".to_string();
    decl.result_type = Some(void_ty);
    decl.is_virtual_method = true;
    decl.is_const_method = true;
    decl.is_pure_virtual = true;
    decl.no_throw = Some(NoThrowGuarantee::Guaranteed);
    let id = tu.add_cursor(tu.root_id(), decl);

    let proto = function_prototype(tu.cursor(id), WIDTH);
    assert_eq!(proto.specifiers, vec!["const", "= 0", "noexcept"]);
    assert_eq!(proto.declaration, "virtual void f() const = 0 noexcept;");
}

#[test]
fn conversion_operator_suppresses_return_type() {
    let mut tu = TranslationUnit::new("input.cc");
    let int_ty = add_type(&mut tu, "int");
    let mut decl = CursorData::new(CursorKind::ConversionFunction, "operator int");
    decl.display_name = "operator int()".to_string();
    decl.result_type = Some(int_ty);
    let id = tu.add_cursor(tu.root_id(), decl);

    let proto = function_prototype(tu.cursor(id), WIDTH);
    assert_eq!(proto.declaration, "operator int();");
    // The return type is still reported structurally.
    assert_eq!(proto.return_type.as_deref(), Some("int"));
}

#[test]
fn constructor_has_no_return_type() {
    let mut tu = TranslationUnit::new("input.cc");
    let decl = CursorData::new(CursorKind::Constructor, "A");
    let id = tu.add_cursor(tu.root_id(), decl);

    let proto = function_prototype(tu.cursor(id), WIDTH);
    assert!(proto.return_type.is_none());
    assert_eq!(proto.declaration, "A();");
}

#[test]
fn template_header_prefixes_both_renderings() {
    let mut tu = TranslationUnit::new("input.cc");
    let t_ty = add_type(&mut tu, "T");
    let mut decl = CursorData::new(CursorKind::FunctionTemplate, "id");
    decl.display_name = "id(T)".to_string();
    decl.result_type = Some(t_ty);
    let id = tu.add_cursor(tu.root_id(), decl);
    tu.add_cursor(id, CursorData::new(CursorKind::TemplateTypeParam, "T"));
    add_param(&mut tu, id, "x", t_ty);

    let proto = function_prototype(tu.cursor(id), WIDTH);
    assert_eq!(proto.declaration, "template <typename T>\nT id(T x);");
    assert_eq!(proto.declaration_pretty, "template <typename T>\nT id(T x);");
    assert_eq!(proto.template_params.len(), 1);
}

#[test]
fn long_declaration_wraps_one_param_per_line() {
    let mut tu = TranslationUnit::new("input.cc");
    let int_ty = add_type(&mut tu, "int");
    let mut decl = CursorData::new(CursorKind::FunctionDecl, "f");
    decl.display_name = "f(int, int)".to_string();
    decl.result_type = Some(int_ty);
    let id = tu.add_cursor(tu.root_id(), decl);
    add_param(&mut tu, id, "alpha", int_ty);
    add_param(&mut tu, id, "beta", int_ty);

    let proto = function_prototype(tu.cursor(id), 10);
    assert_eq!(proto.declaration, "int f(int alpha, int beta);");
    assert_eq!(proto.declaration_pretty, "int f(\n\tint alpha,\n\tint beta\n);");
    // Wrapping is cosmetic: structured fields are identical.
    assert_eq!(proto.params.len(), 2);
}

#[test]
fn parameter_default_comes_from_source_text() {
    let mut tu = TranslationUnit::new("input.cc");
    let int_ty = add_type(&mut tu, "int");
    let mut decl = CursorData::new(CursorKind::FunctionDecl, "f");
    decl.display_name = "f(int)".to_string();
    decl.result_type = Some(int_ty);
    let id = tu.add_cursor(tu.root_id(), decl);
    let param = add_param(&mut tu, id, "x", int_ty);
    tu.cursors[param.0 as usize].extent_text = Some("int x = 3".to_string());

    let proto = function_prototype(tu.cursor(id), WIDTH);
    assert_eq!(proto.params[0].default.as_deref(), Some("3"));
}

#[test]
fn deleted_function_is_flagged_from_tokens() {
    let mut tu = TranslationUnit::new("input.cc");
    let void_ty = add_type(&mut tu, "void");
    let mut decl = CursorData::new(CursorKind::Method, "f");
    decl.display_name = "f()".to_string();
    decl.result_type = Some(void_ty);
    decl.tokens =
        ["void", "f", "(", ")", "=", "delete", ";"].iter().map(|s| s.to_string()).collect();
    let id = tu.add_cursor(tu.root_id(), decl);

    let proto = function_prototype(tu.cursor(id), WIDTH);
    assert!(proto.is_deleted);
    assert!(!proto.is_defaulted);
}

#[test]
fn class_prototype_with_bases() {
    let mut tu = TranslationUnit::new("input.cc");
    let mut base_decl = CursorData::new(CursorKind::ClassDecl, "Base");
    base_decl.location = crate::frontend::Location::new("base.h", 3, 1);
    let base_decl_id = tu.add_detached_cursor(base_decl);
    let mut base_ty = TypeData::new(TypeKind::Record, "Base<int>");
    base_ty.declaration = Some(base_decl_id);
    let base_ty_id = tu.add_type(base_ty);

    let mut class = CursorData::new(CursorKind::ClassDecl, "Derived");
    class.is_final = true;
    let class_id = tu.add_cursor(tu.root_id(), class);
    let mut base = CursorData::new(CursorKind::BaseSpecifier, "Base<int>");
    base.ty = Some(base_ty_id);
    base.tokens = ["virtual", "private", "Base"].iter().map(|s| s.to_string()).collect();
    tu.add_cursor(class_id, base);

    let proto = class_prototype(tu.cursor(class_id), WIDTH);
    assert_eq!(proto.declaration, "class Derived final;");
    assert!(proto.is_final);
    assert_eq!(proto.base_clause.len(), 1);
    let base = &proto.base_clause[0];
    assert_eq!(base.access, "private");
    assert!(base.is_virtual);
    assert_eq!(base.spelling, "Base<int>");
    assert_eq!(base.location.as_deref(), Some("base.h:3:1"));
}

#[test]
fn struct_keyword_and_template_header() {
    let mut tu = TranslationUnit::new("input.cc");
    let decl = CursorData::new(CursorKind::ClassTemplate, "Box");
    let id = tu.add_cursor(tu.root_id(), decl);
    tu.add_cursor(id, CursorData::new(CursorKind::TemplateTypeParam, "T"));

    let proto = class_prototype(tu.cursor(id), WIDTH);
    assert_eq!(proto.declaration, "template <typename T> class Box;");
    assert_eq!(proto.declaration_pretty, "template <typename T>\nclass Box;");

    let mut tu = TranslationUnit::new("input.cc");
    let decl = CursorData::new(CursorKind::StructDecl, "Point");
    let id = tu.add_cursor(tu.root_id(), decl);
    let proto = class_prototype(tu.cursor(id), WIDTH);
    assert_eq!(proto.declaration, "struct Point;");
}
