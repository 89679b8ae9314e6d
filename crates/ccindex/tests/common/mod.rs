#![allow(dead_code)]

//! Snapshot builder helpers shared by the integration tests.
//!
//! Tests exercise the engine against hand-built front-end snapshots, so no
//! libclang installation is needed to run them.

use ccindex::frontend::{
    CursorData, CursorId, CursorKind, Location, TranslationUnit, TypeData, TypeId, TypeKind,
};

pub const TARGET: &str = "input.cc";

pub fn new_tu() -> TranslationUnit {
    TranslationUnit::new(TARGET)
}

pub fn loc(line: u32, col: u32) -> Location {
    Location::new(TARGET, line, col)
}

/// A cursor located in the target file.
pub fn named(kind: CursorKind, spelling: &str, line: u32) -> CursorData {
    let mut data = CursorData::new(kind, spelling);
    data.location = loc(line, 1);
    data
}

/// A POD builtin type with a known size.
pub fn builtin(tu: &mut TranslationUnit, spelling: &str, size: i64) -> TypeId {
    let mut data = TypeData::new(TypeKind::Other, spelling);
    data.size_of = size;
    data.is_pod = true;
    tu.add_type(data)
}

/// A typedef layer: registers the typedef declaration cursor (detached, in
/// the target file) and the alias type that resolves to `underlying`.
pub fn typedef_layer(
    tu: &mut TranslationUnit,
    name: &str,
    line: u32,
    underlying: TypeId,
    canonical: TypeId,
) -> (CursorId, TypeId) {
    let mut decl = named(CursorKind::TypedefDecl, name, line);
    decl.underlying_type = Some(underlying);
    let decl_id = tu.add_detached_cursor(decl);
    let mut ty = TypeData::new(TypeKind::Typedef, name);
    ty.declaration = Some(decl_id);
    ty.canonical = Some(canonical);
    ty.size_of = tu.ty(canonical).data().size_of;
    let ty_id = tu.add_type(ty);
    (decl_id, ty_id)
}

pub fn tokens(spellings: &[&str]) -> Vec<String> {
    spellings.iter().map(|s| s.to_string()).collect()
}
