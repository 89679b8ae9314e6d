use std::collections::HashMap;
use std::fmt::{self, Display, Formatter};

use serde::{Serialize, Serializer};

use super::kind::{Access, CursorKind, NoThrowGuarantee, TypeKind};

/// Index of a cursor within a [`TranslationUnit`] arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CursorId(pub u32);

/// Index of a type within a [`TranslationUnit`] arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TypeId(pub u32);

/// A point in a source file, 1-based.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Location {
    pub file: String,
    pub line: u32,
    pub col: u32,
}

impl Location {
    pub fn new(file: impl Into<String>, line: u32, col: u32) -> Self {
        Self { file: file.into(), line, col }
    }
}

impl Display for Location {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.file, self.line, self.col)
    }
}

impl Serialize for Location {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// One entry of the translation unit's include graph.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IncludeEntry {
    /// Absolute path of the included file.
    pub file: String,
    /// Location of the `#include` directive that pulled it in.
    pub included_at: Location,
    /// Inclusion nesting depth (1 = included directly by the main file).
    pub depth: u32,
}

/// Everything the engine reads about one AST node.
///
/// Fields that only apply to some kinds stay at their defaults elsewhere;
/// the engine never consults a field outside its kind.
#[derive(Debug, Clone, Default)]
pub struct CursorData {
    pub kind: CursorKind,
    pub spelling: String,
    /// Name including signature parts, e.g. `f(int, int)`. Empty means
    /// "same as spelling".
    pub display_name: String,
    pub location: Location,
    pub parent: Option<CursorId>,
    pub children: Vec<CursorId>,
    pub ty: Option<TypeId>,
    /// Return type for function-like nodes.
    pub result_type: Option<TypeId>,
    /// Underlying type for typedef declarations.
    pub underlying_type: Option<TypeId>,
    /// Fixed underlying integer type for enum declarations.
    pub enum_integer_type: Option<TypeId>,
    pub enum_value: Option<i64>,
    pub raw_comment: Option<String>,
    /// Raw source text of the node's extent, when it was captured.
    pub extent_text: Option<String>,
    /// Token spellings of the node's extent, when they were captured.
    pub tokens: Vec<String>,
    pub access: Option<Access>,
    pub no_throw: Option<NoThrowGuarantee>,
    pub is_const_method: bool,
    pub is_virtual_method: bool,
    pub is_pure_virtual: bool,
    pub is_static_method: bool,
    pub is_defaulted: bool,
    pub is_abstract: bool,
    pub is_final: bool,
    pub is_override: bool,
    pub is_default_constructor: bool,
    pub is_copy_constructor: bool,
    pub is_move_constructor: bool,
    pub is_converting_constructor: bool,
    pub is_scoped_enum: bool,
}

impl CursorData {
    pub fn new(kind: CursorKind, spelling: impl Into<String>) -> Self {
        Self { kind, spelling: spelling.into(), ..Self::default() }
    }
}

/// Everything the engine reads about one type.
#[derive(Debug, Clone)]
pub struct TypeData {
    pub kind: TypeKind,
    pub spelling: String,
    /// Fully desugared form. `None` means the type is its own canonical form.
    pub canonical: Option<TypeId>,
    /// Declaration cursor, for types that have one (records, enums, typedefs).
    pub declaration: Option<CursorId>,
    /// Pointee for pointer/reference kinds.
    pub pointee: Option<TypeId>,
    /// Element type for array kinds.
    pub element: Option<TypeId>,
    /// Constant element count for array kinds, when known.
    pub array_size: Option<u64>,
    /// Size in bytes; the front end reports a non-positive sentinel for
    /// dependent or incomplete types.
    pub size_of: i64,
    pub is_pod: bool,
}

impl TypeData {
    pub fn new(kind: TypeKind, spelling: impl Into<String>) -> Self {
        Self {
            kind,
            spelling: spelling.into(),
            canonical: None,
            declaration: None,
            pointee: None,
            element: None,
            array_size: None,
            size_of: -1,
            is_pod: false,
        }
    }
}

/// Immutable snapshot of one parsed translation unit.
///
/// Cursor 0 is always the translation-unit root. The engine only ever reads
/// from the snapshot; tests and alternative front ends build one through
/// [`TranslationUnit::add_cursor`] / [`TranslationUnit::add_type`].
#[derive(Debug, Clone)]
pub struct TranslationUnit {
    pub target_file: String,
    pub cursors: Vec<CursorData>,
    pub types: Vec<TypeData>,
    /// Front-end diagnostics, formatted, in emission order.
    pub diagnostics: Vec<String>,
    pub includes: Vec<IncludeEntry>,
    /// Macro-expansion sites in the target file: (file, line) -> macro name.
    pub macro_sites: HashMap<(String, u32), String>,
}

impl TranslationUnit {
    pub fn new(target_file: impl Into<String>) -> Self {
        let target_file = target_file.into();
        let mut root = CursorData::new(CursorKind::TranslationUnit, target_file.clone());
        root.location = Location::new(target_file.clone(), 0, 0);
        Self {
            target_file,
            cursors: vec![root],
            types: Vec::new(),
            diagnostics: Vec::new(),
            includes: Vec::new(),
            macro_sites: HashMap::new(),
        }
    }

    pub fn root_id(&self) -> CursorId {
        CursorId(0)
    }

    pub fn root(&self) -> Cursor<'_> {
        self.cursor(CursorId(0))
    }

    pub fn cursor(&self, id: CursorId) -> Cursor<'_> {
        Cursor { tu: self, id }
    }

    pub fn ty(&self, id: TypeId) -> Ty<'_> {
        Ty { tu: self, id }
    }

    /// Append a cursor and link it under `parent`.
    pub fn add_cursor(&mut self, parent: CursorId, mut data: CursorData) -> CursorId {
        let id = CursorId(self.cursors.len() as u32);
        data.parent = Some(parent);
        self.cursors.push(data);
        self.cursors[parent.0 as usize].children.push(id);
        id
    }

    /// Append a cursor without linking it into any parent's child list.
    ///
    /// Used for declarations reached only through type queries (e.g. a
    /// record defined in a header): they need a parent chain for hierarchy
    /// walks but are not part of the traversed tree.
    pub fn add_detached_cursor(&mut self, data: CursorData) -> CursorId {
        let id = CursorId(self.cursors.len() as u32);
        self.cursors.push(data);
        id
    }

    pub fn add_type(&mut self, data: TypeData) -> TypeId {
        let id = TypeId(self.types.len() as u32);
        self.types.push(data);
        id
    }

    /// Name of the macro whose expansion site sits at (file, line), if any.
    pub fn macro_name_at(&self, file: &str, line: u32) -> Option<&str> {
        self.macro_sites.get(&(file.to_string(), line)).map(String::as_str)
    }
}

/// Borrowing handle over one node of a [`TranslationUnit`].
#[derive(Clone, Copy)]
pub struct Cursor<'a> {
    tu: &'a TranslationUnit,
    pub id: CursorId,
}

impl<'a> Cursor<'a> {
    pub fn data(&self) -> &'a CursorData {
        &self.tu.cursors[self.id.0 as usize]
    }

    pub fn tu(&self) -> &'a TranslationUnit {
        self.tu
    }

    pub fn kind(&self) -> CursorKind {
        self.data().kind
    }

    pub fn spelling(&self) -> &'a str {
        &self.data().spelling
    }

    /// Display name, falling back to the plain spelling.
    pub fn display_name(&self) -> &'a str {
        let data = self.data();
        if data.display_name.is_empty() { &data.spelling } else { &data.display_name }
    }

    pub fn location(&self) -> &'a Location {
        &self.data().location
    }

    pub fn semantic_parent(&self) -> Option<Cursor<'a>> {
        self.data().parent.map(|id| self.tu.cursor(id))
    }

    pub fn children(&self) -> impl Iterator<Item = Cursor<'a>> + 'a {
        let tu = self.tu;
        self.data().children.iter().map(move |&id| tu.cursor(id))
    }

    pub fn ty(&self) -> Option<Ty<'a>> {
        self.data().ty.map(|id| self.tu.ty(id))
    }

    pub fn result_type(&self) -> Option<Ty<'a>> {
        self.data().result_type.map(|id| self.tu.ty(id))
    }

    pub fn underlying_type(&self) -> Option<Ty<'a>> {
        self.data().underlying_type.map(|id| self.tu.ty(id))
    }

    pub fn enum_integer_type(&self) -> Option<Ty<'a>> {
        self.data().enum_integer_type.map(|id| self.tu.ty(id))
    }

    pub fn is_in_target_file(&self) -> bool {
        self.location().file == self.tu.target_file
    }

    /// Pre-order walk of this cursor's subtree, the cursor itself first.
    pub fn walk_preorder(&self) -> Vec<Cursor<'a>> {
        let mut out = Vec::new();
        let mut stack = vec![*self];
        while let Some(cursor) = stack.pop() {
            out.push(cursor);
            // Push in reverse so children pop in declaration order.
            for child in cursor.data().children.iter().rev() {
                stack.push(self.tu.cursor(*child));
            }
        }
        out
    }
}

/// Borrowing handle over one type of a [`TranslationUnit`].
#[derive(Clone, Copy)]
pub struct Ty<'a> {
    tu: &'a TranslationUnit,
    pub id: TypeId,
}

impl<'a> Ty<'a> {
    pub fn data(&self) -> &'a TypeData {
        &self.tu.types[self.id.0 as usize]
    }

    pub fn kind(&self) -> TypeKind {
        self.data().kind
    }

    pub fn spelling(&self) -> &'a str {
        &self.data().spelling
    }

    /// Fully desugared form; the type itself when already canonical.
    pub fn canonical(&self) -> Ty<'a> {
        match self.data().canonical {
            Some(id) => self.tu.ty(id),
            None => *self,
        }
    }

    pub fn declaration(&self) -> Option<Cursor<'a>> {
        self.data().declaration.map(|id| self.tu.cursor(id))
    }

    pub fn pointee(&self) -> Option<Ty<'a>> {
        self.data().pointee.map(|id| self.tu.ty(id))
    }

    pub fn element(&self) -> Option<Ty<'a>> {
        self.data().element.map(|id| self.tu.ty(id))
    }

    pub fn array_size(&self) -> Option<u64> {
        self.data().array_size
    }

    /// Size in bytes, `None` when the front end reported its unknown sentinel.
    pub fn size_of(&self) -> Option<u64> {
        let size = self.data().size_of;
        (size > 0).then_some(size as u64)
    }

    pub fn is_pod(&self) -> bool {
        self.data().is_pod
    }
}
