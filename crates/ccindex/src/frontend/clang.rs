//! libclang adapter: parses one translation unit and copies everything the
//! engine may ask about into an owned [`TranslationUnit`] snapshot.
//!
//! clang-sys is used with its runtime loader, so a missing libclang is a
//! reportable startup failure rather than a build-time link error. Only
//! nodes located in the target file are visited in full; declarations in
//! headers are materialized shallowly when reached through semantic-parent
//! or type queries.

use std::collections::HashMap;
use std::ffi::CString;
use std::fmt::{self, Display, Formatter};
use std::os::raw::{c_int, c_uint};
use std::path::Path;
use std::ptr;

use clang_sys::*;
use tracing::{debug, warn};

use crate::config::Config;

use super::{
    Access, CursorData, CursorId, CursorKind, IncludeEntry, Location, NoThrowGuarantee,
    TranslationUnit, TypeData, TypeId, TypeKind,
};

#[derive(Debug)]
pub enum ParseError {
    /// The libclang shared library could not be located or loaded.
    LibraryLoad(String),
    IndexCreate,
    Parse(String),
}

impl Display for ParseError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::LibraryLoad(reason) => write!(f, "failed to load libclang: {reason}"),
            Self::IndexCreate => write!(f, "failed to create a libclang index"),
            Self::Parse(reason) => write!(f, "{reason}"),
        }
    }
}

impl std::error::Error for ParseError {}

struct OwnedIndex(CXIndex);

impl Drop for OwnedIndex {
    fn drop(&mut self) {
        unsafe { clang_disposeIndex(self.0) };
    }
}

struct OwnedTu(CXTranslationUnit);

impl Drop for OwnedTu {
    fn drop(&mut self) {
        unsafe { clang_disposeTranslationUnit(self.0) };
    }
}

/// Parse `target` with the front end and snapshot the result.
pub fn parse(config: &Config, target: &Path) -> Result<TranslationUnit, ParseError> {
    if let Some(dir) = &config.libclang_dir {
        // clang-sys's runtime loader only consults LIBCLANG_PATH; this is
        // the one spot where explicit config crosses into the environment,
        // once, before any parse.
        unsafe { std::env::set_var("LIBCLANG_PATH", dir) };
    }
    if !is_loaded() {
        load().map_err(|error| ParseError::LibraryLoad(error.to_string()))?;
    }

    let target_name = target.to_string_lossy().into_owned();
    let source = std::fs::read_to_string(target).unwrap_or_else(|error| {
        warn!("could not read {target_name} for extent capture: {error}");
        String::new()
    });

    unsafe {
        let index = OwnedIndex(clang_createIndex(0, 0));
        if index.0.is_null() {
            return Err(ParseError::IndexCreate);
        }

        let c_target = CString::new(target_name.clone())
            .map_err(|_| ParseError::Parse(format!("invalid path: {target_name}")))?;
        let args: Vec<CString> = config
            .clang_args()
            .into_iter()
            .filter_map(|arg| CString::new(arg).ok())
            .collect();
        let c_args: Vec<*const std::os::raw::c_char> = args.iter().map(|a| a.as_ptr()).collect();

        // Function bodies are never analyzed; the preprocessing record is
        // needed for macro-expansion sites.
        let options =
            CXTranslationUnit_SkipFunctionBodies | CXTranslationUnit_DetailedPreprocessingRecord;
        let cxtu = OwnedTu(clang_parseTranslationUnit(
            index.0,
            c_target.as_ptr(),
            c_args.as_ptr(),
            c_args.len() as c_int,
            ptr::null_mut(),
            0,
            options,
        ));
        if cxtu.0.is_null() {
            return Err(ParseError::Parse(format!("failed to parse {target_name}")));
        }

        let mut builder = Builder {
            cxtu: cxtu.0,
            tu: TranslationUnit::new(target_name),
            cursor_ids: HashMap::new(),
            type_ids: HashMap::new(),
            source,
        };
        builder.collect_diagnostics();
        builder.collect_inclusions();

        let root = clang_getTranslationUnitCursor(cxtu.0);
        builder.cursor_ids.insert(clang_hashCursor(root), builder.tu.root_id());
        builder.visit_children(root, builder.tu.root_id());

        debug!(
            "snapshot: {} cursors, {} types, {} macro sites",
            builder.tu.cursors.len(),
            builder.tu.types.len(),
            builder.tu.macro_sites.len()
        );
        Ok(builder.tu)
    }
}

struct Builder {
    cxtu: CXTranslationUnit,
    tu: TranslationUnit,
    /// clang cursor hash -> arena id.
    cursor_ids: HashMap<c_uint, CursorId>,
    /// (type kind, spelling) -> arena id.
    type_ids: HashMap<(c_int, String), TypeId>,
    /// Target file contents, for extent slicing.
    source: String,
}

impl Builder {
    unsafe fn collect_diagnostics(&mut self) {
        unsafe {
            let count = clang_getNumDiagnostics(self.cxtu);
            for i in 0..count {
                let diagnostic = clang_getDiagnostic(self.cxtu, i);
                let formatted =
                    clang_formatDiagnostic(diagnostic, clang_defaultDiagnosticDisplayOptions());
                self.tu.diagnostics.push(cx_string(formatted));
                clang_disposeDiagnostic(diagnostic);
            }
        }
    }

    unsafe fn collect_inclusions(&mut self) {
        extern "C" fn visitor(
            file: CXFile,
            stack: *mut CXSourceLocation,
            depth: c_uint,
            data: CXClientData,
        ) {
            unsafe {
                // Depth 0 is the main file itself.
                if depth == 0 || stack.is_null() {
                    return;
                }
                let includes = &mut *(data as *mut Vec<IncludeEntry>);
                includes.push(IncludeEntry {
                    file: cx_string(clang_getFileName(file)),
                    included_at: location_of(*stack),
                    depth,
                });
            }
        }

        let mut includes: Vec<IncludeEntry> = Vec::new();
        unsafe {
            clang_getInclusions(
                self.cxtu,
                visitor,
                &mut includes as *mut Vec<IncludeEntry> as CXClientData,
            );
        }
        self.tu.includes = includes;
    }

    unsafe fn visit_children(&mut self, cursor: CXCursor, parent_id: CursorId) {
        unsafe {
            for child in children_of(cursor) {
                self.visit(child, parent_id);
            }
        }
    }

    unsafe fn visit(&mut self, cursor: CXCursor, parent_id: CursorId) {
        unsafe {
            let raw_kind = clang_getCursorKind(cursor);
            let location = location_of(clang_getCursorLocation(cursor));

            if location.file != self.tu.target_file {
                // Header subtrees are skipped; anything of theirs the engine
                // needs is materialized lazily through semantic-parent and
                // type queries.
                return;
            }

            if raw_kind == CXCursor_MacroExpansion {
                let name = cx_string(clang_getCursorSpelling(cursor));
                self.tu.macro_sites.insert((location.file, location.line), name);
                return;
            }
            if raw_kind == CXCursor_CXXFinalAttr {
                self.tu.cursors[parent_id.0 as usize].is_final = true;
                return;
            }
            if raw_kind == CXCursor_CXXOverrideAttr {
                self.tu.cursors[parent_id.0 as usize].is_override = true;
                return;
            }

            let id = self.intern_cursor(cursor);
            let children = &mut self.tu.cursors[parent_id.0 as usize].children;
            if !children.contains(&id) {
                children.push(id);
            }
            self.visit_children(cursor, id);
        }
    }

    /// Materialize one cursor, memoized by clang's cursor hash. The slot is
    /// reserved before the fields are built so parent/type recursion cannot
    /// re-enter.
    unsafe fn intern_cursor(&mut self, cursor: CXCursor) -> CursorId {
        unsafe {
            let hash = clang_hashCursor(cursor);
            if let Some(&id) = self.cursor_ids.get(&hash) {
                return id;
            }
            let id = self.tu.add_detached_cursor(CursorData::default());
            self.cursor_ids.insert(hash, id);
            let data = self.build_cursor_data(cursor);
            self.tu.cursors[id.0 as usize] = data;
            id
        }
    }

    unsafe fn build_cursor_data(&mut self, cursor: CXCursor) -> CursorData {
        unsafe {
            let raw_kind = clang_getCursorKind(cursor);
            let kind = map_cursor_kind(raw_kind);
            let mut data = CursorData::new(kind, cx_string(clang_getCursorSpelling(cursor)));
            data.display_name = cx_string(clang_getCursorDisplayName(cursor));
            data.location = location_of(clang_getCursorLocation(cursor));

            let parent = clang_getCursorSemanticParent(cursor);
            if clang_Cursor_isNull(parent) == 0
                && clang_isInvalid(clang_getCursorKind(parent)) == 0
                && clang_equalCursors(parent, cursor) == 0
            {
                data.parent = Some(self.intern_cursor(parent));
            }

            let ty = clang_getCursorType(cursor);
            data.ty = self.intern_type(ty);

            let comment = cx_string(clang_Cursor_getRawCommentText(cursor));
            if !comment.is_empty() {
                data.raw_comment = Some(comment);
            }

            data.access = match clang_getCXXAccessSpecifier(cursor) {
                CX_CXXPublic => Some(Access::Public),
                CX_CXXProtected => Some(Access::Protected),
                CX_CXXPrivate => Some(Access::Private),
                _ => None,
            };

            match kind {
                CursorKind::FunctionDecl
                | CursorKind::FunctionTemplate
                | CursorKind::Method
                | CursorKind::Constructor
                | CursorKind::Destructor
                | CursorKind::ConversionFunction => {
                    data.result_type = self.intern_type(clang_getCursorResultType(cursor));
                    data.no_throw = Some(map_exception_spec(
                        clang_getCursorExceptionSpecificationType(cursor),
                    ));
                    data.is_const_method = clang_CXXMethod_isConst(cursor) != 0;
                    data.is_virtual_method = clang_CXXMethod_isVirtual(cursor) != 0;
                    data.is_pure_virtual = clang_CXXMethod_isPureVirtual(cursor) != 0;
                    data.is_static_method = clang_CXXMethod_isStatic(cursor) != 0;
                    data.is_defaulted = clang_CXXMethod_isDefaulted(cursor) != 0;
                }
                CursorKind::ClassDecl | CursorKind::StructDecl | CursorKind::ClassTemplate => {
                    data.is_abstract = clang_CXXRecord_isAbstract(cursor) != 0;
                }
                CursorKind::EnumDecl => {
                    data.is_scoped_enum = clang_EnumDecl_isScoped(cursor) != 0;
                    data.enum_integer_type =
                        self.intern_type(clang_getEnumDeclIntegerType(cursor));
                }
                CursorKind::EnumConstantDecl => {
                    data.enum_value = Some(clang_getEnumConstantDeclValue(cursor));
                }
                CursorKind::TypedefDecl => {
                    data.underlying_type =
                        self.intern_type(clang_getTypedefDeclUnderlyingType(cursor));
                }
                _ => {}
            }
            if kind == CursorKind::Constructor {
                data.is_default_constructor =
                    clang_CXXConstructor_isDefaultConstructor(cursor) != 0;
                data.is_copy_constructor = clang_CXXConstructor_isCopyConstructor(cursor) != 0;
                data.is_move_constructor = clang_CXXConstructor_isMoveConstructor(cursor) != 0;
                data.is_converting_constructor =
                    clang_CXXConstructor_isConvertingConstructor(cursor) != 0;
            }

            if data.location.file == self.tu.target_file {
                let wants_tokens = matches!(
                    kind,
                    CursorKind::FunctionDecl
                        | CursorKind::FunctionTemplate
                        | CursorKind::Method
                        | CursorKind::Constructor
                        | CursorKind::Destructor
                        | CursorKind::ConversionFunction
                        | CursorKind::BaseSpecifier
                );
                if wants_tokens {
                    data.tokens = self.tokens_of(cursor);
                }
                let wants_extent = matches!(
                    kind,
                    CursorKind::FunctionDecl
                        | CursorKind::FunctionTemplate
                        | CursorKind::Method
                        | CursorKind::Constructor
                        | CursorKind::Destructor
                        | CursorKind::ConversionFunction
                        | CursorKind::ParmDecl
                        | CursorKind::TemplateTypeParam
                        | CursorKind::TemplateNonTypeParam
                );
                if wants_extent {
                    data.extent_text = self.extent_text_of(cursor);
                }
            }

            data
        }
    }

    /// Materialize one type, memoized by (kind, spelling).
    unsafe fn intern_type(&mut self, ty: CXType) -> Option<TypeId> {
        unsafe {
            if ty.kind == CXType_Invalid {
                return None;
            }
            let spelling = cx_string(clang_getTypeSpelling(ty));
            let key = (ty.kind, spelling.clone());
            if let Some(&id) = self.type_ids.get(&key) {
                return Some(id);
            }
            let id = self.tu.add_type(TypeData::new(map_type_kind(ty.kind), spelling));
            self.type_ids.insert(key, id);

            let canonical = clang_getCanonicalType(ty);
            let canonical_id = if clang_equalTypes(ty, canonical) == 0 {
                self.intern_type(canonical)
            } else {
                None
            };

            let declaration = clang_getTypeDeclaration(ty);
            let declaration_id = if clang_Cursor_isNull(declaration) == 0
                && clang_getCursorKind(declaration) != CXCursor_NoDeclFound
                && clang_isInvalid(clang_getCursorKind(declaration)) == 0
            {
                Some(self.intern_cursor(declaration))
            } else {
                None
            };

            let pointee_id = self.intern_type(clang_getPointeeType(ty));
            let element_id = self.intern_type(clang_getArrayElementType(ty));
            let array_size = clang_getArraySize(ty);
            let size_of = clang_Type_getSizeOf(ty);
            let is_pod = clang_isPODType(ty) != 0;

            let slot = &mut self.tu.types[id.0 as usize];
            slot.canonical = canonical_id;
            slot.declaration = declaration_id;
            slot.pointee = pointee_id;
            slot.element = element_id;
            slot.array_size = (array_size >= 0).then_some(array_size as u64);
            slot.size_of = size_of;
            slot.is_pod = is_pod;
            Some(id)
        }
    }

    unsafe fn tokens_of(&self, cursor: CXCursor) -> Vec<String> {
        unsafe {
            let extent = clang_getCursorExtent(cursor);
            let mut tokens: *mut CXToken = ptr::null_mut();
            let mut count: c_uint = 0;
            clang_tokenize(self.cxtu, extent, &mut tokens, &mut count);
            if tokens.is_null() {
                return Vec::new();
            }
            let mut out = Vec::with_capacity(count as usize);
            for i in 0..count {
                out.push(cx_string(clang_getTokenSpelling(self.cxtu, *tokens.add(i as usize))));
            }
            clang_disposeTokens(self.cxtu, tokens, count);
            out
        }
    }

    unsafe fn extent_text_of(&self, cursor: CXCursor) -> Option<String> {
        unsafe {
            let extent = clang_getCursorExtent(cursor);
            let (start_file, start_offset) = file_and_offset(clang_getRangeStart(extent));
            let (end_file, end_offset) = file_and_offset(clang_getRangeEnd(extent));
            if start_file != self.tu.target_file || end_file != self.tu.target_file {
                return None;
            }
            self.source.get(start_offset..end_offset).map(str::to_string)
        }
    }
}

unsafe fn children_of(cursor: CXCursor) -> Vec<CXCursor> {
    extern "C" fn visitor(
        child: CXCursor,
        _parent: CXCursor,
        data: CXClientData,
    ) -> CXChildVisitResult {
        unsafe {
            let out = &mut *(data as *mut Vec<CXCursor>);
            if clang_Cursor_isNull(child) == 0 {
                out.push(child);
            }
        }
        CXChildVisit_Continue
    }

    let mut out: Vec<CXCursor> = Vec::new();
    unsafe {
        clang_visitChildren(cursor, visitor, &mut out as *mut Vec<CXCursor> as CXClientData);
    }
    out
}

unsafe fn location_of(location: CXSourceLocation) -> Location {
    unsafe {
        let mut file: CXFile = ptr::null_mut();
        let mut line: c_uint = 0;
        let mut col: c_uint = 0;
        let mut offset: c_uint = 0;
        clang_getExpansionLocation(location, &mut file, &mut line, &mut col, &mut offset);
        let name = if file.is_null() { String::new() } else { cx_string(clang_getFileName(file)) };
        Location::new(name, line, col)
    }
}

unsafe fn file_and_offset(location: CXSourceLocation) -> (String, usize) {
    unsafe {
        let mut file: CXFile = ptr::null_mut();
        let mut line: c_uint = 0;
        let mut col: c_uint = 0;
        let mut offset: c_uint = 0;
        clang_getSpellingLocation(location, &mut file, &mut line, &mut col, &mut offset);
        let name = if file.is_null() { String::new() } else { cx_string(clang_getFileName(file)) };
        (name, offset as usize)
    }
}

fn map_cursor_kind(kind: CXCursorKind) -> CursorKind {
    match kind {
        CXCursor_TranslationUnit => CursorKind::TranslationUnit,
        CXCursor_Namespace => CursorKind::Namespace,
        CXCursor_ClassDecl => CursorKind::ClassDecl,
        CXCursor_StructDecl => CursorKind::StructDecl,
        CXCursor_ClassTemplate => CursorKind::ClassTemplate,
        CXCursor_FunctionDecl => CursorKind::FunctionDecl,
        CXCursor_FunctionTemplate => CursorKind::FunctionTemplate,
        CXCursor_CXXMethod => CursorKind::Method,
        CXCursor_Constructor => CursorKind::Constructor,
        CXCursor_Destructor => CursorKind::Destructor,
        CXCursor_ConversionFunction => CursorKind::ConversionFunction,
        CXCursor_FieldDecl => CursorKind::FieldDecl,
        CXCursor_VarDecl => CursorKind::VarDecl,
        CXCursor_EnumDecl => CursorKind::EnumDecl,
        CXCursor_EnumConstantDecl => CursorKind::EnumConstantDecl,
        CXCursor_TypedefDecl | CXCursor_TypeAliasDecl => CursorKind::TypedefDecl,
        CXCursor_ParmDecl => CursorKind::ParmDecl,
        CXCursor_TemplateTypeParameter => CursorKind::TemplateTypeParam,
        CXCursor_NonTypeTemplateParameter => CursorKind::TemplateNonTypeParam,
        CXCursor_CXXBaseSpecifier => CursorKind::BaseSpecifier,
        _ => CursorKind::Other,
    }
}

fn map_type_kind(kind: CXTypeKind) -> TypeKind {
    match kind {
        CXType_Typedef => TypeKind::Typedef,
        CXType_Elaborated => TypeKind::Elaborated,
        CXType_Unexposed => TypeKind::Unexposed,
        CXType_ConstantArray => TypeKind::ConstantArray,
        CXType_IncompleteArray => TypeKind::IncompleteArray,
        CXType_VariableArray => TypeKind::VariableArray,
        CXType_DependentSizedArray => TypeKind::DependentSizedArray,
        CXType_Pointer => TypeKind::Pointer,
        CXType_MemberPointer => TypeKind::MemberPointer,
        CXType_LValueReference => TypeKind::LValueReference,
        CXType_RValueReference => TypeKind::RValueReference,
        CXType_Record => TypeKind::Record,
        CXType_Enum => TypeKind::Enum,
        CXType_FunctionProto | CXType_FunctionNoProto => TypeKind::FunctionProto,
        _ => TypeKind::Other,
    }
}

/// Collapse libclang's exception specification kinds into the tri-valued
/// guarantee. `Unevaluated` is genuinely undecided and preserved as such.
fn map_exception_spec(kind: c_int) -> NoThrowGuarantee {
    match kind {
        CXCursor_ExceptionSpecificationKind_BasicNoexcept
        | CXCursor_ExceptionSpecificationKind_ComputedNoexcept
        | CXCursor_ExceptionSpecificationKind_DynamicNone
        | CXCursor_ExceptionSpecificationKind_NoThrow => NoThrowGuarantee::Guaranteed,
        CXCursor_ExceptionSpecificationKind_Unevaluated
        | CXCursor_ExceptionSpecificationKind_Uninstantiated
        | CXCursor_ExceptionSpecificationKind_Unparsed => NoThrowGuarantee::Unevaluated,
        _ => NoThrowGuarantee::NotGuaranteed,
    }
}

/// Convert and dispose a CXString.
unsafe fn cx_string(string: CXString) -> String {
    unsafe {
        let c_str = clang_getCString(string);
        let result = if c_str.is_null() {
            String::new()
        } else {
            std::ffi::CStr::from_ptr(c_str).to_string_lossy().into_owned()
        };
        clang_disposeString(string);
        result
    }
}
