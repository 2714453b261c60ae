// crates/unitsynth-syntax/src/types.rs
//
// Arena-backed type expressions for the language under test.
//
// - TypeId: u32 handle to one parsed type node (Copy, trivial Eq/Hash)
// - DeclId: u32 handle to a named type declaration
// - TypeArena: storage for both, owned by the resolver
//
// Unlike an interning arena, nodes are never deduplicated. Two textually
// identical `struct{ X int }` bodies get distinct TypeIds, so a TypeId is a
// stable identity for the node it was allocated for.

use smallvec::SmallVec;

/// Handle to a type node in the [`TypeArena`].
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, PartialOrd, Ord)]
pub struct TypeId(u32);

impl TypeId {
    /// Get the raw index (for debugging/serialization)
    pub fn index(self) -> u32 {
        self.0
    }
}

/// Handle to a named type declaration in the [`TypeArena`].
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, PartialOrd, Ord)]
pub struct DeclId(u32);

impl DeclId {
    pub fn index(self) -> u32 {
        self.0
    }
}

/// Channel direction as declared.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
pub enum ChanDir {
    #[default]
    Both,
    Send,
    Recv,
}

impl ChanDir {
    /// Whether a value can be sent on a channel of this direction.
    pub fn can_send(self) -> bool {
        !matches!(self, ChanDir::Recv)
    }
}

/// Length part of an array/slice type.
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub enum ArrayLen {
    /// `[]T`
    Slice,
    /// `[3]T`
    Fixed(usize),
    /// `[N]T` where `N` is a named constant whose value is not known here.
    Const(String),
}

/// A field in a struct, parameter list or result list.
///
/// An empty `names` list means an embedded struct field, or an unnamed
/// parameter/result.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Field {
    pub names: SmallVec<[String; 1]>,
    pub ty: TypeId,
}

impl Field {
    pub fn named(name: impl Into<String>, ty: TypeId) -> Self {
        let mut names = SmallVec::new();
        names.push(name.into());
        Self { names, ty }
    }

    pub fn unnamed(ty: TypeId) -> Self {
        Self {
            names: SmallVec::new(),
            ty,
        }
    }

    /// Number of values this field contributes (at least one).
    pub fn arity(&self) -> usize {
        self.names.len().max(1)
    }
}

/// A function signature.
#[derive(Clone, PartialEq, Eq, Debug, Default)]
pub struct Signature {
    pub params: Vec<Field>,
    pub results: Vec<Field>,
}

/// One element of an interface's method set.
#[derive(Clone, PartialEq, Eq, Debug)]
pub enum InterfaceElem {
    Method { name: String, sig: Signature },
    /// An embedded interface, referenced by name or qualified name.
    Embedded(TypeId),
}

#[derive(Clone, PartialEq, Eq, Debug, Default)]
pub struct InterfaceType {
    pub elems: Vec<InterfaceElem>,
}

impl InterfaceType {
    /// Interface without any method set (`interface{}`).
    pub fn is_empty(&self) -> bool {
        self.elems.is_empty()
    }
}

#[derive(Clone, PartialEq, Eq, Debug, Default)]
pub struct StructType {
    pub fields: Vec<Field>,
}

/// A parsed type expression.
#[derive(Clone, PartialEq, Eq, Debug)]
pub enum TypeExpr {
    /// Identifier with no declaration bound in this file: a predeclared type
    /// or a name declared in another file of the same package.
    Ident(String),
    /// Identifier bound to a declaration of the same file.
    Named(DeclId),
    /// `package.Name`
    Qualified { package: String, name: String },
    Pointer(TypeId),
    Array { len: ArrayLen, elem: TypeId },
    Map { key: TypeId, value: TypeId },
    Chan { dir: ChanDir, elem: TypeId },
    Func(Signature),
    Interface(InterfaceType),
    Struct(StructType),
    /// `...T` in the last parameter position.
    Variadic(TypeId),
}

/// A named type declaration (`type Name <ty>`).
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct TypeDecl {
    pub name: String,
    /// `None` while the declaration is reserved but its body not yet known.
    pub ty: Option<TypeId>,
}

/// A function or method declaration.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct FuncDecl {
    pub name: String,
    pub receiver: Option<Field>,
    pub sig: Signature,
}

/// Storage for type nodes and declarations.
#[derive(Debug, Default, Clone)]
pub struct TypeArena {
    types: Vec<TypeExpr>,
    decls: Vec<TypeDecl>,
}

impl TypeArena {
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocate a new type node.
    pub fn alloc(&mut self, expr: TypeExpr) -> TypeId {
        let id = TypeId(self.types.len() as u32);
        self.types.push(expr);
        id
    }

    /// Get a type node.
    ///
    /// # Panics
    /// Panics if `id` was not allocated by this arena.
    pub fn get(&self, id: TypeId) -> &TypeExpr {
        &self.types[id.0 as usize]
    }

    /// Reserve a declaration whose body is defined later.
    pub fn declare(&mut self, name: impl Into<String>) -> DeclId {
        let id = DeclId(self.decls.len() as u32);
        self.decls.push(TypeDecl {
            name: name.into(),
            ty: None,
        });
        id
    }

    /// Set the body of a reserved declaration.
    pub fn define(&mut self, decl: DeclId, ty: TypeId) {
        self.decls[decl.0 as usize].ty = Some(ty);
    }

    pub fn decl(&self, id: DeclId) -> &TypeDecl {
        &self.decls[id.0 as usize]
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    // --- Convenience constructors (used by loaders and tests) ---

    pub fn ident(&mut self, name: &str) -> TypeId {
        self.alloc(TypeExpr::Ident(name.to_string()))
    }

    pub fn named(&mut self, decl: DeclId) -> TypeId {
        self.alloc(TypeExpr::Named(decl))
    }

    pub fn pointer(&mut self, elem: TypeId) -> TypeId {
        self.alloc(TypeExpr::Pointer(elem))
    }

    pub fn slice(&mut self, elem: TypeId) -> TypeId {
        self.alloc(TypeExpr::Array {
            len: ArrayLen::Slice,
            elem,
        })
    }

    pub fn map(&mut self, key: TypeId, value: TypeId) -> TypeId {
        self.alloc(TypeExpr::Map { key, value })
    }
}

/// Predeclared basic type names that have a literal form.
const BASIC_TYPES: &[&str] = &[
    "bool",
    "string",
    "int",
    "int8",
    "int16",
    "int32",
    "int64",
    "uint",
    "uint8",
    "uint16",
    "uint32",
    "uint64",
    "uintptr",
    "byte",
    "rune",
    "float32",
    "float64",
    "complex64",
    "complex128",
];

/// Whether `name` is a predeclared basic type.
pub fn is_basic_type(name: &str) -> bool {
    BASIC_TYPES.contains(&name)
}

/// Whether `name` is the predeclared `error` interface.
pub fn is_error_type(name: &str) -> bool {
    name == "error"
}

/// Whether `name` is the predeclared alias for the empty interface.
pub fn is_any_type(name: &str) -> bool {
    name == "any"
}

/// Whether `name` is predeclared and never resolves to a declaration.
pub fn is_predeclared(name: &str) -> bool {
    is_basic_type(name) || is_error_type(name) || is_any_type(name)
}
