// crates/unitsynth-syntax/src/source.rs
//
// In-memory package index built from a JSON source model.
//
// The model is produced by an external parser of the code under test. It
// lists packages, their files, each file's imports, type declarations and
// function declarations. Loading happens in two passes per file:
//
// 1. reserve a DeclId for every type declared in the file
// 2. lower every type node into the arena; an `ident` naming a type of the
//    same file becomes `TypeExpr::Named`, every other `ident` stays unbound

use std::path::Path;

use rustc_hash::FxHashMap;
use serde::Deserialize;
use smallvec::SmallVec;
use thiserror::Error;

use crate::resolve::{Resolved, SymbolResolver};
use crate::types::{
    ArrayLen, ChanDir, DeclId, Field, FuncDecl, InterfaceElem, InterfaceType, Signature,
    StructType, TypeArena, TypeExpr, TypeId,
};

/// Errors raised while loading a source model.
#[derive(Debug, Error)]
pub enum ModelError {
    #[error("failed to read source model {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed source model: {0}")]
    Json(#[from] serde_json::Error),
    #[error("root package `{0}` is not part of the model")]
    MissingRoot(String),
}

// ---------------------------------------------------------------------------
// Wire model
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub struct SourceModel {
    /// Import path of the package under test.
    pub root: String,
    #[serde(default)]
    pub packages: Vec<PackageModel>,
}

#[derive(Debug, Deserialize)]
pub struct PackageModel {
    pub path: String,
    pub name: String,
    #[serde(default)]
    pub files: Vec<FileModel>,
}

#[derive(Debug, Deserialize)]
pub struct FileModel {
    pub name: String,
    #[serde(default)]
    pub imports: Vec<ImportModel>,
    #[serde(default)]
    pub types: Vec<TypeDeclModel>,
    #[serde(default)]
    pub functions: Vec<FuncModel>,
}

#[derive(Debug, Deserialize)]
pub struct ImportModel {
    #[serde(default)]
    pub alias: Option<String>,
    pub path: String,
}

#[derive(Debug, Deserialize)]
pub struct TypeDeclModel {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: TypeNode,
}

#[derive(Debug, Deserialize)]
pub struct FuncModel {
    pub name: String,
    #[serde(default)]
    pub receiver: Option<FieldModel>,
    #[serde(default)]
    pub params: Vec<FieldModel>,
    #[serde(default)]
    pub results: Vec<FieldModel>,
}

#[derive(Debug, Deserialize)]
pub struct FieldModel {
    #[serde(default)]
    pub names: Vec<String>,
    #[serde(rename = "type")]
    pub ty: TypeNode,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum LenModel {
    Fixed(usize),
    Const(String),
}

#[derive(Debug, Default, Deserialize, Clone, Copy)]
#[serde(rename_all = "snake_case")]
pub enum DirModel {
    #[default]
    Both,
    Send,
    Recv,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InterfaceElemModel {
    Method {
        name: String,
        #[serde(default)]
        params: Vec<FieldModel>,
        #[serde(default)]
        results: Vec<FieldModel>,
    },
    Embed(TypeNode),
}

/// Externally tagged: `{"ident": "int"}`, `{"pointer": {"ident": "Node"}}`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TypeNode {
    Ident(String),
    Qualified {
        package: String,
        name: String,
    },
    Pointer(Box<TypeNode>),
    Array {
        #[serde(default)]
        len: Option<LenModel>,
        elem: Box<TypeNode>,
    },
    Map {
        key: Box<TypeNode>,
        value: Box<TypeNode>,
    },
    Chan {
        #[serde(default)]
        dir: DirModel,
        elem: Box<TypeNode>,
    },
    Func {
        #[serde(default)]
        params: Vec<FieldModel>,
        #[serde(default)]
        results: Vec<FieldModel>,
    },
    Interface {
        #[serde(default)]
        elems: Vec<InterfaceElemModel>,
    },
    Struct {
        #[serde(default)]
        fields: Vec<FieldModel>,
    },
    Variadic(Box<TypeNode>),
}

// ---------------------------------------------------------------------------
// Index
// ---------------------------------------------------------------------------

/// Location of a file in a [`PackageIndex`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FileHandle {
    pub package: u32,
    pub file: u32,
}

/// A loaded source file.
#[derive(Debug)]
pub struct SourceFile {
    pub name: String,
    /// alias -> import path
    imports: FxHashMap<String, String>,
    types: FxHashMap<String, DeclId>,
    pub functions: Vec<FuncDecl>,
}

impl SourceFile {
    pub fn type_decl(&self, name: &str) -> Option<DeclId> {
        self.types.get(name).copied()
    }
}

#[derive(Debug)]
struct Package {
    path: String,
    name: String,
    files: Vec<SourceFile>,
}

/// Packages of the code under test, indexed for name lookup.
#[derive(Debug)]
pub struct PackageIndex {
    arena: TypeArena,
    packages: Vec<Package>,
    by_path: FxHashMap<String, u32>,
    root: u32,
}

impl PackageIndex {
    /// Read and load a JSON source model from disk.
    pub fn load(path: &Path) -> Result<Self, ModelError> {
        let text = std::fs::read_to_string(path).map_err(|source| ModelError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json(&text)
    }

    pub fn from_json(text: &str) -> Result<Self, ModelError> {
        let model: SourceModel = serde_json::from_str(text)?;
        Self::from_model(model)
    }

    pub fn from_model(model: SourceModel) -> Result<Self, ModelError> {
        let mut arena = TypeArena::new();
        let mut packages = Vec::with_capacity(model.packages.len());
        let mut by_path = FxHashMap::default();

        for (pkg_idx, pkg) in model.packages.into_iter().enumerate() {
            by_path.insert(pkg.path.clone(), pkg_idx as u32);
            let files = pkg
                .files
                .into_iter()
                .map(|file| lower_file(&mut arena, file))
                .collect();
            packages.push(Package {
                path: pkg.path,
                name: pkg.name,
                files,
            });
        }

        let root = *by_path
            .get(&model.root)
            .ok_or_else(|| ModelError::MissingRoot(model.root.clone()))?;

        tracing::debug!(
            packages = packages.len(),
            types = arena.len(),
            root = %model.root,
            "source model loaded"
        );

        Ok(Self {
            arena,
            packages,
            by_path,
            root,
        })
    }

    /// Every file of the root package.
    pub fn root_files(&self) -> impl Iterator<Item = (FileHandle, &SourceFile)> {
        let package = self.root;
        self.packages[package as usize]
            .files
            .iter()
            .enumerate()
            .map(move |(i, file)| {
                (
                    FileHandle {
                        package,
                        file: i as u32,
                    },
                    file,
                )
            })
    }

    pub fn file(&self, handle: FileHandle) -> &SourceFile {
        &self.packages[handle.package as usize].files[handle.file as usize]
    }

    pub fn package_path(&self, handle: FileHandle) -> &str {
        &self.packages[handle.package as usize].path
    }

    fn find_in_package(&self, package: u32, name: &str) -> Option<Resolved<FileHandle>> {
        self.packages[package as usize]
            .files
            .iter()
            .enumerate()
            .find_map(|(i, file)| {
                file.type_decl(name).map(|decl| Resolved {
                    decl,
                    handle: FileHandle {
                        package,
                        file: i as u32,
                    },
                })
            })
    }

    /// Import path for `alias` as seen from the file at `at`. Imports without
    /// an explicit alias are matched by the imported package's name.
    fn import_path(&self, at: FileHandle, alias: &str) -> Option<&str> {
        let file = self.file(at);
        if let Some(path) = file.imports.get(alias) {
            return Some(path.as_str());
        }
        file.imports
            .iter()
            .filter(|(key, _)| key.is_empty())
            .map(|(_, path)| path.as_str())
            .find(|path| {
                self.by_path
                    .get(*path)
                    .is_some_and(|&pkg| self.packages[pkg as usize].name == alias)
            })
    }
}

impl SymbolResolver for PackageIndex {
    type Handle = FileHandle;

    fn arena(&self) -> &TypeArena {
        &self.arena
    }

    fn find_in_same_package(&self, at: FileHandle, name: &str) -> Option<Resolved<FileHandle>> {
        // Prefer the file itself before scanning its siblings.
        if let Some(decl) = self.file(at).type_decl(name) {
            return Some(Resolved { decl, handle: at });
        }
        self.find_in_package(at.package, name)
    }

    fn find_in_import(
        &self,
        at: FileHandle,
        package_alias: &str,
        name: &str,
    ) -> Option<Resolved<FileHandle>> {
        let path = self.import_path(at, package_alias)?;
        let package = *self.by_path.get(path)?;
        self.find_in_package(package, name)
    }

    fn is_root_package(&self, at: FileHandle) -> bool {
        at.package == self.root
    }

    fn package_name_for(&self, at: FileHandle) -> &str {
        &self.packages[at.package as usize].name
    }
}

// ---------------------------------------------------------------------------
// Lowering
// ---------------------------------------------------------------------------

fn lower_file(arena: &mut TypeArena, file: FileModel) -> SourceFile {
    let mut types = FxHashMap::default();
    for decl in &file.types {
        types.insert(decl.name.clone(), arena.declare(decl.name.clone()));
    }

    let mut lowerer = Lowerer {
        arena,
        types: &types,
    };
    for decl in file.types {
        let id = lowerer.node(decl.ty);
        lowerer.arena.define(types[&decl.name], id);
    }
    let functions = file
        .functions
        .into_iter()
        .map(|func| FuncDecl {
            name: func.name,
            receiver: func.receiver.map(|recv| lowerer.field(recv)),
            sig: lowerer.signature(func.params, func.results),
        })
        .collect();

    let imports = file
        .imports
        .into_iter()
        .map(|import| (import.alias.unwrap_or_default(), import.path))
        .collect();

    SourceFile {
        name: file.name,
        imports,
        types,
        functions,
    }
}

struct Lowerer<'a> {
    arena: &'a mut TypeArena,
    types: &'a FxHashMap<String, DeclId>,
}

impl Lowerer<'_> {
    fn node(&mut self, node: TypeNode) -> TypeId {
        let expr = match node {
            TypeNode::Ident(name) => match self.types.get(&name) {
                Some(&decl) => TypeExpr::Named(decl),
                None => TypeExpr::Ident(name),
            },
            TypeNode::Qualified { package, name } => TypeExpr::Qualified { package, name },
            TypeNode::Pointer(elem) => TypeExpr::Pointer(self.node(*elem)),
            TypeNode::Array { len, elem } => {
                let len = match len {
                    None => ArrayLen::Slice,
                    Some(LenModel::Fixed(n)) => ArrayLen::Fixed(n),
                    Some(LenModel::Const(name)) => ArrayLen::Const(name),
                };
                TypeExpr::Array {
                    len,
                    elem: self.node(*elem),
                }
            }
            TypeNode::Map { key, value } => TypeExpr::Map {
                key: self.node(*key),
                value: self.node(*value),
            },
            TypeNode::Chan { dir, elem } => TypeExpr::Chan {
                dir: match dir {
                    DirModel::Both => ChanDir::Both,
                    DirModel::Send => ChanDir::Send,
                    DirModel::Recv => ChanDir::Recv,
                },
                elem: self.node(*elem),
            },
            TypeNode::Func { params, results } => TypeExpr::Func(self.signature(params, results)),
            TypeNode::Interface { elems } => {
                let elems = elems
                    .into_iter()
                    .map(|elem| match elem {
                        InterfaceElemModel::Method {
                            name,
                            params,
                            results,
                        } => InterfaceElem::Method {
                            name,
                            sig: self.signature(params, results),
                        },
                        InterfaceElemModel::Embed(node) => InterfaceElem::Embedded(self.node(node)),
                    })
                    .collect();
                TypeExpr::Interface(InterfaceType { elems })
            }
            TypeNode::Struct { fields } => TypeExpr::Struct(StructType {
                fields: fields.into_iter().map(|f| self.field(f)).collect(),
            }),
            TypeNode::Variadic(elem) => TypeExpr::Variadic(self.node(*elem)),
        };
        self.arena.alloc(expr)
    }

    fn field(&mut self, field: FieldModel) -> Field {
        Field {
            names: SmallVec::from_vec(field.names),
            ty: self.node(field.ty),
        }
    }

    fn signature(&mut self, params: Vec<FieldModel>, results: Vec<FieldModel>) -> Signature {
        Signature {
            params: params.into_iter().map(|f| self.field(f)).collect(),
            results: results.into_iter().map(|f| self.field(f)).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MODEL: &str = r#"{
        "root": "example.com/shapes",
        "packages": [
            {
                "path": "example.com/shapes",
                "name": "shapes",
                "files": [
                    {
                        "name": "node.go",
                        "imports": [{"path": "example.com/geo"}, {"alias": "s", "path": "strings"}],
                        "types": [
                            {"name": "Node", "type": {"struct": {"fields": [
                                {"names": ["Next"], "type": {"pointer": {"ident": "Node"}}},
                                {"names": ["Label"], "type": {"ident": "Label"}}
                            ]}}}
                        ],
                        "functions": [
                            {"name": "Len", "receiver": {"names": ["n"], "type": {"pointer": {"ident": "Node"}}},
                             "results": [{"type": {"ident": "int"}}]}
                        ]
                    },
                    {
                        "name": "label.go",
                        "types": [{"name": "Label", "type": {"ident": "string"}}]
                    }
                ]
            },
            {
                "path": "example.com/geo",
                "name": "geo",
                "files": [
                    {"name": "point.go", "types": [
                        {"name": "Point", "type": {"struct": {"fields": [
                            {"names": ["X", "Y"], "type": {"ident": "float64"}}
                        ]}}}
                    ]}
                ]
            }
        ]
    }"#;

    fn root_handle(index: &PackageIndex, file: &str) -> FileHandle {
        index
            .root_files()
            .find(|(_, f)| f.name == file)
            .map(|(h, _)| h)
            .expect("file in root package")
    }

    #[test]
    fn same_file_idents_are_bound() {
        let index = PackageIndex::from_json(MODEL).unwrap();
        let at = root_handle(&index, "node.go");
        let node = index.find_in_same_package(at, "Node").unwrap();
        let body = index.arena().decl(node.decl).ty.unwrap();
        let TypeExpr::Struct(st) = index.arena().get(body) else {
            panic!("expected struct body");
        };
        let TypeExpr::Pointer(elem) = index.arena().get(st.fields[0].ty) else {
            panic!("expected pointer field");
        };
        assert_eq!(index.arena().get(*elem), &TypeExpr::Named(node.decl));
        // Declared in a sibling file, so left unbound.
        assert_eq!(
            index.arena().get(st.fields[1].ty),
            &TypeExpr::Ident("Label".to_string())
        );
    }

    #[test]
    fn sibling_file_lookup_returns_its_handle() {
        let index = PackageIndex::from_json(MODEL).unwrap();
        let at = root_handle(&index, "node.go");
        let label = index.find_in_same_package(at, "Label").unwrap();
        assert_eq!(index.file(label.handle).name, "label.go");
        assert!(index.is_root_package(label.handle));
    }

    #[test]
    fn import_lookup_by_package_name_and_alias() {
        let index = PackageIndex::from_json(MODEL).unwrap();
        let at = root_handle(&index, "node.go");
        let point = index.find_in_import(at, "geo", "Point").unwrap();
        assert!(!index.is_root_package(point.handle));
        assert_eq!(index.package_name_for(point.handle), "geo");
        assert_eq!(index.package_path(point.handle), "example.com/geo");
        assert!(index.find_in_import(at, "s", "Builder").is_none());
        assert!(index.find_in_import(at, "missing", "Point").is_none());
    }

    #[test]
    fn functions_keep_receiver_and_results() {
        let index = PackageIndex::from_json(MODEL).unwrap();
        let (_, file) = index.root_files().next().unwrap();
        let len = &file.functions[0];
        assert_eq!(len.name, "Len");
        assert!(len.receiver.is_some());
        assert_eq!(len.sig.results.len(), 1);
        assert!(len.sig.params.is_empty());
    }

    #[test]
    fn missing_root_is_an_error() {
        let err = PackageIndex::from_json(r#"{"root": "nowhere", "packages": []}"#).unwrap_err();
        assert!(matches!(err, ModelError::MissingRoot(_)));
    }

    #[test]
    fn malformed_json_is_an_error() {
        let err = PackageIndex::from_json("{ not json").unwrap_err();
        assert!(matches!(err, ModelError::Json(_)));
    }
}
