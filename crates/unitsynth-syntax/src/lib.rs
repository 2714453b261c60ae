// crates/unitsynth-syntax/src/lib.rs
//! Type model of the code under test, the output syntax tree, and the
//! symbol-resolution seam shared by the generator crates.

pub mod ast;
pub mod printer;
pub mod resolve;
pub mod source;
pub mod types;

pub use ast::{
    AssignKind, Decl, Element, Expr, FuncSyntax, InterfaceElemSyntax, ParamSyntax, Receiver, Stmt,
    TypeSyntax,
};
pub use printer::{GoPrinter, Printer};
pub use resolve::{Resolved, SymbolResolver};
pub use source::{FileHandle, ModelError, PackageIndex, SourceFile, SourceModel};
pub use types::{
    ArrayLen, ChanDir, DeclId, Field, FuncDecl, InterfaceElem, InterfaceType, Signature,
    StructType, TypeArena, TypeDecl, TypeExpr, TypeId,
};
