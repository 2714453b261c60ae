// crates/unitsynth-syntax/src/resolve.rs
//! Symbol lookup seam between the synthesizer and whatever indexes the code
//! under test.

use std::fmt;
use std::hash::Hash;

use crate::types::{DeclId, TypeArena};

/// A declaration found by a lookup, with the handle of the file declaring it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Resolved<H> {
    pub decl: DeclId,
    pub handle: H,
}

/// Resolves names relative to a location (file + package) in the code under
/// test. Implementations must answer deterministically for a fixed snapshot.
pub trait SymbolResolver {
    /// Opaque location handle.
    type Handle: Copy + Eq + Hash + fmt::Debug;

    /// Arena holding every type node and declaration this resolver hands out.
    fn arena(&self) -> &TypeArena;

    /// Find a type declared anywhere in the package of `at`.
    fn find_in_same_package(&self, at: Self::Handle, name: &str) -> Option<Resolved<Self::Handle>>;

    /// Find `package_alias.name` through the imports of the file at `at`.
    fn find_in_import(
        &self,
        at: Self::Handle,
        package_alias: &str,
        name: &str,
    ) -> Option<Resolved<Self::Handle>>;

    /// Whether `at` is in the package the tests are written for.
    fn is_root_package(&self, at: Self::Handle) -> bool;

    /// Name used to qualify references into the package of `at`.
    fn package_name_for(&self, at: Self::Handle) -> &str;
}
