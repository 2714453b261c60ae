// crates/unitsynth-gen/src/cycle.rs
//
// Recursion bookkeeping for one synthesis session.
//
// Self-referential declarations (`type Node struct { Next *Node }`) have no
// base case, so every re-entry of a named struct or an interface is counted.
// The first entry memoizes a bare skeleton before recursing, which lets any
// deeper reference (including mutual recursion A -> B -> A) reuse it once the
// counter passes the bound.
//
// Other named types (`type stateFn func() stateFn`, `type List []List`) are
// tracked by nesting depth instead, so sibling values of a non-recursive
// named type never hit the bound.

use rustc_hash::FxHashMap;
use unitsynth_syntax::{Decl, Expr, TypeId};

#[derive(Debug, Default, Clone)]
pub struct CycleInfo {
    /// Entries per named struct, keyed by qualified type name.
    structs: FxHashMap<String, usize>,
    /// Entries per interface type node.
    interfaces: FxHashMap<TypeId, usize>,
    /// First bare composite literal built for a struct body.
    struct_memo: FxHashMap<TypeId, Expr>,
    /// First implementing-type declaration built for an interface.
    interface_memo: FxHashMap<TypeId, Decl>,
    /// Current nesting depth per named non-struct type, keyed by qualified
    /// type name.
    named: FxHashMap<String, usize>,
}

/// Outcome of entering a struct or interface.
#[derive(Debug)]
pub enum Entry<T> {
    /// Synthesize the body.
    Expand,
    /// Bound exceeded; reuse this memo instead.
    Reuse(T),
}

impl CycleInfo {
    pub fn new() -> Self {
        Self::default()
    }

    /// Enter a named struct. `skeleton` is memoized on first entry.
    ///
    /// The memo is written before the counter is checked, and reused only
    /// when it already existed before this call.
    pub fn enter_struct(
        &mut self,
        body: TypeId,
        name: &str,
        skeleton: Expr,
        max_recursion: usize,
    ) -> Entry<Expr> {
        let existing = self.struct_memo.get(&body).cloned();
        if existing.is_none() {
            self.struct_memo.insert(body, skeleton);
        }
        let count = self.structs.entry(name.to_string()).or_insert(0);
        *count += 1;
        match existing {
            Some(memo) if *count > max_recursion => Entry::Reuse(memo),
            _ => Entry::Expand,
        }
    }

    /// Enter an interface. `decl` is memoized on first entry.
    pub fn enter_interface(
        &mut self,
        interface: TypeId,
        decl: Decl,
        max_recursion: usize,
    ) -> Entry<Decl> {
        let count = self.interfaces.entry(interface).or_insert(0);
        *count += 1;
        let count = *count;
        match self.interface_memo.get(&interface) {
            Some(memo) if count > max_recursion => Entry::Reuse(memo.clone()),
            Some(_) => Entry::Expand,
            None => {
                self.interface_memo.insert(interface, decl);
                Entry::Expand
            }
        }
    }

    /// Enter a named non-struct type. Returns `false`, leaving the depth
    /// unchanged, when the type is already nested `max_recursion` deep. The
    /// outermost entry always succeeds.
    pub fn enter_named(&mut self, name: &str, max_recursion: usize) -> bool {
        let depth = self.named.entry(name.to_string()).or_insert(0);
        if *depth >= max_recursion.max(1) {
            return false;
        }
        *depth += 1;
        true
    }

    /// Leave a type entered with [`CycleInfo::enter_named`].
    pub fn leave_named(&mut self, name: &str) {
        if let Some(depth) = self.named.get_mut(name) {
            *depth = depth.saturating_sub(1);
        }
    }

    pub fn named_depth(&self, name: &str) -> usize {
        self.named.get(name).copied().unwrap_or(0)
    }

    pub fn struct_count(&self, name: &str) -> usize {
        self.structs.get(name).copied().unwrap_or(0)
    }

    pub fn interface_count(&self, interface: TypeId) -> usize {
        self.interfaces.get(&interface).copied().unwrap_or(0)
    }
}
