// crates/unitsynth-gen/src/stubs.rs
//
// Interface implementations and the constructibility check behind nil stubs.
//
// A non-empty interface is satisfied by a fresh empty struct declared in the
// test file, with one method per element of the method set. Each method body
// synthesizes its results and returns them. Embedded interfaces contribute
// their methods recursively; the predeclared `error` contributes
// `Error() string`.
//
// Types whose method set or signature mentions something that cannot be
// resolved (unknown names, missing imports, embedding a non-interface) get a
// nil stub instead of an implementation.

use rustc_hash::FxHashSet;
use unitsynth_syntax::types::{is_error_type, is_predeclared};
use unitsynth_syntax::{
    Decl, Expr, FuncSyntax, InterfaceElem, InterfaceType, ParamSyntax, Receiver, Signature, Stmt,
    SymbolResolver, TypeExpr, TypeId, TypeSyntax,
};

use crate::cycle::Entry;
use crate::names::{lower_first, upper_first};
use crate::qualify;
use crate::result::SynthesisResult;
use crate::synth::{SynthesisContext, Synthesizer};

/// Receiver name of synthesized methods.
const RECEIVER: &str = "s";

impl<'a, R: SymbolResolver> Synthesizer<'a, R> {
    /// Follow named references from `ty` to the node they denote.
    ///
    /// Predeclared names resolve to themselves. Returns `None` for unknown
    /// names, missing imports, undefined declarations and reference loops.
    pub(crate) fn underlying(&self, ty: TypeId, at: R::Handle) -> Option<(TypeId, R::Handle)> {
        let arena = self.arena();
        let mut current = (ty, at);
        let mut seen = FxHashSet::default();
        while seen.insert(current) {
            let (ty, at) = current;
            let found = match arena.get(ty) {
                TypeExpr::Ident(name) if is_predeclared(name) => return Some(current),
                TypeExpr::Ident(name) => self.resolver.find_in_same_package(at, name)?,
                TypeExpr::Qualified { package, name } => {
                    self.resolver.find_in_import(at, package, name)?
                }
                TypeExpr::Named(decl) => {
                    current = (arena.decl(*decl).ty?, at);
                    continue;
                }
                _ => return Some(current),
            };
            current = (arena.decl(found.decl).ty?, found.handle);
        }
        None
    }

    /// `ty` is an interface some part of whose method set cannot be built.
    pub(crate) fn is_ungeneratable_interface(&mut self, ty: TypeId, at: R::Handle) -> bool {
        match self.underlying(ty, at) {
            Some((ty, at)) if matches!(self.arena().get(ty), TypeExpr::Interface(_)) => {
                !self.is_constructible(ty, at)
            }
            _ => false,
        }
    }

    /// `ty` is a function type some parameter or result of which cannot be
    /// built.
    pub(crate) fn is_ungeneratable_func(&mut self, ty: TypeId, at: R::Handle) -> bool {
        match self.underlying(ty, at) {
            Some((ty, at)) if matches!(self.arena().get(ty), TypeExpr::Func(_)) => {
                !self.is_constructible(ty, at)
            }
            _ => false,
        }
    }

    fn is_constructible(&mut self, ty: TypeId, at: R::Handle) -> bool {
        if let Some(&known) = self.feasibility.get(&(ty, at)) {
            return known;
        }
        let verdict = self.check(ty, at, &mut FxHashSet::default());
        self.feasibility.insert((ty, at), verdict);
        verdict
    }

    /// Every name reachable from `ty` resolves. Revisiting a node counts as
    /// resolvable so recursive types terminate.
    fn check(
        &self,
        ty: TypeId,
        at: R::Handle,
        visited: &mut FxHashSet<(TypeId, R::Handle)>,
    ) -> bool {
        if !visited.insert((ty, at)) {
            return true;
        }
        let arena = self.arena();
        match arena.get(ty) {
            TypeExpr::Ident(_) | TypeExpr::Named(_) | TypeExpr::Qualified { .. } => {
                match self.underlying(ty, at) {
                    Some((resolved, _)) if resolved == ty => true,
                    Some((resolved, at)) => self.check(resolved, at, visited),
                    None => false,
                }
            }
            TypeExpr::Pointer(elem)
            | TypeExpr::Array { elem, .. }
            | TypeExpr::Chan { elem, .. }
            | TypeExpr::Variadic(elem) => self.check(*elem, at, visited),
            TypeExpr::Map { key, value } => {
                self.check(*key, at, visited) && self.check(*value, at, visited)
            }
            TypeExpr::Func(sig) => self.check_signature(sig, at, visited),
            TypeExpr::Struct(st) => st.fields.iter().all(|f| self.check(f.ty, at, visited)),
            TypeExpr::Interface(iface) => iface.elems.iter().all(|elem| match elem {
                InterfaceElem::Method { sig, .. } => self.check_signature(sig, at, visited),
                InterfaceElem::Embedded(embedded) => match self.underlying(*embedded, at) {
                    Some((resolved, _)) if self.is_error_ident(resolved) => true,
                    Some((resolved, at)) => {
                        matches!(arena.get(resolved), TypeExpr::Interface(_))
                            && self.check(resolved, at, visited)
                    }
                    None => false,
                },
            }),
        }
    }

    fn check_signature(
        &self,
        sig: &Signature,
        at: R::Handle,
        visited: &mut FxHashSet<(TypeId, R::Handle)>,
    ) -> bool {
        sig.params
            .iter()
            .chain(&sig.results)
            .all(|f| self.check(f.ty, at, visited))
    }

    fn is_error_ident(&self, ty: TypeId) -> bool {
        matches!(self.arena().get(ty), TypeExpr::Ident(name) if is_error_type(name))
    }

    /// `&Impl{}` for a fresh `Impl` implementing `iface`, or the memoized
    /// implementation once the recursion bound is reached.
    pub(crate) fn interface(
        &mut self,
        ty: TypeId,
        iface: &InterfaceType,
        mut ctx: SynthesisContext<'_, R::Handle>,
    ) -> SynthesisResult {
        if iface.is_empty() {
            return self.empty_interface();
        }
        let impl_name = upper_first(&self.names.generate());
        let decl = Decl::Struct {
            name: impl_name.clone(),
        };
        if let Entry::Reuse(memo) = ctx.cycle.enter_interface(ty, decl.clone(), self.max_recursion)
        {
            tracing::debug!(ty = memo.name(), "recursion bound reached, reusing implementation");
            return SynthesisResult::of(instance(memo.name()));
        }
        let mut result = SynthesisResult::empty();
        result.declarations.push(decl);
        let mut methods = FxHashSet::default();
        let mut visited = FxHashSet::default();
        visited.insert((ty, ctx.handle));
        self.method_set(iface, &impl_name, &mut methods, &mut visited, ctx.reborrow(), &mut result);
        result.with_expr(instance(&impl_name))
    }

    /// Declare on `impl_name` every method of `iface` not declared yet.
    fn method_set(
        &mut self,
        iface: &InterfaceType,
        impl_name: &str,
        methods: &mut FxHashSet<String>,
        visited: &mut FxHashSet<(TypeId, R::Handle)>,
        mut ctx: SynthesisContext<'_, R::Handle>,
        result: &mut SynthesisResult,
    ) {
        for elem in &iface.elems {
            match elem {
                InterfaceElem::Method { name, sig } => {
                    if !methods.insert(name.clone()) {
                        continue;
                    }
                    let syntax = qualify::func_syntax(self.resolver, sig, ctx.handle);
                    let body = self.return_list(&sig.results, ctx.reborrow());
                    result.declarations.extend(body.declarations);
                    result
                        .declarations
                        .push(method(impl_name, name, syntax, body.statements));
                }
                InterfaceElem::Embedded(embedded) => {
                    let Some((resolved, at)) = self.underlying(*embedded, ctx.handle) else {
                        tracing::warn!("embedded interface not found");
                        continue;
                    };
                    if self.is_error_ident(resolved) {
                        if methods.insert("Error".to_string()) {
                            result.declarations.push(self.error_method(impl_name));
                        }
                        continue;
                    }
                    let TypeExpr::Interface(inner) = self.arena().get(resolved) else {
                        tracing::warn!("embedded element is not an interface");
                        continue;
                    };
                    if visited.insert((resolved, at)) {
                        self.method_set(
                            inner,
                            impl_name,
                            methods,
                            visited,
                            ctx.with_handle(at),
                            result,
                        );
                    }
                }
            }
        }
    }

    /// `Error() string`, contributed by an embedded `error`.
    fn error_method(&mut self, impl_name: &str) -> Decl {
        let ident = lower_first(&self.names.generate());
        let value = self.policy.basic_literal("string");
        let sig = FuncSyntax {
            params: Vec::new(),
            results: vec![ParamSyntax {
                names: Vec::new(),
                ty: TypeSyntax::name("string"),
            }],
        };
        let body = vec![
            Stmt::define(ident.clone(), value),
            Stmt::Return(vec![Expr::Ident(ident)]),
        ];
        method(impl_name, "Error", sig, body)
    }
}

fn instance(impl_name: &str) -> Expr {
    Expr::addr_of(Expr::Composite {
        ty: TypeSyntax::name(impl_name),
        elems: Vec::new(),
    })
}

fn method(impl_name: &str, name: &str, sig: FuncSyntax, body: Vec<Stmt>) -> Decl {
    Decl::Method {
        receiver: Receiver {
            name: RECEIVER.to_string(),
            ty: TypeSyntax::pointer(TypeSyntax::name(impl_name)),
        },
        name: name.to_string(),
        sig,
        body,
    }
}
