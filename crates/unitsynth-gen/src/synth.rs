// crates/unitsynth-gen/src/synth.rs
//
// Recursive value synthesis for a type expression.
//
// `Synthesizer::synthesize` dispatches on the type node and returns a
// `SynthesisResult`: the value expression plus the statements that must run
// before it, the top-level declarations it relies on, and the channels it
// created. Recursion through named types is bounded by the `CycleInfo`
// threaded through the `SynthesisContext`.
//
// Failures never abort: an unresolvable name or a type with no literal form
// logs a warning and yields `SynthesisResult::empty()`. Consumers that need
// a value anyway (pointers, return lists, test inputs) fall back to the zero
// value of the type.

use rustc_hash::{FxHashMap, FxHashSet};
use unitsynth_syntax::types::{is_any_type, is_basic_type, is_error_type};
use unitsynth_syntax::{
    ArrayLen, ChanDir, DeclId, Element, Expr, Field, Signature, Stmt, StructType, SymbolResolver,
    TypeArena, TypeExpr, TypeId, TypeSyntax,
};

use crate::cycle::{CycleInfo, Entry};
use crate::names::{IdentGenerator, is_exported, lower_first};
use crate::options::DEFAULT_MAX_RECURSION;
use crate::policy::ValuePolicy;
use crate::qualify;
use crate::result::SynthesisResult;

/// Where a value is being synthesized.
pub struct SynthesisContext<'c, H> {
    /// Name of the variable or field receiving the value.
    pub var_name: String,
    /// Location whose scope resolves bare names.
    pub handle: H,
    pub cycle: &'c mut CycleInfo,
}

impl<'c, H: Copy> SynthesisContext<'c, H> {
    pub fn new(var_name: impl Into<String>, handle: H, cycle: &'c mut CycleInfo) -> Self {
        Self {
            var_name: var_name.into(),
            handle,
            cycle,
        }
    }

    /// Same location and cycle state, different receiving variable.
    pub fn with_var(&mut self, var_name: impl Into<String>) -> SynthesisContext<'_, H> {
        SynthesisContext {
            var_name: var_name.into(),
            handle: self.handle,
            cycle: &mut *self.cycle,
        }
    }

    /// Continue in the scope of another file.
    pub fn with_handle(&mut self, handle: H) -> SynthesisContext<'_, H> {
        SynthesisContext {
            var_name: self.var_name.clone(),
            handle,
            cycle: &mut *self.cycle,
        }
    }

    pub fn reborrow(&mut self) -> SynthesisContext<'_, H> {
        self.with_handle(self.handle)
    }
}

/// Builds values for type expressions resolved through `R`.
pub struct Synthesizer<'a, R: SymbolResolver> {
    pub(crate) resolver: &'a R,
    pub(crate) policy: &'a mut dyn ValuePolicy,
    pub(crate) names: &'a mut dyn IdentGenerator,
    pub(crate) max_recursion: usize,
    /// Constructibility verdicts per (type node, location).
    pub(crate) feasibility: FxHashMap<(TypeId, R::Handle), bool>,
}

impl<'a, R: SymbolResolver> Synthesizer<'a, R> {
    pub fn new(
        resolver: &'a R,
        policy: &'a mut dyn ValuePolicy,
        names: &'a mut dyn IdentGenerator,
    ) -> Self {
        Self {
            resolver,
            policy,
            names,
            max_recursion: DEFAULT_MAX_RECURSION,
            feasibility: FxHashMap::default(),
        }
    }

    pub fn with_max_recursion(mut self, max_recursion: usize) -> Self {
        self.max_recursion = max_recursion;
        self
    }

    pub fn resolver(&self) -> &'a R {
        self.resolver
    }

    pub fn policy(&mut self) -> &mut dyn ValuePolicy {
        &mut *self.policy
    }

    /// Fresh identifier from the name generator.
    pub fn fresh_ident(&mut self) -> String {
        self.names.generate()
    }

    pub(crate) fn arena(&self) -> &'a TypeArena {
        self.resolver.arena()
    }

    pub(crate) fn type_syntax(&self, ty: TypeId, at: R::Handle) -> TypeSyntax {
        qualify::type_syntax(self.resolver, ty, at)
    }

    /// `*new(T)`, the zero value of `ty`.
    pub fn zero_value(&self, ty: TypeId, at: R::Handle) -> Expr {
        zero_value_of(self.type_syntax(ty, at))
    }

    pub fn synthesize(
        &mut self,
        ty: TypeId,
        mut ctx: SynthesisContext<'_, R::Handle>,
    ) -> SynthesisResult {
        let arena = self.arena();
        match arena.get(ty) {
            TypeExpr::Ident(name) => self.ident(name, ctx),
            TypeExpr::Named(decl) => self.named(*decl, ctx),
            TypeExpr::Qualified { package, name } => self.qualified(package, name, ctx),
            TypeExpr::Pointer(elem) => self.pointer(*elem, ctx),
            TypeExpr::Array { len, elem } => self.array(ty, len, *elem, ctx),
            TypeExpr::Map { key, value } => self.map(ty, *key, *value, ctx),
            TypeExpr::Chan { dir, .. } => self.chan(ty, *dir, ctx),
            TypeExpr::Func(sig) => self.func_literal(sig, ctx),
            TypeExpr::Interface(iface) => self.interface(ty, iface, ctx),
            TypeExpr::Struct(st) => {
                let syntax = self.type_syntax(ty, ctx.handle);
                self.struct_fields(syntax, st, ctx)
            }
            // A variadic parameter takes one value of its element type.
            TypeExpr::Variadic(elem) => self.synthesize(*elem, ctx.reborrow()),
        }
    }

    fn ident(&mut self, name: &str, mut ctx: SynthesisContext<'_, R::Handle>) -> SynthesisResult {
        if is_basic_type(name) {
            return SynthesisResult::of(self.policy.basic_literal(name));
        }
        if is_any_type(name) {
            return self.empty_interface();
        }
        if is_error_type(name) {
            return SynthesisResult::of(self.policy.error_value());
        }
        match self.resolver.find_in_same_package(ctx.handle, name) {
            Some(found) => self.named(found.decl, ctx.with_handle(found.handle)),
            None => {
                tracing::warn!(name, "type not found in package");
                SynthesisResult::empty()
            }
        }
    }

    pub(crate) fn empty_interface(&mut self) -> SynthesisResult {
        let ty = self.policy.any_type();
        SynthesisResult::of(self.policy.basic_literal(&ty))
    }

    /// Value of a declared type, `decl` scoped at `ctx.handle`.
    fn named(&mut self, decl: DeclId, mut ctx: SynthesisContext<'_, R::Handle>) -> SynthesisResult {
        let arena = self.arena();
        let decl = arena.decl(decl);
        let Some(body) = decl.ty else {
            tracing::warn!(name = %decl.name, "declaration has no body");
            return SynthesisResult::empty();
        };
        let syntax = qualify::type_name(self.resolver, &decl.name, ctx.handle);
        let body_node = arena.get(body);
        if let TypeExpr::Struct(st) = body_node {
            return self.named_struct(body, &decl.name, syntax, st, ctx);
        }
        if self.is_ungeneratable_interface(body, ctx.handle) {
            tracing::debug!(name = %decl.name, "interface cannot be implemented, using nil");
            return SynthesisResult::of(interface_nil_stub(syntax));
        }
        if self.is_ungeneratable_func(body, ctx.handle) {
            tracing::debug!(name = %decl.name, "function type cannot be built, using nil");
            return SynthesisResult::of(func_nil_stub(syntax));
        }
        if matches!(body_node, TypeExpr::Interface(_)) {
            return self.synthesize(body, ctx.reborrow());
        }
        let key = syntax.to_string();
        if !ctx.cycle.enter_named(&key, self.max_recursion) {
            tracing::debug!(ty = %key, "recursion bound reached, using bounded value");
            return SynthesisResult::of(self.bounded_value(body, syntax));
        }
        let mut result = self.synthesize(body, ctx.reborrow());
        ctx.cycle.leave_named(&key);
        if result.expr.is_empty() {
            return result;
        }
        result.expr = Expr::convert(syntax, std::mem::take(&mut result.expr));
        result
    }

    /// Leaf value of a named type whose body refers back to itself.
    fn bounded_value(&self, body: TypeId, syntax: TypeSyntax) -> Expr {
        match self.arena().get(body) {
            TypeExpr::Func(_)
            | TypeExpr::Pointer(_)
            | TypeExpr::Map { .. }
            | TypeExpr::Chan { .. }
            | TypeExpr::Array {
                len: ArrayLen::Slice,
                ..
            } => Expr::convert(syntax, Expr::lit("nil")),
            TypeExpr::Array { .. } => Expr::Composite {
                ty: syntax,
                elems: Vec::new(),
            },
            _ => zero_value_of(syntax),
        }
    }

    fn named_struct(
        &mut self,
        body: TypeId,
        name: &str,
        syntax: TypeSyntax,
        st: &StructType,
        mut ctx: SynthesisContext<'_, R::Handle>,
    ) -> SynthesisResult {
        let key = match &syntax {
            TypeSyntax::Qualified { package, name } => format!("{package}.{name}"),
            _ => name.to_string(),
        };
        let skeleton = Expr::Composite {
            ty: syntax.clone(),
            elems: Vec::new(),
        };
        if let Entry::Reuse(memo) =
            ctx.cycle
                .enter_struct(body, &key, skeleton, self.max_recursion)
        {
            tracing::debug!(ty = %key, "recursion bound reached, reusing skeleton");
            return SynthesisResult::of(memo);
        }
        self.struct_fields(syntax, st, ctx.reborrow())
    }

    /// Composite literal `ty{Field: value, ...}` for the fields of `st`.
    fn struct_fields(
        &mut self,
        ty: TypeSyntax,
        st: &StructType,
        mut ctx: SynthesisContext<'_, R::Handle>,
    ) -> SynthesisResult {
        let root = self.resolver.is_root_package(ctx.handle);
        let mut result = SynthesisResult::empty();
        let mut elems = Vec::new();
        for field in &st.fields {
            let embedded;
            let names: &[String] = if field.names.is_empty() {
                let Some(name) = self.embedded_name(field.ty) else {
                    tracing::warn!("embedded field without a type name");
                    continue;
                };
                embedded = [name];
                &embedded
            } else {
                &field.names
            };
            for name in names {
                if !root && !is_exported(name) {
                    continue;
                }
                if self.is_ungeneratable_func(field.ty, ctx.handle) {
                    tracing::debug!(field = %name, "skipping function field");
                    continue;
                }
                let value = result.absorb(self.synthesize(field.ty, ctx.with_var(name.clone())));
                if value.is_empty() {
                    continue;
                }
                elems.push(Element::KeyValue {
                    key: Expr::ident(name.clone()),
                    value,
                });
            }
        }
        result.with_expr(Expr::Composite { ty, elems })
    }

    /// Field name of an embedded field: its type name without pointer or
    /// package qualifier.
    fn embedded_name(&self, ty: TypeId) -> Option<String> {
        let arena = self.arena();
        match arena.get(ty) {
            TypeExpr::Ident(name) | TypeExpr::Qualified { name, .. } => Some(name.clone()),
            TypeExpr::Named(decl) => Some(arena.decl(*decl).name.clone()),
            TypeExpr::Pointer(elem) => self.embedded_name(*elem),
            _ => None,
        }
    }

    fn qualified(
        &mut self,
        package: &str,
        name: &str,
        mut ctx: SynthesisContext<'_, R::Handle>,
    ) -> SynthesisResult {
        let Some(found) = self.resolver.find_in_import(ctx.handle, package, name) else {
            tracing::warn!(package, name, "imported type not found");
            return SynthesisResult::empty();
        };
        let written = TypeSyntax::Qualified {
            package: package.to_string(),
            name: name.to_string(),
        };
        let Some(body) = self.arena().decl(found.decl).ty else {
            tracing::warn!(package, name, "imported declaration has no body");
            return SynthesisResult::empty();
        };
        if self.is_ungeneratable_interface(body, found.handle) {
            return SynthesisResult::of(interface_nil_stub(written));
        }
        if self.is_ungeneratable_func(body, found.handle) {
            return SynthesisResult::of(func_nil_stub(written));
        }
        let mut result = self.named(found.decl, ctx.with_handle(found.handle));
        // Refer to the package the way the importing file does, nested
        // references included.
        let declared = self.resolver.package_name_for(found.handle);
        if declared != package {
            result.rename_qualifier(declared, package);
        }
        result
    }

    fn pointer(&mut self, elem: TypeId, mut ctx: SynthesisContext<'_, R::Handle>) -> SynthesisResult {
        let temp = format!("{}{}", lower_first(&ctx.var_name), self.names.generate());
        let mut result = SynthesisResult::empty();
        let mut value = result.absorb(self.synthesize(elem, ctx.with_var(temp.clone())));
        if value.is_empty() {
            value = self.zero_value(elem, ctx.handle);
        }
        result.statements.push(Stmt::define(temp.clone(), value));
        result.with_expr(Expr::addr_of(Expr::Ident(temp)))
    }

    fn array(
        &mut self,
        ty: TypeId,
        len: &ArrayLen,
        elem: TypeId,
        mut ctx: SynthesisContext<'_, R::Handle>,
    ) -> SynthesisResult {
        let count = match len {
            ArrayLen::Slice => self.policy.array_len(None),
            ArrayLen::Fixed(bound) => self.policy.array_len(Some(*bound)),
            // Unknown bound; an empty literal is valid for any length.
            ArrayLen::Const(_) => 0,
        };
        let mut result = SynthesisResult::empty();
        let mut elems = Vec::with_capacity(count);
        for _ in 0..count {
            let value = result.absorb(self.synthesize(elem, ctx.reborrow()));
            if !value.is_empty() {
                elems.push(Element::Value(value));
            }
        }
        let ty = self.type_syntax(ty, ctx.handle);
        result.with_expr(Expr::Composite { ty, elems })
    }

    fn map(
        &mut self,
        ty: TypeId,
        key: TypeId,
        value: TypeId,
        mut ctx: SynthesisContext<'_, R::Handle>,
    ) -> SynthesisResult {
        let attempts = self.policy.map_len();
        let mut result = SynthesisResult::empty();
        let mut seen = FxHashSet::default();
        let mut elems = Vec::new();
        for _ in 0..attempts {
            let key_result = self.synthesize(key, ctx.reborrow());
            if key_result.expr.is_empty() {
                continue;
            }
            let text = key_result.expr.to_string();
            if !seen.insert(text) {
                tracing::debug!(key = %key_result.expr, "dropping duplicate map key");
                continue;
            }
            let key_expr = result.absorb(key_result);
            let value_expr = result.absorb(self.synthesize(value, ctx.reborrow()));
            if value_expr.is_empty() {
                continue;
            }
            elems.push(Element::KeyValue {
                key: key_expr,
                value: value_expr,
            });
        }
        let ty = self.type_syntax(ty, ctx.handle);
        result.with_expr(Expr::Composite { ty, elems })
    }

    fn chan(
        &mut self,
        ty: TypeId,
        dir: ChanDir,
        ctx: SynthesisContext<'_, R::Handle>,
    ) -> SynthesisResult {
        let ident = lower_first(&self.names.generate());
        let make = Expr::call(
            Expr::ident("make"),
            vec![Expr::Type(self.type_syntax(ty, ctx.handle))],
        );
        let mut result = SynthesisResult::empty();
        result.statements.push(Stmt::define(ident.clone(), make));
        if dir.can_send() {
            result.channels.push(ident.clone());
        }
        result.with_expr(Expr::Ident(ident))
    }

    /// `func(params) results { ...; return ... }`
    fn func_literal(
        &mut self,
        sig: &Signature,
        mut ctx: SynthesisContext<'_, R::Handle>,
    ) -> SynthesisResult {
        let syntax = qualify::func_syntax(self.resolver, sig, ctx.handle);
        let body = self.return_list(&sig.results, ctx.reborrow());
        // Channels made inside the literal are out of the caller's scope.
        SynthesisResult {
            expr: Expr::FuncLit {
                sig: syntax,
                body: body.statements,
            },
            statements: Vec::new(),
            declarations: body.declarations,
            channels: Vec::new(),
        }
    }

    /// Statements binding one fresh identifier per result followed by
    /// `return` of those identifiers.
    pub(crate) fn return_list(
        &mut self,
        results: &[Field],
        mut ctx: SynthesisContext<'_, R::Handle>,
    ) -> SynthesisResult {
        let mut result = SynthesisResult::empty();
        let mut idents = Vec::new();
        for field in results {
            for _ in 0..field.arity() {
                let ident = lower_first(&self.names.generate());
                let mut value =
                    result.absorb(self.synthesize(field.ty, ctx.with_var(ident.clone())));
                if value.is_empty() {
                    value = self.zero_value(field.ty, ctx.handle);
                }
                result.statements.push(Stmt::define(ident.clone(), value));
                idents.push(Expr::Ident(ident));
            }
        }
        result.statements.push(Stmt::Return(idents));
        result
    }
}

/// `func() T { return nil }()`
pub fn interface_nil_stub(ty: TypeSyntax) -> Expr {
    let sig = unitsynth_syntax::FuncSyntax {
        params: Vec::new(),
        results: vec![unitsynth_syntax::ParamSyntax {
            names: Vec::new(),
            ty,
        }],
    };
    Expr::call(
        Expr::FuncLit {
            sig,
            body: vec![Stmt::Return(vec![Expr::lit("nil")])],
        },
        Vec::new(),
    )
}

/// `*new(T)`
fn zero_value_of(ty: TypeSyntax) -> Expr {
    Expr::call(Expr::ident("*new"), vec![Expr::Type(ty)])
}

/// `T(nil)`
pub fn func_nil_stub(ty: TypeSyntax) -> Expr {
    Expr::convert(ty, Expr::lit("nil"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nil_stubs_print_as_go() {
        assert_eq!(
            interface_nil_stub(TypeSyntax::name("Shape")).to_string(),
            "func() Shape {\n\treturn nil\n}()"
        );
        assert_eq!(
            func_nil_stub(TypeSyntax::Qualified {
                package: "http".to_string(),
                name: "HandlerFunc".to_string(),
            })
            .to_string(),
            "http.HandlerFunc(nil)"
        );
    }
}
