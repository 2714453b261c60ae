// crates/unitsynth-gen/src/testcase.rs
//! Per-function test-case assembly: input values for the receiver and the
//! parameters, the call under test and the binding of its results.

use std::collections::BTreeMap;

use unitsynth_syntax::{
    AssignKind, Decl, Expr, Field, FuncDecl, Printer, Stmt, SymbolResolver, TypeExpr, TypeId,
};

use crate::cycle::CycleInfo;
use crate::names::{lower_first, upper_first};
use crate::options::Options;
use crate::overrides::OverrideStore;
use crate::synth::{SynthesisContext, Synthesizer};

/// Inputs and call of one synthesized test.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TestCase {
    pub func_name: String,
    /// Identifier bound to the receiver, for methods.
    pub receiver: Option<String>,
    /// Identifiers bound to the arguments, in call order.
    pub params: Vec<String>,
    /// Input statements, ending with the bindings of `receiver` and `params`.
    pub statements: Vec<Stmt>,
    pub declarations: Vec<Decl>,
    /// The call expression.
    pub call: Expr,
    /// `a, b := call` binding results, if the function returns anything.
    pub result_call: Option<Stmt>,
    /// Identifiers bound to results; `_` for function and channel results.
    pub results: Vec<String>,
    pub channels: Vec<String>,
}

impl TestCase {
    /// The statement invoking the function under test.
    pub fn call_stmt(&self) -> Stmt {
        self.result_call
            .clone()
            .unwrap_or_else(|| Stmt::Expr(self.call.clone()))
    }

    /// Declarations, then input statements, then the call, one per line.
    pub fn render(&self, printer: &dyn Printer) -> String {
        let mut out = String::new();
        for decl in &self.declarations {
            out.push_str(&printer.decl(decl));
            out.push_str("\n\n");
        }
        for stmt in &self.statements {
            out.push_str(&printer.stmt(stmt));
            out.push('\n');
        }
        out.push_str(&printer.stmt(&self.call_stmt()));
        out.push('\n');
        out
    }
}

/// Test cases of one source file, keyed by `Prefix` + function name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct File {
    pub package_name: String,
    pub file_name: String,
    pub test_cases: BTreeMap<String, Vec<TestCase>>,
}

impl File {
    /// `shape_utils.go` -> `ShapeUtils`
    pub fn suite_name(&self) -> String {
        let stem = self
            .file_name
            .rsplit_once('.')
            .map_or(self.file_name.as_str(), |(stem, _)| stem);
        stem.split(|c: char| !c.is_ascii_alphanumeric())
            .map(upper_first)
            .collect()
    }
}

/// Drives synthesis over the functions of a file.
pub struct Generator<'a, R: SymbolResolver> {
    synth: Synthesizer<'a, R>,
    overrides: &'a dyn OverrideStore,
    test_cases_per_func: usize,
}

impl<'a, R: SymbolResolver> Generator<'a, R> {
    pub fn new(synth: Synthesizer<'a, R>, overrides: &'a dyn OverrideStore, options: &Options) -> Self {
        Self {
            synth: synth.with_max_recursion(options.max_recursion),
            overrides,
            test_cases_per_func: options.test_cases_per_func,
        }
    }

    /// Test cases for every eligible function of a file, or `None` when the
    /// file is ignored.
    #[tracing::instrument(skip(self, functions, at), fields(functions = functions.len()))]
    pub fn generate_file(
        &mut self,
        package_name: &str,
        file_name: &str,
        functions: &[FuncDecl],
        at: R::Handle,
    ) -> Option<File> {
        if self.overrides.ignores_file(file_name) {
            tracing::debug!("file ignored");
            return None;
        }
        let mut file = File {
            package_name: package_name.to_string(),
            file_name: file_name.to_string(),
            test_cases: BTreeMap::new(),
        };
        for func in functions {
            if func.name == "main" || self.overrides.ignores_function(file_name, &func.name) {
                continue;
            }
            let key = format!("{}{}", self.test_case_prefix(func, at), func.name);
            let cases = (0..self.test_cases_per_func)
                .map(|_| self.test_case(file_name, func, at))
                .collect();
            file.test_cases.insert(key, cases);
        }
        Some(file)
    }

    /// One test case for `func`, declared in `file_name` at `at`.
    #[tracing::instrument(skip(self, func, at), fields(func = %func.name))]
    pub fn test_case(&mut self, file_name: &str, func: &FuncDecl, at: R::Handle) -> TestCase {
        let overrides = self.overrides;
        let mut case = TestCase {
            func_name: func.name.clone(),
            receiver: None,
            params: Vec::new(),
            statements: Vec::new(),
            declarations: Vec::new(),
            call: Expr::Empty,
            result_call: None,
            results: Vec::new(),
            channels: Vec::new(),
        };

        if let Some(recv) = &func.receiver {
            let values = overrides.receiver_values(file_name, &func.name);
            let ident = self.input(recv.ty, values, at, &mut case);
            case.receiver = Some(ident);
        }
        for field in &func.sig.params {
            if field.names.is_empty() {
                let ident = self.input(field.ty, None, at, &mut case);
                case.params.push(ident);
            }
            for name in &field.names {
                let values = overrides.param_values(file_name, &func.name, name);
                let ident = self.input(field.ty, values, at, &mut case);
                case.params.push(ident);
            }
        }

        let callee = match &case.receiver {
            Some(recv) => Expr::ident(format!("{recv}.{}", func.name)),
            None => Expr::ident(func.name.clone()),
        };
        case.call = Expr::call(callee, case.params.iter().cloned().map(Expr::Ident).collect());
        case.results = self.result_idents(&func.sig.results, at);
        if !case.results.is_empty() {
            let kind = if case.results.iter().all(|r| r == "_") {
                AssignKind::Assign
            } else {
                AssignKind::Define
            };
            case.result_call = Some(Stmt::Assign {
                lhs: case.results.iter().cloned().map(Expr::Ident).collect(),
                rhs: vec![case.call.clone()],
                kind,
            });
        }
        case
    }

    /// Bind a fresh identifier to an override or a synthesized value of `ty`.
    fn input(
        &mut self,
        ty: TypeId,
        values: Option<&[String]>,
        at: R::Handle,
        case: &mut TestCase,
    ) -> String {
        let ident = lower_first(&self.synth.fresh_ident());
        if let Some(values) = values
            && !values.is_empty()
            && self.synth.policy().use_override()
        {
            let index = self
                .synth
                .policy()
                .override_index(values.len())
                .min(values.len() - 1);
            case.statements
                .push(Stmt::define(ident.clone(), Expr::lit(values[index].clone())));
            return ident;
        }

        let mut cycle = CycleInfo::new();
        let mut result = self
            .synth
            .synthesize(ty, SynthesisContext::new(ident.clone(), at, &mut cycle));
        if result.expr.is_empty() {
            tracing::warn!(ident = %ident, "no value synthesized, using zero value");
            result.expr = self.synth.zero_value(ty, at);
        }
        case.statements.append(&mut result.statements);
        case.declarations.append(&mut result.declarations);
        case.channels.append(&mut result.channels);
        case.statements.push(Stmt::define(ident.clone(), result.expr));
        ident
    }

    fn result_idents(&mut self, results: &[Field], at: R::Handle) -> Vec<String> {
        let mut idents = Vec::new();
        for field in results {
            for _ in 0..field.arity() {
                if self.binds_to_blank(field.ty, at) {
                    idents.push("_".to_string());
                } else {
                    idents.push(lower_first(&self.synth.fresh_ident()));
                }
            }
        }
        idents
    }

    /// Function and channel results cannot be compared and are discarded.
    fn binds_to_blank(&self, ty: TypeId, at: R::Handle) -> bool {
        let arena = self.synth.resolver().arena();
        let ty = self.synth.underlying(ty, at).map_or(ty, |(ty, _)| ty);
        matches!(arena.get(ty), TypeExpr::Func(_) | TypeExpr::Chan { .. })
    }

    /// Receiver base type name, or its package qualifier. Empty for free
    /// functions, so `F` and `T.F` get distinct keys.
    pub fn test_case_prefix(&mut self, func: &FuncDecl, at: R::Handle) -> String {
        let arena = self.synth.resolver().arena();
        let Some(mut ty) = func.receiver.as_ref().map(|recv| recv.ty) else {
            return String::new();
        };
        loop {
            match arena.get(ty) {
                TypeExpr::Pointer(elem) => ty = *elem,
                TypeExpr::Ident(name) => return name.clone(),
                TypeExpr::Named(decl) => return arena.decl(*decl).name.clone(),
                TypeExpr::Qualified { package, .. } => return package.clone(),
                _ => {
                    tracing::warn!(?at, "unexpected receiver type");
                    return lower_first(&self.synth.fresh_ident());
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn file(name: &str) -> File {
        File {
            file_name: name.to_string(),
            ..File::default()
        }
    }

    #[test]
    fn suite_name_title_cases_stem_parts() {
        assert_eq!(file("shape_utils.go").suite_name(), "ShapeUtils");
        assert_eq!(file("my-file2.go").suite_name(), "MyFile2");
        assert_eq!(file("plain").suite_name(), "Plain");
    }
}
