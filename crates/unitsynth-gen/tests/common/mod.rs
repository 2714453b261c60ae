//! Deterministic collaborators and model helpers shared by the integration
//! tests.

#![allow(dead_code)]

use unitsynth_gen::{IdentGenerator, ValuePolicy};
use unitsynth_syntax::{Expr, FileHandle, PackageIndex, TypeId, TypeSyntax};

/// `Name1`, `Name2`, ...
#[derive(Default)]
pub struct Counter(usize);

impl IdentGenerator for Counter {
    fn generate(&mut self) -> String {
        self.0 += 1;
        format!("Name{}", self.0)
    }
}

/// Fixed literals and sizes.
pub struct Scripted {
    pub array_len: usize,
    pub map_len: usize,
    pub string: &'static str,
    pub use_override: bool,
    pub override_index: usize,
}

impl Default for Scripted {
    fn default() -> Self {
        Self {
            array_len: 2,
            map_len: 2,
            string: "s",
            use_override: true,
            override_index: 0,
        }
    }
}

impl ValuePolicy for Scripted {
    fn any_type(&mut self) -> String {
        "int".to_string()
    }

    fn array_len(&mut self, bound: Option<usize>) -> usize {
        bound.map_or(self.array_len, |b| b.min(self.array_len))
    }

    fn map_len(&mut self) -> usize {
        self.map_len
    }

    fn basic_literal(&mut self, ty: &str) -> Expr {
        match ty {
            "string" => Expr::Lit(format!("\"{}\"", self.string)),
            "bool" => Expr::lit("true"),
            _ => Expr::convert(TypeSyntax::name(ty), Expr::lit("1")),
        }
    }

    fn error_value(&mut self) -> Expr {
        Expr::convert(TypeSyntax::name("error"), Expr::lit("nil"))
    }

    fn use_override(&mut self) -> bool {
        self.use_override
    }

    fn override_index(&mut self, _len: usize) -> usize {
        self.override_index
    }
}

/// Index with a single root package `app` holding one file `app.go` with
/// the given type and function declarations, plus a `geo` package.
pub fn index(types: &str, functions: &str) -> PackageIndex {
    let json = format!(
        r#"{{
            "root": "example.com/app",
            "packages": [
                {{
                    "path": "example.com/app",
                    "name": "app",
                    "files": [{{
                        "name": "app.go",
                        "imports": [{{"alias": "g", "path": "example.com/geo"}}],
                        "types": [{types}],
                        "functions": [{functions}]
                    }}]
                }},
                {{
                    "path": "example.com/geo",
                    "name": "geo",
                    "files": [{{
                        "name": "point.go",
                        "types": [
                            {{"name": "Point", "type": {{"struct": {{"fields": [
                                {{"names": ["X", "Y"], "type": {{"ident": "float64"}}}},
                                {{"names": ["cache"], "type": {{"ident": "int"}}}}
                            ]}}}}}},
                            {{"name": "Unit", "type": {{"ident": "string"}}}},
                            {{"name": "Segment", "type": {{"struct": {{"fields": [
                                {{"names": ["From"], "type": {{"ident": "Point"}}}},
                                {{"names": ["Tag"], "type": {{"ident": "Unit"}}}}
                            ]}}}}}},
                            {{"name": "Shape", "type": {{"interface": {{"elems": [
                                {{"method": {{"name": "Area", "results": [{{"type": {{"ident": "float64"}}}}]}}}}
                            ]}}}}}}
                        ]
                    }}]
                }}
            ]
        }}"#
    );
    PackageIndex::from_json(&json).expect("valid model")
}

pub fn app(index: &PackageIndex) -> FileHandle {
    index
        .root_files()
        .next()
        .map(|(handle, _)| handle)
        .expect("root file")
}

/// Type of the first parameter of `func` in `app.go`.
pub fn param_type(index: &PackageIndex, func: &str) -> TypeId {
    let file = index.file(app(index));
    file.functions
        .iter()
        .find(|f| f.name == func)
        .and_then(|f| f.sig.params.first())
        .map(|p| p.ty)
        .expect("function with a parameter")
}
