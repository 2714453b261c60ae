// crates/unitsynth-syntax/src/ast.rs
//
// Output syntax produced by the synthesizer and rendered by a `Printer`.
//
// These nodes own their data (no arena): they are built once, moved into
// test cases, and printed. `TypeSyntax` is the package-qualified printable
// form of a `TypeExpr` as seen from the test file.

use std::fmt;

use crate::printer::{GoPrinter, Printer};
use crate::types::ChanDir;

/// Printable type reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeSyntax {
    Name(String),
    Qualified {
        package: String,
        name: String,
    },
    Pointer(Box<TypeSyntax>),
    /// `len: None` is a slice.
    Array {
        len: Option<String>,
        elem: Box<TypeSyntax>,
    },
    Map {
        key: Box<TypeSyntax>,
        value: Box<TypeSyntax>,
    },
    Chan {
        dir: ChanDir,
        elem: Box<TypeSyntax>,
    },
    Func(FuncSyntax),
    Interface(Vec<InterfaceElemSyntax>),
    Struct(Vec<ParamSyntax>),
    Variadic(Box<TypeSyntax>),
}

impl TypeSyntax {
    pub fn name(name: impl Into<String>) -> Self {
        TypeSyntax::Name(name.into())
    }

    pub fn pointer(elem: TypeSyntax) -> Self {
        TypeSyntax::Pointer(Box::new(elem))
    }

    /// Rewrite every `from.Name` reference to `to.Name`.
    pub fn rename_qualifier(&mut self, from: &str, to: &str) {
        match self {
            TypeSyntax::Name(_) => {}
            TypeSyntax::Qualified { package, .. } => {
                if package == from {
                    *package = to.to_string();
                }
            }
            TypeSyntax::Pointer(elem) | TypeSyntax::Variadic(elem) => {
                elem.rename_qualifier(from, to)
            }
            TypeSyntax::Array { len, elem } => {
                // A constant length declared in the same package.
                if let Some(len) = len
                    && let Some(rest) = len.strip_prefix(from).and_then(|r| r.strip_prefix('.'))
                {
                    *len = format!("{to}.{rest}");
                }
                elem.rename_qualifier(from, to);
            }
            TypeSyntax::Map { key, value } => {
                key.rename_qualifier(from, to);
                value.rename_qualifier(from, to);
            }
            TypeSyntax::Chan { elem, .. } => elem.rename_qualifier(from, to),
            TypeSyntax::Func(sig) => sig.rename_qualifier(from, to),
            TypeSyntax::Interface(elems) => {
                for elem in elems {
                    match elem {
                        InterfaceElemSyntax::Method { sig, .. } => sig.rename_qualifier(from, to),
                        InterfaceElemSyntax::Embedded(ty) => ty.rename_qualifier(from, to),
                    }
                }
            }
            TypeSyntax::Struct(fields) => {
                for field in fields {
                    field.ty.rename_qualifier(from, to);
                }
            }
        }
    }

    /// Whether a conversion to this type needs parentheses around the type.
    pub fn needs_parens_in_call(&self) -> bool {
        matches!(
            self,
            TypeSyntax::Pointer(_) | TypeSyntax::Func(_) | TypeSyntax::Chan { .. }
        )
    }
}

/// Parameter, result or struct field group: `a, b int`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParamSyntax {
    pub names: Vec<String>,
    pub ty: TypeSyntax,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FuncSyntax {
    pub params: Vec<ParamSyntax>,
    pub results: Vec<ParamSyntax>,
}

impl FuncSyntax {
    pub fn rename_qualifier(&mut self, from: &str, to: &str) {
        for param in self.params.iter_mut().chain(&mut self.results) {
            param.ty.rename_qualifier(from, to);
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InterfaceElemSyntax {
    Method { name: String, sig: FuncSyntax },
    Embedded(TypeSyntax),
}

/// Value expression.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Expr {
    /// Placeholder for a degraded synthesis.
    #[default]
    Empty,
    Ident(String),
    /// Literal source text, already quoted where needed.
    Lit(String),
    Type(TypeSyntax),
    Call {
        func: Box<Expr>,
        args: Vec<Expr>,
    },
    Composite {
        ty: TypeSyntax,
        elems: Vec<Element>,
    },
    AddrOf(Box<Expr>),
    FuncLit {
        sig: FuncSyntax,
        body: Vec<Stmt>,
    },
}

impl Expr {
    pub fn ident(name: impl Into<String>) -> Self {
        Expr::Ident(name.into())
    }

    pub fn lit(text: impl Into<String>) -> Self {
        Expr::Lit(text.into())
    }

    /// Conversion `ty(arg)`.
    pub fn convert(ty: TypeSyntax, arg: Expr) -> Self {
        Expr::Call {
            func: Box::new(Expr::Type(ty)),
            args: vec![arg],
        }
    }

    pub fn call(func: Expr, args: Vec<Expr>) -> Self {
        Expr::Call {
            func: Box::new(func),
            args,
        }
    }

    pub fn addr_of(inner: Expr) -> Self {
        Expr::AddrOf(Box::new(inner))
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Expr::Empty)
    }

    /// Rewrite every `from.Name` type reference inside the expression.
    pub fn rename_qualifier(&mut self, from: &str, to: &str) {
        match self {
            Expr::Empty | Expr::Ident(_) | Expr::Lit(_) => {}
            Expr::Type(ty) => ty.rename_qualifier(from, to),
            Expr::Call { func, args } => {
                func.rename_qualifier(from, to);
                for arg in args {
                    arg.rename_qualifier(from, to);
                }
            }
            Expr::Composite { ty, elems } => {
                ty.rename_qualifier(from, to);
                for elem in elems {
                    match elem {
                        Element::Value(value) => value.rename_qualifier(from, to),
                        Element::KeyValue { key, value } => {
                            key.rename_qualifier(from, to);
                            value.rename_qualifier(from, to);
                        }
                    }
                }
            }
            Expr::AddrOf(inner) => inner.rename_qualifier(from, to),
            Expr::FuncLit { sig, body } => {
                sig.rename_qualifier(from, to);
                for stmt in body {
                    stmt.rename_qualifier(from, to);
                }
            }
        }
    }
}

/// Composite literal element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Element {
    Value(Expr),
    KeyValue { key: Expr, value: Expr },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssignKind {
    /// `:=`
    Define,
    /// `=`
    Assign,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Stmt {
    Assign {
        lhs: Vec<Expr>,
        rhs: Vec<Expr>,
        kind: AssignKind,
    },
    Return(Vec<Expr>),
    Expr(Expr),
}

impl Stmt {
    /// `name := value`
    pub fn define(name: impl Into<String>, value: Expr) -> Self {
        Stmt::Assign {
            lhs: vec![Expr::Ident(name.into())],
            rhs: vec![value],
            kind: AssignKind::Define,
        }
    }

    pub fn rename_qualifier(&mut self, from: &str, to: &str) {
        match self {
            Stmt::Assign { lhs, rhs, .. } => {
                for expr in lhs.iter_mut().chain(rhs) {
                    expr.rename_qualifier(from, to);
                }
            }
            Stmt::Return(values) => {
                for value in values {
                    value.rename_qualifier(from, to);
                }
            }
            Stmt::Expr(expr) => expr.rename_qualifier(from, to),
        }
    }
}

/// Receiver of a synthesized method.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Receiver {
    pub name: String,
    pub ty: TypeSyntax,
}

/// Top-level declaration introduced by the synthesizer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decl {
    /// `type Name struct{}`
    Struct { name: String },
    Method {
        receiver: Receiver,
        name: String,
        sig: FuncSyntax,
        body: Vec<Stmt>,
    },
}

impl Decl {
    /// Name of the declared type, or of the method.
    pub fn name(&self) -> &str {
        match self {
            Decl::Struct { name } | Decl::Method { name, .. } => name,
        }
    }

    pub fn rename_qualifier(&mut self, from: &str, to: &str) {
        if let Decl::Method {
            receiver, sig, body, ..
        } = self
        {
            receiver.ty.rename_qualifier(from, to);
            sig.rename_qualifier(from, to);
            for stmt in body {
                stmt.rename_qualifier(from, to);
            }
        }
    }
}

impl fmt::Display for TypeSyntax {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&GoPrinter.type_syntax(self))
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&GoPrinter.expr(self))
    }
}

impl fmt::Display for Stmt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&GoPrinter.stmt(self))
    }
}

impl fmt::Display for Decl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&GoPrinter.decl(self))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn geo(name: &str) -> TypeSyntax {
        TypeSyntax::Qualified {
            package: "geo".to_string(),
            name: name.to_string(),
        }
    }

    #[test]
    fn rename_qualifier_reaches_nested_references() {
        let mut expr = Expr::Composite {
            ty: geo("Line"),
            elems: vec![Element::KeyValue {
                key: Expr::ident("Ends"),
                value: Expr::Composite {
                    ty: TypeSyntax::Array {
                        len: Some("geo.Size".to_string()),
                        elem: Box::new(geo("Point")),
                    },
                    elems: vec![Element::Value(Expr::convert(geo("Unit"), Expr::lit("\"m\"")))],
                },
            }],
        };
        expr.rename_qualifier("geo", "g");
        assert_eq!(
            expr.to_string(),
            r#"g.Line{Ends: [g.Size]g.Point{g.Unit("m")}}"#
        );
    }

    #[test]
    fn rename_qualifier_leaves_other_packages() {
        let mut ty = TypeSyntax::Map {
            key: Box::new(geo("Key")),
            value: Box::new(TypeSyntax::Qualified {
                package: "geodesy".to_string(),
                name: "Datum".to_string(),
            }),
        };
        ty.rename_qualifier("geo", "g");
        assert_eq!(ty.to_string(), "map[g.Key]geodesy.Datum");
    }
}
