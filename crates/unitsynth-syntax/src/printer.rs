// crates/unitsynth-syntax/src/printer.rs
//! Rendering of output syntax into Go source text.

use std::fmt::Write;

use crate::ast::{
    AssignKind, Decl, Element, Expr, FuncSyntax, InterfaceElemSyntax, ParamSyntax, Stmt,
    TypeSyntax,
};
use crate::types::ChanDir;

/// Renders syntax nodes into source text.
pub trait Printer {
    fn type_syntax(&self, ty: &TypeSyntax) -> String;
    fn expr(&self, expr: &Expr) -> String;
    fn stmt(&self, stmt: &Stmt) -> String;
    fn decl(&self, decl: &Decl) -> String;
}

/// Printer producing gofmt-style, tab-indented Go source.
#[derive(Debug, Default, Clone, Copy)]
pub struct GoPrinter;

impl Printer for GoPrinter {
    fn type_syntax(&self, ty: &TypeSyntax) -> String {
        let mut w = GoWriter::default();
        w.type_syntax(ty);
        w.out
    }

    fn expr(&self, expr: &Expr) -> String {
        let mut w = GoWriter::default();
        w.expr(expr);
        w.out
    }

    fn stmt(&self, stmt: &Stmt) -> String {
        let mut w = GoWriter::default();
        w.stmt(stmt);
        w.out
    }

    fn decl(&self, decl: &Decl) -> String {
        let mut w = GoWriter::default();
        w.decl(decl);
        w.out
    }
}

/// Indent-aware string builder. Writing into a `String` cannot fail, so the
/// `fmt::Result`s from `write!` are discarded.
#[derive(Default)]
struct GoWriter {
    out: String,
    indent: usize,
}

impl GoWriter {
    fn newline(&mut self) {
        self.out.push('\n');
        for _ in 0..self.indent {
            self.out.push('\t');
        }
    }

    fn type_syntax(&mut self, ty: &TypeSyntax) {
        match ty {
            TypeSyntax::Name(name) => self.out.push_str(name),
            TypeSyntax::Qualified { package, name } => {
                let _ = write!(self.out, "{package}.{name}");
            }
            TypeSyntax::Pointer(elem) => {
                self.out.push('*');
                self.type_syntax(elem);
            }
            TypeSyntax::Array { len, elem } => {
                self.out.push('[');
                if let Some(len) = len {
                    self.out.push_str(len);
                }
                self.out.push(']');
                self.type_syntax(elem);
            }
            TypeSyntax::Map { key, value } => {
                self.out.push_str("map[");
                self.type_syntax(key);
                self.out.push(']');
                self.type_syntax(value);
            }
            TypeSyntax::Chan { dir, elem } => {
                self.out.push_str(match dir {
                    ChanDir::Both => "chan ",
                    ChanDir::Send => "chan<- ",
                    ChanDir::Recv => "<-chan ",
                });
                self.type_syntax(elem);
            }
            TypeSyntax::Func(sig) => {
                self.out.push_str("func");
                self.signature(sig);
            }
            TypeSyntax::Interface(elems) => {
                if elems.is_empty() {
                    self.out.push_str("interface{}");
                    return;
                }
                self.out.push_str("interface{ ");
                for (i, elem) in elems.iter().enumerate() {
                    if i > 0 {
                        self.out.push_str("; ");
                    }
                    match elem {
                        InterfaceElemSyntax::Method { name, sig } => {
                            self.out.push_str(name);
                            self.signature(sig);
                        }
                        InterfaceElemSyntax::Embedded(ty) => self.type_syntax(ty),
                    }
                }
                self.out.push_str(" }");
            }
            TypeSyntax::Struct(fields) => {
                if fields.is_empty() {
                    self.out.push_str("struct{}");
                    return;
                }
                self.out.push_str("struct{ ");
                for (i, field) in fields.iter().enumerate() {
                    if i > 0 {
                        self.out.push_str("; ");
                    }
                    self.param(field);
                }
                self.out.push_str(" }");
            }
            TypeSyntax::Variadic(elem) => {
                self.out.push_str("...");
                self.type_syntax(elem);
            }
        }
    }

    fn param(&mut self, param: &ParamSyntax) {
        if !param.names.is_empty() {
            self.out.push_str(&param.names.join(", "));
            self.out.push(' ');
        }
        self.type_syntax(&param.ty);
    }

    fn param_list(&mut self, params: &[ParamSyntax]) {
        for (i, param) in params.iter().enumerate() {
            if i > 0 {
                self.out.push_str(", ");
            }
            self.param(param);
        }
    }

    /// `(params) results` without the leading `func` keyword.
    fn signature(&mut self, sig: &FuncSyntax) {
        self.out.push('(');
        self.param_list(&sig.params);
        self.out.push(')');
        match sig.results.as_slice() {
            [] => {}
            [single] if single.names.is_empty() => {
                self.out.push(' ');
                self.type_syntax(&single.ty);
            }
            results => {
                self.out.push_str(" (");
                self.param_list(results);
                self.out.push(')');
            }
        }
    }

    fn expr_list(&mut self, exprs: &[Expr]) {
        for (i, expr) in exprs.iter().enumerate() {
            if i > 0 {
                self.out.push_str(", ");
            }
            self.expr(expr);
        }
    }

    fn expr(&mut self, expr: &Expr) {
        match expr {
            Expr::Empty => {}
            Expr::Ident(name) => self.out.push_str(name),
            Expr::Lit(text) => self.out.push_str(text),
            Expr::Type(ty) => self.type_syntax(ty),
            Expr::Call { func, args } => {
                match func.as_ref() {
                    Expr::Type(ty) if ty.needs_parens_in_call() => {
                        self.out.push('(');
                        self.type_syntax(ty);
                        self.out.push(')');
                    }
                    other => self.expr(other),
                }
                self.out.push('(');
                self.expr_list(args);
                self.out.push(')');
            }
            Expr::Composite { ty, elems } => {
                self.type_syntax(ty);
                self.out.push('{');
                for (i, elem) in elems.iter().enumerate() {
                    if i > 0 {
                        self.out.push_str(", ");
                    }
                    match elem {
                        Element::Value(value) => self.expr(value),
                        Element::KeyValue { key, value } => {
                            self.expr(key);
                            self.out.push_str(": ");
                            self.expr(value);
                        }
                    }
                }
                self.out.push('}');
            }
            Expr::AddrOf(inner) => {
                self.out.push('&');
                self.expr(inner);
            }
            Expr::FuncLit { sig, body } => {
                self.out.push_str("func");
                self.signature(sig);
                self.out.push(' ');
                self.block(body);
            }
        }
    }

    fn block(&mut self, body: &[Stmt]) {
        self.out.push('{');
        self.indent += 1;
        for stmt in body {
            self.newline();
            self.stmt(stmt);
        }
        self.indent -= 1;
        self.newline();
        self.out.push('}');
    }

    fn stmt(&mut self, stmt: &Stmt) {
        match stmt {
            Stmt::Assign { lhs, rhs, kind } => {
                self.expr_list(lhs);
                self.out.push_str(match kind {
                    AssignKind::Define => " := ",
                    AssignKind::Assign => " = ",
                });
                self.expr_list(rhs);
            }
            Stmt::Return(values) => {
                self.out.push_str("return");
                if !values.is_empty() {
                    self.out.push(' ');
                    self.expr_list(values);
                }
            }
            Stmt::Expr(expr) => self.expr(expr),
        }
    }

    fn decl(&mut self, decl: &Decl) {
        match decl {
            Decl::Struct { name } => {
                let _ = write!(self.out, "type {name} struct{{}}");
            }
            Decl::Method {
                receiver,
                name,
                sig,
                body,
            } => {
                let _ = write!(self.out, "func ({} ", receiver.name);
                self.type_syntax(&receiver.ty);
                let _ = write!(self.out, ") {name}");
                self.signature(sig);
                self.out.push(' ');
                self.block(body);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::Receiver;

    fn int() -> TypeSyntax {
        TypeSyntax::name("int")
    }

    #[test]
    fn prints_channel_directions() {
        let send = TypeSyntax::Chan {
            dir: ChanDir::Send,
            elem: Box::new(int()),
        };
        let recv = TypeSyntax::Chan {
            dir: ChanDir::Recv,
            elem: Box::new(int()),
        };
        assert_eq!(send.to_string(), "chan<- int");
        assert_eq!(recv.to_string(), "<-chan int");
    }

    #[test]
    fn prints_composite_with_keys() {
        let expr = Expr::Composite {
            ty: TypeSyntax::name("Point"),
            elems: vec![
                Element::KeyValue {
                    key: Expr::ident("X"),
                    value: Expr::convert(int(), Expr::lit("1")),
                },
                Element::KeyValue {
                    key: Expr::ident("Y"),
                    value: Expr::convert(int(), Expr::lit("2")),
                },
            ],
        };
        assert_eq!(expr.to_string(), "Point{X: int(1), Y: int(2)}");
    }

    #[test]
    fn parenthesizes_pointer_conversions() {
        let expr = Expr::convert(TypeSyntax::pointer(int()), Expr::lit("nil"));
        assert_eq!(expr.to_string(), "(*int)(nil)");
    }

    #[test]
    fn prints_func_literal_with_indented_body() {
        let lit = Expr::FuncLit {
            sig: FuncSyntax {
                params: vec![],
                results: vec![ParamSyntax {
                    names: vec![],
                    ty: int(),
                }],
            },
            body: vec![
                Stmt::define("a", Expr::convert(int(), Expr::lit("3"))),
                Stmt::Return(vec![Expr::ident("a")]),
            ],
        };
        let stmt = Stmt::define("f", lit);
        assert_eq!(
            stmt.to_string(),
            "f := func() int {\n\ta := int(3)\n\treturn a\n}"
        );
    }

    #[test]
    fn prints_method_declaration() {
        let decl = Decl::Method {
            receiver: Receiver {
                name: "s".to_string(),
                ty: TypeSyntax::pointer(TypeSyntax::name("Impl")),
            },
            name: "Close".to_string(),
            sig: FuncSyntax {
                params: vec![],
                results: vec![ParamSyntax {
                    names: vec![],
                    ty: TypeSyntax::name("error"),
                }],
            },
            body: vec![
                Stmt::define(
                    "e",
                    Expr::convert(TypeSyntax::name("error"), Expr::lit("nil")),
                ),
                Stmt::Return(vec![Expr::ident("e")]),
            ],
        };
        assert_eq!(
            decl.to_string(),
            "func (s *Impl) Close() error {\n\te := error(nil)\n\treturn e\n}"
        );
    }

    #[test]
    fn prints_multiple_results_in_parens() {
        let ty = TypeSyntax::Func(FuncSyntax {
            params: vec![ParamSyntax {
                names: vec!["a".to_string(), "b".to_string()],
                ty: int(),
            }],
            results: vec![
                ParamSyntax {
                    names: vec![],
                    ty: int(),
                },
                ParamSyntax {
                    names: vec![],
                    ty: TypeSyntax::name("error"),
                },
            ],
        });
        assert_eq!(ty.to_string(), "func(a, b int) (int, error)");
    }

    #[test]
    fn bare_return_and_empty_struct() {
        assert_eq!(Stmt::Return(vec![]).to_string(), "return");
        let decl = Decl::Struct {
            name: "Impl".to_string(),
        };
        assert_eq!(decl.to_string(), "type Impl struct{}");
    }
}
