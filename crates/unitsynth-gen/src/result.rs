// crates/unitsynth-gen/src/result.rs

use unitsynth_syntax::{Decl, Expr, Stmt};

/// Value expression plus everything that must exist before it is evaluated.
///
/// `statements` run in order before `expr` is used. `channels` names the
/// channels created on the way, for the harness to close or drain.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SynthesisResult {
    pub expr: Expr,
    pub statements: Vec<Stmt>,
    pub declarations: Vec<Decl>,
    pub channels: Vec<String>,
}

impl SynthesisResult {
    /// The neutral result of a degraded synthesis.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn of(expr: Expr) -> Self {
        Self {
            expr,
            ..Self::default()
        }
    }

    /// Append statements, declarations and channels of `other`, dropping its
    /// expression.
    pub fn merge(&mut self, other: SynthesisResult) {
        self.statements.extend(other.statements);
        self.declarations.extend(other.declarations);
        self.channels.extend(other.channels);
    }

    /// Merge `other` and hand back its expression.
    pub fn absorb(&mut self, mut other: SynthesisResult) -> Expr {
        let expr = std::mem::take(&mut other.expr);
        self.merge(other);
        expr
    }

    pub fn with_expr(mut self, expr: Expr) -> Self {
        self.expr = expr;
        self
    }

    /// Rewrite `from.Name` type references in everything produced.
    pub fn rename_qualifier(&mut self, from: &str, to: &str) {
        self.expr.rename_qualifier(from, to);
        for stmt in &mut self.statements {
            stmt.rename_qualifier(from, to);
        }
        for decl in &mut self.declarations {
            decl.rename_qualifier(from, to);
        }
    }
}
