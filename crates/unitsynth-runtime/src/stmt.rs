// crates/unitsynth-runtime/src/stmt.rs
//
// Statements decoded from runtime captures. Operands are source text so that
// placeholder identifiers from the templated probe can be substituted
// textually before printing.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssignKind {
    Define,
    Assign,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssertKind {
    EqualValues,
    True,
    False,
    Nil,
    Error,
    NoError,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Stmt {
    Assign {
        lhs: String,
        rhs: String,
        kind: AssignKind,
    },
    /// `expected` is the literal for `EqualValues` and the checked variable
    /// for every other kind. `value` is set only for `EqualValues`.
    Assert {
        kind: AssertKind,
        expected: String,
        value: Option<String>,
    },
}

impl Stmt {
    pub fn equal_values(expected: String, value: String) -> Self {
        Stmt::Assert {
            kind: AssertKind::EqualValues,
            expected,
            value: Some(value),
        }
    }

    pub fn check(kind: AssertKind, var: String) -> Self {
        Stmt::Assert {
            kind,
            expected: var,
            value: None,
        }
    }

    /// Substitute every occurrence of `key` in all operands.
    pub fn replace(&mut self, key: &str, val: &str) {
        if key.is_empty() {
            return;
        }
        match self {
            Stmt::Assign { lhs, rhs, .. } => {
                *lhs = lhs.replace(key, val);
                *rhs = rhs.replace(key, val);
            }
            Stmt::Assert {
                expected, value, ..
            } => {
                *expected = expected.replace(key, val);
                if let Some(value) = value {
                    *value = value.replace(key, val);
                }
            }
        }
    }

    pub fn is_assert(&self) -> bool {
        matches!(self, Stmt::Assert { .. })
    }
}

/// Renders decoded statements into test source text.
pub trait StmtPrinter {
    fn print_stmt(&self, stmt: &Stmt) -> String;
}

/// Prints assertions as calls on a testify suite receiver.
#[derive(Debug, Clone)]
pub struct SuitePrinter {
    receiver: String,
}

impl SuitePrinter {
    pub fn new(receiver: impl Into<String>) -> Self {
        Self {
            receiver: receiver.into(),
        }
    }
}

impl Default for SuitePrinter {
    fn default() -> Self {
        Self::new("s")
    }
}

impl StmtPrinter for SuitePrinter {
    fn print_stmt(&self, stmt: &Stmt) -> String {
        match stmt {
            Stmt::Assign { lhs, rhs, kind } => {
                let op = match kind {
                    AssignKind::Define => ":=",
                    AssignKind::Assign => "=",
                };
                format!("{lhs} {op} {rhs}")
            }
            Stmt::Assert {
                kind,
                expected,
                value,
            } => {
                let method = match kind {
                    AssertKind::EqualValues => "EqualValues",
                    AssertKind::True => "True",
                    AssertKind::False => "False",
                    AssertKind::Nil => "Nil",
                    AssertKind::Error => "Error",
                    AssertKind::NoError => "NoError",
                };
                match value {
                    Some(value) => format!("{}.{method}({expected}, {value})", self.receiver),
                    None => format!("{}.{method}({expected})", self.receiver),
                }
            }
        }
    }
}

impl fmt::Display for Stmt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&SuitePrinter::default().print_stmt(self))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prints_suite_calls() {
        let eq = Stmt::equal_values("int(42)".into(), "x".into());
        assert_eq!(eq.to_string(), "s.EqualValues(int(42), x)");
        assert_eq!(
            Stmt::check(AssertKind::NoError, "err".into()).to_string(),
            "s.NoError(err)"
        );
        let printer = SuitePrinter::new("t");
        assert_eq!(
            printer.print_stmt(&Stmt::check(AssertKind::Nil, "p".into())),
            "t.Nil(p)"
        );
    }

    #[test]
    fn replace_touches_every_operand() {
        let mut assign = Stmt::Assign {
            lhs: "v".into(),
            rhs: "*res[i]".into(),
            kind: AssignKind::Define,
        };
        assign.replace("i", "2");
        assert_eq!(assign.to_string(), "v := *res[2]");

        let mut eq = Stmt::equal_values("int(1)".into(), "m[k]".into());
        eq.replace("k", "\"a\"");
        assert_eq!(eq.to_string(), "s.EqualValues(int(1), m[\"a\"])");
    }

    #[test]
    fn empty_key_is_ignored() {
        let mut eq = Stmt::equal_values("int(1)".into(), "x".into());
        eq.replace("", "oops");
        assert_eq!(eq.to_string(), "s.EqualValues(int(1), x)");
    }
}
