// crates/unitsynth-runtime/src/decoder.rs
//
// Capture decoder: walks a capture tree down to its leaf, collecting loop
// substitutions and dereferences on the way, then emits the dereference
// assignments followed by one assertion for the leaf.
//
// Dereference targets are remembered per decoder. The first dereference into
// a name declares it (`y := *p`), later ones re-assign (`y = *p`). Names are
// committed only once the capture produced its assertion, so a skipped
// capture leaves no phantom declaration behind.

use rustc_hash::FxHashSet;

use crate::capture::{Capture, CaptureKind};
use crate::stmt::{AssertKind, AssignKind, Stmt};

/// Placeholder identifier in the probe source and the runtime text that
/// replaces it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Replacement {
    pub key: String,
    pub val: String,
}

/// Text wrapped around a reconstructed literal, e.g. `Celsius(` and `)` for
/// a named numeric type.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TypeCorrection {
    pub prefix: String,
    pub suffix: String,
}

/// Leaf type names asserted through a conversion call, `int(42)`.
const CONVERTED_TYPES: &[&str] = &[
    "int", "int8", "int16", "int32", "int64", "uint", "uint8", "uint16", "uint32", "uint64",
    "uintptr", "float32", "float64", "byte", "rune",
];

/// Leaf type names whose captured text is already a literal suffix.
const COMPLEX_TYPES: &[&str] = &["complex64", "complex128"];

/// Decodes the captures of one test case run.
#[derive(Debug, Default)]
pub struct Decoder {
    declared: FxHashSet<String>,
    panicked: bool,
}

impl Decoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Decode one JSON capture line. Malformed lines decode to nothing.
    pub fn decode_line(&mut self, line: &str) -> Vec<Stmt> {
        match Capture::from_json(line) {
            Ok(capture) => self.decode(&capture),
            Err(err) => {
                tracing::error!(error = %err, "skipping runtime capture");
                Vec::new()
            }
        }
    }

    pub fn decode(&mut self, capture: &Capture) -> Vec<Stmt> {
        self.decode_with_correction(capture, &TypeCorrection::default())
    }

    pub fn decode_with_correction(
        &mut self,
        capture: &Capture,
        correction: &TypeCorrection,
    ) -> Vec<Stmt> {
        if capture.kind == CaptureKind::Panic {
            tracing::debug!(val = %capture.val, "run panicked");
            self.panicked = true;
            return Vec::new();
        }
        let mut replacements: Vec<Replacement> = Vec::new();
        // (target, pointer) for every non-nil pointer on the path
        let mut derefs: Vec<(String, String)> = Vec::new();

        let mut node = capture;
        while let Some(child) = node.child.as_deref() {
            match &node.kind {
                CaptureKind::ArrayLoop => replacements.push(Replacement {
                    key: node.arr_ident.clone(),
                    val: node.val.clone(),
                }),
                CaptureKind::MapLoop => {
                    let val = if node.map_key_type == "string" {
                        format!("\"{}\"", node.val)
                    } else {
                        node.val.clone()
                    };
                    replacements.push(Replacement {
                        key: node.arr_ident.clone(),
                        val,
                    });
                }
                CaptureKind::Pointer if !node.is_nil() => {
                    derefs.push((child.var_name.clone(), format!("*{}", node.var_name)));
                }
                CaptureKind::Pointer
                | CaptureKind::Custom
                | CaptureKind::Panic
                | CaptureKind::Leaf(_) => {}
            }
            node = child;
        }

        let var_name = substitute(&node.var_name, &replacements);
        let Some(assertion) = leaf_assertion(node, var_name, correction) else {
            return Vec::new();
        };

        let mut stmts = Vec::with_capacity(derefs.len() + 1);
        let mut fresh: Vec<String> = Vec::new();
        for (target, pointer) in derefs {
            let mut stmt = Stmt::Assign {
                lhs: target,
                rhs: pointer,
                kind: AssignKind::Define,
            };
            for r in &replacements {
                stmt.replace(&r.key, &r.val);
            }
            if let Stmt::Assign { lhs, kind, .. } = &mut stmt {
                if self.declared.contains(lhs.as_str()) || fresh.contains(&*lhs) {
                    *kind = AssignKind::Assign;
                } else {
                    fresh.push(lhs.clone());
                }
            }
            stmts.push(stmt);
        }
        stmts.push(assertion);
        self.declared.extend(fresh);
        stmts
    }

    /// A panic capture was decoded in this run.
    pub fn panicked(&self) -> bool {
        self.panicked
    }

    /// Names already declared by a dereference in this run.
    pub fn is_declared(&self, name: &str) -> bool {
        self.declared.contains(name)
    }
}

fn substitute(text: &str, replacements: &[Replacement]) -> String {
    replacements
        .iter()
        .filter(|r| !r.key.is_empty())
        .fold(text.to_string(), |acc, r| acc.replace(&r.key, &r.val))
}

fn leaf_assertion(leaf: &Capture, var_name: String, correction: &TypeCorrection) -> Option<Stmt> {
    let TypeCorrection { prefix, suffix } = correction;
    let val = &leaf.val;
    match &leaf.kind {
        CaptureKind::Leaf(ty) if CONVERTED_TYPES.contains(&ty.as_str()) => Some(
            Stmt::equal_values(format!("{prefix}{ty}({val}){suffix}"), var_name),
        ),
        CaptureKind::Leaf(ty) if ty == "string" => Some(Stmt::equal_values(
            format!("{prefix}string({}){suffix}", quote_raw(val)),
            var_name,
        )),
        CaptureKind::Leaf(ty) if ty == "bool" => {
            let kind = if val == "true" {
                AssertKind::True
            } else {
                AssertKind::False
            };
            Some(Stmt::check(kind, var_name))
        }
        CaptureKind::Leaf(ty) if COMPLEX_TYPES.contains(&ty.as_str()) => Some(
            Stmt::equal_values(format!("{prefix}{ty}{val}{suffix}"), var_name),
        ),
        CaptureKind::Leaf(ty) if ty == "error" => {
            let kind = if leaf.is_nil() {
                AssertKind::NoError
            } else {
                AssertKind::Error
            };
            Some(Stmt::check(kind, var_name))
        }
        CaptureKind::Pointer if leaf.is_nil() => Some(Stmt::check(AssertKind::Nil, var_name)),
        CaptureKind::Pointer => {
            tracing::warn!(
                var = %leaf.var_name,
                val = %leaf.val,
                "non-nil pointer capture without child, skipping"
            );
            None
        }
        kind => {
            tracing::warn!(
                kind = ?kind,
                val = %leaf.val,
                "unverifiable runtime value, skipping"
            );
            None
        }
    }
}

/// Raw string literal, or an interpreted one when the text has a backtick.
fn quote_raw(text: &str) -> String {
    if text.contains('`') {
        format!("{text:?}")
    } else {
        format!("`{text}`")
    }
}
