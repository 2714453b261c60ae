// crates/unitsynth-runtime/src/capture.rs
//! Runtime capture record emitted by the instrumented probe, one JSON object
//! per line.

use serde::{Deserialize, Serialize};

use crate::error::CaptureError;

/// Captured text of a nil pointer, interface or error.
pub const NIL: &str = "nil";

/// What a capture node describes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum CaptureKind {
    /// `"arr"`: one iteration of a loop over a slice or array.
    ArrayLoop,
    /// `"map"`: one iteration of a loop over a map.
    MapLoop,
    /// `"pointer"`: a pointer, dereferenced when non-nil.
    Pointer,
    /// `"custom"`: a named type wrapping its underlying value.
    Custom,
    /// `"panic"`: the call under test panicked; `val` holds the recovered value.
    Panic,
    /// Any other tag: the primitive type name of a terminal value.
    Leaf(String),
}

impl Default for CaptureKind {
    fn default() -> Self {
        CaptureKind::Leaf(String::new())
    }
}

impl From<String> for CaptureKind {
    fn from(tag: String) -> Self {
        match tag.as_str() {
            "arr" => CaptureKind::ArrayLoop,
            "map" => CaptureKind::MapLoop,
            "pointer" => CaptureKind::Pointer,
            "custom" => CaptureKind::Custom,
            "panic" => CaptureKind::Panic,
            _ => CaptureKind::Leaf(tag),
        }
    }
}

impl From<CaptureKind> for String {
    fn from(kind: CaptureKind) -> Self {
        match kind {
            CaptureKind::ArrayLoop => "arr".to_string(),
            CaptureKind::MapLoop => "map".to_string(),
            CaptureKind::Pointer => "pointer".to_string(),
            CaptureKind::Custom => "custom".to_string(),
            CaptureKind::Panic => "panic".to_string(),
            CaptureKind::Leaf(tag) => tag,
        }
    }
}

/// One node of a capture tree.
///
/// Only the childless node carries a printable literal in `val`. Outer nodes
/// record how the probe reached it: loop index or key (`val` substituted for
/// `arr_ident`), or a dereference of `var_name`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Capture {
    #[serde(rename = "type", default)]
    pub kind: CaptureKind,
    #[serde(default)]
    pub var_name: String,
    #[serde(default)]
    pub map_key_type: String,
    #[serde(default)]
    pub val: String,
    #[serde(default)]
    pub arr_ident: String,
    #[serde(default)]
    pub child: Option<Box<Capture>>,
}

impl Capture {
    pub fn from_json(line: &str) -> Result<Self, CaptureError> {
        serde_json::from_str(line).map_err(|source| CaptureError {
            line: line.to_string(),
            source,
        })
    }

    /// Leaf capture of a primitive value.
    pub fn leaf(ty: &str, var_name: &str, val: &str) -> Self {
        Capture {
            kind: CaptureKind::from(ty.to_string()),
            var_name: var_name.to_string(),
            val: val.to_string(),
            ..Capture::default()
        }
    }

    /// Wrap `child` in this node.
    pub fn with_child(mut self, child: Capture) -> Self {
        self.child = Some(Box::new(child));
        self
    }

    pub fn is_nil(&self) -> bool {
        self.val == NIL
    }
}
