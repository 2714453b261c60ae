// crates/unitsynth-gen/src/policy.rs
//! Choice of literal values and container sizes.

use rand::Rng;
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};
use unitsynth_syntax::{Expr, TypeSyntax};

/// Decides the concrete values the synthesizer fills types with.
pub trait ValuePolicy {
    /// Basic type used for values of the empty interface.
    fn any_type(&mut self) -> String;
    /// Element count for a slice (`None`) or an array of fixed length.
    fn array_len(&mut self, bound: Option<usize>) -> usize;
    /// Entry count attempted for a map.
    fn map_len(&mut self) -> usize;
    /// Literal of a predeclared basic type.
    fn basic_literal(&mut self, ty: &str) -> Expr;
    /// Value of the predeclared `error` interface.
    fn error_value(&mut self) -> Expr;
    /// Whether to take a manual override when one exists.
    fn use_override(&mut self) -> bool;
    /// Which of `len` manual overrides to take.
    fn override_index(&mut self, len: usize) -> usize;
}

/// Ranges and probabilities for [`RandomValues`], read from the `[values]`
/// config section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValueConfig {
    /// Element count for slices and fixed arrays (range, inclusive).
    pub slice_len: (usize, usize),
    /// Entry attempts for maps (range, inclusive).
    pub map_len: (usize, usize),
    /// Length of generated strings (range, inclusive).
    pub string_len: (usize, usize),
    /// Probability (0.0-1.0) that an error value is non-nil.
    pub error_probability: f64,
    /// Probability (0.0-1.0) of using a manual override when present.
    pub override_probability: f64,
}

impl Default for ValueConfig {
    fn default() -> Self {
        Self {
            slice_len: (0, 4),
            map_len: (0, 4),
            string_len: (1, 8),
            error_probability: 0.5,
            override_probability: 0.8,
        }
    }
}

/// Basic types picked for `interface{}` values.
const ANY_TYPES: &[&str] = &["int", "string", "bool", "float64"];

/// Seeded random value policy.
pub struct RandomValues {
    rng: StdRng,
    config: ValueConfig,
}

impl RandomValues {
    pub fn new(rng: StdRng, config: ValueConfig) -> Self {
        Self { rng, config }
    }

    fn random_in(&mut self, (min, max): (usize, usize)) -> usize {
        if min >= max {
            return min;
        }
        self.rng.gen_range(min..=max)
    }

    fn gen_bool(&mut self, prob: f64) -> bool {
        self.rng.gen_bool(prob.clamp(0.0, 1.0))
    }

    fn string_literal(&mut self) -> String {
        let len = self.random_in(self.config.string_len);
        let text: String = (0..len)
            .map(|_| char::from(self.rng.gen_range(b'a'..=b'z')))
            .collect();
        format!("\"{text}\"")
    }

    fn number_text(&mut self, ty: &str) -> Option<String> {
        let text = match ty {
            "int8" => self.rng.gen_range(-128_i64..=127).to_string(),
            "int" | "int16" | "int32" | "int64" => self.rng.gen_range(-1000_i64..=1000).to_string(),
            "uint8" | "byte" => self.rng.gen_range(0_u64..=255).to_string(),
            "uint" | "uint16" | "uint32" | "uint64" | "uintptr" => {
                self.rng.gen_range(0_u64..=1000).to_string()
            }
            "rune" => self.rng.gen_range(0x20_u32..0x7f).to_string(),
            "float32" | "float64" => format!("{:.2}", self.rng.gen_range(-100.0_f64..100.0)),
            "complex64" | "complex128" => {
                let re: f64 = self.rng.gen_range(-100.0..100.0);
                let im: f64 = self.rng.gen_range(-100.0..100.0);
                format!("complex({re:.2}, {im:.2})")
            }
            _ => return None,
        };
        Some(text)
    }
}

impl ValuePolicy for RandomValues {
    fn any_type(&mut self) -> String {
        ANY_TYPES[self.rng.gen_range(0..ANY_TYPES.len())].to_string()
    }

    fn array_len(&mut self, bound: Option<usize>) -> usize {
        let len = self.random_in(self.config.slice_len);
        match bound {
            Some(bound) => len.min(bound),
            None => len,
        }
    }

    fn map_len(&mut self) -> usize {
        self.random_in(self.config.map_len)
    }

    fn basic_literal(&mut self, ty: &str) -> Expr {
        match ty {
            "bool" => Expr::lit(if self.gen_bool(0.5) { "true" } else { "false" }),
            "string" => Expr::Lit(self.string_literal()),
            _ => match self.number_text(ty) {
                Some(text) => Expr::convert(TypeSyntax::name(ty), Expr::Lit(text)),
                None => {
                    tracing::warn!(ty, "no literal form for type");
                    Expr::Empty
                }
            },
        }
    }

    fn error_value(&mut self) -> Expr {
        if self.gen_bool(self.config.error_probability) {
            let msg = self.string_literal();
            Expr::call(Expr::ident("errors.New"), vec![Expr::Lit(msg)])
        } else {
            Expr::convert(TypeSyntax::name("error"), Expr::lit("nil"))
        }
    }

    fn use_override(&mut self) -> bool {
        self.gen_bool(self.config.override_probability)
    }

    fn override_index(&mut self, len: usize) -> usize {
        if len == 0 {
            return 0;
        }
        self.rng.gen_range(0..len)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    fn policy(config: ValueConfig) -> RandomValues {
        RandomValues::new(StdRng::seed_from_u64(7), config)
    }

    #[test]
    fn numeric_literals_are_typed_conversions() {
        let mut values = policy(ValueConfig::default());
        for ty in ["int", "uint8", "float32", "rune", "uintptr"] {
            let text = values.basic_literal(ty).to_string();
            assert!(text.starts_with(&format!("{ty}(")), "{text}");
            assert!(text.ends_with(')'), "{text}");
        }
    }

    #[test]
    fn strings_respect_length_range() {
        let mut values = policy(ValueConfig {
            string_len: (3, 3),
            ..ValueConfig::default()
        });
        let text = values.basic_literal("string").to_string();
        assert_eq!(text.len(), 5, "{text}");
        assert!(text.starts_with('"') && text.ends_with('"'));
    }

    #[test]
    fn fixed_array_len_is_bounded() {
        let mut values = policy(ValueConfig {
            slice_len: (5, 5),
            ..ValueConfig::default()
        });
        assert_eq!(values.array_len(None), 5);
        assert_eq!(values.array_len(Some(2)), 2);
    }

    #[test]
    fn error_probability_extremes() {
        let mut never = policy(ValueConfig {
            error_probability: 0.0,
            ..ValueConfig::default()
        });
        assert_eq!(never.error_value().to_string(), "error(nil)");
        let mut always = policy(ValueConfig {
            error_probability: 1.0,
            ..ValueConfig::default()
        });
        assert!(always.error_value().to_string().starts_with("errors.New(\""));
    }

    #[test]
    fn unknown_type_degrades_to_empty() {
        let mut values = policy(ValueConfig::default());
        assert!(values.basic_literal("chan").is_empty());
    }

    #[test]
    fn override_index_stays_in_bounds() {
        let mut values = policy(ValueConfig::default());
        for len in 1..10 {
            assert!(values.override_index(len) < len);
        }
    }
}
