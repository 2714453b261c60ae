//! Value synthesis for unit-test inputs.
//!
//! [`Synthesizer`] turns a type expression into a constructible value plus the
//! statements and declarations it depends on. [`Generator`] drives it over
//! the functions of a file to produce [`TestCase`]s.

pub mod cycle;
pub mod names;
pub mod options;
pub mod overrides;
pub mod policy;
pub mod qualify;
pub mod result;
mod stubs;
pub mod synth;
pub mod testcase;

pub use cycle::{CycleInfo, Entry};
pub use names::{IdentGenerator, WordNames};
pub use options::Options;
pub use overrides::{FunctionOverride, OverrideStore, Overrides};
pub use policy::{RandomValues, ValueConfig, ValuePolicy};
pub use result::SynthesisResult;
pub use synth::{SynthesisContext, Synthesizer, func_nil_stub, interface_nil_stub};
pub use testcase::{File, Generator, TestCase};
