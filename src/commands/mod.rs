// src/commands/mod.rs
pub mod common;
pub mod decode;
pub mod synth;
pub mod validate;
