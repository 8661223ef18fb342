//! bindscan parser
//!
//! Turns one shader source file into register binding observations.
//!
//! ## Modules
//!
//! - `preprocessor` - pcpp integration behind the [`Preprocessor`] trait
//! - `remap` - maps preprocessed line numbers back to original source lines
//! - `extract` - matches `register(...)` declarations line by line
//! - `runner` - runs one file under each shader permutation

pub mod extract;
pub mod preprocessor;
pub mod remap;
pub mod runner;

pub use extract::{extract_bindings, parse_binding_line, Bindings};
pub use preprocessor::{MacroDefinition, PcppPreprocessor, PreprocessError, Preprocessor};
pub use remap::LineRemapper;
pub use runner::{Observation, PermutationRunner};

#[cfg(test)]
mod tests;
