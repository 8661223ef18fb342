//! Shader Preprocessor Integration
//!
//! Expands shader sources under a set of defined symbols before bindings are
//! extracted. The default backend shells out to pcpp, which emits
//! `#line` origin markers and can pass unresolved includes and unknown
//! macros through unchanged.

pub mod defines;
pub mod pcpp;

pub use defines::MacroDefinition;
pub use pcpp::{PcppPreprocessor, PreprocessError, PreprocessOptions};

use std::path::Path;

/// Preprocessor backend
pub trait Preprocessor: Send + Sync {
    /// Expand `path` with `defines` and return the full output text
    fn preprocess(&self, path: &Path, defines: &[MacroDefinition]) -> Result<String, PreprocessError>;

    /// Get backend name
    fn name(&self) -> &str;

    /// Check if the backend can run
    fn is_available(&self) -> bool;
}
