//! Source code location types

use serde::{Deserialize, Serialize};

/// A line in an original (not preprocessed) shader source file
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SourceLocation {
    /// File path relative to the scan root, `/`-separated, original casing
    pub file: String,
    /// Line in the original source
    pub line: usize,
}

impl SourceLocation {
    /// Create a new location
    pub fn new(file: impl Into<String>, line: usize) -> Self {
        Self {
            file: file.into(),
            line,
        }
    }
}

impl std::fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.file, self.line)
    }
}
