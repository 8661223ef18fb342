//! Configuration types

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Hosting location the report links into
pub const DEFAULT_LINK_BASE: &str = "https://github.com/doodlum/skyrim-community-shaders/blob/dev";

/// bindscan configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanConfig {
    /// Scan root; reported paths are relative to it
    pub root: PathBuf,

    /// Base URL for source links
    pub link_base: String,

    /// Glob patterns (relative to root) of files to skip
    pub exclude: Vec<String>,

    /// Worker threads; `None` uses every core, `Some(1)` scans sequentially
    pub jobs: Option<usize>,

    /// Preprocessor configuration
    pub preprocessor: PreprocessorConfig,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from("."),
            link_base: DEFAULT_LINK_BASE.to_string(),
            exclude: vec![],
            jobs: None,
            preprocessor: PreprocessorConfig::default(),
        }
    }
}

/// External preprocessor configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PreprocessorConfig {
    /// Preprocessor executable
    pub program: PathBuf,

    /// Additional include directories (-I)
    pub include_dirs: Vec<PathBuf>,

    /// Arguments appended verbatim
    pub extra_args: Vec<String>,
}

impl Default for PreprocessorConfig {
    fn default() -> Self {
        Self {
            program: PathBuf::from("pcpp"),
            include_dirs: vec![],
            extra_args: vec![],
        }
    }
}
