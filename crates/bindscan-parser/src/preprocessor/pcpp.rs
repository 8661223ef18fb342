//! pcpp Preprocessor Integration
//!
//! Wraps the pcpp command-line preprocessor. Output is annotated with
//! `#line N "file"` markers which the remapper consumes.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use thiserror::Error;
use tracing::debug;

use super::defines::MacroDefinition;
use super::Preprocessor;
use bindscan_core::config::PreprocessorConfig;

/// Errors that can occur during preprocessing
#[derive(Debug, Error)]
pub enum PreprocessError {
    #[error("Preprocessor not found: {0}")]
    NotFound(PathBuf),

    #[error("Preprocessing failed (exit status {status:?}): {stderr}")]
    Failed { status: Option<i32>, stderr: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Invalid source file: {0}")]
    InvalidSource(String),
}

/// Options for preprocessing
#[derive(Debug, Clone)]
pub struct PreprocessOptions {
    /// Include paths (-I flags)
    pub includes: Vec<PathBuf>,
    /// Leave `#include`s that cannot be resolved in the output
    pub passthru_unfound_includes: bool,
    /// Leave expressions using unknown macros unevaluated
    pub passthru_unknown_exprs: bool,
    /// Keep `#define` directives in the output
    pub passthru_defines: bool,
    /// Additional pcpp arguments
    pub extra_args: Vec<String>,
}

impl Default for PreprocessOptions {
    fn default() -> Self {
        Self {
            includes: Vec::new(),
            passthru_unfound_includes: true,
            passthru_unknown_exprs: true,
            passthru_defines: true,
            extra_args: Vec::new(),
        }
    }
}

/// pcpp preprocessor wrapper
pub struct PcppPreprocessor {
    /// Path to pcpp executable
    program: PathBuf,
    options: PreprocessOptions,
}

impl PcppPreprocessor {
    /// Create a preprocessor that runs `pcpp` from `PATH`
    pub fn new() -> Self {
        Self::with_path(PathBuf::from("pcpp"))
    }

    /// Create a preprocessor with a specific executable
    pub fn with_path(program: PathBuf) -> Self {
        Self {
            program,
            options: PreprocessOptions::default(),
        }
    }

    /// Create a preprocessor from scan configuration
    pub fn from_config(config: &PreprocessorConfig) -> Self {
        Self {
            program: config.program.clone(),
            options: PreprocessOptions {
                includes: config.include_dirs.clone(),
                extra_args: config.extra_args.clone(),
                ..PreprocessOptions::default()
            },
        }
    }

    /// Replace the options
    pub fn with_options(mut self, options: PreprocessOptions) -> Self {
        self.options = options;
        self
    }

    /// Executable this preprocessor runs
    pub fn program(&self) -> &Path {
        &self.program
    }

    /// Preprocess a source file
    pub fn preprocess_file(
        &self,
        source_path: &Path,
        defines: &[MacroDefinition],
    ) -> Result<String, PreprocessError> {
        if !source_path.is_file() {
            return Err(PreprocessError::InvalidSource(format!(
                "File not found: {:?}",
                source_path
            )));
        }

        let args = self.build_args(source_path, defines);
        debug!("Preprocessing {:?} with args: {:?}", source_path, args);

        let output = Command::new(&self.program)
            .args(&args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .map_err(|e| match e.kind() {
                ErrorKind::NotFound => PreprocessError::NotFound(self.program.clone()),
                _ => PreprocessError::IoError(e),
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(PreprocessError::Failed {
                status: output.status.code(),
                stderr: stderr.trim().to_string(),
            });
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }

    /// Build pcpp command line arguments
    fn build_args(&self, source_path: &Path, defines: &[MacroDefinition]) -> Vec<String> {
        let mut args = vec![source_path.display().to_string()];

        if self.options.passthru_unfound_includes {
            args.push("--passthru-unfound-includes".to_string());
        }
        if self.options.passthru_unknown_exprs {
            args.push("--passthru-unknown-exprs".to_string());
        }
        if self.options.passthru_defines {
            args.push("--passthru-defines".to_string());
        }

        for include in &self.options.includes {
            args.push("-I".to_string());
            args.push(include.display().to_string());
        }

        for macro_def in defines {
            args.push("-D".to_string());
            args.push(macro_def.to_pcpp_operand());
        }

        args.extend(self.options.extra_args.iter().cloned());
        args
    }
}

impl Default for PcppPreprocessor {
    fn default() -> Self {
        Self::new()
    }
}

impl Preprocessor for PcppPreprocessor {
    fn preprocess(&self, path: &Path, defines: &[MacroDefinition]) -> Result<String, PreprocessError> {
        self.preprocess_file(path, defines)
    }

    fn name(&self) -> &str {
        "pcpp"
    }

    fn is_available(&self) -> bool {
        Command::new(&self.program)
            .arg("--help")
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .map(|s| s.success())
            .unwrap_or(false)
    }
}
