//! Shader file discovery
//!
//! Recursively finds `.hlsl`/`.hlsli` files under a root and labels each with
//! its feature.

use bindscan_core::{Error, Result};
use globset::{Glob, GlobSet, GlobSetBuilder};
use regex::Regex;
use std::cmp::Ordering;
use std::path::{Component, Path, PathBuf};
use std::sync::LazyLock;
use tracing::{debug, info, warn};
use walkdir::{DirEntry, WalkDir};

use crate::feature::FeatureClassifier;

static SHADER_FILE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(?P<stem>\w+)\.hlsli?$").unwrap());

/// Whether `file_name` names a shader source or header
pub fn is_shader_file(file_name: &str) -> bool {
    SHADER_FILE.is_match(file_name)
}

/// A discovered shader file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShaderFile {
    /// Path used to invoke the preprocessor
    pub path: PathBuf,
    /// Root-relative, `/`-separated path
    pub relative: String,
    /// Feature label
    pub feature: String,
}

/// Walks a shader tree
pub struct FileDiscovery {
    root: PathBuf,
    exclude: GlobSet,
}

impl FileDiscovery {
    /// Create a discovery over `root` with no exclusions
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            exclude: GlobSet::empty(),
        }
    }

    /// Create a discovery skipping root-relative paths matching any of `patterns`
    pub fn with_excludes(root: impl Into<PathBuf>, patterns: &[String]) -> Result<Self> {
        let mut builder = GlobSetBuilder::new();
        for pattern in patterns {
            let glob = Glob::new(pattern)
                .map_err(|e| Error::Config(format!("invalid exclude pattern {pattern:?}: {e}")))?;
            builder.add(glob);
        }
        let exclude = builder
            .build()
            .map_err(|e| Error::Config(format!("invalid exclude patterns: {e}")))?;

        Ok(Self {
            root: root.into(),
            exclude,
        })
    }

    /// Find shader files in walk order.
    ///
    /// Each directory's files come before its subdirectories, names sorted
    /// within each group. Fails only if the root itself cannot be read;
    /// unreadable entries below it are skipped.
    pub fn discover(&self) -> Result<Vec<ShaderFile>> {
        std::fs::read_dir(&self.root)
            .map_err(|e| Error::Discovery(format!("{}: {}", self.root.display(), e)))?;

        let mut classifier = FeatureClassifier::new();
        let mut files = Vec::new();

        let walker = WalkDir::new(&self.root)
            .follow_links(true)
            .sort_by(files_first)
            .into_iter();

        for entry in walker {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    warn!("Skipping unreadable entry: {}", e);
                    continue;
                }
            };
            if !entry.file_type().is_file() {
                continue;
            }
            let Some(file_name) = entry.file_name().to_str() else {
                continue;
            };
            let Some(caps) = SHADER_FILE.captures(file_name) else {
                continue;
            };

            let relative = self.relative_path(entry.path());
            if self.exclude.is_match(&relative) {
                debug!("Excluded {}", relative);
                continue;
            }

            let dir = relative.rsplit_once('/').map(|(dir, _)| dir).unwrap_or("");
            let feature = classifier.classify(dir, &caps["stem"]);

            files.push(ShaderFile {
                path: entry.path().to_path_buf(),
                relative,
                feature,
            });
        }

        info!("Found {} shader files under {}", files.len(), self.root.display());
        Ok(files)
    }

    /// Root-relative path with `/` separators
    fn relative_path(&self, path: &Path) -> String {
        let relative = path.strip_prefix(&self.root).unwrap_or(path);
        relative
            .components()
            .filter_map(|c| match c {
                Component::Normal(part) => Some(part.to_string_lossy()),
                _ => None,
            })
            .collect::<Vec<_>>()
            .join("/")
    }
}

fn files_first(a: &DirEntry, b: &DirEntry) -> Ordering {
    let a_dir = a.file_type().is_dir();
    let b_dir = b.file_type().is_dir();
    a_dir.cmp(&b_dir).then_with(|| a.file_name().cmp(b.file_name()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shader_file_names() {
        assert!(is_shader_file("Lighting.hlsl"));
        assert!(is_shader_file("Color.hlsli"));
        assert!(is_shader_file("run_grass2.hlsl"));
        assert!(!is_shader_file("Lighting.HLSL"));
        assert!(!is_shader_file("Lighting.hlsl.bak"));
        assert!(!is_shader_file("Grass Lighting.hlsl"));
        assert!(!is_shader_file("Lighting.fx"));
    }

    #[test]
    fn test_missing_root_is_fatal() {
        let discovery = FileDiscovery::new("/nonexistent/shader/tree");
        assert!(matches!(discovery.discover(), Err(Error::Discovery(_))));
    }

    #[test]
    fn test_bad_exclude_pattern() {
        let result = FileDiscovery::with_excludes(".", &["a[".to_string()]);
        assert!(matches!(result, Err(Error::Config(_))));
    }
}
