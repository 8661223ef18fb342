//! Feature labelling
//!
//! Labels come from the directory layout: files under a `package` directory
//! are labelled by their own stem, files in a subdirectory of
//! `features/<name>/` by `<name>`. A file directly inside `features/<name>`
//! gets no label of its own. Anything else inherits the label of the
//! previous file, so the classifier must see files in walk order.

use regex::Regex;
use std::sync::LazyLock;

static FEATURE_DIR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(?:.*/)?features/(?P<feature>[\w -]+)/").unwrap());

/// Walk-order feature classifier carrying the last assigned label
#[derive(Debug, Clone, Default)]
pub struct FeatureClassifier {
    current: String,
}

impl FeatureClassifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Label for a file with stem `stem` in the `/`-separated, root-relative
    /// directory `dir`
    pub fn classify(&mut self, dir: &str, stem: &str) -> String {
        if dir.split('/').any(|segment| segment.eq_ignore_ascii_case("package")) {
            self.current = stem.to_string();
        } else if let Some(caps) = FEATURE_DIR.captures(dir) {
            self.current = caps["feature"].to_string();
        }
        self.current.clone()
    }

    /// Last assigned label
    pub fn current(&self) -> &str {
        &self.current
    }
}
