//! Line-origin remapping
//!
//! pcpp drops skipped regions and splices includes, then emits
//! `#line N "file"` markers so that consumers can recover where the
//! following text came from. [`LineRemapper`] converts a 0-based line index
//! in preprocessed text into the original source line.

use regex::Regex;
use std::sync::LazyLock;

static LINE_MARKER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"^#line (?P<line>[0-9]+) ".*""#).unwrap());

/// A parsed `#line` directive
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineMarker {
    /// 0-based index of the marker line in the preprocessed text
    pub index: usize,
    /// Original line number of the line following the marker
    pub line: usize,
}

impl LineMarker {
    /// Parse a single line as a marker. Malformed markers yield `None`.
    pub fn parse(index: usize, text: &str) -> Option<Self> {
        let caps = LINE_MARKER.captures(text)?;
        let line = caps["line"].parse().ok()?;
        Some(Self { index, line })
    }

    /// Original line of preprocessed line `index`, which must not precede
    /// the marker. Saturates at both ends of `usize`.
    fn line_at(&self, index: usize) -> usize {
        self.line
            .saturating_add(index - self.index)
            .saturating_sub(1)
    }
}

/// Maps preprocessed line indices to original line numbers
#[derive(Debug, Clone, Default)]
pub struct LineRemapper {
    /// Sorted by `index`
    markers: Vec<LineMarker>,
}

impl LineRemapper {
    /// Scan preprocessed text for markers
    pub fn new(text: &str) -> Self {
        let markers = text
            .lines()
            .enumerate()
            .filter_map(|(index, line)| LineMarker::parse(index, line))
            .collect();
        Self { markers }
    }

    /// Original line for the 0-based preprocessed line `index`.
    ///
    /// Uses the last marker at or before `index`; without one the mapping is
    /// the identity.
    pub fn original_line(&self, index: usize) -> usize {
        let seen = self.markers.partition_point(|m| m.index <= index);
        match seen.checked_sub(1).map(|i| &self.markers[i]) {
            Some(marker) => marker.line_at(index),
            None => index,
        }
    }

    /// Markers in text order
    pub fn markers(&self) -> &[LineMarker] {
        &self.markers
    }
}
