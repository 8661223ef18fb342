//! Binding aggregation
//!
//! Folds observations from every (file, permutation) run into one entry per
//! source line. The first observation of a line fixes its declaration and
//! feature; later observations only add permutation flags.

use bindscan_core::{PermutationFlags, Register, RegisterKind, SourceLocation};
use bindscan_parser::Observation;
use serde::Serialize;
use std::collections::HashMap;

use crate::link::source_link;

/// Lookup key for a location: `"<path>:<line>"`, lowercased
pub fn entry_key(location: &SourceLocation) -> String {
    location.to_string().to_lowercase()
}

/// One report row
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AggregatedEntry {
    pub register: Register,
    pub kind: RegisterKind,
    pub feature: String,
    pub type_name: String,
    pub name: String,
    pub location: SourceLocation,
    pub link: String,
    pub permutations: PermutationFlags,
}

impl AggregatedEntry {
    fn sort_key(&self) -> (&Register, String) {
        (&self.register, self.location.to_string())
    }
}

/// Deduplicating map of aggregated entries
#[derive(Debug, Clone)]
pub struct Aggregator {
    link_base: String,
    entries: HashMap<String, AggregatedEntry>,
}

impl Aggregator {
    /// Create an empty aggregator; links are built against `link_base`
    pub fn new(link_base: impl Into<String>) -> Self {
        Self {
            link_base: link_base.into(),
            entries: HashMap::new(),
        }
    }

    /// Record one observation from a file labelled `feature`
    pub fn observe(&mut self, observation: &Observation, feature: &str) {
        let key = entry_key(&observation.location);
        if let Some(entry) = self.entries.get_mut(&key) {
            entry.permutations.set(observation.permutation);
            return;
        }

        let declaration = &observation.declaration;
        let entry = AggregatedEntry {
            register: declaration.register.clone(),
            kind: declaration.register.kind(),
            feature: feature.to_string(),
            type_name: declaration.type_name.clone(),
            name: declaration.name.clone(),
            location: observation.location.clone(),
            link: source_link(&self.link_base, &observation.location),
            permutations: PermutationFlags::only(observation.permutation),
        };
        self.entries.insert(key, entry);
    }

    /// Fold `other` into `self`. Entries already present here keep their
    /// values and gain `other`'s flags.
    pub fn merge(&mut self, other: Aggregator) {
        for (key, entry) in other.entries {
            match self.entries.get_mut(&key) {
                Some(existing) => existing.permutations.union(entry.permutations),
                None => {
                    self.entries.insert(key, entry);
                }
            }
        }
    }

    /// Entry for a location, matched case-insensitively on the path
    pub fn get(&self, location: &SourceLocation) -> Option<&AggregatedEntry> {
        self.entries.get(&entry_key(location))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries ordered by register letter, register number, then `path:line`
    pub fn into_sorted(self) -> Vec<AggregatedEntry> {
        let mut entries: Vec<AggregatedEntry> = self.entries.into_values().collect();
        entries.sort_by(|a, b| a.sort_key().cmp(&b.sort_key()));
        entries
    }
}
