//! bindscan index
//!
//! Walks a shader tree, runs every file through each permutation and folds
//! the observations into one row per declaration.

mod aggregate;
mod discovery;
mod feature;
mod link;
mod scan;

pub use aggregate::{entry_key, AggregatedEntry, Aggregator};
pub use discovery::{is_shader_file, FileDiscovery, ShaderFile};
pub use feature::FeatureClassifier;
pub use link::source_link;
pub use scan::{scan, ScanReport, Scanner};
