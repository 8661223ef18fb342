//! bindscan core
//!
//! Core types shared by the bindscan extraction pipeline: source locations,
//! parsed register bindings and the fixed set of shader permutations.

pub mod config;
pub mod error;
pub mod location;
pub mod types;

pub use error::{Error, Result};
pub use location::SourceLocation;
pub use types::*;
