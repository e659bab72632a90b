//! Shared source-location types used by the grammar, tokens and diagnostics

pub mod location;

pub use location::{Location, Position, SourceMap};
