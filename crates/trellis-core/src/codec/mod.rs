//! Interchange formats.
//!
//! Both decoders build a complete new [`Graph`] before returning, so a failed import never
//! leaves a half-populated graph behind.

pub mod csv;
pub mod json;

use std::path::Path;

use trellis_graph::Graph;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Json,
    Csv,
}

impl Format {
    /// Guesses the format from a file extension.
    pub fn from_path(path: &Path) -> Option<Self> {
        match path.extension()?.to_str()?.to_ascii_lowercase().as_str() {
            "json" => Some(Format::Json),
            "csv" => Some(Format::Csv),
            _ => None,
        }
    }
}

/// Highest numeric suffix among vertex ids (`V12` -> 12), `0` when there is none.
pub fn vertex_counter(graph: &Graph) -> u64 {
    graph
        .vertices()
        .filter_map(|v| v.numeric_suffix())
        .max()
        .unwrap_or(0)
}
