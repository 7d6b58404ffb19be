#![forbid(unsafe_code)]

//! Headless force-directed layout.
//!
//! `trellis-layout` computes new vertex positions from a [`Graph`] without touching its
//! topology. [`layout`] is pure and returns a [`LayoutResult`]; callers running on a snapshot
//! commit the result back to the live graph with [`LayoutResult::commit`]. [`apply`] does both
//! in place.

pub mod algo;
pub mod error;
pub mod result;

pub use algo::{Algorithm, ForceDirectedOptions};
pub use error::{Error, Result};
pub use result::LayoutResult;

use trellis_graph::Graph;

/// Headless layout entry point.
pub fn layout(graph: &Graph, algorithm: &Algorithm) -> Result<LayoutResult> {
    match algorithm {
        Algorithm::ForceDirected(opts) => algo::force_atlas2::layout(graph, opts),
    }
}

/// Runs [`layout`] and writes the positions back into `graph`.
pub fn apply(graph: &mut Graph, algorithm: &Algorithm) -> Result<LayoutResult> {
    let result = layout(graph, algorithm)?;
    result.commit(graph);
    Ok(result)
}
