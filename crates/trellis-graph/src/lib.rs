#![forbid(unsafe_code)]

//! Graph container and classical solvers.
//!
//! - [`Graph`]: vertex set, ordered edge list and per-vertex positions with structural
//!   validation on every mutation.
//! - [`Edge`]: one value type for the plain, directed, weighted and directed-weighted shapes.
//! - [`alg`]: Dijkstra shortest path and Kosaraju strongly connected components.
//!
//! Enable the `serde` feature to (de)serialize [`Vertex`] and [`Position`].

pub mod alg;
pub mod error;
pub mod graph;

pub use error::{GraphError, PreconditionError, Result};
pub use graph::{Bounds, Edge, EdgeKind, Graph, Position, Vertex, centroid};
