//! Solvers over [`Graph`](crate::Graph).
//!
//! Solvers only read the graph. Each run builds a compressed adjacency index once and works on
//! vertex indices, mapping back to [`Vertex`](crate::Vertex) values for the result.

mod dijkstra;
mod kosaraju;

pub use dijkstra::{ShortestPath, shortest_path};
pub use kosaraju::strongly_connected_components;
