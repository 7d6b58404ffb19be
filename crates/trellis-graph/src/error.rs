use crate::graph::Vertex;

/// Structural validation failures raised by [`Graph`](crate::Graph) mutations.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum GraphError {
    #[error("vertex {vertex} already exists in the graph")]
    DuplicateVertex { vertex: Vertex },

    #[error("edge {from} -> {to} references vertex {missing}, which is not in the graph")]
    MissingEndpoint {
        from: Vertex,
        to: Vertex,
        missing: Vertex,
    },

    #[error("vertex {vertex} is not in the graph")]
    MissingVertex { vertex: Vertex },

    #[error("directed weighted edge {from} -> {to} has negative weight {weight}")]
    NegativeWeight { from: Vertex, to: Vertex, weight: f64 },
}

/// Input violations detected before a solver starts.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PreconditionError {
    #[error("all edges must be weighted for shortest path search (found {from} -> {to})")]
    UnweightedEdgePresent { from: Vertex, to: Vertex },

    #[error("vertex {vertex} is not in the graph")]
    UnknownVertex { vertex: Vertex },

    #[error("graph contains a negative weight edge {from} -> {to} ({weight})")]
    NegativeWeight { from: Vertex, to: Vertex, weight: f64 },
}

pub type Result<T> = std::result::Result<T, GraphError>;
