use trellis_graph::{GraphError, PreconditionError};

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Graph(#[from] GraphError),

    #[error(transparent)]
    Precondition(#[from] PreconditionError),

    #[error(transparent)]
    Layout(#[from] trellis_layout::Error),

    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV parse error on line {line}: {message}")]
    Csv { line: usize, message: String },

    #[error("Edge references unknown vertex {id}")]
    UnknownVertexReference { id: String },

    #[error("Edge {from} -> {to} has non-finite weight {weight}")]
    NonFiniteWeight { from: String, to: String, weight: f64 },

    #[error("Vertex {id} cannot be placed at non-finite position ({x}, {y})")]
    NonFinitePosition { id: String, x: f64, y: f64 },

    #[error("No vertex ids left after V{last}")]
    VertexIdsExhausted { last: u64 },

    #[error("Invalid generator options: {message}")]
    InvalidGeneratorOptions { message: String },

    #[error("Invalid session config: {message}")]
    InvalidConfig { message: String },

    #[error("Background job failed: {message}")]
    Worker { message: String },
}
