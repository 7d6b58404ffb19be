//! Edge model.
//!
//! A single value type covers the four edge shapes used by the solvers. The [`EdgeKind`]
//! discriminant decides whether the edge is directed and whether its weight is meaningful.

use super::Vertex;
use crate::error::GraphError;

/// Discriminant for the edge shapes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EdgeKind {
    /// Directed, weight defaults to `1.0` and carries no meaning.
    Plain,
    /// Directed, unweighted.
    Directed,
    /// Undirected intent with a meaningful weight.
    Weighted,
    /// Directed with a meaningful, non-negative weight.
    DirectedWeighted,
}

impl EdgeKind {
    pub fn is_directed(self) -> bool {
        !matches!(self, EdgeKind::Weighted)
    }

    pub fn is_weighted(self) -> bool {
        matches!(self, EdgeKind::Weighted | EdgeKind::DirectedWeighted)
    }

    /// Stable serialization tag.
    pub fn tag(self) -> &'static str {
        match self {
            EdgeKind::Plain => "plain",
            EdgeKind::Directed => "directed",
            EdgeKind::Weighted => "weighted",
            EdgeKind::DirectedWeighted => "directed_weighted",
        }
    }
}

/// An edge between two vertices.
///
/// Edges compare by `(from, to, weight)`; the kind does not take part in equality.
#[derive(Debug, Clone)]
pub struct Edge {
    from: Vertex,
    to: Vertex,
    weight: f64,
    kind: EdgeKind,
}

impl Edge {
    pub fn plain(from: impl Into<Vertex>, to: impl Into<Vertex>) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
            weight: 1.0,
            kind: EdgeKind::Plain,
        }
    }

    pub fn directed(from: impl Into<Vertex>, to: impl Into<Vertex>) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
            weight: 1.0,
            kind: EdgeKind::Directed,
        }
    }

    pub fn weighted(from: impl Into<Vertex>, to: impl Into<Vertex>, weight: f64) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
            weight,
            kind: EdgeKind::Weighted,
        }
    }

    /// Builds a directed weighted edge, rejecting negative weights.
    pub fn directed_weighted(
        from: impl Into<Vertex>,
        to: impl Into<Vertex>,
        weight: f64,
    ) -> Result<Self, GraphError> {
        let from = from.into();
        let to = to.into();
        if weight < 0.0 {
            return Err(GraphError::NegativeWeight { from, to, weight });
        }
        Ok(Self {
            from,
            to,
            weight,
            kind: EdgeKind::DirectedWeighted,
        })
    }

    pub fn from(&self) -> &Vertex {
        &self.from
    }

    pub fn to(&self) -> &Vertex {
        &self.to
    }

    /// Raw weight; `1.0` for unweighted shapes.
    pub fn weight(&self) -> f64 {
        self.weight
    }

    /// Weight for the weighted shapes, `None` otherwise.
    pub fn meaningful_weight(&self) -> Option<f64> {
        self.kind.is_weighted().then_some(self.weight)
    }

    pub fn kind(&self) -> EdgeKind {
        self.kind
    }

    pub fn is_directed(&self) -> bool {
        self.kind.is_directed()
    }

    pub fn is_weighted(&self) -> bool {
        self.kind.is_weighted()
    }

    pub fn is_self_loop(&self) -> bool {
        self.from == self.to
    }

    pub fn touches(&self, v: &Vertex) -> bool {
        &self.from == v || &self.to == v
    }

    /// Same kind and weight, new endpoints.
    pub fn with_endpoints(&self, from: Vertex, to: Vertex) -> Self {
        Self {
            from,
            to,
            weight: self.weight,
            kind: self.kind,
        }
    }

    pub fn reversed(&self) -> Self {
        self.with_endpoints(self.to.clone(), self.from.clone())
    }

    pub(crate) fn set_weight(&mut self, weight: f64) {
        self.weight = weight;
    }
}

impl PartialEq for Edge {
    fn eq(&self, other: &Self) -> bool {
        self.from == other.from && self.to == other.to && self.weight == other.weight
    }
}
