//! Graph container.
//!
//! The container owns three pieces of state: the vertex set, the ordered edge list, and the
//! position of every vertex. Vertex set and position map share a single `IndexMap`, so the
//! "one position per vertex" invariant holds by construction.
//!
//! Cloning a [`Graph`] produces a structurally independent copy (vertices, edges with their
//! kinds and weights, positions). History snapshots and background solver runs rely on this.

use indexmap::IndexMap;
use rustc_hash::FxBuildHasher;

use crate::error::{GraphError, Result};

mod adjacency;
mod edge;
mod position;
mod vertex;

pub(crate) use adjacency::Adjacency;
pub use edge::{Edge, EdgeKind};
pub use position::{Bounds, Position, centroid};
pub use vertex::Vertex;

type PositionMap = IndexMap<Vertex, Position, FxBuildHasher>;

#[derive(Debug, Clone, Default)]
pub struct Graph {
    positions: PositionMap,
    edges: Vec<Edge>,
}

impl Graph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `vertex` at the origin.
    pub fn add_vertex(&mut self, vertex: impl Into<Vertex>) -> Result<()> {
        let vertex = vertex.into();
        if self.positions.contains_key(&vertex) {
            return Err(GraphError::DuplicateVertex { vertex });
        }
        self.positions.insert(vertex, Position::ORIGIN);
        Ok(())
    }

    /// Appends `edge`. Parallel edges are permitted.
    pub fn add_edge(&mut self, edge: Edge) -> Result<()> {
        for endpoint in [edge.from(), edge.to()] {
            if !self.positions.contains_key(endpoint) {
                return Err(GraphError::MissingEndpoint {
                    from: edge.from().clone(),
                    to: edge.to().clone(),
                    missing: endpoint.clone(),
                });
            }
        }
        self.edges.push(edge);
        Ok(())
    }

    /// Removes the vertex, its incident edges and its position. Returns `false` when absent.
    pub fn remove_vertex(&mut self, id: &str) -> bool {
        if self.positions.shift_remove(id).is_none() {
            return false;
        }
        self.edges.retain(|e| e.from().id() != id && e.to().id() != id);
        true
    }

    /// Removes the first edge equal to `edge`. Returns `false` when none matched.
    pub fn remove_edge(&mut self, edge: &Edge) -> bool {
        let Some(idx) = self.edges.iter().position(|e| e == edge) else {
            return false;
        };
        self.edges.remove(idx);
        true
    }

    /// Rewrites the weight of the first weighted edge `from -> to`.
    pub fn update_edge_weight(&mut self, from: &str, to: &str, weight: f64) -> Result<bool> {
        let Some(edge) = self
            .edges
            .iter_mut()
            .find(|e| e.is_weighted() && e.from().id() == from && e.to().id() == to)
        else {
            return Ok(false);
        };
        if edge.kind() == EdgeKind::DirectedWeighted && weight < 0.0 {
            return Err(GraphError::NegativeWeight {
                from: edge.from().clone(),
                to: edge.to().clone(),
                weight,
            });
        }
        edge.set_weight(weight);
        Ok(true)
    }

    pub fn set_position(&mut self, id: &str, x: f64, y: f64) -> Result<()> {
        let Some(slot) = self.positions.get_mut(id) else {
            return Err(GraphError::MissingVertex {
                vertex: Vertex::new(id),
            });
        };
        *slot = Position::new(x, y);
        Ok(())
    }

    pub fn position(&self, id: &str) -> Option<Position> {
        self.positions.get(id).copied()
    }

    pub fn positions(&self) -> impl Iterator<Item = (&Vertex, &Position)> {
        self.positions.iter()
    }

    /// Shifts every position by `(dx, dy)`.
    pub fn translate(&mut self, dx: f64, dy: f64) {
        for p in self.positions.values_mut() {
            *p = p.translated(dx, dy);
        }
    }

    pub fn bounds(&self) -> Option<Bounds> {
        Bounds::of(self.positions.values())
    }

    pub fn centroid(&self) -> Option<Position> {
        centroid(self.positions.values())
    }

    pub fn contains_vertex(&self, id: &str) -> bool {
        self.positions.contains_key(id)
    }

    pub fn vertex(&self, id: &str) -> Option<&Vertex> {
        self.positions.get_key_value(id).map(|(v, _)| v)
    }

    pub fn vertices(&self) -> impl Iterator<Item = &Vertex> {
        self.positions.keys()
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    pub fn clear(&mut self) {
        self.positions.clear();
        self.edges.clear();
    }

    /// Targets of edges leaving `id`, in edge insertion order.
    pub fn neighbors(&self, id: &str) -> Vec<&Vertex> {
        self.edges
            .iter()
            .filter(|e| e.from().id() == id)
            .map(Edge::to)
            .collect()
    }

    pub fn edges_from<'a>(&'a self, id: &'a str) -> impl Iterator<Item = &'a Edge> + 'a {
        self.edges.iter().filter(move |e| e.from().id() == id)
    }

    pub fn edges_to<'a>(&'a self, id: &'a str) -> impl Iterator<Item = &'a Edge> + 'a {
        self.edges.iter().filter(move |e| e.to().id() == id)
    }

    pub fn contains_edge(&self, from: &str, to: &str) -> bool {
        self.edges_from(from).any(|e| e.to().id() == to)
    }

    /// Weight of the first weighted edge `from -> to`.
    pub fn edge_weight(&self, from: &str, to: &str) -> Option<f64> {
        self.edges_from(from)
            .filter(|e| e.to().id() == to)
            .find_map(Edge::meaningful_weight)
    }

    pub fn out_degree(&self, id: &str) -> usize {
        self.edges_from(id).count()
    }

    pub fn in_degree(&self, id: &str) -> usize {
        self.edges_to(id).count()
    }

    /// Sum of the weights of all weighted edges.
    pub fn total_weight(&self) -> f64 {
        self.edges.iter().filter_map(Edge::meaningful_weight).sum()
    }

    pub fn has_negative_weights(&self) -> bool {
        self.edges
            .iter()
            .filter_map(Edge::meaningful_weight)
            .any(|w| w < 0.0)
    }

    /// Same vertices and positions, every edge reversed.
    pub fn transpose(&self) -> Graph {
        Graph {
            positions: self.positions.clone(),
            edges: self.edges.iter().map(Edge::reversed).collect(),
        }
    }

    pub(crate) fn index_of(&self, id: &str) -> Option<usize> {
        self.positions.get_index_of(id)
    }

    pub(crate) fn vertex_at(&self, ix: usize) -> Option<&Vertex> {
        self.positions.get_index(ix).map(|(v, _)| v)
    }

    /// `(from_ix, to_ix)` for every edge, in edge order.
    pub(crate) fn edge_arcs(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.edges.iter().filter_map(|e| {
            let from = self.index_of(e.from().id())?;
            let to = self.index_of(e.to().id())?;
            Some((from, to))
        })
    }
}
