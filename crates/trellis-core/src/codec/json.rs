//! JSON document:
//!
//! ```json
//! {
//!   "vertices": [{"id": "V1"}, {"id": "V2"}],
//!   "edges": [{"type": "directed_weighted", "from": "V1", "to": "V2", "weight": 2.5}],
//!   "positions": {"V1": {"x": 0.0, "y": 0.0}, "V2": {"x": 10.0, "y": 5.0}}
//! }
//! ```
//!
//! Edge `type` is one of `directed`, `weighted` or `directed_weighted`. Plain edges are written
//! as `directed`.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use trellis_graph::{Edge, EdgeKind, Graph, Position};

use crate::error::{Error, Result};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphDocument {
    pub vertices: Vec<VertexEntry>,
    pub edges: Vec<EdgeEntry>,
    pub positions: IndexMap<String, Position>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VertexEntry {
    pub id: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum EdgeEntry {
    Directed {
        from: String,
        to: String,
    },
    Weighted {
        from: String,
        to: String,
        weight: f64,
    },
    DirectedWeighted {
        from: String,
        to: String,
        weight: f64,
    },
}

impl EdgeEntry {
    fn endpoints(&self) -> (&str, &str) {
        match self {
            EdgeEntry::Directed { from, to }
            | EdgeEntry::Weighted { from, to, .. }
            | EdgeEntry::DirectedWeighted { from, to, .. } => (from, to),
        }
    }
}

impl From<&Edge> for EdgeEntry {
    fn from(edge: &Edge) -> Self {
        let from = edge.from().id().to_string();
        let to = edge.to().id().to_string();
        match edge.kind() {
            EdgeKind::Plain | EdgeKind::Directed => EdgeEntry::Directed { from, to },
            EdgeKind::Weighted => EdgeEntry::Weighted {
                from,
                to,
                weight: edge.weight(),
            },
            EdgeKind::DirectedWeighted => EdgeEntry::DirectedWeighted {
                from,
                to,
                weight: edge.weight(),
            },
        }
    }
}

impl GraphDocument {
    pub fn from_graph(graph: &Graph) -> Self {
        Self {
            vertices: graph
                .vertices()
                .map(|v| VertexEntry {
                    id: v.id().to_string(),
                })
                .collect(),
            edges: graph.edges().iter().map(EdgeEntry::from).collect(),
            positions: graph
                .positions()
                .map(|(v, p)| (v.id().to_string(), *p))
                .collect(),
        }
    }

    /// Builds the graph: vertices first, then positions, then edges.
    pub fn into_graph(self) -> Result<Graph> {
        let mut graph = Graph::new();
        for v in self.vertices {
            graph.add_vertex(v.id)?;
        }
        for (id, p) in &self.positions {
            if !graph.contains_vertex(id) {
                return Err(Error::UnknownVertexReference { id: id.clone() });
            }
            graph.set_position(id, p.x, p.y)?;
        }
        for entry in self.edges {
            let (from, to) = entry.endpoints();
            for id in [from, to] {
                if !graph.contains_vertex(id) {
                    return Err(Error::UnknownVertexReference { id: id.to_string() });
                }
            }
            let edge = match entry {
                EdgeEntry::Directed { from, to } => Edge::directed(from, to),
                EdgeEntry::Weighted { from, to, weight } => Edge::weighted(from, to, weight),
                EdgeEntry::DirectedWeighted { from, to, weight } => {
                    Edge::directed_weighted(from, to, weight)?
                }
            };
            graph.add_edge(edge)?;
        }
        Ok(graph)
    }
}

pub fn encode(graph: &Graph) -> Result<String> {
    Ok(serde_json::to_string(&GraphDocument::from_graph(graph))?)
}

pub fn encode_pretty(graph: &Graph) -> Result<String> {
    Ok(serde_json::to_string_pretty(&GraphDocument::from_graph(graph))?)
}

pub fn decode(text: &str) -> Result<Graph> {
    let doc: GraphDocument = serde_json::from_str(text)?;
    doc.into_graph()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn encodes_the_documented_shape() {
        let mut g = Graph::new();
        g.add_vertex("V1").unwrap();
        g.add_vertex("V2").unwrap();
        g.set_position("V2", 10.0, 5.0).unwrap();
        g.add_edge(Edge::directed_weighted("V1", "V2", 2.5).unwrap()).unwrap();
        g.add_edge(Edge::plain("V2", "V1")).unwrap();

        let value: serde_json::Value = serde_json::from_str(&encode(&g).unwrap()).unwrap();
        assert_eq!(
            value,
            json!({
                "vertices": [{"id": "V1"}, {"id": "V2"}],
                "edges": [
                    {"type": "directed_weighted", "from": "V1", "to": "V2", "weight": 2.5},
                    {"type": "directed", "from": "V2", "to": "V1"}
                ],
                "positions": {"V1": {"x": 0.0, "y": 0.0}, "V2": {"x": 10.0, "y": 5.0}}
            })
        );
    }

    #[test]
    fn unknown_edge_endpoint_is_rejected() {
        let text = r#"{"vertices":[{"id":"a"}],"edges":[{"type":"directed","from":"a","to":"b"}],"positions":{}}"#;
        assert!(matches!(
            decode(text),
            Err(Error::UnknownVertexReference { id }) if id == "b"
        ));
    }

    #[test]
    fn negative_directed_weight_is_rejected() {
        let text = r#"{"vertices":[{"id":"a"},{"id":"b"}],"edges":[{"type":"directed_weighted","from":"a","to":"b","weight":-1}],"positions":{}}"#;
        assert!(matches!(decode(text), Err(Error::Graph(_))));
    }

    #[test]
    fn unknown_edge_type_is_a_json_error() {
        let text = r#"{"vertices":[],"edges":[{"type":"hyper","from":"a","to":"b"}],"positions":{}}"#;
        assert!(matches!(decode(text), Err(Error::Json(_))));
    }
}
