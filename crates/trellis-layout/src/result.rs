use std::collections::BTreeMap;

use trellis_graph::{Graph, Position, Vertex};

#[derive(Debug, Clone, PartialEq)]
pub struct LayoutResult {
    pub positions: BTreeMap<Vertex, Position>,
    pub iterations: usize,
}

impl LayoutResult {
    /// Writes the computed positions into `graph`.
    ///
    /// Vertices removed from `graph` since the layout was computed are skipped. Returns the
    /// number of positions applied.
    pub fn commit(&self, graph: &mut Graph) -> usize {
        let mut applied = 0;
        for (v, p) in &self.positions {
            if graph.set_position(v.id(), p.x, p.y).is_ok() {
                applied += 1;
            }
        }
        applied
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn commit_skips_vertices_that_disappeared() {
        let mut g = Graph::new();
        g.add_vertex("a").unwrap();
        let result = LayoutResult {
            positions: BTreeMap::from([
                (Vertex::new("a"), Position::new(1.0, 2.0)),
                (Vertex::new("gone"), Position::new(3.0, 4.0)),
            ]),
            iterations: 1,
        };
        assert_eq!(result.commit(&mut g), 1);
        assert_eq!(g.position("a"), Some(Position::new(1.0, 2.0)));
        assert!(!g.contains_vertex("gone"));
    }
}
