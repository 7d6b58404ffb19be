use std::cmp::Ordering;
use std::collections::BinaryHeap;

use crate::error::PreconditionError;
use crate::graph::{Adjacency, Graph, Vertex};

/// A minimum-weight path, start and end inclusive.
#[derive(Debug, Clone, PartialEq)]
pub struct ShortestPath {
    pub path: Vec<Vertex>,
    pub distance: f64,
}

#[derive(Debug, Clone, Copy)]
struct QueueEntry {
    distance: f64,
    vertex: usize,
}

impl PartialEq for QueueEntry {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for QueueEntry {}

impl PartialOrd for QueueEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for QueueEntry {
    // Reversed so that `BinaryHeap` pops the smallest tentative distance first.
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .distance
            .total_cmp(&self.distance)
            .then_with(|| other.vertex.cmp(&self.vertex))
    }
}

/// Dijkstra's algorithm from `start` to `end`.
///
/// Preconditions are checked in order: every edge must be weighted, both endpoints must exist,
/// no weight may be negative. An unreachable `end` is `Ok(None)`, not an error.
///
/// Edges are followed from `from` to `to` only; parallel edges are relaxed independently, so
/// the cheapest one wins.
pub fn shortest_path(
    graph: &Graph,
    start: &str,
    end: &str,
) -> Result<Option<ShortestPath>, PreconditionError> {
    if let Some(e) = graph.edges().iter().find(|e| !e.is_weighted()) {
        return Err(PreconditionError::UnweightedEdgePresent {
            from: e.from().clone(),
            to: e.to().clone(),
        });
    }
    let Some(start_ix) = graph.index_of(start) else {
        return Err(PreconditionError::UnknownVertex {
            vertex: Vertex::new(start),
        });
    };
    let Some(end_ix) = graph.index_of(end) else {
        return Err(PreconditionError::UnknownVertex {
            vertex: Vertex::new(end),
        });
    };
    if let Some(e) = graph.edges().iter().find(|e| e.weight() < 0.0) {
        return Err(PreconditionError::NegativeWeight {
            from: e.from().clone(),
            to: e.to().clone(),
            weight: e.weight(),
        });
    }

    let n = graph.vertex_count();
    let edges = graph.edges();
    let adj = Adjacency::from_arcs(n, graph.edge_arcs());

    let mut dist = vec![f64::INFINITY; n];
    let mut prev: Vec<Option<usize>> = vec![None; n];
    let mut queue = BinaryHeap::new();

    dist[start_ix] = 0.0;
    queue.push(QueueEntry {
        distance: 0.0,
        vertex: start_ix,
    });

    while let Some(QueueEntry { distance, vertex }) = queue.pop() {
        if distance > dist[vertex] {
            continue;
        }
        if vertex == end_ix {
            break;
        }
        for (next, arc) in adj.out(vertex) {
            let candidate = distance + edges[arc].weight();
            if candidate < dist[next] {
                dist[next] = candidate;
                prev[next] = Some(vertex);
                queue.push(QueueEntry {
                    distance: candidate,
                    vertex: next,
                });
            }
        }
    }

    if dist[end_ix].is_infinite() {
        return Ok(None);
    }

    let mut path = Vec::new();
    let mut cur = Some(end_ix);
    while let Some(ix) = cur {
        if let Some(v) = graph.vertex_at(ix) {
            path.push(v.clone());
        }
        cur = prev[ix];
    }
    path.reverse();

    Ok(Some(ShortestPath {
        path,
        distance: dist[end_ix],
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::Edge;

    fn graph(vertices: &[&str], edges: &[(&str, &str, f64)]) -> Graph {
        let mut g = Graph::new();
        for v in vertices {
            g.add_vertex(*v).unwrap();
        }
        for (a, b, w) in edges {
            g.add_edge(Edge::weighted(*a, *b, *w)).unwrap();
        }
        g
    }

    fn ids(path: &[Vertex]) -> Vec<&str> {
        path.iter().map(Vertex::id).collect()
    }

    #[test]
    fn queue_pops_smallest_distance_first() {
        let mut q = BinaryHeap::new();
        for (d, v) in [(3.0, 0), (1.0, 1), (2.0, 2)] {
            q.push(QueueEntry {
                distance: d,
                vertex: v,
            });
        }
        let order: Vec<usize> = std::iter::from_fn(|| q.pop().map(|e| e.vertex)).collect();
        assert_eq!(order, vec![1, 2, 0]);
    }

    #[test]
    fn parallel_edges_use_the_cheapest() {
        let g = graph(&["a", "b"], &[("a", "b", 5.0), ("a", "b", 2.0)]);
        let res = shortest_path(&g, "a", "b").unwrap().unwrap();
        assert_eq!(res.distance, 2.0);
        assert_eq!(ids(&res.path), vec!["a", "b"]);
    }

    #[test]
    fn edges_are_followed_forward_only() {
        let g = graph(&["a", "b"], &[("b", "a", 1.0)]);
        assert_eq!(shortest_path(&g, "a", "b").unwrap(), None);
        assert!(shortest_path(&g, "b", "a").unwrap().is_some());
    }

    #[test]
    fn zero_weight_edges_are_allowed() {
        let g = graph(&["a", "b", "c"], &[("a", "b", 0.0), ("b", "c", 0.0)]);
        let res = shortest_path(&g, "a", "c").unwrap().unwrap();
        assert_eq!(res.distance, 0.0);
        assert_eq!(ids(&res.path), vec!["a", "b", "c"]);
    }
}
