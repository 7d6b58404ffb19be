use crate::graph::{Adjacency, Graph, Vertex};

/// Kosaraju's strongly connected components.
///
/// Edges that are not directed count in both directions. Every vertex lands in exactly one
/// component; isolated vertices and vertices with only a self-loop are singletons.
///
/// Components are returned in discovery order (reverse finish order of the first pass), each
/// listing its members in the order the second pass reached them. Both passes use an explicit
/// stack and visit neighbors in edge insertion order, matching the recursive formulation.
pub fn strongly_connected_components(graph: &Graph) -> Vec<Vec<Vertex>> {
    let n = graph.vertex_count();
    if n == 0 {
        return Vec::new();
    }

    let mut arcs: Vec<(usize, usize)> = Vec::with_capacity(graph.edge_count() * 2);
    for (edge, (from, to)) in graph.edges().iter().zip(graph.edge_arcs()) {
        arcs.push((from, to));
        if !edge.is_directed() {
            arcs.push((to, from));
        }
    }

    let forward = Adjacency::from_arcs(n, arcs.iter().copied());
    let mut visited = vec![false; n];
    let mut finish_order = Vec::with_capacity(n);
    for root in 0..n {
        if visited[root] {
            continue;
        }
        visited[root] = true;
        let mut stack = vec![(root, 0usize)];
        while let Some((v, cursor)) = stack.last_mut() {
            let targets = forward.targets(*v);
            if let Some(&w) = targets.get(*cursor) {
                *cursor += 1;
                if !visited[w] {
                    visited[w] = true;
                    stack.push((w, 0));
                }
            } else {
                finish_order.push(*v);
                stack.pop();
            }
        }
    }

    let transposed = Adjacency::from_arcs(n, arcs.iter().map(|&(from, to)| (to, from)));
    visited.fill(false);
    let mut components = Vec::new();
    for &root in finish_order.iter().rev() {
        if visited[root] {
            continue;
        }
        visited[root] = true;
        let mut members = vec![root];
        let mut stack = vec![(root, 0usize)];
        while let Some((v, cursor)) = stack.last_mut() {
            let targets = transposed.targets(*v);
            if let Some(&w) = targets.get(*cursor) {
                *cursor += 1;
                if !visited[w] {
                    visited[w] = true;
                    members.push(w);
                    stack.push((w, 0));
                }
            } else {
                stack.pop();
            }
        }
        components.push(
            members
                .into_iter()
                .filter_map(|ix| graph.vertex_at(ix).cloned())
                .collect(),
        );
    }

    components
}
