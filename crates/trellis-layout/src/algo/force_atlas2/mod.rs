//! ForceAtlas2-style spring embedder.
//!
//! Each step accumulates pairwise repulsion and per-edge attraction into a force per vertex,
//! adds the force to the vertex velocity, moves the vertex by its velocity and finally decays
//! the velocity by `damping` (velocity decays, position does not). The step count is fixed by
//! the caller; there is no convergence check.

use std::collections::BTreeMap;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rustc_hash::FxHashMap;
use trellis_graph::{Graph, Position};

use crate::algo::ForceDirectedOptions;
use crate::error::Result;
use crate::result::LayoutResult;

pub fn layout(graph: &Graph, opts: &ForceDirectedOptions) -> Result<LayoutResult> {
    opts.validate()?;

    let mut rng = StdRng::seed_from_u64(opts.random_seed);
    let mut sim = SimGraph::from_graph(graph, opts, &mut rng);
    for _ in 0..opts.iterations {
        sim.step(opts, &mut rng);
    }

    let positions: BTreeMap<_, _> = graph
        .vertices()
        .zip(&sim.nodes)
        .map(|(v, n)| (v.clone(), Position::new(n.x, n.y)))
        .collect();

    tracing::debug!(
        vertices = sim.nodes.len(),
        edges = sim.edges.len(),
        iterations = opts.iterations,
        jittered = sim.jittered,
        "force-directed layout finished"
    );

    Ok(LayoutResult {
        positions,
        iterations: opts.iterations,
    })
}

#[derive(Debug, Clone, Copy, Default)]
struct SimNode {
    x: f64,
    y: f64,
    vx: f64,
    vy: f64,
    fx: f64,
    fy: f64,
}

#[derive(Debug, Clone, Copy)]
struct SimEdge {
    a: usize,
    b: usize,
    weight: f64,
}

#[derive(Debug, Clone)]
struct SimGraph {
    nodes: Vec<SimNode>,
    edges: Vec<SimEdge>,
    jittered: usize,
}

impl SimGraph {
    fn from_graph(graph: &Graph, opts: &ForceDirectedOptions, rng: &mut StdRng) -> Self {
        let mut index: FxHashMap<&str, usize> = FxHashMap::default();
        let mut nodes = Vec::with_capacity(graph.vertex_count());
        let mut jittered = 0;
        for (ix, (v, p)) in graph.positions().enumerate() {
            index.insert(v.id(), ix);
            let (x, y) = if p.is_finite() {
                (p.x, p.y)
            } else {
                jittered += 1;
                (
                    rng.gen_range(0.0..opts.jitter_span),
                    rng.gen_range(0.0..opts.jitter_span),
                )
            };
            nodes.push(SimNode {
                x,
                y,
                ..Default::default()
            });
        }

        // Self-loops exert no force.
        let edges = graph
            .edges()
            .iter()
            .filter(|e| !e.is_self_loop())
            .filter_map(|e| {
                Some(SimEdge {
                    a: *index.get(e.from().id())?,
                    b: *index.get(e.to().id())?,
                    weight: e.weight().max(0.0),
                })
            })
            .collect();

        Self {
            nodes,
            edges,
            jittered,
        }
    }

    fn step(&mut self, opts: &ForceDirectedOptions, rng: &mut StdRng) {
        self.apply_repulsion(opts, rng);
        self.apply_attraction(opts);
        self.integrate(opts);
    }

    fn apply_repulsion(&mut self, opts: &ForceDirectedOptions, rng: &mut StdRng) {
        let k = opts.scaling_ratio * opts.scaling_ratio;
        let n = self.nodes.len();
        for i in 0..n {
            for j in (i + 1)..n {
                let (mut dx, mut dy) = (
                    self.nodes[i].x - self.nodes[j].x,
                    self.nodes[i].y - self.nodes[j].y,
                );
                let mut dist = (dx * dx + dy * dy).sqrt();
                if dist < opts.epsilon {
                    // Coincident vertices have no direction; pick one so they can separate.
                    let angle = rng.gen_range(0.0..std::f64::consts::TAU);
                    dx = angle.cos() * opts.epsilon;
                    dy = angle.sin() * opts.epsilon;
                    dist = opts.epsilon;
                }
                let force = k / dist;
                let (ux, uy) = (dx / dist, dy / dist);
                self.nodes[i].fx += ux * force;
                self.nodes[i].fy += uy * force;
                self.nodes[j].fx -= ux * force;
                self.nodes[j].fy -= uy * force;
            }
        }
    }

    fn apply_attraction(&mut self, opts: &ForceDirectedOptions) {
        for e in &self.edges {
            let dx = self.nodes[e.a].x - self.nodes[e.b].x;
            let dy = self.nodes[e.a].y - self.nodes[e.b].y;
            let dist = (dx * dx + dy * dy).sqrt();
            if dist <= 0.0 {
                continue;
            }
            let spring = if opts.lin_log_mode {
                dist.ln_1p()
            } else {
                dist
            };
            let force =
                spring / (opts.scaling_ratio * (1.0 + opts.edge_weight_influence * e.weight));
            let (ux, uy) = (dx / dist, dy / dist);
            self.nodes[e.a].fx -= ux * force;
            self.nodes[e.a].fy -= uy * force;
            self.nodes[e.b].fx += ux * force;
            self.nodes[e.b].fy += uy * force;
        }
    }

    fn integrate(&mut self, opts: &ForceDirectedOptions) {
        for n in &mut self.nodes {
            n.vx += n.fx;
            n.vy += n.fy;
            let speed = (n.vx * n.vx + n.vy * n.vy).sqrt();
            if speed > opts.max_displacement {
                let s = opts.max_displacement / speed;
                n.vx *= s;
                n.vy *= s;
            }
            n.x += n.vx;
            n.y += n.vy;
            n.vx *= opts.damping;
            n.vy *= opts.damping;
            n.fx = 0.0;
            n.fy = 0.0;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use trellis_graph::alg::strongly_connected_components;
    use trellis_graph::{Edge, Vertex};

    fn graph(points: &[(&str, f64, f64)], edges: &[(&str, &str)]) -> Graph {
        let mut g = Graph::new();
        for (id, x, y) in points {
            g.add_vertex(*id).unwrap();
            g.set_position(id, *x, *y).unwrap();
        }
        for (a, b) in edges {
            g.add_edge(Edge::directed(*a, *b)).unwrap();
        }
        g
    }

    fn pos(res: &LayoutResult, id: &str) -> Position {
        res.positions[&Vertex::new(id)]
    }

    #[test]
    fn empty_graph_yields_no_positions() {
        let res = layout(&Graph::new(), &ForceDirectedOptions::default()).unwrap();
        assert!(res.positions.is_empty());
    }

    #[test]
    fn zero_iterations_keep_initial_positions() {
        let g = graph(&[("a", 1.0, 2.0), ("b", -3.0, 4.0)], &[("a", "b")]);
        let opts = ForceDirectedOptions {
            iterations: 0,
            ..Default::default()
        };
        let res = layout(&g, &opts).unwrap();
        assert_eq!(pos(&res, "a"), Position::new(1.0, 2.0));
        assert_eq!(pos(&res, "b"), Position::new(-3.0, 4.0));
    }

    #[test]
    fn coincident_unconnected_vertices_separate() {
        let g = graph(&[("a", 0.0, 0.0), ("b", 0.0, 0.0)], &[]);
        let res = layout(&g, &ForceDirectedOptions::default()).unwrap();
        assert!(pos(&res, "a").distance_to(&pos(&res, "b")) > 1.0);
    }

    #[test]
    fn distant_connected_vertices_are_pulled_together() {
        let g = graph(&[("a", 0.0, 0.0), ("b", 1000.0, 0.0)], &[("a", "b")]);
        let res = layout(&g, &ForceDirectedOptions::default()).unwrap();
        assert!(pos(&res, "a").distance_to(&pos(&res, "b")) < 100.0);
    }

    #[test]
    fn non_finite_positions_are_jittered_into_the_box() {
        let g = graph(&[("a", f64::NAN, 0.0)], &[]);
        let opts = ForceDirectedOptions {
            iterations: 0,
            jitter_span: 10.0,
            ..Default::default()
        };
        let p = pos(&layout(&g, &opts).unwrap(), "a");
        assert!((0.0..10.0).contains(&p.x) && (0.0..10.0).contains(&p.y));
    }

    #[test]
    fn same_seed_same_layout() {
        let g = graph(
            &[("a", 0.0, 0.0), ("b", 0.0, 0.0), ("c", 5.0, 5.0)],
            &[("a", "c")],
        );
        let opts = ForceDirectedOptions {
            random_seed: 7,
            ..Default::default()
        };
        assert_eq!(layout(&g, &opts).unwrap(), layout(&g, &opts).unwrap());
    }

    #[test]
    fn topology_is_untouched() {
        let mut g = graph(
            &[("a", 0.0, 0.0), ("b", 10.0, 0.0), ("c", 0.0, 10.0), ("d", 3.0, 3.0)],
            &[("a", "b"), ("b", "c"), ("c", "a"), ("d", "d")],
        );
        let before = strongly_connected_components(&g);
        let edges_before: Vec<Edge> = g.edges().to_vec();

        crate::apply(&mut g, &crate::Algorithm::default()).unwrap();

        assert_eq!(strongly_connected_components(&g), before);
        assert_eq!(g.edges(), edges_before.as_slice());
        assert!(g.positions().all(|(_, p)| p.is_finite()));
    }
}
