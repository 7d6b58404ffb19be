//! Random graph construction for demos and tests.
//!
//! Vertices are named `V1..=Vn` and placed at random integer coordinates in
//! `[100, 700) x [100, 600)`. Weights are sampled uniformly from `[min_weight, max_weight)`.

use std::collections::VecDeque;

use rand::Rng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};
use trellis_graph::{Edge, Graph, Vertex};

use crate::error::{Error, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum GeneratorKind {
    /// Directed weighted edge for every ordered pair with probability `edge_probability`.
    Random,
    /// Spanning tree with randomly oriented directed weighted edges.
    Tree,
    /// Undirected-intent graph: each sampled unordered pair gets a weighted edge both ways.
    Weighted,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GeneratorOptions {
    pub vertex_count: usize,
    pub edge_probability: f64,
    pub min_weight: f64,
    pub max_weight: f64,
}

impl Default for GeneratorOptions {
    fn default() -> Self {
        Self {
            vertex_count: 10,
            edge_probability: 0.3,
            min_weight: 1.0,
            max_weight: 10.0,
        }
    }
}

impl GeneratorOptions {
    pub fn validate(&self, kind: GeneratorKind) -> Result<()> {
        let invalid = |message: String| Err(Error::InvalidGeneratorOptions { message });

        if !(0.0..=1.0).contains(&self.edge_probability) {
            return invalid(format!(
                "edge probability must be in [0, 1], got {}",
                self.edge_probability
            ));
        }
        if !(self.min_weight.is_finite() && self.max_weight.is_finite()) {
            return invalid("weights must be finite".to_string());
        }
        if self.min_weight > self.max_weight {
            return invalid(format!(
                "min weight {} exceeds max weight {}",
                self.min_weight, self.max_weight
            ));
        }
        if !(self.max_weight - self.min_weight).is_finite() {
            return invalid(format!(
                "weight range [{}, {}] is too wide to sample",
                self.min_weight, self.max_weight
            ));
        }
        if kind != GeneratorKind::Weighted && self.min_weight < 0.0 {
            return invalid(format!(
                "directed weighted edges need non-negative weights, min weight is {}",
                self.min_weight
            ));
        }
        Ok(())
    }
}

pub fn generate<R: Rng + ?Sized>(
    kind: GeneratorKind,
    opts: &GeneratorOptions,
    rng: &mut R,
) -> Result<Graph> {
    opts.validate(kind)?;

    let mut graph = Graph::new();
    let vertices: Vec<Vertex> = (1..=opts.vertex_count)
        .map(|i| Vertex::new(format!("V{i}")))
        .collect();
    for v in &vertices {
        graph.add_vertex(v.clone())?;
        let x = rng.gen_range(100..700) as f64;
        let y = rng.gen_range(100..600) as f64;
        graph.set_position(v.id(), x, y)?;
    }

    match kind {
        GeneratorKind::Random => {
            for from in &vertices {
                for to in &vertices {
                    if from != to && rng.gen_bool(opts.edge_probability) {
                        let w = sample_weight(opts, rng);
                        graph.add_edge(Edge::directed_weighted(from.clone(), to.clone(), w)?)?;
                    }
                }
            }
        }
        GeneratorKind::Tree => build_tree(&mut graph, &vertices, opts, rng)?,
        GeneratorKind::Weighted => {
            for (i, a) in vertices.iter().enumerate() {
                for b in &vertices[i + 1..] {
                    if rng.gen_bool(opts.edge_probability) {
                        let w = sample_weight(opts, rng);
                        graph.add_edge(Edge::weighted(a.clone(), b.clone(), w))?;
                        graph.add_edge(Edge::weighted(b.clone(), a.clone(), w))?;
                    }
                }
            }
        }
    }

    tracing::info!(
        ?kind,
        vertices = graph.vertex_count(),
        edges = graph.edge_count(),
        "generated graph"
    );
    Ok(graph)
}

/// Breadth-first: every dequeued vertex adopts one or two random unvisited vertices.
fn build_tree<R: Rng + ?Sized>(
    graph: &mut Graph,
    vertices: &[Vertex],
    opts: &GeneratorOptions,
    rng: &mut R,
) -> Result<()> {
    let Some(root) = vertices.first() else {
        return Ok(());
    };
    let mut unvisited: Vec<&Vertex> = vertices[1..].iter().collect();
    let mut queue = VecDeque::from([root]);

    while !unvisited.is_empty() {
        let Some(parent) = queue.pop_front() else {
            break;
        };
        let take = rng.gen_range(1..=unvisited.len().min(2));
        unvisited.shuffle(rng);
        for child in unvisited.drain(..take).collect::<Vec<_>>() {
            attach(graph, parent, child, opts, rng)?;
            queue.push_back(child);
        }
    }

    // Stragglers hang off the root.
    for child in unvisited {
        attach(graph, root, child, opts, rng)?;
    }
    Ok(())
}

fn attach<R: Rng + ?Sized>(
    graph: &mut Graph,
    parent: &Vertex,
    child: &Vertex,
    opts: &GeneratorOptions,
    rng: &mut R,
) -> Result<()> {
    let w = sample_weight(opts, rng);
    let edge = if rng.gen_bool(0.5) {
        Edge::directed_weighted(parent.clone(), child.clone(), w)?
    } else {
        Edge::directed_weighted(child.clone(), parent.clone(), w)?
    };
    graph.add_edge(edge)?;
    Ok(())
}

fn sample_weight<R: Rng + ?Sized>(opts: &GeneratorOptions, rng: &mut R) -> f64 {
    if opts.min_weight < opts.max_weight {
        rng.gen_range(opts.min_weight..opts.max_weight)
    } else {
        opts.min_weight
    }
}
