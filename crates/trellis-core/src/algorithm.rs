//! Algorithm dispatch over a graph snapshot.

use std::fmt;

use serde::{Deserialize, Serialize};
use trellis_graph::alg::{shortest_path, strongly_connected_components};
use trellis_graph::{Graph, Vertex};
use trellis_layout::{Algorithm, ForceDirectedOptions, LayoutResult};

use crate::error::Result;

pub const SELECT_ENDPOINTS_MESSAGE: &str = "Select start and end vertices";
pub const NO_PATH_MESSAGE: &str = "No path found";
pub const LAYOUT_APPLIED_MESSAGE: &str = "Layout applied";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum AlgorithmKind {
    ShortestPath,
    StronglyConnected,
    Layout,
}

impl AlgorithmKind {
    pub fn name(self) -> &'static str {
        match self {
            AlgorithmKind::ShortestPath => "shortest-path",
            AlgorithmKind::StronglyConnected => "strongly-connected",
            AlgorithmKind::Layout => "layout",
        }
    }
}

impl fmt::Display for AlgorithmKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// What a run hands to the rendering side.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum AlgorithmResult {
    ShortestPath { path: Vec<Vertex>, distance: f64 },
    ConnectedComponents { components: Vec<Vec<Vertex>> },
    Message { text: String },
}

impl AlgorithmResult {
    pub fn message(text: impl Into<String>) -> Self {
        Self::Message { text: text.into() }
    }
}

/// A self-contained unit of work: the graph is a copy taken when the job was created.
#[derive(Debug, Clone)]
pub struct AlgorithmJob {
    pub kind: AlgorithmKind,
    pub graph: Graph,
    pub start: Option<Vertex>,
    pub end: Option<Vertex>,
    pub layout: ForceDirectedOptions,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AlgorithmOutput {
    pub result: AlgorithmResult,
    /// New positions to commit, layout runs only.
    pub layout: Option<LayoutResult>,
}

impl AlgorithmOutput {
    fn result(result: AlgorithmResult) -> Self {
        Self {
            result,
            layout: None,
        }
    }
}

#[derive(Debug)]
pub struct AlgorithmOutcome {
    pub kind: AlgorithmKind,
    pub output: Result<AlgorithmOutput>,
}

impl AlgorithmJob {
    pub fn execute(self) -> Result<AlgorithmOutput> {
        match self.kind {
            AlgorithmKind::ShortestPath => {
                let (Some(start), Some(end)) = (&self.start, &self.end) else {
                    return Ok(AlgorithmOutput::result(AlgorithmResult::message(
                        SELECT_ENDPOINTS_MESSAGE,
                    )));
                };
                let result = match shortest_path(&self.graph, start.id(), end.id())? {
                    Some(found) => AlgorithmResult::ShortestPath {
                        path: found.path,
                        distance: found.distance.max(0.0),
                    },
                    None => AlgorithmResult::message(NO_PATH_MESSAGE),
                };
                Ok(AlgorithmOutput::result(result))
            }
            AlgorithmKind::StronglyConnected => Ok(AlgorithmOutput::result(
                AlgorithmResult::ConnectedComponents {
                    components: strongly_connected_components(&self.graph),
                },
            )),
            AlgorithmKind::Layout => {
                let positions =
                    trellis_layout::layout(&self.graph, &Algorithm::ForceDirected(self.layout))?;
                Ok(AlgorithmOutput {
                    result: AlgorithmResult::message(LAYOUT_APPLIED_MESSAGE),
                    layout: Some(positions),
                })
            }
        }
    }
}
