//! The editing session: live graph, view, selection and history behind one owner.
//!
//! Every mutating operation that changes something records the pre-mutation state first;
//! operations that turn out to be no-ops record nothing. Vertex drags are not recorded.

use futures::executor::block_on;
use rand::SeedableRng;
use rand::rngs::StdRng;
use trellis_graph::{Edge, Graph, GraphError, Position, Vertex};

use crate::algorithm::{AlgorithmJob, AlgorithmKind, AlgorithmOutcome, AlgorithmResult};
use crate::codec::{self, Format};
use crate::config::SessionConfig;
use crate::error::{Error, Result};
use crate::generate::{self, GeneratorKind, GeneratorOptions};
use crate::history::{GraphState, History};
use crate::status::Status;
use crate::view::ViewTransform;
use crate::worker::{AlgorithmTask, AlgorithmWorker};

/// Shortest-path endpoints picked by the user.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    pub start: Option<Vertex>,
    pub end: Option<Vertex>,
}

impl Selection {
    fn forget(&mut self, id: &str) {
        if self.start.as_ref().is_some_and(|v| v.id() == id) {
            self.start = None;
        }
        if self.end.as_ref().is_some_and(|v| v.id() == id) {
            self.end = None;
        }
    }
}

#[derive(Debug)]
pub struct Session {
    config: SessionConfig,
    graph: Graph,
    vertex_counter: u64,
    view: ViewTransform,
    history: History,
    selection: Selection,
    status: Status,
    last_result: Option<AlgorithmResult>,
    rng: StdRng,
    worker: Option<AlgorithmWorker>,
}

impl Default for Session {
    fn default() -> Self {
        Self::with_valid_config(SessionConfig::default())
    }
}

impl Session {
    pub fn new(config: SessionConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::with_valid_config(config))
    }

    fn with_valid_config(config: SessionConfig) -> Self {
        let rng = match config.random_seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self {
            history: History::new(config.history_limit),
            config,
            graph: Graph::new(),
            vertex_counter: 0,
            view: ViewTransform::default(),
            selection: Selection::default(),
            status: Status::Idle,
            last_result: None,
            rng,
            worker: None,
        }
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn graph(&self) -> &Graph {
        &self.graph
    }

    pub fn view(&self) -> ViewTransform {
        self.view
    }

    pub fn vertex_counter(&self) -> u64 {
        self.vertex_counter
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn status(&self) -> &Status {
        &self.status
    }

    pub fn last_result(&self) -> Option<&AlgorithmResult> {
        self.last_result.as_ref()
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    fn snapshot(&self) -> GraphState {
        GraphState {
            graph: self.graph.clone(),
            vertex_counter: self.vertex_counter,
            view: self.view,
        }
    }

    fn record(&mut self) {
        let state = self.snapshot();
        self.history.record(state);
        tracing::debug!(undo = self.history.undo_depth(), "snapshot recorded");
    }

    fn restore(&mut self, state: GraphState) {
        let GraphState {
            graph,
            vertex_counter,
            view,
        } = state;
        self.graph = graph;
        self.vertex_counter = vertex_counter;
        self.view = view;
        let graph = &self.graph;
        for slot in [&mut self.selection.start, &mut self.selection.end] {
            if slot.as_ref().is_some_and(|v| !graph.contains_vertex(v.id())) {
                *slot = None;
            }
        }
    }

    /// Restores the state before the last recorded action. Returns `false` when there is
    /// nothing to undo.
    pub fn undo(&mut self) -> bool {
        let current = self.snapshot();
        match self.history.undo(current) {
            Some(prev) => {
                self.restore(prev);
                true
            }
            None => false,
        }
    }

    pub fn redo(&mut self) -> bool {
        let current = self.snapshot();
        match self.history.redo(current) {
            Some(next) => {
                self.restore(next);
                true
            }
            None => false,
        }
    }

    /// Adds a vertex at the origin. Without an explicit id the next `V<n>` id is used.
    pub fn add_vertex(&mut self, id: Option<&str>) -> Result<Vertex> {
        self.insert_vertex(id, Position::ORIGIN)
    }

    pub fn add_vertex_at(&mut self, x: f64, y: f64) -> Result<Vertex> {
        self.insert_vertex(None, Position::new(x, y))
    }

    fn insert_vertex(&mut self, id: Option<&str>, at: Position) -> Result<Vertex> {
        let vertex = match id {
            Some(id) => Vertex::new(id),
            None => self.next_vertex_id()?,
        };
        if self.graph.contains_vertex(vertex.id()) {
            return Err(GraphError::DuplicateVertex { vertex }.into());
        }
        if !at.is_finite() {
            return Err(Error::NonFinitePosition {
                id: vertex.id().to_string(),
                x: at.x,
                y: at.y,
            });
        }

        self.record();
        self.graph.add_vertex(vertex.clone())?;
        self.graph.set_position(vertex.id(), at.x, at.y)?;
        if let Some(n) = vertex.numeric_suffix() {
            self.vertex_counter = self.vertex_counter.max(n);
        }
        Ok(vertex)
    }

    fn next_vertex_id(&self) -> Result<Vertex> {
        let mut last = self.vertex_counter.max(codec::vertex_counter(&self.graph));
        loop {
            let n = last
                .checked_add(1)
                .ok_or(Error::VertexIdsExhausted { last })?;
            let candidate = Vertex::new(format!("V{n}"));
            if !self.graph.contains_vertex(candidate.id()) {
                return Ok(candidate);
            }
            last = n;
        }
    }

    /// Adds `from -> to`, plus `to -> from` when undirected. Returns `false` without touching
    /// the graph or history when an equivalent edge already exists.
    pub fn add_edge(
        &mut self,
        from: &str,
        to: &str,
        weight: f64,
        directed: bool,
    ) -> Result<bool> {
        if !weight.is_finite() {
            return Err(Error::NonFiniteWeight {
                from: from.to_string(),
                to: to.to_string(),
                weight,
            });
        }
        let edge = if directed {
            Edge::directed_weighted(from, to, weight)?
        } else {
            Edge::weighted(from, to, weight)
        };
        for endpoint in [edge.from(), edge.to()] {
            if !self.graph.contains_vertex(endpoint.id()) {
                return Err(GraphError::MissingEndpoint {
                    from: edge.from().clone(),
                    to: edge.to().clone(),
                    missing: endpoint.clone(),
                }
                .into());
            }
        }

        let exists = self.graph.edges().iter().any(|e| {
            (e.from().id() == from && e.to().id() == to)
                || (!directed && e.from().id() == to && e.to().id() == from)
        });
        if exists {
            return Ok(false);
        }

        self.record();
        let reverse = (!directed && from != to).then(|| edge.reversed());
        self.graph.add_edge(edge)?;
        if let Some(reverse) = reverse {
            self.graph.add_edge(reverse)?;
        }
        Ok(true)
    }

    pub fn remove_edge(&mut self, edge: &Edge) -> bool {
        if !self.graph.edges().contains(edge) {
            return false;
        }
        self.record();
        self.graph.remove_edge(edge)
    }

    pub fn remove_vertex(&mut self, id: &str) -> bool {
        if !self.graph.contains_vertex(id) {
            return false;
        }
        self.record();
        self.selection.forget(id);
        self.graph.remove_vertex(id)
    }

    /// Drags a vertex by `(dx, dy)` logical units. Not recorded in history.
    pub fn move_vertex(&mut self, id: &str, dx: f64, dy: f64) -> Result<()> {
        let Some(p) = self.graph.position(id) else {
            return Err(GraphError::MissingVertex {
                vertex: Vertex::new(id),
            }
            .into());
        };
        let (x, y) = (p.x + dx, p.y + dy);
        if !(x.is_finite() && y.is_finite()) {
            return Err(Error::NonFinitePosition {
                id: id.to_string(),
                x,
                y,
            });
        }
        self.graph.set_position(id, x, y)?;
        Ok(())
    }

    /// First vertex, in insertion order, strictly within the hit radius of `(x, y)`.
    pub fn vertex_at(&self, x: f64, y: f64) -> Option<&Vertex> {
        let probe = Position::new(x, y);
        self.graph
            .positions()
            .find(|(_, p)| p.distance_to(&probe) < self.config.hit_radius)
            .map(|(v, _)| v)
    }

    pub fn clear(&mut self) {
        self.record();
        self.graph.clear();
        self.vertex_counter = 0;
        self.selection = Selection::default();
        self.last_result = None;
    }

    pub fn select_start(&mut self, id: &str) -> Result<()> {
        self.selection.start = Some(self.existing(id)?);
        Ok(())
    }

    pub fn select_end(&mut self, id: &str) -> Result<()> {
        self.selection.end = Some(self.existing(id)?);
        Ok(())
    }

    pub fn clear_selection(&mut self) {
        self.selection = Selection::default();
    }

    fn existing(&self, id: &str) -> Result<Vertex> {
        self.graph.vertex(id).cloned().ok_or_else(|| {
            GraphError::MissingVertex {
                vertex: Vertex::new(id),
            }
            .into()
        })
    }

    pub fn pan(&mut self, dx: f64, dy: f64) {
        self.record();
        self.view.pan(dx, dy);
    }

    pub fn zoom(&mut self, delta: f64) {
        self.record();
        self.view.zoom(delta, self.config.zoom_min, self.config.zoom_max);
    }

    /// Replaces the graph with a generated one, centred on the origin and fitted to the
    /// display budget. Invalid options leave the session untouched.
    pub fn generate(&mut self, kind: GeneratorKind, opts: &GeneratorOptions) -> Result<()> {
        let mut graph = generate::generate(kind, opts, &mut self.rng)?;
        if let Some(c) = graph.centroid() {
            graph.translate(-c.x, -c.y);
        }

        self.record();
        self.view.fit(graph.bounds(), self.config.display_budget);
        self.vertex_counter = codec::vertex_counter(&graph);
        self.graph = graph;
        self.selection = Selection::default();
        self.last_result = None;
        Ok(())
    }

    pub fn export_json(&self) -> Result<String> {
        codec::json::encode(&self.graph)
    }

    pub fn export_csv(&self) -> String {
        codec::csv::encode(&self.graph)
    }

    pub fn import_json(&mut self, text: &str) -> Result<()> {
        self.import(text, Format::Json)
    }

    pub fn import_csv(&mut self, text: &str) -> Result<()> {
        self.import(text, Format::Csv)
    }

    pub fn export(&self, format: Format) -> Result<String> {
        match format {
            Format::Json => self.export_json(),
            Format::Csv => Ok(self.export_csv()),
        }
    }

    /// All-or-nothing: on error the graph, view and history are left as they were.
    pub fn import(&mut self, text: &str, format: Format) -> Result<()> {
        let decoded = match format {
            Format::Json => codec::json::decode(text),
            Format::Csv => codec::csv::decode(text),
        };
        let graph = match decoded {
            Ok(graph) => graph,
            Err(err) => {
                tracing::warn!(?format, error = %err, "import rejected");
                return Err(err);
            }
        };

        self.record();
        self.vertex_counter = codec::vertex_counter(&graph);
        self.graph = graph;
        self.selection = Selection::default();
        self.last_result = None;
        tracing::info!(
            ?format,
            vertices = self.graph.vertex_count(),
            edges = self.graph.edge_count(),
            "imported graph"
        );
        Ok(())
    }

    /// Records a snapshot, copies the graph and starts `kind` on the worker pool.
    ///
    /// The returned task must be handed back through [`Session::apply_outcome`]. Edits made in
    /// the meantime are not seen by the job; a layout outcome still commits positions for the
    /// vertices that remain.
    pub fn spawn_algorithm(&mut self, kind: AlgorithmKind) -> Result<AlgorithmTask> {
        let worker = match self.worker.take() {
            Some(worker) => worker,
            None => match AlgorithmWorker::new(self.config.worker_threads) {
                Ok(worker) => worker,
                Err(err) => {
                    self.status = Status::Failed {
                        message: err.to_string(),
                    };
                    return Err(err);
                }
            },
        };

        self.record();
        self.last_result = None;
        let job = AlgorithmJob {
            kind,
            graph: self.graph.clone(),
            start: self.selection.start.clone(),
            end: self.selection.end.clone(),
            layout: self.config.layout.clone(),
        };
        let task = worker.spawn(job);
        self.worker = Some(worker);
        self.status = Status::Running { kind };
        tracing::debug!(%kind, "algorithm started");
        Ok(task)
    }

    /// Commits a finished job and returns the result shown to the user. Failures become a
    /// [`AlgorithmResult::Message`] carrying the error text.
    pub fn apply_outcome(&mut self, outcome: AlgorithmOutcome) -> AlgorithmResult {
        let AlgorithmOutcome { kind, output } = outcome;
        let result = match output {
            Ok(output) => {
                if let Some(layout) = &output.layout {
                    let applied = layout.commit(&mut self.graph);
                    tracing::info!(
                        applied,
                        iterations = layout.iterations,
                        "layout committed"
                    );
                }
                self.status = Status::Succeeded {
                    message: format!("{kind} executed"),
                };
                output.result
            }
            Err(err) => {
                tracing::warn!(%kind, error = %err, "algorithm failed");
                let message = err.to_string();
                self.status = Status::Failed {
                    message: message.clone(),
                };
                AlgorithmResult::message(message)
            }
        };
        self.last_result = Some(result.clone());
        result
    }

    /// Runs `kind` in the background and waits for it.
    pub fn run_algorithm(&mut self, kind: AlgorithmKind) -> AlgorithmResult {
        let outcome = match self.spawn_algorithm(kind) {
            Ok(task) => block_on(task),
            Err(err) => AlgorithmOutcome {
                kind,
                output: Err(err),
            },
        };
        self.apply_outcome(outcome)
    }
}
