//! Linear undo/redo history over full session snapshots.

use std::collections::VecDeque;

use trellis_graph::Graph;

use crate::view::ViewTransform;

/// Everything an undo step restores. Snapshots own an independent copy of the graph.
#[derive(Debug, Clone)]
pub struct GraphState {
    pub graph: Graph,
    pub vertex_counter: u64,
    pub view: ViewTransform,
}

#[derive(Debug, Clone, Default)]
pub struct History {
    undo: VecDeque<GraphState>,
    redo: Vec<GraphState>,
    limit: Option<usize>,
}

impl History {
    pub fn new(limit: Option<usize>) -> Self {
        Self {
            limit,
            ..Self::default()
        }
    }

    /// Records the state preceding a new action and drops any pending redo.
    pub fn record(&mut self, state: GraphState) {
        self.push_undo(state);
        if !self.redo.is_empty() {
            tracing::debug!(dropped = self.redo.len(), "redo history invalidated");
            self.redo.clear();
        }
    }

    /// Returns the state to restore, stashing `current` for redo. `None` when there is nothing
    /// to undo, in which case `current` is discarded.
    pub fn undo(&mut self, current: GraphState) -> Option<GraphState> {
        let prev = self.undo.pop_back()?;
        self.redo.push(current);
        tracing::debug!(undo = self.undo.len(), redo = self.redo.len(), "undo");
        Some(prev)
    }

    pub fn redo(&mut self, current: GraphState) -> Option<GraphState> {
        let next = self.redo.pop()?;
        self.push_undo(current);
        tracing::debug!(undo = self.undo.len(), redo = self.redo.len(), "redo");
        Some(next)
    }

    pub fn can_undo(&self) -> bool {
        !self.undo.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo.is_empty()
    }

    pub fn undo_depth(&self) -> usize {
        self.undo.len()
    }

    pub fn redo_depth(&self) -> usize {
        self.redo.len()
    }

    fn push_undo(&mut self, state: GraphState) {
        self.undo.push_back(state);
        if let Some(limit) = self.limit {
            while self.undo.len() > limit {
                self.undo.pop_front();
            }
        }
    }
}
