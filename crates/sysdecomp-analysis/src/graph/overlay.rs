//! Scratch edge-weight overrides layered over a shared graph.
//!
//! Trial removals write into a `WeightOverlay` instead of cloning the graph.
//! Every write is logged so a trial can be rolled back to a checkpoint.

use petgraph::stable_graph::EdgeIndex;
use sysdecomp_core::types::FxHashMap;

use super::adjacency::{AdjacencyGraph, EdgeView};

/// Position in the overlay's undo log.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Checkpoint(usize);

#[derive(Debug, Clone, Default)]
pub struct WeightOverlay {
    overrides: FxHashMap<EdgeIndex, f64>,
    undo: Vec<(EdgeIndex, Option<f64>)>,
}

impl WeightOverlay {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, edge: EdgeIndex, weight: f64) {
        let previous = self.overrides.insert(edge, weight);
        self.undo.push((edge, previous));
    }

    pub fn get(&self, edge: EdgeIndex) -> Option<f64> {
        self.overrides.get(&edge).copied()
    }

    pub fn checkpoint(&self) -> Checkpoint {
        Checkpoint(self.undo.len())
    }

    /// Undo every write made since `checkpoint`.
    pub fn rollback(&mut self, checkpoint: Checkpoint) {
        while self.undo.len() > checkpoint.0 {
            let Some((edge, previous)) = self.undo.pop() else {
                break;
            };
            match previous {
                Some(weight) => self.overrides.insert(edge, weight),
                None => self.overrides.remove(&edge),
            };
        }
    }

    pub fn len(&self) -> usize {
        self.overrides.len()
    }

    pub fn is_empty(&self) -> bool {
        self.overrides.is_empty()
    }

    pub fn view<'a>(&'a self, graph: &'a AdjacencyGraph) -> OverlayView<'a> {
        OverlayView {
            graph,
            overlay: self,
        }
    }

    /// Write every override into `graph` and clear the overlay.
    pub fn apply_to(&mut self, graph: &mut AdjacencyGraph) {
        for (edge, weight) in self.overrides.drain() {
            if let Some(e) = graph.graph.edge_weight_mut(edge) {
                e.weight = weight;
            }
        }
        self.undo.clear();
    }
}

/// A graph seen through an overlay: overridden edges report the override.
#[derive(Debug, Clone, Copy)]
pub struct OverlayView<'a> {
    graph: &'a AdjacencyGraph,
    overlay: &'a WeightOverlay,
}

impl EdgeView for OverlayView<'_> {
    fn graph(&self) -> &AdjacencyGraph {
        self.graph
    }

    fn weight(&self, edge: EdgeIndex) -> f64 {
        self.overlay
            .get(edge)
            .unwrap_or_else(|| self.graph.weight(edge))
    }
}
