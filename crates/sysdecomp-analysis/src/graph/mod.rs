//! Directed weighted node graph, weight overlays, and bipartite coloring.

pub mod adjacency;
pub mod coloring;
pub mod labels;
pub mod overlay;

pub use adjacency::{AdjacencyGraph, EdgeView, GraphEdge, GraphNode, LineStyle, NodeKind, NodeProperty};
pub use coloring::{annotate, check_bipartite, BipartiteColoring, BipartiteMatch, BipartiteReport};
pub use labels::{cause_label, effect_label};
pub use overlay::{Checkpoint, OverlayView, WeightOverlay};
