//! petgraph::StableGraph wrapper with string node ids.

use std::collections::BTreeMap;

use petgraph::stable_graph::{EdgeIndex, NodeIndex, StableGraph};
use petgraph::visit::EdgeRef;
use petgraph::{Directed, Direction};
use serde::{Deserialize, Serialize};
use sysdecomp_core::constants::INFINITE_WEIGHT;
use sysdecomp_core::errors::{GraphError, GraphResult};
use sysdecomp_core::types::FxHashMap;

use super::labels::{cause_label, effect_label};

/// Whether a node stands for a present-state cause or a future-state effect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeKind {
    Cause,
    Effect,
}

/// Annotation keys a pass may write on a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeProperty {
    BackgroundColor,
    Visited,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LineStyle {
    Solid,
    Dashed,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GraphNode {
    pub id: String,
    pub kind: NodeKind,
    /// Cause or effect index of the variable this node stands for.
    pub variable: usize,
    pub properties: BTreeMap<NodeProperty, String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphEdge {
    pub weight: f64,
    pub color: Option<String>,
    pub line_style: Option<LineStyle>,
}

impl GraphEdge {
    pub fn new(weight: f64) -> Self {
        Self {
            weight,
            color: None,
            line_style: None,
        }
    }
}

/// Read access to edge weights, either straight from a graph or through an
/// overlay of pending overrides.
pub trait EdgeView {
    fn graph(&self) -> &AdjacencyGraph;

    fn weight(&self, edge: EdgeIndex) -> f64;

    /// Targets of edges leaving `node`.
    fn children(&self, node: NodeIndex, exclude_zero: bool) -> Vec<NodeIndex> {
        linked(self, node, Direction::Outgoing, exclude_zero)
    }

    /// Sources of edges entering `node`.
    fn parents(&self, node: NodeIndex, exclude_zero: bool) -> Vec<NodeIndex> {
        linked(self, node, Direction::Incoming, exclude_zero)
    }

    /// Children then parents: the undirected neighborhood.
    fn neighbors(&self, node: NodeIndex, exclude_zero: bool) -> Vec<NodeIndex> {
        let mut all = self.children(node, exclude_zero);
        all.extend(self.parents(node, exclude_zero));
        all
    }
}

fn linked<V: EdgeView + ?Sized>(
    view: &V,
    node: NodeIndex,
    direction: Direction,
    exclude_zero: bool,
) -> Vec<NodeIndex> {
    let mut linked: Vec<(EdgeIndex, NodeIndex)> = view
        .graph()
        .graph
        .edges_directed(node, direction)
        .filter(|e| !exclude_zero || view.weight(e.id()) != 0.0)
        .map(|e| {
            let other = if e.source() == node { e.target() } else { e.source() };
            (e.id(), other)
        })
        .collect();
    // petgraph walks adjacency lists newest-first
    linked.sort_by_key(|(edge, _)| *edge);
    linked.into_iter().map(|(_, other)| other).collect()
}

/// Directed weighted graph with O(1) lookup by node id.
#[derive(Debug, Clone, Default)]
pub struct AdjacencyGraph {
    pub graph: StableGraph<GraphNode, GraphEdge, Directed>,
    node_index: FxHashMap<String, NodeIndex>,
}

impl AdjacencyGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Complete bipartite graph: every cause links to every effect with
    /// infinite weight. Causes are added first, then effects.
    pub fn bipartite(causes: usize, effects: usize) -> Self {
        let mut graph = Self::new();
        let cause_nodes: Vec<NodeIndex> = (0..causes)
            .map(|c| graph.ensure_node(&cause_label(c), NodeKind::Cause, c))
            .collect();
        let effect_nodes: Vec<NodeIndex> = (0..effects)
            .map(|e| graph.ensure_node(&effect_label(e), NodeKind::Effect, e))
            .collect();
        for &from in &cause_nodes {
            for &to in &effect_nodes {
                graph.graph.add_edge(from, to, GraphEdge::new(INFINITE_WEIGHT));
            }
        }
        graph
    }

    /// Get or create a node.
    pub fn ensure_node(&mut self, id: &str, kind: NodeKind, variable: usize) -> NodeIndex {
        if let Some(&idx) = self.node_index.get(id) {
            return idx;
        }
        let idx = self.graph.add_node(GraphNode {
            id: id.to_string(),
            kind,
            variable,
            properties: BTreeMap::new(),
        });
        self.node_index.insert(id.to_string(), idx);
        idx
    }

    pub fn add_edge(&mut self, from: &str, to: &str, weight: f64) -> GraphResult<EdgeIndex> {
        let (a, b) = (self.require(from)?, self.require(to)?);
        Ok(self.graph.add_edge(a, b, GraphEdge::new(weight)))
    }

    pub fn index_of(&self, id: &str) -> Option<NodeIndex> {
        self.node_index.get(id).copied()
    }

    pub fn get_node_by_id(&self, id: &str) -> Option<&GraphNode> {
        self.index_of(id).and_then(|idx| self.graph.node_weight(idx))
    }

    pub fn node_id(&self, idx: NodeIndex) -> Option<&str> {
        self.graph.node_weight(idx).map(|n| n.id.as_str())
    }

    /// Node indices in insertion order.
    pub fn node_indices(&self) -> Vec<NodeIndex> {
        self.graph.node_indices().collect()
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Edge from `from` to `to`, in that direction.
    pub fn edge_between(&self, from: NodeIndex, to: NodeIndex) -> Option<EdgeIndex> {
        self.graph.find_edge(from, to)
    }

    /// Edge linking `a` and `b` in either direction.
    pub fn edge_linking(&self, a: NodeIndex, b: NodeIndex) -> Option<EdgeIndex> {
        self.graph.find_edge(a, b).or_else(|| self.graph.find_edge(b, a))
    }

    pub fn edge_weight(&self, from: &str, to: &str) -> Option<f64> {
        let edge = self.graph.find_edge(self.index_of(from)?, self.index_of(to)?)?;
        self.graph.edge_weight(edge).map(|e| e.weight)
    }

    pub fn get_children(&self, id: &str, exclude_zero: bool) -> GraphResult<Vec<&str>> {
        let idx = self.require(id)?;
        Ok(self.ids(self.children(idx, exclude_zero)))
    }

    pub fn get_nodes_pointing_to(&self, id: &str, exclude_zero: bool) -> GraphResult<Vec<&str>> {
        let idx = self.require(id)?;
        Ok(self.ids(self.parents(idx, exclude_zero)))
    }

    pub fn update_edge_weight(
        &mut self,
        from: &str,
        to: &str,
        weight: f64,
        color: Option<&str>,
        line_style: Option<LineStyle>,
    ) -> GraphResult<()> {
        let (a, b) = (self.require(from)?, self.require(to)?);
        let edge = self
            .graph
            .find_edge(a, b)
            .and_then(|e| self.graph.edge_weight_mut(e))
            .ok_or_else(|| GraphError::EdgeNotFound {
                from: from.to_string(),
                to: to.to_string(),
            })?;
        edge.weight = weight;
        if let Some(color) = color {
            edge.color = Some(color.to_string());
        }
        if let Some(style) = line_style {
            edge.line_style = Some(style);
        }
        Ok(())
    }

    pub fn set_property(&mut self, idx: NodeIndex, property: NodeProperty, value: &str) {
        if let Some(node) = self.graph.node_weight_mut(idx) {
            node.properties.insert(property, value.to_string());
        }
    }

    /// Drop `property` from every node.
    pub fn clear_property(&mut self, property: NodeProperty) {
        for node in self.graph.node_weights_mut() {
            node.properties.remove(&property);
        }
    }

    fn require(&self, id: &str) -> GraphResult<NodeIndex> {
        self.index_of(id).ok_or_else(|| GraphError::NodeNotFound {
            node_id: id.to_string(),
        })
    }

    fn ids(&self, nodes: Vec<NodeIndex>) -> Vec<&str> {
        nodes.into_iter().filter_map(|n| self.node_id(n)).collect()
    }
}

impl EdgeView for AdjacencyGraph {
    fn graph(&self) -> &AdjacencyGraph {
        self
    }

    fn weight(&self, edge: EdgeIndex) -> f64 {
        self.graph.edge_weight(edge).map_or(0.0, |e| e.weight)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bipartite_links_every_cause_to_every_effect() {
        let g = AdjacencyGraph::bipartite(2, 3);
        assert_eq!(g.node_count(), 5);
        assert_eq!(g.edge_count(), 6);
        assert_eq!(g.get_children("A", false).unwrap(), vec!["A'", "B'", "C'"]);
        assert_eq!(g.get_nodes_pointing_to("C'", false).unwrap(), vec!["A", "B"]);
        assert_eq!(g.edge_weight("B", "A'"), Some(f64::INFINITY));
    }

    #[test]
    fn zero_weight_edges_can_be_excluded() {
        let mut g = AdjacencyGraph::bipartite(2, 1);
        g.update_edge_weight("A", "A'", 0.0, Some("#ff0000"), Some(LineStyle::Dashed))
            .unwrap();
        assert_eq!(g.get_nodes_pointing_to("A'", true).unwrap(), vec!["B"]);
        assert_eq!(g.get_nodes_pointing_to("A'", false).unwrap(), vec!["A", "B"]);
    }

    #[test]
    fn unknown_nodes_and_edges_are_errors() {
        let mut g = AdjacencyGraph::bipartite(1, 1);
        assert!(matches!(
            g.get_children("Q", false),
            Err(GraphError::NodeNotFound { .. })
        ));
        assert!(matches!(
            g.update_edge_weight("A'", "A", 1.0, None, None),
            Err(GraphError::EdgeNotFound { .. })
        ));
    }
}
