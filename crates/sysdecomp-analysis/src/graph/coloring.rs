//! Two-coloring and connected components over the undirected view of a graph.

use petgraph::stable_graph::NodeIndex;
use serde::{Deserialize, Serialize};
use sysdecomp_core::constants::COLORING_PALETTE;
use sysdecomp_core::errors::{GraphError, GraphResult};
use sysdecomp_core::types::FxHashMap;

use super::adjacency::{AdjacencyGraph, EdgeView, NodeProperty};

/// Colors and components of one coloring run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BipartiteReport {
    /// Color (0 or 1) per node id, in node insertion order.
    pub colors: Vec<(String, u8)>,
    /// Node ids per component, ordered by component id then insertion order.
    pub connected_components: Vec<Vec<String>>,
}

impl BipartiteReport {
    pub fn component_count(&self) -> usize {
        self.connected_components.len()
    }
}

/// Result of [`check_bipartite`]. A conflict is reported here, not raised.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BipartiteMatch {
    pub is_bipartite: bool,
    pub reason: Option<String>,
    pub connected_components: Vec<Vec<String>>,
}

/// Stack-based 2-coloring.
///
/// Nodes are visited in insertion order. A node without neighbors gets color
/// 0 and its own component; any other uncolored node starts a traversal with
/// color 1 and its neighbors alternate. Two adjacent nodes with the same
/// color abort the run with [`GraphError::NotBipartite`].
#[derive(Debug, Clone, Copy, Default)]
pub struct BipartiteColoring {
    exclude_zero: bool,
}

impl BipartiteColoring {
    pub fn new() -> Self {
        Self::default()
    }

    /// Treat zero-weight edges as absent.
    pub fn excluding_zero_weights() -> Self {
        Self { exclude_zero: true }
    }

    pub fn process<V: EdgeView>(&self, view: &V) -> GraphResult<BipartiteReport> {
        let graph = view.graph();
        let order = graph.node_indices();
        let mut color: FxHashMap<NodeIndex, u8> = FxHashMap::default();
        let mut group: FxHashMap<NodeIndex, usize> = FxHashMap::default();
        let mut next_group = 0usize;

        for &start in &order {
            if color.contains_key(&start) {
                continue;
            }
            if view.neighbors(start, self.exclude_zero).is_empty() {
                color.insert(start, 0);
                group.insert(start, next_group);
                next_group += 1;
                continue;
            }

            color.insert(start, 1);
            let mut run = vec![start];
            let mut touched: Option<usize> = None;
            let mut stack = vec![start];
            while let Some(node) = stack.pop() {
                let node_color = color.get(&node).copied().unwrap_or(1);
                for child in view.neighbors(node, self.exclude_zero) {
                    if let Some(&g) = group.get(&child) {
                        touched = Some(touched.map_or(g, |t| t.min(g)));
                    }
                    match color.get(&child) {
                        Some(&c) if c == node_color => {
                            return Err(GraphError::NotBipartite {
                                node_id: graph.node_id(child).unwrap_or_default().to_string(),
                            });
                        }
                        Some(_) => {}
                        None => {
                            color.insert(child, 1 - node_color);
                            run.push(child);
                            stack.push(child);
                        }
                    }
                }
            }

            let id = touched.unwrap_or_else(|| {
                next_group += 1;
                next_group - 1
            });
            for node in run {
                group.insert(node, id);
            }
        }

        let mut components: Vec<(usize, Vec<String>)> = Vec::new();
        for &node in &order {
            let (Some(&g), Some(id)) = (group.get(&node), graph.node_id(node)) else {
                continue;
            };
            match components.iter_mut().find(|(cg, _)| *cg == g) {
                Some((_, members)) => members.push(id.to_string()),
                None => components.push((g, vec![id.to_string()])),
            }
        }
        components.sort_by_key(|(g, _)| *g);

        Ok(BipartiteReport {
            colors: order
                .iter()
                .filter_map(|n| Some((graph.node_id(*n)?.to_string(), *color.get(n)?)))
                .collect(),
            connected_components: components.into_iter().map(|(_, m)| m).collect(),
        })
    }
}

/// Overwrite the color annotations of `graph` with `report`.
///
/// Background colors from earlier runs are cleared first. Nodes reached by a
/// traversal are also marked visited.
pub fn annotate(graph: &mut AdjacencyGraph, report: &BipartiteReport) {
    graph.clear_property(NodeProperty::BackgroundColor);
    graph.clear_property(NodeProperty::Visited);
    let multi: Vec<&String> = report
        .connected_components
        .iter()
        .filter(|c| c.len() > 1)
        .flatten()
        .collect();
    for (id, color) in &report.colors {
        let Some(idx) = graph.index_of(id) else {
            continue;
        };
        graph.set_property(idx, NodeProperty::BackgroundColor, COLORING_PALETTE[usize::from(*color)]);
        if multi.contains(&id) {
            graph.set_property(idx, NodeProperty::Visited, "true");
        }
    }
}

/// Color `graph` over all of its edges and annotate it.
///
/// A non-bipartite graph comes back as `is_bipartite: false` with the
/// conflict as the reason, and with every annotation cleared.
pub fn check_bipartite(graph: &mut AdjacencyGraph) -> BipartiteMatch {
    match BipartiteColoring::new().process(&*graph) {
        Ok(report) => {
            annotate(graph, &report);
            BipartiteMatch {
                is_bipartite: true,
                reason: None,
                connected_components: report.connected_components,
            }
        }
        Err(e) => {
            graph.clear_property(NodeProperty::BackgroundColor);
            graph.clear_property(NodeProperty::Visited);
            BipartiteMatch {
                is_bipartite: false,
                reason: Some(e.to_string()),
                connected_components: Vec::new(),
            }
        }
    }
}
