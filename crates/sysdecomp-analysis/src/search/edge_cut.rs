//! Greedy edge-removal search over the complete cause/effect graph.
//!
//! Every cause→effect edge is scored by the distributional change caused by
//! removing that cause from the effect. Zero-cost edges are redundant and
//! removed for good. A single finite edge whose removal splits the graph in
//! two is then looked for directly; failing that, the heatmap sweep
//! approximates a min cut over the cost matrix.

use std::time::Instant;

use petgraph::stable_graph::{EdgeIndex, NodeIndex};
use serde::{Deserialize, Serialize};
use sysdecomp_core::constants::REMOVED_WEIGHT;
use sysdecomp_core::errors::{GraphError, TensorError};
use sysdecomp_core::tracing::fields;
use sysdecomp_core::{BinaryDistribution, EngineResult, NodePartition, SearchStats, TransitionMatrix};
use tracing::field::Empty;

use super::cost_matrix::CostMatrix;
use super::sweep::heatmap_sweep;
use crate::distance::DistanceMetric;
use crate::graph::{
    effect_label, AdjacencyGraph, BipartiteColoring, BipartiteReport, EdgeView, LineStyle,
    WeightOverlay,
};
use crate::tensor::{binary_position, expand, product_tensor, recursive_marginalization};
use crate::tensor::{MarginalAxis, Projection};

/// Outcome of scoring one edge.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EdgeRemoval {
    pub cause: usize,
    pub effect: usize,
    pub from: String,
    pub to: String,
    pub cost: f64,
    /// The cause was redundant and its edge stays removed.
    pub adopted: bool,
}

/// A two-sided node cut and the cost of the edges it crosses.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CutCandidate {
    pub cost: f64,
    pub partition: NodePartition,
}

#[derive(Debug, Clone)]
pub struct EdgeCutReport {
    /// Cut found by edge removal alone.
    pub direct: Option<CutCandidate>,
    /// Heatmap sweep result. Only computed when there is no direct cut.
    pub sweep: Option<CutCandidate>,
    pub costs: CostMatrix,
    pub removals: Vec<EdgeRemoval>,
    /// Final graph: scored weights, redundant edges and the direct cut zeroed
    /// and dashed, every other edge solid.
    pub graph: AdjacencyGraph,
    /// Matrix with every redundant cause averaged out of its effect.
    pub reduced_matrix: TransitionMatrix,
    pub stats: SearchStats,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct EdgeCutSearch {
    metric: DistanceMetric,
}

impl EdgeCutSearch {
    pub fn new(metric: DistanceMetric) -> Self {
        Self { metric }
    }

    pub fn search(
        &self,
        matrix: &TransitionMatrix,
        distribution: &BinaryDistribution,
        present_count: usize,
        future_count: usize,
    ) -> EngineResult<EdgeCutReport> {
        let started = Instant::now();
        check_counts(matrix, distribution, present_count, future_count)?;
        let span = tracing::info_span!(
            "edge_cut_search",
            causes = present_count,
            effects = future_count,
            edges_evaluated = Empty,
            edges_removed = Empty,
            elapsed_ms = Empty,
        );
        let _guard = span.enter();

        let mut graph = AdjacencyGraph::bipartite(present_count, future_count);
        let mut overlay = WeightOverlay::new();
        let mut costs = CostMatrix::new(present_count, future_count);
        let mut removals = Vec::new();
        let mut stats = SearchStats::default();

        let row = binary_position(distribution.bits(), Projection::Full);
        let original = product_tensor(matrix.view(), Some(row))?.row(0).to_vec();
        let mut current = matrix.clone();

        for effect in 0..future_count {
            let effect_node = graph.index_of(&effect_label(effect)).ok_or_else(|| {
                GraphError::NodeNotFound {
                    node_id: effect_label(effect),
                }
            })?;
            let mut linked: Vec<_> = overlay
                .view(&graph)
                .parents(effect_node, true)
                .into_iter()
                .filter_map(|n| graph.graph.node_weight(n).map(|w| (w.variable, n)))
                .collect();
            linked.sort_by_key(|(cause, _)| *cause);

            for (cause, cause_node) in linked {
                let edge = graph
                    .edge_between(cause_node, effect_node)
                    .ok_or_else(|| missing_edge(&graph, cause_node, effect_node))?;
                let checkpoint = overlay.checkpoint();
                overlay.set(edge, REMOVED_WEIGHT);

                let reduced = without_cause(&current, effect, cause)?;
                let scored = product_tensor(reduced.view(), Some(row))?.row(0).to_vec();
                let cost = self.metric.score(&original, &scored);
                stats.edges_evaluated += 1;
                costs.set(cause, effect, cost);

                let adopted = cost == 0.0;
                if adopted {
                    current = reduced;
                    stats.edges_removed += 1;
                } else {
                    overlay.rollback(checkpoint);
                    overlay.set(edge, cost);
                }
                tracing::debug!(cause, effect, cost, adopted, "scored edge");
                removals.push(EdgeRemoval {
                    cause,
                    effect,
                    from: node_name(&graph, cause_node),
                    to: node_name(&graph, effect_node),
                    cost,
                    adopted,
                });
            }
        }

        let coloring = BipartiteColoring::excluding_zero_weights();
        let report = coloring.process(&overlay.view(&graph))?;
        let direct = if report.component_count() == 2 {
            Some(CutCandidate {
                cost: 0.0,
                partition: two_sides(&report),
            })
        } else {
            self.single_edge_cut(&graph, &mut overlay, &removals, &coloring)?
        };

        let sweep = if direct.is_none() {
            tracing::warn!("no direct cut, falling back to heatmap sweep");
            heatmap_sweep(&costs)
        } else {
            None
        };

        overlay.apply_to(&mut graph);
        let scored: Vec<(String, String, f64)> = graph
            .graph
            .edge_indices()
            .filter_map(|e| {
                let (from, to) = endpoint_names(&graph, e)?;
                Some((from, to, graph.weight(e)))
            })
            .collect();
        for (from, to, weight) in scored {
            let style = if weight == REMOVED_WEIGHT { LineStyle::Dashed } else { LineStyle::Solid };
            graph.update_edge_weight(&from, &to, weight, None, Some(style))?;
        }

        stats.elapsed_ms = started.elapsed().as_millis() as u64;
        span.record(fields::EDGES_EVALUATED, stats.edges_evaluated);
        span.record(fields::EDGES_REMOVED, stats.edges_removed);
        span.record(fields::ELAPSED_MS, stats.elapsed_ms);

        Ok(EdgeCutReport {
            direct,
            sweep,
            costs,
            removals,
            graph,
            reduced_matrix: current,
            stats,
        })
    }

    /// Try each finite-cost edge alone, cheapest first. The winning edge
    /// stays zeroed in `overlay`; every other trial is rolled back.
    fn single_edge_cut(
        &self,
        graph: &AdjacencyGraph,
        overlay: &mut WeightOverlay,
        removals: &[EdgeRemoval],
        coloring: &BipartiteColoring,
    ) -> EngineResult<Option<CutCandidate>> {
        let mut candidates: Vec<&EdgeRemoval> = removals
            .iter()
            .filter(|r| !r.adopted && r.cost.is_finite())
            .collect();
        candidates.sort_by(|a, b| a.cost.total_cmp(&b.cost));

        for removal in candidates {
            let Some(edge) = edge_for(graph, &removal.from, &removal.to) else {
                continue;
            };
            let checkpoint = overlay.checkpoint();
            overlay.set(edge, REMOVED_WEIGHT);
            let report = coloring.process(&overlay.view(graph))?;
            if report.component_count() == 2 {
                tracing::debug!(from = %removal.from, to = %removal.to, cost = removal.cost, "direct cut");
                return Ok(Some(CutCandidate {
                    cost: removal.cost,
                    partition: two_sides(&report),
                }));
            }
            overlay.rollback(checkpoint);
        }
        Ok(None)
    }
}

/// Average `cause` out of the column pair of `effect` and splice the
/// result back at full size.
fn without_cause(matrix: &TransitionMatrix, effect: usize, cause: usize) -> EngineResult<TransitionMatrix> {
    let causes = matrix.causes();
    let columns = matrix.effect_columns(effect)?;
    let reduced = recursive_marginalization(columns, causes, &[cause], MarginalAxis::Rows)?;
    let restored = expand(reduced.view(), causes - 1, &[cause], MarginalAxis::Rows)?;
    let mut next = matrix.clone();
    next.replace_effect_columns(effect, restored.view())?;
    Ok(next)
}

fn check_counts(
    matrix: &TransitionMatrix,
    distribution: &BinaryDistribution,
    present_count: usize,
    future_count: usize,
) -> EngineResult<()> {
    let checks = [
        (matrix.causes(), present_count, "present variable count"),
        (matrix.effects(), future_count, "future variable count"),
        (matrix.causes(), distribution.len(), "binary distribution length"),
    ];
    for (expected, actual, context) in checks {
        if expected != actual {
            return Err(TensorError::DimensionMismatch {
                expected,
                actual,
                context: context.to_string(),
            }
            .into());
        }
    }
    Ok(())
}

fn two_sides(report: &BipartiteReport) -> NodePartition {
    let mut components = report.connected_components.iter();
    NodePartition::new(
        components.next().cloned().unwrap_or_default(),
        components.next().cloned().unwrap_or_default(),
    )
}

fn node_name(graph: &AdjacencyGraph, node: NodeIndex) -> String {
    graph.node_id(node).unwrap_or_default().to_string()
}

fn missing_edge(
    graph: &AdjacencyGraph,
    from: NodeIndex,
    to: NodeIndex,
) -> GraphError {
    GraphError::EdgeNotFound {
        from: node_name(graph, from),
        to: node_name(graph, to),
    }
}

fn edge_for(graph: &AdjacencyGraph, from: &str, to: &str) -> Option<EdgeIndex> {
    graph.edge_between(graph.index_of(from)?, graph.index_of(to)?)
}

fn endpoint_names(graph: &AdjacencyGraph, edge: EdgeIndex) -> Option<(String, String)> {
    let (from, to) = graph.graph.edge_endpoints(edge)?;
    Some((graph.node_id(from)?.to_string(), graph.node_id(to)?.to_string()))
}
