//! Heatmap boundary sweep over the edge cost matrix.

use sysdecomp_core::NodePartition;

use super::cost_matrix::CostMatrix;
use super::edge_cut::CutCandidate;
use crate::distance::improves;
use crate::graph::{cause_label, effect_label, AdjacencyGraph, NodeKind};

/// Cost of the edges crossing a boundary.
///
/// `rowSum + colSum - 2 * inside`, where the sums run over the causes and
/// effects inside the boundary and `inside` is the cost of edges with both
/// ends inside.
pub fn cut_cost(costs: &CostMatrix, in_causes: &[bool], in_effects: &[bool]) -> f64 {
    let rows = costs.row_totals();
    let columns = costs.column_totals();
    let row_sum: f64 = (0..costs.causes()).filter(|&c| in_causes[c]).map(|c| rows[c]).sum();
    let column_sum: f64 = (0..costs.effects()).filter(|&e| in_effects[e]).map(|e| columns[e]).sum();
    let mut inside = 0.0;
    for c in (0..costs.causes()).filter(|&c| in_causes[c]) {
        for e in (0..costs.effects()).filter(|&e| in_effects[e]) {
            inside += costs.get(c, e);
        }
    }
    row_sum + column_sum - 2.0 * inside
}

/// [`cut_cost`] with side A of `partition` as the boundary.
pub fn partition_cut_cost(costs: &CostMatrix, graph: &AdjacencyGraph, partition: &NodePartition) -> f64 {
    let mut in_causes = vec![false; costs.causes()];
    let mut in_effects = vec![false; costs.effects()];
    for node in partition.side_a.iter().filter_map(|id| graph.get_node_by_id(id)) {
        match node.kind {
            NodeKind::Cause if node.variable < in_causes.len() => in_causes[node.variable] = true,
            NodeKind::Effect if node.variable < in_effects.len() => in_effects[node.variable] = true,
            _ => {}
        }
    }
    cut_cost(costs, &in_causes, &in_effects)
}

/// Descending by total; equal totals keep index order.
fn by_total_descending(totals: &[f64]) -> Vec<usize> {
    let mut order: Vec<usize> = (0..totals.len()).collect();
    order.sort_by(|&a, &b| totals[b].total_cmp(&totals[a]));
    order
}

/// Grow a boundary from the costliest causes and effects and keep the
/// cheapest cut seen.
///
/// Each step adds whichever is costlier of the next cause row or the next
/// effect column; rows win ties. A boundary is scored only while its
/// complement is nonempty. `None` when fewer than two variables exist or no
/// boundary has a comparable cost.
pub fn heatmap_sweep(costs: &CostMatrix) -> Option<CutCandidate> {
    let (causes, effects) = (costs.causes(), costs.effects());
    if causes + effects < 2 {
        return None;
    }
    let rows = costs.row_totals();
    let columns = costs.column_totals();
    let row_order = by_total_descending(&rows);
    let column_order = by_total_descending(&columns);

    let mut in_causes = vec![false; causes];
    let mut in_effects = vec![false; effects];
    let (mut r, mut c) = (0, 0);
    let mut best: Option<(f64, Vec<bool>, Vec<bool>)> = None;

    for _ in 0..causes + effects - 1 {
        let take_row = r < causes && (c >= effects || rows[row_order[r]] >= columns[column_order[c]]);
        if take_row {
            in_causes[row_order[r]] = true;
            r += 1;
        } else {
            in_effects[column_order[c]] = true;
            c += 1;
        }
        let cost = cut_cost(costs, &in_causes, &in_effects);
        tracing::trace!(boundary = r + c, cost, "heatmap step");
        if cost.is_finite() && improves(cost, best.as_ref().map(|b| b.0)) {
            best = Some((cost, in_causes.clone(), in_effects.clone()));
        }
    }

    best.map(|(cost, in_causes, in_effects)| {
        let (mut side_a, mut side_b) = (Vec::new(), Vec::new());
        for (i, inside) in in_causes.iter().enumerate() {
            let side = if *inside { &mut side_a } else { &mut side_b };
            side.push(cause_label(i));
        }
        for (i, inside) in in_effects.iter().enumerate() {
            let side = if *inside { &mut side_a } else { &mut side_b };
            side.push(effect_label(i));
        }
        CutCandidate {
            cost,
            partition: NodePartition::new(side_a, side_b),
        }
    })
}
