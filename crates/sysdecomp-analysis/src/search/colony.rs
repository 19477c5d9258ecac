//! Ant colony fallback for finding a two-component cut.
//!
//! Ants walk closed tours over every graph node on a dense distance matrix
//! derived from the edge costs. Edges on the shortest tours collect
//! pheromone; afterwards edges are zeroed in descending pheromone order
//! until the graph splits in two.

use ndarray::Array2;
use petgraph::stable_graph::NodeIndex;
use rand::distributions::{Distribution, WeightedIndex};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use sysdecomp_core::config::ColonyConfig;
use sysdecomp_core::constants::REMOVED_WEIGHT;
use sysdecomp_core::errors::GraphResult;
use sysdecomp_core::tracing::fields;
use sysdecomp_core::NodePartition;
use tracing::field::Empty;

use super::cost_matrix::CostMatrix;
use crate::graph::{AdjacencyGraph, BipartiteColoring, EdgeView, NodeKind, WeightOverlay};

/// A closed walk: `(from, to)` moves ending back at the start node.
#[derive(Debug, Clone, PartialEq)]
pub struct Tour {
    pub moves: Vec<(usize, usize)>,
    pub length: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ColonyOutcome {
    /// Empty when no pheromone-ranked removal produced two components.
    pub partition: NodePartition,
    pub shortest: Option<Tour>,
    pub iterations: usize,
}

#[derive(Debug)]
pub struct AntColony {
    ants_per_node: usize,
    n_best: usize,
    iterations: usize,
    decay: f64,
    alpha: f64,
    beta: f64,
    rng: StdRng,
}

impl AntColony {
    pub fn from_config(config: &ColonyConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self {
            ants_per_node: config.effective_ants_per_node(),
            n_best: config.effective_n_best(),
            iterations: config.effective_iterations(),
            decay: config.effective_decay(),
            alpha: config.effective_alpha(),
            beta: config.effective_beta(),
            rng,
        }
    }

    /// Dense node-by-node distances in graph insertion order.
    ///
    /// Linked nodes take the edge cost, removed edges 0 and unlinked pairs
    /// infinity. Both of the latter give a zero move weight.
    pub fn distances(costs: &CostMatrix, graph: &AdjacencyGraph) -> Array2<f64> {
        let nodes = graph.node_indices();
        let position = |idx: NodeIndex| nodes.iter().position(|&n| n == idx);
        let n = nodes.len();
        let mut distances = Array2::from_elem((n, n), f64::INFINITY);
        distances.diag_mut().fill(0.0);
        for edge in graph.graph.edge_indices() {
            let Some((from, to)) = graph.graph.edge_endpoints(edge) else {
                continue;
            };
            let (Some(i), Some(j)) = (position(from), position(to)) else {
                continue;
            };
            let weight = graph.weight(edge);
            let d = if weight == REMOVED_WEIGHT {
                REMOVED_WEIGHT
            } else {
                edge_cost(costs, graph, from, to).unwrap_or(weight)
            };
            distances[[i, j]] = d;
            distances[[j, i]] = d;
        }
        distances
    }

    pub fn search(&mut self, costs: &CostMatrix, graph: &AdjacencyGraph) -> GraphResult<ColonyOutcome> {
        let distances = Self::distances(costs, graph);
        let n = distances.nrows();
        let span = tracing::info_span!("ant_colony", nodes = n, colony_iterations = Empty);
        let _guard = span.enter();
        if n < 2 {
            return Ok(ColonyOutcome {
                partition: NodePartition::empty(),
                shortest: None,
                iterations: 0,
            });
        }

        let mut pheromone = Array2::from_elem((n, n), 1.0 / (n * n) as f64);
        let mut shortest: Option<Tour> = None;
        for _ in 0..self.iterations {
            let mut tours: Vec<Tour> = (0..self.ants_per_node * n)
                .map(|_| self.construct_tour(&distances, &pheromone))
                .collect();
            tours.sort_by(|a, b| a.length.total_cmp(&b.length));

            for tour in tours.iter().take(self.n_best) {
                for &(i, j) in &tour.moves {
                    let w = distances[[i, j]];
                    if w.is_finite() && w > 0.0 {
                        pheromone[[i, j]] += 1.0 / w;
                    }
                }
            }
            pheromone.mapv_inplace(|p| p * self.decay);

            if let Some(best) = tours.into_iter().next() {
                if shortest.as_ref().map_or(true, |s| best.length < s.length) {
                    shortest = Some(best);
                }
            }
        }
        span.record(fields::COLONY_ITERATIONS, self.iterations);

        let partition = extract_partition(graph, &pheromone)?;
        if partition.is_empty() {
            tracing::warn!("ant colony found no two-component cut");
        }
        Ok(ColonyOutcome {
            partition,
            shortest,
            iterations: self.iterations,
        })
    }

    fn construct_tour(&mut self, distances: &Array2<f64>, pheromone: &Array2<f64>) -> Tour {
        let n = distances.nrows();
        let start = 0;
        let mut visited = vec![false; n];
        visited[start] = true;
        let mut moves = Vec::with_capacity(n);
        let mut previous = start;

        for _ in 1..n {
            let next = self.pick_move(previous, &visited, distances, pheromone);
            moves.push((previous, next));
            visited[next] = true;
            previous = next;
        }
        moves.push((previous, start));

        let length = moves.iter().map(|&(i, j)| distances[[i, j]]).sum();
        Tour { moves, length }
    }

    fn pick_move(
        &mut self,
        from: usize,
        visited: &[bool],
        distances: &Array2<f64>,
        pheromone: &Array2<f64>,
    ) -> usize {
        let unvisited: Vec<usize> = (0..visited.len()).filter(|&j| !visited[j]).collect();
        let weights: Vec<f64> = unvisited
            .iter()
            .map(|&j| {
                let d = distances[[from, j]];
                let visibility = if d > 0.0 && d.is_finite() { (1.0 / d).powf(self.beta) } else { 0.0 };
                let w = pheromone[[from, j]].powf(self.alpha) * visibility;
                if w.is_finite() && w > 0.0 {
                    w
                } else {
                    0.0
                }
            })
            .collect();

        match WeightedIndex::new(&weights) {
            Ok(dist) => unvisited[dist.sample(&mut self.rng)],
            Err(_) => unvisited[self.rng.gen_range(0..unvisited.len())],
        }
    }
}

fn edge_cost(costs: &CostMatrix, graph: &AdjacencyGraph, from: NodeIndex, to: NodeIndex) -> Option<f64> {
    let (cause, effect) = (graph.graph.node_weight(from)?, graph.graph.node_weight(to)?);
    let scored = cause.kind == NodeKind::Cause
        && effect.kind == NodeKind::Effect
        && cause.variable < costs.causes()
        && effect.variable < costs.effects();
    scored.then(|| costs.get(cause.variable, effect.variable))
}

/// Zero edges cumulatively, highest pheromone first, until exactly two
/// components remain.
fn extract_partition(graph: &AdjacencyGraph, pheromone: &Array2<f64>) -> GraphResult<NodePartition> {
    let nodes = graph.node_indices();
    let n = nodes.len();
    let mut ranked: Vec<(usize, usize)> = (0..n)
        .flat_map(|i| (0..n).map(move |j| (i, j)))
        .filter(|(i, j)| i != j)
        .collect();
    ranked.sort_by(|a, b| pheromone[[b.0, b.1]].total_cmp(&pheromone[[a.0, a.1]]));

    let coloring = BipartiteColoring::excluding_zero_weights();
    let mut overlay = WeightOverlay::new();
    for (i, j) in ranked {
        let Some(edge) = graph.edge_linking(nodes[i], nodes[j]) else {
            continue;
        };
        if overlay.view(graph).weight(edge) == REMOVED_WEIGHT {
            continue;
        }
        overlay.set(edge, REMOVED_WEIGHT);
        let report = coloring.process(&overlay.view(graph))?;
        if report.component_count() == 2 {
            let mut components = report.connected_components.into_iter();
            return Ok(NodePartition::new(
                components.next().unwrap_or_default(),
                components.next().unwrap_or_default(),
            ));
        }
    }
    Ok(NodePartition::empty())
}
