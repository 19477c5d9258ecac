//! Request-level orchestration: pick a search family, run it, and shape the
//! result record.

use std::time::Instant;

use sysdecomp_core::config::SearchStrategy;
use sysdecomp_core::{
    AnalysisResult, BinaryDistribution, EngineResult, NodePartition, PartitionOutcome, Strategy,
    SysdecompConfig, TransitionMatrix,
};

use crate::distance::{improves, DistanceMetric};
use crate::search::{partition_cut_cost, AntColony, CutCandidate, EdgeCutSearch, ExactSearch};
use crate::tensor::restrict_system;

/// Runs one analysis per call. Every call builds its own memo and graph.
#[derive(Debug, Clone, Default)]
pub struct PartitionEngine {
    config: SysdecompConfig,
}

impl PartitionEngine {
    pub fn new(config: SysdecompConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &SysdecompConfig {
        &self.config
    }

    fn metric(&self) -> DistanceMetric {
        DistanceMetric::new(self.config.search.effective_metric())
    }

    /// `auto` resolves to exact search when `effects + causes` is within
    /// `exact_max_variables`, otherwise to the heuristics.
    pub fn resolve_strategy(&self, matrix: &TransitionMatrix) -> SearchStrategy {
        match self.config.search.effective_strategy() {
            SearchStrategy::Auto => {
                let variables = matrix.effects() + matrix.causes();
                if variables <= self.config.search.effective_exact_max_variables() {
                    SearchStrategy::Exact
                } else {
                    SearchStrategy::Heuristic
                }
            }
            other => other,
        }
    }

    pub fn analyze(
        &self,
        matrix: &TransitionMatrix,
        distribution: &BinaryDistribution,
    ) -> EngineResult<AnalysisResult> {
        let strategy = self.resolve_strategy(matrix);
        tracing::info!(
            effects = matrix.effects(),
            causes = matrix.causes(),
            ?strategy,
            metric = %self.metric().kind(),
            "analyzing system"
        );
        let result = match strategy {
            SearchStrategy::Heuristic => self.run_heuristic(matrix, distribution)?,
            _ => self.run_exact(matrix, distribution)?,
        };
        tracing::info!(
            strategy = result.strategy.name(),
            distance = result.distance,
            elapsed_ms = result.stats.elapsed_ms,
            "analysis complete"
        );
        Ok(result)
    }

    /// Restrict to `effects` and `causes` first, then analyze.
    pub fn analyze_subsystem(
        &self,
        matrix: &TransitionMatrix,
        distribution: &BinaryDistribution,
        effects: &[usize],
        causes: &[usize],
    ) -> EngineResult<AnalysisResult> {
        let (matrix, distribution) = restrict_system(matrix, distribution, effects, causes)?;
        self.analyze(&matrix, &distribution)
    }

    fn run_exact(
        &self,
        matrix: &TransitionMatrix,
        distribution: &BinaryDistribution,
    ) -> EngineResult<AnalysisResult> {
        let outcome = ExactSearch::new(self.metric()).search(matrix, distribution)?;
        Ok(AnalysisResult {
            binary_distribution: distribution.to_string(),
            strategy: Strategy::Exact,
            partition: PartitionOutcome::Indices(outcome.partition),
            distance: outcome.distance,
            stats: outcome.stats,
        })
    }

    fn run_heuristic(
        &self,
        matrix: &TransitionMatrix,
        distribution: &BinaryDistribution,
    ) -> EngineResult<AnalysisResult> {
        let started = Instant::now();
        let report = EdgeCutSearch::new(self.metric()).search(
            matrix,
            distribution,
            matrix.causes(),
            matrix.effects(),
        )?;
        let mut stats = report.stats.clone();

        let (strategy, winner) = match report.direct {
            Some(direct) => (Strategy::EdgeCut, Some(direct)),
            None => {
                let colony = AntColony::from_config(&self.config.colony).search(&report.costs, &report.graph)?;
                stats.colony_iterations = colony.iterations;
                let colony_cut = (!colony.partition.is_empty()).then(|| CutCandidate {
                    cost: partition_cut_cost(&report.costs, &report.graph, &colony.partition),
                    partition: colony.partition,
                });
                match (report.sweep, colony_cut) {
                    (Some(sweep), Some(colony)) if improves(colony.cost, Some(sweep.cost)) => {
                        (Strategy::AntColony, Some(colony))
                    }
                    (Some(sweep), _) => (Strategy::HeatmapSweep, Some(sweep)),
                    (None, colony) => (Strategy::AntColony, colony),
                }
            }
        };
        stats.elapsed_ms = started.elapsed().as_millis() as u64;

        let (partition, distance) = match winner {
            Some(cut) => (cut.partition, cut.cost),
            None => {
                tracing::warn!("heuristics found no two-component cut");
                (NodePartition::empty(), f64::INFINITY)
            }
        };
        Ok(AnalysisResult {
            binary_distribution: distribution.to_string(),
            strategy,
            partition: PartitionOutcome::Nodes(partition),
            distance,
            stats,
        })
    }
}
