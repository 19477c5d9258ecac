//! Exhaustive search for the partition closest to the unpartitioned system.

use std::time::Instant;

use ndarray::Array1;
use sysdecomp_core::errors::SearchError;
use sysdecomp_core::tracing::fields;
use sysdecomp_core::{BinaryDistribution, EngineResult, Partition, SearchStats, TransitionMatrix};
use tracing::field::Empty;

use crate::distance::{improves, DistanceMetric};
use crate::distribution::DistributionBuilder;
use crate::partitions::generate_partitions;

#[derive(Debug, Clone, PartialEq)]
pub struct ExactOutcome {
    pub partition: Partition,
    pub distance: f64,
    /// Joint distribution of every effect given every cause.
    pub baseline: Array1<f64>,
    pub stats: SearchStats,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ExactSearch {
    metric: DistanceMetric,
}

impl ExactSearch {
    pub fn new(metric: DistanceMetric) -> Self {
        Self { metric }
    }

    /// Score every partition against the baseline and keep the first with
    /// the lowest distance.
    pub fn search(
        &self,
        matrix: &TransitionMatrix,
        distribution: &BinaryDistribution,
    ) -> EngineResult<ExactOutcome> {
        let started = Instant::now();
        let span = tracing::info_span!(
            "exact_search",
            effects = matrix.effects(),
            causes = matrix.causes(),
            partitions_evaluated = Empty,
            memo_hits = Empty,
            memo_misses = Empty,
            elapsed_ms = Empty,
        );
        let _guard = span.enter();
        let effect_universe: Vec<usize> = (0..matrix.effects()).collect();
        let cause_universe: Vec<usize> = (0..matrix.causes()).collect();

        let mut builder = DistributionBuilder::new(matrix, distribution)?;
        let baseline = builder.baseline()?;
        let reference = baseline.to_vec();

        let mut stats = SearchStats::default();
        let mut best: Option<(Partition, f64)> = None;
        for partition in generate_partitions(&effect_universe, &cause_universe) {
            let candidate = builder.partitioned(&partition)?;
            let distance = self.metric.score(&reference, &candidate.to_vec());
            stats.partitions_evaluated += 1;
            tracing::trace!(?partition, distance, "scored partition");
            if improves(distance, best.as_ref().map(|b| b.1)) {
                best = Some((partition, distance));
            }
        }

        let (partition, distance) = best.ok_or(SearchError::NoPartitionFound {
            effects: matrix.effects(),
            causes: matrix.causes(),
        })?;
        stats.memo_hits = builder.memo_hits();
        stats.memo_misses = builder.memo_misses();
        stats.elapsed_ms = started.elapsed().as_millis() as u64;
        span.record(fields::PARTITIONS_EVALUATED, stats.partitions_evaluated);
        span.record(fields::MEMO_HITS, stats.memo_hits);
        span.record(fields::MEMO_MISSES, stats.memo_misses);
        span.record(fields::ELAPSED_MS, stats.elapsed_ms);
        tracing::info!(?partition, distance, "exact search complete");

        Ok(ExactOutcome {
            partition,
            distance,
            baseline,
            stats,
        })
    }
}
