//! Earth mover's distance between distributions over binary states.

use sysdecomp_core::config::MetricKind;

/// Signed prefix-difference transport cost.
///
/// Runs `d = (a[i] + d) - b[i]` over the indices and sums every `d`. The
/// shorter vector is padded with zeros. The sum is signed; callers that rank
/// candidates take its absolute value.
pub fn emd(a: &[f64], b: &[f64]) -> f64 {
    let len = a.len().max(b.len());
    let mut carried = 0.0;
    let mut total = 0.0;
    for i in 0..len {
        let ai = a.get(i).copied().unwrap_or(0.0);
        let bi = b.get(i).copied().unwrap_or(0.0);
        carried = (ai + carried) - bi;
        total += carried;
    }
    total
}

/// Greedy transport where moving mass between states `i` and `j` costs the
/// Hamming distance between them.
///
/// Surplus is matched to deficit at distance 1 first, then 2, and so on.
/// The result is never negative. Unbalanced mass that cannot be matched is
/// ignored.
pub fn hamming_emd(a: &[f64], b: &[f64]) -> f64 {
    let len = a.len().max(b.len()).next_power_of_two();
    let bits = len.trailing_zeros();
    let mut surplus: Vec<f64> = (0..len)
        .map(|i| a.get(i).copied().unwrap_or(0.0) - b.get(i).copied().unwrap_or(0.0))
        .collect();

    let mut cost = 0.0;
    for distance in 1..=bits {
        for i in 0..len {
            for j in 0..len {
                if surplus[i] <= 0.0 {
                    break;
                }
                if surplus[j] >= 0.0 || (i ^ j).count_ones() != distance {
                    continue;
                }
                let moved = surplus[i].min(-surplus[j]);
                surplus[i] -= moved;
                surplus[j] += moved;
                cost += moved * f64::from(distance);
            }
        }
    }
    cost
}

/// Distance used to score a candidate against the baseline.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DistanceMetric {
    kind: MetricKind,
}

impl DistanceMetric {
    pub fn new(kind: MetricKind) -> Self {
        Self { kind }
    }

    pub fn kind(&self) -> MetricKind {
        self.kind
    }

    /// Non-negative score of `candidate` against `baseline`.
    pub fn score(&self, baseline: &[f64], candidate: &[f64]) -> f64 {
        match self.kind {
            MetricKind::Prefix => emd(baseline, candidate).abs(),
            MetricKind::Hamming => hamming_emd(baseline, candidate),
        }
    }
}

impl From<MetricKind> for DistanceMetric {
    fn from(kind: MetricKind) -> Self {
        Self::new(kind)
    }
}

/// `candidate` strictly beats `best`. NaN never wins and always loses.
pub(crate) fn improves(candidate: f64, best: Option<f64>) -> bool {
    match best {
        None => true,
        Some(_) if candidate.is_nan() => false,
        Some(b) => b.is_nan() || candidate < b,
    }
}
