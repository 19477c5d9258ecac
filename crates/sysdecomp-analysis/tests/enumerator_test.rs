//! Partition enumeration order and coverage.

use proptest::prelude::*;
use sysdecomp_analysis::partitions::{generate_partitions, proper_subsets};
use sysdecomp_core::Partition;

fn shape(p: &Partition) -> (Vec<usize>, Vec<usize>, Vec<usize>, Vec<usize>) {
    (
        p.effect_a.to_vec(),
        p.cause_a.to_vec(),
        p.effect_b.to_vec(),
        p.cause_b.to_vec(),
    )
}

#[test]
fn test_proper_subsets_by_size_then_lexicographic() {
    let subsets: Vec<Vec<usize>> = proper_subsets(&[0, 1, 2]).iter().map(|s| s.to_vec()).collect();
    assert_eq!(
        subsets,
        vec![vec![0], vec![1], vec![2], vec![0, 1], vec![0, 2], vec![1, 2]]
    );
    assert!(proper_subsets(&[0]).is_empty());
    assert!(proper_subsets(&[]).is_empty());
}

#[test]
fn test_two_by_two_order() {
    let got: Vec<_> = generate_partitions(&[0, 1], &[0, 1]).iter().map(shape).collect();
    let expected = vec![
        (vec![0], vec![], vec![1], vec![0, 1]),
        (vec![], vec![0], vec![0, 1], vec![1]),
        (vec![0], vec![0], vec![1], vec![1]),
        (vec![], vec![1], vec![0, 1], vec![0]),
        (vec![0], vec![1], vec![1], vec![0]),
        (vec![1], vec![], vec![0], vec![0, 1]),
        (vec![1], vec![0], vec![0], vec![1]),
        (vec![1], vec![1], vec![0], vec![0]),
    ];
    assert_eq!(got, expected);
}

#[test]
fn test_single_effect_still_yields_cause_seeds() {
    let got: Vec<_> = generate_partitions(&[0], &[0, 1]).iter().map(shape).collect();
    assert_eq!(
        got,
        vec![
            (vec![], vec![0], vec![0], vec![1]),
            (vec![], vec![1], vec![0], vec![0]),
        ]
    );
}

#[test]
fn test_single_cause_still_yields_effect_seeds() {
    let got: Vec<_> = generate_partitions(&[0, 1, 2], &[0]).iter().map(shape).collect();
    assert_eq!(
        got,
        vec![
            (vec![0], vec![], vec![1, 2], vec![0]),
            (vec![1], vec![], vec![0, 2], vec![0]),
            (vec![2], vec![], vec![0, 1], vec![0]),
        ]
    );
}

#[test]
fn test_one_by_one_splits_effect_from_cause() {
    let got: Vec<_> = generate_partitions(&[0], &[0]).iter().map(shape).collect();
    assert_eq!(got, vec![(vec![0], vec![], vec![], vec![0])]);
}

#[test]
fn test_lone_effect_without_causes_has_no_partitions() {
    assert!(generate_partitions(&[0], &[]).is_empty());
}

proptest! {
    #[test]
    fn test_partitions_are_valid_complements(effects in 1usize..5, causes in 1usize..5) {
        let effect_universe: Vec<usize> = (0..effects).collect();
        let cause_universe: Vec<usize> = (0..causes).collect();
        let partitions = generate_partitions(&effect_universe, &cause_universe);
        for p in &partitions {
            prop_assert!(p.is_valid());
            let mut all_effects: Vec<usize> = p.effect_a.iter().chain(&p.effect_b).copied().collect();
            all_effects.sort_unstable();
            prop_assert_eq!(&all_effects, &effect_universe);
            let mut all_causes: Vec<usize> = p.cause_a.iter().chain(&p.cause_b).copied().collect();
            all_causes.sort_unstable();
            prop_assert_eq!(&all_causes, &cause_universe);
        }
        let mut unique = partitions.clone();
        unique.dedup();
        prop_assert_eq!(unique.len(), partitions.len());
    }
}
