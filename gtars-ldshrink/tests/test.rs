//! End-to-end tests of the shrinkage LD pipeline on synthetic panels.

use gtars_ldshrink::shrinkage::shrinkage_weights;
use gtars_ldshrink::*;
use ndarray::Array2;
use pretty_assertions::assert_eq;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rstest::*;

fn random_haplotypes(n: usize, p: usize, seed: u64) -> Panel {
    let mut rng = StdRng::seed_from_u64(seed);
    let data = Array2::from_shape_fn((n, p), |_| if rng.random_bool(0.5) { 1.0 } else { 0.0 });
    Panel::new(data).unwrap()
}

fn random_genotypes(n: usize, p: usize, seed: u64) -> Panel {
    let mut rng = StdRng::seed_from_u64(seed);
    let data = Array2::from_shape_fn((n, p), |_| rng.random_range(0..3) as f64);
    Panel::new(data).unwrap()
}

/// Evenly spaced map, `step` cM between neighbours.
fn even_map(p: usize, step: f64) -> GeneticMap {
    GeneticMap::new((0..p).map(|i| i as f64 * step).collect()).unwrap()
}

#[fixture]
fn example_config() -> ShrinkageConfig {
    ShrinkageConfig::default()
        .with_panel_size(100)
        .with_effective_population_size(10000.0)
        .with_cutoff(1e-3)
}

#[rstest]
fn test_three_variant_example(example_config: ShrinkageConfig) {
    let panel = random_haplotypes(200, 3, 7);
    let map = GeneticMap::new(vec![0.0, 0.01, 0.05]).unwrap();

    let result = LdShrinker::new(example_config.clone())
        .unwrap()
        .compute(&panel, &map)
        .unwrap();
    let r = &result.correlation;

    assert_eq!(r.diag().to_vec(), vec![1.0, 1.0, 1.0]);
    assert_eq!(r, &r.t());

    let weights = shrinkage_weights(&map, &example_config);
    assert!(weights[(0, 2)] < weights[(0, 1)]);
}

#[rstest]
fn test_decreasing_map_is_rejected() {
    let result = GeneticMap::new(vec![0.05, 0.01]);
    assert_eq!(
        matches!(result, Err(LdShrinkError::Ordering { index: 1, .. })),
        true
    );
}

#[rstest]
fn test_runs_are_bit_identical() {
    let panel = random_genotypes(60, 40, 11);
    let map = even_map(40, 0.02);

    let first = compute(&panel, 10000.0, &map, 100, 1e-3, true, true).unwrap();
    let second = compute(&panel, 10000.0, &map, 100, 1e-3, true, true).unwrap();

    assert_eq!(first.correlation, second.correlation);
    assert_eq!(first.banded, second.banded);
    assert_eq!(first.sparse, second.sparse);
}

#[rstest]
#[case(PanelKind::Haplotype)]
#[case(PanelKind::Genotype)]
fn test_correlation_properties(#[case] kind: PanelKind) {
    let (n, p) = (80, 50);
    let panel = match kind {
        PanelKind::Haplotype => random_haplotypes(n, p, 3),
        PanelKind::Genotype => random_genotypes(n, p, 3),
    };
    // neighbours 0.05 cM apart give weight exp(-0.1 k) at offset k
    let config = ShrinkageConfig::default()
        .with_panel_size(100)
        .with_effective_population_size(10000.0)
        .with_cutoff(0.5)
        .with_panel_kind(kind)
        .with_banded(true);
    let map = even_map(p, 0.05);

    let result = LdShrinker::new(config.clone())
        .unwrap()
        .compute(&panel, &map)
        .unwrap();
    let r = &result.correlation;

    for i in 0..p {
        assert_eq!(r[(i, i)], 1.0);
        for j in 0..p {
            assert_eq!(r[(i, j)], r[(j, i)]);
        }
    }

    // every thresholded pair is exactly zero in the output
    let weights = shrinkage_weights(&map, &config);
    for ((i, j), w) in weights.indexed_iter() {
        if *w == 0.0 {
            assert_eq!(r[(i, j)], 0.0, "pair ({}, {}) should be zeroed", i, j);
        }
    }

    // exp(-0.1 k) >= 0.5 holds for k <= 6
    let bwd = bandwidth(&r.view());
    assert!(bwd <= 6);
    assert!(bwd < p);

    let banded = result.banded.as_ref().unwrap();
    assert_eq!(banded.bandwidth(), bwd);
    assert_eq!(&banded.to_dense(), r);

    assert_eq!(&result.sparse.to_dense(), r);
}

#[rstest]
fn test_bandwidth_matches_farthest_nonzero() {
    let panel = random_haplotypes(100, 30, 5);
    let map = even_map(30, 0.05);

    let result = compute(&panel, 10000.0, &map, 100, 0.5, false, true).unwrap();
    let r = &result.correlation;
    let bwd = result.banded.as_ref().unwrap().bandwidth();

    let farthest = r
        .indexed_iter()
        .filter(|(_, v)| **v != 0.0)
        .map(|((i, j), _)| i.abs_diff(j))
        .max()
        .unwrap();
    assert_eq!(bwd, farthest);
}

#[rstest]
fn test_far_apart_variants_are_uncorrelated(example_config: ShrinkageConfig) {
    // 10 cM apart: every off-diagonal weight is far under the cutoff
    let panel = random_haplotypes(50, 4, 9);
    let map = even_map(4, 10.0);

    let result = LdShrinker::new(example_config.with_banded(true))
        .unwrap()
        .compute(&panel, &map)
        .unwrap();

    assert_eq!(result.correlation, Array2::<f64>::eye(4));
    assert_eq!(result.sparse.nnz(), 4);
    assert_eq!(result.banded.unwrap().bandwidth(), 0);
}

#[rstest]
fn test_mismatched_map_is_rejected(example_config: ShrinkageConfig) {
    let panel = random_haplotypes(20, 5, 1);
    let map = even_map(4, 0.01);

    let result = LdShrinker::new(example_config)
        .unwrap()
        .compute(&panel, &map);
    assert_eq!(
        matches!(result, Err(LdShrinkError::DimensionMismatch { .. })),
        true
    );
}
