mod common;

use std::hint::black_box;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use glam::Vec3;
use prefab_unfold::prelude::{
    bernoulli, select_random_element, CompositionAsset, CompositionElement, EvaluationMode,
};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn make_superposition_asset(count: usize, nothing_weight: f32, seed: u64) -> CompositionAsset {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut asset =
        CompositionAsset::new("bench", EvaluationMode::Superposition).with_nothing_weight(nothing_weight);

    for i in 0..count {
        let weight = 0.01 + rng.random::<f32>() * 0.99;
        asset.add_element(
            CompositionElement::new(format!("option_{i}"), format!("asset_{i}"))
                .with_translation(Vec3::new(i as f32, 0.0, 0.0))
                .with_weight(weight),
        );
    }

    asset
}

fn selection_uniform_benches(c: &mut Criterion) {
    let mut group = c.benchmark_group("selection/weighted_draw");

    for &n in &[8usize, 64, 256, 1024, 4096] {
        let asset = make_superposition_asset(n, 0.0, 0xC0FFEE);
        group.throughput(common::elements_throughput(n));

        group.bench_with_input(BenchmarkId::from_parameter(n), &n, |b, _| {
            let mut seed = 0x5EED;
            b.iter(|| {
                seed = prefab_unfold::seed::next_seed(seed);
                let pick = select_random_element(&asset, seed);
                black_box(pick);
            });
        });
    }

    group.finish();
}

fn selection_skew_benches(c: &mut Criterion) {
    let mut group = c.benchmark_group("selection/skewed");

    // A dominant first element short-circuits the cumulative walk early on
    // most draws.
    for &n in &[256usize, 2048] {
        let mut asset = make_superposition_asset(n, 0.0, 0xFACEFEED);
        asset.elements[0].weight = n as f32;
        group.throughput(common::elements_throughput(n));

        group.bench_with_input(BenchmarkId::new("front_heavy", n), &n, |b, _| {
            let mut seed = 0xBADC0DE;
            b.iter(|| {
                seed = prefab_unfold::seed::next_seed(seed);
                let pick = select_random_element(&asset, seed);
                black_box(pick);
            });
        });
    }

    for &n in &[256usize, 2048] {
        let asset = make_superposition_asset(n, n as f32 * 10.0, 0x0BADF00D);
        group.throughput(common::elements_throughput(n));

        group.bench_with_input(BenchmarkId::new("nothing_heavy", n), &n, |b, _| {
            let mut seed = 0xFEED;
            b.iter(|| {
                seed = prefab_unfold::seed::next_seed(seed);
                let pick = select_random_element(&asset, seed);
                black_box(pick);
            });
        });
    }

    group.finish();
}

fn bernoulli_benches(c: &mut Criterion) {
    let mut group = c.benchmark_group("selection/bernoulli");

    group.bench_function("single_draw", |b| {
        let mut seed = 0xDEADBEEF_u32 as i32;
        b.iter(|| {
            seed = prefab_unfold::seed::next_seed(seed);
            black_box(bernoulli(0.5, seed));
        });
    });

    group.finish();
}

criterion_group! {
    name = benches;
    config = common::default_criterion();
    targets = selection_uniform_benches,
              selection_skew_benches,
              bernoulli_benches
}
criterion_main!(benches);
