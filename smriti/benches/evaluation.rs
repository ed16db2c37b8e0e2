//! Benchmark matching and evaluation performance.

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use smriti::evaluation::{
    EvaluationConfig, EvaluationRun, EvaluationState, MatchEvaluator, PairwiseVerifier,
};
use smriti::features::{Descriptor, DescriptorKind, HistogramDistance, InterestPoint};
use smriti::matching::{FeatureSetMatcher, RansacFeatureSetMatcher};
use smriti::{NeighborTable, Pose2D, ScanRecord, ScanStore};

fn landmarks(n: usize) -> Vec<(f64, f64)> {
    (0..n)
        .map(|i| {
            // Deterministic scatter
            let x = (i as f64 * 0.7).sin() * 5.0 + i as f64 * 0.05;
            let y = (i as f64 * 1.3).cos() * 5.0;
            (x, y)
        })
        .collect()
}

fn features(points: &[(f64, f64)], bins: usize) -> Vec<InterestPoint> {
    points
        .iter()
        .enumerate()
        .map(|(i, &(x, y))| {
            let mut histogram = vec![0.01; bins];
            histogram[i % bins] = 1.0;
            let descriptor =
                Descriptor::new(DescriptorKind::BetaGrid, histogram, HistogramDistance::SymmetricChi2);
            InterestPoint::new(Pose2D::new(x, y, 0.0), 0.1, descriptor)
        })
        .collect()
}

/// A straight trajectory observing the same landmark field.
fn create_store(scans: usize, points: usize) -> ScanStore {
    let world = features(&landmarks(points), points);
    (0..scans)
        .map(|i| ScanRecord::new(Pose2D::new(i as f64 * 0.1, 0.0, 0.05 * i as f64), world.clone()))
        .collect()
}

fn create_table(scans: usize, k: usize) -> NeighborTable {
    NeighborTable::new(
        (0..scans)
            .map(|q| (1..=k).map(|d| (q + d) % scans).collect())
            .collect(),
    )
}

fn bench_ransac(c: &mut Criterion) {
    let mut group = c.benchmark_group("ransac");

    for n in [20, 50, 100].iter() {
        let reference = features(&landmarks(*n), *n);
        let truth = Pose2D::new(0.5, -0.3, 0.4);
        let query: Vec<_> = reference.iter().map(|p| p.in_frame(truth)).collect();
        let matcher = RansacFeatureSetMatcher::default();

        group.bench_with_input(BenchmarkId::from_parameter(n), n, |b, _| {
            b.iter(|| {
                let result = matcher.match_sets(black_box(&reference), black_box(&query));
                black_box(result)
            })
        });
    }

    group.finish();
}

fn bench_histogram_distance(c: &mut Criterion) {
    let mut group = c.benchmark_group("histogram_distance");

    let a: Vec<f64> = (0..64).map(|i| ((i as f64) * 0.3).sin().abs() + 0.01).collect();
    let b: Vec<f64> = (0..64).map(|i| ((i as f64) * 0.5).cos().abs() + 0.01).collect();

    for metric in HistogramDistance::ALL {
        group.bench_with_input(BenchmarkId::from_parameter(metric), &metric, |bench, m| {
            bench.iter(|| black_box(m.compute(black_box(&a), black_box(&b))))
        });
    }

    group.finish();
}

fn bench_evaluation_pass(c: &mut Criterion) {
    let mut group = c.benchmark_group("evaluation_pass");
    group.sample_size(10);

    for scans in [50, 200].iter() {
        let store = create_store(*scans, 30);
        let table = create_table(*scans, 10);

        for parallel in [false, true] {
            let id = BenchmarkId::new(if parallel { "parallel" } else { "sequential" }, scans);
            group.bench_with_input(id, scans, |b, _| {
                b.iter(|| {
                    let config = EvaluationConfig::default()
                        .with_neighborhood_size(10)
                        .with_parallel(parallel);
                    let verifier = PairwiseVerifier::new(RansacFeatureSetMatcher::default());
                    let evaluator = MatchEvaluator::new(&store, verifier, config);
                    let mut state = EvaluationState::new();
                    EvaluationRun::new(evaluator)
                        .execute(&table, &mut state)
                        .ok();
                    black_box(state)
                })
            });
        }
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_ransac,
    bench_histogram_distance,
    bench_evaluation_pass
);
criterion_main!(benches);
