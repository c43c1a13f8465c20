use colorquant::{kmeans_clustering, KMeans, KMeansConfig};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn random_pixels(n: usize) -> Vec<f32> {
    let mut rng = StdRng::seed_from_u64(0x5EED);
    (0..n * 3).map(|_| rng.gen_range(0.0..255.0)).collect()
}

fn bench_kmeans_clustering(c: &mut Criterion) {
    let mut group = c.benchmark_group("kmeans_clustering");
    let pixels = random_pixels(64 * 64);

    for k in [4, 16, 64] {
        group.bench_with_input(BenchmarkId::from_parameter(k), &k, |b, &k| {
            let mut centroids = vec![0.0f32; k * 3];
            let mut labels = vec![0usize; pixels.len() / 3];
            b.iter(|| {
                kmeans_clustering(
                    black_box(&pixels),
                    k,
                    10,
                    42,
                    &mut centroids,
                    &mut labels,
                )
                .unwrap()
            })
        });
    }
    group.finish();
}

fn bench_fit_sizes(c: &mut Criterion) {
    let mut group = c.benchmark_group("kmeans_fit");
    let config = KMeansConfig::new(16).with_max_iterations(10);

    for n in [1_000, 10_000, 100_000] {
        let pixels = random_pixels(n);
        group.bench_with_input(BenchmarkId::from_parameter(n), &pixels, |b, pixels| {
            let kmeans = KMeans::new(config.clone());
            b.iter(|| kmeans.fit(black_box(pixels)).unwrap())
        });
    }
    group.finish();
}

criterion_group!(benches, bench_kmeans_clustering, bench_fit_sizes);
criterion_main!(benches);
