use criterion::{black_box, criterion_group, criterion_main, Criterion};
use fukubiki::reservoir::sample_u64_into;
use fukubiki::shuffle::shuffle;
use fukubiki::varopt::Varopt;
use fukubiki::{float64, uint32n, uint64n};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

fn bench_range(c: &mut Criterion) {
    let mut group = c.benchmark_group("range");
    let mut rng = ChaCha8Rng::seed_from_u64(1);

    for &n in &[16u64, 123, 2_000, 1_000_000_000] {
        group.bench_function(format!("uint32n_{}", n), |b| {
            b.iter(|| uint32n(&mut rng, black_box(n as u32)))
        });
        group.bench_function(format!("uint64n_{}", n), |b| {
            b.iter(|| uint64n(&mut rng, black_box(n)))
        });
        // Baseline: rand's own range sampling.
        group.bench_function(format!("rand_random_range_{}", n), |b| {
            b.iter(|| rng.random_range(0..black_box(n)))
        });
    }
    group.finish();
}

fn bench_shuffle(c: &mut Criterion) {
    let mut group = c.benchmark_group("shuffle");
    let mut rng = ChaCha8Rng::seed_from_u64(2);

    for &size in &[100usize, 10_000] {
        let mut v: Vec<u32> = (0..size as u32).collect();
        group.bench_function(format!("fisher_yates_{}", size), |b| {
            b.iter(|| shuffle(black_box(&mut v), &mut rng))
        });
    }
    group.finish();
}

fn bench_reservoir(c: &mut Criterion) {
    let mut group = c.benchmark_group("reservoir");
    let mut rng = ChaCha8Rng::seed_from_u64(3);

    // Algorithm L cost grows with log(n/k), not n.
    for &(k, n) in &[(10, 100_000u64), (10, 1_000_000), (100, 1_000_000), (1000, 10_000_000)] {
        let mut buf = Vec::with_capacity(k);
        group.bench_function(format!("alg_l_k{}_n{}", k, n), |b| {
            b.iter(|| {
                buf.clear();
                sample_u64_into(k, black_box(n), &mut rng, &mut buf);
                black_box(buf.len());
            })
        });
    }
    group.finish();
}

fn bench_varopt(c: &mut Criterion) {
    let mut group = c.benchmark_group("varopt");
    let mut rng = ChaCha8Rng::seed_from_u64(4);

    for &(k, n) in &[(10, 100_000), (100, 100_000), (1000, 100_000)] {
        group.bench_function(format!("show_k{}_n{}", k, n), |b| {
            b.iter(|| {
                let mut sample = Varopt::new(k);
                for i in 0..n {
                    let w = float64(&mut rng);
                    black_box(sample.show_with_rng(i, w, &mut rng));
                }
                black_box(sample.len());
            })
        });
    }
    group.finish();
}

criterion_group!(
    benches,
    bench_range,
    bench_shuffle,
    bench_reservoir,
    bench_varopt
);
criterion_main!(benches);
