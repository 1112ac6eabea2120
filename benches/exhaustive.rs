use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use mas::generate::random_problem;
use mas::search::{solve_exhaustive, solve_exhaustive_parallel};
use rand::SeedableRng;
use rand_xorshift::XorShiftRng;

fn bench_exhaustive(c: &mut Criterion) {
    let mut group = c.benchmark_group("exhaustive");
    group.sample_size(10);
    for n in [5usize, 6, 7, 8] {
        let problem = random_problem(n, 0.5, &mut XorShiftRng::seed_from_u64(n as u64));
        group.bench_with_input(BenchmarkId::new("sequential", n), &problem, |b, p| {
            b.iter(|| solve_exhaustive(black_box(p)))
        });
        group.bench_with_input(BenchmarkId::new("parallel", n), &problem, |b, p| {
            b.iter(|| solve_exhaustive_parallel(black_box(p)))
        });
    }
    group.finish();
}

criterion_group!(benches, bench_exhaustive);
criterion_main!(benches);
