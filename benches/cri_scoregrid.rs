use criterion::{criterion_group, criterion_main, Criterion};
use scorecast::linear::Matrix;
use scorecast::scoregrid;
use scorecast::scoregrid::Score;

fn criterion_benchmark(c: &mut Criterion) {
    // sanity check
    let mut scoregrid = Matrix::allocate(8, 8);
    scoregrid::from_univariate_poisson(1.6, 1.3, &mut scoregrid);
    assert_eq!(
        Some(Score::new(1, 1)),
        scoregrid::most_likely_score(&scoregrid)
    );

    c.bench_function("cri_scoregrid_univariate_poisson_8x8", |b| {
        let mut scoregrid = Matrix::allocate(8, 8);
        b.iter(|| scoregrid::from_univariate_poisson(1.6, 1.3, &mut scoregrid));
    });

    c.bench_function("cri_scoregrid_most_likely_score_8x8", |b| {
        b.iter(|| scoregrid::most_likely_score(&scoregrid));
    });
}
criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
