use criterion::{black_box, criterion_group, criterion_main, BatchSize, Criterion};
use engine_core::GameState;
use games_gomoku::Gomoku;

/// A midgame position with a handful of stones around the centre
fn midgame() -> Gomoku {
    [112, 113, 97, 127, 98, 126, 83, 141]
        .iter()
        .fold(Gomoku::new(), |s, &a| s.apply(a))
}

fn bench_apply(c: &mut Criterion) {
    let mut group = c.benchmark_group("gomoku_apply");
    group.bench_function("apply_center", |b| {
        let state = Gomoku::new();
        b.iter(|| black_box(state.apply(112)));
    });
    group.bench_function("apply_midgame", |b| {
        let state = midgame();
        b.iter(|| black_box(state.apply(99)));
    });
    group.finish();
}

fn bench_queries(c: &mut Criterion) {
    let mut group = c.benchmark_group("gomoku_queries");
    let state = midgame();

    group.bench_function("legal_moves", |b| b.iter(|| black_box(state.legal_moves())));
    group.bench_function("key", |b| b.iter(|| black_box(state.key())));
    group.finish();
}

fn bench_encoding(c: &mut Criterion) {
    let mut group = c.benchmark_group("gomoku_encoding");
    let state = midgame();

    group.bench_function("encode", |b| b.iter(|| black_box(state.encode())));

    group.bench_function("symmetries", |b| {
        let policy = vec![1.0 / 225.0; 225];
        b.iter_batched(
            || state.encode(),
            |obs| Gomoku::symmetries(&obs, &policy),
            BatchSize::SmallInput,
        );
    });

    group.finish();
}

criterion_group!(benches, bench_apply, bench_queries, bench_encoding);
criterion_main!(benches);
