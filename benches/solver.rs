//! Benchmarks for the tiling solver.

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use tilecover::geometry::all_layouts;
use tilecover::pieces::pentominoes;
use tilecover::puzzles::{calendar, chessboard, ChessboardVariant};
use tilecover::{DancingLinks, SolverConfig};

/// Benchmark a chessboard sub-problem end to end.
fn bench_solve_chessboard_x23(c: &mut Criterion) {
    let puzzle = chessboard(ChessboardVariant::XAt23).unwrap();
    let mut group = c.benchmark_group("chessboard");
    group.sample_size(10);
    group.bench_function("solve_x23", |b| {
        b.iter(|| black_box(&puzzle).solve(SolverConfig::default()).unwrap())
    });
    group.finish();
}

/// Benchmark the search alone, reusing one dancing-links web.
fn bench_search_calendar(c: &mut Criterion) {
    let cover = calendar(1, 1).unwrap().exact_cover().unwrap();
    let mut links = DancingLinks::new(&cover.matrix, SolverConfig::default());

    let mut group = c.benchmark_group("calendar");
    group.sample_size(10);
    group.bench_function("search_jan01", |b| b.iter(|| links.find_solutions()));
    group.finish();
}

/// Benchmark building the chessboard constraint matrix.
fn bench_exact_cover(c: &mut Criterion) {
    let puzzle = chessboard(ChessboardVariant::Full).unwrap();

    c.bench_function("exact_cover_chessboard", |b| {
        b.iter(|| black_box(&puzzle).exact_cover().unwrap())
    });
}

/// Benchmark computing all layouts for a single piece.
fn bench_layouts(c: &mut Criterion) {
    let pieces = pentominoes().unwrap();
    let reference = pieces[0].reference();

    c.bench_function("all_layouts", |b| b.iter(|| all_layouts(black_box(reference))));
}

criterion_group!(
    benches,
    bench_solve_chessboard_x23,
    bench_search_calendar,
    bench_exact_cover,
    bench_layouts
);
criterion_main!(benches);
