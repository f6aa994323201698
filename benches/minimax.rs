//! Criterion benchmarks for the minimax search.
//!
//! Run with:
//!     cargo bench --bench minimax

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use tictactoe_engine::engine::minimax::{minimax_search, SearchParams};
use tictactoe_engine::games::tictactoe::board::Board;

fn positions() -> Vec<(&'static str, Board)> {
    [
        ("empty", "........."),
        ("center", "....X...."),
        ("corner", "X........"),
        ("midgame", "X...O...X"),
    ]
    .into_iter()
    .map(|(label, s)| (label, s.parse().expect("valid board")))
    .collect()
}

fn bench_search(c: &mut Criterion) {
    let mut group = c.benchmark_group("minimax_search");
    for (label, board) in positions() {
        let to_move = board.to_move();
        for (mode, params) in [
            ("plain", SearchParams::default()),
            ("alpha_beta", SearchParams { alpha_beta: true }),
        ] {
            group.bench_with_input(BenchmarkId::new(mode, label), &board, |b, board| {
                b.iter(|| minimax_search(black_box(board), to_move, &params))
            });
        }
    }
    group.finish();
}

criterion_group!(benches, bench_search);
criterion_main!(benches);
