use std::hint::black_box;

use criterion::{BatchSize, Criterion, criterion_group, criterion_main};
use minespot_core::*;

fn bench_placement(c: &mut Criterion) {
    let mut group = c.benchmark_group("placement");

    for (name, config) in [
        ("medium_10x10", Difficulty::Medium.config()),
        ("sparse_255x255", GameConfig::new_unchecked(255, 1_000)),
        ("dense_255x255", GameConfig::new_unchecked(255, 60_000)),
    ] {
        let mut placer = ProbingPlacer::from_seed(12345);
        group.bench_function(name, |b| b.iter(|| placer.place(black_box(config))));
    }

    group.finish();
}

fn bench_flood_reveal(c: &mut Criterion) {
    // a single corner mine leaves one zero region covering almost the whole board
    let layout = MineLayout::from_mine_coords(255, &[(0, 0)]).unwrap();

    c.bench_function("flood_reveal_255x255", |b| {
        b.iter_batched(
            || Board::from_layout(layout.clone()),
            |mut board| board.reveal(black_box((254, 254))),
            BatchSize::LargeInput,
        )
    });
}

fn bench_status(c: &mut Criterion) {
    let mut board = Board::with_seed(100, 1_500, 7).unwrap();
    for coords in board.iter_coords().step_by(3).collect::<Vec<_>>() {
        if !board.is_mine(coords) {
            board.reveal(coords).unwrap();
        }
    }

    c.bench_function("status_100x100", |b| b.iter(|| black_box(&board).status()));
}

criterion_group!(benches, bench_placement, bench_flood_reveal, bench_status);
criterion_main!(benches);
