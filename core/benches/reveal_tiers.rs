use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use sapper_core::*;
use std::hint::black_box;

fn center(config: BoardConfig) -> Coord2 {
    (config.width / 2, config.height / 2)
}

fn bench_placement(c: &mut Criterion) {
    let mut group = c.benchmark_group("placement");
    for difficulty in Difficulty::ALL {
        let config = difficulty.config();
        for placement in [Placement::Rejection, Placement::Shuffle] {
            group.bench_with_input(
                BenchmarkId::new(format!("{:?}", placement), format!("{:?}", difficulty)),
                &config,
                |b, &config| {
                    let mut seed = 0;
                    b.iter(|| {
                        seed += 1;
                        let mines = RandomMineGenerator::seeded(seed)
                            .with_placement(placement)
                            .generate(config, center(config));
                        black_box(mines)
                    })
                },
            );
        }
    }
    group.finish();
}

fn bench_first_reveal(c: &mut Criterion) {
    let mut group = c.benchmark_group("first_reveal");
    for difficulty in Difficulty::ALL {
        let config = difficulty.config();
        group.bench_with_input(
            BenchmarkId::from_parameter(format!("{:?}", difficulty)),
            &config,
            |b, &config| {
                let mut seed = 0;
                b.iter(|| {
                    seed += 1;
                    let mut board = Board::new(config);
                    let outcome =
                        board.first_reveal_with(center(config), RandomMineGenerator::seeded(seed));
                    black_box((outcome, board.check_win_condition()))
                })
            },
        );
    }
    group.finish();
}

/// Single-mine corner board: one reveal floods almost the whole grid.
fn bench_flood_fill(c: &mut Criterion) {
    let mut group = c.benchmark_group("flood_fill");
    for size in [16, 64, 255] {
        let mut template = Board::with_size(size, size, 1).unwrap();
        template
            .place_mines_with((0, 0), FixedMineGenerator::new([(size - 1, size - 1)]))
            .unwrap();
        group.bench_with_input(BenchmarkId::from_parameter(size), &template, |b, template| {
            b.iter(|| {
                let mut board = template.clone();
                black_box(board.reveal_cell((0, 0)))
            })
        });
    }
    group.finish();
}

criterion_group!(benches, bench_placement, bench_first_reveal, bench_flood_fill);
criterion_main!(benches);
