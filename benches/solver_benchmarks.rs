use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use akari::{board::Board, model::LightUpModel};

const SAMPLES: [&str; 4] = [
    "....#..\n.31..2.\n#....0.\n.......\n.1....#\n.0..#2.\n..#....",
    ".#...3.\n1...2.#\n.1.....\n.......\n.....2.\n#.#...#\n.2...#.",
    "....2..\n...3...\n2.#.2..\n.#.#.1.\n..#.#.#\n...#...\n..3....",
    "....0..\n..1....\n2..#.3.\n..#.#..\n.0.#..1\n....#..\n..3....",
];

fn sample_boards_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("sample_boards");
    for (index, text) in SAMPLES.iter().enumerate() {
        let board: Board = text.parse().unwrap();
        group.bench_with_input(
            BenchmarkId::from_parameter(index + 1),
            &board,
            |bencher, board| {
                bencher.iter(|| {
                    let model = LightUpModel::new(black_box(board));
                    model.solve().unwrap()
                })
            },
        );
    }
    group.finish();
}

fn open_grid_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("open_grids");
    for size in [3usize, 5, 7] {
        let text = vec![".".repeat(size); size].join("\n");
        let board: Board = text.parse().unwrap();
        group.bench_with_input(
            BenchmarkId::from_parameter(size),
            &board,
            |bencher, board| {
                bencher.iter(|| LightUpModel::new(black_box(board)).solve().unwrap())
            },
        );
    }
    group.finish();
}

criterion_group!(benches, sample_boards_benchmark, open_grid_benchmark);
criterion_main!(benches);
