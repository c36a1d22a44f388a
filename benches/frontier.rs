use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use sealgo::frontier::{BestFirstSearch, Discipline, Frontier};
use sealgo::problems::{Cell, GridMaze, NQueens};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Open `n x n` grid with every third column walled except one gap, which
/// alternates between the top and bottom rows.
fn serpentine(n: usize) -> GridMaze {
    let mut walls = vec![false; n * n];
    for col in (2..n - 1).step_by(3) {
        let gap = if (col / 3) % 2 == 0 { n - 1 } else { 0 };
        for row in 0..n {
            if row != gap {
                walls[row * n + col] = true;
            }
        }
    }
    let corner = (n - 1) as u16;
    GridMaze::from_walls(n, n, walls, Cell::new(0, 0), Cell::new(corner, corner))
        .unwrap_or_else(|e| panic!("benchmark maze: {e}"))
}

// ---------------------------------------------------------------------------
// Frontier push/pop
// ---------------------------------------------------------------------------

fn bench_frontier(c: &mut Criterion) {
    let mut group = c.benchmark_group("frontier_push_pop");
    for discipline in [Discipline::Fifo, Discipline::Lifo, Discipline::Priority] {
        group.bench_with_input(
            BenchmarkId::from_parameter(discipline),
            &discipline,
            |b, &d| {
                b.iter(|| {
                    let mut frontier = Frontier::new(d);
                    for i in 0..1_000u32 {
                        frontier.push(i, f64::from(i % 17), 0.0, 0);
                    }
                    while let Some(q) = frontier.pop() {
                        black_box(q.state);
                    }
                });
            },
        );
    }
    group.finish();
}

// ---------------------------------------------------------------------------
// Maze search
// ---------------------------------------------------------------------------

fn bench_maze(c: &mut Criterion) {
    let mut group = c.benchmark_group("maze");
    for &size in &[16usize, 48] {
        let maze = serpentine(size);
        group.bench_with_input(BenchmarkId::new("bfs", size), &maze, |b, m| {
            b.iter(|| black_box(BestFirstSearch::breadth_first(m).search()));
        });
        group.bench_with_input(BenchmarkId::new("dijkstra", size), &maze, |b, m| {
            b.iter(|| black_box(BestFirstSearch::dijkstra(m).search()));
        });
        group.bench_with_input(BenchmarkId::new("astar", size), &maze, |b, m| {
            b.iter(|| {
                let mut search = BestFirstSearch::astar(m, 1.0).unwrap_or_else(|e| panic!("{e}"));
                black_box(search.search())
            });
        });
    }
    group.finish();
}

// ---------------------------------------------------------------------------
// 4-Queens
// ---------------------------------------------------------------------------

fn bench_queens(c: &mut Criterion) {
    let queens = NQueens::with_board(&[0, 0, 0, 0]).unwrap_or_else(|e| panic!("{e}"));
    let mut group = c.benchmark_group("four_queens");
    group.bench_function("bfs", |b| {
        b.iter(|| black_box(BestFirstSearch::breadth_first(&queens).search()));
    });
    group.bench_function("astar", |b| {
        b.iter(|| {
            let mut search =
                BestFirstSearch::astar(&queens, 1.0).unwrap_or_else(|e| panic!("{e}"));
            black_box(search.search())
        });
    });
    group.finish();
}

criterion_group!(benches, bench_frontier, bench_maze, bench_queens);
criterion_main!(benches);
