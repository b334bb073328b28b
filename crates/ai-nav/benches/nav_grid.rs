use ai_core::Vec3;
use ai_nav::{GridConfig, GridQuery, NavGrid, NavPath, Navigator};
use criterion::{black_box, criterion_group, criterion_main, Criterion};

/// 64x64 grid with staggered walls that force long detours.
fn maze_grid() -> NavGrid {
    NavGrid::build(GridConfig::new(64.0, 64.0, 0.5), |c, _| {
        let col = (c.x + 32.0).floor() as i32;
        let row = (c.z + 32.0).floor() as i32;
        if col % 8 != 4 {
            return false;
        }
        if (col / 8) % 2 == 0 {
            row < 60
        } else {
            row > 3
        }
    })
    .expect("valid config")
}

fn bench_nav_grid(c: &mut Criterion) {
    let grid = maze_grid();
    let start = Vec3::new(-31.5, 0.0, -31.5);
    let goal = Vec3::new(31.5, 0.0, 31.5);

    let mut group = c.benchmark_group("ai-nav/grid");

    group.bench_function("find_path_alloc", |b| {
        b.iter(|| {
            let path = grid.find_path(start, goal);
            black_box(path.points.len());
        })
    });

    let mut query = GridQuery::new();
    let mut out = NavPath::default();
    group.bench_function("find_path_into_reuse", |b| {
        b.iter(|| {
            grid.find_path_into(start, goal, &mut query, &mut out);
            black_box(out.points.len());
        })
    });

    group.finish();
}

criterion_group!(benches, bench_nav_grid);
criterion_main!(benches);
