#![cfg(feature = "serde")]

use ai_core::Vec3;
use ai_nav::{GridConfig, NavGrid, Navigator};

fn pillar_grid() -> NavGrid {
    NavGrid::build(GridConfig::new(8.0, 8.0, 0.5), |c, _| {
        c.x.abs() < 1.0 && c.z.abs() < 2.0
    })
    .expect("valid config")
}

#[test]
fn nav_grid_roundtrips_via_serde() {
    let grid = pillar_grid();

    let json = serde_json::to_string(&grid).expect("serialize grid");
    let grid2: NavGrid = serde_json::from_str(&json).expect("deserialize grid");

    assert_eq!(grid.nodes(), grid2.nodes());
    assert_eq!(grid.config(), grid2.config());

    let start = Vec3::new(-3.5, 0.0, 0.0);
    let goal = Vec3::new(3.5, 0.0, 0.0);

    let path1 = grid.find_path(start, goal);
    let path2 = grid2.find_path(start, goal);
    assert!(!path1.is_empty());
    assert_eq!(path1, path2);
}
