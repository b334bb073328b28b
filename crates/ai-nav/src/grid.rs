use ai_core::{ConfigError, Vec3};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Largest grid [`NavGrid::build`] accepts.
pub const MAX_CELLS: usize = 1 << 24;

/// Dimensions of a walkability grid laid over the x/z plane.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct GridConfig {
    pub world_size_x: f32,
    pub world_size_z: f32,
    /// Half the edge length of one cell.
    pub node_radius: f32,
    /// World-space center of the grid.
    pub origin: Vec3,
}

impl GridConfig {
    pub fn new(world_size_x: f32, world_size_z: f32, node_radius: f32) -> Self {
        Self {
            world_size_x,
            world_size_z,
            node_radius,
            origin: Vec3::ZERO,
        }
    }

    pub fn with_origin(mut self, origin: Vec3) -> Self {
        self.origin = origin;
        self
    }

    pub fn node_diameter(&self) -> f32 {
        self.node_radius * 2.0
    }

    /// Cells per axis, at least one each.
    fn cell_counts(&self) -> (f64, f64) {
        let diameter = f64::from(self.node_diameter());
        let count = |size: f32| (f64::from(size) / diameter).round().max(1.0);
        (count(self.world_size_x), count(self.world_size_z))
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if !(self.node_radius.is_finite() && self.node_radius > 0.0) {
            return Err(ConfigError::NonPositiveNodeRadius(self.node_radius));
        }
        let positive = |v: f32| v.is_finite() && v > 0.0;
        if !positive(self.world_size_x) || !positive(self.world_size_z) {
            return Err(ConfigError::EmptyWorld {
                x: self.world_size_x,
                z: self.world_size_z,
            });
        }
        let (x, z) = self.cell_counts();
        if x * z > MAX_CELLS as f64 {
            return Err(ConfigError::GridTooLarge {
                x,
                z,
                limit: MAX_CELLS,
            });
        }
        Ok(())
    }
}

/// Integer cell coordinates; `y` runs along world z.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct GridCoord {
    pub x: i32,
    pub y: i32,
}

impl GridCoord {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// One grid cell. Search costs are kept out of the node (see `GridQuery`).
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Node {
    pub walkable: bool,
    /// Cell center.
    pub world_position: Vec3,
    pub coord: GridCoord,
}

/// Walkability grid, built once and immutable afterwards.
///
/// Searches borrow the grid immutably, so any number of them may run at the
/// same time as long as each owns its `GridQuery`.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct NavGrid {
    config: GridConfig,
    size_x: i32,
    size_y: i32,
    nodes: Vec<Node>,
}

impl NavGrid {
    /// Samples `is_blocked(cell_center, node_radius)` once per cell.
    pub fn build<F>(config: GridConfig, mut is_blocked: F) -> Result<Self, ConfigError>
    where
        F: FnMut(Vec3, f32) -> bool,
    {
        config.validate()?;

        let diameter = config.node_diameter();
        let (x, z) = config.cell_counts();
        // Both counts are bounded by MAX_CELLS after validation.
        let (size_x, size_y) = (x as i32, z as i32);
        let cells = size_x
            .checked_mul(size_y)
            .filter(|&n| n as usize <= MAX_CELLS)
            .ok_or(ConfigError::GridTooLarge {
                x,
                z,
                limit: MAX_CELLS,
            })?;

        let bottom_left = config.origin
            - Vec3::new(config.world_size_x / 2.0, 0.0, config.world_size_z / 2.0);

        let mut nodes = Vec::with_capacity(cells as usize);
        for y in 0..size_y {
            for x in 0..size_x {
                let world_position = bottom_left
                    + Vec3::new(
                        x as f32 * diameter + config.node_radius,
                        0.0,
                        y as f32 * diameter + config.node_radius,
                    );
                let walkable = !is_blocked(world_position, config.node_radius);
                nodes.push(Node {
                    walkable,
                    world_position,
                    coord: GridCoord { x, y },
                });
            }
        }

        let blocked = nodes.iter().filter(|n| !n.walkable).count();
        tracing::debug!(size_x, size_y, blocked, "built nav grid");

        Ok(Self {
            config,
            size_x,
            size_y,
            nodes,
        })
    }

    /// A grid with every cell walkable.
    pub fn open(config: GridConfig) -> Result<Self, ConfigError> {
        Self::build(config, |_, _| false)
    }

    pub fn config(&self) -> &GridConfig {
        &self.config
    }

    pub fn size_x(&self) -> i32 {
        self.size_x
    }

    pub fn size_y(&self) -> i32 {
        self.size_y
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn in_bounds(&self, coord: GridCoord) -> bool {
        coord.x >= 0 && coord.y >= 0 && coord.x < self.size_x && coord.y < self.size_y
    }

    pub fn index(&self, coord: GridCoord) -> Option<usize> {
        if !self.in_bounds(coord) {
            return None;
        }
        Some((coord.y * self.size_x + coord.x) as usize)
    }

    pub fn node(&self, coord: GridCoord) -> Option<&Node> {
        self.index(coord).map(|idx| &self.nodes[idx])
    }

    pub(crate) fn node_at(&self, idx: usize) -> &Node {
        &self.nodes[idx]
    }

    /// Out-of-bounds cells count as blocked.
    pub fn is_walkable(&self, coord: GridCoord) -> bool {
        self.node(coord).map(|n| n.walkable).unwrap_or(false)
    }

    /// The cell whose center is nearest to `p` (x/z only).
    ///
    /// Points outside the grid are clamped onto its border, so every world
    /// point maps to some in-bounds node.
    pub fn node_from_world_point(&self, p: Vec3) -> &Node {
        let x = axis_index(
            p.x - self.config.origin.x,
            self.config.world_size_x,
            self.size_x,
        );
        let y = axis_index(
            p.z - self.config.origin.z,
            self.config.world_size_z,
            self.size_y,
        );
        &self.nodes[(y * self.size_x + x) as usize]
    }

    /// Moore neighborhood of `coord`, x-major, skipping the cell itself and
    /// anything out of bounds.
    ///
    /// Diagonals are returned even when both flanking orthogonal cells are
    /// blocked, so paths may clip corners.
    pub fn neighbours(&self, coord: GridCoord) -> impl Iterator<Item = &Node> + '_ {
        (-1..=1)
            .flat_map(|dx| (-1..=1).map(move |dy| (dx, dy)))
            .filter(|&(dx, dy)| dx != 0 || dy != 0)
            .filter_map(move |(dx, dy)| self.node(GridCoord::new(coord.x + dx, coord.y + dy)))
    }
}

fn axis_index(offset: f32, world_size: f32, count: i32) -> i32 {
    let percent = ((offset + world_size / 2.0) / world_size).clamp(0.0, 1.0);
    let idx = (percent * count as f32 - 0.5).round();
    // NaN casts to 0.
    (idx as i32).clamp(0, count - 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ten_by_ten() -> NavGrid {
        NavGrid::open(GridConfig::new(10.0, 10.0, 0.5)).expect("valid config")
    }

    #[test]
    fn node_count_follows_world_size_over_diameter() {
        let grid = ten_by_ten();
        assert_eq!(grid.size_x(), 10);
        assert_eq!(grid.size_y(), 10);
        assert_eq!(grid.len(), 100);

        let coarse = NavGrid::open(GridConfig::new(10.0, 4.0, 1.0)).expect("valid config");
        assert_eq!((coarse.size_x(), coarse.size_y()), (5, 2));
    }

    #[test]
    fn cell_centers_are_offset_by_radius() {
        let grid = ten_by_ten();
        let corner = grid.node(GridCoord::new(0, 0)).expect("in bounds");
        assert_eq!(corner.world_position, Vec3::new(-4.5, 0.0, -4.5));
        let far = grid.node(GridCoord::new(9, 9)).expect("in bounds");
        assert_eq!(far.world_position, Vec3::new(4.5, 0.0, 4.5));
    }

    #[test]
    fn world_points_snap_to_nearest_cell() {
        let grid = ten_by_ten();
        assert_eq!(
            grid.node_from_world_point(Vec3::new(-4.5, 0.0, 0.3)).coord,
            GridCoord::new(0, 5)
        );
        assert_eq!(
            grid.node_from_world_point(Vec3::new(-4.0, 0.0, -4.0)).coord,
            GridCoord::new(1, 1)
        );
        assert_eq!(
            grid.node_from_world_point(Vec3::new(4.0, 0.0, 4.0)).coord,
            GridCoord::new(9, 9)
        );
    }

    #[test]
    fn out_of_bounds_points_are_clamped() {
        let grid = ten_by_ten();
        assert_eq!(
            grid.node_from_world_point(Vec3::new(-100.0, 3.0, 100.0)).coord,
            GridCoord::new(0, 9)
        );
        assert_eq!(
            grid.node_from_world_point(Vec3::new(f32::NAN, 0.0, 0.0)).coord.x,
            0
        );
    }

    #[test]
    fn neighbours_are_moore_and_skip_out_of_bounds() {
        let grid = ten_by_ten();

        let inner: Vec<_> = grid.neighbours(GridCoord::new(4, 4)).map(|n| n.coord).collect();
        assert_eq!(inner.len(), 8);
        assert!(!inner.contains(&GridCoord::new(4, 4)));
        assert_eq!(inner[0], GridCoord::new(3, 3));
        assert_eq!(inner[7], GridCoord::new(5, 5));

        assert_eq!(grid.neighbours(GridCoord::new(0, 0)).count(), 3);
        assert_eq!(grid.neighbours(GridCoord::new(0, 5)).count(), 5);
    }

    #[test]
    fn obstacle_test_marks_cells_unwalkable() {
        let grid = NavGrid::build(GridConfig::new(4.0, 4.0, 0.5), |center, _| center.x > 1.0)
            .expect("valid config");
        assert!(grid.is_walkable(GridCoord::new(0, 0)));
        assert!(!grid.is_walkable(GridCoord::new(3, 0)));
        assert!(!grid.is_walkable(GridCoord::new(-1, 0)));
    }

    #[test]
    fn origin_shifts_the_grid() {
        let grid = NavGrid::open(GridConfig::new(2.0, 2.0, 0.5).with_origin(Vec3::new(10.0, 0.0, 0.0)))
            .expect("valid config");
        assert_eq!(
            grid.node(GridCoord::new(0, 0)).map(|n| n.world_position),
            Some(Vec3::new(9.5, 0.0, -0.5))
        );
        assert_eq!(
            grid.node_from_world_point(Vec3::new(10.6, 0.0, 0.6)).coord,
            GridCoord::new(1, 1)
        );
    }

    #[test]
    fn oversized_grids_are_rejected_not_allocated() {
        let result = NavGrid::open(GridConfig::new(1e6, 1e6, 1e-3));
        assert!(matches!(result, Err(ConfigError::GridTooLarge { .. })));

        let tall = NavGrid::open(GridConfig::new(1.0, 1e9, 0.5));
        assert!(matches!(tall, Err(ConfigError::GridTooLarge { .. })));

        let wide = GridConfig::new(512.0, 256.0, 0.5);
        assert_eq!(NavGrid::open(wide).map(|g| g.len()), Ok(512 * 256));
    }

    #[test]
    fn rejects_degenerate_configs() {
        assert!(matches!(
            NavGrid::open(GridConfig::new(10.0, 10.0, 0.0)),
            Err(ConfigError::NonPositiveNodeRadius(_))
        ));
        assert!(matches!(
            NavGrid::open(GridConfig::new(0.0, 10.0, 0.5)),
            Err(ConfigError::EmptyWorld { .. })
        ));
    }
}
