use ai_core::Vec3;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{GridQuery, NavGrid};

/// Ordered waypoints plus their total octile cost.
///
/// An empty point list means "no path"; callers must not treat it as
/// "already arrived".
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct NavPath {
    pub points: Vec<Vec3>,
    pub cost: u32,
}

impl NavPath {
    pub fn new(points: Vec<Vec3>, cost: u32) -> Self {
        Self { points, cost }
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn clear(&mut self) {
        self.points.clear();
        self.cost = 0;
    }
}

/// Pathfinding backend used by agents.
pub trait Navigator {
    fn find_path(&self, start: Vec3, goal: Vec3) -> NavPath;

    /// Whether `point` lies on navigable ground. Backends without a notion of
    /// blocked space report everything as walkable.
    fn is_walkable(&self, _point: Vec3) -> bool {
        true
    }
}

impl Navigator for NavGrid {
    fn find_path(&self, start: Vec3, goal: Vec3) -> NavPath {
        let mut query = GridQuery::new();
        let mut out = NavPath::default();
        self.find_path_into(start, goal, &mut query, &mut out);
        out
    }

    fn is_walkable(&self, point: Vec3) -> bool {
        self.node_from_world_point(point).walkable
    }
}
