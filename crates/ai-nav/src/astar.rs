//! A* over a [`NavGrid`] with octile integer costs.

use core::cmp::Ordering;
use std::collections::BinaryHeap;

use ai_core::Vec3;

use crate::{GridCoord, NavGrid, NavPath};

pub const ORTHOGONAL_COST: u32 = 10;
pub const DIAGONAL_COST: u32 = 14;

/// Octile movement cost between two cells: 14 per diagonal step, 10 per
/// straight step.
pub fn octile_distance(a: GridCoord, b: GridCoord) -> u32 {
    let dx = a.x.abs_diff(b.x);
    let dy = a.y.abs_diff(b.y);
    DIAGONAL_COST * dx.min(dy) + ORTHOGONAL_COST * (dx.max(dy) - dx.min(dy))
}

#[derive(Debug)]
struct OpenNode {
    f: u32,
    h: u32,
    seq: u64,
    g: u32,
    idx: usize,
}

impl OpenNode {
    fn key(&self) -> (u32, u32, u64) {
        (self.f, self.h, self.seq)
    }
}

impl PartialEq for OpenNode {
    fn eq(&self, other: &Self) -> bool {
        self.key() == other.key()
    }
}

impl Eq for OpenNode {}

impl PartialOrd for OpenNode {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for OpenNode {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse ordering to make BinaryHeap behave like a min-heap.
        other.key().cmp(&self.key())
    }
}

#[derive(Debug, Clone, Copy)]
struct Entry {
    g: u32,
    h: u32,
    parent: Option<usize>,
    open: bool,
    closed: bool,
}

impl Entry {
    const UNSEEN: Self = Self {
        g: u32::MAX,
        h: 0,
        parent: None,
        open: false,
        closed: false,
    };
}

/// Per-search scratch table (g, h, parent, open/closed) keyed by node index.
///
/// Reset at the start of every search, so nothing from a previous query is
/// ever read. Keep one around to avoid allocating in hot paths.
#[derive(Debug, Default)]
pub struct GridQuery {
    open: BinaryHeap<OpenNode>,
    entries: Vec<Entry>,
    seq: u64,
    expanded: usize,
}

impl GridQuery {
    pub fn new() -> Self {
        Self::default()
    }

    /// Nodes finalized by the last search.
    pub fn expanded(&self) -> usize {
        self.expanded
    }

    fn reset(&mut self, len: usize) {
        self.open.clear();
        self.entries.clear();
        self.entries.resize(len, Entry::UNSEEN);
        self.seq = 0;
        self.expanded = 0;
    }

    fn push(&mut self, idx: usize) {
        let e = self.entries[idx];
        self.open.push(OpenNode {
            f: e.g.saturating_add(e.h),
            h: e.h,
            seq: self.seq,
            g: e.g,
            idx,
        });
        self.seq += 1;
    }
}

impl NavGrid {
    /// Finds a path between the cells containing `start` and `target`,
    /// writing node centers into `out`.
    ///
    /// The open set is ordered by lowest f, then lowest h, then discovery
    /// order. The start cell is not part of the result. Returns `false` and
    /// leaves `out` empty when the open set runs dry before the target is
    /// reached.
    pub fn find_path_into(
        &self,
        start: Vec3,
        target: Vec3,
        query: &mut GridQuery,
        out: &mut NavPath,
    ) -> bool {
        out.clear();

        let start_node = self.node_from_world_point(start);
        let target_node = self.node_from_world_point(target);
        let (Some(start_idx), Some(target_idx)) =
            (self.index(start_node.coord), self.index(target_node.coord))
        else {
            return false;
        };
        let target_coord = target_node.coord;

        query.reset(self.len());
        query.entries[start_idx].g = 0;
        query.entries[start_idx].h = octile_distance(start_node.coord, target_coord);
        query.entries[start_idx].open = true;
        query.push(start_idx);

        while let Some(open) = query.open.pop() {
            let current = query.entries[open.idx];
            if current.closed || open.g != current.g {
                // Stale heap entry.
                continue;
            }
            query.entries[open.idx].closed = true;
            query.expanded += 1;

            if open.idx == target_idx {
                self.retrace(query, start_idx, target_idx, out);
                tracing::debug!(
                    cost = out.cost,
                    waypoints = out.points.len(),
                    expanded = query.expanded,
                    "path found"
                );
                return true;
            }

            let coord = self.node_at(open.idx).coord;
            for neighbour in self.neighbours(coord) {
                if !neighbour.walkable {
                    continue;
                }
                let Some(n_idx) = self.index(neighbour.coord) else {
                    continue;
                };
                let entry = &mut query.entries[n_idx];
                if entry.closed {
                    continue;
                }

                let g = current.g.saturating_add(octile_distance(coord, neighbour.coord));
                if g < entry.g || !entry.open {
                    entry.g = g;
                    entry.h = octile_distance(neighbour.coord, target_coord);
                    entry.parent = Some(open.idx);
                    entry.open = true;
                    query.push(n_idx);
                }
            }
        }

        tracing::debug!(expanded = query.expanded, "open set exhausted, no path");
        false
    }

    fn retrace(&self, query: &GridQuery, start_idx: usize, target_idx: usize, out: &mut NavPath) {
        let mut current = target_idx;
        while current != start_idx {
            out.points.push(self.node_at(current).world_position);
            match query.entries[current].parent {
                Some(parent) => current = parent,
                None => break,
            }
        }
        out.points.reverse();
        out.cost = query.entries[target_idx].g;
    }
}
