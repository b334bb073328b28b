//! Walkability grid and octile A* pathfinding.

#![cfg_attr(docsrs, feature(doc_cfg))]
#![forbid(unsafe_code)]

pub mod astar;
pub mod grid;
pub mod navigator;

pub use astar::{octile_distance, GridQuery, DIAGONAL_COST, ORTHOGONAL_COST};
pub use grid::{GridConfig, GridCoord, NavGrid, Node, MAX_CELLS};
pub use navigator::{NavPath, Navigator};
