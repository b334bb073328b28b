//! Deterministic, engine-agnostic primitives shared by the motion-core crates.

#![cfg_attr(docsrs, feature(doc_cfg))]
#![forbid(unsafe_code)]

pub mod agent;
pub mod error;
pub mod math;
pub mod rng;
pub mod tick;
pub mod world;

pub use agent::{AgentId, EntityId};
pub use error::ConfigError;
pub use glam::Vec3;
pub use math::{clamp_magnitude, flatten, planar_distance};
pub use rng::{DeterministicRng, SplitMix64};
pub use tick::{SimClock, TickContext};
pub use world::{WorldMut, WorldView};
