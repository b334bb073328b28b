//! Force-limited steering behaviors.
//!
//! Every behavior ends in the same step: the change from the current velocity
//! is clamped to `max_force`, divided by `mass`, and the result clamped to
//! `max_speed`. Agents therefore accelerate smoothly instead of snapping to a
//! new heading, and no returned velocity ever exceeds `max_speed`.

#![cfg_attr(docsrs, feature(doc_cfg))]
#![forbid(unsafe_code)]

pub mod agent;
pub mod behaviors;
pub mod group;
pub mod path;

pub use agent::{Locomotion, SteeringAgent, SteeringParams};
pub use behaviors::{
    apply_desired, apply_force, arrive, arrive_desired, evade, flee, path_following,
    predict_position, pursuit, seek, seek_desired, wander,
};
pub use group::{follow_leader, queue, separation};
pub use path::{PathDirection, PathFollower};
