//! Umbrella crate that re-exports the `ai-*` building blocks.
//!
//! Each subsystem sits behind a feature of the same name; `full` (the
//! default) enables all of them.

#![cfg_attr(docsrs, feature(doc_cfg))]
#![forbid(unsafe_code)]

#[cfg(feature = "core")]
#[cfg_attr(docsrs, doc(cfg(feature = "core")))]
pub use ai_core as core;

#[cfg(feature = "nav")]
#[cfg_attr(docsrs, doc(cfg(feature = "nav")))]
pub use ai_nav as nav;

#[cfg(feature = "steering")]
#[cfg_attr(docsrs, doc(cfg(feature = "steering")))]
pub use ai_steering as steering;

#[cfg(feature = "combat")]
#[cfg_attr(docsrs, doc(cfg(feature = "combat")))]
pub use ai_combat as combat;

/// The types most hosts touch every tick.
#[cfg(feature = "full")]
#[cfg_attr(docsrs, doc(cfg(feature = "full")))]
pub mod prelude {
    pub use ai_combat::{
        Bullet, BulletOutcome, CombatAgent, CombatProfile, CombatState, CombatWorldMut,
        CombatWorldView, Health, SimContext,
    };
    pub use ai_core::{EntityId, SimClock, TickContext, Vec3};
    pub use ai_nav::{GridConfig, NavGrid, NavPath, Navigator};
    pub use ai_steering::{SteeringAgent, SteeringParams};
}
