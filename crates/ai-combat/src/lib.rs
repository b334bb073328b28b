//! Perception → decision → movement → action loop for combat agents.
//!
//! One [`CombatAgent`] type covers the melee, ranged and tower archetypes;
//! what differs between them is data ([`Archetype`]). Bullets are their own
//! small state machine ([`Bullet`]). The host world is reached only through
//! the [`CombatWorldView`] / [`CombatWorldMut`] traits.

#![cfg_attr(docsrs, feature(doc_cfg))]
#![forbid(unsafe_code)]

pub mod agent;
pub mod archetype;
pub mod bullet;
pub mod decision;
pub mod health;
pub mod perception;
pub mod sim;
pub mod world;

pub use agent::{tick_agents, CombatAgent};
pub use archetype::{Archetype, AttackStyle, CombatProfile, IdleBehavior, MovementStyle};
pub use bullet::{Bullet, BulletOutcome};
pub use decision::{decide, nearest, CombatState, Decision};
pub use health::{DamageOutcome, Health};
pub use perception::{Sensor, SensorRig};
pub use sim::{DespawnQueue, SimContext};
pub use world::{AnimSignal, BulletSpawn, CombatWorldMut, CombatWorldView, RayHit};
