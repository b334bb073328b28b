//! Sight, hearing and touch sensing.

use ai_core::Vec3;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::CombatWorldView;

/// A spherical sense volume anchored at an offset from the agent.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Sensor {
    #[cfg_attr(feature = "serde", serde(default))]
    pub offset: Vec3,
    pub radius: f32,
}

impl Sensor {
    pub fn new(radius: f32) -> Self {
        Self {
            offset: Vec3::ZERO,
            radius,
        }
    }

    pub fn with_offset(mut self, offset: Vec3) -> Self {
        self.offset = offset;
        self
    }

    pub fn origin(&self, agent_position: Vec3) -> Vec3 {
        agent_position + self.offset
    }
}

/// The senses an agent carries. A `None` sense is switched off.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SensorRig {
    pub eye: Option<Sensor>,
    pub ear: Option<Sensor>,
    pub tact: Option<Sensor>,
}

impl Default for SensorRig {
    fn default() -> Self {
        Self {
            eye: Some(Sensor::new(10.0)),
            ear: Some(Sensor::new(5.0)),
            tact: Some(Sensor::new(5.0)),
        }
    }
}

impl SensorRig {
    pub fn sight_only(radius: f32) -> Self {
        Self {
            eye: Some(Sensor::new(radius)),
            ear: None,
            tact: None,
        }
    }

    /// Fills `out` with every entity tagged `tag` picked up by any sense.
    ///
    /// `out` is cleared first. Senses run in eye, ear, tact order and an
    /// entity caught by several senses is listed once per sense. Hearing only
    /// counts a candidate when a ray from the ear reaches it before anything
    /// else does.
    pub fn perceive<W>(
        &self,
        world: &W,
        observer: W::Agent,
        position: Vec3,
        tag: &str,
        out: &mut Vec<W::Agent>,
    ) where
        W: CombatWorldView,
    {
        out.clear();

        if let Some(eye) = self.eye {
            let origin = eye.origin(position);
            out.extend(
                world
                    .overlap_sphere(origin, eye.radius)
                    .into_iter()
                    .filter(|&e| e != observer && world.has_tag(e, tag)),
            );
        }

        if let Some(ear) = self.ear {
            let origin = ear.origin(position);
            for candidate in world.overlap_sphere(origin, ear.radius) {
                if candidate == observer || !world.has_tag(candidate, tag) {
                    continue;
                }
                let Some(candidate_position) = world.position(candidate) else {
                    continue;
                };
                let heard = world
                    .raycast(origin, candidate_position - origin, ear.radius)
                    .is_some_and(|hit| hit.entity == candidate);
                if heard {
                    out.push(candidate);
                }
            }
        }

        if let Some(tact) = self.tact {
            let origin = tact.origin(position);
            out.extend(
                world
                    .overlap_sphere(origin, tact.radius)
                    .into_iter()
                    .filter(|&e| e != observer && world.has_tag(e, tag)),
            );
        }
    }
}
