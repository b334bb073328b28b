use ai_core::error::{ensure_mass, ensure_non_negative};
use ai_core::{flatten, ConfigError, EntityId, Vec3};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::PathFollower;

/// Which plane an agent steers in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Locomotion {
    /// Walks on the x/z plane; vertical offsets are ignored.
    #[default]
    Ground,
    /// Moves freely in 3D (projectiles).
    Free,
}

impl Locomotion {
    pub fn project(self, v: Vec3) -> Vec3 {
        match self {
            Locomotion::Ground => flatten(v),
            Locomotion::Free => v,
        }
    }
}

/// Tunable kinematic profile of a steering agent.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SteeringParams {
    pub mass: f32,
    pub max_speed: f32,
    pub max_force: f32,
    /// Arrival starts decelerating inside this radius.
    pub slowing_radius: f32,
    /// A waypoint counts as reached inside this radius.
    pub path_radius: f32,
    /// Wander circle distance ahead of the agent.
    pub circle_distance: f32,
    pub circle_radius: f32,
    /// Full width of the random wander-angle perturbation per call (radians).
    pub angle_change: f32,
    pub initial_wander_angle: f32,
    pub separation_radius: f32,
    pub max_separation: f32,
    pub leader_behind_distance: f32,
    pub leader_sight_radius: f32,
    pub locomotion: Locomotion,
}

impl Default for SteeringParams {
    fn default() -> Self {
        Self {
            mass: 1.0,
            max_speed: 5.0,
            max_force: 5.0,
            slowing_radius: 5.0,
            path_radius: 5.0,
            circle_distance: 5.0,
            circle_radius: 5.0,
            angle_change: 5.0,
            initial_wander_angle: 0.5,
            separation_radius: 5.0,
            max_separation: 5.0,
            leader_behind_distance: 5.0,
            leader_sight_radius: 5.0,
            locomotion: Locomotion::Ground,
        }
    }
}

impl SteeringParams {
    pub fn new(max_speed: f32, max_force: f32) -> Self {
        Self {
            max_speed,
            max_force,
            ..Default::default()
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        ensure_mass(self.mass)?;
        ensure_non_negative("max_speed", self.max_speed)?;
        ensure_non_negative("max_force", self.max_force)?;
        ensure_non_negative("slowing_radius", self.slowing_radius)?;
        ensure_non_negative("path_radius", self.path_radius)?;
        ensure_non_negative("circle_distance", self.circle_distance)?;
        ensure_non_negative("circle_radius", self.circle_radius)?;
        ensure_non_negative("angle_change", self.angle_change)?;
        ensure_non_negative("separation_radius", self.separation_radius)?;
        ensure_non_negative("max_separation", self.max_separation)?;
        ensure_non_negative("leader_behind_distance", self.leader_behind_distance)?;
        ensure_non_negative("leader_sight_radius", self.leader_sight_radius)?;
        Ok(())
    }
}

/// Kinematic state of one mobile entity.
///
/// `position` mirrors the host's transform and is refreshed by the owner
/// before steering runs; the steering functions only ever compute velocities.
#[derive(Debug, Clone)]
pub struct SteeringAgent {
    pub id: EntityId,
    pub position: Vec3,
    pub velocity: Vec3,
    pub wander_angle: f32,
    pub path: PathFollower,
    params: SteeringParams,
}

impl SteeringAgent {
    pub fn new(id: EntityId, position: Vec3, params: SteeringParams) -> Result<Self, ConfigError> {
        params.validate()?;
        Ok(Self {
            id,
            position,
            velocity: Vec3::ZERO,
            wander_angle: params.initial_wander_angle,
            path: PathFollower::default(),
            params,
        })
    }

    pub fn params(&self) -> &SteeringParams {
        &self.params
    }

    pub fn set_params(&mut self, params: SteeringParams) -> Result<(), ConfigError> {
        params.validate()?;
        self.params = params;
        Ok(())
    }

    pub fn mass(&self) -> f32 {
        self.params.mass
    }

    pub fn max_speed(&self) -> f32 {
        self.params.max_speed
    }

    pub fn max_force(&self) -> f32 {
        self.params.max_force
    }

    pub fn locomotion(&self) -> Locomotion {
        self.params.locomotion
    }

    /// Offset from this agent to `point` in the agent's steering plane.
    pub fn offset_to(&self, point: Vec3) -> Vec3 {
        self.params.locomotion.project(point - self.position)
    }

    pub fn distance_to(&self, point: Vec3) -> f32 {
        self.offset_to(point).length()
    }

    pub fn speed(&self) -> f32 {
        self.velocity.length()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_non_positive_mass() {
        let params = SteeringParams {
            mass: 0.0,
            ..Default::default()
        };
        let err = SteeringAgent::new(EntityId(1), Vec3::ZERO, params).unwrap_err();
        assert_eq!(err, ConfigError::NonPositiveMass(0.0));
    }

    #[test]
    fn rejects_negative_limits() {
        let params = SteeringParams::new(-1.0, 5.0);
        assert!(matches!(
            params.validate(),
            Err(ConfigError::NegativeParameter { name: "max_speed", .. })
        ));
    }

    #[test]
    fn set_params_keeps_old_profile_on_error() {
        let mut agent =
            SteeringAgent::new(EntityId(1), Vec3::ZERO, SteeringParams::new(3.0, 1.0)).expect("valid");
        let bad = SteeringParams {
            mass: -1.0,
            ..Default::default()
        };
        assert!(agent.set_params(bad).is_err());
        assert_eq!(agent.max_speed(), 3.0);
    }

    #[test]
    fn ground_agents_measure_on_the_plane() {
        let agent = SteeringAgent::new(EntityId(1), Vec3::new(0.0, 1.0, 0.0), SteeringParams::default())
            .expect("valid");
        assert_eq!(agent.offset_to(Vec3::new(3.0, 7.0, 4.0)), Vec3::new(3.0, 0.0, 4.0));
        assert!((agent.distance_to(Vec3::new(3.0, 7.0, 4.0)) - 5.0).abs() < 1e-6);
    }

    #[test]
    fn new_agent_starts_at_rest_with_configured_wander_angle() {
        let agent = SteeringAgent::new(EntityId(9), Vec3::ZERO, SteeringParams::default()).expect("valid");
        assert_eq!(agent.velocity, Vec3::ZERO);
        assert_eq!(agent.wander_angle, 0.5);
        assert!(agent.path.waypoints().is_empty());
    }
}
