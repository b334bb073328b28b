use ai_core::error::ensure_non_negative;
use ai_core::{ConfigError, EntityId, Vec3};
use ai_steering::{seek, Locomotion, SteeringAgent, SteeringParams};

use crate::{BulletSpawn, CombatWorldMut};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BulletOutcome {
    InFlight,
    /// Damage was delivered; the owner should remove the bullet.
    Hit,
    /// The target no longer exists; the owner should remove the bullet.
    TargetLost,
}

/// A homing projectile that chases one target and hits it once.
#[derive(Debug, Clone)]
pub struct Bullet {
    pub steering: SteeringAgent,
    target: EntityId,
    damage: f32,
    hit_radius: f32,
    spent: bool,
}

impl Bullet {
    /// Kinematics suited to a fast projectile.
    pub fn default_params() -> SteeringParams {
        SteeringParams {
            locomotion: Locomotion::Free,
            ..SteeringParams::new(15.0, 30.0)
        }
    }

    /// Spawns at `spawn.origin`. Bullets always steer in full 3D, whatever
    /// locomotion `params` asks for.
    pub fn new(
        id: EntityId,
        spawn: &BulletSpawn<EntityId>,
        params: SteeringParams,
        hit_radius: f32,
    ) -> Result<Self, ConfigError> {
        let hit_radius = ensure_non_negative("hit_radius", hit_radius)?;
        let params = SteeringParams {
            locomotion: Locomotion::Free,
            ..params
        };
        Ok(Self {
            steering: SteeringAgent::new(id, spawn.origin, params)?,
            target: spawn.target,
            damage: spawn.damage,
            hit_radius,
            spent: false,
        })
    }

    pub fn id(&self) -> EntityId {
        self.steering.id
    }

    pub fn target(&self) -> EntityId {
        self.target
    }

    pub fn damage(&self) -> f32 {
        self.damage
    }

    pub fn is_spent(&self) -> bool {
        self.spent
    }

    /// Steers toward the target, or hits it once within `hit_radius`.
    ///
    /// After a hit the bullet keeps reporting `Hit` without dealing damage
    /// again.
    pub fn fixed_tick<W>(&mut self, world: &mut W) -> BulletOutcome
    where
        W: CombatWorldMut<Agent = EntityId>,
    {
        if self.spent {
            return BulletOutcome::Hit;
        }
        let Some(goal) = world.position(self.target) else {
            return BulletOutcome::TargetLost;
        };
        let id = self.id();
        if let Some(position) = world.position(id) {
            self.steering.position = position;
        }

        if self.steering.distance_to(goal) <= self.hit_radius {
            world.apply_damage(self.target, self.damage);
            world.set_velocity(id, Vec3::ZERO);
            self.steering.velocity = Vec3::ZERO;
            self.spent = true;
            tracing::debug!(bullet = %id, target = %self.target, damage = self.damage, "bullet hit");
            return BulletOutcome::Hit;
        }

        let velocity = seek(&self.steering, goal);
        self.steering.velocity = velocity;
        world.set_velocity(id, velocity);
        BulletOutcome::InFlight
    }
}
