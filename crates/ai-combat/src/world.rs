use ai_core::{Vec3, WorldMut, WorldView};

/// First collider struck by a ray.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RayHit<A> {
    pub entity: A,
    pub point: Vec3,
    pub distance: f32,
}

/// Fire-and-forget notifications for the animation layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnimSignal {
    Moving(bool),
    AttackTriggered,
    Dead,
}

/// Request for the host to instantiate a projectile.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BulletSpawn<A> {
    pub shooter: A,
    pub target: A,
    pub origin: Vec3,
    pub damage: f32,
}

/// Sensor and transform queries the combat loop needs from the host.
pub trait CombatWorldView: WorldView {
    fn position(&self, agent: Self::Agent) -> Option<Vec3>;
    fn velocity(&self, agent: Self::Agent) -> Option<Vec3>;
    fn has_tag(&self, agent: Self::Agent, tag: &str) -> bool;

    /// Every collider whose volume intersects the sphere, in host order.
    fn overlap_sphere(&self, center: Vec3, radius: f32) -> Vec<Self::Agent>;

    /// `direction` need not be normalized. Colliders containing `origin` are
    /// not reported.
    fn raycast(
        &self,
        origin: Vec3,
        direction: Vec3,
        max_distance: f32,
    ) -> Option<RayHit<Self::Agent>>;
}

pub trait CombatWorldMut: WorldMut + CombatWorldView {
    fn set_velocity(&mut self, agent: Self::Agent, velocity: Vec3);
    fn face(&mut self, agent: Self::Agent, point: Vec3);
    fn signal(&mut self, agent: Self::Agent, signal: AnimSignal);
    fn apply_damage(&mut self, agent: Self::Agent, amount: f32);
    fn spawn_bullet(&mut self, spawn: BulletSpawn<Self::Agent>);
}
