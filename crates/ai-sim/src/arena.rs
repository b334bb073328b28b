//! In-memory world with sphere bodies and box obstacles.

use std::collections::BTreeMap;

use ai_combat::{AnimSignal, BulletSpawn, CombatWorldMut, CombatWorldView, RayHit};
use ai_core::{EntityId, Vec3, WorldMut, WorldView};

use crate::config::Obstacle;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Shape {
    Sphere { radius: f32 },
    Box { half_extents: Vec3 },
}

#[derive(Debug, Clone)]
pub struct Body {
    pub position: Vec3,
    pub velocity: Vec3,
    pub shape: Shape,
    pub tags: Vec<String>,
}

impl Body {
    fn contains(&self, point: Vec3) -> bool {
        match self.shape {
            Shape::Sphere { radius } => self.position.distance_squared(point) < radius * radius,
            Shape::Box { half_extents } => {
                let d = (point - self.position).abs();
                d.x < half_extents.x && d.y < half_extents.y && d.z < half_extents.z
            }
        }
    }

    fn touches_sphere(&self, center: Vec3, radius: f32) -> bool {
        match self.shape {
            Shape::Sphere { radius: own } => self.position.distance(center) <= radius + own,
            Shape::Box { half_extents } => {
                let min = self.position - half_extents;
                let max = self.position + half_extents;
                center.clamp(min, max).distance(center) <= radius
            }
        }
    }

    /// Distance along the normalized `dir` to the first surface hit.
    fn ray_distance(&self, origin: Vec3, dir: Vec3) -> Option<f32> {
        match self.shape {
            Shape::Sphere { radius } => {
                let oc = origin - self.position;
                let b = oc.dot(dir);
                let c = oc.length_squared() - radius * radius;
                let disc = b * b - c;
                if disc < 0.0 {
                    return None;
                }
                let t = -b - disc.sqrt();
                (t >= 0.0).then_some(t)
            }
            Shape::Box { half_extents } => {
                let min = self.position - half_extents;
                let max = self.position + half_extents;
                let mut t_near = f32::NEG_INFINITY;
                let mut t_far = f32::INFINITY;
                for axis in 0..3 {
                    let (o, d) = (origin[axis], dir[axis]);
                    if d.abs() < f32::EPSILON {
                        if o < min[axis] || o > max[axis] {
                            return None;
                        }
                        continue;
                    }
                    let t1 = (min[axis] - o) / d;
                    let t2 = (max[axis] - o) / d;
                    t_near = t_near.max(t1.min(t2));
                    t_far = t_far.min(t1.max(t2));
                }
                (t_near <= t_far && t_near >= 0.0).then_some(t_near)
            }
        }
    }
}

/// Host world for headless runs.
///
/// Effects the combat layer emits (damage, bullet spawns, animation signals)
/// are queued here and drained by the simulation loop after each step.
#[derive(Debug, Default)]
pub struct Arena {
    bodies: BTreeMap<EntityId, Body>,
    next_id: u64,
    damage: Vec<(EntityId, f32)>,
    spawns: Vec<BulletSpawn<EntityId>>,
    signals: Vec<(EntityId, AnimSignal)>,
}

impl Arena {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn allocate_id(&mut self) -> EntityId {
        self.next_id += 1;
        EntityId(self.next_id)
    }

    pub fn spawn_sphere(&mut self, position: Vec3, radius: f32, tags: &[&str]) -> EntityId {
        let id = self.allocate_id();
        self.insert(
            id,
            Body {
                position,
                velocity: Vec3::ZERO,
                shape: Shape::Sphere { radius },
                tags: tags.iter().map(|t| t.to_string()).collect(),
            },
        );
        id
    }

    pub fn spawn_obstacle(&mut self, obstacle: &Obstacle) -> EntityId {
        let id = self.allocate_id();
        self.insert(
            id,
            Body {
                position: obstacle.center,
                velocity: Vec3::ZERO,
                shape: Shape::Box {
                    half_extents: obstacle.half_extents.abs(),
                },
                tags: vec!["obstacle".to_string()],
            },
        );
        id
    }

    pub fn insert(&mut self, id: EntityId, body: Body) {
        self.next_id = self.next_id.max(id.0);
        self.bodies.insert(id, body);
    }

    pub fn remove(&mut self, id: EntityId) -> Option<Body> {
        self.bodies.remove(&id)
    }

    /// Whether a sphere touches any static obstacle.
    pub fn blocked(&self, center: Vec3, radius: f32) -> bool {
        self.bodies.values().any(|b| {
            matches!(b.shape, Shape::Box { .. }) && b.touches_sphere(center, radius)
        })
    }

    /// Moves every body by its velocity.
    pub fn integrate(&mut self, dt: f32) {
        for body in self.bodies.values_mut() {
            body.position += body.velocity * dt;
        }
    }

    pub fn take_damage(&mut self) -> Vec<(EntityId, f32)> {
        std::mem::take(&mut self.damage)
    }

    pub fn take_spawns(&mut self) -> Vec<BulletSpawn<EntityId>> {
        std::mem::take(&mut self.spawns)
    }

    pub fn take_signals(&mut self) -> Vec<(EntityId, AnimSignal)> {
        std::mem::take(&mut self.signals)
    }
}

impl WorldView for Arena {
    type Agent = EntityId;

    fn exists(&self, agent: EntityId) -> bool {
        self.bodies.contains_key(&agent)
    }
}

impl WorldMut for Arena {}

impl CombatWorldView for Arena {
    fn position(&self, agent: EntityId) -> Option<Vec3> {
        self.bodies.get(&agent).map(|b| b.position)
    }

    fn velocity(&self, agent: EntityId) -> Option<Vec3> {
        self.bodies.get(&agent).map(|b| b.velocity)
    }

    fn has_tag(&self, agent: EntityId, tag: &str) -> bool {
        self.bodies
            .get(&agent)
            .is_some_and(|b| b.tags.iter().any(|t| t == tag))
    }

    fn overlap_sphere(&self, center: Vec3, radius: f32) -> Vec<EntityId> {
        self.bodies
            .iter()
            .filter(|(_, b)| b.touches_sphere(center, radius))
            .map(|(id, _)| *id)
            .collect()
    }

    fn raycast(&self, origin: Vec3, direction: Vec3, max_distance: f32) -> Option<RayHit<EntityId>> {
        let dir = direction.normalize_or_zero();
        if dir == Vec3::ZERO {
            return None;
        }
        self.bodies
            .iter()
            .filter(|(_, b)| !b.contains(origin))
            .filter_map(|(id, b)| b.ray_distance(origin, dir).map(|t| (*id, t)))
            .filter(|&(_, t)| t <= max_distance)
            .min_by(|a, b| a.1.total_cmp(&b.1))
            .map(|(entity, distance)| RayHit {
                entity,
                point: origin + dir * distance,
                distance,
            })
    }
}

impl CombatWorldMut for Arena {
    fn set_velocity(&mut self, agent: EntityId, velocity: Vec3) {
        if let Some(body) = self.bodies.get_mut(&agent) {
            body.velocity = velocity;
        }
    }

    /// Orientation is not modelled.
    fn face(&mut self, _agent: EntityId, _point: Vec3) {}

    fn signal(&mut self, agent: EntityId, signal: AnimSignal) {
        self.signals.push((agent, signal));
    }

    fn apply_damage(&mut self, agent: EntityId, amount: f32) {
        self.damage.push((agent, amount));
    }

    fn spawn_bullet(&mut self, spawn: BulletSpawn<EntityId>) {
        self.spawns.push(spawn);
    }
}
