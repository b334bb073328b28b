#![allow(dead_code)]

use std::collections::BTreeMap;

use ai_combat::{AnimSignal, BulletSpawn, CombatWorldMut, CombatWorldView, RayHit};
use ai_core::{EntityId, WorldMut, WorldView};
use ai_core::Vec3;

#[derive(Debug, Clone)]
pub struct Body {
    pub position: Vec3,
    pub velocity: Vec3,
    pub radius: f32,
    pub tags: Vec<&'static str>,
}

/// Sphere-collider world that records every effect it receives.
#[derive(Debug, Default)]
pub struct MockWorld {
    pub bodies: BTreeMap<EntityId, Body>,
    pub signals: Vec<(EntityId, AnimSignal)>,
    pub damage: Vec<(EntityId, f32)>,
    pub bullets: Vec<BulletSpawn<EntityId>>,
    pub facing: Vec<(EntityId, Vec3)>,
}

impl MockWorld {
    pub fn spawn(&mut self, id: u64, position: Vec3, tags: &[&'static str]) -> EntityId {
        self.spawn_sized(id, position, 0.5, tags)
    }

    pub fn spawn_sized(
        &mut self,
        id: u64,
        position: Vec3,
        radius: f32,
        tags: &[&'static str],
    ) -> EntityId {
        let id = EntityId(id);
        self.bodies.insert(
            id,
            Body {
                position,
                velocity: Vec3::ZERO,
                radius,
                tags: tags.to_vec(),
            },
        );
        id
    }

    pub fn remove(&mut self, id: EntityId) {
        self.bodies.remove(&id);
    }

    pub fn move_to(&mut self, id: EntityId, position: Vec3) {
        if let Some(body) = self.bodies.get_mut(&id) {
            body.position = position;
        }
    }

    pub fn integrate(&mut self, dt: f32) {
        for body in self.bodies.values_mut() {
            body.position += body.velocity * dt;
        }
    }

    pub fn signals_for(&self, id: EntityId) -> Vec<AnimSignal> {
        self.signals
            .iter()
            .filter(|(e, _)| *e == id)
            .map(|(_, s)| *s)
            .collect()
    }

    pub fn velocity_of(&self, id: EntityId) -> Vec3 {
        self.bodies.get(&id).map(|b| b.velocity).unwrap_or(Vec3::ZERO)
    }
}

impl WorldView for MockWorld {
    type Agent = EntityId;

    fn exists(&self, agent: EntityId) -> bool {
        self.bodies.contains_key(&agent)
    }
}

impl WorldMut for MockWorld {}

impl CombatWorldView for MockWorld {
    fn position(&self, agent: EntityId) -> Option<Vec3> {
        self.bodies.get(&agent).map(|b| b.position)
    }

    fn velocity(&self, agent: EntityId) -> Option<Vec3> {
        self.bodies.get(&agent).map(|b| b.velocity)
    }

    fn has_tag(&self, agent: EntityId, tag: &str) -> bool {
        self.bodies
            .get(&agent)
            .is_some_and(|b| b.tags.iter().any(|t| *t == tag))
    }

    fn overlap_sphere(&self, center: Vec3, radius: f32) -> Vec<EntityId> {
        self.bodies
            .iter()
            .filter(|(_, b)| b.position.distance(center) <= radius + b.radius)
            .map(|(id, _)| *id)
            .collect()
    }

    fn raycast(&self, origin: Vec3, direction: Vec3, max_distance: f32) -> Option<RayHit<EntityId>> {
        let dir = direction.normalize_or_zero();
        if dir == Vec3::ZERO {
            return None;
        }
        let mut best: Option<RayHit<EntityId>> = None;
        for (id, body) in &self.bodies {
            let oc = origin - body.position;
            let c = oc.length_squared() - body.radius * body.radius;
            if c <= 0.0 {
                continue;
            }
            let b = oc.dot(dir);
            let disc = b * b - c;
            if disc < 0.0 {
                continue;
            }
            let t = -b - disc.sqrt();
            if t < 0.0 || t > max_distance {
                continue;
            }
            if best.map_or(true, |hit| t < hit.distance) {
                best = Some(RayHit {
                    entity: *id,
                    point: origin + dir * t,
                    distance: t,
                });
            }
        }
        best
    }
}

impl CombatWorldMut for MockWorld {
    fn set_velocity(&mut self, agent: EntityId, velocity: Vec3) {
        if let Some(body) = self.bodies.get_mut(&agent) {
            body.velocity = velocity;
        }
    }

    fn face(&mut self, agent: EntityId, point: Vec3) {
        self.facing.push((agent, point));
    }

    fn signal(&mut self, agent: EntityId, signal: AnimSignal) {
        self.signals.push((agent, signal));
    }

    fn apply_damage(&mut self, agent: EntityId, amount: f32) {
        self.damage.push((agent, amount));
    }

    fn spawn_bullet(&mut self, spawn: BulletSpawn<EntityId>) {
        self.bullets.push(spawn);
    }
}
