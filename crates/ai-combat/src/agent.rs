use ai_core::{ConfigError, EntityId, TickContext, Vec3};
use ai_steering::{apply_desired, arrive, path_following, seek, wander, SteeringAgent};

use crate::{
    decide, nearest, AnimSignal, AttackStyle, BulletSpawn, CombatProfile, CombatState,
    CombatWorldMut, DamageOutcome, DespawnQueue, Health, MovementStyle, SimContext,
};

/// A melee, ranged or tower agent.
///
/// Driven by two host callbacks: [`fixed_tick`](Self::fixed_tick) once per
/// simulation step (perception, decision, movement, attack) and
/// [`frame_tick`](Self::frame_tick) once per rendered frame (cooldown and
/// facing).
#[derive(Debug, Clone)]
pub struct CombatAgent {
    pub steering: SteeringAgent,
    pub health: Health,
    profile: CombatProfile,
    state: CombatState,
    target: Option<EntityId>,
    perceived: Vec<EntityId>,
    attack_timer: f32,
    /// Target locked when the current melee swing started.
    swing_target: Option<EntityId>,
}

impl CombatAgent {
    pub fn new(
        steering: SteeringAgent,
        profile: CombatProfile,
        health: Health,
    ) -> Result<Self, ConfigError> {
        profile.validate()?;
        Ok(Self {
            steering,
            health,
            profile,
            state: CombatState::None,
            target: None,
            perceived: Vec::new(),
            attack_timer: 0.0,
            swing_target: None,
        })
    }

    pub fn id(&self) -> EntityId {
        self.steering.id
    }

    pub fn state(&self) -> CombatState {
        self.state
    }

    pub fn target(&self) -> Option<EntityId> {
        self.target
    }

    /// Enemies sensed on the last fixed tick, one entry per sense hit.
    pub fn perceived(&self) -> &[EntityId] {
        &self.perceived
    }

    pub fn profile(&self) -> &CombatProfile {
        &self.profile
    }

    pub fn attack_timer(&self) -> f32 {
        self.attack_timer
    }

    pub fn is_dead(&self) -> bool {
        self.state == CombatState::Dead
    }

    pub fn fixed_tick<W>(&mut self, ctx: &TickContext, world: &mut W, sim: &SimContext)
    where
        W: CombatWorldMut<Agent = EntityId>,
    {
        if self.is_dead() {
            return;
        }
        let id = self.id();
        let Some(position) = world.position(id) else {
            return;
        };
        self.steering.position = position;
        if let Some(velocity) = world.velocity(id) {
            self.steering.velocity = velocity;
        }

        self.profile.archetype.senses.perceive(
            world,
            id,
            position,
            &self.profile.enemy_tag,
            &mut self.perceived,
        );

        let closest = nearest(position, &self.perceived, |e| world.position(e));
        let fallback = if self.profile.archetype.seeks_player {
            sim.player
        } else {
            None
        };
        let decision = decide(
            closest,
            self.profile.attack_range,
            fallback,
            self.profile.archetype.idle.state(),
        );
        self.target = decision.target;
        self.transition(decision.state);

        match self.state {
            CombatState::None => {
                let velocity = match self.profile.archetype.movement {
                    MovementStyle::Stationary => Vec3::ZERO,
                    _ => apply_desired(&self.steering, Vec3::ZERO),
                };
                self.drive(world, velocity, false);
            }
            CombatState::Wandering => {
                let mut rng = ctx.rng_for_agent(id);
                let velocity = wander(&mut self.steering, &mut rng);
                self.drive(world, velocity, true);
            }
            CombatState::Seeking => self.pursue(world, sim),
            CombatState::Attacking => {
                let Some(goal) = self.target.and_then(|t| world.position(t)) else {
                    return;
                };
                self.drive(world, Vec3::ZERO, false);
                world.face(id, goal);
                self.attack(world);
            }
            CombatState::Dead => {}
        }
    }

    /// Counts the attack cooldown down by the frame delta and keeps the agent
    /// turned toward its target.
    pub fn frame_tick<W>(&mut self, dt_seconds: f32, world: &mut W)
    where
        W: CombatWorldMut<Agent = EntityId>,
    {
        if self.is_dead() {
            return;
        }
        self.attack_timer = (self.attack_timer - dt_seconds.max(0.0)).max(0.0);

        if matches!(self.state, CombatState::Seeking | CombatState::Attacking) {
            if let Some(goal) = self.target.and_then(|t| world.position(t)) {
                world.face(self.id(), goal);
            }
        }
    }

    /// Fires when the cooldown has run out. Returns whether an attack started.
    ///
    /// Melee attacks only trigger the swing here; damage is dealt from
    /// [`on_attack_animation_complete`](Self::on_attack_animation_complete),
    /// to the target the swing started on.
    pub fn attack<W>(&mut self, world: &mut W) -> bool
    where
        W: CombatWorldMut<Agent = EntityId>,
    {
        if self.attack_timer > 0.0 {
            return false;
        }
        let Some(target) = self.target else {
            return false;
        };
        self.attack_timer = self.profile.attack_cooldown;

        let id = self.id();
        let style = self.profile.archetype.attack;
        match style {
            AttackStyle::Melee => {
                world.signal(id, AnimSignal::AttackTriggered);
                self.swing_target = Some(target);
            }
            AttackStyle::Ranged => {
                world.signal(id, AnimSignal::AttackTriggered);
                self.fire(world, target);
            }
            AttackStyle::Turret => self.fire(world, target),
        }
        tracing::debug!(agent = %id, %target, ?style, "attack");
        true
    }

    /// Host callback for the end of the attack animation.
    pub fn on_attack_animation_complete<W>(&mut self, world: &mut W)
    where
        W: CombatWorldMut<Agent = EntityId>,
    {
        if self.is_dead() {
            return;
        }
        if let Some(target) = self.swing_target.take() {
            world.apply_damage(target, self.profile.damage);
        }
        if self.state == CombatState::Attacking {
            self.transition(CombatState::Seeking);
        }
    }

    /// Applies incoming damage, killing the agent on the fatal hit.
    pub fn take_damage<W>(
        &mut self,
        amount: f32,
        world: &mut W,
        despawns: &mut DespawnQueue,
        now_seconds: f64,
    ) -> DamageOutcome
    where
        W: CombatWorldMut<Agent = EntityId>,
    {
        let outcome = self.health.apply_damage(amount);
        if outcome == DamageOutcome::Died {
            self.die(world, despawns, now_seconds);
        }
        outcome
    }

    /// Enters the terminal `Dead` state. Only the first call has any effect;
    /// it returns `false` afterwards.
    pub fn die<W>(&mut self, world: &mut W, despawns: &mut DespawnQueue, now_seconds: f64) -> bool
    where
        W: CombatWorldMut<Agent = EntityId>,
    {
        if self.is_dead() {
            return false;
        }
        let id = self.id();
        let previous = self.state;
        self.state = CombatState::Dead;
        self.target = None;
        self.perceived.clear();
        self.swing_target = None;
        self.steering.velocity = Vec3::ZERO;

        world.set_velocity(id, Vec3::ZERO);
        world.signal(id, AnimSignal::Dead);
        despawns.schedule(id, now_seconds + f64::from(self.profile.despawn_delay));
        tracing::info!(agent = %id, ?previous, "agent died");
        true
    }

    fn pursue<W>(&mut self, world: &mut W, sim: &SimContext)
    where
        W: CombatWorldMut<Agent = EntityId>,
    {
        let Some(goal) = self.target.and_then(|t| world.position(t)) else {
            return;
        };
        match self.profile.archetype.movement {
            MovementStyle::DirectSeek => {
                let velocity = seek(&self.steering, goal);
                self.drive(world, velocity, true);
            }
            MovementStyle::PathFollowing { repath_distance } => {
                // Inside the goal's cell there is no route to walk; head
                // straight for the goal.
                let path_radius = self.steering.params().path_radius;
                let grid = &sim.navigator;
                let same_cell = grid.node_from_world_point(self.steering.position).coord
                    == grid.node_from_world_point(goal).coord;
                let velocity = if same_cell || self.steering.distance_to(goal) <= path_radius {
                    arrive(&self.steering, goal)
                } else {
                    let stale = self
                        .steering
                        .path
                        .goal()
                        .map_or(true, |g| g.distance(goal) > repath_distance);
                    if stale {
                        self.steering.path.set_goal(goal);
                    }
                    path_following(&mut self.steering, &sim.navigator)
                };
                self.drive(world, velocity, true);
            }
            MovementStyle::Stationary => {}
        }
    }

    fn fire<W>(&mut self, world: &mut W, target: EntityId)
    where
        W: CombatWorldMut<Agent = EntityId>,
    {
        world.spawn_bullet(BulletSpawn {
            shooter: self.id(),
            target,
            origin: self.steering.position + self.profile.muzzle_offset,
            damage: self.profile.damage,
        });
    }

    fn drive<W>(&mut self, world: &mut W, velocity: Vec3, moving: bool)
    where
        W: CombatWorldMut<Agent = EntityId>,
    {
        let id = self.id();
        self.steering.velocity = velocity;
        world.set_velocity(id, velocity);
        world.signal(id, AnimSignal::Moving(moving));
    }

    fn transition(&mut self, next: CombatState) {
        if next != self.state {
            tracing::debug!(agent = %self.id(), from = ?self.state, to = ?next, "state change");
            self.state = next;
        }
    }
}

/// Runs [`CombatAgent::fixed_tick`] for every agent in ascending id order,
/// whatever order the slice is in.
pub fn tick_agents<W>(
    ctx: &TickContext,
    world: &mut W,
    sim: &SimContext,
    agents: &mut [CombatAgent],
) where
    W: CombatWorldMut<Agent = EntityId>,
{
    let mut order: Vec<usize> = (0..agents.len()).collect();
    order.sort_by_key(|&i| agents[i].id());
    for i in order {
        agents[i].fixed_tick(ctx, world, sim);
    }
}
