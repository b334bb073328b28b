//! The headless simulation loop.

use ai_combat::{
    tick_agents, AnimSignal, Bullet, BulletOutcome, CombatAgent, CombatWorldMut, DamageOutcome,
    Health, SimContext,
};
use ai_core::{EntityId, SimClock, Vec3};
use ai_nav::NavGrid;
use ai_steering::{SteeringAgent, SteeringParams};
use anyhow::{Context, Result};

use crate::arena::Arena;
use crate::config::ScenarioConfig;
use crate::steerers::Steerers;

/// End-of-run report.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Summary {
    pub ticks: u64,
    pub agents_alive: usize,
    pub agents_killed: usize,
    pub steerers: usize,
    pub player_health: f32,
    pub player_alive: bool,
    pub bullets_fired: usize,
    pub bullets_hit: usize,
}

pub struct Simulation {
    arena: Arena,
    ctx: SimContext,
    agents: Vec<CombatAgent>,
    bullets: Vec<Bullet>,
    steerers: Steerers,
    player: EntityId,
    player_health: Health,
    /// Melee swings waiting for their animation to finish.
    swings: Vec<(EntityId, f64)>,
    bullet_params: SteeringParams,
    hit_radius: f32,
    frame_dt: f32,
    swing_seconds: f32,
    summary: Summary,
}

impl Simulation {
    pub fn from_config(config: &ScenarioConfig) -> Result<Self> {
        let mut arena = Arena::new();
        for obstacle in &config.obstacles {
            arena.spawn_obstacle(obstacle);
        }

        let grid = NavGrid::build(config.grid.to_grid_config(), |center, radius| {
            arena.blocked(center, radius)
        })
        .context("Invalid grid settings")?;
        let walkable = grid.nodes().iter().filter(|n| n.walkable).count();
        tracing::info!(
            cells = grid.len(),
            walkable,
            obstacles = config.obstacles.len(),
            "grid built"
        );

        let player = arena.spawn_sphere(config.player.position, config.player.radius, &["player"]);
        arena.set_velocity(player, config.player.velocity);

        let mut agents = Vec::with_capacity(config.agents.len());
        for (index, agent) in config.agents.iter().enumerate() {
            let id = arena.spawn_sphere(agent.position, agent.radius, &["enemy"]);
            let steering = SteeringAgent::new(id, agent.position, agent.steering)
                .with_context(|| format!("Invalid steering parameters for agent {index}"))?;
            let combat = CombatAgent::new(steering, agent.profile(), Health::new(agent.health))
                .with_context(|| format!("Invalid combat parameters for agent {index}"))?;
            agents.push(combat);
        }
        let steerers = Steerers::spawn(&mut arena, &config.steerers, player)?;

        let bullet_params = SteeringParams {
            max_speed: config.bullets.max_speed,
            max_force: config.bullets.max_force,
            ..Bullet::default_params()
        };
        bullet_params
            .validate()
            .context("Invalid bullet parameters")?;

        Ok(Self {
            arena,
            ctx: SimContext::new(grid, Some(player), SimClock::new(config.fixed_dt, config.seed)),
            agents,
            bullets: Vec::new(),
            steerers,
            player,
            player_health: Health::new(config.player.health),
            swings: Vec::new(),
            bullet_params,
            hit_radius: config.bullets.hit_radius,
            frame_dt: config.frame_dt,
            swing_seconds: config.swing_seconds,
            summary: Summary::default(),
        })
    }

    pub fn navigator(&self) -> &NavGrid {
        &self.ctx.navigator
    }

    /// One fixed step followed by one frame.
    pub fn step(&mut self) -> Result<()> {
        let tick = self.ctx.clock.step();

        tick_agents(&tick, &mut self.arena, &self.ctx, &mut self.agents);
        self.steerers.tick(&tick, &mut self.arena, &self.ctx.navigator);
        self.launch_bullets()?;
        self.fly_bullets();
        self.queue_swings(tick.now_seconds);
        self.finish_swings(tick.now_seconds);
        self.resolve_damage(tick.now_seconds);

        for agent in &mut self.agents {
            agent.frame_tick(self.frame_dt, &mut self.arena);
        }
        self.arena.integrate(tick.dt_seconds);
        self.despawn(self.ctx.now_seconds());

        self.summary.ticks += 1;
        Ok(())
    }

    pub fn run(&mut self, ticks: u64) -> Result<Summary> {
        tracing::info!(ticks, agents = self.agents.len(), "scenario start");
        for _ in 0..ticks {
            self.step()?;
        }
        let summary = self.summary();
        tracing::info!(
            ticks = summary.ticks,
            agents_alive = summary.agents_alive,
            player_health = summary.player_health,
            "scenario finished"
        );
        Ok(summary)
    }

    pub fn summary(&self) -> Summary {
        Summary {
            agents_alive: self.agents.iter().filter(|a| !a.is_dead()).count(),
            steerers: self.steerers.members().len(),
            player_health: self.player_health.current(),
            player_alive: !self.player_health.is_dead(),
            ..self.summary.clone()
        }
    }

    fn launch_bullets(&mut self) -> Result<()> {
        for spawn in self.arena.take_spawns() {
            let id = self.arena.spawn_sphere(spawn.origin, 0.1, &["bullet"]);
            let bullet = Bullet::new(id, &spawn, self.bullet_params, self.hit_radius)
                .context("Invalid bullet settings")?;
            self.bullets.push(bullet);
            self.summary.bullets_fired += 1;
        }
        Ok(())
    }

    fn fly_bullets(&mut self) {
        let arena = &mut self.arena;
        let summary = &mut self.summary;
        self.bullets.retain_mut(|bullet| match bullet.fixed_tick(arena) {
            BulletOutcome::InFlight => true,
            outcome => {
                if outcome == BulletOutcome::Hit {
                    summary.bullets_hit += 1;
                }
                arena.remove(bullet.id());
                false
            }
        });
    }

    fn queue_swings(&mut self, now: f64) {
        for (agent, signal) in self.arena.take_signals() {
            if signal == AnimSignal::AttackTriggered {
                self.swings.push((agent, now + f64::from(self.swing_seconds)));
            }
        }
    }

    fn finish_swings(&mut self, now: f64) {
        let mut due = Vec::new();
        self.swings.retain(|&(agent, at)| {
            if at <= now {
                due.push(agent);
                false
            } else {
                true
            }
        });
        for id in due {
            if let Some(agent) = self.agents.iter_mut().find(|a| a.id() == id) {
                agent.on_attack_animation_complete(&mut self.arena);
            }
        }
    }

    fn resolve_damage(&mut self, now: f64) {
        for (target, amount) in self.arena.take_damage() {
            if target == self.player {
                if self.player_health.apply_damage(amount) == DamageOutcome::Died {
                    tracing::info!(player = %target, "player died");
                    self.arena.remove(target);
                }
                continue;
            }
            if let Some(agent) = self.agents.iter_mut().find(|a| a.id() == target) {
                let outcome =
                    agent.take_damage(amount, &mut self.arena, &mut self.ctx.despawns, now);
                if outcome == DamageOutcome::Died {
                    self.summary.agents_killed += 1;
                }
            }
        }
    }

    fn despawn(&mut self, now: f64) {
        for id in self.ctx.despawns.drain_expired(now) {
            self.arena.remove(id);
            self.agents.retain(|a| a.id() != id);
            tracing::debug!(agent = %id, "despawned");
        }
    }
}

/// Parses `"x,z"` into a ground-plane point.
pub fn parse_point(text: &str) -> Result<Vec3> {
    let (x, z) = text
        .split_once(',')
        .with_context(|| format!("Expected x,z but got {text:?}"))?;
    let x: f32 = x.trim().parse().with_context(|| format!("Bad x in {text:?}"))?;
    let z: f32 = z.trim().parse().with_context(|| format!("Bad z in {text:?}"))?;
    Ok(Vec3::new(x, 0.0, z))
}
