//! Agents driven by one steering behavior each.

use ai_combat::{CombatWorldMut, CombatWorldView};
use ai_core::{EntityId, TickContext, Vec3};
use ai_nav::NavGrid;
use ai_steering::{
    apply_desired, evade, flee, follow_leader, path_following, pursuit, queue, seek, wander,
    SteeringAgent,
};
use anyhow::{ensure, Context, Result};

use crate::arena::Arena;
use crate::config::{SteererConfig, SteeringBehavior};

#[derive(Debug, Clone)]
pub struct Steerer {
    pub agent: SteeringAgent,
    pub behavior: SteeringBehavior,
}

/// The steerer group plus a stand-in agent for the player, so behaviors that
/// take another agent can target either.
#[derive(Debug)]
pub struct Steerers {
    members: Vec<Steerer>,
    player: SteeringAgent,
}

impl Steerers {
    pub fn spawn(arena: &mut Arena, configs: &[SteererConfig], player: EntityId) -> Result<Self> {
        let mut members = Vec::with_capacity(configs.len());
        for (index, config) in configs.iter().enumerate() {
            for other in config.behavior.references() {
                ensure!(
                    other < configs.len() && other != index,
                    "Steerer {index} refers to steerer {other}, which is not another steerer"
                );
            }
            let id = arena.spawn_sphere(config.position, config.radius, &["steerer"]);
            let mut agent = SteeringAgent::new(id, config.position, config.steering)
                .with_context(|| format!("Invalid steering parameters for steerer {index}"))?;
            if let SteeringBehavior::FollowPath { waypoints } = &config.behavior {
                agent.path.set_waypoints(waypoints.clone());
            }
            members.push(Steerer {
                agent,
                behavior: config.behavior.clone(),
            });
        }

        let position = arena.position(player).unwrap_or(Vec3::ZERO);
        let player = SteeringAgent::new(player, position, Default::default())
            .context("Invalid player steering parameters")?;
        Ok(Self { members, player })
    }

    pub fn members(&self) -> &[Steerer] {
        &self.members
    }

    /// Runs every steerer's behavior for one fixed step and writes the
    /// resulting velocities into the arena.
    pub fn tick(&mut self, ctx: &TickContext, arena: &mut Arena, navigator: &NavGrid) {
        let player_alive = self.refresh(arena);
        let snapshot: Vec<SteeringAgent> = self.members.iter().map(|s| s.agent.clone()).collect();
        let other = |index: Option<usize>| match index {
            Some(i) => snapshot.get(i),
            None => player_alive.then_some(&self.player),
        };

        let mut velocities = Vec::with_capacity(self.members.len());
        for steerer in &mut self.members {
            let agent = &mut steerer.agent;
            let velocity = match &steerer.behavior {
                SteeringBehavior::Hold => apply_desired(agent, Vec3::ZERO),
                SteeringBehavior::Seek { target } | SteeringBehavior::Queue { target, .. } => {
                    seek(agent, *target)
                }
                SteeringBehavior::Flee { target } => flee(agent, *target),
                SteeringBehavior::FollowPath { .. } => path_following(agent, navigator),
                SteeringBehavior::Pursuit { quarry } => match other(*quarry) {
                    Some(quarry) => pursuit(agent, quarry),
                    None => apply_desired(agent, Vec3::ZERO),
                },
                SteeringBehavior::Evade { quarry } => match other(*quarry) {
                    Some(threat) => evade(agent, threat),
                    None => apply_desired(agent, Vec3::ZERO),
                },
                SteeringBehavior::FollowLeader { leader } => match other(*leader) {
                    Some(leader) => follow_leader(leader, agent, &snapshot),
                    None => apply_desired(agent, Vec3::ZERO),
                },
                SteeringBehavior::Wander => {
                    let mut rng = ctx.rng_for_agent(agent.id);
                    wander(agent, &mut rng)
                }
            };
            agent.velocity = velocity;
            velocities.push(velocity);
        }

        // Queue leaders override whatever their followers chose.
        for steerer in &self.members {
            let SteeringBehavior::Queue { followers, .. } = &steerer.behavior else {
                continue;
            };
            let mut line: Vec<SteeringAgent> =
                followers.iter().map(|&i| snapshot[i].clone()).collect();
            queue(&steerer.agent, &mut line);
            for (&i, follower) in followers.iter().zip(&line) {
                velocities[i] = follower.velocity;
            }
        }

        for (steerer, velocity) in self.members.iter_mut().zip(velocities) {
            steerer.agent.velocity = velocity;
            arena.set_velocity(steerer.agent.id, velocity);
        }
    }

    /// Pulls positions from the arena. Returns whether the player is still in
    /// the world.
    fn refresh(&mut self, arena: &Arena) -> bool {
        for steerer in &mut self.members {
            if let Some(position) = arena.position(steerer.agent.id) {
                steerer.agent.position = position;
            }
        }
        match arena.position(self.player.id) {
            Some(position) => {
                self.player.position = position;
                self.player.velocity = arena.velocity(self.player.id).unwrap_or(Vec3::ZERO);
                true
            }
            None => false,
        }
    }
}
