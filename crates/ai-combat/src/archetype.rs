//! Data that distinguishes melee, ranged and tower agents.

use ai_core::error::ensure_non_negative;
use ai_core::{ConfigError, Vec3};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{CombatState, SensorRig};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum AttackStyle {
    /// Damage lands when the host reports the swing animation finished.
    Melee,
    /// Fires a bullet and plays an attack animation.
    Ranged,
    /// Fires a bullet; no animation.
    Turret,
}

#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum MovementStyle {
    DirectSeek,
    /// Walks a grid route to the target, searching again once the target has
    /// moved more than `repath_distance` from the route's goal.
    PathFollowing { repath_distance: f32 },
    Stationary,
}

/// What an agent does when it perceives nothing and has no fallback target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum IdleBehavior {
    #[default]
    Hold,
    Wander,
}

impl IdleBehavior {
    pub fn state(self) -> CombatState {
        match self {
            IdleBehavior::Hold => CombatState::None,
            IdleBehavior::Wander => CombatState::Wandering,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Archetype {
    pub attack: AttackStyle,
    pub movement: MovementStyle,
    pub senses: SensorRig,
    /// Whether the agent falls back to chasing the player when it perceives
    /// nothing.
    pub seeks_player: bool,
    pub idle: IdleBehavior,
}

impl Archetype {
    pub fn melee() -> Self {
        Self {
            attack: AttackStyle::Melee,
            movement: MovementStyle::DirectSeek,
            senses: SensorRig::default(),
            seeks_player: true,
            idle: IdleBehavior::Hold,
        }
    }

    pub fn ranged() -> Self {
        Self {
            attack: AttackStyle::Ranged,
            ..Self::melee()
        }
    }

    pub fn tower(sight_radius: f32) -> Self {
        Self {
            attack: AttackStyle::Turret,
            movement: MovementStyle::Stationary,
            senses: SensorRig::sight_only(sight_radius),
            seeks_player: false,
            idle: IdleBehavior::Hold,
        }
    }
}

/// Everything a [`CombatAgent`](crate::CombatAgent) needs beyond its
/// kinematics.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CombatProfile {
    pub archetype: Archetype,
    /// Tag carried by the entities this agent treats as enemies.
    pub enemy_tag: String,
    pub attack_range: f32,
    pub attack_cooldown: f32,
    pub damage: f32,
    /// Bullet spawn point relative to the agent.
    pub muzzle_offset: Vec3,
    /// Seconds a dead agent stays in the world before removal.
    pub despawn_delay: f32,
}

impl CombatProfile {
    pub fn new(archetype: Archetype) -> Self {
        Self {
            archetype,
            enemy_tag: "player".to_string(),
            attack_range: 4.0,
            attack_cooldown: 0.5,
            damage: 10.0,
            muzzle_offset: Vec3::new(0.0, 1.0, 0.0),
            despawn_delay: 2.0,
        }
    }

    pub fn melee() -> Self {
        Self::new(Archetype::melee())
    }

    pub fn ranged() -> Self {
        Self::new(Archetype::ranged())
    }

    /// Towers attack anything they can see, on a slower cooldown.
    pub fn tower(sight_radius: f32) -> Self {
        Self {
            attack_range: sight_radius,
            attack_cooldown: 2.0,
            ..Self::new(Archetype::tower(sight_radius))
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        ensure_non_negative("attack_range", self.attack_range)?;
        ensure_non_negative("attack_cooldown", self.attack_cooldown)?;
        ensure_non_negative("damage", self.damage)?;
        ensure_non_negative("despawn_delay", self.despawn_delay)?;
        if let MovementStyle::PathFollowing { repath_distance } = self.archetype.movement {
            ensure_non_negative("repath_distance", repath_distance)?;
        }
        let senses = &self.archetype.senses;
        let sensors = [
            ("eye_radius", senses.eye),
            ("ear_radius", senses.ear),
            ("tact_radius", senses.tact),
        ];
        for (name, sensor) in sensors {
            if let Some(sensor) = sensor {
                ensure_non_negative(name, sensor.radius)?;
            }
        }
        Ok(())
    }
}
