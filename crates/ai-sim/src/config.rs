//! Scenario configuration, loaded from a YAML file.

use std::path::Path;

use ai_combat::{CombatProfile, IdleBehavior, MovementStyle, SensorRig};
use ai_core::Vec3;
use ai_nav::GridConfig;
use ai_steering::SteeringParams;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScenarioConfig {
    /// Seed for every agent's wander stream.
    pub seed: u64,

    /// Fixed steps to run when the command line does not say otherwise.
    #[serde(default = "default_ticks")]
    pub ticks: u64,

    /// Seconds per fixed step.
    #[serde(default = "default_fixed_dt")]
    pub fixed_dt: f32,

    /// Seconds per rendered frame; one frame is simulated after every step.
    #[serde(default = "default_fixed_dt")]
    pub frame_dt: f32,

    /// How long a melee swing animation lasts before its damage lands.
    #[serde(default = "default_swing_seconds")]
    pub swing_seconds: f32,

    pub grid: GridSettings,

    /// Axis-aligned boxes; grid cells touching one are unwalkable.
    pub obstacles: Vec<Obstacle>,

    pub player: PlayerConfig,

    pub bullets: BulletConfig,

    pub agents: Vec<AgentConfig>,

    /// Agents driven by a single steering behavior instead of combat logic.
    pub steerers: Vec<SteererConfig>,
}

impl Default for ScenarioConfig {
    fn default() -> Self {
        Self {
            seed: 0,
            ticks: default_ticks(),
            fixed_dt: default_fixed_dt(),
            frame_dt: default_fixed_dt(),
            swing_seconds: default_swing_seconds(),
            grid: GridSettings::default(),
            obstacles: Vec::new(),
            player: PlayerConfig::default(),
            bullets: BulletConfig::default(),
            agents: Vec::new(),
            steerers: Vec::new(),
        }
    }
}

fn default_ticks() -> u64 {
    500
}
fn default_fixed_dt() -> f32 {
    0.02
}
fn default_swing_seconds() -> f32 {
    0.4
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GridSettings {
    pub size_x: f32,
    pub size_z: f32,
    pub node_radius: f32,
    pub origin: Vec3,
}

impl Default for GridSettings {
    fn default() -> Self {
        Self {
            size_x: 40.0,
            size_z: 40.0,
            node_radius: 0.5,
            origin: Vec3::ZERO,
        }
    }
}

impl GridSettings {
    pub fn to_grid_config(&self) -> GridConfig {
        GridConfig::new(self.size_x, self.size_z, self.node_radius).with_origin(self.origin)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Obstacle {
    pub center: Vec3,
    pub half_extents: Vec3,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerConfig {
    pub position: Vec3,
    /// Constant drift, so agents have something to chase.
    pub velocity: Vec3,
    #[serde(default = "default_health")]
    pub health: f32,
    #[serde(default = "default_body_radius")]
    pub radius: f32,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            velocity: Vec3::ZERO,
            health: default_health(),
            radius: default_body_radius(),
        }
    }
}

fn default_health() -> f32 {
    100.0
}
fn default_body_radius() -> f32 {
    0.5
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BulletConfig {
    pub max_speed: f32,
    pub max_force: f32,
    pub hit_radius: f32,
}

impl Default for BulletConfig {
    fn default() -> Self {
        Self {
            max_speed: 15.0,
            max_force: 30.0,
            hit_radius: 0.6,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AgentKind {
    Melee,
    Ranged,
    Tower,
}

/// One agent. Unset combat fields fall back to the archetype's defaults.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentConfig {
    pub kind: AgentKind,
    pub position: Vec3,

    #[serde(default)]
    pub steering: SteeringParams,

    #[serde(default = "default_health")]
    pub health: f32,

    #[serde(default = "default_body_radius")]
    pub radius: f32,

    /// Tower sight radius; also its attack range.
    #[serde(default = "default_tower_sight")]
    pub sight_radius: f32,

    #[serde(default)]
    pub attack_range: Option<f32>,
    #[serde(default)]
    pub attack_cooldown: Option<f32>,
    #[serde(default)]
    pub damage: Option<f32>,
    #[serde(default, with = "serde_yaml::with::singleton_map")]
    pub movement: Option<MovementStyle>,
    #[serde(default)]
    pub senses: Option<SensorRig>,
    #[serde(default)]
    pub idle: Option<IdleBehavior>,
    #[serde(default)]
    pub seeks_player: Option<bool>,
}

fn default_tower_sight() -> f32 {
    10.0
}

/// What a steerer does every fixed step.
///
/// Agent references are indices into the scenario's `steerers` list;
/// `None` means the player.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SteeringBehavior {
    #[default]
    Hold,
    Seek {
        target: Vec3,
    },
    Flee {
        target: Vec3,
    },
    /// Patrols the waypoints back and forth.
    FollowPath {
        waypoints: Vec<Vec3>,
    },
    Pursuit {
        #[serde(default)]
        quarry: Option<usize>,
    },
    Evade {
        #[serde(default)]
        quarry: Option<usize>,
    },
    FollowLeader {
        #[serde(default)]
        leader: Option<usize>,
    },
    /// Seeks `target` while the listed steerers line up behind in order.
    Queue {
        target: Vec3,
        followers: Vec<usize>,
    },
    Wander,
}

impl SteeringBehavior {
    /// Steerer indices this behavior refers to.
    pub fn references(&self) -> Vec<usize> {
        match self {
            SteeringBehavior::Pursuit { quarry: Some(i) }
            | SteeringBehavior::Evade { quarry: Some(i) }
            | SteeringBehavior::FollowLeader { leader: Some(i) } => vec![*i],
            SteeringBehavior::Queue { followers, .. } => followers.clone(),
            _ => Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SteererConfig {
    pub position: Vec3,

    #[serde(default)]
    pub steering: SteeringParams,

    #[serde(default = "default_body_radius")]
    pub radius: f32,

    #[serde(default, with = "serde_yaml::with::singleton_map")]
    pub behavior: SteeringBehavior,
}

impl AgentConfig {
    pub fn profile(&self) -> CombatProfile {
        let mut profile = match self.kind {
            AgentKind::Melee => CombatProfile::melee(),
            AgentKind::Ranged => CombatProfile::ranged(),
            AgentKind::Tower => CombatProfile::tower(self.sight_radius),
        };
        if let Some(range) = self.attack_range {
            profile.attack_range = range;
        }
        if let Some(cooldown) = self.attack_cooldown {
            profile.attack_cooldown = cooldown;
        }
        if let Some(damage) = self.damage {
            profile.damage = damage;
        }
        if let Some(movement) = self.movement {
            profile.archetype.movement = movement;
        }
        if let Some(senses) = self.senses {
            profile.archetype.senses = senses;
        }
        if let Some(idle) = self.idle {
            profile.archetype.idle = idle;
        }
        if let Some(seeks_player) = self.seeks_player {
            profile.archetype.seeks_player = seeks_player;
        }
        profile
    }
}

impl ScenarioConfig {
    /// Load a scenario from a YAML file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read scenario from {}", path.display()))?;
        Self::from_yaml(&content)
            .with_context(|| format!("Failed to parse scenario from {}", path.display()))
    }

    pub fn from_yaml(content: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(content)?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn empty_document_uses_defaults() {
        let config = ScenarioConfig::from_yaml("{}").unwrap();
        assert_eq!(config.ticks, 500);
        assert_eq!(config.fixed_dt, 0.02);
        assert_eq!(config.player.health, 100.0);
        assert!(config.agents.is_empty());
    }

    #[test]
    fn agent_overrides_apply_on_top_of_archetype() {
        let config = ScenarioConfig::from_yaml(
            r#"
agents:
  - kind: ranged
    position: [1.0, 0.0, 2.0]
    attack_range: 6.5
    steering:
      max_speed: 3.0
    movement:
      path_following:
        repath_distance: 1.5
  - kind: tower
    position: [0.0, 0.0, 0.0]
    sight_radius: 12.0
"#,
        )
        .unwrap();

        let ranged = &config.agents[0];
        assert_eq!(ranged.position, Vec3::new(1.0, 0.0, 2.0));
        assert_eq!(ranged.steering.max_speed, 3.0);
        assert_eq!(ranged.steering.max_force, 5.0);
        let profile = ranged.profile();
        assert_eq!(profile.attack_range, 6.5);
        assert_eq!(profile.attack_cooldown, 0.5);
        assert_eq!(
            profile.archetype.movement,
            MovementStyle::PathFollowing {
                repath_distance: 1.5
            }
        );

        let tower = config.agents[1].profile();
        assert_eq!(tower.attack_range, 12.0);
        assert!(tower.archetype.senses.ear.is_none());
    }

    #[test]
    fn load_reports_the_path_on_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "agents: [{{kind: dragon}}]").unwrap();

        let err = ScenarioConfig::load(file.path()).unwrap_err();
        assert!(format!("{err}").contains("Failed to parse scenario"));
    }

    #[test]
    fn load_reads_a_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "seed: 9\nticks: 12").unwrap();

        let config = ScenarioConfig::load(file.path()).unwrap();
        assert_eq!(config.seed, 9);
        assert_eq!(config.ticks, 12);
    }

    #[test]
    fn bundled_scenario_parses() {
        let config = ScenarioConfig::from_yaml(include_str!("../scenarios/arena.yaml")).unwrap();
        assert_eq!(config.agents.len(), 4);
        assert_eq!(config.obstacles.len(), 2);
        assert_eq!(
            config.agents[0].movement,
            Some(MovementStyle::PathFollowing {
                repath_distance: 1.0
            })
        );
        assert!(!config.steerers.is_empty());
        let ranged = config.agents[2].profile();
        assert_eq!(ranged.archetype.idle, IdleBehavior::Wander);
        assert!(!ranged.archetype.seeks_player);
    }

    #[test]
    fn movement_accepts_unit_and_map_forms() {
        let config = ScenarioConfig::from_yaml(
            r#"
agents:
  - kind: melee
    position: [0.0, 0.0, 0.0]
    movement: stationary
  - kind: melee
    position: [0.0, 0.0, 0.0]
    movement: {path_following: {repath_distance: 1.0}}
  - kind: melee
    position: [0.0, 0.0, 0.0]
"#,
        )
        .unwrap();

        assert_eq!(config.agents[0].movement, Some(MovementStyle::Stationary));
        assert_eq!(
            config.agents[1].movement,
            Some(MovementStyle::PathFollowing {
                repath_distance: 1.0
            })
        );
        assert_eq!(config.agents[2].movement, None);
    }

    #[test]
    fn steerer_behaviors_parse() {
        let config = ScenarioConfig::from_yaml(
            r#"
steerers:
  - position: [0.0, 0.0, 0.0]
    behavior: wander
  - position: [1.0, 0.0, 0.0]
    behavior:
      pursuit: {}
  - position: [2.0, 0.0, 0.0]
    behavior:
      queue:
        target: [5.0, 0.0, 5.0]
        followers: [0, 1]
  - position: [3.0, 0.0, 0.0]
"#,
        )
        .unwrap();

        let behaviors: Vec<_> = config.steerers.iter().map(|s| s.behavior.clone()).collect();
        assert_eq!(behaviors[0], SteeringBehavior::Wander);
        assert_eq!(behaviors[1], SteeringBehavior::Pursuit { quarry: None });
        assert_eq!(behaviors[2].references(), vec![0, 1]);
        assert_eq!(behaviors[3], SteeringBehavior::Hold);
    }
}
