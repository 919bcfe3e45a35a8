//! # Configuration
//!
//! Strongly typed game configuration, parsed once at startup.
//!
//! Every section is required and unknown fields are rejected, so a malformed file
//! fails before the first tick instead of on first access.

use crate::game::{AnimationTuning, CompoundSkillDefinition, ElementDefinition, MovementMode, VisualRef};
use crate::input::KeyBindings;
use crate::{SpellforgeError, SpellforgeResult};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

/// Gameplay tuning for the player character.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PlayerTuning {
    /// Horizontal displacement per tick while moving
    pub speed_x: f32,
    /// Vertical displacement per tick while moving
    pub speed_y: f32,
    /// Combat hitbox width
    pub width: f32,
    /// Combat hitbox height
    pub height: f32,
    pub max_health: f32,
    pub max_mana: f32,
    /// Mana restored per regeneration tick (one per second)
    pub mana_regen_rate: f32,
    /// Radius of the pickup hitbox centred on the player
    pub pickup_radius: f32,
    /// Capacity of the element ring buffer
    pub element_capacity: usize,
    pub spawn_x: f32,
    pub spawn_y: f32,
}

impl Default for PlayerTuning {
    fn default() -> Self {
        Self {
            speed_x: 5.0,
            speed_y: 5.0,
            width: 32.0,
            height: 48.0,
            max_health: 100.0,
            max_mana: 100.0,
            mana_regen_rate: 5.0,
            pickup_radius: 50.0,
            element_capacity: 5,
            spawn_x: 100.0,
            spawn_y: 100.0,
        }
    }
}

/// A destructible obstacle placed at world setup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ObstacleSpawn {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub health: f32,
}

/// A pickupable element placed at world setup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PickupSpawn {
    pub x: f32,
    pub y: f32,
    pub element: String,
    pub radius: f32,
}

/// World extent and initial contents.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct WorldLayout {
    pub width: f32,
    pub height: f32,
    pub obstacles: Vec<ObstacleSpawn>,
    pub pickups: Vec<PickupSpawn>,
    /// Extra pickups scattered at random from the setup seed
    pub random_pickups: u32,
}

impl Default for WorldLayout {
    fn default() -> Self {
        Self {
            width: 2400.0,
            height: 1800.0,
            obstacles: vec![
                ObstacleSpawn {
                    x: 400.0,
                    y: 300.0,
                    width: 60.0,
                    height: 60.0,
                    health: 50.0,
                },
                ObstacleSpawn {
                    x: 700.0,
                    y: 520.0,
                    width: 80.0,
                    height: 40.0,
                    health: 120.0,
                },
            ],
            pickups: vec![
                PickupSpawn {
                    x: 150.0,
                    y: 10.0,
                    element: "Fire".to_string(),
                    radius: 12.0,
                },
                PickupSpawn {
                    x: 250.0,
                    y: 20.0,
                    element: "Ice".to_string(),
                    radius: 12.0,
                },
                PickupSpawn {
                    x: 250.0,
                    y: 120.0,
                    element: "Fire".to_string(),
                    radius: 12.0,
                },
            ],
            random_pickups: 8,
        }
    }
}

/// Complete game configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GameConfig {
    pub elements: Vec<ElementDefinition>,
    pub skills: Vec<CompoundSkillDefinition>,
    pub player: PlayerTuning,
    pub keys: KeyBindings,
    pub animation: AnimationTuning,
    pub world: WorldLayout,
    pub movement: MovementMode,
}

fn visual(image_file: &str, scale: f32, color: [u8; 3]) -> VisualRef {
    VisualRef {
        image_file: image_file.to_string(),
        scale,
        color,
    }
}

fn skill(id: &str, damage: f32, speed: f32, mana_cost: f32, color: [u8; 3]) -> CompoundSkillDefinition {
    CompoundSkillDefinition {
        id: id.to_string(),
        damage,
        speed,
        mana_cost,
        radius: 8.0,
        visual: visual(&format!("skills/{}.png", id), 0.3, color),
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            elements: vec![
                ElementDefinition {
                    id: "Fire".to_string(),
                    visual: visual("skills/elements/fire.png", 0.05, [230, 80, 40]),
                },
                ElementDefinition {
                    id: "Ice".to_string(),
                    visual: visual("skills/elements/ice.png", 0.05, [120, 200, 255]),
                },
            ],
            skills: vec![
                skill("FireFire", 25.0, 8.0, 15.0, [255, 120, 0]),
                skill("FireIce", 30.0, 10.0, 20.0, [200, 120, 255]),
                skill("IceFire", 20.0, 12.0, 15.0, [120, 255, 200]),
                skill("IceIce", 15.0, 6.0, 10.0, [180, 230, 255]),
            ],
            player: PlayerTuning::default(),
            keys: KeyBindings::default(),
            animation: AnimationTuning::default(),
            world: WorldLayout::default(),
            movement: MovementMode::default(),
        }
    }
}

impl GameConfig {
    /// Parses and validates a configuration from JSON text.
    pub fn from_json_str(json: &str) -> SpellforgeResult<Self> {
        let config: GameConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses and validates a configuration file.
    pub fn load<P: AsRef<Path>>(path: P) -> SpellforgeResult<Self> {
        let path = path.as_ref();
        log::info!("Loading configuration from {}", path.display());
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    /// Serialises the configuration as pretty JSON.
    pub fn to_json(&self) -> SpellforgeResult<String> {
        serde_json::to_string_pretty(self).map_err(SpellforgeError::from)
    }

    /// Checks values serde cannot express.
    pub fn validate(&self) -> SpellforgeResult<()> {
        let mut element_ids = HashSet::new();
        for element in &self.elements {
            if element.id.is_empty() {
                return invalid("element id must not be empty");
            }
            if !element_ids.insert(element.id.as_str()) {
                return invalid(&format!("duplicate element id {}", element.id));
            }
        }

        let mut skill_ids = HashSet::new();
        for skill in &self.skills {
            if !skill_ids.insert(skill.id.as_str()) {
                return invalid(&format!("duplicate skill id {}", skill.id));
            }
            if skill.speed <= 0.0 || skill.radius <= 0.0 {
                return invalid(&format!("skill {} needs positive speed and radius", skill.id));
            }
            if skill.damage < 0.0 || skill.mana_cost < 0.0 {
                return invalid(&format!("skill {} has negative damage or mana cost", skill.id));
            }
        }

        let player = &self.player;
        if player.speed_x < 0.0 || player.speed_y < 0.0 {
            return invalid("player speeds must not be negative");
        }
        if player.width <= 0.0 || player.height <= 0.0 || player.pickup_radius <= 0.0 {
            return invalid("player hitboxes must be positive");
        }
        if player.max_health <= 0.0 || player.max_mana <= 0.0 || player.mana_regen_rate < 0.0 {
            return invalid("player health and mana maxima must be positive");
        }
        if player.element_capacity == 0 {
            return invalid("element capacity must be at least 1");
        }

        if self.animation.frame_duration <= 0.0 {
            return invalid("animation frame duration must be positive");
        }

        let world = &self.world;
        if world.width <= 0.0 || world.height <= 0.0 {
            return invalid("world extent must be positive");
        }
        for obstacle in &world.obstacles {
            if obstacle.width <= 0.0 || obstacle.height <= 0.0 || obstacle.health <= 0.0 {
                return invalid("obstacles need positive size and health");
            }
        }
        for pickup in &world.pickups {
            if pickup.radius <= 0.0 {
                return invalid("pickups need a positive radius");
            }
        }

        Ok(())
    }
}

fn invalid(message: &str) -> SpellforgeResult<()> {
    Err(SpellforgeError::InvalidConfig(message.to_string()))
}
