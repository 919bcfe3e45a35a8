//! # Projectiles
//!
//! Projectiles are stamped out of a [`CompoundSkillDefinition`]; there is one
//! generic constructor instead of a factory per skill.

use crate::game::{new_entity_id, Circle, CompoundSkillDefinition, EntityId, Position};

/// A projectile in flight.
///
/// Moves in a straight line by `velocity` every tick. No homing, gravity or drag.
#[derive(Debug, Clone, PartialEq)]
pub struct Projectile {
    pub id: EntityId,
    /// Compound skill key the projectile was made from
    pub name: String,
    pub origin: Position,
    pub position: Position,
    pub velocity: Position,
    pub damage: f32,
    pub radius: f32,
    /// Sprite rotation in degrees
    pub angle: f32,
}

impl Projectile {
    /// Advances the projectile by one tick.
    pub fn advance(&mut self) {
        self.position += self.velocity;
    }

    /// Collision shape at the current position.
    pub fn hitbox(&self) -> Circle {
        Circle::new(self.position, self.radius)
    }
}

/// Creates a projectile for `skill` fired from `origin` at `aim_angle` degrees.
///
/// Velocity is `speed * (cos(aim + 90°), sin(aim + 90°))`. The +90° offset matches
/// the sprite convention where "up" is forward, so an aim of 0 flies towards +y.
pub fn create_projectile(
    skill: &CompoundSkillDefinition,
    origin: Position,
    aim_angle: f32,
) -> Projectile {
    let angle_rad = (aim_angle + 90.0).to_radians();
    let velocity = Position::new(skill.speed * angle_rad.cos(), skill.speed * angle_rad.sin());

    Projectile {
        id: new_entity_id(),
        name: skill.id.clone(),
        origin,
        position: origin,
        velocity,
        damage: skill.damage,
        radius: skill.radius,
        angle: aim_angle,
    }
}
