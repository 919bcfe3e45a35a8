//! # Game Module
//!
//! The gameplay simulation core.
//!
//! This module contains everything that runs inside one simulation tick:
//! - Player movement resolution and the action/animation state machine
//! - The element ring buffer and the skill-crafting pipeline
//! - Projectile creation and the per-tick collision sweep
//! - The event bus connecting the player to the world
//!
//! None of it depends on the rendering backend.

pub mod animation;
pub mod buffer;
pub mod collision;
pub mod entities;
pub mod events;
pub mod movement;
pub mod projectile;
pub mod skills;
pub mod state;

pub use animation::*;
pub use buffer::*;
pub use collision::*;
pub use entities::*;
pub use events::*;
pub use movement::*;
pub use projectile::*;
pub use skills::*;
pub use state::*;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A point or vector in world space.
///
/// World space is y-up: increasing `y` moves towards the top of the screen.
///
/// # Examples
///
/// ```
/// use spellforge::Position;
///
/// let a = Position::new(0.0, 0.0);
/// let b = Position::new(3.0, 4.0);
/// assert_eq!(a.distance(b), 5.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Position {
    pub x: f32,
    pub y: f32,
}

impl Position {
    /// Creates a new position with the given coordinates.
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Returns the origin position (0, 0).
    pub fn origin() -> Self {
        Self::new(0.0, 0.0)
    }

    /// Length of the vector from the origin.
    pub fn length(self) -> f32 {
        (self.x * self.x + self.y * self.y).sqrt()
    }

    /// Euclidean distance to another position.
    pub fn distance(self, other: Position) -> f32 {
        (self - other).length()
    }

    /// Returns the vector scaled by `factor`.
    pub fn scaled(self, factor: f32) -> Self {
        Self::new(self.x * factor, self.y * factor)
    }
}

impl std::ops::Add for Position {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self::new(self.x + other.x, self.y + other.y)
    }
}

impl std::ops::AddAssign for Position {
    fn add_assign(&mut self, other: Self) {
        self.x += other.x;
        self.y += other.y;
    }
}

impl std::ops::Sub for Position {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        Self::new(self.x - other.x, self.y - other.y)
    }
}

/// Axis-aligned rectangle described by its centre and size.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub center: Position,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    /// Creates a rectangle centred on `center`.
    pub fn new(center: Position, width: f32, height: f32) -> Self {
        Self {
            center,
            width,
            height,
        }
    }

    /// Creates a rectangle spanning `(0, 0)` to `(width, height)`.
    pub fn from_origin(width: f32, height: f32) -> Self {
        Self::new(Position::new(width / 2.0, height / 2.0), width, height)
    }

    pub fn left(&self) -> f32 {
        self.center.x - self.width / 2.0
    }

    pub fn right(&self) -> f32 {
        self.center.x + self.width / 2.0
    }

    pub fn bottom(&self) -> f32 {
        self.center.y - self.height / 2.0
    }

    pub fn top(&self) -> f32 {
        self.center.y + self.height / 2.0
    }

    /// Whether two rectangles overlap. Touching edges do not count.
    pub fn intersects(&self, other: &Rect) -> bool {
        self.left() < other.right()
            && self.right() > other.left()
            && self.bottom() < other.top()
            && self.top() > other.bottom()
    }

    /// Whether a point lies inside the rectangle (edges included).
    pub fn contains(&self, point: Position) -> bool {
        point.x >= self.left()
            && point.x <= self.right()
            && point.y >= self.bottom()
            && point.y <= self.top()
    }
}

/// Circle described by its centre and radius.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Circle {
    pub center: Position,
    pub radius: f32,
}

impl Circle {
    /// Creates a new circle.
    pub fn new(center: Position, radius: f32) -> Self {
        Self { center, radius }
    }

    /// Whether the circle overlaps another circle (touching counts).
    pub fn intersects_circle(&self, other: &Circle) -> bool {
        self.center.distance(other.center) <= self.radius + other.radius
    }

    /// Whether the circle overlaps a rectangle.
    pub fn intersects_rect(&self, rect: &Rect) -> bool {
        let closest = Position::new(
            self.center.x.clamp(rect.left(), rect.right()),
            self.center.y.clamp(rect.bottom(), rect.top()),
        );
        self.center.distance(closest) <= self.radius
    }
}

/// Unique identifier for game entities.
pub type EntityId = Uuid;

/// Creates a new unique entity ID.
pub fn new_entity_id() -> EntityId {
    Uuid::new_v4()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_position_arithmetic() {
        let a = Position::new(5.0, 10.0);
        let b = Position::new(3.0, 2.0);
        assert_eq!(a + b, Position::new(8.0, 12.0));
        assert_eq!(a - b, Position::new(2.0, 8.0));
        assert_eq!(b.scaled(2.0), Position::new(6.0, 4.0));

        let mut c = a;
        c += b;
        assert_eq!(c, Position::new(8.0, 12.0));
    }

    #[test]
    fn test_position_distance() {
        let a = Position::origin();
        let b = Position::new(3.0, 4.0);
        assert_eq!(a.distance(b), 5.0);
        assert_eq!(b.length(), 5.0);
    }

    #[test]
    fn test_rect_edges_are_y_up() {
        let rect = Rect::new(Position::new(10.0, 20.0), 4.0, 6.0);
        assert_eq!(rect.left(), 8.0);
        assert_eq!(rect.right(), 12.0);
        assert_eq!(rect.bottom(), 17.0);
        assert_eq!(rect.top(), 23.0);
    }

    #[test]
    fn test_rect_intersection() {
        let a = Rect::new(Position::new(0.0, 0.0), 10.0, 10.0);
        let b = Rect::new(Position::new(8.0, 0.0), 10.0, 10.0);
        let touching = Rect::new(Position::new(10.0, 0.0), 10.0, 10.0);
        assert!(a.intersects(&b));
        assert!(!a.intersects(&touching));
    }

    #[test]
    fn test_circle_intersections() {
        let circle = Circle::new(Position::new(0.0, 0.0), 5.0);
        let near = Circle::new(Position::new(8.0, 0.0), 3.0);
        let far = Circle::new(Position::new(9.0, 0.0), 3.0);
        assert!(circle.intersects_circle(&near));
        assert!(!circle.intersects_circle(&far));

        let rect = Rect::new(Position::new(10.0, 0.0), 10.0, 10.0);
        assert!(circle.intersects_rect(&rect));
        let rect_far = Rect::new(Position::new(11.0, 0.0), 10.0, 10.0);
        assert!(!circle.intersects_rect(&rect_far));
    }

    #[test]
    fn test_entity_id_uniqueness() {
        let id1 = new_entity_id();
        let id2 = new_entity_id();
        assert_ne!(id1, id2);
    }
}
