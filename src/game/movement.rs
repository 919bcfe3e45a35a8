//! # Movement Resolution
//!
//! Turns held direction keys, the mouse position and the player's speed into a
//! velocity plus a facing angle and an aim angle.
//!
//! Angles are in degrees. An angle of 0 points "up" (+y); angles grow
//! counter-clockwise.

use crate::game::Position;
use crate::input::Key;
use serde::{Deserialize, Serialize};

/// How held direction keys map to world-space velocity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MovementMode {
    /// Directions are relative to the window: forward is always screen-up.
    /// Facing stays at 0 and the aim follows the mouse independently.
    #[default]
    Compass,
    /// Directions are relative to the vector from the player to the mouse.
    /// One angle serves as both facing and aim.
    Mouse,
}

/// The four keys bound to movement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MovementKeys {
    pub forward: Key,
    pub backward: Key,
    pub left: Key,
    pub right: Key,
}

/// Output of one movement resolution.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MovementState {
    /// Displacement applied per tick
    pub velocity: Position,
    /// Angle driving the character's rotation
    pub facing_angle: f32,
    /// Angle projectiles are fired at
    pub aim_angle: f32,
}

/// Angle in radians that turns the player towards the mouse.
///
/// Zero points along +y and the angle increases counter-clockwise.
pub fn face_mouse(mouse: Position, center: Position) -> f32 {
    (mouse.y - center.y).atan2(mouse.x - center.x) - std::f32::consts::FRAC_PI_2
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct HeldDirections {
    forward: bool,
    backward: bool,
    left: bool,
    right: bool,
}

/// Player movement logic.
///
/// Tracks which bound direction keys are held and resolves them into a velocity.
/// While an attack animation plays (`action_finished == false`) the resolved
/// displacement is forced to zero; held keys still count and take effect once the
/// animation completes.
#[derive(Debug, Clone, PartialEq)]
pub struct PlayerMovement {
    mode: MovementMode,
    keys: MovementKeys,
    held: HeldDirections,
    action_finished: bool,
}

impl PlayerMovement {
    /// Creates movement logic with nothing held and no action in progress.
    pub fn new(mode: MovementMode, keys: MovementKeys) -> Self {
        Self {
            mode,
            keys,
            held: HeldDirections::default(),
            action_finished: true,
        }
    }

    pub fn mode(&self) -> MovementMode {
        self.mode
    }

    pub fn set_mode(&mut self, mode: MovementMode) {
        self.mode = mode;
    }

    pub fn keys(&self) -> MovementKeys {
        self.keys
    }

    /// Rebinds the four movement keys.
    ///
    /// Held state is cleared because the release of a previously bound key would
    /// no longer be recognised.
    pub fn set_keys(&mut self, keys: MovementKeys) {
        self.keys = keys;
        self.held = HeldDirections::default();
    }

    /// Records a key press. Returns whether the key is a movement key.
    pub fn on_key_press(&mut self, key: Key) -> bool {
        self.set_held(key, true)
    }

    /// Records a key release. Returns whether the key is a movement key.
    pub fn on_key_release(&mut self, key: Key) -> bool {
        self.set_held(key, false)
    }

    fn set_held(&mut self, key: Key, held: bool) -> bool {
        if key == self.keys.forward {
            self.held.forward = held;
        } else if key == self.keys.backward {
            self.held.backward = held;
        } else if key == self.keys.left {
            self.held.left = held;
        } else if key == self.keys.right {
            self.held.right = held;
        } else {
            return false;
        }
        true
    }

    pub fn action_finished(&self) -> bool {
        self.action_finished
    }

    pub fn set_action_finished(&mut self, finished: bool) {
        self.action_finished = finished;
    }

    /// Net direction of the held keys, each axis in `{-1, 0, 1}`.
    pub fn move_direction(&self) -> (i32, i32) {
        let x = self.held.right as i32 - self.held.left as i32;
        let y = self.held.forward as i32 - self.held.backward as i32;
        (x, y)
    }

    /// Whether any direction is currently requested.
    pub fn is_moving(&self) -> bool {
        self.move_direction() != (0, 0)
    }

    /// Direction actually applied this tick: zero while an action is in progress.
    pub fn displacement_direction(&self) -> (i32, i32) {
        if self.action_finished {
            self.move_direction()
        } else {
            (0, 0)
        }
    }

    /// Resolves velocity, facing and aim for the current input.
    pub fn calculate_player_state(
        &self,
        center: Position,
        mouse: Position,
        speed_x: f32,
        speed_y: f32,
    ) -> MovementState {
        let (dir_x, dir_y) = self.displacement_direction();
        let local = Position::new(speed_x * dir_x as f32, speed_y * dir_y as f32);
        let aim_rad = face_mouse(mouse, center);
        let aim_deg = aim_rad.to_degrees();

        match self.mode {
            MovementMode::Compass => MovementState {
                velocity: local,
                facing_angle: 0.0,
                aim_angle: aim_deg,
            },
            MovementMode::Mouse => {
                let (sin, cos) = aim_rad.sin_cos();
                let velocity = Position::new(
                    cos * local.x - sin * local.y,
                    sin * local.x + cos * local.y,
                );
                MovementState {
                    velocity,
                    facing_angle: aim_deg,
                    aim_angle: aim_deg,
                }
            }
        }
    }
}
