//! # Macroquad Input Adapter
//!
//! Polls macroquad once per frame and turns key edges and the cursor into the
//! calls [`GameState`] expects. The simulation never polls the window itself.

use crate::game::{GameState, Position};
use crate::input::{Key, Modifiers};
use macroquad::prelude::*;

/// Keys forwarded to the game. Escape is reserved for the scene manager.
pub const FORWARDED_KEYS: [Key; 49] = [
    Key::A,
    Key::B,
    Key::C,
    Key::D,
    Key::E,
    Key::F,
    Key::G,
    Key::H,
    Key::I,
    Key::J,
    Key::K,
    Key::L,
    Key::M,
    Key::N,
    Key::O,
    Key::P,
    Key::Q,
    Key::R,
    Key::S,
    Key::T,
    Key::U,
    Key::V,
    Key::W,
    Key::X,
    Key::Y,
    Key::Z,
    Key::Key0,
    Key::Key1,
    Key::Key2,
    Key::Key3,
    Key::Key4,
    Key::Key5,
    Key::Key6,
    Key::Key7,
    Key::Key8,
    Key::Key9,
    Key::Up,
    Key::Down,
    Key::Left,
    Key::Right,
    Key::Space,
    Key::Enter,
    Key::Tab,
    Key::LeftShift,
    Key::RightShift,
    Key::LeftControl,
    Key::RightControl,
    Key::LeftAlt,
    Key::RightAlt,
];

/// Macroquad key code for a game key.
pub fn key_code(key: Key) -> KeyCode {
    match key {
        Key::A => KeyCode::A,
        Key::B => KeyCode::B,
        Key::C => KeyCode::C,
        Key::D => KeyCode::D,
        Key::E => KeyCode::E,
        Key::F => KeyCode::F,
        Key::G => KeyCode::G,
        Key::H => KeyCode::H,
        Key::I => KeyCode::I,
        Key::J => KeyCode::J,
        Key::K => KeyCode::K,
        Key::L => KeyCode::L,
        Key::M => KeyCode::M,
        Key::N => KeyCode::N,
        Key::O => KeyCode::O,
        Key::P => KeyCode::P,
        Key::Q => KeyCode::Q,
        Key::R => KeyCode::R,
        Key::S => KeyCode::S,
        Key::T => KeyCode::T,
        Key::U => KeyCode::U,
        Key::V => KeyCode::V,
        Key::W => KeyCode::W,
        Key::X => KeyCode::X,
        Key::Y => KeyCode::Y,
        Key::Z => KeyCode::Z,
        Key::Key0 => KeyCode::Key0,
        Key::Key1 => KeyCode::Key1,
        Key::Key2 => KeyCode::Key2,
        Key::Key3 => KeyCode::Key3,
        Key::Key4 => KeyCode::Key4,
        Key::Key5 => KeyCode::Key5,
        Key::Key6 => KeyCode::Key6,
        Key::Key7 => KeyCode::Key7,
        Key::Key8 => KeyCode::Key8,
        Key::Key9 => KeyCode::Key9,
        Key::Up => KeyCode::Up,
        Key::Down => KeyCode::Down,
        Key::Left => KeyCode::Left,
        Key::Right => KeyCode::Right,
        Key::Space => KeyCode::Space,
        Key::Enter => KeyCode::Enter,
        Key::Escape => KeyCode::Escape,
        Key::Tab => KeyCode::Tab,
        Key::LeftShift => KeyCode::LeftShift,
        Key::RightShift => KeyCode::RightShift,
        Key::LeftControl => KeyCode::LeftControl,
        Key::RightControl => KeyCode::RightControl,
        Key::LeftAlt => KeyCode::LeftAlt,
        Key::RightAlt => KeyCode::RightAlt,
    }
}

/// Converts a window position (origin top-left, y down) into world space
/// (y up), given the world position of the screen's bottom-left corner.
pub fn screen_to_world(
    screen_x: f32,
    screen_y: f32,
    camera_origin: Position,
    screen_height: f32,
) -> Position {
    Position::new(
        camera_origin.x + screen_x,
        camera_origin.y + (screen_height - screen_y),
    )
}

/// One key edge observed during a frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    KeyPressed(Key, Modifiers),
    KeyReleased(Key, Modifiers),
}

/// Input handler that polls macroquad and emits [`InputEvent`]s.
///
/// The cursor is kept in window coordinates. Its world position depends on
/// the camera, so it is re-projected every frame with [`InputHandler::sync_cursor`].
#[derive(Debug, Default)]
pub struct InputHandler {
    cursor: Option<(f32, f32)>,
}

impl InputHandler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current modifier state.
    pub fn modifiers(&self) -> Modifiers {
        Modifiers {
            shift: is_key_down(KeyCode::LeftShift) || is_key_down(KeyCode::RightShift),
            ctrl: is_key_down(KeyCode::LeftControl) || is_key_down(KeyCode::RightControl),
            alt: is_key_down(KeyCode::LeftAlt) || is_key_down(KeyCode::RightAlt),
        }
    }

    /// Collects this frame's key edges and records the cursor.
    pub fn poll(&mut self) -> Vec<InputEvent> {
        let modifiers = self.modifiers();
        let mut events = Vec::new();

        for key in FORWARDED_KEYS {
            let code = key_code(key);
            if is_key_pressed(code) {
                events.push(InputEvent::KeyPressed(key, modifiers));
            }
            if is_key_released(code) {
                events.push(InputEvent::KeyReleased(key, modifiers));
            }
        }

        let (x, y) = mouse_position();
        self.set_cursor(x, y);
        events
    }

    /// Records the cursor in window coordinates.
    pub fn set_cursor(&mut self, x: f32, y: f32) {
        self.cursor = Some((x, y));
    }

    /// Hands the cursor's current world position to the game. Does nothing
    /// until the cursor has been seen once.
    pub fn sync_cursor(&self, state: &mut GameState, camera_origin: Position, screen_height: f32) {
        if let Some((x, y)) = self.cursor {
            let world = screen_to_world(x, y, camera_origin, screen_height);
            state.on_mouse_motion(world.x, world.y);
        }
    }

    /// Whether the pause key went down this frame.
    pub fn pause_requested(&self) -> bool {
        is_key_pressed(key_code(Key::Escape))
    }
}

/// Feeds polled key edges into the game.
pub fn apply_input(state: &mut GameState, events: &[InputEvent]) {
    for event in events {
        match *event {
            InputEvent::KeyPressed(key, modifiers) => state.on_key_press(key, modifiers),
            InputEvent::KeyReleased(key, modifiers) => state.on_key_release(key, modifiers),
        }
    }
}
