//! # Spellforge
//!
//! A small 2D action-RPG: the player walks a scrolling world, picks up elemental
//! pickups, crafts pairs of elements into compound skills and fires those skills as
//! projectiles at destructible obstacles.
//!
//! ## Architecture Overview
//!
//! The crate is split into a pure simulation core and a thin macroquad host:
//!
//! - **Game**: tick-driven simulation (movement, animation, crafting, projectiles,
//!   collisions, events). Nothing in `game` touches the window or the GPU.
//! - **Config**: strongly typed configuration tables parsed once at startup
//! - **Input**: host-independent key codes plus the macroquad input adapter
//! - **Rendering / Scenes**: drawing and pause handling on top of macroquad
//!
//! The host feeds `on_key_press`, `on_key_release`, `on_mouse_motion` and
//! `update(delta_time)` into [`GameState`] and reads back everything it draws.

pub mod config;
pub mod game;
pub mod input;
pub mod rendering;
pub mod scenes;

// Core module re-exports
pub use config::*;
pub use game::*;
pub use input::*;
pub use rendering::*;
pub use scenes::*;

/// Core error type for the Spellforge game.
///
/// Only setup paths produce errors. Requests made during play that cannot be
/// honoured are no-ops, not errors.
#[derive(thiserror::Error, Debug)]
pub enum SpellforgeError {
    /// I/O operation failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    /// Configuration parsed but is not usable
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Result type used throughout the Spellforge codebase.
pub type SpellforgeResult<T> = Result<T, SpellforgeError>;

/// Version information for the game.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Game-wide constants.
pub mod constants {
    /// Screen width of the fixed-camera variant, in pixels
    pub const SCREEN_WIDTH: f32 = 800.0;

    /// Screen height of the fixed-camera variant, in pixels
    pub const SCREEN_HEIGHT: f32 = 600.0;

    /// Window title
    pub const SCREEN_TITLE: &str = "Spellforge";

    /// Number of equipped compound-skill slots
    pub const SKILL_SLOTS: usize = 2;

    /// Number of elements combined into one compound skill
    pub const ELEMENTS_PER_SKILL: usize = 2;

    /// Seconds of accumulated time per mana regeneration tick
    pub const MANA_REGEN_INTERVAL: f32 = 1.0;
}
