//! # Rendering Module
//!
//! Macroquad drawing for the world and the HUD. Reads [`crate::GameState`] and never
//! mutates the simulation.

pub mod display;
pub mod ui;

pub use display::*;
pub use ui::*;
