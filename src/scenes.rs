//! # Scene Management System
//!
//! Switches between gameplay and the pause overlay. Leaving gameplay always goes
//! through [`GameState::on_hide`] so no key stays held across a pause.

use crate::{apply_input, CameraMode, GameState, InputHandler, MacroquadDisplay, SpellforgeResult};
use macroquad::prelude::*;

/// Represents the current scene in the game
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SceneType {
    /// Normal gameplay
    Playing,
    /// Simulation frozen behind the pause overlay
    Paused,
}

/// What the scene loop should do after this frame's input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SceneCommand {
    Stay,
    Switch(SceneType),
    Quit,
}

impl SceneType {
    /// Escape toggles the pause; Q quits, but only from the pause scene.
    pub fn on_input(self, escape_pressed: bool, quit_pressed: bool) -> SceneCommand {
        match self {
            SceneType::Playing if escape_pressed => SceneCommand::Switch(SceneType::Paused),
            SceneType::Playing => SceneCommand::Stay,
            SceneType::Paused if escape_pressed => SceneCommand::Switch(SceneType::Playing),
            SceneType::Paused if quit_pressed => SceneCommand::Quit,
            SceneType::Paused => SceneCommand::Stay,
        }
    }
}

/// The main scene manager that coordinates all game scenes
pub struct SceneManager {
    current_scene: SceneType,
    game_state: GameState,
    display: MacroquadDisplay,
    input_handler: InputHandler,
    crafted_seen: u32,
}

impl SceneManager {
    /// Creates a new scene manager with the given game state
    pub async fn new(game_state: GameState, camera_mode: CameraMode) -> SpellforgeResult<Self> {
        let mut display = MacroquadDisplay::new(camera_mode).await?;
        display.add_message("Welcome to Spellforge!".to_string());
        display.add_message(
            "WASD move, F pick up, Space combine, Q/E cycle, H/J fire, Esc pause".to_string(),
        );

        Ok(Self {
            current_scene: SceneType::Playing,
            game_state,
            display,
            input_handler: InputHandler::new(),
            crafted_seen: 0,
        })
    }

    pub fn current_scene(&self) -> SceneType {
        self.current_scene
    }

    /// Runs the main scene loop until the game exits
    pub async fn run(&mut self) -> SpellforgeResult<()> {
        loop {
            let escape = self.input_handler.pause_requested();
            let quit = is_key_pressed(KeyCode::Q);

            match self.current_scene.on_input(escape, quit) {
                SceneCommand::Quit => {
                    log::info!("Quit from pause menu");
                    break;
                }
                SceneCommand::Switch(scene) => self.switch_to(scene),
                SceneCommand::Stay => {}
            }

            match self.current_scene {
                SceneType::Playing => self.update_playing_scene().await?,
                SceneType::Paused => self.update_paused_scene().await?,
            }
            next_frame().await;
        }
        Ok(())
    }

    fn switch_to(&mut self, scene: SceneType) {
        if scene == SceneType::Paused {
            let released = self.game_state.on_hide();
            log::debug!("Paused with {} keys held", released.len());
        }
        self.current_scene = scene;
    }

    async fn update_playing_scene(&mut self) -> SpellforgeResult<()> {
        let events = self.input_handler.poll();
        apply_input(&mut self.game_state, &events);

        // A still cursor moves in world space whenever the camera does.
        let camera = &mut self.display.camera;
        camera.follow(self.game_state.player().position, &self.game_state.world.bounds);
        self.input_handler
            .sync_cursor(&mut self.game_state, camera.origin, camera.viewport_height);

        self.game_state.update(get_frame_time());

        if self.game_state.statistics.skills_crafted > self.crafted_seen {
            self.crafted_seen = self.game_state.statistics.skills_crafted;
            if let Some(key) = self.game_state.player().equipped_skill(0) {
                self.display.add_message(format!("Crafted {}", key));
            }
        }

        self.display.render_game(&self.game_state).await
    }

    async fn update_paused_scene(&mut self) -> SpellforgeResult<()> {
        self.display.render_game(&self.game_state).await?;
        self.display.ui.render_pause_overlay();
        Ok(())
    }
}
