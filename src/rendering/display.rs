//! # Display Management
//!
//! Draws the world with macroquad primitive shapes and keeps the camera on the
//! player. World space is y-up; screen space is y-down.

use crate::game::{GameState, Position, Rect};
use crate::rendering::{draw_bar, element_color, mirrored_anchor, rgb, UI};
use crate::SpellforgeResult;
use macroquad::prelude::*;

/// How the camera moves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CameraMode {
    /// Stays centred on the player, clamped to the world edges
    Follow,
    /// Always shows the bottom-left corner of the world
    Fixed,
}

/// Viewport onto the world.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WorldCamera {
    pub mode: CameraMode,
    /// World position of the screen's bottom-left corner
    pub origin: Position,
    pub viewport_width: f32,
    pub viewport_height: f32,
}

impl WorldCamera {
    pub fn new(mode: CameraMode, viewport_width: f32, viewport_height: f32) -> Self {
        Self {
            mode,
            origin: Position::origin(),
            viewport_width,
            viewport_height,
        }
    }

    /// Centres on `target` without showing anything outside `bounds`.
    pub fn follow(&mut self, target: Position, bounds: &Rect) {
        if self.mode == CameraMode::Fixed {
            return;
        }
        let axis = |target: f32, view: f32, low: f32, high: f32| {
            if high - low <= view {
                low
            } else {
                (target - view / 2.0).clamp(low, high - view)
            }
        };
        self.origin = Position::new(
            axis(target.x, self.viewport_width, bounds.left(), bounds.right()),
            axis(target.y, self.viewport_height, bounds.bottom(), bounds.top()),
        );
    }

    /// Screen coordinates of a world point.
    pub fn world_to_screen(&self, point: Position) -> (f32, f32) {
        (
            point.x - self.origin.x,
            self.viewport_height - (point.y - self.origin.y),
        )
    }

    /// Screen rectangle `(x, y, width, height)` with `y` at the top edge.
    pub fn rect_to_screen(&self, rect: &Rect) -> (f32, f32, f32, f32) {
        let (x, y) = self.world_to_screen(Position::new(rect.left(), rect.top()));
        (x, y, rect.width, rect.height)
    }
}

/// Macroquad display manager for the game.
pub struct MacroquadDisplay {
    pub camera: WorldCamera,
    /// Message history
    pub messages: Vec<String>,
    /// Maximum number of messages to keep
    pub max_messages: usize,
    pub ui: UI,
}

impl MacroquadDisplay {
    /// Creates a display sized to the current window.
    pub async fn new(mode: CameraMode) -> SpellforgeResult<Self> {
        Ok(Self {
            camera: WorldCamera::new(mode, screen_width(), screen_height()),
            messages: Vec::new(),
            max_messages: 50,
            ui: UI::new(),
        })
    }

    /// Renders the complete game screen.
    pub async fn render_game(&mut self, state: &GameState) -> SpellforgeResult<()> {
        self.camera.viewport_width = screen_width();
        self.camera.viewport_height = screen_height();
        self.camera.follow(state.player().position, &state.world.bounds);

        clear_background(Color::new(0.08, 0.09, 0.12, 1.0));

        self.render_world(state);
        self.render_player(state);
        self.ui.render_hud(state);
        self.render_messages();
        if state.is_game_over() {
            self.ui.render_game_over();
        }
        Ok(())
    }

    fn render_world(&self, state: &GameState) {
        let world = &state.world;
        let (x, y, w, h) = self.camera.rect_to_screen(&world.bounds);
        draw_rectangle_lines(x, y, w, h, 2.0, DARKGRAY);

        for obstacle in &world.obstacles {
            let (x, y, w, h) = self.camera.rect_to_screen(&obstacle.hitbox());
            draw_rectangle(x, y, w, h, BROWN);
            draw_bar(x, y - 8.0, w, 5.0, obstacle.health.fraction(), GREEN);
        }

        for pickup in &world.pickupables {
            let (x, y) = self.camera.world_to_screen(pickup.position);
            draw_circle(x, y, pickup.radius, element_color(&world.skills, &pickup.element));
        }

        let player = self.camera.world_to_screen(world.player.position);
        let anchors: Vec<(f32, f32)> = world
            .nearby_pickups()
            .iter()
            .map(|pickup| mirrored_anchor(player, self.camera.world_to_screen(pickup.position)))
            .collect();
        self.ui.render_pickup_prompts(world.pickup_prompt_key, &anchors);

        for projectile in &world.projectiles {
            let (x, y) = self.camera.world_to_screen(projectile.position);
            let color = world
                .skills
                .skill(&projectile.name)
                .map(|skill| rgb(skill.visual.color))
                .unwrap_or(WHITE);
            draw_circle(x, y, projectile.radius, color);
        }
    }

    fn render_player(&self, state: &GameState) {
        let player = state.player();
        let (x, y, w, h) = self.camera.rect_to_screen(&player.hitbox());
        let body = if player.is_dead() { DARKGRAY } else { SKYBLUE };
        draw_rectangle(x, y, w, h, body);

        let (cx, cy) = self.camera.world_to_screen(player.position);
        let heading = (player.aim_angle + 90.0).to_radians();
        let reach = w.max(h);
        draw_line(
            cx,
            cy,
            cx + heading.cos() * reach,
            cy - heading.sin() * reach,
            2.0,
            YELLOW,
        );

        draw_bar(x, y + h + 4.0, w, 4.0, player.health_fraction(), RED);
        draw_bar(x, y + h + 10.0, w, 4.0, player.mana_fraction(), BLUE);
        draw_text(&player.frame().texture_key(), x, y - 4.0, 14.0, LIGHTGRAY);
    }

    fn render_messages(&self) {
        let line_height = 18.0;
        let base_y = screen_height() - 3.0 * line_height;
        let start = self.messages.len().saturating_sub(3);
        for (i, message) in self.messages.iter().skip(start).enumerate() {
            draw_text(message, 10.0, base_y + i as f32 * line_height, 16.0, WHITE);
        }
    }

    /// Adds a message to the message history.
    pub fn add_message(&mut self, message: String) {
        self.messages.push(message);
        if self.messages.len() > self.max_messages {
            self.messages.remove(0);
        }
    }
}
