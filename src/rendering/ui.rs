//! # User Interface Elements
//!
//! Heads-up display: health and mana, the element inventory, the equipped skill
//! slots, pickup prompts and the pause overlay.

use crate::game::{GameState, Player, SkillTable};
use crate::input::Key;
use macroquad::prelude::*;

const PANEL_MARGIN: f32 = 10.0;
const LINE_HEIGHT: f32 = 20.0;
const SLOT_SIZE: f32 = 36.0;

/// Text shown next to a pickup the player can reach.
pub fn pickup_prompt(key: Key) -> String {
    format!("Press {} to pick up", key.label())
}

/// Where a pickup's prompt goes: the player's reflection through the pickup,
/// so the prompt sits on the far side of the pickup from the player.
pub fn mirrored_anchor(player: (f32, f32), pickup: (f32, f32)) -> (f32, f32) {
    (2.0 * pickup.0 - player.0, 2.0 * pickup.1 - player.1)
}

/// Element inventory as `(element, is_under_cursor)` in slot order.
pub fn inventory_slots(player: &Player) -> Vec<(String, bool)> {
    let cursor = player.elements.current_index();
    player
        .elements
        .iter()
        .enumerate()
        .map(|(index, element)| (element.clone(), index == cursor))
        .collect()
}

/// Label for an equipped skill slot.
pub fn skill_slot_label(slot: usize, key: Option<&str>, fire_key: Key) -> String {
    format!("[{}] {}: {}", fire_key.label(), slot + 1, key.unwrap_or("empty"))
}

/// Display colour for an element, grey if the element is unknown.
pub fn element_color(skills: &SkillTable, element: &str) -> Color {
    skills
        .element(element)
        .map(|definition| rgb(definition.visual.color))
        .unwrap_or(GRAY)
}

/// Converts a configured RGB triple into a macroquad colour.
pub fn rgb(color: [u8; 3]) -> Color {
    Color::from_rgba(color[0], color[1], color[2], 255)
}

/// Draws a horizontal meter with its top-left corner at `(x, y)`.
pub fn draw_bar(x: f32, y: f32, width: f32, height: f32, fraction: f32, fill: Color) {
    draw_rectangle(x, y, width, height, Color::new(0.15, 0.15, 0.15, 0.9));
    draw_rectangle(x, y, width * fraction.clamp(0.0, 1.0), height, fill);
    draw_rectangle_lines(x, y, width, height, 1.0, WHITE);
}

/// Heads-up display drawn in screen space over the world.
#[derive(Debug, Default)]
pub struct UI;

impl UI {
    pub fn new() -> Self {
        Self
    }

    /// Draws the HUD panel in the top-left corner.
    pub fn render_hud(&self, state: &GameState) {
        let player = state.player();
        let skills = &state.world.skills;
        let mut line_y = PANEL_MARGIN;

        draw_text("Health", PANEL_MARGIN, line_y + 14.0, 18.0, WHITE);
        draw_bar(80.0, line_y, 160.0, 16.0, player.health_fraction(), RED);
        line_y += LINE_HEIGHT;
        draw_text("Mana", PANEL_MARGIN, line_y + 14.0, 18.0, WHITE);
        draw_bar(80.0, line_y, 160.0, 16.0, player.mana_fraction(), BLUE);
        line_y += LINE_HEIGHT + 8.0;

        for (index, (element, selected)) in inventory_slots(player).iter().enumerate() {
            let x = PANEL_MARGIN + index as f32 * (SLOT_SIZE + 4.0);
            draw_rectangle(x, line_y, SLOT_SIZE, SLOT_SIZE, element_color(skills, element));
            let border = if *selected { YELLOW } else { DARKGRAY };
            let thickness = if *selected { 3.0 } else { 1.0 };
            draw_rectangle_lines(x, line_y, SLOT_SIZE, SLOT_SIZE, thickness, border);
        }
        line_y += SLOT_SIZE + LINE_HEIGHT;

        let bindings = player.bindings();
        let fire_keys = [bindings.fire_primary, bindings.fire_secondary];
        for (slot, fire_key) in fire_keys.iter().enumerate() {
            let label = skill_slot_label(slot, player.equipped_skill(slot), *fire_key);
            draw_text(&label, PANEL_MARGIN, line_y, 18.0, WHITE);
            line_y += LINE_HEIGHT;
        }

        if !player.pending_elements().is_empty() {
            let pending = player.pending_elements().join(" + ");
            draw_text(&format!("Combining: {} + ?", pending), PANEL_MARGIN, line_y, 18.0, ORANGE);
            line_y += LINE_HEIGHT;
        }

        let stats = &state.statistics;
        draw_text(
            &format!(
                "Shots {}  Crafted {}  Destroyed {}",
                stats.projectiles_fired, stats.skills_crafted, stats.obstacles_destroyed
            ),
            PANEL_MARGIN,
            line_y,
            16.0,
            LIGHTGRAY,
        );
    }

    /// Draws "press key" prompts centred on the given screen points.
    pub fn render_pickup_prompts(&self, key: Key, anchors: &[(f32, f32)]) {
        let prompt = pickup_prompt(key);
        let dims = measure_text(&prompt, None, 16, 1.0);
        for (x, y) in anchors {
            draw_text(&prompt, x - dims.width / 2.0, y + dims.height / 2.0, 16.0, WHITE);
        }
    }

    /// Dims the screen and lists the pause controls.
    pub fn render_pause_overlay(&self) {
        let (width, height) = (screen_width(), screen_height());
        draw_rectangle(0.0, 0.0, width, height, Color::new(0.0, 0.0, 0.0, 0.6));
        let lines = ["PAUSED", "Esc: resume", "Q: quit"];
        for (index, line) in lines.iter().enumerate() {
            let size = if index == 0 { 40.0 } else { 22.0 };
            let dims = measure_text(line, None, size as u16, 1.0);
            draw_text(
                line,
                (width - dims.width) / 2.0,
                height / 2.0 - 30.0 + index as f32 * 34.0,
                size,
                WHITE,
            );
        }
    }

    /// Shown once the player has died.
    pub fn render_game_over(&self) {
        let text = "You died. Esc: pause";
        let dims = measure_text(text, None, 32, 1.0);
        draw_text(
            text,
            (screen_width() - dims.width) / 2.0,
            screen_height() / 2.0,
            32.0,
            RED,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;

    fn player() -> Player {
        let config = GameConfig::default();
        Player::new(
            "Hero".to_string(),
            &config.player,
            config.keys.clone(),
            config.animation.clone(),
            config.movement,
        )
    }

    #[test]
    fn test_pickup_prompt_uses_bound_key() {
        assert_eq!(pickup_prompt(Key::F), "Press F to pick up");
        assert_eq!(pickup_prompt(Key::Key5), "Press 5 to pick up");
    }

    #[test]
    fn test_prompt_mirrors_player_through_pickup() {
        assert_eq!(mirrored_anchor((400.0, 300.0), (430.0, 280.0)), (460.0, 260.0));
        assert_eq!(mirrored_anchor((400.0, 300.0), (400.0, 300.0)), (400.0, 300.0));
    }

    #[test]
    fn test_inventory_marks_cursor() {
        let mut player = player();
        player.elements.add("Fire".to_string());
        player.elements.add("Ice".to_string());
        player.elements.set_prev();
        assert_eq!(
            inventory_slots(&player),
            vec![("Fire".to_string(), true), ("Ice".to_string(), false)]
        );
    }

    #[test]
    fn test_skill_slot_label() {
        assert_eq!(skill_slot_label(0, Some("FireIce"), Key::H), "[H] 1: FireIce");
        assert_eq!(skill_slot_label(1, None, Key::J), "[J] 2: empty");
    }

    #[test]
    fn test_element_color() {
        let config = GameConfig::default();
        let skills = SkillTable::new(&config.elements, &config.skills);
        assert_eq!(element_color(&skills, "Fire"), rgb([230, 80, 40]));
        assert_eq!(element_color(&skills, "Wind"), GRAY);
    }
}
