//! Integration test to ensure the game can start from the bundled configuration.

use spellforge::{ActionState, GameConfig, GameState, Key, Modifiers, Position, SpellforgeResult};

#[test]
fn test_basic_startup() -> SpellforgeResult<()> {
    let config = GameConfig::load("assets/config/game.json")?;
    let mut game_state = GameState::new(&config, 12345)?;

    assert_eq!(game_state.tick(), 0);
    assert_eq!(game_state.world.obstacles.len(), config.world.obstacles.len());
    assert_eq!(
        game_state.world.pickupables.len(),
        config.world.pickups.len() + config.world.random_pickups as usize
    );
    assert_eq!(game_state.player().action_state(), ActionState::Idle);

    for _ in 0..120 {
        game_state.update(1.0 / 60.0);
    }
    assert_eq!(game_state.tick(), 120);
    assert_eq!(game_state.player().position, Position::new(100.0, 100.0));

    Ok(())
}

#[test]
fn test_walk_animation_follows_input() -> SpellforgeResult<()> {
    let mut game_state = GameState::new(&GameConfig::default(), 1)?;

    game_state.on_key_press(Key::A, Modifiers::NONE);
    game_state.update(0.1);
    let frame = game_state.player().frame();
    assert_eq!(frame.state, ActionState::Walk);
    assert!(frame.texture_key().starts_with("walk_left"));

    game_state.on_key_release(Key::A, Modifiers::NONE);
    game_state.update(0.1);
    assert_eq!(game_state.player().action_state(), ActionState::Idle);

    Ok(())
}

#[test]
fn test_missing_config_fails_before_first_tick() {
    let result = GameConfig::load("assets/config/does-not-exist.json");
    assert!(matches!(result, Err(spellforge::SpellforgeError::Io(_))));
}
