//! End-to-end flow: pick up elements, craft a compound skill, fire it and break
//! an obstacle.

use spellforge::config::{ObstacleSpawn, PickupSpawn};
use spellforge::{GameConfig, GameState, Key, Modifiers, SpellforgeResult};

const FRAME: f32 = 1.0 / 60.0;

fn arena() -> GameConfig {
    let mut config = GameConfig::default();
    config.world.random_pickups = 0;
    config.world.obstacles = vec![ObstacleSpawn {
        x: 100.0,
        y: 300.0,
        width: 60.0,
        height: 60.0,
        health: 50.0,
    }];
    config.world.pickups = vec![
        PickupSpawn {
            x: 120.0,
            y: 100.0,
            element: "Ice".to_string(),
            radius: 12.0,
        },
        PickupSpawn {
            x: 110.0,
            y: 100.0,
            element: "Fire".to_string(),
            radius: 12.0,
        },
    ];
    config
}

fn tap(state: &mut GameState, key: Key) {
    state.on_key_press(key, Modifiers::NONE);
    state.on_key_release(key, Modifiers::NONE);
}

fn run(state: &mut GameState, frames: usize) {
    for _ in 0..frames {
        state.update(FRAME);
    }
}

#[test]
fn test_pickups_are_collected_closest_first() -> SpellforgeResult<()> {
    let mut state = GameState::new(&arena(), 1)?;
    state.update(FRAME);
    assert_eq!(state.nearby_pickups().len(), 2);

    tap(&mut state, Key::F);
    state.update(FRAME);
    tap(&mut state, Key::F);
    state.update(FRAME);

    let elements: Vec<&str> = state.player().elements.iter().map(String::as_str).collect();
    assert_eq!(elements, vec!["Fire", "Ice"]);
    assert!(state.world.pickupables.is_empty());
    assert_eq!(state.statistics.elements_collected, 2);

    tap(&mut state, Key::F);
    state.update(FRAME);
    assert_eq!(state.player().elements.len(), 2);

    Ok(())
}

#[test]
fn test_craft_fire_and_destroy_obstacle() -> SpellforgeResult<()> {
    let mut state = GameState::new(&arena(), 1)?;
    state.update(FRAME);
    tap(&mut state, Key::F);
    state.update(FRAME);
    tap(&mut state, Key::F);
    state.update(FRAME);

    // Cursor sits on the newest element; step back to Fire first.
    tap(&mut state, Key::Q);
    tap(&mut state, Key::Space);
    tap(&mut state, Key::E);
    tap(&mut state, Key::Space);
    assert_eq!(state.player().equipped_skill(0), Some("FireIce"));
    assert_eq!(state.player().equipped_skill(1), None);

    state.on_mouse_motion(100.0, 300.0);
    state.update(FRAME);

    tap(&mut state, Key::H);
    assert_eq!(state.player().mana.current(), 80.0);
    state.update(FRAME);
    assert_eq!(state.world.projectiles.len(), 1);

    run(&mut state, 30);
    assert!(state.world.projectiles.is_empty());
    assert_eq!(state.world.obstacles.len(), 1);
    assert_eq!(state.world.obstacles[0].health.current(), 20.0);

    tap(&mut state, Key::H);
    state.update(FRAME);
    run(&mut state, 30);
    assert!(state.world.obstacles.is_empty());

    assert_eq!(state.statistics.projectiles_fired, 2);
    assert_eq!(state.statistics.skills_crafted, 1);
    assert_eq!(state.statistics.obstacles_destroyed, 1);
    assert_eq!(state.statistics.damage_dealt, 60.0);

    Ok(())
}

#[test]
fn test_order_of_collection_changes_skill() -> SpellforgeResult<()> {
    let mut state = GameState::new(&arena(), 1)?;
    state.player_mut().collect_element("Fire");
    state.player_mut().collect_element("Ice");
    state.player_mut().collect_element("Ice");
    state.player_mut().collect_element("Fire");

    assert_eq!(state.player().equipped_skill(0), Some("IceFire"));
    assert_eq!(state.player().equipped_skill(1), Some("FireIce"));

    let fire_ice = state.world.skills.skill("FireIce").map(|s| s.damage);
    let ice_fire = state.world.skills.skill("IceFire").map(|s| s.damage);
    assert_ne!(fire_ice, ice_fire);

    Ok(())
}

#[test]
fn test_unknown_combination_fires_nothing() -> SpellforgeResult<()> {
    let mut state = GameState::new(&arena(), 1)?;
    state.player_mut().collect_element("Fire");
    state.player_mut().collect_element("Lightning");

    tap(&mut state, Key::H);
    state.update(FRAME);

    assert!(state.world.projectiles.is_empty());
    assert_eq!(state.player().mana.current(), 100.0);
    assert_eq!(state.statistics.projectiles_fired, 0);

    Ok(())
}
