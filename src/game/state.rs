//! # Game State Module
//!
//! Central game state and the per-tick update that coordinates every system.
//!
//! [`GameState`] is the whole boundary the host talks to: it receives key and
//! mouse input, advances the simulation once per frame and exposes read-only
//! accessors for drawing. Nothing in here touches the window or the clock.

use crate::config::GameConfig;
use crate::game::{
    clamp_to_bounds, closest_overlapping, expire_out_of_bounds, move_with_walls,
    overlapping_pickups, resolve_projectile_hits, CollisionReport, EntityId, EventBus, EventKind,
    GameEvent, Obstacle, Pickupable, Player, Position, Projectile, Rect, SkillTable, Circle,
};
use crate::input::{ActiveKeys, Key, Modifiers};
use crate::SpellforgeResult;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

/// Radius of pickups scattered at world setup.
const SCATTERED_PICKUP_RADIUS: f32 = 12.0;

/// Everything that exists in the play area.
///
/// This is also the context the event handlers run against.
#[derive(Debug, Clone)]
pub struct World {
    pub player: Player,
    pub obstacles: Vec<Obstacle>,
    pub pickupables: Vec<Pickupable>,
    pub projectiles: Vec<Projectile>,
    /// Area the player and projectiles live in
    pub bounds: Rect,
    pub skills: SkillTable,
    /// Key shown in "press to pick up" prompts
    pub pickup_prompt_key: Key,
    nearby_pickups: Vec<EntityId>,
    collected: Vec<String>,
}

impl World {
    /// Builds the world described by `config`. `seed` drives the scattered pickups.
    pub fn new(config: &GameConfig, seed: u64) -> Self {
        let skills = SkillTable::new(&config.elements, &config.skills);
        let bounds = Rect::from_origin(config.world.width, config.world.height);

        let mut player = Player::new(
            "Player".to_string(),
            &config.player,
            config.keys.clone(),
            config.animation.clone(),
            config.movement,
        );
        player.position = clamp_to_bounds(&player.hitbox(), &bounds);

        let obstacles = config
            .world
            .obstacles
            .iter()
            .map(Obstacle::from_spawn)
            .collect();

        let mut pickupables = Vec::new();
        for spawn in &config.world.pickups {
            if skills.element(&spawn.element).is_none() {
                log::warn!(
                    "Skipping pickup at ({}, {}): unknown element {}",
                    spawn.x,
                    spawn.y,
                    spawn.element
                );
                continue;
            }
            pickupables.push(Pickupable::from_spawn(spawn));
        }

        let element_ids: Vec<&str> = config.elements.iter().map(|e| e.id.as_str()).collect();
        scatter_pickups(
            &mut pickupables,
            &element_ids,
            config.world.random_pickups,
            &bounds,
            seed,
        );

        log::info!(
            "World ready: {}x{}, {} obstacles, {} pickups",
            bounds.width,
            bounds.height,
            config.world.obstacles.len(),
            pickupables.len()
        );

        Self {
            pickup_prompt_key: player.bindings().pickup,
            player,
            obstacles,
            pickupables,
            projectiles: Vec::new(),
            bounds,
            skills,
            nearby_pickups: Vec::new(),
            collected: Vec::new(),
        }
    }

    /// Moves the player by its velocity, undoing steps into obstacles, then keeps
    /// it inside the world.
    fn move_player(&mut self) {
        let walls: Vec<Rect> = self.obstacles.iter().map(Obstacle::hitbox).collect();
        let player = &mut self.player;
        let moved = move_with_walls(
            player.position,
            player.velocity,
            player.width,
            player.height,
            &walls,
        );
        let hitbox = Rect::new(moved, player.width, player.height);
        player.position = clamp_to_bounds(&hitbox, &self.bounds);
    }

    fn refresh_nearby_pickups(&mut self) {
        let hitbox = self.player.pickup_hitbox();
        self.nearby_pickups = overlapping_pickups(&hitbox, &self.pickupables)
            .into_iter()
            .map(|index| self.pickupables[index].id)
            .collect();
    }

    /// Moves the closest pickup overlapping `hitbox` into the requester's element
    /// buffer. Nothing in range is a no-op.
    pub fn resolve_pickup(&mut self, requester: EntityId, hitbox: &Circle) -> Option<String> {
        if requester != self.player.id {
            log::warn!("Pickup requested by unknown entity {}", requester);
            return None;
        }
        let Some(index) = closest_overlapping(hitbox, &self.pickupables) else {
            log::debug!("Nothing in range to pick up");
            return None;
        };

        let pickup = self.pickupables.remove(index);
        self.nearby_pickups.retain(|id| *id != pickup.id);
        log::info!("Picked up {}", pickup.element);
        self.player.elements.add(pickup.element.clone());
        self.collected.push(pickup.element.clone());
        Some(pickup.element)
    }

    /// Pickups currently overlapping the player's pickup hitbox.
    pub fn nearby_pickups(&self) -> Vec<&Pickupable> {
        self.pickupables
            .iter()
            .filter(|pickup| self.nearby_pickups.contains(&pickup.id))
            .collect()
    }
}

fn scatter_pickups(
    pickupables: &mut Vec<Pickupable>,
    element_ids: &[&str],
    count: u32,
    bounds: &Rect,
    seed: u64,
) {
    if count == 0 {
        return;
    }
    let margin = SCATTERED_PICKUP_RADIUS;
    if element_ids.is_empty()
        || bounds.width <= margin * 2.0
        || bounds.height <= margin * 2.0
    {
        log::warn!("Cannot scatter {} pickups in this world", count);
        return;
    }

    let mut rng = StdRng::seed_from_u64(seed);
    for _ in 0..count {
        let element = element_ids[rng.gen_range(0..element_ids.len())];
        let x = rng.gen_range(bounds.left() + margin..bounds.right() - margin);
        let y = rng.gen_range(bounds.bottom() + margin..bounds.top() - margin);
        pickupables.push(Pickupable::new(
            Position::new(x, y),
            element.to_string(),
            SCATTERED_PICKUP_RADIUS,
        ));
    }
}

/// Running totals for the current session.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GameStatistics {
    /// Projectiles launched
    pub projectiles_fired: u32,
    /// Compound skills crafted
    pub skills_crafted: u32,
    /// Elements picked up from the world
    pub elements_collected: u32,
    /// Obstacles destroyed
    pub obstacles_destroyed: u32,
    /// Total damage applied to obstacles
    pub damage_dealt: f32,
}

impl GameStatistics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Updates statistics based on a game event.
    pub fn update_from_event(&mut self, event: &GameEvent) {
        match event {
            GameEvent::ProjectileShot { .. } => {
                self.projectiles_fired += 1;
            }
            GameEvent::SkillCrafted { .. } => {
                self.skills_crafted += 1;
            }
            _ => {}
        }
    }

    /// Updates statistics from a projectile sweep.
    pub fn record_collisions(&mut self, report: &CollisionReport) {
        self.damage_dealt += report.hits.iter().map(|hit| hit.damage).sum::<f32>();
        self.obstacles_destroyed += report.destroyed.len() as u32;
    }
}

/// Central game state: the world, the event bus and the input it has seen.
#[derive(Debug)]
pub struct GameState {
    pub world: World,
    pub statistics: GameStatistics,
    bus: EventBus<World>,
    active_keys: ActiveKeys,
    mouse: Position,
    tick: u64,
    seed: u64,
}

impl GameState {
    /// Validates `config` and builds a fresh game.
    pub fn new(config: &GameConfig, seed: u64) -> SpellforgeResult<Self> {
        config.validate()?;

        let world = World::new(config, seed);
        let mouse = world.player.position;
        let mut bus = EventBus::new();
        register_world_handlers(&mut bus);

        Ok(Self {
            world,
            statistics: GameStatistics::new(),
            bus,
            active_keys: ActiveKeys::new(),
            mouse,
            tick: 0,
            seed,
        })
    }

    /// Handles a key press from the host.
    pub fn on_key_press(&mut self, key: Key, modifiers: Modifiers) {
        self.active_keys.press(key, modifiers);
        let world = &mut self.world;
        world.player.on_key_press(key, &world.skills);
    }

    /// Handles a key release from the host.
    pub fn on_key_release(&mut self, key: Key, _modifiers: Modifiers) {
        self.active_keys.release(key);
        self.world.player.on_key_release(key);
    }

    /// Records the mouse position, in world coordinates.
    pub fn on_mouse_motion(&mut self, x: f32, y: f32) {
        self.mouse = Position::new(x, y);
    }

    /// Releases every held key through the normal release path and empties the
    /// active set. Must be called whenever the game stops receiving input, or keys
    /// held at that moment stay pressed after resuming.
    ///
    /// Returns the released entries.
    pub fn on_hide(&mut self) -> Vec<(Key, Modifiers)> {
        let released = self.active_keys.drain();
        for (key, modifiers) in &released {
            self.on_key_release(*key, *modifiers);
        }
        log::debug!("Released {} held keys on hide", released.len());
        released
    }

    /// Advances the simulation by one frame.
    ///
    /// Order: player (movement, animation, mana), projectile integration,
    /// projectile hits and expiry, player integration against walls and bounds,
    /// pickup proximity, then event dispatch.
    pub fn update(&mut self, delta_time: f32) {
        self.tick += 1;
        let world = &mut self.world;

        world.player.update(self.mouse, delta_time);

        for projectile in &mut world.projectiles {
            projectile.advance();
        }
        let report = resolve_projectile_hits(&mut world.projectiles, &mut world.obstacles);
        self.statistics.record_collisions(&report);
        expire_out_of_bounds(&mut world.projectiles, &world.bounds);

        world.move_player();
        world.refresh_nearby_pickups();

        let events = world.player.drain_events();
        for event in &events {
            self.statistics.update_from_event(event);
        }
        self.bus.dispatch_all(world, &events);
        self.statistics.elements_collected += world.collected.drain(..).count() as u32;
    }

    pub fn player(&self) -> &Player {
        &self.world.player
    }

    pub fn player_mut(&mut self) -> &mut Player {
        &mut self.world.player
    }

    pub fn active_keys(&self) -> &ActiveKeys {
        &self.active_keys
    }

    /// Last mouse position, in world coordinates.
    pub fn mouse(&self) -> Position {
        self.mouse
    }

    /// Frames simulated so far.
    pub fn tick(&self) -> u64 {
        self.tick
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn nearby_pickups(&self) -> Vec<&Pickupable> {
        self.world.nearby_pickups()
    }

    pub fn is_game_over(&self) -> bool {
        self.world.player.is_dead()
    }
}

fn register_world_handlers(bus: &mut EventBus<World>) {
    bus.register_handler(EventKind::ProjectileShot, |world, event| {
        if let GameEvent::ProjectileShot { projectile } = event {
            world.projectiles.push(projectile.clone());
        }
    });
    bus.register_handler(EventKind::PickupRequested, |world, event| {
        if let GameEvent::PickupRequested { requester, hitbox } = event {
            world.resolve_pickup(*requester, hitbox);
        }
    });
    bus.register_handler(EventKind::PickupKeyChanged, |world, event| {
        if let GameEvent::PickupKeyChanged { key } = event {
            world.pickup_prompt_key = *key;
        }
    });
    bus.register_handler(EventKind::SkillCrafted, |_, event| {
        if let GameEvent::SkillCrafted { key } = event {
            log::info!("Equipped {}", key);
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{ObstacleSpawn, PickupSpawn};
    use crate::game::{ManaPool, Meter};

    const FRAME: f32 = 1.0 / 60.0;

    fn empty_config() -> GameConfig {
        let mut config = GameConfig::default();
        config.world.obstacles.clear();
        config.world.pickups.clear();
        config.world.random_pickups = 0;
        config
    }

    fn pickup(x: f32, y: f32, element: &str) -> PickupSpawn {
        PickupSpawn {
            x,
            y,
            element: element.to_string(),
            radius: 12.0,
        }
    }

    #[test]
    fn test_game_state_creation() {
        let state = GameState::new(&GameConfig::default(), 12345).unwrap();
        assert_eq!(state.tick(), 0);
        assert_eq!(state.seed(), 12345);
        assert_eq!(state.world.obstacles.len(), 2);
        assert_eq!(state.world.pickupables.len(), 3 + 8);
        assert_eq!(state.player().position, Position::new(100.0, 100.0));
        assert_eq!(state.world.pickup_prompt_key, Key::F);
    }

    #[test]
    fn test_scatter_is_reproducible() {
        let config = GameConfig::default();
        let a = GameState::new(&config, 7).unwrap();
        let b = GameState::new(&config, 7).unwrap();
        let positions = |state: &GameState| -> Vec<(Position, String)> {
            state
                .world
                .pickupables
                .iter()
                .map(|p| (p.position, p.element.clone()))
                .collect()
        };
        assert_eq!(positions(&a), positions(&b));
        assert!(a
            .world
            .pickupables
            .iter()
            .all(|p| a.world.bounds.contains(p.position)));
    }

    #[test]
    fn test_unknown_pickup_element_skipped() {
        let mut config = empty_config();
        config.world.pickups = vec![pickup(10.0, 10.0, "Wind"), pickup(20.0, 20.0, "Ice")];
        let state = GameState::new(&config, 1).unwrap();
        assert_eq!(state.world.pickupables.len(), 1);
        assert_eq!(state.world.pickupables[0].element, "Ice");
    }

    #[test]
    fn test_invalid_config_rejected() {
        let mut config = GameConfig::default();
        config.world.width = 0.0;
        assert!(GameState::new(&config, 1).is_err());
    }

    #[test]
    fn test_mana_regenerates_through_update() {
        let mut state = GameState::new(&empty_config(), 1).unwrap();
        state.player_mut().mana = ManaPool::new(Meter::with_current(50.0, 100.0), 5.0);
        state.update(1.0);
        assert_eq!(state.player().mana.current(), 55.0);

        state.update(0.3);
        state.update(0.3);
        state.update(0.3);
        assert_eq!(state.player().mana.current(), 55.0);
        state.update(0.3);
        assert_eq!(state.player().mana.current(), 60.0);
    }

    #[test]
    fn test_movement_integrates_per_frame() {
        let mut state = GameState::new(&empty_config(), 1).unwrap();
        state.on_key_press(Key::D, Modifiers::NONE);
        state.update(FRAME);
        state.update(FRAME);
        assert_eq!(state.player().position, Position::new(110.0, 100.0));

        state.on_key_release(Key::D, Modifiers::NONE);
        state.update(FRAME);
        assert_eq!(state.player().position, Position::new(110.0, 100.0));
    }

    #[test]
    fn test_player_stays_in_bounds() {
        let mut config = empty_config();
        config.player.spawn_x = 20.0;
        let mut state = GameState::new(&config, 1).unwrap();
        state.on_key_press(Key::A, Modifiers::NONE);
        for _ in 0..10 {
            state.update(FRAME);
        }
        assert_eq!(state.player().position.x, 16.0);
    }

    #[test]
    fn test_obstacle_blocks_player() {
        let mut config = empty_config();
        config.world.obstacles = vec![ObstacleSpawn {
            x: 150.0,
            y: 100.0,
            width: 60.0,
            height: 60.0,
            health: 50.0,
        }];
        let mut state = GameState::new(&config, 1).unwrap();
        state.on_key_press(Key::D, Modifiers::NONE);
        for _ in 0..10 {
            state.update(FRAME);
        }
        let player = state.player();
        assert!(player.position.x + player.width / 2.0 <= 120.0);
        assert!(player.position.x >= 100.0);
    }

    #[test]
    fn test_pickup_takes_closest() {
        let mut config = empty_config();
        config.world.pickups = vec![pickup(130.0, 100.0, "Ice"), pickup(110.0, 100.0, "Fire")];
        let mut state = GameState::new(&config, 1).unwrap();

        state.update(FRAME);
        assert_eq!(state.nearby_pickups().len(), 2);

        state.on_key_press(Key::F, Modifiers::NONE);
        state.update(FRAME);

        assert_eq!(state.world.pickupables.len(), 1);
        assert_eq!(state.world.pickupables[0].element, "Ice");
        assert_eq!(
            state.player().elements.get_current().map(String::as_str),
            Some("Fire")
        );
        assert_eq!(state.statistics.elements_collected, 1);
        assert_eq!(state.nearby_pickups().len(), 1);
    }

    #[test]
    fn test_pickup_out_of_range_is_noop() {
        let mut config = empty_config();
        config.world.pickups = vec![pickup(400.0, 400.0, "Ice")];
        let mut state = GameState::new(&config, 1).unwrap();
        state.on_key_press(Key::F, Modifiers::NONE);
        state.update(FRAME);
        assert_eq!(state.world.pickupables.len(), 1);
        assert!(state.player().elements.is_empty());
        assert!(state.nearby_pickups().is_empty());
    }

    #[test]
    fn test_shot_adds_projectile() {
        let mut state = GameState::new(&empty_config(), 1).unwrap();
        state.player_mut().collect_element("Fire");
        state.player_mut().collect_element("Ice");
        state.on_key_press(Key::H, Modifiers::NONE);
        state.update(FRAME);

        assert_eq!(state.world.projectiles.len(), 1);
        assert_eq!(state.world.projectiles[0].name, "FireIce");
        assert_eq!(state.player().mana.current(), 80.0);
        assert_eq!(state.statistics.projectiles_fired, 1);
        assert_eq!(state.statistics.skills_crafted, 1);
    }

    #[test]
    fn test_projectile_expires_outside_world() {
        let mut state = GameState::new(&empty_config(), 1).unwrap();
        state.player_mut().collect_element("Ice");
        state.player_mut().collect_element("Ice");
        state.on_mouse_motion(100.0, 50.0);
        state.update(FRAME);
        state.on_key_press(Key::H, Modifiers::NONE);
        state.update(FRAME);
        assert_eq!(state.world.projectiles.len(), 1);

        for _ in 0..30 {
            state.update(FRAME);
        }
        assert!(state.world.projectiles.is_empty());
    }

    #[test]
    fn test_hide_releases_held_keys() {
        let mut state = GameState::new(&empty_config(), 1).unwrap();
        state.on_key_press(Key::W, Modifiers::NONE);
        state.on_key_press(Key::LeftShift, Modifiers::SHIFT);
        assert!(state.player().movement().is_moving());

        let released = state.on_hide();
        assert_eq!(released.len(), 2);
        assert!(released.contains(&(Key::W, Modifiers::NONE)));
        assert!(released.contains(&(Key::LeftShift, Modifiers::SHIFT)));
        assert!(state.active_keys().is_empty());
        assert!(!state.player().movement().is_moving());
    }

    #[test]
    fn test_pickup_key_change_updates_prompt() {
        let mut state = GameState::new(&empty_config(), 1).unwrap();
        state.player_mut().set_pickup_key(Key::G);
        state.update(FRAME);
        assert_eq!(state.world.pickup_prompt_key, Key::G);
    }

    #[test]
    fn test_statistics_update() {
        let mut stats = GameStatistics::new();
        stats.update_from_event(&GameEvent::SkillCrafted {
            key: "FireIce".to_string(),
        });
        stats.update_from_event(&GameEvent::PickupKeyChanged { key: Key::G });
        assert_eq!(stats.skills_crafted, 1);
        assert_eq!(stats.projectiles_fired, 0);
    }
}
