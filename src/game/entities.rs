//! # Entities
//!
//! The player character, destructible obstacles and pickupable elements.

use crate::config::{ObstacleSpawn, PickupSpawn, PlayerTuning};
use crate::constants::MANA_REGEN_INTERVAL;
use crate::game::{
    create_projectile, new_entity_id, ActionAnimationStateMachine, ActionState, AnimationKeys,
    AnimationTuning, Circle, CircularItemBuffer, EntityId, EventEmitter, FrameRef, GameEvent,
    MovementKeys, MovementMode, PlayerMovement, Position, Rect, SkillCrafter, SkillTable,
};
use crate::input::{Key, KeyBindings};

/// A bounded quantity such as health or mana.
///
/// `0 <= current <= max` holds after every operation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Meter {
    current: f32,
    max: f32,
}

impl Meter {
    /// A full meter.
    pub fn new(max: f32) -> Self {
        let max = max.max(0.0);
        Self { current: max, max }
    }

    /// A meter at `current`, clamped into range.
    pub fn with_current(current: f32, max: f32) -> Self {
        let max = max.max(0.0);
        Self {
            current: current.clamp(0.0, max),
            max,
        }
    }

    pub fn current(&self) -> f32 {
        self.current
    }

    pub fn max(&self) -> f32 {
        self.max
    }

    /// Fill level in `[0, 1]`.
    pub fn fraction(&self) -> f32 {
        if self.max > 0.0 {
            self.current / self.max
        } else {
            0.0
        }
    }

    /// Adds up to `amount`, stopping at the maximum.
    pub fn restore(&mut self, amount: f32) {
        self.current = (self.current + amount).min(self.max);
    }

    /// Removes `amount`, stopping at zero.
    pub fn reduce(&mut self, amount: f32) {
        self.current = (self.current - amount).max(0.0);
    }

    /// Removes `amount` only if that much is available.
    pub fn spend(&mut self, amount: f32) -> bool {
        if self.current < amount {
            return false;
        }
        self.current -= amount;
        true
    }

    pub fn is_depleted(&self) -> bool {
        self.current <= 0.0
    }
}

/// Mana with time-based regeneration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ManaPool {
    pub meter: Meter,
    /// Mana restored per regeneration tick
    pub regen_rate: f32,
    cooldown: f32,
}

impl ManaPool {
    pub fn new(meter: Meter, regen_rate: f32) -> Self {
        Self {
            meter,
            regen_rate,
            cooldown: 0.0,
        }
    }

    /// Accumulates elapsed time and restores `regen_rate` mana once a full
    /// interval has built up. The accumulator restarts from zero afterwards.
    pub fn regenerate(&mut self, delta_time: f32) {
        self.cooldown += delta_time;
        if self.cooldown >= MANA_REGEN_INTERVAL {
            self.meter.restore(self.regen_rate);
            self.cooldown = 0.0;
        }
    }

    pub fn current(&self) -> f32 {
        self.meter.current()
    }
}

/// The controllable player character.
#[derive(Debug, Clone)]
pub struct Player {
    pub id: EntityId,
    pub name: String,
    pub position: Position,
    /// Displacement applied on the next integration
    pub velocity: Position,
    pub facing_angle: f32,
    pub aim_angle: f32,
    pub health: Meter,
    pub mana: ManaPool,
    /// Collected element ids
    pub elements: CircularItemBuffer<String>,
    pub speed_x: f32,
    pub speed_y: f32,
    pub width: f32,
    pub height: f32,
    pub pickup_radius: f32,
    crafter: SkillCrafter,
    movement: PlayerMovement,
    animation: ActionAnimationStateMachine,
    bindings: KeyBindings,
    frame: FrameRef,
    emitter: EventEmitter,
}

impl Player {
    /// Creates a player at the tuning's spawn point.
    pub fn new(
        name: String,
        tuning: &PlayerTuning,
        bindings: KeyBindings,
        animation: AnimationTuning,
        mode: MovementMode,
    ) -> Self {
        let movement = PlayerMovement::new(
            mode,
            MovementKeys {
                forward: bindings.forward,
                backward: bindings.backward,
                left: bindings.left,
                right: bindings.right,
            },
        );
        let animation = ActionAnimationStateMachine::new(
            AnimationKeys {
                slash: bindings.slash,
                spell_cast: bindings.spell_cast,
                thrust: bindings.thrust,
                shoot: bindings.shoot,
            },
            animation,
        );
        let frame = animation.frame();

        Self {
            id: new_entity_id(),
            name,
            position: Position::new(tuning.spawn_x, tuning.spawn_y),
            velocity: Position::origin(),
            facing_angle: 0.0,
            aim_angle: 0.0,
            health: Meter::new(tuning.max_health),
            mana: ManaPool::new(Meter::new(tuning.max_mana), tuning.mana_regen_rate),
            elements: CircularItemBuffer::new(tuning.element_capacity),
            speed_x: tuning.speed_x,
            speed_y: tuning.speed_y,
            width: tuning.width,
            height: tuning.height,
            pickup_radius: tuning.pickup_radius,
            crafter: SkillCrafter::new(),
            movement,
            animation,
            bindings,
            frame,
            emitter: EventEmitter::new(),
        }
    }

    /// Combat hitbox, used for walls and world bounds.
    pub fn hitbox(&self) -> Rect {
        Rect::new(self.position, self.width, self.height)
    }

    /// Pickup hitbox, a circle centred on the player.
    pub fn pickup_hitbox(&self) -> Circle {
        Circle::new(self.position, self.pickup_radius)
    }

    pub fn is_dead(&self) -> bool {
        self.animation.is_dead()
    }

    /// Handles a key press. Dead players ignore input.
    pub fn on_key_press(&mut self, key: Key, skills: &SkillTable) {
        if self.is_dead() {
            return;
        }
        self.movement.on_key_press(key);
        self.animation.on_key_press(key);

        if key == self.bindings.fire_primary {
            self.shoot(0, skills);
        } else if key == self.bindings.fire_secondary {
            self.shoot(1, skills);
        } else if key == self.bindings.combine {
            self.combine_current_element();
        } else if key == self.bindings.element_prev {
            self.elements.set_prev();
        } else if key == self.bindings.element_next {
            self.elements.set_next();
        } else if key == self.bindings.pickup {
            self.request_pickup();
        }
    }

    /// Handles a key release.
    pub fn on_key_release(&mut self, key: Key) {
        self.movement.on_key_release(key);
    }

    /// Resolves movement and animation for this tick and regenerates mana.
    ///
    /// Does not move the player; integration happens in the world so it can be
    /// checked against walls.
    pub fn update(&mut self, mouse: Position, delta_time: f32) {
        self.movement
            .set_action_finished(self.animation.action_finished());
        let state =
            self.movement
                .calculate_player_state(self.position, mouse, self.speed_x, self.speed_y);
        self.velocity = state.velocity;
        self.facing_angle = state.facing_angle;
        self.aim_angle = state.aim_angle;

        let is_moving = self.movement.is_moving();
        self.frame = self.animation.update(delta_time, self.velocity, is_moving);

        if !self.is_dead() {
            self.mana.regenerate(delta_time);
        }
    }

    /// Fires the compound skill equipped in `slot`.
    ///
    /// Does nothing for an empty slot, an unknown skill key or insufficient mana.
    /// Otherwise spends the mana cost and raises one `ProjectileShot` event.
    pub fn shoot(&mut self, slot: usize, skills: &SkillTable) -> bool {
        let Some(key) = self.crafter.slot(slot) else {
            log::debug!("Skill slot {} is empty", slot);
            return false;
        };
        let Some(skill) = skills.skill(key) else {
            log::debug!("No compound skill named {}", key);
            return false;
        };
        if !self.mana.meter.spend(skill.mana_cost) {
            log::debug!(
                "Not enough mana for {}: {} < {}",
                skill.id,
                self.mana.current(),
                skill.mana_cost
            );
            return false;
        }

        let projectile = create_projectile(skill, self.position, self.aim_angle);
        log::debug!("{} fired {} at {:.1} degrees", self.name, skill.id, self.aim_angle);
        self.emitter.notify(GameEvent::ProjectileShot { projectile });
        true
    }

    /// Feeds an element into the crafting pipeline.
    pub fn collect_element(&mut self, element_id: &str) -> Option<String> {
        let crafted = self.crafter.collect(element_id);
        if let Some(key) = &crafted {
            self.emitter
                .notify(GameEvent::SkillCrafted { key: key.clone() });
        }
        crafted
    }

    /// Feeds the element under the inventory cursor into the crafting pipeline.
    pub fn combine_current_element(&mut self) -> Option<String> {
        let element = self.elements.get_current()?.clone();
        self.collect_element(&element)
    }

    /// Raises a pickup request for whatever overlaps the pickup hitbox.
    pub fn request_pickup(&mut self) {
        let hitbox = self.pickup_hitbox();
        self.emitter.notify(GameEvent::PickupRequested {
            requester: self.id,
            hitbox,
        });
    }

    /// Rebinds the four movement keys.
    pub fn set_movement_keys(&mut self, forward: Key, backward: Key, left: Key, right: Key) {
        self.bindings.forward = forward;
        self.bindings.backward = backward;
        self.bindings.left = left;
        self.bindings.right = right;
        self.movement.set_keys(MovementKeys {
            forward,
            backward,
            left,
            right,
        });
    }

    /// Rebinds the pickup key and tells observers so prompts can update.
    pub fn set_pickup_key(&mut self, key: Key) {
        self.bindings.pickup = key;
        self.emitter.notify(GameEvent::PickupKeyChanged { key });
    }

    pub fn set_movement_mode(&mut self, mode: MovementMode) {
        self.movement.set_mode(mode);
    }

    /// Applies damage. Reaching zero health starts the death animation.
    pub fn take_damage(&mut self, amount: f32) {
        self.health.reduce(amount);
        if self.health.is_depleted() {
            self.animation.die();
        }
    }

    pub fn bindings(&self) -> &KeyBindings {
        &self.bindings
    }

    /// Frame to draw the player with.
    pub fn frame(&self) -> FrameRef {
        self.frame
    }

    pub fn action_state(&self) -> ActionState {
        self.animation.state()
    }

    pub fn movement(&self) -> &PlayerMovement {
        &self.movement
    }

    pub fn animation(&self) -> &ActionAnimationStateMachine {
        &self.animation
    }

    pub fn health_fraction(&self) -> f32 {
        self.health.fraction()
    }

    pub fn mana_fraction(&self) -> f32 {
        self.mana.meter.fraction()
    }

    /// Compound key equipped in a slot.
    pub fn equipped_skill(&self, slot: usize) -> Option<&str> {
        self.crafter.slot(slot)
    }

    /// Elements waiting for a crafting partner.
    pub fn pending_elements(&self) -> &[String] {
        self.crafter.pending()
    }

    /// Events raised since the last drain.
    pub fn pending_events(&self) -> &[GameEvent] {
        self.emitter.pending()
    }

    /// Takes the events raised since the last drain.
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        self.emitter.drain()
    }
}

/// A destructible obstacle. Also blocks the player like a wall.
#[derive(Debug, Clone, PartialEq)]
pub struct Obstacle {
    pub id: EntityId,
    pub position: Position,
    pub width: f32,
    pub height: f32,
    pub health: Meter,
}

impl Obstacle {
    pub fn new(position: Position, width: f32, height: f32, health: f32) -> Self {
        Self {
            id: new_entity_id(),
            position,
            width,
            height,
            health: Meter::new(health),
        }
    }

    pub fn from_spawn(spawn: &ObstacleSpawn) -> Self {
        Self::new(
            Position::new(spawn.x, spawn.y),
            spawn.width,
            spawn.height,
            spawn.health,
        )
    }

    pub fn hitbox(&self) -> Rect {
        Rect::new(self.position, self.width, self.height)
    }

    /// Applies damage and reports whether the obstacle is now destroyed.
    pub fn take_damage(&mut self, damage: f32) -> bool {
        self.health.reduce(damage);
        self.is_destroyed()
    }

    pub fn is_destroyed(&self) -> bool {
        self.health.is_depleted()
    }
}

/// An element lying in the world, waiting to be picked up.
#[derive(Debug, Clone, PartialEq)]
pub struct Pickupable {
    pub id: EntityId,
    pub position: Position,
    /// Element id delivered on pickup
    pub element: String,
    pub radius: f32,
}

impl Pickupable {
    pub fn new(position: Position, element: String, radius: f32) -> Self {
        Self {
            id: new_entity_id(),
            position,
            element,
            radius,
        }
    }

    pub fn from_spawn(spawn: &PickupSpawn) -> Self {
        Self::new(
            Position::new(spawn.x, spawn.y),
            spawn.element.clone(),
            spawn.radius,
        )
    }

    pub fn hitbox(&self) -> Circle {
        Circle::new(self.position, self.radius)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;

    fn player() -> (Player, SkillTable) {
        let config = GameConfig::default();
        let player = Player::new(
            "Hero".to_string(),
            &config.player,
            config.keys.clone(),
            config.animation.clone(),
            config.movement,
        );
        (player, SkillTable::new(&config.elements, &config.skills))
    }

    fn shots(player: &Player) -> usize {
        player
            .pending_events()
            .iter()
            .filter(|event| matches!(event, GameEvent::ProjectileShot { .. }))
            .count()
    }

    #[test]
    fn test_meter_stays_in_range() {
        let mut meter = Meter::with_current(150.0, 100.0);
        assert_eq!(meter.current(), 100.0);
        meter.reduce(130.0);
        assert_eq!(meter.current(), 0.0);
        meter.restore(250.0);
        assert_eq!(meter.current(), 100.0);
        assert!(!meter.spend(101.0));
        assert!(meter.spend(40.0));
        assert_eq!(meter.fraction(), 0.6);
    }

    #[test]
    fn test_mana_regenerates_once_per_second() {
        let mut mana = ManaPool::new(Meter::with_current(50.0, 100.0), 5.0);
        mana.regenerate(1.0);
        assert_eq!(mana.current(), 55.0);

        for _ in 0..3 {
            mana.regenerate(0.3);
        }
        assert_eq!(mana.current(), 55.0);
        mana.regenerate(0.3);
        assert_eq!(mana.current(), 60.0);
    }

    #[test]
    fn test_mana_regen_caps_at_max() {
        let mut mana = ManaPool::new(Meter::with_current(98.0, 100.0), 5.0);
        mana.regenerate(1.0);
        assert_eq!(mana.current(), 100.0);
    }

    #[test]
    fn test_combine_crafts_from_inventory_cursor() {
        let (mut player, _) = player();
        player.elements.add("Fire".to_string());
        player.combine_current_element();
        player.elements.add("Ice".to_string());
        assert_eq!(player.combine_current_element(), Some("FireIce".to_string()));
        assert_eq!(player.equipped_skill(0), Some("FireIce"));
        assert!(player.pending_elements().is_empty());
    }

    #[test]
    fn test_combine_with_empty_inventory_is_noop() {
        let (mut player, _) = player();
        assert_eq!(player.combine_current_element(), None);
        assert!(player.pending_elements().is_empty());
    }

    #[test]
    fn test_shoot_spends_mana_and_raises_one_event() {
        let (mut player, skills) = player();
        player.collect_element("Fire");
        player.collect_element("Ice");
        player.drain_events();

        assert!(player.shoot(0, &skills));
        assert_eq!(player.mana.current(), 80.0);
        assert_eq!(shots(&player), 1);

        match &player.pending_events()[0] {
            GameEvent::ProjectileShot { projectile } => {
                assert!((projectile.velocity.length() - 10.0).abs() < 1e-4);
                assert_eq!(projectile.origin, player.position);
            }
            other => panic!("unexpected event {:?}", other),
        }
    }

    #[test]
    fn test_shoot_unknown_skill_is_noop() {
        let (mut player, skills) = player();
        player.collect_element("Fire");
        player.collect_element("Wind");
        player.drain_events();

        assert!(!player.shoot(0, &skills));
        assert_eq!(player.mana.current(), 100.0);
        assert_eq!(shots(&player), 0);
    }

    #[test]
    fn test_shoot_empty_slot_is_noop() {
        let (mut player, skills) = player();
        assert!(!player.shoot(1, &skills));
        assert!(player.pending_events().is_empty());
    }

    #[test]
    fn test_shoot_without_mana_is_noop() {
        let (mut player, skills) = player();
        player.collect_element("Fire");
        player.collect_element("Ice");
        player.drain_events();
        player.mana = ManaPool::new(Meter::with_current(19.0, 100.0), 5.0);

        assert!(!player.shoot(0, &skills));
        assert_eq!(player.mana.current(), 19.0);
        assert_eq!(shots(&player), 0);
    }

    #[test]
    fn test_fire_keys_shoot_slots() {
        let (mut player, skills) = player();
        player.collect_element("Ice");
        player.collect_element("Ice");
        player.drain_events();

        player.on_key_press(Key::J, &skills);
        assert_eq!(shots(&player), 0);
        player.on_key_press(Key::H, &skills);
        assert_eq!(shots(&player), 1);
        assert_eq!(player.mana.current(), 90.0);
    }

    #[test]
    fn test_element_cycling_keys() {
        let (mut player, skills) = player();
        player.elements.add("Fire".to_string());
        player.elements.add("Ice".to_string());
        player.on_key_press(Key::Q, &skills);
        assert_eq!(player.elements.get_current().map(String::as_str), Some("Fire"));
        player.on_key_press(Key::E, &skills);
        assert_eq!(player.elements.get_current().map(String::as_str), Some("Ice"));
    }

    #[test]
    fn test_pickup_key_raises_request() {
        let (mut player, skills) = player();
        player.on_key_press(Key::F, &skills);
        match player.pending_events() {
            [GameEvent::PickupRequested { requester, hitbox }] => {
                assert_eq!(*requester, player.id);
                assert_eq!(hitbox.center, player.position);
                assert_eq!(hitbox.radius, 50.0);
            }
            other => panic!("unexpected events {:?}", other),
        }
    }

    #[test]
    fn test_rebinding_pickup_key() {
        let (mut player, skills) = player();
        player.set_pickup_key(Key::G);
        assert_eq!(
            player.drain_events(),
            vec![GameEvent::PickupKeyChanged { key: Key::G }]
        );
        player.on_key_press(Key::F, &skills);
        assert!(player.pending_events().is_empty());
        player.on_key_press(Key::G, &skills);
        assert_eq!(player.pending_events().len(), 1);
    }

    #[test]
    fn test_rebinding_movement_keys() {
        let (mut player, skills) = player();
        player.on_key_press(Key::W, &skills);
        player.set_movement_keys(Key::Up, Key::Down, Key::Left, Key::Right);
        assert_eq!(player.bindings().forward, Key::Up);
        assert_eq!(player.bindings().left, Key::Left);

        player.update(Position::origin(), 0.1);
        assert_eq!(player.velocity, Position::origin());

        player.on_key_press(Key::W, &skills);
        player.update(Position::origin(), 0.1);
        assert_eq!(player.velocity, Position::origin());

        player.on_key_press(Key::Up, &skills);
        player.on_key_press(Key::Left, &skills);
        player.update(Position::origin(), 0.1);
        assert_eq!(player.velocity, Position::new(-5.0, 5.0));
    }

    #[test]
    fn test_attack_blocks_movement_until_finished() {
        let (mut player, skills) = player();
        player.on_key_press(Key::W, &skills);
        player.on_key_press(Key::Key1, &skills);

        player.update(Position::origin(), 0.1);
        assert_eq!(player.velocity, Position::origin());
        assert_eq!(player.action_state(), ActionState::Slash);

        for _ in 0..10 {
            player.update(Position::origin(), 0.1);
        }
        assert_eq!(player.action_state(), ActionState::Walk);
        assert_eq!(player.velocity, Position::new(0.0, 5.0));
    }

    #[test]
    fn test_death_ignores_input() {
        let (mut player, skills) = player();
        player.take_damage(250.0);
        assert_eq!(player.health.current(), 0.0);
        assert!(player.is_dead());

        player.on_key_press(Key::D, &skills);
        player.update(Position::origin(), 0.1);
        assert_eq!(player.velocity, Position::origin());
        assert_eq!(player.action_state(), ActionState::Die);
    }

    #[test]
    fn test_obstacle_damage() {
        let mut obstacle = Obstacle::new(Position::origin(), 10.0, 10.0, 50.0);
        assert!(!obstacle.take_damage(30.0));
        assert_eq!(obstacle.health.current(), 20.0);
        assert!(obstacle.take_damage(30.0));
        assert_eq!(obstacle.health.current(), 0.0);
    }
}
