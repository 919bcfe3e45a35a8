//! # Events
//!
//! Publish/subscribe plumbing between the player (which raises events) and the
//! world (which materialises projectiles and resolves pickups).
//!
//! Entities own an [`EventEmitter`] and queue events into it while handling
//! input or updating. Once per tick the owner drains those queues and hands each
//! event to the [`EventBus`], which calls the handlers registered for its kind.

use crate::game::{Circle, EntityId, Projectile};
use crate::input::Key;
use std::collections::HashMap;

/// Events raised by entities during play.
#[derive(Debug, Clone, PartialEq)]
pub enum GameEvent {
    /// A projectile was fired and must be added to the world
    ProjectileShot { projectile: Projectile },
    /// An entity wants to pick up the closest item overlapping `hitbox`
    PickupRequested { requester: EntityId, hitbox: Circle },
    /// The pickup key was rebound; prompts should show the new key
    PickupKeyChanged { key: Key },
    /// Two elements were combined into a compound skill
    SkillCrafted { key: String },
}

/// Discriminant used to register handlers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    ProjectileShot,
    PickupRequested,
    PickupKeyChanged,
    SkillCrafted,
}

impl GameEvent {
    pub fn kind(&self) -> EventKind {
        match self {
            GameEvent::ProjectileShot { .. } => EventKind::ProjectileShot,
            GameEvent::PickupRequested { .. } => EventKind::PickupRequested,
            GameEvent::PickupKeyChanged { .. } => EventKind::PickupKeyChanged,
            GameEvent::SkillCrafted { .. } => EventKind::SkillCrafted,
        }
    }
}

/// Outgoing event queue owned by a single entity.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EventEmitter {
    outbox: Vec<GameEvent>,
}

impl EventEmitter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues an event for the next dispatch.
    pub fn notify(&mut self, event: GameEvent) {
        self.outbox.push(event);
    }

    /// Takes every queued event in the order it was raised.
    pub fn drain(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.outbox)
    }

    /// Events waiting for dispatch.
    pub fn pending(&self) -> &[GameEvent] {
        &self.outbox
    }
}

/// Handler invoked with the bus context and the event.
pub type EventHandler<C> = Box<dyn FnMut(&mut C, &GameEvent)>;

/// Handler table keyed by [`EventKind`].
///
/// Written at setup and only read during play.
pub struct EventBus<C> {
    handlers: HashMap<EventKind, Vec<EventHandler<C>>>,
}

impl<C> EventBus<C> {
    pub fn new() -> Self {
        Self {
            handlers: HashMap::new(),
        }
    }

    /// Registers a handler. Several handlers per kind run in registration order.
    pub fn register_handler<F>(&mut self, kind: EventKind, handler: F)
    where
        F: FnMut(&mut C, &GameEvent) + 'static,
    {
        self.handlers.entry(kind).or_default().push(Box::new(handler));
    }

    pub fn has_handler(&self, kind: EventKind) -> bool {
        self.handlers
            .get(&kind)
            .map(|handlers| !handlers.is_empty())
            .unwrap_or(false)
    }

    /// Delivers one event. Returns false if nothing handled it.
    pub fn dispatch(&mut self, context: &mut C, event: &GameEvent) -> bool {
        match self.handlers.get_mut(&event.kind()) {
            Some(handlers) if !handlers.is_empty() => {
                for handler in handlers.iter_mut() {
                    handler(context, event);
                }
                true
            }
            _ => {
                log::warn!("No handler for event type: {:?}", event.kind());
                false
            }
        }
    }

    /// Delivers events in order. Returns how many were handled.
    pub fn dispatch_all(&mut self, context: &mut C, events: &[GameEvent]) -> usize {
        let mut handled = 0;
        for event in events {
            if self.dispatch(context, event) {
                handled += 1;
            }
        }
        handled
    }
}

impl<C> Default for EventBus<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C> std::fmt::Debug for EventBus<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut kinds: Vec<String> = self
            .handlers
            .iter()
            .map(|(kind, handlers)| format!("{:?}x{}", kind, handlers.len()))
            .collect();
        kinds.sort();
        f.debug_struct("EventBus").field("handlers", &kinds).finish()
    }
}
