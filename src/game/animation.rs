//! # Action Animation State Machine
//!
//! Decides which action the character is performing, which way it faces and
//! which animation frame to show. The output is a plain [`FrameRef`]; mapping it
//! to a texture is the host's job.

use crate::game::Position;
use crate::input::Key;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Actions a character can perform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionState {
    Idle,
    Walk,
    Slash,
    SpellCast,
    Thrust,
    Shoot,
    /// Terminal: plays once and never exits
    Die,
}

impl ActionState {
    /// Whether the state is one of the non-interruptible attack actions.
    pub fn is_attack(self) -> bool {
        matches!(
            self,
            ActionState::Slash | ActionState::SpellCast | ActionState::Thrust | ActionState::Shoot
        )
    }

    /// Name used in texture keys.
    pub fn name(self) -> &'static str {
        match self {
            ActionState::Idle => "idle",
            ActionState::Walk => "walk",
            ActionState::Slash => "slash",
            ActionState::SpellCast => "spellcast",
            ActionState::Thrust => "thrust",
            ActionState::Shoot => "shoot",
            ActionState::Die => "die",
        }
    }
}

/// Direction the character sprite faces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Facing {
    Up,
    Down,
    Left,
    Right,
}

impl Facing {
    /// Name used in texture keys.
    pub fn name(self) -> &'static str {
        match self {
            Facing::Up => "up",
            Facing::Down => "down",
            Facing::Left => "left",
            Facing::Right => "right",
        }
    }
}

/// The frame a character should be drawn with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrameRef {
    pub state: ActionState,
    pub facing: Facing,
    pub frame: usize,
}

impl FrameRef {
    /// Texture key in the `<state>_<facing><frame>` form, e.g. `walk_left3`.
    pub fn texture_key(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for FrameRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}_{}{}", self.state.name(), self.facing.name(), self.frame)
    }
}

/// Number of frames per direction for every action.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FrameCounts {
    pub idle: usize,
    pub walk: usize,
    pub slash: usize,
    pub spell_cast: usize,
    pub thrust: usize,
    pub shoot: usize,
    pub die: usize,
}

impl FrameCounts {
    /// Frame count for a state, never less than one.
    pub fn get(&self, state: ActionState) -> usize {
        let count = match state {
            ActionState::Idle => self.idle,
            ActionState::Walk => self.walk,
            ActionState::Slash => self.slash,
            ActionState::SpellCast => self.spell_cast,
            ActionState::Thrust => self.thrust,
            ActionState::Shoot => self.shoot,
            ActionState::Die => self.die,
        };
        count.max(1)
    }
}

impl Default for FrameCounts {
    fn default() -> Self {
        Self {
            idle: 2,
            walk: 9,
            slash: 6,
            spell_cast: 7,
            thrust: 8,
            shoot: 13,
            die: 6,
        }
    }
}

/// Animation pacing configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AnimationTuning {
    /// Seconds a frame stays on screen
    pub frame_duration: f32,
    pub frames: FrameCounts,
}

impl Default for AnimationTuning {
    fn default() -> Self {
        Self {
            frame_duration: 0.08,
            frames: FrameCounts::default(),
        }
    }
}

/// The four keys that start attack actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnimationKeys {
    pub slash: Key,
    pub spell_cast: Key,
    pub thrust: Key,
    pub shoot: Key,
}

impl AnimationKeys {
    fn action_for(&self, key: Key) -> Option<ActionState> {
        if key == self.slash {
            Some(ActionState::Slash)
        } else if key == self.spell_cast {
            Some(ActionState::SpellCast)
        } else if key == self.thrust {
            Some(ActionState::Thrust)
        } else if key == self.shoot {
            Some(ActionState::Shoot)
        } else {
            None
        }
    }
}

/// Finite state machine over [`ActionState`] with an orthogonal [`Facing`].
///
/// Attack actions clear `action_finished` (which blocks movement), lock the
/// facing, ignore further attack keys and hand control back once their last
/// frame has played.
#[derive(Debug, Clone, PartialEq)]
pub struct ActionAnimationStateMachine {
    keys: AnimationKeys,
    tuning: AnimationTuning,
    state: ActionState,
    facing: Facing,
    frame: usize,
    timer: f32,
    action_finished: bool,
    is_moving: bool,
}

impl ActionAnimationStateMachine {
    /// Creates a machine idling and facing down.
    pub fn new(keys: AnimationKeys, tuning: AnimationTuning) -> Self {
        Self {
            keys,
            tuning,
            state: ActionState::Idle,
            facing: Facing::Down,
            frame: 0,
            timer: 0.0,
            action_finished: true,
            is_moving: false,
        }
    }

    pub fn state(&self) -> ActionState {
        self.state
    }

    pub fn facing(&self) -> Facing {
        self.facing
    }

    /// False while an attack (or death) animation is playing.
    pub fn action_finished(&self) -> bool {
        self.action_finished
    }

    pub fn is_dead(&self) -> bool {
        self.state == ActionState::Die
    }

    pub fn keys(&self) -> AnimationKeys {
        self.keys
    }

    /// Rebinds the attack keys.
    pub fn set_keys(&mut self, keys: AnimationKeys) {
        self.keys = keys;
    }

    /// Frame to display right now.
    pub fn frame(&self) -> FrameRef {
        FrameRef {
            state: self.state,
            facing: self.facing,
            frame: self.frame,
        }
    }

    /// Handles a key press. Returns true if it started an attack.
    pub fn on_key_press(&mut self, key: Key) -> bool {
        if self.state.is_attack() || self.state == ActionState::Die {
            return false;
        }
        match self.keys.action_for(key) {
            Some(action) => {
                self.enter(action);
                self.action_finished = false;
                true
            }
            None => false,
        }
    }

    /// Switches to the terminal death animation.
    pub fn die(&mut self) {
        if self.state != ActionState::Die {
            self.enter(ActionState::Die);
            self.action_finished = false;
        }
    }

    /// Advances the machine by one tick.
    ///
    /// `velocity` drives the facing, `is_moving` tells whether direction keys are
    /// held.
    pub fn update(&mut self, delta_time: f32, velocity: Position, is_moving: bool) -> FrameRef {
        self.is_moving = is_moving;

        if !self.state.is_attack() && self.state != ActionState::Die {
            self.update_facing(velocity);
            match self.state {
                ActionState::Idle if is_moving => self.enter(ActionState::Walk),
                ActionState::Walk if !is_moving => self.enter(ActionState::Idle),
                _ => {}
            }
        }

        self.timer += delta_time;
        if self.timer > self.tuning.frame_duration {
            self.timer = 0.0;
            self.advance_frame();
        }

        self.frame()
    }

    fn update_facing(&mut self, velocity: Position) {
        let mut facing = self.facing;
        if velocity.y < 0.0 {
            facing = Facing::Down;
        }
        if velocity.y > 0.0 {
            facing = Facing::Up;
        }
        if velocity.x < 0.0 {
            facing = Facing::Left;
        }
        if velocity.x > 0.0 {
            facing = Facing::Right;
        }
        if facing != self.facing {
            self.facing = facing;
            self.frame = 0;
        }
    }

    fn advance_frame(&mut self) {
        let frames = self.tuning.frames.get(self.state);
        if self.state == ActionState::Die {
            if self.frame + 1 < frames {
                self.frame += 1;
            }
            return;
        }

        self.frame += 1;
        if self.frame >= frames {
            self.frame = 0;
            if self.state.is_attack() {
                self.finish_action();
            }
        }
    }

    fn finish_action(&mut self) {
        self.action_finished = true;
        let next = if self.is_moving {
            ActionState::Walk
        } else {
            ActionState::Idle
        };
        self.enter(next);
    }

    fn enter(&mut self, state: ActionState) {
        self.state = state;
        self.frame = 0;
        self.timer = 0.0;
    }
}
