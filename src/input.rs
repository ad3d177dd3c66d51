//! Raw input collection and the per-frame [`InputState`] value.
//!
//! Bevy input messages are translated into [`RawInput`] events and queued in
//! [`InputQueue`].  [`apply_input_system`] drains the queue once per frame
//! into the persistent [`InputState`]; nothing else mutates it, so the
//! simulation core only ever sees a plain value.
//!
//! Several keys can drive one control (W and ArrowUp both thrust up).  The
//! state remembers which bound keys are down and only drops a control once
//! the last of them is released.

use bevy::input::keyboard::KeyboardInput;
use bevy::input::mouse::{MouseButtonInput, MouseScrollUnit, MouseWheel};
use bevy::input::ButtonState;
use bevy::prelude::*;
use bevy::window::CursorMoved;

use crate::config::GameConfig;
use crate::constants::WHEEL_PIXELS_PER_LINE;

/// Flight controls bound to keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    Up,
    Down,
    Left,
    Right,
    Boost,
    Dock,
}

impl Control {
    /// Controls that stay engaged across a dock and relaunch while the key
    /// is physically held.
    pub const MOVEMENT: [Control; 5] = [
        Control::Up,
        Control::Down,
        Control::Left,
        Control::Right,
        Control::Boost,
    ];

    /// Key bindings: WASD and arrows, left Shift boost, E dock.
    pub fn from_key(key: KeyCode) -> Option<Self> {
        match key {
            KeyCode::KeyW | KeyCode::ArrowUp => Some(Control::Up),
            KeyCode::KeyS | KeyCode::ArrowDown => Some(Control::Down),
            KeyCode::KeyA | KeyCode::ArrowLeft => Some(Control::Left),
            KeyCode::KeyD | KeyCode::ArrowRight => Some(Control::Right),
            KeyCode::ShiftLeft => Some(Control::Boost),
            KeyCode::KeyE => Some(Control::Dock),
            _ => None,
        }
    }
}

/// Device event, already mapped to game terms.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RawInput {
    /// A bound key went down; unbound keys never reach the queue.
    KeyDown(KeyCode),
    KeyUp(KeyCode),
    TriggerDown,
    TriggerUp,
    /// Pointer position in window pixels (origin top-left, y down).
    PointerMoved(Vec2),
    /// Wheel travel in pixels; positive zooms in.
    Wheel(f32),
}

/// Events collected since the last tick.
#[derive(Resource, Debug, Default)]
pub struct InputQueue(pub Vec<RawInput>);

impl InputQueue {
    #[inline]
    pub fn push(&mut self, event: RawInput) {
        self.0.push(event);
    }
}

/// Controls held this frame plus the accumulated zoom target.
#[derive(Resource, Debug, Clone, PartialEq)]
pub struct InputState {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
    pub boost: bool,
    pub dock: bool,
    pub trigger: bool,
    pub pointer: Vec2,
    pub target_zoom: f32,
    /// Bound keys currently down, in press order.
    pub held_keys: Vec<KeyCode>,
}

impl Default for InputState {
    fn default() -> Self {
        Self {
            up: false,
            down: false,
            left: false,
            right: false,
            boost: false,
            dock: false,
            trigger: false,
            pointer: Vec2::ZERO,
            target_zoom: 1.0,
            held_keys: Vec::new(),
        }
    }
}

impl InputState {
    /// Fold queued events into the state, in arrival order.
    pub fn apply(&mut self, events: impl IntoIterator<Item = RawInput>, config: &GameConfig) {
        for event in events {
            match event {
                RawInput::KeyDown(key) => self.press(key),
                RawInput::KeyUp(key) => self.release(key),
                RawInput::TriggerDown => self.trigger = true,
                RawInput::TriggerUp => self.trigger = false,
                RawInput::PointerMoved(pos) => self.pointer = pos,
                RawInput::Wheel(pixels) => {
                    self.target_zoom = (self.target_zoom + pixels * config.zoom_sensitivity)
                        .clamp(config.zoom_min, config.zoom_max);
                }
            }
        }
    }

    fn press(&mut self, key: KeyCode) {
        let Some(control) = Control::from_key(key) else {
            return;
        };
        if !self.held_keys.contains(&key) {
            self.held_keys.push(key);
        }
        self.set(control, true);
    }

    fn release(&mut self, key: KeyCode) {
        let Some(control) = Control::from_key(key) else {
            return;
        };
        self.held_keys.retain(|held| *held != key);
        let still_held = self
            .held_keys
            .iter()
            .any(|held| Control::from_key(*held) == Some(control));
        self.set(control, still_held);
    }

    /// Re-engage movement for keys that are physically down, typically
    /// right after [`release_all`](Self::release_all) on a relaunch.  Dock
    /// is never resumed.
    pub fn resume_held(&mut self, pressed: impl IntoIterator<Item = KeyCode>) {
        for key in pressed {
            if Control::from_key(key).is_some_and(|c| Control::MOVEMENT.contains(&c)) {
                self.press(key);
            }
        }
    }

    fn set(&mut self, control: Control, held: bool) {
        match control {
            Control::Up => self.up = held,
            Control::Down => self.down = held,
            Control::Left => self.left = held,
            Control::Right => self.right = held,
            Control::Boost => self.boost = held,
            Control::Dock => self.dock = held,
        }
    }

    /// Release everything held; the zoom target and pointer survive.
    pub fn release_all(&mut self) {
        *self = Self {
            pointer: self.pointer,
            target_zoom: self.target_zoom,
            ..Self::default()
        };
    }

    /// Unit thrust direction (y down), or zero when no key is held or the
    /// held keys cancel out.
    pub fn thrust_direction(&self) -> Vec2 {
        let mut dir = Vec2::ZERO;
        if self.up {
            dir.y -= 1.0;
        }
        if self.down {
            dir.y += 1.0;
        }
        if self.left {
            dir.x -= 1.0;
        }
        if self.right {
            dir.x += 1.0;
        }
        dir.normalize_or_zero()
    }

    #[inline]
    pub fn is_thrusting(&self) -> bool {
        self.thrust_direction() != Vec2::ZERO
    }
}

/// Translate this frame's Bevy input messages into [`RawInput`] events.
pub fn collect_input_system(
    mut keys: MessageReader<KeyboardInput>,
    mut buttons: MessageReader<MouseButtonInput>,
    mut cursor: MessageReader<CursorMoved>,
    mut wheel: MessageReader<MouseWheel>,
    mut queue: ResMut<InputQueue>,
) {
    for key in keys.read() {
        if key.repeat {
            continue;
        }
        if Control::from_key(key.key_code).is_none() {
            continue;
        }
        queue.push(match key.state {
            ButtonState::Pressed => RawInput::KeyDown(key.key_code),
            ButtonState::Released => RawInput::KeyUp(key.key_code),
        });
    }

    for button in buttons.read() {
        if button.button != MouseButton::Left {
            continue;
        }
        queue.push(match button.state {
            ButtonState::Pressed => RawInput::TriggerDown,
            ButtonState::Released => RawInput::TriggerUp,
        });
    }

    for moved in cursor.read() {
        queue.push(RawInput::PointerMoved(moved.position));
    }

    for scroll in wheel.read() {
        let pixels = match scroll.unit {
            MouseScrollUnit::Line => scroll.y * WHEEL_PIXELS_PER_LINE,
            MouseScrollUnit::Pixel => scroll.y,
        };
        queue.push(RawInput::Wheel(pixels));
    }
}

/// Drain the queue into [`InputState`], oldest event first.
pub fn apply_input_system(
    mut queue: ResMut<InputQueue>,
    mut input: ResMut<InputState>,
    config: Res<GameConfig>,
) {
    if queue.0.is_empty() {
        return;
    }
    let events = std::mem::take(&mut queue.0);
    input.apply(events, &config);
}
