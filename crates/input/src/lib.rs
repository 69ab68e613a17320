//! Input Aggregator: key-down/up events folded into four movement flags and
//! a single edge-triggered interaction action.
//!
//! # Invariants
//! - Unrecognised keys are ignored, never an error.
//! - Last event wins for each flag; there is no queueing or repeat handling.
//! - Interaction fires once per key-down event, never on key-up.

pub mod action;

pub use action::Action;
use glam::Vec2;

/// A recognised key after normalisation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Forward,
    Backward,
    Left,
    Right,
    Interact,
}

impl Key {
    /// Map a browser-style key name (`"w"`, `"ArrowUp"`, ...) to a key.
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "w" | "arrowup" => Some(Self::Forward),
            "s" | "arrowdown" => Some(Self::Backward),
            "a" | "arrowleft" => Some(Self::Left),
            "d" | "arrowright" => Some(Self::Right),
            "e" => Some(Self::Interact),
            _ => None,
        }
    }
}

/// Movement flags sampled once per frame.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InputState {
    pub forward: bool,
    pub backward: bool,
    pub left: bool,
    pub right: bool,
}

impl InputState {
    /// Lateral/forward intent as `(right - left, forward - backward)`.
    pub fn axis(&self) -> Vec2 {
        Vec2::new(
            f32::from(u8::from(self.right)) - f32::from(u8::from(self.left)),
            f32::from(u8::from(self.forward)) - f32::from(u8::from(self.backward)),
        )
    }

    pub fn is_moving(&self) -> bool {
        self.axis() != Vec2::ZERO
    }
}

/// Folds raw key and pointer events into [`InputState`] and [`Action`]s.
#[derive(Debug, Default)]
pub struct InputAggregator {
    state: InputState,
    orbit_sensitivity: f32,
    gesture_seen: bool,
    gesture_pending: bool,
}

impl InputAggregator {
    pub fn new(orbit_sensitivity: f32) -> Self {
        Self {
            orbit_sensitivity,
            ..Self::default()
        }
    }

    pub fn state(&self) -> InputState {
        self.state
    }

    /// Apply one key event. Returns an action for edge-triggered keys.
    pub fn set_key(&mut self, name: &str, pressed: bool) -> Option<Action> {
        if pressed {
            self.note_gesture();
        }
        let key = Key::from_name(name)?;
        match key {
            Key::Forward => self.state.forward = pressed,
            Key::Backward => self.state.backward = pressed,
            Key::Left => self.state.left = pressed,
            Key::Right => self.state.right = pressed,
            Key::Interact => {
                return pressed.then_some(Action::Interact);
            }
        }
        tracing::trace!(?key, pressed, "movement flag updated");
        None
    }

    /// Pointer drag in pixels. Dragging right or down orbits the camera.
    pub fn pointer_drag(&mut self, dx: f32, dy: f32) -> Option<Action> {
        self.note_gesture();
        if dx == 0.0 && dy == 0.0 {
            return None;
        }
        Some(Action::Orbit {
            d_alpha: -dx * self.orbit_sensitivity,
            d_beta: -dy * self.orbit_sensitivity,
        })
    }

    pub fn wheel(&mut self, delta: f32) -> Option<Action> {
        (delta != 0.0).then_some(Action::Zoom(delta))
    }

    /// Reports the first user gesture exactly once.
    pub fn take_first_gesture(&mut self) -> bool {
        std::mem::take(&mut self.gesture_pending)
    }

    /// Release every held key, e.g. when the window loses focus.
    pub fn clear(&mut self) {
        self.state = InputState::default();
    }

    fn note_gesture(&mut self) {
        if !self.gesture_seen {
            self.gesture_seen = true;
            self.gesture_pending = true;
        }
    }
}

pub fn crate_info() -> &'static str {
    "courier-input v0.1.0"
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_names_normalise() {
        assert_eq!(Key::from_name("W"), Some(Key::Forward));
        assert_eq!(Key::from_name("ArrowLeft"), Some(Key::Left));
        assert_eq!(Key::from_name("arrowdown"), Some(Key::Backward));
        assert_eq!(Key::from_name("e"), Some(Key::Interact));
        assert_eq!(Key::from_name("q"), None);
    }

    #[test]
    fn held_key_stays_set_until_release() {
        let mut input = InputAggregator::new(0.001);
        input.set_key("w", true);
        input.set_key("w", true);
        assert!(input.state().forward);
        input.set_key("w", false);
        assert!(!input.state().forward);
    }

    #[test]
    fn unknown_keys_are_ignored() {
        let mut input = InputAggregator::new(0.001);
        assert_eq!(input.set_key("Escape", true), None);
        assert_eq!(input.state(), InputState::default());
    }

    #[test]
    fn interact_fires_per_key_down() {
        let mut input = InputAggregator::new(0.001);
        assert_eq!(input.set_key("e", true), Some(Action::Interact));
        assert_eq!(input.set_key("e", false), None);
        assert_eq!(input.set_key("E", true), Some(Action::Interact));
    }

    #[test]
    fn axis_combines_opposing_keys() {
        let mut input = InputAggregator::new(0.001);
        input.set_key("w", true);
        input.set_key("s", true);
        input.set_key("d", true);
        assert_eq!(input.state().axis(), Vec2::new(1.0, 0.0));
        input.set_key("d", false);
        assert!(!input.state().is_moving());
    }

    #[test]
    fn arrows_and_letters_share_flags() {
        let mut input = InputAggregator::new(0.001);
        input.set_key("ArrowUp", true);
        input.set_key("w", false);
        assert!(!input.state().forward);
    }

    #[test]
    fn first_gesture_reported_once() {
        let mut input = InputAggregator::new(0.001);
        assert!(!input.take_first_gesture());
        input.set_key("x", true);
        assert!(input.take_first_gesture());
        input.set_key("w", true);
        assert!(!input.take_first_gesture());
    }

    #[test]
    fn pointer_drag_scales_by_sensitivity() {
        let mut input = InputAggregator::new(0.01);
        let action = input.pointer_drag(10.0, -5.0).unwrap();
        match action {
            Action::Orbit { d_alpha, d_beta } => {
                assert!((d_alpha + 0.1).abs() < 1e-6);
                assert!((d_beta - 0.05).abs() < 1e-6);
            }
            other => panic!("unexpected action {other:?}"),
        }
        assert_eq!(input.pointer_drag(0.0, 0.0), None);
    }

    #[test]
    fn clear_releases_everything() {
        let mut input = InputAggregator::new(0.001);
        input.set_key("a", true);
        input.set_key("d", true);
        input.clear();
        assert_eq!(input.state(), InputState::default());
    }
}
