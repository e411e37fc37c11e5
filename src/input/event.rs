use serde::{Deserialize, Serialize};

use crate::math::Vector2;

/// The device class an `InputEvent` comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum InputEventKind {
    Key,
    MouseButton,
    MouseMotion,
    MouseWheel,
    GamepadButton,
    GamepadAxis,
}

/// Input device event delivered to the scene tree.
///
/// `code` is the device specific key, button or axis code. `axis` carries the
/// analog payload of motion, wheel and axis events, and the cursor position of
/// mouse button events.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InputEvent {
    pub kind: InputEventKind,
    /// Seconds since the host started.
    pub timestamp: f64,
    pub code: u32,
    pub pressed: bool,
    pub axis: Option<Vector2<f32>>,
}

impl InputEvent {
    pub fn key(code: u32, pressed: bool, timestamp: f64) -> Self {
        InputEvent {
            kind: InputEventKind::Key,
            timestamp,
            code,
            pressed,
            axis: None,
        }
    }

    pub fn mouse_button(code: u32, pressed: bool, position: Vector2<f32>, timestamp: f64) -> Self {
        InputEvent {
            kind: InputEventKind::MouseButton,
            timestamp,
            code,
            pressed,
            axis: Some(position),
        }
    }

    pub fn mouse_motion(position: Vector2<f32>, timestamp: f64) -> Self {
        InputEvent {
            kind: InputEventKind::MouseMotion,
            timestamp,
            code: 0,
            pressed: false,
            axis: Some(position),
        }
    }

    pub fn mouse_wheel(delta: Vector2<f32>, timestamp: f64) -> Self {
        InputEvent {
            kind: InputEventKind::MouseWheel,
            timestamp,
            code: 0,
            pressed: false,
            axis: Some(delta),
        }
    }

    pub fn gamepad_button(code: u32, pressed: bool, timestamp: f64) -> Self {
        InputEvent {
            kind: InputEventKind::GamepadButton,
            timestamp,
            code,
            pressed,
            axis: None,
        }
    }

    pub fn gamepad_axis(code: u32, value: Vector2<f32>, timestamp: f64) -> Self {
        InputEvent {
            kind: InputEventKind::GamepadAxis,
            timestamp,
            code,
            pressed: false,
            axis: Some(value),
        }
    }

    #[inline]
    pub fn is_key(&self) -> bool {
        self.kind == InputEventKind::Key
    }

    /// Keys, mouse buttons and gamepad buttons may trigger shortcuts.
    #[inline]
    pub fn is_shortcut_eligible(&self) -> bool {
        match self.kind {
            InputEventKind::Key | InputEventKind::MouseButton | InputEventKind::GamepadButton => {
                true
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn shortcut_eligibility() {
        assert!(InputEvent::key(32, true, 0.0).is_shortcut_eligible());
        assert!(InputEvent::gamepad_button(1, true, 0.0).is_shortcut_eligible());
        assert!(InputEvent::mouse_button(0, true, Vector2::new(1.0, 2.0), 0.0).is_shortcut_eligible());
        assert!(!InputEvent::mouse_motion(Vector2::new(1.0, 2.0), 0.0).is_shortcut_eligible());
        assert!(!InputEvent::gamepad_axis(0, Vector2::new(0.5, 0.0), 0.0).is_shortcut_eligible());
    }
}
