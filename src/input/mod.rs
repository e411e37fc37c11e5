//! Input events fed into `SceneTree::dispatch_input_event`.
//!
//! The scene tree routes every event through five phases, stopping as soon as
//! one handler consumes it:
//!
//! 1. `input`, visiting nodes children-first with the last child first;
//! 2. `gui_input` of the focused node;
//! 3. `shortcut_input`, for keys, mouse buttons and gamepad buttons only;
//! 4. `unhandled_key_input`, for keys only;
//! 5. `unhandled_input`.

pub mod event;
pub use self::event::{InputEvent, InputEventKind};
