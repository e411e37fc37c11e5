//! # What is This?
//!
//! A runtime scene tree for 2D games, in the spirit of the crayon framework:
//! hierarchical named nodes owned by a `SceneTree`, lazily evaluated world
//! transforms with version stamps, reentrancy-safe signals, O(1) groups,
//! five-phase input dispatch and a fixed-capacity deferred free queue.
//!
//! Per frame the host (or `MainLoop`) dispatches input, runs fixed-step
//! `physics_process` ticks, runs `process`, and finally flushes the free
//! queue, so nodes queued for deletion stay valid for the whole frame.

#[macro_use]
extern crate log;

pub mod utils;
pub mod errors;
pub mod input;
pub mod math;
pub mod scene;
pub mod settings;

pub mod prelude {
    pub use crate::errors::{Error, Result};
    pub use crate::input::{InputEvent, InputEventKind};
    pub use crate::math::Vector2;
    pub use crate::scene::{
        Camera2D, Component, ComponentKind, Connection, FrameInfo, MainLoop, Node, NodeId,
        NodePath, ProcessMode, SceneTree, Signal, SpriteRenderer, Trs, TRANSFORM_QUANTUM,
    };
    pub use crate::settings::Settings;
}
