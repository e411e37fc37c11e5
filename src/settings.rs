//! Functions for loading scene tree settings.

use serde::{Deserialize, Serialize};

use crate::errors::*;

/// A structure containing configuration data for a `SceneTree` and the
/// `MainLoop` driving it. Missing fields fall back to their defaults when
/// loaded from JSON.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Fixed capacity of the deferred free queue. Queueing more nodes than
    /// this within a single frame fails with `Error::FreeQueueOverflow`.
    pub free_queue_capacity: usize,
    /// The rate of fixed-step physics ticks.
    pub physics_ticks_per_second: u32,
    /// Upper bound of physics ticks caught up in one frame.
    pub max_physics_steps_per_frame: u32,
    /// Whether the tree starts paused.
    pub paused: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            free_queue_capacity: 1024,
            physics_ticks_per_second: 60,
            max_physics_steps_per_frame: 8,
            paused: false,
        }
    }
}

impl Settings {
    /// Parses settings from a JSON document and validates them.
    pub fn from_json(json: &str) -> Result<Self> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> Result<()> {
        if self.free_queue_capacity == 0 {
            return Err(Error::InvalidSettings("free_queue_capacity must be positive"));
        }

        if self.physics_ticks_per_second == 0 {
            return Err(Error::InvalidSettings(
                "physics_ticks_per_second must be positive",
            ));
        }

        if self.max_physics_steps_per_frame == 0 {
            return Err(Error::InvalidSettings(
                "max_physics_steps_per_frame must be positive",
            ));
        }

        Ok(())
    }

    /// The duration of one physics tick in seconds.
    #[inline]
    pub fn physics_delta(&self) -> f32 {
        1.0 / self.physics_ticks_per_second.max(1) as f32
    }
}
