//! Timing and stepping of a scene tree.

use crate::input::InputEvent;
use crate::settings::Settings;

use super::SceneTree;

/// What happened during one `MainLoop::iteration`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameInfo {
    /// Zero-based index of the frame.
    pub frame: u64,
    /// The variable timestep handed to `process`.
    pub delta: f32,
    /// The number of fixed-step physics ticks run this frame.
    pub physics_steps: u32,
    /// The number of nodes destroyed by the free queue flush.
    pub freed: usize,
}

/// Drives a `SceneTree` frame by frame: input dispatch, fixed-step physics
/// ticks, process, then the deferred free queue flush.
#[derive(Debug, Clone)]
pub struct MainLoop {
    physics_delta: f32,
    max_physics_steps: u32,
    accumulator: f32,
    frame: u64,
}

impl MainLoop {
    pub fn new(settings: &Settings) -> Self {
        MainLoop {
            physics_delta: settings.physics_delta(),
            max_physics_steps: settings.max_physics_steps_per_frame.max(1),
            accumulator: 0.0,
            frame: 0,
        }
    }

    /// The duration of one physics tick in seconds.
    #[inline]
    pub fn physics_delta(&self) -> f32 {
        self.physics_delta
    }

    /// The number of frames run so far.
    #[inline]
    pub fn frames(&self) -> u64 {
        self.frame
    }

    /// Runs one frame of `delta` seconds.
    ///
    /// Physics ticks catch up with the elapsed time, but at most
    /// `max_physics_steps_per_frame` of them run per frame; any backlog beyond
    /// that is dropped so a slow frame can not snowball.
    pub fn iteration(&mut self, tree: &mut SceneTree, events: &[InputEvent], delta: f32) -> FrameInfo {
        let delta = delta.max(0.0);

        tree.dispatch_input_events(events);

        self.accumulator += delta;
        let mut physics_steps = 0;
        while self.accumulator >= self.physics_delta && physics_steps < self.max_physics_steps {
            tree.physics_process(self.physics_delta);
            self.accumulator -= self.physics_delta;
            physics_steps += 1;
        }

        if self.accumulator >= self.physics_delta {
            warn!(
                "Dropped {:.3}s of physics backlog at frame {}.",
                self.accumulator, self.frame
            );
            self.accumulator %= self.physics_delta;
        }

        tree.process(delta);
        let freed = tree.flush_free_queue();

        let info = FrameInfo {
            frame: self.frame,
            delta,
            physics_steps,
            freed,
        };

        self.frame += 1;
        info
    }
}
