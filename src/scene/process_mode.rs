use serde::{Deserialize, Serialize};

/// Decides whether a node takes part in process, physics and input
/// traversals given the tree's pause state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProcessMode {
    /// Use the parent's effective mode. The root resolves to `Pausable`.
    Inherit,
    /// Runs only while the tree is not paused.
    Pausable,
    /// Runs only while the tree is paused.
    WhenPaused,
    Always,
    Disabled,
}

impl Default for ProcessMode {
    fn default() -> Self {
        ProcessMode::Inherit
    }
}

impl ProcessMode {
    /// Resolves `Inherit` against the parent's effective mode.
    #[inline]
    pub fn resolve(self, parent: ProcessMode) -> ProcessMode {
        match self {
            ProcessMode::Inherit => parent,
            other => other,
        }
    }

    #[inline]
    pub fn can_process(self, paused: bool) -> bool {
        match self {
            ProcessMode::Inherit | ProcessMode::Pausable => !paused,
            ProcessMode::WhenPaused => paused,
            ProcessMode::Always => true,
            ProcessMode::Disabled => false,
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn gating() {
        assert!(ProcessMode::Pausable.can_process(false));
        assert!(!ProcessMode::Pausable.can_process(true));
        assert!(!ProcessMode::WhenPaused.can_process(false));
        assert!(ProcessMode::WhenPaused.can_process(true));
        assert!(ProcessMode::Always.can_process(true));
        assert!(!ProcessMode::Disabled.can_process(false));
    }

    #[test]
    fn resolve() {
        assert_eq!(
            ProcessMode::Inherit.resolve(ProcessMode::Always),
            ProcessMode::Always
        );
        assert_eq!(
            ProcessMode::Disabled.resolve(ProcessMode::Always),
            ProcessMode::Disabled
        );
    }
}
