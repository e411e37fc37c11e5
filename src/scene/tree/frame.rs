use std::mem;

use crate::errors::*;
use crate::input::InputEvent;
use crate::scene::component::Component;
use crate::scene::process_mode::ProcessMode;
use crate::scene::NodeId;

use super::SceneTree;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum InputPhase {
    Input,
    Shortcut,
    UnhandledKey,
    Unhandled,
}

impl InputPhase {
    fn invoke(
        self,
        component: &mut dyn Component,
        tree: &mut SceneTree,
        owner: NodeId,
        event: &InputEvent,
    ) -> bool {
        match self {
            InputPhase::Input => component.input(tree, owner, event),
            InputPhase::Shortcut => component.shortcut_input(tree, owner, event),
            InputPhase::UnhandledKey => component.unhandled_key_input(tree, owner, event),
            InputPhase::Unhandled => component.unhandled_input(tree, owner, event),
        }
    }
}

impl SceneTree {
    #[inline]
    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn set_paused(&mut self, paused: bool) {
        if self.paused != paused {
            self.paused = paused;
            debug!("Scene tree {}.", if paused { "paused" } else { "resumed" });
        }
    }

    pub fn set_process_mode(&mut self, id: NodeId, mode: ProcessMode) -> Result<()> {
        self.nodes
            .get_mut(id)
            .ok_or_else(|| Error::NodeNotFound(id))?
            .process_mode = mode;
        Ok(())
    }

    /// Enables or disables the per-frame `process` hooks of `id`.
    pub fn set_process(&mut self, id: NodeId, enabled: bool) -> Result<()> {
        self.nodes
            .get_mut(id)
            .ok_or_else(|| Error::NodeNotFound(id))?
            .process = enabled;
        Ok(())
    }

    /// Enables or disables the fixed-step `physics_process` hooks of `id`.
    pub fn set_physics_process(&mut self, id: NodeId, enabled: bool) -> Result<()> {
        self.nodes
            .get_mut(id)
            .ok_or_else(|| Error::NodeNotFound(id))?
            .physics_process = enabled;
        Ok(())
    }

    /// Resolves `Inherit` through the ancestors of `id`. A chain of `Inherit`
    /// up to the topmost ancestor resolves to `Pausable`.
    pub fn effective_process_mode(&self, id: NodeId) -> Option<ProcessMode> {
        let mut node = self.nodes.get(id)?;
        while node.process_mode == ProcessMode::Inherit {
            node = match node.parent {
                Some(parent) => self.nodes.get(parent)?,
                None => return Some(ProcessMode::Pausable),
            };
        }

        Some(node.process_mode)
    }

    /// Returns true if `id` is inside the tree and its effective process mode
    /// lets it run under the current pause state.
    pub fn can_process(&self, id: NodeId) -> bool {
        self.is_inside_tree(id)
            && self
                .effective_process_mode(id)
                .map_or(false, |mode| mode.can_process(self.paused))
    }
}

impl SceneTree {
    /// Runs the `process` hooks of every eligible node in pre-order.
    pub fn process(&mut self, delta: f32) {
        self.propagate_frame(false, delta);
    }

    /// Runs the `physics_process` hooks of every eligible node in pre-order.
    pub fn physics_process(&mut self, delta: f32) {
        self.propagate_frame(true, delta);
    }

    /// The set of visited nodes is fixed before the first hook runs: nodes
    /// added meanwhile wait for the next frame, and nodes freed or detached
    /// meanwhile are skipped.
    fn propagate_frame(&mut self, physics: bool, delta: f32) {
        let mut order = mem::replace(&mut self.traversal, Vec::new());
        order.clear();
        self.collect_frame_order(self.root, ProcessMode::Pausable, physics, &mut order);

        for &id in &order {
            let enabled = match self.nodes.get(id) {
                Some(node) if node.inside_tree => {
                    if physics {
                        node.physics_process
                    } else {
                        node.process
                    }
                }
                _ => false,
            };

            if !enabled {
                continue;
            }

            if physics {
                self.dispatch(id, |component, tree, owner| {
                    component.physics_process(tree, owner, delta);
                    false
                });
            } else {
                self.dispatch(id, |component, tree, owner| {
                    component.process(tree, owner, delta);
                    false
                });
            }
        }

        self.traversal = order;
    }

    fn collect_frame_order(
        &self,
        id: NodeId,
        inherited: ProcessMode,
        physics: bool,
        out: &mut Vec<NodeId>,
    ) {
        let node = match self.nodes.get(id) {
            Some(node) => node,
            None => return,
        };

        let mode = node.process_mode.resolve(inherited);
        let enabled = if physics {
            node.physics_process
        } else {
            node.process
        };

        if enabled && mode.can_process(self.paused) {
            out.push(id);
        }

        for &child in &node.children {
            self.collect_frame_order(child, mode, physics, out);
        }
    }
}

impl SceneTree {
    /// Marks the event being dispatched as handled, stopping its propagation
    /// once the current handler returns.
    #[inline]
    pub fn set_input_as_handled(&mut self) {
        self.input_handled = true;
    }

    #[inline]
    pub fn is_input_handled(&self) -> bool {
        self.input_handled
    }

    /// Dispatches each event in order.
    pub fn dispatch_input_events(&mut self, events: &[InputEvent]) {
        for event in events {
            self.dispatch_input_event(event);
        }
    }

    /// Routes `event` through the input, focus, shortcut, unhandled-key and
    /// unhandled phases, stopping at the first handler that consumes it.
    /// Returns true if it was consumed.
    pub fn dispatch_input_event(&mut self, event: &InputEvent) -> bool {
        self.input_handled = false;

        let mut order = mem::replace(&mut self.traversal, Vec::new());
        order.clear();
        self.collect_input_order(self.root, ProcessMode::Pausable, &mut order);

        let handled = self.input_phase(&order, InputPhase::Input, event)
            || self.focus_phase(event)
            || (event.is_shortcut_eligible()
                && self.input_phase(&order, InputPhase::Shortcut, event))
            || (event.is_key() && self.input_phase(&order, InputPhase::UnhandledKey, event))
            || self.input_phase(&order, InputPhase::Unhandled, event);

        self.traversal = order;
        handled
    }

    /// Collects the processable nodes children-first, with the last child
    /// first.
    fn collect_input_order(&self, id: NodeId, inherited: ProcessMode, out: &mut Vec<NodeId>) {
        let node = match self.nodes.get(id) {
            Some(node) => node,
            None => return,
        };

        let mode = node.process_mode.resolve(inherited);
        for &child in node.children.iter().rev() {
            self.collect_input_order(child, mode, out);
        }

        if mode.can_process(self.paused) {
            out.push(id);
        }
    }

    fn input_phase(&mut self, order: &[NodeId], phase: InputPhase, event: &InputEvent) -> bool {
        for &id in order {
            if !self.is_inside_tree(id) {
                continue;
            }

            let handled = self.dispatch(id, |component, tree, owner| {
                phase.invoke(component, tree, owner, event) || tree.input_handled
            });

            if handled || self.input_handled {
                self.input_handled = true;
                return true;
            }
        }

        false
    }

    fn focus_phase(&mut self, event: &InputEvent) -> bool {
        let focused = match self.focused() {
            Some(id) if self.can_process(id) => id,
            _ => return false,
        };

        let handled = self.dispatch(focused, |component, tree, owner| {
            component.gui_input(tree, owner, event) || tree.input_handled
        });

        if handled || self.input_handled {
            self.input_handled = true;
            return true;
        }

        false
    }
}
