use inlinable_string::InlinableString;

use crate::errors::*;
use crate::scene::component::ComponentKind;
use crate::scene::node::GroupMembership;
use crate::scene::NodeId;

use super::SceneTree;

/// A renderable component of a node inside the tree, addressed by the
/// node and the component's slot index.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderItem {
    pub node: NodeId,
    pub slot: usize,
}

impl SceneTree {
    /// Adds `id` to `group`. Persistent memberships are meant to be saved
    /// along with the node. Adding a node to a group twice does nothing.
    pub fn add_to_group<T: AsRef<str>>(&mut self, id: NodeId, group: T, persistent: bool) -> Result<()> {
        let group = group.as_ref();
        let node = self.nodes.get_mut(id).ok_or_else(|| Error::NodeNotFound(id))?;
        if node.is_in_group(group) {
            return Ok(());
        }

        let index = if node.inside_tree {
            Some(self.groups.add(group, id))
        } else {
            None
        };

        node.groups.push(GroupMembership {
            name: InlinableString::from(group),
            index,
            persistent,
        });

        Ok(())
    }

    pub fn remove_from_group<T: AsRef<str>>(&mut self, id: NodeId, group: T) -> Result<()> {
        let group = group.as_ref();
        let node = self.nodes.get_mut(id).ok_or_else(|| Error::NodeNotFound(id))?;
        let position = match node.group_position(group) {
            Some(position) => position,
            None => return Ok(()),
        };

        let membership = node.groups.remove(position);
        if let Some(index) = membership.index {
            self.unregister_group(group, index);
        }

        Ok(())
    }

    #[inline]
    pub fn is_in_group(&self, id: NodeId, group: &str) -> bool {
        self.nodes.get(id).map_or(false, |n| n.is_in_group(group))
    }

    pub fn is_group_persistent(&self, id: NodeId, group: &str) -> bool {
        self.nodes
            .get(id)
            .and_then(|n| n.groups.iter().find(|m| &*m.name == group))
            .map_or(false, |m| m.persistent)
    }

    /// The members of `group` inside the tree, in no particular order.
    #[inline]
    pub fn nodes_in_group(&self, group: &str) -> &[NodeId] {
        self.groups.members(group)
    }

    #[inline]
    pub fn first_node_in_group(&self, group: &str) -> Option<NodeId> {
        self.groups.members(group).first().cloned()
    }

    #[inline]
    pub fn group_count(&self, group: &str) -> usize {
        self.groups.len(group)
    }

    /// The index of `id` inside the member list of `group`, as cached by the
    /// node itself.
    pub fn group_index_of(&self, id: NodeId, group: &str) -> Option<usize> {
        self.nodes
            .get(id)?
            .groups
            .iter()
            .find(|m| &*m.name == group)?
            .index
    }

    fn unregister_group(&mut self, group: &str, index: usize) {
        if let Some(moved) = self.groups.remove(group, index) {
            if let Some(node) = self.nodes.get_mut(moved) {
                node.set_group_index(group, index);
            }
        }
    }
}

impl SceneTree {
    /// The renderable components inside the tree, in no particular order.
    #[inline]
    pub fn render_items(&self) -> &[RenderItem] {
        &self.renderables
    }

    /// Hands every renderable component the current world matrix and version
    /// of its owner. Returns the number of components visited.
    pub fn sync_renderables(&mut self) -> usize {
        let mut synced = 0;
        for index in 0..self.renderables.len() {
            let item = self.renderables[index];
            let (matrix, version) = match (self.world_matrix(item.node), self.world_version(item.node)) {
                (Some(matrix), Some(version)) => (matrix, version),
                _ => continue,
            };

            let component = self
                .nodes
                .get_mut(item.node)
                .and_then(|n| n.components.get_mut(item.slot))
                .and_then(|s| s.component.as_mut());

            if let Some(component) = component {
                component.sync_transform(version, &matrix);
                synced += 1;
            }
        }

        synced
    }

    pub(crate) fn register_slot(&mut self, id: NodeId, slot: usize) {
        let kind = match self.nodes.get(id).and_then(|n| n.components.get(slot)) {
            Some(s) if s.attached => s.kind,
            _ => return,
        };

        match kind {
            ComponentKind::Renderable => {
                let index = self.renderables.len();
                self.renderables.push(RenderItem { node: id, slot });
                if let Some(s) = self.nodes.get_mut(id).and_then(|n| n.components.get_mut(slot)) {
                    s.registry_index = Some(index);
                }
            }
            ComponentKind::Camera => self.refresh_camera_registration(id),
            ComponentKind::Behavior => {}
        }
    }

    pub(crate) fn unregister_renderable(&mut self, index: usize) {
        if index >= self.renderables.len() {
            return;
        }

        self.renderables.swap_remove(index);
        if let Some(moved) = self.renderables.get(index).cloned() {
            let slot = self
                .nodes
                .get_mut(moved.node)
                .and_then(|n| n.components.get_mut(moved.slot));

            if let Some(slot) = slot {
                slot.registry_index = Some(index);
            }
        }
    }

    /// Joins every registry `id` belongs to. Called when it enters the tree.
    pub(crate) fn register_node(&mut self, id: NodeId) {
        let node = match self.nodes.get_mut(id) {
            Some(node) => node,
            None => return,
        };

        for membership in node.groups.iter_mut() {
            membership.index = Some(self.groups.add(&membership.name, id));
        }

        let slots = node.components.len();
        for slot in 0..slots {
            self.register_slot(id, slot);
        }
    }

    /// Leaves every registry `id` belongs to and drops the focus if it holds
    /// it. Called when it exits the tree.
    pub(crate) fn unregister_node(&mut self, id: NodeId) {
        let count = self.nodes.get(id).map_or(0, |n| n.groups.len());
        for position in 0..count {
            let registered = self
                .nodes
                .get_mut(id)
                .and_then(|n| n.groups.get_mut(position))
                .and_then(|m| m.index.take().map(|index| (m.name.clone(), index)));

            if let Some((name, index)) = registered {
                self.unregister_group(&name, index);
            }
        }

        let count = self.nodes.get(id).map_or(0, |n| n.components.len());
        for slot in 0..count {
            let registry_index = self
                .nodes
                .get_mut(id)
                .and_then(|n| n.components.get_mut(slot))
                .and_then(|s| s.registry_index.take());

            if let Some(index) = registry_index {
                self.unregister_renderable(index);
            }
        }

        self.unregister_camera(id);

        if self.focused == Some(id) {
            self.focused = None;
            self.signals.focus_changed.emit(&None);
        }
    }
}

impl SceneTree {
    /// The cameras inside the tree, in registration order up to removals.
    #[inline]
    pub fn cameras(&self) -> &[NodeId] {
        &self.cameras
    }

    /// The current camera. The first camera to enter the tree becomes current
    /// and when it leaves, the first remaining one takes over.
    pub fn current_camera(&self) -> Option<NodeId> {
        self.current_camera.filter(|&id| self.is_inside_tree(id))
    }

    pub fn make_camera_current(&mut self, id: NodeId) -> Result<()> {
        if self.ensure(id)?.camera_index.is_none() {
            return Err(Error::NotACamera(id));
        }

        if self.current_camera != Some(id) {
            self.current_camera = Some(id);
            self.signals.camera_changed.emit(&Some(id));
        }

        Ok(())
    }

    /// Registers or unregisters `id` as a camera depending on whether it is
    /// inside the tree with an attached camera component.
    pub(crate) fn refresh_camera_registration(&mut self, id: NodeId) {
        let (has_camera, registered) = match self.nodes.get(id) {
            Some(node) => (
                node.inside_tree
                    && node
                        .components
                        .iter()
                        .any(|s| s.attached && s.kind == ComponentKind::Camera),
                node.camera_index.is_some(),
            ),
            None => return,
        };

        if has_camera && !registered {
            let index = self.cameras.len();
            self.cameras.push(id);
            if let Some(node) = self.nodes.get_mut(id) {
                node.camera_index = Some(index);
            }

            if self.current_camera().is_none() {
                self.current_camera = Some(id);
                self.signals.camera_changed.emit(&Some(id));
            }
        } else if !has_camera && registered {
            self.unregister_camera(id);
        }
    }

    fn unregister_camera(&mut self, id: NodeId) {
        let index = match self.nodes.get_mut(id).and_then(|n| n.camera_index.take()) {
            Some(index) => index,
            None => return,
        };

        if index < self.cameras.len() {
            self.cameras.swap_remove(index);
            if let Some(&moved) = self.cameras.get(index) {
                if let Some(node) = self.nodes.get_mut(moved) {
                    node.camera_index = Some(index);
                }
            }
        }

        if self.current_camera == Some(id) {
            self.current_camera = self.cameras.first().cloned();
            self.signals.camera_changed.emit(&self.current_camera);
        }
    }
}

impl SceneTree {
    /// Gives the keyboard focus to `id`, which must be inside the tree.
    pub fn grab_focus(&mut self, id: NodeId) -> Result<()> {
        if !self.ensure(id)?.inside_tree {
            return Err(Error::NotInsideTree(id));
        }

        if self.focused != Some(id) {
            self.focused = Some(id);
            self.signals.focus_changed.emit(&Some(id));
        }

        Ok(())
    }

    pub fn release_focus(&mut self) {
        if self.focused.take().is_some() {
            self.signals.focus_changed.emit(&None);
        }
    }

    /// The node holding the focus, if it is still inside the tree.
    pub fn focused(&self) -> Option<NodeId> {
        self.focused.filter(|&id| self.is_inside_tree(id))
    }

    #[inline]
    pub fn has_focus(&self, id: NodeId) -> bool {
        self.focused() == Some(id)
    }
}
