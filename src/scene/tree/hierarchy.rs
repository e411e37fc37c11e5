use inlinable_string::InlinableString;

use crate::errors::*;
use crate::scene::node::NodeSignal;
use crate::scene::path::NodePath;
use crate::scene::NodeId;

use super::SceneTree;

impl SceneTree {
    /// Attaches `child` as the last child of `parent`.
    ///
    /// If both nodes are inside the tree, this is a pure move: no exit or
    /// enter notifications, only `child_order_changed` on both parents.
    /// Otherwise `child` first leaves its former parent (exiting the tree if it
    /// was inside), and enters and becomes ready when `parent` is inside.
    ///
    /// With `keep_world_transform`, the local transform is rewritten so the
    /// world transform survives the move, which fails without side effects if
    /// the new parent's world scale has a zero component.
    pub fn add_child(
        &mut self,
        parent: NodeId,
        child: NodeId,
        keep_world_transform: bool,
    ) -> Result<()> {
        self.ensure(parent)?;
        let former = self.ensure(child)?.parent;

        if child == parent {
            return Err(Error::CanNotAttachSelfAsParent);
        }

        if child == self.root {
            return Err(Error::RootMisuse("reparented"));
        }

        if self.is_ancestor(parent, child) {
            return Err(Error::CycleDetected { parent, child });
        }

        if former == Some(parent) {
            return Ok(());
        }

        let relocated = if keep_world_transform {
            let world = self.world_transform(child).ok_or_else(|| Error::NodeNotFound(child))?;
            let parent_world = self
                .world_transform(parent)
                .ok_or_else(|| Error::NodeNotFound(parent))?;
            Some(parent_world.relative(&world)?)
        } else {
            None
        };

        let child_inside = self.is_inside_tree(child);
        let parent_inside = self.is_inside_tree(parent);

        if let Some(former) = former {
            if child_inside && parent_inside {
                self.unlink(former, child);
                self.link(parent, child);
                if let Some(local) = relocated {
                    self.set_local_transform(child, local);
                }

                self.emit_node(former, NodeSignal::ChildOrderChanged, child);
                self.emit_node(parent, NodeSignal::ChildOrderChanged, child);
                debug!("Moved {} from {} to {}.", child, former, parent);
                return Ok(());
            }

            self.remove_child(former, child)?;

            self.ensure(parent)?;
            if self.ensure(child)?.parent.is_some() {
                warn!("{} was reparented by its own exit hooks.", child);
                return Ok(());
            }
        }

        self.link(parent, child);
        if let Some(local) = relocated {
            self.set_local_transform(child, local);
        }

        self.emit_node(parent, NodeSignal::ChildOrderChanged, child);
        debug!("Attached {} to {}.", child, parent);

        if parent_inside {
            self.propagate_enter(child);
            self.propagate_ready(child);
        }

        Ok(())
    }

    /// Detaches `child` from `parent`. If it was inside the tree, the parent
    /// first raises `child_exiting_tree`, the subtree exits bottom-up and is
    /// finalized top-down, and only then the link is cut. Does nothing if
    /// `child` is not a child of `parent`.
    pub fn remove_child(&mut self, parent: NodeId, child: NodeId) -> Result<()> {
        self.ensure(parent)?;
        if self.ensure(child)?.parent != Some(parent) {
            return Ok(());
        }

        if self.is_inside_tree(child) {
            self.emit_node(parent, NodeSignal::ChildExitingTree, child);
            self.propagate_exit(child);
            self.finalize_exit(child);
        }

        if self.nodes.get(child).and_then(|n| n.parent) == Some(parent) {
            self.unlink(parent, child);
            self.emit_node(parent, NodeSignal::ChildOrderChanged, child);
            debug!("Detached {} from {}.", child, parent);
        }

        Ok(())
    }

    /// Moves `child` to `index` among its siblings, clamped to the last
    /// position.
    pub fn move_child(&mut self, parent: NodeId, child: NodeId, index: usize) -> Result<()> {
        let node = self
            .nodes
            .get_mut(parent)
            .ok_or_else(|| Error::NodeNotFound(parent))?;

        let from = node
            .children
            .iter()
            .position(|&v| v == child)
            .ok_or_else(|| Error::NotAChild { parent, child })?;

        let to = index.min(node.children.len() - 1);
        if from == to {
            return Ok(());
        }

        let child = node.children.remove(from);
        node.children.insert(to, child);
        self.emit_node(parent, NodeSignal::ChildOrderChanged, child);
        Ok(())
    }

    /// Renames `id`. The `renamed` signals fire only while it is inside the
    /// tree.
    pub fn set_name<T: AsRef<str>>(&mut self, id: NodeId, name: T) -> Result<()> {
        let name = name.as_ref();
        let node = self.nodes.get_mut(id).ok_or_else(|| Error::NodeNotFound(id))?;
        if node.name() == name {
            return Ok(());
        }

        node.name = InlinableString::from(name);
        if node.inside_tree {
            self.emit_node(id, NodeSignal::Renamed, id);
            self.signals.node_renamed.emit(&id);
        }

        Ok(())
    }

    fn link(&mut self, parent: NodeId, child: NodeId) {
        if let Some(node) = self.nodes.get_mut(parent) {
            node.children.push(child);
        }

        if let Some(node) = self.nodes.get_mut(child) {
            node.set_parent_link(Some(parent));
        }

        self.propagate_transform_changed(child);
    }

    fn unlink(&mut self, parent: NodeId, child: NodeId) {
        if let Some(node) = self.nodes.get_mut(parent) {
            if let Some(index) = node.children.iter().position(|&v| v == child) {
                node.children.remove(index);
            }
        }

        if let Some(node) = self.nodes.get_mut(child) {
            node.set_parent_link(None);
        }

        self.propagate_transform_changed(child);
    }
}

impl SceneTree {
    /// Resolves `path` relative to `from`. See `NodePath` for the syntax.
    pub fn find_node(&self, from: NodeId, path: &str) -> Option<NodeId> {
        let start = if path.starts_with('/') { self.root } else { from };
        self.walk(from, start, path.split('/'))
    }

    pub fn find_node_path(&self, from: NodeId, path: &NodePath) -> Option<NodeId> {
        let start = if path.is_absolute() { self.root } else { from };
        self.walk(from, start, path.segments())
    }

    #[inline]
    pub fn has_node(&self, from: NodeId, path: &str) -> bool {
        self.find_node(from, path).is_some()
    }

    /// Like `find_node`, but a missing node is an error.
    pub fn get_node(&self, from: NodeId, path: &str) -> Result<NodeId> {
        self.ensure(from)?;
        self.find_node(from, path)
            .ok_or_else(|| Error::PathNotFound(path.to_owned()))
    }

    fn walk<'a, I>(&self, from: NodeId, start: NodeId, segments: I) -> Option<NodeId>
    where
        I: Iterator<Item = &'a str>,
    {
        self.nodes.get(from)?;

        let mut cursor = start;
        for segment in segments {
            cursor = match segment {
                "" | "." => cursor,
                ".." => self.nodes.get(cursor)?.parent?,
                name => self.child_by_name(cursor, name)?,
            };
        }

        Some(cursor)
    }

    /// Returns the first child of `id` called `name`.
    pub fn child_by_name(&self, id: NodeId, name: &str) -> Option<NodeId> {
        self.nodes
            .get(id)?
            .children
            .iter()
            .cloned()
            .find(|&child| self.nodes.get(child).map_or(false, |n| n.name() == name))
    }

    /// The absolute path of a node inside the tree, `/` for the root.
    pub fn path_of(&self, id: NodeId) -> Option<String> {
        if !self.is_inside_tree(id) {
            return None;
        }

        let mut names: Vec<&str> = Vec::new();
        let mut cursor = id;
        while cursor != self.root {
            let node = self.nodes.get(cursor)?;
            names.push(node.name());
            cursor = node.parent?;
        }

        let mut path = String::new();
        for name in names.iter().rev() {
            path.push('/');
            path.push_str(name);
        }

        if path.is_empty() {
            path.push('/');
        }

        Some(path)
    }
}

impl SceneTree {
    #[inline]
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.nodes.get(id).and_then(|n| n.parent)
    }

    #[inline]
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        match self.nodes.get(id) {
            Some(node) => &node.children,
            None => &[],
        }
    }

    #[inline]
    pub fn child_count(&self, id: NodeId) -> usize {
        self.children(id).len()
    }

    /// The position of `id` among its siblings.
    pub fn index_in_parent(&self, id: NodeId) -> Option<usize> {
        let parent = self.parent(id)?;
        self.children(parent).iter().position(|&v| v == id)
    }

    /// Returns true if this is the root of a hierarchy, aka. has no parent.
    /// Detached nodes without a parent are roots of their own hierarchy.
    #[inline]
    pub fn is_root(&self, id: NodeId) -> bool {
        self.nodes.get(id).map_or(false, |n| n.parent.is_none())
    }

    /// Returns true if this is the leaf of a hierarchy, aka. has no child.
    #[inline]
    pub fn is_leaf(&self, id: NodeId) -> bool {
        self.nodes.get(id).map_or(false, |n| n.children.is_empty())
    }

    /// Returns true if `rhs` is one of the ancestors of `lhs`.
    pub fn is_ancestor(&self, lhs: NodeId, rhs: NodeId) -> bool {
        self.ancestors(lhs).any(|v| v == rhs)
    }

    /// Returns an iterator over the ancestors of `id`, parent first.
    #[inline]
    pub fn ancestors(&self, id: NodeId) -> Ancestors {
        Ancestors {
            tree: self,
            cursor: self.parent(id),
        }
    }

    /// Returns an iterator over the descendants of `id` in tree order.
    pub fn descendants(&self, id: NodeId) -> Descendants {
        let mut stack: Vec<NodeId> = self.children(id).to_vec();
        stack.reverse();
        Descendants { tree: self, stack }
    }
}

/// An iterator over the ancestors of a node.
pub struct Ancestors<'a> {
    tree: &'a SceneTree,
    cursor: Option<NodeId>,
}

impl<'a> Iterator for Ancestors<'a> {
    type Item = NodeId;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.cursor?;
        self.cursor = self.tree.parent(current);
        Some(current)
    }
}

/// An iterator over the descendants of a node, in tree order.
pub struct Descendants<'a> {
    tree: &'a SceneTree,
    stack: Vec<NodeId>,
}

impl<'a> Iterator for Descendants<'a> {
    type Item = NodeId;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.stack.pop()?;
        // Deep first search, pushing children in reverse so the first child
        // pops next.
        self.stack
            .extend(self.tree.children(current).iter().rev().cloned());
        Some(current)
    }
}
