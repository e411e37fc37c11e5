use crate::errors::*;
use crate::scene::node::NodeSignal;
use crate::scene::NodeId;

use super::SceneTree;

impl SceneTree {
    /// Marks `id` for destruction at the next `flush_free_queue`. The node
    /// stays fully alive, inside the tree and processed until then.
    ///
    /// Queueing a node twice does nothing. A detached node is destroyed right
    /// away. Fails if `id` is the root, or if the queue is already holding
    /// `free_queue_capacity` nodes.
    pub fn queue_free(&mut self, id: NodeId) -> Result<()> {
        if id == self.root {
            return Err(Error::RootMisuse("freed"));
        }

        let (queued, inside) = {
            let node = self.ensure(id)?;
            (node.queued_for_deletion, node.inside_tree)
        };

        if queued {
            return Ok(());
        }

        if !inside {
            return self.free_immediate(id);
        }

        if self.free_queue_len() >= self.free_queue_capacity {
            error!(
                "The deferred free queue is full ({} nodes), {} can not be queued.",
                self.free_queue_capacity, id
            );
            return Err(Error::FreeQueueOverflow(self.free_queue_capacity));
        }

        if let Some(node) = self.nodes.get_mut(id) {
            node.queued_for_deletion = true;
        }

        self.free_queue.push(id);
        Ok(())
    }

    /// The number of nodes waiting in the deferred free queue. Entries a
    /// running flush already went through do not count.
    #[inline]
    pub fn free_queue_len(&self) -> usize {
        self.free_queue.len() - self.free_queue_cursor
    }

    #[inline]
    pub fn free_queue_capacity(&self) -> usize {
        self.free_queue_capacity
    }

    /// Destroys every queued node in queue order and returns how many were
    /// destroyed. Nodes queued by exit hooks during the flush are destroyed
    /// by the same flush.
    pub fn flush_free_queue(&mut self) -> usize {
        let mut freed = 0;

        while self.free_queue_cursor < self.free_queue.len() {
            let id = self.free_queue[self.free_queue_cursor];
            self.free_queue_cursor += 1;

            // Descendants of an already destroyed node are stale by now.
            if self.nodes.contains(id) && self.free_immediate(id).is_ok() {
                freed += 1;
            }
        }

        self.free_queue.clear();
        self.free_queue_cursor = 0;
        if freed > 0 {
            trace!("Flushed {} nodes from the deferred free queue.", freed);
        }

        freed
    }

    /// Unlinks `id` from its parent, running the exit notifications if it was
    /// inside the tree, then tears down its subtree bottom-up.
    pub(crate) fn free_immediate(&mut self, id: NodeId) -> Result<()> {
        if id == self.root {
            return Err(Error::RootMisuse("freed"));
        }

        let parent = self.ensure(id)?.parent;
        if let Some(parent) = parent {
            self.remove_child(parent, id)?;
        }

        self.destroy(id);
        Ok(())
    }

    fn destroy(&mut self, id: NodeId) {
        let children = match self.nodes.get_mut(id) {
            Some(node) => ::std::mem::replace(&mut node.children, Vec::new()),
            None => return,
        };

        for child in children {
            self.destroy(child);
        }

        if let Some(mut node) = self.nodes.free(id) {
            for slot in node.components.iter_mut() {
                if let Some(mut component) = slot.component.take() {
                    if slot.attached {
                        component.on_detach();
                    }
                }
            }

            debug!("Destroyed node {} '{}'.", id, node.name());
        }
    }

    pub(crate) fn emit_node(&self, id: NodeId, which: NodeSignal, arg: NodeId) {
        if let Some(node) = self.nodes.get(id) {
            node.signals.select(which).emit(&arg);
        }
    }

    #[inline]
    pub(crate) fn child_at(&self, id: NodeId, index: usize) -> Option<NodeId> {
        self.nodes.get(id)?.children.get(index).cloned()
    }

    /// Enters `id` and its subtree, top-down. Nodes already inside the tree
    /// are skipped, which covers children that hooks added meanwhile.
    pub(crate) fn propagate_enter(&mut self, id: NodeId) {
        let parent = match self.nodes.get_mut(id) {
            Some(node) if !node.inside_tree => {
                node.inside_tree = true;
                node.ready_pending = true;
                node.parent
            }
            _ => return,
        };

        self.register_node(id);
        self.dispatch(id, |component, tree, owner| {
            component.enter_tree(tree, owner);
            false
        });

        self.emit_node(id, NodeSignal::TreeEntered, id);
        self.signals.node_added.emit(&id);
        if let Some(parent) = parent {
            self.emit_node(parent, NodeSignal::ChildEnteredTree, id);
        }

        let mut index = 0;
        while let Some(child) = self.child_at(id, index) {
            self.propagate_enter(child);
            index += 1;
        }
    }

    /// Readies `id` and its subtree, children before their parent. Children
    /// appended while their siblings get ready are picked up by the rescan.
    pub(crate) fn propagate_ready(&mut self, id: NodeId) {
        let mut index = 0;
        while let Some(child) = self.child_at(id, index) {
            self.propagate_ready(child);
            index += 1;
        }

        let pending = match self.nodes.get_mut(id) {
            Some(node) if node.inside_tree && node.ready_pending => {
                node.ready_pending = false;
                true
            }
            _ => false,
        };

        if pending {
            self.dispatch(id, |component, tree, owner| {
                component.ready(tree, owner);
                false
            });

            self.emit_node(id, NodeSignal::Ready, id);
        }
    }

    /// Runs the exit hooks of `id` and its subtree, bottom-up with the last
    /// child first.
    pub(crate) fn propagate_exit(&mut self, id: NodeId) {
        let mut index = self.child_count(id);
        while index > 0 {
            index -= 1;
            if let Some(child) = self.child_at(id, index) {
                self.propagate_exit(child);
            }

            index = index.min(self.child_count(id));
        }

        if !self.is_inside_tree(id) {
            return;
        }

        self.dispatch(id, |component, tree, owner| {
            component.exit_tree(tree, owner);
            false
        });

        self.emit_node(id, NodeSignal::TreeExiting, id);
    }

    /// Clears the tree back-references of `id` and its subtree, top-down.
    pub(crate) fn finalize_exit(&mut self, id: NodeId) {
        match self.nodes.get_mut(id) {
            Some(node) if node.inside_tree => {
                node.inside_tree = false;
                node.ready_pending = false;
            }
            _ => return,
        }

        self.unregister_node(id);
        self.emit_node(id, NodeSignal::TreeExited, id);
        self.signals.node_removed.emit(&id);

        let mut index = 0;
        while let Some(child) = self.child_at(id, index) {
            self.finalize_exit(child);
            index += 1;
        }
    }
}
