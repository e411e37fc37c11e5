use std::sync::atomic::{AtomicU32, Ordering};

use crate::scene::node::Node;
use crate::scene::NodeId;
use crate::utils::{Handle, ObjectPool};

// Zero is left to `NodeId::default()`, which names no tree.
static NEXT_SERIAL: AtomicU32 = AtomicU32::new(1);

/// The node arena of one tree. Ids are stamped with the tree's serial, and
/// ids carrying any other serial miss just like stale ones.
pub(crate) struct NodePool {
    serial: u32,
    nodes: ObjectPool<Handle, Node>,
}

impl NodePool {
    pub fn new() -> Self {
        NodePool {
            serial: NEXT_SERIAL.fetch_add(1, Ordering::Relaxed),
            nodes: ObjectPool::new(),
        }
    }

    #[inline]
    pub fn serial(&self) -> u32 {
        self.serial
    }

    #[inline]
    fn handle(&self, id: NodeId) -> Option<Handle> {
        if id.tree() == self.serial {
            Some(id.handle())
        } else {
            None
        }
    }

    pub fn create(&mut self, node: Node) -> NodeId {
        NodeId::new(self.serial, self.nodes.create(node))
    }

    #[inline]
    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(self.handle(id)?)
    }

    #[inline]
    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        let handle = self.handle(id)?;
        self.nodes.get_mut(handle)
    }

    #[inline]
    pub fn contains(&self, id: NodeId) -> bool {
        self.handle(id).map_or(false, |v| self.nodes.contains(v))
    }

    pub fn free(&mut self, id: NodeId) -> Option<Node> {
        let handle = self.handle(id)?;
        self.nodes.free(handle)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = NodeId> + '_ {
        let serial = self.serial;
        self.nodes.iter().map(move |v| NodeId::new(serial, v))
    }
}
