use std::fmt;

use crate::utils::{Handle, HandleIndex};

/// Identifies a node of one particular `SceneTree`.
///
/// The handle addresses the node inside the tree's arena, and the serial names
/// the tree itself. Every tree draws a distinct serial, so an id never resolves
/// in a tree other than the one that created it.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId {
    tree: u32,
    handle: Handle,
}

impl NodeId {
    #[inline]
    pub(crate) fn new(tree: u32, handle: Handle) -> Self {
        NodeId { tree, handle }
    }

    /// The serial of the tree that created this id.
    #[inline]
    pub fn tree(self) -> u32 {
        self.tree
    }

    #[inline]
    pub fn index(self) -> HandleIndex {
        self.handle.index()
    }

    #[inline]
    pub fn version(self) -> HandleIndex {
        self.handle.version()
    }

    #[inline]
    pub(crate) fn handle(self) -> Handle {
        self.handle
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "NodeId({}:{})", self.tree, self.handle)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn display() {
        let id = NodeId::new(3, Handle::new(4, 1));
        assert_eq!(format!("{}", id), "NodeId(3:4v1)");
        assert_eq!(id.tree(), 3);
        assert_eq!(id.index(), 4);
        assert_eq!(id.version(), 1);
    }

    #[test]
    fn serials_tell_trees_apart() {
        let handle = Handle::new(0, 1);
        assert_ne!(NodeId::new(1, handle), NodeId::new(2, handle));
        assert_eq!(NodeId::new(1, handle), NodeId::new(1, handle));
    }
}
