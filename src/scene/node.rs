use inlinable_string::InlinableString;
use smallvec::SmallVec;

use crate::math::Vector2;

use super::component::{Component, ComponentSlot};
use super::process_mode::ProcessMode;
use super::signal::Signal;
use super::transform::{Transform, Trs};
use super::NodeId;

/// Notifications a node raises about its own lifecycle and children. The
/// payload is always a node id: the node itself for its lifecycle signals,
/// the affected child for child signals.
#[derive(Debug, Clone, Default)]
pub struct NodeSignals {
    pub tree_entered: Signal<NodeId>,
    pub ready: Signal<NodeId>,
    pub tree_exiting: Signal<NodeId>,
    pub tree_exited: Signal<NodeId>,
    pub renamed: Signal<NodeId>,
    pub child_entered_tree: Signal<NodeId>,
    pub child_exiting_tree: Signal<NodeId>,
    pub child_order_changed: Signal<NodeId>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum NodeSignal {
    TreeEntered,
    Ready,
    TreeExiting,
    TreeExited,
    Renamed,
    ChildEnteredTree,
    ChildExitingTree,
    ChildOrderChanged,
}

impl NodeSignals {
    pub(crate) fn select(&self, which: NodeSignal) -> &Signal<NodeId> {
        match which {
            NodeSignal::TreeEntered => &self.tree_entered,
            NodeSignal::Ready => &self.ready,
            NodeSignal::TreeExiting => &self.tree_exiting,
            NodeSignal::TreeExited => &self.tree_exited,
            NodeSignal::Renamed => &self.renamed,
            NodeSignal::ChildEnteredTree => &self.child_entered_tree,
            NodeSignal::ChildExitingTree => &self.child_exiting_tree,
            NodeSignal::ChildOrderChanged => &self.child_order_changed,
        }
    }
}

/// A node's membership record of one group. `index` is the node's position
/// in the tree's group index, and is only set while inside the tree.
#[derive(Debug, Clone)]
pub(crate) struct GroupMembership {
    pub(crate) name: InlinableString,
    pub(crate) index: Option<usize>,
    pub(crate) persistent: bool,
}

/// The unit of the scene hierarchy.
///
/// A `Node` is built detached with `Node::new` and the builder helpers, then
/// handed to `SceneTree::create`. From then on the tree owns it; structural
/// and spatial mutations go through `SceneTree`, and `SceneTree::node` gives
/// read access.
pub struct Node {
    pub(crate) name: InlinableString,
    pub(crate) parent: Option<NodeId>,
    pub(crate) children: Vec<NodeId>,
    pub(crate) transform: Transform,
    pub(crate) components: Vec<ComponentSlot>,
    pub(crate) groups: SmallVec<[GroupMembership; 2]>,
    pub(crate) process_mode: ProcessMode,
    pub(crate) process: bool,
    pub(crate) physics_process: bool,
    pub(crate) inside_tree: bool,
    pub(crate) ready_pending: bool,
    pub(crate) queued_for_deletion: bool,
    pub(crate) camera_index: Option<usize>,
    pub(crate) signals: NodeSignals,
}

impl Node {
    pub fn new<T: AsRef<str>>(name: T) -> Self {
        Node {
            name: name.as_ref().into(),
            parent: None,
            children: Vec::new(),
            transform: Transform::default(),
            components: Vec::new(),
            groups: SmallVec::new(),
            process_mode: ProcessMode::Inherit,
            process: true,
            physics_process: true,
            inside_tree: false,
            ready_pending: false,
            queued_for_deletion: false,
            camera_index: None,
            signals: NodeSignals::default(),
        }
    }

    pub fn with_process_mode(mut self, mode: ProcessMode) -> Self {
        self.process_mode = mode;
        self
    }

    pub fn with_position(mut self, position: Vector2<f32>) -> Self {
        self.transform.set_local_position(position);
        self
    }

    pub fn with_rotation(mut self, rotation: f32) -> Self {
        self.transform.set_local_rotation(rotation);
        self
    }

    pub fn with_scale(mut self, scale: Vector2<f32>) -> Self {
        self.transform.set_local_scale(scale);
        self
    }

    /// Adds a component that is attached once the node is handed to
    /// `SceneTree::create`.
    pub fn with_component<C: Component>(mut self, component: C) -> Self {
        self.components.push(ComponentSlot::new(component));
        self
    }

    /// Adds a group membership that becomes registered once the node enters
    /// the tree.
    pub fn with_group<T: AsRef<str>>(mut self, group: T, persistent: bool) -> Self {
        let group = group.as_ref();
        if !self.is_in_group(group) {
            self.groups.push(GroupMembership {
                name: group.into(),
                index: None,
                persistent,
            });
        }

        self
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    #[inline]
    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    #[inline]
    pub fn transform(&self) -> &Transform {
        &self.transform
    }

    #[inline]
    pub fn local_transform(&self) -> Trs {
        self.transform.local()
    }

    #[inline]
    pub fn signals(&self) -> &NodeSignals {
        &self.signals
    }

    #[inline]
    pub fn process_mode(&self) -> ProcessMode {
        self.process_mode
    }

    #[inline]
    pub fn is_processing(&self) -> bool {
        self.process
    }

    #[inline]
    pub fn is_physics_processing(&self) -> bool {
        self.physics_process
    }

    #[inline]
    pub fn is_inside_tree(&self) -> bool {
        self.inside_tree
    }

    #[inline]
    pub fn is_queued_for_deletion(&self) -> bool {
        self.queued_for_deletion
    }

    /// The number of attached components, removed ones excluded.
    pub fn component_count(&self) -> usize {
        self.components
            .iter()
            .filter(|slot| slot.attached)
            .count()
    }

    pub fn is_in_group(&self, group: &str) -> bool {
        self.groups.iter().any(|m| &*m.name == group)
    }

    pub fn groups(&self) -> impl Iterator<Item = &str> {
        self.groups.iter().map(|m| &*m.name)
    }

    pub(crate) fn group_position(&self, group: &str) -> Option<usize> {
        self.groups.iter().position(|m| &*m.name == group)
    }

    pub(crate) fn set_group_index(&mut self, group: &str, index: usize) {
        if let Some(position) = self.group_position(group) {
            self.groups[position].index = Some(index);
        }
    }

    /// Links the node and its transform to `parent` in one step.
    pub(crate) fn set_parent_link(&mut self, parent: Option<NodeId>) {
        self.parent = parent;
        self.transform.set_parent(parent);
    }
}

impl ::std::fmt::Debug for Node {
    fn fmt(&self, f: &mut ::std::fmt::Formatter) -> ::std::fmt::Result {
        f.debug_struct("Node")
            .field("name", &self.name())
            .field("parent", &self.parent)
            .field("children", &self.children)
            .field("inside_tree", &self.inside_tree)
            .field("process_mode", &self.process_mode)
            .finish()
    }
}
