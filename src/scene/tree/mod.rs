mod frame;
mod hierarchy;
mod lifecycle;
mod pool;
mod registry;
mod spatial;

pub use self::hierarchy::{Ancestors, Descendants};
pub use self::registry::RenderItem;

use crate::errors::*;
use crate::settings::Settings;

use super::component::{AsAny, Component, ComponentKind, ComponentSlot};
use super::group::GroupIndex;
use super::node::Node;
use super::signal::Signal;
use super::NodeId;

use self::pool::NodePool;

/// Notifications the tree raises about the nodes inside it.
#[derive(Debug, Clone, Default)]
pub struct TreeSignals {
    /// A node entered the tree.
    pub node_added: Signal<NodeId>,
    /// A node finished exiting the tree.
    pub node_removed: Signal<NodeId>,
    /// A node inside the tree was renamed.
    pub node_renamed: Signal<NodeId>,
    pub focus_changed: Signal<Option<NodeId>>,
    pub camera_changed: Signal<Option<NodeId>>,
}

/// The owner of a node hierarchy and the driver of its frame callbacks.
///
/// Besides the nodes, the tree keeps the group index, the renderable and
/// camera registries, the focus and a fixed-capacity deferred free queue.
/// Everything is single-threaded: callbacks run synchronously on the thread
/// calling into the tree.
pub struct SceneTree {
    nodes: NodePool,
    root: NodeId,
    paused: bool,

    groups: GroupIndex,
    renderables: Vec<RenderItem>,
    cameras: Vec<NodeId>,
    current_camera: Option<NodeId>,
    focused: Option<NodeId>,

    free_queue: Vec<NodeId>,
    free_queue_cursor: usize,
    free_queue_capacity: usize,

    input_handled: bool,
    traversal: Vec<NodeId>,

    signals: TreeSignals,
}

impl SceneTree {
    /// Creates a tree around `root`, which immediately enters and becomes
    /// ready.
    pub fn new(root: Node, settings: &Settings) -> Result<Self> {
        settings.validate()?;

        let mut tree = SceneTree {
            nodes: NodePool::new(),
            root: NodeId::default(),
            paused: settings.paused,
            groups: GroupIndex::new(),
            renderables: Vec::new(),
            cameras: Vec::new(),
            current_camera: None,
            focused: None,
            free_queue: Vec::with_capacity(settings.free_queue_capacity),
            free_queue_cursor: 0,
            free_queue_capacity: settings.free_queue_capacity,
            input_handled: false,
            traversal: Vec::new(),
            signals: TreeSignals::default(),
        };

        tree.root = tree.create(root);
        tree.propagate_enter(tree.root);
        tree.propagate_ready(tree.root);

        info!(
            "Scene tree #{} created with root {} (free queue capacity {}).",
            tree.nodes.serial(),
            tree.root,
            tree.free_queue_capacity
        );

        Ok(tree)
    }

    /// Takes ownership of a detached node and returns its id. Components
    /// added with `Node::with_component` are attached now.
    pub fn create(&mut self, mut node: Node) -> NodeId {
        node.parent = None;
        node.inside_tree = false;
        node.children.clear();
        for membership in node.groups.iter_mut() {
            membership.index = None;
        }

        let id = self.nodes.create(node);
        self.attach_pending_components(id);
        id
    }

    fn attach_pending_components(&mut self, id: NodeId) {
        let count = self.nodes.get(id).map_or(0, |n| n.components.len());
        for index in 0..count {
            let taken = self
                .nodes
                .get_mut(id)
                .and_then(|n| n.components.get_mut(index))
                .and_then(|slot| slot.component.take());

            if let Some(mut component) = taken {
                component.on_attach(self, id);
                if let Some(slot) = self.nodes.get_mut(id).and_then(|n| n.components.get_mut(index)) {
                    slot.component = Some(component);
                }
            }
        }
    }

    #[inline]
    pub fn root(&self) -> NodeId {
        self.root
    }

    #[inline]
    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id)
    }

    /// Returns true if `id` names a node of this tree that has not been
    /// freed, inside the tree or not. Ids created by another tree never
    /// match.
    #[inline]
    pub fn contains(&self, id: NodeId) -> bool {
        self.nodes.contains(id)
    }

    #[inline]
    pub fn is_inside_tree(&self, id: NodeId) -> bool {
        self.nodes.get(id).map_or(false, |n| n.inside_tree)
    }

    /// The number of alive nodes, detached ones included.
    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Iterates over every alive node, detached ones included.
    pub fn iter(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.nodes.iter()
    }

    #[inline]
    pub fn signals(&self) -> &TreeSignals {
        &self.signals
    }

    #[inline]
    pub(crate) fn ensure(&self, id: NodeId) -> Result<&Node> {
        self.nodes.get(id).ok_or_else(|| Error::NodeNotFound(id))
    }
}

impl SceneTree {
    /// Attaches `component` to `id` and returns its slot index. If the node is
    /// inside the tree, the component joins its registries right away.
    pub fn add_component<C: Component>(&mut self, id: NodeId, mut component: C) -> Result<usize> {
        self.ensure(id)?;
        component.on_attach(self, id);

        let node = self
            .nodes
            .get_mut(id)
            .ok_or_else(|| Error::NodeNotFound(id))?;

        let slot = node.components.len();
        let inside = node.inside_tree;
        node.components.push(ComponentSlot::new(component));

        if inside {
            self.register_slot(id, slot);
        }

        Ok(slot)
    }

    /// Detaches the first component of type `C` from `id` and hands it back.
    ///
    /// A component running one of its own hooks can not be handed back. It
    /// is detached right away and receives `on_detach` once the hook returns,
    /// and `None` is returned.
    pub fn remove_component<C: Component>(&mut self, id: NodeId) -> Option<C> {
        let (index, registry_index, kind, running) = {
            let node = self.nodes.get_mut(id)?;
            let index = node.components.iter().position(|s| s.attached && s.is::<C>())?;
            let slot = &mut node.components[index];
            slot.attached = false;
            (index, slot.registry_index.take(), slot.kind, slot.component.is_none())
        };

        if let Some(registry_index) = registry_index {
            self.unregister_renderable(registry_index);
        }

        if kind == ComponentKind::Camera {
            self.refresh_camera_registration(id);
        }

        if running {
            debug!(
                "Component {} of {} removed from its own hook, detaching once it returns.",
                index, id
            );
            return None;
        }

        let mut component = self
            .nodes
            .get_mut(id)
            .and_then(|n| n.components.get_mut(index))
            .and_then(|s| s.component.take())?;

        component.on_detach();
        AsAny::into_any(component).downcast::<C>().ok().map(|v| *v)
    }

    pub fn component<C: Component>(&self, id: NodeId) -> Option<&C> {
        self.nodes
            .get(id)?
            .components
            .iter()
            .filter(|s| s.attached)
            .filter_map(|s| s.downcast_ref::<C>())
            .next()
    }

    pub fn component_mut<C: Component>(&mut self, id: NodeId) -> Option<&mut C> {
        self.nodes
            .get_mut(id)?
            .components
            .iter_mut()
            .filter(|s| s.attached)
            .filter_map(|s| s.downcast_mut::<C>())
            .next()
    }

    /// Returns the component in slot `index` of `id`, unless it was removed or
    /// is running one of its own hooks.
    pub fn component_at(&self, id: NodeId, index: usize) -> Option<&dyn Component> {
        self.nodes
            .get(id)?
            .components
            .get(index)
            .filter(|s| s.attached)
            .and_then(|s| s.component.as_ref())
            .map(|c| &**c)
    }

    #[inline]
    pub fn has_component<C: Component>(&self, id: NodeId) -> bool {
        self.component::<C>(id).is_some()
    }

    /// Runs `hook` on every component of `id` in slot order, until it returns
    /// true. Each component is taken out of its slot while its hook runs, so
    /// the hook may use the tree freely. Components added meanwhile are not
    /// visited.
    pub(crate) fn dispatch<F>(&mut self, id: NodeId, mut hook: F) -> bool
    where
        F: FnMut(&mut dyn Component, &mut SceneTree, NodeId) -> bool,
    {
        let count = match self.nodes.get(id) {
            Some(node) => node.components.len(),
            None => return false,
        };

        for index in 0..count {
            let taken = self
                .nodes
                .get_mut(id)
                .and_then(|n| n.components.get_mut(index))
                .filter(|s| s.attached)
                .and_then(|s| s.component.take());

            let mut component = match taken {
                Some(component) => component,
                None => continue,
            };

            let stop = hook(component.as_mut(), self, id);

            match self.nodes.get_mut(id).and_then(|n| n.components.get_mut(index)) {
                Some(slot) if slot.attached => slot.component = Some(component),
                // Removed by its own hook, or the owner was freed by it.
                _ => component.on_detach(),
            }

            if stop {
                return true;
            }
        }

        false
    }
}
