//! Per-node behaviours attached to the scene tree.

use std::any::{Any, TypeId};

use crate::input::InputEvent;
use crate::math::Matrix3;

use super::{NodeId, SceneTree};

/// Decides which tree registries a component joins while its owner is inside
/// the tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ComponentKind {
    Behavior,
    Renderable,
    Camera,
}

/// Upcasting to `Any`, implemented for every `'static` type.
pub trait AsAny: Any {
    fn as_any(&self) -> &dyn Any;
    fn as_any_mut(&mut self) -> &mut dyn Any;
    fn into_any(self: Box<Self>) -> Box<dyn Any>;
}

impl<T: Any> AsAny for T {
    #[inline]
    fn as_any(&self) -> &dyn Any {
        self
    }

    #[inline]
    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }

    #[inline]
    fn into_any(self: Box<Self>) -> Box<dyn Any> {
        self
    }
}

/// A `Component` is owned by exactly one node and receives its lifecycle,
/// frame and input callbacks.
///
/// Every hook gets mutable access to the whole tree and the id of its owner,
/// so it may freely add, move, queue-free or look up other nodes. While a
/// hook runs, the component itself is taken out of its slot: looking up the
/// same component from inside its own hook yields nothing, and removing it
/// detaches it as soon as the hook returns.
///
/// The input hooks return true to mark the event as handled, which stops its
/// propagation. `SceneTree::set_input_as_handled` has the same effect.
pub trait Component: AsAny {
    fn kind(&self) -> ComponentKind {
        ComponentKind::Behavior
    }

    /// Called once when the component is attached to `owner`.
    fn on_attach(&mut self, _tree: &SceneTree, _owner: NodeId) {}

    /// Called once when the component is detached, either removed explicitly
    /// or torn down with its owner.
    fn on_detach(&mut self) {}

    fn enter_tree(&mut self, _tree: &mut SceneTree, _owner: NodeId) {}

    fn ready(&mut self, _tree: &mut SceneTree, _owner: NodeId) {}

    fn process(&mut self, _tree: &mut SceneTree, _owner: NodeId, _delta: f32) {}

    fn physics_process(&mut self, _tree: &mut SceneTree, _owner: NodeId, _delta: f32) {}

    fn exit_tree(&mut self, _tree: &mut SceneTree, _owner: NodeId) {}

    fn input(&mut self, _tree: &mut SceneTree, _owner: NodeId, _event: &InputEvent) -> bool {
        false
    }

    /// Only invoked on the node holding the focus.
    fn gui_input(&mut self, _tree: &mut SceneTree, _owner: NodeId, _event: &InputEvent) -> bool {
        false
    }

    fn shortcut_input(
        &mut self,
        _tree: &mut SceneTree,
        _owner: NodeId,
        _event: &InputEvent,
    ) -> bool {
        false
    }

    fn unhandled_key_input(
        &mut self,
        _tree: &mut SceneTree,
        _owner: NodeId,
        _event: &InputEvent,
    ) -> bool {
        false
    }

    fn unhandled_input(
        &mut self,
        _tree: &mut SceneTree,
        _owner: NodeId,
        _event: &InputEvent,
    ) -> bool {
        false
    }

    /// Called by `SceneTree::sync_renderables` for renderable components
    /// whose owner's world transform is at `version`.
    fn sync_transform(&mut self, _version: u64, _world: &Matrix3<f32>) {}
}

/// The storage of one attached component. `component` is `None` while the
/// component runs one of its hooks, and after it has been removed. Removed
/// slots stay in place so the indices of their siblings never shift.
pub(crate) struct ComponentSlot {
    pub(crate) component: Option<Box<dyn Component>>,
    pub(crate) kind: ComponentKind,
    pub(crate) type_id: TypeId,
    pub(crate) attached: bool,
    pub(crate) registry_index: Option<usize>,
}

impl ComponentSlot {
    pub(crate) fn new<C: Component>(component: C) -> Self {
        let kind = component.kind();
        ComponentSlot {
            component: Some(Box::new(component)),
            kind,
            type_id: TypeId::of::<C>(),
            attached: true,
            registry_index: None,
        }
    }

    pub(crate) fn downcast_ref<T: Component>(&self) -> Option<&T> {
        self.component
            .as_ref()
            .and_then(|c| (**c).as_any().downcast_ref::<T>())
    }

    pub(crate) fn downcast_mut<T: Component>(&mut self) -> Option<&mut T> {
        self.component
            .as_mut()
            .and_then(|c| (**c).as_any_mut().downcast_mut::<T>())
    }

    /// Type check that holds while the component is out running a hook.
    #[inline]
    pub(crate) fn is<T: Component>(&self) -> bool {
        self.type_id == TypeId::of::<T>()
    }
}
