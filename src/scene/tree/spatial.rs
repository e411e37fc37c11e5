use crate::errors::*;
use crate::math::{self, Matrix3, Vector2};
use crate::scene::transform::{Transform, Trs};
use crate::scene::NodeId;

use super::SceneTree;

impl SceneTree {
    /// Resolves the world transform and version of `id`, refreshing stale
    /// caches along its ancestor chain.
    fn resolve_world(&self, id: NodeId) -> Option<(Trs, u64)> {
        let node = self.nodes.get(id)?;
        let parent = node.transform.parent().and_then(|p| self.resolve_world(p));
        Some(node.transform.refresh(parent))
    }

    fn parent_world(&self, id: NodeId) -> Result<Trs> {
        let parent = self.ensure(id)?.transform.parent();
        Ok(parent
            .and_then(|p| self.resolve_world(p))
            .map_or_else(Trs::default, |(world, _)| world))
    }

    /// Marks the world caches of the descendants of `id` stale. Descendants
    /// already stale are skipped along with their subtree.
    pub(crate) fn propagate_transform_changed(&self, id: NodeId) {
        if let Some(node) = self.nodes.get(id) {
            node.transform.mark_dirty();
            for &child in &node.children {
                self.mark_subtree_dirty(child);
            }
        }
    }

    fn mark_subtree_dirty(&self, id: NodeId) {
        if let Some(node) = self.nodes.get(id) {
            if node.transform.mark_dirty() {
                for &child in &node.children {
                    self.mark_subtree_dirty(child);
                }
            }
        }
    }

    fn modify_local<F>(&mut self, id: NodeId, modify: F) -> bool
    where
        F: FnOnce(&mut Transform) -> bool,
    {
        let changed = match self.nodes.get_mut(id) {
            Some(node) => modify(&mut node.transform),
            None => return false,
        };

        if changed {
            self.propagate_transform_changed(id);
        }

        changed
    }
}

impl SceneTree {
    #[inline]
    pub fn local_transform(&self, id: NodeId) -> Option<Trs> {
        self.nodes.get(id).map(|n| n.transform.local())
    }

    #[inline]
    pub fn local_position(&self, id: NodeId) -> Option<Vector2<f32>> {
        self.nodes.get(id).map(|n| n.transform.local_position())
    }

    #[inline]
    pub fn local_rotation(&self, id: NodeId) -> Option<f32> {
        self.nodes.get(id).map(|n| n.transform.local_rotation())
    }

    #[inline]
    pub fn local_scale(&self, id: NodeId) -> Option<Vector2<f32>> {
        self.nodes.get(id).map(|n| n.transform.local_scale())
    }

    /// Sets the transform in local space. Values within `TRANSFORM_QUANTUM`
    /// of the current ones are ignored.
    pub fn set_local_transform(&mut self, id: NodeId, local: Trs) -> bool {
        self.modify_local(id, |t| t.set_local(local))
    }

    pub fn set_local_position<T>(&mut self, id: NodeId, position: T) -> bool
    where
        T: Into<Vector2<f32>>,
    {
        let position = position.into();
        self.modify_local(id, |t| t.set_local_position(position))
    }

    pub fn set_local_rotation(&mut self, id: NodeId, rotation: f32) -> bool {
        self.modify_local(id, |t| t.set_local_rotation(rotation))
    }

    pub fn set_local_scale<T>(&mut self, id: NodeId, scale: T) -> bool
    where
        T: Into<Vector2<f32>>,
    {
        let scale = scale.into();
        self.modify_local(id, |t| t.set_local_scale(scale))
    }

    /// Moves the node in the direction and distance of translation, in its
    /// parent's space.
    pub fn translate<T>(&mut self, id: NodeId, translation: T) -> bool
    where
        T: Into<Vector2<f32>>,
    {
        let translation = translation.into();
        self.modify_local(id, |t| {
            let position = t.local_position() + translation;
            t.set_local_position(position)
        })
    }

    pub fn rotate(&mut self, id: NodeId, radians: f32) -> bool {
        self.modify_local(id, |t| {
            let rotation = t.local_rotation() + radians;
            t.set_local_rotation(rotation)
        })
    }

    /// Multiplies the local scale component-wise by `factor`.
    pub fn scale_by<T>(&mut self, id: NodeId, factor: T) -> bool
    where
        T: Into<Vector2<f32>>,
    {
        let factor = factor.into();
        self.modify_local(id, |t| {
            let scale = math::mul2(t.local_scale(), factor);
            t.set_local_scale(scale)
        })
    }
}

impl SceneTree {
    /// Gets the transform in world space.
    #[inline]
    pub fn world_transform(&self, id: NodeId) -> Option<Trs> {
        self.resolve_world(id).map(|(world, _)| world)
    }

    #[inline]
    pub fn world_position(&self, id: NodeId) -> Option<Vector2<f32>> {
        self.world_transform(id).map(|w| w.position)
    }

    #[inline]
    pub fn world_rotation(&self, id: NodeId) -> Option<f32> {
        self.world_transform(id).map(|w| w.rotation)
    }

    #[inline]
    pub fn world_scale(&self, id: NodeId) -> Option<Vector2<f32>> {
        self.world_transform(id).map(|w| w.scale)
    }

    /// The world version grows every time the world transform of `id` is
    /// recomputed, and stays put across reads without intervening changes.
    #[inline]
    pub fn world_version(&self, id: NodeId) -> Option<u64> {
        self.resolve_world(id).map(|(_, version)| version)
    }

    /// The homogeneous world matrix, computed at most once per world version.
    pub fn world_matrix(&self, id: NodeId) -> Option<Matrix3<f32>> {
        self.resolve_world(id)?;
        self.nodes.get(id).map(|n| n.transform.cached_matrix())
    }

    /// Sets the whole transform in world space.
    pub fn set_world_transform(&mut self, id: NodeId, world: Trs) -> Result<()> {
        let local = self.parent_world(id)?.relative(&world)?;
        self.set_local_transform(id, local);
        Ok(())
    }

    /// Sets position of the node in world space. Fails if the parent's world
    /// scale has a zero component.
    pub fn set_world_position<T>(&mut self, id: NodeId, position: T) -> Result<()>
    where
        T: Into<Vector2<f32>>,
    {
        let local = self.parent_world(id)?.inverse_transform_point(position.into())?;
        self.set_local_position(id, local);
        Ok(())
    }

    pub fn set_world_rotation(&mut self, id: NodeId, rotation: f32) -> Result<()> {
        let parent = self.parent_world(id)?;
        self.set_local_rotation(id, rotation - parent.rotation);
        Ok(())
    }

    /// Sets scale of the node in world space. Fails if the parent's world
    /// scale has a zero component.
    pub fn set_world_scale<T>(&mut self, id: NodeId, scale: T) -> Result<()>
    where
        T: Into<Vector2<f32>>,
    {
        let parent = self.parent_world(id)?;
        let local = math::div2(scale.into(), parent.scale)
            .ok_or_else(|| Error::DegenerateParentScale(parent.scale.x, parent.scale.y))?;
        self.set_local_scale(id, local);
        Ok(())
    }

    /// Rotates the node so its local x axis points at `target` in world space.
    pub fn look_at<T>(&mut self, id: NodeId, target: T) -> Result<()>
    where
        T: Into<Vector2<f32>>,
    {
        let position = self
            .world_position(id)
            .ok_or_else(|| Error::NodeNotFound(id))?;

        let dir = target.into() - position;
        if dir.x == 0.0 && dir.y == 0.0 {
            return Ok(());
        }

        self.set_world_rotation(id, dir.y.atan2(dir.x))
    }

    /// Transforms a point from the node's local space into world space.
    pub fn to_global<T>(&self, id: NodeId, point: T) -> Option<Vector2<f32>>
    where
        T: Into<Vector2<f32>>,
    {
        self.world_transform(id).map(|w| w.transform_point(point.into()))
    }

    /// Transforms a world point into the node's local space.
    pub fn to_local<T>(&self, id: NodeId, point: T) -> Result<Vector2<f32>>
    where
        T: Into<Vector2<f32>>,
    {
        self.world_transform(id)
            .ok_or_else(|| Error::NodeNotFound(id))?
            .inverse_transform_point(point.into())
    }
}
