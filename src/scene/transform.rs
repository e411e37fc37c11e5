use std::cell::Cell;

use serde::{Deserialize, Serialize};

use crate::errors::*;
use crate::math::{self, Matrix3, Vector2};

use super::NodeId;

/// The granularity below which a new local value counts as unchanged. Setting
/// a value within the same quantum neither dirties the subtree nor bumps the
/// world version.
pub const TRANSFORM_QUANTUM: f32 = 1.0e-5;

/// A planar translation, rotation (radians, counter-clockwise) and
/// non-uniform scale.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct Trs {
    pub position: Vector2<f32>,
    pub rotation: f32,
    pub scale: Vector2<f32>,
}

impl Default for Trs {
    fn default() -> Self {
        Trs {
            position: Vector2::new(0.0, 0.0),
            rotation: 0.0,
            scale: Vector2::new(1.0, 1.0),
        }
    }
}

impl ::std::ops::Mul for Trs {
    type Output = Self;

    /// Composes a parent transform `self` with a local transform `rhs`.
    ///
    /// Rotations add and scales multiply component-wise, so a rotated parent
    /// with non-uniform scale does not shear its children.
    fn mul(self, rhs: Self) -> Self {
        Trs {
            position: self.position + math::rotate2(math::mul2(rhs.position, self.scale), self.rotation),
            rotation: self.rotation + rhs.rotation,
            scale: math::mul2(rhs.scale, self.scale),
        }
    }
}

impl Trs {
    pub fn new(position: Vector2<f32>, rotation: f32, scale: Vector2<f32>) -> Self {
        Trs {
            position,
            rotation,
            scale,
        }
    }

    /// Finds the local transform which, composed under `self`, yields `world`.
    pub fn relative(&self, world: &Trs) -> Result<Trs> {
        let degenerate = || Error::DegenerateParentScale(self.scale.x, self.scale.y);

        let offset = math::rotate2(world.position - self.position, -self.rotation);
        let position = math::div2(offset, self.scale).ok_or_else(degenerate)?;
        let scale = math::div2(world.scale, self.scale).ok_or_else(degenerate)?;

        Ok(Trs {
            position,
            rotation: world.rotation - self.rotation,
            scale,
        })
    }

    /// Transforms point from local space to transform's space.
    #[inline]
    pub fn transform_point(&self, v: Vector2<f32>) -> Vector2<f32> {
        self.position + math::rotate2(math::mul2(v, self.scale), self.rotation)
    }

    /// Transforms direction from local space to transform's space. This is not
    /// affected by scale or position.
    #[inline]
    pub fn transform_direction(&self, v: Vector2<f32>) -> Vector2<f32> {
        math::rotate2(v, self.rotation)
    }

    /// Transforms point from transform's space back to local space.
    pub fn inverse_transform_point(&self, v: Vector2<f32>) -> Result<Vector2<f32>> {
        let offset = math::rotate2(v - self.position, -self.rotation);
        math::div2(offset, self.scale)
            .ok_or_else(|| Error::DegenerateParentScale(self.scale.x, self.scale.y))
    }

    /// Returns the homogeneous matrix `T * R * S`.
    #[rustfmt::skip]
    pub fn matrix(&self) -> Matrix3<f32> {
        let (sin, cos) = self.rotation.sin_cos();
        Matrix3::new(
            cos * self.scale.x, sin * self.scale.x, 0.0,
            -sin * self.scale.y, cos * self.scale.y, 0.0,
            self.position.x, self.position.y, 1.0,
        )
    }
}

#[inline]
fn quantize(v: f32) -> i64 {
    (v / TRANSFORM_QUANTUM).round() as i64
}

#[inline]
fn same_scalar(lhs: f32, rhs: f32) -> bool {
    quantize(lhs) == quantize(rhs)
}

#[inline]
fn same_vector(lhs: Vector2<f32>, rhs: Vector2<f32>) -> bool {
    same_scalar(lhs.x, rhs.x) && same_scalar(lhs.y, rhs.y)
}

/// The spatial state of a node: a local TRS plus a lazily evaluated world
/// cache.
///
/// The world cache is recomputed on read when either this transform was
/// dirtied or its parent's world version moved since the last evaluation, so
/// a stale child can never survive a parent change even if dirty propagation
/// stopped early. Every recomputation bumps `version`.
#[derive(Debug)]
pub struct Transform {
    local: Trs,
    parent: Option<NodeId>,
    world: Cell<Trs>,
    dirty: Cell<bool>,
    version: Cell<u64>,
    parent_version: Cell<u64>,
    matrix: Cell<Matrix3<f32>>,
    matrix_dirty: Cell<bool>,
}

impl Default for Transform {
    fn default() -> Self {
        Transform::new(Trs::default())
    }
}

impl Transform {
    pub fn new(local: Trs) -> Self {
        Transform {
            local,
            parent: None,
            world: Cell::new(local),
            dirty: Cell::new(true),
            version: Cell::new(0),
            parent_version: Cell::new(0),
            matrix: Cell::new(local.matrix()),
            matrix_dirty: Cell::new(true),
        }
    }

    #[inline]
    pub fn local(&self) -> Trs {
        self.local
    }

    #[inline]
    pub fn local_position(&self) -> Vector2<f32> {
        self.local.position
    }

    #[inline]
    pub fn local_rotation(&self) -> f32 {
        self.local.rotation
    }

    #[inline]
    pub fn local_scale(&self) -> Vector2<f32> {
        self.local.scale
    }

    /// The parent link, always mirroring the owning node's parent.
    #[inline]
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    #[inline]
    pub fn is_dirty(&self) -> bool {
        self.dirty.get()
    }

    pub(crate) fn set_local_position(&mut self, position: Vector2<f32>) -> bool {
        if same_vector(self.local.position, position) {
            return false;
        }

        self.local.position = position;
        self.dirty.set(true);
        true
    }

    pub(crate) fn set_local_rotation(&mut self, rotation: f32) -> bool {
        if same_scalar(self.local.rotation, rotation) {
            return false;
        }

        self.local.rotation = rotation;
        self.dirty.set(true);
        true
    }

    pub(crate) fn set_local_scale(&mut self, scale: Vector2<f32>) -> bool {
        if same_vector(self.local.scale, scale) {
            return false;
        }

        self.local.scale = scale;
        self.dirty.set(true);
        true
    }

    pub(crate) fn set_local(&mut self, local: Trs) -> bool {
        let moved = self.set_local_position(local.position);
        let rotated = self.set_local_rotation(local.rotation);
        let scaled = self.set_local_scale(local.scale);
        moved || rotated || scaled
    }

    pub(crate) fn set_parent(&mut self, parent: Option<NodeId>) {
        self.parent = parent;
        self.dirty.set(true);
    }

    /// Marks the world cache stale. Returns false if it already was.
    pub(crate) fn mark_dirty(&self) -> bool {
        !self.dirty.replace(true)
    }

    /// Brings the world cache up to date against the parent's resolved world
    /// transform and version, returning the own pair.
    pub(crate) fn refresh(&self, parent: Option<(Trs, u64)>) -> (Trs, u64) {
        let parent_version = parent.map_or(0, |(_, v)| v);
        if !self.dirty.get() && self.parent_version.get() == parent_version {
            return (self.world.get(), self.version.get());
        }

        let world = match parent {
            Some((p, _)) => p * self.local,
            None => self.local,
        };

        let version = self.version.get() + 1;
        self.world.set(world);
        self.version.set(version);
        self.parent_version.set(parent_version);
        self.dirty.set(false);
        self.matrix_dirty.set(true);
        (world, version)
    }

    /// The matrix of the cached world transform. Only valid right after
    /// `refresh`.
    pub(crate) fn cached_matrix(&self) -> Matrix3<f32> {
        if self.matrix_dirty.replace(false) {
            self.matrix.set(self.world.get().matrix());
        }

        self.matrix.get()
    }
}
