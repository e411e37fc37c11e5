use crate::math::{Matrix3, SquareMatrix};

use super::component::{Component, ComponentKind};

/// A textured quad drawn at its owner's world transform.
#[derive(Debug, Clone)]
pub struct SpriteRenderer {
    /// The texture name resolved by the renderer.
    pub texture: String,
    /// RGBA tint.
    pub color: [f32; 4],
    /// Sprites with greater `z_index` are drawn on top.
    pub z_index: i32,
    /// Is this renderer visible.
    pub visible: bool,

    world: Matrix3<f32>,
    world_version: u64,
}

impl Default for SpriteRenderer {
    fn default() -> Self {
        SpriteRenderer {
            texture: String::new(),
            color: [1.0, 1.0, 1.0, 1.0],
            z_index: 0,
            visible: true,
            world: Matrix3::identity(),
            world_version: 0,
        }
    }
}

impl SpriteRenderer {
    pub fn new<T: Into<String>>(texture: T) -> Self {
        SpriteRenderer {
            texture: texture.into(),
            ..Default::default()
        }
    }

    /// The world matrix captured by the last sync.
    #[inline]
    pub fn world_matrix(&self) -> Matrix3<f32> {
        self.world
    }

    /// The world version the cached matrix belongs to, zero if never synced.
    #[inline]
    pub fn world_version(&self) -> u64 {
        self.world_version
    }
}

impl Component for SpriteRenderer {
    fn kind(&self) -> ComponentKind {
        ComponentKind::Renderable
    }

    fn sync_transform(&mut self, version: u64, world: &Matrix3<f32>) {
        if self.world_version != version {
            self.world = *world;
            self.world_version = version;
        }
    }
}
