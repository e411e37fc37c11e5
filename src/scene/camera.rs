//! A device through which the player views the world.

use crate::math::{self, Vector2};

use super::component::{Component, ComponentKind};
use super::transform::Trs;

/// A `Camera2D` looks at the world from its owner's world transform. The
/// scene tree keeps track of every camera inside it and of the current one.
#[derive(Debug, Clone, Copy)]
pub struct Camera2D {
    /// Magnification applied after the camera transform.
    pub zoom: Vector2<f32>,
    /// View-space offset of the camera centre.
    pub offset: Vector2<f32>,
}

impl Default for Camera2D {
    fn default() -> Self {
        Camera2D {
            zoom: Vector2::new(1.0, 1.0),
            offset: Vector2::new(0.0, 0.0),
        }
    }
}

impl Camera2D {
    pub fn new(zoom: Vector2<f32>) -> Self {
        Camera2D {
            zoom,
            ..Default::default()
        }
    }

    /// Maps a world point into view space for a camera placed at `world`.
    /// The camera's own world scale is ignored.
    pub fn world_to_view(&self, world: &Trs, point: Vector2<f32>) -> Vector2<f32> {
        let local = math::rotate2(point - world.position, -world.rotation);
        math::mul2(local, self.zoom) - self.offset
    }
}

impl Component for Camera2D {
    fn kind(&self) -> ComponentKind {
        ComponentKind::Camera
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn world_to_view() {
        let camera = Camera2D::new(Vector2::new(2.0, 2.0));
        let world = Trs::new(Vector2::new(10.0, 5.0), 0.0, Vector2::new(3.0, 3.0));
        let v = camera.world_to_view(&world, Vector2::new(11.0, 5.0));
        assert!((v.x - 2.0).abs() < 1e-5);
        assert!(v.y.abs() < 1e-5);
    }
}
