//! This module contains the math utils that mainly comes from `cgmath`, plus a
//! few planar helpers the scene tree relies on.

pub use cgmath::*;

/// Rotates `v` counter-clockwise by `radians`.
#[inline]
pub fn rotate2(v: Vector2<f32>, radians: f32) -> Vector2<f32> {
    let (sin, cos) = radians.sin_cos();
    Vector2::new(cos * v.x - sin * v.y, sin * v.x + cos * v.y)
}

/// Component-wise product of two vectors.
#[inline]
pub fn mul2(lhs: Vector2<f32>, rhs: Vector2<f32>) -> Vector2<f32> {
    Vector2::new(lhs.x * rhs.x, lhs.y * rhs.y)
}

/// Component-wise quotient of two vectors, or `None` if `rhs` has a zero
/// component.
#[inline]
pub fn div2(lhs: Vector2<f32>, rhs: Vector2<f32>) -> Option<Vector2<f32>> {
    if rhs.x == 0.0 || rhs.y == 0.0 {
        None
    } else {
        Some(Vector2::new(lhs.x / rhs.x, lhs.y / rhs.y))
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn rotate() {
        let v = rotate2(Vector2::new(1.0, 0.0), ::std::f32::consts::FRAC_PI_2);
        assert!(v.x.abs() < 1e-6);
        assert!((v.y - 1.0).abs() < 1e-6);
    }

    #[test]
    fn divide_by_zero() {
        assert_eq!(div2(Vector2::new(1.0, 1.0), Vector2::new(0.0, 2.0)), None);
        assert_eq!(
            div2(Vector2::new(4.0, 1.0), Vector2::new(2.0, 2.0)),
            Some(Vector2::new(2.0, 0.5))
        );
    }
}
