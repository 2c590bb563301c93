use crate::math::{Matrix, Point, Real, Vector};
use core::ops::Mul;

/// A rigid transform with uniform scale.
///
/// Points map as `rotation * p * scale + translation`.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Transform {
    /// The translation, applied last.
    pub translation: Vector,
    /// The rotation matrix, orthonormal for well-formed scenes.
    pub rotation: Matrix,
    /// The uniform scale.
    pub scale: Real,
}

impl Default for Transform {
    fn default() -> Self {
        Self::identity()
    }
}

impl Transform {
    /// The identity transform.
    pub fn identity() -> Self {
        Self {
            translation: Vector::zeros(),
            rotation: Matrix::identity(),
            scale: 1.0,
        }
    }

    /// Maps a point from the local frame to the parent frame.
    #[inline]
    pub fn apply(&self, pt: &Point) -> Point {
        Point::from(self.rotation * pt.coords * self.scale + self.translation)
    }

    /// Maps a direction: rotation only, no scale or translation.
    #[inline]
    pub fn apply_direction(&self, dir: &Vector) -> Vector {
        self.rotation * dir
    }

    /// The inverse of the rotation.
    ///
    /// Falls back to the transpose when the matrix is singular.
    pub fn inverse_rotation(&self) -> Matrix {
        self.rotation
            .try_inverse()
            .unwrap_or_else(|| self.rotation.transpose())
    }

    /// Maps a point from the parent frame back to the local frame.
    pub fn inverse_apply(&self, pt: &Point) -> Point {
        Point::from(self.inverse_rotation() * (pt.coords - self.translation) / self.scale)
    }
}

/// `a * b` applies `b` in the local frame of `a`, then `a`.
impl Mul for Transform {
    type Output = Transform;

    fn mul(self, rhs: Transform) -> Transform {
        Transform {
            rotation: self.rotation * rhs.rotation,
            translation: self.translation + self.rotation * rhs.translation * self.scale,
            scale: self.scale * rhs.scale,
        }
    }
}
