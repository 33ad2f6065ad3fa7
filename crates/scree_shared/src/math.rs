//! Mathematical types shared between the core, terrain, and game layers.
//!
//! `Vec2` is a by-value type: arithmetic returns new vectors instead of
//! mutating in place, so a position can never be aliased into another
//! entity's state by accident.

use bytemuck::{Pod, Zeroable};
use serde::{Deserialize, Serialize};

/// 2D vector - position, velocity, dimensions.
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Pod, Zeroable, Serialize, Deserialize)]
pub struct Vec2 {
    /// X component.
    pub x: f32,
    /// Y component (screen convention: grows downward).
    pub y: f32,
}

impl Vec2 {
    /// Zero vector.
    pub const ZERO: Self = Self::new(0.0, 0.0);

    /// Unit X vector.
    pub const X: Self = Self::new(1.0, 0.0);

    /// Unit Y vector.
    pub const Y: Self = Self::new(0.0, 1.0);

    /// Creates a new vector.
    #[inline]
    #[must_use]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Creates a vector with both components set to `value`.
    #[inline]
    #[must_use]
    pub const fn splat(value: f32) -> Self {
        Self::new(value, value)
    }

    /// Dot product.
    #[inline]
    #[must_use]
    pub fn dot(self, other: Self) -> f32 {
        self.x * other.x + self.y * other.y
    }

    /// Length squared (avoids sqrt).
    #[inline]
    #[must_use]
    pub fn length_squared(self) -> f32 {
        self.dot(self)
    }

    /// Length.
    #[inline]
    #[must_use]
    pub fn length(self) -> f32 {
        self.length_squared().sqrt()
    }

    /// Distance to another point.
    #[inline]
    #[must_use]
    pub fn distance(self, other: Self) -> f32 {
        (self - other).length()
    }

    /// Returns this vector scaled to unit length.
    ///
    /// A vector shorter than the numeric tolerance normalizes to
    /// [`Vec2::ZERO`] rather than producing NaN components.
    #[must_use]
    pub fn normalized(self) -> Self {
        let length = self.length();
        if length < crate::geometry::EPSILON {
            Self::ZERO
        } else {
            self / length
        }
    }

    /// Rotates this vector by -90 degrees: `(x, y)` becomes `(y, -x)`.
    ///
    /// Applied to a left-to-right direction this yields the upward-facing
    /// perpendicular under the y-down screen convention.
    #[inline]
    #[must_use]
    pub const fn perp(self) -> Self {
        Self::new(self.y, -self.x)
    }
}

impl std::ops::Add for Vec2 {
    type Output = Self;
    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl std::ops::Sub for Vec2 {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl std::ops::Mul<f32> for Vec2 {
    type Output = Self;
    fn mul(self, rhs: f32) -> Self {
        Self::new(self.x * rhs, self.y * rhs)
    }
}

impl std::ops::Div<f32> for Vec2 {
    type Output = Self;
    fn div(self, rhs: f32) -> Self {
        Self::new(self.x / rhs, self.y / rhs)
    }
}

impl std::ops::Neg for Vec2 {
    type Output = Self;
    fn neg(self) -> Self {
        Self::new(-self.x, -self.y)
    }
}

impl std::ops::AddAssign for Vec2 {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl std::ops::SubAssign for Vec2 {
    fn sub_assign(&mut self, rhs: Self) {
        *self = *self - rhs;
    }
}

impl std::ops::MulAssign<f32> for Vec2 {
    fn mul_assign(&mut self, rhs: f32) {
        *self = *self * rhs;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_arithmetic() {
        let a = Vec2::new(1.0, 2.0);
        let b = Vec2::new(3.0, -1.0);

        assert_eq!(a + b, Vec2::new(4.0, 1.0));
        assert_eq!(a - b, Vec2::new(-2.0, 3.0));
        assert_eq!(a * 2.0, Vec2::new(2.0, 4.0));
        assert_eq!(b / 2.0, Vec2::new(1.5, -0.5));
        assert_eq!(-a, Vec2::new(-1.0, -2.0));
    }

    #[test]
    fn test_length_and_dot() {
        let v = Vec2::new(3.0, 4.0);
        assert!((v.length() - 5.0).abs() < f32::EPSILON);
        assert!((v.length_squared() - 25.0).abs() < f32::EPSILON);
        assert!((v.dot(Vec2::new(1.0, 0.0)) - 3.0).abs() < f32::EPSILON);
    }

    #[test]
    fn test_normalized() {
        let v = Vec2::new(10.0, 0.0).normalized();
        assert!((v.x - 1.0).abs() < f32::EPSILON);
        assert!(v.y.abs() < f32::EPSILON);
    }

    #[test]
    fn test_normalized_degenerate_is_zero() {
        assert_eq!(Vec2::ZERO.normalized(), Vec2::ZERO);
    }

    #[test]
    fn test_perp_points_up_for_rightward_direction() {
        // Left-to-right direction, y-down convention: perpendicular is "up".
        let up = Vec2::new(1.0, 0.0).perp();
        assert_eq!(up, Vec2::new(0.0, -1.0));
    }
}
