//! Plain 2D vector for positions, velocities and forces.

use std::ops::{Add, AddAssign, Mul, Neg, Sub, SubAssign};

/// A 2D vector in layout space.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Vec2 {
    /// Horizontal component.
    pub x: f64,
    /// Vertical component.
    pub y: f64,
}

impl Vec2 {
    /// The zero vector.
    pub const ZERO: Self = Self { x: 0.0, y: 0.0 };

    /// Construct a vector from its components.
    #[inline]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean length, computed with `hypot` to avoid overflow.
    #[inline]
    pub fn length(self) -> f64 {
        self.x.hypot(self.y)
    }

    /// Euclidean distance to `other`.
    #[inline]
    pub fn distance(self, other: Self) -> f64 {
        (other - self).length()
    }

    /// Angle of this vector from the positive x axis, in radians.
    #[inline]
    pub fn angle(self) -> f64 {
        self.y.atan2(self.x)
    }

    /// Unit vector pointing at `theta` radians.
    #[inline]
    pub fn from_angle(theta: f64) -> Self {
        let (sin, cos) = theta.sin_cos();
        Self { x: cos, y: sin }
    }

    /// True when both components are finite.
    #[inline]
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl Add for Vec2 {
    type Output = Self;
    #[inline]
    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl AddAssign for Vec2 {
    #[inline]
    fn add_assign(&mut self, rhs: Self) {
        self.x += rhs.x;
        self.y += rhs.y;
    }
}

impl Sub for Vec2 {
    type Output = Self;
    #[inline]
    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl SubAssign for Vec2 {
    #[inline]
    fn sub_assign(&mut self, rhs: Self) {
        self.x -= rhs.x;
        self.y -= rhs.y;
    }
}

impl Mul<f64> for Vec2 {
    type Output = Self;
    #[inline]
    fn mul(self, rhs: f64) -> Self {
        Self::new(self.x * rhs, self.y * rhs)
    }
}

impl Neg for Vec2 {
    type Output = Self;
    #[inline]
    fn neg(self) -> Self {
        Self::new(-self.x, -self.y)
    }
}

impl From<(f64, f64)> for Vec2 {
    fn from((x, y): (f64, f64)) -> Self {
        Self::new(x, y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use proptest::prelude::*;

    #[test]
    fn distance_is_hypot() {
        let a = Vec2::new(1.0, 1.0);
        let b = Vec2::new(4.0, 5.0);
        assert_abs_diff_eq!(a.distance(b), 5.0);
    }

    #[test]
    fn angle_round_trips_through_unit_vector() {
        let v = Vec2::new(-3.0, 4.0);
        let u = Vec2::from_angle(v.angle());
        assert_abs_diff_eq!(u.x, -0.6, epsilon = 1e-12);
        assert_abs_diff_eq!(u.y, 0.8, epsilon = 1e-12);
    }

    #[test]
    fn zero_vector_angle_points_along_x() {
        // atan2(0, 0) is defined as 0, so coincident points resolve to +x.
        assert_eq!(Vec2::ZERO.angle(), 0.0);
        assert_eq!(Vec2::from_angle(0.0), Vec2::new(1.0, 0.0));
    }

    #[test]
    fn arithmetic_operators() {
        let mut v = Vec2::new(1.0, 2.0) + Vec2::new(3.0, 4.0);
        assert_eq!(v, Vec2::new(4.0, 6.0));
        v -= Vec2::new(1.0, 1.0);
        assert_eq!(v, Vec2::new(3.0, 5.0));
        assert_eq!(v * 2.0, Vec2::new(6.0, 10.0));
        assert_eq!(-v, Vec2::new(-3.0, -5.0));
    }

    proptest! {
        #[test]
        fn distance_is_symmetric(
            ax in -1e3f64..1e3, ay in -1e3f64..1e3,
            bx in -1e3f64..1e3, by in -1e3f64..1e3,
        ) {
            let a = Vec2::new(ax, ay);
            let b = Vec2::new(bx, by);
            prop_assert_eq!(a.distance(b), b.distance(a));
            prop_assert!(a.distance(b) >= 0.0);
        }
    }
}
