use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, AddAssign, Mul, Sub};

/// A point or displacement in 3-D simulation space.
///
/// Equality is exact component-wise comparison, which is what keys the
/// fitness histories and the default convergence check. Use
/// [`Vec3::within`] when a tolerance band is wanted instead.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Vec3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Vec3 {
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// True when all three components are finite.
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }

    /// True when every component of `self` lies within `tolerance` of
    /// the matching component of `other`. A tolerance of `0.0` reduces
    /// to exact equality.
    pub fn within(&self, other: Vec3, tolerance: f64) -> bool {
        (self.x - other.x).abs() <= tolerance
            && (self.y - other.y).abs() <= tolerance
            && (self.z - other.z).abs() <= tolerance
    }
}

impl Add for Vec3 {
    type Output = Vec3;

    fn add(self, rhs: Vec3) -> Vec3 {
        Vec3::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl AddAssign for Vec3 {
    fn add_assign(&mut self, rhs: Vec3) {
        *self = *self + rhs;
    }
}

impl Sub for Vec3 {
    type Output = Vec3;

    fn sub(self, rhs: Vec3) -> Vec3 {
        Vec3::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

impl Mul<f64> for Vec3 {
    type Output = Vec3;

    fn mul(self, rhs: f64) -> Vec3 {
        Vec3::new(self.x * rhs, self.y * rhs, self.z * rhs)
    }
}

impl fmt::Display for Vec3 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.x, self.y, self.z)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn arithmetic_is_component_wise() {
        let a = Vec3::new(1.0, 2.0, 3.0);
        let b = Vec3::new(0.5, -2.0, 10.0);
        assert_eq!(a + b, Vec3::new(1.5, 0.0, 13.0));
        assert_eq!(a - b, Vec3::new(0.5, 4.0, -7.0));
        assert_eq!(a * 2.0, Vec3::new(2.0, 4.0, 6.0));
    }

    #[test]
    fn add_assign_matches_add() {
        let mut a = Vec3::new(1.0, 1.0, 1.0);
        a += Vec3::new(0.0, 2.0, -1.0);
        assert_eq!(a, Vec3::new(1.0, 3.0, 0.0));
    }

    #[test]
    fn within_zero_tolerance_is_exact_equality() {
        let a = Vec3::new(55.0, 25.0, 15.0);
        assert!(a.within(a, 0.0));
        assert!(!a.within(Vec3::new(55.0, 25.0, 15.000001), 0.0));
    }

    #[test]
    fn within_checks_every_axis() {
        let target = Vec3::new(55.0, 25.0, 15.0);
        let near = Vec3::new(55.3, 24.8, 15.1);
        assert!(near.within(target, 0.5));
        // One axis out of band fails the whole check.
        let far_z = Vec3::new(55.3, 24.8, 16.0);
        assert!(!far_z.within(target, 0.5));
    }

    #[test]
    fn is_finite_rejects_nan_and_infinity() {
        assert!(Vec3::new(0.0, -1.0, 2.0).is_finite());
        assert!(!Vec3::new(f64::NAN, 0.0, 0.0).is_finite());
        assert!(!Vec3::new(0.0, f64::INFINITY, 0.0).is_finite());
    }

    #[test]
    fn display_is_parenthesized_triple() {
        assert_eq!(Vec3::new(1.0, 2.5, -3.0).to_string(), "(1, 2.5, -3)");
    }
}
