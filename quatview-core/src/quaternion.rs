//! Quaternion representation and rotation math.
//!
//! Components are stored in `w, x, y, z` order. Nothing here assumes the
//! quaternion is normalized; callers decide when to call [`normalize`].

use glam::{DMat3, DQuat, DVec3};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Mul;

/// A quaternion `w + xi + yj + zk`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Quaternion {
    pub w: f64,
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Quaternion {
    /// The identity rotation `{1, 0, 0, 0}`.
    pub const IDENTITY: Self = Self::new(1.0, 0.0, 0.0, 0.0);

    /// Create a quaternion from its four components.
    pub const fn new(w: f64, x: f64, y: f64, z: f64) -> Self {
        Self { w, x, y, z }
    }

    /// Euclidean norm `sqrt(w² + x² + y² + z²)`.
    pub fn magnitude(&self) -> f64 {
        (self.w * self.w + self.x * self.x + self.y * self.y + self.z * self.z).sqrt()
    }

    /// Negate the vector part.
    pub fn conjugate(&self) -> Self {
        Self::new(self.w, -self.x, -self.y, -self.z)
    }

    /// Return a unit quaternion, see [`normalize`].
    pub fn normalized(&self) -> Self {
        normalize(*self)
    }

    /// Rotation matrix for this quaternion, see [`to_rotation_matrix`].
    pub fn to_matrix(&self) -> DMat3 {
        to_rotation_matrix(*self)
    }

    /// Rotate a point, see [`rotate`].
    pub fn rotate(&self, point: DVec3) -> DVec3 {
        rotate(*self, point)
    }

    pub fn to_array(&self) -> [f64; 4] {
        [self.w, self.x, self.y, self.z]
    }

    pub fn is_finite(&self) -> bool {
        self.w.is_finite() && self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }
}

impl Default for Quaternion {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl fmt::Display for Quaternion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "w: {:.6}, x: {:.6}, y: {:.6}, z: {:.6}",
            self.w, self.x, self.y, self.z
        )
    }
}

impl From<[f64; 4]> for Quaternion {
    fn from(arr: [f64; 4]) -> Self {
        Self::new(arr[0], arr[1], arr[2], arr[3])
    }
}

// glam stores quaternions as (x, y, z, w).
impl From<Quaternion> for DQuat {
    fn from(q: Quaternion) -> Self {
        DQuat::from_xyzw(q.x, q.y, q.z, q.w)
    }
}

impl From<DQuat> for Quaternion {
    fn from(q: DQuat) -> Self {
        Self::new(q.w, q.x, q.y, q.z)
    }
}

/// Hamilton product. `a * b` applies `b` first, then `a`.
impl Mul for Quaternion {
    type Output = Quaternion;

    fn mul(self, rhs: Quaternion) -> Quaternion {
        Quaternion {
            w: self.w * rhs.w - self.x * rhs.x - self.y * rhs.y - self.z * rhs.z,
            x: self.w * rhs.x + self.x * rhs.w + self.y * rhs.z - self.z * rhs.y,
            y: self.w * rhs.y - self.x * rhs.z + self.y * rhs.w + self.z * rhs.x,
            z: self.w * rhs.z + self.x * rhs.y - self.y * rhs.x + self.z * rhs.w,
        }
    }
}

/// Scale a quaternion to unit length.
///
/// A quaternion with magnitude exactly zero has no direction; it maps to
/// [`Quaternion::IDENTITY`] instead of dividing by zero.
pub fn normalize(q: Quaternion) -> Quaternion {
    let magnitude = q.magnitude();
    if magnitude == 0.0 {
        return Quaternion::IDENTITY;
    }
    Quaternion::new(
        q.w / magnitude,
        q.x / magnitude,
        q.y / magnitude,
        q.z / magnitude,
    )
}

/// Build the 3×3 rotation matrix of `q`.
///
/// The input is used as given. A non-unit quaternion produces a matrix that
/// also scales, which is accepted.
pub fn to_rotation_matrix(q: Quaternion) -> DMat3 {
    let Quaternion { w, x, y, z } = q;
    // Columns of the row-major formula.
    DMat3::from_cols(
        DVec3::new(
            1.0 - 2.0 * (y * y + z * z),
            2.0 * (x * y + w * z),
            2.0 * (x * z - w * y),
        ),
        DVec3::new(
            2.0 * (x * y - w * z),
            1.0 - 2.0 * (x * x + z * z),
            2.0 * (y * z + w * x),
        ),
        DVec3::new(
            2.0 * (x * z + w * y),
            2.0 * (y * z - w * x),
            1.0 - 2.0 * (x * x + y * y),
        ),
    )
}

/// Rotate `point` around the origin by `q`.
pub fn rotate(q: Quaternion, point: DVec3) -> DVec3 {
    to_rotation_matrix(q) * point
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    fn samples() -> Vec<Quaternion> {
        vec![
            Quaternion::new(0.9533649, -0.30172053, 0.9533649, -0.007400504),
            Quaternion::new(1.0, 2.0, 3.0, 4.0),
            Quaternion::new(-0.2, 0.0, 0.7, -5.0),
            Quaternion::new(1e-8, -3e-9, 0.0, 2e-8),
            Quaternion::new(0.0, 0.0, 0.0, 12.0),
        ]
    }

    #[test]
    fn test_normalize_unit_magnitude() {
        for q in samples() {
            let n = normalize(q);
            assert!((n.magnitude() - 1.0).abs() < EPS, "{q:?} -> {n:?}");
        }
    }

    #[test]
    fn test_normalize_zero_is_identity() {
        let n = normalize(Quaternion::new(0.0, 0.0, 0.0, 0.0));
        assert_eq!(n, Quaternion::IDENTITY);
        assert_eq!(n.to_array(), [1.0, 0.0, 0.0, 0.0]);
    }

    #[test]
    fn test_normalize_recorded_sample() {
        let q = Quaternion::new(0.9533649, -0.30172053, 0.9533649, -0.007400504);
        assert!((q.magnitude() - 1.3816292).abs() < 1e-6);

        let n = normalize(q);
        assert!((n.magnitude() - 1.0).abs() < EPS);
        assert!(n.x < 0.0);
        assert_eq!(n.w, n.y);
        assert!((n.w - 0.6900294839).abs() < 1e-9);
    }

    #[test]
    fn test_matrix_orthonormal_for_unit_quaternions() {
        for q in samples().into_iter().map(normalize) {
            let m = to_rotation_matrix(q);
            let cols = [m.x_axis, m.y_axis, m.z_axis];
            for (i, a) in cols.iter().enumerate() {
                assert!((a.length() - 1.0).abs() < EPS);
                for b in cols.iter().skip(i + 1) {
                    assert!(a.dot(*b).abs() < EPS);
                }
            }
            for r in 0..3 {
                assert!((m.row(r).length() - 1.0).abs() < EPS);
            }
            assert!((m.determinant() - 1.0).abs() < EPS);
        }
    }

    #[test]
    fn test_matrix_matches_glam() {
        for q in samples().into_iter().map(normalize) {
            let ours = to_rotation_matrix(q);
            let theirs = DMat3::from_quat(DQuat::from(q));
            assert!(ours.abs_diff_eq(theirs, EPS));
        }
    }

    #[test]
    fn test_non_unit_matrix_is_accepted() {
        let m = to_rotation_matrix(Quaternion::new(2.0, 0.0, 0.0, 0.0));
        // Pure real quaternion of magnitude 2 leaves the diagonal at 1.
        assert_eq!(m, DMat3::IDENTITY);

        let m = to_rotation_matrix(Quaternion::new(1.0, 1.0, 0.0, 0.0));
        assert!((m.x_axis.length() - 1.0).abs() < EPS);
        assert!((m.y_axis.length() - 1.0).abs() > 0.1);
    }

    #[test]
    fn test_rotate_preserves_length() {
        let points = [
            DVec3::new(0.5, 0.5, 0.5),
            DVec3::new(-3.0, 1.0, 2.5),
            DVec3::new(0.0, 0.0, -7.0),
        ];
        for q in samples().into_iter().map(normalize) {
            for p in points {
                assert!((rotate(q, p).length() - p.length()).abs() < EPS);
            }
        }
    }

    #[test]
    fn test_identity_rotation_is_exact() {
        let points = [
            DVec3::new(0.5, 0.5, 0.5),
            DVec3::new(-3.25, 1.0e-12, 2.5e7),
            DVec3::new(0.1, -0.2, 0.3),
        ];
        for p in points {
            assert_eq!(rotate(Quaternion::IDENTITY, p), p);
        }
    }

    #[test]
    fn test_quarter_turn_about_z() {
        let half = std::f64::consts::FRAC_PI_4;
        let q = Quaternion::new(half.cos(), 0.0, 0.0, half.sin());
        let p = rotate(q, DVec3::X);
        assert!(p.abs_diff_eq(DVec3::Y, EPS));
    }

    #[test]
    fn test_hamilton_product_composes_rotations() {
        let q1 = normalize(Quaternion::new(0.9, 0.1, -0.3, 0.2));
        let q2 = normalize(Quaternion::new(0.4, -0.5, 0.6, 0.1));
        let p = DVec3::new(0.5, -1.5, 2.0);

        let chained = rotate(q2, rotate(q1, p));
        let composed = rotate(q2 * q1, p);
        assert!(chained.abs_diff_eq(composed, EPS));
    }

    #[test]
    fn test_hamilton_product_matches_glam() {
        let a = Quaternion::new(0.3, 0.1, -0.7, 0.2);
        let b = Quaternion::new(-0.4, 0.5, 0.6, 0.9);
        let ours = DQuat::from(a * b);
        let theirs = DQuat::from(a) * DQuat::from(b);
        assert!(ours.abs_diff_eq(theirs, EPS));
    }

    #[test]
    fn test_conjugate_inverts_unit_rotation() {
        let q = normalize(Quaternion::new(0.2, 0.4, -0.1, 0.8));
        let p = DVec3::new(1.0, 2.0, 3.0);
        assert!(rotate(q.conjugate(), rotate(q, p)).abs_diff_eq(p, EPS));
    }

    #[test]
    fn test_nan_propagates() {
        let q = Quaternion::new(f64::NAN, 0.0, 0.0, 0.0);
        assert!(!normalize(q).is_finite());
        assert!(rotate(Quaternion::new(1.0, f64::NAN, 0.0, 0.0), DVec3::ONE).x.is_nan());
    }

    #[test]
    fn test_display_six_decimals() {
        let q = Quaternion::new(1.0, -0.5, 0.25, 0.0);
        assert_eq!(
            q.to_string(),
            "w: 1.000000, x: -0.500000, y: 0.250000, z: 0.000000"
        );
    }
}
