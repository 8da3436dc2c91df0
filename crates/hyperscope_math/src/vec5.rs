//! Homogeneous 4D vector type

use bytemuck::{Pod, Zeroable};
use serde::{Serialize, Deserialize};

/// 4D vector with a homogeneous augmentation component
///
/// `x`, `y`, `z` are the ordinary spatial axes, `w` is the fourth spatial
/// axis (the u-axis), and `h` is the homogeneous coordinate: 1 for positions,
/// 0 for directions. Rotation and scale matrices never touch `h`.
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Pod, Zeroable, Serialize, Deserialize)]
pub struct Vec5 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    pub w: f32,
    pub h: f32,
}

impl Vec5 {
    pub const ZERO: Self = Self { x: 0.0, y: 0.0, z: 0.0, w: 0.0, h: 0.0 };
    /// The origin as a homogeneous point
    pub const ORIGIN: Self = Self { x: 0.0, y: 0.0, z: 0.0, w: 0.0, h: 1.0 };
    pub const X: Self = Self { x: 1.0, y: 0.0, z: 0.0, w: 0.0, h: 0.0 };
    pub const Y: Self = Self { x: 0.0, y: 1.0, z: 0.0, w: 0.0, h: 0.0 };
    pub const Z: Self = Self { x: 0.0, y: 0.0, z: 1.0, w: 0.0, h: 0.0 };
    pub const W: Self = Self { x: 0.0, y: 0.0, z: 0.0, w: 1.0, h: 0.0 };

    /// Create a new Vec5 from all five components
    #[inline]
    pub const fn new(x: f32, y: f32, z: f32, w: f32, h: f32) -> Self {
        Self { x, y, z, w, h }
    }

    /// Create a position (`h = 1`)
    #[inline]
    pub const fn point(x: f32, y: f32, z: f32, w: f32) -> Self {
        Self { x, y, z, w, h: 1.0 }
    }

    /// Create a direction (`h = 0`)
    #[inline]
    pub const fn direction(x: f32, y: f32, z: f32, w: f32) -> Self {
        Self { x, y, z, w, h: 0.0 }
    }

    #[inline]
    pub fn from_array(a: [f32; 5]) -> Self {
        Self::new(a[0], a[1], a[2], a[3], a[4])
    }

    #[inline]
    pub fn to_array(self) -> [f32; 5] {
        [self.x, self.y, self.z, self.w, self.h]
    }

    /// Copy of this vector with a different homogeneous component
    #[inline]
    pub fn with_h(self, h: f32) -> Self {
        Self { h, ..self }
    }

    /// Dot product over all five components
    #[inline]
    pub fn dot(self, other: Self) -> f32 {
        self.x * other.x + self.y * other.y + self.z * other.z + self.w * other.w + self.h * other.h
    }

    /// Dot product over the four spatial components
    #[inline]
    pub fn spatial_dot(self, other: Self) -> f32 {
        self.x * other.x + self.y * other.y + self.z * other.z + self.w * other.w
    }

    /// Spatial length, ignoring `h`
    #[inline]
    pub fn length(self) -> f32 {
        self.spatial_dot(self).sqrt()
    }

    /// Normalize the spatial part to unit length, keeping `h`
    ///
    /// A zero-length vector normalizes to zero.
    #[inline]
    pub fn normalized(self) -> Self {
        let len = self.length();
        if len > 0.0 {
            let inv = 1.0 / len;
            Self::new(self.x * inv, self.y * inv, self.z * inv, self.w * inv, self.h)
        } else {
            Self::ZERO.with_h(self.h)
        }
    }

    /// 3D cross product of the xyz parts; the result is a direction
    #[inline]
    pub fn cross3(self, other: Self) -> Self {
        Self::direction(
            self.y * other.z - self.z * other.y,
            self.z * other.x - self.x * other.z,
            self.x * other.y - self.y * other.x,
            0.0,
        )
    }

    /// Extract the xyz components as an array
    #[inline]
    pub fn xyz(&self) -> [f32; 3] {
        [self.x, self.y, self.z]
    }

    /// Four-element form consumed by a 3D graphics API
    ///
    /// The u-axis (`w`) is discarded: `[x, y, z, h]`.
    #[inline]
    pub fn to_gl(&self) -> [f32; 4] {
        [self.x, self.y, self.z, self.h]
    }

    /// True if any component is NaN or infinite
    #[inline]
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
            && self.w.is_finite() && self.h.is_finite()
    }
}

/// Elementwise sum of two vectors
#[inline]
pub fn add(a: Vec5, b: Vec5) -> Vec5 {
    a + b
}

/// Multiply every component (including `h`) by `k`
#[inline]
pub fn scale(v: Vec5, k: f32) -> Vec5 {
    v * k
}

impl From<[f32; 5]> for Vec5 {
    fn from(a: [f32; 5]) -> Self {
        Self::from_array(a)
    }
}

impl From<Vec5> for [f32; 5] {
    fn from(v: Vec5) -> Self {
        v.to_array()
    }
}

// Operator overloads

impl std::ops::Add for Vec5 {
    type Output = Self;
    #[inline]
    fn add(self, other: Self) -> Self {
        Self::new(
            self.x + other.x,
            self.y + other.y,
            self.z + other.z,
            self.w + other.w,
            self.h + other.h,
        )
    }
}

impl std::ops::AddAssign for Vec5 {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        *self = *self + other;
    }
}

impl std::ops::Sub for Vec5 {
    type Output = Self;
    #[inline]
    fn sub(self, other: Self) -> Self {
        Self::new(
            self.x - other.x,
            self.y - other.y,
            self.z - other.z,
            self.w - other.w,
            self.h - other.h,
        )
    }
}

impl std::ops::SubAssign for Vec5 {
    #[inline]
    fn sub_assign(&mut self, other: Self) {
        *self = *self - other;
    }
}

impl std::ops::Mul<f32> for Vec5 {
    type Output = Self;
    #[inline]
    fn mul(self, k: f32) -> Self {
        Self::new(self.x * k, self.y * k, self.z * k, self.w * k, self.h * k)
    }
}

impl std::ops::MulAssign<f32> for Vec5 {
    #[inline]
    fn mul_assign(&mut self, k: f32) {
        *self = *self * k;
    }
}

impl std::ops::Div<f32> for Vec5 {
    type Output = Self;
    #[inline]
    fn div(self, k: f32) -> Self {
        Self::new(self.x / k, self.y / k, self.z / k, self.w / k, self.h / k)
    }
}

/// Negates the spatial part only; `h` is preserved so a negated point stays a point
impl std::ops::Neg for Vec5 {
    type Output = Self;
    #[inline]
    fn neg(self) -> Self {
        Self::new(-self.x, -self.y, -self.z, -self.w, self.h)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_point_and_direction() {
        let p = Vec5::point(1.0, 2.0, 3.0, 4.0);
        let d = Vec5::direction(1.0, 2.0, 3.0, 4.0);
        assert_eq!(p.h, 1.0);
        assert_eq!(d.h, 0.0);
    }

    #[test]
    fn test_dot() {
        let a = Vec5::new(1.0, 2.0, 3.0, 4.0, 1.0);
        let b = Vec5::new(5.0, 6.0, 7.0, 8.0, 1.0);
        // 5 + 12 + 21 + 32 + 1
        assert_eq!(a.dot(b), 71.0);
        assert_eq!(a.spatial_dot(b), 70.0);
    }

    #[test]
    fn test_add_and_scale_are_elementwise() {
        let a = Vec5::new(1.0, 2.0, 3.0, 4.0, 0.0);
        let b = Vec5::new(1.0, 1.0, 1.0, 1.0, 1.0);
        assert_eq!(add(a, b), Vec5::new(2.0, 3.0, 4.0, 5.0, 1.0));
        assert_eq!(scale(a, 2.0), Vec5::new(2.0, 4.0, 6.0, 8.0, 0.0));
    }

    #[test]
    fn test_neg_keeps_h() {
        let p = Vec5::point(1.0, -2.0, 3.0, -4.0);
        assert_eq!(-p, Vec5::point(-1.0, 2.0, -3.0, 4.0));
    }

    #[test]
    fn test_length_ignores_h() {
        let v = Vec5::point(1.0, 1.0, 1.0, 1.0);
        assert!((v.length() - 2.0).abs() < 0.0001);
    }

    #[test]
    fn test_normalized() {
        let n = Vec5::direction(3.0, 0.0, 4.0, 0.0).normalized();
        assert!((n.x - 0.6).abs() < 0.0001);
        assert!((n.z - 0.8).abs() < 0.0001);
        assert_eq!(n.h, 0.0);
    }

    #[test]
    fn test_normalized_zero() {
        assert_eq!(Vec5::ZERO.normalized(), Vec5::ZERO);
    }

    #[test]
    fn test_cross3() {
        let c = Vec5::X.cross3(Vec5::Y);
        assert_eq!(c, Vec5::Z);
    }

    #[test]
    fn test_to_gl_drops_w() {
        let v = Vec5::new(1.0, 2.0, 3.0, 4.0, 5.0);
        assert_eq!(v.to_gl(), [1.0, 2.0, 3.0, 5.0]);
    }
}
