//! Plane rotations in 4D space
//!
//! In 4D, rotations happen in planes rather than around axes. There are 6
//! rotation planes: XY, YZ, XZ, XW, YW, ZW. An [`Orientation`] holds one angle
//! per plane, and [`rotator`] composes them into a single matrix.
//!
//! Rotations do not commute, so the composition order is fixed: XY is applied
//! first and ZW last, `R = R_zw * R_yw * R_xw * R_xz * R_yz * R_xy`.
//! Rotations restricted to XY, YZ and XZ look like ordinary 3D rotation; any
//! plane touching W distorts the 3D silhouette of a 4D object.

use serde::{Serialize, Deserialize};

use crate::mat5::{self, Mat5, IDENTITY};

/// The 6 rotation planes in 4D space
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RotationPlane {
    XY,
    YZ,
    XZ,
    /// Ana-kata rotation affecting X
    XW,
    /// Ana-kata rotation affecting Y
    YW,
    /// Ana-kata rotation affecting Z
    ZW,
}

impl RotationPlane {
    /// All planes in composition order
    pub const ALL: [RotationPlane; 6] = [
        RotationPlane::XY,
        RotationPlane::YZ,
        RotationPlane::XZ,
        RotationPlane::XW,
        RotationPlane::YW,
        RotationPlane::ZW,
    ];

    /// Axis indices spanning the plane (0=X, 1=Y, 2=Z, 3=W), lower index first
    pub fn axes(self) -> (usize, usize) {
        match self {
            RotationPlane::XY => (0, 1),
            RotationPlane::YZ => (1, 2),
            RotationPlane::XZ => (0, 2),
            RotationPlane::XW => (0, 3),
            RotationPlane::YW => (1, 3),
            RotationPlane::ZW => (2, 3),
        }
    }
}

/// Six plane-rotation angles in radians
///
/// Used both for absolute orientation and for per-tick rotation speed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Orientation {
    pub xy: f32,
    pub yz: f32,
    pub xz: f32,
    pub xw: f32,
    pub yw: f32,
    pub zw: f32,
}

impl Orientation {
    pub const ZERO: Self = Self { xy: 0.0, yz: 0.0, xz: 0.0, xw: 0.0, yw: 0.0, zw: 0.0 };

    /// Build from `[xy, yz, xz, xw, yw, zw]`
    pub const fn from_array(a: [f32; 6]) -> Self {
        Self { xy: a[0], yz: a[1], xz: a[2], xw: a[3], yw: a[4], zw: a[5] }
    }

    pub fn to_array(self) -> [f32; 6] {
        [self.xy, self.yz, self.xz, self.xw, self.yw, self.zw]
    }

    /// A single-plane orientation
    pub fn from_plane_angle(plane: RotationPlane, angle: f32) -> Self {
        let mut o = Self::ZERO;
        *o.get_mut(plane) = angle;
        o
    }

    pub fn get(&self, plane: RotationPlane) -> f32 {
        match plane {
            RotationPlane::XY => self.xy,
            RotationPlane::YZ => self.yz,
            RotationPlane::XZ => self.xz,
            RotationPlane::XW => self.xw,
            RotationPlane::YW => self.yw,
            RotationPlane::ZW => self.zw,
        }
    }

    pub fn get_mut(&mut self, plane: RotationPlane) -> &mut f32 {
        match plane {
            RotationPlane::XY => &mut self.xy,
            RotationPlane::YZ => &mut self.yz,
            RotationPlane::XZ => &mut self.xz,
            RotationPlane::XW => &mut self.xw,
            RotationPlane::YW => &mut self.yw,
            RotationPlane::ZW => &mut self.zw,
        }
    }

    /// Combined rotation matrix, see [`rotator`]
    #[inline]
    pub fn matrix(&self) -> Mat5 {
        rotator(self)
    }
}

impl std::ops::Add for Orientation {
    type Output = Self;
    fn add(self, other: Self) -> Self {
        let (a, b) = (self.to_array(), other.to_array());
        Self::from_array(std::array::from_fn(|i| a[i] + b[i]))
    }
}

impl std::ops::AddAssign for Orientation {
    fn add_assign(&mut self, other: Self) {
        *self = *self + other;
    }
}

impl std::ops::Mul<f32> for Orientation {
    type Output = Self;
    fn mul(self, k: f32) -> Self {
        Self::from_array(self.to_array().map(|a| a * k))
    }
}

impl std::ops::Neg for Orientation {
    type Output = Self;
    fn neg(self) -> Self {
        Self::from_array(self.to_array().map(|a| -a))
    }
}

impl From<[f32; 6]> for Orientation {
    fn from(a: [f32; 6]) -> Self {
        Self::from_array(a)
    }
}

/// Elementary rotation in one plane
///
/// Only the 2x2 block of the plane's two axes is modified: `+sin` above the
/// diagonal, `-sin` below. Every other coordinate, `h` included, is untouched.
pub fn plane_rotation(plane: RotationPlane, angle: f32) -> Mat5 {
    let (a, b) = plane.axes();
    let cs = angle.cos();
    let sn = angle.sin();

    let mut m = IDENTITY;
    m[a][a] = cs;
    m[b][b] = cs;
    m[a][b] = sn;
    m[b][a] = -sn;
    m
}

/// Combined rotation for all six planes
///
/// Composed by left-multiplication in the order XY, YZ, XZ, XW, YW, ZW.
pub fn rotator(orientation: &Orientation) -> Mat5 {
    let mut r = IDENTITY;
    for plane in RotationPlane::ALL {
        let angle = orientation.get(plane);
        if angle != 0.0 {
            mat5::mul_assign_left(&mut r, plane_rotation(plane, angle));
        }
    }
    r
}

/// Exact inverse of [`rotator`]
///
/// Rotation matrices are orthogonal, so this is the transpose. Note that
/// `rotator(&-o)` is not the inverse once more than one plane is non-zero,
/// because the planes are still applied XY-first.
pub fn rotator_inverse(orientation: &Orientation) -> Mat5 {
    mat5::transpose(rotator(orientation))
}
