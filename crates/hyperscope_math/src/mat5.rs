//! 5x5 homogeneous matrices for 4D transformations
//!
//! Matrices are row-major and pre-multiply column vectors: `v' = M * v`.
//! The fifth row and column hold the homogeneous terms, which lets a single
//! multiply express translation as well as rotation and scale.

use serde::{Serialize, Deserialize};

use crate::Vec5;

/// 5x5 matrix type (row-major, `m[row][col]`)
pub type Mat5 = [[f32; 5]; 5];

/// Identity matrix
pub const IDENTITY: Mat5 = [
    [1.0, 0.0, 0.0, 0.0, 0.0],
    [0.0, 1.0, 0.0, 0.0, 0.0],
    [0.0, 0.0, 1.0, 0.0, 0.0],
    [0.0, 0.0, 0.0, 1.0, 0.0],
    [0.0, 0.0, 0.0, 0.0, 1.0],
];

/// Multiply two 5x5 matrices: result = a * b
///
/// Applied to a vector, `b` acts first, then `a`. The result is a fresh
/// matrix, so accumulating into a running matrix is always safe.
#[allow(clippy::needless_range_loop)]
pub fn mul(a: Mat5, b: Mat5) -> Mat5 {
    let mut result = [[0.0f32; 5]; 5];

    for i in 0..5 {
        for j in 0..5 {
            for k in 0..5 {
                result[i][j] += a[i][k] * b[k][j];
            }
        }
    }

    result
}

/// Accumulate `m` on the left of a running matrix: `acc = m * acc`
#[inline]
pub fn mul_assign_left(acc: &mut Mat5, m: Mat5) {
    *acc = mul(m, *acc);
}

/// Transform a Vec5 by a 5x5 matrix: result = M * v
#[allow(clippy::needless_range_loop)]
pub fn transform(m: Mat5, v: Vec5) -> Vec5 {
    let v = v.to_array();
    let mut out = [0.0f32; 5];
    for i in 0..5 {
        for j in 0..5 {
            out[i] += m[i][j] * v[j];
        }
    }
    Vec5::from_array(out)
}

/// Transpose a matrix
pub fn transpose(m: Mat5) -> Mat5 {
    let mut result = m;
    for (i, row) in result.iter_mut().enumerate() {
        for (j, value) in row.iter_mut().enumerate() {
            *value = m[j][i];
        }
    }
    result
}

/// Translation matrix
///
/// The spatial components of `position` go in the homogeneous column. Only
/// vectors with `h = 1` are moved by it.
pub fn translator(position: Vec5) -> Mat5 {
    [
        [1.0, 0.0, 0.0, 0.0, position.x],
        [0.0, 1.0, 0.0, 0.0, position.y],
        [0.0, 0.0, 1.0, 0.0, position.z],
        [0.0, 0.0, 0.0, 1.0, position.w],
        [0.0, 0.0, 0.0, 0.0, 1.0],
    ]
}

/// Diagonal scale matrix from the four spatial components of `scale`
pub fn scaler(scale: Vec5) -> Mat5 {
    [
        [scale.x, 0.0, 0.0, 0.0, 0.0],
        [0.0, scale.y, 0.0, 0.0, 0.0],
        [0.0, 0.0, scale.z, 0.0, 0.0],
        [0.0, 0.0, 0.0, scale.w, 0.0],
        [0.0, 0.0, 0.0, 0.0, 1.0],
    ]
}

/// Same factor on all four spatial axes
#[inline]
pub fn uniform_scaler(s: f32) -> Mat5 {
    scaler(Vec5::direction(s, s, s, s))
}

/// Perspective parameters consumed by [`projector`]
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Projection {
    /// Vertical field of view in radians
    pub fov: f32,
    /// Width / height of the 3D view
    pub aspect: f32,
    /// Depth aspect of the fourth axis
    pub aspect_4: f32,
    /// Near clipping distance
    pub near: f32,
    /// Far clipping distance
    pub far: f32,
}

/// Perspective projection matrix
///
/// x and y are scaled by the field of view, z gets the usual perspective
/// depth terms, and the last row copies z into the homogeneous slot so the
/// consumer's divide performs the perspective division. The u-axis is scaled
/// by `aspect_4` but never reaches the 2D output.
pub fn projector(p: &Projection) -> Mat5 {
    let y_scale = 1.0 / (p.fov / 2.0).tan();
    let x_scale = y_scale / p.aspect;
    let u_scale = y_scale / p.aspect_4;
    let depth = p.far - p.near;

    [
        [x_scale, 0.0, 0.0, 0.0, 0.0],
        [0.0, y_scale, 0.0, 0.0, 0.0],
        [0.0, 0.0, (p.far + p.near) / depth, 0.0, (-2.0 * p.far * p.near) / depth],
        [0.0, 0.0, 0.0, u_scale, 0.0],
        [0.0, 0.0, 1.0, 0.0, 1.0],
    ]
}

/// Component-wise comparison within `epsilon`
pub fn approx_eq(a: Mat5, b: Mat5, epsilon: f32) -> bool {
    a.iter()
        .flatten()
        .zip(b.iter().flatten())
        .all(|(x, y)| (x - y).abs() <= epsilon)
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f32 = 0.0001;

    fn vec_approx_eq(a: Vec5, b: Vec5) -> bool {
        a.to_array().iter().zip(b.to_array().iter()).all(|(x, y)| (x - y).abs() < EPSILON)
    }

    #[test]
    fn test_identity() {
        let v = Vec5::point(1.0, 2.0, 3.0, 4.0);
        assert_eq!(transform(IDENTITY, v), v);
    }

    #[test]
    fn test_mul_identity() {
        let t = translator(Vec5::point(1.0, 2.0, 3.0, 4.0));
        assert!(approx_eq(mul(IDENTITY, t), t, EPSILON));
        assert!(approx_eq(mul(t, IDENTITY), t, EPSILON));
    }

    #[test]
    fn test_mul_order() {
        // mul(a, b) applies b first: scale then translate
        let s = uniform_scaler(2.0);
        let t = translator(Vec5::point(10.0, 0.0, 0.0, 0.0));
        let p = Vec5::point(1.0, 0.0, 0.0, 0.0);

        let scale_then_translate = transform(mul(t, s), p);
        assert!(vec_approx_eq(scale_then_translate, Vec5::point(12.0, 0.0, 0.0, 0.0)));

        let translate_then_scale = transform(mul(s, t), p);
        assert!(vec_approx_eq(translate_then_scale, Vec5::point(22.0, 0.0, 0.0, 0.0)));
    }

    #[test]
    fn test_mul_assign_left() {
        let mut acc = IDENTITY;
        mul_assign_left(&mut acc, uniform_scaler(2.0));
        mul_assign_left(&mut acc, translator(Vec5::point(1.0, 0.0, 0.0, 0.0)));
        let p = transform(acc, Vec5::point(1.0, 1.0, 1.0, 1.0));
        assert!(vec_approx_eq(p, Vec5::point(3.0, 2.0, 2.0, 2.0)));
    }

    #[test]
    fn test_translator_moves_points_not_directions() {
        let t = translator(Vec5::point(1.0, 2.0, 3.0, 4.0));
        assert!(vec_approx_eq(transform(t, Vec5::ORIGIN), Vec5::point(1.0, 2.0, 3.0, 4.0)));
        assert!(vec_approx_eq(transform(t, Vec5::X), Vec5::X));
    }

    #[test]
    fn test_translator_inverse() {
        let p = Vec5::point(1.5, -2.0, 3.25, 7.0);
        let product = mul(translator(p), translator(-p));
        assert!(approx_eq(product, IDENTITY, EPSILON));
    }

    #[test]
    fn test_scaler_keeps_h() {
        let s = scaler(Vec5::direction(2.0, 3.0, 4.0, 5.0));
        let p = transform(s, Vec5::point(1.0, 1.0, 1.0, 1.0));
        assert_eq!(p, Vec5::new(2.0, 3.0, 4.0, 5.0, 1.0));
    }

    #[test]
    fn test_projector_entries() {
        let p = Projection {
            fov: std::f32::consts::FRAC_PI_2,
            aspect: 2.0,
            aspect_4: 4.0,
            near: 1.0,
            far: 3.0,
        };
        let m = projector(&p);
        // tan(pi/4) = 1
        assert!((m[1][1] - 1.0).abs() < EPSILON);
        assert!((m[0][0] - 0.5).abs() < EPSILON);
        assert!((m[3][3] - 0.25).abs() < EPSILON);
        assert!((m[2][2] - 2.0).abs() < EPSILON);
        assert!((m[2][4] + 3.0).abs() < EPSILON);
        assert_eq!(m[4], [0.0, 0.0, 1.0, 0.0, 1.0]);
    }

    #[test]
    fn test_transpose() {
        let t = translator(Vec5::point(1.0, 2.0, 3.0, 4.0));
        let tt = transpose(t);
        assert_eq!(tt[4][0], 1.0);
        assert_eq!(tt[4][3], 4.0);
        assert_eq!(transpose(tt), t);
    }
}
