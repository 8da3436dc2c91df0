//! Camera space to device space
//!
//! The projector leaves the u-axis out of the output: a projected point is
//! the four-component `[x, y, z, h]` clip position a 3D pipeline expects.

use hyperscope_core::Camera;
use hyperscope_math::{mat5, Mat5, Vec5};

/// Clip position of a camera-space point
#[inline]
pub fn project(camera: &Camera, view_point: Vec5) -> [f32; 4] {
    project_with(camera.projector(), view_point)
}

/// Clip position using a precomputed projector
#[inline]
pub fn project_with(projector: Mat5, view_point: Vec5) -> [f32; 4] {
    mat5::transform(projector, view_point).to_gl()
}

/// Homogeneous divide
///
/// Returns `None` when the clip `h` is zero, which happens for points on
/// the plane the perspective divide can't map.
pub fn to_ndc(clip: [f32; 4]) -> Option<[f32; 3]> {
    let h = clip[3];
    if h == 0.0 || !h.is_finite() {
        return None;
    }
    Some([clip[0] / h, clip[1] / h, clip[2] / h])
}
