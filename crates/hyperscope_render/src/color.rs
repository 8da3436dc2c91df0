//! Vertex coloring
//!
//! The fourth axis can't be drawn, so its depth is shown as color: points
//! on the camera's side of w-space shift blue, points beyond it shift red,
//! saturating at `color_max`.

use hyperscope_core::Lighting;
use hyperscope_math::Vec5;

/// Channel value at zero fourth-axis distance
pub const BASE_GRAY: f32 = 0.0;

/// Fraction of the way to full saturation, in `[0, 1]`
///
/// A non-positive `color_max` saturates immediately: any non-zero distance
/// gives 1.
pub fn depth_fraction(distance: f32, color_max: f32) -> f32 {
    if color_max > 0.0 {
        (distance.abs() / color_max).min(1.0)
    } else if distance == 0.0 {
        0.0
    } else {
        1.0
    }
}

/// 4D depth color for a signed fourth-axis distance
///
/// `distance` is `camera.w - point.w`. Positive distances are blue
/// `(0, 0, t, alpha)`, everything else red `(t, 0, 0, alpha)`.
pub fn find_color(distance: f32, color_max: f32, alpha: f32) -> [f32; 4] {
    let value = BASE_GRAY + depth_fraction(distance, color_max);
    if distance > 0.0 {
        [BASE_GRAY, BASE_GRAY, value, alpha]
    } else {
        [value, BASE_GRAY, BASE_GRAY, alpha]
    }
}

/// Final vertex color: ambient-weighted depth color mixed evenly with diffuse
///
/// `normal` is the world-space surface normal. The diffuse term is clamped
/// Lambert against the scene's light direction; a zero normal gets none.
pub fn shade(fourd: [f32; 4], normal: Vec5, lighting: &Lighting) -> [f32; 4] {
    let [dx, dy, dz, dw] = lighting.diffuse_direction;
    let dir = Vec5::direction(dx, dy, dz, dw).normalized();
    let weight = normal.normalized().spatial_dot(dir).max(0.0) * lighting.diffuse_intensity;

    let mut out = [0.0; 4];
    for (i, c) in out.iter_mut().enumerate() {
        let ambient = fourd[i] * lighting.ambient_intensity;
        let diffuse = lighting.diffuse_color[i] * weight;
        *c = 0.5 * (ambient + diffuse);
    }
    out
}
