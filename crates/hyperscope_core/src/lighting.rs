//! Scene lighting parameters

use serde::{Serialize, Deserialize};

/// Ambient and directional light for a scene
///
/// Colors are RGBA. The diffuse direction is a 4D direction; it is
/// normalized when shading.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Lighting {
    pub ambient_intensity: f32,
    pub diffuse_intensity: f32,
    pub diffuse_color: [f32; 4],
    pub diffuse_direction: [f32; 4],
}

impl Default for Lighting {
    fn default() -> Self {
        Self {
            ambient_intensity: 0.4,
            diffuse_intensity: 0.3,
            diffuse_color: [0.0, 1.0, 0.0, 0.2],
            diffuse_direction: [1.0, 0.0, 0.0, 0.0],
        }
    }
}

impl Lighting {
    /// Stronger green light from the upper left, used for the 5-cell
    pub fn five_cell() -> Self {
        let d = std::f32::consts::FRAC_1_SQRT_2;
        Self {
            diffuse_color: [0.0, 1.0, 0.0, 0.5],
            diffuse_direction: [d, -d, 0.0, 0.0],
            ..Self::default()
        }
    }
}
