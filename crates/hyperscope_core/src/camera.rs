//! 4D Camera
//!
//! The camera uses the same six-angle orientation as shapes. Its view
//! transform undoes the world placement: translate by `-position` first, then
//! rotate by `-orientation`.

use serde::{Serialize, Deserialize};
use hyperscope_math::{mat5, rotation, Mat5, Orientation, Projection, Vec5};

/// Perspective camera in 4D space
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Camera {
    /// 4D position (`h = 1`)
    pub position: Vec5,
    /// Orientation in the six rotation planes
    pub orientation: Orientation,
    /// Vertical field of view in radians
    pub fov: f32,
    /// 3D aspect ratio (width / height)
    pub aspect: f32,
    /// Depth aspect of the fourth axis
    pub aspect_4: f32,
    /// Near clipping distance
    pub near: f32,
    /// Far clipping distance
    pub far: f32,
    /// Extra scale for the fourth axis; carried for scene compatibility, unused by the projector
    pub strange: f32,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            position: Vec5::point(0.0, 0.0, -2.0, 0.0),
            orientation: Orientation::ZERO,
            fov: std::f32::consts::TAU / 5.5,
            aspect: 4.0 / 3.0,
            aspect_4: 1.0,
            near: 0.1,
            far: 200.0,
            strange: 1.0,
        }
    }
}

impl Camera {
    /// Camera at a position with default lens settings
    pub fn at(position: Vec5) -> Self {
        Self {
            position: position.with_h(1.0),
            ..Self::default()
        }
    }

    /// View matrix `R(-orientation) * T(-position)`
    pub fn view_matrix(&self) -> Mat5 {
        let r = rotation::rotator(&-self.orientation);
        let t = mat5::translator(-self.position);
        mat5::mul(r, t)
    }

    /// Lens parameters for the projector
    pub fn projection(&self) -> Projection {
        Projection {
            fov: self.fov,
            aspect: self.aspect,
            aspect_4: self.aspect_4,
            near: self.near,
            far: self.far,
        }
    }

    /// Perspective projection matrix
    #[inline]
    pub fn projector(&self) -> Mat5 {
        mat5::projector(&self.projection())
    }

    /// Move along a camera-relative direction
    ///
    /// `direction` is given in camera space (`Z` is forward). With `fps` set,
    /// only the XZ angle is honoured so movement stays level. Returns the
    /// world-space displacement applied.
    pub fn move_relative(&mut self, direction: Vec5, amount: f32, fps: bool) -> Vec5 {
        let orientation = if fps {
            Orientation { xz: self.orientation.xz, ..Orientation::ZERO }
        } else {
            self.orientation
        };
        // Camera space -> world space is the inverse of the view rotation
        let to_world = rotation::rotator_inverse(&-orientation);
        let displacement = mat5::transform(to_world, direction.with_h(0.0)) * amount;
        self.position += displacement;
        displacement
    }
}
