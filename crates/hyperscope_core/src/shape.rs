//! Shapes: a mesh plus its placement in 4D space
//!
//! Generators author mesh coordinates about the local origin. Position,
//! orientation and scale are applied at transform time, never baked into
//! the nodes.

use hyperscope_math::{mat5, Mat5, Orientation, Vec5};

use crate::mesh::Mesh;

/// A mesh with position, uniform scale, orientation and rotation speed
#[derive(Clone, Debug)]
pub struct Shape {
    /// Local-space geometry
    pub mesh: Mesh,
    /// Position in 4D space (`h = 1`)
    pub position: Vec5,
    /// Uniform scale factor on all four axes
    pub scale: f32,
    /// Current angle in each of the six rotation planes
    pub orientation: Orientation,
    /// Angles added to `orientation` every tick
    pub rotation_speed: Orientation,
}

impl Shape {
    /// Create a shape with scale 1
    pub fn new(mesh: Mesh, position: Vec5, orientation: Orientation, rotation_speed: Orientation) -> Self {
        Self {
            mesh,
            position: position.with_h(1.0),
            scale: 1.0,
            orientation,
            rotation_speed,
        }
    }

    /// Set the uniform scale
    pub fn with_scale(mut self, scale: f32) -> Self {
        self.scale = scale;
        self
    }

    /// Advance the orientation by one tick of rotation speed
    pub fn tick(&mut self) {
        self.orientation += self.rotation_speed;
    }

    /// Model matrix `T * R * S`
    ///
    /// Scale, then rotate, then translate: rotation and scale act about the
    /// local origin, so the shape spins in place instead of orbiting.
    pub fn model_matrix(&self) -> Mat5 {
        model_matrix_at(self.position, &self.orientation, self.scale)
    }
}

/// Model matrix for an explicit position, orientation and scale
pub fn model_matrix_at(position: Vec5, orientation: &Orientation, scale: f32) -> Mat5 {
    let t = mat5::translator(position);
    let r = orientation.matrix();
    let s = mat5::uniform_scaler(scale);
    mat5::mul(t, mat5::mul(r, s))
}
