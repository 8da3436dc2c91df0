//! Serializable shape templates
//!
//! ShapeTemplate stores a generator's construction parameters so shapes can
//! be written to and read from RON scene files. Templates build shapes in
//! local space; a [`ShapeInstance`] adds the placement.

use serde::{Serialize, Deserialize};
use hyperscope_math::{Orientation, Vec5};

use crate::error::ShapeError;
use crate::generators;
use crate::shape::Shape;
use crate::terrain;

/// Serializable generator parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ShapeTemplate {
    /// Rectangular prism with side lengths along x, y, z
    Box { lens: [f32; 3] },
    Cube { side: f32 },
    /// Pyramid over a rectangular base, apex at `lens[1] / 2`
    Pyramid { lens: [f32; 3] },
    /// Box with a pyramid roof
    House { lens: [f32; 3] },
    Hyperrect { lens: [f32; 4] },
    Hypercube { side: f32 },
    /// 4-simplex inscribed in a hypersphere
    FiveCell { radius: f32 },
    /// Axis cross, wireframe only
    Origin { len: f32 },
    /// Heightmap terrain; both grids are `res x res`
    Terrain {
        dims: [f32; 2],
        res: usize,
        heights: Vec<Vec<f32>>,
        spissitudes: Vec<Vec<f32>>,
    },
}

impl ShapeTemplate {
    /// Build the shape at the local origin with no rotation
    pub fn create_shape(&self) -> Result<Shape, ShapeError> {
        let (p, o, s) = (Vec5::ORIGIN, Orientation::ZERO, Orientation::ZERO);
        match self {
            ShapeTemplate::Box { lens } => generators::make_box(*lens, p, o, s),
            ShapeTemplate::Cube { side } => generators::make_cube(*side, p, o, s),
            ShapeTemplate::Pyramid { lens } => generators::make_rectangular_pyramid(*lens, p, o, s),
            ShapeTemplate::House { lens } => generators::make_house(*lens, p, o, s),
            ShapeTemplate::Hyperrect { lens } => generators::make_hyperrect(*lens, p, o, s),
            ShapeTemplate::Hypercube { side } => generators::make_hypercube(*side, p, o, s),
            ShapeTemplate::FiveCell { radius } => generators::make_five_cell(*radius, p, o, s),
            ShapeTemplate::Origin { len } => generators::make_origin(*len, p, o, s),
            ShapeTemplate::Terrain { dims, res, heights, spissitudes } => {
                terrain::make_terrain(*dims, *res, heights, spissitudes, p)
            }
        }
    }

    pub fn cube(side: f32) -> Self {
        ShapeTemplate::Cube { side }
    }

    pub fn hypercube(side: f32) -> Self {
        ShapeTemplate::Hypercube { side }
    }

    pub fn house(lens: [f32; 3]) -> Self {
        ShapeTemplate::House { lens }
    }

    /// Terrain from two `res x res` grids
    pub fn terrain(dims: [f32; 2], heights: Vec<Vec<f32>>, spissitudes: Vec<Vec<f32>>) -> Self {
        let res = heights.len();
        ShapeTemplate::Terrain { dims, res, heights, spissitudes }
    }
}

fn default_scale() -> f32 {
    1.0
}

/// A template plus where and how it sits in the world
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShapeInstance {
    pub template: ShapeTemplate,
    /// World position `[x, y, z, w]`
    #[serde(default)]
    pub position: [f32; 4],
    #[serde(default)]
    pub orientation: Orientation,
    #[serde(default)]
    pub rotation_speed: Orientation,
    #[serde(default = "default_scale")]
    pub scale: f32,
}

impl ShapeInstance {
    pub fn new(template: ShapeTemplate, position: [f32; 4]) -> Self {
        Self {
            template,
            position,
            orientation: Orientation::ZERO,
            rotation_speed: Orientation::ZERO,
            scale: 1.0,
        }
    }

    pub fn with_orientation(mut self, orientation: impl Into<Orientation>) -> Self {
        self.orientation = orientation.into();
        self
    }

    pub fn with_rotation_speed(mut self, rotation_speed: impl Into<Orientation>) -> Self {
        self.rotation_speed = rotation_speed.into();
        self
    }

    pub fn with_scale(mut self, scale: f32) -> Self {
        self.scale = scale;
        self
    }

    /// Build the shape and place it
    pub fn create_shape(&self) -> Result<Shape, ShapeError> {
        let mut shape = self.template.create_shape()?;
        let [x, y, z, w] = self.position;
        shape.position = Vec5::point(x, y, z, w);
        shape.orientation = self.orientation;
        shape.rotation_speed = self.rotation_speed;
        shape.scale = self.scale;
        Ok(shape)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_templates_build_expected_topology() {
        let cases = [
            (ShapeTemplate::Box { lens: [1.0, 2.0, 3.0] }, 8, 6),
            (ShapeTemplate::cube(1.0), 8, 6),
            (ShapeTemplate::Pyramid { lens: [1.0, 1.0, 1.0] }, 5, 5),
            (ShapeTemplate::house([4.0, 4.0, 4.0]), 13, 11),
            (ShapeTemplate::Hyperrect { lens: [1.0, 2.0, 3.0, 4.0] }, 16, 24),
            (ShapeTemplate::hypercube(1.0), 16, 24),
            (ShapeTemplate::FiveCell { radius: 1.0 }, 5, 10),
            (ShapeTemplate::Origin { len: 1.0 }, 8, 0),
        ];
        for (template, nodes, faces) in cases {
            let shape = template.create_shape().unwrap();
            assert_eq!(shape.mesh.node_count(), nodes, "{:?}", template);
            assert_eq!(shape.mesh.face_count(), faces, "{:?}", template);
        }
    }

    #[test]
    fn test_terrain_template_propagates_errors() {
        let template = ShapeTemplate::Terrain {
            dims: [1.0, 1.0],
            res: 3,
            heights: vec![vec![0.0; 3]; 2],
            spissitudes: vec![vec![0.0; 3]; 3],
        };
        assert!(matches!(template.create_shape(), Err(ShapeError::GridDimensions { .. })));
    }

    #[test]
    fn test_instance_places_shape() {
        let instance = ShapeInstance::new(ShapeTemplate::cube(1.0), [1.0, 2.0, 3.0, 4.0])
            .with_orientation([0.5, 0.0, 0.0, 0.0, 0.0, 0.0])
            .with_rotation_speed([0.0, 0.0, 0.0, 0.002, 0.0, 0.0])
            .with_scale(2.0);
        let shape = instance.create_shape().unwrap();
        assert_eq!(shape.position, Vec5::point(1.0, 2.0, 3.0, 4.0));
        assert_eq!(shape.orientation.xy, 0.5);
        assert_eq!(shape.rotation_speed.xw, 0.002);
        assert_eq!(shape.scale, 2.0);
        // Placement never touches the mesh
        assert_eq!(shape.mesh.node(0), Vec5::direction(-0.5, -0.5, -0.5, 0.0));
    }

    #[test]
    fn test_instance_serialization_defaults() {
        let ron_str = "(template: (type: \"Hypercube\", side: 2.0))";
        let instance: ShapeInstance = ron::from_str(ron_str).unwrap();
        assert_eq!(instance.template, ShapeTemplate::hypercube(2.0));
        assert_eq!(instance.position, [0.0; 4]);
        assert_eq!(instance.scale, 1.0);
        assert_eq!(instance.orientation, Orientation::ZERO);
    }

    #[test]
    fn test_template_serialization() {
        let template = ShapeTemplate::house([4.0, 3.0, 2.0]);
        let serialized = ron::to_string(&template).unwrap();
        let deserialized: ShapeTemplate = ron::from_str(&serialized).unwrap();
        assert_eq!(deserialized, template);
    }
}
