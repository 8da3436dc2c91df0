//! Scene positioning pipeline
//!
//! Once per frame every shape is moved into camera space:
//!
//! 1. Model transform `T * R * S` from the shape's placement
//! 2. Camera transform `R(-orientation) * T(-position)`
//! 3. Depth color from the fourth-axis distance to the camera
//!
//! The model and camera matrices are composed once per shape, not per node.
//! Shapes are only read; the output is rebuilt from scratch each call.

use std::collections::{BTreeMap, HashMap};

use hyperscope_core::{model_matrix_at, Camera, NodeId, Scene, Shape};
use hyperscope_math::{mat5, Mat5, Orientation, Vec5};

use crate::color::find_color;

/// Identifies one node of one shape in the frame output
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct VertexKey {
    pub shape: usize,
    pub node: NodeId,
}

impl VertexKey {
    #[inline]
    pub const fn new(shape: usize, node: NodeId) -> Self {
        Self { shape, node }
    }
}

/// A node in camera space with its depth color
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PositionedVertex {
    /// Camera-space position (`h = 1`)
    pub position: Vec5,
    /// 4D depth color, RGBA
    pub color: [f32; 4],
}

impl PositionedVertex {
    /// Position with `h` stripped
    #[inline]
    pub fn spatial(&self) -> [f32; 4] {
        [self.position.x, self.position.y, self.position.z, self.position.w]
    }
}

/// Every positioned node of a frame
pub type FrameOutput = HashMap<VertexKey, PositionedVertex>;

/// World positions of a shape's nodes (model transform only)
pub fn position_shape(shape: &Shape) -> Vec<Vec5> {
    let model = shape.model_matrix();
    shape
        .mesh
        .nodes()
        .iter()
        .map(|node| mat5::transform(model, node.with_h(1.0)))
        .collect()
}

/// Model matrix as the pipeline applies it
///
/// A skybox is centred on the camera and never rotated, so it keeps its
/// place around the viewer while the world turns.
pub fn model_matrix(shape: &Shape, camera: &Camera, is_skybox: bool) -> Mat5 {
    if is_skybox {
        model_matrix_at(camera.position, &Orientation::ZERO, shape.scale)
    } else {
        shape.model_matrix()
    }
}

/// Combined camera and model transform for one shape
#[inline]
pub fn model_view(shape: &Shape, camera: &Camera, is_skybox: bool) -> Mat5 {
    mat5::mul(camera.view_matrix(), model_matrix(shape, camera, is_skybox))
}

/// Position every node of one shape into `out`
fn position_into(
    out: &mut FrameOutput,
    id: usize,
    shape: &Shape,
    model_view: Mat5,
    camera_w: f32,
    color_max: f32,
    opacity: f32,
) {
    for (node, local) in shape.mesh.nodes().iter().enumerate() {
        let position = mat5::transform(model_view, local.with_h(1.0));
        let color = find_color(camera_w - position.w, color_max, opacity);
        out.insert(VertexKey::new(id, node), PositionedVertex { position, color });
    }
}

/// Position every node of every shape relative to the camera
///
/// `skybox` names the shape, if any, that follows the camera.
pub fn process_shapes(
    camera: &Camera,
    shapes: &BTreeMap<usize, Shape>,
    color_max: f32,
    opacity: f32,
    skybox: Option<usize>,
) -> FrameOutput {
    let capacity = shapes.values().map(|s| s.mesh.node_count()).sum();
    let mut out = FrameOutput::with_capacity(capacity);
    let view = camera.view_matrix();

    for (&id, shape) in shapes {
        let mv = mat5::mul(view, model_matrix(shape, camera, skybox == Some(id)));
        position_into(&mut out, id, shape, mv, camera.position.w, color_max, opacity);
    }

    log::trace!("Positioned {} vertices from {} shapes", out.len(), shapes.len());
    out
}

/// [`process_shapes`] over a whole scene
#[inline]
pub fn process_scene(scene: &Scene, opacity: f32) -> FrameOutput {
    process_shapes(&scene.camera, &scene.shapes, scene.color_max, opacity, scene.skybox)
}

#[cfg(test)]
mod tests {
    use super::*;
    use hyperscope_core::{make_box, make_cube, make_hypercube, make_skybox, RotationPlane};
    use std::f32::consts::FRAC_PI_2;

    const EPSILON: f32 = 0.0001;

    fn vec_approx_eq(a: Vec5, b: Vec5) -> bool {
        a.to_array().iter().zip(b.to_array().iter()).all(|(x, y)| (x - y).abs() < EPSILON)
    }

    fn origin_camera() -> Camera {
        Camera { position: Vec5::ORIGIN, ..Camera::default() }
    }

    #[test]
    fn test_identity_round_trip() {
        let shape = make_hypercube(1.0, Vec5::ORIGIN, Orientation::ZERO, Orientation::ZERO).unwrap();
        let mut shapes = BTreeMap::new();
        shapes.insert(7, shape.clone());

        let frame = process_shapes(&origin_camera(), &shapes, 1.0, 0.2, None);
        assert_eq!(frame.len(), 16);
        for (id, local) in shape.mesh.nodes().iter().enumerate() {
            let v = frame[&VertexKey::new(7, id)];
            let expected = [local.x, local.y, local.z, local.w];
            for (a, b) in v.spatial().iter().zip(expected.iter()) {
                assert!((a - b).abs() < EPSILON);
            }
        }
    }

    #[test]
    fn test_position_shape_applies_model() {
        let o = Orientation::from_plane_angle(RotationPlane::XY, FRAC_PI_2);
        let shape = make_box([2.0, 2.0, 2.0], Vec5::point(10.0, 0.0, 0.0, 0.0), o, Orientation::ZERO)
            .unwrap()
            .with_scale(2.0);
        let world = position_shape(&shape);
        // Node 1 = (1,-1,-1) -> scaled (2,-2,-2) -> rotated (-2,-2,-2) -> (8,-2,-2)
        assert!(vec_approx_eq(world[1], Vec5::point(8.0, -2.0, -2.0, 0.0)), "got {:?}", world[1]);
    }

    #[test]
    fn test_camera_offset_moves_points() {
        let shape = make_cube(1.0, Vec5::point(0.0, 0.0, 5.0, 0.0), Orientation::ZERO, Orientation::ZERO)
            .unwrap();
        let camera = Camera { position: Vec5::point(0.0, 0.0, 2.0, 0.0), ..Camera::default() };
        let mut shapes = BTreeMap::new();
        shapes.insert(0, shape);

        let frame = process_shapes(&camera, &shapes, 1.0, 0.2, None);
        // Node 6 = (0.5, 0.5, 0.5) + (0, 0, 5) - (0, 0, 2)
        let v = frame[&VertexKey::new(0, 6)];
        assert!(vec_approx_eq(v.position, Vec5::point(0.5, 0.5, 3.5, 0.0)));
    }

    #[test]
    fn test_model_view_matches_manual_composition() {
        let shape = make_hypercube(
            1.0,
            Vec5::point(1.0, -2.0, 3.0, 0.5),
            Orientation::from_array([0.1, 0.2, 0.3, 0.4, 0.5, 0.6]),
            Orientation::ZERO,
        ).unwrap();
        let camera = Camera {
            position: Vec5::point(0.5, 1.0, -3.0, 2.0),
            orientation: Orientation::from_array([0.3, 0.0, 0.7, 0.0, 0.2, 0.0]),
            ..Camera::default()
        };
        let mv = model_view(&shape, &camera, false);
        for (node, world) in shape.mesh.nodes().iter().zip(position_shape(&shape)) {
            let direct = mat5::transform(mv, node.with_h(1.0));
            let staged = mat5::transform(camera.view_matrix(), world);
            assert!(vec_approx_eq(direct, staged));
        }
    }

    #[test]
    fn test_depth_color_uses_camera_w() {
        let near = make_cube(1.0, Vec5::point(0.0, 0.0, 5.0, 0.0), Orientation::ZERO, Orientation::ZERO)
            .unwrap();
        let camera = Camera { position: Vec5::point(0.0, 0.0, 0.0, 5.0), ..Camera::default() };
        let mut shapes = BTreeMap::new();
        shapes.insert(0, near);

        let frame = process_shapes(&camera, &shapes, 10.0, 0.2, None);
        // Camera space w = -5, distance = 5 - (-5) = 10: fully blue
        let v = frame[&VertexKey::new(0, 0)];
        assert_eq!(v.color, [0.0, 0.0, 1.0, 0.2]);
    }

    #[test]
    fn test_skybox_follows_translation_not_rotation() {
        let sky = make_skybox(10.0, Vec5::ORIGIN).unwrap();
        let camera = Camera {
            position: Vec5::point(100.0, 20.0, -50.0, 3.0),
            orientation: Orientation::from_plane_angle(RotationPlane::XZ, FRAC_PI_2),
            ..Camera::default()
        };
        let mut shapes = BTreeMap::new();
        shapes.insert(0, sky.clone());

        let frame = process_shapes(&camera, &shapes, 1.0, 0.2, Some(0));
        let expected_view = rotated_by_inverse(&camera, &sky);
        for (id, expected) in expected_view.into_iter().enumerate() {
            let v = frame[&VertexKey::new(0, id)];
            assert!(vec_approx_eq(v.position, expected), "node {}: {:?}", id, v.position);
        }

        // Without the skybox flag the same shape stays at the world origin
        let frame = process_shapes(&camera, &shapes, 1.0, 0.2, None);
        let far = frame[&VertexKey::new(0, 0)].position;
        assert!(far.length() > 50.0);
    }

    /// Skybox nodes only see the inverse camera rotation
    fn rotated_by_inverse(camera: &Camera, shape: &Shape) -> Vec<Vec5> {
        let r = hyperscope_math::rotation::rotator(&-camera.orientation);
        shape.mesh.nodes().iter().map(|n| mat5::transform(r, n.with_h(1.0))).collect()
    }

    #[test]
    fn test_process_scene_keys() {
        let mut scene = Scene::new("Test", origin_camera(), 1.0);
        let a = scene.add_shape(make_cube(1.0, Vec5::ORIGIN, Orientation::ZERO, Orientation::ZERO).unwrap());
        let b = scene.add_shape(make_hypercube(1.0, Vec5::ORIGIN, Orientation::ZERO, Orientation::ZERO).unwrap());
        let frame = process_scene(&scene, 0.2);
        assert_eq!(frame.len(), 8 + 16);
        assert!(frame.contains_key(&VertexKey::new(a, 7)));
        assert!(frame.contains_key(&VertexKey::new(b, 15)));
        assert!(!frame.contains_key(&VertexKey::new(a, 8)));
    }
}
