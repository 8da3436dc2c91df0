//! Procedural shape generators
//!
//! Every generator authors its nodes about the local origin and hands
//! position, orientation and rotation speed straight to the [`Shape`]. Node
//! ids are dense and follow generation order, so the face tables below index
//! directly into the coordinate tables.

use hyperscope_math::{Orientation, Vec5};

use crate::error::ShapeError;
use crate::mesh::{Edge, Mesh, NodeId};
use crate::shape::Shape;

/// Corner signs for a cube: front face (z = -1) then back face (z = +1),
/// each wound counter-clockwise seen from -z
const CUBE_CORNERS: [[f32; 3]; 8] = [
    [-1.0, -1.0, -1.0],
    [1.0, -1.0, -1.0],
    [1.0, 1.0, -1.0],
    [-1.0, 1.0, -1.0],
    [-1.0, -1.0, 1.0],
    [1.0, -1.0, 1.0],
    [1.0, 1.0, 1.0],
    [-1.0, 1.0, 1.0],
];

/// Front ring, back ring, then the four bridges
const CUBE_EDGES: [(NodeId, NodeId); 12] = [
    (0, 1), (1, 2), (2, 3), (3, 0),
    (4, 5), (5, 6), (6, 7), (7, 4),
    (0, 4), (1, 5), (2, 6), (3, 7),
];

/// Front, back, top, bottom, left, right
const CUBE_FACES: [[NodeId; 4]; 6] = [
    [0, 1, 2, 3],
    [4, 5, 6, 7],
    [3, 2, 6, 7],
    [0, 1, 5, 4],
    [0, 4, 7, 3],
    [1, 5, 6, 2],
];

/// Faces joining the inner cube (ids 0..8) to the outer cube (ids 8..16)
const HYPERRECT_BRIDGE_FACES: [[NodeId; 4]; 12] = [
    [8, 9, 1, 0],
    [12, 13, 5, 4],
    [12, 8, 0, 4],
    [9, 13, 5, 1],
    [11, 10, 2, 3],
    [15, 14, 6, 7],
    [15, 11, 3, 7],
    [14, 10, 2, 6],
    [11, 8, 0, 3],
    [15, 12, 4, 7],
    [10, 9, 1, 2],
    [14, 13, 5, 6],
];

fn cube_edges(offset: NodeId) -> impl Iterator<Item = Edge> {
    CUBE_EDGES.iter().map(move |&(a, b)| Edge::new(a + offset, b + offset))
}

fn cube_faces(offset: NodeId) -> impl Iterator<Item = Vec<NodeId>> {
    CUBE_FACES.iter().map(move |face| face.iter().map(|&id| id + offset).collect())
}

/// Rectangular prism with side lengths `lens` along x, y, z
///
/// 8 nodes at `±lens/2` with `w = 0`, 12 edges and 6 quad faces. Negative
/// lengths mirror the prism.
pub fn make_box(
    lens: [f32; 3],
    position: Vec5,
    orientation: Orientation,
    rotation_speed: Orientation,
) -> Result<Shape, ShapeError> {
    let [lx, ly, lz] = lens;
    let nodes = CUBE_CORNERS
        .iter()
        .map(|c| Vec5::direction(c[0] * lx / 2.0, c[1] * ly / 2.0, c[2] * lz / 2.0, 0.0))
        .collect();

    let mut mesh = Mesh::new(nodes, cube_edges(0).collect(), cube_faces(0).collect())?;
    mesh.orient_normals_outward();

    log::debug!("Built box {:?}", lens);
    Ok(Shape::new(mesh, position, orientation, rotation_speed))
}

/// Cube with equal sides
pub fn make_cube(
    side_len: f32,
    position: Vec5,
    orientation: Orientation,
    rotation_speed: Orientation,
) -> Result<Shape, ShapeError> {
    make_box([side_len; 3], position, orientation, rotation_speed)
}

/// Pyramid over a rectangular base
///
/// The base sits in the `y = 0` plane spanning `±lens[0]/2` by `±lens[2]/2`;
/// the apex is at `y = lens[1]/2`. One quad and four triangles.
pub fn make_rectangular_pyramid(
    lens: [f32; 3],
    position: Vec5,
    orientation: Orientation,
    rotation_speed: Orientation,
) -> Result<Shape, ShapeError> {
    let mesh = pyramid_mesh(lens)?;
    Ok(Shape::new(mesh, position, orientation, rotation_speed))
}

fn pyramid_mesh(lens: [f32; 3]) -> Result<Mesh, ShapeError> {
    let [lx, ly, lz] = lens;
    let nodes = vec![
        Vec5::direction(-lx / 2.0, 0.0, -lz / 2.0, 0.0),
        Vec5::direction(lx / 2.0, 0.0, -lz / 2.0, 0.0),
        Vec5::direction(lx / 2.0, 0.0, lz / 2.0, 0.0),
        Vec5::direction(-lx / 2.0, 0.0, lz / 2.0, 0.0),
        Vec5::direction(0.0, ly / 2.0, 0.0, 0.0),
    ];

    let edges = vec![
        Edge::new(0, 1),
        Edge::new(1, 2),
        Edge::new(2, 3),
        Edge::new(3, 0),
        Edge::new(0, 4),
        Edge::new(1, 4),
        Edge::new(2, 4),
        Edge::new(3, 4),
    ];

    let faces = vec![
        vec![0, 1, 2, 3],
        vec![0, 1, 4],
        vec![1, 2, 4],
        vec![2, 3, 4],
        vec![3, 0, 4],
    ];

    let mut mesh = Mesh::new(nodes, edges, faces)?;
    mesh.orient_normals_outward();
    Ok(mesh)
}

/// A box with a pyramid roof
///
/// The roof is 1.2 times as wide and deep as the box and a third as tall.
/// Its nodes follow the box's 8 nodes (ids 8..13) and are raised by
/// `lens[1]/2` so the roof sits on the box's top face.
pub fn make_house(
    lens: [f32; 3],
    position: Vec5,
    orientation: Orientation,
    rotation_speed: Orientation,
) -> Result<Shape, ShapeError> {
    let mut house = make_box(lens, position, orientation, rotation_speed)?;

    let mut roof = pyramid_mesh([lens[0] * 1.2, lens[1] / 3.0, lens[2] * 1.2])?;
    roof.translate_nodes(Vec5::direction(0.0, lens[1] / 2.0, 0.0, 0.0));

    house.mesh.merge(roof);
    Ok(house)
}

/// Hyper-rectangle: two boxes offset along the fourth axis, joined at every corner
///
/// Nodes 0..8 form the inner box (`w = -lens[3]/2`) and 8..16 the outer box
/// (`w = +lens[3]/2`). 32 edges and 24 quad faces: 6 per box and 12 bridges.
pub fn make_hyperrect(
    lens: [f32; 4],
    position: Vec5,
    orientation: Orientation,
    rotation_speed: Orientation,
) -> Result<Shape, ShapeError> {
    let [lx, ly, lz, lw] = lens;
    let nodes = [-1.0f32, 1.0]
        .iter()
        .flat_map(|&sw| {
            CUBE_CORNERS.iter().map(move |c| {
                Vec5::direction(c[0] * lx / 2.0, c[1] * ly / 2.0, c[2] * lz / 2.0, sw * lw / 2.0)
            })
        })
        .collect();

    let edges = cube_edges(0)
        .chain(cube_edges(8))
        .chain((0..8).map(|i| Edge::new(i, i + 8)))
        .collect();

    let faces = cube_faces(0)
        .chain(cube_faces(8))
        .chain(HYPERRECT_BRIDGE_FACES.iter().map(|f| f.to_vec()))
        .collect();

    let mut mesh = Mesh::new(nodes, edges, faces)?;
    mesh.orient_normals_outward();

    log::debug!("Built hyperrect {:?}", lens);
    Ok(Shape::new(mesh, position, orientation, rotation_speed))
}

/// Hypercube (tesseract) with equal sides
pub fn make_hypercube(
    side_len: f32,
    position: Vec5,
    orientation: Orientation,
    rotation_speed: Orientation,
) -> Result<Shape, ShapeError> {
    make_hyperrect([side_len; 4], position, orientation, rotation_speed)
}

/// 5-cell (4-simplex) inscribed in a hypersphere of `radius`
///
/// Every pair of the 5 nodes is joined by an edge and every triple spans a
/// triangular face: 10 edges, 10 faces.
pub fn make_five_cell(
    radius: f32,
    position: Vec5,
    orientation: Orientation,
    rotation_speed: Orientation,
) -> Result<Shape, ShapeError> {
    // Regular simplex centred on the origin with circumradius 4/sqrt(5), rescaled to `radius`
    let r5 = 5.0f32.sqrt();
    let k = radius * r5 / 4.0;
    let base_w = -1.0 / r5;
    let nodes = vec![
        Vec5::direction(k, k, k, k * base_w),
        Vec5::direction(k, -k, -k, k * base_w),
        Vec5::direction(-k, k, -k, k * base_w),
        Vec5::direction(-k, -k, k, k * base_w),
        Vec5::direction(0.0, 0.0, 0.0, k * (r5 - 1.0 / r5)),
    ];

    let mut edges = Vec::with_capacity(10);
    for a in 0..5 {
        for b in (a + 1)..5 {
            edges.push(Edge::new(a, b));
        }
    }

    let mut faces = Vec::with_capacity(10);
    for a in 0..5 {
        for b in (a + 1)..5 {
            for c in (b + 1)..5 {
                faces.push(vec![a, b, c]);
            }
        }
    }

    let mut mesh = Mesh::new(nodes, edges, faces)?;
    mesh.orient_normals_outward();
    Ok(Shape::new(mesh, position, orientation, rotation_speed))
}

/// Four-axis cross marking a point, edges only
///
/// 8 nodes at `±len` on x, y, z and w; 4 edges; no faces.
pub fn make_origin(
    len: f32,
    position: Vec5,
    orientation: Orientation,
    rotation_speed: Orientation,
) -> Result<Shape, ShapeError> {
    let mut nodes = Vec::with_capacity(8);
    for axis in [Vec5::X, Vec5::Y, Vec5::Z, Vec5::W] {
        nodes.push(-axis * len);
        nodes.push(axis * len);
    }
    let edges = (0..4).map(|i| Edge::new(2 * i, 2 * i + 1)).collect();

    let mesh = Mesh::new(nodes, edges, Vec::new())?;
    Ok(Shape::new(mesh, position, orientation, rotation_speed))
}

/// Large cube seen from inside
///
/// Normals face inward. The positioning pipeline keeps a skybox centred on
/// the camera and ignores its orientation.
pub fn make_skybox(len: f32, position: Vec5) -> Result<Shape, ShapeError> {
    let mut sky = make_cube(len, position, Orientation::ZERO, Orientation::ZERO)?;
    sky.mesh.flip_normals();
    Ok(sky)
}
