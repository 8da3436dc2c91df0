//! Core types for hyperscope
//!
//! This crate provides the shape model and everything that produces shapes:
//!
//! - [`Mesh`] - Nodes, edges, faces and per-face-vertex normals
//! - [`Shape`] - A mesh with position, scale, orientation and rotation speed
//! - [`Camera`] - 4D perspective camera
//! - [`generators`] - Box, pyramid, house, hyperrect, 5-cell, origin cross, skybox
//! - [`terrain`] - Heightmap terrain and the cube hypergrid
//! - [`ShapeTemplate`] / [`ShapeInstance`] - Serializable shape descriptions
//! - [`SceneTemplate`] - Loadable/saveable scene description
//! - [`Scene`] - Runtime scene passed to the positioning pipeline

mod error;
mod mesh;
mod shape;
mod camera;
mod lighting;
mod shapes;
mod scene;
pub mod generators;
pub mod terrain;

pub use error::ShapeError;
pub use mesh::{Mesh, Edge, NodeId, triangulate_faces};
pub use shape::{Shape, model_matrix_at};
pub use camera::Camera;
pub use lighting::Lighting;
pub use shapes::{ShapeTemplate, ShapeInstance};
pub use scene::{Scene, SceneTemplate, HypergridTemplate, SceneLoadError, SceneSaveError};

pub use generators::{
    make_box, make_cube, make_rectangular_pyramid, make_house, make_hyperrect,
    make_hypercube, make_five_cell, make_origin, make_skybox,
};
pub use terrain::{make_terrain, make_cube_hypergrid, value_from_grid, fractal_heightmap};

// Re-export commonly used types from hyperscope_math for convenience
pub use hyperscope_math::{Vec5, Mat5, Orientation, RotationPlane, Projection};
