//! Rendering support for hyperscope
//!
//! This crate turns a [`Scene`](hyperscope_core::Scene) into data a 3D
//! renderer can draw. It makes no graphics API calls itself.
//!
//! ## Key Components
//!
//! - [`pipeline`] - Moves every shape into camera space and colors it by 4D depth
//! - [`color`] - The depth color signal and lighting
//! - [`buffers`] - Per-face-vertex vertex buffers and concatenated index lists
//! - [`projection`] - Perspective projection and the homogeneous divide

pub mod pipeline;
pub mod color;
pub mod buffers;
pub mod projection;

pub use pipeline::{
    VertexKey, PositionedVertex, FrameOutput, position_shape, model_view, process_shapes,
    process_scene,
};
pub use color::{find_color, shade, BASE_GRAY};
pub use buffers::{Vertex, ShapeBuffers, FrameBuffers};
pub use projection::{project, to_ndc};
