//! Vertex and index buffers for an external renderer
//!
//! Each face vertex gets its own buffer slot, because normals are per face:
//! a box corner shared by three faces appears three times. Index lists from
//! consecutive shapes continue from a running offset so they can be
//! concatenated into one index buffer.

use bytemuck::{Pod, Zeroable};

use hyperscope_core::{Lighting, Scene, Shape};
use hyperscope_math::{mat5, Mat5, Orientation};

use crate::color::shade;
use crate::pipeline::{FrameOutput, VertexKey};
use crate::projection::project_with;

/// A renderable vertex
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    /// Clip position `[x, y, z, h]`
    pub position: [f32; 4],
    /// World-space normal (x, y, z, w)
    pub normal: [f32; 4],
    /// Shaded RGBA color
    pub color: [f32; 4],
}

/// Buffers for one shape
#[derive(Clone, Debug, Default)]
pub struct ShapeBuffers {
    pub shape: usize,
    pub vertices: Vec<Vertex>,
    /// Triangle indices into the concatenated vertex stream
    pub indices: Vec<u32>,
    /// Clip-space endpoints of every edge, for wireframe drawing
    pub lines: Vec<[[f32; 4]; 2]>,
}

impl ShapeBuffers {
    /// Build one shape's buffers from its positioned nodes
    ///
    /// Panics if `frame` is missing a node of this shape: every shape
    /// passed here must have gone through the positioning pipeline.
    pub fn build(
        id: usize,
        shape: &Shape,
        frame: &FrameOutput,
        projector: Mat5,
        lighting: &Lighting,
        is_skybox: bool,
        offset: u32,
    ) -> (Self, u32) {
        // Skyboxes are never rotated, so neither are their normals
        let rotation = if is_skybox {
            Orientation::ZERO.matrix()
        } else {
            shape.orientation.matrix()
        };

        let mesh = &shape.mesh;
        let mut vertices = Vec::with_capacity(mesh.face_vertex_count());
        for (face, normals) in mesh.faces().iter().zip(mesh.normals()) {
            for (&node, &normal) in face.iter().zip(normals) {
                let positioned = frame[&VertexKey::new(id, node)];
                let world_normal = mat5::transform(rotation, normal);
                vertices.push(Vertex {
                    position: project_with(projector, positioned.position),
                    normal: [world_normal.x, world_normal.y, world_normal.z, world_normal.w],
                    color: shade(positioned.color, world_normal, lighting),
                });
            }
        }

        let lines = mesh
            .edges()
            .iter()
            .map(|edge| {
                let a = frame[&VertexKey::new(id, edge.node0)].position;
                let b = frame[&VertexKey::new(id, edge.node1)].position;
                [project_with(projector, a), project_with(projector, b)]
            })
            .collect();

        let (indices, next) = mesh.triangulate_from(offset);
        (Self { shape: id, vertices, indices, lines }, next)
    }

    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    #[inline]
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }
}

/// Buffers for every shape in a scene, in shape id order
#[derive(Clone, Debug, Default)]
pub struct FrameBuffers {
    pub shapes: Vec<ShapeBuffers>,
}

impl FrameBuffers {
    /// Build buffers for all shapes of a scene from one frame's output
    pub fn build(scene: &Scene, frame: &FrameOutput) -> Self {
        let projector = scene.camera.projector();
        let mut offset = 0u32;
        let mut shapes = Vec::with_capacity(scene.shapes.len());

        for (&id, shape) in &scene.shapes {
            let is_skybox = scene.skybox == Some(id);
            let (buffers, next) =
                ShapeBuffers::build(id, shape, frame, projector, &scene.lighting, is_skybox, offset);
            offset = next;
            shapes.push(buffers);
        }

        Self { shapes }
    }

    /// Every shape's vertices, concatenated
    pub fn vertices(&self) -> Vec<Vertex> {
        self.shapes.iter().flat_map(|s| s.vertices.iter().copied()).collect()
    }

    /// Every shape's indices, concatenated
    pub fn indices(&self) -> Vec<u32> {
        self.shapes.iter().flat_map(|s| s.indices.iter().copied()).collect()
    }

    /// Raw bytes of the concatenated vertex buffer
    pub fn vertex_bytes(&self) -> Vec<u8> {
        bytemuck::cast_slice(&self.vertices()).to_vec()
    }

    pub fn vertex_count(&self) -> usize {
        self.shapes.iter().map(ShapeBuffers::vertex_count).sum()
    }

    pub fn triangle_count(&self) -> usize {
        self.shapes.iter().map(ShapeBuffers::triangle_count).sum()
    }

    pub fn line_count(&self) -> usize {
        self.shapes.iter().map(|s| s.lines.len()).sum()
    }
}
