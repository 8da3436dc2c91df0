//! Node/edge/face mesh data
//!
//! A mesh owns its nodes exclusively. Node ids are dense and zero-based, so a
//! node id is simply an index into the node list. Faces are ordered lists of
//! 3 or 4 node ids; their order drives triangulation and vertex-buffer layout.
//! Edges are only used for wireframe drawing.

use serde::{Serialize, Deserialize};
use hyperscope_math::Vec5;

use crate::error::ShapeError;

/// Index of a node within its mesh
pub type NodeId = usize;

/// Unordered pair of node ids
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Edge {
    pub node0: NodeId,
    pub node1: NodeId,
}

impl Edge {
    #[inline]
    pub const fn new(node0: NodeId, node1: NodeId) -> Self {
        Self { node0, node1 }
    }

    /// The two ids, lower first
    #[inline]
    pub fn canonical(&self) -> (NodeId, NodeId) {
        if self.node0 <= self.node1 {
            (self.node0, self.node1)
        } else {
            (self.node1, self.node0)
        }
    }

    #[inline]
    fn offset(&self, by: usize) -> Self {
        Self::new(self.node0 + by, self.node1 + by)
    }
}

/// Mesh with per-face-vertex normals
///
/// `normals[f][i]` is the normal used for vertex `i` of face `f`, so the
/// normal table has exactly the shape of the face table.
#[derive(Clone, Debug)]
pub struct Mesh {
    nodes: Vec<Vec5>,
    edges: Vec<Edge>,
    faces: Vec<Vec<NodeId>>,
    normals: Vec<Vec<Vec5>>,
}

impl Mesh {
    /// Build a mesh, validating faces and ids, and compute face normals
    ///
    /// Node coordinates are authored about the local origin and stored as
    /// directions (`h = 0`); they are promoted to points at transform time.
    pub fn new(nodes: Vec<Vec5>, edges: Vec<Edge>, faces: Vec<Vec<NodeId>>) -> Result<Self, ShapeError> {
        let node_count = nodes.len();

        for (i, face) in faces.iter().enumerate() {
            check_face_len(i, face.len())?;
            if let Some(&id) = face.iter().find(|&&id| id >= node_count) {
                return Err(ShapeError::NodeOutOfRange { id, node_count });
            }
        }
        for edge in &edges {
            let (_, hi) = edge.canonical();
            if hi >= node_count {
                return Err(ShapeError::NodeOutOfRange { id: hi, node_count });
            }
        }

        let nodes: Vec<Vec5> = nodes.into_iter().map(|n| n.with_h(0.0)).collect();
        let normals = compute_normals(&nodes, &faces);

        Ok(Self { nodes, edges, faces, normals })
    }

    /// Get the nodes, indexed by node id
    #[inline]
    pub fn nodes(&self) -> &[Vec5] {
        &self.nodes
    }

    /// Get a node's local position
    ///
    /// Panics if the id is not in this mesh.
    #[inline]
    pub fn node(&self, id: NodeId) -> Vec5 {
        self.nodes[id]
    }

    #[inline]
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    /// Vertex-id lists for each face
    #[inline]
    pub fn faces(&self) -> &[Vec<NodeId>] {
        &self.faces
    }

    /// Normals, parallel to [`Mesh::faces`]
    #[inline]
    pub fn normals(&self) -> &[Vec<Vec5>] {
        &self.normals
    }

    #[inline]
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    #[inline]
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    #[inline]
    pub fn face_count(&self) -> usize {
        self.faces.len()
    }

    /// Number of vertex-buffer slots the faces use (one per face-vertex occurrence)
    ///
    /// A box has 6 faces x 4 vertices = 24.
    pub fn face_vertex_count(&self) -> usize {
        self.faces.iter().map(Vec::len).sum()
    }

    /// Flip every normal that points toward the centroid of the nodes
    ///
    /// Correct for convex shapes built around their local origin.
    pub fn orient_normals_outward(&mut self) {
        let centroid = centroid(self.nodes.iter().copied());
        for (face, normals) in self.faces.iter().zip(self.normals.iter_mut()) {
            let face_center = centroid_of(&self.nodes, face);
            let outward = face_center - centroid;
            for n in normals.iter_mut() {
                if n.spatial_dot(outward) < 0.0 {
                    *n = -*n;
                }
            }
        }
    }

    /// Flip every normal that points away from `direction`
    pub fn orient_normals_towards(&mut self, direction: Vec5) {
        for n in self.normals.iter_mut().flatten() {
            if n.spatial_dot(direction) < 0.0 {
                *n = -*n;
            }
        }
    }

    /// Reverse every normal
    pub fn flip_normals(&mut self) {
        for n in self.normals.iter_mut().flatten() {
            *n = -*n;
        }
    }

    /// Move every node by the spatial part of `offset`
    pub fn translate_nodes(&mut self, offset: Vec5) {
        let offset = offset.with_h(0.0);
        for node in &mut self.nodes {
            *node += offset;
        }
    }

    /// Append another mesh, offsetting its ids by this mesh's node count
    ///
    /// This is the only way two meshes combine into one.
    pub fn merge(&mut self, other: Mesh) {
        let offset = self.nodes.len();

        self.nodes.extend(other.nodes);
        self.edges.extend(other.edges.iter().map(|e| e.offset(offset)));
        self.faces.extend(
            other.faces
                .into_iter()
                .map(|face| face.into_iter().map(|id| id + offset).collect()),
        );
        self.normals.extend(other.normals);
    }

    /// Triangle indices into this mesh's face-vertex stream
    pub fn triangulate(&self) -> Vec<u32> {
        self.triangulate_from(0).0
    }

    /// Triangle indices starting at `offset`, plus the offset for the next shape
    ///
    /// Indices count face-vertex occurrences, not node ids: a node shared by
    /// three faces takes three slots.
    pub fn triangulate_from(&self, offset: u32) -> (Vec<u32>, u32) {
        let mut indices = Vec::with_capacity(self.faces.len() * 6);
        let mut current = offset;
        for face in &self.faces {
            push_fan(&mut indices, current, face.len());
            current += face.len() as u32;
        }
        (indices, current)
    }
}

/// Triangulate a raw face list
///
/// Triangles fan from each face's first vertex: a quad `(v0, v1, v2, v3)`
/// becomes `(v0, v1, v2)` and `(v0, v2, v3)`. Faces with any other count than
/// 3 or 4 are rejected.
pub fn triangulate_faces(faces: &[Vec<NodeId>]) -> Result<Vec<u32>, ShapeError> {
    let mut indices = Vec::new();
    let mut current = 0u32;
    for (i, face) in faces.iter().enumerate() {
        check_face_len(i, face.len())?;
        push_fan(&mut indices, current, face.len());
        current += face.len() as u32;
    }
    Ok(indices)
}

fn check_face_len(face: usize, len: usize) -> Result<(), ShapeError> {
    match len {
        3 | 4 => Ok(()),
        _ => Err(ShapeError::InvalidFace { face, len }),
    }
}

fn push_fan(out: &mut Vec<u32>, start: u32, len: usize) {
    out.extend_from_slice(&[start, start + 1, start + 2]);
    if len == 4 {
        out.extend_from_slice(&[start, start + 2, start + 3]);
    }
}

fn centroid(points: impl Iterator<Item = Vec5>) -> Vec5 {
    let mut sum = Vec5::ZERO;
    let mut count = 0usize;
    for p in points {
        sum += p;
        count += 1;
    }
    if count == 0 {
        Vec5::ZERO
    } else {
        sum / count as f32
    }
}

fn centroid_of(nodes: &[Vec5], face: &[NodeId]) -> Vec5 {
    centroid(face.iter().map(|&id| nodes[id]))
}

/// One normal per face vertex, from the plane of the face's first three vertices
///
/// Only the xyz part of the face spans the cross product. Faces that are
/// degenerate in xyz (bridge faces of a 4D shape that extend along w) get a
/// zero normal.
fn compute_normals(nodes: &[Vec5], faces: &[Vec<NodeId>]) -> Vec<Vec<Vec5>> {
    let mut degenerate = 0usize;
    let normals = faces
        .iter()
        .map(|face| {
            let p0 = nodes[face[0]];
            let n = (nodes[face[1]] - p0).cross3(nodes[face[2]] - p0).normalized();
            if n == Vec5::ZERO {
                degenerate += 1;
            }
            vec![n; face.len()]
        })
        .collect();

    if degenerate > 0 {
        log::debug!("{} of {} faces have no xyz normal", degenerate, faces.len());
    }
    normals
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square() -> Mesh {
        Mesh::new(
            vec![
                Vec5::direction(0.0, 0.0, 0.0, 0.0),
                Vec5::direction(1.0, 0.0, 0.0, 0.0),
                Vec5::direction(1.0, 1.0, 0.0, 0.0),
                Vec5::direction(0.0, 1.0, 0.0, 0.0),
            ],
            vec![Edge::new(0, 1), Edge::new(1, 2), Edge::new(2, 3), Edge::new(3, 0)],
            vec![vec![0, 1, 2, 3]],
        )
        .unwrap()
    }

    #[test]
    fn test_quad_fans_from_first_vertex() {
        assert_eq!(square().triangulate(), vec![0, 1, 2, 0, 2, 3]);
    }

    #[test]
    fn test_triangulate_uses_running_offsets() {
        let faces = vec![vec![5, 6, 7], vec![0, 1, 2, 3], vec![2, 3, 4]];
        let indices = triangulate_faces(&faces).unwrap();
        assert_eq!(indices, vec![0, 1, 2, 3, 4, 5, 3, 5, 6, 7, 8, 9]);
    }

    #[test]
    fn test_triangulate_from_offset() {
        let (indices, next) = square().triangulate_from(10);
        assert_eq!(indices, vec![10, 11, 12, 10, 12, 13]);
        assert_eq!(next, 14);
    }

    #[test]
    fn test_bad_face_lengths_rejected() {
        let nodes = vec![Vec5::ZERO; 5];
        let err = Mesh::new(nodes.clone(), vec![], vec![vec![0, 1]]).unwrap_err();
        assert_eq!(err, ShapeError::InvalidFace { face: 0, len: 2 });

        let err = Mesh::new(nodes, vec![], vec![vec![0, 1, 2], vec![0, 1, 2, 3, 4]]).unwrap_err();
        assert_eq!(err, ShapeError::InvalidFace { face: 1, len: 5 });

        assert!(triangulate_faces(&[vec![0, 1, 2, 3, 4]]).is_err());
    }

    #[test]
    fn test_out_of_range_ids_rejected() {
        let nodes = vec![Vec5::ZERO; 3];
        let err = Mesh::new(nodes.clone(), vec![], vec![vec![0, 1, 3]]).unwrap_err();
        assert_eq!(err, ShapeError::NodeOutOfRange { id: 3, node_count: 3 });

        let err = Mesh::new(nodes, vec![Edge::new(7, 0)], vec![]).unwrap_err();
        assert_eq!(err, ShapeError::NodeOutOfRange { id: 7, node_count: 3 });
    }

    #[test]
    fn test_normals_parallel_to_faces() {
        let mesh = square();
        assert_eq!(mesh.normals().len(), mesh.faces().len());
        assert_eq!(mesh.normals()[0].len(), 4);
        for n in &mesh.normals()[0] {
            assert_eq!(*n, Vec5::Z);
        }
    }

    #[test]
    fn test_orient_normals_towards() {
        let mut mesh = square();
        mesh.orient_normals_towards(-Vec5::Z);
        assert_eq!(mesh.normals()[0][0], -Vec5::Z);
    }

    #[test]
    fn test_nodes_stored_as_directions() {
        let mesh = Mesh::new(vec![Vec5::point(1.0, 2.0, 3.0, 4.0)], vec![], vec![]).unwrap();
        assert_eq!(mesh.node(0).h, 0.0);
    }

    #[test]
    fn test_merge_offsets_ids() {
        let mut a = square();
        let b = square();
        a.merge(b);

        assert_eq!(a.node_count(), 8);
        assert_eq!(a.edge_count(), 8);
        assert_eq!(a.faces()[1], vec![4, 5, 6, 7]);
        assert_eq!(a.edges()[4], Edge::new(4, 5));
        assert_eq!(a.normals().len(), 2);
        assert_eq!(a.face_vertex_count(), 8);
    }

    #[test]
    fn test_translate_nodes() {
        let mut mesh = square();
        mesh.translate_nodes(Vec5::point(0.0, 2.0, 0.0, 0.0));
        assert_eq!(mesh.node(2), Vec5::direction(1.0, 3.0, 0.0, 0.0));
    }

    #[test]
    fn test_edge_canonical() {
        assert_eq!(Edge::new(3, 1).canonical(), (1, 3));
    }
}
