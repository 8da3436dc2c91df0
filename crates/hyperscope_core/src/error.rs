//! Shape construction errors
//!
//! Every generator fails before returning a partially built shape: an invalid
//! face or grid value has no recovery path further down the pipeline.

use std::fmt;

/// Error type for mesh and generator construction
#[derive(Debug, Clone, PartialEq)]
pub enum ShapeError {
    /// A face with a vertex count other than 3 or 4
    InvalidFace {
        /// Index of the face in the face list
        face: usize,
        /// Number of vertices the face had
        len: usize,
    },
    /// An edge or face references a node id the mesh doesn't have
    NodeOutOfRange {
        id: usize,
        node_count: usize,
    },
    /// A height/spissitude grid whose dimensions disagree with the resolution
    GridDimensions {
        /// Name of the offending grid
        grid: &'static str,
        expected: usize,
        found: usize,
    },
    /// A NaN or infinite entry in an input grid
    MissingValue {
        grid: &'static str,
        /// Index path of the value, outermost first
        index: Vec<usize>,
    },
}

impl fmt::Display for ShapeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShapeError::InvalidFace { face, len } => {
                write!(f, "Face {} has {} vertices; faces must have 3 or 4", face, len)
            }
            ShapeError::NodeOutOfRange { id, node_count } => {
                write!(f, "Node id {} out of range for a mesh with {} nodes", id, node_count)
            }
            ShapeError::GridDimensions { grid, expected, found } => {
                write!(f, "Grid '{}' has {} entries along an axis, expected {}", grid, found, expected)
            }
            ShapeError::MissingValue { grid, index } => {
                write!(f, "Missing value in grid '{}' at {:?}", grid, index)
            }
        }
    }
}

impl std::error::Error for ShapeError {}
