//! 4D Mathematics Library
//!
//! Homogeneous 5-component vectors and 5x5 matrices used to scale, rotate,
//! translate and project points in 4D space.
//!
//! ## Core Types
//!
//! - [`Vec5`] - 4D point or direction with a homogeneous `h` component
//! - [`Mat5`] - 5x5 row-major matrix, applied as `v' = M * v`
//! - [`Orientation`] - six plane-rotation angles
//! - [`RotationPlane`] - the six rotation planes of 4-space

mod vec5;
pub mod mat5;
pub mod rotation;

pub use vec5::{Vec5, add, scale};
pub use mat5::{Mat5, Projection};
pub use rotation::{Orientation, RotationPlane};
