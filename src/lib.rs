//! Quaternion rotations for 3D graphics and geometry, with conversion to and
//! from axis-angle form and rotation matrices.

#[macro_use]
mod macros;

pub mod matrix;
pub mod num;
pub mod quaternion;
pub mod vector;

pub use matrix::{Matrix3, Matrix4, rotation_matrix};
pub use num::Float;
pub use quaternion::{Quaternion, extract_quaternion, extract_quaternion_from_matrix3};
pub use vector::Vector3;
