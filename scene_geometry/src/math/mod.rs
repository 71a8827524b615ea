//! Math layer: vectors, matrices and the geometry helpers built on them.

mod matrix;
mod vector;
pub mod utils;

pub use matrix::{Matrix33d, Matrix33f, Matrix44d, Matrix44f};
pub use vector::{Vector2d, Vector2f, Vector3d, Vector3f, Vector4d, Vector4f};
