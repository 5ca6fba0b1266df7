//! Bit-packed storage: flat vectors and fixed-shape matrix views over them.

mod matrix;
mod store;

pub use matrix::{BitMatrix, BitMatrix3D, BitSquareMatrix, BitSymmetricalMatrix};
pub use store::BitStore;
