//! Fundamental integer geometry types.

mod point;

pub use point::{Displacement, GridCoord};
