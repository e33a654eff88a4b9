//! Basic 2D geometry: vectors and parametric lines.
mod line;
mod vector;

pub use line::Line2D;
pub use vector::{Vector2D, SNAP_TO_ZERO};
