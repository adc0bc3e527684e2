//! Brush algorithms
//!
//! Pixel rasterization used by the drawing tools.

mod line;

pub use line::{line_pixels, LineRasterizer};
