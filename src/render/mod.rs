//! Software rasterizer: frame buffer, camera and culling.

/// Camera rectangle and edge clamping.
pub mod camera;
/// Visible cell ranges.
pub mod cull;
/// Pixel buffer and blits.
pub mod framebuffer;

pub use camera::{Camera, CameraController};
pub use cull::{visible_cells, CellRange};
pub use framebuffer::Renderer;
