//! Software rasterization into RGBA frame buffers.

/// Pixel grid and drawing primitives.
pub mod frame;
/// Band transition algorithms.
pub mod gradation;
/// Sky, sun, mountain and star drawing.
pub mod sky;
