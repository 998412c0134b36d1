use crate::foundation::error::{PixelatorError, PixelatorResult};

pub use kurbo::Point;

/// Absolute 0-based frame index in animation time.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct FrameIndex(pub u64);

impl FrameIndex {
    /// Frame time as a float for phase math.
    pub fn as_f64(self) -> f64 {
        self.0 as f64
    }

    /// The index immediately after this one.
    pub fn next(self) -> Self {
        Self(self.0.saturating_add(1))
    }
}

/// Output canvas dimensions in pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Canvas {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl Canvas {
    /// Create validated canvas dimensions (both non-zero).
    pub fn new(width: u32, height: u32) -> PixelatorResult<Self> {
        if width == 0 || height == 0 {
            return Err(PixelatorError::validation(format!(
                "canvas must be non-empty, got {width}x{height}"
            )));
        }
        Ok(Self { width, height })
    }

    /// Number of pixels covered by the canvas.
    pub fn area(self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Return `true` when `(x, y)` addresses a pixel inside the canvas.
    pub fn contains(self, x: i64, y: i64) -> bool {
        x >= 0 && y >= 0 && x < i64::from(self.width) && y < i64::from(self.height)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
