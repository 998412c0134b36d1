use crate::foundation::color::Color;
use crate::foundation::core::FrameIndex;
use crate::foundation::error::{PixelatorError, PixelatorResult};
use crate::render::frame::FrameBuffer;
use serde::{Deserialize, Serialize};

fn default_delay() -> u32 {
    1
}

fn default_opacity() -> f64 {
    1.0
}

/// Reflection parameters as written in scene files.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReflectionConfig {
    /// Horizon row; rows above it are mirrored below it.
    pub top: u32,
    /// Rows per ripple stripe.
    pub ripple_depth: u32,
    /// Animation stages per side; 1 disables the ripple.
    pub ripple_magnitude: u32,
    /// Pixels shifted per stage.
    #[serde(default)]
    pub ripple_speed: u32,
    /// Frames per stage.
    #[serde(default = "default_delay")]
    pub ripple_delay: u32,
    #[serde(default = "default_opacity")]
    pub opacity: f64,
}

/// Water reflection with a ping-pong ripple.
///
/// The ripple walks an index through `2 * (magnitude - 1) + 1` horizontal offsets centered on
/// zero, reversing at either end.
#[derive(Clone, Debug, PartialEq)]
pub struct Reflection {
    top: i64,
    ripple_depth: i64,
    ripple_speed: i64,
    ripple_delay: u64,
    opacity: f64,
    animation_length: usize,
    index: usize,
    direction: i64,
}

impl Reflection {
    pub fn new(cfg: &ReflectionConfig) -> PixelatorResult<Self> {
        if cfg.ripple_depth == 0 {
            return Err(PixelatorError::validation("reflection rippleDepth must be >= 1"));
        }
        if cfg.ripple_magnitude == 0 {
            return Err(PixelatorError::validation(
                "reflection rippleMagnitude must be >= 1",
            ));
        }
        if cfg.ripple_delay == 0 {
            return Err(PixelatorError::validation("reflection rippleDelay must be >= 1"));
        }
        if !(0.0..=1.0).contains(&cfg.opacity) {
            return Err(PixelatorError::validation(format!(
                "reflection opacity must be in [0, 1], got {}",
                cfg.opacity
            )));
        }

        let animation_length = 2 * (cfg.ripple_magnitude as usize - 1) + 1;
        let index = (cfg.ripple_magnitude as usize).div_ceil(2).min(animation_length - 1);
        Ok(Self {
            top: i64::from(cfg.top),
            ripple_depth: i64::from(cfg.ripple_depth),
            ripple_speed: i64::from(cfg.ripple_speed),
            ripple_delay: u64::from(cfg.ripple_delay),
            opacity: cfg.opacity,
            animation_length,
            index,
            direction: 1,
        })
    }

    pub fn animation_length(&self) -> usize {
        self.animation_length
    }

    pub fn animation_index(&self) -> usize {
        self.index
    }

    /// `+1` while the index climbs, `-1` while it falls.
    pub fn direction(&self) -> i64 {
        self.direction
    }

    /// Horizontal offset (in stages) for the current index.
    pub fn offset(&self) -> i64 {
        self.index as i64 - (self.animation_length as i64 - 1) / 2
    }

    /// Step the ripple on the last frame of each delay window.
    pub fn step(&mut self, t: FrameIndex) {
        if t.0 % self.ripple_delay != self.ripple_delay - 1 {
            return;
        }
        let last = self.animation_length - 1;
        if self.direction > 0 {
            if self.index >= last {
                self.direction = -1;
                self.index = self.index.saturating_sub(1);
            } else {
                self.index += 1;
            }
        } else if self.index == 0 {
            self.direction = 1;
            self.index = last.min(1);
        } else {
            self.index -= 1;
        }
    }

    fn fade(&self, c: Color) -> Color {
        let ch = |v: u8| (f64::from(v) * self.opacity).ceil().clamp(0.0, 255.0) as u8;
        Color::rgba(ch(c.r), ch(c.g), ch(c.b), c.a)
    }

    /// Advance the ripple for frame `t`, then mirror rows above the horizon below it.
    pub fn apply(&mut self, t: FrameIndex, buf: &mut FrameBuffer) {
        self.step(t);

        let width = i64::from(buf.width());
        let height = i64::from(buf.height());
        let shift = self.offset() * self.ripple_speed;
        let mut depth_direction = -self.direction;

        let mut src_y = self.top - 1;
        let mut dst_y = self.top + 1;
        while src_y >= 0 && dst_y < height {
            if dst_y % self.ripple_depth == 0 {
                depth_direction = -depth_direction;
            }
            for x in 0..width {
                let src_x = (x + shift * depth_direction).clamp(0, width - 1);
                if let Some(c) = buf.get(src_x, src_y) {
                    buf.put(x, dst_y, self.fade(c));
                }
            }
            src_y -= 1;
            dst_y += 1;
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/effects/reflection.rs"]
mod tests;
