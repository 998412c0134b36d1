use crate::foundation::color::Color;
use crate::foundation::error::{PixelatorError, PixelatorResult};
use crate::render::frame::FrameBuffer;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg64;
use serde::{Deserialize, Serialize};
use std::ops::RangeInclusive;

/// Frames a star waits (after its counter starts) before twinkling.
pub const TRIGGER_FRAMES: RangeInclusive<u32> = 6..=15;
/// Frames a twinkle lasts.
pub const TWINKLE_FRAMES: RangeInclusive<u32> = 3..=4;

fn default_color() -> Color {
    Color::WHITE
}

fn default_size() -> u32 {
    1
}

fn default_twinkle() -> f64 {
    96.0
}

/// Star field parameters as written in scene files.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StarsConfig {
    /// Stars per sky pixel, in `[0, 1]`.
    pub frequency: f64,
    #[serde(default = "default_color")]
    pub color: Color,
    /// Side of the square drawn per star, in pixels.
    #[serde(default = "default_size")]
    pub size: u32,
    /// RGB distance a twinkling star moves towards white.
    #[serde(default = "default_twinkle")]
    pub twinkle: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Star {
    pub x: i64,
    pub y: i64,
    pub size: u32,
    pub color: Color,
    pub twinkle: f64,
    pub trigger: u32,
    pub duration: u32,
    twinkling: bool,
    counter: u32,
}

impl Star {
    pub fn is_twinkling(&self) -> bool {
        self.twinkling
    }

    pub fn counter(&self) -> u32 {
        self.counter
    }

    /// Step the twinkle state machine one frame; returns the color to draw this frame.
    pub fn advance(&mut self) -> Color {
        self.counter += 1;
        if self.twinkling {
            if self.counter >= self.duration {
                self.twinkling = false;
                self.counter = 0;
            }
            self.color.brighten(self.twinkle)
        } else {
            if self.counter > self.trigger {
                self.twinkling = true;
                self.counter = 0;
            }
            self.color
        }
    }
}

/// Randomly placed twinkling stars, advanced once per frame.
#[derive(Clone, Debug, PartialEq)]
pub struct StarField {
    stars: Vec<Star>,
}

impl StarField {
    /// Scatter `floor(frequency * width * sky_height)` stars over the sky.
    pub fn generate<R: Rng>(
        cfg: &StarsConfig,
        width: u32,
        sky_height: u32,
        rng: &mut R,
    ) -> PixelatorResult<Self> {
        if !(0.0..=1.0).contains(&cfg.frequency) {
            return Err(PixelatorError::validation(format!(
                "star frequency must be in [0, 1], got {}",
                cfg.frequency
            )));
        }
        if cfg.size == 0 {
            return Err(PixelatorError::validation("star size must be >= 1"));
        }
        if !cfg.twinkle.is_finite() {
            return Err(PixelatorError::validation("star twinkle must be finite"));
        }

        let count = (cfg.frequency * f64::from(width) * f64::from(sky_height)).floor() as usize;
        let mut stars = Vec::with_capacity(count);
        for _ in 0..count {
            let trigger = rng.random_range(TRIGGER_FRAMES);
            stars.push(Star {
                x: rng.random_range(0..i64::from(width)),
                y: rng.random_range(0..i64::from(sky_height)),
                size: cfg.size,
                color: cfg.color,
                twinkle: cfg.twinkle,
                trigger,
                duration: rng.random_range(TWINKLE_FRAMES),
                twinkling: false,
                counter: rng.random_range(0..=trigger),
            });
        }
        Ok(Self { stars })
    }

    /// [`StarField::generate`] with a PCG generator seeded from `seed`.
    pub fn from_seed(
        cfg: &StarsConfig,
        width: u32,
        sky_height: u32,
        seed: u64,
    ) -> PixelatorResult<Self> {
        let mut rng = Pcg64::seed_from_u64(seed);
        Self::generate(cfg, width, sky_height, &mut rng)
    }

    pub fn stars(&self) -> &[Star] {
        &self.stars
    }

    pub fn len(&self) -> usize {
        self.stars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stars.is_empty()
    }

    /// Advance every star one frame and draw it.
    ///
    /// Must be called exactly once per frame, in frame order.
    pub fn tick(&mut self, buf: &mut FrameBuffer) {
        for star in &mut self.stars {
            let color = star.advance();
            buf.fill_rect(star.x, star.y, star.size, star.size, color);
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/effects/stars.rs"]
mod tests;
