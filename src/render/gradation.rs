use crate::foundation::color::Color;
use crate::foundation::core::FrameIndex;
use crate::foundation::error::{PixelatorError, PixelatorResult};
use crate::render::frame::FrameBuffer;
use serde::{Deserialize, Serialize};

/// Transition algorithm used between adjacent theme bands.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GradationKind {
    /// Symmetric dithered run-length bands.
    Line,
    /// Animated converging stripes.
    #[default]
    Field,
}

/// Which theme colors take part in each band boundary.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ColorMode {
    /// `numColors = 0`: the two boundary colors.
    #[default]
    Adjacent,
    /// `numColors = 2`: the theme collapses to its first and last color.
    Endpoints,
    /// `numColors = 4`: the boundary colors plus one neighbor on each side.
    Neighbors,
}

impl TryFrom<u8> for ColorMode {
    type Error = PixelatorError;

    fn try_from(n: u8) -> Result<Self, Self::Error> {
        match n {
            0 => Ok(Self::Adjacent),
            2 => Ok(Self::Endpoints),
            4 => Ok(Self::Neighbors),
            other => Err(PixelatorError::validation(format!(
                "unsupported numColors {other} (expected 0, 2 or 4)"
            ))),
        }
    }
}

/// Gradation parameters as written in scene files.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GradationDef {
    #[serde(rename = "type", default)]
    pub kind: GradationKind,
    pub magnitude: u32,
    #[serde(default)]
    pub num_colors: u8,
    #[serde(default)]
    pub stagger: f64,
}

/// Colors for one band boundary.
///
/// The first half of a transition paints `upper` with `upper_accent` stripes; the second half
/// paints `lower` with `lower_accent` stripes. Line transitions only use `upper` and `lower`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TransitionColors {
    pub upper: Color,
    pub upper_accent: Color,
    pub lower: Color,
    pub lower_accent: Color,
}

impl TransitionColors {
    /// Plain two-color boundary.
    pub fn pair(upper: Color, lower: Color) -> Self {
        Self {
            upper,
            upper_accent: lower,
            lower,
            lower_accent: upper,
        }
    }

    /// Colors for the boundary between `colors[i]` and `colors[i + 1]`.
    pub fn for_boundary(colors: &[Color], i: usize, mode: ColorMode) -> Self {
        let upper = colors[i];
        let lower = colors[i + 1];
        match mode {
            ColorMode::Adjacent | ColorMode::Endpoints => Self::pair(upper, lower),
            ColorMode::Neighbors => Self {
                upper,
                upper_accent: colors.get(i + 2).copied().unwrap_or(lower),
                lower,
                lower_accent: i.checked_sub(1).map_or(upper, |p| colors[p]),
            },
        }
    }
}

/// Largest accepted gradation magnitude.
pub const MAX_MAGNITUDE: u32 = 4096;

/// A configured transition.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Gradation {
    pub kind: GradationKind,
    pub magnitude: u32,
    pub color_mode: ColorMode,
    pub stagger: f64,
}

impl Gradation {
    /// Build a validated gradation from its scene definition.
    pub fn from_def(def: &GradationDef) -> PixelatorResult<Self> {
        if def.magnitude == 0 {
            return Err(PixelatorError::validation("gradation magnitude must be >= 1"));
        }
        if def.magnitude > MAX_MAGNITUDE {
            return Err(PixelatorError::validation(format!(
                "gradation magnitude {} exceeds {MAX_MAGNITUDE}",
                def.magnitude
            )));
        }
        if !def.stagger.is_finite() || def.stagger < 0.0 {
            return Err(PixelatorError::validation(
                "gradation stagger must be a finite non-negative number",
            ));
        }
        Ok(Self {
            kind: def.kind,
            magnitude: def.magnitude,
            color_mode: ColorMode::try_from(def.num_colors)?,
            stagger: def.stagger,
        })
    }

    /// Rows reserved for transitions in a sky with `segments` half-boundaries.
    ///
    /// Saturates at `u32::MAX`.
    pub fn transition_height(&self, segments: u32) -> u32 {
        let m = u64::from(self.magnitude);
        let rows = match self.kind {
            // 2 * T(m + 1), independent of the segment count.
            GradationKind::Line => (m + 1).saturating_mul(m + 2),
            GradationKind::Field => u64::from(segments) * m,
        };
        u32::try_from(rows).unwrap_or(u32::MAX)
    }

    /// Draw one transition starting at `row`; returns the row after the last one drawn.
    pub fn draw(
        &self,
        t: FrameIndex,
        row: i64,
        speed: f64,
        colors: &TransitionColors,
        buf: &mut FrameBuffer,
    ) -> i64 {
        match self.kind {
            GradationKind::Line => draw_line_transition(self.magnitude, row, colors, buf),
            GradationKind::Field => {
                let phase = StripePhase::new(t, speed, self.stagger);
                draw_field_transition(self.magnitude, row, phase, colors, buf)
            }
        }
    }
}

// Both transitions stop walking once they pass the bottom of the buffer.

fn draw_line_transition(
    magnitude: u32,
    start: i64,
    colors: &TransitionColors,
    buf: &mut FrameBuffer,
) -> i64 {
    let height = i64::from(buf.height());
    let runs = (1..=magnitude).rev().chain(1..magnitude);
    let mut row = start;
    let mut lower = true;
    for run in runs {
        if row >= height {
            break;
        }
        let end = row + i64::from(run);
        let color = if lower { colors.lower } else { colors.upper };
        for y in row.max(0)..end.min(height) {
            buf.fill_row_clipped(y, color);
        }
        row = end;
        lower = !lower;
    }
    let m = i64::from(magnitude);
    start.saturating_add(m * m)
}

/// Time-derived stripe offset shared by every row of a field transition.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct StripePhase {
    movement: i64,
}

impl StripePhase {
    pub(crate) fn new(t: FrameIndex, speed: f64, stagger: f64) -> Self {
        // A still sky with a stagger keeps a fixed shifted pattern instead of phase 0.
        let (time, speed) = if speed == 0.0 && stagger > 0.0 {
            (0.0, 1.0)
        } else {
            (t.as_f64(), speed)
        };
        Self {
            movement: ((time + stagger) * speed).floor() as i64,
        }
    }

    fn start(self, frequency: u32) -> i64 {
        self.movement.rem_euclid(i64::from(frequency))
    }
}

fn draw_field_transition(
    magnitude: u32,
    start: i64,
    phase: StripePhase,
    colors: &TransitionColors,
    buf: &mut FrameBuffer,
) -> i64 {
    let height = i64::from(buf.height());
    let upper = (1..=magnitude).rev().map(|g| (g, colors.upper, colors.upper_accent));
    let lower = (1..magnitude).map(|g| (g, colors.lower, colors.lower_accent));
    for (row, (g, primary, accent)) in (start..height).zip(upper.chain(lower)) {
        fill_stripe_row(buf, row, phase, primary, accent, g);
    }
    start.saturating_add(2 * i64::from(magnitude) - 1)
}

pub(crate) fn fill_stripe_row(
    buf: &mut FrameBuffer,
    y: i64,
    phase: StripePhase,
    primary: Color,
    accent: Color,
    frequency: u32,
) {
    if y < 0 || y >= i64::from(buf.height()) {
        return;
    }
    let hit = i64::from(frequency) - 1;
    // `None` marks the column right after an accent.
    let mut counter = Some(phase.start(frequency));
    for x in 0..i64::from(buf.width()) {
        let color = match counter {
            Some(n) if n >= hit => {
                counter = None;
                accent
            }
            Some(n) => {
                counter = Some(n + 1);
                primary
            }
            None => {
                counter = Some(0);
                primary
            }
        };
        buf.put(x, y, color);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/gradation.rs"]
mod tests;
