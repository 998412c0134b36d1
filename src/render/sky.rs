use crate::effects::stars::{StarField, StarsConfig};
use crate::foundation::color::{Color, RgbVector};
use crate::foundation::core::{FrameIndex, Point};
use crate::foundation::error::{PixelatorError, PixelatorResult};
use crate::render::frame::FrameBuffer;
use crate::render::gradation::{ColorMode, Gradation, TransitionColors};
use crate::scene::model::{BackgroundDef, Mountain, Sun};
use crate::scene::theme::{Theme, ThemeRegistry};

/// Resolved sky descriptor: theme and gradation are ready to draw.
#[derive(Clone, Debug, PartialEq)]
pub struct Background {
    pub name: String,
    pub height: u32,
    pub speed: f64,
    pub theme: Theme,
    pub gradation: Gradation,
    pub sun: Option<Sun>,
    pub stars: Option<StarsConfig>,
}

impl Background {
    pub fn resolve(def: &BackgroundDef, themes: &ThemeRegistry) -> PixelatorResult<Self> {
        if !def.speed.is_finite() || def.speed < 0.0 {
            return Err(PixelatorError::validation(format!(
                "background '{}' speed must be a finite non-negative number",
                def.name
            )));
        }
        if let Some(sun) = &def.sun {
            sun.validate()?;
        }
        Ok(Self {
            name: def.name.clone(),
            height: def.height,
            speed: def.speed,
            theme: def.theme.resolve(themes)?,
            gradation: Gradation::from_def(&def.gradation)?,
            sun: def.sun.clone(),
            stars: def.stars.clone(),
        })
    }
}

const RIDGE_BRIGHT: f64 = 1.3;
const RIDGE_DIM: f64 = 1.15;
// Black skies still get a visible ridge.
const RIDGE_MIN_MAGNITUDE: f64 = 48.0;

fn ridge_highlight(base: Color, factor: f64) -> Color {
    let magnitude = base.magnitude().max(RIDGE_MIN_MAGNITUDE) * factor;
    base.magnitude_vector(magnitude).unwrap_or_else(|_| {
        let grey = RgbVector::new(1.0, 1.0, 1.0);
        Color::from_vector(grey.scale(magnitude / grey.magnitude()), base.a)
    })
}

impl FrameBuffer {
    /// Paint the banded sky with animated transitions between bands.
    pub fn draw_sky(&mut self, t: FrameIndex, sky: &Background) -> PixelatorResult<()> {
        if sky.height > self.height() {
            return Err(PixelatorError::SkyTooTall {
                sky: sky.height,
                frame: self.height(),
            });
        }

        let colors: Vec<Color> = match sky.gradation.color_mode {
            ColorMode::Endpoints => vec![sky.theme.first(), sky.theme.last()],
            ColorMode::Adjacent | ColorMode::Neighbors => sky.theme.colors().to_vec(),
        };
        let n = colors.len();
        let segments = u32::try_from(2 * n.saturating_sub(1)).unwrap_or(u32::MAX);
        let gradient_rows = i64::from(sky.gradation.transition_height(segments));
        let bar = ((i64::from(sky.height) - gradient_rows) / n as i64).max(0);

        let mut y = 0i64;
        for (i, &color) in colors.iter().enumerate() {
            for _ in 0..bar {
                self.fill_row_clipped(y, color);
                y += 1;
            }
            if i + 1 < n {
                let boundary =
                    TransitionColors::for_boundary(&colors, i, sky.gradation.color_mode);
                y = sky.gradation.draw(t, y, sky.speed, &boundary, self);
            }
        }
        tracing::trace!(sky = %sky.name, bar, rows = y, "sky drawn");
        Ok(())
    }

    pub fn draw_sun(&mut self, sun: &Sun) {
        self.draw_circle_filled(
            sun.center.x.round() as i64,
            sun.center.y.round() as i64,
            sun.radius,
            sun.color,
        );
    }

    /// Fill a mountain and stroke a lit double ridge along both upper edges.
    ///
    /// The ridge colors are brightened from the background at the apex, sampled before the fill.
    pub fn draw_mountain(&mut self, mountain: &Mountain) {
        let mut pts = mountain.points;
        pts.sort_by(|a, b| a.y.total_cmp(&b.y));
        let apex = pts[0];
        let (left, right) = if pts[1].x <= pts[2].x {
            (pts[1], pts[2])
        } else {
            (pts[2], pts[1])
        };

        let px = |p: Point| (p.x.round() as i64, p.y.round() as i64);
        let (ax, ay) = px(apex);
        let sampled = self.get(ax, ay).unwrap_or(mountain.color);
        let bright = ridge_highlight(sampled, RIDGE_BRIGHT).with_alpha(mountain.color.a);
        let dim = ridge_highlight(sampled, RIDGE_DIM).with_alpha(mountain.color.a);

        let [a, b, c] = mountain.points;
        self.fill_triangle(a, b, c, mountain.color);

        for foot in [left, right] {
            let (fx, fy) = px(foot);
            self.draw_line(ax, ay, fx, fy, bright);
            self.draw_line(ax, ay.saturating_add(1), fx, fy.saturating_add(1), dim);
        }
    }

    /// Advance the star field by one frame and draw it.
    pub fn draw_stars(&mut self, stars: &mut StarField) {
        stars.tick(self);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/sky.rs"]
mod tests;
