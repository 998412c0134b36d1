use crate::foundation::color::Color;
use crate::foundation::core::{Canvas, Point};
use crate::foundation::error::{PixelatorError, PixelatorResult};
use std::ops::RangeInclusive;

/// A rendered frame as straight-alpha RGBA8 bytes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FrameRGBA {
    /// Frame width in pixels.
    pub width: u32,
    /// Frame height in pixels.
    pub height: u32,
    /// RGBA8 bytes, tightly packed, row-major.
    pub data: Vec<u8>,
}

/// Owned raster of [`Color`]s for one time step.
///
/// Addressed access ([`FrameBuffer::pixel`], [`FrameBuffer::set_pixel`],
/// [`FrameBuffer::fill_row`]) outside the buffer fails with [`PixelatorError::OutOfBounds`].
/// Shape rasterizers clip: the part of a shape outside the buffer is not drawn.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FrameBuffer {
    canvas: Canvas,
    pixels: Vec<Color>,
}

impl FrameBuffer {
    /// Allocate a fully transparent buffer.
    pub fn new(canvas: Canvas) -> Self {
        Self {
            canvas,
            pixels: vec![Color::TRANSPARENT; canvas.area()],
        }
    }

    pub fn canvas(&self) -> Canvas {
        self.canvas
    }

    pub fn width(&self) -> u32 {
        self.canvas.width
    }

    pub fn height(&self) -> u32 {
        self.canvas.height
    }

    /// Row-major pixel slice.
    pub fn pixels(&self) -> &[Color] {
        &self.pixels
    }

    fn index(&self, x: i64, y: i64) -> Option<usize> {
        self.canvas
            .contains(x, y)
            .then(|| y as usize * self.canvas.width as usize + x as usize)
    }

    fn out_of_bounds(&self, x: i64, y: i64) -> PixelatorError {
        PixelatorError::OutOfBounds {
            x,
            y,
            width: self.canvas.width,
            height: self.canvas.height,
        }
    }

    pub fn pixel(&self, x: i64, y: i64) -> PixelatorResult<Color> {
        self.get(x, y).ok_or_else(|| self.out_of_bounds(x, y))
    }

    pub fn set_pixel(&mut self, x: i64, y: i64, color: Color) -> PixelatorResult<()> {
        let i = self.index(x, y).ok_or_else(|| self.out_of_bounds(x, y))?;
        self.pixels[i] = color;
        Ok(())
    }

    /// Set every pixel of row `y`.
    pub fn fill_row(&mut self, y: i64, color: Color) -> PixelatorResult<()> {
        if !self.canvas.contains(0, y) {
            return Err(self.out_of_bounds(0, y));
        }
        self.fill_row_clipped(y, color);
        Ok(())
    }

    pub(crate) fn get(&self, x: i64, y: i64) -> Option<Color> {
        self.index(x, y).map(|i| self.pixels[i])
    }

    pub(crate) fn put(&mut self, x: i64, y: i64, color: Color) {
        if let Some(i) = self.index(x, y) {
            self.pixels[i] = color;
        }
    }

    pub(crate) fn fill_row_clipped(&mut self, y: i64, color: Color) {
        if !self.canvas.contains(0, y) {
            return;
        }
        let w = self.canvas.width as usize;
        let start = y as usize * w;
        self.pixels[start..start + w].fill(color);
    }

    /// Horizontal span `[x0, x1]` (either order), clipped.
    pub(crate) fn hspan(&mut self, y: i64, x0: i64, x1: i64, color: Color) {
        if y < 0 || y >= i64::from(self.canvas.height) {
            return;
        }
        let (lo, hi) = if x0 <= x1 { (x0, x1) } else { (x1, x0) };
        let lo = lo.max(0);
        let hi = hi.min(i64::from(self.canvas.width) - 1);
        for x in lo..=hi {
            self.put(x, y, color);
        }
    }

    /// Axis-aligned `w`×`h` block with its top-left corner at `(x, y)`, clipped.
    pub(crate) fn fill_rect(&mut self, x: i64, y: i64, w: u32, h: u32, color: Color) {
        if w == 0 {
            return;
        }
        let right = x.saturating_add(i64::from(w) - 1);
        let bottom = y.saturating_add(i64::from(h)).min(i64::from(self.canvas.height));
        for row in y.max(0)..bottom {
            self.hspan(row, x, right, color);
        }
    }

    fn put_wide(&mut self, x: i128, y: i128, color: Color) {
        if let (Ok(x), Ok(y)) = (i64::try_from(x), i64::try_from(y)) {
            self.put(x, y, color);
        }
    }

    /// Bresenham line, inclusive of both endpoints.
    ///
    /// Pixels are computed per major-axis step in closed form, so only the steps that land on
    /// the buffer are visited. Endpoints are clamped to `±2^60` first.
    pub fn draw_line(&mut self, x0: i64, y0: i64, x1: i64, y1: i64, color: Color) {
        let [x0, y0, x1, y1] =
            [x0, y0, x1, y1].map(|v| i128::from(v.clamp(-LINE_COORD_LIMIT, LINE_COORD_LIMIT)));
        let (dx, dy) = ((x1 - x0).abs(), (y1 - y0).abs());
        let (sx, sy) = ((x1 - x0).signum(), (y1 - y0).signum());
        let (w, h) = (i128::from(self.canvas.width), i128::from(self.canvas.height));

        if dx == 0 && dy == 0 {
            self.put_wide(x0, y0, color);
        } else if dx >= dy {
            for k in visible_steps(x0, sx, dx, w) {
                self.put_wide(x0 + sx * k, y0 + sy * minor_steps(k, dy, dx), color);
            }
        } else {
            for k in visible_steps(y0, sy, dy, h) {
                self.put_wide(x0 + sx * minor_steps(k, dx, dy), y0 + sy * k, color);
            }
        }
    }

    /// Filled disc built column by column.
    ///
    /// Each column offset `dx` in `[-radius, radius)` gets the span `cy ± floor(sqrt(r² - dx²))`.
    /// The column at `+radius` is never drawn, so the disc is one pixel narrower on the right.
    pub fn draw_circle_filled(&mut self, cx: i64, cy: i64, radius: u32, color: Color) {
        let (w, h) = (i128::from(self.canvas.width), i128::from(self.canvas.height));
        let (cx, cy, r) = (i128::from(cx), i128::from(cy), i128::from(radius));
        for dx in (-r).max(-cx)..r.min(w - cx) {
            let span = ((r * r - dx * dx) as f64).sqrt().floor() as i128;
            for y in (cy - span).max(0)..=(cy + span).min(h - 1) {
                self.put_wide(cx + dx, y, color);
            }
        }
    }

    /// Scanline triangle fill with flat-bottom / flat-top decomposition.
    ///
    /// Vertices snap to the pixel grid; edges advance with float inverse slopes. Degenerate
    /// triangles fill at most their points or line. Only scanlines inside the buffer are walked,
    /// and triangles with a non-finite vertex draw nothing.
    pub fn fill_triangle(&mut self, a: Point, b: Point, c: Point, color: Color) {
        let mut v = [a, b, c].map(|p| (p.x.round(), p.y.round()));
        if v.iter().any(|p| !p.0.is_finite() || !p.1.is_finite()) {
            return;
        }
        v.sort_by(|p, q| p.1.total_cmp(&q.1));
        let [v1, v2, v3] = v;

        if v1.1 == v3.1 {
            let lo = v1.0.min(v2.0).min(v3.0) as i64;
            let hi = v1.0.max(v2.0).max(v3.0) as i64;
            self.hspan(v1.1 as i64, lo, hi, color);
        } else if v2.1 == v3.1 {
            self.fill_flat_bottom(v1, v2, v3, color);
        } else if v1.1 == v2.1 {
            self.fill_flat_top(v1, v2, v3, color);
        } else {
            let t = (v2.1 - v1.1) / (v3.1 - v1.1);
            let v4 = (v1.0 + t * (v3.0 - v1.0), v2.1);
            self.fill_flat_bottom(v1, v2, v4, color);
            self.fill_flat_top(v2, v4, v3, color);
        }
    }

    /// Rows of `[from, to]` that lie inside the buffer. Both ends are whole numbers.
    fn visible_rows(&self, from: f64, to: f64) -> RangeInclusive<i64> {
        let lo = from.max(0.0);
        let hi = to.min(f64::from(self.canvas.height) - 1.0);
        lo as i64..=hi as i64
    }

    fn fill_flat_bottom(&mut self, top: (f64, f64), b1: (f64, f64), b2: (f64, f64), color: Color) {
        let dy = b1.1 - top.1;
        let inv1 = (b1.0 - top.0) / dy;
        let inv2 = (b2.0 - top.0) / dy;
        for y in self.visible_rows(top.1, b1.1) {
            let step = y as f64 - top.1;
            let x1 = (top.0 + inv1 * step).round() as i64;
            let x2 = (top.0 + inv2 * step).round() as i64;
            self.hspan(y, x1, x2, color);
        }
    }

    fn fill_flat_top(&mut self, t1: (f64, f64), t2: (f64, f64), bottom: (f64, f64), color: Color) {
        let dy = bottom.1 - t1.1;
        let inv1 = (bottom.0 - t1.0) / dy;
        let inv2 = (bottom.0 - t2.0) / dy;
        for y in self.visible_rows(t1.1, bottom.1) {
            let step = bottom.1 - y as f64;
            let x1 = (bottom.0 - inv1 * step).round() as i64;
            let x2 = (bottom.0 - inv2 * step).round() as i64;
            self.hspan(y, x1, x2, color);
        }
    }

    /// Flatten into an RGBA8 byte frame.
    pub fn to_rgba(&self) -> FrameRGBA {
        let mut data = Vec::with_capacity(self.pixels.len() * 4);
        for p in &self.pixels {
            data.extend_from_slice(&[p.r, p.g, p.b, p.a]);
        }
        FrameRGBA {
            width: self.canvas.width,
            height: self.canvas.height,
            data,
        }
    }
}

const LINE_COORD_LIMIT: i64 = 1 << 60;

/// Steps `k` in `[0, len]` for which `start + step * k` lies in `[0, size)`.
fn visible_steps(start: i128, step: i128, len: i128, size: i128) -> RangeInclusive<i128> {
    if step >= 0 {
        (-start).max(0)..=len.min(size - 1 - start)
    } else {
        (start - size + 1).max(0)..=len.min(start)
    }
}

/// Minor-axis offset after `k` major steps of a Bresenham walk with deltas `minor` <= `major`.
fn minor_steps(k: i128, minor: i128, major: i128) -> i128 {
    (2 * minor * k + major) / (2 * major)
}

#[cfg(test)]
#[path = "../../tests/unit/render/frame.rs"]
mod tests;
