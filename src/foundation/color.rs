use crate::foundation::error::{PixelatorError, PixelatorResult};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Straight-alpha RGBA8 color.
///
/// Channels are stored as `u8`, so every accessor is already within `[0, 255]`. Arithmetic goes
/// through [`RgbVector`] and is rounded and clamped on the way back.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Color {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
    /// Alpha channel (255 = opaque).
    pub a: u8,
}

/// Unclamped RGB triple used for color deltas and directions.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct RgbVector {
    pub r: f64,
    pub g: f64,
    pub b: f64,
}

impl RgbVector {
    pub fn new(r: f64, g: f64, b: f64) -> Self {
        Self { r, g, b }
    }

    /// Euclidean length.
    pub fn magnitude(self) -> f64 {
        (self.r * self.r + self.g * self.g + self.b * self.b).sqrt()
    }

    pub fn scale(self, factor: f64) -> Self {
        Self::new(self.r * factor, self.g * factor, self.b * factor)
    }
}

impl Color {
    /// Fully transparent black (the frame buffer's initial value).
    pub const TRANSPARENT: Self = Self::rgba(0, 0, 0, 0);
    pub const BLACK: Self = Self::rgb(0, 0, 0);
    pub const WHITE: Self = Self::rgb(255, 255, 255);

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Opaque color.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::rgba(r, g, b, 255)
    }

    /// Parse `#rgb`, `rgb`, `#rrggbb` or `rrggbb` (case-insensitive). The result is opaque.
    pub fn from_hex(hex: &str) -> PixelatorResult<Self> {
        let s = hex.trim();
        let digits = s.strip_prefix('#').unwrap_or(s);
        if !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(PixelatorError::invalid_format(format!(
                "\"{hex}\" contains non-hex characters"
            )));
        }

        fn nibble(b: u8) -> u8 {
            match b {
                b'0'..=b'9' => b - b'0',
                b'a'..=b'f' => b - b'a' + 10,
                _ => b - b'A' + 10,
            }
        }

        let d = digits.as_bytes();
        match d.len() {
            3 => {
                let (r, g, b) = (nibble(d[0]), nibble(d[1]), nibble(d[2]));
                Ok(Self::rgb(r * 17, g * 17, b * 17))
            }
            6 => Ok(Self::rgb(
                (nibble(d[0]) << 4) | nibble(d[1]),
                (nibble(d[2]) << 4) | nibble(d[3]),
                (nibble(d[4]) << 4) | nibble(d[5]),
            )),
            _ => Err(PixelatorError::invalid_format(format!(
                "\"{hex}\" must be #rgb or #rrggbb"
            ))),
        }
    }

    /// Lowercase `#rrggbb`; alpha is not encoded.
    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    /// Same RGB with a different alpha.
    pub fn with_alpha(self, a: u8) -> Self {
        Self { a, ..self }
    }

    /// RGB as an unclamped vector.
    pub fn vector(self) -> RgbVector {
        RgbVector::new(f64::from(self.r), f64::from(self.g), f64::from(self.b))
    }

    /// Build a color from an RGB vector, rounding and clamping each channel.
    pub fn from_vector(v: RgbVector, a: u8) -> Self {
        fn channel(x: f64) -> u8 {
            x.round().clamp(0.0, 255.0) as u8
        }
        Self::rgba(channel(v.r), channel(v.g), channel(v.b), a)
    }

    /// Euclidean norm of the RGB triple (alpha excluded).
    pub fn magnitude(self) -> f64 {
        self.vector().magnitude()
    }

    /// RGB direction of this color.
    ///
    /// Black has no direction and fails with [`PixelatorError::DegenerateVector`].
    pub fn unit_vector(self) -> PixelatorResult<RgbVector> {
        let m = self.magnitude();
        if m == 0.0 {
            return Err(PixelatorError::degenerate_vector(format!(
                "{} has zero magnitude",
                self.to_hex()
            )));
        }
        Ok(self.vector().scale(1.0 / m))
    }

    /// Color with the same RGB direction but the given magnitude (clamped per channel).
    pub fn magnitude_vector(self, magnitude: f64) -> PixelatorResult<Self> {
        Ok(Self::from_vector(
            self.unit_vector()?.scale(magnitude),
            self.a,
        ))
    }

    /// Multiply each RGB channel by `factor`.
    pub fn scale(self, factor: f64) -> Self {
        Self::from_vector(self.vector().scale(factor), self.a)
    }

    /// RGB delta `to - from`.
    pub fn tween_vector(from: Self, to: Self) -> RgbVector {
        RgbVector::new(
            f64::from(to.r) - f64::from(from.r),
            f64::from(to.g) - f64::from(from.g),
            f64::from(to.b) - f64::from(from.b),
        )
    }

    /// Move `distance` units along the straight RGB line towards `target`.
    ///
    /// Distances past the target overshoot and are clamped per channel. Alpha is kept from
    /// `self`.
    pub fn tween(self, distance: f64, target: Self) -> Self {
        let delta = Self::tween_vector(self, target);
        let len = delta.magnitude();
        if len == 0.0 {
            return self;
        }
        let step = delta.scale(distance / len);
        let base = self.vector();
        Self::from_vector(
            RgbVector::new(base.r + step.r, base.g + step.g, base.b + step.b),
            self.a,
        )
    }

    pub fn brighten(self, distance: f64) -> Self {
        self.tween(distance, Self::WHITE)
    }

    pub fn darken(self, distance: f64) -> Self {
        self.tween(distance, Self::BLACK)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl std::str::FromStr for Color {
    type Err = PixelatorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex(s)
    }
}

impl Serialize for Color {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for Color {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Self::from_hex(&s).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/color.rs"]
mod tests;
