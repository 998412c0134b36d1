use crate::foundation::error::{PixelatorError, PixelatorResult};

/// Easing functions used to map normalized progress.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum Ease {
    /// Linear interpolation.
    #[serde(rename = "linear")]
    Linear,
    /// Quadratic ease-in.
    #[serde(rename = "easeInQuad")]
    InQuad,
    /// Quadratic ease-out.
    #[serde(rename = "easeOutQuad")]
    OutQuad,
    /// Quadratic ease-in/out.
    #[serde(rename = "easeInOutQuad")]
    InOutQuad,
    /// Cubic ease-in.
    #[serde(rename = "easeInCubic")]
    InCubic,
    /// Cubic ease-out.
    #[serde(rename = "easeOutCubic")]
    OutCubic,
    /// Cubic ease-in/out.
    #[serde(rename = "easeInOutCubic")]
    InOutCubic,
    /// Quartic ease-in.
    #[serde(rename = "easeInQuart")]
    InQuart,
    /// Quartic ease-out.
    #[serde(rename = "easeOutQuart")]
    OutQuart,
    /// Quartic ease-in/out.
    #[serde(rename = "easeInOutQuart")]
    InOutQuart,
    /// Quintic ease-in.
    #[serde(rename = "easeInQuint")]
    InQuint,
    /// Quintic ease-out.
    #[serde(rename = "easeOutQuint")]
    OutQuint,
    /// Quintic ease-in/out.
    #[serde(rename = "easeInOutQuint")]
    InOutQuint,
}

impl Ease {
    /// Every registered curve.
    pub const ALL: [Self; 13] = [
        Self::Linear,
        Self::InQuad,
        Self::OutQuad,
        Self::InOutQuad,
        Self::InCubic,
        Self::OutCubic,
        Self::InOutCubic,
        Self::InQuart,
        Self::OutQuart,
        Self::InOutQuart,
        Self::InQuint,
        Self::OutQuint,
        Self::InOutQuint,
    ];

    /// Registered name, as used in scene files.
    pub fn name(self) -> &'static str {
        match self {
            Self::Linear => "linear",
            Self::InQuad => "easeInQuad",
            Self::OutQuad => "easeOutQuad",
            Self::InOutQuad => "easeInOutQuad",
            Self::InCubic => "easeInCubic",
            Self::OutCubic => "easeOutCubic",
            Self::InOutCubic => "easeInOutCubic",
            Self::InQuart => "easeInQuart",
            Self::OutQuart => "easeOutQuart",
            Self::InOutQuart => "easeInOutQuart",
            Self::InQuint => "easeInQuint",
            Self::OutQuint => "easeOutQuint",
            Self::InOutQuint => "easeInOutQuint",
        }
    }

    /// Look up a curve by its registered name.
    pub fn from_name(name: &str) -> PixelatorResult<Self> {
        Self::ALL
            .into_iter()
            .find(|e| e.name() == name)
            .ok_or_else(|| PixelatorError::unknown_easing(name))
    }

    /// Apply this easing function to normalized progress `t` in `[0, 1]`.
    pub fn apply(self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Self::Linear => t,
            Self::InQuad => t.powi(2),
            Self::OutQuad => ease_out(t, 2),
            Self::InOutQuad => ease_in_out(t, 2),
            Self::InCubic => t.powi(3),
            Self::OutCubic => ease_out(t, 3),
            Self::InOutCubic => ease_in_out(t, 3),
            Self::InQuart => t.powi(4),
            Self::OutQuart => ease_out(t, 4),
            Self::InOutQuart => ease_in_out(t, 4),
            Self::InQuint => t.powi(5),
            Self::OutQuint => ease_out(t, 5),
            Self::InOutQuint => ease_in_out(t, 5),
        }
    }
}

fn ease_out(t: f64, power: i32) -> f64 {
    1.0 - (1.0 - t).powi(power)
}

fn ease_in_out(t: f64, power: i32) -> f64 {
    if t < 0.5 {
        // 2^(p-1) * t^p
        f64::from(1u32 << (power - 1)) * t.powi(power)
    } else {
        1.0 - ((-2.0 * t + 2.0).powi(power) / 2.0)
    }
}

impl std::str::FromStr for Ease {
    type Err = PixelatorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_name(s)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/ease.rs"]
mod tests;
