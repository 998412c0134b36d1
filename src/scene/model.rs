//! Serde boundary model for scene files.
//!
//! Field names follow the camelCase JSON layout. Resolution into drawable state happens in
//! [`crate::session::render_session::RenderSession::new`].

use crate::effects::reflection::ReflectionConfig;
use crate::effects::stars::StarsConfig;
use crate::foundation::color::Color;
use crate::foundation::core::Point;
use crate::foundation::error::{PixelatorError, PixelatorResult};
use crate::render::gradation::GradationDef;
use crate::scene::theme::ThemeRef;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Background map key that holds the sky.
pub const SKY_KEY: &str = "sky";

/// Largest accepted distance of a sun or mountain coordinate from the origin, and the largest
/// sun radius.
pub const MAX_COORDINATE: f64 = 16_777_216.0;

fn check_point(what: &str, p: Point) -> PixelatorResult<()> {
    let in_range = |v: f64| v.is_finite() && v.abs() <= MAX_COORDINATE;
    if in_range(p.x) && in_range(p.y) {
        return Ok(());
    }
    Err(PixelatorError::validation(format!(
        "{what} ({}, {}) must be finite and within ±{MAX_COORDINATE}",
        p.x, p.y
    )))
}

fn default_delay() -> u32 {
    100
}

/// One animation: canvas, timing and the things drawn on it.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SceneDef {
    pub name: String,
    pub width: u32,
    pub height: u32,
    pub frames: u64,
    /// Delay between frames in milliseconds.
    #[serde(default = "default_delay")]
    pub delay: u32,
    /// Loop count handed to the encoder; 0 loops forever.
    #[serde(rename = "loop", default)]
    pub repeat: u16,
    #[serde(default)]
    pub background: BTreeMap<String, BackgroundDef>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub mountains: Vec<Mountain>,
    #[serde(default, skip_serializing_if = "EffectsDef::is_empty")]
    pub effects: EffectsDef,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BackgroundDef {
    #[serde(default)]
    pub name: String,
    pub height: u32,
    #[serde(default)]
    pub speed: f64,
    pub theme: ThemeRef,
    pub gradation: GradationDef,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sun: Option<Sun>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stars: Option<StarsConfig>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Sun {
    pub center: Point,
    pub radius: u32,
    pub color: Color,
}

impl Sun {
    pub fn validate(&self) -> PixelatorResult<()> {
        check_point("sun center", self.center)?;
        if f64::from(self.radius) > MAX_COORDINATE {
            return Err(PixelatorError::validation(format!(
                "sun radius {} exceeds {MAX_COORDINATE}",
                self.radius
            )));
        }
        Ok(())
    }
}

/// Triangular silhouette.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Mountain {
    pub points: [Point; 3],
    pub color: Color,
}

impl Mountain {
    pub fn validate(&self) -> PixelatorResult<()> {
        self.points
            .iter()
            .try_for_each(|&p| check_point("mountain vertex", p))
    }
}

/// Post-processing effects, applied in field order.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct EffectsDef {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reflection: Option<ReflectionConfig>,
}

impl EffectsDef {
    pub fn is_empty(&self) -> bool {
        self.reflection.is_none()
    }
}
