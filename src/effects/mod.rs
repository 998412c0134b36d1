//! Stateful post-processing applied to finished frames.

/// Water reflection with a ping-pong ripple.
pub mod reflection;
/// Twinkling star field.
pub mod stars;

use crate::foundation::core::FrameIndex;
use crate::foundation::error::PixelatorResult;
use crate::render::frame::FrameBuffer;
use crate::scene::model::EffectsDef;
use reflection::Reflection;

/// A configured effect. Each variant owns its animation state.
#[derive(Clone, Debug, PartialEq)]
pub enum Effect {
    Reflection(Reflection),
}

impl Effect {
    /// Build every configured effect, in application order.
    pub fn build_all(def: &EffectsDef) -> PixelatorResult<Vec<Self>> {
        let mut out = Vec::new();
        if let Some(cfg) = &def.reflection {
            out.push(Self::Reflection(Reflection::new(cfg)?));
        }
        Ok(out)
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Reflection(_) => "reflection",
        }
    }

    pub fn apply(&mut self, t: FrameIndex, buf: &mut FrameBuffer) {
        match self {
            Self::Reflection(r) => r.apply(t, buf),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/effects/effect.rs"]
mod tests;
