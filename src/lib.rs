//! Pixelator renders procedural pixel-art sky animations.
//!
//! The public API is session-oriented:
//!
//! - Load a [`Scene`] (or a [`SceneQueue`]) and a [`ThemeRegistry`]
//! - Create a [`RenderSession`]
//! - Render single frames in order, or stream the whole animation into a [`FrameSink`]
#![forbid(unsafe_code)]

mod foundation;

/// Easing curves.
pub mod animation;
/// Stateful frame effects.
pub mod effects;
/// Encoding sinks.
pub mod encode;
/// Frame buffer and rasterization.
pub mod render;
/// Boundary scene model.
pub mod scene;
/// Session-oriented rendering API.
pub mod session;

pub use crate::foundation::color::{Color, RgbVector};
pub use crate::foundation::core::{Canvas, FrameIndex, Point};
pub use crate::foundation::error::{PixelatorError, PixelatorResult};

pub use crate::animation::ease::Ease;
pub use crate::effects::Effect;
pub use crate::effects::reflection::{Reflection, ReflectionConfig};
pub use crate::effects::stars::{Star, StarField, StarsConfig};
pub use crate::encode::gif::GifSink;
pub use crate::encode::sink::{FrameSink, InMemorySink, SinkConfig};
pub use crate::render::frame::{FrameBuffer, FrameRGBA};
pub use crate::render::gradation::{ColorMode, Gradation, GradationDef, GradationKind};
pub use crate::render::sky::Background;
pub use crate::scene::catalog::{CatalogOpts, catalog};
pub use crate::scene::document::{Scene, SceneQueue};
pub use crate::scene::model::{BackgroundDef, EffectsDef, Mountain, SceneDef, Sun};
pub use crate::scene::theme::{Theme, ThemeRef, ThemeRegistry, generate_theme};
pub use crate::session::render_session::{RenderSession, RenderSessionOpts, RenderStats};
