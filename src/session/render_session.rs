use crate::effects::Effect;
use crate::effects::stars::StarField;
use crate::encode::sink::{FrameSink, SinkConfig};
use crate::foundation::core::{Canvas, FrameIndex};
use crate::foundation::error::{PixelatorError, PixelatorResult};
use crate::render::frame::{FrameBuffer, FrameRGBA};
use crate::render::sky::Background;
use crate::scene::document::Scene;
use crate::scene::model::{Mountain, Sun};
use crate::scene::theme::ThemeRegistry;

/// Options controlling a [`RenderSession`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RenderSessionOpts {
    /// Star field seed. Overrides the scene's own seed; when neither is set a random seed is
    /// drawn and logged.
    pub seed: Option<u64>,
}

/// Render statistics.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RenderStats {
    /// Frames handed to the sink.
    pub frames_rendered: u64,
}

/// Session-oriented renderer for one scene.
///
/// A session front-loads theme resolution and star placement, then renders frames in order. Star
/// twinkle and ripple state advance once per rendered frame, so frames must be requested
/// consecutively from 0.
pub struct RenderSession {
    name: String,
    canvas: Canvas,
    frames: u64,
    delay_ms: u32,
    repeat: u16,
    sky: Option<Background>,
    sun: Option<Sun>,
    stars: Option<StarField>,
    mountains: Vec<Mountain>,
    effects: Vec<Effect>,
    next: FrameIndex,
}

impl RenderSession {
    /// Validate `scene`, resolve its theme against `themes` and build its stateful effects.
    #[tracing::instrument(skip(scene, themes), fields(scene = %scene.name()))]
    pub fn new(
        scene: &Scene,
        themes: &ThemeRegistry,
        opts: RenderSessionOpts,
    ) -> PixelatorResult<Self> {
        scene.validate()?;
        let def = scene.def();
        let canvas = scene.canvas()?;

        let sky = scene
            .sky()
            .map(|bg| Background::resolve(bg, themes))
            .transpose()?;

        let stars = match sky.as_ref().and_then(|s| s.stars.as_ref().map(|c| (s.height, c))) {
            Some((sky_height, cfg)) => {
                let seed = match opts.seed.or(cfg.seed) {
                    Some(seed) => seed,
                    None => {
                        let seed = rand::random::<u64>();
                        tracing::info!(seed, "no star seed configured, drew one");
                        seed
                    }
                };
                let field = StarField::from_seed(cfg, canvas.width, sky_height, seed)?;
                tracing::debug!(stars = field.len(), seed, "star field built");
                Some(field)
            }
            None => None,
        };

        let effects = Effect::build_all(&def.effects)?;
        for effect in &effects {
            tracing::debug!(effect = effect.name(), "effect built");
        }

        Ok(Self {
            name: def.name.clone(),
            canvas,
            frames: def.frames,
            delay_ms: def.delay,
            repeat: def.repeat,
            sun: sky.as_ref().and_then(|s| s.sun.clone()),
            sky,
            stars,
            mountains: def.mountains.clone(),
            effects,
            next: FrameIndex(0),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn canvas(&self) -> Canvas {
        self.canvas
    }

    pub fn frame_count(&self) -> u64 {
        self.frames
    }

    /// The only frame index `render_frame` accepts next.
    pub fn next_frame(&self) -> FrameIndex {
        self.next
    }

    pub fn sink_config(&self) -> SinkConfig {
        SinkConfig {
            width: self.canvas.width,
            height: self.canvas.height,
            delay_ms: self.delay_ms,
            repeat: self.repeat,
        }
    }

    /// Render frame `t`: sky, stars, sun, mountains, then effects.
    pub fn render_frame(&mut self, t: FrameIndex) -> PixelatorResult<FrameBuffer> {
        if t.0 >= self.frames {
            return Err(PixelatorError::validation(format!(
                "frame {} is outside scene '{}' ({} frames)",
                t.0, self.name, self.frames
            )));
        }
        if t != self.next {
            return Err(PixelatorError::validation(format!(
                "frames must be rendered in order: expected {}, got {}",
                self.next.0, t.0
            )));
        }

        let mut buf = FrameBuffer::new(self.canvas);
        if let Some(sky) = &self.sky {
            buf.draw_sky(t, sky)?;
        }
        if let Some(stars) = &mut self.stars {
            buf.draw_stars(stars);
        }
        if let Some(sun) = &self.sun {
            buf.draw_sun(sun);
        }
        for mountain in &self.mountains {
            buf.draw_mountain(mountain);
        }
        for effect in &mut self.effects {
            effect.apply(t, &mut buf);
        }

        tracing::debug!(frame = t.0, "frame rendered");
        self.next = t.next();
        Ok(buf)
    }

    /// Render every remaining frame.
    pub fn render_all(&mut self) -> PixelatorResult<Vec<FrameBuffer>> {
        let mut out = Vec::with_capacity(self.frames.saturating_sub(self.next.0) as usize);
        while self.next.0 < self.frames {
            out.push(self.render_frame(self.next)?);
        }
        Ok(out)
    }

    /// Render the full sequence, then stream it into `sink` starting at frame 0.
    ///
    /// Nothing reaches the sink when any frame fails to render.
    #[tracing::instrument(skip(self, sink), fields(scene = %self.name, frames = self.frames))]
    pub fn render_into(&mut self, sink: &mut dyn FrameSink) -> PixelatorResult<RenderStats> {
        if self.next.0 != 0 {
            return Err(PixelatorError::validation(
                "render_into needs a session that has not rendered any frame",
            ));
        }
        let frames: Vec<FrameRGBA> = self.render_all()?.iter().map(FrameBuffer::to_rgba).collect();

        sink.begin(self.sink_config())?;
        for (i, frame) in frames.iter().enumerate() {
            sink.push_frame(FrameIndex(i as u64), frame)?;
        }
        sink.end()?;

        Ok(RenderStats {
            frames_rendered: frames.len() as u64,
        })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/session/render_session.rs"]
mod tests;
