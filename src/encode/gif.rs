use crate::encode::sink::{FrameSink, SinkConfig};
use crate::foundation::core::FrameIndex;
use crate::foundation::error::{PixelatorError, PixelatorResult};
use crate::render::frame::FrameRGBA;
use ::gif::{Encoder, Frame, Repeat};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// NeuQuant sampling speed, 1 (best) to 30 (fastest).
pub const DEFAULT_QUANTIZE_SPEED: i32 = 10;

enum State<W: Write> {
    Idle(W),
    Encoding(Encoder<W>),
    Done(W),
    Failed,
}

/// Animated GIF sink.
///
/// Each frame gets its own NeuQuant palette; fully transparent pixels stay transparent. Frame
/// delays are whole centiseconds, so `delay_ms` is truncated to a multiple of 10.
pub struct GifSink<W: Write + Send> {
    state: State<W>,
    quantize_speed: i32,
    width: u16,
    height: u16,
    delay_cs: u16,
    scratch: Vec<u8>,
}

impl<W: Write + Send> GifSink<W> {
    pub fn new(writer: W) -> Self {
        Self {
            state: State::Idle(writer),
            quantize_speed: DEFAULT_QUANTIZE_SPEED,
            width: 0,
            height: 0,
            delay_cs: 0,
            scratch: Vec::new(),
        }
    }

    /// Override the quantizer speed; clamped to `1..=30`.
    pub fn with_quantize_speed(mut self, speed: i32) -> Self {
        self.quantize_speed = speed.clamp(1, 30);
        self
    }

    /// Recover the writer, flushing the GIF trailer if `end` was never called.
    pub fn into_inner(self) -> PixelatorResult<W> {
        match self.state {
            State::Idle(w) | State::Done(w) => Ok(w),
            State::Encoding(enc) => enc
                .into_inner()
                .map_err(|e| PixelatorError::encode(format!("finish gif: {e}"))),
            State::Failed => Err(PixelatorError::encode("gif sink failed earlier")),
        }
    }
}

impl GifSink<BufWriter<File>> {
    /// Create (or truncate) `path`, making parent directories as needed.
    pub fn create(path: impl AsRef<Path>) -> PixelatorResult<Self> {
        let path = path.as_ref();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| {
                PixelatorError::encode(format!("create output dir '{}': {e}", parent.display()))
            })?;
        }
        let f = File::create(path)
            .map_err(|e| PixelatorError::encode(format!("create '{}': {e}", path.display())))?;
        Ok(Self::new(BufWriter::new(f)))
    }
}

fn dimension(v: u32, what: &str) -> PixelatorResult<u16> {
    u16::try_from(v)
        .map_err(|_| PixelatorError::encode(format!("gif {what} {v} exceeds {}", u16::MAX)))
}

impl<W: Write + Send> FrameSink for GifSink<W> {
    fn begin(&mut self, cfg: SinkConfig) -> PixelatorResult<()> {
        if !matches!(self.state, State::Idle(_)) {
            return Err(PixelatorError::encode("gif sink already started"));
        }
        self.width = dimension(cfg.width, "width")?;
        self.height = dimension(cfg.height, "height")?;
        let State::Idle(writer) = std::mem::replace(&mut self.state, State::Failed) else {
            return Err(PixelatorError::encode("gif sink already started"));
        };
        self.delay_cs = u16::try_from(cfg.delay_ms / 10).unwrap_or(u16::MAX);

        let mut enc = Encoder::new(writer, self.width, self.height, &[])
            .map_err(|e| PixelatorError::encode(format!("start gif: {e}")))?;
        let repeat = match cfg.repeat {
            0 => Repeat::Infinite,
            n => Repeat::Finite(n),
        };
        enc.set_repeat(repeat)
            .map_err(|e| PixelatorError::encode(format!("set gif repeat: {e}")))?;
        self.state = State::Encoding(enc);
        Ok(())
    }

    fn push_frame(&mut self, idx: FrameIndex, frame: &FrameRGBA) -> PixelatorResult<()> {
        let State::Encoding(enc) = &mut self.state else {
            return Err(PixelatorError::encode("gif sink is not encoding"));
        };
        if frame.width != u32::from(self.width) || frame.height != u32::from(self.height) {
            return Err(PixelatorError::encode(format!(
                "frame {} is {}x{}, expected {}x{}",
                idx.0, frame.width, frame.height, self.width, self.height
            )));
        }
        let expected = usize::from(self.width) * usize::from(self.height) * 4;
        if frame.data.len() != expected {
            return Err(PixelatorError::encode(format!(
                "frame {} has {} bytes, expected {expected}",
                idx.0,
                frame.data.len()
            )));
        }

        self.scratch.clear();
        self.scratch.extend_from_slice(&frame.data);
        let mut out =
            Frame::from_rgba_speed(self.width, self.height, &mut self.scratch, self.quantize_speed);
        out.delay = self.delay_cs;
        enc.write_frame(&out)
            .map_err(|e| PixelatorError::encode(format!("write gif frame {}: {e}", idx.0)))?;
        Ok(())
    }

    fn end(&mut self) -> PixelatorResult<()> {
        match std::mem::replace(&mut self.state, State::Failed) {
            State::Encoding(enc) => {
                let mut w = enc
                    .into_inner()
                    .map_err(|e| PixelatorError::encode(format!("finish gif: {e}")))?;
                w.flush()
                    .map_err(|e| PixelatorError::encode(format!("flush gif: {e}")))?;
                self.state = State::Done(w);
                Ok(())
            }
            other => {
                self.state = other;
                Err(PixelatorError::encode("gif sink was not started"))
            }
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/encode/gif.rs"]
mod tests;
