pub type PixelatorResult<T> = Result<T, PixelatorError>;

#[derive(thiserror::Error, Debug)]
pub enum PixelatorError {
    #[error("invalid color format: {0}")]
    InvalidFormat(String),

    #[error("unknown easing: {0}")]
    UnknownEasing(String),

    #[error("unsupported key color count: {0} (theme generation takes exactly 2)")]
    UnsupportedKeyColorCount(usize),

    #[error("unknown theme: {0}")]
    UnknownTheme(String),

    #[error("sky too tall: height {sky} exceeds frame height {frame}")]
    SkyTooTall { sky: u32, frame: u32 },

    #[error("pixel ({x}, {y}) out of bounds for {width}x{height} frame")]
    OutOfBounds {
        x: i64,
        y: i64,
        width: u32,
        height: u32,
    },

    #[error("degenerate vector: {0}")]
    DegenerateVector(String),

    #[error("validation error: {0}")]
    Validation(String),

    #[error("serialization error: {0}")]
    Serde(String),

    #[error("encode error: {0}")]
    Encode(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl PixelatorError {
    pub fn invalid_format(msg: impl Into<String>) -> Self {
        Self::InvalidFormat(msg.into())
    }

    pub fn unknown_easing(msg: impl Into<String>) -> Self {
        Self::UnknownEasing(msg.into())
    }

    pub fn unknown_theme(msg: impl Into<String>) -> Self {
        Self::UnknownTheme(msg.into())
    }

    pub fn degenerate_vector(msg: impl Into<String>) -> Self {
        Self::DegenerateVector(msg.into())
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }

    pub fn encode(msg: impl Into<String>) -> Self {
        Self::Encode(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
