//! Encoding sinks.
//!
//! Sinks consume rendered frames in frame order and are fed by `RenderSession::render_into`.

/// Animated GIF output via the `gif` crate.
pub mod gif;
/// Generic frame sink trait and built-in sinks.
pub mod sink;
