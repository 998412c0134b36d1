//! Boundary model: scene, queue and theme files.

/// Permutation catalog generated from a theme registry.
pub mod catalog;
/// Loaded scenes and scene queues.
pub mod document;
/// Serde definitions of scene files.
pub mod model;
/// Themes, theme references and the named registry.
pub mod theme;
