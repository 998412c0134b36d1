use crate::render::gradation::{GradationDef, GradationKind};
use crate::scene::model::{BackgroundDef, EffectsDef, SKY_KEY, SceneDef};
use crate::scene::theme::{ThemeRef, ThemeRegistry};
use std::collections::{BTreeMap, BTreeSet};

/// Axes of the permutation matrix built by [`catalog`].
#[derive(Clone, Debug, PartialEq)]
pub struct CatalogOpts {
    /// Square canvas sizes.
    pub sizes: Vec<u32>,
    /// Frame counts tried for field gradations.
    pub animation_lengths: Vec<u64>,
    /// Field magnitudes, capped at half the canvas size.
    pub field_magnitudes: Vec<u32>,
    /// Line magnitudes; line scenes are always a single still frame.
    pub line_magnitudes: Vec<u32>,
    pub speeds: Vec<f64>,
    pub delay_ms: u32,
}

impl Default for CatalogOpts {
    fn default() -> Self {
        Self {
            sizes: vec![256],
            animation_lengths: vec![1, 128],
            field_magnitudes: vec![128],
            line_magnitudes: (1..=7).collect(),
            speeds: vec![1.0, 4.0, 20.0],
            delay_ms: 100,
        }
    }
}

/// Build one scene per (theme, size, gradation, length, speed) permutation.
///
/// Themes with two colors or fewer are skipped. Scenes whose names collide keep the first
/// permutation; single-frame field scenes are named without their speed and would otherwise
/// repeat once per speed.
pub fn catalog(themes: &ThemeRegistry, opts: &CatalogOpts) -> Vec<SceneDef> {
    let mut out = Vec::new();
    let mut seen = BTreeSet::new();
    let mut push = |def: SceneDef| {
        if seen.insert(def.name.clone()) {
            out.push(def);
        }
    };

    for (theme, colors) in themes.iter() {
        if colors.len() <= 2 {
            tracing::debug!(theme, "skipping theme with too few colors");
            continue;
        }
        for &size in &opts.sizes {
            for &m in &opts.line_magnitudes {
                push(entry(theme, size, GradationKind::Line, m, 1, 1.0, 0, opts.delay_ms));
            }
            for &m in &opts.field_magnitudes {
                let m = m.min(size / 2).max(1);
                let num_colors = if m >= size / 2 { 2 } else { 0 };
                for &frames in &opts.animation_lengths {
                    for &speed in &opts.speeds {
                        push(entry(
                            theme,
                            size,
                            GradationKind::Field,
                            m,
                            frames,
                            speed,
                            num_colors,
                            opts.delay_ms,
                        ));
                    }
                }
            }
        }
    }
    out
}

#[allow(clippy::too_many_arguments)]
fn entry(
    theme: &str,
    size: u32,
    kind: GradationKind,
    magnitude: u32,
    frames: u64,
    speed: f64,
    num_colors: u8,
    delay: u32,
) -> SceneDef {
    let name = if frames > 1 {
        format!("{theme}-{size}x{size}-g({magnitude})-length{frames}-bgspeed{speed}")
    } else {
        format!("{theme}-{size}x{size}-g({magnitude})")
    };
    let sky = BackgroundDef {
        name: theme.to_owned(),
        height: size,
        speed,
        theme: ThemeRef::Named(theme.to_owned()),
        gradation: GradationDef {
            kind,
            magnitude,
            num_colors,
            stagger: 0.0,
        },
        sun: None,
        stars: None,
    };
    SceneDef {
        name,
        width: size,
        height: size,
        frames,
        delay,
        repeat: 0,
        background: BTreeMap::from([(SKY_KEY.to_owned(), sky)]),
        mountains: Vec::new(),
        effects: EffectsDef::default(),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/catalog.rs"]
mod tests;
