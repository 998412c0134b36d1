use crate::animation::ease::Ease;
use crate::foundation::color::Color;
use crate::foundation::error::{PixelatorError, PixelatorResult};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// Ordered sky palette, top to bottom.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Theme {
    stops: Vec<Color>,
}

impl Theme {
    /// Create a theme from at least one color stop.
    pub fn new(stops: Vec<Color>) -> PixelatorResult<Self> {
        if stops.is_empty() {
            return Err(PixelatorError::validation("theme needs at least one color"));
        }
        Ok(Self { stops })
    }

    pub fn colors(&self) -> &[Color] {
        &self.stops
    }

    pub fn len(&self) -> usize {
        self.stops.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stops.is_empty()
    }

    pub fn first(&self) -> Color {
        self.stops[0]
    }

    pub fn last(&self) -> Color {
        self.stops[self.stops.len() - 1]
    }
}

/// Build an eased color ramp between two key colors.
///
/// The ramp has exactly `stops` entries; the first and last are the key colors unchanged. The
/// intermediate stops sit at `ease(i / (stops - 1))` of the RGB distance between the keys.
pub fn generate_theme(keys: &[Color], stops: usize, ease: Ease) -> PixelatorResult<Theme> {
    if keys.len() > 2 {
        return Err(PixelatorError::UnsupportedKeyColorCount(keys.len()));
    }
    if keys.len() < 2 {
        return Err(PixelatorError::validation(format!(
            "theme generation needs 2 key colors, got {}",
            keys.len()
        )));
    }
    if stops < 2 {
        return Err(PixelatorError::validation(format!(
            "theme generation needs at least 2 stops, got {stops}"
        )));
    }

    let (start, end) = (keys[0], keys[1]);
    let distance = Color::tween_vector(start, end).magnitude();
    let increment = distance / (stops - 1) as f64;

    let mut out = Vec::with_capacity(stops);
    out.push(start);
    for i in 1..stops - 1 {
        let color = if distance == 0.0 {
            start
        } else {
            let linear = (i as f64 * increment) / distance;
            start.tween(ease.apply(linear) * distance, end)
        };
        out.push(color);
    }
    out.push(end);

    Theme::new(out)
}

/// Theme generator parameters as written in scene files.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GeneratedThemeDef {
    /// Key colors (exactly two are supported).
    pub colors: Vec<Color>,
    /// Total number of stops including both keys.
    pub stops: usize,
    /// Registered easing name, e.g. `easeInQuad`.
    #[serde(default = "default_easing")]
    pub easing: String,
}

fn default_easing() -> String {
    Ease::Linear.name().to_owned()
}

/// How a background picks its theme.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ThemeRef {
    /// Registry lookup.
    Named(String),
    /// Literal color list.
    Literal(Vec<Color>),
    /// Two-key generator.
    Generated(GeneratedThemeDef),
}

impl ThemeRef {
    pub fn resolve(&self, registry: &ThemeRegistry) -> PixelatorResult<Theme> {
        match self {
            Self::Named(name) => registry.get(name),
            Self::Literal(colors) => Theme::new(colors.clone()),
            Self::Generated(def) => {
                let ease = Ease::from_name(&def.easing)?;
                generate_theme(&def.colors, def.stops, ease)
            }
        }
    }
}

/// Named palettes supplied by the caller.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ThemeRegistry {
    themes: BTreeMap<String, Vec<Color>>,
}

impl ThemeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// The stock material palettes.
    pub fn builtin() -> Self {
        fn parse(hexes: &[&str]) -> Vec<Color> {
            hexes
                .iter()
                .filter_map(|h| Color::from_hex(h).ok())
                .collect()
        }

        let mut reg = Self::new();
        reg.insert(
            "material-purple",
            parse(&[
                "#4a148c", "#6a1b9a", "#7b1fa2", "#8e24aa", "#9c27b0", "#ab47bc", "#ba68c8",
                "#ce93d8", "#e1bee7", "#f3e5f5",
            ]),
        );
        reg.insert(
            "material-yellow",
            parse(&[
                "#f57f17", "#f9a825", "#fbc02d", "#fdd835", "#ffeb3b", "#ffee58", "#fff176",
                "#fff59d", "#fff9c4", "#fffde7",
            ]),
        );
        reg.insert(
            "material-rainbow",
            parse(&[
                "#ffcdd2", "#f8bbd0", "#e1bee7", "#d1c4e9", "#c5cae9", "#bbdefb", "#b3e5fc",
                "#b2ebf2", "#b2dfdb", "#c8e6c9", "#dcedc8", "#f0f4c3", "#fff9c4", "#ffecb3",
                "#ffe0b2", "#ffccbc", "#d7ccc8",
            ]),
        );
        reg
    }

    /// Parse a `{ "name": ["#hex", ...] }` registry.
    pub fn from_reader<R: std::io::Read>(r: R) -> PixelatorResult<Self> {
        serde_json::from_reader(r)
            .map_err(|e| PixelatorError::serde(format!("parse theme registry JSON: {e}")))
    }

    pub fn from_path(path: impl AsRef<Path>) -> PixelatorResult<Self> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|e| {
            PixelatorError::validation(format!("open theme registry '{}': {e}", path.display()))
        })?;
        Self::from_reader(BufReader::new(f))
    }

    pub fn insert(&mut self, name: impl Into<String>, colors: Vec<Color>) {
        self.themes.insert(name.into(), colors);
    }

    /// Add every theme from `other`, replacing same-named entries.
    pub fn extend(&mut self, other: Self) {
        self.themes.extend(other.themes);
    }

    pub fn get(&self, name: &str) -> PixelatorResult<Theme> {
        let colors = self
            .themes
            .get(name)
            .ok_or_else(|| PixelatorError::unknown_theme(name))?;
        Theme::new(colors.clone())
    }

    /// Iterate `(name, colors)` in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[Color])> {
        self.themes.iter().map(|(k, v)| (k.as_str(), v.as_slice()))
    }

    pub fn len(&self) -> usize {
        self.themes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.themes.is_empty()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/theme.rs"]
mod tests;
