use crate::foundation::core::Canvas;
use crate::foundation::error::{PixelatorError, PixelatorResult};
use crate::scene::model::{BackgroundDef, SKY_KEY, SceneDef};
use serde_json::{Map, Value};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// Key listing scene names in render order inside a queue file.
pub const QUEUE_KEY: &str = "queue";

/// One loaded scene.
///
/// This is the JSON-facing representation. It is validated and resolved into drawable state when
/// constructing a [`crate::session::render_session::RenderSession`].
#[derive(Debug, Clone, PartialEq)]
pub struct Scene {
    def: SceneDef,
}

impl Scene {
    /// Parse a single scene from a JSON reader.
    pub fn from_reader<R: std::io::Read>(r: R) -> PixelatorResult<Self> {
        let def: SceneDef = serde_json::from_reader(r)
            .map_err(|e| PixelatorError::serde(format!("parse scene JSON: {e}")))?;
        Ok(Self { def })
    }

    /// Parse a single scene from a JSON file on disk.
    pub fn from_path(path: impl AsRef<Path>) -> PixelatorResult<Self> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|e| {
            PixelatorError::validation(format!("open scene JSON '{}': {e}", path.display()))
        })?;
        Self::from_reader(BufReader::new(f))
    }

    pub fn from_def(def: SceneDef) -> Self {
        Self { def }
    }

    pub fn def(&self) -> &SceneDef {
        &self.def
    }

    pub fn name(&self) -> &str {
        &self.def.name
    }

    pub fn frame_count(&self) -> u64 {
        self.def.frames
    }

    pub fn canvas(&self) -> PixelatorResult<Canvas> {
        Canvas::new(self.def.width, self.def.height)
    }

    /// The background drawn as the sky, if any.
    pub fn sky(&self) -> Option<&BackgroundDef> {
        self.def.background.get(SKY_KEY)
    }

    /// Check the structural constraints that do not need a theme registry.
    pub fn validate(&self) -> PixelatorResult<()> {
        let canvas = self.canvas()?;
        if self.def.frames == 0 {
            return Err(PixelatorError::validation(format!(
                "scene '{}' must have at least one frame",
                self.def.name
            )));
        }
        for key in self.def.background.keys().filter(|k| k.as_str() != SKY_KEY) {
            tracing::warn!(scene = %self.def.name, key = %key, "ignoring non-sky background");
        }
        if let Some(sky) = self.sky()
            && sky.height > canvas.height
        {
            return Err(PixelatorError::SkyTooTall {
                sky: sky.height,
                frame: canvas.height,
            });
        }
        for mountain in &self.def.mountains {
            mountain.validate()?;
        }
        if let Some(sun) = self.sky().and_then(|sky| sky.sun.as_ref()) {
            sun.validate()?;
        }
        if let Some(reflection) = &self.def.effects.reflection
            && reflection.top >= canvas.height
        {
            tracing::warn!(
                scene = %self.def.name,
                top = reflection.top,
                "reflection horizon is below the frame"
            );
        }
        Ok(())
    }
}

/// Scenes in render order.
///
/// A queue file is an object with a `queue` array of names plus one entry per name. A file
/// without `queue` is read as a single scene.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SceneQueue {
    scenes: Vec<Scene>,
}

impl SceneQueue {
    pub fn from_reader<R: std::io::Read>(r: R) -> PixelatorResult<Self> {
        let value: Value = serde_json::from_reader(r)
            .map_err(|e| PixelatorError::serde(format!("parse scene queue JSON: {e}")))?;
        Self::from_value(value)
    }

    pub fn from_path(path: impl AsRef<Path>) -> PixelatorResult<Self> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|e| {
            PixelatorError::validation(format!("open scene queue '{}': {e}", path.display()))
        })?;
        Self::from_reader(BufReader::new(f))
    }

    pub fn from_value(value: Value) -> PixelatorResult<Self> {
        let Value::Object(mut entries) = value else {
            return Err(PixelatorError::validation(
                "scene file must be a JSON object",
            ));
        };
        let Some(queue) = entries.remove(QUEUE_KEY) else {
            let def: SceneDef = serde_json::from_value(Value::Object(entries))
                .map_err(|e| PixelatorError::serde(format!("parse scene: {e}")))?;
            return Ok(Self {
                scenes: vec![Scene::from_def(def)],
            });
        };

        let names: Vec<String> = serde_json::from_value(queue)
            .map_err(|e| PixelatorError::serde(format!("parse queue: {e}")))?;
        let mut scenes = Vec::with_capacity(names.len());
        for name in &names {
            let entry = entries.get(name).ok_or_else(|| {
                PixelatorError::validation(format!("queued scene '{name}' is not defined"))
            })?;
            let def: SceneDef = serde_json::from_value(entry.clone())
                .map_err(|e| PixelatorError::serde(format!("parse scene '{name}': {e}")))?;
            scenes.push(Scene::from_def(def));
        }
        Ok(Self { scenes })
    }

    pub fn from_defs(defs: impl IntoIterator<Item = SceneDef>) -> Self {
        Self {
            scenes: defs.into_iter().map(Scene::from_def).collect(),
        }
    }

    /// Serialize as a queue file keyed by scene name.
    pub fn to_value(&self) -> PixelatorResult<Value> {
        let mut out = Map::new();
        let names: Vec<Value> = self
            .scenes
            .iter()
            .map(|s| Value::String(s.name().to_owned()))
            .collect();
        out.insert(QUEUE_KEY.to_owned(), Value::Array(names));
        for scene in &self.scenes {
            let v = serde_json::to_value(scene.def())
                .map_err(|e| PixelatorError::serde(format!("serialize scene: {e}")))?;
            out.insert(scene.name().to_owned(), v);
        }
        Ok(Value::Object(out))
    }

    pub fn scenes(&self) -> &[Scene] {
        &self.scenes
    }

    pub fn get(&self, name: &str) -> Option<&Scene> {
        self.scenes.iter().find(|s| s.name() == name)
    }

    pub fn len(&self) -> usize {
        self.scenes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scenes.is_empty()
    }
}

impl IntoIterator for SceneQueue {
    type Item = Scene;
    type IntoIter = std::vec::IntoIter<Scene>;

    fn into_iter(self) -> Self::IntoIter {
        self.scenes.into_iter()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/document.rs"]
mod tests;
