//! JSON scene documents
//!
//! A plain-data stand-in for an authoring tool's scene graph:
//!
//! ```json
//! {
//!   "objects": [
//!     {
//!       "name": "WalkMesh",
//!       "kind": "mesh",
//!       "layers": [3],
//!       "vertices": [[0, 0, 0], [1, 0, 0], [0, 1, 0]],
//!       "normals":  [[0, 0, 1], [0, 0, 1], [0, 0, 1]],
//!       "polygons": [[0, 1, 2]]
//!     }
//!   ]
//! }
//! ```
//!
//! Layers are numbered from 1. An object is selected when it is a mesh on the
//! scene's active layer.

use super::{Geometry, SceneObject, SceneProvider};
use crate::error::Result;
use serde::Deserialize;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
enum ObjectKind {
    Mesh,
    // Cameras, lights, armatures, ...
    #[serde(other)]
    Other,
}

fn default_kind() -> ObjectKind {
    ObjectKind::Mesh
}

#[derive(Debug, Clone, Deserialize)]
struct JsonObject {
    name: String,
    #[serde(default = "default_kind")]
    kind: ObjectKind,
    #[serde(default)]
    layers: Vec<u32>,
    #[serde(default)]
    vertices: Vec<[f32; 3]>,
    #[serde(default)]
    normals: Vec<[f32; 3]>,
    #[serde(default)]
    polygons: Vec<Vec<u32>>,
}

#[derive(Debug, Clone, Deserialize)]
struct SceneDocument {
    #[serde(default)]
    objects: Vec<JsonObject>,
}

/// A scene loaded from a JSON document, viewed through one layer.
#[derive(Debug, Clone)]
pub struct JsonScene {
    objects: Vec<JsonObject>,
    layer: u32,
}

impl JsonScene {
    /// Load a scene file, selecting objects on `layer`.
    ///
    /// # Errors
    /// Returns [`Error::Io`](crate::Error::Io) if the file cannot be read and
    /// [`Error::SceneParse`](crate::Error::SceneParse) if it is not a valid scene document.
    pub fn from_path<P: AsRef<Path>>(path: P, layer: u32) -> Result<Self> {
        let file = File::open(path.as_ref())?;
        let document: SceneDocument = serde_json::from_reader(BufReader::new(file))?;

        tracing::debug!(
            "Loaded scene {} ({} objects)",
            path.as_ref().display(),
            document.objects.len()
        );
        Ok(Self {
            objects: document.objects,
            layer,
        })
    }

    /// Parse a scene from a JSON string, selecting objects on `layer`.
    ///
    /// # Errors
    /// Returns [`Error::SceneParse`](crate::Error::SceneParse) if the text is not a valid scene document.
    pub fn from_json_str(json: &str, layer: u32) -> Result<Self> {
        let document: SceneDocument = serde_json::from_str(json)?;
        Ok(Self {
            objects: document.objects,
            layer,
        })
    }

    /// The layer this scene selects from.
    pub fn layer(&self) -> u32 {
        self.layer
    }

    fn is_selected(&self, object: &JsonObject) -> bool {
        object.kind == ObjectKind::Mesh && object.layers.contains(&self.layer)
    }
}

impl SceneProvider for JsonScene {
    fn objects(&self) -> Result<Vec<SceneObject>> {
        Ok(self
            .objects
            .iter()
            .map(|o| SceneObject {
                name: o.name.clone(),
                selected: self.is_selected(o),
                geometry: Geometry {
                    vertices: o.vertices.clone(),
                    normals: o.normals.clone(),
                    polygons: o.polygons.clone(),
                },
            })
            .collect())
    }
}
