//! Scene boundary
//!
//! The exporter never talks to an authoring tool directly. Anything that can
//! list named objects, say whether each is selected for export, and hand over
//! raw geometry implements [`SceneProvider`].

mod json;

use crate::error::{Error, Result};
use crate::formats::walkmesh::WalkMesh;
use glam::Vec3;

pub use json::JsonScene;

/// Raw geometry as supplied by the scene.
///
/// `normals` is aligned 1:1 with `vertices`. Polygons are vertex index lists
/// and must all be triangles to be exported.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Geometry {
    pub vertices: Vec<[f32; 3]>,
    pub normals: Vec<[f32; 3]>,
    pub polygons: Vec<Vec<u32>>,
}

impl Geometry {
    /// Convert to a walk mesh.
    ///
    /// `object_name` is only used for error reporting.
    ///
    /// # Errors
    /// Returns [`Error::UnsupportedPolygon`] for the first polygon that is not a
    /// triangle; nothing is fan-triangulated or skipped.
    /// Returns [`Error::MalformedMesh`] if normals or indices do not line up with the vertices.
    pub fn to_walk_mesh(&self, object_name: &str) -> Result<WalkMesh> {
        let mut triangles = Vec::with_capacity(self.polygons.len());
        for (polygon, indices) in self.polygons.iter().enumerate() {
            let triangle: [u32; 3] =
                indices
                    .as_slice()
                    .try_into()
                    .map_err(|_| Error::UnsupportedPolygon {
                        object: object_name.to_string(),
                        polygon,
                        vertex_count: indices.len(),
                    })?;
            triangles.push(triangle);
        }

        WalkMesh::new(
            self.vertices.iter().copied().map(Vec3::from_array).collect(),
            self.normals.iter().copied().map(Vec3::from_array).collect(),
            triangles,
        )
    }
}

/// One object in the scene.
#[derive(Debug, Clone, PartialEq)]
pub struct SceneObject {
    pub name: String,
    /// Whether the scene's own selection (layer, type, ...) includes this object.
    pub selected: bool,
    pub geometry: Geometry,
}

/// Source of scene objects for export.
pub trait SceneProvider {
    /// All objects in the scene, selected or not.
    ///
    /// # Errors
    /// Implementations report whatever prevents them from listing the scene.
    fn objects(&self) -> Result<Vec<SceneObject>>;
}

impl SceneProvider for Vec<SceneObject> {
    fn objects(&self) -> Result<Vec<SceneObject>> {
        Ok(self.clone())
    }
}
