//! Walk mesh export from a scene
//!
//! Picks the walk mesh object out of a [`SceneProvider`], checks that it is
//! pure triangles, and writes it as a blob:
//! 1. List the scene's objects
//! 2. Take the first selected object with the walk mesh name
//! 3. Convert its geometry (rejecting non-triangles)
//! 4. Encode and write the blob

use crate::error::{Error, Result};
use crate::formats::walkmesh::{WalkMesh, write_walkmesh_file};
use crate::scene::SceneProvider;
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Layer searched when none is given.
pub const DEFAULT_LAYER: u32 = 3;

/// Object name searched when none is given.
pub const DEFAULT_OBJECT_NAME: &str = "WalkMesh";

/// What to do when the scene has no matching walk mesh.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MissingMeshPolicy {
    /// Log a warning and write nothing.
    #[default]
    Skip,
    /// Fail with [`Error::WalkMeshNotFound`].
    Fail,
}

/// Options for walk mesh export
///
/// Can be loaded from a TOML file; missing keys take their defaults:
///
/// ```toml
/// layer = 3
/// object_name = "WalkMesh"
/// on_missing = "skip"
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ExportOptions {
    /// Scene layer to export from (1-based)
    pub layer: u32,
    /// Name of the walk mesh object
    pub object_name: String,
    /// Behaviour when no object matches
    pub on_missing: MissingMeshPolicy,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            layer: DEFAULT_LAYER,
            object_name: DEFAULT_OBJECT_NAME.to_string(),
            on_missing: MissingMeshPolicy::Skip,
        }
    }
}

impl ExportOptions {
    /// Load options from a TOML file.
    ///
    /// # Errors
    /// Returns [`Error::Io`] if the file cannot be read and
    /// [`Error::ConfigParse`] if it is not valid options TOML.
    pub fn from_toml_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }

    /// Parse options from TOML text.
    ///
    /// # Errors
    /// Returns [`Error::ConfigParse`] if the text is not valid options TOML.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }

    /// Export from a different layer
    #[must_use]
    pub fn with_layer(mut self, layer: u32) -> Self {
        self.layer = layer;
        self
    }

    /// Look for a differently named object
    #[must_use]
    pub fn with_object_name(mut self, name: impl Into<String>) -> Self {
        self.object_name = name.into();
        self
    }

    /// Fail instead of skipping when no walk mesh is found
    #[must_use]
    pub fn strict(mut self) -> Self {
        self.on_missing = MissingMeshPolicy::Fail;
        self
    }
}

/// Result of a successful export
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportReport {
    /// Path of the written blob
    pub path: PathBuf,
    /// Number of vertices (and normals) written
    pub vertex_count: usize,
    /// Number of triangles written
    pub triangle_count: usize,
    /// Total blob size in bytes
    pub bytes_written: u64,
}

/// Find the walk mesh in a scene.
///
/// Returns `Ok(None)` when no selected object has the requested name. If several
/// do, the first wins and the rest are logged.
///
/// # Errors
/// Returns [`Error::UnsupportedPolygon`] or [`Error::MalformedMesh`] if the
/// matching object's geometry cannot become a walk mesh, or whatever error the
/// provider reports.
pub fn find_walk_mesh<S: SceneProvider + ?Sized>(scene: &S, options: &ExportOptions) -> Result<Option<WalkMesh>> {
    let objects = scene.objects()?;
    let mut matches = objects
        .iter()
        .filter(|o| o.selected && o.name == options.object_name);

    let Some(object) = matches.next() else {
        return Ok(None);
    };

    let extra = matches.count();
    if extra > 0 {
        tracing::warn!(
            "Found {} more objects named '{}' on layer {}; exporting only the first",
            extra,
            options.object_name,
            options.layer
        );
    }

    let mesh = object.geometry.to_walk_mesh(&object.name)?;
    tracing::info!(
        "{}: {} vertices, {} triangles",
        object.name,
        mesh.vertex_count(),
        mesh.triangle_count()
    );
    Ok(Some(mesh))
}

/// Export the scene's walk mesh to `output`.
///
/// When no walk mesh is found and the policy is [`MissingMeshPolicy::Skip`],
/// no file is written and `Ok(None)` is returned.
///
/// # Errors
/// Returns [`Error::WalkMeshNotFound`] when nothing matches under
/// [`MissingMeshPolicy::Fail`]; otherwise as [`find_walk_mesh`] and
/// [`write_walkmesh_file`].
pub fn export_walk_mesh<S, P>(scene: &S, options: &ExportOptions, output: P) -> Result<Option<ExportReport>>
where
    S: SceneProvider + ?Sized,
    P: AsRef<Path>,
{
    let output = output.as_ref();
    tracing::info!(
        "Exporting walk mesh '{}' from layer {} to {}",
        options.object_name,
        options.layer,
        output.display()
    );

    let Some(mesh) = find_walk_mesh(scene, options)? else {
        return match options.on_missing {
            MissingMeshPolicy::Skip => {
                tracing::warn!("Cannot find walk mesh '{}' on layer {}", options.object_name, options.layer);
                Ok(None)
            }
            MissingMeshPolicy::Fail => Err(Error::WalkMeshNotFound {
                name: options.object_name.clone(),
                layer: options.layer,
            }),
        };
    };

    let bytes_written = write_walkmesh_file(output, &mesh)?;
    tracing::info!("Wrote {} bytes to {}", bytes_written, output.display());

    Ok(Some(ExportReport {
        path: output.to_path_buf(),
        vertex_count: mesh.vertex_count(),
        triangle_count: mesh.triangle_count(),
        bytes_written,
    }))
}

/// Split an optional `:layer` suffix off a scene argument.
///
/// `"level.json:2"` gives `("level.json", Some(2))`; a suffix that is not a
/// number is treated as part of the path.
pub fn parse_scene_arg(arg: &str) -> (PathBuf, Option<u32>) {
    match arg.rsplit_once(':') {
        Some((path, layer)) if !path.is_empty() && layer.bytes().all(|b| b.is_ascii_digit()) => {
            match layer.parse() {
                Ok(layer) => (PathBuf::from(path), Some(layer)),
                Err(_) => (PathBuf::from(arg), None),
            }
        }
        _ => (PathBuf::from(arg), None),
    }
}
