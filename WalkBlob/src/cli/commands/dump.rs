//! CLI command for dumping a blob as JSON

use std::path::Path;

use glam::Vec3;
use serde::Serialize;

use crate::cli::progress::print_error;
use crate::formats::walkmesh::{WalkMesh, read_walkmesh_file};

#[derive(Serialize)]
struct MeshJson {
    vertices: Vec<[f32; 3]>,
    normals: Vec<[f32; 3]>,
    triangles: Vec<[u32; 3]>,
}

impl From<&WalkMesh> for MeshJson {
    fn from(mesh: &WalkMesh) -> Self {
        Self {
            vertices: mesh.vertices.iter().map(Vec3::to_array).collect(),
            normals: mesh.normals.iter().map(Vec3::to_array).collect(),
            triangles: mesh.triangles.clone(),
        }
    }
}

/// First vertex or normal with an infinite or NaN component.
fn first_non_finite(mesh: &WalkMesh) -> Option<(&'static str, usize)> {
    let find = |values: &[Vec3]| values.iter().position(|v| !v.is_finite());
    find(mesh.vertices.as_slice())
        .map(|i| ("vertex", i))
        .or_else(|| find(mesh.normals.as_slice()).map(|i| ("normal", i)))
}

pub fn execute(path: &Path, output: Option<&Path>) -> anyhow::Result<()> {
    let mesh = read_walkmesh_file(path)?;

    // JSON has no inf/NaN; serde_json writes them as null
    if let Some((kind, index)) = first_non_finite(&mesh) {
        print_error(&format!(
            "Note: {kind} {index} (and possibly others) has non-finite components, written as null"
        ));
    }

    let json = serde_json::to_string_pretty(&MeshJson::from(&mesh))?;

    match output {
        Some(output) => {
            std::fs::write(output, json)?;
            println!("Written to: {}", output.display());
        }
        None => println!("{json}"),
    }
    Ok(())
}
