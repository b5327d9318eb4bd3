//! Walk mesh blob format
//!
//! A walk mesh blob is three chunks:
//!
//! | Tag    | Payload                                         |
//! |--------|-------------------------------------------------|
//! | `vtx0` | vertex positions, 3 x f32 LE per vertex         |
//! | `tri0` | triangle vertex indices, 3 x u32 LE per triangle |
//! | `nom0` | vertex normals, 3 x f32 LE per vertex            |
//!
//! Readers dispatch on tag only; chunk order carries no meaning and unknown
//! chunks are skipped.

mod decode;
mod encode;

use crate::error::{MeshDefect, Result};
use glam::Vec3;

// Public API
pub use decode::{decode, parse_walkmesh_bytes, read_walkmesh, read_walkmesh_file};
pub use encode::{encode, serialize_walkmesh, write_walkmesh, write_walkmesh_file};

/// Size of one vertex, normal or triangle record (three 4-byte values).
pub const RECORD_SIZE: usize = 12;

/// A triangle mesh that can be walked on.
///
/// `normals[i]` is the normal of `vertices[i]`. Triangles index into both.
///
/// `PartialEq` compares coordinates as floats, so a mesh containing NaN is
/// never equal to itself. Compare `f32::to_bits` to check that a blob
/// round-trip kept every value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WalkMesh {
    pub vertices: Vec<Vec3>,
    pub normals: Vec<Vec3>,
    /// Vertex indices, counter-clockwise.
    pub triangles: Vec<[u32; 3]>,
}

impl WalkMesh {
    /// Build a mesh, checking its invariants.
    ///
    /// # Errors
    /// Returns [`Error::MalformedMesh`](crate::Error::MalformedMesh) if the
    /// normal count differs from the vertex count or a triangle index is out of range.
    pub fn new(vertices: Vec<Vec3>, normals: Vec<Vec3>, triangles: Vec<[u32; 3]>) -> Result<Self> {
        let mesh = Self {
            vertices,
            normals,
            triangles,
        };
        mesh.validate()?;
        Ok(mesh)
    }

    /// Check the walk mesh invariants.
    ///
    /// # Errors
    /// Returns [`Error::MalformedMesh`](crate::Error::MalformedMesh) naming the first violation.
    pub fn validate(&self) -> Result<()> {
        let vertex_count = self.vertices.len();
        if self.normals.len() != vertex_count {
            return Err(MeshDefect::NormalCountMismatch {
                vertices: vertex_count,
                normals: self.normals.len(),
            }
            .into());
        }
        if u32::try_from(vertex_count).is_err() {
            return Err(MeshDefect::TooManyVertices { count: vertex_count }.into());
        }

        for (triangle, indices) in self.triangles.iter().enumerate() {
            if let Some(&index) = indices.iter().find(|&&i| i as usize >= vertex_count) {
                return Err(MeshDefect::IndexOutOfRange {
                    triangle,
                    index,
                    vertex_count,
                }
                .into());
            }
        }
        Ok(())
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn triangle_count(&self) -> usize {
        self.triangles.len()
    }

    /// True when the mesh has no vertices and no triangles.
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty() && self.triangles.is_empty()
    }

    /// Corner positions of a triangle.
    ///
    /// # Panics
    /// Panics if an index is out of range; validated meshes never are.
    #[must_use]
    pub fn triangle_positions(&self, triangle: [u32; 3]) -> [Vec3; 3] {
        triangle.map(|i| self.vertices[i as usize])
    }
}
