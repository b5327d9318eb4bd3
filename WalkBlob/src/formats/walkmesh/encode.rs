//! Walk mesh encoding

use super::{RECORD_SIZE, WalkMesh};
use crate::error::{Error, Result};
use crate::formats::chunk::{Chunk, Tag, write_chunks};
use byteorder::{LittleEndian, WriteBytesExt};
use glam::Vec3;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Encode a walk mesh into its three chunks, in the order `vtx0`, `tri0`, `nom0`.
///
/// # Errors
/// Returns [`Error::MalformedMesh`] if the mesh breaks its invariants.
/// Returns [`Error::InvariantViolation`] if a built payload does not match the
/// size implied by the mesh.
pub fn encode(mesh: &WalkMesh) -> Result<Vec<Chunk>> {
    mesh.validate()?;

    let vertex_data = pack_vec3s(&mesh.vertices)?;
    let tri_data = pack_triangles(&mesh.triangles)?;
    let normal_data = pack_vec3s(&mesh.normals)?;

    // Check that we built as much data as the mesh calls for
    check_size(Tag::VTX0, mesh.vertices.len(), &vertex_data)?;
    check_size(Tag::TRI0, mesh.triangles.len(), &tri_data)?;
    check_size(Tag::NOM0, mesh.vertices.len(), &normal_data)?;

    Ok(vec![
        Chunk::new(Tag::VTX0, vertex_data),
        Chunk::new(Tag::TRI0, tri_data),
        Chunk::new(Tag::NOM0, normal_data),
    ])
}

/// Write a walk mesh blob to a stream, returning the number of bytes written.
///
/// The mesh is fully encoded before the first byte reaches the stream.
///
/// # Errors
/// Same as [`encode`], plus [`Error::Io`] for stream failures.
pub fn write_walkmesh<W: Write>(writer: &mut W, mesh: &WalkMesh) -> Result<u64> {
    let chunks = encode(mesh)?;
    write_chunks(writer, &chunks)
}

/// Serialize a walk mesh blob to bytes.
///
/// # Errors
/// Same as [`encode`].
pub fn serialize_walkmesh(mesh: &WalkMesh) -> Result<Vec<u8>> {
    let mut output = Vec::new();
    write_walkmesh(&mut output, mesh)?;
    Ok(output)
}

/// Write a walk mesh blob to disk, returning the number of bytes written.
///
/// The file is only created once encoding has succeeded.
///
/// # Errors
/// Same as [`encode`], plus [`Error::Io`] if the file cannot be written.
pub fn write_walkmesh_file<P: AsRef<Path>>(path: P, mesh: &WalkMesh) -> Result<u64> {
    let chunks = encode(mesh)?;

    let file = File::create(path.as_ref())?;
    let mut writer = BufWriter::new(file);
    let written = write_chunks(&mut writer, &chunks)?;
    writer.flush()?;

    tracing::debug!("Wrote {} bytes to {}", written, path.as_ref().display());
    Ok(written)
}

fn pack_vec3s(values: &[Vec3]) -> Result<Vec<u8>> {
    let mut buffer = Vec::with_capacity(values.len() * RECORD_SIZE);
    for v in values {
        buffer.write_f32::<LittleEndian>(v.x)?;
        buffer.write_f32::<LittleEndian>(v.y)?;
        buffer.write_f32::<LittleEndian>(v.z)?;
    }
    Ok(buffer)
}

fn pack_triangles(triangles: &[[u32; 3]]) -> Result<Vec<u8>> {
    let mut buffer = Vec::with_capacity(triangles.len() * RECORD_SIZE);
    for triangle in triangles {
        for &index in triangle {
            buffer.write_u32::<LittleEndian>(index)?;
        }
    }
    Ok(buffer)
}

fn check_size(tag: Tag, count: usize, payload: &[u8]) -> Result<()> {
    let expected = count * RECORD_SIZE;
    if payload.len() != expected {
        return Err(Error::InvariantViolation {
            tag,
            expected,
            actual: payload.len(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::MeshDefect;

    fn unit_triangle() -> WalkMesh {
        WalkMesh::new(
            vec![Vec3::new(0.0, 0.0, 0.0), Vec3::new(1.0, 0.0, 0.0), Vec3::new(0.0, 1.0, 0.0)],
            vec![Vec3::new(0.0, 0.0, 1.0); 3],
            vec![[0, 1, 2]],
        )
        .unwrap()
    }

    #[test]
    fn test_encode_unit_triangle() {
        let chunks = encode(&unit_triangle()).unwrap();
        assert_eq!(chunks.len(), 3);

        assert_eq!(chunks[0].tag, Tag::VTX0);
        assert_eq!(chunks[0].payload.len(), 36);
        // Second vertex x = 1.0f32 = 0x3f800000
        assert_eq!(&chunks[0].payload[12..16], &[0x00, 0x00, 0x80, 0x3f]);

        assert_eq!(chunks[1].tag, Tag::TRI0);
        assert_eq!(chunks[1].payload, vec![0, 0, 0, 0, 1, 0, 0, 0, 2, 0, 0, 0]);

        assert_eq!(chunks[2].tag, Tag::NOM0);
        assert_eq!(chunks[2].payload.len(), 36);
        assert_eq!(&chunks[2].payload[8..12], &[0x00, 0x00, 0x80, 0x3f]);
    }

    #[test]
    fn test_encode_empty_mesh() {
        let chunks = encode(&WalkMesh::default()).unwrap();
        let tags: Vec<Tag> = chunks.iter().map(|c| c.tag).collect();
        assert_eq!(tags, vec![Tag::VTX0, Tag::TRI0, Tag::NOM0]);
        assert!(chunks.iter().all(|c| c.payload.is_empty()));
    }

    #[test]
    fn test_encode_rejects_bad_input_before_packing() {
        let mut mesh = unit_triangle();
        mesh.normals.pop();
        let err = encode(&mesh).unwrap_err();
        assert!(matches!(err, Error::MalformedMesh(MeshDefect::NormalCountMismatch { .. })));
    }

    #[test]
    fn test_check_size_reports_violation() {
        let err = check_size(Tag::NOM0, 3, &[0u8; 24]).unwrap_err();
        assert!(matches!(
            err,
            Error::InvariantViolation { tag: Tag::NOM0, expected: 36, actual: 24 }
        ));
    }

    #[test]
    fn test_serialize_layout() {
        let bytes = serialize_walkmesh(&unit_triangle()).unwrap();
        assert_eq!(bytes.len(), (8 + 36) + (8 + 12) + (8 + 36));
        assert_eq!(&bytes[0..8], b"vtx0\x24\x00\x00\x00");
        assert_eq!(&bytes[44..52], b"tri0\x0c\x00\x00\x00");
        assert_eq!(&bytes[64..72], b"nom0\x24\x00\x00\x00");
    }

    #[test]
    fn test_file_not_created_on_encode_failure() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.blob");

        let mut mesh = unit_triangle();
        mesh.triangles.push([0, 1, 9]);
        assert!(write_walkmesh_file(&path, &mesh).is_err());
        assert!(!path.exists());
    }
}
