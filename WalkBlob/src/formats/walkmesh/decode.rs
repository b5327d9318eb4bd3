//! Walk mesh decoding

use super::{RECORD_SIZE, WalkMesh};
use crate::error::{Error, MeshDefect, Result};
use crate::formats::chunk::{Chunk, Tag, read_all_chunks};
use byteorder::{ByteOrder, LittleEndian};
use glam::Vec3;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

/// Rebuild a walk mesh from a chunk sequence.
///
/// The first `vtx0`, `tri0` and `nom0` chunks are used regardless of order.
/// Repeats of those tags and unknown tags are skipped.
///
/// # Errors
/// Returns [`Error::MissingChunk`] if a required tag is absent.
/// Returns [`Error::MalformedMesh`] if a payload is not a whole number of
/// records or the assembled mesh breaks its invariants.
pub fn decode<I>(chunks: I) -> Result<WalkMesh>
where
    I: IntoIterator<Item = Chunk>,
{
    let mut vertex_data = None;
    let mut tri_data = None;
    let mut normal_data = None;

    for chunk in chunks {
        let slot = match chunk.tag {
            Tag::VTX0 => &mut vertex_data,
            Tag::TRI0 => &mut tri_data,
            Tag::NOM0 => &mut normal_data,
            other => {
                tracing::debug!("Skipping unknown chunk '{}' ({} bytes)", other, chunk.payload.len());
                continue;
            }
        };

        if slot.is_some() {
            tracing::debug!("Ignoring repeated chunk '{}'", chunk.tag);
        } else {
            *slot = Some(chunk.payload);
        }
    }

    let vertex_data = vertex_data.ok_or(Error::MissingChunk(Tag::VTX0))?;
    let tri_data = tri_data.ok_or(Error::MissingChunk(Tag::TRI0))?;
    let normal_data = normal_data.ok_or(Error::MissingChunk(Tag::NOM0))?;

    let vertices = unpack_vec3s(Tag::VTX0, &vertex_data)?;
    let triangles = unpack_triangles(&tri_data)?;
    let normals = unpack_vec3s(Tag::NOM0, &normal_data)?;

    WalkMesh::new(vertices, normals, triangles)
}

/// Read a walk mesh blob from a stream.
///
/// # Errors
/// Any framing error from the chunk reader aborts the read; otherwise as [`decode`].
pub fn read_walkmesh<R: Read>(reader: R) -> Result<WalkMesh> {
    let chunks = read_all_chunks(reader)?;
    decode(chunks)
}

/// Parse a walk mesh blob from bytes.
///
/// # Errors
/// Same as [`read_walkmesh`].
pub fn parse_walkmesh_bytes(data: &[u8]) -> Result<WalkMesh> {
    read_walkmesh(data)
}

/// Read a walk mesh blob from disk.
///
/// # Errors
/// Returns [`Error::Io`] if the file cannot be opened or read; otherwise as [`read_walkmesh`].
pub fn read_walkmesh_file<P: AsRef<Path>>(path: P) -> Result<WalkMesh> {
    let file = File::open(path.as_ref())?;
    let mesh = read_walkmesh(BufReader::new(file))?;

    tracing::debug!(
        "Loaded walk mesh from {}: {} vertices, {} triangles",
        path.as_ref().display(),
        mesh.vertex_count(),
        mesh.triangle_count()
    );
    Ok(mesh)
}

fn check_records(tag: Tag, data: &[u8]) -> Result<()> {
    if data.len() % RECORD_SIZE != 0 {
        return Err(MeshDefect::PayloadSize { tag, len: data.len() }.into());
    }
    Ok(())
}

fn unpack_vec3s(tag: Tag, data: &[u8]) -> Result<Vec<Vec3>> {
    check_records(tag, data)?;
    Ok(data
        .chunks_exact(RECORD_SIZE)
        .map(|r| {
            Vec3::new(
                LittleEndian::read_f32(&r[0..4]),
                LittleEndian::read_f32(&r[4..8]),
                LittleEndian::read_f32(&r[8..12]),
            )
        })
        .collect())
}

fn unpack_triangles(data: &[u8]) -> Result<Vec<[u32; 3]>> {
    check_records(Tag::TRI0, data)?;
    Ok(data
        .chunks_exact(RECORD_SIZE)
        .map(|r| {
            [
                LittleEndian::read_u32(&r[0..4]),
                LittleEndian::read_u32(&r[4..8]),
                LittleEndian::read_u32(&r[8..12]),
            ]
        })
        .collect())
}
