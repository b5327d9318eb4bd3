//! Chunk writing

use super::{Chunk, ChunkHeader, Tag};
use crate::error::{Error, Result};
use std::io::Write;

/// Write one chunk: the tag verbatim, the payload length as u32 LE, then the payload.
///
/// The length field is always computed from `payload` itself.
///
/// # Errors
/// Returns [`Error::InvalidArgument`] if `tag` is not exactly 4 bytes or the
/// payload does not fit a 32-bit length field.
/// Returns [`Error::Io`] if the stream rejects the write.
pub fn write_chunk<W: Write>(writer: &mut W, tag: &[u8], payload: &[u8]) -> Result<()> {
    let tag = Tag::new(tag)?;
    let length = u32::try_from(payload.len()).map_err(|_| Error::InvalidArgument {
        message: format!(
            "chunk '{tag}' payload of {} bytes exceeds the 32-bit length field",
            payload.len()
        ),
    })?;

    ChunkHeader { tag, length }.write_to(writer)?;
    writer.write_all(payload)?;
    Ok(())
}

/// Write a sequence of chunks back-to-back, returning the number of bytes written.
///
/// # Errors
/// Same as [`write_chunk`], for the first chunk that fails.
pub fn write_chunks<W: Write>(writer: &mut W, chunks: &[Chunk]) -> Result<u64> {
    let mut written = 0u64;
    for chunk in chunks {
        write_chunk(writer, chunk.tag.as_bytes(), &chunk.payload)?;
        written += (ChunkHeader::SIZE + chunk.payload.len()) as u64;
    }
    Ok(written)
}
