//! Tagged, length-prefixed chunk framing
//!
//! Every chunk on disk is laid out as:
//!
//! ```text
//! [4 bytes tag][4 bytes u32 LE payload length][payload]
//! ```
//!
//! Chunks are written back-to-back with no file header, footer or count;
//! end of stream is the only terminator. This module knows nothing about
//! what the payloads mean.

mod reader;
mod writer;

use std::fmt;
use std::io::Write;

use byteorder::{ByteOrder, LittleEndian, WriteBytesExt};

use crate::error::{Error, Result};

// Public API
pub use reader::{ChunkReader, read_all_chunks, read_chunks};
pub use writer::{write_chunk, write_chunks};

/// A 4-byte opaque chunk identifier.
///
/// Tags are conventionally ASCII (`vtx0`) but are compared as raw bytes and
/// never null-terminated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Tag([u8; 4]);

impl Tag {
    /// Vertex positions, 12 bytes per vertex.
    pub const VTX0: Tag = Tag(*b"vtx0");
    /// Triangle vertex indices, 12 bytes per triangle.
    pub const TRI0: Tag = Tag(*b"tri0");
    /// Vertex normals, 12 bytes per vertex.
    pub const NOM0: Tag = Tag(*b"nom0");

    /// Build a tag from a byte slice.
    ///
    /// # Errors
    /// Returns [`Error::InvalidArgument`] unless `bytes` is exactly 4 bytes long.
    pub fn new(bytes: &[u8]) -> Result<Tag> {
        let raw: [u8; 4] = bytes.try_into().map_err(|_| Error::InvalidArgument {
            message: format!("chunk tag must be exactly 4 bytes, got {}", bytes.len()),
        })?;
        Ok(Tag(raw))
    }

    /// Build a tag from its four bytes.
    #[must_use]
    pub const fn from_bytes(bytes: [u8; 4]) -> Tag {
        Tag(bytes)
    }

    /// The raw tag bytes.
    #[must_use]
    pub const fn as_bytes(&self) -> &[u8; 4] {
        &self.0
    }
}

impl From<[u8; 4]> for Tag {
    fn from(bytes: [u8; 4]) -> Self {
        Tag(bytes)
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for &b in &self.0 {
            if b.is_ascii_graphic() || b == b' ' {
                write!(f, "{}", b as char)?;
            } else {
                write!(f, "\\x{b:02x}")?;
            }
        }
        Ok(())
    }
}

/// The fixed-size part of a chunk: tag plus payload length.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChunkHeader {
    pub tag: Tag,
    pub length: u32,
}

impl ChunkHeader {
    /// Header size in bytes (tag + length).
    pub const SIZE: usize = 8;

    /// Parse a header from its on-disk bytes.
    #[must_use]
    pub fn from_bytes(bytes: &[u8; Self::SIZE]) -> Self {
        Self {
            tag: Tag([bytes[0], bytes[1], bytes[2], bytes[3]]),
            length: LittleEndian::read_u32(&bytes[4..8]),
        }
    }

    /// Write the tag verbatim followed by the length as u32 LE.
    ///
    /// # Errors
    /// Returns [`Error::Io`] if the stream rejects the write.
    pub fn write_to<W: Write>(&self, writer: &mut W) -> Result<()> {
        writer.write_all(self.tag.as_bytes())?;
        writer.write_u32::<LittleEndian>(self.length)?;
        Ok(())
    }
}

/// A decoded chunk: its tag and the exact payload bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chunk {
    pub tag: Tag,
    pub payload: Vec<u8>,
}

impl Chunk {
    pub fn new(tag: Tag, payload: impl Into<Vec<u8>>) -> Self {
        Self {
            tag,
            payload: payload.into(),
        }
    }

    /// Total bytes this chunk occupies on disk, header included.
    #[must_use]
    pub fn encoded_len(&self) -> usize {
        ChunkHeader::SIZE + self.payload.len()
    }
}
