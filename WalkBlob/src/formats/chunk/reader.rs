//! Chunk reading
//!
//! Chunks are produced lazily, one at a time, until the stream runs out at a
//! chunk boundary. A stream that ends anywhere else is corrupt and yields
//! [`Error::MalformedChunk`] instead of a short chunk.

use super::{Chunk, ChunkHeader, Tag};
use crate::error::{Error, Result};
use std::io::{ErrorKind, Read};

/// Lazily read chunks from a stream.
///
/// The returned iterator is finite and not restartable; re-reading needs a
/// fresh stream or position.
pub fn read_chunks<R: Read>(reader: R) -> ChunkReader<R> {
    ChunkReader::new(reader)
}

/// Read every chunk from a stream.
///
/// # Errors
/// Returns the first framing or IO error; no partial chunk list is returned.
pub fn read_all_chunks<R: Read>(reader: R) -> Result<Vec<Chunk>> {
    read_chunks(reader).collect()
}

/// Iterator over the chunks of a stream.
///
/// After yielding an error the iterator is exhausted.
#[derive(Debug)]
pub struct ChunkReader<R> {
    reader: R,
    done: bool,
}

impl<R: Read> ChunkReader<R> {
    pub fn new(reader: R) -> Self {
        Self { reader, done: false }
    }

    /// Give back the underlying stream.
    pub fn into_inner(self) -> R {
        self.reader
    }

    fn read_chunk(&mut self) -> Result<Option<Chunk>> {
        let mut header = [0u8; ChunkHeader::SIZE];
        let got = read_up_to(&mut self.reader, &mut header)?;
        if got == 0 {
            return Ok(None);
        }

        let tag = (got >= 4).then(|| Tag::from_bytes([header[0], header[1], header[2], header[3]]));
        if got < ChunkHeader::SIZE {
            return Err(Error::MalformedChunk {
                tag,
                expected: ChunkHeader::SIZE as u64,
                actual: got as u64,
            });
        }

        let ChunkHeader { tag, length } = ChunkHeader::from_bytes(&header);

        // Grow the buffer as bytes arrive rather than trusting the length field up front
        let mut payload = Vec::new();
        (&mut self.reader)
            .take(u64::from(length))
            .read_to_end(&mut payload)?;

        if payload.len() < length as usize {
            return Err(Error::MalformedChunk {
                tag: Some(tag),
                expected: u64::from(length),
                actual: payload.len() as u64,
            });
        }

        tracing::trace!("Read chunk '{}' ({} bytes)", tag, length);
        Ok(Some(Chunk { tag, payload }))
    }
}

impl<R: Read> Iterator for ChunkReader<R> {
    type Item = Result<Chunk>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        match self.read_chunk() {
            Ok(Some(chunk)) => Some(Ok(chunk)),
            Ok(None) => {
                self.done = true;
                None
            }
            Err(e) => {
                self.done = true;
                Some(Err(e))
            }
        }
    }
}

impl<R: Read> std::iter::FusedIterator for ChunkReader<R> {}

/// Fill `buf` as far as the stream allows, returning the number of bytes read.
fn read_up_to<R: Read>(reader: &mut R, buf: &mut [u8]) -> std::io::Result<usize> {
    let mut filled = 0;
    while filled < buf.len() {
        match reader.read(&mut buf[filled..]) {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(e) if e.kind() == ErrorKind::Interrupted => {}
            Err(e) => return Err(e),
        }
    }
    Ok(filled)
}
