//! File format handlers
//!
//! `chunk` is the container framing; `walkmesh` is the mesh layout carried in it.

pub mod chunk;
pub mod walkmesh;

// Re-export chunk types for convenience
pub use chunk::{Chunk, ChunkHeader, ChunkReader, Tag, read_all_chunks, read_chunks, write_chunk, write_chunks};

// Re-export main walk mesh API
pub use walkmesh::{
    WalkMesh, decode, encode, parse_walkmesh_bytes, read_walkmesh, read_walkmesh_file,
    serialize_walkmesh, write_walkmesh, write_walkmesh_file,
};
