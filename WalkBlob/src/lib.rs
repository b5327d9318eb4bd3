//! # WalkBlob
//!
//! A pure-Rust library for the chunked walk-mesh blob format: a flat sequence of
//! tagged, length-prefixed chunks carrying a triangle mesh that characters can
//! walk on.
//!
//! ## Modules
//!
//! - **formats** - Chunk framing and the walk mesh serializer (`vtx0`/`tri0`/`nom0`)
//! - **scene** - The boundary to scene geometry, plus a JSON scene reader
//! - **export** - Find the walk mesh in a scene and write it as a blob
//! - **navigation** - Place points on a decoded mesh and walk them across it
//!
//! ## Quick Start
//!
//! ### Writing and reading a blob
//!
//! ```
//! use walkblob::prelude::*;
//! use glam::Vec3;
//!
//! let mesh = WalkMesh::new(
//!     vec![Vec3::ZERO, Vec3::X, Vec3::Y],
//!     vec![Vec3::Z; 3],
//!     vec![[0, 1, 2]],
//! )?;
//!
//! let bytes = serialize_walkmesh(&mesh)?;
//! assert_eq!(bytes.len(), (8 + 36) + (8 + 12) + (8 + 36));
//!
//! let decoded = parse_walkmesh_bytes(&bytes)?;
//! assert_eq!(decoded, mesh);
//! # Ok::<(), walkblob::Error>(())
//! ```
//!
//! ### Exporting from a scene file
//!
//! ```no_run
//! use walkblob::prelude::*;
//!
//! let options = ExportOptions::default().strict();
//! let scene = JsonScene::from_path("level.json", options.layer)?;
//! export_walk_mesh(&scene, &options, "level.walk")?;
//! # Ok::<(), walkblob::Error>(())
//! ```
//!
//! ## Feature Flags
//!
//! - `cli` - Enables the `walkblob` command-line binary

pub mod error;
pub mod export;
pub mod formats;
pub mod navigation;
pub mod scene;

// Re-exports for convenience
pub use error::{Error, MeshDefect, Result};

/// Prelude module for common imports
pub mod prelude {
    pub use crate::error::{Error, MeshDefect, Result};

    // Chunk framing
    pub use crate::formats::chunk::{
        Chunk, ChunkHeader, ChunkReader, Tag, read_all_chunks, read_chunks, write_chunk, write_chunks,
    };

    // Walk mesh blobs
    pub use crate::formats::walkmesh::{
        WalkMesh, decode, encode, parse_walkmesh_bytes, read_walkmesh, read_walkmesh_file,
        serialize_walkmesh, write_walkmesh, write_walkmesh_file,
    };

    // Scene export
    pub use crate::export::{
        ExportOptions, ExportReport, MissingMeshPolicy, export_walk_mesh, find_walk_mesh,
        parse_scene_arg,
    };
    pub use crate::scene::{Geometry, JsonScene, SceneObject, SceneProvider};

    pub use crate::navigation::{WalkNavigator, WalkPoint};
}

#[cfg(feature = "cli")]
pub mod cli;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
