//! Error types for `WalkBlob`

use std::fmt;

use thiserror::Error;

use crate::formats::chunk::Tag;

/// The error type for `WalkBlob` operations.
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum Error {
    // ==================== IO Errors ====================
    /// IO error from stream or file operations.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // ==================== Chunk Framing Errors ====================
    /// A call into the chunk codec broke its contract (e.g. a tag that is not 4 bytes).
    #[error("invalid argument: {message}")]
    InvalidArgument {
        /// What was wrong with the call.
        message: String,
    },

    /// A chunk ended before its header or payload was complete.
    ///
    /// `tag` is `None` when the stream ended inside the chunk header itself.
    #[error("malformed chunk {}: expected {expected} bytes, only {actual} remain", DisplayTag(.tag))]
    MalformedChunk {
        /// The chunk's tag, if the header was read far enough to know it.
        tag: Option<Tag>,
        /// Bytes the header (or length field) promised.
        expected: u64,
        /// Bytes actually available before end of stream.
        actual: u64,
    },

    // ==================== Walk Mesh Errors ====================
    /// A required chunk was not present in the blob.
    #[error("missing required chunk '{0}'")]
    MissingChunk(Tag),

    /// The decoded (or supplied) mesh violates a walk mesh invariant.
    #[error("malformed walk mesh: {0}")]
    MalformedMesh(MeshDefect),

    /// The encoder produced a payload whose size disagrees with the mesh it encoded.
    ///
    /// This indicates a defect in the encoder itself, not bad input.
    #[error("encoder invariant violated for chunk '{tag}': expected {expected} bytes, produced {actual}")]
    InvariantViolation {
        /// The chunk whose payload was the wrong size.
        tag: Tag,
        /// Size derived from the mesh element count.
        expected: usize,
        /// Size of the payload actually built.
        actual: usize,
    },

    // ==================== Scene Errors ====================
    /// A source polygon is not a triangle.
    #[error("object '{object}': polygon {polygon} has {vertex_count} vertices, only triangles are supported")]
    UnsupportedPolygon {
        /// Name of the scene object the polygon belongs to.
        object: String,
        /// Index of the polygon within the object.
        polygon: usize,
        /// Number of vertices the polygon has.
        vertex_count: usize,
    },

    /// No selected scene object matched the requested walk mesh name.
    #[error("cannot find walk mesh '{name}' on layer {layer}")]
    WalkMeshNotFound {
        /// The object name that was searched for.
        name: String,
        /// The layer that was searched.
        layer: u32,
    },

    // ==================== Parsing Errors ====================
    /// JSON scene parsing or serialization error.
    #[error("scene JSON error: {0}")]
    SceneParse(#[from] serde_json::Error),

    /// TOML options file parsing error.
    #[error("options TOML error: {0}")]
    ConfigParse(#[from] toml::de::Error),
}

/// The specific walk mesh invariant that was violated.
#[non_exhaustive]
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MeshDefect {
    /// Every vertex needs exactly one normal.
    #[error("{vertices} vertices but {normals} normals")]
    NormalCountMismatch {
        /// Number of vertex positions.
        vertices: usize,
        /// Number of vertex normals.
        normals: usize,
    },

    /// A triangle references a vertex that does not exist.
    #[error("triangle {triangle} references vertex {index}, but there are only {vertex_count} vertices")]
    IndexOutOfRange {
        /// Index of the offending triangle.
        triangle: usize,
        /// The out-of-range vertex index.
        index: u32,
        /// Number of vertices in the mesh.
        vertex_count: usize,
    },

    /// A chunk payload is not a whole number of 12-byte records.
    #[error("chunk '{tag}' payload of {len} bytes is not a multiple of 12")]
    PayloadSize {
        /// The chunk whose payload is misaligned.
        tag: Tag,
        /// Payload length in bytes.
        len: usize,
    },

    /// More vertices than a `u32` triangle index can address.
    #[error("{count} vertices cannot be addressed by 32-bit indices")]
    TooManyVertices {
        /// Number of vertices.
        count: usize,
    },
}

impl From<MeshDefect> for Error {
    fn from(defect: MeshDefect) -> Self {
        Error::MalformedMesh(defect)
    }
}

/// Formats an optional tag for error messages.
struct DisplayTag<'a>(&'a Option<Tag>);

impl fmt::Display for DisplayTag<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some(tag) => write!(f, "'{tag}'"),
            None => f.write_str("header"),
        }
    }
}

/// A specialized Result type for `WalkBlob` operations.
pub type Result<T> = std::result::Result<T, Error>;
