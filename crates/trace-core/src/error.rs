//! Error types for trace access and transform operations.
//!
//! Transforms absorb configuration gaps and unresolvable targets silently, so
//! the variants here only cover collaborator failures: malformed field paths,
//! writes through values that cannot hold children, and pipeline assembly.

use thiserror::Error;

/// Result type alias for trace access operations.
pub type TraceResult<T> = core::result::Result<T, TraceError>;

/// Result type alias for transform operations.
pub type TransformResult<T> = core::result::Result<T, TransformError>;

/// Errors produced while parsing a dotted field path.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PathError {
    /// The path string was empty.
    #[error("Field path is empty")]
    Empty,

    /// A segment between two dots was empty.
    #[error("Empty segment at byte {position} in field path '{path}'")]
    EmptySegment {
        /// The full path string.
        path: String,
        /// Byte offset of the offending segment.
        position: usize,
    },

    /// A bracket index was not closed or not a non-negative integer.
    #[error("Malformed index '{index}' in field path '{path}'")]
    BadIndex {
        /// The full path string.
        path: String,
        /// Raw text found between the brackets.
        index: String,
    },
}

/// Errors that can occur while reading or writing trace fields.
#[derive(Debug, Error)]
pub enum TraceError {
    /// The field path could not be parsed.
    #[error("Invalid field path")]
    InvalidPath(#[from] PathError),

    /// A write walked into a value that is neither an object nor an array.
    #[error("Cannot write '{path}': '{parent}' is not a container")]
    NotAContainer {
        /// Path being written.
        path: String,
        /// Prefix of the path that resolved to a scalar.
        parent: String,
    },

    /// The trace root was not a JSON object.
    #[error("Trace must be a JSON object, got {0}")]
    NotAnObject(&'static str),

    /// JSON (de)serialization failed.
    #[error("Trace serialization failed: {0}")]
    Json(#[from] serde_json::Error),
}

/// Errors that can occur while building or running a transform chain.
#[derive(Debug, Error)]
pub enum TransformError {
    /// Underlying trace access failed.
    #[error("Trace access failed")]
    Trace(#[from] TraceError),

    /// No transform is registered under the given type name.
    #[error("Unknown transform type: '{0}'")]
    UnknownTransform(String),

    /// A transform spec was not a JSON object or had no `type`.
    #[error("Malformed transform spec: {0}")]
    MalformedSpec(String),

    /// Pipeline configuration error.
    #[error("Pipeline error: {0}")]
    PipelineError(String),
}

impl From<PathError> for TransformError {
    fn from(err: PathError) -> Self {
        Self::Trace(TraceError::InvalidPath(err))
    }
}
